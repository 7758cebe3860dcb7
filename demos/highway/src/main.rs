//! highway: terminal driver for the rust_lanes traffic simulator.
//!
//! Prints the road after every tick, one row per lane, each car drawn as the
//! upper-cased initial of its label.  With `--intents` the cell each car is
//! heading for is marked with the lower-cased initial.
//!
//! ```text
//! highway [SCENARIO] [--ticks N] [--intents] [--then SCENARIO]...
//!
//!   SCENARIO   built-in scenario index (0 = weave, 1 = converge),
//!              a CSV file (tick,initial_lane,goal_lane,label[,position,speed]),
//!              or `random:<seed>`
//!   --then     once the current scenario has run, reload the road with
//!              another one and run again from tick 0
//! ```
//!
//! Set `RUST_LOG=debug` to see per-tick conflict summaries.

mod road;

use std::path::Path;
use std::time::Instant;

use anyhow::{Context, Result, bail};

use lt_agent::Roster;
use lt_behavior::CruiseAndMerge;
use lt_core::{SimConfig, Tick};
use lt_scenario::{RandomScenario, ScenarioTable, builtin, load_scenario_csv};
use lt_sim::{Sim, SimBuilder, SimObserver, TickReport};

use road::draw_road;

// ── Constants ─────────────────────────────────────────────────────────────────

const NUM_LANES:     u32   = 5;
const TARGET_SPEED:  u32   = 2;
const DEFAULT_TICKS: u64   = 12;
const RANDOM_AGENTS: usize = 12;
const RANDOM_SPAWN:  u64   = 8;

// ── Command line ──────────────────────────────────────────────────────────────

struct Args {
    scenario:     String,
    then:         Vec<String>,
    ticks:        u64,
    show_intents: bool,
}

fn parse_args() -> Result<Args> {
    let mut args = Args {
        scenario:     "0".into(),
        then:         Vec::new(),
        ticks:        DEFAULT_TICKS,
        show_intents: false,
    };
    let mut it = std::env::args().skip(1);
    while let Some(arg) = it.next() {
        match arg.as_str() {
            "--intents" => args.show_intents = true,
            "--ticks" => {
                let n = it.next().context("--ticks needs a value")?;
                args.ticks = n.parse().with_context(|| format!("bad tick count {n:?}"))?;
            }
            "--then" => args.then.push(it.next().context("--then needs a scenario")?),
            flag if flag.starts_with("--") => bail!("unknown option {flag}"),
            other => args.scenario = other.to_owned(),
        }
    }
    Ok(args)
}

fn load_scenario(source: &str) -> Result<(String, ScenarioTable)> {
    if let Some(seed) = source.strip_prefix("random:") {
        let seed: u64 = seed.parse().with_context(|| format!("bad seed {seed:?}"))?;
        let table = RandomScenario {
            agents:      RANDOM_AGENTS,
            spawn_ticks: RANDOM_SPAWN,
            num_lanes:   NUM_LANES,
            seed,
        }
        .generate()?;
        return Ok((format!("random (seed {seed})"), table));
    }
    if let Ok(index) = source.parse::<usize>() {
        let table = builtin::by_index(index)?;
        let name = if index == 0 { "weave" } else { "converge" };
        return Ok((name.to_owned(), table));
    }
    let table = load_scenario_csv(Path::new(source))
        .with_context(|| format!("loading scenario {source}"))?;
    Ok((source.to_owned(), table))
}

// ── Observer ──────────────────────────────────────────────────────────────────

struct RoadPrinter {
    num_lanes:    u32,
    show_intents: bool,
    conflicts:    usize,
    overrides:    usize,
}

impl SimObserver for RoadPrinter {
    fn on_tick_end(&mut self, report: &TickReport) {
        self.conflicts += report.conflicted;
        self.overrides += report.overridden;
        if report.conflicted > 0 {
            log::info!(
                "{}: {} agents in conflict, {} intents overridden",
                report.tick,
                report.conflicted,
                report.overridden,
            );
        }
    }

    fn on_snapshot(&mut self, tick: Tick, roster: &Roster) {
        let cars: Vec<_> = roster.iter().map(|a| a.render_snapshot()).collect();
        println!("{tick}");
        print!("{}", draw_road(&cars, self.num_lanes, self.show_intents));
    }
}

// ── Reporting ─────────────────────────────────────────────────────────────────

fn describe(name: &str, table: &ScenarioTable, ticks: u64) {
    let entries: Vec<String> = table.ticks().map(|t| t.to_string()).collect();
    println!(
        "Scenario: {name}  |  Agents: {}  |  Lanes: {NUM_LANES}  |  Ticks: {ticks}",
        table.len(),
    );
    println!("Admissions at: {}", if entries.is_empty() { "none".into() } else { entries.join(" ") });
    if let Some(last) = table.last_tick().filter(|t| t.0 >= ticks) {
        log::warn!("{name}: agents entering at {last} or later never drive within {ticks} ticks");
    }
    println!();
}

fn print_agent_table(sim: &Sim<CruiseAndMerge>) {
    println!(
        "{:<6} {:<10} {:>8} {:>5} {:>5} {:>5}",
        "Id", "Label", "Position", "Lane", "Goal", "Speed"
    );
    println!("{}", "-".repeat(44));
    for agent in sim.roster().iter() {
        println!(
            "{:<6} {:<10} {:>8} {:>5} {:>5} {:>5}",
            agent.id().0,
            agent.label(),
            agent.position(),
            agent.lane(),
            agent.goal_lane(),
            agent.speed(),
        );
    }
}

/// Draw tick 0, run to the configured end, then print the summary.
fn run_scenario(sim: &mut Sim<CruiseAndMerge>, obs: &mut RoadPrinter) -> Result<()> {
    obs.conflicts = 0;
    obs.overrides = 0;
    println!("{}", Tick::ZERO);
    print!("{}", draw_road(&sim.render_all(), obs.num_lanes, obs.show_intents));

    let t0 = Instant::now();
    sim.run(obs)?;
    let elapsed = t0.elapsed();

    println!();
    println!("Simulation complete in {:.3} ms", elapsed.as_secs_f64() * 1e3);
    println!("  conflicts : {}", obs.conflicts);
    println!("  overrides : {}", obs.overrides);
    println!();
    print_agent_table(sim);
    Ok(())
}

// ── main ──────────────────────────────────────────────────────────────────────

fn main() -> Result<()> {
    use env_logger::{Builder, Env};

    Builder::from_env(Env::default().default_filter_or("info")).init();

    let args = parse_args()?;
    let (name, scenario) = load_scenario(&args.scenario)?;
    // Load every follow-up up front so a typo fails before anything runs.
    let follow_ups = args
        .then
        .iter()
        .map(|source| load_scenario(source))
        .collect::<Result<Vec<_>>>()?;

    println!("=== highway: rust_lanes traffic simulator ===");
    describe(&name, &scenario, args.ticks);

    // 1. Sim config.
    let config = SimConfig {
        num_lanes:             NUM_LANES,
        target_speed:          TARGET_SPEED,
        total_ticks:           args.ticks,
        output_interval_ticks: 1,
    };

    // 2. Build sim.
    let mut sim = SimBuilder::new(config, CruiseAndMerge)
        .scenario(scenario)
        .build()?;

    // 3. Run, then switch scenarios in order.
    let mut obs = RoadPrinter {
        num_lanes:    NUM_LANES,
        show_intents: args.show_intents,
        conflicts:    0,
        overrides:    0,
    };
    run_scenario(&mut sim, &mut obs)?;

    for (name, scenario) in follow_ups {
        println!();
        println!("=== switching to {name} ===");
        describe(&name, &scenario, args.ticks);
        sim.load_scenario(scenario)?;
        run_scenario(&mut sim, &mut obs)?;
    }

    Ok(())
}
