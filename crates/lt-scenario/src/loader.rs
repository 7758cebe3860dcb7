//! CSV scenario loader.
//!
//! # CSV format
//!
//! One row per admitted agent.  `position` and `speed` are optional; empty
//! or missing means "enter at position 0, nominal speed".
//!
//! ```csv
//! tick,initial_lane,goal_lane,label,position,speed
//! 0,1,4,green,,
//! 0,2,5,blue,,
//! 3,5,2,brown,6,3
//! ```
//!
//! Rows may appear in any order; agents sharing a tick are admitted in file
//! order.

use std::io::Read;
use std::path::Path;

use serde::Deserialize;

use lt_agent::AgentConfig;
use lt_core::Tick;

use crate::{ScenarioError, ScenarioTable};

// ── CSV record ────────────────────────────────────────────────────────────────

#[derive(Deserialize)]
struct AdmissionRecord {
    tick:         u64,
    initial_lane: u32,
    goal_lane:    u32,
    label:        String,
    #[serde(default)]
    position:     Option<u64>,
    #[serde(default)]
    speed:        Option<u32>,
}

// ── Public API ────────────────────────────────────────────────────────────────

/// Load a [`ScenarioTable`] from a CSV file.
pub fn load_scenario_csv(path: &Path) -> Result<ScenarioTable, ScenarioError> {
    let file = std::fs::File::open(path).map_err(ScenarioError::Io)?;
    load_scenario_reader(file)
}

/// Like [`load_scenario_csv`] but accepts any `Read` source.
pub fn load_scenario_reader<R: Read>(reader: R) -> Result<ScenarioTable, ScenarioError> {
    let mut csv_reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .flexible(true)
        .from_reader(reader);
    let mut table = ScenarioTable::new();

    for result in csv_reader.deserialize::<AdmissionRecord>() {
        let row = result.map_err(|e| ScenarioError::Parse(e.to_string()))?;
        let config = AgentConfig {
            initial_lane: row.initial_lane,
            goal_lane:    row.goal_lane,
            label:        row.label,
            position:     row.position.unwrap_or(0),
            speed:        row.speed,
        };
        table.push(Tick(row.tick), config);
    }

    Ok(table)
}
