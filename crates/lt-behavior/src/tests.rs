//! Unit tests for lt-behavior.

use lt_agent::{Agent, AgentConfig};
use lt_core::{AgentId, Intent, SimConfig, Tick};

use crate::{AgentSnapshot, BroadcastChannel, CruiseAndMerge, DecisionModel, resolve_intent};

// ── Helpers ───────────────────────────────────────────────────────────────────

fn sim_config() -> SimConfig {
    SimConfig { num_lanes: 5, target_speed: 2, ..SimConfig::default() }
}

fn agent(id: u32, lane: u32, goal: u32, position: u64, speed: u32) -> Agent {
    Agent::new(AgentId(id), AgentConfig::new(lane, goal, "test").at(position, speed), &sim_config())
        .unwrap()
}

fn snap(id: u32, position: u64, lane: u32, speed: u32, intent: Intent) -> AgentSnapshot {
    AgentSnapshot { id: AgentId(id), position, lane, speed, intent, tick: Tick::ZERO }
}

// ── BroadcastChannel ──────────────────────────────────────────────────────────

#[cfg(test)]
mod channel_tests {
    use super::*;

    #[test]
    fn publish_and_get() {
        let mut ch = BroadcastChannel::new();
        ch.publish(AgentId(1), 4, 2, 2, Intent::ShiftDown);
        let s = ch.get(AgentId(1)).unwrap();
        assert_eq!((s.position, s.lane, s.speed, s.intent), (4, 2, 2, Intent::ShiftDown));
        assert_eq!(ch.len(), 1);
    }

    #[test]
    fn publish_overwrites_last_write_wins() {
        let mut ch = BroadcastChannel::new();
        ch.publish(AgentId(1), 4, 2, 2, Intent::ShiftDown);
        ch.publish(AgentId(1), 4, 2, 2, Intent::Hold);
        assert_eq!(ch.get(AgentId(1)).unwrap().intent, Intent::Hold);
        assert_eq!(ch.len(), 1);
    }

    #[test]
    fn identical_publish_is_idempotent() {
        let mut once = BroadcastChannel::new();
        once.publish(AgentId(3), 7, 1, 2, Intent::Accelerate);
        let mut twice = BroadcastChannel::new();
        twice.publish(AgentId(3), 7, 1, 2, Intent::Accelerate);
        twice.publish(AgentId(3), 7, 1, 2, Intent::Accelerate);
        assert_eq!(once.get(AgentId(3)), twice.get(AgentId(3)));
        assert_eq!(once.len(), twice.len());
    }

    #[test]
    fn read_others_excludes_self_and_is_ordered() {
        let mut ch = BroadcastChannel::new();
        ch.publish(AgentId(5), 0, 1, 2, Intent::Hold);
        ch.publish(AgentId(2), 0, 2, 2, Intent::Hold);
        ch.publish(AgentId(9), 0, 3, 2, Intent::Hold);
        let others = ch.read_others(AgentId(5));
        assert_eq!(others.keys().copied().collect::<Vec<_>>(), vec![AgentId(2), AgentId(9)]);
        // Reading does not mutate.
        assert_eq!(ch.len(), 3);
    }

    #[test]
    fn open_tick_drops_stale_entries() {
        let mut ch = BroadcastChannel::new();
        ch.open_tick(Tick(0));
        ch.publish(AgentId(0), 0, 1, 2, Intent::Hold);
        ch.publish(AgentId(1), 0, 2, 2, Intent::Hold);

        ch.open_tick(Tick(1));
        ch.publish(AgentId(0), 2, 1, 2, Intent::Hold);

        assert_eq!(ch.tick(), Tick(1));
        assert!(ch.get(AgentId(1)).is_none(), "agent 1 did not publish this tick");
        assert!(ch.read_others(AgentId(0)).is_empty());
        assert_eq!(ch.get(AgentId(0)).unwrap().tick, Tick(1));
    }

    #[test]
    fn publish_snapshot_restamps() {
        let mut ch = BroadcastChannel::new();
        ch.open_tick(Tick(4));
        let mut s = snap(1, 0, 1, 2, Intent::Hold);
        s.tick = Tick(99);
        ch.publish_snapshot(s);
        assert_eq!(ch.get(AgentId(1)).unwrap().tick, Tick(4));
    }

    #[test]
    fn empty_channel() {
        let ch = BroadcastChannel::new();
        assert!(ch.is_empty());
        assert!(ch.read_others(AgentId(0)).is_empty());
    }
}

// ── CruiseAndMerge ────────────────────────────────────────────────────────────

#[cfg(test)]
mod model_tests {
    use super::*;

    fn decide(a: &Agent) -> Intent {
        CruiseAndMerge.decide(a, &sim_config())
    }

    #[test]
    fn too_fast_decelerates_even_off_goal() {
        assert_eq!(decide(&agent(0, 1, 4, 0, 3)), Intent::Decelerate);
    }

    #[test]
    fn too_slow_accelerates_even_off_goal() {
        assert_eq!(decide(&agent(0, 4, 1, 0, 1)), Intent::Accelerate);
    }

    #[test]
    fn on_goal_at_nominal_holds() {
        assert_eq!(decide(&agent(0, 3, 3, 0, 2)), Intent::Hold);
    }

    #[test]
    fn below_goal_shifts_up() {
        assert_eq!(decide(&agent(0, 4, 2, 0, 2)), Intent::ShiftUp);
    }

    #[test]
    fn above_goal_shifts_down() {
        assert_eq!(decide(&agent(0, 1, 4, 0, 2)), Intent::ShiftDown);
    }

    #[test]
    fn model_is_object_safe_via_box() {
        let model: Box<dyn DecisionModel> = Box::new(CruiseAndMerge);
        assert_eq!(model.decide(&agent(0, 2, 2, 0, 2), &sim_config()), Intent::Hold);
    }
}

// ── Resolution rule ───────────────────────────────────────────────────────────

#[cfg(test)]
mod resolve_tests {
    use super::*;
    use crate::future_cell;

    #[test]
    fn future_cell_uses_current_speed() {
        let cell = future_cell(2, 2, 1, Intent::Accelerate);
        assert_eq!((cell.position, cell.lane), (4, 1));
        let cell = future_cell(2, 2, 1, Intent::ShiftDown);
        assert_eq!((cell.position, cell.lane), (4, 2));
    }

    #[test]
    fn future_lane_agrees_with_commit_mapping() {
        for intent in Intent::ALL {
            let s = snap(0, 10, 3, 2, intent);
            assert_eq!(s.future_cell().lane, intent.lane_after(3), "{intent}");
        }
    }

    #[test]
    fn no_conflict_passes_through() {
        // Parallel merges into different lanes.
        let a = snap(0, 2, 1, 2, Intent::ShiftDown);
        let b = snap(1, 2, 2, 2, Intent::ShiftDown);
        let ra = resolve_intent(&a, [&b]);
        let rb = resolve_intent(&b, [&a]);
        assert_eq!(ra.resolved, Intent::ShiftDown);
        assert_eq!(rb.resolved, Intent::ShiftDown);
        assert!(!ra.is_override() && !ra.had_conflict());
    }

    #[test]
    fn shared_merge_upper_accelerates_lower_decelerates() {
        let a = snap(0, 2, 1, 2, Intent::ShiftDown);
        let b = snap(1, 2, 3, 2, Intent::ShiftUp);
        let ra = resolve_intent(&a, [&b]);
        let rb = resolve_intent(&b, [&a]);
        assert_eq!(ra.resolved, Intent::Accelerate);
        assert_eq!(rb.resolved, Intent::Decelerate);
        assert_eq!(ra.conflicts, vec![AgentId(1)]);
        assert!(ra.is_override() && rb.is_override());
    }

    #[test]
    fn outcome_ignores_ids() {
        // Same geometry as above with the ids swapped.
        let a = snap(7, 2, 1, 2, Intent::ShiftDown);
        let b = snap(3, 2, 3, 2, Intent::ShiftUp);
        assert_eq!(resolve_intent(&a, [&b]).resolved, Intent::Accelerate);
        assert_eq!(resolve_intent(&b, [&a]).resolved, Intent::Decelerate);
    }

    #[test]
    fn converging_from_both_sides() {
        // Lanes 1 and 3 both merging into lane 2.
        let top = snap(0, 5, 1, 2, Intent::ShiftDown);
        let bottom = snap(1, 5, 3, 2, Intent::ShiftUp);
        assert_eq!(resolve_intent(&top, [&bottom]).resolved, Intent::Accelerate);
        assert_eq!(resolve_intent(&bottom, [&top]).resolved, Intent::Decelerate);
    }

    #[test]
    fn exactly_one_accelerates_for_every_pair() {
        for (ia, ib) in [(Intent::ShiftDown, Intent::Hold), (Intent::Hold, Intent::ShiftUp)] {
            let a = snap(0, 0, 1, 2, ia);
            let b = snap(1, 0, 2, 2, ib);
            if a.future_cell() != b.future_cell() {
                continue;
            }
            let ra = resolve_intent(&a, [&b]).resolved;
            let rb = resolve_intent(&b, [&a]).resolved;
            let mut pair = [ra, rb];
            pair.sort_by_key(|i| i.speed_delta());
            assert_eq!(pair, [Intent::Decelerate, Intent::Accelerate]);
        }
    }

    #[test]
    fn same_lane_tie_leader_accelerates() {
        // A at x=2 speed 3 (slowing), B at x=3 speed 2 (holding): both reach (5, 2).
        let a = snap(0, 2, 2, 3, Intent::Decelerate);
        let b = snap(1, 3, 2, 2, Intent::Hold);
        assert_eq!(resolve_intent(&b, [&a]).resolved, Intent::Accelerate);
        assert_eq!(resolve_intent(&a, [&b]).resolved, Intent::Decelerate);
    }

    #[test]
    fn same_cell_same_lane_falls_back_to_id() {
        let a = snap(4, 0, 2, 2, Intent::Hold);
        let b = snap(9, 0, 2, 2, Intent::Hold);
        assert_eq!(resolve_intent(&a, [&b]).resolved, Intent::Accelerate);
        assert_eq!(resolve_intent(&b, [&a]).resolved, Intent::Decelerate);
    }

    #[test]
    fn three_way_conflict_middle_holds() {
        let top = snap(0, 2, 1, 2, Intent::ShiftDown);
        let middle = snap(1, 2, 2, 2, Intent::Hold);
        let bottom = snap(2, 2, 3, 2, Intent::ShiftUp);
        let all = [top, middle, bottom];

        let outcome: Vec<Intent> = all
            .iter()
            .map(|me| resolve_intent(me, all.iter()).resolved)
            .collect();
        assert_eq!(outcome, vec![Intent::Accelerate, Intent::Hold, Intent::Decelerate]);
        assert_eq!(resolve_intent(&middle, all.iter()).conflicts, vec![AgentId(0), AgentId(2)]);
    }

    #[test]
    fn four_way_conflict_separates_same_lane_members() {
        // Two lane-2 agents both reach x=4: one cruising, one catching up.
        let top = snap(0, 2, 1, 2, Intent::ShiftDown);
        let cruising = snap(1, 2, 2, 2, Intent::Hold);
        let catching_up = snap(2, 3, 2, 1, Intent::Accelerate);
        let bottom = snap(3, 2, 3, 2, Intent::ShiftUp);
        let all = [top, cruising, catching_up, bottom];

        let outcome: Vec<Intent> = all
            .iter()
            .map(|me| resolve_intent(me, all.iter()).resolved)
            .collect();
        // The car further ahead keeps the contested cell; the other drops back.
        assert_eq!(
            outcome,
            vec![Intent::Accelerate, Intent::Decelerate, Intent::Hold, Intent::Decelerate]
        );
    }

    #[test]
    fn fallback_never_decelerates_below_one() {
        // Three lane-2 agents at speed 1..=3 all reach x=4.  The speed-1 car
        // is furthest ahead, so it ranks first in its lane and is never the
        // one asked to slow down.
        let top = snap(0, 2, 1, 2, Intent::ShiftDown);
        let slow = snap(1, 3, 2, 1, Intent::Accelerate);
        let mid = snap(2, 2, 2, 2, Intent::Hold);
        let fast = snap(3, 1, 2, 3, Intent::Decelerate);
        let bottom = snap(4, 2, 3, 2, Intent::ShiftUp);
        let all = [top, slow, mid, fast, bottom];

        let cells: Vec<(u64, u32)> = all
            .iter()
            .map(|me| {
                let intent = resolve_intent(me, all.iter()).resolved;
                let speed = me.speed.saturating_add_signed(intent.speed_delta());
                assert!(speed >= 1, "{} slowed to {speed}", me.id);
                (me.position + u64::from(speed), intent.lane_after(me.lane))
            })
            .collect();
        for (i, a) in cells.iter().enumerate() {
            assert!(!cells[i + 1..].contains(a), "{a:?} committed twice");
        }
    }

    #[test]
    fn lane_swap_is_not_a_conflict() {
        // Lane 1 heading down and lane 2 heading up end in different lanes.
        let a = snap(0, 2, 1, 2, Intent::ShiftDown);
        let b = snap(1, 2, 2, 2, Intent::ShiftUp);
        let ra = resolve_intent(&a, [&b]);
        let rb = resolve_intent(&b, [&a]);
        assert!(!ra.had_conflict() && !rb.had_conflict());
        assert_eq!((ra.resolved, rb.resolved), (Intent::ShiftDown, Intent::ShiftUp));
    }

    #[test]
    fn self_entry_in_others_is_ignored() {
        let a = snap(0, 2, 1, 2, Intent::Hold);
        let r = resolve_intent(&a, [&a]);
        assert!(!r.had_conflict());
        assert_eq!(r.resolved, Intent::Hold);
    }

    #[test]
    fn unrelated_agents_do_not_join_the_group() {
        let a = snap(0, 2, 1, 2, Intent::ShiftDown);
        let b = snap(1, 2, 3, 2, Intent::ShiftUp);
        let far = snap(2, 40, 2, 2, Intent::Hold);
        let r = resolve_intent(&a, [&b, &far]);
        assert_eq!(r.conflicts, vec![AgentId(1)]);
    }
}

// ── Phase drivers ─────────────────────────────────────────────────────────────

#[cfg(test)]
mod protocol_tests {
    use lt_core::{AgentPhase, LtError};

    use super::*;
    use crate::{decide_and_publish, declare, resolve_agent};

    fn run_tick(agents: &mut [Agent], channel: &mut BroadcastChannel, tick: Tick) {
        let config = sim_config();
        channel.open_tick(tick);
        for a in agents.iter_mut() {
            decide_and_publish(a, &CruiseAndMerge, &config, channel).unwrap();
        }
        for a in agents.iter_mut() {
            resolve_agent(a, channel).unwrap();
        }
        for a in agents.iter_mut() {
            a.commit(&config).unwrap();
        }
    }

    #[test]
    fn parallel_merges_commit_unchanged() {
        let mut agents = vec![agent(0, 1, 4, 2, 2), agent(1, 2, 5, 2, 2)];
        let mut channel = BroadcastChannel::new();
        run_tick(&mut agents, &mut channel, Tick(0));
        assert_eq!((agents[0].position(), agents[0].lane()), (4, 2));
        assert_eq!((agents[1].position(), agents[1].lane()), (4, 3));
    }

    #[test]
    fn shared_merge_resolves_and_commits() {
        let mut agents = vec![agent(0, 1, 3, 2, 2), agent(1, 3, 1, 2, 2)];
        let mut channel = BroadcastChannel::new();
        run_tick(&mut agents, &mut channel, Tick(0));

        let a = &agents[0];
        assert_eq!((a.speed(), a.position(), a.lane()), (3, 5, 1));
        let b = &agents[1];
        assert_eq!((b.speed(), b.position(), b.lane()), (1, 3, 3));
    }

    #[test]
    fn declare_returns_snapshot_without_publishing() {
        let mut a = agent(3, 2, 4, 6, 2);
        let s = declare(&mut a, &CruiseAndMerge, &sim_config()).unwrap();
        assert_eq!((s.id, s.position, s.lane, s.intent), (AgentId(3), 6, 2, Intent::ShiftDown));
        assert_eq!(a.phase(), AgentPhase::Declared);
    }

    #[test]
    fn resolve_before_declare_is_rejected() {
        let mut a = agent(0, 1, 1, 0, 2);
        let channel = BroadcastChannel::new();
        assert!(matches!(resolve_agent(&mut a, &channel), Err(LtError::PhaseOrder { .. })));
    }

    #[test]
    fn resolution_reports_declared_and_resolved() {
        let config = sim_config();
        let mut a = agent(0, 1, 3, 2, 2);
        let mut b = agent(1, 3, 1, 2, 2);
        let mut channel = BroadcastChannel::new();
        decide_and_publish(&mut a, &CruiseAndMerge, &config, &mut channel).unwrap();
        decide_and_publish(&mut b, &CruiseAndMerge, &config, &mut channel).unwrap();
        let r = resolve_agent(&mut b, &channel).unwrap();
        assert_eq!(r.declared, Intent::ShiftUp);
        assert_eq!(r.resolved, Intent::Decelerate);
        assert_eq!(b.intent(), Intent::Decelerate);
    }
}
