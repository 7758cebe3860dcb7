//! Phase drivers that tie an [`Agent`] to the model and the channel.
//!
//! Split so the scheduler can run each step sequentially or as a parallel
//! fan-out: [`declare`] only touches the agent, publishing only touches the
//! channel, and [`resolve_agent`] reads the channel and writes the agent.

use lt_agent::Agent;
use lt_core::{LtResult, SimConfig};

use crate::{AgentSnapshot, BroadcastChannel, DecisionModel, Resolution, resolve_intent};

/// Phase 1 without the publish: decide, record, and return the snapshot to
/// broadcast.
pub fn declare<M>(agent: &mut Agent, model: &M, config: &SimConfig) -> LtResult<AgentSnapshot>
where
    M: DecisionModel + ?Sized,
{
    let intent = model.decide(agent, config);
    agent.declare(intent)?;
    log::trace!("{} declares {intent} at x={} lane {}", agent.id(), agent.position(), agent.lane());
    Ok(snapshot_of(agent))
}

/// Phase 1: decide, record, and publish on `channel`.
pub fn decide_and_publish<M>(
    agent:   &mut Agent,
    model:   &M,
    config:  &SimConfig,
    channel: &mut BroadcastChannel,
) -> LtResult<()>
where
    M: DecisionModel + ?Sized,
{
    let snapshot = declare(agent, model, config)?;
    channel.publish_snapshot(snapshot);
    Ok(())
}

/// Phase 2: compare against every other published snapshot and settle the
/// final intent.
///
/// Must only be called once every agent has completed phase 1 for the
/// current tick.
pub fn resolve_agent(agent: &mut Agent, channel: &BroadcastChannel) -> LtResult<Resolution> {
    let mut me = snapshot_of(agent);
    me.tick = channel.tick();

    let others = channel.read_others(agent.id());
    let resolution = resolve_intent(&me, others.values().copied());
    agent.settle(resolution.resolved)?;

    if resolution.had_conflict() {
        log::debug!(
            "{} (lane {}, x={}): conflict at {} with {:?}; {} -> {}",
            agent.id(),
            me.lane,
            me.position,
            me.future_cell(),
            resolution.conflicts,
            resolution.declared,
            resolution.resolved,
        );
        if resolution.declared.is_lane_change() && !resolution.resolved.is_lane_change() {
            log::debug!("{} defers its {} to a later tick", agent.id(), resolution.declared);
        }
    }
    Ok(resolution)
}

fn snapshot_of(agent: &Agent) -> AgentSnapshot {
    AgentSnapshot {
        id:       agent.id(),
        position: agent.position(),
        lane:     agent.lane(),
        speed:    agent.speed(),
        intent:   agent.intent(),
        tick:     Default::default(),
    }
}
