//! Phase and trigger vocabulary for phased events

use serde::Serialize;

/// Where a phased event is in its script
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Phase {
    #[default]
    Idle,
    Approach,
    Drop,
    Impact,
}

impl Phase {
    /// The phase that follows this one in the script
    pub fn next(self) -> Phase {
        match self {
            Phase::Idle => Phase::Approach,
            Phase::Approach => Phase::Drop,
            Phase::Drop => Phase::Impact,
            Phase::Impact => Phase::Idle,
        }
    }
}

/// A discrete signal emitted at a phase boundary. Each fires at most once
/// per sequence run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SequenceTrigger {
    /// Left idle (start cue)
    Started,
    /// Reached the ground (impact cue)
    Landed,
    /// Impact hold finished; spawn the payload
    Explode,
    /// Sequence finished; the request is acknowledged
    Complete,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn next_cycles_back_to_idle() {
        let mut phase = Phase::Idle;
        let mut visited = vec![];
        for _ in 0..4 {
            phase = phase.next();
            visited.push(phase);
        }
        assert_eq!(
            visited,
            vec![Phase::Approach, Phase::Drop, Phase::Impact, Phase::Idle]
        );
    }
}
