//! Solver configuration.
use std::str::FromStr;

use thiserror::Error;

/// How the solver picks the next frontier node to branch on.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, Default)]
pub enum DecisionPolicy {
    /// The frontier node whose fanins have the largest fanout count.
    #[default]
    MaxFanout,
    /// The frontier node with the largest id, i.e. the one closest to the outputs.
    HighestId,
    /// The frontier node with the smallest id, i.e. the one closest to the inputs.
    LowestId,
}

impl DecisionPolicy {
    /// All available policies.
    pub const ALL: [Self; 3] = [Self::MaxFanout, Self::HighestId, Self::LowestId];

    /// The name accepted by the [`FromStr`] implementation.
    pub fn name(self) -> &'static str {
        match self {
            DecisionPolicy::MaxFanout => "max-fanout",
            DecisionPolicy::HighestId => "highest-id",
            DecisionPolicy::LowestId => "lowest-id",
        }
    }
}

impl std::fmt::Display for DecisionPolicy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for DecisionPolicy {
    type Err = OptionsError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|policy| policy.name() == s)
            .ok_or_else(|| OptionsError::UnknownPolicy(s.to_owned()))
    }
}

/// Invalid solver configuration.
#[derive(Clone, PartialEq, Eq, Debug, Error)]
pub enum OptionsError {
    /// A frontier limit of zero would stop every query that needs a decision.
    #[error("frontier limit must be at least 1")]
    ZeroFrontierLimit,
    /// A decision policy name that is not recognized.
    #[error("unknown decision policy `{0}`, expected one of max-fanout, highest-id, lowest-id")]
    UnknownPolicy(String),
}

/// Resource limits and heuristics of a [`CircuitSolver`][crate::CircuitSolver].
///
/// The default has no limits and uses [`DecisionPolicy::MaxFanout`].
#[derive(Clone, PartialEq, Eq, Debug, Default)]
pub struct SolverOptions {
    /// Stop with an undecided result once a single query exceeds this many conflicts.
    pub conflict_limit: Option<usize>,
    /// Stop with an undecided result once the justification frontier of a single query grows
    /// beyond this many nodes.
    pub frontier_limit: Option<usize>,
    /// Branching heuristic.
    pub decision_policy: DecisionPolicy,
    /// Log a line per query and the accumulated statistics at info level.
    pub verbose: bool,
}

impl SolverOptions {
    /// Sets the per query conflict limit.
    pub fn with_conflict_limit(mut self, limit: Option<usize>) -> Self {
        self.conflict_limit = limit;
        self
    }

    /// Sets the per query frontier limit.
    pub fn with_frontier_limit(mut self, limit: Option<usize>) -> Self {
        self.frontier_limit = limit;
        self
    }

    /// Sets the decision policy.
    pub fn with_decision_policy(mut self, policy: DecisionPolicy) -> Self {
        self.decision_policy = policy;
        self
    }

    /// Enables or disables verbose logging.
    pub fn with_verbose(mut self, verbose: bool) -> Self {
        self.verbose = verbose;
        self
    }

    /// Checks that the options describe a usable configuration.
    pub fn validate(&self) -> Result<(), OptionsError> {
        if self.frontier_limit == Some(0) {
            return Err(OptionsError::ZeroFrontierLimit);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn policy_names_round_trip() {
        for policy in DecisionPolicy::ALL {
            assert_eq!(policy.to_string().parse::<DecisionPolicy>(), Ok(policy));
        }
        assert_eq!(
            "random".parse::<DecisionPolicy>(),
            Err(OptionsError::UnknownPolicy("random".into()))
        );
    }

    #[test]
    fn validation() {
        let options = SolverOptions::default()
            .with_conflict_limit(Some(0))
            .with_decision_policy(DecisionPolicy::LowestId);
        assert_eq!(options.validate(), Ok(()));
        assert_eq!(
            options.with_frontier_limit(Some(0)).validate(),
            Err(OptionsError::ZeroFrontierLimit)
        );
    }
}
