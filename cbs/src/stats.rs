use std::{fmt, time::Duration};

use crate::SolveResult;

/// Accumulated statistics over all queries of a solver.
#[derive(Clone, Default, Debug)]
pub struct SolverStats {
    /// Number of satisfiable queries.
    pub sat_count: u64,
    /// Number of unsatisfiable queries.
    pub unsat_count: u64,
    /// Number of queries stopped by a resource limit.
    pub undecided_count: u64,

    /// Conflicts spent on satisfiable queries.
    pub sat_conflicts: u64,
    /// Conflicts spent on unsatisfiable queries.
    pub unsat_conflicts: u64,
    /// Conflicts spent on undecided queries.
    pub undecided_conflicts: u64,

    /// Time spent on satisfiable queries.
    pub sat_time: Duration,
    /// Time spent on unsatisfiable queries.
    pub unsat_time: Duration,
    /// Time spent on undecided queries.
    pub undecided_time: Duration,

    /// Largest justification frontier seen by any query.
    pub max_frontier: usize,
}

impl SolverStats {
    /// Total number of queries.
    pub fn query_count(&self) -> u64 {
        self.sat_count + self.unsat_count + self.undecided_count
    }

    /// Total time spent in queries.
    pub fn total_time(&self) -> Duration {
        self.sat_time + self.unsat_time + self.undecided_time
    }

    pub(crate) fn record(
        &mut self,
        result: &SolveResult,
        conflicts: usize,
        frontier: usize,
        elapsed: Duration,
    ) {
        let (count, total_conflicts, time) = match result {
            SolveResult::Sat(_) => (
                &mut self.sat_count,
                &mut self.sat_conflicts,
                &mut self.sat_time,
            ),
            SolveResult::Unsat(_) => (
                &mut self.unsat_count,
                &mut self.unsat_conflicts,
                &mut self.unsat_time,
            ),
            SolveResult::Undecided => (
                &mut self.undecided_count,
                &mut self.undecided_conflicts,
                &mut self.undecided_time,
            ),
        };
        *count += 1;
        *total_conflicts += conflicts as u64;
        *time += elapsed;
        self.max_frontier = self.max_frontier.max(frontier);
    }
}

impl fmt::Display for SolverStats {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let total = self.query_count();
        let total_time = self.total_time();
        let rows = [
            ("unsat", self.unsat_count, self.unsat_conflicts, self.unsat_time),
            ("sat", self.sat_count, self.sat_conflicts, self.sat_time),
            (
                "undec",
                self.undecided_count,
                self.undecided_conflicts,
                self.undecided_time,
            ),
        ];
        for (name, count, conflicts, time) in rows {
            let share = if total == 0 {
                0.0
            } else {
                100.0 * count as f64 / total as f64
            };
            let average = if count == 0 {
                0.0
            } else {
                conflicts as f64 / count as f64
            };
            writeln!(
                f,
                "{name:<5} calls {count:>6} ({share:6.2} %)  avg conf {average:8.1}  time {time:.2?}"
            )?;
        }
        write!(
            f,
            "total calls {total:>6}  max frontier {}  time {total_time:.2?}",
            self.max_frontier
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn record_by_outcome() {
        let mut stats = SolverStats::default();
        stats.record(&SolveResult::Sat(vec![]), 3, 2, Duration::from_millis(2));
        stats.record(&SolveResult::Unsat(vec![]), 5, 7, Duration::from_millis(1));
        stats.record(&SolveResult::Unsat(vec![]), 1, 1, Duration::ZERO);
        stats.record(&SolveResult::Undecided, 10, 4, Duration::ZERO);

        assert_eq!(stats.query_count(), 4);
        assert_eq!(stats.unsat_count, 2);
        assert_eq!(stats.unsat_conflicts, 6);
        assert_eq!(stats.undecided_conflicts, 10);
        assert_eq!(stats.max_frontier, 7);
        assert_eq!(stats.total_time(), Duration::from_millis(3));

        let text = stats.to_string();
        assert!(text.contains("unsat calls      2"));
        assert!(text.lines().count() == 4);
    }
}
