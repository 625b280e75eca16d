//! Per-stage wall-clock timings.

use std::fmt;
use std::time::{Duration, Instant};

use serde::{Deserialize, Serialize};

/// Pipeline stage a timing entry belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Stage {
    Convert,
    Integral,
    Variance,
    Gradient,
    Ridge,
}

impl Stage {
    pub const ALL: [Stage; 5] = [
        Stage::Convert,
        Stage::Integral,
        Stage::Variance,
        Stage::Gradient,
        Stage::Ridge,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Stage::Convert => "convert",
            Stage::Integral => "integral",
            Stage::Variance => "variance",
            Stage::Gradient => "gradient",
            Stage::Ridge => "ridge",
        }
    }
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Elapsed time of every stage invocation, in execution order.
///
/// Advisory only; results never depend on it.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct StageTimings {
    entries: Vec<(Stage, Duration)>,
}

impl StageTimings {
    pub fn new() -> Self {
        Self::default()
    }

    /// Runs `f`, records its wall time under `stage` and logs it at debug level.
    pub fn time<R>(&mut self, stage: Stage, f: impl FnOnce() -> R) -> R {
        let start = Instant::now();
        let result = f();
        let elapsed = start.elapsed();
        tracing::debug!("  {} : {:.3}ms", stage, elapsed.as_secs_f64() * 1000.0);
        self.entries.push((stage, elapsed));
        result
    }

    pub fn record(&mut self, stage: Stage, elapsed: Duration) {
        self.entries.push((stage, elapsed));
    }

    pub fn entries(&self) -> &[(Stage, Duration)] {
        &self.entries
    }

    /// Sum of all invocations of `stage`.
    pub fn stage_total(&self, stage: Stage) -> Duration {
        self.entries
            .iter()
            .filter(|(s, _)| *s == stage)
            .map(|(_, d)| *d)
            .sum()
    }

    pub fn total(&self) -> Duration {
        self.entries.iter().map(|(_, d)| *d).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Appends all entries of `other`.
    pub fn merge(&mut self, other: &StageTimings) {
        self.entries.extend_from_slice(&other.entries);
    }
}

impl fmt::Display for StageTimings {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for stage in Stage::ALL {
            let total = self.stage_total(stage);
            writeln!(f, "{:<10}{:>10.3}ms", stage.name(), total.as_secs_f64() * 1000.0)?;
        }
        write!(f, "{:<10}{:>10.3}ms", "total", self.total().as_secs_f64() * 1000.0)
    }
}
