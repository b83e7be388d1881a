//! Operation counters and stage timers for algorithm instrumentation.
//!
//! Every algorithm in this crate takes a `&mut dyn Metrics` and reports one
//! increment per meaningful operation (DFS visit, edge examination, queue
//! push/pop, relaxation attempt, successful relaxation). Algorithms never read
//! the collaborator back, so [`NoopMetrics`] is always a valid argument.
//!
//! A [`Counters`] instance belongs to exactly one pipeline run; nothing here
//! is global or shared across threads.

use std::collections::BTreeMap;
use std::fmt;
use std::time::{Duration, Instant};

use serde::Serialize;

/// Well-known counter names used by the algorithms.
pub mod counter {
    pub const DFS_VISITS: &str = "dfs_visits";
    pub const EDGE_CHECKS: &str = "edge_checks";
    pub const STACK_PUSHES: &str = "stack_pushes";
    pub const STACK_POPS: &str = "stack_pops";
    pub const SCCS_FOUND: &str = "sccs_found";
    pub const QUEUE_PUSHES: &str = "queue_pushes";
    pub const QUEUE_POPS: &str = "queue_pops";
    pub const EDGE_RELAXATIONS: &str = "edge_relaxations";
    pub const SUCCESSFUL_RELAXATIONS: &str = "successful_relaxations";
    pub const VERTICES_PROCESSED: &str = "vertices_processed";
}

/// Counter/timer capability passed explicitly into each algorithm.
pub trait Metrics {
    /// Add `amount` to the named counter.
    fn add(&mut self, key: &str, amount: u64);

    /// Increment the named counter by one.
    fn increment(&mut self, key: &str) {
        self.add(key, 1);
    }

    /// Current value of a counter, `0` when never touched.
    fn count(&self, key: &str) -> u64;

    /// Start (or restart) the timer, clearing any previous measurement.
    fn start_timer(&mut self);

    /// Stop the timer. Has no effect if the timer was never started.
    fn stop_timer(&mut self);

    /// Elapsed time between the last start/stop pair, if both happened.
    fn elapsed(&self) -> Option<Duration>;

    /// Clear all counters and the timer.
    fn reset(&mut self);
}

/// Instrumentation sink that discards everything.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct NoopMetrics;

impl Metrics for NoopMetrics {
    fn add(&mut self, _key: &str, _amount: u64) {}

    fn count(&self, _key: &str) -> u64 {
        0
    }

    fn start_timer(&mut self) {}

    fn stop_timer(&mut self) {}

    fn elapsed(&self) -> Option<Duration> {
        None
    }

    fn reset(&mut self) {}
}

/// Recording instrumentation: named counters plus a single stage timer.
#[derive(Debug, Clone, Default)]
pub struct Counters {
    counts: BTreeMap<String, u64>,
    started: Option<Instant>,
    elapsed: Option<Duration>,
}

impl Counters {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// All counters, sorted by name.
    #[must_use]
    pub const fn counts(&self) -> &BTreeMap<String, u64> {
        &self.counts
    }

    /// Freeze the current counters and timer into a serializable snapshot.
    #[must_use]
    pub fn snapshot(&self) -> StageMetrics {
        StageMetrics {
            counts: self.counts.clone(),
            elapsed_us: self
                .elapsed
                .map(|d| u64::try_from(d.as_micros()).unwrap_or(u64::MAX)),
        }
    }
}

impl Metrics for Counters {
    fn add(&mut self, key: &str, amount: u64) {
        let slot = self.counts.entry(key.to_string()).or_insert(0);
        *slot = slot.saturating_add(amount);
    }

    fn count(&self, key: &str) -> u64 {
        self.counts.get(key).copied().unwrap_or(0)
    }

    fn start_timer(&mut self) {
        self.started = Some(Instant::now());
        self.elapsed = None;
    }

    fn stop_timer(&mut self) {
        if let Some(started) = self.started.take() {
            self.elapsed = Some(started.elapsed());
        }
    }

    fn elapsed(&self) -> Option<Duration> {
        self.elapsed
    }

    fn reset(&mut self) {
        self.counts.clear();
        self.started = None;
        self.elapsed = None;
    }
}

/// Immutable per-stage instrumentation snapshot.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct StageMetrics {
    /// Counter values by name.
    pub counts: BTreeMap<String, u64>,
    /// Measured stage duration in microseconds, if the timer ran.
    pub elapsed_us: Option<u64>,
}

impl StageMetrics {
    /// Counter value, `0` when absent.
    #[must_use]
    pub fn count(&self, key: &str) -> u64 {
        self.counts.get(key).copied().unwrap_or(0)
    }

    /// Elapsed time in fractional milliseconds (`0.0` when not measured).
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn elapsed_millis(&self) -> f64 {
        self.elapsed_us.map_or(0.0, |us| us as f64 / 1_000.0)
    }
}

impl fmt::Display for StageMetrics {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (name, value) in &self.counts {
            writeln!(f, "  {name}: {value}")?;
        }
        let elapsed = self
            .elapsed_us
            .map_or_else(|| "n/a".to_string(), |us| format_duration(Duration::from_micros(us)));
        writeln!(f, "  time: {elapsed}")
    }
}

fn format_duration(duration: Duration) -> String {
    let micros = duration.as_micros();

    if micros >= 1_000_000 {
        let secs = micros / 1_000_000;
        let millis = (micros % 1_000_000) / 1_000;
        format!("{secs}.{millis:03}s")
    } else if micros >= 1_000 {
        let millis = micros / 1_000;
        let rem = micros % 1_000;
        format!("{millis}.{rem:03}ms")
    } else {
        format!("{micros}µs")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn counters_accumulate_by_name() {
        let mut m = Counters::new();
        m.increment(counter::DFS_VISITS);
        m.increment(counter::DFS_VISITS);
        m.add(counter::EDGE_CHECKS, 5);

        assert_eq!(m.count(counter::DFS_VISITS), 2);
        assert_eq!(m.count(counter::EDGE_CHECKS), 5);
        assert_eq!(m.count("never_touched"), 0);
        assert_eq!(m.counts().len(), 2);
    }

    #[test]
    fn timer_requires_start_and_stop() {
        let mut m = Counters::new();
        assert!(m.elapsed().is_none());

        m.stop_timer();
        assert!(m.elapsed().is_none(), "stop without start records nothing");

        m.start_timer();
        assert!(m.elapsed().is_none(), "running timer has no elapsed value");
        m.stop_timer();
        assert!(m.elapsed().is_some());
    }

    #[test]
    fn reset_clears_counts_and_timer() {
        let mut m = Counters::new();
        m.increment(counter::QUEUE_POPS);
        m.start_timer();
        m.stop_timer();

        m.reset();
        assert_eq!(m.count(counter::QUEUE_POPS), 0);
        assert!(m.elapsed().is_none());
    }

    #[test]
    fn noop_ignores_everything() {
        let mut m = NoopMetrics;
        m.increment(counter::DFS_VISITS);
        m.start_timer();
        m.stop_timer();
        assert_eq!(m.count(counter::DFS_VISITS), 0);
        assert!(m.elapsed().is_none());
    }

    #[test]
    fn snapshot_converts_elapsed_to_micros() {
        let mut m = Counters::new();
        m.increment(counter::SCCS_FOUND);
        let snap = m.snapshot();
        assert_eq!(snap.count(counter::SCCS_FOUND), 1);
        assert_eq!(snap.elapsed_us, None);
        assert!(snap.elapsed_millis().abs() < f64::EPSILON);

        let timed = StageMetrics {
            counts: BTreeMap::new(),
            elapsed_us: Some(2_500),
        };
        assert!((timed.elapsed_millis() - 2.5).abs() < 1e-9);
    }

    #[test]
    fn display_lists_counters_and_time() {
        let snap = StageMetrics {
            counts: BTreeMap::from([("edge_checks".to_string(), 3)]),
            elapsed_us: Some(1_500),
        };
        let text = snap.to_string();
        assert!(text.contains("edge_checks: 3"));
        assert!(text.contains("1.500ms"));
    }

    #[test]
    fn format_duration_picks_unit() {
        assert_eq!(format_duration(Duration::from_micros(12)), "12µs");
        assert_eq!(format_duration(Duration::from_micros(1_200)), "1.200ms");
        assert_eq!(format_duration(Duration::from_micros(2_345_000)), "2.345s");
    }
}
