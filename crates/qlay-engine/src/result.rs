//! Per-measurement-point result aggregation.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Outcome counts for one measurement point.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Tally {
    /// Trials that measured `|0⟩`.
    pub zeros: u64,
    /// Trials that measured `|1⟩`.
    pub ones: u64,
}

impl Tally {
    /// Count one outcome.
    #[inline]
    pub fn record(&mut self, outcome: bool) {
        if outcome {
            self.ones += 1;
        } else {
            self.zeros += 1;
        }
    }

    /// Total number of recorded outcomes.
    pub fn total(&self) -> u64 {
        self.zeros + self.ones
    }

    /// Fraction of outcomes that were `|1⟩` (0 when empty).
    pub fn one_fraction(&self) -> f64 {
        match self.total() {
            0 => 0.0,
            total => self.ones as f64 / total as f64,
        }
    }

    fn add(&mut self, other: Tally) {
        self.zeros += other.zeros;
        self.ones += other.ones;
    }
}

impl fmt::Display for Tally {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ZERO: {} ONE: {}", self.zeros, self.ones)
    }
}

/// Accumulates tallies during a run, indexed by measurement slot.
///
/// Slot `k` belongs to measurement point `M<k>`; the driver resolves slots
/// once per run so recording an outcome is a plain index.
#[derive(Debug, Clone)]
pub(crate) struct Aggregator {
    names: Vec<String>,
    tallies: Vec<Tally>,
}

impl Aggregator {
    /// Zero tallies for every named measurement point.
    pub(crate) fn new(names: Vec<String>) -> Self {
        let tallies = vec![Tally::default(); names.len()];
        Self { names, tallies }
    }

    #[inline]
    pub(crate) fn record(&mut self, slot: usize, outcome: bool) {
        self.tallies[slot].record(outcome);
    }

    /// Freeze into a result.
    pub(crate) fn finish(self, requested: u64, completed: u64, cancelled: bool) -> SimulationResult {
        SimulationResult {
            tallies: self.names.into_iter().zip(self.tallies).collect(),
            requested_trials: requested,
            completed_trials: completed,
            cancelled,
        }
    }
}

/// Immutable result of a simulation run.
///
/// One entry per measurement gate, in execution order. Each entry's counts
/// sum to `completed_trials`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SimulationResult {
    tallies: Vec<(String, Tally)>,
    requested_trials: u64,
    completed_trials: u64,
    cancelled: bool,
}

impl SimulationResult {
    /// Tally for a measurement point.
    pub fn get(&self, name: &str) -> Option<&Tally> {
        self.tallies
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, tally)| tally)
    }

    /// Measurement points and tallies in execution order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &Tally)> {
        self.tallies.iter().map(|(name, tally)| (name.as_str(), tally))
    }

    /// Number of measurement points.
    pub fn len(&self) -> usize {
        self.tallies.len()
    }

    /// Whether the circuit had no measurement points.
    pub fn is_empty(&self) -> bool {
        self.tallies.is_empty()
    }

    /// Trials the caller asked for.
    pub fn requested_trials(&self) -> u64 {
        self.requested_trials
    }

    /// Trials that actually ran.
    pub fn completed_trials(&self) -> u64 {
        self.completed_trials
    }

    /// Whether the run stopped early on a cancel request.
    pub fn is_cancelled(&self) -> bool {
        self.cancelled
    }

    /// Combine two partial results of the same circuit.
    ///
    /// Tallies are summed by name; names only present in `other` are
    /// appended. Summation is commutative and associative, so worker
    /// partitions can be merged in any order.
    #[must_use]
    pub fn merge(mut self, other: SimulationResult) -> SimulationResult {
        for (name, tally) in other.tallies {
            match self.tallies.iter_mut().find(|(n, _)| *n == name) {
                Some((_, existing)) => existing.add(tally),
                None => self.tallies.push((name, tally)),
            }
        }
        self.requested_trials += other.requested_trials;
        self.completed_trials += other.completed_trials;
        self.cancelled |= other.cancelled;
        self
    }
}

impl fmt::Display for SimulationResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "Simulation results ({} of {} trials{}):",
            self.completed_trials,
            self.requested_trials,
            if self.cancelled { ", cancelled" } else { "" }
        )?;
        if self.tallies.is_empty() {
            writeln!(f, "  No measurement gates.")?;
        }
        for (name, tally) in &self.tallies {
            writeln!(f, "  {name}: {tally}")?;
        }
        Ok(())
    }
}
