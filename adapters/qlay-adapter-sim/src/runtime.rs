//! Simulator lifecycle and state allocation.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Mutex, PoisonError};
use tracing::{debug, info, warn};

use qlay_engine::{
    DEFAULT_MAX_QUBITS, EngineError, EngineResult, MAX_SUPPORTED_QUBITS, QuantumRuntime,
    SimulationConfig,
};

use crate::statevector::Statevector;

/// Spacing between per-context seed streams.
const STREAM_STRIDE: u64 = 0x9E37_79B9_7F4A_7C15;

/// An initialised statevector simulator.
///
/// Every allocated [`Statevector`] gets its own RNG stream. With a seed the
/// streams are derived deterministically in allocation order, so a fresh
/// runtime replays the same sequence of runs exactly.
pub struct SimRuntime {
    seed: Option<u64>,
    max_qubits: usize,
    streams: AtomicU64,
    rng: Mutex<StdRng>,
}

impl SimRuntime {
    /// Initialise with an entropy-seeded RNG.
    pub fn init() -> Self {
        info!("Initialising simulator with entropy seed");
        Self::build(None, DEFAULT_MAX_QUBITS)
    }

    /// Initialise with a fixed seed for reproducible runs.
    pub fn with_seed(seed: u64) -> Self {
        info!("Initialising simulator with seed {}", seed);
        Self::build(Some(seed), DEFAULT_MAX_QUBITS)
    }

    /// Initialise from run configuration.
    pub fn from_config(config: &SimulationConfig) -> Self {
        match config.seed {
            Some(seed) => Self::with_seed(seed),
            None => Self::init(),
        }
        .with_max_qubits(config.max_qubits)
    }

    /// Override the largest state this runtime will allocate, clamped to
    /// [`MAX_SUPPORTED_QUBITS`].
    #[must_use]
    pub fn with_max_qubits(mut self, max_qubits: usize) -> Self {
        if max_qubits > MAX_SUPPORTED_QUBITS {
            warn!(
                "Clamping max_qubits {} to {}",
                max_qubits, MAX_SUPPORTED_QUBITS
            );
        }
        self.max_qubits = max_qubits.min(MAX_SUPPORTED_QUBITS);
        self
    }

    fn build(seed: Option<u64>, max_qubits: usize) -> Self {
        Self {
            seed,
            max_qubits,
            streams: AtomicU64::new(0),
            rng: Mutex::new(Self::seeded(seed, 0)),
        }
    }

    fn seeded(seed: Option<u64>, stream: u64) -> StdRng {
        match seed {
            Some(seed) => StdRng::seed_from_u64(seed.wrapping_add(stream.wrapping_mul(STREAM_STRIDE))),
            None => StdRng::from_entropy(),
        }
    }

    /// The seed, if one was given.
    pub fn seed(&self) -> Option<u64> {
        self.seed
    }

    /// Largest state this runtime will allocate.
    pub fn max_qubits(&self) -> usize {
        self.max_qubits
    }

    /// Bernoulli trial with success probability `p` (clamped to `[0, 1]`),
    /// drawn from the runtime's own stream.
    pub fn chance(&self, p: f64) -> bool {
        let mut rng = self.rng.lock().unwrap_or_else(PoisonError::into_inner);
        rng.gen_bool(p.clamp(0.0, 1.0))
    }
}

impl Default for SimRuntime {
    fn default() -> Self {
        Self::init()
    }
}

impl QuantumRuntime for SimRuntime {
    type Context = Statevector;

    fn allocate(&self, num_qubits: usize) -> EngineResult<Statevector> {
        if num_qubits == 0 {
            return Err(EngineError::InvalidArgument(
                "cannot allocate a zero-qubit state".into(),
            ));
        }
        if num_qubits > self.max_qubits {
            return Err(EngineError::CircuitTooLarge(format!(
                "Circuit has {} qubits but simulator only supports {}",
                num_qubits, self.max_qubits
            )));
        }

        // Stream 0 belongs to the runtime's own `chance`.
        let stream = self.streams.fetch_add(1, Ordering::Relaxed) + 1;
        debug!("Allocating {}-qubit statevector (stream {})", num_qubits, stream);
        Ok(Statevector::new(num_qubits, Self::seeded(self.seed, stream)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use qlay_engine::StateContext;

    #[test]
    fn test_allocate_bounds() {
        let runtime = SimRuntime::with_seed(1).with_max_qubits(3);
        assert_eq!(runtime.allocate(3).unwrap().num_qubits(), 3);
        assert!(matches!(
            runtime.allocate(4),
            Err(EngineError::CircuitTooLarge(_))
        ));
        assert!(matches!(
            runtime.allocate(0),
            Err(EngineError::InvalidArgument(_))
        ));
    }

    #[test]
    fn test_max_qubits_is_clamped() {
        let runtime = SimRuntime::with_seed(1).with_max_qubits(64);
        assert_eq!(runtime.max_qubits(), MAX_SUPPORTED_QUBITS);
        assert!(matches!(
            runtime.allocate(64),
            Err(EngineError::CircuitTooLarge(_))
        ));
        assert!(matches!(
            runtime.allocate(MAX_SUPPORTED_QUBITS + 1),
            Err(EngineError::CircuitTooLarge(_))
        ));
    }

    #[test]
    fn test_seeded_streams_replay() {
        let draw = |runtime: &SimRuntime| {
            let mut sv = runtime.allocate(1).unwrap();
            (0..32).map(|_| sv.chance(0.5)).collect::<Vec<_>>()
        };

        let a = SimRuntime::with_seed(42);
        let b = SimRuntime::with_seed(42);
        let first = draw(&a);
        assert_eq!(first, draw(&b));
        // Next allocation is a different stream.
        assert_ne!(first, draw(&a));
    }

    #[test]
    fn test_from_config() {
        let config = SimulationConfig {
            seed: Some(9),
            max_qubits: 5,
            ..Default::default()
        };
        let runtime = SimRuntime::from_config(&config);
        assert_eq!(runtime.seed(), Some(9));
        assert_eq!(runtime.max_qubits(), 5);
    }

    #[test]
    fn test_chance_extremes() {
        let runtime = SimRuntime::init();
        assert!(runtime.chance(1.0));
        assert!(!runtime.chance(0.0));
        assert!(!runtime.chance(-0.5));
    }
}
