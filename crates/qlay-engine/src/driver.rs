//! Simulation driver.
//!
//! A run compiles the circuit against the gate table, allocates one state
//! context, and then repeats `reset → apply every step → record outcomes`
//! for each trial. The context is reused across trials and released when
//! the run returns, on success and error paths alike.

use rayon::prelude::*;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Instant;
use tracing::{debug, info, instrument, warn};

use qlay_ir::{Circuit, GatePlacement};

use crate::backend::{QuantumRuntime, Qubit, StateContext};
use crate::config::SimulationConfig;
use crate::dispatch::{GateCapability, GateTable};
use crate::error::{EngineError, EngineResult};
use crate::result::{Aggregator, SimulationResult};

/// Cooperative cancellation flag, honoured between trials.
#[derive(Debug, Clone, Default)]
pub struct CancelToken(Arc<AtomicBool>);

impl CancelToken {
    /// Create a token that has not been cancelled.
    pub fn new() -> Self {
        Self::default()
    }

    /// Request cancellation. Affects every clone of this token.
    pub fn cancel(&self) {
        self.0.store(true, Ordering::Relaxed);
    }

    /// Whether cancellation was requested.
    pub fn is_cancelled(&self) -> bool {
        self.0.load(Ordering::Relaxed)
    }
}

/// One resolved instruction.
struct Step<'a, C> {
    capability: &'a GateCapability<C>,
    args: &'a [f64],
    lines: Vec<usize>,
    slot: Option<usize>,
}

/// A step with its operands bound to a concrete state context.
struct BoundStep<'p, 'a, C> {
    step: &'p Step<'a, C>,
    qubits: Vec<Qubit>,
}

/// A circuit resolved against a gate table, ready to execute.
struct Program<'a, C> {
    qubit_count: usize,
    steps: Vec<Step<'a, C>>,
    measurement_names: Vec<String>,
}

impl<'a, C: StateContext> Program<'a, C> {
    /// Resolve every placement and check its scalar arguments.
    ///
    /// The circuit may have been linearized against another catalog, so a
    /// measurement name must be present exactly when the gate table says
    /// the gate measures.
    fn compile(circuit: &'a Circuit, gates: &'a GateTable<C>) -> EngineResult<Self> {
        let mut steps = Vec::with_capacity(circuit.len());
        let mut measurement_names = Vec::new();

        for placement in circuit.placements() {
            let capability = gates.resolve(placement.function_id())?;
            capability.check(placement.angle_args.len(), capability.arity().count())?;

            if let Some(angle) = placement.angle_args.iter().find(|a| !a.is_finite()) {
                return Err(EngineError::InvalidArgument(format!(
                    "Gate '{}' has a non-finite angle: {angle}",
                    placement.function_id()
                )));
            }
            if capability.measures() != placement.measurement_name().is_some() {
                return Err(EngineError::MeasurementMismatch {
                    gate: placement.function_id().to_string(),
                    measures: capability.measures(),
                });
            }

            let slot = placement.measurement_name().map(|name| {
                measurement_names.push(name.to_string());
                measurement_names.len() - 1
            });

            steps.push(Step {
                capability,
                args: &placement.angle_args,
                lines: operand_lines(placement, capability, circuit.qubit_count())?,
                slot,
            });
        }

        Ok(Self {
            qubit_count: circuit.qubit_count(),
            steps,
            measurement_names,
        })
    }

    /// Bind operand lines to qubit handles of `ctx`.
    fn bind<'p>(&'p self, ctx: &C) -> EngineResult<Vec<BoundStep<'p, 'a, C>>> {
        self.steps
            .iter()
            .map(|step| {
                let qubits = step
                    .lines
                    .iter()
                    .map(|&line| {
                        ctx.qubit(line).ok_or_else(|| EngineError::QubitOutOfRange {
                            gate: step.capability.name().to_string(),
                            qubit: line as isize,
                            qubit_count: ctx.num_qubits(),
                        })
                    })
                    .collect::<EngineResult<Vec<_>>>()?;
                Ok(BoundStep { step, qubits })
            })
            .collect()
    }

    fn aggregator(&self) -> Aggregator {
        Aggregator::new(self.measurement_names.clone())
    }
}

/// Operand lines in invocation order: the primary line, then the control
/// line selected by the orientation for two-qubit gates.
fn operand_lines<C>(
    placement: &GatePlacement,
    capability: &GateCapability<C>,
    qubit_count: usize,
) -> EngineResult<Vec<usize>> {
    let out_of_range = |qubit: isize| EngineError::QubitOutOfRange {
        gate: placement.function_id().to_string(),
        qubit,
        qubit_count,
    };

    let primary = placement.qubit_index;
    if primary >= qubit_count {
        return Err(out_of_range(primary as isize));
    }
    if capability.arity().count() == 1 {
        return Ok(vec![primary]);
    }

    let control = placement.control_line();
    if control < 0 || control as usize >= qubit_count {
        return Err(out_of_range(control));
    }
    Ok(vec![primary, control as usize])
}

/// Execute `trials` trials, returning how many completed.
fn run_trials<C: StateContext>(
    steps: &[BoundStep<'_, '_, C>],
    ctx: &mut C,
    aggregator: &mut Aggregator,
    trials: u64,
    cancel: Option<&CancelToken>,
) -> EngineResult<u64> {
    for trial in 0..trials {
        if cancel.is_some_and(CancelToken::is_cancelled) {
            return Ok(trial);
        }

        ctx.reset();
        for bound in steps {
            let step = bound.step;
            let outcome = step.capability.invoke(ctx, step.args, &bound.qubits)?;
            if let (Some(outcome), Some(slot)) = (outcome, step.slot) {
                aggregator.record(slot, outcome);
            }
        }

        if trial > 0 && trial % 1000 == 0 {
            debug!("Completed {} trials", trial);
        }
    }
    Ok(trials)
}

/// Split `trials` into `workers` near-equal shares.
fn partition(trials: u64, workers: usize) -> Vec<u64> {
    let workers = (workers as u64).clamp(1, trials.max(1));
    let base = trials / workers;
    let extra = trials % workers;
    (0..workers).map(|i| base + u64::from(i < extra)).collect()
}

/// Drives trial loops for circuits over a runtime and gate table.
pub struct Simulator<'a, R: QuantumRuntime> {
    runtime: &'a R,
    gates: &'a GateTable<R::Context>,
}

impl<'a, R: QuantumRuntime> Simulator<'a, R> {
    /// Create a driver over an initialised runtime and its gate table.
    pub fn new(runtime: &'a R, gates: &'a GateTable<R::Context>) -> Self {
        Self { runtime, gates }
    }

    /// The gate table used for dispatch.
    pub fn gates(&self) -> &GateTable<R::Context> {
        self.gates
    }

    /// Build a circuit from placements, validated against the gate table.
    pub fn build_circuit<'p>(
        &self,
        placements: impl IntoIterator<Item = &'p GatePlacement>,
        qubit_line_count: usize,
    ) -> EngineResult<Circuit> {
        Ok(Circuit::build(placements, qubit_line_count, self.gates)?)
    }

    /// Run `trials` sequential trials.
    ///
    /// Either every trial completes and the full tally map is returned, or
    /// the first dispatch error aborts the run and no tallies are returned.
    #[instrument(skip(self, circuit), fields(qubits = circuit.qubit_count()))]
    pub fn run(&self, circuit: &Circuit, trials: u64) -> EngineResult<SimulationResult> {
        self.run_sequential(circuit, trials, None)
    }

    /// Like [`run`](Self::run), but stops between trials once `cancel` is
    /// set and returns a result flagged as cancelled.
    #[instrument(skip(self, circuit, cancel), fields(qubits = circuit.qubit_count()))]
    pub fn run_with_cancel(
        &self,
        circuit: &Circuit,
        trials: u64,
        cancel: &CancelToken,
    ) -> EngineResult<SimulationResult> {
        self.run_sequential(circuit, trials, Some(cancel))
    }

    /// Split trials over `workers`, each with its own state context.
    ///
    /// Worker results are summed; the outcome distribution matches a
    /// sequential run.
    #[instrument(skip(self, circuit), fields(qubits = circuit.qubit_count()))]
    pub fn run_parallel(
        &self,
        circuit: &Circuit,
        trials: u64,
        workers: usize,
    ) -> EngineResult<SimulationResult> {
        validate(circuit, trials)?;
        if workers == 0 {
            return Err(EngineError::InvalidArgument(
                "worker count must be positive".into(),
            ));
        }

        let start = Instant::now();
        let program = Program::compile(circuit, self.gates)?;
        let shares = partition(trials, workers);
        debug!("Running {} trials on {} workers", trials, shares.len());

        let partials: Vec<EngineResult<SimulationResult>> = shares
            .into_par_iter()
            .map(|share| {
                let mut ctx = self.runtime.allocate(program.qubit_count)?;
                let steps = program.bind(&ctx)?;
                let mut aggregator = program.aggregator();
                let completed = run_trials(&steps, &mut ctx, &mut aggregator, share, None)?;
                Ok(aggregator.finish(share, completed, false))
            })
            .collect();

        let mut result = program.aggregator().finish(0, 0, false);
        for partial in partials {
            result = result.merge(partial?);
        }

        info!(
            "Simulation completed: {} trials in {:?}",
            result.completed_trials(),
            start.elapsed()
        );
        Ok(result)
    }

    /// Run with the trial count and worker count from `config`.
    pub fn run_configured(
        &self,
        circuit: &Circuit,
        config: &SimulationConfig,
    ) -> EngineResult<SimulationResult> {
        config.validate()?;
        if config.workers > 1 {
            self.run_parallel(circuit, config.trials, config.workers)
        } else {
            self.run(circuit, config.trials)
        }
    }

    fn run_sequential(
        &self,
        circuit: &Circuit,
        trials: u64,
        cancel: Option<&CancelToken>,
    ) -> EngineResult<SimulationResult> {
        validate(circuit, trials)?;

        let start = Instant::now();
        let program = Program::compile(circuit, self.gates)?;
        debug!(
            "Starting simulation: {} qubits, {} steps, {} trials",
            program.qubit_count,
            program.steps.len(),
            trials
        );

        let mut ctx = self.runtime.allocate(program.qubit_count)?;
        let steps = program.bind(&ctx)?;
        let mut aggregator = program.aggregator();
        let completed = run_trials(&steps, &mut ctx, &mut aggregator, trials, cancel)?;

        let cancelled = completed < trials;
        if cancelled {
            warn!("Simulation cancelled after {} of {} trials", completed, trials);
        } else {
            info!("Simulation completed: {} trials in {:?}", completed, start.elapsed());
        }
        Ok(aggregator.finish(trials, completed, cancelled))
    }
}

fn validate(circuit: &Circuit, trials: u64) -> EngineResult<()> {
    if circuit.qubit_count() == 0 {
        return Err(EngineError::InvalidArgument(
            "qubit count must be positive".into(),
        ));
    }
    if trials == 0 {
        return Err(EngineError::InvalidArgument(
            "trial count must be positive".into(),
        ));
    }
    Ok(())
}
