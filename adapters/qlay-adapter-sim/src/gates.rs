//! The standard gate set, registered by function identifier.

use qlay_engine::{EngineResult, GateFn, GateTable, Qubit};

use crate::statevector::Statevector;

/// Identifiers of every gate in [`standard_table`].
pub const STANDARD_GATES: [&str; 14] = [
    "M", "Mx", "X", "Y", "Z", "H", "SRNOT", "Rx", "Ry", "Rz", "Rp", "SWAP", "SRSWAP", "CNOT",
];

/// Dispatch table for the statevector simulator.
///
/// Angle gates take radians. `CNOT` treats its primary line as the target
/// and the oriented neighbour as the control.
pub fn standard_table() -> EngineResult<GateTable<Statevector>> {
    GateTable::new()
        .with("M", GateFn::Measure(Statevector::measure))?
        .with("Mx", GateFn::Measure(Statevector::measure_x))?
        .with("X", GateFn::Single(Statevector::x))?
        .with("Y", GateFn::Single(Statevector::y))?
        .with("Z", GateFn::Single(Statevector::z))?
        .with("H", GateFn::Single(Statevector::h))?
        .with("SRNOT", GateFn::Single(Statevector::srnot))?
        .with("Rx", GateFn::Angle(Statevector::rx))?
        .with("Ry", GateFn::Angle(Statevector::ry))?
        .with("Rz", GateFn::Angle(Statevector::rz))?
        .with("Rp", GateFn::Angle(rp))?
        .with("SWAP", GateFn::Pair(Statevector::swap))?
        .with("SRSWAP", GateFn::Pair(Statevector::srswap))?
        .with("CNOT", GateFn::Pair(cnot))
}

fn rp(sv: &mut Statevector, theta: f64, qubit: Qubit) {
    sv.phase(qubit, theta);
}

fn cnot(sv: &mut Statevector, target: Qubit, control: Qubit) {
    sv.cnot(control, target);
}
