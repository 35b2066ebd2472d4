//! Example circuits, laid out as they would be drawn on the canvas.
//!
//! Two-qubit gates sit on the line below their control and point up, so a
//! `CNOT` on line 1 is controlled by line 0.

use qlay_ir::{GatePlacement, Orientation};

/// Horizontal distance between gate columns.
pub const COLUMN_WIDTH: f64 = 80.0;

/// A named circuit ready to build.
#[derive(Debug, Clone)]
pub struct Demo {
    /// Identifier used on the command line.
    pub name: &'static str,
    /// One-line description.
    pub summary: &'static str,
    /// What the tallies should show.
    pub expectation: &'static str,
    /// Number of qubit lines.
    pub qubits: usize,
    /// Gates in drawing order.
    pub placements: Vec<GatePlacement>,
}

fn gate(id: &str, line: usize, column: usize) -> GatePlacement {
    GatePlacement::unchecked(id)
        .on_line(line)
        .at(COLUMN_WIDTH * (column as f64 + 0.5))
}

fn cnot_from_above(target_line: usize, column: usize) -> GatePlacement {
    gate("CNOT", target_line, column).with_orientation(Orientation::Up)
}

fn measure_all(qubits: usize, column: usize) -> impl Iterator<Item = GatePlacement> {
    (0..qubits).map(move |line| gate("M", line, column))
}

/// H then M: an even split.
pub fn hadamard() -> Demo {
    Demo {
        name: "hadamard",
        summary: "Hadamard on a fresh qubit",
        expectation: "M0 splits roughly 50/50",
        qubits: 1,
        placements: vec![gate("H", 0, 0), gate("M", 0, 1)],
    }
}

/// X then M: always one.
pub fn pauli_x() -> Demo {
    Demo {
        name: "pauli-x",
        summary: "Pauli-X bit flip",
        expectation: "M0 reads ONE every trial",
        qubits: 1,
        placements: vec![gate("X", 0, 0), gate("M", 0, 1)],
    }
}

/// Bell pair `|Φ+⟩`.
pub fn bell() -> Demo {
    let mut placements = vec![gate("H", 0, 0), cnot_from_above(1, 1)];
    placements.extend(measure_all(2, 2));
    Demo {
        name: "bell",
        summary: "Entangled Bell pair",
        expectation: "M0 and M1 have identical tallies, each near 50/50",
        qubits: 2,
        placements,
    }
}

/// Three-qubit GHZ state.
pub fn ghz() -> Demo {
    let mut placements = vec![
        gate("H", 0, 0),
        cnot_from_above(1, 1),
        cnot_from_above(2, 2),
    ];
    placements.extend(measure_all(3, 3));
    Demo {
        name: "ghz",
        summary: "Three-qubit GHZ state",
        expectation: "M0, M1 and M2 have identical tallies",
        qubits: 3,
        placements,
    }
}

/// Superdense coding of a two-bit message.
///
/// Alice encodes `message` on her half of a Bell pair (X for the low bit,
/// Z for the high bit) and Bob decodes it, so `M0 M1` reads the message.
pub fn superdense(message: [bool; 2]) -> Demo {
    let mut placements = vec![gate("H", 0, 0), cnot_from_above(1, 1)];
    if message[1] {
        placements.push(gate("X", 0, 2));
    }
    if message[0] {
        placements.push(gate("Z", 0, 3));
    }
    placements.push(cnot_from_above(1, 4));
    placements.push(gate("H", 0, 5));
    placements.extend(measure_all(2, 6));
    Demo {
        name: "superdense",
        summary: "Superdense coding of a two-bit message",
        expectation: "M0 and M1 read the encoded bits every trial (11 by default)",
        qubits: 2,
        placements,
    }
}

/// Deutsch-Jozsa with a phase oracle for "the input is odd".
pub fn deutsch_jozsa() -> Demo {
    let mut placements = Vec::new();
    placements.extend((0..3).map(|line| gate("H", line, 0)));
    placements.push(gate("Z", 0, 1));
    placements.extend((0..3).map(|line| gate("H", line, 2)));
    placements.extend(measure_all(3, 3));
    Demo {
        name: "deutsch-jozsa",
        summary: "Deutsch-Jozsa on a balanced three-bit function",
        expectation: "M0 reads ONE every trial (balanced); M1 and M2 read ZERO",
        qubits: 3,
        placements,
    }
}

/// Every built-in demo.
pub fn all() -> Vec<Demo> {
    vec![
        hadamard(),
        pauli_x(),
        bell(),
        ghz(),
        superdense([true, true]),
        deutsch_jozsa(),
    ]
}

/// Names of every built-in demo.
pub fn names() -> Vec<&'static str> {
    all().into_iter().map(|demo| demo.name).collect()
}

/// Look up a demo by name.
pub fn find(name: &str) -> Option<Demo> {
    all().into_iter().find(|demo| demo.name == name)
}
