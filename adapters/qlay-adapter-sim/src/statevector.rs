//! Statevector simulation state.
//!
//! Qubit `k` is bit `k` of the basis-state index.

use num_complex::Complex64;
use rand::Rng;
use rand::rngs::StdRng;

use qlay_engine::{Qubit, StateContext};

/// An N-qubit pure state with its own measurement RNG.
pub struct Statevector {
    /// The state amplitudes (2^n complex numbers).
    amplitudes: Vec<Complex64>,
    /// Number of qubits.
    num_qubits: usize,
    rng: StdRng,
}

impl Statevector {
    /// Create a statevector initialized to |0...0⟩.
    pub fn new(num_qubits: usize, rng: StdRng) -> Self {
        let size = 1 << num_qubits;
        let mut amplitudes = vec![Complex64::new(0.0, 0.0); size];
        amplitudes[0] = Complex64::new(1.0, 0.0);
        Self {
            amplitudes,
            num_qubits,
            rng,
        }
    }

    /// The state amplitudes.
    pub fn amplitudes(&self) -> &[Complex64] {
        &self.amplitudes
    }

    /// Probability of measuring `|1⟩` on `qubit`.
    pub fn probability_one(&self, qubit: Qubit) -> f64 {
        let mask = 1 << qubit.index();
        self.amplitudes
            .iter()
            .enumerate()
            .filter(|(i, _)| i & mask != 0)
            .map(|(_, amp)| amp.norm_sqr())
            .sum()
    }

    /// Bernoulli trial with success probability `p`, drawn from this
    /// state's RNG. `p` is clamped to `[0, 1]`.
    pub fn chance(&mut self, p: f64) -> bool {
        self.rng.gen_bool(p.clamp(0.0, 1.0))
    }

    /// Apply a 2x2 unitary `[[u00, u01], [u10, u11]]` to `qubit`.
    fn apply_single(&mut self, qubit: Qubit, u: [[Complex64; 2]; 2]) {
        let mask = 1 << qubit.index();
        for i in 0..self.amplitudes.len() {
            if i & mask == 0 {
                let j = i | mask;
                let a = self.amplitudes[i];
                let b = self.amplitudes[j];
                self.amplitudes[i] = u[0][0] * a + u[0][1] * b;
                self.amplitudes[j] = u[1][0] * a + u[1][1] * b;
            }
        }
    }

    // =========================================================================
    // Single-qubit gates
    // =========================================================================

    pub fn x(&mut self, qubit: Qubit) {
        let mask = 1 << qubit.index();
        for i in 0..self.amplitudes.len() {
            if i & mask == 0 {
                self.amplitudes.swap(i, i | mask);
            }
        }
    }

    pub fn y(&mut self, qubit: Qubit) {
        let mask = 1 << qubit.index();
        let i_val = Complex64::new(0.0, 1.0);
        for i in 0..self.amplitudes.len() {
            if i & mask == 0 {
                let j = i | mask;
                let tmp = self.amplitudes[i];
                self.amplitudes[i] = -i_val * self.amplitudes[j];
                self.amplitudes[j] = i_val * tmp;
            }
        }
    }

    pub fn z(&mut self, qubit: Qubit) {
        self.phase(qubit, std::f64::consts::PI);
    }

    pub fn h(&mut self, qubit: Qubit) {
        let mask = 1 << qubit.index();
        let sqrt2_inv = std::f64::consts::FRAC_1_SQRT_2;
        for i in 0..self.amplitudes.len() {
            if i & mask == 0 {
                let j = i | mask;
                let a = self.amplitudes[i];
                let b = self.amplitudes[j];
                self.amplitudes[i] = sqrt2_inv * (a + b);
                self.amplitudes[j] = sqrt2_inv * (a - b);
            }
        }
    }

    /// Square root of NOT: applying it twice is `X`.
    pub fn srnot(&mut self, qubit: Qubit) {
        let p = Complex64::new(0.5, 0.5);
        let m = Complex64::new(0.5, -0.5);
        self.apply_single(qubit, [[p, m], [m, p]]);
    }

    pub fn rx(&mut self, theta: f64, qubit: Qubit) {
        let c = Complex64::new((theta / 2.0).cos(), 0.0);
        let neg_i_s = Complex64::new(0.0, -(theta / 2.0).sin());
        self.apply_single(qubit, [[c, neg_i_s], [neg_i_s, c]]);
    }

    pub fn ry(&mut self, theta: f64, qubit: Qubit) {
        let c = Complex64::new((theta / 2.0).cos(), 0.0);
        let s = Complex64::new((theta / 2.0).sin(), 0.0);
        self.apply_single(qubit, [[c, -s], [s, c]]);
    }

    pub fn rz(&mut self, theta: f64, qubit: Qubit) {
        let mask = 1 << qubit.index();
        let phase_0 = Complex64::from_polar(1.0, -theta / 2.0);
        let phase_1 = Complex64::from_polar(1.0, theta / 2.0);
        for (i, amp) in self.amplitudes.iter_mut().enumerate() {
            *amp *= if i & mask == 0 { phase_0 } else { phase_1 };
        }
    }

    /// Phase shift: multiplies the `|1⟩` component by `e^{iθ}`.
    pub fn phase(&mut self, qubit: Qubit, theta: f64) {
        let mask = 1 << qubit.index();
        let phase = Complex64::from_polar(1.0, theta);
        for (i, amp) in self.amplitudes.iter_mut().enumerate() {
            if i & mask != 0 {
                *amp *= phase;
            }
        }
    }

    // =========================================================================
    // Two-qubit gates
    // =========================================================================

    pub fn cnot(&mut self, control: Qubit, target: Qubit) {
        let ctrl_mask = 1 << control.index();
        let tgt_mask = 1 << target.index();
        for i in 0..self.amplitudes.len() {
            if (i & ctrl_mask != 0) && (i & tgt_mask == 0) {
                self.amplitudes.swap(i, i | tgt_mask);
            }
        }
    }

    pub fn swap(&mut self, a: Qubit, b: Qubit) {
        let mask_a = 1 << a.index();
        let mask_b = 1 << b.index();
        for i in 0..self.amplitudes.len() {
            if (i & mask_a != 0) && (i & mask_b == 0) {
                let j = (i & !mask_a) | mask_b;
                self.amplitudes.swap(i, j);
            }
        }
    }

    /// Square root of SWAP: mixes `|01⟩` and `|10⟩`.
    pub fn srswap(&mut self, a: Qubit, b: Qubit) {
        let mask_a = 1 << a.index();
        let mask_b = 1 << b.index();
        let p = Complex64::new(0.5, 0.5);
        let m = Complex64::new(0.5, -0.5);
        for i in 0..self.amplitudes.len() {
            if (i & mask_a != 0) && (i & mask_b == 0) {
                let j = (i & !mask_a) | mask_b;
                let u = self.amplitudes[i];
                let v = self.amplitudes[j];
                self.amplitudes[i] = p * u + m * v;
                self.amplitudes[j] = m * u + p * v;
            }
        }
    }

    // =========================================================================
    // Measurement
    // =========================================================================

    /// Measure `qubit` in the computational basis.
    ///
    /// Samples the outcome, zeroes the contradicting amplitudes and
    /// renormalises the rest.
    pub fn measure(&mut self, qubit: Qubit) -> bool {
        let mask = 1 << qubit.index();
        let outcome = self.chance(self.probability_one(qubit));

        let mut norm_sq = 0.0;
        for (i, amp) in self.amplitudes.iter_mut().enumerate() {
            if (i & mask != 0) == outcome {
                norm_sq += amp.norm_sqr();
            } else {
                *amp = Complex64::new(0.0, 0.0);
            }
        }

        let norm = norm_sq.sqrt();
        if norm > 0.0 {
            for amp in &mut self.amplitudes {
                *amp /= norm;
            }
        }
        outcome
    }

    /// Measure `qubit` in the sign (`|+⟩`/`|−⟩`) basis.
    pub fn measure_x(&mut self, qubit: Qubit) -> bool {
        self.h(qubit);
        let outcome = self.measure(qubit);
        self.h(qubit);
        outcome
    }
}

impl StateContext for Statevector {
    fn num_qubits(&self) -> usize {
        self.num_qubits
    }

    fn reset(&mut self) {
        self.amplitudes.fill(Complex64::new(0.0, 0.0));
        self.amplitudes[0] = Complex64::new(1.0, 0.0);
    }
}
