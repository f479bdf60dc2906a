//! Analytic eigenbasis families.
//!
//! Only the quantum harmonic oscillator is provided. In natural units
//! (*ħ* = *m* = *ω* = 1) its eigenpairs are
//! ```text
//! E[n] = n + 1/2
//!
//!               1
//! φ[n](x) = ----------- exp(-x²/2) H[n](x)
//!           √(2ⁿ n! √π)
//! ```
//! with *H*[*n*] the physicists' Hermite polynomials. Rather than evaluating
//! the factorial and polynomial separately, the normalized functions are
//! built up with the three-term recurrence
//! ```text
//! φ[0](x) = π^(-1/4) exp(-x²/2)
//! φ[1](x) = √2 x φ[0](x)
//! φ[n](x) = √(2/n) x φ[n-1](x) - √((n-1)/n) φ[n-2](x)
//! ```
//! which stays finite and accurate for large *n*.

use std::f64::consts::PI;

/// Selector for the family of basis functions spanning a
/// [`HilbertSpace`][crate::hilbert::HilbertSpace].
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub enum Basis {
    /// Quantum harmonic oscillator eigenfunctions.
    #[default]
    Qho,
}

impl Basis {
    /// Return `true` if `self` is `Qho`.
    pub fn is_qho(&self) -> bool { matches!(self, Self::Qho) }

    /// Evaluate the `n`-th eigenfunction at `x` in closed form.
    pub fn eigenfunction(&self, n: usize, x: f64) -> f64 {
        match self {
            Self::Qho => hermite_function(n, x),
        }
    }

    /// Energy of the `n`-th eigenfunction.
    pub fn eigenvalue(&self, n: usize) -> f64 {
        match self {
            Self::Qho => n as f64 + 0.5,
        }
    }
}

/// Evaluate the `n`-th normalized Hermite function at `x`.
pub fn hermite_function(n: usize, x: f64) -> f64 {
    let phi0 = PI.powf(-0.25) * (-x * x / 2.0).exp();
    if n == 0 { return phi0; }
    let mut prev = phi0;
    let mut cur = 2.0_f64.sqrt() * x * phi0;
    let mut next: f64;
    for k in 2..=n {
        let k = k as f64;
        next = (2.0 / k).sqrt() * x * cur - ((k - 1.0) / k).sqrt() * prev;
        prev = cur;
        cur = next;
    }
    cur
}
