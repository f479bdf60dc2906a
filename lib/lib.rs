#![allow(non_snake_case)]

//! Provides constructs for representing one-dimensional wavefunctions in a
//! truncated eigenbasis of a Hamiltonian and evolving them in time with the
//! spectral (eigen-decomposition) method.
//!
//! The main pieces are:
//! - [`SampledFunction`][interp::SampledFunction]: a dense lookup table
//!   standing in for a continuous function, making basis evaluation O(1)
//! - [`HilbertSpace`][hilbert::HilbertSpace]: the first `dim` eigenfunctions
//!   and energies of a fixed [basis family][basis::Basis] (currently the
//!   quantum harmonic oscillator)
//! - [`WaveFunction`][wavefunction::WaveFunction]: projection of an initial
//!   state onto the basis, normalization, and analytic time evolution
//! - [`quad`]: adaptive Gauss-Legendre quadrature over finite intervals and
//!   the whole real line
//! - [`playback`]: sampling of a `(x, t) -> ψ` evaluator over a position grid
//!   at successive animation frames
//!
//! ```
//! use num_complex::Complex64 as C64;
//! use qhospace::{ hilbert::HilbertSpace, wavefunction::WaveFunction, quad::QuadParams };
//!
//! let hs = HilbertSpace::qho(2).unwrap();
//! let coeffs = [C64::from(1.0), C64::from(1.0)];
//! let psi = WaveFunction::from_coeffs(&hs, &coeffs, &QuadParams::default())
//!     .unwrap();
//! // the superposition sloshes back and forth with period 2π
//! let left = psi.density(-1.0, 0.0);
//! let right = psi.density(-1.0, std::f64::consts::PI);
//! assert!(left < right);
//! ```
//!
//! See [`docs`] for theoretical background.

pub mod error;
pub mod interp;
pub mod quad;
pub mod basis;
pub mod hilbert;
pub mod wavefunction;
pub mod playback;
pub mod units;
pub mod utils;

pub mod docs;

pub(crate) const DEF_EPSILON: f64 = 1e-6;
pub(crate) const DEF_INITINTERVALS: usize = 32;
pub(crate) const DEF_MAXINTERVALS: usize = 200_000;

pub type Arr1<S> = ndarray::ArrayBase<S, ndarray::Ix1>;
