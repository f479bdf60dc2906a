//! A truncated Hilbert space spanned by the first `dim` eigenfunctions of a
//! fixed [basis family][Basis].
//!
//! Every eigenfunction is cached as a [`SampledFunction`] at construction, so
//! that evaluating the basis at every sample of every animation frame is a
//! table lookup rather than a Hermite recurrence and an exponential.
//!
//! ```
//! use qhospace::hilbert::HilbertSpace;
//!
//! let hs = HilbertSpace::qho(4).unwrap();
//! assert_eq!(hs.dim(), 4);
//! assert_eq!(hs.eigenvalue(3).unwrap(), 3.5);
//! assert!(hs.eigenbasis(4, 0.0).is_err());
//! ```

use std::fmt;
use ndarray as nd;
use num_complex::Complex64 as C64;
use tracing::{ debug, warn };
use crate::{
    basis::Basis,
    error::HilbertError,
    interp::{ Interp, SampledFunction },
    quad::{ Integrator, QuadParams },
};

pub type HResult<T> = Result<T, HilbertError>;

/// A real-valued potential energy function.
pub type Potential = Box<dyn Fn(f64) -> f64 + Send + Sync>;

pub(crate) const DEF_MIN_X: f64 = -15.0;
pub(crate) const DEF_MAX_X: f64 = 15.0;
pub(crate) const DEF_NUM_SAMPLES: usize = 2000;

/// Domain and resolution of the cached basis tables.
///
/// The domain must be wide enough to contain the support of every retained
/// eigenfunction (the `n`-th oscillator function is negligible beyond roughly
/// `√(2n + 1) + 6`), since lookups outside it are clamped to the boundary
/// samples. The grid spacing `(max_x - min_x) / num_samples` bounds the error
/// of each lookup by about `dx/2 · |φ'|` for [nearest-neighbor][Interp::Nearest]
/// tables and `dx²/8 · |φ''|` for [linear][Interp::Linear] ones.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct TableParams {
    /// Lower bound of the sampled domain (default: `-15`).
    pub min_x: f64,
    /// Upper bound of the sampled domain (default: `15`).
    pub max_x: f64,
    /// Number of samples per table (default: `2000`).
    pub num_samples: usize,
    /// Lookup rule between samples (default: nearest-neighbor).
    pub interp: Interp,
}

impl Default for TableParams {
    fn default() -> Self {
        Self {
            min_x: DEF_MIN_X,
            max_x: DEF_MAX_X,
            num_samples: DEF_NUM_SAMPLES,
            interp: Interp::Nearest,
        }
    }
}

/// The first `dim` modes of a basis family, with cached eigenfunctions.
pub struct HilbertSpace {
    dim: usize,
    basis: Basis,
    params: TableParams,
    V: Option<Potential>,
    // one table per mode, indexed by mode number
    tables: Vec<SampledFunction<f64>>,
}

impl fmt::Debug for HilbertSpace {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("HilbertSpace")
            .field("dim", &self.dim)
            .field("basis", &self.basis)
            .field("params", &self.params)
            .field("V", &self.V.as_ref().map(|_| "Fn(f64) -> f64"))
            .finish()
    }
}

// a potential generating the oscillator basis must equal x²/2 up to a constant
fn is_harmonic(V: &Potential) -> bool {
    let v0 = V(0.0);
    [-2.0_f64, -1.0, -0.5, 0.5, 1.0, 2.0].into_iter()
        .all(|x| ((V(x) - v0) - x * x / 2.0).abs() <= 1e-9 * (1.0 + x * x))
}

fn check_potential(basis: Basis, V: &Potential) {
    if basis.is_qho() && !is_harmonic(V) {
        warn!(
            "potential is not harmonic; the oscillator basis is not its \
            eigenbasis and energies will not match it"
        );
    }
}

impl HilbertSpace {
    /// Build the space spanned by the first `dim` modes of `basis`, caching
    /// each eigenfunction according to `params`.
    ///
    /// The potential, if given, is carried along for reference but does not
    /// alter the basis; a warning is logged if it is not the potential the
    /// basis diagonalizes.
    pub fn new(
        dim: usize,
        basis: Basis,
        V: Option<Potential>,
        params: &TableParams,
    ) -> HResult<Self> {
        HilbertError::check_dim(dim)?;
        if let Some(V) = V.as_ref() { check_potential(basis, V); }
        let tables: Vec<SampledFunction<f64>>
            = (0..dim)
            .map(|n| {
                SampledFunction::with_interp(
                    |x| basis.eigenfunction(n, x),
                    params.min_x,
                    params.max_x,
                    params.num_samples,
                    params.interp,
                )
            })
            .collect::<Result<_, _>>()?;
        debug!(dim, num_samples = params.num_samples, ?basis, "built basis tables");
        Ok(Self { dim, basis, params: *params, V, tables })
    }

    /// Shorthand for an oscillator basis with default tables and no potential.
    pub fn qho(dim: usize) -> HResult<Self> {
        Self::new(dim, Basis::Qho, None, &TableParams::default())
    }

    /// Attach a potential, replacing any existing one.
    pub fn with_potential<F>(mut self, V: F) -> Self
    where F: Fn(f64) -> f64 + Send + Sync + 'static
    {
        let V: Potential = Box::new(V);
        check_potential(self.basis, &V);
        self.V = Some(V);
        self
    }

    /// Number of retained modes.
    pub fn dim(&self) -> usize { self.dim }

    /// Basis family.
    pub fn basis(&self) -> Basis { self.basis }

    /// Parameters of the cached tables.
    pub fn params(&self) -> &TableParams { &self.params }

    /// Bounds `(min_x, max_x)` of the cached tables.
    ///
    /// Integrals involving the basis are taken over this interval only; the
    /// clamped values outside it do not contribute.
    pub fn domain(&self) -> (f64, f64) { (self.params.min_x, self.params.max_x) }

    /// Amplitude of mode `n` at `x`, read from its cached table.
    pub fn eigenbasis(&self, n: usize, x: f64) -> HResult<C64> {
        HilbertError::check_mode(n, self.dim)?;
        Ok(C64::from(self.tables[n].eval(x)))
    }

    /// Energy of mode `n`.
    pub fn eigenvalue(&self, n: usize) -> HResult<f64> {
        HilbertError::check_mode(n, self.dim)?;
        Ok(self.basis.eigenvalue(n))
    }

    /// Energies of all retained modes.
    pub fn eigenvalues(&self) -> nd::Array1<f64> {
        (0..self.dim).map(|n| self.basis.eigenvalue(n)).collect()
    }

    /// Evaluate the potential at `x`, if there is one.
    pub fn potential(&self, x: f64) -> Option<f64> {
        self.V.as_ref().map(|V| V(x))
    }

    /// Return `true` if a potential is attached.
    pub fn has_potential(&self) -> bool { self.V.is_some() }

    /// Get a reference to the cached table of mode `n`.
    pub fn table(&self, n: usize) -> HResult<&SampledFunction<f64>> {
        HilbertError::check_mode(n, self.dim)?;
        Ok(&self.tables[n])
    }

    /// Get a reference to all cached tables, indexed by mode.
    pub fn tables(&self) -> &[SampledFunction<f64>] { &self.tables }

    /// Compute the overlap `∫ φ[m]*(x) φ[n](x) dx` of two cached modes over
    /// the [table domain][Self::domain].
    ///
    /// This should be close to `δ[m, n]`; deviations measure the combined
    /// error of table resolution and quadrature.
    pub fn overlap(&self, m: usize, n: usize, quad: &QuadParams)
        -> HResult<C64>
    {
        HilbertError::check_mode(m, self.dim)?;
        HilbertError::check_mode(n, self.dim)?;
        let (phi_m, phi_n) = (&self.tables[m], &self.tables[n]);
        let (min_x, max_x) = self.domain();
        let out = Integrator::new(quad)?
            .integrate(|x| C64::from(phi_m.eval(x) * phi_n.eval(x)), min_x, max_x)?;
        Ok(out.value)
    }
}
