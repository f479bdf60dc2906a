//! Collection of all error types.
//!
//! All errors derive [`thiserror::Error`], making them composable when allowed
//! and compatible with application code using [`anyhow`][anyhow].
//!
//! [anyhow]: https://crates.io/crates/anyhow

use thiserror::Error;

/// Returned when a coefficient vector does not match the dimension of the
/// Hilbert space it is meant to live in.
#[derive(Debug, Error)]
#[error("encountered coefficients with incompatible length; expected {0}, got {1}")]
pub struct LengthError(pub usize, pub usize);

impl LengthError {
    pub(crate) fn check<A>(dim: usize, coeffs: &[A]) -> Result<(), Self> {
        let n = coeffs.len();
        (n == dim).then_some(()).ok_or(Self(dim, n))
    }
}

/// Returned from the construction of a
/// [`SampledFunction`][crate::interp::SampledFunction].
#[derive(Debug, Error)]
pub enum SampleError {
    /// Returned when domain bounds are non-finite or out of order.
    #[error("sampling domain must be finite with min < max; got [{0}, {1})")]
    BadDomain(f64, f64),

    /// Returned when fewer than two samples are requested.
    #[error("sample count must be at least 2; got {0}")]
    BadSampleCount(usize),
}

impl SampleError {
    pub(crate) fn check_domain(min_x: f64, max_x: f64) -> Result<(), Self> {
        (min_x.is_finite() && max_x.is_finite() && min_x < max_x)
            .then_some(())
            .ok_or(Self::BadDomain(min_x, max_x))
    }

    pub(crate) fn check_samples(num_samples: usize) -> Result<(), Self> {
        (num_samples >= 2).then_some(())
            .ok_or(Self::BadSampleCount(num_samples))
    }
}

/// Returned from functions in [`quad`][crate::quad].
#[derive(Debug, Error)]
pub enum QuadError {
    /// Returned when a non-positive `epsilon` value is encountered.
    #[error("epsilon values must be greater than 0; got {0}")]
    BadEpsilon(f64),

    /// Returned when a zero `maxintervals` value is encountered.
    #[error("maxintervals must be greater than 0; got {0}")]
    BadMaxIntervals(usize),

    /// Returned when a zero `init_intervals` value is encountered.
    #[error("init_intervals must be greater than 0; got {0}")]
    BadInitIntervals(usize),

    /// Returned when finite integration bounds are required but not given.
    #[error("integration bounds must be finite; got ({0}, {1})")]
    BadBounds(f64, f64),

    /// Returned when a Gauss-Legendre rule of the requested order could not
    /// be generated.
    #[error("could not generate a Gauss-Legendre rule of order {0}")]
    BadOrder(usize),

    /// Returned when the error bound could not be met within the subdivision
    /// limit, or the integrand produced non-finite values.
    #[error(
        "quadrature failed to converge: value {value} with estimated error \
        {error:.3e} after {intervals} intervals"
    )]
    NonConvergence {
        /// Best estimate of the integral.
        value: num_complex::Complex64,
        /// Estimated absolute error of `value`.
        error: f64,
        /// Number of intervals in the final partition.
        intervals: usize,
    },
}

impl QuadError {
    pub(crate) fn check_epsilon(epsilon: f64) -> Result<(), Self> {
        (epsilon > 0.0).then_some(()).ok_or(Self::BadEpsilon(epsilon))
    }

    pub(crate) fn check_maxintervals(maxintervals: usize) -> Result<(), Self> {
        (maxintervals != 0).then_some(())
            .ok_or(Self::BadMaxIntervals(maxintervals))
    }

    pub(crate) fn check_bounds(a: f64, b: f64) -> Result<(), Self> {
        (a.is_finite() && b.is_finite()).then_some(())
            .ok_or(Self::BadBounds(a, b))
    }

    pub(crate) fn check_init_intervals(init_intervals: usize)
        -> Result<(), Self>
    {
        (init_intervals != 0).then_some(())
            .ok_or(Self::BadInitIntervals(init_intervals))
    }
}

/// Returned from [`HilbertSpace`][crate::hilbert::HilbertSpace] construction
/// and queries.
#[derive(Debug, Error)]
pub enum HilbertError {
    /// Returned when a Hilbert space of zero dimension is requested.
    #[error("hilbert space dimension must be at least 1; got {0}")]
    BadDim(usize),

    /// Returned when a basis mode outside `[0, dim)` is requested.
    #[error("mode index {n} is out of range for a hilbert space of dimension {dim}")]
    OutOfRangeMode { n: usize, dim: usize },

    /// [`SampleError`]
    #[error("basis table error: {0}")]
    Sample(#[from] SampleError),

    /// [`QuadError`]
    #[error("quadrature error: {0}")]
    Quad(#[from] QuadError),
}

impl HilbertError {
    pub(crate) fn check_dim(dim: usize) -> Result<(), Self> {
        (dim != 0).then_some(()).ok_or(Self::BadDim(dim))
    }

    pub(crate) fn check_mode(n: usize, dim: usize) -> Result<(), Self> {
        (n < dim).then_some(()).ok_or(Self::OutOfRangeMode { n, dim })
    }
}

/// Returned from [`WaveFunction`][crate::wavefunction::WaveFunction]
/// construction.
#[derive(Debug, Error)]
pub enum WfError {
    /// [`LengthError`]
    #[error("coefficient length error: {0}")]
    Length(#[from] LengthError),

    /// [`HilbertError`]
    #[error("hilbert space error: {0}")]
    Hilbert(#[from] HilbertError),

    /// [`QuadError`]
    #[error("quadrature error: {0}")]
    Quad(#[from] QuadError),

    /// Returned when the normalization integral is zero, negative, or not
    /// finite.
    #[error("cannot normalize a state with squared norm {0}")]
    DegenerateNormalization(f64),
}

impl WfError {
    pub(crate) fn check_norm(norm2: f64) -> Result<(), Self> {
        (norm2.is_finite() && norm2 > 0.0).then_some(())
            .ok_or(Self::DegenerateNormalization(norm2))
    }
}
