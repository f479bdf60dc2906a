//! Adaptive Gauss-Legendre quadrature over finite intervals and the whole real
//! line.
//!
//! Each interval of the working partition is estimated with Gauss-Legendre
//! rules of two different orders; the higher-order value is kept and the
//! difference between the two is taken as the interval's error. The interval
//! with the largest error is bisected until the total estimated error falls
//! below `max(epsilon, epsilon * |I|)`, or until the partition reaches
//! `maxintervals` intervals, in which case [`QuadError::NonConvergence`] is
//! returned along with the best available estimate.
//!
//! Integrals over the real line are taken through the change of variables
//! ```text
//!       s                1 + s²
//! x = ------,   dx = ---------- ds,   s ∊ (-1, 1)
//!     1 - s²          (1 - s²)²
//! ```
//! so the integrand must decay fast enough for the transformed integrand to be
//! integrable near `s = ±1`.
//!
//! ```
//! use qhospace::quad::{ QuadParams, integrate_line_real };
//!
//! let gauss = integrate_line_real(
//!     |x| (-x * x).exp(), &QuadParams::default()).unwrap();
//! assert!((gauss.value - std::f64::consts::PI.sqrt()).abs() < 1e-6);
//! ```

use std::{ cmp::Ordering, collections::BinaryHeap };
use gauss_quad::GaussLegendre;
use num_complex::Complex64 as C64;
use num_traits::Zero;
use tracing::trace;
use crate::{
    error::QuadError,
    DEF_EPSILON,
    DEF_INITINTERVALS,
    DEF_MAXINTERVALS,
};

pub type QResult<T> = Result<T, QuadError>;

// orders of the Gauss-Legendre pair used on every interval
const LO_ORDER: usize = 10;
const HI_ORDER: usize = 21;

/// Tolerance and work limits for adaptive quadrature.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct QuadParams {
    /// Absolute and relative error bound (default: `1e-6`).
    pub epsilon: f64,
    /// Maximum number of intervals in the working partition (default:
    /// `200_000`).
    pub maxintervals: usize,
    /// Number of uniform intervals the domain is split into before any
    /// adaptive refinement (default: `32`).
    pub init_intervals: usize,
}

impl Default for QuadParams {
    fn default() -> Self {
        Self {
            epsilon: DEF_EPSILON,
            maxintervals: DEF_MAXINTERVALS,
            init_intervals: DEF_INITINTERVALS,
        }
    }
}

impl QuadParams {
    /// Set the error bound.
    pub fn with_epsilon(mut self, epsilon: f64) -> Self {
        self.epsilon = epsilon;
        self
    }

    /// Set the subdivision limit.
    pub fn with_maxintervals(mut self, maxintervals: usize) -> Self {
        self.maxintervals = maxintervals;
        self
    }

    fn check(&self) -> QResult<()> {
        QuadError::check_epsilon(self.epsilon)?;
        QuadError::check_maxintervals(self.maxintervals)?;
        QuadError::check_init_intervals(self.init_intervals)?;
        Ok(())
    }
}

/// Result of a converged integration.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct QuadOutput<T> {
    /// Estimate of the integral.
    pub value: T,
    /// Estimated absolute error of `value`.
    pub error: f64,
    /// Number of intervals in the final partition.
    pub intervals: usize,
}

impl QuadOutput<C64> {
    fn into_real(self) -> QuadOutput<f64> {
        QuadOutput { value: self.value.re, error: self.error, intervals: self.intervals }
    }
}

// a single interval of the working partition, ordered by its error estimate
#[derive(Copy, Clone, Debug)]
struct Segment {
    a: f64,
    b: f64,
    value: C64,
    error: f64,
}

impl PartialEq for Segment {
    fn eq(&self, other: &Self) -> bool { self.cmp(other) == Ordering::Equal }
}

impl Eq for Segment { }

impl PartialOrd for Segment {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Segment {
    fn cmp(&self, other: &Self) -> Ordering {
        self.error.total_cmp(&other.error)
    }
}

// (node, weight) pairs on [-1, 1]
fn rule(order: usize) -> QResult<Vec<(f64, f64)>> {
    let gl = GaussLegendre::new(order).map_err(|_| QuadError::BadOrder(order))?;
    let pairs: Vec<(f64, f64)>
        = gl.nodes().zip(gl.weights())
        .map(|(x, w)| (*x, *w))
        .collect();
    Ok(pairs)
}

/// Reusable adaptive integrator.
///
/// Construction validates the [parameters][QuadParams] and generates the
/// Gauss-Legendre rules once, so repeated integrations (e.g. one per basis
/// mode) don't pay for them again.
#[derive(Clone, Debug)]
pub struct Integrator {
    params: QuadParams,
    lo: Vec<(f64, f64)>,
    hi: Vec<(f64, f64)>,
}

impl Integrator {
    /// Create a new `Integrator`.
    pub fn new(params: &QuadParams) -> QResult<Self> {
        params.check()?;
        Ok(Self { params: *params, lo: rule(LO_ORDER)?, hi: rule(HI_ORDER)? })
    }

    /// Get a reference to the integration parameters.
    pub fn params(&self) -> &QuadParams { &self.params }

    fn segment<F>(&self, f: &mut F, a: f64, b: f64) -> Segment
    where F: FnMut(f64) -> C64
    {
        let c = 0.5 * (a + b);
        let h = 0.5 * (b - a);
        let mut apply = |pairs: &[(f64, f64)]| -> C64 {
            pairs.iter()
                .fold(C64::zero(), |acc, (x, w)| acc + f(c + h * x) * *w)
                * h
        };
        let lo = apply(&self.lo);
        let hi = apply(&self.hi);
        Segment { a, b, value: hi, error: (hi - lo).norm() }
    }

    fn tolerance(&self, value: C64) -> f64 {
        self.params.epsilon.max(self.params.epsilon * value.norm())
    }

    // adaptive refinement of [a, b]; assumes a < b, both finite
    fn refine<F>(&self, mut f: F, a: f64, b: f64) -> QResult<QuadOutput<C64>>
    where F: FnMut(f64) -> C64
    {
        let n0 = self.params.init_intervals;
        let w = (b - a) / n0 as f64;
        let mut heap: BinaryHeap<Segment>
            = (0..n0)
            .map(|k| {
                let ak = a + k as f64 * w;
                let bk = if k == n0 - 1 { b } else { a + (k + 1) as f64 * w };
                self.segment(&mut f, ak, bk)
            })
            .collect();
        let sum = |heap: &BinaryHeap<Segment>| -> (C64, f64) {
            heap.iter()
                .fold((C64::zero(), 0.0), |(v, e), seg| (v + seg.value, e + seg.error))
        };
        let (mut value, mut error) = sum(&heap);
        let fail = |value: C64, error: f64, intervals: usize| {
            QuadError::NonConvergence { value, error, intervals }
        };
        loop {
            if !(value.re.is_finite() && value.im.is_finite() && error.is_finite()) {
                return Err(fail(value, error, heap.len()));
            }
            if error <= self.tolerance(value) {
                // running sums drift; confirm against a fresh total
                (value, error) = sum(&heap);
                if error <= self.tolerance(value) { break; }
            }
            if heap.len() >= self.params.maxintervals {
                return Err(fail(value, error, heap.len()));
            }
            let Some(worst) = heap.pop() else { break; };
            let mid = 0.5 * (worst.a + worst.b);
            if !(worst.a < mid && mid < worst.b) {
                heap.push(worst);
                return Err(fail(value, error, heap.len()));
            }
            let left = self.segment(&mut f, worst.a, mid);
            let right = self.segment(&mut f, mid, worst.b);
            value += left.value + right.value - worst.value;
            error += left.error + right.error - worst.error;
            heap.push(left);
            heap.push(right);
        }
        trace!(intervals = heap.len(), error, "quadrature converged");
        Ok(QuadOutput { value, error, intervals: heap.len() })
    }

    /// Integrate a complex-valued function over the finite interval `[a, b]`.
    ///
    /// Reversed bounds flip the sign of the result.
    pub fn integrate<F>(&self, f: F, a: f64, b: f64) -> QResult<QuadOutput<C64>>
    where F: FnMut(f64) -> C64
    {
        QuadError::check_bounds(a, b)?;
        match a.partial_cmp(&b) {
            Some(Ordering::Less) => self.refine(f, a, b),
            Some(Ordering::Greater) => {
                let mut out = self.refine(f, b, a)?;
                out.value = -out.value;
                Ok(out)
            },
            _ => Ok(QuadOutput { value: C64::zero(), error: 0.0, intervals: 0 }),
        }
    }

    /// Integrate a real-valued function over the finite interval `[a, b]`.
    pub fn integrate_real<F>(&self, mut f: F, a: f64, b: f64)
        -> QResult<QuadOutput<f64>>
    where F: FnMut(f64) -> f64
    {
        self.integrate(|x| C64::from(f(x)), a, b)
            .map(|out| out.into_real())
    }

    /// Integrate a complex-valued function over the whole real line.
    pub fn integrate_line<F>(&self, mut f: F) -> QResult<QuadOutput<C64>>
    where F: FnMut(f64) -> C64
    {
        let mapped = |s: f64| -> C64 {
            let q = 1.0 - s * s;
            let x = s / q;
            let jac = (1.0 + s * s) / (q * q);
            let fx = f(x);
            // avoid 0 * inf at the far ends of the line
            if fx.is_zero() { fx } else { fx * jac }
        };
        self.refine(mapped, -1.0, 1.0)
    }

    /// Integrate a real-valued function over the whole real line.
    pub fn integrate_line_real<F>(&self, mut f: F) -> QResult<QuadOutput<f64>>
    where F: FnMut(f64) -> f64
    {
        self.integrate_line(|x| C64::from(f(x)))
            .map(|out| out.into_real())
    }
}

/// Integrate a complex-valued function over `[a, b]`.
///
/// See [`Integrator::integrate`].
pub fn integrate<F>(f: F, a: f64, b: f64, params: &QuadParams)
    -> QResult<QuadOutput<C64>>
where F: FnMut(f64) -> C64
{
    Integrator::new(params)?.integrate(f, a, b)
}

/// Integrate a real-valued function over `[a, b]`.
///
/// See [`Integrator::integrate_real`].
pub fn integrate_real<F>(f: F, a: f64, b: f64, params: &QuadParams)
    -> QResult<QuadOutput<f64>>
where F: FnMut(f64) -> f64
{
    Integrator::new(params)?.integrate_real(f, a, b)
}

/// Integrate a complex-valued function over the real line.
///
/// See [`Integrator::integrate_line`].
pub fn integrate_line<F>(f: F, params: &QuadParams)
    -> QResult<QuadOutput<C64>>
where F: FnMut(f64) -> C64
{
    Integrator::new(params)?.integrate_line(f)
}

/// Integrate a real-valued function over the real line.
///
/// See [`Integrator::integrate_line_real`].
pub fn integrate_line_real<F>(f: F, params: &QuadParams)
    -> QResult<QuadOutput<f64>>
where F: FnMut(f64) -> f64
{
    Integrator::new(params)?.integrate_line_real(f)
}
