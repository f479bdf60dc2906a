//! Dense lookup tables standing in for continuous functions of one real
//! variable.
//!
//! A [`SampledFunction`] evaluates its source function once per grid point at
//! construction and afterwards answers every query with an O(1) table lookup.
//! Queries outside the sampled domain are clamped to the nearest boundary
//! sample, never extrapolated.
//!
//! ```
//! use qhospace::interp::SampledFunction;
//!
//! let f = SampledFunction::new(|x: f64| x.powi(2), -2.0, 2.0, 4000).unwrap();
//! assert!((f.eval(0.5) - 0.25).abs() < 1e-3);
//! // clamped, not extrapolated
//! assert_eq!(f.eval(-100.0), f.eval(-2.0));
//! assert_eq!(f.eval(100.0), f.values()[3999]);
//! ```

use std::ops::{ Add, Mul };
use ndarray as nd;
use crate::error::SampleError;

pub type SampleResult<T> = Result<T, SampleError>;

/// Lookup rule used between table samples.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub enum Interp {
    /// Return the value of the nearest sample.
    #[default]
    Nearest,
    /// Linearly interpolate between the two bracketing samples.
    Linear,
}

/// A function of one real variable cached as `N` samples over `[min_x,
/// max_x)`.
///
/// Sample `k` holds `f(min_x + k * (max_x - min_x) / N)`.
#[derive(Clone, Debug)]
pub struct SampledFunction<T> {
    min_x: f64,
    max_x: f64,
    // (max_x - min_x) / N
    dx: f64,
    image: Vec<T>,
    interp: Interp,
}

impl<T> SampledFunction<T>
where T: Copy + Add<T, Output = T> + Mul<f64, Output = T>
{
    /// Sample `f` at `num_samples` evenly spaced points in `[min_x, max_x)`
    /// with nearest-neighbor lookup.
    pub fn new<F>(f: F, min_x: f64, max_x: f64, num_samples: usize)
        -> SampleResult<Self>
    where F: FnMut(f64) -> T
    {
        Self::with_interp(f, min_x, max_x, num_samples, Interp::Nearest)
    }

    /// Like [`Self::new`], but with an explicit lookup rule.
    pub fn with_interp<F>(
        mut f: F,
        min_x: f64,
        max_x: f64,
        num_samples: usize,
        interp: Interp,
    ) -> SampleResult<Self>
    where F: FnMut(f64) -> T
    {
        SampleError::check_domain(min_x, max_x)?;
        SampleError::check_samples(num_samples)?;
        let dx = (max_x - min_x) / num_samples as f64;
        let image: Vec<T>
            = (0..num_samples)
            .map(|k| f(min_x + k as f64 * dx))
            .collect();
        Ok(Self { min_x, max_x, dx, image, interp })
    }

    /// Look up the cached value at `x`.
    ///
    /// `x` is first clamped into the sampled domain.
    pub fn eval(&self, x: f64) -> T {
        let last = self.image.len() - 1;
        let s = (x.clamp(self.min_x, self.max_x) - self.min_x) / self.dx;
        match self.interp {
            Interp::Nearest => {
                let k = (s.round() as usize).min(last);
                self.image[k]
            },
            Interp::Linear => {
                let k = (s.floor() as usize).min(last);
                if k == last { return self.image[last]; }
                let r = s - k as f64;
                self.image[k] * (1.0 - r) + self.image[k + 1] * r
            },
        }
    }

    /// Lower bound of the sampled domain.
    pub fn min_x(&self) -> f64 { self.min_x }

    /// (Exclusive) upper bound of the sampled domain.
    pub fn max_x(&self) -> f64 { self.max_x }

    /// Grid spacing.
    pub fn dx(&self) -> f64 { self.dx }

    /// Number of samples.
    #[allow(clippy::len_without_is_empty)]
    pub fn len(&self) -> usize { self.image.len() }

    /// Lookup rule.
    pub fn interp(&self) -> Interp { self.interp }

    /// The sample coordinates.
    pub fn grid(&self) -> nd::Array1<f64> {
        nd::Array1::range(0.0, self.image.len() as f64, 1.0)
            .mapv(|k| self.min_x + k * self.dx)
    }

    /// The cached samples.
    pub fn values(&self) -> &[T] { &self.image }
}
