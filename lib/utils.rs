//! Grid-level tools for wavefunctions sampled on a uniform grid.
//!
//! These complement the adaptive [quadrature][crate::quad]: once a state has
//! been sampled into a [`Frame`][crate::playback::Frame] (or any array), its
//! norm and overlaps can be checked with the trapezoidal rule directly on the
//! samples.

use ndarray::{ self as nd, Ix1 };
use num_complex::ComplexFloat;

/// Integrate using the trapezoidal rule.
///
/// Returns zero for fewer than two samples.
pub fn trapz<S, A>(y: &nd::ArrayBase<S, Ix1>, dx: f64) -> A
where
    S: nd::Data<Elem = A>,
    A: ComplexFloat<Real = f64> + From<f64>,
{
    let n: usize = y.len();
    if n < 2 { return A::zero(); }
    let two = A::one() + A::one();
    <A as From<f64>>::from(dx) / two
        * (y[0] + two * y.slice(nd::s![1..n - 1]).sum() + y[n - 1])
}

/// Calculate the inner product `∫ q* p dx` of two sampled wavefunctions.
///
/// Only the first `min(q.len(), p.len())` samples are used.
pub fn wf_dot<S, T, A>(
    q: &nd::ArrayBase<S, Ix1>,
    p: &nd::ArrayBase<T, Ix1>,
    dx: f64,
) -> A
where
    S: nd::Data<Elem = A>,
    T: nd::Data<Elem = A>,
    A: ComplexFloat<Real = f64> + From<f64>,
{
    let n: usize = q.len().min(p.len());
    if n < 2 { return A::zero(); }
    let two = A::one() + A::one();
    <A as From<f64>>::from(dx) / two * (
        q[0].conj() * p[0]
        + two * q.iter().zip(p).skip(1).take(n - 2)
            .fold(A::zero(), |acc, (qk, pk)| acc + qk.conj() * *pk)
        + q[n - 1].conj() * p[n - 1]
    )
}
