//! Wavefunctions expanded in a truncated eigenbasis, evolved in time with
//! per-mode phase factors.
//!
//! Given coefficients *c*[*n*] in a [`HilbertSpace`] with eigenpairs
//! (*E*[*n*], *φ*[*n*]), the state at time *t* is
//! ```text
//!            1    dim-1
//! ψ(x, t) = ---    Σ   c[n] φ[n](x) exp(-i E[n] t)
//!            N    n=0
//! ```
//! where *N* is fixed once, at construction, so that ∫ |*ψ*(*x*, 0)|² d*x* =
//! 1 over the [domain][HilbertSpace::domain] of the basis tables. Nothing is
//! integrated in time: evaluating at any *t* is a single sum.
//!
//! ```
//! use num_complex::Complex64 as C64;
//! use qhospace::{ hilbert::HilbertSpace, quad::QuadParams, wavefunction::WaveFunction };
//!
//! let hs = HilbertSpace::qho(1).unwrap();
//! let psi = WaveFunction::from_coeffs(&hs, &[C64::from(3.0)], &QuadParams::default())
//!     .unwrap();
//! // stationary state: only the phase changes
//! let a = psi.evaluate(0.4, 0.0);
//! let b = psi.evaluate(0.4, 2.0);
//! assert!((a.norm() - b.norm()).abs() < 1e-12);
//! assert!((b / a - C64::cis(-1.0)).norm() < 1e-12);
//! ```

use ndarray as nd;
use num_complex::Complex64 as C64;
use tracing::{ debug, warn };
use crate::{
    Arr1,
    error::{ LengthError, QuadError, WfError },
    hilbert::HilbertSpace,
    quad::{ Integrator, QuadParams },
};

pub type WfResult<T> = Result<T, WfError>;

// warn when a projection keeps less than this fraction of the initial norm
const CAPTURE_WARN: f64 = 0.99;

/// A normalized state in a [`HilbertSpace`].
///
/// Immutable after construction; all evaluation methods are pure reads, so a
/// `WaveFunction` can be shared freely between threads.
#[derive(Clone, Debug)]
pub struct WaveFunction<'a> {
    hilbert: &'a HilbertSpace,
    coeffs: Vec<C64>,
    // E[n], copied out of the basis so evaluation never has to check n
    energies: Vec<f64>,
    norm: f64,
    // Σ |c[n]|² / ∫ |ψ₀|², when built from an initial waveform
    captured: Option<f64>,
}

impl<'a> WaveFunction<'a> {
    /// Build a state directly from its expansion coefficients.
    ///
    /// `coeffs` must have exactly `hilbert.dim()` elements and need not be
    /// normalized.
    pub fn from_coeffs(
        hilbert: &'a HilbertSpace,
        coeffs: &[C64],
        quad: &QuadParams,
    ) -> WfResult<Self> {
        LengthError::check(hilbert.dim(), coeffs)?;
        let integrator = Integrator::new(quad)?;
        Self::build(hilbert, coeffs.to_vec(), None, &integrator)
    }

    /// Build a state by orthogonal projection of an initial waveform onto
    /// the basis of `hilbert`:
    /// ```text
    /// c[n] = ∫ φ[n]*(x) ψ₀(x) dx
    /// ```
    /// with each integral taken over the domain of the basis tables, outside
    /// of which the eigenfunctions are treated as zero.
    ///
    /// `ψ₀` need not be square-integrable. When `∫ |ψ₀|² dx` over the real
    /// line can be computed, [`Self::captured`] reports the fraction of it
    /// kept by the truncated basis.
    pub fn from_initial<F>(
        hilbert: &'a HilbertSpace,
        mut psi0: F,
        quad: &QuadParams,
    ) -> WfResult<Self>
    where F: FnMut(f64) -> C64
    {
        let integrator = Integrator::new(quad)?;
        let (min_x, max_x) = hilbert.domain();
        let coeffs: Vec<C64>
            = hilbert.tables().iter().enumerate()
            .map(|(n, phi)| {
                let out = integrator.integrate(
                    |x| phi.eval(x) * psi0(x), min_x, max_x)?;
                debug!(n, c = %out.value, intervals = out.intervals, "projected mode");
                Ok(out.value)
            })
            .collect::<Result<_, QuadError>>()?;
        let captured
            = match integrator.integrate_line_real(|x| psi0(x).norm_sqr()) {
                Ok(out) if out.value.is_finite() && out.value > 0.0 => {
                    let kept: f64 = coeffs.iter().map(|c| c.norm_sqr()).sum();
                    Some(kept / out.value)
                },
                Ok(out) => {
                    debug!(norm2 = out.value, "initial state has no usable norm");
                    None
                },
                Err(err) => {
                    debug!(%err, "initial state is not square-integrable");
                    None
                },
            };
        if let Some(captured) = captured {
            if captured < CAPTURE_WARN {
                warn!(
                    captured,
                    dim = hilbert.dim(),
                    "truncated basis keeps only part of the initial state; \
                    consider a larger dimension"
                );
            }
        }
        Self::build(hilbert, coeffs, captured, &integrator)
    }

    fn build(
        hilbert: &'a HilbertSpace,
        coeffs: Vec<C64>,
        captured: Option<f64>,
        integrator: &Integrator,
    ) -> WfResult<Self> {
        if coeffs.iter().any(|c| !(c.re.is_finite() && c.im.is_finite())) {
            return Err(WfError::DegenerateNormalization(f64::NAN));
        }
        let energies: Vec<f64> = hilbert.eigenvalues().to_vec();
        let mut wf = Self { hilbert, coeffs, energies, norm: 1.0, captured };
        let (min_x, max_x) = hilbert.domain();
        let norm2
            = match integrator.integrate_real(
                |x| wf.raw(x, 0.0).norm_sqr(), min_x, max_x)
            {
                Ok(out) => out.value,
                Err(QuadError::NonConvergence { value, .. })
                    if !value.re.is_finite() =>
                {
                    value.re
                },
                Err(err) => { return Err(err.into()); },
            };
        WfError::check_norm(norm2)?;
        wf.norm = norm2.sqrt();
        debug!(dim = hilbert.dim(), norm = wf.norm, "normalized wavefunction");
        Ok(wf)
    }

    // unnormalized superposition
    fn raw(&self, x: f64, t: f64) -> C64 {
        self.hilbert.tables().iter()
            .zip(&self.coeffs)
            .zip(&self.energies)
            .map(|((phi, c), e)| *c * phi.eval(x) * C64::cis(-e * t))
            .sum()
    }

    /// Complex amplitude at position `x` and time `t`.
    pub fn evaluate(&self, x: f64, t: f64) -> C64 { self.raw(x, t) / self.norm }

    /// Probability density `|ψ(x, t)|²`.
    pub fn density(&self, x: f64, t: f64) -> f64 {
        self.evaluate(x, t).norm_sqr()
    }

    /// Phase accumulated by mode `n` after time `t`, `exp(-i E[n] t)`.
    pub fn phase_factor(&self, n: usize, t: f64) -> WfResult<C64> {
        let e = self.hilbert.eigenvalue(n)?;
        Ok(C64::cis(-e * t))
    }

    /// Evaluate the state over an array of positions at a single time.
    pub fn sample<S>(&self, x: &Arr1<S>, t: f64) -> nd::Array1<C64>
    where S: nd::Data<Elem = f64>
    {
        x.mapv(|xk| self.evaluate(xk, t))
    }

    /// Borrow [`Self::evaluate`] as a plain closure.
    pub fn evaluator(&self) -> impl Fn(f64, f64) -> C64 + '_ {
        move |x, t| self.evaluate(x, t)
    }

    /// The (unnormalized) expansion coefficients.
    pub fn coeffs(&self) -> &[C64] { &self.coeffs }

    /// The normalization constant `N`.
    pub fn norm(&self) -> f64 { self.norm }

    /// Fraction of the initial waveform's squared norm retained by the
    /// truncated projection, if the state was built from one.
    pub fn captured(&self) -> Option<f64> { self.captured }

    /// The space this state lives in.
    pub fn hilbert(&self) -> &'a HilbertSpace { self.hilbert }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f64::consts::{ PI, TAU, SQRT_2 };
    use approx::assert_abs_diff_eq;
    use crate::{
        basis::hermite_function,
        error::HilbertError,
        quad::integrate_real,
    };

    fn c(re: f64, im: f64) -> C64 { C64::new(re, im) }

    #[test]
    fn normalized() {
        let hs = HilbertSpace::qho(3).unwrap();
        let quad = QuadParams::default();
        let psi = WaveFunction::from_coeffs(
            &hs, &[c(1.0, 0.0), c(0.0, 2.0), c(-0.5, 0.0)], &quad).unwrap();
        assert_abs_diff_eq!(psi.norm(), 5.25_f64.sqrt(), epsilon = 1e-3);
        assert_eq!(psi.captured(), None);
        let (min_x, max_x) = hs.domain();
        for t in [0.0, 0.7, 3.0] {
            let p = integrate_real(|x| psi.density(x, t), min_x, max_x, &quad)
                .unwrap();
            assert_abs_diff_eq!(p.value, 1.0, epsilon = 1e-5);
        }
    }

    #[test]
    fn ground_state_shape() {
        let hs = HilbertSpace::qho(3).unwrap();
        let psi = WaveFunction::from_coeffs(
            &hs, &[c(1.0, 0.0), c(0.0, 0.0), c(0.0, 0.0)], &QuadParams::default())
            .unwrap();
        assert_abs_diff_eq!(psi.norm(), 1.0, epsilon = 1e-4);
        for x in [-2.5, -1.0, 0.0, 0.3, 1.8] {
            let z = psi.evaluate(x, 0.0);
            assert_abs_diff_eq!(z.re, hermite_function(0, x), epsilon = 1e-2);
            assert_abs_diff_eq!(z.im, 0.0);
        }
    }

    #[test]
    fn stationary_state() {
        let hs = HilbertSpace::qho(1).unwrap();
        let psi = WaveFunction::from_coeffs(&hs, &[c(1.0, 0.0)], &QuadParams::default())
            .unwrap();
        for x in [-1.0, 0.0, 0.5] {
            let z0 = psi.evaluate(x, 0.0);
            for t in [0.3, 1.0, 10.0] {
                let z = psi.evaluate(x, t);
                assert_abs_diff_eq!(z.norm(), z0.norm(), epsilon = 1e-12);
                let expected = z0 * C64::cis(-0.5 * t);
                assert_abs_diff_eq!(z.re, expected.re, epsilon = 1e-12);
                assert_abs_diff_eq!(z.im, expected.im, epsilon = 1e-12);
            }
        }
    }

    #[test]
    fn excited_phase() {
        let hs = HilbertSpace::qho(3).unwrap();
        let psi = WaveFunction::from_coeffs(
            &hs, &[c(0.0, 0.0), c(0.0, 0.0), c(1.0, 0.0)], &QuadParams::default())
            .unwrap();
        let z0 = psi.evaluate(0.8, 0.0);
        let z = psi.evaluate(0.8, 1.2);
        let ratio = z / z0;
        let expected = psi.phase_factor(2, 1.2).unwrap();
        assert_abs_diff_eq!(ratio.re, expected.re, epsilon = 1e-12);
        assert_abs_diff_eq!(ratio.im, expected.im, epsilon = 1e-12);
        assert_abs_diff_eq!(expected.re, (-2.5 * 1.2_f64).cos(), epsilon = 1e-15);
        assert!(matches!(
            psi.phase_factor(3, 1.0),
            Err(WfError::Hilbert(HilbertError::OutOfRangeMode { n: 3, dim: 3 })),
        ));
    }

    #[test]
    fn superposition_beats() {
        let hs = HilbertSpace::qho(2).unwrap();
        let psi = WaveFunction::from_coeffs(
            &hs, &[c(1.0, 0.0), c(1.0, 0.0)], &QuadParams::default()).unwrap();
        for x in [-1.5, -0.4, 0.9] {
            for t in [0.0, 0.5, 2.0] {
                assert_abs_diff_eq!(
                    psi.density(x, t), psi.density(x, t + TAU), epsilon = 1e-12);
            }
            // half a period later the lobes have swapped sides
            assert_abs_diff_eq!(
                psi.density(x, PI), psi.density(-x, 0.0), epsilon = 1e-2);
        }
        assert!(psi.density(1.0, 0.0) > psi.density(1.0, PI));
    }

    #[test]
    fn two_mode_scenario() {
        let hs = HilbertSpace::qho(2).unwrap();
        let psi = WaveFunction::from_coeffs(
            &hs, &[c(1.0, 0.0), c(1.0, 0.0)], &QuadParams::default()).unwrap();
        let phi0 = hs.eigenbasis(0, 0.0).unwrap();
        let phi1 = hs.eigenbasis(1, 0.0).unwrap();
        let z = psi.evaluate(0.0, 0.0);
        let expected = (phi0 + phi1) / psi.norm();
        assert!(z.re > 0.0);
        assert_abs_diff_eq!(z.im, 0.0, epsilon = 1e-15);
        assert_abs_diff_eq!(z.re, expected.re, epsilon = 1e-15);
        // the unnormalized state has norm √2
        assert_abs_diff_eq!(psi.norm(), SQRT_2, epsilon = 1e-3);

        // at t = π the modes pick up phases -i and +i
        let z = psi.evaluate(0.0, PI);
        let expected = (phi0 * C64::cis(-0.5 * PI) + phi1 * C64::cis(-1.5 * PI))
            / psi.norm();
        assert_abs_diff_eq!(z.re, expected.re, epsilon = 1e-12);
        assert_abs_diff_eq!(z.im, expected.im, epsilon = 1e-12);
        // away from the node of φ[1], the relative sign of the two modes flips
        let a = psi.evaluate(1.0, 0.0) * psi.norm();
        let b = psi.evaluate(1.0, PI) * psi.norm() * C64::cis(0.5 * PI);
        let (phi0, phi1) = (hs.eigenbasis(0, 1.0).unwrap(), hs.eigenbasis(1, 1.0).unwrap());
        assert_abs_diff_eq!(a.re, (phi0 + phi1).re, epsilon = 1e-12);
        assert_abs_diff_eq!(b.re, (phi0 - phi1).re, epsilon = 1e-12);
        assert_abs_diff_eq!(b.im, 0.0, epsilon = 1e-12);
    }

    #[test]
    fn projects_eigenfunction() {
        let hs = HilbertSpace::qho(4).unwrap();
        let psi = WaveFunction::from_initial(
            &hs, |x| C64::from(hermite_function(1, x)), &QuadParams::default())
            .unwrap();
        let expected = [0.0, 1.0, 0.0, 0.0];
        for (cn, en) in psi.coeffs().iter().zip(expected) {
            assert_abs_diff_eq!(cn.re, en, epsilon = 1e-3);
            assert_abs_diff_eq!(cn.im, 0.0, epsilon = 1e-12);
        }
        assert_abs_diff_eq!(psi.captured().unwrap(), 1.0, epsilon = 1e-3);
    }

    // a ground state displaced by √2 α is the coherent state |α⟩, with
    // c[n] = exp(-α²/2) αⁿ / √(n!)
    #[test]
    fn coherent_state() {
        let alpha: f64 = 1.0;
        let x0 = SQRT_2 * alpha;
        let hs = HilbertSpace::qho(12).unwrap();
        let quad = QuadParams::default();
        let psi = WaveFunction::from_initial(
            &hs, |x| C64::from(hermite_function(0, x - x0)), &quad).unwrap();
        let mut fact = 1.0;
        for (n, cn) in psi.coeffs().iter().enumerate().take(5) {
            if n > 0 { fact *= n as f64; }
            let expected = (-alpha.powi(2) / 2.0).exp() * alpha.powi(n as i32)
                / fact.sqrt();
            assert_abs_diff_eq!(cn.re, expected, epsilon = 2e-3);
        }
        assert_abs_diff_eq!(psi.captured().unwrap(), 1.0, epsilon = 1e-3);

        // the packet swings to the other side of the well after half a period
        let (min_x, max_x) = hs.domain();
        let mean_x = |t: f64| {
            integrate_real(|x| x * psi.density(x, t), min_x, max_x, &quad)
                .unwrap().value
        };
        assert_abs_diff_eq!(mean_x(0.0), x0, epsilon = 1e-2);
        assert_abs_diff_eq!(mean_x(PI), -x0, epsilon = 1e-2);
        assert_abs_diff_eq!(mean_x(PI / 2.0), 0.0, epsilon = 1e-2);
    }

    #[test]
    fn plane_wave_initial() {
        let hs = HilbertSpace::qho(4).unwrap();
        let quad = QuadParams::default();
        let k = 0.5;
        let psi = WaveFunction::from_initial(&hs, |x| C64::cis(k * x), &quad)
            .unwrap();
        // ∫ φ[0](x) exp(ikx) dx = √2 π^(1/4) exp(-k²/2)
        let c0 = SQRT_2 * PI.powf(0.25) * (-k * k / 2.0).exp();
        assert_abs_diff_eq!(psi.coeffs()[0].re, c0, epsilon = 1e-3);
        assert_abs_diff_eq!(psi.coeffs()[0].im, 0.0, epsilon = 1e-3);
        // |ψ₀|² is not integrable, so there is nothing to compare against
        assert_eq!(psi.captured(), None);

        let (min_x, max_x) = hs.domain();
        for t in [0.0, 1.3] {
            let p = integrate_real(|x| psi.density(x, t), min_x, max_x, &quad)
                .unwrap();
            assert_abs_diff_eq!(p.value, 1.0, epsilon = 1e-5);
        }

        let psi = WaveFunction::from_initial(&hs, |_| C64::from(1.0), &quad)
            .unwrap();
        assert_abs_diff_eq!(psi.coeffs()[0].re, SQRT_2 * PI.powf(0.25), epsilon = 1e-3);
        assert_abs_diff_eq!(psi.coeffs()[1].norm(), 0.0, epsilon = 1e-3);
        assert_eq!(psi.captured(), None);
    }

    #[test]
    fn initial_state_normalized() {
        let hs = HilbertSpace::qho(8).unwrap();
        let quad = QuadParams::default();
        let psi = WaveFunction::from_initial(
            &hs, |x| C64::from(3.0 * (-(x - 0.5).powi(2)).exp()), &quad).unwrap();
        let (min_x, max_x) = hs.domain();
        for t in [0.0, 0.4, 2.2] {
            let p = integrate_real(|x| psi.density(x, t), min_x, max_x, &quad)
                .unwrap();
            assert_abs_diff_eq!(p.value, 1.0, epsilon = 1e-5);
        }
    }

    #[test]
    fn high_mode_normalizes() {
        // the table edges are far from negligible for the top mode here
        let dim = 90;
        let hs = HilbertSpace::qho(dim).unwrap();
        let mut coeffs = vec![c(0.0, 0.0); dim];
        coeffs[dim - 1] = c(1.0, 0.0);
        let psi = WaveFunction::from_coeffs(&hs, &coeffs, &QuadParams::default())
            .unwrap();
        assert_abs_diff_eq!(psi.norm(), 1.0, epsilon = 1e-3);
    }

    #[test]
    fn normalization_non_convergence() {
        let hs = HilbertSpace::qho(2).unwrap();
        let quad = QuadParams { init_intervals: 1, maxintervals: 1, ..Default::default() };
        let res = WaveFunction::from_coeffs(&hs, &[c(1.0, 0.0), c(0.0, 0.0)], &quad);
        match res {
            Err(WfError::Quad(QuadError::NonConvergence { value, intervals, .. })) => {
                assert!(value.re.is_finite());
                assert_eq!(intervals, 1);
            },
            other => panic!("unexpected result {other:?}"),
        }

        // overflowing amplitudes make the normalization integral infinite
        let res = WaveFunction::from_coeffs(
            &hs, &[c(1e200, 0.0), c(0.0, 0.0)], &QuadParams::default());
        match res {
            Err(WfError::DegenerateNormalization(norm2)) => {
                assert!(!norm2.is_finite());
            },
            other => panic!("unexpected result {other:?}"),
        }
    }

    #[test]
    fn wrong_length() {
        let hs = HilbertSpace::qho(3).unwrap();
        let res = WaveFunction::from_coeffs(&hs, &[c(1.0, 0.0)], &QuadParams::default());
        assert!(matches!(res, Err(WfError::Length(LengthError(3, 1)))));
    }

    #[test]
    fn degenerate() {
        let hs = HilbertSpace::qho(2).unwrap();
        let quad = QuadParams::default();
        let res = WaveFunction::from_coeffs(&hs, &[c(0.0, 0.0), c(0.0, 0.0)], &quad);
        assert!(matches!(res, Err(WfError::DegenerateNormalization(_))));
        let res = WaveFunction::from_coeffs(&hs, &[c(f64::NAN, 0.0), c(1.0, 0.0)], &quad);
        assert!(matches!(res, Err(WfError::DegenerateNormalization(_))));
        let res = WaveFunction::from_initial(&hs, |_| C64::from(0.0), &quad);
        assert!(matches!(res, Err(WfError::DegenerateNormalization(_))));
    }

    #[test]
    fn projection_non_convergence() {
        let hs = HilbertSpace::qho(2).unwrap();
        let quad = QuadParams::default().with_maxintervals(33);
        let boxcar = |x: f64| C64::from(if x.abs() < 1.0 { 1.0 } else { 0.0 });
        let res = WaveFunction::from_initial(&hs, boxcar, &quad);
        assert!(matches!(
            res,
            Err(WfError::Quad(QuadError::NonConvergence { .. })),
        ));
    }

    #[test]
    fn sample_and_share() {
        fn assert_send_sync<T: Send + Sync>() { }
        assert_send_sync::<WaveFunction<'static>>();

        let hs = HilbertSpace::qho(2).unwrap();
        let psi = WaveFunction::from_coeffs(
            &hs, &[c(1.0, 0.0), c(0.0, 1.0)], &QuadParams::default()).unwrap();
        let x: nd::Array1<f64> = nd::Array1::linspace(-5.0, 5.0, 11);
        let q = psi.sample(&x, 0.25);
        let eval = psi.evaluator();
        let psi = &psi;
        let from_threads: Vec<C64>
            = std::thread::scope(|s| {
                let handles: Vec<_>
                    = x.iter()
                    .map(|&xk| s.spawn(move || psi.evaluate(xk, 0.25)))
                    .collect();
                handles.into_iter()
                    .map(|h| h.join().unwrap())
                    .collect()
            });
        for ((qk, xk), tk) in q.iter().zip(&x).zip(&from_threads) {
            assert_eq!(*qk, eval(*xk, 0.25));
            assert_eq!(qk, tk);
        }
    }
}
