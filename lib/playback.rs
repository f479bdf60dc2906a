//! Sampling of a time-dependent wavefunction into animation frames.
//!
//! Rendering is left to the consumer: a [`Playback`] only decides *where* and
//! *when* to evaluate, and hands back plain arrays.
//!
//! ```
//! use num_complex::Complex64 as C64;
//! use qhospace::playback::Playback;
//!
//! let playback = Playback { samples: 11, frames: 3, ..Default::default() };
//! // a plane wave of unit amplitude
//! let frames: Vec<_>
//!     = playback.frames(|x: f64, t: f64| C64::cis(x - t)).collect();
//! assert_eq!(frames.len(), 3);
//! assert_eq!(frames[1].t, 0.02);
//! assert!(frames[2].prob.iter().all(|p| (p - 1.0).abs() < 1e-12));
//! ```

use ndarray as nd;
use num_complex::Complex64 as C64;
use crate::utils::{ trapz, wf_dot };

pub(crate) const DEF_SAMPLES: usize = 50;
pub(crate) const DEF_FRAMES: usize = 250;
pub(crate) const DEF_FRAME_RATE: f64 = 50.0;

/// Spatial window, frame count, and clock of an animation.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Playback {
    /// Number of positions sampled per frame (default: `50`).
    pub samples: usize,
    /// Number of frames (default: `250`).
    pub frames: usize,
    /// Simulation time elapsed per second of playback (default: `1`).
    pub time_factor: f64,
    /// Sampled spatial window, endpoints included (default: `(-5, 5)`).
    pub window: (f64, f64),
    /// Frames per second of playback (default: `50`).
    pub frame_rate: f64,
}

impl Default for Playback {
    fn default() -> Self {
        Self {
            samples: DEF_SAMPLES,
            frames: DEF_FRAMES,
            time_factor: 1.0,
            window: (-5.0, 5.0),
            frame_rate: DEF_FRAME_RATE,
        }
    }
}

/// A single sampled snapshot.
#[derive(Clone, Debug, PartialEq)]
pub struct Frame {
    /// Simulation time.
    pub t: f64,
    /// Sample positions.
    pub x: nd::Array1<f64>,
    /// Real part of the amplitude.
    pub re: nd::Array1<f64>,
    /// Imaginary part of the amplitude.
    pub im: nd::Array1<f64>,
    /// Probability density.
    pub prob: nd::Array1<f64>,
}

impl Frame {
    /// Trapezoidal estimate of the probability inside the window.
    ///
    /// This is a coarse diagnostic: with few samples, or a state leaking past
    /// the window, it can differ noticeably from 1.
    pub fn norm(&self) -> f64 {
        let n = self.x.len();
        if n < 2 { return 0.0; }
        trapz(&self.prob, self.x[1] - self.x[0])
    }

    /// Recombine the real and imaginary parts.
    pub fn amplitude(&self) -> nd::Array1<C64> {
        nd::Zip::from(&self.re).and(&self.im)
            .map_collect(|re, im| C64::new(*re, *im))
    }

    /// Trapezoidal estimate of the overlap `∫ ψ*(x) φ(x) dx` between this
    /// frame (`ψ`) and another sampled on the same grid (`φ`).
    ///
    /// Against an earlier frame of the same state this is the autocorrelation,
    /// whose magnitude returns to 1 at every revival.
    pub fn overlap(&self, other: &Frame) -> C64 {
        let n = self.x.len();
        if n < 2 { return C64::from(0.0); }
        wf_dot(&self.amplitude(), &other.amplitude(), self.x[1] - self.x[0])
    }
}

impl Playback {
    /// Simulation time of frame `i`.
    pub fn frame_time(&self, i: usize) -> f64 {
        self.time_factor * i as f64 / self.frame_rate
    }

    /// Sample positions shared by every frame.
    pub fn grid(&self) -> nd::Array1<f64> {
        nd::Array1::linspace(self.window.0, self.window.1, self.samples)
    }

    /// Evaluate `psi` over the grid at the time of frame `i`.
    pub fn frame<F>(&self, psi: F, i: usize) -> Frame
    where F: Fn(f64, f64) -> C64
    {
        self.frame_on(&psi, self.grid(), i)
    }

    fn frame_on<F>(&self, psi: &F, x: nd::Array1<f64>, i: usize) -> Frame
    where F: Fn(f64, f64) -> C64
    {
        let t = self.frame_time(i);
        let z: nd::Array1<C64> = x.mapv(|xk| psi(xk, t));
        Frame {
            t,
            x,
            re: z.mapv(|zk| zk.re),
            im: z.mapv(|zk| zk.im),
            prob: z.mapv(|zk| zk.norm_sqr()),
        }
    }

    /// Lazily produce all frames in order.
    pub fn frames<F>(&self, psi: F) -> impl Iterator<Item = Frame>
    where F: Fn(f64, f64) -> C64
    {
        let playback = *self;
        let x = self.grid();
        (0..self.frames)
            .map(move |i| playback.frame_on(&psi, x.clone(), i))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f64::consts::PI;
    use approx::assert_abs_diff_eq;
    use crate::{
        hilbert::HilbertSpace,
        quad::QuadParams,
        wavefunction::WaveFunction,
    };

    #[test]
    fn defaults() {
        let pb = Playback::default();
        assert_eq!(pb.samples, 50);
        assert_eq!(pb.frames, 250);
        assert_eq!(pb.frame_time(0), 0.0);
        assert_eq!(pb.frame_time(50), 1.0);
        let x = pb.grid();
        assert_eq!(x.len(), 50);
        assert_eq!(x[0], -5.0);
        assert_abs_diff_eq!(x[49], 5.0, epsilon = 1e-12);
    }

    #[test]
    fn time_factor() {
        let pb = Playback { time_factor: 2.0, ..Default::default() };
        assert_eq!(pb.frame_time(25), 1.0);
    }

    #[test]
    fn frame_parts() {
        let pb = Playback { samples: 7, ..Default::default() };
        let f = pb.frame(|x, t| C64::new(x, t), 10);
        assert_eq!(f.t, 0.2);
        assert_eq!(f.re, f.x);
        assert!(f.im.iter().all(|im| *im == 0.2));
        for ((re, im), p) in f.re.iter().zip(&f.im).zip(&f.prob) {
            assert_abs_diff_eq!(*p, re * re + im * im, epsilon = 1e-14);
        }
        assert_eq!(f.amplitude()[3], C64::new(f.x[3], 0.2));
    }

    #[test]
    fn frames_in_order() {
        let pb = Playback { samples: 5, frames: 4, ..Default::default() };
        let ts: Vec<f64> = pb.frames(|_, _| C64::from(1.0)).map(|f| f.t).collect();
        assert_eq!(ts, vec![0.0, 0.02, 0.04, 0.06]);
        let pb = Playback { frames: 0, ..pb };
        assert_eq!(pb.frames(|_, _| C64::from(1.0)).count(), 0);
    }

    #[test]
    fn ground_state_frames() {
        let hs = HilbertSpace::qho(2).unwrap();
        let psi = WaveFunction::from_coeffs(
            &hs, &[C64::from(1.0), C64::from(0.0)], &QuadParams::default())
            .unwrap();
        let pb = Playback { samples: 201, frames: 20, ..Default::default() };
        let first = pb.frame(psi.evaluator(), 0);
        for frame in pb.frames(psi.evaluator()) {
            // stationary: only the phase turns
            assert_abs_diff_eq!(frame.norm(), 1.0, epsilon = 1e-3);
            for (p, p0) in frame.prob.iter().zip(&first.prob) {
                assert_abs_diff_eq!(*p, *p0, epsilon = 1e-12);
            }
        }
    }

    #[test]
    fn overlap_autocorrelation() {
        let hs = HilbertSpace::qho(2).unwrap();
        let psi = WaveFunction::from_coeffs(
            &hs, &[C64::from(1.0), C64::from(1.0)], &QuadParams::default())
            .unwrap();
        let pb = Playback { samples: 201, frame_rate: 2.0 / PI, ..Default::default() };
        let f0 = pb.frame(psi.evaluator(), 0);
        let self_ov = f0.overlap(&f0);
        assert_abs_diff_eq!(self_ov.re, f0.norm(), epsilon = 1e-12);
        assert_abs_diff_eq!(self_ov.im, 0.0, epsilon = 1e-12);
        // t = π: the two modes pick up phases -i and +i and cancel
        let half = f0.overlap(&pb.frame(psi.evaluator(), 2));
        assert_abs_diff_eq!(half.norm(), 0.0, epsilon = 1e-3);
        // t = 2π: both pick up -1
        let full = f0.overlap(&pb.frame(psi.evaluator(), 4));
        assert_abs_diff_eq!(full.re, -1.0, epsilon = 1e-3);
        assert_abs_diff_eq!(full.im, 0.0, epsilon = 1e-3);
    }

    #[test]
    fn two_mode_period() {
        let hs = HilbertSpace::qho(2).unwrap();
        let psi = WaveFunction::from_coeffs(
            &hs, &[C64::from(1.0), C64::from(1.0)], &QuadParams::default())
            .unwrap();
        // frames half an oscillation period apart
        let pb = Playback { samples: 101, frame_rate: 1.0 / PI, ..Default::default() };
        let f0 = pb.frame(psi.evaluator(), 0);
        let f1 = pb.frame(psi.evaluator(), 1);
        let f2 = pb.frame(psi.evaluator(), 2);
        assert_abs_diff_eq!(f1.t, PI, epsilon = 1e-12);
        for (p0, p2) in f0.prob.iter().zip(&f2.prob) {
            assert_abs_diff_eq!(*p0, *p2, epsilon = 1e-10);
        }
        // half a period later the density is mirrored
        let n = f0.prob.len();
        for k in 0..n {
            assert_abs_diff_eq!(f1.prob[k], f0.prob[n - 1 - k], epsilon = 1e-10);
        }
    }
}
