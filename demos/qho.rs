use std::f64::consts::PI;
use num_complex::Complex64 as C64;
use tracing::info;
use tracing_subscriber::{ EnvFilter, fmt };
use qhospace::{
    basis::{ Basis, hermite_function },
    hilbert::{ HilbertSpace, Potential, TableParams },
    playback::Playback,
    quad::QuadParams,
    units::{ self, OscUnits },
    wavefunction::WaveFunction,
};

// evolve an equal superposition of the two lowest oscillator states, then a
// displaced ground state (coherent state), and report what an animation would
// show

fn main() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info"));
    fmt().with_env_filter(filter).with_target(false).init();

    const MASS: f64 = 171.0 * units::mu; // ¹⁷¹Yb; kg
    const TRAP_FREQ: f64 = 2.0 * PI * 30e3; // s⁻¹
    let uu = OscUnits::from_mks(MASS, TRAP_FREQ);
    info!(
        length_nm = uu.a * 1e9,
        period_us = uu.from_nat_time(2.0 * PI) * 1e6,
        "natural units"
    );

    let quad = QuadParams::default();
    let playback = Playback {
        samples: 300,
        frames: 200,
        time_factor: 2.0,
        ..Default::default()
    };

    // two-level beating
    let hs = HilbertSpace::new(
        2,
        Basis::Qho,
        Some(Box::new(|x: f64| 0.5 * x * x) as Potential),
        &TableParams::default(),
    ).unwrap();
    let psi = WaveFunction::from_coeffs(
        &hs, &[C64::from(1.0), C64::from(1.0)], &quad).unwrap();
    info!(norm = psi.norm(), "superposition");
    for frame in playback.frames(psi.evaluator()).step_by(25) {
        let (k_max, p_max)
            = frame.prob.iter().enumerate()
            .fold((0, 0.0), |(k0, p0), (k, p)| {
                if *p > p0 { (k, *p) } else { (k0, p0) }
            });
        info!(
            t = frame.t,
            peak_x = frame.x[k_max],
            peak_prob = p_max,
            window_norm = frame.norm(),
            "frame"
        );
    }

    // coherent state: the packet swings between ±x0 without spreading
    let x0 = uu.to_nat_length(100e-9); // displaced by 100 nm
    let hs = HilbertSpace::qho(20).unwrap();
    let psi = WaveFunction::from_initial(
        &hs, |x| C64::from(hermite_function(0, x - x0)), &quad).unwrap();
    let weights: Vec<f64> = psi.coeffs().iter().map(|c| c.norm_sqr()).collect();
    let mean_e: f64
        = weights.iter().zip(hs.eigenvalues().iter())
        .map(|(w, e)| w * e)
        .sum::<f64>() / weights.iter().sum::<f64>();
    info!(
        x0,
        captured = psi.captured().unwrap_or(f64::NAN),
        mean_energy_khz = uu.from_nat_energy(mean_e) / units::h / 1e3,
        "coherent state"
    );
    // two trap periods over the whole animation
    let span = uu.to_nat_time(2.0 / 30e3);
    let playback = Playback {
        time_factor: span * playback.frame_rate / playback.frames as f64,
        ..playback
    };
    let first = playback.frame(psi.evaluator(), 0);
    for frame in playback.frames(psi.evaluator()).step_by(25) {
        let mean_x: f64
            = frame.x.iter().zip(&frame.prob)
            .map(|(x, p)| x * p)
            .sum::<f64>() * (frame.x[1] - frame.x[0]);
        info!(
            t_us = uu.from_nat_time(frame.t) * 1e6,
            mean_x_nm = uu.from_nat_length(mean_x) * 1e9,
            expected_nm = uu.from_nat_length(x0 * frame.t.cos()) * 1e9,
            autocorr = first.overlap(&frame).norm(),
            window_norm = frame.norm(),
            "frame"
        );
    }
}
