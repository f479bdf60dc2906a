//! Theoretical background.
//!
//! # Contents
//! - [Background](#background)
//! - [Oscillator eigenfunctions](#oscillator-eigenfunctions)
//! - [Projection and normalization](#projection-and-normalization)
//! - [Accuracy](#accuracy)
//! - [Units](#units)
//!
//! # Background
//! The time-dependent Schrödinger equation for a particle in a static
//! potential *V*(*x*),
//! ```text
//!   ∂
//! i -- ψ(x, t) = H ψ(x, t)
//!   ∂t
//!
//!       1 ∂²
//! H = - - --- + V(x)
//!       2 ∂x²
//! ```
//! (in [natural units](#units)) is linear with a time-independent
//! Hamiltonian, so it is solved exactly by expanding the state in eigenpairs
//! (*E*[*n*], *φ*[*n*]) of *H*:
//! ```text
//! ψ(x, 0) = Σ c[n] φ[n](x)
//!            n
//!
//! ψ(x, t) = Σ c[n] φ[n](x) exp(-i E[n] t)
//!            n
//! ```
//! Each mode only accumulates a phase. Nothing is stepped forward in time, so
//! there is no time-step error and no drift of the norm: the cost of
//! evaluating *ψ* at any (*x*, *t*) is a single sum over modes, and the only
//! approximations are made once, when the expansion is built.
//!
//! In practice the sum is truncated to the first `dim` modes. A truncated
//! expansion is still an exact solution of the Schrödinger equation; it is
//! just the solution for a slightly different initial state, namely the
//! orthogonal projection of the intended one onto the retained modes.
//!
//! Observable consequences follow directly from the phases. A single mode is
//! stationary: |*ψ*|² does not change. A superposition of two modes *m*, *n*
//! beats at the frequency *E*[*n*] - *E*[*m*], and because the oscillator's
//! spectrum is evenly spaced, any state of the oscillator returns to its
//! initial density after *t* = 2π.
//!
//! # Oscillator eigenfunctions
//! For *V*(*x*) = *x*²/2 the eigenpairs are known in closed form,
//! ```text
//! E[n] = n + 1/2
//!
//!               1
//! φ[n](x) = ----------- exp(-x²/2) H[n](x)
//!           √(2ⁿ n! √π)
//! ```
//! with *H*[*n*] the physicists' Hermite polynomials. Computing 2ⁿ *n*! and
//! *H*[*n*] separately overflows for moderate *n*, so
//! [`hermite_function`][crate::basis::hermite_function] builds the normalized
//! functions directly with their own three-term recurrence,
//! ```text
//! φ[0](x) = π^(-1/4) exp(-x²/2)
//! φ[1](x) = √2 x φ[0](x)
//! φ[n](x) = √(2/n) x φ[n-1](x) - √((n-1)/n) φ[n-2](x)
//! ```
//! Each eigenfunction has parity (-1)ⁿ and is exponentially small outside its
//! classical turning points ±√(2*n* + 1).
//!
//! # Projection and normalization
//! Because the eigenfunctions are orthonormal, the coefficients of an initial
//! waveform *ψ*₀ are overlaps
//! ```text
//! c[n] = ∫ φ[n]*(x) ψ₀(x) dx
//! ```
//! taken over the domain of the basis tables, outside of which the
//! eigenfunctions are treated as zero. These are computed with adaptive
//! [quadrature][crate::quad]: each interval is integrated
//! with 10- and 21-point Gauss-Legendre rules, the difference between the two
//! serves as an error estimate, and the interval with the largest error is
//! bisected until the total error falls below tolerance. Integrals of the
//! initial waveform alone run over the whole real line, handled by the
//! substitution
//! ```text
//!       s               1 + s²
//! x = ------,   dx = ---------- ds,   s ∊ (-1, 1)
//!     1 - s²         (1 - s²)²
//! ```
//! The fraction Σ |*c*[*n*]|² / ∫ |*ψ*₀|² measures how much of the initial
//! state survives truncation; when *ψ*₀ is square-integrable it is reported by
//! [`WaveFunction::captured`][crate::wavefunction::WaveFunction::captured].
//!
//! Whether built from coefficients or by projection, the state is then scaled
//! by a single constant *N* = (∫ |Σ *c*[*n*] *φ*[*n*](*x*)|² d*x*)^(1/2),
//! computed once by the same quadrature. Since every mode only acquires a
//! phase, the state stays normalized at all later times.
//!
//! # Accuracy
//! The eigenfunctions are evaluated through tables sampled on a uniform grid
//! (see [`TableParams`][crate::hilbert::TableParams]), trading accuracy for
//! speed when many frames must be rendered. With nearest-neighbor lookups the
//! pointwise error is about *δx*/2 · |*φ*'|, and the table functions are
//! piecewise constant, so projections see small discontinuities that the
//! adaptive quadrature must resolve by subdivision. Linear interpolation
//! reduces the pointwise error to about *δx*²/8 · |*φ*''| at a slightly higher
//! lookup cost.
//!
//! The table domain should also cover the support of the highest retained
//! mode, roughly ±(√(2*n* + 1) + 6). Pointwise lookups outside it return the
//! boundary samples, and integrals simply stop at its edges, so a mode cut
//! off by the domain loses the part of its norm beyond them. The defaults
//! (2000 samples over \[-15, 15\]) are comfortable for `dim` up to about 50.
//!
//! # Units
//! Everything in this crate works in the oscillator's natural units, in which
//! *ħ* = *m* = *ω* = 1. Starting from
//! ```text
//!    ħ² ∂²                 1
//! - --- --- ψ(x, t) + ---- m ω² x² ψ(x, t) = i ħ ∂ψ/∂t
//!   2 m ∂x²                2
//! ```
//! and changing variables to
//! ```text
//! x' = x / a,   a = √(ħ / m ω)
//! t' = t / τ,   τ = 1 / ω
//! ```
//! then dividing through by the energy scale *ε* = *ħ* *ω* gives the
//! dimensionless equation
//! ```text
//!     1   ∂²            1                     ∂
//! - ----- --- ψ(x', t') + - x'² ψ(x', t') = i --- ψ(x', t')
//!     2  ∂x'²           2                    ∂t'
//! ```
//! In these units *a* is the width of the ground state, level spacings are
//! 1, and one classical oscillation period is 2π.
//!
//! Items in [`units`][crate::units] are provided to handle the minutiae
//! associated with conversion to and from naturalized units.
