//! Newton-Raphson with a numerical derivative

use super::{RootOutcome, SolverConfig, MIN_DERIVATIVE, RATE_CLAMP};

/// Newton-Raphson root search seeded at `seed`.
///
/// The derivative is a central difference with half-width `step`. Converges
/// when `|residual| < tolerance`. Returns `None` when the derivative
/// magnitude drops below [`MIN_DERIVATIVE`]: no root can be found on this
/// branch and the caller decides whether to fall back.
///
/// Iterates are clamped to [`RATE_CLAMP`]; the residual is assumed to be a
/// function of a periodic rate.
pub fn newton_raphson<F>(residual: F, seed: f64, step: f64, config: &SolverConfig) -> Option<RootOutcome>
where
    F: Fn(f64) -> f64,
{
    let mut x = seed;

    for iteration in 0..config.max_iterations {
        let value = residual(x);

        if value.abs() < config.tolerance {
            return Some(RootOutcome::Converged {
                root: x,
                iterations: iteration,
            });
        }

        let derivative = (residual(x + step) - residual(x - step)) / (2.0 * step);

        if derivative.abs() < MIN_DERIVATIVE || !derivative.is_finite() {
            log::debug!(
                "newton-raphson stalled at x={} (derivative {}) after {} iterations",
                x,
                derivative,
                iteration
            );
            return None;
        }

        x = (x - value / derivative).clamp(RATE_CLAMP.0, RATE_CLAMP.1);
    }

    // The last step may have landed on the root
    if residual(x).abs() < config.tolerance {
        return Some(RootOutcome::Converged {
            root: x,
            iterations: config.max_iterations,
        });
    }

    log::debug!(
        "newton-raphson exhausted {} iterations, estimate {}",
        config.max_iterations,
        x
    );
    Some(RootOutcome::MaxIterationsReached { estimate: x })
}
