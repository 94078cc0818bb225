//! Bisection over a fixed bracket

use super::{RootOutcome, SolverConfig};

/// Bisection root search on `bracket = (low, high)`.
///
/// Orientation: a positive residual at the midpoint means the root lies
/// above it, so the lower bound moves up; otherwise the upper bound moves
/// down. Callers shape their residual to fit (e.g. `pv(rate) - target` for a
/// value that falls as the rate rises, `target - fv(rate)` for one that
/// rises).
///
/// The bracket is not validated. A target outside it drives the search to
/// the nearer endpoint and the result comes back as
/// [`RootOutcome::MaxIterationsReached`] holding the midpoint of the final
/// bracket.
pub fn bisect<F>(residual: F, bracket: (f64, f64), config: &SolverConfig) -> RootOutcome
where
    F: Fn(f64) -> f64,
{
    let (mut low, mut high) = bracket;

    for iteration in 0..config.max_iterations {
        let mid = (low + high) / 2.0;
        let value = residual(mid);

        if value.abs() < config.tolerance {
            return RootOutcome::Converged {
                root: mid,
                iterations: iteration + 1,
            };
        }

        if value > 0.0 {
            low = mid;
        } else {
            high = mid;
        }
    }

    let estimate = (low + high) / 2.0;
    log::debug!(
        "bisection exhausted {} iterations on [{}, {}], estimate {}",
        config.max_iterations,
        bracket.0,
        bracket.1,
        estimate
    );
    RootOutcome::MaxIterationsReached { estimate }
}
