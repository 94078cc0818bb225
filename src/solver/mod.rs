//! Shared root finding for the rate solvers
//!
//! Annuity rate solving (bisection), cash-flow IRR (Newton-Raphson with a
//! bisection fallback) and gradient-series IRR (Newton-Raphson only) all go
//! through the two routines here. Both report a [`RootOutcome`] so callers
//! can tell a converged root from a best-effort estimate.

mod bisection;
mod newton;

pub use bisection::bisect;
pub use newton::newton_raphson;

use serde::{Deserialize, Serialize};

/// Default absolute tolerance on the residual
pub const DEFAULT_TOLERANCE: f64 = 1e-4;

/// Default iteration budget
pub const DEFAULT_MAX_ITERATIONS: u32 = 100;

/// Below this derivative magnitude Newton-Raphson gives up
pub const MIN_DERIVATIVE: f64 = 1e-10;

/// Iterates are kept inside this range so `(1 + rate)^t` stays defined
pub const RATE_CLAMP: (f64, f64) = (-0.99, 10.0);

/// Tolerance and iteration budget for a root search
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SolverConfig {
    /// Absolute tolerance on the residual
    pub tolerance: f64,
    /// Maximum number of iterations
    pub max_iterations: u32,
}

impl Default for SolverConfig {
    fn default() -> Self {
        Self {
            tolerance: DEFAULT_TOLERANCE,
            max_iterations: DEFAULT_MAX_ITERATIONS,
        }
    }
}

impl SolverConfig {
    /// Set the tolerance
    #[must_use]
    pub fn with_tolerance(mut self, tolerance: f64) -> Self {
        self.tolerance = tolerance;
        self
    }

    /// Set the iteration budget
    #[must_use]
    pub fn with_max_iterations(mut self, max_iterations: u32) -> Self {
        self.max_iterations = max_iterations;
        self
    }
}

/// Result of a bounded root search
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum RootOutcome {
    /// Residual fell below tolerance
    Converged { root: f64, iterations: u32 },
    /// Budget exhausted; best available estimate
    MaxIterationsReached { estimate: f64 },
}

impl RootOutcome {
    /// The root or the best estimate, whichever this is
    pub fn value(&self) -> f64 {
        match *self {
            RootOutcome::Converged { root, .. } => root,
            RootOutcome::MaxIterationsReached { estimate } => estimate,
        }
    }

    pub fn is_converged(&self) -> bool {
        matches!(self, RootOutcome::Converged { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_solver_config_builder() {
        let config = SolverConfig::default()
            .with_tolerance(1e-8)
            .with_max_iterations(50);

        assert!((config.tolerance - 1e-8).abs() < f64::EPSILON);
        assert_eq!(config.max_iterations, 50);
    }

    #[test]
    fn test_default_config_matches_constants() {
        let config = SolverConfig::default();
        assert_eq!(config.tolerance, 1e-4);
        assert_eq!(config.max_iterations, 100);
    }

    #[test]
    fn test_outcome_accessors() {
        let converged = RootOutcome::Converged { root: 0.05, iterations: 4 };
        let approx = RootOutcome::MaxIterationsReached { estimate: 0.07 };

        assert!(converged.is_converged());
        assert!(!approx.is_converged());
        assert_eq!(converged.value(), 0.05);
        assert_eq!(approx.value(), 0.07);
    }

    #[test]
    fn test_outcome_serializes_tagged() {
        let json = serde_json::to_string(&RootOutcome::MaxIterationsReached { estimate: 0.5 }).unwrap();
        assert_eq!(json, r#"{"status":"max_iterations_reached","estimate":0.5}"#);
    }
}
