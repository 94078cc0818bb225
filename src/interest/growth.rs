//! Capital growth under different capitalization systems
//!
//! Produces the value of a capital at each whole period `t = 0..=periods`
//! so that several systems can be compared side by side.

use serde::{Deserialize, Serialize};

/// Capitalization system used to grow a capital
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "system", rename_all = "snake_case")]
pub enum GrowthSystem {
    /// M = C(1 + r·t)
    Simple,
    /// M = C(1 + r)^t
    Compound,
    /// M = C·e^(r·t)
    Continuous,
    /// M = C(1 + r/m)^(m·t)
    Periodic { frequency: u32 },
    /// M = C(1 + r)^(t+1), interest charged at the start of each period
    Anticipated,
    /// Capital idles until `start`, then compounds: M = C(1 + r)^(t - start)
    Deferred { start: u32 },
}

impl GrowthSystem {
    /// Value of `capital` after `t` periods
    pub fn value_at(&self, capital: f64, rate: f64, t: u32) -> f64 {
        let tf = t as f64;
        match *self {
            GrowthSystem::Simple => capital * (1.0 + rate * tf),
            GrowthSystem::Compound => capital * (1.0 + rate).powf(tf),
            GrowthSystem::Continuous => capital * (rate * tf).exp(),
            GrowthSystem::Periodic { frequency } => {
                let m = frequency.max(1) as f64;
                capital * (1.0 + rate / m).powf(m * tf)
            }
            GrowthSystem::Anticipated => capital * (1.0 + rate).powf(tf + 1.0),
            GrowthSystem::Deferred { start } => {
                if t < start {
                    capital
                } else {
                    capital * (1.0 + rate).powf((t - start) as f64)
                }
            }
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            GrowthSystem::Simple => "simple",
            GrowthSystem::Compound => "compound",
            GrowthSystem::Continuous => "continuous",
            GrowthSystem::Periodic { .. } => "periodic",
            GrowthSystem::Anticipated => "anticipated",
            GrowthSystem::Deferred { .. } => "deferred",
        }
    }
}

/// One system's growth path
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GrowthPath {
    pub system: GrowthSystem,
    /// Value at t = 0..=periods
    pub values: Vec<f64>,
    pub final_amount: f64,
}

/// Grow `capital` over `periods` under each of `systems`
pub fn compare_growth(capital: f64, rate: f64, periods: u32, systems: &[GrowthSystem]) -> Vec<GrowthPath> {
    systems
        .iter()
        .map(|&system| {
            let values: Vec<f64> = (0..=periods)
                .map(|t| system.value_at(capital, rate, t))
                .collect();
            let final_amount = values.last().copied().unwrap_or(capital);
            GrowthPath {
                system,
                values,
                final_amount,
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    const ALL: [GrowthSystem; 6] = [
        GrowthSystem::Simple,
        GrowthSystem::Compound,
        GrowthSystem::Continuous,
        GrowthSystem::Periodic { frequency: 4 },
        GrowthSystem::Anticipated,
        GrowthSystem::Deferred { start: 3 },
    ];

    #[test]
    fn test_path_lengths() {
        let paths = compare_growth(1000.0, 0.1, 5, &ALL);
        assert_eq!(paths.len(), 6);
        for path in &paths {
            assert_eq!(path.values.len(), 6);
            assert_eq!(path.final_amount, *path.values.last().unwrap());
        }
    }

    #[test]
    fn test_ordering_of_final_amounts() {
        let paths = compare_growth(1000.0, 0.1, 5, &ALL);
        let simple = paths[0].final_amount;
        let compound = paths[1].final_amount;
        let continuous = paths[2].final_amount;
        let periodic = paths[3].final_amount;

        assert_relative_eq!(simple, 1500.0, epsilon = 1e-9);
        assert!(compound > simple);
        assert!(periodic > compound);
        assert!(continuous > periodic);
        assert_relative_eq!(paths[4].final_amount, compound * 1.1, epsilon = 1e-9);
    }

    #[test]
    fn test_deferred_holds_until_start() {
        let system = GrowthSystem::Deferred { start: 3 };
        assert_eq!(system.value_at(1000.0, 0.1, 0), 1000.0);
        assert_eq!(system.value_at(1000.0, 0.1, 2), 1000.0);
        assert_eq!(system.value_at(1000.0, 0.1, 3), 1000.0);
        assert_relative_eq!(system.value_at(1000.0, 0.1, 5), 1210.0, epsilon = 1e-9);
    }
}
