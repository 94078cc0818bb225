//! Year/month/day time spans used as interest-period inputs and outputs

use serde::{Deserialize, Serialize};
use std::fmt;

/// A duration expressed in calendar-style parts
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct TimeSpan {
    pub years: u32,
    pub months: u32,
    pub days: u32,
}

impl TimeSpan {
    pub fn new(years: u32, months: u32, days: u32) -> Self {
        Self { years, months, days }
    }

    /// Fractional years, 365-day year
    pub fn to_years(&self) -> f64 {
        self.years as f64 + self.months as f64 / 12.0 + self.days as f64 / 365.0
    }

    /// Fractional months, 30-day month
    pub fn to_months(&self) -> f64 {
        self.years as f64 * 12.0 + self.months as f64 + self.days as f64 / 30.0
    }

    /// Split a fractional year count into whole years, whole months and days
    /// (30-day months, days rounded). Negative or non-finite input yields an
    /// empty span.
    pub fn from_years(years: f64) -> Self {
        if !years.is_finite() || years <= 0.0 {
            return Self::default();
        }
        let whole_years = years.floor();
        let months = (years - whole_years) * 12.0;
        let whole_months = months.floor();
        let days = ((months - whole_months) * 30.0).round();

        Self::carried(whole_years as u32, whole_months as u32, days as u32)
    }

    /// Split a fractional month count into years, months and days
    pub fn from_months(months: f64) -> Self {
        if !months.is_finite() || months <= 0.0 {
            return Self::default();
        }
        let years = (months / 12.0).floor();
        let whole_months = (months % 12.0).floor();
        let days = ((months % 1.0) * 30.0).round();

        Self::carried(years as u32, whole_months as u32, days as u32)
    }

    /// Roll days rounded up to a full month into months, and 12 months into a year
    fn carried(years: u32, mut months: u32, mut days: u32) -> Self {
        if days >= 30 {
            months += days / 30;
            days %= 30;
        }
        let years = years.saturating_add(months / 12);
        Self::new(years, months % 12, days)
    }

    pub fn is_empty(&self) -> bool {
        self.years == 0 && self.months == 0 && self.days == 0
    }
}

impl fmt::Display for TimeSpan {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut parts = Vec::with_capacity(3);
        for (count, unit) in [(self.years, "year"), (self.months, "month"), (self.days, "day")] {
            match count {
                0 => {}
                1 => parts.push(format!("1 {unit}")),
                n => parts.push(format!("{n} {unit}s")),
            }
        }
        write!(f, "{}", parts.join(", "))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_conversions() {
        let span = TimeSpan::new(2, 6, 0);
        assert!((span.to_years() - 2.5).abs() < 1e-12);
        assert!((span.to_months() - 30.0).abs() < 1e-12);

        let span = TimeSpan::new(0, 0, 15);
        assert!((span.to_months() - 0.5).abs() < 1e-12);
    }

    #[test]
    fn test_from_years() {
        assert_eq!(TimeSpan::from_years(2.5), TimeSpan::new(2, 6, 0));
        // 1.3 years = 1 year, 3.6 months -> 3 months, 18 days
        assert_eq!(TimeSpan::from_years(1.3), TimeSpan::new(1, 3, 18));
        assert!(TimeSpan::from_years(-1.0).is_empty());
        assert!(TimeSpan::from_years(f64::NAN).is_empty());
    }

    #[test]
    fn test_from_months() {
        assert_eq!(TimeSpan::from_months(30.5), TimeSpan::new(2, 6, 15));
    }

    #[test]
    fn test_rounded_days_carry_into_months() {
        assert_eq!(TimeSpan::from_years(0.999), TimeSpan::new(1, 0, 0));
        assert_eq!(TimeSpan::from_months(11.999), TimeSpan::new(1, 0, 0));
        // 4.99 months -> 4 months, 29.7 days
        assert_eq!(TimeSpan::from_months(4.99), TimeSpan::new(0, 5, 0));
        assert_eq!(TimeSpan::from_years(1.999), TimeSpan::new(2, 0, 0));
    }

    #[test]
    fn test_display() {
        assert_eq!(TimeSpan::new(2, 1, 3).to_string(), "2 years, 1 month, 3 days");
        assert_eq!(TimeSpan::new(0, 5, 0).to_string(), "5 months");
        assert_eq!(TimeSpan::default().to_string(), "");
    }
}
