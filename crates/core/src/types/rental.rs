//! Rental pricing schedules and day calculations.
//!
//! A product is priced either with a flat per-day rate over a base period or
//! with a tiered schedule of up to [`MAX_TIERS`] day ranges, where longer
//! rentals get a cheaper per-day rate. Tier ordering rules are enforced by
//! the admin form validation; the functions here assume a well-formed
//! schedule and only do the lookup arithmetic.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::price::Price;

/// Maximum number of tiers in a tiered schedule.
pub const MAX_TIERS: usize = 3;

/// One day-range/price pair in a tiered schedule.
///
/// The tier covers rentals up to and including `end_day` days.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RentalTier {
    /// Last rental day covered by this tier.
    pub end_day: u32,
    /// Per-day price within this tier.
    pub price: Price,
}

/// Rental price schedule for a product.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "mode", rename_all = "snake_case")]
pub enum RentalRate {
    /// One per-day rate; `base_days` is the minimum billed period.
    Flat {
        base_days: u32,
        price_per_day: Price,
    },
    /// Up to three ordered tiers; rentals longer than the last tier keep the
    /// last tier's rate.
    Tiered { tiers: Vec<RentalTier> },
}

impl RentalRate {
    /// Per-day rate for a rental of `days` days.
    #[must_use]
    pub fn daily_rate(&self, days: u32) -> Price {
        match self {
            Self::Flat { price_per_day, .. } => *price_per_day,
            Self::Tiered { tiers } => tiers
                .iter()
                .find(|tier| days <= tier.end_day)
                .or_else(|| tiers.last())
                .map_or(Price::ZERO, |tier| tier.price),
        }
    }

    /// Total price for a rental of `days` days.
    ///
    /// Flat schedules bill at least the base period.
    #[must_use]
    pub fn total_for_days(&self, days: u32) -> Price {
        let billed_days = match self {
            Self::Flat { base_days, .. } => days.max(*base_days),
            Self::Tiered { .. } => days,
        };
        self.daily_rate(days).times(billed_days)
    }
}

/// Number of billable rental days between pickup and return.
///
/// Both endpoint days are billed, so same-day rentals count as one day.
/// A return date before the pickup date also counts as one day; the form
/// layer rejects such ranges before they reach pricing.
#[must_use]
pub fn rental_days(from: NaiveDate, to: NaiveDate) -> u32 {
    let days = (to - from).num_days() + 1;
    u32::try_from(days).unwrap_or(1).max(1)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tiered() -> RentalRate {
        RentalRate::Tiered {
            tiers: vec![
                RentalTier {
                    end_day: 5,
                    price: Price::from_rub(100),
                },
                RentalTier {
                    end_day: 10,
                    price: Price::from_rub(80),
                },
            ],
        }
    }

    #[test]
    fn test_tiered_rate_lookup() {
        let rate = tiered();
        assert_eq!(rate.daily_rate(1), Price::from_rub(100));
        assert_eq!(rate.daily_rate(5), Price::from_rub(100));
        assert_eq!(rate.daily_rate(6), Price::from_rub(80));
    }

    #[test]
    fn test_tiered_rate_past_last_tier() {
        // Rentals longer than the last tier keep the last rate.
        assert_eq!(tiered().daily_rate(30), Price::from_rub(80));
    }

    #[test]
    fn test_tiered_total() {
        assert_eq!(tiered().total_for_days(7), Price::from_rub(560));
    }

    #[test]
    fn test_flat_bills_base_period() {
        let rate = RentalRate::Flat {
            base_days: 3,
            price_per_day: Price::from_rub(200),
        };
        assert_eq!(rate.total_for_days(1), Price::from_rub(600));
        assert_eq!(rate.total_for_days(5), Price::from_rub(1000));
    }

    #[test]
    fn test_rental_days_inclusive() {
        let from = NaiveDate::from_ymd_opt(2026, 8, 1).expect("date");
        let to = NaiveDate::from_ymd_opt(2026, 8, 3).expect("date");
        assert_eq!(rental_days(from, to), 3);
        assert_eq!(rental_days(from, from), 1);
    }

    #[test]
    fn test_rental_days_inverted_range_clamps() {
        let from = NaiveDate::from_ymd_opt(2026, 8, 10).expect("date");
        let to = NaiveDate::from_ymd_opt(2026, 8, 1).expect("date");
        assert_eq!(rental_days(from, to), 1);
    }
}
