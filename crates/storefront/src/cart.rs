//! Local cart state.
//!
//! The cart is owned by the component that renders it and never shared or
//! persisted; checkout submits it to the backend as an order draft.

use arenda_core::{Price, ProductId, RentalRate, rental_days};
use chrono::NaiveDate;
use thiserror::Error;

use crate::api::types::CatalogProduct;

/// Cart manipulation errors, resolved locally before any network call.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum CartError {
    /// Line quantities are positive integers.
    #[error("quantity must be at least 1")]
    InvalidQuantity,

    /// The referenced line is not in the cart.
    #[error("product {0} is not in the cart")]
    NoSuchLine(ProductId),
}

/// One product line in the cart.
#[derive(Debug, Clone)]
pub struct CartLine {
    pub product_id: ProductId,
    pub name: String,
    pub rental: RentalRate,
    pub quantity: u32,
}

impl CartLine {
    /// Line subtotal for a rental of `days` days.
    #[must_use]
    pub fn subtotal(&self, days: u32) -> Price {
        self.rental.total_for_days(days).times(self.quantity)
    }
}

/// The rental period selected at checkout.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RentalPeriod {
    pub from: NaiveDate,
    pub to: NaiveDate,
}

/// A customer's cart.
#[derive(Debug, Clone, Default)]
pub struct Cart {
    lines: Vec<CartLine>,
    period: Option<RentalPeriod>,
}

impl Cart {
    /// Create an empty cart.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Lines in insertion order.
    #[must_use]
    pub fn lines(&self) -> &[CartLine] {
        &self.lines
    }

    /// Whether the cart has no lines.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Set the rental period used for totals.
    pub fn set_period(&mut self, from: NaiveDate, to: NaiveDate) {
        self.period = Some(RentalPeriod { from, to });
    }

    /// Number of billed rental days (1 until a period is chosen).
    #[must_use]
    pub fn days(&self) -> u32 {
        self.period
            .map_or(1, |period| rental_days(period.from, period.to))
    }

    /// Add a product to the cart, merging into an existing line.
    pub fn add(&mut self, product: &CatalogProduct, quantity: u32) -> Result<(), CartError> {
        if quantity == 0 {
            return Err(CartError::InvalidQuantity);
        }
        if let Some(line) = self
            .lines
            .iter_mut()
            .find(|line| line.product_id == product.id)
        {
            line.quantity += quantity;
            return Ok(());
        }
        self.lines.push(CartLine {
            product_id: product.id,
            name: product.name.clone(),
            rental: product.rental.clone(),
            quantity,
        });
        Ok(())
    }

    /// Replace the quantity of an existing line.
    pub fn set_quantity(&mut self, product_id: ProductId, quantity: u32) -> Result<(), CartError> {
        if quantity == 0 {
            return Err(CartError::InvalidQuantity);
        }
        self.lines
            .iter_mut()
            .find(|line| line.product_id == product_id)
            .map(|line| line.quantity = quantity)
            .ok_or(CartError::NoSuchLine(product_id))
    }

    /// Remove a line outright.
    pub fn remove(&mut self, product_id: ProductId) {
        self.lines.retain(|line| line.product_id != product_id);
    }

    /// Cart total over the selected rental period.
    #[must_use]
    pub fn total(&self) -> Price {
        let days = self.days();
        self.lines
            .iter()
            .fold(Price::ZERO, |acc, line| acc + line.subtotal(days))
    }
}

#[cfg(test)]
mod tests {
    use arenda_core::{CategoryId, RentalTier};

    use super::*;

    fn product(id: i32, rub_per_day: u32) -> CatalogProduct {
        CatalogProduct {
            id: ProductId::new(id),
            name: format!("product-{id}"),
            category_id: CategoryId::new(1),
            price_rub: Price::from_rub(rub_per_day),
            rental: RentalRate::Flat {
                base_days: 1,
                price_per_day: Price::from_rub(rub_per_day),
            },
            images: vec![],
            show_on_site: true,
            show_in_new_arrivals: false,
            complementary: vec![],
            similar: vec![],
        }
    }

    #[test]
    fn test_add_merges_existing_line() {
        let mut cart = Cart::new();
        cart.add(&product(1, 100), 2).expect("add");
        cart.add(&product(1, 100), 3).expect("add");
        assert_eq!(cart.lines().len(), 1);
        assert_eq!(cart.lines()[0].quantity, 5);
    }

    #[test]
    fn test_zero_quantity_rejected() {
        let mut cart = Cart::new();
        assert_eq!(cart.add(&product(1, 100), 0), Err(CartError::InvalidQuantity));
        cart.add(&product(1, 100), 1).expect("add");
        assert_eq!(
            cart.set_quantity(ProductId::new(1), 0),
            Err(CartError::InvalidQuantity)
        );
    }

    #[test]
    fn test_total_over_rental_period() {
        let mut cart = Cart::new();
        cart.add(&product(1, 100), 2).expect("add");
        cart.set_period(
            NaiveDate::from_ymd_opt(2026, 8, 1).expect("date"),
            NaiveDate::from_ymd_opt(2026, 8, 3).expect("date"),
        );
        // 2 chairs x 100 ₽ x 3 days.
        assert_eq!(cart.total(), Price::from_rub(600));
    }

    #[test]
    fn test_tiered_line_uses_tier_rate() {
        let mut tiered = product(1, 100);
        tiered.rental = RentalRate::Tiered {
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
        };
        let mut cart = Cart::new();
        cart.add(&tiered, 1).expect("add");
        cart.set_period(
            NaiveDate::from_ymd_opt(2026, 8, 1).expect("date"),
            NaiveDate::from_ymd_opt(2026, 8, 7).expect("date"),
        );
        // 7 days falls into the 80 ₽ tier.
        assert_eq!(cart.total(), Price::from_rub(560));
    }

    #[test]
    fn test_remove_line() {
        let mut cart = Cart::new();
        cart.add(&product(1, 100), 1).expect("add");
        cart.remove(ProductId::new(1));
        assert!(cart.is_empty());
    }
}
