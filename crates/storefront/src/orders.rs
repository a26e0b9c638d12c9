//! Customer order history.

use arenda_client::Keyed;
use arenda_core::{DeliveryMethod, OrderId, OrderStatus, Price, ProductId, rental_days};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// One product line within an order.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OrderLine {
    pub product_id: ProductId,
    pub product_name: String,
    pub quantity: u32,
    /// Per-day price fixed at order time.
    pub unit_price_rub: Price,
}

impl OrderLine {
    /// Line subtotal per rental day.
    #[must_use]
    pub fn subtotal(&self) -> Price {
        self.unit_price_rub.times(self.quantity)
    }
}

/// An order as shown in the customer's history.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OrderSummary {
    pub id: OrderId,
    pub status: OrderStatus,
    pub created_at: NaiveDate,
    pub rental_from: NaiveDate,
    pub rental_to: NaiveDate,
    pub delivery: DeliveryMethod,
    #[serde(default)]
    pub address: Option<String>,
    pub lines: Vec<OrderLine>,
}

impl OrderSummary {
    /// Display label for the order status.
    #[must_use]
    pub const fn status_label(&self) -> &'static str {
        self.status.label()
    }

    /// Number of billed rental days.
    #[must_use]
    pub fn days(&self) -> u32 {
        rental_days(self.rental_from, self.rental_to)
    }

    /// Order total over the full rental period.
    #[must_use]
    pub fn total(&self) -> Price {
        self.lines
            .iter()
            .fold(Price::ZERO, |acc, line| acc + line.subtotal())
            .times(self.days())
    }
}

impl Keyed for OrderSummary {
    fn item_key(&self) -> String {
        self.id.to_string()
    }
}

/// Filter parameters for the order-history list.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct OrderListParams {
    pub status: Option<OrderStatus>,
}

impl OrderListParams {
    #[must_use]
    pub fn to_query(&self) -> Vec<(String, String)> {
        self.status
            .map(|status| vec![("status".to_string(), status.as_str().to_string())])
            .unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn order() -> OrderSummary {
        OrderSummary {
            id: OrderId::new(1),
            status: OrderStatus::InRent,
            created_at: NaiveDate::from_ymd_opt(2026, 8, 1).expect("date"),
            rental_from: NaiveDate::from_ymd_opt(2026, 8, 10).expect("date"),
            rental_to: NaiveDate::from_ymd_opt(2026, 8, 12).expect("date"),
            delivery: DeliveryMethod::Delivery,
            address: Some("Тверская 1".to_string()),
            lines: vec![
                OrderLine {
                    product_id: ProductId::new(1),
                    product_name: "Стул".to_string(),
                    quantity: 4,
                    unit_price_rub: Price::from_rub(100),
                },
                OrderLine {
                    product_id: ProductId::new(2),
                    product_name: "Стол".to_string(),
                    quantity: 1,
                    unit_price_rub: Price::from_rub(500),
                },
            ],
        }
    }

    #[test]
    fn test_line_subtotal() {
        let order = order();
        assert_eq!(order.lines[0].subtotal(), Price::from_rub(400));
    }

    #[test]
    fn test_order_total_over_period() {
        // 3 rental days, 900 ₽ per day.
        assert_eq!(order().total(), Price::from_rub(2700));
    }

    #[test]
    fn test_status_label() {
        assert_eq!(order().status_label(), "В аренде");
    }
}
