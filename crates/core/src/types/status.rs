//! Status and classification enums shared by the storefront and admin.

use serde::{Deserialize, Serialize};

/// Order lifecycle status.
///
/// The set of states is owned by the backend; the client only maps them to
/// display labels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum OrderStatus {
    #[default]
    New,
    Confirmed,
    Assembling,
    Delivering,
    InRent,
    Returned,
    Completed,
    Cancelled,
}

impl OrderStatus {
    /// Human-readable label shown in order lists.
    #[must_use]
    pub const fn label(&self) -> &'static str {
        match self {
            Self::New => "Новый",
            Self::Confirmed => "Подтверждён",
            Self::Assembling => "Комплектуется",
            Self::Delivering => "Доставляется",
            Self::InRent => "В аренде",
            Self::Returned => "Возвращён",
            Self::Completed => "Завершён",
            Self::Cancelled => "Отменён",
        }
    }

    /// Whether the order still holds stock.
    #[must_use]
    pub const fn is_open(&self) -> bool {
        !matches!(self, Self::Completed | Self::Cancelled)
    }

    /// Wire name used in query parameters.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::New => "new",
            Self::Confirmed => "confirmed",
            Self::Assembling => "assembling",
            Self::Delivering => "delivering",
            Self::InRent => "in_rent",
            Self::Returned => "returned",
            Self::Completed => "completed",
            Self::Cancelled => "cancelled",
        }
    }
}

/// How an order reaches the customer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum DeliveryMethod {
    #[default]
    Delivery,
    SelfPickup,
}

/// Customer account type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum CustomerKind {
    #[default]
    Personal,
    Business,
}

/// Transport restriction for bulky or fragile products.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum TransportRestriction {
    #[default]
    None,
    UprightOnly,
    FragileGlass,
    OversizeTruck,
}

/// Qualification required from the installation crew.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum InstallerQualification {
    #[default]
    Any,
    Assembler,
    Electrician,
    Decorator,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_order_status_labels() {
        assert_eq!(OrderStatus::New.label(), "Новый");
        assert_eq!(OrderStatus::InRent.label(), "В аренде");
    }

    #[test]
    fn test_order_status_open() {
        assert!(OrderStatus::InRent.is_open());
        assert!(!OrderStatus::Cancelled.is_open());
    }

    #[test]
    fn test_status_wire_format() {
        let status: OrderStatus = serde_json::from_str("\"in_rent\"").expect("deserialize");
        assert_eq!(status, OrderStatus::InRent);
    }
}
