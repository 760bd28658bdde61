//! Core data models for restaurants, orders, and drone moves.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize, Serializer};
use thiserror::Error;

use crate::geometry::Position;
use crate::heading::Heading;

/// An item on a restaurant's menu.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MenuItem {
    pub name: String,
    pub price_in_pence: u32,
}

/// A participating restaurant.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Restaurant {
    pub name: String,
    #[serde(flatten)]
    pub location: Position,
    pub menu: Vec<MenuItem>,
}

impl Restaurant {
    /// Price of a menu item, if this restaurant sells it.
    pub fn price_of(&self, item: &str) -> Option<u32> {
        self.menu
            .iter()
            .find(|entry| entry.name == item)
            .map(|entry| entry.price_in_pence)
    }

    pub fn sells(&self, item: &str) -> bool {
        self.price_of(item).is_some()
    }

    pub fn reference(&self) -> RestaurantRef {
        RestaurantRef {
            name: self.name.clone(),
            location: self.location,
        }
    }
}

/// The restaurant an order was matched to.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RestaurantRef {
    pub name: String,
    pub location: Position,
}

/// An order as received from the order source, before validation.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderRecord {
    pub order_no: String,
    pub order_date: NaiveDate,
    #[serde(default)]
    pub customer: String,
    pub credit_card_number: String,
    pub credit_card_expiry: String,
    pub cvv: String,
    pub price_total_in_pence: u32,
    pub order_items: Vec<String>,
}

/// Why an order was rejected during validation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum InvalidReason {
    CardNumber,
    ExpiryDate,
    Cvv,
    Total,
    PizzaNotDefined,
    PizzaCount,
    PizzaCountMultipleSuppliers,
}

/// Where an order stands.
///
/// `ValidButNotDelivered -> Delivered` is the only transition; invalid
/// outcomes are final.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum OrderOutcome {
    ValidButNotDelivered,
    Delivered,
    Invalid(InvalidReason),
}

impl OrderOutcome {
    pub fn as_str(&self) -> &'static str {
        match self {
            OrderOutcome::ValidButNotDelivered => "ValidButNotDelivered",
            OrderOutcome::Delivered => "Delivered",
            OrderOutcome::Invalid(InvalidReason::CardNumber) => "InvalidCardNumber",
            OrderOutcome::Invalid(InvalidReason::ExpiryDate) => "InvalidExpiryDate",
            OrderOutcome::Invalid(InvalidReason::Cvv) => "InvalidCvv",
            OrderOutcome::Invalid(InvalidReason::Total) => "InvalidTotal",
            OrderOutcome::Invalid(InvalidReason::PizzaNotDefined) => "InvalidPizzaNotDefined",
            OrderOutcome::Invalid(InvalidReason::PizzaCount) => "InvalidPizzaCount",
            OrderOutcome::Invalid(InvalidReason::PizzaCountMultipleSuppliers) => {
                "InvalidPizzaCountMultipleSuppliers"
            }
        }
    }

    pub fn is_valid(&self) -> bool {
        !matches!(self, OrderOutcome::Invalid(_))
    }
}

impl std::fmt::Display for OrderOutcome {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Serialize for OrderOutcome {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum OrderError {
    #[error("order {order_no} cannot move from {from} to Delivered")]
    IllegalTransition { order_no: String, from: OrderOutcome },
}

/// A validated order.
#[derive(Debug, Clone, PartialEq)]
pub struct Order {
    pub order_no: String,
    pub items: Vec<String>,
    pub price_total_in_pence: u32,
    restaurant: Option<RestaurantRef>,
    outcome: OrderOutcome,
}

impl Order {
    /// An order that passed validation and is waiting for delivery.
    pub fn valid(
        order_no: impl Into<String>,
        items: Vec<String>,
        price_total_in_pence: u32,
        restaurant: RestaurantRef,
    ) -> Self {
        Self {
            order_no: order_no.into(),
            items,
            price_total_in_pence,
            restaurant: Some(restaurant),
            outcome: OrderOutcome::ValidButNotDelivered,
        }
    }

    /// An order that failed validation.
    pub fn invalid(
        order_no: impl Into<String>,
        items: Vec<String>,
        price_total_in_pence: u32,
        reason: InvalidReason,
    ) -> Self {
        Self {
            order_no: order_no.into(),
            items,
            price_total_in_pence,
            restaurant: None,
            outcome: OrderOutcome::Invalid(reason),
        }
    }

    pub fn outcome(&self) -> OrderOutcome {
        self.outcome
    }

    /// The matched restaurant; `None` for invalid orders.
    pub fn restaurant(&self) -> Option<&RestaurantRef> {
        self.restaurant.as_ref()
    }

    pub fn is_pending(&self) -> bool {
        self.outcome == OrderOutcome::ValidButNotDelivered
    }

    pub fn mark_delivered(&mut self) -> Result<(), OrderError> {
        if !self.is_pending() {
            return Err(OrderError::IllegalTransition {
                order_no: self.order_no.clone(),
                from: self.outcome,
            });
        }
        self.outcome = OrderOutcome::Delivered;
        Ok(())
    }
}

/// One committed drone move.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DroneMove {
    pub order_no: String,
    pub from: Position,
    pub to: Position,
    /// `None` for a hover
    pub heading: Option<Heading>,
    pub tick: u64,
}

impl DroneMove {
    /// Heading angle in degrees, `None` for a hover.
    pub fn angle(&self) -> Option<f64> {
        self.heading.map(Heading::angle)
    }

    pub fn is_hover(&self) -> bool {
        self.heading.is_none()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn restaurant() -> RestaurantRef {
        RestaurantRef {
            name: "Civerinos Slice".to_string(),
            location: Position::new(-3.1912869215011597, 55.945535152517735),
        }
    }

    #[test]
    fn test_restaurant_wire_format() {
        let json = r#"{
            "name": "Civerinos Slice",
            "longitude": -3.1912869215011597,
            "latitude": 55.945535152517735,
            "menu": [
                {"name": "Margarita", "priceInPence": 1000},
                {"name": "Calzone", "priceInPence": 1400}
            ]
        }"#;
        let restaurant: Restaurant = serde_json::from_str(json).unwrap();
        assert_eq!(restaurant.location.lng, -3.1912869215011597);
        assert_eq!(restaurant.price_of("Calzone"), Some(1400));
        assert!(!restaurant.sells("Meat Lover"));
    }

    #[test]
    fn test_order_record_wire_format() {
        let json = r#"{
            "orderNo": "1AFFE082",
            "orderDate": "2023-01-01",
            "customer": "Gilberto Handshoe",
            "creditCardNumber": "2221699906418281",
            "creditCardExpiry": "04/28",
            "cvv": "922",
            "priceTotalInPence": 2400,
            "orderItems": ["Margarita", "Calzone"]
        }"#;
        let record: OrderRecord = serde_json::from_str(json).unwrap();
        assert_eq!(record.order_no, "1AFFE082");
        assert_eq!(record.order_date, NaiveDate::from_ymd_opt(2023, 1, 1).unwrap());
        assert_eq!(record.order_items.len(), 2);
    }

    #[test]
    fn test_mark_delivered_once() {
        let mut order = Order::valid("A1", vec!["Margarita".into()], 1100, restaurant());
        assert!(order.is_pending());
        order.mark_delivered().unwrap();
        assert_eq!(order.outcome(), OrderOutcome::Delivered);

        let err = order.mark_delivered().unwrap_err();
        assert_eq!(
            err,
            OrderError::IllegalTransition {
                order_no: "A1".into(),
                from: OrderOutcome::Delivered
            }
        );
    }

    #[test]
    fn test_invalid_order_cannot_be_delivered() {
        let mut order = Order::invalid("B2", vec![], 100, InvalidReason::PizzaCount);
        assert!(order.mark_delivered().is_err());
        assert_eq!(order.outcome(), OrderOutcome::Invalid(InvalidReason::PizzaCount));
        assert!(order.restaurant().is_none());
    }

    #[test]
    fn test_outcome_serializes_as_name() {
        let json = serde_json::to_string(&OrderOutcome::Invalid(InvalidReason::Cvv)).unwrap();
        assert_eq!(json, "\"InvalidCvv\"");
        assert_eq!(OrderOutcome::Delivered.to_string(), "Delivered");
    }
}
