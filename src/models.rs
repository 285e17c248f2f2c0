//! Domain enums shared by entities, services, and handlers.
//!
//! All variants persist as their kebab-case string form; parsing back is
//! strict so an unknown status in a request surfaces as an error instead of
//! silently writing garbage into the lifecycle columns.

use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};

/// How an order leaves the store.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Display, EnumString)]
#[strum(serialize_all = "kebab-case")]
#[serde(rename_all = "kebab-case")]
pub enum DeliveryType {
    DineIn,
    Takeaway,
    Delivery,
}

/// Whether the order is tied to a registered customer record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Display, EnumString)]
#[strum(serialize_all = "kebab-case")]
#[serde(rename_all = "kebab-case")]
pub enum CustomerType {
    WalkIn,
    Registered,
}

/// Kitchen-facing order lifecycle. Admission always produces `Pending`;
/// every later transition happens outside the admission transaction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Display, EnumString)]
#[strum(serialize_all = "kebab-case")]
#[serde(rename_all = "kebab-case")]
pub enum OrderStatus {
    Pending,
    Preparing,
    Ready,
    Completed,
    Cancelled,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Display, EnumString)]
#[strum(serialize_all = "kebab-case")]
#[serde(rename_all = "kebab-case")]
pub enum PaymentStatus {
    Pending,
    Paid,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Display, EnumString)]
#[strum(serialize_all = "kebab-case")]
#[serde(rename_all = "kebab-case")]
pub enum OrderItemStatus {
    Pending,
    Preparing,
    Ready,
    Delivered,
    Cancelled,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Display, EnumString)]
#[strum(serialize_all = "kebab-case")]
#[serde(rename_all = "kebab-case")]
pub enum ReservationStatus {
    Booked,
    Seated,
    Cancelled,
    NoShow,
}

/// How a tax rate is applied to a menu item price.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Display, EnumString)]
#[strum(serialize_all = "kebab-case")]
#[serde(rename_all = "kebab-case")]
pub enum TaxMode {
    Percent,
    Fixed,
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    #[test]
    fn statuses_round_trip_through_strings() {
        assert_eq!(OrderStatus::Pending.to_string(), "pending");
        assert_eq!(
            OrderStatus::from_str("completed").unwrap(),
            OrderStatus::Completed
        );
        assert_eq!(DeliveryType::DineIn.to_string(), "dine-in");
        assert_eq!(
            DeliveryType::from_str("dine-in").unwrap(),
            DeliveryType::DineIn
        );
        assert_eq!(CustomerType::WalkIn.to_string(), "walk-in");
        assert_eq!(ReservationStatus::NoShow.to_string(), "no-show");
    }

    #[test]
    fn unknown_status_is_rejected() {
        assert!(OrderItemStatus::from_str("fried").is_err());
        assert!(PaymentStatus::from_str("maybe").is_err());
    }
}
