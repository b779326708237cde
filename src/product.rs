use mongodb::bson::oid::ObjectId;
use serde::{Deserialize, Serialize};

/// A catalog product as persisted in the store.
///
/// `totalPrice` is deliberately absent: it is computed at intake as an
/// acceptance gate and never written to the store.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Product {
    #[serde(rename = "_id", skip_serializing_if = "Option::is_none")]
    pub id: Option<ObjectId>,
    pub name: String,
    pub description: String,
    #[serde(rename = "MRP")]
    pub mrp: f64,
    pub discount: f64,
    #[serde(rename = "shippingCharge")]
    pub shipping_charge: f64,
    pub images: Vec<String>,
}

/// Derived acceptance price. The discount is subtracted as a flat
/// `discount/100`, not as a proportion of MRP; the formula is kept literal
/// because changing it would change which payloads are accepted.
pub fn total_price(mrp: f64, discount: f64, shipping_charge: f64) -> f64 {
    (mrp - discount / 100.0 + shipping_charge).floor()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn boundary_values_price_out_at_1499() {
        assert_eq!(total_price(1000.0, 5.0, 500.0), 1499.0);
    }

    #[test]
    fn discount_subtracts_a_fraction_not_a_share_of_mrp() {
        // 5% of 2000 would be 100; the literal formula only takes 0.05.
        assert_eq!(total_price(2000.0, 5.0, 0.0), 1999.0);
    }

    #[test]
    fn negative_shipping_can_sink_the_total() {
        assert!(total_price(1000.0, 0.0, -1500.0) <= 0.0);
    }
}
