//! Intake validation for product payloads.
//!
//! Both creation and update run the same pipeline: collect the multipart
//! fields (storing image parts as they stream), then check required fields,
//! business ranges, and the derived total before anything touches the store.

use axum::extract::Multipart;

use crate::{
    error::AppError,
    product::{Product, total_price},
    uploads::UploadStore,
};

/// Raw request fields as they arrived, before any validation. Scalars stay
/// as text until `validate` parses them; image parts are already written to
/// disk and held here as stored-path references.
#[derive(Debug, Default)]
pub struct ProductIntake {
    pub name: Option<String>,
    pub description: Option<String>,
    pub mrp: Option<String>,
    pub discount: Option<String>,
    pub shipping_charge: Option<String>,
    pub images: Vec<String>,
}

pub async fn read_intake(
    uploads: &UploadStore,
    multipart: &mut Multipart,
) -> Result<ProductIntake, AppError> {
    let mut intake = ProductIntake::default();

    while let Some(field) = multipart.next_field().await? {
        let field_name = field.name().unwrap_or_default().to_string();

        match field_name.as_str() {
            "name" => intake.name = Some(field.text().await?),
            "description" => intake.description = Some(field.text().await?),
            "MRP" => intake.mrp = Some(field.text().await?),
            "discount" => intake.discount = Some(field.text().await?),
            "shippingCharge" => intake.shipping_charge = Some(field.text().await?),
            "images" => {
                let original_name = field.file_name().unwrap_or("upload").to_string();
                let bytes = field.bytes().await?;
                let reference = uploads.store_file(&original_name, &bytes).await?;
                intake.images.push(reference);
            }
            _ => {}
        }
    }

    Ok(intake)
}

impl ProductIntake {
    /// Accept/reject decision. Each range check reports independently; the
    /// derived total is computed last and used only as a gate.
    pub fn validate(self) -> Result<Product, AppError> {
        let (Some(name), Some(description), Some(mrp), Some(discount), Some(shipping_charge)) = (
            self.name.filter(|v| !v.is_empty()),
            self.description.filter(|v| !v.is_empty()),
            self.mrp.filter(|v| !v.is_empty()),
            self.discount.filter(|v| !v.is_empty()),
            self.shipping_charge.filter(|v| !v.is_empty()),
        ) else {
            return Err(AppError::MissingFields);
        };

        if self.images.is_empty() {
            return Err(AppError::MissingFields);
        }

        let mrp = parse_number(&mrp)?;
        let discount = parse_number(&discount)?;
        let shipping_charge = parse_number(&shipping_charge)?;

        if mrp < 1000.0 {
            return Err(AppError::MrpTooLow);
        }
        if discount > 5.0 {
            return Err(AppError::DiscountTooHigh);
        }
        if shipping_charge > 500.0 {
            return Err(AppError::ShippingChargeTooHigh);
        }

        if total_price(mrp, discount, shipping_charge) <= 0.0 {
            return Err(AppError::InvalidTotalPrice);
        }

        Ok(Product {
            id: None,
            name,
            description,
            mrp,
            discount,
            shipping_charge,
            images: self.images,
        })
    }
}

fn parse_number(raw: &str) -> Result<f64, AppError> {
    raw.trim().parse().map_err(|_| AppError::MalformedPayload)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn intake() -> ProductIntake {
        ProductIntake {
            name: Some("Trail Shoe".to_string()),
            description: Some("Lightweight trail runner".to_string()),
            mrp: Some("1500".to_string()),
            discount: Some("3".to_string()),
            shipping_charge: Some("120".to_string()),
            images: vec!["uploads/123-shoe.png".to_string()],
        }
    }

    #[test]
    fn valid_payload_is_accepted() {
        let product = intake().validate().unwrap();

        assert!(product.id.is_none());
        assert_eq!(product.name, "Trail Shoe");
        assert_eq!(product.mrp, 1500.0);
        assert_eq!(product.images.len(), 1);
    }

    #[test]
    fn boundary_values_are_accepted() {
        // floor(1000 - 0.05 + 500) = 1499 > 0
        let mut candidate = intake();
        candidate.mrp = Some("1000".to_string());
        candidate.discount = Some("5".to_string());
        candidate.shipping_charge = Some("500".to_string());

        candidate.validate().unwrap();
    }

    #[test]
    fn mrp_below_1000_is_rejected() {
        let mut candidate = intake();
        candidate.mrp = Some("999".to_string());

        assert!(matches!(candidate.validate(), Err(AppError::MrpTooLow)));
    }

    #[test]
    fn discount_above_5_is_rejected() {
        let mut candidate = intake();
        candidate.discount = Some("5.5".to_string());

        assert!(matches!(candidate.validate(), Err(AppError::DiscountTooHigh)));
    }

    #[test]
    fn shipping_charge_above_500_is_rejected() {
        let mut candidate = intake();
        candidate.shipping_charge = Some("501".to_string());

        assert!(matches!(
            candidate.validate(),
            Err(AppError::ShippingChargeTooHigh)
        ));
    }

    #[test]
    fn no_images_is_a_missing_fields_error() {
        let mut candidate = intake();
        candidate.mrp = Some("1000".to_string());
        candidate.discount = Some("0".to_string());
        candidate.shipping_charge = Some("0".to_string());
        candidate.images.clear();

        assert!(matches!(candidate.validate(), Err(AppError::MissingFields)));
    }

    #[test]
    fn absent_or_empty_scalars_are_missing_fields() {
        let mut candidate = intake();
        candidate.description = None;
        assert!(matches!(candidate.validate(), Err(AppError::MissingFields)));

        let mut candidate = intake();
        candidate.name = Some(String::new());
        assert!(matches!(candidate.validate(), Err(AppError::MissingFields)));
    }

    #[test]
    fn unparseable_numbers_are_malformed() {
        let mut candidate = intake();
        candidate.mrp = Some("a lot".to_string());

        assert!(matches!(candidate.validate(), Err(AppError::MalformedPayload)));
    }

    #[test]
    fn negative_shipping_passes_range_but_fails_the_total() {
        // -1500 is below the 500 cap, so only the derived total catches it.
        let mut candidate = intake();
        candidate.mrp = Some("1000".to_string());
        candidate.discount = Some("0".to_string());
        candidate.shipping_charge = Some("-1500".to_string());

        assert!(matches!(
            candidate.validate(),
            Err(AppError::InvalidTotalPrice)
        ));
    }
}
