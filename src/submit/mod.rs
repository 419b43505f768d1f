//! Submission validator and serializer.
//!
//! Turns a [`Draft`] into the multipart payload shared by create and update.

mod payload;

pub use payload::*;

use crate::config::SideEffectsEncoding;
use crate::draft::{Draft, ImageUploadType};
use crate::errors::AdminError;

pub const REQUIRED_FIELDS_MESSAGE: &str =
    "Please fill in all required fields: name, category, price, stock quantity, brand and description";
pub const IMAGE_URL_REQUIRED_MESSAGE: &str = "Please provide at least one image URL";
pub const IMAGE_FILE_REQUIRED_MESSAGE: &str = "Please select at least one image file";

fn is_blank(value: &str) -> bool {
    value.trim().is_empty()
}

/// Check the draft before anything is sent. The first failure wins.
pub fn validate(draft: &Draft) -> Result<(), AdminError> {
    let required = [
        &draft.name,
        &draft.category,
        &draft.price,
        &draft.stock_quantity,
        &draft.brand,
        &draft.description,
    ];
    if required.iter().any(|value| is_blank(value)) {
        return Err(AdminError::Validation(REQUIRED_FIELDS_MESSAGE.to_string()));
    }

    match draft.image_upload_type() {
        ImageUploadType::Url => {
            if draft.images().first().map_or(true, |url| is_blank(url)) {
                return Err(AdminError::Validation(
                    IMAGE_URL_REQUIRED_MESSAGE.to_string(),
                ));
            }
        }
        ImageUploadType::File => {
            if draft.files().is_empty() {
                return Err(AdminError::Validation(
                    IMAGE_FILE_REQUIRED_MESSAGE.to_string(),
                ));
            }
        }
    }

    parse_price(&draft.price)?;
    parse_stock(&draft.stock_quantity)?;
    Ok(())
}

fn parse_price(raw: &str) -> Result<f64, AdminError> {
    raw.trim()
        .parse::<f64>()
        .ok()
        .filter(|price| price.is_finite() && *price >= 0.0)
        .ok_or_else(|| AdminError::Validation("Price must be a non-negative number".to_string()))
}

fn parse_stock(raw: &str) -> Result<u32, AdminError> {
    raw.trim().parse::<u32>().map_err(|_| {
        AdminError::Validation("Stock quantity must be a non-negative whole number".to_string())
    })
}

/// Validate the draft and serialize it into a multipart payload.
pub fn build_payload(
    draft: &Draft,
    encoding: SideEffectsEncoding,
) -> Result<ProductPayload, AdminError> {
    validate(draft)?;

    let price = parse_price(&draft.price)?;
    let stock = parse_stock(&draft.stock_quantity)?;

    let mut payload = ProductPayload::new();
    payload.push_text("name", draft.name.trim());
    payload.push_text("category", draft.category.trim());
    payload.push_text("description", draft.description.trim());
    payload.push_text("price", price.to_string());
    payload.push_text("stockQuantity", stock.to_string());
    payload.push_text("brand", draft.brand.trim());
    payload.push_text("ingredients", draft.ingredients.trim());
    payload.push_text(
        "prescriptionRequired",
        draft.prescription_required.to_string(),
    );
    payload.push_text("petType", serde_json::to_string(&[draft.pet_type])?);

    if !is_blank(&draft.dosage) {
        payload.push_text("dosage", draft.dosage.trim());
    }

    match encoding {
        SideEffectsEncoding::Separate => {
            if !is_blank(&draft.side_effects) {
                payload.push_text("sideEffects", draft.side_effects.trim());
            }
            if !is_blank(&draft.warnings) {
                payload.push_text("warnings", draft.warnings.trim());
            }
        }
        SideEffectsEncoding::Legacy => {
            let merged = [&draft.warnings, &draft.side_effects]
                .into_iter()
                .find(|value| !is_blank(value));
            if let Some(value) = merged {
                payload.push_text("sideEffects", value.trim());
            }
        }
    }

    match draft.image_upload_type() {
        ImageUploadType::File => {
            for file in draft.files() {
                payload.push_file("images", file.clone());
            }
        }
        ImageUploadType::Url => {
            let urls = draft.image_urls();
            payload.push_text("images", serde_json::to_string(&urls)?);
            if let Some(primary) = urls.first() {
                payload.push_text("image", *primary);
            }
        }
    }

    Ok(payload)
}
