//! Draft editor for the product form.
//!
//! A draft mirrors the editable product fields as raw form values. Images are
//! captured in one of two exclusive modes: URL slots or uploaded files. Toggling
//! the mode keeps the data of both; only [`Draft::discard`] drops it.

mod files;
mod preview;

pub use files::*;
pub use preview::*;

use crate::errors::AdminError;
use crate::models::{PetType, Product};

/// How the draft's images are supplied.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ImageUploadType {
    #[default]
    Url,
    File,
}

/// Editable form fields.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DraftField {
    Name,
    Brand,
    Category,
    Description,
    Price,
    StockQuantity,
    Ingredients,
    Dosage,
    SideEffects,
    Warnings,
    PrescriptionRequired,
    PetType,
}

impl DraftField {
    /// Look up a field by its form control name.
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "name" => Some(DraftField::Name),
            "brand" => Some(DraftField::Brand),
            "category" => Some(DraftField::Category),
            "description" => Some(DraftField::Description),
            "price" => Some(DraftField::Price),
            "stockQuantity" => Some(DraftField::StockQuantity),
            "ingredients" => Some(DraftField::Ingredients),
            "dosage" => Some(DraftField::Dosage),
            "sideEffects" => Some(DraftField::SideEffects),
            "warnings" => Some(DraftField::Warnings),
            "prescriptionRequired" => Some(DraftField::PrescriptionRequired),
            "petType" => Some(DraftField::PetType),
            _ => None,
        }
    }

    pub fn is_checkbox(&self) -> bool {
        matches!(self, DraftField::PrescriptionRequired)
    }
}

/// Value coming from a form control.
#[derive(Debug, Clone, PartialEq)]
pub enum FieldValue {
    Text(String),
    Checked(bool),
}

fn wrong_kind(name: &str, field: DraftField) -> AdminError {
    let expected = if field.is_checkbox() {
        "a checkbox"
    } else {
        "a text"
    };
    AdminError::InvalidField(format!("Field {} expects {} value", name, expected))
}

/// Form state for the product being created or edited.
#[derive(Debug)]
pub struct Draft {
    pub name: String,
    pub brand: String,
    pub category: String,
    pub description: String,
    pub price: String,
    pub stock_quantity: String,
    pub ingredients: String,
    pub dosage: String,
    pub side_effects: String,
    pub warnings: String,
    pub prescription_required: bool,
    pub pet_type: PetType,
    image_upload_type: ImageUploadType,
    images: Vec<String>,
    files: FileSelection,
    previews: PreviewStore,
}

impl Draft {
    /// Empty draft for a new product, with one empty URL slot.
    pub fn new(previews: PreviewStore) -> Self {
        Self {
            name: String::new(),
            brand: String::new(),
            category: String::new(),
            description: String::new(),
            price: String::new(),
            stock_quantity: String::new(),
            ingredients: String::new(),
            dosage: String::new(),
            side_effects: String::new(),
            warnings: String::new(),
            prescription_required: false,
            pet_type: PetType::All,
            image_upload_type: ImageUploadType::Url,
            images: vec![String::new()],
            files: FileSelection::new(),
            previews,
        }
    }

    /// Draft pre-filled from an existing product, in URL mode.
    pub fn from_product(product: &Product, previews: PreviewStore) -> Self {
        let images = if product.images.is_empty() {
            vec![String::new()]
        } else {
            product.images.clone()
        };

        Self {
            name: product.name.clone(),
            brand: product.brand.clone(),
            category: product.category.clone(),
            description: product.description.clone(),
            price: product.price.to_string(),
            stock_quantity: product.stock_quantity.to_string(),
            ingredients: product.ingredients.clone().unwrap_or_default(),
            dosage: product.dosage.clone().unwrap_or_default(),
            side_effects: product.side_effects.clone().unwrap_or_default(),
            warnings: product.warnings.clone().unwrap_or_default(),
            prescription_required: product.prescription_required,
            pet_type: product.primary_pet_type(),
            image_upload_type: ImageUploadType::Url,
            images,
            files: FileSelection::new(),
            previews,
        }
    }

    /// Set a named field. Checkboxes take booleans, every other field raw text.
    pub fn set_field(&mut self, name: &str, value: FieldValue) -> Result<(), AdminError> {
        let field = DraftField::from_name(name)
            .ok_or_else(|| AdminError::InvalidField(format!("Unknown field: {}", name)))?;

        match value {
            FieldValue::Checked(checked) if field.is_checkbox() => {
                self.prescription_required = checked;
            }
            FieldValue::Text(text) if field == DraftField::PetType => {
                self.pet_type = PetType::parse(&text).ok_or_else(|| {
                    AdminError::InvalidField(format!("Unknown pet type: {}", text))
                })?;
            }
            FieldValue::Text(text) if !field.is_checkbox() => match self.text_field_mut(field) {
                Some(slot) => *slot = text,
                None => return Err(wrong_kind(name, field)),
            },
            _ => return Err(wrong_kind(name, field)),
        }
        Ok(())
    }

    fn text_field_mut(&mut self, field: DraftField) -> Option<&mut String> {
        let slot = match field {
            DraftField::Name => &mut self.name,
            DraftField::Brand => &mut self.brand,
            DraftField::Category => &mut self.category,
            DraftField::Description => &mut self.description,
            DraftField::Price => &mut self.price,
            DraftField::StockQuantity => &mut self.stock_quantity,
            DraftField::Ingredients => &mut self.ingredients,
            DraftField::Dosage => &mut self.dosage,
            DraftField::SideEffects => &mut self.side_effects,
            DraftField::Warnings => &mut self.warnings,
            DraftField::PrescriptionRequired | DraftField::PetType => return None,
        };
        Some(slot)
    }

    pub fn image_upload_type(&self) -> ImageUploadType {
        self.image_upload_type
    }

    /// Switch image mode. Data captured in the other mode is kept.
    pub fn set_image_upload_type(&mut self, mode: ImageUploadType) {
        self.image_upload_type = mode;
    }

    // ==================== URL MODE ====================

    pub fn images(&self) -> &[String] {
        &self.images
    }

    pub fn add_image_slot(&mut self) {
        self.images.push(String::new());
    }

    pub fn set_image(&mut self, index: usize, url: impl Into<String>) -> Result<(), AdminError> {
        let slot = self.images.get_mut(index).ok_or_else(|| {
            AdminError::InvalidField(format!("No image slot at index {}", index))
        })?;
        *slot = url.into();
        Ok(())
    }

    /// Remove a URL slot. The list may become empty; submit validation catches it.
    pub fn remove_image_slot(&mut self, index: usize) -> Option<String> {
        (index < self.images.len()).then(|| self.images.remove(index))
    }

    /// Non-empty URLs in slot order.
    pub fn image_urls(&self) -> Vec<&str> {
        self.images
            .iter()
            .map(|url| url.trim())
            .filter(|url| !url.is_empty())
            .collect()
    }

    // ==================== FILE MODE ====================

    pub fn files(&self) -> &[SelectedFile] {
        self.files.files()
    }

    pub fn previews(&self) -> &[PreviewRef] {
        self.files.previews()
    }

    /// Replace the file selection, rejecting more than [`MAX_FILES`] files.
    pub fn select_files(&mut self, files: Vec<SelectedFile>) -> Result<(), AdminError> {
        self.files.select(files, &self.previews)
    }

    pub fn remove_file(&mut self, index: usize) -> Option<SelectedFile> {
        self.files.remove(index, &self.previews)
    }

    /// End the draft's lifecycle, releasing every preview reference.
    pub fn discard(mut self) {
        self.files.release(&self.previews);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn product() -> Product {
        serde_json::from_value(serde_json::json!({
            "id": "p9",
            "name": "Joint Support",
            "brand": "PawWell",
            "category": "Supplements",
            "description": "Glucosamine chews",
            "price": 19.99,
            "stockQuantity": 42,
            "images": ["https://cdn.example.com/a.png", "b.png"],
            "prescriptionRequired": true,
            "petType": ["Dog"],
            "dosage": "1 chew daily"
        }))
        .unwrap()
    }

    #[test]
    fn test_new_draft_has_one_empty_slot() {
        let draft = Draft::new(PreviewStore::new());
        assert_eq!(draft.images(), &[String::new()]);
        assert_eq!(draft.image_upload_type(), ImageUploadType::Url);
        assert_eq!(draft.pet_type, PetType::All);
        assert!(draft.image_urls().is_empty());
    }

    #[test]
    fn test_from_product_copies_fields() {
        let draft = Draft::from_product(&product(), PreviewStore::new());
        assert_eq!(draft.name, "Joint Support");
        assert_eq!(draft.price, "19.99");
        assert_eq!(draft.stock_quantity, "42");
        assert_eq!(draft.dosage, "1 chew daily");
        assert_eq!(draft.warnings, "");
        assert!(draft.prescription_required);
        assert_eq!(draft.pet_type, PetType::Dog);
        assert_eq!(draft.images().len(), 2);
    }

    #[test]
    fn test_set_field_by_name() {
        let mut draft = Draft::new(PreviewStore::new());
        draft
            .set_field("name", FieldValue::Text("Ear Drops".into()))
            .unwrap();
        draft
            .set_field("stockQuantity", FieldValue::Text("12".into()))
            .unwrap();
        draft
            .set_field("prescriptionRequired", FieldValue::Checked(true))
            .unwrap();
        draft
            .set_field("petType", FieldValue::Text("Small Animal".into()))
            .unwrap();

        assert_eq!(draft.name, "Ear Drops");
        assert_eq!(draft.stock_quantity, "12");
        assert!(draft.prescription_required);
        assert_eq!(draft.pet_type, PetType::SmallAnimal);
    }

    #[test]
    fn test_set_field_rejects_bad_input() {
        let mut draft = Draft::new(PreviewStore::new());
        assert!(matches!(
            draft.set_field("colour", FieldValue::Text("red".into())),
            Err(AdminError::InvalidField(_))
        ));
        assert_eq!(
            draft.set_field("prescriptionRequired", FieldValue::Text("yes".into())),
            Err(AdminError::InvalidField(
                "Field prescriptionRequired expects a checkbox value".to_string(),
            ))
        );
        assert_eq!(
            draft.set_field("name", FieldValue::Checked(true)),
            Err(AdminError::InvalidField(
                "Field name expects a text value".to_string(),
            ))
        );
        assert!(!draft.prescription_required);
        assert!(draft
            .set_field("petType", FieldValue::Text("Horse".into()))
            .is_err());
        assert_eq!(draft.pet_type, PetType::All);
    }

    #[test]
    fn test_url_slot_operations() {
        let mut draft = Draft::new(PreviewStore::new());
        draft.set_image(0, "https://cdn.example.com/1.png").unwrap();
        draft.add_image_slot();
        draft.add_image_slot();
        draft.set_image(2, "https://cdn.example.com/3.png").unwrap();
        assert!(draft.set_image(3, "x").is_err());

        assert_eq!(
            draft.image_urls(),
            vec![
                "https://cdn.example.com/1.png",
                "https://cdn.example.com/3.png"
            ]
        );

        assert_eq!(
            draft.remove_image_slot(0).as_deref(),
            Some("https://cdn.example.com/1.png")
        );
        draft.remove_image_slot(0);
        draft.remove_image_slot(0);
        assert!(draft.images().is_empty());
        assert!(draft.remove_image_slot(0).is_none());
    }

    #[test]
    fn test_mode_toggle_keeps_both_sides() {
        let store = PreviewStore::new();
        let mut draft = Draft::new(store.clone());
        draft.set_image(0, "https://cdn.example.com/x.png").unwrap();
        draft.set_image_upload_type(ImageUploadType::File);
        draft
            .select_files(vec![SelectedFile::new("x.png", vec![1])])
            .unwrap();
        draft.set_image_upload_type(ImageUploadType::Url);

        assert_eq!(draft.image_urls(), vec!["https://cdn.example.com/x.png"]);
        assert_eq!(draft.files().len(), 1);
        assert_eq!(store.live_count(), 1);
    }

    #[test]
    fn test_discard_releases_previews() {
        let store = PreviewStore::new();
        let mut draft = Draft::new(store.clone());
        draft
            .select_files(vec![
                SelectedFile::new("a.png", vec![1]),
                SelectedFile::new("b.png", vec![2]),
            ])
            .unwrap();
        draft.remove_file(0);
        assert_eq!(store.live_count(), 1);

        draft.discard();
        assert_eq!(store.live_count(), 0);
    }
}
