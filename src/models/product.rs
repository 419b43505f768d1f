//! Product model matching the backend product record.

use serde::{Deserialize, Deserializer, Serialize};

/// Products with fewer units than this are reported as low stock.
pub const LOW_STOCK_THRESHOLD: u32 = 10;

/// Animal a product is intended for.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
pub enum PetType {
    #[default]
    All,
    Dog,
    Cat,
    Bird,
    Fish,
    #[serde(rename = "Small Animal")]
    SmallAnimal,
}

impl PetType {
    pub const ALL: [PetType; 6] = [
        PetType::All,
        PetType::Dog,
        PetType::Cat,
        PetType::Bird,
        PetType::Fish,
        PetType::SmallAnimal,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            PetType::All => "All",
            PetType::Dog => "Dog",
            PetType::Cat => "Cat",
            PetType::Bird => "Bird",
            PetType::Fish => "Fish",
            PetType::SmallAnimal => "Small Animal",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "All" => Some(PetType::All),
            "Dog" => Some(PetType::Dog),
            "Cat" => Some(PetType::Cat),
            "Bird" => Some(PetType::Bird),
            "Fish" => Some(PetType::Fish),
            "Small Animal" => Some(PetType::SmallAnimal),
            _ => None,
        }
    }
}

/// Stock badge shown next to a product.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StockLevel {
    Out,
    Low,
    In,
}

impl StockLevel {
    pub fn for_quantity(quantity: u32) -> Self {
        if quantity == 0 {
            StockLevel::Out
        } else if quantity < LOW_STOCK_THRESHOLD {
            StockLevel::Low
        } else {
            StockLevel::In
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            StockLevel::Out => "Out of Stock",
            StockLevel::Low => "Low Stock",
            StockLevel::In => "In Stock",
        }
    }
}

/// A product as stored by the backend.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    #[serde(alias = "_id")]
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub brand: String,
    #[serde(default)]
    pub category: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub price: f64,
    #[serde(default)]
    pub stock_quantity: u32,
    #[serde(default)]
    pub images: Vec<String>,
    #[serde(default)]
    pub prescription_required: bool,
    /// Single-element list on the wire
    #[serde(default)]
    pub pet_type: Vec<PetType>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ingredients: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dosage: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub side_effects: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub warnings: Option<String>,
    #[serde(default)]
    pub average_rating: f64,
    /// Number of reviews; the backend may send the review list itself
    #[serde(default, deserialize_with = "review_count")]
    pub reviews: u32,
}

impl Product {
    pub fn stock_level(&self) -> StockLevel {
        StockLevel::for_quantity(self.stock_quantity)
    }

    /// The pet type the product targets, `All` when unspecified.
    pub fn primary_pet_type(&self) -> PetType {
        self.pet_type.first().copied().unwrap_or_default()
    }
}

/// Body of `GET /products`, either wrapped in an envelope or a bare list.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub enum ProductListResponse {
    Envelope { products: Vec<Product> },
    List(Vec<Product>),
}

impl ProductListResponse {
    pub fn into_products(self) -> Vec<Product> {
        match self {
            ProductListResponse::Envelope { products } => products,
            ProductListResponse::List(products) => products,
        }
    }
}

fn review_count<'de, D>(deserializer: D) -> Result<u32, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Reviews {
        Count(u32),
        List(Vec<serde_json::Value>),
        Missing(()),
    }

    Ok(match Reviews::deserialize(deserializer)? {
        Reviews::Count(n) => n,
        Reviews::List(items) => items.len() as u32,
        Reviews::Missing(()) => 0,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_decode_backend_record() {
        let product: Product = serde_json::from_value(json!({
            "_id": "p1",
            "name": "Flea Shield",
            "brand": "VetCare",
            "category": "Parasite Control",
            "price": 24.5,
            "stockQuantity": 7,
            "images": ["flea.png"],
            "prescriptionRequired": true,
            "petType": ["Small Animal"],
            "averageRating": 4.5,
            "reviews": [{"rating": 5}, {"rating": 4}]
        }))
        .unwrap();

        assert_eq!(product.id, "p1");
        assert_eq!(product.primary_pet_type(), PetType::SmallAnimal);
        assert_eq!(product.reviews, 2);
        assert_eq!(product.stock_level(), StockLevel::Low);
        assert!(product.dosage.is_none());
    }

    #[test]
    fn test_review_count_variants() {
        let counted: Product =
            serde_json::from_value(json!({"id": "a", "name": "A", "reviews": 12})).unwrap();
        assert_eq!(counted.reviews, 12);

        let nulled: Product =
            serde_json::from_value(json!({"id": "b", "name": "B", "reviews": null})).unwrap();
        assert_eq!(nulled.reviews, 0);

        let missing: Product = serde_json::from_value(json!({"id": "c", "name": "C"})).unwrap();
        assert_eq!(missing.reviews, 0);
        assert_eq!(missing.primary_pet_type(), PetType::All);
    }

    #[test]
    fn test_list_response_shapes() {
        let envelope: ProductListResponse =
            serde_json::from_value(json!({"products": [{"id": "1", "name": "One"}]})).unwrap();
        assert_eq!(envelope.into_products().len(), 1);

        let bare: ProductListResponse = serde_json::from_value(json!([
            {"id": "1", "name": "One"},
            {"id": "2", "name": "Two"}
        ]))
        .unwrap();
        let products = bare.into_products();
        assert_eq!(products[1].id, "2");
    }

    #[test]
    fn test_pet_type_strings() {
        for pet in PetType::ALL {
            assert_eq!(PetType::parse(pet.as_str()), Some(pet));
        }
        assert_eq!(PetType::parse("Horse"), None);
        assert_eq!(
            serde_json::to_value([PetType::SmallAnimal]).unwrap(),
            json!(["Small Animal"])
        );
    }

    #[test]
    fn test_stock_level_thresholds() {
        assert_eq!(StockLevel::for_quantity(0), StockLevel::Out);
        assert_eq!(StockLevel::for_quantity(9), StockLevel::Low);
        assert_eq!(StockLevel::for_quantity(10), StockLevel::In);
        assert_eq!(StockLevel::Low.label(), "Low Stock");
    }
}
