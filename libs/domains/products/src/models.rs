use axum_helpers::extractors::rules::{FieldRules, RuleSet, as_number};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;
use utoipa::ToSchema;
use validator::Validate;

/// Product entity exposed through the API
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct Product {
    /// Unique identifier (auto-incrementing)
    #[schema(example = 1)]
    pub id: i32,
    /// Product name
    #[schema(example = "Curved Monitor 49 Inch")]
    pub name: String,
    /// Product price
    #[schema(example = 300.0)]
    pub price: f64,
    /// Whether the product is available for sale
    #[schema(example = true)]
    pub availability: bool,
    /// Creation timestamp
    pub created_at: DateTime<Utc>,
    /// Last update timestamp
    pub updated_at: DateTime<Utc>,
}

/// DTO for creating a new product
///
/// Availability is not accepted on creation; new products default to
/// available.
#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct CreateProduct {
    #[validate(length(min = 1, max = 100))]
    #[schema(example = "Curved Monitor 49 Inch")]
    pub name: String,
    /// Price, accepted as a number or a numeric string
    #[validate(range(exclusive_min = 0.0))]
    #[serde(deserialize_with = "lenient_f64")]
    #[schema(example = 300.0)]
    pub price: f64,
}

/// DTO for replacing an existing product
///
/// All fields are required; a PUT replaces the whole record.
#[derive(Debug, Clone, PartialEq, Deserialize, Validate, ToSchema)]
pub struct UpdateProduct {
    #[validate(length(min = 1, max = 100))]
    pub name: String,
    #[validate(range(exclusive_min = 0.0))]
    #[serde(deserialize_with = "lenient_f64")]
    pub price: f64,
    pub availability: bool,
}

/// Response envelope wrapping a single product
#[derive(Debug, Serialize, ToSchema)]
pub struct ProductResponse {
    pub data: Product,
}

/// Response envelope wrapping a product collection
#[derive(Debug, Serialize, ToSchema)]
pub struct ProductListResponse {
    pub data: Vec<Product>,
}

/// Response envelope confirming a deletion
#[derive(Debug, Serialize, ToSchema)]
pub struct DeleteProductResponse {
    #[schema(example = "Product deleted")]
    pub data: String,
}

/// Deserializes a price from a JSON number or a numeric string, so
/// `300` and `"300"` are both accepted.
fn lenient_f64<'de, D>(deserializer: D) -> Result<f64, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    as_number(&value).ok_or_else(|| serde::de::Error::custom("expected a number"))
}

fn positive(value: &Value) -> bool {
    as_number(value).is_some_and(|n| n > 0.0)
}

impl RuleSet for CreateProduct {
    fn rules() -> Vec<FieldRules> {
        vec![
            FieldRules::body("name").not_empty("Product name cannot be empty"),
            FieldRules::body("price")
                .numeric("Price must be a number")
                .not_empty("Price cannot be empty")
                .custom(positive, "Price must be greater than zero"),
        ]
    }
}

impl RuleSet for UpdateProduct {
    fn rules() -> Vec<FieldRules> {
        vec![
            FieldRules::body("name").not_empty("Product name cannot be empty"),
            FieldRules::body("price")
                .numeric("Price must be a number")
                .not_empty("Price cannot be empty")
                .custom(positive, "Price must be greater than zero"),
            FieldRules::body("availability").boolean("Availability must be a boolean"),
        ]
    }
}
