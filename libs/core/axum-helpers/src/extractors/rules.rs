//! Declarative field validation rules for JSON request bodies.
//!
//! Rules are declared per field and evaluated against the raw JSON body
//! before deserialization, so every failing rule produces its own entry
//! in the response. A request failing three rules reports three errors,
//! not just the first one.
//!
//! # Example
//!
//! ```ignore
//! use axum_helpers::extractors::rules::{FieldRules, RuleSet};
//!
//! struct CreateProduct;
//!
//! impl RuleSet for CreateProduct {
//!     fn rules() -> Vec<FieldRules> {
//!         vec![
//!             FieldRules::body("name").not_empty("Product name cannot be empty"),
//!             FieldRules::body("price")
//!                 .numeric("Price must be a number")
//!                 .not_empty("Price cannot be empty"),
//!         ]
//!     }
//! }
//! ```

use serde::Serialize;
use serde_json::Value;
use utoipa::ToSchema;

/// A single field-level validation failure.
///
/// Serializes to the shape clients expect in the `errors` array:
///
/// ```json
/// {
///   "type": "field",
///   "value": "Hola",
///   "msg": "Price must be a number",
///   "path": "price",
///   "location": "body"
/// }
/// ```
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct FieldError {
    /// Always "field" for field-level errors
    #[serde(rename = "type")]
    pub kind: &'static str,
    /// The offending value as received (null when the field was absent)
    pub value: Value,
    /// Human-readable message for this rule
    pub msg: String,
    /// Field name
    pub path: String,
    /// Where the field was read from: "body" or "params"
    pub location: &'static str,
}

impl FieldError {
    pub fn body(path: &str, value: Value, msg: &str) -> Self {
        Self {
            kind: "field",
            value,
            msg: msg.to_string(),
            path: path.to_string(),
            location: "body",
        }
    }

    pub fn params(path: &str, value: Value, msg: &str) -> Self {
        Self {
            kind: "field",
            value,
            msg: msg.to_string(),
            path: path.to_string(),
            location: "params",
        }
    }
}

/// Response body for validation failures.
#[derive(Debug, Serialize, ToSchema)]
pub struct ValidationErrorBody {
    pub errors: Vec<FieldError>,
}

/// A single validation rule applied to one field.
pub enum Rule {
    /// Fails when the field is absent, null, or an empty string.
    /// Numbers and booleans always pass, including 0 and false.
    NotEmpty { message: &'static str },
    /// Fails unless the value is a JSON number or a string that parses
    /// as one.
    Numeric { message: &'static str },
    /// Fails unless the value is a JSON boolean.
    Boolean { message: &'static str },
    /// Custom predicate over the raw JSON value. Absent fields are
    /// passed as `Value::Null`.
    Custom {
        predicate: fn(&Value) -> bool,
        message: &'static str,
    },
}

impl Rule {
    fn check(&self, value: &Value) -> Option<&'static str> {
        match self {
            Rule::NotEmpty { message } => {
                let empty = match value {
                    Value::Null => true,
                    Value::String(s) => s.is_empty(),
                    _ => false,
                };
                empty.then_some(*message)
            }
            Rule::Numeric { message } => {
                if as_number(value).is_some() {
                    None
                } else {
                    Some(message)
                }
            }
            Rule::Boolean { message } => {
                if value.is_boolean() {
                    None
                } else {
                    Some(message)
                }
            }
            Rule::Custom { predicate, message } => {
                if predicate(value) {
                    None
                } else {
                    Some(message)
                }
            }
        }
    }
}

/// Interprets a JSON value as a number.
///
/// Accepts JSON numbers and numeric strings, so `150` and `"150"` are
/// both valid prices while `"Hola"` is not.
pub fn as_number(value: &Value) -> Option<f64> {
    match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse::<f64>().ok(),
        _ => None,
    }
}

/// The ordered set of rules for one body field.
///
/// Rules are evaluated in declaration order and every failing rule
/// contributes its own [`FieldError`].
pub struct FieldRules {
    field: &'static str,
    rules: Vec<Rule>,
}

impl FieldRules {
    /// Start a rule chain for a body field.
    pub fn body(field: &'static str) -> Self {
        Self {
            field,
            rules: Vec::new(),
        }
    }

    pub fn not_empty(mut self, message: &'static str) -> Self {
        self.rules.push(Rule::NotEmpty { message });
        self
    }

    pub fn numeric(mut self, message: &'static str) -> Self {
        self.rules.push(Rule::Numeric { message });
        self
    }

    pub fn boolean(mut self, message: &'static str) -> Self {
        self.rules.push(Rule::Boolean { message });
        self
    }

    pub fn custom(mut self, predicate: fn(&Value) -> bool, message: &'static str) -> Self {
        self.rules.push(Rule::Custom { predicate, message });
        self
    }

    /// Evaluate every rule against the body, collecting all failures.
    pub fn check(&self, body: &Value) -> Vec<FieldError> {
        let value = body.get(self.field).unwrap_or(&Value::Null);

        self.rules
            .iter()
            .filter_map(|rule| rule.check(value))
            .map(|msg| FieldError::body(self.field, value.clone(), msg))
            .collect()
    }
}

/// Types that declare validation rules for their JSON representation.
pub trait RuleSet {
    fn rules() -> Vec<FieldRules>;
}

/// Evaluate a type's rules against a raw JSON body.
pub fn evaluate<T: RuleSet>(body: &Value) -> Vec<FieldError> {
    T::rules()
        .iter()
        .flat_map(|field| field.check(body))
        .collect()
}
