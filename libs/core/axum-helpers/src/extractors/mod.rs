//! Custom request extractors.
//!
//! - [`ValidatedBody`]: JSON body extractor running declarative field rules
//! - [`IdPath`]: positive integer path parameter extractor
//! - [`rules`]: the field rule engine backing both

pub mod id_path;
pub mod rules;
pub mod validated_body;

pub use id_path::IdPath;
pub use rules::{FieldError, FieldRules, RuleSet, ValidationErrorBody};
pub use validated_body::ValidatedBody;
