// src/models/classification.rs

use serde::Serialize;

/// Response of POST /place/classification
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ClassificationResponse {
    /// Predicted category
    pub name: String,
    /// One of the category's candidate sentences
    pub sentence: String,
}
