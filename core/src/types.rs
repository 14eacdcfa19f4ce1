//! Supplier and product DTOs for the administration API.
//!
//! # Design
//! These mirror the server's camelCase schema. `postBody` is the opaque
//! encoded request body; the codec is the only thing that looks inside it.
//! Header and standard-response maps keep insertion order so a reloaded
//! record shows its rows the way they were saved. A product is sold to
//! clients and resolved by calling its linked suppliers; the server returns
//! those suppliers in full but takes only their ids on input.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::error::{FieldError, ValidationError};

/// HTTP method the supplier endpoint is called with.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum SupplierMethod {
    #[default]
    Get,
    Post,
}

impl SupplierMethod {
    /// Whether calls with this method carry `postBody`.
    pub fn has_body(self) -> bool {
        matches!(self, SupplierMethod::Post)
    }
}

/// A supplier as returned by the API.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Supplier {
    pub id: u64,
    pub name: String,
    #[serde(default)]
    pub scope: String,
    #[serde(default)]
    pub description: String,
    /// Request timeout in milliseconds.
    #[serde(default)]
    pub timeout: u64,
    #[serde(default)]
    pub error_condition: String,
    pub request_url: String,
    #[serde(default)]
    pub cost_per_request: f64,
    #[serde(default)]
    pub parameter_type: Vec<String>,
    #[serde(default)]
    pub method: SupplierMethod,
    #[serde(default)]
    pub post_header: Option<IndexMap<String, String>>,
    #[serde(default)]
    pub post_body: Option<String>,
    #[serde(default)]
    pub standard_response: Option<IndexMap<String, String>>,
}

/// Create/update payload. `id` is only sent on update.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SupplierInput {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<u64>,
    pub name: String,
    pub scope: String,
    pub description: String,
    pub timeout: u64,
    pub error_condition: String,
    pub request_url: String,
    pub cost_per_request: f64,
    pub parameters: Vec<String>,
    pub method: SupplierMethod,
    pub post_header: Option<IndexMap<String, String>>,
    pub post_body: String,
    pub standard_response: Option<IndexMap<String, String>>,
}

const MIN_NAME: usize = 3;
const MIN_DESCRIPTION: usize = 10;
const MIN_REQUEST_URL: usize = 10;

/// Collects minimum-length failures in the order fields are checked.
#[derive(Default)]
struct Rules(Vec<FieldError>);

impl Rules {
    fn min_len(&mut self, field: &'static str, value: &str, min: usize) -> &mut Self {
        if value.chars().count() < min {
            self.0.push(FieldError {
                field,
                message: format!("must be at least {min} characters"),
            });
        }
        self
    }

    fn finish(&mut self) -> Result<(), ValidationError> {
        if self.0.is_empty() {
            Ok(())
        } else {
            Err(ValidationError(std::mem::take(&mut self.0)))
        }
    }
}

impl SupplierInput {
    /// Check the form rules, collecting every failure.
    pub fn validate(&self) -> Result<(), ValidationError> {
        Rules::default()
            .min_len("name", &self.name, MIN_NAME)
            .min_len("description", &self.description, MIN_DESCRIPTION)
            .min_len("requestUrl", &self.request_url, MIN_REQUEST_URL)
            .finish()
    }
}

/// Envelope of the list endpoint.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SupplierPage {
    pub content: Vec<Supplier>,
}

/// A product as returned by the API, with its suppliers expanded.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    pub id: u64,
    pub name: String,
    #[serde(default)]
    pub supplier_list: Vec<Supplier>,
    #[serde(default)]
    pub total_price: f64,
    /// Sum of the linked suppliers' cost per request.
    #[serde(default)]
    pub total_cost: f64,
    #[serde(default)]
    pub standard_response: Option<IndexMap<String, String>>,
}

/// Product create/update payload. Suppliers are linked by id.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductInput {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<u64>,
    pub name: String,
    pub total_price: f64,
    pub total_cost: f64,
    pub supplier_ids: Vec<u64>,
    pub standard_response: Option<IndexMap<String, String>>,
}

impl ProductInput {
    pub fn validate(&self) -> Result<(), ValidationError> {
        Rules::default().min_len("name", &self.name, MIN_NAME).finish()
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProductPage {
    pub content: Vec<Product>,
}
