//! Stateless HTTP request builder and response parser for the supplier and
//! product API.
//!
//! # Design
//! `SupplierClient` holds only a `base_url`. Each operation is split into a
//! `build_*` method that produces an `HttpRequest` and a `parse_*` method
//! that consumes an `HttpResponse`; the caller executes the round-trip.
//! Create and update validate their input before any request is built.

use serde::de::DeserializeOwned;

use crate::error::ApiError;
use crate::http::{HttpMethod, HttpRequest, HttpResponse};
use crate::types::{Product, ProductInput, ProductPage, Supplier, SupplierInput, SupplierPage};

#[derive(Debug, Clone)]
pub struct SupplierClient {
    base_url: String,
}

impl SupplierClient {
    pub fn new(base_url: &str) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    pub fn build_list_suppliers(&self) -> HttpRequest {
        self.request(HttpMethod::Get, format!("{}/supplier", self.base_url), None)
    }

    pub fn build_get_supplier(&self, id: u64) -> HttpRequest {
        self.request(HttpMethod::Get, format!("{}/supplier/{id}", self.base_url), None)
    }

    pub fn build_create_supplier(&self, input: &SupplierInput) -> Result<HttpRequest, ApiError> {
        input.validate()?;
        let body = serde_json::to_string(input).map_err(|e| ApiError::SerializationError(e.to_string()))?;
        Ok(self.request(HttpMethod::Post, format!("{}/supplier", self.base_url), Some(body)))
    }

    /// Updates go to the collection path with the id inside the payload.
    pub fn build_update_supplier(&self, id: u64, input: &SupplierInput) -> Result<HttpRequest, ApiError> {
        input.validate()?;
        let payload = SupplierInput {
            id: Some(id),
            ..input.clone()
        };
        let body = serde_json::to_string(&payload).map_err(|e| ApiError::SerializationError(e.to_string()))?;
        Ok(self.request(HttpMethod::Put, format!("{}/supplier", self.base_url), Some(body)))
    }

    pub fn build_delete_supplier(&self, id: u64) -> HttpRequest {
        self.request(HttpMethod::Delete, format!("{}/supplier/{id}", self.base_url), None)
    }

    pub fn parse_list_suppliers(&self, response: HttpResponse) -> Result<Vec<Supplier>, ApiError> {
        let page: SupplierPage = parse_json(&response, 200)?;
        Ok(page.content)
    }

    pub fn parse_get_supplier(&self, response: HttpResponse) -> Result<Supplier, ApiError> {
        parse_json(&response, 200)
    }

    pub fn parse_create_supplier(&self, response: HttpResponse) -> Result<Supplier, ApiError> {
        parse_json(&response, 201)
    }

    pub fn parse_update_supplier(&self, response: HttpResponse) -> Result<Supplier, ApiError> {
        parse_json(&response, 200)
    }

    pub fn parse_delete_supplier(&self, response: HttpResponse) -> Result<(), ApiError> {
        check_status(&response, 204)
    }

    // -----------------------------------------------------------------------
    // Products
    // -----------------------------------------------------------------------

    pub fn build_list_products(&self) -> HttpRequest {
        self.request(HttpMethod::Get, format!("{}/product", self.base_url), None)
    }

    pub fn build_get_product(&self, id: u64) -> HttpRequest {
        self.request(HttpMethod::Get, format!("{}/product/{id}", self.base_url), None)
    }

    pub fn build_create_product(&self, input: &ProductInput) -> Result<HttpRequest, ApiError> {
        input.validate()?;
        let body = serde_json::to_string(input).map_err(|e| ApiError::SerializationError(e.to_string()))?;
        Ok(self.request(HttpMethod::Post, format!("{}/product", self.base_url), Some(body)))
    }

    /// Same shape as supplier updates: collection path, id in the payload.
    pub fn build_update_product(&self, id: u64, input: &ProductInput) -> Result<HttpRequest, ApiError> {
        input.validate()?;
        let payload = ProductInput {
            id: Some(id),
            ..input.clone()
        };
        let body = serde_json::to_string(&payload).map_err(|e| ApiError::SerializationError(e.to_string()))?;
        Ok(self.request(HttpMethod::Put, format!("{}/product", self.base_url), Some(body)))
    }

    pub fn build_delete_product(&self, id: u64) -> HttpRequest {
        self.request(HttpMethod::Delete, format!("{}/product/{id}", self.base_url), None)
    }

    pub fn parse_list_products(&self, response: HttpResponse) -> Result<Vec<Product>, ApiError> {
        let page: ProductPage = parse_json(&response, 200)?;
        Ok(page.content)
    }

    pub fn parse_get_product(&self, response: HttpResponse) -> Result<Product, ApiError> {
        parse_json(&response, 200)
    }

    pub fn parse_create_product(&self, response: HttpResponse) -> Result<Product, ApiError> {
        parse_json(&response, 201)
    }

    pub fn parse_update_product(&self, response: HttpResponse) -> Result<Product, ApiError> {
        parse_json(&response, 200)
    }

    pub fn parse_delete_product(&self, response: HttpResponse) -> Result<(), ApiError> {
        check_status(&response, 204)
    }

    fn request(&self, method: HttpMethod, path: String, body: Option<String>) -> HttpRequest {
        let headers = if body.is_some() {
            vec![("content-type".to_string(), "application/json".to_string())]
        } else {
            Vec::new()
        };
        HttpRequest {
            method,
            path,
            headers,
            body,
        }
    }
}

fn parse_json<T: DeserializeOwned>(response: &HttpResponse, expected: u16) -> Result<T, ApiError> {
    check_status(response, expected)?;
    serde_json::from_str(&response.body).map_err(|e| ApiError::DeserializationError(e.to_string()))
}

/// Map non-success status codes to the appropriate `ApiError` variant.
fn check_status(response: &HttpResponse, expected: u16) -> Result<(), ApiError> {
    if response.status == expected {
        return Ok(());
    }
    if response.status == 404 {
        return Err(ApiError::NotFound);
    }
    Err(ApiError::HttpError {
        status: response.status,
        body: response.body.clone(),
    })
}
