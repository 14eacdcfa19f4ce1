//! HTTP transport types for the host-does-IO pattern.
//!
//! # Design
//! Requests and responses are plain data. The core builds `HttpRequest`
//! values and parses `HttpResponse` values without touching the network;
//! the host executes the I/O. All fields are owned so values cross the FFI
//! boundary without lifetime concerns.

use crate::format::detect;
use crate::types::Supplier;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HttpMethod {
    Get,
    Post,
    Put,
    Delete,
}

/// An HTTP request described as plain data.
#[derive(Debug, Clone)]
pub struct HttpRequest {
    pub method: HttpMethod,
    pub path: String,
    pub headers: Vec<(String, String)>,
    pub body: Option<String>,
}

impl HttpRequest {
    /// The call an operator configured for `supplier`.
    ///
    /// Configured headers are sent as is. A `POST` carries the stored body and,
    /// unless the operator set one, a `content-type` for the body's detected
    /// format. A `GET` never carries a body.
    pub fn for_supplier_call(supplier: &Supplier) -> Self {
        let mut headers: Vec<(String, String)> = supplier
            .post_header
            .iter()
            .flatten()
            .map(|(k, v)| (k.clone(), v.clone()))
            .collect();

        let body = supplier
            .post_body
            .clone()
            .filter(|b| supplier.method.has_body() && !b.trim().is_empty());

        if let Some(format) = body.as_deref().and_then(|b| detect(b).format()) {
            let has_content_type = headers.iter().any(|(k, _)| k.eq_ignore_ascii_case("content-type"));
            if !has_content_type {
                headers.push(("content-type".to_string(), format.content_type().to_string()));
            }
        }

        let method = if supplier.method.has_body() {
            HttpMethod::Post
        } else {
            HttpMethod::Get
        };

        Self {
            method,
            path: supplier.request_url.clone(),
            headers,
            body,
        }
    }
}

/// An HTTP response described as plain data.
#[derive(Debug, Clone)]
pub struct HttpResponse {
    pub status: u16,
    pub headers: Vec<(String, String)>,
    pub body: String,
}
