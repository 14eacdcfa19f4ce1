//! In-memory editing state of the supplier and product forms.
//!
//! A draft is built empty for a new record or from an existing one, edited
//! through its lists, and turned into an input payload once, on submit.

use indexmap::IndexMap;

use crate::codec;
use crate::entries::KeyValueList;
use crate::error::ApiError;
use crate::format::WireFormat;
use crate::types::{Product, ProductInput, Supplier, SupplierInput, SupplierMethod};

#[derive(Debug, Clone, Default, PartialEq)]
pub struct SupplierDraft {
    /// Set when editing an existing supplier.
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
    pub headers: KeyValueList,
    pub standard_response: KeyValueList,
    /// Format the body will be encoded in on submit.
    pub body_format: WireFormat,
    pub body: KeyValueList,
}

impl SupplierDraft {
    pub fn new() -> Self {
        Self::default()
    }

    /// Open an existing supplier for editing.
    ///
    /// The stored body is classified and decoded; an unrecognized body opens
    /// as an empty JSON body. A body that looks like XML or SOAP but does not
    /// parse is an error.
    pub fn from_supplier(supplier: &Supplier) -> Result<Self, ApiError> {
        let (body_format, body) = match supplier.post_body.as_deref() {
            Some(stored) => codec::load_for_editing(stored, None)?,
            None => (WireFormat::default(), KeyValueList::new()),
        };
        Ok(Self {
            id: Some(supplier.id),
            name: supplier.name.clone(),
            scope: supplier.scope.clone(),
            description: supplier.description.clone(),
            timeout: supplier.timeout,
            error_condition: supplier.error_condition.clone(),
            request_url: supplier.request_url.clone(),
            cost_per_request: supplier.cost_per_request,
            parameters: supplier.parameter_type.clone(),
            method: supplier.method,
            headers: to_list(supplier.post_header.as_ref()),
            standard_response: to_list(supplier.standard_response.as_ref()),
            body_format,
            body,
        })
    }

    /// Build the create/update payload.
    ///
    /// Blank parameters are dropped, empty header and standard-response lists
    /// are sent as `null`, and the body is encoded in `body_format`.
    /// Validation runs after encoding so a missing SOAP root is reported
    /// before field-length problems.
    pub fn to_input(&self) -> Result<SupplierInput, ApiError> {
        let post_body = codec::prepare_for_submit(self.body_format, &self.body)?;
        let input = SupplierInput {
            id: self.id,
            name: self.name.clone(),
            scope: self.scope.clone(),
            description: self.description.clone(),
            timeout: self.timeout,
            error_condition: self.error_condition.clone(),
            request_url: self.request_url.clone(),
            cost_per_request: self.cost_per_request,
            parameters: self
                .parameters
                .iter()
                .filter(|p| !p.trim().is_empty())
                .cloned()
                .collect(),
            method: self.method,
            post_header: to_map(&self.headers),
            post_body,
            standard_response: to_map(&self.standard_response),
        };
        input.validate()?;
        Ok(input)
    }
}

/// Product form state. Suppliers are selected by id; the total cost follows
/// the selection.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ProductDraft {
    pub id: Option<u64>,
    pub name: String,
    pub total_price: f64,
    /// Selected supplier ids, in the order they were picked.
    pub supplier_ids: Vec<u64>,
    pub standard_response: KeyValueList,
}

impl ProductDraft {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_product(product: &Product) -> Self {
        Self {
            id: Some(product.id),
            name: product.name.clone(),
            total_price: product.total_price,
            supplier_ids: product.supplier_list.iter().map(|s| s.id).collect(),
            standard_response: to_list(product.standard_response.as_ref()),
        }
    }

    /// Select `id` if it is not selected, deselect it otherwise. Returns
    /// whether it is selected afterwards.
    pub fn toggle_supplier(&mut self, id: u64) -> bool {
        if let Some(pos) = self.supplier_ids.iter().position(|&s| s == id) {
            self.supplier_ids.remove(pos);
            false
        } else {
            self.supplier_ids.push(id);
            true
        }
    }

    pub fn is_selected(&self, id: u64) -> bool {
        self.supplier_ids.contains(&id)
    }

    /// Sum of `cost_per_request` over the selected suppliers found in
    /// `available`. Ids missing from `available` add nothing.
    pub fn total_cost(&self, available: &[Supplier]) -> f64 {
        self.supplier_ids
            .iter()
            .filter_map(|id| available.iter().find(|s| s.id == *id))
            .map(|s| s.cost_per_request)
            .sum()
    }

    /// Build the create/update payload, pricing the selection against
    /// `available`. An empty standard-response list is sent as `null`.
    pub fn to_input(&self, available: &[Supplier]) -> Result<ProductInput, ApiError> {
        let input = ProductInput {
            id: self.id,
            name: self.name.clone(),
            total_price: self.total_price,
            total_cost: self.total_cost(available),
            supplier_ids: self.supplier_ids.clone(),
            standard_response: to_map(&self.standard_response),
        };
        input.validate()?;
        Ok(input)
    }
}

fn to_list(map: Option<&IndexMap<String, String>>) -> KeyValueList {
    map.map(|m| m.iter().map(|(k, v)| (k.as_str(), v.as_str())).collect())
        .unwrap_or_default()
}

fn to_map(list: &KeyValueList) -> Option<IndexMap<String, String>> {
    (!list.is_empty()).then(|| list.to_text_map())
}
