//! Request and result types for domain queries.

use serde::{Deserialize, Serialize};

/// Body of `POST /domains/{domain}/schemas/`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuerySchemasRequest {
    pub offset: u32,
    pub limit: u32,
}

/// One page of schemas.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SchemaPage {
    #[serde(default)]
    pub schemas: Vec<serde_json::Value>,
    pub limit: u32,
    pub offset: u32,
    pub total: u32,
}

/// Status document of a domain. The shape is backend-defined.
pub type DomainStatus = serde_json::Value;
