use async_trait::async_trait;
use serde_json::Value;

use crate::domain::tenant::TenantContext;

#[derive(thiserror::Error, Debug)]
pub enum UpstreamError {
    #[error("{0}")]
    Transport(String),
    #[error("invalid request: {0}")]
    InvalidRequest(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Method {
    Get,
    Post,
}

/// Upstream resources the relay forwards to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Endpoint {
    OrderById(String),
    CreateOrder,
    BulkImport,
    ItemSearch,
    UomSearch,
}

impl Endpoint {
    pub fn method(&self) -> Method {
        match self {
            Endpoint::OrderById(_) => Method::Get,
            _ => Method::Post,
        }
    }

    /// Unencoded path segments below the API base.
    pub fn segments(&self) -> Vec<&str> {
        match self {
            Endpoint::OrderById(number) => {
                vec!["dcorder", "api", "dcorder", "order", "orderId", number.as_str()]
            }
            Endpoint::CreateOrder => vec!["dcorder", "api", "dcorder", "order"],
            Endpoint::BulkImport => vec!["dcorder", "api", "dcorder", "order", "bulkImport"],
            Endpoint::ItemSearch => vec!["item-master", "api", "item-master", "item", "search"],
            Endpoint::UomSearch => vec![
                "item-master",
                "api",
                "item-master",
                "unitOfMeasure",
                "search",
            ],
        }
    }

    /// Slash-joined path, for logs.
    pub fn path(&self) -> String {
        format!("/{}", self.segments().join("/"))
    }
}

#[derive(Debug, Clone)]
pub struct UpstreamRequest {
    pub endpoint: Endpoint,
    pub tenant: TenantContext,
    pub body: Option<Value>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UpstreamResponse {
    pub status: u16,
    pub body: String,
}

impl UpstreamResponse {
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// The order-management API the relay talks to.
#[async_trait]
pub trait UpstreamApi: Send + Sync + 'static {
    /// Password-grant token for `org`; `Ok(None)` when the upstream refuses.
    async fn request_token(&self, org: &str) -> Result<Option<String>, UpstreamError>;

    /// Issues one tenant-scoped call and returns the raw status and body.
    async fn send(&self, request: UpstreamRequest) -> Result<UpstreamResponse, UpstreamError>;
}
