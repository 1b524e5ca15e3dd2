use crate::application::operation::Operation;
use crate::errors::RelayError;
use relay_types::domain::envelope::Envelope;
use relay_types::domain::lookup::{self, ORDER_BODY, ORDER_ID};
use relay_types::domain::tenant::TenantContext;
use relay_types::domain::text::{truncate_chars, ERROR_BODY_LIMIT, LOG_BODY_LIMIT};
use relay_types::ports::upstream::{Endpoint, UpstreamApi, UpstreamRequest};
use serde_json::{json, Value};

/// Page size requested from the unit-of-measure search.
const UOM_PAGE_SIZE: u32 = 200;

/// Authenticates against, and forwards tenant-scoped calls to, the upstream.
pub struct RelayService<U: UpstreamApi> {
    upstream: U,
}

fn tenant(org: &str, token: &str) -> Result<TenantContext, RelayError> {
    TenantContext::parse(org, token).ok_or(RelayError::Missing("ORG and token"))
}

fn required<'a>(value: &'a str, field: &'static str) -> Result<&'a str, RelayError> {
    let value = value.trim();
    if value.is_empty() {
        return Err(RelayError::Missing(field));
    }
    Ok(value)
}

impl<U: UpstreamApi> RelayService<U> {
    pub fn new(upstream: U) -> Self {
        Self { upstream }
    }

    pub async fn authenticate(&self, org: &str) -> Result<Envelope, RelayError> {
        let org = required(org, "ORG")?;
        tracing::info!(%org, "authenticating");
        match self.upstream.request_token(org).await {
            Ok(Some(token)) => {
                tracing::info!(%org, "authenticated");
                Ok(Envelope::ok().with("token", token))
            }
            Ok(None) => {
                tracing::warn!(%org, "authentication refused");
                Err(RelayError::AuthFailed)
            }
            Err(e) => {
                tracing::warn!(%org, error = %e, "authentication failed");
                Err(RelayError::AuthFailed)
            }
        }
    }

    pub async fn find_order(
        &self,
        org: &str,
        token: &str,
        order_number: &str,
    ) -> Result<Envelope, RelayError> {
        let tenant = tenant(org, token)?;
        let order_number = required(order_number, "Order number")?;
        let request = UpstreamRequest {
            endpoint: Endpoint::OrderById(order_number.to_string()),
            tenant,
            body: None,
        };

        let op = Operation::FindOrder;
        let body = self.relay(op, request).await?.ok_or(RelayError::InvalidFormat(op))?;
        let order = lookup::first_present(&body, ORDER_BODY)
            .filter(|order| lookup::is_truthy(order))
            .cloned()
            .ok_or(RelayError::OrderNotFound)?;

        tracing::info!(%order_number, "order found");
        Ok(Envelope::ok()
            .with("orderData", order)
            .with("orderNumber", order_number))
    }

    pub async fn validate_items(
        &self,
        org: &str,
        token: &str,
        query: &str,
    ) -> Result<Envelope, RelayError> {
        let tenant = tenant(org, token)?;
        let query = required(query, "Query")?;
        let request = UpstreamRequest {
            endpoint: Endpoint::ItemSearch,
            tenant,
            body: Some(json!({ "Query": query })),
        };

        let items = self.search(Operation::ValidateItems, request).await?;
        tracing::info!(count = items.len(), "items validated");
        Ok(list_envelope(items))
    }

    pub async fn create_order(
        &self,
        org: &str,
        token: &str,
        order: Value,
    ) -> Result<Envelope, RelayError> {
        let tenant = tenant(org, token)?;
        if !lookup::is_truthy(&order) {
            return Err(RelayError::Missing("Order data"));
        }
        let request = UpstreamRequest {
            endpoint: Endpoint::CreateOrder,
            tenant,
            body: Some(order),
        };

        let message = "Order created successfully";
        // Some successful creates come back with an empty body.
        let Some(response) = self.relay(Operation::CreateOrder, request).await? else {
            tracing::info!("order created, no response body");
            return Ok(Envelope::ok().with("message", message));
        };

        let order_id = lookup::first_truthy(&response, ORDER_ID)
            .cloned()
            .unwrap_or(Value::Null);
        tracing::info!(order_id = %order_id, "order created");
        Ok(Envelope::ok()
            .with("orderId", order_id)
            .with("response", response)
            .with("message", message))
    }

    pub async fn bulk_import_orders(
        &self,
        org: &str,
        token: &str,
        orders: Value,
    ) -> Result<Envelope, RelayError> {
        let tenant = tenant(org, token)?;
        let orders = match orders {
            Value::Array(orders) if !orders.is_empty() => orders,
            _ => return Err(RelayError::Missing("Orders data array")),
        };
        let count = orders.len();
        let request = UpstreamRequest {
            endpoint: Endpoint::BulkImport,
            tenant,
            body: Some(json!({ "Data": orders })),
        };

        let Some(response) = self.relay(Operation::BulkImport, request).await? else {
            tracing::info!(count, "orders imported, no response body");
            return Ok(Envelope::ok().with("message", "Orders imported successfully"));
        };

        tracing::info!(count, "orders imported");
        Ok(Envelope::ok()
            .with("response", response)
            .with("message", format!("Successfully imported {count} orders")))
    }

    pub async fn search_uoms(&self, org: &str, token: &str) -> Result<Envelope, RelayError> {
        let tenant = tenant(org, token)?;
        let request = UpstreamRequest {
            endpoint: Endpoint::UomSearch,
            tenant,
            body: Some(json!({
                "Query": "",
                "Size": UOM_PAGE_SIZE,
                "Template": {
                    "UnitOfMeasureId": null,
                    "UomCode": null,
                    "Description": null
                }
            })),
        };

        let uoms = self.search(Operation::SearchUoms, request).await?;
        tracing::info!(count = uoms.len(), "uoms found");
        Ok(list_envelope(uoms))
    }

    async fn search(
        &self,
        op: Operation,
        request: UpstreamRequest,
    ) -> Result<Vec<Value>, RelayError> {
        let body = self
            .relay(op, request)
            .await?
            .ok_or(RelayError::InvalidFormat(op))?;
        Ok(lookup::extract_list(&body))
    }

    /// Sends one request and checks its status.
    ///
    /// Returns the parsed body, or `None` when a 2xx body is not JSON; each
    /// operation decides what an unreadable success means.
    async fn relay(
        &self,
        op: Operation,
        request: UpstreamRequest,
    ) -> Result<Option<Value>, RelayError> {
        let operation = op.as_str();
        let endpoint = request.endpoint.path();
        tracing::debug!(
            operation,
            method = ?request.endpoint.method(),
            %endpoint,
            tenant = ?request.tenant,
            payload = ?request
                .body
                .as_ref()
                .map(|b| truncate_chars(&b.to_string(), LOG_BODY_LIMIT).into_owned()),
            "upstream request"
        );

        let response = self.upstream.send(request).await.map_err(|source| {
            tracing::warn!(operation, %endpoint, error = %source, "upstream call failed");
            RelayError::Transport { op, source }
        })?;

        tracing::debug!(
            operation,
            status = response.status,
            body = %truncate_chars(&response.body, LOG_BODY_LIMIT),
            "upstream response"
        );

        if !response.is_success() {
            let body = truncate_chars(&response.body, ERROR_BODY_LIMIT).into_owned();
            tracing::warn!(operation, status = response.status, %body, "upstream rejected call");
            return Err(RelayError::Upstream {
                op,
                status: response.status,
                body,
            });
        }

        match serde_json::from_str(&response.body) {
            Ok(value) => Ok(Some(value)),
            Err(e) => {
                tracing::debug!(operation, error = %e, "upstream body is not json");
                Ok(None)
            }
        }
    }
}

fn list_envelope(items: Vec<Value>) -> Envelope {
    let count = items.len();
    Envelope::ok()
        .with("data", items.clone())
        .with("Data", items)
        .with("count", count)
}
