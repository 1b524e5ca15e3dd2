use axum::{
    extract::{rejection::JsonRejection, State},
    routing::post,
    serve, Json, Router,
};
use serde::Deserialize;
use serde_json::Value;
use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;
use tower_http::services::ServeFile;
use tower_http::trace::TraceLayer;
use uuid::Uuid;

use crate::application::relay_service::RelayService;
use crate::errors::RelayError;
use relay_types::domain::envelope::Envelope;
use relay_types::ports::upstream::UpstreamApi;

#[derive(Clone)]
pub struct HttpServerConfig {
    pub port: String,
    pub index_file: PathBuf,
}

#[derive(Clone)]
pub struct HttpServer<U>
where
    U: UpstreamApi,
{
    pub service: Arc<RelayService<U>>,
    pub config: HttpServerConfig,
}

#[derive(Deserialize, Default)]
#[serde(default)]
pub struct AuthRequest {
    pub org: String,
}

#[derive(Deserialize, Default)]
#[serde(default, rename_all = "camelCase")]
pub struct FindOrderRequest {
    pub org: String,
    pub token: String,
    pub order_number: String,
}

#[derive(Deserialize, Default)]
#[serde(default)]
pub struct ValidateItemsRequest {
    pub org: String,
    pub token: String,
    pub query: String,
}

#[derive(Deserialize, Default)]
#[serde(default, rename_all = "camelCase")]
pub struct CreateOrderRequest {
    pub org: String,
    pub token: String,
    pub order_data: Value,
}

#[derive(Deserialize, Default)]
#[serde(default, rename_all = "camelCase")]
pub struct BulkImportRequest {
    pub org: String,
    pub token: String,
    pub orders_data: Value,
}

#[derive(Deserialize, Default)]
#[serde(default)]
pub struct SearchUomsRequest {
    pub org: String,
    pub token: String,
}

type Relay<U> = State<Arc<RelayService<U>>>;
type EnvelopeResult = Result<Json<Envelope>, RelayError>;

fn payload<T>(body: Result<Json<T>, JsonRejection>) -> Result<T, RelayError> {
    body.map(|Json(p)| p)
        .map_err(|e| RelayError::BadRequest(e.body_text()))
}

impl<U> HttpServer<U>
where
    U: UpstreamApi,
{
    pub async fn new(service: RelayService<U>, config: HttpServerConfig) -> anyhow::Result<Self> {
        Ok(Self {
            service: Arc::new(service),
            config,
        })
    }

    pub fn router(&self) -> Router {
        let trace_layer = TraceLayer::new_for_http()
            .make_span_with(|request: &axum::extract::Request<_>| {
                let uri = request.uri().to_string();
                let request_id = Uuid::new_v4();
                tracing::info_span!(
                    "http_request",
                    %request_id,
                    method = %request.method(),
                    uri
                )
            })
            .on_request(
                |request: &axum::extract::Request<_>, span: &tracing::Span| {
                    tracing::info!(
                        parent: span,
                        method = %request.method(),
                        uri = %request.uri(),
                        "request"
                    );
                },
            )
            .on_response(
                |response: &axum::response::Response, latency: Duration, span: &tracing::Span| {
                    tracing::info!(
                        parent: span,
                        status = %response.status(),
                        latency_ms = %latency.as_millis(),
                        "response"
                    );
                },
            );

        Router::new()
            .route("/api/app_opened", post(app_opened))
            .route("/api/auth", post(auth::<U>))
            .route("/api/find_order", post(find_order::<U>))
            .route("/api/validate_items", post(validate_items::<U>))
            .route("/api/create_order", post(create_order::<U>))
            .route("/api/bulk_import_orders", post(bulk_import_orders::<U>))
            .route("/api/search_uoms", post(search_uoms::<U>))
            .fallback_service(ServeFile::new(&self.config.index_file))
            .layer(trace_layer)
            .with_state(self.service.clone())
    }

    pub async fn run(self) -> anyhow::Result<()> {
        let app = self.router();
        let addr: SocketAddr = format!("0.0.0.0:{}", self.config.port).parse()?;
        tracing::info!("starting relay on {}", addr);
        let listener = tokio::net::TcpListener::bind(addr).await?;
        serve(listener, app.into_make_service()).await?;
        Ok(())
    }
}

async fn app_opened() -> Json<Envelope> {
    tracing::info!("order generator opened");
    Json(Envelope::ok())
}

async fn auth<U>(
    State(service): Relay<U>,
    body: Result<Json<AuthRequest>, JsonRejection>,
) -> EnvelopeResult
where
    U: UpstreamApi,
{
    let req = payload(body)?;
    Ok(Json(service.authenticate(&req.org).await?))
}

async fn find_order<U>(
    State(service): Relay<U>,
    body: Result<Json<FindOrderRequest>, JsonRejection>,
) -> EnvelopeResult
where
    U: UpstreamApi,
{
    let req = payload(body)?;
    let env = service
        .find_order(&req.org, &req.token, &req.order_number)
        .await?;
    Ok(Json(env))
}

async fn validate_items<U>(
    State(service): Relay<U>,
    body: Result<Json<ValidateItemsRequest>, JsonRejection>,
) -> EnvelopeResult
where
    U: UpstreamApi,
{
    let req = payload(body)?;
    let env = service
        .validate_items(&req.org, &req.token, &req.query)
        .await?;
    Ok(Json(env))
}

async fn create_order<U>(
    State(service): Relay<U>,
    body: Result<Json<CreateOrderRequest>, JsonRejection>,
) -> EnvelopeResult
where
    U: UpstreamApi,
{
    let req = payload(body)?;
    let env = service
        .create_order(&req.org, &req.token, req.order_data)
        .await?;
    Ok(Json(env))
}

async fn bulk_import_orders<U>(
    State(service): Relay<U>,
    body: Result<Json<BulkImportRequest>, JsonRejection>,
) -> EnvelopeResult
where
    U: UpstreamApi,
{
    let req = payload(body)?;
    let env = service
        .bulk_import_orders(&req.org, &req.token, req.orders_data)
        .await?;
    Ok(Json(env))
}

async fn search_uoms<U>(
    State(service): Relay<U>,
    body: Result<Json<SearchUomsRequest>, JsonRejection>,
) -> EnvelopeResult
where
    U: UpstreamApi,
{
    let req = payload(body)?;
    Ok(Json(service.search_uoms(&req.org, &req.token).await?))
}
