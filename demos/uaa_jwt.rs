//! Run with
//!
//! ```not_rust
//! OAUTH2_SIGNATURE_VERIFICATION_PUBLIC_KEY_ENDPOINT_URI=http://localhost:9999/oauth/token_key \
//!     cargo run --example uaa_jwt --features="axum"
//! ```
//!

use std::{net::SocketAddr, time::Duration};

use anyhow::Context;
use axum::{response::IntoResponse, routing::get, Extension, Json, Router};
use reqwest::Client;
use serde::{Deserialize, Serialize};
use tokio::net::TcpListener;
use tower_http::trace::{DefaultMakeSpan, DefaultOnResponse, TraceLayer};
use tracing_subscriber::EnvFilter;
use uaa_signature_verifier::{
    authorize::{AuthorizationLayerExt, UaaJwtAuthorizer},
    client::UaaSignatureVerifierClient,
    config::OAuth2Properties,
    discovery::StaticDiscoveryClient,
    transport::ReqwestJsonTransport,
    verifier::Validation,
};

const DEFAULT_LISTEN_ADDR: &str = "127.0.0.1:5000";

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    pub user_name: String,
    pub client_id: String,
    #[serde(default)]
    pub scope: Vec<String>,
    #[serde(default)]
    pub authorities: Vec<String>,
}

async fn claims(Extension(claims): Extension<Claims>) -> impl IntoResponse {
    Json(claims)
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new("uaa_jwt=trace,uaa_signature_verifier=trace,tower_http=debug")
        }))
        .try_init()
        .map_err(|err| anyhow::anyhow!("Failed to set global tracing subscriber: {err}"))?;

    let properties = OAuth2Properties::from_lookup(|name| dotenvy::var(name).ok());

    let aud = dotenvy::var("AUD").unwrap_or_else(|_| String::from("accounting"));

    tracing::info!(?properties, %aud);

    let http_client = Client::builder()
        .timeout(Duration::from_secs(5))
        .build()
        .context("Failed to build http client")?;

    let client = UaaSignatureVerifierClient::new(
        &StaticDiscoveryClient::new(&["uaa"]),
        ReqwestJsonTransport::new(http_client),
        properties,
    )
    .await;

    let authorization =
        UaaJwtAuthorizer::<_, Claims>::new(client, Validation::new().aud(&[aud])).into_layer();

    let app = Router::new()
        // curl -H "Authorization: Bearer <token>" localhost:5000
        .route("/", get(claims))
        .layer(authorization)
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(DefaultMakeSpan::new().level(tracing::Level::INFO))
                .on_response(DefaultOnResponse::new().level(tracing::Level::INFO)),
        );

    let socket_addr = dotenvy::var("LISTEN_ADDR")
        .unwrap_or_else(|_| String::from(DEFAULT_LISTEN_ADDR))
        .parse::<SocketAddr>()
        .context("Invalid LISTEN_ADDR")?;

    tracing::info!(%socket_addr, "Starting server");

    let listener = TcpListener::bind(&socket_addr)
        .await
        .context("Bind failed")?;

    axum::serve(listener, app)
        .with_graceful_shutdown(async {
            tokio::signal::ctrl_c().await.ok();
            tracing::info!("Shutting down");
        })
        .await
        .context("Server failed")
}
