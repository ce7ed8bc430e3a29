//! Stub field service: acknowledges and echoes every submitted field

use anyhow::Result;
use axum::{routing::post, Json, Router};
use serde_json::{json, Value};
use std::net::SocketAddr;
use tokio::net::TcpListener;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

const PORT: u16 = 4000;

async fn receive_field(Json(body): Json<Value>) -> Json<Value> {
    tracing::debug!("Received field data: {}", body);
    Json(json!({
        "message": "Field data received successfully!",
        "data": body,
    }))
}

fn router() -> Router {
    Router::new()
        .route("/api/fields", post(receive_field))
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "field_echo=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let addr = SocketAddr::from(([127, 0, 0, 1], PORT));
    let listener = TcpListener::bind(addr).await?;
    tracing::info!("Server running at http://localhost:{}", PORT);

    axum::serve(listener, router()).await?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[tokio::test]
    async fn test_echoes_body_with_acknowledgement() {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, router()).await.unwrap();
        });

        let body = json!({ "label": "Color", "choices": ["a", "b"] });
        let reply: Value = reqwest::Client::new()
            .post(format!("http://{addr}/api/fields"))
            .json(&body)
            .send()
            .await
            .unwrap()
            .json()
            .await
            .unwrap();

        assert_eq!(reply["message"], "Field data received successfully!");
        assert_eq!(reply["data"], body);
    }

    #[tokio::test]
    async fn test_rejects_non_json_body() {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, router()).await.unwrap();
        });

        let status = reqwest::Client::new()
            .post(format!("http://{addr}/api/fields"))
            .body("not json")
            .send()
            .await
            .unwrap()
            .status();

        assert!(status.is_client_error());
    }
}
