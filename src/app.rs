use std::net::SocketAddr;
use std::time::Duration;

use axum::{routing::get, Router};
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::Span;

use crate::state::AppState;
use crate::{auth, bookings, restaurants, tables, timeslots};

fn api_router() -> Router<AppState> {
    Router::new()
        .merge(auth::router())
        .merge(restaurants::router())
        .merge(tables::router())
        .merge(timeslots::router())
        .merge(bookings::router())
        .route("/health", get(health))
}

async fn health() -> &'static str {
    "ok"
}

pub fn build_app(state: AppState) -> Router {
    Router::new()
        .nest("/api/v1", api_router())
        .with_state(state)
        .layer(CorsLayer::permissive())
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(|req: &axum::http::Request<_>| {
                    tracing::info_span!("request", method = %req.method(), uri = %req.uri())
                })
                .on_response(
                    |res: &axum::http::Response<_>, latency: Duration, _span: &Span| {
                        let status = res.status();
                        if status.is_server_error() {
                            tracing::error!(%status, ?latency, "request failed");
                        } else {
                            tracing::info!(%status, ?latency, "request served");
                        }
                    },
                ),
        )
}

pub async fn serve(app: Router, addr: SocketAddr) -> anyhow::Result<()> {
    tracing::info!(%addr, "listening");
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;
    Ok(())
}
