use crate::catalog::{self, CatalogApi, GoogleBooksClient};
use crate::models::SearchResultItem;
use crate::state::{DetailState, SearchState};
use crate::views;
use anyhow::{Context, Result};
use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::{Html, IntoResponse, Response},
    routing::get,
    Json, Router,
};
use serde::Deserialize;
use serde_json::json;
use std::{env, net::SocketAddr, sync::Arc};
use tower_http::trace::TraceLayer;
use tracing::{debug, info, warn};

const DEFAULT_BIND_ADDR: &str = "0.0.0.0:3146";

#[derive(Clone)]
pub struct AppState {
    pub catalog: Arc<dyn CatalogApi>,
}

#[derive(Debug, Default, Deserialize)]
pub struct SearchParams {
    #[serde(default)]
    pub q: Option<String>,
}

pub async fn run_server() -> Result<()> {
    let client = GoogleBooksClient::from_env()?;
    info!("Using catalog at {}", client.base_url());
    let catalog: Arc<dyn CatalogApi> = Arc::new(client);

    let addr = bind_addr()?;
    let app = build_router(AppState { catalog });

    info!("Listening on {}", addr);
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("Failed to bind {}", addr))?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;
    Ok(())
}

fn bind_addr() -> Result<SocketAddr> {
    let raw = env::var("BIND_ADDR")
        .ok()
        .filter(|s| !s.trim().is_empty())
        .unwrap_or_else(|| DEFAULT_BIND_ADDR.to_string());
    raw.trim()
        .parse()
        .with_context(|| format!("Invalid BIND_ADDR '{}'", raw))
}

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/", get(search_page))
        .route("/book/:id", get(book_page))
        .route("/api/search", get(search_api))
        .route("/api/book/:id", get(book_api))
        .route("/health", get(health))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

async fn health() -> &'static str {
    "OK"
}

async fn search_page(
    State(state): State<AppState>,
    Query(params): Query<SearchParams>,
) -> Html<String> {
    let view = run_search(&state, params.q.as_deref().unwrap_or_default()).await;
    Html(views::search_page(&view))
}

async fn search_api(
    State(state): State<AppState>,
    Query(params): Query<SearchParams>,
) -> Json<Vec<SearchResultItem>> {
    let view = run_search(&state, params.q.as_deref().unwrap_or_default()).await;
    Json(view.books)
}

async fn book_page(State(state): State<AppState>, Path(id): Path<String>) -> Response {
    match load_book(&state, &id).await.into_book() {
        Some(book) => Html(views::book_page(&book)).into_response(),
        None => (StatusCode::NOT_FOUND, Html(views::not_found_page())).into_response(),
    }
}

async fn book_api(State(state): State<AppState>, Path(id): Path<String>) -> Response {
    match load_book(&state, &id).await.into_book() {
        Some(book) => Json(book).into_response(),
        None => (
            StatusCode::NOT_FOUND,
            Json(json!({"status": "error", "message": views::NOT_FOUND_TEXT})),
        )
            .into_response(),
    }
}

// One search per request. Catalog failures collapse into an empty result list.
async fn run_search(state: &AppState, query: &str) -> SearchState {
    let mut view = SearchState::new();
    let Some(ticket) = view.begin(query) else {
        return view;
    };

    match state.catalog.search(query, catalog::MAX_RESULTS).await {
        Ok(items) => {
            let books = catalog::dedupe_and_cap(&items);
            info!(
                "Search '{}' returned {} items ({} shown)",
                query,
                items.len(),
                books.len()
            );
            view.complete(ticket, books);
        }
        Err(e) => {
            warn!("Error fetching books for '{}': {:?}", query, e);
            view.fail(ticket);
        }
    }
    view
}

async fn load_book(state: &AppState, id: &str) -> DetailState {
    let mut view = DetailState::new();
    let ticket = view.begin(id);
    let book = match state.catalog.fetch_volume(id).await {
        Ok(Some(volume)) => {
            let book = catalog::display_book(volume);
            if book.is_none() {
                debug!("Volume {} has no title", id);
            }
            book
        }
        Ok(None) => {
            debug!("Volume {} has no volumeInfo", id);
            None
        }
        Err(e) => {
            warn!("Error fetching book data for {}: {:?}", id, e);
            None
        }
    };
    view.complete(ticket, book);
    view
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            warn!("Failed to install Ctrl+C handler: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        use tokio::signal::unix::{signal, SignalKind};
        match signal(SignalKind::terminate()) {
            Ok(mut term) => {
                term.recv().await;
            }
            Err(e) => {
                warn!("Failed to install SIGTERM handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            info!("Shutdown signal received (Ctrl+C)");
        }
        _ = terminate => {
            info!("Shutdown signal received (SIGTERM)");
        }
    }
}
