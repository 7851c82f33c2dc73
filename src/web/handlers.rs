//! HTTP request handlers

use super::state::AppState;
use crate::display::{count_label, title};
use crate::results::{CompanyRecord, ErrorKind, SearchError, COLUMNS};
use crate::session::SearchOutcome;
use axum::{
    extract::{Query, State},
    http::StatusCode,
    response::{Html, IntoResponse, Redirect, Response},
    Json,
};
use serde::{Deserialize, Serialize};
use tera::Context;

/// Query parameters for search
#[derive(Debug, Deserialize)]
pub struct SearchParams {
    /// Search term
    pub q: Option<String>,
}

/// JSON body for a successful search
#[derive(Debug, Serialize)]
pub struct SearchResponse {
    pub query: String,
    pub count: usize,
    pub label: String,
    pub companies: Vec<CompanyRecord>,
}

/// JSON body for a failed request
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub kind: String,
    pub message: String,
}

/// Widget page
pub async fn index(State(state): State<AppState>) -> Response {
    render_widget(&state, None)
}

/// Run a search from the widget form, then show the widget
pub async fn search(
    State(state): State<AppState>,
    Query(params): Query<SearchParams>,
) -> Response {
    let term = params.q.unwrap_or_default();
    state.session.submit_search(&term).await;
    render_widget(&state, Some(term))
}

/// Clear results and go back to the widget
pub async fn clear(State(state): State<AppState>) -> Redirect {
    state.session.clear();
    Redirect::to("/")
}

/// JSON search
pub async fn api_search(
    State(state): State<AppState>,
    Query(params): Query<SearchParams>,
) -> Response {
    let term = params.q.unwrap_or_default();

    match state.session.submit_search(&term).await {
        SearchOutcome::Displayed(companies) => Json(SearchResponse {
            query: term.trim().to_string(),
            count: companies.len(),
            label: count_label(companies.len()),
            companies,
        })
        .into_response(),
        SearchOutcome::Failed(err) => error_response(&err),
        SearchOutcome::Superseded => (
            StatusCode::CONFLICT,
            Json(ErrorResponse {
                kind: "superseded".to_string(),
                message: "A newer search replaced this one".to_string(),
            }),
        )
            .into_response(),
    }
}

/// Connectivity test against the configured transport
pub async fn api_test(State(state): State<AppState>) -> Response {
    let config = state.session.configuration();
    match state.client.test_connection(&config).await {
        Ok(body) => Json(serde_json::json!({
            "ok": true,
            "transport": config.transport_mode,
            "response": body,
        }))
        .into_response(),
        Err(err) => error_response(&err),
    }
}

/// Hand the current results to the host
pub async fn api_submit(State(state): State<AppState>) -> Response {
    let submission = state.session.submission();
    tracing::info!(
        "Submission for '{}' with {} companies",
        submission.search_term,
        submission.total_records
    );

    if let Some(ref variable) = state.settings.host.submission_variable {
        submission.publish(state.variables.as_ref(), variable);
    }

    Json(submission).into_response()
}

/// Session statistics
pub async fn stats(State(state): State<AppState>) -> impl IntoResponse {
    Json(state.session.metrics().snapshot())
}

/// Health check endpoint
pub async fn health() -> impl IntoResponse {
    "OK"
}

fn render_widget(state: &AppState, typed: Option<String>) -> Response {
    let snapshot = state.display.snapshot();
    let searched = state.session.current_term();
    let term = typed.or_else(|| searched.clone()).unwrap_or_default();

    let mut ctx = Context::new();
    ctx.insert("instance_name", state.instance_name());
    ctx.insert("title", &title(searched.as_ref().map(|_| snapshot.rows.len())));
    ctx.insert("count_label", &snapshot.count_label());
    ctx.insert("term", &term);
    ctx.insert("columns", &COLUMNS);
    ctx.insert("rows", &snapshot.rows);
    ctx.insert("status", &snapshot.status);

    match state.templates.render_with_context("widget.html", &ctx) {
        Ok(html) => Html(html).into_response(),
        Err(e) => {
            tracing::error!("Template error: {}", e);
            (StatusCode::INTERNAL_SERVER_ERROR, "Template error").into_response()
        }
    }
}

fn error_response(err: &SearchError) -> Response {
    let status = match err.kind() {
        ErrorKind::Validation => StatusCode::BAD_REQUEST,
        ErrorKind::Configuration => StatusCode::SERVICE_UNAVAILABLE,
        ErrorKind::Network | ErrorKind::Remote => StatusCode::BAD_GATEWAY,
    };

    (
        status,
        Json(ErrorResponse {
            kind: err.kind().as_str().to_string(),
            message: err.to_string(),
        }),
    )
        .into_response()
}
