//! HTTP Handlers
//!
//! The alert form and its submission endpoint, plus health probes. The form
//! posts back with the same query string so the product context survives the
//! round trip.

use std::collections::HashMap;

use axum::extract::{Query, RawQuery, State};
use axum::http::StatusCode;
use axum::response::Html;
use axum::{Form, Json};
use serde::Deserialize;
use serde_json::json;
use tracing::error;

use crate::application::recorder::IntakeError;
use crate::domain::context::RequestContext;
use crate::domain::header::product_label;
use crate::domain::price::PriceInput;
use crate::AppState;

/// Alert form submission. The price arrives as typed, unparsed.
#[derive(Debug, Deserialize)]
pub struct AlertForm {
    pub email: String,
    pub price: String,
}

/// Landing page with the dynamic product header and the alert form.
pub async fn show_form(
    RawQuery(raw_query): RawQuery,
    Query(params): Query<HashMap<String, String>>,
) -> Html<String> {
    let ctx = RequestContext::new(params);
    let label = product_label(Some(&ctx));
    Html(render_page(&label, raw_query.as_deref(), None))
}

/// Record a submitted alert and re-render the page with the outcome.
///
/// A rejected price is an ordinary page state, not an HTTP error; only a
/// store failure turns into a 500.
pub async fn submit_alert(
    State(state): State<AppState>,
    RawQuery(raw_query): RawQuery,
    Query(params): Query<HashMap<String, String>>,
    Form(form): Form<AlertForm>,
) -> (StatusCode, Html<String>) {
    let ctx = RequestContext::new(params);
    let label = product_label(Some(&ctx));

    match state
        .recorder
        .record(&form.email, PriceInput::from(form.price), Some(&ctx))
        .await
    {
        Ok(confirmation) => (
            StatusCode::OK,
            Html(render_page(&label, raw_query.as_deref(), Some(&confirmation))),
        ),
        Err(err) => {
            let status = match err {
                IntakeError::Validation(_) => StatusCode::OK,
                IntakeError::Persistence(_) => {
                    error!("Alert submission failed: {}", err);
                    StatusCode::INTERNAL_SERVER_ERROR
                }
            };
            let message = format!("No se pudo registrar la alerta: {}", err);
            (
                status,
                Html(render_page(&label, raw_query.as_deref(), Some(&message))),
            )
        }
    }
}

/// Process liveness.
pub async fn health() -> Json<serde_json::Value> {
    Json(json!({ "status": "ok" }))
}

/// Store liveness, probed with a trivial query.
pub async fn health_db(State(state): State<AppState>) -> (StatusCode, Json<serde_json::Value>) {
    match sqlx::query_scalar::<_, i64>("SELECT 1")
        .fetch_one(&state.pool)
        .await
    {
        Ok(_) => (StatusCode::OK, Json(json!({ "database": "ok" }))),
        Err(e) => {
            error!("Database health check failed: {}", e);
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(json!({ "database": format!("error: {}", e) })),
            )
        }
    }
}

fn render_page(label: &str, raw_query: Option<&str>, status: Option<&str>) -> String {
    let action = match raw_query {
        Some(q) if !q.is_empty() => format!("/alerta?{}", escape_html(q)),
        _ => "/alerta".to_string(),
    };
    let status_block = match status {
        Some(text) => format!("<p id=\"status\">{}</p>\n", escape_html(text)),
        None => String::new(),
    };

    format!(
        "<!doctype html>\n\
         <html lang=\"es\">\n\
         <head><meta charset=\"utf-8\"><title>Alerta de precio</title></head>\n\
         <body>\n\
         <h2>Alerta de precio para <strong>{label}</strong></h2>\n\
         <form method=\"post\" action=\"{action}\">\n\
         <label for=\"email\">Correo electrónico</label>\n\
         <input id=\"email\" name=\"email\" type=\"text\" placeholder=\"tucorreo@ejemplo.com\">\n\
         <label for=\"price\">Precio objetivo (€)</label>\n\
         <input id=\"price\" name=\"price\" type=\"number\" min=\"0\" step=\"0.01\">\n\
         <button type=\"submit\">Registrar alerta</button>\n\
         </form>\n\
         {status_block}\
         </body>\n\
         </html>\n",
        label = escape_html(label),
        action = action,
        status_block = status_block,
    )
}

fn escape_html(value: &str) -> String {
    let mut escaped = String::with_capacity(value.len());
    for c in value.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            _ => escaped.push(c),
        }
    }
    escaped
}
