//! Product label shown in the page header.

use crate::domain::context::RequestContext;

/// Placeholder used when the page carries no product identifier at all.
pub const GENERIC_PRODUCT_ID: &str = "Producto";

/// Title when present and non-empty, otherwise `ID <product_id>`.
pub fn product_label(ctx: Option<&RequestContext>) -> String {
    let (id, title) = match ctx {
        None => (None, None),
        Some(ctx) => (ctx.param("product_id"), ctx.param("product_title")),
    };

    match title {
        Some(title) if !title.is_empty() => title.to_string(),
        _ => format!("ID {}", id.unwrap_or(GENERIC_PRODUCT_ID)),
    }
}
