//! Request Context
//!
//! Query parameters of the page that opened the alert form. The context is
//! optional end to end: the recorder accepts `None` when it is driven outside
//! an interactive request, and a present context may still miss any
//! individual parameter.

use std::collections::HashMap;

/// Product identifier stored when the page carried none.
pub const UNKNOWN_PRODUCT_ID: &str = "UNKNOWN";

#[derive(Debug, Clone, Default)]
pub struct RequestContext {
    params: HashMap<String, String>,
}

impl RequestContext {
    pub fn new(params: HashMap<String, String>) -> Self {
        RequestContext { params }
    }

    pub fn param(&self, name: &str) -> Option<&str> {
        self.params.get(name).map(String::as_str)
    }
}

/// Product fields extracted from the page context, defaults already applied.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProductFields {
    pub product_id: String,
    pub product_title: String,
    pub product_url: String,
}

/// Extraction is field by field: a context that is present but misses some
/// parameters defaults only the missing ones.
pub fn product_fields(ctx: Option<&RequestContext>) -> ProductFields {
    match ctx {
        None => ProductFields {
            product_id: UNKNOWN_PRODUCT_ID.to_string(),
            product_title: String::new(),
            product_url: String::new(),
        },
        Some(ctx) => ProductFields {
            product_id: ctx
                .param("product_id")
                .unwrap_or(UNKNOWN_PRODUCT_ID)
                .to_string(),
            product_title: ctx.param("product_title").unwrap_or("").to_string(),
            product_url: ctx.param("product_url").unwrap_or("").to_string(),
        },
    }
}
