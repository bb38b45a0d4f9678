//! The endpoint URIs.
//!
//! For endpoints that take a parameter, e.g., '/stores/{store_id}/edit', use [format_endpoint].

use std::fmt::Display;

/// The page listing every store.
pub const ROOT: &str = "/";
/// The page listing the stores in one category.
pub const CATEGORY_VIEW: &str = "/{category}";
/// The page for adding a new store.
pub const NEW_STORE_VIEW: &str = "/stores/new";
/// The page for editing an existing store.
pub const EDIT_STORE_VIEW: &str = "/stores/{store_id}/edit";
/// The page to display when an internal server error occurs.
pub const INTERNAL_ERROR_VIEW: &str = "/error";
/// The route for static files.
pub const STATIC: &str = "/static";

/// The route to create a store.
pub const POST_STORE: &str = "/api/stores";
/// The route to update a store.
pub const PUT_STORE: &str = "/api/stores/{store_id}";
/// The route that renders the store type select for a category.
pub const STORE_TYPE_OPTIONS: &str = "/api/stores/type_options";
/// The route that renders the store card for the unsaved store form.
pub const STORE_PREVIEW: &str = "/api/stores/preview";
/// The route that checks a single required field of the store form.
pub const VALIDATE_STORE_FIELD: &str = "/api/stores/validate/{field}";

/// Replace the parameter in `endpoint_path` with `value`.
///
/// A parameter is a string that starts with a left brace, followed by
/// lowercase letters or underscores, and ends with a right brace.
/// For example, in the endpoint path '/stores/{store_id}/edit', '{store_id}' is the parameter.
///
/// This function assumes that an endpoint path only contains ASCII characters
/// and a single parameter.
///
/// If no parameter is found in `endpoint_path`, the function returns the
/// the original `endpoint_path`.
pub fn format_endpoint(endpoint_path: &str, value: impl Display) -> String {
    let param_start = match endpoint_path.find('{') {
        Some(start) => start,
        None => return endpoint_path.to_string(),
    };

    let param_end = endpoint_path[param_start..]
        .find('}')
        .map(|end| param_start + end + 1)
        .unwrap_or(endpoint_path.len());

    format!(
        "{}{}{}",
        &endpoint_path[..param_start],
        value,
        &endpoint_path[param_end..]
    )
}
