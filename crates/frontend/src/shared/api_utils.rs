//! API utilities for frontend-backend communication
//!
//! The backend publishes its API base at `GET /config/api-url` (plain text).
//! It is resolved once at startup; until then, and whenever the lookup
//! fails, [`FALLBACK_API_BASE`] is used.

use gloo_net::http::Request;
use once_cell::sync::OnceCell;

pub const CONFIG_ENDPOINT: &str = "/config/api-url";
pub const FALLBACK_API_BASE: &str = "/api";

static API_BASE: OnceCell<String> = OnceCell::new();

/// Get the base URL for API requests
///
/// # Example
/// ```rust,ignore
/// let url = format!("{}/clientes", api_base());
/// ```
pub fn api_base() -> String {
    API_BASE
        .get()
        .cloned()
        .unwrap_or_else(|| FALLBACK_API_BASE.to_string())
}

/// Build a full API URL from a path relative to the base
///
/// # Example
/// ```rust,ignore
/// let url = api_url("clientes/agregar_cliente");
/// ```
pub fn api_url(path: &str) -> String {
    join_url(&api_base(), path)
}

/// Resolve the API base from the backend; call once before mounting
pub async fn init_api_base() -> String {
    let base = choose_api_base(fetch_api_base().await);
    match API_BASE.set(base.clone()) {
        Ok(()) => log::info!("API base: {}", base),
        Err(_) => log::debug!("API base already set, keeping {}", api_base()),
    }
    api_base()
}

async fn fetch_api_base() -> Result<String, String> {
    let response = Request::get(CONFIG_ENDPOINT)
        .send()
        .await
        .map_err(|e| format!("Failed to send request: {}", e))?;

    if !response.ok() {
        return Err(format!("Config endpoint answered {}", response.status()));
    }

    response
        .text()
        .await
        .map_err(|e| format!("Failed to read response: {}", e))
}

/// Blank answers and failures fall back to [`FALLBACK_API_BASE`]
pub fn choose_api_base(fetched: Result<String, String>) -> String {
    match fetched {
        Ok(body) => {
            let base = body.trim().trim_end_matches('/');
            if base.is_empty() {
                log::warn!("Empty API base from {}, using {}", CONFIG_ENDPOINT, FALLBACK_API_BASE);
                FALLBACK_API_BASE.to_string()
            } else {
                base.to_string()
            }
        }
        Err(e) => {
            log::warn!("{}; using {}", e, FALLBACK_API_BASE);
            FALLBACK_API_BASE.to_string()
        }
    }
}

pub(crate) fn join_url(base: &str, path: &str) -> String {
    format!(
        "{}/{}",
        base.trim_end_matches('/'),
        path.trim_start_matches('/')
    )
}
