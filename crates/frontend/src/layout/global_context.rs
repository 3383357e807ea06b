use crate::layout::registry::{is_known_page, DEFAULT_PAGE};
use leptos::prelude::Effect;
use leptos::prelude::*;
use std::collections::HashMap;
use web_sys::window;

#[derive(Clone, Copy)]
pub struct AppGlobalContext {
    /// Key of the page shown in the main area
    pub active: RwSignal<String>,
    pub left_open: RwSignal<bool>,
}

impl Default for AppGlobalContext {
    fn default() -> Self {
        Self::new()
    }
}

impl AppGlobalContext {
    pub fn new() -> Self {
        Self {
            active: RwSignal::new(DEFAULT_PAGE.to_string()),
            left_open: RwSignal::new(true),
        }
    }

    /// Restore the page from `?active=` and keep the URL in sync afterwards
    pub fn init_router_integration(&self) {
        let search = window()
            .and_then(|w| w.location().search().ok())
            .unwrap_or_default();
        if let Some(active_key) = active_from_query(&search) {
            self.activate(&active_key);
        }

        let this = *self;
        Effect::new(move |_| {
            let new_url = query_for(&this.active.get());

            let current_search = window()
                .and_then(|w| w.location().search().ok())
                .unwrap_or_default();

            // Only update URL if it actually changed
            if current_search != new_url {
                if let Some(w) = window() {
                    if let Ok(history) = w.history() {
                        let _ = history.replace_state_with_url(
                            &wasm_bindgen::JsValue::NULL,
                            "",
                            Some(&new_url),
                        );
                    }
                }
            }
        });
    }

    /// Switch pages; unknown keys are ignored
    pub fn activate(&self, key: &str) {
        if !is_known_page(key) {
            log::warn!("Unknown page '{}', staying on the current one", key);
            return;
        }
        log::debug!("activate page: {}", key);
        self.active.set(key.to_string());
    }

    pub fn toggle_left(&self) {
        self.left_open.update(|val| *val = !*val);
    }
}

/// Value of `active` in a `?a=b&...` query string
pub fn active_from_query(search: &str) -> Option<String> {
    let params: HashMap<String, String> =
        serde_qs::from_str(search.trim_start_matches('?')).unwrap_or_default();
    params.get("active").cloned().filter(|key| !key.is_empty())
}

/// Query string that selects `key`, with the leading `?`
pub fn query_for(key: &str) -> String {
    let query_string =
        serde_qs::to_string(&HashMap::from([("active".to_string(), key.to_string())]))
            .unwrap_or_default();
    format!("?{}", query_string)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_active_from_query() {
        assert_eq!(active_from_query("?active=a006_sale").as_deref(), Some("a006_sale"));
        assert_eq!(
            active_from_query("?x=1&active=a002_client").as_deref(),
            Some("a002_client")
        );
        assert_eq!(active_from_query(""), None);
        assert_eq!(active_from_query("?active="), None);
    }

    #[test]
    fn test_query_round_trip() {
        let query = query_for("a009_audit_log");
        assert_eq!(query, "?active=a009_audit_log");
        assert_eq!(active_from_query(&query).as_deref(), Some("a009_audit_log"));
    }

    #[test]
    fn test_unknown_page_is_ignored() {
        let ctx = AppGlobalContext::new();
        ctx.activate("a004_product");
        ctx.activate("d400_monthly_summary");
        assert_eq!(ctx.active.get_untracked(), "a004_product");
    }
}
