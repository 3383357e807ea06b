//! TopHeader component - application top bar.
//!
//! Holds the sidebar toggle, the business name and the title of the
//! current page.

use crate::layout::global_context::AppGlobalContext;
use crate::layout::registry::page_label;
use crate::shared::export::COMPANY_NAME;
use crate::shared::icons::icon;
use leptos::prelude::*;

#[component]
pub fn TopHeader() -> impl IntoView {
    let ctx = use_context::<AppGlobalContext>().unwrap_or_else(|| {
        log::warn!("AppGlobalContext not provided, header is detached");
        AppGlobalContext::new()
    });

    let is_sidebar_visible = move || ctx.left_open.get();

    view! {
        <div class="top-header">
            <div class="top-header__brand">
                <button
                    class="top-header__icon-btn"
                    on:click=move |_| ctx.toggle_left()
                    title=move || if is_sidebar_visible() { "Ocultar menú" } else { "Mostrar menú" }
                >
                    {icon("menu")}
                </button>
                <span class="top-header__title">{COMPANY_NAME}</span>
            </div>
            <div class="top-header__page">
                {move || page_label(&ctx.active.get())}
            </div>
        </div>
    }
}
