use crate::layout::global_context::AppGlobalContext;
use leptos::prelude::*;

/// Collapsible left zone
#[component]
pub fn Left(ctx: AppGlobalContext, children: Children) -> impl IntoView {
    let is_open = move || ctx.left_open.get();

    view! {
        <div data-zone="left" class="left" class:hidden=move || !is_open()>
            {children()}
        </div>
    }
}
