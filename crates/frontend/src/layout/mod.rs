pub mod global_context;
pub mod left;
pub mod registry;
pub mod top_header;

use global_context::AppGlobalContext;
use leptos::prelude::*;
use top_header::TopHeader;

/// Main application shell.
///
/// ```text
/// +------------------------------------------+
/// |              TopHeader                   |
/// +------------------------------------------+
/// |  Sidebar  |         Active page          |
/// +------------------------------------------+
/// ```
#[component]
pub fn Shell() -> impl IntoView {
    let ctx = use_context::<AppGlobalContext>().unwrap_or_else(|| {
        log::warn!("AppGlobalContext not provided, using a detached one");
        AppGlobalContext::new()
    });

    // Runs once when the shell is created
    ctx.init_router_integration();

    view! {
        <div class="app-layout">
            <TopHeader />

            <div class="app-body">
                <left::Left ctx=ctx>
                    <left::Sidebar />
                </left::Left>

                <div data-zone="center" class="app-main">
                    // Re-rendered on navigation; the old page's cleanup stops its refresh loop
                    {move || registry::render_page(&ctx.active.get())}
                </div>
            </div>
        </div>
    }
}
