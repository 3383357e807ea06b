use crate::layout::global_context::AppGlobalContext;
use crate::layout::Shell;
use crate::shared::notifications::{NotificationHost, NotificationService};
use leptos::prelude::*;

#[component]
pub fn App() -> impl IntoView {
    // Provide the AppGlobalContext store to the whole app via context.
    provide_context(AppGlobalContext::new());

    // One toast stack and confirm dialog shared by every page
    let notifications = NotificationService::new();
    provide_context(notifications);

    view! {
        <Shell />
        <NotificationHost service=notifications />
    }
}
