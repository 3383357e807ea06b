//! Toast notifications and the confirmation dialog.
//!
//! [`NotificationService`] is `Copy` and lives in context; the
//! [`NotificationHost`] component renders whatever it holds.

use crate::shared::list_controller::NotificationPort;
use async_trait::async_trait;
use futures::channel::oneshot;
use leptos::prelude::*;
use leptos::task::spawn_local;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeKind {
    Success,
    Error,
    Info,
}

impl NoticeKind {
    /// Errors stay longer on screen
    pub fn duration_ms(self) -> u32 {
        match self {
            NoticeKind::Error => 5000,
            NoticeKind::Success | NoticeKind::Info => 3000,
        }
    }

    pub fn css_class(self) -> &'static str {
        match self {
            NoticeKind::Success => "notification notification-success",
            NoticeKind::Error => "notification notification-error",
            NoticeKind::Info => "notification notification-info",
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Notice {
    pub id: u64,
    pub kind: NoticeKind,
    pub message: String,
}

#[derive(Clone, Copy)]
pub struct NotificationService {
    notices: RwSignal<Vec<Notice>>,
    confirm_message: RwSignal<Option<String>>,
    pending: StoredValue<Option<oneshot::Sender<bool>>>,
    next_id: StoredValue<u64>,
}

impl Default for NotificationService {
    fn default() -> Self {
        Self::new()
    }
}

impl NotificationService {
    pub fn new() -> Self {
        Self {
            notices: RwSignal::new(Vec::new()),
            confirm_message: RwSignal::new(None),
            pending: StoredValue::new(None),
            next_id: StoredValue::new(0),
        }
    }

    pub fn notices(&self) -> RwSignal<Vec<Notice>> {
        self.notices
    }

    pub fn confirm_message(&self) -> RwSignal<Option<String>> {
        self.confirm_message
    }

    /// Show a toast and remove it after its kind's duration
    pub fn show(&self, kind: NoticeKind, message: &str) {
        let id = self.push(kind, message);
        let this = *self;
        spawn_local(async move {
            gloo_timers::future::TimeoutFuture::new(kind.duration_ms()).await;
            this.dismiss(id);
        });
    }

    /// Add a toast without scheduling its removal
    pub fn push(&self, kind: NoticeKind, message: &str) -> u64 {
        self.next_id.update_value(|id| *id += 1);
        let id = self.next_id.get_value();
        self.notices.update(|list| {
            list.push(Notice {
                id,
                kind,
                message: message.to_string(),
            })
        });
        id
    }

    pub fn dismiss(&self, id: u64) {
        self.notices.try_update(|list| list.retain(|n| n.id != id));
    }

    /// Open the dialog and wait for the answer.
    ///
    /// A newer question replaces an unanswered one, which then resolves to
    /// `false`.
    pub async fn ask(&self, message: &str) -> bool {
        let (tx, rx) = oneshot::channel();
        self.pending.set_value(Some(tx));
        self.confirm_message.set(Some(message.to_string()));
        rx.await.unwrap_or(false)
    }

    /// Resolve the open dialog; no-op when none is open
    pub fn answer(&self, accepted: bool) {
        let sender = self.pending.try_update_value(|p| p.take()).flatten();
        self.confirm_message.try_set(None);
        if let Some(sender) = sender {
            let _ = sender.send(accepted);
        }
    }
}

/// Service provided by `App`; a detached one if the context is missing
pub fn use_notifications() -> NotificationService {
    use_context::<NotificationService>().unwrap_or_else(|| {
        log::warn!("NotificationService not provided in context");
        NotificationService::new()
    })
}

#[async_trait(?Send)]
impl NotificationPort for NotificationService {
    fn success(&self, message: &str) {
        self.show(NoticeKind::Success, message);
    }

    fn error(&self, message: &str) {
        self.show(NoticeKind::Error, message);
    }

    fn info(&self, message: &str) {
        self.show(NoticeKind::Info, message);
    }

    async fn confirm(&self, message: &str) -> bool {
        self.ask(message).await
    }
}

/// Toast stack plus the confirmation modal
#[component]
pub fn NotificationHost(service: NotificationService) -> impl IntoView {
    let notices = service.notices();
    let confirm_message = service.confirm_message();

    view! {
        <div class="notification-stack">
            <For
                each=move || notices.get()
                key=|notice| notice.id
                children=move |notice: Notice| {
                    let id = notice.id;
                    view! {
                        <div class=notice.kind.css_class() on:click=move |_| service.dismiss(id)>
                            {notice.message}
                        </div>
                    }
                }
            />
        </div>
        {move || {
            confirm_message
                .get()
                .map(|message| {
                    view! {
                        <div class="confirm-overlay">
                            <div class="confirm-dialog">
                                <p>{message}</p>
                                <div class="confirm-buttons">
                                    <button class="btn-confirm" on:click=move |_| service.answer(true)>
                                        "Confirmar"
                                    </button>
                                    <button class="btn-cancel" on:click=move |_| service.answer(false)>
                                        "Cancelar"
                                    </button>
                                </div>
                            </div>
                        </div>
                    }
                })
        }}
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use futures::executor::block_on;
    use futures::join;

    #[test]
    fn test_push_and_dismiss() {
        let service = NotificationService::new();
        let first = service.push(NoticeKind::Success, "Cliente agregado");
        let second = service.push(NoticeKind::Error, "Error de red");
        assert_ne!(first, second);

        service.dismiss(first);
        let left = service.notices().get_untracked();
        assert_eq!(left.len(), 1);
        assert_eq!(left[0].kind, NoticeKind::Error);
    }

    #[test]
    fn test_confirm_resolves_with_answer() {
        let service = NotificationService::new();
        let (accepted, _) = block_on(async {
            join!(service.ask("¿Eliminar?"), async {
                assert_eq!(
                    service.confirm_message().get_untracked().as_deref(),
                    Some("¿Eliminar?")
                );
                service.answer(true)
            })
        });
        assert!(accepted);
        assert_eq!(service.confirm_message().get_untracked(), None);
    }

    #[test]
    fn test_replaced_question_is_declined() {
        let service = NotificationService::new();
        let (first, second, _) = block_on(async {
            join!(service.ask("uno"), service.ask("dos"), async {
                service.answer(true)
            })
        });
        assert!(!first);
        assert!(second);
    }

    #[test]
    fn test_answer_without_question_is_noop() {
        let service = NotificationService::new();
        service.answer(false);
        assert_eq!(service.confirm_message().get_untracked(), None);
    }

    #[test]
    fn test_durations() {
        assert_eq!(NoticeKind::Error.duration_ms(), 5000);
        assert_eq!(NoticeKind::Info.duration_ms(), 3000);
    }
}
