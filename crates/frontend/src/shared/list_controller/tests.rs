use super::*;
use crate::shared::export::{PdfExportPort, ReportDocument};
use async_trait::async_trait;
use contracts::domain::a001_service_category::entity::ServiceCategory;
use contracts::domain::a007_expense::entity::Expense;
use contracts::domain::a009_audit_log::entity::AuditEntry;
use contracts::domain::common::{Entity, EntityId};
use futures::channel::oneshot;
use futures::executor::block_on;
use futures::join;
use leptos::prelude::*;
use std::cell::{Cell, RefCell};
use std::collections::VecDeque;
use std::rc::Rc;

// ============================================================================
// In-memory ports
// ============================================================================

struct Backend<T> {
    items: Vec<T>,
    list_calls: usize,
    create_calls: usize,
    update_calls: usize,
    delete_calls: usize,
    list_error: Option<ApiError>,
    create_error: Option<ApiError>,
    delete_error: Option<ApiError>,
    /// Each call to `list`/`create` waits on the next gate, if any
    list_gates: VecDeque<oneshot::Receiver<()>>,
    create_gates: VecDeque<oneshot::Receiver<()>>,
}

impl<T> Default for Backend<T> {
    fn default() -> Self {
        Self {
            items: Vec::new(),
            list_calls: 0,
            create_calls: 0,
            update_calls: 0,
            delete_calls: 0,
            list_error: None,
            create_error: None,
            delete_error: None,
            list_gates: VecDeque::new(),
            create_gates: VecDeque::new(),
        }
    }
}

struct FakeApi<T>(Rc<RefCell<Backend<T>>>);

impl<T> Clone for FakeApi<T> {
    fn clone(&self) -> Self {
        Self(Rc::clone(&self.0))
    }
}

impl<T: Entity> FakeApi<T> {
    fn with_items(items: Vec<T>) -> Self {
        let backend = Backend {
            items,
            ..Default::default()
        };
        Self(Rc::new(RefCell::new(backend)))
    }

    fn backend(&self) -> std::cell::RefMut<'_, Backend<T>> {
        self.0.borrow_mut()
    }

    fn gate_next_list(&self) -> oneshot::Sender<()> {
        let (tx, rx) = oneshot::channel();
        self.backend().list_gates.push_back(rx);
        tx
    }

    fn gate_next_create(&self) -> oneshot::Sender<()> {
        let (tx, rx) = oneshot::channel();
        self.backend().create_gates.push_back(rx);
        tx
    }
}

fn not_found() -> ApiError {
    ApiError::Status {
        status: 404,
        message: "Not Found".into(),
    }
}

#[async_trait(?Send)]
impl<T: Entity> ApiPort<T> for FakeApi<T> {
    async fn list(&self) -> Result<Vec<T>, ApiError> {
        let gate = {
            let mut b = self.backend();
            b.list_calls += 1;
            b.list_gates.pop_front()
        };
        if let Some(gate) = gate {
            let _ = gate.await;
        }
        let b = self.0.borrow();
        match &b.list_error {
            Some(e) => Err(e.clone()),
            None => Ok(b.items.clone()),
        }
    }

    async fn create(&self, body: &T) -> Result<T, ApiError> {
        let gate = {
            let mut b = self.backend();
            b.create_calls += 1;
            b.create_gates.pop_front()
        };
        if let Some(gate) = gate {
            let _ = gate.await;
        }
        let mut b = self.backend();
        if let Some(e) = &b.create_error {
            return Err(e.clone());
        }
        b.items.push(body.clone());
        Ok(body.clone())
    }

    async fn update(&self, id: EntityId, body: &T) -> Result<T, ApiError> {
        let mut b = self.backend();
        b.update_calls += 1;
        let slot = b
            .items
            .iter_mut()
            .find(|item| item.id() == Some(id))
            .ok_or_else(not_found)?;
        *slot = body.clone();
        Ok(body.clone())
    }

    async fn delete(&self, id: EntityId) -> Result<(), ApiError> {
        let mut b = self.backend();
        b.delete_calls += 1;
        if let Some(e) = &b.delete_error {
            return Err(e.clone());
        }
        let before = b.items.len();
        b.items.retain(|item| item.id() != Some(id));
        if b.items.len() == before {
            return Err(not_found());
        }
        Ok(())
    }
}

#[derive(Clone)]
struct FakeNotifier {
    notices: Rc<RefCell<Vec<(&'static str, String)>>>,
    confirms: Rc<RefCell<Vec<String>>>,
    accept: Rc<Cell<bool>>,
}

impl Default for FakeNotifier {
    fn default() -> Self {
        Self {
            notices: Rc::default(),
            confirms: Rc::default(),
            accept: Rc::new(Cell::new(true)),
        }
    }
}

impl FakeNotifier {
    fn of_kind(&self, kind: &str) -> Vec<String> {
        self.notices
            .borrow()
            .iter()
            .filter(|(k, _)| *k == kind)
            .map(|(_, m)| m.clone())
            .collect()
    }
}

#[async_trait(?Send)]
impl NotificationPort for FakeNotifier {
    fn success(&self, message: &str) {
        self.notices.borrow_mut().push(("success", message.to_string()));
    }

    fn error(&self, message: &str) {
        self.notices.borrow_mut().push(("error", message.to_string()));
    }

    fn info(&self, message: &str) {
        self.notices.borrow_mut().push(("info", message.to_string()));
    }

    async fn confirm(&self, message: &str) -> bool {
        self.confirms.borrow_mut().push(message.to_string());
        self.accept.get()
    }
}

/// Keeps every document it is asked to print
#[derive(Clone, Default)]
struct FakeExporter {
    printed: Rc<RefCell<Vec<ReportDocument>>>,
    failure: Option<String>,
}

#[async_trait(?Send)]
impl PdfExportPort for FakeExporter {
    async fn export(&self, report: &ReportDocument) -> Result<(), String> {
        if let Some(failure) = &self.failure {
            return Err(failure.clone());
        }
        self.printed.borrow_mut().push(report.clone());
        Ok(())
    }
}

type Controller<T> = EntityListController<T, FakeApi<T>, FakeNotifier>;

fn categories(n: usize) -> Vec<ServiceCategory> {
    (1..=n)
        .map(|i| ServiceCategory {
            id: Some(i as EntityId),
            description: format!("Categoría {}", i),
        })
        .collect()
}

fn loaded(n: usize) -> (Controller<ServiceCategory>, FakeApi<ServiceCategory>, FakeNotifier) {
    let api = FakeApi::with_items(categories(n));
    let notifier = FakeNotifier::default();
    let controller = EntityListController::new(api.clone(), notifier.clone(), ListConfig::for_entity());
    block_on(controller.load()).unwrap();
    (controller, api, notifier)
}

// ============================================================================
// Paging and filtering
// ============================================================================

#[test]
fn test_set_page_never_leaves_bounds() {
    for count in [0usize, 1, 9, 10, 11, 23, 30] {
        for page_size in 1..=12 {
            let (controller, _, _) = loaded(count);
            controller.set_page_size(page_size);
            for target in 0..=8 {
                controller.set_page(target);
                let page = controller.current_page();
                assert!(
                    (1..=controller.total_pages()).contains(&page),
                    "count={} size={} target={} -> page {}",
                    count,
                    page_size,
                    target,
                    page
                );
            }
        }
    }
}

#[test]
fn test_23_items_make_3_pages_and_page_4_is_ignored() {
    let (controller, _, _) = loaded(23);
    assert_eq!(controller.total_pages(), 3);

    controller.set_page(3);
    assert_eq!(controller.current_page(), 3);
    assert_eq!(controller.page_items().len(), 3);

    controller.set_page(4);
    assert_eq!(controller.current_page(), 3);
    controller.set_page(0);
    assert_eq!(controller.current_page(), 3);
}

#[test]
fn test_clearing_filter_restores_count() {
    let (controller, _, _) = loaded(23);
    controller.set_filter("categoría 2");
    // 2, 20..=23
    assert_eq!(controller.filtered_count(), 5);

    controller.set_filter("");
    assert_eq!(controller.filtered_count(), 23);
}

#[test]
fn test_filter_resets_page() {
    let (controller, _, _) = loaded(23);
    controller.set_page(3);
    controller.set_filter("1");
    assert_eq!(controller.current_page(), 1);
    assert!(controller.total_pages() >= 1);
}

#[test]
fn test_page_size_change_reclamps() {
    let (controller, _, _) = loaded(23);
    controller.set_page(3);
    controller.set_page_size(20);
    assert_eq!(controller.total_pages(), 2);
    assert_eq!(controller.current_page(), 2);

    controller.set_page_size(0);
    assert_eq!(controller.page_size(), 20);
}

#[test]
fn test_date_and_category_filters() {
    let expense = |id: EntityId, date: &str, category: &str| Expense {
        id: Some(id),
        description: format!("Gasto {}", id),
        amount: 1000,
        expense_date: Some(date.to_string()),
        category: category.to_string(),
        employee: None,
    };
    let api = FakeApi::with_items(vec![
        expense(1, "2024-05-02", "Insumos"),
        expense(2, "2024-05-20", "Arriendo"),
        expense(3, "2024-06-01", "Insumos"),
    ]);
    let controller = EntityListController::new(api, FakeNotifier::default(), ListConfig::for_entity());
    block_on(controller.load()).unwrap();

    controller.set_date_filter(Some("2024-05".into()));
    assert_eq!(controller.filtered_count(), 2);

    controller.set_category_filter(Some("Insumos".into()));
    let ids: Vec<_> = controller.filtered_items().iter().map(|e| e.id).collect();
    assert_eq!(ids, vec![Some(1)]);

    controller.set_date_filter(Some(String::new()));
    assert_eq!(controller.filtered_count(), 2);

    controller.clear_filters();
    assert_eq!(controller.filtered_count(), 3);
}

// ============================================================================
// Loading
// ============================================================================

#[test]
fn test_load_twice_yields_same_items() {
    let (controller, api, _) = loaded(7);
    let first = controller.items();
    block_on(controller.load()).unwrap();
    assert_eq!(controller.items(), first);
    assert_eq!(api.backend().list_calls, 2);
}

#[test]
fn test_failed_load_keeps_items() {
    let (controller, api, notifier) = loaded(5);
    api.backend().list_error = Some(ApiError::Network("offline".into()));

    let result = block_on(controller.load());

    assert_eq!(
        result,
        Err(ListError::Transport(ApiError::Network("offline".into())))
    );
    assert_eq!(controller.items().len(), 5);
    let errors = notifier.of_kind("error");
    assert_eq!(errors.len(), 1);
    assert!(errors[0].starts_with("Error al cargar"));
    assert!(!controller.loading().get_untracked());
}

#[test]
fn test_newer_load_cancels_running_one() {
    let (controller, api, _) = loaded(3);
    let gate = api.gate_next_list();
    api.backend().items = categories(8);

    let (first, second) = block_on(async { join!(controller.load(), controller.load()) });

    assert_eq!(first, Err(ListError::Cancelled));
    assert_eq!(second, Ok(()));
    assert_eq!(controller.items().len(), 8);
    assert!(!controller.loading().get_untracked());
    drop(gate);
}

// ============================================================================
// Mutations
// ============================================================================

#[test]
fn test_invalid_draft_never_reaches_api() {
    let (controller, api, notifier) = loaded(2);
    let expected = ServiceCategory::new("").validate().unwrap_err();

    let result = block_on(controller.create(ServiceCategory::new("   ")));

    assert_eq!(result, Err(ListError::Validation(expected.clone())));
    assert_eq!(api.backend().create_calls, 0);
    assert_eq!(notifier.of_kind("error"), vec![expected]);
}

#[test]
fn test_create_reloads_once_and_resets_page() {
    let (controller, api, notifier) = loaded(23);
    controller.set_page(3);
    let calls_before = api.backend().list_calls;

    let saved = block_on(controller.create(ServiceCategory::new("  tinte y color"))).unwrap();

    assert_eq!(saved.description, "Tinte Y Color");
    assert_eq!(api.backend().list_calls, calls_before + 1);
    assert_eq!(controller.current_page(), 1);
    assert_eq!(controller.items().len(), 24);
    assert_eq!(notifier.of_kind("success").len(), 1);
    assert!(!controller.is_busy());
}

#[test]
fn test_create_failure_reports_transport_message() {
    let (controller, api, notifier) = loaded(1);
    api.backend().create_error = Some(ApiError::Status {
        status: 400,
        message: "La categoría ya existe".into(),
    });

    let result = block_on(controller.create(ServiceCategory::new("Cortes")));

    assert!(matches!(result, Err(ListError::Transport(_))));
    let errors = notifier.of_kind("error");
    assert_eq!(errors.len(), 1);
    assert!(errors[0].contains("La categoría ya existe"));
    assert_eq!(api.backend().list_calls, 1);
}

#[test]
fn test_update_requires_id() {
    let (controller, api, notifier) = loaded(1);
    let result = block_on(controller.update(None, ServiceCategory::new("Cortes")));
    assert_eq!(result, Err(ListError::MissingId));
    assert_eq!(api.backend().update_calls, 0);
    assert_eq!(notifier.of_kind("error").len(), 1);
}

#[test]
fn test_update_replaces_item() {
    let (controller, _, _) = loaded(3);
    let mut draft = controller.items()[1].clone();
    draft.description = "peinados".into();

    block_on(controller.update(draft.id, draft)).unwrap();

    assert_eq!(controller.items()[1].description, "Peinados");
}

#[test]
fn test_overlapping_mutation_is_rejected() {
    let (controller, api, _) = loaded(1);
    let gate = api.gate_next_create();

    let (first, second, third, _) = block_on(async {
        join!(
            controller.create(ServiceCategory::new("Cortes")),
            controller.create(ServiceCategory::new("Color")),
            controller.remove(1),
            async {
                let _ = gate.send(());
            }
        )
    });

    assert!(first.is_ok());
    assert_eq!(second, Err(ListError::Busy));
    assert_eq!(third, Err(ListError::Busy));
    assert_eq!(api.backend().create_calls, 1);
    assert!(!controller.is_busy());
}

#[test]
fn test_delete_of_missing_record_is_informational() {
    let (controller, api, notifier) = loaded(3);
    let calls_before = api.backend().list_calls;

    let result = block_on(controller.remove(42));

    assert_eq!(result, Ok(RemoveOutcome::AlreadyGone));
    assert!(notifier.of_kind("error").is_empty());
    assert_eq!(notifier.of_kind("info").len(), 1);
    assert_eq!(api.backend().list_calls, calls_before + 1);
}

#[test]
fn test_delete_removes_and_reloads() {
    let (controller, _, notifier) = loaded(3);

    let result = block_on(controller.remove(2));

    assert_eq!(result, Ok(RemoveOutcome::Removed));
    assert_eq!(controller.items().len(), 2);
    assert_eq!(
        notifier.confirms.borrow().as_slice(),
        ["¿Eliminar categoría \"Categoría 2\"?".to_string()]
    );
    assert_eq!(notifier.of_kind("success").len(), 1);
}

#[test]
fn test_declined_confirm_sends_nothing() {
    let (controller, api, notifier) = loaded(3);
    notifier.accept.set(false);

    let result = block_on(controller.remove(1));

    assert_eq!(result, Ok(RemoveOutcome::Declined));
    assert_eq!(api.backend().delete_calls, 0);
    assert_eq!(controller.items().len(), 3);
}

#[test]
fn test_referenced_record_reports_conflict() {
    let (controller, api, notifier) = loaded(3);
    api.backend().delete_error = Some(ApiError::Status {
        status: 500,
        message: "constraint violation".into(),
    });
    let calls_before = api.backend().list_calls;

    let result = block_on(controller.remove(1));

    let expected = controller.config().messages.has_dependents.clone();
    assert_eq!(result, Err(ListError::Conflict(expected.clone())));
    assert_eq!(notifier.of_kind("error"), vec![expected]);
    assert_eq!(api.backend().list_calls, calls_before);
}

#[test]
fn test_network_failure_on_delete_is_transport() {
    let (controller, api, _) = loaded(3);
    api.backend().delete_error = Some(ApiError::Network("timeout".into()));

    let result = block_on(controller.remove(1));

    assert_eq!(
        result,
        Err(ListError::Transport(ApiError::Network("timeout".into())))
    );
}

#[test]
fn test_read_only_list_rejects_mutations() {
    let api = FakeApi::<AuditEntry>::with_items(Vec::new());
    let controller = EntityListController::new(api.clone(), FakeNotifier::default(), ListConfig::for_entity());

    let result = block_on(controller.create(AuditEntry::default()));
    assert_eq!(result, Err(ListError::ReadOnly(AuditEntry::list_name())));
    let result = block_on(controller.remove(1));
    assert_eq!(result, Err(ListError::ReadOnly(AuditEntry::list_name())));
    let create_calls = api.backend().create_calls;
    let delete_calls = api.backend().delete_calls;
    assert_eq!(create_calls, 0);
    assert_eq!(delete_calls, 0);
}

// ============================================================================
// Export
// ============================================================================

#[test]
fn test_export_of_empty_view_is_refused() {
    let (controller, _, notifier) = loaded(0);
    let exporter = FakeExporter::default();

    let result = block_on(controller.export_report(&exporter));

    assert_eq!(
        result,
        Err(ListError::Export("No hay datos para exportar".into()))
    );
    assert_eq!(notifier.of_kind("info"), vec!["No hay datos para exportar".to_string()]);
    assert!(exporter.printed.borrow().is_empty());
}

#[test]
fn test_export_prints_whole_filtered_view() {
    let (controller, _, notifier) = loaded(30);
    controller.set_page_size(5);
    controller.set_filter("categoría 2");
    assert_eq!(controller.page_items().len(), 5);
    let exporter = FakeExporter::default();

    block_on(controller.export_report(&exporter)).unwrap();

    let printed = exporter.printed.borrow();
    assert_eq!(printed.len(), 1);
    let report = &printed[0];
    // 2 and 20..=29
    assert_eq!(report.rows.len(), 11);
    assert_eq!(report.total_line, "Total de registros: 11");
    assert_eq!(
        report.filter_line.as_deref(),
        Some("Filtro aplicado: \"categoría 2\"")
    );
    assert!(report
        .file_name
        .starts_with("lista-categorias-servicios-filtrado-"));
    assert!(report.file_name.ends_with(".pdf"));
    assert_eq!(notifier.of_kind("success").len(), 1);
}

#[test]
fn test_exporter_failure_is_reported() {
    let (controller, _, notifier) = loaded(3);
    let exporter = FakeExporter {
        failure: Some("Librería PDF no cargada".into()),
        ..Default::default()
    };

    let result = block_on(controller.export_report(&exporter));

    let expected = "Error al generar el PDF: Librería PDF no cargada".to_string();
    assert_eq!(result, Err(ListError::Export(expected.clone())));
    assert_eq!(notifier.of_kind("error"), vec![expected]);
    assert!(notifier.of_kind("success").is_empty());
}

// ============================================================================
// Lifetime
// ============================================================================

#[test]
fn test_refresh_tick_skips_while_busy() {
    let (controller, api, _) = loaded(3);
    let calls_before = api.backend().list_calls;

    controller.busy().set(true);
    assert!(!block_on(controller.refresh_tick()));
    assert_eq!(api.backend().list_calls, calls_before);

    controller.busy().set(false);
    assert!(block_on(controller.refresh_tick()));
    assert_eq!(api.backend().list_calls, calls_before + 1);

    controller.dispose();
    assert!(!block_on(controller.refresh_tick()));
}

#[test]
fn test_dispose_cancels_in_flight_and_later_calls() {
    let (controller, api, _) = loaded(3);
    let gate = api.gate_next_list();

    let (pending, _) = block_on(async { join!(controller.load(), async { controller.dispose() }) });

    assert_eq!(pending, Err(ListError::Cancelled));
    assert!(controller.is_disposed());
    assert_eq!(block_on(controller.load()), Err(ListError::Cancelled));
    assert_eq!(
        block_on(controller.create(ServiceCategory::new("Cortes"))),
        Err(ListError::Cancelled)
    );
    assert_eq!(controller.items().len(), 3);
    drop(gate);
}

#[test]
fn test_refresh_policy() {
    assert_eq!(
        RefreshPolicy::default().interval(),
        Some(RefreshPolicy::DEFAULT_INTERVAL)
    );
    assert!(!RefreshPolicy::every(std::time::Duration::ZERO).is_enabled());
    assert!(!RefreshPolicy::disabled().is_enabled());
}
