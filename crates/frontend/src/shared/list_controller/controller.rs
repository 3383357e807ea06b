use super::error::{ApiError, ListError};
use super::ports::{ApiPort, NotificationPort};
use super::refresh::RefreshPolicy;
use super::state::{ListState, DEFAULT_PAGE_SIZE};
use crate::shared::export::{PdfExportPort, ReportDocument, ReportExportable};
use crate::shared::list_utils::ListFilter;
use contracts::domain::common::{Entity, EntityId};
use futures::future::{AbortHandle, AbortRegistration, Abortable};
use leptos::prelude::*;
use std::collections::HashMap;
use std::future::Future;
use std::sync::{Arc, Mutex};

pub type Validator<T> = Arc<dyn Fn(&T) -> Result<(), String> + Send + Sync>;

/// User-facing texts of one list, in the entity's own wording
#[derive(Debug, Clone, PartialEq)]
pub struct ListMessages {
    pub element: String,
    pub load_failed: String,
    pub created: String,
    pub create_failed: String,
    pub updated: String,
    pub update_failed: String,
    pub deleted: String,
    pub delete_failed: String,
    pub not_found: String,
    pub has_dependents: String,
    pub exported: String,
    pub export_failed: String,
    pub no_data: String,
}

impl ListMessages {
    pub fn for_entity<T: Entity>() -> Self {
        let element = T::element_name().to_string();
        let lower = element.to_lowercase();
        Self {
            load_failed: format!("Error al cargar {}", T::list_name().to_lowercase()),
            created: format!("{} agregado exitosamente", element),
            create_failed: format!("Error al agregar {}", lower),
            updated: format!("{} actualizado exitosamente", element),
            update_failed: format!("Error al actualizar {}", lower),
            deleted: format!("{} eliminado exitosamente", element),
            delete_failed: format!("Error al eliminar {}", lower),
            not_found: format!("{} ya no existe, se actualizó la lista", element),
            has_dependents: format!(
                "No se puede eliminar {}: tiene registros asociados",
                lower
            ),
            exported: format!("{} exportado exitosamente", T::list_name()),
            export_failed: "Error al generar el PDF".to_string(),
            no_data: "No hay datos para exportar".to_string(),
            element,
        }
    }

    pub fn confirm_delete(&self, name: &str) -> String {
        format!("¿Eliminar {} \"{}\"?", self.element.to_lowercase(), name)
    }
}

/// Per-page configuration of a controller
#[derive(Clone)]
pub struct ListConfig<T: Entity> {
    pub page_size: usize,
    pub search_fields: Vec<&'static str>,
    pub validator: Validator<T>,
    pub messages: ListMessages,
}

impl<T: Entity> ListConfig<T> {
    /// Defaults taken from the entity: its search fields, `Entity::validate`
    /// and messages built from its names
    pub fn for_entity() -> Self {
        Self {
            page_size: DEFAULT_PAGE_SIZE,
            search_fields: T::search_fields().to_vec(),
            validator: Arc::new(|item: &T| item.validate()),
            messages: ListMessages::for_entity::<T>(),
        }
    }

    pub fn with_page_size(mut self, page_size: usize) -> Self {
        self.page_size = page_size.max(1);
        self
    }

    pub fn with_search_fields(mut self, fields: &[&'static str]) -> Self {
        self.search_fields = fields.to_vec();
        self
    }

    pub fn with_validator(
        mut self,
        validator: impl Fn(&T) -> Result<(), String> + Send + Sync + 'static,
    ) -> Self {
        self.validator = Arc::new(validator);
        self
    }

    pub fn with_messages(mut self, messages: ListMessages) -> Self {
        self.messages = messages;
        self
    }
}

impl<T: Entity> Default for ListConfig<T> {
    fn default() -> Self {
        Self::for_entity()
    }
}

/// Result of a `remove` that did not fail
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RemoveOutcome {
    Removed,
    /// The backend answered 404; the list was refreshed
    AlreadyGone,
    /// The user declined the confirmation; nothing was sent
    Declined,
}

#[derive(Default)]
struct TaskRegistry {
    next_id: u64,
    handles: HashMap<u64, AbortHandle>,
    current_load: Option<u64>,
    disposed: bool,
}

struct Inner<T: Entity, A, N> {
    api: A,
    notifier: N,
    config: ListConfig<T>,
    state: RwSignal<ListState<T>>,
    busy: RwSignal<bool>,
    loading: RwSignal<bool>,
    tasks: Mutex<TaskRegistry>,
}

/// Clears the busy flag when a mutation ends, however it ends
struct BusyGuard(RwSignal<bool>);

impl Drop for BusyGuard {
    fn drop(&mut self) {
        self.0.try_set(false);
    }
}

/// Load → filter → paginate → mutate → reload, for one entity type.
///
/// Cloning is cheap and every clone drives the same list. All reactive
/// state lives in signals, so views can read [`state`](Self::state) and
/// the busy/loading flags directly.
pub struct EntityListController<T: Entity, A, N> {
    inner: Arc<Inner<T, A, N>>,
}

impl<T: Entity, A, N> Clone for EntityListController<T, A, N> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl<T, A, N> EntityListController<T, A, N>
where
    T: Entity,
    A: ApiPort<T> + 'static,
    N: NotificationPort + 'static,
{
    pub fn new(api: A, notifier: N, config: ListConfig<T>) -> Self {
        let state = ListState::with_page_size(config.page_size);
        Self {
            inner: Arc::new(Inner {
                api,
                notifier,
                config,
                state: RwSignal::new(state),
                busy: RwSignal::new(false),
                loading: RwSignal::new(false),
                tasks: Mutex::new(TaskRegistry::default()),
            }),
        }
    }

    // ========================================================================
    // Reading
    // ========================================================================

    pub fn state(&self) -> RwSignal<ListState<T>> {
        self.inner.state
    }

    pub fn busy(&self) -> RwSignal<bool> {
        self.inner.busy
    }

    pub fn loading(&self) -> RwSignal<bool> {
        self.inner.loading
    }

    pub fn config(&self) -> &ListConfig<T> {
        &self.inner.config
    }

    pub fn api(&self) -> &A {
        &self.inner.api
    }

    pub fn notifier(&self) -> &N {
        &self.inner.notifier
    }

    pub fn filter(&self) -> ListFilter {
        self.inner.state.with(|s| s.filter.clone())
    }

    pub fn items(&self) -> Vec<T> {
        self.inner.state.with(|s| s.items.clone())
    }

    pub fn filtered_items(&self) -> Vec<T> {
        let fields = self.fields();
        self.inner
            .state
            .with(|s| s.filtered(fields).into_iter().cloned().collect())
    }

    pub fn filtered_count(&self) -> usize {
        let fields = self.fields();
        self.inner.state.with(|s| s.filtered_count(fields))
    }

    pub fn page_items(&self) -> Vec<T> {
        let fields = self.fields();
        self.inner.state.with(|s| s.visible(fields))
    }

    pub fn total_pages(&self) -> usize {
        let fields = self.fields();
        self.inner.state.with(|s| s.total_pages(fields))
    }

    pub fn current_page(&self) -> usize {
        self.inner.state.with(|s| s.current_page)
    }

    pub fn page_size(&self) -> usize {
        self.inner.state.with(|s| s.page_size)
    }

    pub fn is_busy(&self) -> bool {
        self.inner.busy.get_untracked()
    }

    pub fn is_disposed(&self) -> bool {
        self.registry().disposed
    }

    // ========================================================================
    // Filtering and paging
    // ========================================================================

    pub fn set_filter(&self, text: impl Into<String>) {
        let text = text.into();
        self.update_filter(|f| f.text = text);
    }

    /// `None` clears the filter; a `YYYY-MM` prefix filters a whole month
    pub fn set_date_filter(&self, date: Option<String>) {
        let date = date.filter(|d| !d.trim().is_empty());
        self.update_filter(|f| f.date = date);
    }

    pub fn set_category_filter(&self, category: Option<String>) {
        let category = category.filter(|c| !c.trim().is_empty());
        self.update_filter(|f| f.category = category);
    }

    pub fn clear_filters(&self) {
        self.update_filter(|f| *f = ListFilter::default());
    }

    /// Out-of-range pages are ignored
    pub fn set_page(&self, page: usize) {
        let fields = self.fields();
        self.inner.state.update(|s| {
            if (1..=s.total_pages(fields)).contains(&page) {
                s.current_page = page;
            }
        });
    }

    /// Zero is ignored
    pub fn set_page_size(&self, page_size: usize) {
        if page_size == 0 {
            return;
        }
        let fields = self.fields();
        self.inner.state.update(|s| {
            s.page_size = page_size;
            s.clamp_page(fields);
        });
    }

    fn update_filter(&self, change: impl FnOnce(&mut ListFilter)) {
        let fields = self.fields();
        self.inner.state.update(|s| {
            change(&mut s.filter);
            s.current_page = 1;
            s.clamp_page(fields);
        });
    }

    // ========================================================================
    // Loading
    // ========================================================================

    /// Fetch the whole collection.
    ///
    /// A newer `load` aborts this one, which then resolves to
    /// [`ListError::Cancelled`] without touching state.
    pub async fn load(&self) -> Result<(), ListError> {
        let (task, registration) = self.register_load()?;
        self.inner.loading.try_set(true);
        log::debug!("Loading {}", T::resource());

        let result = Abortable::new(self.inner.api.list(), registration).await;
        self.finish(task);

        match result {
            Err(_aborted) => Err(ListError::Cancelled),
            Ok(Ok(items)) => {
                log::debug!("Loaded {} {}", items.len(), T::resource());
                self.inner.state.try_update(|s| s.replace_items(items));
                Ok(())
            }
            Ok(Err(e)) => {
                log::error!("Failed to load {}: {}", T::resource(), e);
                self.inner
                    .notifier
                    .error(&format!("{}: {}", self.inner.config.messages.load_failed, e));
                Err(e.into())
            }
        }
    }

    // ========================================================================
    // Mutations
    // ========================================================================

    pub async fn create(&self, draft: T) -> Result<T, ListError> {
        self.ensure_writable()?;
        let _busy = self.try_begin()?;
        let draft = self.prepare(draft)?;

        let messages = &self.inner.config.messages;
        let saved = match self.run(self.inner.api.create(&draft)).await? {
            Ok(saved) => saved,
            Err(e) => {
                log::warn!("Create {} failed: {}", T::resource(), e);
                self.inner
                    .notifier
                    .error(&format!("{}: {}", messages.create_failed, e));
                return Err(e.into());
            }
        };

        log::info!("Created {} {:?}", T::resource(), saved.id());
        self.reload_after_mutation().await?;
        self.inner.notifier.success(&messages.created);
        Ok(saved)
    }

    /// `id` is taken as given; a draft without one fails with
    /// [`ListError::MissingId`]
    pub async fn update(&self, id: Option<EntityId>, draft: T) -> Result<T, ListError> {
        self.ensure_writable()?;
        let messages = &self.inner.config.messages;
        let Some(id) = id else {
            self.inner.notifier.error(&ListError::MissingId.to_string());
            return Err(ListError::MissingId);
        };
        let _busy = self.try_begin()?;
        let draft = self.prepare(draft)?;

        let saved = match self.run(self.inner.api.update(id, &draft)).await? {
            Ok(saved) => saved,
            Err(e) => {
                log::warn!("Update {} #{} failed: {}", T::resource(), id, e);
                self.inner
                    .notifier
                    .error(&format!("{}: {}", messages.update_failed, e));
                return Err(e.into());
            }
        };

        log::info!("Updated {} #{}", T::resource(), id);
        self.reload_after_mutation().await?;
        self.inner.notifier.success(&messages.updated);
        Ok(saved)
    }

    /// Delete after the user confirms.
    ///
    /// 404 counts as already deleted; any other HTTP failure is reported as
    /// the entity still being referenced elsewhere.
    pub async fn remove(&self, id: EntityId) -> Result<RemoveOutcome, ListError> {
        self.ensure_writable()?;
        let _busy = self.try_begin()?;
        let messages = &self.inner.config.messages;

        let name = self
            .inner
            .state
            .with_untracked(|s| s.find(id).map(|item| item.display_name()))
            .filter(|name| !name.trim().is_empty())
            .unwrap_or_else(|| format!("#{}", id));

        let accepted = self
            .run(self.inner.notifier.confirm(&messages.confirm_delete(&name)))
            .await?;
        if !accepted {
            log::debug!("Delete {} #{} declined", T::resource(), id);
            return Ok(RemoveOutcome::Declined);
        }

        match self.run(self.inner.api.delete(id)).await? {
            Ok(()) => {
                log::info!("Deleted {} #{}", T::resource(), id);
                self.reload_after_mutation().await?;
                self.inner.notifier.success(&messages.deleted);
                Ok(RemoveOutcome::Removed)
            }
            Err(e) if e.is_not_found() => {
                log::warn!("Delete {} #{}: already gone", T::resource(), id);
                self.inner.notifier.info(&messages.not_found);
                self.reload_after_mutation().await?;
                Ok(RemoveOutcome::AlreadyGone)
            }
            Err(ApiError::Status { status, message }) => {
                log::warn!(
                    "Delete {} #{} refused ({}): {}",
                    T::resource(),
                    id,
                    status,
                    message
                );
                self.inner.notifier.error(&messages.has_dependents);
                Err(ListError::Conflict(messages.has_dependents.clone()))
            }
            Err(e) => {
                log::error!("Delete {} #{} failed: {}", T::resource(), id, e);
                self.inner
                    .notifier
                    .error(&format!("{}: {}", messages.delete_failed, e));
                Err(e.into())
            }
        }
    }

    // ========================================================================
    // Export
    // ========================================================================

    /// Print the filtered view (all pages, not just the visible one)
    pub async fn export_report<E>(&self, exporter: &E) -> Result<(), ListError>
    where
        T: ReportExportable,
        E: PdfExportPort + ?Sized,
    {
        let messages = &self.inner.config.messages;
        let items = self.filtered_items();
        if items.is_empty() {
            self.inner.notifier.info(&messages.no_data);
            return Err(ListError::Export(messages.no_data.clone()));
        }

        let refs: Vec<&T> = items.iter().collect();
        let now = chrono::Local::now().naive_local();
        let report = ReportDocument::build(&refs, &self.filter(), now);

        match self.run(exporter.export(&report)).await? {
            Ok(()) => {
                log::info!("Exported {} ({} rows)", report.file_name, report.rows.len());
                self.inner.notifier.success(&messages.exported);
                Ok(())
            }
            Err(e) => {
                log::error!("PDF export failed: {}", e);
                let message = format!("{}: {}", messages.export_failed, e);
                self.inner.notifier.error(&message);
                Err(ListError::Export(message))
            }
        }
    }

    // ========================================================================
    // Lifetime
    // ========================================================================

    /// Reload on an interval until [`dispose`](Self::dispose)
    pub fn start_auto_refresh(&self, policy: RefreshPolicy) {
        let Some(interval) = policy.interval() else {
            return;
        };
        let Ok((task, registration)) = self.register() else {
            return;
        };

        let this = self.clone();
        let refresh_loop = async move {
            loop {
                gloo_timers::future::sleep(interval).await;
                this.refresh_tick().await;
            }
        };
        let this = self.clone();
        leptos::task::spawn_local(async move {
            let _ = Abortable::new(refresh_loop, registration).await;
            this.finish(task);
        });
        log::debug!("Auto refresh of {} every {:?}", T::resource(), interval);
    }

    /// One auto-refresh step: reload unless a mutation is running.
    /// Returns whether a load was attempted.
    pub async fn refresh_tick(&self) -> bool {
        if self.is_busy() || self.is_disposed() {
            log::debug!("Refresh of {} skipped", T::resource());
            return false;
        }
        let _ = self.load().await;
        true
    }

    /// Abort every in-flight call and the refresh loop; later calls return
    /// [`ListError::Cancelled`]
    pub fn dispose(&self) {
        let handles: Vec<AbortHandle> = {
            let mut tasks = self.registry();
            tasks.disposed = true;
            tasks.current_load = None;
            tasks.handles.drain().map(|(_, handle)| handle).collect()
        };
        for handle in handles {
            handle.abort();
        }
        self.inner.loading.try_set(false);
        log::debug!("Disposed {} list", T::resource());
    }

    // ========================================================================
    // Internals
    // ========================================================================

    fn fields(&self) -> &[&'static str] {
        &self.inner.config.search_fields
    }

    fn registry(&self) -> std::sync::MutexGuard<'_, TaskRegistry> {
        // Nothing panics while holding the lock, recover from poisoning anyway
        self.inner
            .tasks
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    fn register(&self) -> Result<(u64, AbortRegistration), ListError> {
        let mut tasks = self.registry();
        if tasks.disposed {
            return Err(ListError::Cancelled);
        }
        let (handle, registration) = AbortHandle::new_pair();
        tasks.next_id += 1;
        let id = tasks.next_id;
        tasks.handles.insert(id, handle);
        Ok((id, registration))
    }

    fn register_load(&self) -> Result<(u64, AbortRegistration), ListError> {
        let (id, registration) = self.register()?;
        let previous = {
            let mut tasks = self.registry();
            let previous = tasks.current_load.replace(id);
            previous.and_then(|prev| tasks.handles.remove(&prev))
        };
        if let Some(handle) = previous {
            log::debug!("Superseding running load of {}", T::resource());
            handle.abort();
        }
        Ok((id, registration))
    }

    fn finish(&self, id: u64) {
        let mut tasks = self.registry();
        tasks.handles.remove(&id);
        if tasks.current_load == Some(id) {
            tasks.current_load = None;
            drop(tasks);
            self.inner.loading.try_set(false);
        }
    }

    /// Await `future` unless the controller is disposed first
    async fn run<F: Future>(&self, future: F) -> Result<F::Output, ListError> {
        let (id, registration) = self.register()?;
        let result = Abortable::new(future, registration).await;
        self.finish(id);
        result.map_err(|_| ListError::Cancelled)
    }

    fn ensure_writable(&self) -> Result<(), ListError> {
        if T::is_read_only() {
            return Err(ListError::ReadOnly(T::list_name()));
        }
        Ok(())
    }

    fn try_begin(&self) -> Result<BusyGuard, ListError> {
        if self.is_disposed() {
            return Err(ListError::Cancelled);
        }
        if self.inner.busy.get_untracked() {
            log::debug!("{} busy, mutation rejected", T::resource());
            return Err(ListError::Busy);
        }
        self.inner.busy.set(true);
        Ok(BusyGuard(self.inner.busy))
    }

    fn prepare(&self, draft: T) -> Result<T, ListError> {
        let draft = draft.normalized();
        if let Err(message) = (self.inner.config.validator)(&draft) {
            log::debug!("{} draft rejected: {}", T::resource(), message);
            self.inner.notifier.error(&message);
            return Err(ListError::Validation(message));
        }
        Ok(draft)
    }

    /// The mutation already succeeded; only cancellation aborts the caller
    async fn reload_after_mutation(&self) -> Result<(), ListError> {
        match self.load().await {
            Err(ListError::Cancelled) if self.is_disposed() => Err(ListError::Cancelled),
            _ => Ok(()),
        }
    }
}
