//! Generic admin list page: toolbar, filters, table, pager and edit form.
//!
//! Entity pages only declare their columns and (optionally) a form body;
//! all behavior goes through [`EntityListController`].

use crate::shared::api_utils::api_url;
use crate::shared::components::pagination_controls::PaginationControls;
use crate::shared::export::{JsPdfExporter, ReportExportable};
use crate::shared::http_api::fetch_list;
use crate::shared::icons::icon;
use crate::shared::list_controller::{
    ApiPort, EntityListController, ListError, RefreshPolicy,
};
use crate::shared::list_utils::{highlight_matches, SearchInput};
use crate::shared::notifications::NotificationService;
use contracts::domain::common::EntityId;
use leptos::prelude::*;
use leptos::task::spawn_local;
use serde::de::DeserializeOwned;
use std::sync::Arc;

pub type PageController<T, A> = EntityListController<T, A, NotificationService>;

/// Form body for a draft; the page adds the frame and the buttons
pub type FormRenderer<T> = Arc<dyn Fn(RwSignal<T>) -> AnyView + Send + Sync>;

/// One table column
pub struct ListColumn<T> {
    pub header: &'static str,
    pub value: Arc<dyn Fn(&T) -> String + Send + Sync>,
    /// Mark search matches in this column
    pub highlight: bool,
    pub class: &'static str,
}

impl<T> Clone for ListColumn<T> {
    fn clone(&self) -> Self {
        Self {
            header: self.header,
            value: Arc::clone(&self.value),
            highlight: self.highlight,
            class: self.class,
        }
    }
}

impl<T> ListColumn<T> {
    pub fn new(header: &'static str, value: impl Fn(&T) -> String + Send + Sync + 'static) -> Self {
        Self {
            header,
            value: Arc::new(value),
            highlight: false,
            class: "",
        }
    }

    pub fn highlighted(mut self) -> Self {
        self.highlight = true;
        self
    }

    pub fn numeric(mut self) -> Self {
        self.class = "table__cell--number";
        self
    }
}

/// Select-style extra filter (payment method, expense category, ...)
#[derive(Clone, Copy)]
pub struct CategoryFilter {
    pub label: &'static str,
    pub options: Signal<Vec<String>>,
}

/// Records offered by a form select, fetched once when the page mounts
pub fn use_reference_list<R>(resource: &'static str) -> RwSignal<Vec<R>>
where
    R: DeserializeOwned + Send + Sync + 'static,
{
    let list = RwSignal::new(Vec::new());
    spawn_local(async move {
        match fetch_list::<R>(&api_url(resource)).await {
            Ok(items) => {
                list.try_set(items);
            }
            Err(e) => log::warn!("Failed to load {} for selects: {}", resource, e),
        }
    });
    list
}

/// `(id, label)` select options over a reference list
pub fn reference_options<R>(
    refs: RwSignal<Vec<R>>,
    describe: fn(&R) -> (Option<EntityId>, String),
) -> Signal<Vec<(String, String)>>
where
    R: Send + Sync + 'static,
{
    Signal::derive(move || {
        refs.with(|list| {
            list.iter()
                .filter_map(|r| {
                    let (id, label) = describe(r);
                    id.map(|id| (id.to_string(), label))
                })
                .collect()
        })
    })
}

/// Reference whose id is the selected option value
pub fn pick_reference<R>(
    refs: RwSignal<Vec<R>>,
    value: &str,
    id_of: fn(&R) -> Option<EntityId>,
) -> Option<R>
where
    R: Clone + Send + Sync + 'static,
{
    let id: EntityId = value.trim().parse().ok()?;
    refs.with_untracked(|list| list.iter().find(|r| id_of(r) == Some(id)).cloned())
}

#[component]
pub fn EntityListPage<T, A>(
    controller: PageController<T, A>,
    columns: Vec<ListColumn<T>>,
    /// Without a form the page only lists (and deletes, unless read-only)
    #[prop(optional)]
    form: Option<FormRenderer<T>>,
    /// Show the date filter input
    #[prop(optional)]
    date_filter: bool,
    #[prop(optional)]
    category_filter: Option<CategoryFilter>,
    /// Defaults to reloading every five minutes
    #[prop(optional)]
    refresh: Option<RefreshPolicy>,
) -> impl IntoView
where
    T: ReportExportable,
    A: ApiPort<T> + Send + Sync + 'static,
{
    let state = controller.state();
    let busy = controller.busy();
    let loading = controller.loading();
    let read_only = T::is_read_only();
    let editable = form.is_some() && !read_only;

    // Initial load, refresh loop and teardown
    {
        let c = controller.clone();
        spawn_local(async move {
            let _ = c.load().await;
        });
        controller.start_auto_refresh(refresh.unwrap_or_default());
        let c = controller.clone();
        on_cleanup(move || c.dispose());
    }

    let ctl = StoredValue::new(controller);

    let draft = RwSignal::new(T::default());
    let creating = RwSignal::new(true);
    let form_open = RwSignal::new(false);

    let open_new = move |_| {
        draft.set(T::default());
        creating.set(true);
        form_open.set(true);
    };
    let close_form = move || {
        form_open.set(false);
        draft.set(T::default());
    };

    let submit = move |_| {
        let c = ctl.get_value();
        let item = draft.get_untracked();
        let is_new = creating.get_untracked();
        spawn_local(async move {
            let result = if is_new {
                c.create(item).await.map(|_| ())
            } else {
                let id = item.id();
                c.update(id, item).await.map(|_| ())
            };
            match result {
                Ok(()) => close_form(),
                Err(ListError::Validation(_)) | Err(ListError::Busy) => {}
                Err(e) => log::debug!("Form kept open: {}", e),
            }
        });
    };

    let export = move |_| {
        let c = ctl.get_value();
        spawn_local(async move {
            let _ = c.export_report(&JsPdfExporter).await;
        });
    };

    let reload = move |_| {
        let c = ctl.get_value();
        spawn_local(async move {
            let _ = c.load().await;
        });
    };

    let filter_text = Signal::derive(move || state.with(|s| s.filter.text.clone()));
    let headers: Vec<&'static str> = columns.iter().map(|c| c.header).collect();
    let columns = StoredValue::new(columns);

    let rows = move || {
        let items = ctl.with_value(|c| c.page_items());
        let needle = filter_text.get();
        if items.is_empty() {
            let message = if loading.get() {
                "Cargando..."
            } else {
                "No hay registros"
            };
            let span = columns.with_value(|c| c.len()) + usize::from(!read_only);
            return view! {
                <tr><td class="table__empty" colspan=span.to_string()>{message}</td></tr>
            }
            .into_any();
        }

        items
            .into_iter()
            .map(|item| {
                let cells = columns.with_value(|cols| {
                    cols.iter()
                        .map(|col| {
                            let text = (col.value)(&item);
                            let content = if col.highlight {
                                highlight_matches(&text, &needle)
                            } else {
                                view! { <span>{text}</span> }.into_any()
                            };
                            view! { <td class=col.class>{content}</td> }
                        })
                        .collect_view()
                });
                let actions = (!read_only).then(|| {
                    let id = item.id();
                    let for_edit = item.clone();
                    view! {
                        <td class="table__actions">
                            {editable.then(|| view! {
                                <button
                                    class="btn btn--icon"
                                    title="Editar"
                                    disabled=move || busy.get()
                                    on:click=move |_| {
                                        draft.set(for_edit.clone());
                                        creating.set(false);
                                        form_open.set(true);
                                    }
                                >
                                    {icon("edit")}
                                </button>
                            })}
                            <button
                                class="btn btn--icon btn--danger"
                                title="Eliminar"
                                disabled=move || busy.get() || id.is_none()
                                on:click=move |_| {
                                    if let Some(id) = id {
                                        let c = ctl.get_value();
                                        spawn_local(async move {
                                            let _ = c.remove(id).await;
                                        });
                                    }
                                }
                            >
                                {icon("trash")}
                            </button>
                        </td>
                    }
                });
                view! { <tr>{cells}{actions}</tr> }
            })
            .collect_view()
            .into_any()
    };

    let form_view = move || {
        if !form_open.get() {
            return None;
        }
        let body = form.clone().map(|render| render(draft));
        let title = if creating.get_untracked() {
            format!("Nuevo: {}", T::element_name())
        } else {
            format!("Editar: {}", T::element_name())
        };
        Some(view! {
            <div class="modal-overlay">
                <div class="modal-content" on:click=|e| e.stop_propagation()>
                    <h2 class="modal-title">{title}</h2>
                    <div class="form">{body}</div>
                    <div class="form__actions">
                        <button class="btn btn--primary" disabled=move || busy.get() on:click=submit>
                            "Guardar"
                        </button>
                        <button class="btn" on:click=move |_| close_form()>
                            "Cancelar"
                        </button>
                    </div>
                </div>
            </div>
        })
    };

    let date_input = date_filter.then(|| {
        view! {
            <label class="filter-field">
                "Fecha"
                <input
                    type="date"
                    class="form__input"
                    prop:value=move || state.with(|s| s.filter.date.clone().unwrap_or_default())
                    on:change=move |ev| {
                        let value = event_target_value(&ev);
                        ctl.with_value(|c| c.set_date_filter(Some(value)));
                    }
                />
            </label>
        }
    });

    let category_select = category_filter.map(|filter| {
        view! {
            <label class="filter-field">
                {filter.label}
                <select
                    class="form__select"
                    prop:value=move || state.with(|s| s.filter.category.clone().unwrap_or_default())
                    on:change=move |ev| {
                        let value = event_target_value(&ev);
                        ctl.with_value(|c| c.set_category_filter(Some(value)));
                    }
                >
                    <option value="">"Todas"</option>
                    {move || {
                        filter
                            .options
                            .get()
                            .into_iter()
                            .map(|option| view! { <option value=option.clone()>{option.clone()}</option> })
                            .collect_view()
                    }}
                </select>
            </label>
        }
    });

    view! {
        <div class="page">
            <div class="page__header">
                <h1 class="page__title">{T::list_name()}</h1>
                <div class="page__toolbar">
                    {editable.then(|| view! {
                        <button class="btn btn--primary" disabled=move || busy.get() on:click=open_new>
                            {icon("plus")}
                            {format!(" Nuevo: {}", T::element_name())}
                        </button>
                    })}
                    <button class="btn" disabled=move || loading.get() on:click=reload title="Actualizar">
                        {icon("refresh")}
                    </button>
                    <button class="btn" on:click=export title="Exportar PDF">
                        {icon("download")}
                        " PDF"
                    </button>
                </div>
            </div>

            <div class="page__filters">
                <SearchInput
                    value=filter_text
                    on_change=Callback::new(move |text: String| ctl.with_value(|c| c.set_filter(text)))
                    placeholder="Buscar..."
                />
                {date_input}
                {category_select}
                <button class="btn btn--link" on:click=move |_| ctl.with_value(|c| c.clear_filters())>
                    "Limpiar filtros"
                </button>
            </div>

            <table class="table">
                <thead>
                    <tr>
                        {headers.into_iter().map(|h| view! { <th>{h}</th> }).collect_view()}
                        {(!read_only).then(|| view! { <th>"Acciones"</th> })}
                    </tr>
                </thead>
                <tbody>{rows}</tbody>
            </table>

            <PaginationControls
                current_page=Signal::derive(move || state.with(|s| s.current_page))
                total_pages=Signal::derive(move || ctl.with_value(|c| c.total_pages()))
                total_count=Signal::derive(move || ctl.with_value(|c| c.filtered_count()))
                page_size=Signal::derive(move || state.with(|s| s.page_size))
                on_page_change=Callback::new(move |page: usize| ctl.with_value(|c| c.set_page(page)))
                on_page_size_change=Callback::new(move |size: usize| ctl.with_value(|c| c.set_page_size(size)))
            />

            {form_view}
        </div>
    }
}
