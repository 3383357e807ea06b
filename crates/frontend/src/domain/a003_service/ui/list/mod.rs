use crate::shared::components::form_fields::{
    CheckboxField, NumberField, SelectField, TextAreaField, TextField,
};
use crate::shared::date_utils::format_money;
use crate::shared::export::{ReportColumn, ReportExportable};
use crate::shared::http_api::RestApi;
use crate::shared::list_controller::{EntityListController, ListConfig};
use crate::shared::list_page::{
    pick_reference, reference_options, use_reference_list, CategoryFilter, EntityListPage,
    FormRenderer, ListColumn,
};
use crate::shared::notifications::use_notifications;
use contracts::domain::a001_service_category::entity::ServiceCategory;
use contracts::domain::a003_service::entity::Service;
use contracts::domain::common::{CategoryRef, Entity};
use leptos::prelude::*;
use std::sync::Arc;

fn category_name(s: &Service) -> String {
    s.category
        .as_ref()
        .map(|c| c.description.clone())
        .unwrap_or_else(|| "Sin categoría".to_string())
}

fn status(active: bool) -> String {
    if active { "Activo" } else { "Inactivo" }.to_string()
}

impl ReportExportable for Service {
    fn report_title() -> &'static str {
        "CATÁLOGO DE SERVICIOS"
    }

    fn report_slug() -> &'static str {
        "servicios"
    }

    fn report_columns() -> Vec<ReportColumn> {
        vec![
            ReportColumn::new("NOMBRE DEL SERVICIO").width(45.0),
            ReportColumn::new("DESCRIPCIÓN").width(60.0),
            ReportColumn::new("PRECIO BASE").width(25.0).right(),
            ReportColumn::new("CATEGORÍA").width(30.0),
            ReportColumn::new("ESTADO").width(20.0).center(),
        ]
    }

    fn report_row(&self) -> Vec<String> {
        vec![
            self.name.clone(),
            self.description.clone().unwrap_or_else(|| "-".to_string()),
            format_money(self.base_price),
            category_name(self),
            status(self.active),
        ]
    }
}

#[component]
#[allow(non_snake_case)]
pub fn ServiceList() -> impl IntoView {
    let controller = EntityListController::new(
        RestApi::<Service>::new(),
        use_notifications(),
        ListConfig::for_entity(),
    );

    let categories = use_reference_list::<CategoryRef>(ServiceCategory::resource());
    let category_filter = CategoryFilter {
        label: "Categoría",
        options: Signal::derive(move || {
            categories.with(|list| list.iter().map(|c| c.description.clone()).collect())
        }),
    };

    let columns = vec![
        ListColumn::new("Nombre", |s: &Service| s.name.clone()).highlighted(),
        ListColumn::new("Descripción", |s: &Service| s.description.clone().unwrap_or_default())
            .highlighted(),
        ListColumn::new("Precio base", |s: &Service| format_money(s.base_price)).numeric(),
        ListColumn::new("Categoría", category_name).highlighted(),
        ListColumn::new("Estado", |s: &Service| status(s.active)),
    ];

    let form: FormRenderer<Service> = Arc::new(move |draft: RwSignal<Service>| {
        view! {
            <TextField
                label="Nombre"
                required=true
                value=Signal::derive(move || draft.with(|d| d.name.clone()))
                on_input=Callback::new(move |v: String| draft.update(|d| d.name = v))
            />
            <TextAreaField
                label="Descripción"
                value=Signal::derive(move || draft.with(|d| d.description.clone().unwrap_or_default()))
                on_input=Callback::new(move |v: String| {
                    draft.update(|d| d.description = Some(v).filter(|t| !t.trim().is_empty()))
                })
            />
            <NumberField
                label="Precio base"
                required=true
                min=1
                value=Signal::derive(move || draft.with(|d| d.base_price))
                on_input=Callback::new(move |v: i64| draft.update(|d| d.base_price = v))
            />
            <SelectField
                label="Categoría"
                required=true
                placeholder="Seleccione una categoría"
                options=reference_options(categories, |c: &CategoryRef| (c.id, c.description.clone()))
                value=Signal::derive(move || {
                    draft.with(|d| {
                        d.category
                            .as_ref()
                            .and_then(|c| c.id)
                            .map(|id| id.to_string())
                            .unwrap_or_default()
                    })
                })
                on_change=Callback::new(move |v: String| {
                    let picked = pick_reference(categories, &v, |c: &CategoryRef| c.id);
                    draft.update(|d| d.category = picked);
                })
            />
            <CheckboxField
                label="Activo"
                checked=Signal::derive(move || draft.with(|d| d.active))
                on_change=Callback::new(move |v: bool| draft.update(|d| d.active = v))
            />
        }
        .into_any()
    });

    view! {
        <EntityListPage
            controller=controller
            columns=columns
            form=form
            category_filter=category_filter
        />
    }
}
