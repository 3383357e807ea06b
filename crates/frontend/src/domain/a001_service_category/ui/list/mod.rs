use crate::shared::components::form_fields::TextField;
use crate::shared::export::{ReportColumn, ReportExportable};
use crate::shared::http_api::RestApi;
use crate::shared::list_controller::{EntityListController, ListConfig};
use crate::shared::list_page::{EntityListPage, FormRenderer, ListColumn};
use crate::shared::notifications::use_notifications;
use contracts::domain::a001_service_category::entity::ServiceCategory;
use leptos::prelude::*;
use std::sync::Arc;

impl ReportExportable for ServiceCategory {
    fn report_title() -> &'static str {
        "LISTA DE CATEGORÍAS DE SERVICIOS"
    }

    fn report_slug() -> &'static str {
        "categorias-servicios"
    }

    fn report_columns() -> Vec<ReportColumn> {
        vec![
            ReportColumn::new("ID").width(20.0).center(),
            ReportColumn::new("DESCRIPCIÓN"),
        ]
    }

    fn report_row(&self) -> Vec<String> {
        vec![
            self.id.map(|id| id.to_string()).unwrap_or_default(),
            self.description.clone(),
        ]
    }
}

#[component]
#[allow(non_snake_case)]
pub fn ServiceCategoryList() -> impl IntoView {
    let controller = EntityListController::new(
        RestApi::<ServiceCategory>::new(),
        use_notifications(),
        ListConfig::for_entity(),
    );

    let columns = vec![
        ListColumn::new("ID", |c: &ServiceCategory| {
            c.id.map(|id| id.to_string()).unwrap_or_default()
        }),
        ListColumn::new("Descripción", |c: &ServiceCategory| c.description.clone()).highlighted(),
    ];

    let form: FormRenderer<ServiceCategory> = Arc::new(|draft: RwSignal<ServiceCategory>| {
        view! {
            <TextField
                label="Descripción"
                required=true
                placeholder="Ej: Coloración"
                value=Signal::derive(move || draft.with(|d| d.description.clone()))
                on_input=Callback::new(move |v: String| draft.update(|d| d.description = v))
            />
        }
        .into_any()
    });

    view! { <EntityListPage controller=controller columns=columns form=form /> }
}
