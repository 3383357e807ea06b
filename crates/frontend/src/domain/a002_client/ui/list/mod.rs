use crate::shared::components::form_fields::{DateField, TextField};
use crate::shared::date_utils::format_opt_date;
use crate::shared::export::{ReportColumn, ReportExportable};
use crate::shared::http_api::RestApi;
use crate::shared::list_controller::{EntityListController, ListConfig};
use crate::shared::list_page::{EntityListPage, FormRenderer, ListColumn};
use crate::shared::notifications::use_notifications;
use contracts::domain::a002_client::entity::Client;
use leptos::prelude::*;
use std::sync::Arc;

fn or_dash(value: &Option<String>) -> String {
    value
        .as_deref()
        .filter(|v| !v.trim().is_empty())
        .unwrap_or("-")
        .to_string()
}

impl ReportExportable for Client {
    fn report_title() -> &'static str {
        "LISTA DE CLIENTES"
    }

    fn report_slug() -> &'static str {
        "clientes"
    }

    fn report_columns() -> Vec<ReportColumn> {
        vec![
            ReportColumn::new("NOMBRE COMPLETO").width(50.0),
            ReportColumn::new("TELÉFONO").width(30.0),
            ReportColumn::new("CORREO").width(50.0),
            ReportColumn::new("REDES SOCIALES").width(40.0),
        ]
    }

    fn report_row(&self) -> Vec<String> {
        vec![
            self.full_name.clone(),
            or_dash(&self.phone),
            or_dash(&self.email),
            or_dash(&self.social_media),
        ]
    }
}

#[component]
#[allow(non_snake_case)]
pub fn ClientList() -> impl IntoView {
    let controller = EntityListController::new(
        RestApi::<Client>::new(),
        use_notifications(),
        ListConfig::for_entity(),
    );

    let columns = vec![
        ListColumn::new("Nombre", |c: &Client| c.full_name.clone()).highlighted(),
        ListColumn::new("Teléfono", |c: &Client| or_dash(&c.phone)).highlighted(),
        ListColumn::new("Correo", |c: &Client| or_dash(&c.email)).highlighted(),
        ListColumn::new("Redes sociales", |c: &Client| or_dash(&c.social_media)),
        ListColumn::new("Nacimiento", |c: &Client| format_opt_date(c.birth_date.as_deref())),
    ];

    let form: FormRenderer<Client> = Arc::new(|draft: RwSignal<Client>| {
        let text = move |get: fn(&Client) -> Option<String>| {
            Signal::derive(move || draft.with(|d| get(d).unwrap_or_default()))
        };
        view! {
            <TextField
                label="Nombre completo"
                required=true
                value=Signal::derive(move || draft.with(|d| d.full_name.clone()))
                on_input=Callback::new(move |v: String| draft.update(|d| d.full_name = v))
            />
            <TextField
                label="Teléfono"
                input_type="tel"
                value=text(|d| d.phone.clone())
                on_input=Callback::new(move |v: String| draft.update(|d| d.phone = Some(v)))
            />
            <TextField
                label="Correo"
                input_type="email"
                placeholder="cliente@correo.com"
                value=text(|d| d.email.clone())
                on_input=Callback::new(move |v: String| draft.update(|d| d.email = Some(v)))
            />
            <TextField
                label="Redes sociales"
                value=text(|d| d.social_media.clone())
                on_input=Callback::new(move |v: String| draft.update(|d| d.social_media = Some(v)))
            />
            <DateField
                label="Fecha de nacimiento"
                value=Signal::derive(move || draft.with(|d| d.birth_date.clone()))
                on_input=Callback::new(move |v: Option<String>| draft.update(|d| d.birth_date = v))
            />
        }
        .into_any()
    });

    view! { <EntityListPage controller=controller columns=columns form=form /> }
}
