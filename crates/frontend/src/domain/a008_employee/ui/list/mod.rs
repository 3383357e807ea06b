use crate::shared::components::form_fields::{CheckboxField, DateField, NumberField, TextField};
use crate::shared::date_utils::{format_money, format_opt_date};
use crate::shared::export::{ReportColumn, ReportExportable};
use crate::shared::http_api::RestApi;
use crate::shared::list_controller::{EntityListController, ListConfig};
use crate::shared::list_page::{EntityListPage, FormRenderer, ListColumn};
use crate::shared::notifications::use_notifications;
use contracts::domain::a008_employee::entity::Employee;
use leptos::prelude::*;
use std::sync::Arc;

fn commission(e: &Employee) -> String {
    e.commission_percent
        .map(|c| format!("{}%", c))
        .unwrap_or_else(|| "-".to_string())
}

impl ReportExportable for Employee {
    fn report_title() -> &'static str {
        "LISTA DE EMPLEADOS"
    }

    fn report_slug() -> &'static str {
        "empleados"
    }

    fn report_columns() -> Vec<ReportColumn> {
        vec![
            ReportColumn::new("NOMBRE COMPLETO").width(50.0),
            ReportColumn::new("CORREO").width(50.0),
            ReportColumn::new("TELÉFONO").width(30.0),
            ReportColumn::new("SUELDO BASE").width(30.0).right(),
            ReportColumn::new("COMISIÓN").width(20.0).center(),
            ReportColumn::new("INGRESO").width(25.0).center(),
        ]
    }

    fn report_row(&self) -> Vec<String> {
        vec![
            self.full_name.clone(),
            self.email.clone().unwrap_or_else(|| "-".to_string()),
            self.phone.clone().unwrap_or_else(|| "-".to_string()),
            format_money(self.base_salary),
            commission(self),
            format_opt_date(self.hired_on.as_deref()),
        ]
    }
}

#[component]
#[allow(non_snake_case)]
pub fn EmployeeList() -> impl IntoView {
    let controller = EntityListController::new(
        RestApi::<Employee>::new(),
        use_notifications(),
        ListConfig::for_entity(),
    );

    let columns = vec![
        ListColumn::new("Nombre", |e: &Employee| e.full_name.clone()).highlighted(),
        ListColumn::new("Correo", |e: &Employee| e.email.clone().unwrap_or_default()).highlighted(),
        ListColumn::new("Teléfono", |e: &Employee| e.phone.clone().unwrap_or_default()).highlighted(),
        ListColumn::new("Sueldo base", |e: &Employee| format_money(e.base_salary)).numeric(),
        ListColumn::new("Comisión", commission).numeric(),
        ListColumn::new("Ingreso", |e: &Employee| format_opt_date(e.hired_on.as_deref())),
        ListColumn::new("Estado", |e: &Employee| {
            if e.active { "Activo" } else { "Inactivo" }.to_string()
        }),
    ];

    let form: FormRenderer<Employee> = Arc::new(|draft: RwSignal<Employee>| {
        let text = move |get: fn(&Employee) -> Option<String>| {
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
                label="Correo"
                input_type="email"
                value=text(|d| d.email.clone())
                on_input=Callback::new(move |v: String| draft.update(|d| d.email = Some(v)))
            />
            <TextField
                label="Teléfono"
                input_type="tel"
                value=text(|d| d.phone.clone())
                on_input=Callback::new(move |v: String| draft.update(|d| d.phone = Some(v)))
            />
            <NumberField
                label="Sueldo base"
                min=0
                value=Signal::derive(move || draft.with(|d| d.base_salary))
                on_input=Callback::new(move |v: i64| draft.update(|d| d.base_salary = v))
            />
            <NumberField
                label="Comisión (%)"
                min=0
                value=Signal::derive(move || draft.with(|d| d.commission_percent.unwrap_or(0)))
                on_input=Callback::new(move |v: i64| {
                    draft.update(|d| d.commission_percent = Some(v).filter(|c| *c > 0))
                })
            />
            <DateField
                label="Fecha de ingreso"
                value=Signal::derive(move || draft.with(|d| d.hired_on.clone()))
                on_input=Callback::new(move |v: Option<String>| draft.update(|d| d.hired_on = v))
            />
            <CheckboxField
                label="Activo"
                checked=Signal::derive(move || draft.with(|d| d.active))
                on_change=Callback::new(move |v: bool| draft.update(|d| d.active = v))
            />
        }
        .into_any()
    });

    view! { <EntityListPage controller=controller columns=columns form=form /> }
}
