use crate::shared::components::form_fields::{
    CheckboxField, DateField, NumberField, SelectField, TextAreaField,
};
use crate::shared::date_utils::{format_date, format_datetime, format_money};
use crate::shared::export::{ReportColumn, ReportExportable};
use crate::shared::http_api::RestApi;
use crate::shared::list_controller::{EntityListController, ListConfig};
use crate::shared::list_page::{
    pick_reference, reference_options, use_reference_list, CategoryFilter, EntityListPage,
    FormRenderer, ListColumn,
};
use crate::shared::notifications::use_notifications;
use contracts::domain::a002_client::entity::Client;
use contracts::domain::a006_sale::entity::{Sale, PAYMENT_METHODS};
use contracts::domain::a008_employee::entity::Employee;
use contracts::domain::common::{Entity, PersonRef};
use leptos::prelude::*;
use std::sync::Arc;

/// Sale instant, with the time when the backend sent one
fn sold_at(s: &Sale) -> String {
    match s.sold_at.as_deref() {
        Some(value) if value.contains('T') => format_datetime(value),
        Some(value) => format_date(value),
        None => "-".to_string(),
    }
}

fn person(p: &Option<PersonRef>) -> String {
    p.as_ref()
        .map(|r| r.full_name.clone())
        .unwrap_or_else(|| "-".to_string())
}

fn discount(s: &Sale) -> String {
    s.discount
        .filter(|d| *d > 0)
        .map(format_money)
        .unwrap_or_else(|| "-".to_string())
}

impl ReportExportable for Sale {
    fn report_title() -> &'static str {
        "REGISTRO DE VENTAS"
    }

    fn report_slug() -> &'static str {
        "ventas"
    }

    fn report_columns() -> Vec<ReportColumn> {
        vec![
            ReportColumn::new("FECHA").width(32.0).center(),
            ReportColumn::new("CLIENTE").width(40.0),
            ReportColumn::new("EMPLEADO").width(40.0),
            ReportColumn::new("ARTÍCULOS").width(20.0).center(),
            ReportColumn::new("MONTO").width(25.0).right(),
            ReportColumn::new("DESCUENTO").width(25.0).right(),
            ReportColumn::new("PAGO").width(25.0),
            ReportColumn::new("DEVOLUCIÓN").width(20.0).center(),
        ]
    }

    fn report_row(&self) -> Vec<String> {
        vec![
            sold_at(self),
            person(&self.client),
            person(&self.employee),
            self.item_count.to_string(),
            format_money(self.total_amount),
            discount(self),
            self.payment_method.clone(),
            if self.is_return { "Sí" } else { "No" }.to_string(),
        ]
    }
}

#[component]
#[allow(non_snake_case)]
pub fn SaleList() -> impl IntoView {
    let controller = EntityListController::new(
        RestApi::<Sale>::new(),
        use_notifications(),
        ListConfig::for_entity(),
    );

    let clients = use_reference_list::<PersonRef>(Client::resource());
    let employees = use_reference_list::<PersonRef>(Employee::resource());
    let methods: Vec<String> = PAYMENT_METHODS.iter().map(|m| m.to_string()).collect();
    let payment_filter = CategoryFilter {
        label: "Método de pago",
        options: Signal::stored(methods.clone()),
    };
    let method_options: Vec<(String, String)> =
        methods.into_iter().map(|m| (m.clone(), m)).collect();

    let columns = vec![
        ListColumn::new("Fecha", sold_at),
        ListColumn::new("Cliente", |s: &Sale| person(&s.client)).highlighted(),
        ListColumn::new("Empleado", |s: &Sale| person(&s.employee)).highlighted(),
        ListColumn::new("Artículos", |s: &Sale| s.item_count.to_string()).numeric(),
        ListColumn::new("Monto", |s: &Sale| format_money(s.total_amount)).numeric(),
        ListColumn::new("Descuento", discount).numeric(),
        ListColumn::new("Método de pago", |s: &Sale| s.payment_method.clone()).highlighted(),
        ListColumn::new("Devolución", |s: &Sale| {
            if s.is_return { "Sí" } else { "" }.to_string()
        }),
    ];

    let form: FormRenderer<Sale> = Arc::new(move |draft: RwSignal<Sale>| {
        let person_id = move |get: fn(&Sale) -> Option<&PersonRef>| {
            Signal::derive(move || {
                draft.with(|d| get(d).and_then(|p| p.id).map(|id| id.to_string()).unwrap_or_default())
            })
        };
        view! {
            <DateField
                label="Fecha de venta"
                value=Signal::derive(move || draft.with(|d| d.sold_at.clone()))
                on_input=Callback::new(move |v: Option<String>| draft.update(|d| d.sold_at = v))
            />
            <SelectField
                label="Cliente"
                placeholder="Sin cliente"
                options=reference_options(clients, |p: &PersonRef| (p.id, p.full_name.clone()))
                value=person_id(|d| d.client.as_ref())
                on_change=Callback::new(move |v: String| {
                    let picked = pick_reference(clients, &v, |p: &PersonRef| p.id);
                    draft.update(|d| d.client = picked);
                })
            />
            <SelectField
                label="Empleado"
                placeholder="Sin empleado"
                options=reference_options(employees, |p: &PersonRef| (p.id, p.full_name.clone()))
                value=person_id(|d| d.employee.as_ref())
                on_change=Callback::new(move |v: String| {
                    let picked = pick_reference(employees, &v, |p: &PersonRef| p.id);
                    draft.update(|d| d.employee = picked);
                })
            />
            <NumberField
                label="Cantidad de artículos"
                required=true
                min=1
                value=Signal::derive(move || draft.with(|d| d.item_count))
                on_input=Callback::new(move |v: i64| draft.update(|d| d.item_count = v))
            />
            <NumberField
                label="Monto total"
                required=true
                min=0
                value=Signal::derive(move || draft.with(|d| d.total_amount))
                on_input=Callback::new(move |v: i64| draft.update(|d| d.total_amount = v))
            />
            <NumberField
                label="Descuento"
                min=0
                value=Signal::derive(move || draft.with(|d| d.discount.unwrap_or(0)))
                on_input=Callback::new(move |v: i64| {
                    draft.update(|d| d.discount = Some(v).filter(|x| *x > 0))
                })
            />
            <SelectField
                label="Método de pago"
                required=true
                placeholder="Seleccione"
                options=method_options.clone()
                value=Signal::derive(move || draft.with(|d| d.payment_method.clone()))
                on_change=Callback::new(move |v: String| draft.update(|d| d.payment_method = v))
            />
            <CheckboxField
                label="Devolución"
                checked=Signal::derive(move || draft.with(|d| d.is_return))
                on_change=Callback::new(move |v: bool| draft.update(|d| d.is_return = v))
            />
            <TextAreaField
                label="Observaciones"
                value=Signal::derive(move || draft.with(|d| d.notes.clone().unwrap_or_default()))
                on_input=Callback::new(move |v: String| {
                    draft.update(|d| d.notes = Some(v).filter(|t| !t.trim().is_empty()))
                })
            />
        }
        .into_any()
    });

    view! {
        <EntityListPage
            controller=controller
            columns=columns
            form=form
            date_filter=true
            category_filter=payment_filter
        />
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_report_row() {
        let sale = Sale {
            id: Some(3),
            sold_at: Some("2024-06-01T15:04:05Z".into()),
            item_count: 2,
            total_amount: 12500,
            discount: Some(0),
            client: Some(PersonRef {
                id: Some(1),
                full_name: "Ana Luna".into(),
            }),
            payment_method: "Efectivo".into(),
            ..Default::default()
        };
        assert_eq!(
            sale.report_row(),
            vec!["01/06/2024 15:04", "Ana Luna", "-", "2", "$12.500", "-", "Efectivo", "No"]
        );
    }
}
