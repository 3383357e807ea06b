use crate::shared::components::form_fields::{DateField, NumberField, SelectField, TextField};
use crate::shared::date_utils::{format_money, format_opt_date};
use crate::shared::export::{ReportColumn, ReportExportable};
use crate::shared::http_api::RestApi;
use crate::shared::list_controller::{EntityListController, ListConfig};
use crate::shared::list_page::{
    pick_reference, reference_options, use_reference_list, CategoryFilter, EntityListPage,
    FormRenderer, ListColumn,
};
use crate::shared::notifications::use_notifications;
use contracts::domain::a007_expense::entity::{Expense, EXPENSE_CATEGORIES};
use contracts::domain::a008_employee::entity::Employee;
use contracts::domain::common::{Entity, PersonRef};
use leptos::prelude::*;
use std::sync::Arc;

fn employee_name(e: &Expense) -> String {
    e.employee
        .as_ref()
        .map(|p| p.full_name.clone())
        .unwrap_or_else(|| "-".to_string())
}

impl ReportExportable for Expense {
    fn report_title() -> &'static str {
        "REGISTRO DE GASTOS"
    }

    fn report_slug() -> &'static str {
        "gastos"
    }

    fn report_columns() -> Vec<ReportColumn> {
        vec![
            ReportColumn::new("FECHA").width(25.0).center(),
            ReportColumn::new("DESCRIPCIÓN").width(65.0),
            ReportColumn::new("CATEGORÍA").width(35.0),
            ReportColumn::new("EMPLEADO").width(40.0),
            ReportColumn::new("MONTO").width(30.0).right(),
        ]
    }

    fn report_row(&self) -> Vec<String> {
        vec![
            format_opt_date(self.expense_date.as_deref()),
            self.description.clone(),
            self.category.clone(),
            employee_name(self),
            format_money(self.amount),
        ]
    }
}

#[component]
#[allow(non_snake_case)]
pub fn ExpenseList() -> impl IntoView {
    let controller = EntityListController::new(
        RestApi::<Expense>::new(),
        use_notifications(),
        ListConfig::for_entity(),
    );

    let employees = use_reference_list::<PersonRef>(Employee::resource());
    let categories: Vec<String> = EXPENSE_CATEGORIES.iter().map(|c| c.to_string()).collect();
    let category_filter = CategoryFilter {
        label: "Categoría",
        options: Signal::stored(categories.clone()),
    };
    let category_options: Vec<(String, String)> =
        categories.into_iter().map(|c| (c.clone(), c)).collect();

    let columns = vec![
        ListColumn::new("Fecha", |e: &Expense| format_opt_date(e.expense_date.as_deref())),
        ListColumn::new("Descripción", |e: &Expense| e.description.clone()).highlighted(),
        ListColumn::new("Categoría", |e: &Expense| e.category.clone()).highlighted(),
        ListColumn::new("Empleado", employee_name).highlighted(),
        ListColumn::new("Monto", |e: &Expense| format_money(e.amount)).numeric(),
    ];

    let form: FormRenderer<Expense> = Arc::new(move |draft: RwSignal<Expense>| {
        view! {
            <TextField
                label="Descripción"
                required=true
                value=Signal::derive(move || draft.with(|d| d.description.clone()))
                on_input=Callback::new(move |v: String| draft.update(|d| d.description = v))
            />
            <NumberField
                label="Monto"
                required=true
                min=1
                value=Signal::derive(move || draft.with(|d| d.amount))
                on_input=Callback::new(move |v: i64| draft.update(|d| d.amount = v))
            />
            <DateField
                label="Fecha"
                required=true
                value=Signal::derive(move || draft.with(|d| d.expense_date.clone()))
                on_input=Callback::new(move |v: Option<String>| draft.update(|d| d.expense_date = v))
            />
            <SelectField
                label="Categoría"
                placeholder="Seleccione una categoría"
                options=category_options.clone()
                value=Signal::derive(move || draft.with(|d| d.category.clone()))
                on_change=Callback::new(move |v: String| draft.update(|d| d.category = v))
            />
            <SelectField
                label="Empleado"
                placeholder="Sin empleado"
                options=reference_options(employees, |p: &PersonRef| (p.id, p.full_name.clone()))
                value=Signal::derive(move || {
                    draft.with(|d| {
                        d.employee.as_ref().and_then(|p| p.id).map(|id| id.to_string()).unwrap_or_default()
                    })
                })
                on_change=Callback::new(move |v: String| {
                    let picked = pick_reference(employees, &v, |p: &PersonRef| p.id);
                    draft.update(|d| d.employee = picked);
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
            category_filter=category_filter
        />
    }
}
