//! Page keys, their sidebar labels and the components behind them.

use crate::domain::a001_service_category::ui::list::ServiceCategoryList;
use crate::domain::a002_client::ui::list::ClientList;
use crate::domain::a003_service::ui::list::ServiceList;
use crate::domain::a004_product::ui::list::ProductList;
use crate::domain::a005_purchase::ui::list::PurchaseList;
use crate::domain::a006_sale::ui::list::SaleList;
use crate::domain::a007_expense::ui::list::ExpenseList;
use crate::domain::a008_employee::ui::list::EmployeeList;
use crate::domain::a009_audit_log::ui::list::AuditLogList;
use crate::domain::a010_report::ui::page::ReportsPage;
use leptos::prelude::*;

pub const DEFAULT_PAGE: &str = "a002_client";

/// (key, label, icon)
pub const PAGES: &[(&str, &str, &str)] = &[
    ("a001_service_category", "Categorías de servicios", "categories"),
    ("a002_client", "Clientes", "customers"),
    ("a003_service", "Servicios", "services"),
    ("a004_product", "Productos", "products"),
    ("a005_purchase", "Compras", "purchases"),
    ("a006_sale", "Ventas", "sales"),
    ("a007_expense", "Gastos", "expenses"),
    ("a008_employee", "Empleados", "employees"),
    ("a009_audit_log", "Auditoría", "audit"),
    ("a010_report", "Reportes", "reports"),
];

pub fn is_known_page(key: &str) -> bool {
    PAGES.iter().any(|(k, _, _)| *k == key)
}

pub fn page_label(key: &str) -> &'static str {
    PAGES
        .iter()
        .find(|(k, _, _)| *k == key)
        .map(|(_, label, _)| *label)
        .unwrap_or("Página desconocida")
}

pub fn render_page(key: &str) -> AnyView {
    match key {
        "a001_service_category" => view! { <ServiceCategoryList /> }.into_any(),
        "a002_client" => view! { <ClientList /> }.into_any(),
        "a003_service" => view! { <ServiceList /> }.into_any(),
        "a004_product" => view! { <ProductList /> }.into_any(),
        "a005_purchase" => view! { <PurchaseList /> }.into_any(),
        "a006_sale" => view! { <SaleList /> }.into_any(),
        "a007_expense" => view! { <ExpenseList /> }.into_any(),
        "a008_employee" => view! { <EmployeeList /> }.into_any(),
        "a009_audit_log" => view! { <AuditLogList /> }.into_any(),
        "a010_report" => view! { <ReportsPage /> }.into_any(),
        _ => view! {
            <div class="page page--empty">{format!("Página desconocida: {}", key)}</div>
        }
        .into_any(),
    }
}
