use crate::shared::date_utils::format_datetime;
use crate::shared::export::{ReportColumn, ReportExportable};
use crate::shared::http_api::RestApi;
use crate::shared::list_controller::{EntityListController, ListConfig};
use crate::shared::list_page::{CategoryFilter, EntityListPage, ListColumn};
use crate::shared::notifications::use_notifications;
use contracts::domain::a009_audit_log::entity::AuditEntry;
use leptos::prelude::*;
use std::collections::BTreeSet;

fn happened_at(a: &AuditEntry) -> String {
    a.happened_at.as_deref().map(format_datetime).unwrap_or_default()
}

fn record(a: &AuditEntry) -> String {
    match (&a.table_name, a.record_id) {
        (Some(table), Some(id)) => format!("{} #{}", table, id),
        (Some(table), None) => table.clone(),
        (None, Some(id)) => format!("#{}", id),
        (None, None) => "-".to_string(),
    }
}

/// Distinct actions present in the log, sorted
fn actions_of(items: &[AuditEntry]) -> Vec<String> {
    items
        .iter()
        .filter(|a| !a.action.is_empty())
        .map(|a| a.action.clone())
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect()
}

impl ReportExportable for AuditEntry {
    fn report_title() -> &'static str {
        "REGISTRO DE AUDITORÍA"
    }

    fn report_slug() -> &'static str {
        "auditoria"
    }

    fn report_columns() -> Vec<ReportColumn> {
        vec![
            ReportColumn::new("FECHA Y HORA").width(32.0).center(),
            ReportColumn::new("USUARIO").width(30.0),
            ReportColumn::new("ACCIÓN").width(25.0),
            ReportColumn::new("REGISTRO").width(35.0),
            ReportColumn::new("DETALLES").width(70.0),
            ReportColumn::new("IP").width(25.0),
        ]
    }

    fn report_row(&self) -> Vec<String> {
        vec![
            happened_at(self),
            self.user_name.clone(),
            self.action.clone(),
            record(self),
            self.details.clone().unwrap_or_default(),
            self.ip_address.clone().unwrap_or_default(),
        ]
    }
}

/// Read-only: no form and no row actions
#[component]
#[allow(non_snake_case)]
pub fn AuditLogList() -> impl IntoView {
    let controller = EntityListController::new(
        RestApi::<AuditEntry>::new(),
        use_notifications(),
        ListConfig::for_entity().with_page_size(25),
    );

    let state = controller.state();
    let action_filter = CategoryFilter {
        label: "Acción",
        options: Signal::derive(move || state.with(|s| actions_of(&s.items))),
    };

    let columns = vec![
        ListColumn::new("Fecha y hora", happened_at),
        ListColumn::new("Usuario", |a: &AuditEntry| a.user_name.clone()).highlighted(),
        ListColumn::new("Acción", |a: &AuditEntry| a.action.clone()).highlighted(),
        ListColumn::new("Registro", record).highlighted(),
        ListColumn::new("Detalles", |a: &AuditEntry| a.details.clone().unwrap_or_default())
            .highlighted(),
        ListColumn::new("IP", |a: &AuditEntry| a.ip_address.clone().unwrap_or_default()),
    ];

    view! {
        <EntityListPage
            controller=controller
            columns=columns
            date_filter=true
            category_filter=action_filter
        />
    }
}
