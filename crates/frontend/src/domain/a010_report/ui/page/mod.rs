//! Period reports: pick a kind and a date range, the backend computes the
//! rows. Read-only, printable like the entity lists.

use crate::shared::api_utils::api_url;
use crate::shared::components::form_fields::{DateField, SelectField};
use crate::shared::date_utils::{format_date, format_money};
use crate::shared::export::{JsPdfExporter, PdfExportPort, ReportColumn, ReportDocument};
use crate::shared::http_api::fetch_json_with;
use crate::shared::icons::icon;
use crate::shared::list_controller::{ApiError, NotificationPort};
use crate::shared::notifications::use_notifications;
use chrono::NaiveDateTime;
use contracts::domain::a010_report::report::{
    AppointmentReportRow, EmployeeReportRow, ProductReportRow, ReportKind, ReportPeriod,
    ReportResponse, SalesReportRow, DEFAULT_PERIOD_DAYS,
};
use futures::future::{AbortHandle, Abortable};
use leptos::prelude::*;
use leptos::task::spawn_local;
use serde::de::DeserializeOwned;

/// Printable table of one report answer
#[derive(Debug, Clone, PartialEq)]
pub struct ReportTable {
    pub columns: Vec<ReportColumn>,
    pub rows: Vec<Vec<String>>,
    /// Totals shown under the table, sales only
    pub summary: Option<String>,
}

impl ReportTable {
    fn new(columns: Vec<ReportColumn>, rows: Vec<Vec<String>>) -> Self {
        Self {
            columns,
            rows,
            summary: None,
        }
    }
}

pub fn sales_table(rows: &[SalesReportRow]) -> ReportTable {
    let income: i64 = rows.iter().map(|r| r.total).sum();
    ReportTable {
        summary: Some(format!(
            "Total de ventas: {} | Ingresos totales: {}",
            rows.len(),
            format_money(income)
        )),
        ..ReportTable::new(
            vec![
                ReportColumn::new("FECHA").width(25.0).center(),
                ReportColumn::new("CLIENTE"),
                ReportColumn::new("SERVICIO"),
                ReportColumn::new("EMPLEADO"),
                ReportColumn::new("TOTAL").width(30.0).right(),
            ],
            rows.iter()
                .map(|r| {
                    vec![
                        format_date(&r.date),
                        r.client.clone(),
                        r.service.clone(),
                        r.employee.clone(),
                        format_money(r.total),
                    ]
                })
                .collect(),
        )
    }
}

pub fn appointments_table(rows: &[AppointmentReportRow]) -> ReportTable {
    ReportTable::new(
        vec![
            ReportColumn::new("FECHA").width(25.0).center(),
            ReportColumn::new("HORA").width(18.0).center(),
            ReportColumn::new("CLIENTE"),
            ReportColumn::new("SERVICIO"),
            ReportColumn::new("EMPLEADO"),
            ReportColumn::new("ESTADO").width(25.0).center(),
        ],
        rows.iter()
            .map(|r| {
                vec![
                    format_date(&r.date),
                    r.time.clone(),
                    r.client.clone(),
                    r.service.clone(),
                    r.employee.clone(),
                    r.status.clone(),
                ]
            })
            .collect(),
    )
}

pub fn products_table(rows: &[ProductReportRow]) -> ReportTable {
    ReportTable::new(
        vec![
            ReportColumn::new("PRODUCTO"),
            ReportColumn::new("CATEGORÍA"),
            ReportColumn::new("STOCK").width(18.0).center(),
            ReportColumn::new("STOCK MÍN.").width(22.0).center(),
            ReportColumn::new("PRECIO").width(28.0).right(),
            ReportColumn::new("ESTADO").width(25.0).center(),
        ],
        rows.iter()
            .map(|r| {
                vec![
                    r.name.clone(),
                    r.category.clone(),
                    r.stock.to_string(),
                    r.min_stock.to_string(),
                    format_money(r.price),
                    if r.is_low_stock() { "Stock Bajo" } else { "OK" }.to_string(),
                ]
            })
            .collect(),
    )
}

pub fn employees_table(rows: &[EmployeeReportRow]) -> ReportTable {
    ReportTable::new(
        vec![
            ReportColumn::new("EMPLEADO"),
            ReportColumn::new("ÁREA"),
            ReportColumn::new("CITAS").width(20.0).center(),
            ReportColumn::new("VENTAS").width(20.0).center(),
            ReportColumn::new("INGRESOS").width(32.0).right(),
        ],
        rows.iter()
            .map(|r| {
                vec![
                    r.name.clone(),
                    r.area.clone(),
                    r.appointments.to_string(),
                    r.sales.to_string(),
                    format_money(r.revenue),
                ]
            })
            .collect(),
    )
}

pub fn report_document(
    kind: ReportKind,
    period: &ReportPeriod,
    table: &ReportTable,
    now: NaiveDateTime,
) -> ReportDocument {
    let document = ReportDocument::table(
        format!("REPORTE DE {}", kind.label().to_uppercase()),
        table.columns.clone(),
        table.rows.clone(),
        now,
    )
    .with_filter_line(Some(format!(
        "Período: {} al {}",
        format_date(&period.from),
        format_date(&period.to)
    )))
    .with_file_name(format!(
        "reporte-{}-{}.pdf",
        kind.slug(),
        now.format("%Y-%m-%d")
    ));

    match &table.summary {
        Some(summary) => document.with_total_line(summary.clone()),
        None => document,
    }
}

async fn fetch_rows<R: DeserializeOwned + Default>(
    kind: ReportKind,
    period: &ReportPeriod,
) -> Result<Vec<R>, ApiError> {
    let url = api_url(&format!("reportes/{}", kind.slug()));
    let response: ReportResponse<R> = fetch_json_with(&url, period).await?;
    Ok(response.datos)
}

async fn fetch_report(kind: ReportKind, period: &ReportPeriod) -> Result<ReportTable, ApiError> {
    log::debug!("Loading report {} {:?}", kind.slug(), period);
    Ok(match kind {
        ReportKind::Sales => sales_table(&fetch_rows(kind, period).await?),
        ReportKind::Appointments => appointments_table(&fetch_rows(kind, period).await?),
        ReportKind::Products => products_table(&fetch_rows(kind, period).await?),
        ReportKind::Employees => employees_table(&fetch_rows(kind, period).await?),
    })
}

#[component]
#[allow(non_snake_case)]
pub fn ReportsPage() -> impl IntoView {
    let notifications = use_notifications();
    let today = chrono::Local::now().date_naive();

    let kind = RwSignal::new(ReportKind::default());
    let period = RwSignal::new(ReportPeriod::ending_on(today, DEFAULT_PERIOD_DAYS));
    let table = RwSignal::new(None::<ReportTable>);
    let loading = RwSignal::new(false);
    // Only the newest request may land; teardown aborts it
    let running = StoredValue::new(None::<AbortHandle>);

    let load = move || {
        let kind = kind.get_untracked();
        let period = period.get_untracked();
        if let Err(message) = period.validate() {
            notifications.error(&message);
            return;
        }

        let (handle, registration) = AbortHandle::new_pair();
        if let Some(previous) = running.try_update_value(|r| r.replace(handle)).flatten() {
            previous.abort();
        }
        loading.set(true);

        spawn_local(async move {
            match Abortable::new(fetch_report(kind, &period), registration).await {
                Err(_superseded) => return,
                Ok(Ok(result)) => {
                    log::debug!("Report {}: {} rows", kind.slug(), result.rows.len());
                    table.try_set(Some(result));
                }
                Ok(Err(e)) => {
                    log::error!("Failed to load report {}: {}", kind.slug(), e);
                    notifications.error(&format!("Error al cargar reporte: {}", e));
                }
            }
            loading.try_set(false);
        });
    };

    load();
    on_cleanup(move || {
        if let Some(handle) = running.try_update_value(|r| r.take()).flatten() {
            handle.abort();
        }
    });

    let export = move |_| {
        let Some(current) = table.get_untracked() else {
            notifications.info("No hay datos para exportar");
            return;
        };
        if current.rows.is_empty() {
            notifications.info("No hay datos para exportar");
            return;
        }
        let now = chrono::Local::now().naive_local();
        let document = report_document(kind.get_untracked(), &period.get_untracked(), &current, now);
        spawn_local(async move {
            match JsPdfExporter.export(&document).await {
                Ok(()) => notifications.success("Reporte exportado exitosamente"),
                Err(e) => {
                    log::error!("Report export failed: {}", e);
                    notifications.error(&format!("Error al generar el PDF: {}", e));
                }
            }
        });
    };

    let kind_options = Signal::stored(
        ReportKind::ALL
            .iter()
            .map(|k| (k.slug().to_string(), k.label().to_string()))
            .collect::<Vec<_>>(),
    );

    let body = move || {
        let Some(current) = table.get() else {
            let message = if loading.get() { "Cargando..." } else { "Sin datos" };
            return view! { <p class="table__empty">{message}</p> }.into_any();
        };
        let span = current.columns.len().to_string();
        let rows = if current.rows.is_empty() {
            view! {
                <tr><td class="table__empty" colspan=span>"No hay registros en el período"</td></tr>
            }
            .into_any()
        } else {
            current
                .rows
                .into_iter()
                .map(|cells| {
                    view! {
                        <tr>{cells.into_iter().map(|cell| view! { <td>{cell}</td> }).collect_view()}</tr>
                    }
                })
                .collect_view()
                .into_any()
        };
        view! {
            <table class="table">
                <thead>
                    <tr>
                        {current.columns.iter().map(|c| view! { <th>{c.header}</th> }).collect_view()}
                    </tr>
                </thead>
                <tbody>{rows}</tbody>
            </table>
            {current.summary.map(|summary| view! { <p class="report__summary">{summary}</p> })}
        }
        .into_any()
    };

    view! {
        <div class="page">
            <div class="page__header">
                <h1 class="page__title">"Reportes"</h1>
                <div class="page__toolbar">
                    <button class="btn" disabled=move || loading.get() on:click=move |_| load() title="Generar">
                        {icon("refresh")}
                        " Generar"
                    </button>
                    <button class="btn" on:click=export title="Exportar PDF">
                        {icon("download")}
                        " PDF"
                    </button>
                </div>
            </div>

            <div class="page__filters">
                <SelectField
                    label="Tipo de reporte"
                    value=Signal::derive(move || kind.get().slug().to_string())
                    on_change=Callback::new(move |slug: String| {
                        if let Some(selected) = ReportKind::from_slug(&slug) {
                            kind.set(selected);
                            table.set(None);
                            load();
                        }
                    })
                    options=kind_options
                />
                <DateField
                    label="Desde"
                    value=Signal::derive(move || Some(period.with(|p| p.from.clone())))
                    on_input=Callback::new(move |date: Option<String>| {
                        period.update(|p| p.from = date.unwrap_or_default())
                    })
                />
                <DateField
                    label="Hasta"
                    value=Signal::derive(move || Some(period.with(|p| p.to.clone())))
                    on_input=Callback::new(move |date: Option<String>| {
                        period.update(|p| p.to = date.unwrap_or_default())
                    })
                />
            </div>

            {body}
        </div>
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn now() -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2024, 3, 15)
            .and_then(|d| d.and_hms_opt(18, 5, 0))
            .unwrap()
    }

    fn sale(client: &str, total: i64) -> SalesReportRow {
        SalesReportRow {
            date: "2024-03-01".into(),
            client: client.into(),
            service: "Corte".into(),
            employee: "Ana López".into(),
            total,
            ..Default::default()
        }
    }

    #[test]
    fn test_sales_summary() {
        let table = sales_table(&[sale("María", 25000), sale("Juan", 15000)]);
        assert_eq!(table.rows.len(), 2);
        assert_eq!(table.rows[0][0], "01/03/2024");
        assert_eq!(table.rows[0][4], "$25.000");
        assert_eq!(
            table.summary.as_deref(),
            Some("Total de ventas: 2 | Ingresos totales: $40.000")
        );
    }

    #[test]
    fn test_product_status_column() {
        let rows = vec![
            ProductReportRow {
                name: "Tinte Rubio".into(),
                stock: 5,
                min_stock: 8,
                ..Default::default()
            },
            ProductReportRow {
                name: "Shampoo".into(),
                stock: 15,
                min_stock: 10,
                ..Default::default()
            },
        ];
        let table = products_table(&rows);
        assert_eq!(table.rows[0][5], "Stock Bajo");
        assert_eq!(table.rows[1][5], "OK");
        assert_eq!(table.summary, None);
    }

    #[test]
    fn test_every_row_fills_every_column() {
        let appointments = appointments_table(&[AppointmentReportRow::default()]);
        assert_eq!(appointments.rows[0].len(), appointments.columns.len());
        let employees = employees_table(&[EmployeeReportRow::default()]);
        assert_eq!(employees.rows[0].len(), employees.columns.len());
    }

    #[test]
    fn test_document_carries_period_and_totals() {
        let period = ReportPeriod {
            from: "2024-02-14".into(),
            to: "2024-03-15".into(),
        };
        let table = sales_table(&[sale("María", 25000)]);
        let doc = report_document(ReportKind::Sales, &period, &table, now());

        assert_eq!(doc.title, "REPORTE DE VENTAS");
        assert_eq!(doc.file_name, "reporte-ventas-2024-03-15.pdf");
        assert_eq!(
            doc.filter_line.as_deref(),
            Some("Período: 14/02/2024 al 15/03/2024")
        );
        assert_eq!(doc.total_line, "Total de ventas: 1 | Ingresos totales: $25.000");

        let products = report_document(ReportKind::Products, &period, &products_table(&[]), now());
        assert_eq!(products.total_line, "Total de registros: 0");
    }
}
