//! Period reports computed by the backend (`GET {base}/reportes/{kind}`).
//!
//! Unlike the entity collections these are read-only summaries: the answer
//! is `{"datos": [...]}` with one row shape per report kind.

use chrono::{Duration, NaiveDate};
use serde::{Deserialize, Serialize};

/// Days covered by the default period, ending today
pub const DEFAULT_PERIOD_DAYS: i64 = 30;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ReportKind {
    #[default]
    #[serde(rename = "ventas")]
    Sales,
    #[serde(rename = "citas")]
    Appointments,
    #[serde(rename = "productos")]
    Products,
    #[serde(rename = "empleados")]
    Employees,
}

impl ReportKind {
    pub const ALL: [ReportKind; 4] = [
        ReportKind::Sales,
        ReportKind::Appointments,
        ReportKind::Products,
        ReportKind::Employees,
    ];

    /// Path segment under `reportes/`
    pub fn slug(self) -> &'static str {
        match self {
            ReportKind::Sales => "ventas",
            ReportKind::Appointments => "citas",
            ReportKind::Products => "productos",
            ReportKind::Employees => "empleados",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            ReportKind::Sales => "Ventas",
            ReportKind::Appointments => "Citas",
            ReportKind::Products => "Productos",
            ReportKind::Employees => "Empleados",
        }
    }

    pub fn from_slug(slug: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|kind| kind.slug() == slug)
    }
}

/// Date range sent as `?fechaDesde=..&fechaHasta=..`, both `YYYY-MM-DD`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReportPeriod {
    #[serde(rename = "fechaDesde")]
    pub from: String,

    #[serde(rename = "fechaHasta")]
    pub to: String,
}

impl ReportPeriod {
    /// The `days` days up to and including `today`
    pub fn ending_on(today: NaiveDate, days: i64) -> Self {
        let from = today - Duration::days(days);
        Self {
            from: from.format("%Y-%m-%d").to_string(),
            to: today.format("%Y-%m-%d").to_string(),
        }
    }

    pub fn validate(&self) -> Result<(), String> {
        let parse = |value: &str, field: &str| {
            NaiveDate::parse_from_str(value.trim(), "%Y-%m-%d")
                .map_err(|_| format!("El campo {} no es una fecha válida", field))
        };
        let from = parse(&self.from, "fecha desde")?;
        let to = parse(&self.to, "fecha hasta")?;
        if from > to {
            return Err("La fecha desde no puede ser posterior a la fecha hasta".to_string());
        }
        Ok(())
    }
}

/// Envelope of every report answer; a missing `datos` reads as no rows
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ReportResponse<R> {
    #[serde(default)]
    pub datos: Vec<R>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SalesReportRow {
    #[serde(default)]
    pub id: Option<i64>,
    #[serde(rename = "fecha", default)]
    pub date: String,
    #[serde(rename = "cliente", default)]
    pub client: String,
    #[serde(rename = "servicio", default)]
    pub service: String,
    #[serde(rename = "empleado", default)]
    pub employee: String,
    #[serde(default)]
    pub total: i64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AppointmentReportRow {
    #[serde(default)]
    pub id: Option<i64>,
    #[serde(rename = "fecha", default)]
    pub date: String,
    #[serde(rename = "hora", default)]
    pub time: String,
    #[serde(rename = "cliente", default)]
    pub client: String,
    #[serde(rename = "servicio", default)]
    pub service: String,
    #[serde(rename = "empleado", default)]
    pub employee: String,
    #[serde(rename = "estado", default)]
    pub status: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ProductReportRow {
    #[serde(default)]
    pub id: Option<i64>,
    #[serde(rename = "nombre", default)]
    pub name: String,
    #[serde(rename = "categoria", default)]
    pub category: String,
    #[serde(default)]
    pub stock: i64,
    #[serde(rename = "stockMinimo", default)]
    pub min_stock: i64,
    #[serde(rename = "precio", default)]
    pub price: i64,
}

impl ProductReportRow {
    pub fn is_low_stock(&self) -> bool {
        self.stock <= self.min_stock
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct EmployeeReportRow {
    #[serde(default)]
    pub id: Option<i64>,
    #[serde(rename = "nombre", default)]
    pub name: String,
    #[serde(default)]
    pub area: String,
    #[serde(rename = "citasAtendidas", default)]
    pub appointments: i64,
    #[serde(rename = "ventasRealizadas", default)]
    pub sales: i64,
    #[serde(rename = "ingresosGenerados", default)]
    pub revenue: i64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kind_slugs() {
        for kind in ReportKind::ALL {
            assert_eq!(ReportKind::from_slug(kind.slug()), Some(kind));
            assert_eq!(
                serde_json::to_string(&kind).unwrap(),
                format!("\"{}\"", kind.slug())
            );
        }
        assert_eq!(ReportKind::from_slug("turnos"), None);
    }

    #[test]
    fn test_default_period_is_thirty_days() {
        let today = NaiveDate::from_ymd_opt(2024, 3, 15).unwrap();
        let period = ReportPeriod::ending_on(today, DEFAULT_PERIOD_DAYS);
        assert_eq!(period.from, "2024-02-14");
        assert_eq!(period.to, "2024-03-15");
        assert!(period.validate().is_ok());
    }

    #[test]
    fn test_inverted_or_blank_period_rejected() {
        let inverted = ReportPeriod {
            from: "2024-03-15".into(),
            to: "2024-03-01".into(),
        };
        assert!(inverted.validate().is_err());
        let blank = ReportPeriod {
            from: String::new(),
            to: "2024-03-01".into(),
        };
        assert_eq!(
            blank.validate(),
            Err("El campo fecha desde no es una fecha válida".to_string())
        );
    }

    #[test]
    fn test_response_envelope() {
        let json = r#"{"datos":[{"id":1,"fecha":"2024-01-15","cliente":"María García",
            "servicio":"Corte y Peinado","empleado":"Ana López","total":25000}]}"#;
        let response: ReportResponse<SalesReportRow> = serde_json::from_str(json).unwrap();
        assert_eq!(response.datos.len(), 1);
        assert_eq!(response.datos[0].client, "María García");
        assert_eq!(response.datos[0].total, 25000);

        let empty: ReportResponse<ProductReportRow> = serde_json::from_str("{}").unwrap();
        assert!(empty.datos.is_empty());
    }

    #[test]
    fn test_low_stock_row() {
        let row: ProductReportRow =
            serde_json::from_str(r#"{"nombre":"Tinte Rubio","stock":5,"stockMinimo":8}"#).unwrap();
        assert!(row.is_low_stock());
    }
}
