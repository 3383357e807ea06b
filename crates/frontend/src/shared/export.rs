/// Printable PDF reports of a list's filtered view.
///
/// The layout (pages, header lines, file name) is plain data in
/// [`ReportDocument`]; drawing is delegated to a [`PdfExportPort`]. In the
/// browser that is [`JsPdfExporter`], which drives the jsPDF + autoTable
/// scripts loaded by `index.html`.
use crate::shared::list_controller::state::total_pages;
use crate::shared::list_utils::ListFilter;
use async_trait::async_trait;
use chrono::NaiveDateTime;
use contracts::domain::common::Entity;
use js_sys::{Array, Function, Reflect};
use serde::Serialize;
use serde_json::{json, Map, Value};
use wasm_bindgen::{JsCast, JsValue};

pub const COMPANY_NAME: &str = "PELUQUERÍA LUNA";

/// Table rows printed on each PDF page
pub const ROWS_PER_PAGE: usize = 25;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ColumnAlign {
    Left,
    Center,
    Right,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ReportColumn {
    pub header: &'static str,
    /// Width in mm, `None` lets autoTable decide
    pub width: Option<f64>,
    pub align: ColumnAlign,
}

impl ReportColumn {
    pub const fn new(header: &'static str) -> Self {
        Self {
            header,
            width: None,
            align: ColumnAlign::Left,
        }
    }

    pub const fn width(mut self, width: f64) -> Self {
        self.width = Some(width);
        self
    }

    pub const fn right(mut self) -> Self {
        self.align = ColumnAlign::Right;
        self
    }

    pub const fn center(mut self) -> Self {
        self.align = ColumnAlign::Center;
        self
    }
}

/// Entities that can be printed as a report table
pub trait ReportExportable: Entity {
    /// Upper-case heading, e.g. "LISTA DE CLIENTES"
    fn report_title() -> &'static str;

    /// File name stem, e.g. "clientes"
    fn report_slug() -> &'static str;

    fn report_columns() -> Vec<ReportColumn>;

    /// One cell per column, already formatted for print
    fn report_row(&self) -> Vec<String>;
}

/// Fully laid-out report, independent of the drawing library
#[derive(Debug, Clone, PartialEq)]
pub struct ReportDocument {
    pub company: &'static str,
    pub title: String,
    pub generated_on: String,
    pub generated_time: String,
    pub total_line: String,
    /// "Filtro aplicado: ..." when the view is filtered
    pub filter_line: Option<String>,
    pub columns: Vec<ReportColumn>,
    pub rows: Vec<Vec<String>>,
    pub rows_per_page: usize,
    pub file_name: String,
}

impl ReportDocument {
    pub fn build<T: ReportExportable>(items: &[&T], filter: &ListFilter, now: NaiveDateTime) -> Self {
        let filter_line = filter
            .describe()
            .map(|description| format!("Filtro aplicado: {}", description));
        let suffix = if filter_line.is_some() { "-filtrado" } else { "" };
        let file_name = format!(
            "lista-{}{}-{}.pdf",
            T::report_slug(),
            suffix,
            now.format("%Y-%m-%d")
        );

        Self::table(
            T::report_title(),
            T::report_columns(),
            items.iter().map(|item| item.report_row()).collect(),
            now,
        )
        .with_filter_line(filter_line)
        .with_file_name(file_name)
    }

    /// Document over ready-made rows; named `reporte-<date>.pdf` until
    /// [`with_file_name`](Self::with_file_name)
    pub fn table(
        title: impl Into<String>,
        columns: Vec<ReportColumn>,
        rows: Vec<Vec<String>>,
        now: NaiveDateTime,
    ) -> Self {
        Self {
            company: COMPANY_NAME,
            title: title.into(),
            generated_on: format!("Fecha de generación: {}", now.format("%d/%m/%Y")),
            generated_time: now.format("%H:%M:%S").to_string(),
            total_line: format!("Total de registros: {}", rows.len()),
            filter_line: None,
            columns,
            rows,
            rows_per_page: ROWS_PER_PAGE,
            file_name: format!("reporte-{}.pdf", now.format("%Y-%m-%d")),
        }
    }

    pub fn with_filter_line(mut self, filter_line: Option<String>) -> Self {
        self.filter_line = filter_line;
        self
    }

    pub fn with_total_line(mut self, total_line: impl Into<String>) -> Self {
        self.total_line = total_line.into();
        self
    }

    pub fn with_file_name(mut self, file_name: impl Into<String>) -> Self {
        self.file_name = file_name.into();
        self
    }

    pub fn page_count(&self) -> usize {
        total_pages(self.rows.len(), self.rows_per_page)
    }

    pub fn pages(&self) -> std::slice::Chunks<'_, Vec<String>> {
        self.rows.chunks(self.rows_per_page.max(1))
    }

    pub fn page_footer(&self, page_index: usize) -> String {
        format!("Página {} de {}", page_index + 1, self.page_count())
    }

    pub fn headers(&self) -> Vec<&'static str> {
        self.columns.iter().map(|c| c.header).collect()
    }

    /// autoTable `columnStyles`, keyed by column index
    pub fn column_styles(&self) -> Value {
        let mut styles = Map::new();
        for (index, column) in self.columns.iter().enumerate() {
            let mut style = Map::new();
            if let Some(width) = column.width {
                style.insert("cellWidth".into(), json!(width));
            }
            if column.align != ColumnAlign::Left {
                style.insert("halign".into(), json!(column.align));
            }
            if !style.is_empty() {
                styles.insert(index.to_string(), Value::Object(style));
            }
        }
        Value::Object(styles)
    }
}

/// Something that can turn a [`ReportDocument`] into a downloaded file
#[async_trait(?Send)]
pub trait PdfExportPort {
    async fn export(&self, report: &ReportDocument) -> Result<(), String>;
}

/// Renders with `window.jspdf.jsPDF` and the autoTable plugin
#[derive(Debug, Clone, Copy, Default)]
pub struct JsPdfExporter;

#[async_trait(?Send)]
impl PdfExportPort for JsPdfExporter {
    async fn export(&self, report: &ReportDocument) -> Result<(), String> {
        let doc = new_document()?;
        let page_count = report.page_count();

        for (index, rows) in report.pages().enumerate() {
            if index > 0 {
                call(&doc, "addPage", &[])?;
            }
            draw_header(&doc, report)?;

            let start_y = if report.filter_line.is_some() { 75 } else { 68 };
            let table = json!({
                "head": [report.headers()],
                "body": rows,
                "startY": start_y,
                "styles": {
                    "fontSize": 8,
                    "textColor": [0, 0, 0],
                    "fillColor": [255, 255, 255],
                    "lineColor": [0, 0, 0],
                    "lineWidth": 0.1,
                    "cellPadding": 2,
                    "overflow": "linebreak"
                },
                "headStyles": { "fontStyle": "bold", "halign": "center" },
                "columnStyles": report.column_styles(),
                "margin": { "bottom": 40 }
            });
            call(&doc, "autoTable", &[to_js(&table)?])?;

            let page_height = page_height(&doc)?;
            call(&doc, "setLineWidth", &[num(0.5)])?;
            line(&doc, 20.0, page_height - 25.0, 190.0, page_height - 25.0)?;
            call(&doc, "setFontSize", &[num(8.0)])?;
            text(&doc, &report.page_footer(index), 20.0, page_height - 15.0, None)?;
            text(
                &doc,
                &report.generated_time,
                190.0,
                page_height - 15.0,
                Some("right"),
            )?;
        }

        log::debug!("PDF '{}' rendered, {} page(s)", report.file_name, page_count);
        call(&doc, "save", &[JsValue::from_str(&report.file_name)])?;
        Ok(())
    }
}

fn draw_header(doc: &JsValue, report: &ReportDocument) -> Result<(), String> {
    call(doc, "setTextColor", &[num(0.0), num(0.0), num(0.0)])?;
    call(doc, "setLineWidth", &[num(2.0)])?;
    line(doc, 20.0, 25.0, 190.0, 25.0)?;

    call(doc, "setFontSize", &[num(24.0)])?;
    set_font(doc, "bold")?;
    text(doc, report.company, 105.0, 20.0, Some("center"))?;

    call(doc, "setLineWidth", &[num(0.5)])?;
    line(doc, 20.0, 28.0, 190.0, 28.0)?;

    call(doc, "setFontSize", &[num(16.0)])?;
    set_font(doc, "normal")?;
    text(doc, &report.title, 105.0, 40.0, Some("center"))?;

    call(doc, "setFontSize", &[num(10.0)])?;
    text(doc, &report.generated_on, 20.0, 55.0, None)?;
    text(doc, &report.total_line, 20.0, 62.0, None)?;
    if let Some(filter) = &report.filter_line {
        text(doc, filter, 20.0, 69.0, None)?;
    }
    Ok(())
}

fn new_document() -> Result<JsValue, String> {
    let window: JsValue = web_sys::window().ok_or("No window object")?.into();
    let constructor = Reflect::get(&window, &"jspdf".into())
        .ok()
        .filter(|ns| !ns.is_undefined() && !ns.is_null())
        .and_then(|ns| Reflect::get(&ns, &"jsPDF".into()).ok())
        .and_then(|c| c.dyn_into::<Function>().ok())
        .ok_or_else(|| "Error: Librería PDF no cargada".to_string())?;
    Reflect::construct(&constructor, &Array::new()).map_err(js_error)
}

fn page_height(doc: &JsValue) -> Result<f64, String> {
    let internal = Reflect::get(doc, &"internal".into()).map_err(js_error)?;
    let size = Reflect::get(&internal, &"pageSize".into()).map_err(js_error)?;
    Reflect::get(&size, &"height".into())
        .map_err(js_error)?
        .as_f64()
        .ok_or_else(|| "jsPDF: altura de página desconocida".to_string())
}

fn text(doc: &JsValue, value: &str, x: f64, y: f64, align: Option<&str>) -> Result<(), String> {
    let mut args = vec![JsValue::from_str(value), num(x), num(y)];
    if let Some(align) = align {
        args.push(to_js(&json!({ "align": align }))?);
    }
    call(doc, "text", &args).map(|_| ())
}

fn line(doc: &JsValue, x1: f64, y1: f64, x2: f64, y2: f64) -> Result<(), String> {
    call(doc, "line", &[num(x1), num(y1), num(x2), num(y2)]).map(|_| ())
}

fn set_font(doc: &JsValue, style: &str) -> Result<(), String> {
    call(doc, "setFont", &[JsValue::from_str("helvetica"), JsValue::from_str(style)]).map(|_| ())
}

fn num(value: f64) -> JsValue {
    JsValue::from_f64(value)
}

fn call(target: &JsValue, method: &str, args: &[JsValue]) -> Result<JsValue, String> {
    let function = Reflect::get(target, &JsValue::from_str(method))
        .map_err(js_error)?
        .dyn_into::<Function>()
        .map_err(|_| format!("jsPDF: '{}' no está disponible", method))?;
    let args: Array = args.iter().collect();
    function.apply(target, &args).map_err(js_error)
}

/// Plain JS objects (not `Map`s) so jsPDF can read the options
fn to_js(value: &Value) -> Result<JsValue, String> {
    value
        .serialize(&serde_wasm_bindgen::Serializer::json_compatible())
        .map_err(|e| e.to_string())
}

fn js_error(value: JsValue) -> String {
    if let Some(message) = value.as_string() {
        return message;
    }
    match value.dyn_ref::<js_sys::Error>() {
        Some(error) => String::from(error.message()),
        None => format!("{:?}", value),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use contracts::domain::common::EntityId;
    use serde::Deserialize;

    #[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
    struct Row {
        id: Option<EntityId>,
        label: String,
    }

    impl Entity for Row {
        fn id(&self) -> Option<EntityId> {
            self.id
        }
        fn display_name(&self) -> String {
            self.label.clone()
        }
        fn field_text(&self, field: &str) -> Option<String> {
            (field == "label").then(|| self.label.clone())
        }
        fn resource() -> &'static str {
            "rows"
        }
        fn action_name() -> Option<&'static str> {
            Some("row")
        }
        fn element_name() -> &'static str {
            "Fila"
        }
        fn list_name() -> &'static str {
            "Filas"
        }
        fn search_fields() -> &'static [&'static str] {
            &["label"]
        }
    }

    impl ReportExportable for Row {
        fn report_title() -> &'static str {
            "LISTA DE FILAS"
        }
        fn report_slug() -> &'static str {
            "filas"
        }
        fn report_columns() -> Vec<ReportColumn> {
            vec![ReportColumn::new("ID").width(20.0).center(), ReportColumn::new("NOMBRE")]
        }
        fn report_row(&self) -> Vec<String> {
            vec![self.id.unwrap_or_default().to_string(), self.label.clone()]
        }
    }

    fn now() -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2024, 3, 5)
            .and_then(|d| d.and_hms_opt(9, 30, 0))
            .unwrap()
    }

    fn rows(n: usize) -> Vec<Row> {
        (1..=n)
            .map(|i| Row {
                id: Some(i as i64),
                label: format!("Fila {}", i),
            })
            .collect()
    }

    #[test]
    fn test_unfiltered_document() {
        let items = rows(3);
        let refs: Vec<&Row> = items.iter().collect();
        let doc = ReportDocument::build(&refs, &ListFilter::default(), now());

        assert_eq!(doc.file_name, "lista-filas-2024-03-05.pdf");
        assert_eq!(doc.generated_on, "Fecha de generación: 05/03/2024");
        assert_eq!(doc.total_line, "Total de registros: 3");
        assert_eq!(doc.filter_line, None);
        assert_eq!(doc.page_count(), 1);
        assert_eq!(doc.rows[2], vec!["3".to_string(), "Fila 3".to_string()]);
    }

    #[test]
    fn test_filtered_document_pages() {
        let items = rows(60);
        let refs: Vec<&Row> = items.iter().collect();
        let filter = ListFilter {
            text: "fila".into(),
            ..Default::default()
        };
        let doc = ReportDocument::build(&refs, &filter, now());

        assert_eq!(doc.file_name, "lista-filas-filtrado-2024-03-05.pdf");
        assert_eq!(doc.filter_line.as_deref(), Some("Filtro aplicado: \"fila\""));
        assert_eq!(doc.page_count(), 3);
        let sizes: Vec<usize> = doc.pages().map(|p| p.len()).collect();
        assert_eq!(sizes, vec![25, 25, 10]);
        assert_eq!(doc.page_footer(2), "Página 3 de 3");
    }

    #[test]
    fn test_table_document() {
        let doc = ReportDocument::table(
            "REPORTE DE VENTAS",
            vec![ReportColumn::new("CLIENTE"), ReportColumn::new("TOTAL").right()],
            vec![vec!["Ana".into(), "$25.000".into()]],
            now(),
        )
        .with_filter_line(Some("Período: 2024-02-01 al 2024-03-05".into()));

        assert_eq!(doc.file_name, "reporte-2024-03-05.pdf");
        assert_eq!(doc.total_line, "Total de registros: 1");
        assert_eq!(doc.headers(), vec!["CLIENTE", "TOTAL"]);
        assert!(doc.filter_line.is_some());
    }

    #[test]
    fn test_column_styles_skip_defaults() {
        let doc = ReportDocument::build::<Row>(&[], &ListFilter::default(), now());
        assert_eq!(
            doc.column_styles(),
            json!({ "0": { "cellWidth": 20.0, "halign": "center" } })
        );
    }
}
