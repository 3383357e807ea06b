use crate::shared::components::form_fields::{
    CheckboxField, NumberField, TextAreaField, TextField,
};
use crate::shared::date_utils::format_money;
use crate::shared::export::{ReportColumn, ReportExportable};
use crate::shared::http_api::RestApi;
use crate::shared::list_controller::{EntityListController, ListConfig};
use crate::shared::list_page::{EntityListPage, FormRenderer, ListColumn};
use crate::shared::notifications::use_notifications;
use contracts::domain::a004_product::entity::Product;
use leptos::prelude::*;
use std::sync::Arc;

/// Stock figure, flagged when at or below the configured minimum
fn stock_label(p: &Product) -> String {
    if p.is_low_stock() {
        format!("{} (stock bajo)", p.initial_stock)
    } else {
        p.initial_stock.to_string()
    }
}

impl ReportExportable for Product {
    fn report_title() -> &'static str {
        "INVENTARIO DE PRODUCTOS"
    }

    fn report_slug() -> &'static str {
        "productos"
    }

    fn report_columns() -> Vec<ReportColumn> {
        vec![
            ReportColumn::new("PRODUCTO").width(45.0),
            ReportColumn::new("DESCRIPCIÓN").width(55.0),
            ReportColumn::new("P. COMPRA").width(25.0).right(),
            ReportColumn::new("P. VENTA").width(25.0).right(),
            ReportColumn::new("STOCK").width(25.0).center(),
            ReportColumn::new("ESTADO").width(20.0).center(),
        ]
    }

    fn report_row(&self) -> Vec<String> {
        vec![
            self.name.clone(),
            self.description.clone().unwrap_or_else(|| "-".to_string()),
            format_money(self.purchase_price),
            format_money(self.sale_price),
            stock_label(self),
            if self.active { "Activo" } else { "Inactivo" }.to_string(),
        ]
    }
}

#[component]
#[allow(non_snake_case)]
pub fn ProductList() -> impl IntoView {
    let controller = EntityListController::new(
        RestApi::<Product>::new(),
        use_notifications(),
        ListConfig::for_entity(),
    );

    let columns = vec![
        ListColumn::new("Nombre", |p: &Product| p.name.clone()).highlighted(),
        ListColumn::new("Descripción", |p: &Product| p.description.clone().unwrap_or_default())
            .highlighted(),
        ListColumn::new("Precio compra", |p: &Product| format_money(p.purchase_price)).numeric(),
        ListColumn::new("Precio venta", |p: &Product| format_money(p.sale_price)).numeric(),
        ListColumn::new("Stock", stock_label).numeric(),
        ListColumn::new("Mínimo", |p: &Product| {
            p.min_stock.map(|m| m.to_string()).unwrap_or_else(|| "-".to_string())
        })
        .numeric(),
    ];

    let form: FormRenderer<Product> = Arc::new(|draft: RwSignal<Product>| {
        view! {
            <TextField
                label="Nombre"
                required=true
                value=Signal::derive(move || draft.with(|d| d.name.clone()))
                on_input=Callback::new(move |v: String| draft.update(|d| d.name = v))
            />
            <TextAreaField
                label="Descripción"
                value=Signal::derive(move || draft.with(|d| d.description.clone().unwrap_or_default()))
                on_input=Callback::new(move |v: String| {
                    draft.update(|d| d.description = Some(v).filter(|t| !t.trim().is_empty()))
                })
            />
            <NumberField
                label="Precio de compra"
                min=0
                value=Signal::derive(move || draft.with(|d| d.purchase_price))
                on_input=Callback::new(move |v: i64| draft.update(|d| d.purchase_price = v))
            />
            <NumberField
                label="Precio de venta"
                min=0
                value=Signal::derive(move || draft.with(|d| d.sale_price))
                on_input=Callback::new(move |v: i64| draft.update(|d| d.sale_price = v))
            />
            <NumberField
                label="Stock inicial"
                min=0
                value=Signal::derive(move || draft.with(|d| d.initial_stock))
                on_input=Callback::new(move |v: i64| draft.update(|d| d.initial_stock = v))
            />
            <NumberField
                label="Stock mínimo"
                min=0
                value=Signal::derive(move || draft.with(|d| d.min_stock.unwrap_or(0)))
                on_input=Callback::new(move |v: i64| {
                    draft.update(|d| d.min_stock = Some(v).filter(|m| *m > 0))
                })
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

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stock_label_flags_low_stock() {
        let mut p = Product {
            name: "Shampoo".into(),
            initial_stock: 2,
            min_stock: Some(5),
            ..Default::default()
        };
        assert_eq!(stock_label(&p), "2 (stock bajo)");
        p.initial_stock = 12;
        assert_eq!(stock_label(&p), "12");
        assert_eq!(p.report_row()[4], "12");
    }
}
