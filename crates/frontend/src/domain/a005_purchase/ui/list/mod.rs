use crate::shared::components::form_fields::{DateField, NumberField, SelectField};
use crate::shared::date_utils::{format_money, format_opt_date};
use crate::shared::export::{ReportColumn, ReportExportable};
use crate::shared::http_api::RestApi;
use crate::shared::list_controller::{EntityListController, ListConfig};
use crate::shared::list_page::{
    pick_reference, reference_options, use_reference_list, EntityListPage, FormRenderer,
    ListColumn,
};
use crate::shared::notifications::use_notifications;
use contracts::domain::a004_product::entity::Product;
use contracts::domain::a005_purchase::entity::Purchase;
use contracts::domain::common::{Entity, ProductRef, SupplierRef};
use leptos::prelude::*;
use std::sync::Arc;

/// Backend collection of suppliers; they have no admin page of their own
const SUPPLIERS_RESOURCE: &str = "proveedores";

fn product_name(p: &Purchase) -> String {
    p.product
        .as_ref()
        .map(|r| r.name.clone())
        .unwrap_or_else(|| "-".to_string())
}

fn supplier_name(p: &Purchase) -> String {
    p.supplier
        .as_ref()
        .map(|r| r.name.clone())
        .unwrap_or_else(|| "-".to_string())
}

impl ReportExportable for Purchase {
    fn report_title() -> &'static str {
        "REGISTRO DE COMPRAS"
    }

    fn report_slug() -> &'static str {
        "compras"
    }

    fn report_columns() -> Vec<ReportColumn> {
        vec![
            ReportColumn::new("FECHA").width(25.0).center(),
            ReportColumn::new("PRODUCTO").width(55.0),
            ReportColumn::new("PROVEEDOR").width(50.0),
            ReportColumn::new("CANTIDAD").width(25.0).center(),
            ReportColumn::new("TOTAL").width(30.0).right(),
        ]
    }

    fn report_row(&self) -> Vec<String> {
        vec![
            format_opt_date(self.purchase_date.as_deref()),
            product_name(self),
            supplier_name(self),
            self.quantity.to_string(),
            format_money(self.total),
        ]
    }
}

#[component]
#[allow(non_snake_case)]
pub fn PurchaseList() -> impl IntoView {
    let controller = EntityListController::new(
        RestApi::<Purchase>::new(),
        use_notifications(),
        ListConfig::for_entity(),
    );

    let products = use_reference_list::<ProductRef>(Product::resource());
    let suppliers = use_reference_list::<SupplierRef>(SUPPLIERS_RESOURCE);

    let columns = vec![
        ListColumn::new("Fecha", |p: &Purchase| format_opt_date(p.purchase_date.as_deref())),
        ListColumn::new("Producto", product_name).highlighted(),
        ListColumn::new("Proveedor", supplier_name).highlighted(),
        ListColumn::new("Cantidad", |p: &Purchase| p.quantity.to_string()).numeric(),
        ListColumn::new("Total", |p: &Purchase| format_money(p.total)).numeric(),
    ];

    let form: FormRenderer<Purchase> = Arc::new(move |draft: RwSignal<Purchase>| {
        view! {
            <SelectField
                label="Producto"
                required=true
                placeholder="Seleccione un producto"
                options=reference_options(products, |r: &ProductRef| (r.id, r.name.clone()))
                value=Signal::derive(move || {
                    draft.with(|d| {
                        d.product.as_ref().and_then(|r| r.id).map(|id| id.to_string()).unwrap_or_default()
                    })
                })
                on_change=Callback::new(move |v: String| {
                    let picked = pick_reference(products, &v, |r: &ProductRef| r.id);
                    draft.update(|d| d.product = picked);
                })
            />
            <SelectField
                label="Proveedor"
                placeholder="Sin proveedor"
                options=reference_options(suppliers, |r: &SupplierRef| (r.id, r.name.clone()))
                value=Signal::derive(move || {
                    draft.with(|d| {
                        d.supplier.as_ref().and_then(|r| r.id).map(|id| id.to_string()).unwrap_or_default()
                    })
                })
                on_change=Callback::new(move |v: String| {
                    let picked = pick_reference(suppliers, &v, |r: &SupplierRef| r.id);
                    draft.update(|d| d.supplier = picked);
                })
            />
            <NumberField
                label="Cantidad"
                required=true
                min=1
                value=Signal::derive(move || draft.with(|d| d.quantity))
                on_input=Callback::new(move |v: i64| draft.update(|d| d.quantity = v))
            />
            <NumberField
                label="Total"
                min=0
                value=Signal::derive(move || draft.with(|d| d.total))
                on_input=Callback::new(move |v: i64| draft.update(|d| d.total = v))
            />
            <DateField
                label="Fecha de compra"
                required=true
                value=Signal::derive(move || draft.with(|d| d.purchase_date.clone()))
                on_input=Callback::new(move |v: Option<String>| draft.update(|d| d.purchase_date = v))
            />
        }
        .into_any()
    });

    view! {
        <EntityListPage controller=controller columns=columns form=form date_filter=true />
    }
}
