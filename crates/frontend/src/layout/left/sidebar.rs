//! Sidebar component with collapsible menu groups

use crate::layout::global_context::AppGlobalContext;
use crate::layout::registry::page_label;
use crate::shared::icons::icon;
use leptos::prelude::*;

#[derive(Clone, Debug, PartialEq)]
struct MenuGroup {
    id: &'static str,
    label: &'static str,
    icon: &'static str,
    items: Vec<(&'static str, &'static str, &'static str)>, // (id, label, icon)
}

fn get_menu_groups() -> Vec<MenuGroup> {
    vec![
        MenuGroup {
            id: "catalog",
            label: "Catálogo",
            icon: "services",
            items: vec![
                ("a001_service_category", page_label("a001_service_category"), "categories"),
                ("a003_service", page_label("a003_service"), "services"),
                ("a004_product", page_label("a004_product"), "products"),
            ],
        },
        MenuGroup {
            id: "people",
            label: "Personas",
            icon: "customers",
            items: vec![
                ("a002_client", page_label("a002_client"), "customers"),
                ("a008_employee", page_label("a008_employee"), "employees"),
            ],
        },
        MenuGroup {
            id: "operations",
            label: "Movimientos",
            icon: "sales",
            items: vec![
                ("a006_sale", page_label("a006_sale"), "sales"),
                ("a005_purchase", page_label("a005_purchase"), "purchases"),
                ("a007_expense", page_label("a007_expense"), "expenses"),
            ],
        },
        MenuGroup {
            id: "system",
            label: "Sistema",
            icon: "audit",
            items: vec![
                ("a010_report", page_label("a010_report"), "reports"),
                ("a009_audit_log", page_label("a009_audit_log"), "audit"),
            ],
        },
    ]
}

#[component]
pub fn Sidebar() -> impl IntoView {
    let ctx = use_context::<AppGlobalContext>().unwrap_or_else(|| {
        log::warn!("AppGlobalContext not provided, sidebar is detached");
        AppGlobalContext::new()
    });

    let groups = get_menu_groups();

    // The group holding the active page starts expanded
    let initially_open: Vec<String> = ctx.active.with_untracked(|active| {
        groups
            .iter()
            .filter(|g| g.items.iter().any(|(id, _, _)| id == active))
            .map(|g| g.id.to_string())
            .collect()
    });
    let expanded_groups = RwSignal::new(initially_open);

    view! {
        <div class="app-sidebar__content">
            {groups.into_iter().map(|group| {
                let group_id = group.id.to_string();
                let group_id_for_exp = group_id.clone();
                let group_id_for_click = group_id.clone();

                view! {
                    <div>
                        <div
                            class="app-sidebar__item"
                            style:padding-left="12px"
                            on:click=move |_| {
                                let gid = group_id_for_click.clone();
                                expanded_groups.update(move |items| {
                                    if let Some(pos) = items.iter().position(|x| x == &gid) {
                                        items.remove(pos);
                                    } else {
                                        items.push(gid);
                                    }
                                });
                            }
                        >
                            <div class="app-sidebar__item-content">
                                {icon(group.icon)}
                                <span>{group.label}</span>
                            </div>
                            <div
                                class="app-sidebar__chevron"
                                class:app-sidebar__chevron--expanded=move || {
                                    expanded_groups.get().contains(&group_id_for_exp)
                                }
                            >
                                {icon("chevron-right")}
                            </div>
                        </div>

                        <Show when=move || expanded_groups.get().contains(&group_id)>
                            <div class="app-sidebar__children">
                                {group.items.clone().into_iter().map(|(id, label, icon_name)| {
                                    view! {
                                        <div
                                            class="app-sidebar__item"
                                            class:app-sidebar__item--active=move || ctx.active.get() == id
                                            style:padding-left="10px"
                                            on:click=move |_| ctx.activate(id)
                                        >
                                            <div class="app-sidebar__item-content">
                                                {icon(icon_name)}
                                                <span>{label}</span>
                                            </div>
                                        </div>
                                    }
                                }).collect_view()}
                            </div>
                        </Show>
                    </div>
                }
            }).collect_view()}
        </div>
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layout::registry::PAGES;

    #[test]
    fn test_every_page_is_in_the_menu() {
        let groups = get_menu_groups();
        for (key, _, _) in PAGES {
            assert!(
                groups.iter().any(|g| g.items.iter().any(|(id, _, _)| id == key)),
                "{} missing from the sidebar",
                key
            );
        }
    }
}
