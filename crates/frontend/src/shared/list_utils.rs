/// List helpers shared by every admin page: filtering and the search box.
use contracts::domain::common::Entity;
use leptos::prelude::*;
use leptos::task::spawn_local;

/// Current filter of a list: free text plus optional date and category
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ListFilter {
    pub text: String,
    /// `YYYY-MM-DD` or any prefix of it (`YYYY-MM` filters a month)
    pub date: Option<String>,
    pub category: Option<String>,
}

impl ListFilter {
    pub fn is_empty(&self) -> bool {
        self.text.trim().is_empty() && self.date.is_none() && self.category.is_none()
    }

    /// Human summary for report headers, `None` when nothing is filtered
    pub fn describe(&self) -> Option<String> {
        let mut parts = Vec::new();
        if !self.text.trim().is_empty() {
            parts.push(format!("\"{}\"", self.text.trim()));
        }
        if let Some(date) = &self.date {
            parts.push(format!("fecha {}", date));
        }
        if let Some(category) = &self.category {
            parts.push(format!("categoría {}", category));
        }
        (!parts.is_empty()).then(|| parts.join(", "))
    }
}

/// Case-insensitive substring match over the given fields.
///
/// Blank text matches everything; a field the entity does not know (or has
/// no value for) never matches.
pub fn matches_text<T: Entity>(item: &T, text: &str, fields: &[&str]) -> bool {
    let needle = text.trim().to_lowercase();
    if needle.is_empty() {
        return true;
    }
    fields.iter().any(|field| {
        item.field_text(field)
            .map(|value| value.to_lowercase().contains(&needle))
            .unwrap_or(false)
    })
}

pub fn matches_filter<T: Entity>(item: &T, filter: &ListFilter, fields: &[&str]) -> bool {
    if !matches_text(item, &filter.text, fields) {
        return false;
    }
    if let Some(date) = filter.date.as_deref() {
        match item.date_value() {
            Some(value) if value.starts_with(date) => {}
            _ => return false,
        }
    }
    if let Some(category) = filter.category.as_deref() {
        if item.category_value().as_deref() != Some(category) {
            return false;
        }
    }
    true
}

/// Items matching the filter, in their original order
pub fn filter_items<'a, T: Entity>(
    items: &'a [T],
    filter: &ListFilter,
    fields: &[&str],
) -> Vec<&'a T> {
    items
        .iter()
        .filter(|item| matches_filter(*item, filter, fields))
        .collect()
}

/// Highlight matches of `filter` inside `text` (case-insensitive)
pub fn highlight_matches(text: &str, filter: &str) -> AnyView {
    let needle = filter.trim().to_lowercase();
    if needle.is_empty() {
        return view! { <span>{text.to_string()}</span> }.into_any();
    }

    let parts = split_matches(text, &needle);
    if parts.len() == 1 && !parts[0].1 {
        return view! { <span>{text.to_string()}</span> }.into_any();
    }

    parts
        .into_iter()
        .map(|(chunk, hit)| {
            if hit {
                view! { <mark class="search-hit">{chunk}</mark> }.into_any()
            } else {
                view! { <span>{chunk}</span> }.into_any()
            }
        })
        .collect_view()
        .into_any()
}

/// Split `text` into `(chunk, is_match)` runs.
///
/// Lowercasing may change byte lengths (e.g. 'İ'), so matching walks the
/// original char boundaries instead of reusing offsets from the lowered copy.
fn split_matches(text: &str, needle_lower: &str) -> Vec<(String, bool)> {
    let mut parts: Vec<(String, bool)> = Vec::new();
    let mut plain = String::new();
    let mut rest = text;

    while !rest.is_empty() {
        let hit_len = rest
            .char_indices()
            .map(|(i, c)| i + c.len_utf8())
            .find(|&end| rest[..end].to_lowercase() == needle_lower)
            .filter(|_| rest.to_lowercase().starts_with(needle_lower));

        match hit_len {
            Some(end) => {
                if !plain.is_empty() {
                    parts.push((std::mem::take(&mut plain), false));
                }
                parts.push((rest[..end].to_string(), true));
                rest = &rest[end..];
            }
            None => {
                let mut chars = rest.chars();
                if let Some(c) = chars.next() {
                    plain.push(c);
                }
                rest = chars.as_str();
            }
        }
    }
    if !plain.is_empty() {
        parts.push((plain, false));
    }
    parts
}

/// Search box with debounce and a clear button
#[component]
pub fn SearchInput(
    /// Current filter value (for display)
    #[prop(into)]
    value: Signal<String>,
    /// Callback receiving the debounced value
    #[prop(into)]
    on_change: Callback<String>,
    /// Placeholder text
    #[prop(optional, into)]
    placeholder: String,
) -> impl IntoView {
    let placeholder = if placeholder.is_empty() {
        "Buscar...".to_string()
    } else {
        placeholder
    };

    // Local state for the input (before debounce)
    let input_value = RwSignal::new(value.get_untracked());
    // Only the newest keystroke may fire the callback
    let generation = StoredValue::new(0u64);

    // Follow outside resets ("Limpiar filtros")
    Effect::new(move |_| {
        let external = value.get();
        if external != input_value.get_untracked() {
            input_value.set(external);
        }
    });

    let handle_input_change = move |new_value: String| {
        input_value.set(new_value.clone());
        generation.update_value(|g| *g += 1);
        let current = generation.get_value();
        spawn_local(async move {
            gloo_timers::future::TimeoutFuture::new(300).await;
            if generation.try_get_value() == Some(current) {
                on_change.run(new_value);
            }
        });
    };

    let clear_filter = move |_| {
        generation.update_value(|g| *g += 1);
        input_value.set(String::new());
        on_change.run(String::new());
    };

    view! {
        <div class="search-input">
            <input
                type="text"
                class="search-input__field"
                class:search-input__field--active=move || !value.get().trim().is_empty()
                placeholder=placeholder
                prop:value=move || input_value.get()
                on:input=move |ev| handle_input_change(event_target_value(&ev))
            />
            <Show when=move || !input_value.get().is_empty()>
                <button class="search-input__clear" on:click=clear_filter title="Limpiar">
                    "×"
                </button>
            </Show>
        </div>
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use contracts::domain::a002_client::entity::Client;
    use contracts::domain::a007_expense::entity::Expense;

    fn client(name: &str, phone: Option<&str>) -> Client {
        Client {
            full_name: name.to_string(),
            phone: phone.map(String::from),
            ..Default::default()
        }
    }

    fn expense(description: &str, date: &str, category: &str) -> Expense {
        Expense {
            description: description.to_string(),
            amount: 1000,
            expense_date: Some(date.to_string()),
            category: category.to_string(),
            ..Default::default()
        }
    }

    #[test]
    fn test_text_match_is_case_insensitive_over_fields() {
        let c = client("Ana LUNA", Some("555-1234"));
        assert!(matches_text(&c, "luna", &["full_name"]));
        assert!(matches_text(&c, "  1234 ", &["full_name", "phone"]));
        assert!(!matches_text(&c, "1234", &["full_name"]));
        assert!(matches_text(&c, "", &[]));
        assert!(!matches_text(&c, "ana", &["unknown"]));
    }

    #[test]
    fn test_date_and_category_filters() {
        let items = vec![
            expense("Tinturas", "2024-02-10", "Insumos"),
            expense("Luz", "2024-02-28", "Servicios Básicos"),
            expense("Arriendo marzo", "2024-03-01", "Arriendo"),
        ];
        let fields = ["description"];

        let month = ListFilter {
            date: Some("2024-02".into()),
            ..Default::default()
        };
        assert_eq!(filter_items(&items, &month, &fields).len(), 2);

        let month_and_category = ListFilter {
            category: Some("Insumos".into()),
            ..month.clone()
        };
        let found = filter_items(&items, &month_and_category, &fields);
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].description, "Tinturas");
    }

    #[test]
    fn test_item_without_date_fails_date_filter() {
        let mut e = expense("Sin fecha", "2024-02-10", "Otros");
        e.expense_date = None;
        let filter = ListFilter {
            date: Some("2024".into()),
            ..Default::default()
        };
        assert!(!matches_filter(&e, &filter, &["description"]));
    }

    #[test]
    fn test_describe() {
        assert_eq!(ListFilter::default().describe(), None);
        let filter = ListFilter {
            text: " ana ".into(),
            date: Some("2024-02".into()),
            category: None,
        };
        assert_eq!(filter.describe().as_deref(), Some("\"ana\", fecha 2024-02"));
        assert!(!filter.is_empty());
    }

    #[test]
    fn test_split_matches() {
        assert_eq!(
            split_matches("Corte corto", "cort"),
            vec![
                ("Cort".to_string(), true),
                ("e ".to_string(), false),
                ("cort".to_string(), true),
                ("o".to_string(), false),
            ]
        );
        assert_eq!(split_matches("abc", "x"), vec![("abc".to_string(), false)]);
    }
}
