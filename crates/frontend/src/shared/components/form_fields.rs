use leptos::prelude::*;

/// Labeled text input; also used for email, phone and date inputs
#[component]
pub fn TextField(
    /// Label text
    #[prop(into)]
    label: String,
    /// Input value
    #[prop(into)]
    value: Signal<String>,
    /// Input event handler
    on_input: Callback<String>,
    /// Input type: "text" (default), "email", "tel", "date", ...
    #[prop(optional, into)]
    input_type: Option<String>,
    /// Placeholder text
    #[prop(optional, into)]
    placeholder: String,
    /// Required attribute
    #[prop(optional)]
    required: bool,
) -> impl IntoView {
    let input_type = input_type.unwrap_or_else(|| "text".to_string());

    view! {
        <div class="form__group">
            <label class="form__label">
                {label}
                {required.then_some(" *")}
            </label>
            <input
                class="form__input"
                type=input_type
                prop:value=move || value.get()
                placeholder=placeholder
                required=required
                on:input=move |ev| on_input.run(event_target_value(&ev))
            />
        </div>
    }
}

/// Labeled `<input type="date">`; empty input yields `None`
#[component]
pub fn DateField(
    #[prop(into)] label: String,
    #[prop(into)] value: Signal<Option<String>>,
    on_input: Callback<Option<String>>,
    #[prop(optional)] required: bool,
) -> impl IntoView {
    view! {
        <TextField
            label=label
            input_type="date"
            required=required
            value=Signal::derive(move || value.with(|d| date_input_value(d.as_deref())))
            on_input=Callback::new(move |raw: String| {
                on_input.run(Some(raw).filter(|d| !d.is_empty()))
            })
        />
    }
}

/// `YYYY-MM-DD` for a date input; instants lose their time part
fn date_input_value(value: Option<&str>) -> String {
    value
        .map(|d| d.chars().take(10).collect::<String>())
        .unwrap_or_default()
}

/// Labeled whole-number input; unparsable text yields 0
#[component]
pub fn NumberField(
    #[prop(into)] label: String,
    #[prop(into)] value: Signal<i64>,
    on_input: Callback<i64>,
    #[prop(optional)] min: Option<i64>,
    #[prop(optional)] required: bool,
) -> impl IntoView {
    view! {
        <div class="form__group">
            <label class="form__label">
                {label}
                {required.then_some(" *")}
            </label>
            <input
                class="form__input"
                type="number"
                step="1"
                min=min.map(|m| m.to_string())
                prop:value=move || value.get().to_string()
                required=required
                on:input=move |ev| {
                    on_input.run(event_target_value(&ev).trim().parse().unwrap_or(0))
                }
            />
        </div>
    }
}

/// Labeled multi-line text
#[component]
pub fn TextAreaField(
    #[prop(into)] label: String,
    #[prop(into)] value: Signal<String>,
    on_input: Callback<String>,
) -> impl IntoView {
    view! {
        <div class="form__group">
            <label class="form__label">{label}</label>
            <textarea
                class="form__textarea"
                rows="3"
                prop:value=move || value.get()
                on:input=move |ev| on_input.run(event_target_value(&ev))
            ></textarea>
        </div>
    }
}

/// Labeled select; options are `(value, label)` pairs.
///
/// With `placeholder` set, an empty first option is offered.
#[component]
pub fn SelectField(
    /// Label text
    #[prop(into)]
    label: String,
    /// Current value
    #[prop(into)]
    value: Signal<String>,
    /// Change event handler
    on_change: Callback<String>,
    /// Options: Vec of (value, label) tuples
    #[prop(into)]
    options: Signal<Vec<(String, String)>>,
    /// Text of the empty option
    #[prop(optional, into)]
    placeholder: Option<String>,
    #[prop(optional)]
    required: bool,
) -> impl IntoView {
    view! {
        <div class="form__group">
            <label class="form__label">
                {label}
                {required.then_some(" *")}
            </label>
            <select
                class="form__select"
                required=required
                prop:value=move || value.get()
                on:change=move |ev| on_change.run(event_target_value(&ev))
            >
                {placeholder.map(|text| view! {
                    <option value="" selected=move || value.get().is_empty()>{text}</option>
                })}
                <For
                    each=move || options.get()
                    key=|(val, _)| val.clone()
                    children=move |(val, label)| {
                        let val_clone = val.clone();
                        let is_selected = move || value.get() == val_clone;
                        view! {
                            <option value=val selected=is_selected>
                                {label}
                            </option>
                        }
                    }
                />
            </select>
        </div>
    }
}

/// Checkbox with its label on the right
#[component]
pub fn CheckboxField(
    #[prop(into)] label: String,
    #[prop(into)] checked: Signal<bool>,
    on_change: Callback<bool>,
) -> impl IntoView {
    view! {
        <label class="form__checkbox-wrapper">
            <input
                type="checkbox"
                class="form__checkbox"
                prop:checked=move || checked.get()
                on:change=move |ev| on_change.run(event_target_checked(&ev))
            />
            <span class="form__checkbox-label">{label}</span>
        </label>
    }
}
