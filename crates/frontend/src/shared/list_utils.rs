/// UI-утилиты списков: поиск с debounce, индикаторы сортировки
use leptos::prelude::*;
use wasm_bindgen::JsCast;

/// Компонент поиска с debounce и кнопкой очистки
#[component]
pub fn SearchInput(
    /// Текущее значение фильтра (для отображения)
    #[prop(into)]
    value: Signal<String>,
    /// Callback для обновления значения фильтра
    #[prop(into)]
    on_change: Callback<String>,
    /// Placeholder текст
    #[prop(optional, into)]
    placeholder: String,
) -> impl IntoView {
    let placeholder = if placeholder.is_empty() {
        "Поиск...".to_string()
    } else {
        placeholder
    };

    // Локальное состояние для input (до debounce)
    let (input_value, set_input_value) = signal(value.get_untracked());

    // Debounce механизм
    let debounce_timeout = StoredValue::new(None::<i32>);

    let handle_input_change = move |new_value: String| {
        set_input_value.set(new_value.clone());

        // Отменяем предыдущий таймер если есть
        if let Some(timeout_id) = debounce_timeout.get_value() {
            if let Some(w) = web_sys::window() {
                w.clear_timeout_with_handle(timeout_id);
            }
        }

        // Создаем новый таймер
        let window = web_sys::window().expect("no window");
        let closure = wasm_bindgen::closure::Closure::wrap(Box::new(move || {
            on_change.run(new_value.clone());
        }) as Box<dyn Fn()>);

        let timeout_id = window
            .set_timeout_with_callback_and_timeout_and_arguments_0(
                closure.as_ref().unchecked_ref::<js_sys::Function>(),
                300, // 300ms задержка
            )
            .expect("setTimeout failed");

        closure.forget();
        debounce_timeout.set_value(Some(timeout_id));
    };

    let is_filter_active = move || !value.get().trim().is_empty();

    let clear_filter = move |_| {
        set_input_value.set(String::new());
        on_change.run(String::new());
    };

    view! {
        <div style="position: relative; display: inline-flex; align-items: center;">
            <input
                type="text"
                placeholder={placeholder}
                style=move || format!(
                    "width: 250px; padding: 6px 32px 6px 10px; border: 1px solid #ddd; border-radius: 4px; font-size: 15px; background: {};",
                    if is_filter_active() { "#fffbea" } else { "white" }
                )
                prop:value=move || input_value.get()
                on:input=move |ev| {
                    let val = event_target_value(&ev);
                    handle_input_change(val);
                }
            />
            {move || if !input_value.get().is_empty() {
                view! {
                    <button
                        style="position: absolute; right: 6px; background: none; border: none; cursor: pointer; padding: 4px; display: inline-flex; align-items: center; color: #666; line-height: 1;"
                        on:click=clear_filter
                        title="Очистить"
                    >
                        {crate::shared::icons::icon("x")}
                    </button>
                }.into_any()
            } else {
                view! { <></> }.into_any()
            }}
        </div>
    }
}

/// Получить индикатор сортировки для заголовка
pub fn get_sort_indicator(current_field: &str, field: &str, ascending: bool) -> &'static str {
    if current_field == field {
        if ascending { " ▲" } else { " ▼" }
    } else {
        " ⇅"
    }
}

/// CSS-класс индикатора сортировки
pub fn get_sort_class(current_field: &str, field: &str) -> &'static str {
    if current_field == field {
        "table__sort table__sort--active"
    } else {
        "table__sort"
    }
}
