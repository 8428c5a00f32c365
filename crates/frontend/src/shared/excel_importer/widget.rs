use super::parser::read_excel_from_file;
use crate::shared::icons::icon;
use contracts::domain::b001_book::excel::{book_columns, ExcelData};
use leptos::html;
use leptos::prelude::*;
use wasm_bindgen::JsCast;

/// Диалог импорта каталога из Excel.
///
/// Файл разбирается сразу после выбора; пользователю показывается
/// сопоставление колонок и количество строк, импорт подтверждается
/// отдельной кнопкой. Нечитаемый файл показывает ошибку и ничего
/// не импортирует.
#[component]
pub fn ExcelImporter(
    /// Вызывается с разобранными данными после подтверждения
    on_import: Callback<ExcelData>,
    /// Callback при отмене
    on_cancel: Callback<()>,
) -> impl IntoView {
    let (selected_file_name, set_selected_file_name) = signal(Option::<String>::None);
    let (excel_data, set_excel_data) = signal(Option::<ExcelData>::None);
    let (is_loading, set_is_loading) = signal(false);
    let (error, set_error) = signal(Option::<String>::None);

    let file_input_ref = NodeRef::<html::Input>::new();

    // Обработка выбора файла: парсим сразу
    let handle_file_select = move |ev: web_sys::Event| {
        let input = ev
            .target()
            .and_then(|t| t.dyn_into::<web_sys::HtmlInputElement>().ok());
        let Some(input) = input else { return };
        // Файл не выбран — no-op
        let Some(file) = input.files().and_then(|files| files.get(0)) else {
            return;
        };

        set_selected_file_name.set(Some(file.name()));
        set_error.set(None);
        set_excel_data.set(None);
        set_is_loading.set(true);

        leptos::task::spawn_local(async move {
            match read_excel_from_file(file.clone()).await {
                Ok(raw_data) => match ExcelData::from_raw(raw_data, book_columns(), file.name()) {
                    Ok(data) => set_excel_data.set(Some(data)),
                    Err(e) => set_error.set(Some(e)),
                },
                Err(e) => set_error.set(Some(e)),
            }
            set_is_loading.set(false);
        });
    };

    let handle_import = move |_| {
        let Some(data) = excel_data.get_untracked() else {
            return;
        };
        // Сбрасываем input, чтобы тот же файл можно было выбрать повторно
        if let Some(input) = file_input_ref.get_untracked() {
            input.set_value("");
        }
        set_excel_data.set(None);
        set_selected_file_name.set(None);
        on_import.run(data);
    };

    let row_count = move || {
        excel_data
            .get()
            .map(|d| d.metadata.row_count)
            .unwrap_or_default()
    };

    view! {
        <div class="excel-importer">
            <div class="form-group">
                <label for="excel_file">{"Файл (первый лист, первая строка — заголовки)"}</label>
                <input
                    type="file"
                    id="excel_file"
                    accept=".xlsx,.xls"
                    node_ref=file_input_ref
                    on:change=handle_file_select
                />
            </div>

            {move || error.get().map(|e| view! { <div class="error">{e}</div> })}

            {move || if is_loading.get() {
                view! { <p class="text-muted">{"Чтение файла..."}</p> }.into_any()
            } else {
                view! { <></> }.into_any()
            }}

            {move || excel_data.get().map(|data| {
                let unmapped = data.unmapped_count();
                view! {
                    <div class="excel-importer__preview">
                        <table class="table__data table--striped">
                            <thead class="table__head">
                                <tr>
                                    <th class="table__header-cell">{"Ожидаемая колонка"}</th>
                                    <th class="table__header-cell">{"В файле"}</th>
                                </tr>
                            </thead>
                            <tbody>
                                {data.column_mapping.iter().map(|m| {
                                    let expected = m.expected.clone();
                                    let found = m.found.clone();
                                    view! {
                                        <tr class="table__row">
                                            <td class="table__cell">{expected}</td>
                                            <td class="table__cell">
                                                {match found {
                                                    Some(h) => format!("✓ {}", h),
                                                    None => "— не найдена".to_string(),
                                                }}
                                            </td>
                                        </tr>
                                    }
                                }).collect_view()}
                            </tbody>
                        </table>

                        {(unmapped > 0).then(|| view! {
                            <div class="warning-box">
                                <span class="warning-box__icon">"⚠"</span>
                                <span class="warning-box__text">
                                    {format!("Колонок без соответствия: {}. Эти поля останутся пустыми.", unmapped)}
                                </span>
                            </div>
                        })}

                        <p>
                            {format!("Строк данных: {}", data.metadata.row_count)}
                            {selected_file_name.get().map(|n| format!(" ({})", n)).unwrap_or_default()}
                        </p>
                    </div>
                }
            })}

            <div class="details-actions">
                <button
                    class="btn btn-primary"
                    on:click=handle_import
                    disabled=move || excel_data.get().is_none() || row_count() == 0
                >
                    {icon("upload")}
                    {move || format!("Импортировать ({})", row_count())}
                </button>
                <button class="btn btn-secondary" on:click=move |_| on_cancel.run(())>
                    {icon("cancel")}
                    {"Отмена"}
                </button>
            </div>
        </div>
    }
}
