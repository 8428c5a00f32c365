pub mod state;

use self::state::{create_state, persist_state};
use crate::domain::b001_book::repository::{load_catalog, save_catalog};
use crate::domain::b001_book::ui::details::BookDetails;
use crate::shared::excel_importer::ExcelImporter;
use crate::shared::export::{export_to_csv, CsvExportable};
use crate::shared::icons::icon;
use crate::shared::list_utils::{get_sort_class, get_sort_indicator, SearchInput};
use crate::shared::modal::Modal;
use contracts::catalog::query;
use contracts::domain::b001_book::aggregate::{Book, BookDto, BookId};
use contracts::domain::b001_book::excel::ExcelData;
use contracts::domain::common::AggregateId;
use leptos::prelude::*;
use thaw::*;

#[derive(Clone, Debug)]
pub struct BookRow {
    pub id: BookId,
    pub author: String,
    pub title: String,
    pub genre: String,
    pub quantity: String,
    pub location: String,
    pub book_id: String,
    pub notes: String,
    pub created_at: String,
}

impl From<&Book> for BookRow {
    fn from(b: &Book) -> Self {
        Self {
            id: b.id,
            author: b.author.clone(),
            title: b.title.clone(),
            genre: b.genre.clone(),
            quantity: b.quantity.clone(),
            location: b.location.clone(),
            book_id: b.book_id.clone(),
            notes: b.notes.clone(),
            created_at: format_timestamp(b.metadata.created_at),
        }
    }
}

fn format_timestamp(dt: chrono::DateTime<chrono::Utc>) -> String {
    dt.format("%Y-%m-%d %H:%M:%S").to_string()
}

// Заголовки CSV совпадают с каноническими колонками импорта, чтобы
// выгруженный файл можно было импортировать обратно
impl CsvExportable for BookRow {
    fn headers() -> Vec<&'static str> {
        vec![
            "Автор",
            "Название",
            "Жанр",
            "Кол-во экземпляров, частей, томов",
            "МЕСТОПОЛОЖЕНИЕ(№СТЕЛЛАЖА+№ПОЛКИ)",
            "ID",
            "ПРИМЕЧАНИЯ/СОСТОЯНИЕ/НАЛИЧИЕ",
        ]
    }

    fn to_csv_row(&self) -> Vec<String> {
        vec![
            self.author.clone(),
            self.title.clone(),
            self.genre.clone(),
            self.quantity.clone(),
            self.location.clone(),
            self.book_id.clone(),
            self.notes.clone(),
        ]
    }
}

#[component]
fn BookListHeader(
    #[prop(into)] total_count: Signal<usize>,
    on_add: Callback<()>,
    on_import: Callback<()>,
    on_export: Callback<()>,
) -> impl IntoView {
    view! {
        <div class="page__header">
            <div class="page__header-left">
                {icon("book")}
                <h1 class="page__title">"Книжный каталог"</h1>
                <Badge appearance=BadgeAppearance::Tint color=BadgeColor::Brand>
                    <span>{move || total_count.get().to_string()}</span>
                </Badge>
            </div>

            <div class="page__header-right">
                <Button
                    appearance=ButtonAppearance::Primary
                    on_click=move |_| on_add.run(())
                >
                    {icon("plus")}
                    " Добавить книгу"
                </Button>
                <Button
                    appearance=ButtonAppearance::Secondary
                    on_click=move |_| on_import.run(())
                >
                    {icon("upload")}
                    " Импорт Excel"
                </Button>
                <Button
                    appearance=ButtonAppearance::Secondary
                    on_click=move |_| on_export.run(())
                >
                    {icon("download")}
                    " Экспорт CSV"
                </Button>
            </div>
        </div>
    }
}

#[component]
#[allow(non_snake_case)]
pub fn BookList() -> impl IntoView {
    // Единственный владелец последовательности книг в этой сессии
    let catalog = RwSignal::new(load_catalog());
    let state = create_state();

    // None = форма закрыта; id внутри DTO различает добавление и правку
    let details_form = RwSignal::new(Option::<BookDto>::None);
    let (show_import, set_show_import) = signal(false);
    let (error, set_error) = signal(Option::<String>::None);

    let persist = move || catalog.with_untracked(|c| save_catalog(c));

    // Видимые строки: фильтр, затем сортировка; канонический порядок
    // каталога не меняется
    let visible_rows = move || {
        let st = state.get();
        catalog.with(|c| query::visible_books(c.books(), &st.q, &st.sort_field, st.sort_ascending))
            .iter()
            .map(BookRow::from)
            .collect::<Vec<_>>()
    };

    let close_details = Callback::new(move |_: ()| details_form.set(None));

    let handle_add = Callback::new(move |_: ()| details_form.set(Some(BookDto::default())));

    let handle_edit = move |id: BookId| {
        // Тихий no-op, если книги уже нет
        if let Some(dto) = catalog.with_untracked(|c| c.get(id).map(BookDto::from)) {
            details_form.set(Some(dto));
        }
    };

    let handle_save = Callback::new(move |dto: BookDto| {
        let existing = dto.id.as_deref().and_then(|s| BookId::from_string(s).ok());
        match existing {
            Some(id) => {
                catalog.update(|c| {
                    c.update(id, &dto);
                });
            }
            None => catalog.update(|c| c.add(Book::new_for_insert(&dto))),
        }
        persist();
        details_form.set(None);
    });

    let handle_delete = move |id: BookId| {
        let Some(title) = catalog.with_untracked(|c| c.get(id).map(|b| b.title.clone())) else {
            return;
        };
        let confirmed = web_sys::window()
            .map(|w| {
                w.confirm_with_message(&format!("Удалить книгу «{}»?", title))
                    .unwrap_or(false)
            })
            .unwrap_or(false);
        if !confirmed {
            return;
        }
        catalog.update(|c| {
            c.remove(id);
        });
        persist();
    };

    let handle_import = Callback::new(move |data: ExcelData| {
        let batch = data.to_books();
        log::info!("Импорт из «{}»: {} книг", data.metadata.file_name, batch.len());
        catalog.update(|c| c.append(batch));
        persist();
        set_show_import.set(false);
    });

    let handle_export = Callback::new(move |_: ()| {
        let rows: Vec<BookRow> =
            catalog.with_untracked(|c| c.books().iter().map(BookRow::from).collect());
        match export_to_csv(&rows, "books.csv") {
            Ok(()) => set_error.set(None),
            Err(e) => set_error.set(Some(e)),
        }
    });

    let set_query = Callback::new(move |q: String| {
        state.update(|s| s.q = q);
        persist_state(state);
    });

    let toggle_sort = move |field: &'static str| {
        state.update(|s| {
            if s.sort_field == field {
                s.sort_ascending = !s.sort_ascending;
            } else {
                s.sort_field = field.to_string();
                s.sort_ascending = true;
            }
        });
        persist_state(state);
    };

    let sort_value = move || {
        let s = state.get();
        match (s.sort_field.as_str(), s.sort_ascending) {
            ("title", true) => "title",
            ("title", false) => "title_desc",
            ("author", false) => "author_desc",
            _ => "author",
        }
        .to_string()
    };

    let handle_sort_change = move |ev: web_sys::Event| {
        let (field, ascending) = match event_target_value(&ev).as_str() {
            "author_desc" => ("author", false),
            "title" => ("title", true),
            "title_desc" => ("title", false),
            _ => ("author", true),
        };
        state.update(|s| {
            s.sort_field = field.to_string();
            s.sort_ascending = ascending;
        });
        persist_state(state);
    };

    view! {
        <div class="page page--wide">
            <BookListHeader
                total_count=Signal::derive(move || catalog.with(|c| c.len()))
                on_add=handle_add
                on_import=Callback::new(move |_| set_show_import.set(true))
                on_export=handle_export
            />

            {move || error.get().map(|e| view! {
                <div class="warning-box warning-box--error">
                    <span class="warning-box__icon">"⚠"</span>
                    <span class="warning-box__text">{e}</span>
                </div>
            })}

            <div class="filter-panel">
                <div class="filter-panel-content">
                    <div class="filter-panel__item">
                        <label>"Поиск:"</label>
                        <SearchInput
                            value=Signal::derive(move || state.get().q)
                            on_change=set_query
                            placeholder="Автор, название или жанр..."
                        />
                    </div>

                    <div class="filter-panel__item">
                        <label>"Сортировка:"</label>
                        <select class="select" prop:value=sort_value on:change=handle_sort_change>
                            <option value="author">"Автор ↑"</option>
                            <option value="author_desc">"Автор ↓"</option>
                            <option value="title">"Название ↑"</option>
                            <option value="title_desc">"Название ↓"</option>
                        </select>
                    </div>
                </div>
            </div>

            <div class="page-content">
                <div class="table">
                    <table class="table__data table--striped">
                        <thead class="table__head">
                            <tr>
                                <th class="table__header-cell table__header-cell--sortable" on:click=move |_| toggle_sort("author")>
                                    "Автор"
                                    <span class=move || get_sort_class(&state.get().sort_field, "author")>
                                        {move || get_sort_indicator(&state.get().sort_field, "author", state.get().sort_ascending)}
                                    </span>
                                </th>
                                <th class="table__header-cell table__header-cell--sortable" on:click=move |_| toggle_sort("title")>
                                    "Название"
                                    <span class=move || get_sort_class(&state.get().sort_field, "title")>
                                        {move || get_sort_indicator(&state.get().sort_field, "title", state.get().sort_ascending)}
                                    </span>
                                </th>
                                <th class="table__header-cell">{"Жанр"}</th>
                                <th class="table__header-cell">{"Кол-во"}</th>
                                <th class="table__header-cell">{"Местоположение"}</th>
                                <th class="table__header-cell">{"ID"}</th>
                                <th class="table__header-cell">{"Примечания"}</th>
                                <th class="table__header-cell">{"Добавлено"}</th>
                                <th class="table__header-cell table__header-cell--actions"></th>
                            </tr>
                        </thead>
                        <tbody>
                            {move || {
                                let rows = visible_rows();
                                if rows.is_empty() {
                                    return vec![view! {
                                        <tr class="table__row">
                                            <td class="table__cell" colspan="9">
                                                <span class="text-muted">"Нет данных"</span>
                                            </td>
                                        </tr>
                                    }.into_any()];
                                }

                                rows.into_iter().map(|row| {
                                    let id_for_edit = row.id;
                                    let id_for_delete = row.id;
                                    view! {
                                        <tr class="table__row">
                                            <td class="table__cell">{row.author}</td>
                                            <td class="table__cell">{row.title}</td>
                                            <td class="table__cell">{row.genre}</td>
                                            <td class="table__cell">{row.quantity}</td>
                                            <td class="table__cell">{row.location}</td>
                                            <td class="table__cell">{row.book_id}</td>
                                            <td class="table__cell">{row.notes}</td>
                                            <td class="table__cell">{row.created_at}</td>
                                            <td class="table__cell table__cell--actions">
                                                <button
                                                    class="button button--icon"
                                                    title="Редактировать"
                                                    on:click=move |_| handle_edit(id_for_edit)
                                                >
                                                    {icon("edit")}
                                                </button>
                                                <button
                                                    class="button button--icon"
                                                    title="Удалить"
                                                    on:click=move |_| handle_delete(id_for_delete)
                                                >
                                                    {icon("delete")}
                                                </button>
                                            </td>
                                        </tr>
                                    }.into_any()
                                }).collect::<Vec<_>>()
                            }}
                        </tbody>
                    </table>
                </div>
            </div>

            {move || details_form.get().map(|dto| {
                let title = if dto.id.is_some() { "Редактирование книги" } else { "Новая книга" };
                view! {
                    <Modal title=title.to_string() on_close=close_details>
                        <BookDetails initial=dto on_save=handle_save on_cancel=close_details />
                    </Modal>
                }
            })}

            <Show when=move || show_import.get()>
                <Modal
                    title="Импорт из Excel".to_string()
                    on_close=Callback::new(move |_| set_show_import.set(false))
                >
                    <ExcelImporter
                        on_import=handle_import
                        on_cancel=Callback::new(move |_| set_show_import.set(false))
                    />
                </Modal>
            </Show>
        </div>
    }
}
