use super::view_model::BookDetailsViewModel;
use crate::shared::icons::icon;
use contracts::domain::b001_book::aggregate::BookDto;
use leptos::prelude::*;

#[component]
pub fn BookDetails(
    /// Начальное содержимое формы; `id` заполнен в режиме редактирования
    initial: BookDto,
    on_save: Callback<BookDto>,
    on_cancel: Callback<()>,
) -> impl IntoView {
    let vm = BookDetailsViewModel::new(initial);
    let form = vm.form;

    view! {
        <div class="details-container book-details">
            {move || vm.error.get().map(|e| view! { <div class="error">{e}</div> })}

            <div class="details-form">
                <div class="form-group">
                    <label for="author">{"Автор"}</label>
                    <input
                        type="text"
                        id="author"
                        prop:value=move || form.get().author
                        on:input=move |ev| form.update(|f| f.author = event_target_value(&ev))
                        placeholder="Фамилия и инициалы автора"
                    />
                </div>

                <div class="form-group">
                    <label for="title">{"Название"}</label>
                    <input
                        type="text"
                        id="title"
                        prop:value=move || form.get().title
                        on:input=move |ev| form.update(|f| f.title = event_target_value(&ev))
                        placeholder="Название книги"
                    />
                </div>

                <div class="form-group">
                    <label for="genre">{"Жанр"}</label>
                    <input
                        type="text"
                        id="genre"
                        prop:value=move || form.get().genre
                        on:input=move |ev| form.update(|f| f.genre = event_target_value(&ev))
                        placeholder="Необязательно"
                    />
                </div>

                <div class="form-group">
                    <label for="quantity">{"Кол-во экземпляров"}</label>
                    <input
                        type="text"
                        id="quantity"
                        prop:value=move || form.get().quantity
                        on:input=move |ev| form.update(|f| f.quantity = event_target_value(&ev))
                        placeholder="Необязательно"
                    />
                </div>

                <div class="form-group">
                    <label for="location">{"Местоположение"}</label>
                    <input
                        type="text"
                        id="location"
                        prop:value=move || form.get().location
                        on:input=move |ev| form.update(|f| f.location = event_target_value(&ev))
                        placeholder="№ стеллажа + № полки"
                    />
                </div>

                <div class="form-group">
                    <label for="book_id">{"ID (картотека)"}</label>
                    <input
                        type="text"
                        id="book_id"
                        prop:value=move || form.get().book_id
                        on:input=move |ev| form.update(|f| f.book_id = event_target_value(&ev))
                        placeholder="Внешний идентификатор"
                    />
                </div>

                <div class="form-group">
                    <label for="notes">{"Примечания"}</label>
                    <textarea
                        id="notes"
                        prop:value=move || form.get().notes
                        on:input=move |ev| form.update(|f| f.notes = event_target_value(&ev))
                        placeholder="Состояние, наличие (необязательно)"
                        rows="3"
                    />
                </div>
            </div>

            <div class="details-actions">
                <button
                    class="btn btn-primary"
                    on:click=move |_| vm.save_command(on_save)
                    disabled=move || !vm.is_form_valid()
                >
                    {icon("save")}
                    {move || if vm.is_edit_mode() { "Сохранить" } else { "Создать" }}
                </button>
                <button class="btn btn-secondary" on:click=move |_| on_cancel.run(())>
                    {icon("cancel")}
                    {"Отмена"}
                </button>
            </div>
        </div>
    }
}
