use crate::domain::b001_book::ui::list::BookList;
use leptos::prelude::*;
use thaw::ConfigProvider;

#[component]
pub fn App() -> impl IntoView {
    view! {
        <ConfigProvider>
            <BookList />
        </ConfigProvider>
    }
}
