use contracts::domain::b001_book::aggregate::{Book, BookDto};
use leptos::prelude::*;

/// ViewModel for the book details form
#[derive(Clone, Copy)]
pub struct BookDetailsViewModel {
    pub form: RwSignal<BookDto>,
    pub error: RwSignal<Option<String>>,
}

impl BookDetailsViewModel {
    pub fn new(initial: BookDto) -> Self {
        Self {
            form: RwSignal::new(initial),
            error: RwSignal::new(None),
        }
    }

    pub fn is_edit_mode(&self) -> bool {
        self.form.get().id.is_some()
    }

    pub fn is_form_valid(&self) -> bool {
        let f = self.form.get();
        !f.author.trim().is_empty() && !f.title.trim().is_empty()
    }

    /// Validate and hand the form off to the owner
    pub fn save_command(&self, on_save: Callback<BookDto>) {
        let current = self.form.get_untracked();
        if let Err(e) = Book::validate(&current) {
            self.error.set(Some(e));
            return;
        }
        on_save.run(current);
    }
}
