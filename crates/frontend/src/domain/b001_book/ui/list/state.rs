use leptos::prelude::*;
use serde::{Deserialize, Serialize};

const STORAGE_KEY: &str = "b001_book_list_state_v1";

#[derive(Clone, Debug, Serialize, Deserialize)]
struct PersistedState {
    pub q: String,
    pub sort_field: String,
    pub sort_ascending: bool,
}

#[derive(Clone, Debug)]
pub struct BookListState {
    // filter
    pub q: String,

    // client sorting
    pub sort_field: String,
    pub sort_ascending: bool,
}

impl Default for BookListState {
    fn default() -> Self {
        Self {
            q: String::new(),
            sort_field: "author".to_string(),
            sort_ascending: true,
        }
    }
}

fn storage() -> Option<web_sys::Storage> {
    web_sys::window().and_then(|w| w.local_storage().ok().flatten())
}

fn load_persisted() -> Option<PersistedState> {
    let raw = storage()?.get_item(STORAGE_KEY).ok().flatten()?;
    serde_json::from_str::<PersistedState>(&raw).ok()
}

fn save_persisted(st: &PersistedState) {
    let Some(storage) = storage() else { return };
    let Ok(raw) = serde_json::to_string(st) else { return };
    let _ = storage.set_item(STORAGE_KEY, &raw);
}

pub fn persist_state(signal: RwSignal<BookListState>) {
    let st = signal.get_untracked();
    let persisted = PersistedState {
        q: st.q,
        sort_field: st.sort_field,
        sort_ascending: st.sort_ascending,
    };
    save_persisted(&persisted);
}

pub fn create_state() -> RwSignal<BookListState> {
    let mut st = BookListState::default();
    if let Some(p) = load_persisted() {
        st.q = p.q;
        st.sort_field = p.sort_field;
        st.sort_ascending = p.sort_ascending;
    }
    RwSignal::new(st)
}
