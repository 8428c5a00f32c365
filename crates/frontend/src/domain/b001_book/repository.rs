//! Persistence for the book catalog: one localStorage key holding the
//! whole sequence as a JSON array.
//!
//! Scoped to the browser profile/origin. Two tabs writing the same key
//! race as last-write-wins; no cross-tab synchronization is attempted.

use contracts::catalog::Catalog;
use web_sys::window;

const BOOKS_KEY: &str = "b001_books_v1";

fn storage() -> Option<web_sys::Storage> {
    window().and_then(|w| w.local_storage().ok().flatten())
}

/// Load the catalog from localStorage.
///
/// Missing or unparseable data yields an empty catalog, never a crash.
pub fn load_catalog() -> Catalog {
    let Some(raw) = storage().and_then(|s| s.get_item(BOOKS_KEY).ok().flatten()) else {
        return Catalog::new();
    };
    match Catalog::from_json(&raw) {
        Ok(catalog) => {
            log::debug!("Загружен каталог: {} книг", catalog.len());
            catalog
        }
        Err(e) => {
            log::warn!("Хранилище повреждено, каталог сброшен: {}", e);
            Catalog::new()
        }
    }
}

/// Persist the full catalog (whole-array overwrite, not a diff).
pub fn save_catalog(catalog: &Catalog) {
    let Some(storage) = storage() else { return };
    let Ok(raw) = catalog.to_json() else { return };
    let _ = storage.set_item(BOOKS_KEY, &raw);
}
