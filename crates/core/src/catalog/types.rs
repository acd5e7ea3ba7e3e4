use serde::Serialize;

use crate::api::MangaEntry;

/// One fetched page. Replaced wholesale on every successful load.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CatalogPage {
    /// Entries in backend order.
    pub items: Vec<MangaEntry>,
    pub total_count: u64,
    /// Zero-based.
    pub page_index: u32,
    pub page_size: u32,
}

impl CatalogPage {
    pub fn total_pages(&self) -> u64 {
        if self.page_size == 0 {
            return 0;
        }
        self.total_count.div_ceil(self.page_size as u64)
    }

    pub fn ids(&self) -> Vec<i64> {
        self.items.iter().map(|e| e.id).collect()
    }
}

/// Entry ids chosen for a batch action, in the order they were picked.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SelectionSet {
    ids: Vec<i64>,
}

impl SelectionSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add `id`; returns false if it was already selected.
    pub fn insert(&mut self, id: i64) -> bool {
        if self.ids.contains(&id) {
            return false;
        }
        self.ids.push(id);
        true
    }

    /// Remove `id`; returns false if it was not selected.
    pub fn remove(&mut self, id: i64) -> bool {
        let before = self.ids.len();
        self.ids.retain(|&selected| selected != id);
        self.ids.len() != before
    }

    /// Flip `id`; returns whether it is selected afterwards.
    pub fn toggle(&mut self, id: i64) -> bool {
        if self.remove(id) {
            false
        } else {
            self.ids.push(id);
            true
        }
    }

    /// Replace the whole selection, dropping duplicates.
    pub fn replace(&mut self, ids: impl IntoIterator<Item = i64>) {
        self.ids.clear();
        for id in ids {
            self.insert(id);
        }
    }

    pub fn clear(&mut self) {
        self.ids.clear();
    }

    pub fn contains(&self, id: i64) -> bool {
        self.ids.contains(&id)
    }

    pub fn ids(&self) -> &[i64] {
        &self.ids
    }

    pub fn len(&self) -> usize {
        self.ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }
}
