//! Catalog query coordinator.
//!
//! Owns the filter, the page index and the last fetched page, and picks the
//! right list call for the current filter. Overlapping loads are resolved
//! last-write-wins: every load takes a sequence number when it is issued,
//! and a result is only applied if no newer load was issued in the meantime.

use std::sync::atomic::{AtomicU64, AtomicUsize, Ordering};
use std::sync::Arc;

use tokio::sync::RwLock;
use tracing::{debug, warn};

use crate::api::MangaApi;
use crate::messages;
use crate::transport::ApiError;
use crate::ui::{ConsoleUi, Notice};

use super::{CatalogPage, SelectionSet};

/// What happened to a load's result.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadOutcome {
    /// The result is now the displayed page.
    Applied,
    /// A newer load was issued first; the result was discarded.
    Superseded,
}

#[derive(Debug, Default)]
struct CatalogState {
    filter: Option<String>,
    page_index: u32,
    page: Option<CatalogPage>,
    total_count: u64,
    tags: Vec<String>,
    selection: SelectionSet,
}

pub struct CatalogCoordinator {
    api: Arc<MangaApi>,
    ui: Arc<dyn ConsoleUi>,
    page_size: u32,
    state: RwLock<CatalogState>,
    /// Sequence number of the most recently issued load.
    issued: AtomicU64,
    /// Loads currently waiting on the backend.
    in_flight: AtomicUsize,
}

/// Keeps the loading indicator up for as long as it lives.
struct LoadingGuard<'a>(&'a AtomicUsize);

impl<'a> LoadingGuard<'a> {
    fn new(counter: &'a AtomicUsize) -> Self {
        counter.fetch_add(1, Ordering::SeqCst);
        Self(counter)
    }
}

impl Drop for LoadingGuard<'_> {
    fn drop(&mut self) {
        self.0.fetch_sub(1, Ordering::SeqCst);
    }
}

impl CatalogCoordinator {
    pub fn new(api: Arc<MangaApi>, ui: Arc<dyn ConsoleUi>, page_size: u32) -> Self {
        Self {
            api,
            ui,
            page_size,
            state: RwLock::new(CatalogState::default()),
            issued: AtomicU64::new(0),
            in_flight: AtomicUsize::new(0),
        }
    }

    /// Fetch page `page_index` for the current filter.
    ///
    /// On failure the displayed page is left as it was and the operator is
    /// told, unless the failure was a 401 (the transport already redirected).
    pub async fn load(&self, page_index: u32) -> Result<LoadOutcome, ApiError> {
        let (seq, filter) = {
            let state = self.state.read().await;
            (self.next_seq(), state.filter.clone())
        };
        self.fetch(seq, filter, page_index).await
    }

    /// Change the tag filter and restart at the first page.
    ///
    /// An empty tag clears the filter.
    pub async fn set_filter(&self, tag: Option<String>) -> Result<LoadOutcome, ApiError> {
        let tag = tag.filter(|t| !t.trim().is_empty());
        let (seq, filter) = {
            let mut state = self.state.write().await;
            state.filter = tag;
            state.page_index = 0;
            (self.next_seq(), state.filter.clone())
        };
        debug!("Filter set to {:?}", filter);
        self.fetch(seq, filter, 0).await
    }

    /// Reload the page currently on display.
    pub async fn refresh(&self) -> Result<LoadOutcome, ApiError> {
        let page_index = self.state.read().await.page_index;
        self.load(page_index).await
    }

    /// Jump to another page of the current filter.
    pub async fn goto_page(&self, page_index: u32) -> Result<LoadOutcome, ApiError> {
        self.load(page_index).await
    }

    /// Fetch the tag vocabulary for the filter picker.
    ///
    /// Failure is logged and otherwise ignored; browsing does not depend on it.
    pub async fn load_tag_vocabulary(&self) {
        match self.api.all_tags().await {
            Ok(tags) => {
                debug!("Loaded {} tags", tags.len());
                self.state.write().await.tags = tags;
            }
            Err(e) => warn!("Failed to load tags: {}", e),
        }
    }

    async fn fetch(
        &self,
        seq: u64,
        filter: Option<String>,
        page_index: u32,
    ) -> Result<LoadOutcome, ApiError> {
        let _loading = LoadingGuard::new(&self.in_flight);

        let result = match filter.as_deref() {
            Some(tag) => self.api.list_by_tag(tag, page_index, self.page_size).await,
            None => self.api.list(page_index, self.page_size).await,
        };

        let mut state = self.state.write().await;
        if self.issued.load(Ordering::SeqCst) != seq {
            debug!(
                "Discarding superseded load #{} (filter {:?}, page {})",
                seq, filter, page_index
            );
            return Ok(LoadOutcome::Superseded);
        }

        match result {
            Ok(envelope) => {
                let page = CatalogPage {
                    items: envelope.content,
                    total_count: envelope.total_elements,
                    page_index,
                    page_size: self.page_size,
                };
                state.total_count = page.total_count;
                state.page_index = page_index;
                state.page = Some(page);
                Ok(LoadOutcome::Applied)
            }
            Err(e) => {
                drop(state);
                if !e.is_unauthorized() {
                    self.ui.notify(Notice::error(messages::with_detail(
                        messages::LOAD_FAILED,
                        &e.user_message(),
                    )));
                }
                Err(e)
            }
        }
    }

    fn next_seq(&self) -> u64 {
        self.issued.fetch_add(1, Ordering::SeqCst) + 1
    }

    pub fn page_size(&self) -> u32 {
        self.page_size
    }

    pub fn is_loading(&self) -> bool {
        self.in_flight.load(Ordering::SeqCst) > 0
    }

    /// The page on display, if any load has succeeded yet.
    pub async fn page(&self) -> Option<CatalogPage> {
        self.state.read().await.page.clone()
    }

    pub async fn current_page(&self) -> u32 {
        self.state.read().await.page_index
    }

    pub async fn total_count(&self) -> u64 {
        self.state.read().await.total_count
    }

    pub async fn filter(&self) -> Option<String> {
        self.state.read().await.filter.clone()
    }

    pub async fn tags(&self) -> Vec<String> {
        self.state.read().await.tags.clone()
    }

    pub async fn selection(&self) -> Vec<i64> {
        self.state.read().await.selection.ids().to_vec()
    }

    pub async fn select(&self, id: i64) -> bool {
        self.state.write().await.selection.insert(id)
    }

    pub async fn deselect(&self, id: i64) -> bool {
        self.state.write().await.selection.remove(id)
    }

    pub async fn toggle_selection(&self, id: i64) -> bool {
        self.state.write().await.selection.toggle(id)
    }

    pub async fn replace_selection(&self, ids: impl IntoIterator<Item = i64>) {
        self.state.write().await.selection.replace(ids);
    }

    pub async fn clear_selection(&self) {
        self.state.write().await.selection.clear();
    }
}
