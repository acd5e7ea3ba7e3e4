//! Batch mutation coordinator.
//!
//! Deletes run one id at a time, each awaited before the next is sent, so
//! every outcome is attributed to its id and a large selection never turns
//! into a burst of concurrent requests.

use std::path::Path;
use std::sync::Arc;

use serde_json::Value;
use tracing::{debug, info, warn};

use crate::api::MangaApi;
use crate::catalog::CatalogCoordinator;
use crate::messages;
use crate::transport::ApiError;
use crate::ui::{ConsoleUi, Notice};

use super::{BatchError, BatchOutcome};

pub struct BatchCoordinator {
    api: Arc<MangaApi>,
    catalog: Arc<CatalogCoordinator>,
    ui: Arc<dyn ConsoleUi>,
}

impl BatchCoordinator {
    pub fn new(api: Arc<MangaApi>, catalog: Arc<CatalogCoordinator>, ui: Arc<dyn ConsoleUi>) -> Self {
        Self { api, catalog, ui }
    }

    /// Delete every id in order, tallying each outcome.
    ///
    /// Individual failures do not stop the batch. A 401 does: the session is
    /// gone, so the remaining ids are counted as failed without being sent,
    /// nothing is reported beyond the transport's own notice, no reload is
    /// attempted, and the tally comes back in [`BatchError::Interrupted`].
    /// Otherwise, if anything succeeded, the selection is cleared and the
    /// current page reloaded once.
    pub async fn delete_many(&self, ids: &[i64]) -> Result<BatchOutcome, BatchError> {
        if ids.is_empty() {
            self.ui.notify(Notice::warning(messages::NOTHING_SELECTED));
            return Err(BatchError::EmptySelection);
        }

        let mut outcome = BatchOutcome::default();
        let mut rejected = None;
        for (position, &id) in ids.iter().enumerate() {
            match self.api.delete(id).await {
                Ok(()) => {
                    debug!("Deleted manga {}", id);
                    outcome.success_count += 1;
                }
                Err(e @ ApiError::Unauthorized(_)) => {
                    warn!(
                        "Session rejected while deleting {}; skipping {} remaining",
                        id,
                        ids.len() - position - 1
                    );
                    outcome.failure_count += ids.len() - position;
                    rejected = Some(e);
                    break;
                }
                Err(e) => {
                    warn!("Failed to delete manga {}: {}", id, e);
                    outcome.failure_count += 1;
                }
            }
        }

        info!(
            "Batch delete: {} succeeded, {} failed",
            outcome.success_count, outcome.failure_count
        );

        if let Some(source) = rejected {
            // Deleted ids are gone whether or not the session survived
            if outcome.any_succeeded() {
                self.catalog.clear_selection().await;
            }
            return Err(BatchError::Interrupted { outcome, source });
        }

        if !outcome.any_succeeded() {
            self.ui.notify(Notice::error(messages::BATCH_DELETE_FAILED));
            return Err(BatchError::AllFailed(outcome.failure_count));
        }

        self.ui.notify(Notice::success(messages::batch_delete_summary(
            outcome.success_count,
            outcome.failure_count,
        )));
        self.catalog.clear_selection().await;
        // A failed reload has already been reported by the catalog
        if let Err(e) = self.catalog.refresh().await {
            debug!("Reload after batch delete failed: {}", e);
        }

        Ok(outcome)
    }

    /// Delete whatever is currently selected.
    pub async fn delete_selected(&self) -> Result<BatchOutcome, BatchError> {
        let ids = self.catalog.selection().await;
        self.delete_many(&ids).await
    }

    /// Delete a single entry and reload the current page on success.
    pub async fn delete_one(&self, id: i64) -> Result<(), ApiError> {
        match self.api.delete(id).await {
            Ok(()) => {
                self.ui.notify(Notice::success(messages::DELETE_SUCCEEDED));
                if let Err(e) = self.catalog.refresh().await {
                    debug!("Reload after delete failed: {}", e);
                }
                Ok(())
            }
            Err(e) => {
                match &e {
                    ApiError::Unauthorized(_) => {}
                    ApiError::Rejected(message) => self.ui.notify(Notice::error(message.clone())),
                    other => self.ui.notify(Notice::error(messages::with_detail(
                        messages::DELETE_FAILED,
                        &other.user_message(),
                    ))),
                }
                Err(e)
            }
        }
    }

    /// Import one entry object or an array of them as a single call.
    ///
    /// The backend judges each entry; here the call either succeeds or fails
    /// as a whole. On success the first catalog page is reloaded.
    pub async fn import_many(&self, raw: Value) -> Result<usize, BatchError> {
        let entries = match normalize_import_payload(raw) {
            Ok(entries) => entries,
            Err(e) => {
                self.report_import_failure(&e);
                return Err(e);
            }
        };

        let count = entries.len();
        if let Err(e) = self.api.batch_import(&entries).await {
            let e = BatchError::Api(e);
            self.report_import_failure(&e);
            return Err(e);
        }

        info!("Imported {} entries", count);
        self.ui.notify(Notice::success(messages::import_summary(count)));
        if let Err(e) = self.catalog.load(0).await {
            debug!("Reload after import failed: {}", e);
        }
        Ok(count)
    }

    /// Parse `text` as JSON locally, then import it.
    ///
    /// Malformed JSON never reaches the backend.
    pub async fn import_json_text(&self, text: &str) -> Result<usize, BatchError> {
        match serde_json::from_str::<Value>(text) {
            Ok(raw) => self.import_many(raw).await,
            Err(e) => {
                let e = BatchError::MalformedPayload(e.to_string());
                self.report_import_failure(&e);
                Err(e)
            }
        }
    }

    /// Read a JSON file and import its contents.
    pub async fn import_file(&self, path: &Path) -> Result<usize, BatchError> {
        match tokio::fs::read_to_string(path).await {
            Ok(text) => self.import_json_text(&text).await,
            Err(e) => {
                let e = BatchError::Read(e);
                self.report_import_failure(&e);
                Err(e)
            }
        }
    }

    fn report_import_failure(&self, error: &BatchError) {
        let message = match error {
            BatchError::Api(ApiError::Unauthorized(_)) => return,
            BatchError::Api(ApiError::Rejected(message)) => message.clone(),
            BatchError::Api(e) => messages::with_detail(messages::IMPORT_FAILED, &e.user_message()),
            other => messages::with_detail(messages::IMPORT_FAILED, &other.to_string()),
        };
        self.ui.notify(Notice::error(message));
    }
}

/// Wrap a lone object into a one-element list; pass arrays through.
///
/// Scalars, and arrays holding anything but objects, are malformed.
pub fn normalize_import_payload(raw: Value) -> Result<Vec<Value>, BatchError> {
    let entries = match raw {
        Value::Array(entries) => entries,
        object @ Value::Object(_) => vec![object],
        other => {
            return Err(BatchError::MalformedPayload(format!(
                "expected an object or an array of objects, got {}",
                json_kind(&other)
            )))
        }
    };

    if let Some(position) = entries.iter().position(|e| !e.is_object()) {
        return Err(BatchError::MalformedPayload(format!(
            "entry {} is {}, not an object",
            position,
            json_kind(&entries[position])
        )));
    }

    Ok(entries)
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
