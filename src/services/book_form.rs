//! Book Form Controller - validation and request orchestration
//!
//! Drives one book form: validates drafts, calls the backend through
//! [`BookApi`], and keeps a [`BookView`] in sync with the results. The
//! controller holds no form state of its own; every handler takes the
//! current [`FormState`] and returns the next one. A handler that fails
//! returns `Err` after reporting on the view, and the caller keeps the state
//! it already had.

use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;

use crate::domain::{BookApi, BookView, ClientError, FieldErrors, FormMode};
use crate::models::{Book, BookDraft, BookId, BookPayload, BookRow, FormField};
use crate::services::validation::validate_book;

pub const DEFAULT_NOTICE_DISMISS: Duration = Duration::from_millis(3000);

pub const MSG_CREATED: &str = "book created";
pub const MSG_UPDATED: &str = "book updated";
pub const MSG_DELETED: &str = "book deleted";
pub const MSG_CHECK_INPUT: &str = "check your input";
pub const MSG_UNREACHABLE: &str = "could not reach the server";
pub const MSG_UNEXPECTED: &str = "unexpected response from the server";
pub const CONFIRM_DELETE: &str = "delete this book?";

/// Whether the form is creating a new record or editing a fetched one
#[derive(Clone, Debug, Default, PartialEq)]
pub enum FormState {
    #[default]
    Idle,
    Editing { id: BookId, original: Book },
}

impl FormState {
    pub fn editing_id(&self) -> Option<&BookId> {
        match self {
            FormState::Idle => None,
            FormState::Editing { id, .. } => Some(id),
        }
    }

    pub fn is_idle(&self) -> bool {
        matches!(self, FormState::Idle)
    }
}

pub struct BookForm {
    api: Arc<dyn BookApi>,
    view: Arc<dyn BookView>,
    notice_delay: Duration,
    // Bumped per success notice so only the latest timer hides it
    notice_generation: Arc<AtomicU64>,
}

impl BookForm {
    pub fn new(api: Arc<dyn BookApi>, view: Arc<dyn BookView>) -> Self {
        Self {
            api,
            view,
            notice_delay: DEFAULT_NOTICE_DISMISS,
            notice_generation: Arc::new(AtomicU64::new(0)),
        }
    }

    /// Set how long success notices stay visible
    pub fn with_notice_delay(mut self, delay: Duration) -> Self {
        self.notice_delay = delay;
        self
    }

    /// Fetch every record and rebuild the table from it
    pub async fn list(&self) -> Result<Vec<BookRow>, ClientError> {
        tracing::info!("Loading book list");

        let books = self.api.list().await.inspect_err(|e| self.report(e))?;
        let rows: Vec<BookRow> = books.iter().map(BookRow::from).collect();
        self.view.render_list(&rows);

        tracing::info!("Rendered {} books", rows.len());
        Ok(rows)
    }

    /// Submit the form: create when idle, update when editing
    pub async fn submit(
        &self,
        state: &FormState,
        draft: BookDraft,
    ) -> Result<FormState, ClientError> {
        match state {
            FormState::Idle => self.create(draft).await,
            FormState::Editing { id, .. } => self.submit_edit(id, draft).await,
        }
    }

    /// Validate and `POST` a new record. Always ends in `Idle`.
    pub async fn create(&self, draft: BookDraft) -> Result<FormState, ClientError> {
        self.view.clear_errors();
        let payload = self.validated(&draft)?;

        tracing::debug!("Creating book: {:?}", payload);
        self.api
            .create(&payload)
            .await
            .inspect_err(|e| self.report(e))?;
        tracing::info!("Created book '{}' ({})", payload.title, payload.isbn);

        self.finish_mutation(MSG_CREATED).await;
        Ok(FormState::Idle)
    }

    /// Fetch a record and load it into the form for editing
    pub async fn begin_edit(&self, id: &BookId) -> Result<FormState, ClientError> {
        self.view.clear_errors();

        let book = self.api.get(id).await.inspect_err(|e| self.report(e))?;
        self.view.fill_form(&BookDraft::from(&book));
        self.view.set_mode(FormMode::Edit);

        tracing::info!("Editing book {}", id);
        Ok(FormState::Editing {
            id: id.clone(),
            original: book,
        })
    }

    /// Validate and `PUT` the edited record. Ends in `Idle` on success.
    pub async fn submit_edit(
        &self,
        id: &BookId,
        draft: BookDraft,
    ) -> Result<FormState, ClientError> {
        self.view.clear_errors();
        let payload = self.validated(&draft)?;

        tracing::debug!("Updating book {}: {:?}", id, payload);
        self.api
            .update(id, &payload)
            .await
            .inspect_err(|e| self.report(e))?;
        tracing::info!("Updated book {}", id);

        self.finish_mutation(MSG_UPDATED).await;
        Ok(FormState::Idle)
    }

    /// Leave edit mode without touching the backend
    pub fn cancel_edit(&self, state: &FormState) -> FormState {
        if let Some(id) = state.editing_id() {
            tracing::info!("Cancelled edit of book {}", id);
        }
        self.view.reset_form();
        FormState::Idle
    }

    /// Delete a record after the user confirms.
    ///
    /// Returns `Ok(false)` when the user declines; nothing is sent then.
    pub async fn remove(&self, id: &BookId) -> Result<bool, ClientError> {
        if !self.view.confirm(CONFIRM_DELETE) {
            tracing::info!("Delete of book {} declined", id);
            return Ok(false);
        }
        self.view.clear_errors();

        self.api.delete(id).await.inspect_err(|e| self.report(e))?;
        tracing::info!("Deleted book {}", id);

        self.notify_success(MSG_DELETED);
        self.reload().await;
        Ok(true)
    }

    fn validated(&self, draft: &BookDraft) -> Result<BookPayload, ClientError> {
        validate_book(draft).map_err(|e| {
            let err = ClientError::from(e);
            self.report(&err);
            err
        })
    }

    async fn finish_mutation(&self, message: &str) {
        self.view.reset_form();
        self.notify_success(message);
        self.reload().await;
    }

    // The mutation already succeeded; a failed reload is shown but not returned
    async fn reload(&self) {
        if let Err(e) = self.list().await {
            tracing::warn!("List reload after mutation failed: {}", e);
        }
    }

    fn notify_success(&self, message: &str) {
        self.view.show_success(message);

        let generation = self.notice_generation.fetch_add(1, Ordering::SeqCst) + 1;
        let latest = Arc::clone(&self.notice_generation);
        let view = Arc::clone(&self.view);
        let delay = self.notice_delay;

        tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            if latest.load(Ordering::SeqCst) == generation {
                view.hide_success();
            }
        });
    }

    /// Show an error on the view
    fn report(&self, err: &ClientError) {
        let no_fields = FieldErrors::new();

        match err {
            ClientError::Validation(e) => {
                tracing::warn!("Rejected draft: {}", e);
                let fields = FieldErrors::from([(e.field, e.message.to_string())]);
                self.view.render_error(&fields, e.message);
            }
            ClientError::Http {
                status,
                reason,
                body,
            } => {
                tracing::warn!("Backend rejected request: {}", err);

                let fields: FieldErrors = body
                    .iter()
                    .flat_map(|b| b.errors.iter())
                    .filter_map(|(name, msg)| {
                        FormField::from_name(name).map(|field| (field, msg.clone()))
                    })
                    .collect();

                if !fields.is_empty() {
                    self.view.render_error(&fields, MSG_CHECK_INPUT);
                    return;
                }

                let summary = body
                    .as_ref()
                    .and_then(|b| b.message.clone())
                    .filter(|m| !m.is_empty())
                    .unwrap_or_else(|| ClientError::status_line(*status, reason));
                self.view.render_error(&no_fields, &summary);
            }
            ClientError::Transport(msg) => {
                tracing::error!("Backend unreachable: {}", msg);
                self.view.render_error(&no_fields, MSG_UNREACHABLE);
            }
            ClientError::Decode(msg) => {
                tracing::error!("Unexpected backend response: {}", msg);
                self.view.render_error(&no_fields, MSG_UNEXPECTED);
            }
        }
    }
}
