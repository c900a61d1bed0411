use std::sync::Arc;
use std::time::Duration;

use chrono::Utc;
use tokio::sync::Mutex;
use tracing::{info, warn};
use uuid::Uuid;

use crate::error::AppError;
use crate::gateway::StudentGateway;
use crate::models::{Draft, DraftField, Student, StudentId};
use crate::state::{Command, ConsoleSnapshot, ConsoleState};

const DRAFT_FIELDS: [DraftField; 4] = [
    DraftField::Name,
    DraftField::Age,
    DraftField::Email,
    DraftField::Course,
];

/// Runs user actions: talks to the gateway, then records the outcome in
/// the console state. The state lock is never held across a gateway call.
///
/// Failed gateway calls are reported to the user as a notification and
/// also returned, so callers can tell what happened.
#[derive(Clone)]
pub struct ConsoleService {
    state: Arc<Mutex<ConsoleState>>,
    gateway: Arc<dyn StudentGateway>,
    notification_ttl: Duration,
}

impl ConsoleService {
    pub fn new(
        state: Arc<Mutex<ConsoleState>>,
        gateway: Arc<dyn StudentGateway>,
        notification_ttl: Duration,
    ) -> Self {
        Self {
            state,
            gateway,
            notification_ttl,
        }
    }

    /// Reloads the whole collection. Every successful mutation ends here.
    pub async fn refresh(&self) {
        let ticket = self.state.lock().await.begin_fetch();

        let command = match self.gateway.list_all().await {
            Ok(students) => {
                info!("fetched {} students", students.len());
                Command::FetchSucceeded { ticket, students }
            }
            Err(e) => {
                warn!("Error fetching students: {}", e);
                Command::FetchFailed { ticket }
            }
        };

        self.state.lock().await.apply(command);
    }

    pub async fn snapshot(&self) -> ConsoleSnapshot {
        let ttl = chrono::Duration::from_std(self.notification_ttl).unwrap_or(chrono::Duration::MAX);
        let mut state = self.state.lock().await;
        state.prune_notifications(Utc::now(), ttl);
        state.snapshot()
    }

    pub async fn set_add_field(&self, field: DraftField, value: impl Into<String>) {
        self.state
            .lock()
            .await
            .apply(Command::SetAddField(field, value.into()));
    }

    /// Replaces the whole add form, e.g. from a submitted HTML form.
    pub async fn set_add_draft(&self, draft: &Draft) {
        let mut state = self.state.lock().await;
        for field in DRAFT_FIELDS {
            state.apply(Command::SetAddField(field, draft.get(field).to_string()));
        }
    }

    pub async fn submit_add(&self) -> Result<Student, AppError> {
        let payload = {
            let mut state = self.state.lock().await;
            match state.add_draft().to_payload() {
                Ok(payload) => payload,
                Err(e) => {
                    state.apply(Command::Rejected(e.to_string()));
                    return Err(e);
                }
            }
        };

        match self.gateway.create(&payload).await {
            Ok(student) => {
                info!("added student {}", student.id);
                self.state.lock().await.apply(Command::AddSucceeded);
                self.refresh().await;
                Ok(student)
            }
            Err(e) => {
                warn!("Add student error: {}", e);
                self.state.lock().await.apply(Command::AddFailed);
                Err(e.into())
            }
        }
    }

    pub async fn start_edit(&self, raw_id: &str) -> Result<(), AppError> {
        let mut state = self.state.lock().await;
        let id = Self::resolve(&state, raw_id)?;
        state.apply(Command::StartEdit(id));
        Ok(())
    }

    pub async fn set_edit_field(&self, field: DraftField, value: impl Into<String>) {
        self.state
            .lock()
            .await
            .apply(Command::SetEditField(field, value.into()));
    }

    /// Overwrites the draft of the row being edited. The row must be the
    /// one currently in edit mode.
    pub async fn set_edit_draft(&self, raw_id: &str, draft: &Draft) -> Result<(), AppError> {
        let mut state = self.state.lock().await;
        Self::editing_id(&state, raw_id)?;
        for field in DRAFT_FIELDS {
            state.apply(Command::SetEditField(field, draft.get(field).to_string()));
        }
        Ok(())
    }

    pub async fn save_edit(&self, raw_id: &str) -> Result<Student, AppError> {
        let (id, payload) = {
            let mut state = self.state.lock().await;
            let id = Self::editing_id(&state, raw_id)?;
            let draft = state.editing().map(|e| e.draft.to_payload());
            match draft {
                Some(Ok(payload)) => (id, payload),
                Some(Err(e)) => {
                    state.apply(Command::Rejected(e.to_string()));
                    return Err(e);
                }
                None => return Err(AppError::NotFound),
            }
        };

        match self.gateway.update(&id, &payload).await {
            Ok(student) => {
                info!("updated student {}", id);
                self.state.lock().await.apply(Command::EditSaved(id));
                self.refresh().await;
                Ok(student)
            }
            Err(e) => {
                warn!("Update student error: {}", e);
                self.state.lock().await.apply(Command::EditFailed);
                Err(e.into())
            }
        }
    }

    pub async fn cancel_edit(&self) {
        self.state.lock().await.apply(Command::CancelEdit);
    }

    pub async fn delete(&self, raw_id: &str) -> Result<(), AppError> {
        let id = {
            let state = self.state.lock().await;
            Self::resolve(&state, raw_id)?
        };

        match self.gateway.delete(&id).await {
            Ok(()) => {
                info!("deleted student {}", id);
                self.state.lock().await.apply(Command::DeleteSucceeded(id));
                self.refresh().await;
                Ok(())
            }
            Err(e) => {
                warn!("Delete student error: {}", e);
                self.state.lock().await.apply(Command::DeleteFailed);
                Err(e.into())
            }
        }
    }

    /// Sets the search term and reloads, like the search button does.
    pub async fn search(&self, term: impl Into<String>) {
        self.state.lock().await.apply(Command::Search(term.into()));
        self.refresh().await;
    }

    pub async fn next_page(&self) {
        self.state.lock().await.apply(Command::NextPage);
    }

    pub async fn previous_page(&self) {
        self.state.lock().await.apply(Command::PreviousPage);
    }

    pub async fn dismiss(&self, id: Uuid) {
        self.state.lock().await.apply(Command::Dismiss(id));
    }

    fn resolve(state: &ConsoleState, raw_id: &str) -> Result<StudentId, AppError> {
        state
            .find_student(raw_id)
            .map(|s| s.id.clone())
            .ok_or(AppError::NotFound)
    }

    fn editing_id(state: &ConsoleState, raw_id: &str) -> Result<StudentId, AppError> {
        state
            .editing()
            .filter(|e| e.id.matches(raw_id))
            .map(|e| e.id.clone())
            .ok_or(AppError::NotFound)
    }
}
