//! UI state of the student console.
//!
//! [`ConsoleState`] is only ever changed through [`ConsoleState::apply`]
//! (and [`ConsoleState::begin_fetch`], which hands out the ticket a later
//! fetch result must present). Gateway calls happen elsewhere; this module
//! only records their outcomes.

use std::num::NonZeroUsize;

use chrono::{DateTime, Utc};
use serde::Serialize;
use tracing::debug;
use uuid::Uuid;

use crate::listing::{ListPage, derive_page};
use crate::models::{Draft, DraftField, EditDraft, Student, StudentId};

pub const ADD_SUCCESS: &str = "Student added successfully!";
pub const ADD_FAILURE: &str = "Failed to add student!";
pub const UPDATE_SUCCESS: &str = "Student updated successfully!";
pub const UPDATE_FAILURE: &str = "Failed to update student!";
pub const DELETE_SUCCESS: &str = "Student deleted successfully!";
pub const DELETE_FAILURE: &str = "Failed to delete student!";
pub const FETCH_FAILURE: &str = "Error fetching students!";

/// Sequence number of one collection fetch. Later fetches get larger tickets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct FetchTicket(u64);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum NotificationKind {
    Success,
    Error,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Notification {
    pub id: Uuid,
    pub kind: NotificationKind,
    pub message: String,
    pub raised_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    SetAddField(DraftField, String),
    AddSucceeded,
    AddFailed,
    StartEdit(StudentId),
    SetEditField(DraftField, String),
    EditSaved(StudentId),
    EditFailed,
    CancelEdit,
    DeleteSucceeded(StudentId),
    DeleteFailed,
    /// A draft did not pass validation; nothing was sent.
    Rejected(String),
    Search(String),
    NextPage,
    PreviousPage,
    FetchSucceeded {
        ticket: FetchTicket,
        students: Vec<Student>,
    },
    FetchFailed {
        ticket: FetchTicket,
    },
    Dismiss(Uuid),
}

#[derive(Debug, Clone)]
pub struct ConsoleState {
    students: Vec<Student>,
    add_draft: Draft,
    editing: Option<EditDraft>,
    search_term: String,
    page: usize,
    page_size: NonZeroUsize,
    loading: bool,
    notifications: Vec<Notification>,
    latest_fetch: u64,
}

/// Owned copy of everything the page renders.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ConsoleSnapshot {
    pub rows: Vec<Student>,
    pub page: usize,
    pub total_pages: usize,
    pub total_matches: usize,
    pub has_next: bool,
    pub has_previous: bool,
    pub search_term: String,
    pub loading: bool,
    pub add_draft: Draft,
    pub editing: Option<EditDraft>,
    pub notifications: Vec<Notification>,
}

impl ConsoleState {
    /// Starts in the loading state: nothing has been fetched yet.
    pub fn new(page_size: NonZeroUsize) -> Self {
        Self {
            students: Vec::new(),
            add_draft: Draft::default(),
            editing: None,
            search_term: String::new(),
            page: 1,
            page_size,
            loading: true,
            notifications: Vec::new(),
            latest_fetch: 0,
        }
    }

    pub fn students(&self) -> &[Student] {
        &self.students
    }

    pub fn add_draft(&self) -> &Draft {
        &self.add_draft
    }

    pub fn editing(&self) -> Option<&EditDraft> {
        self.editing.as_ref()
    }

    pub fn search_term(&self) -> &str {
        &self.search_term
    }

    pub fn page(&self) -> usize {
        self.page
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    pub fn notifications(&self) -> &[Notification] {
        &self.notifications
    }

    pub fn find_student(&self, raw_id: &str) -> Option<&Student> {
        self.students.iter().find(|s| s.id.matches(raw_id))
    }

    pub fn view(&self) -> ListPage<'_> {
        derive_page(&self.students, &self.search_term, self.page, self.page_size)
    }

    pub fn snapshot(&self) -> ConsoleSnapshot {
        let view = self.view();
        ConsoleSnapshot {
            has_next: view.has_next(),
            has_previous: view.has_previous(),
            page: view.page,
            total_pages: view.total_pages,
            total_matches: view.total_matches,
            rows: view.rows.into_iter().cloned().collect(),
            search_term: self.search_term.clone(),
            loading: self.loading,
            add_draft: self.add_draft.clone(),
            editing: self.editing.clone(),
            notifications: self.notifications.clone(),
        }
    }

    /// Marks a new fetch as in flight. Results carrying an older ticket are
    /// ignored once this one exists.
    pub fn begin_fetch(&mut self) -> FetchTicket {
        self.latest_fetch += 1;
        self.loading = true;
        FetchTicket(self.latest_fetch)
    }

    /// Drops notifications older than `ttl`.
    pub fn prune_notifications(&mut self, now: DateTime<Utc>, ttl: chrono::Duration) {
        self.notifications.retain(|n| now - n.raised_at < ttl);
    }

    pub fn apply(&mut self, command: Command) {
        match command {
            Command::SetAddField(field, value) => self.add_draft.set(field, value),
            Command::AddSucceeded => {
                self.add_draft = Draft::default();
                self.notify(NotificationKind::Success, ADD_SUCCESS);
            }
            Command::AddFailed => self.notify(NotificationKind::Error, ADD_FAILURE),
            Command::StartEdit(id) => {
                let draft = self
                    .students
                    .iter()
                    .find(|s| s.id == id)
                    .map(Draft::from_student);
                if let Some(draft) = draft {
                    self.editing = Some(EditDraft { id, draft });
                }
            }
            Command::SetEditField(field, value) => {
                if let Some(editing) = self.editing.as_mut() {
                    editing.draft.set(field, value);
                }
            }
            Command::EditSaved(id) => {
                if self.editing.as_ref().is_some_and(|e| e.id == id) {
                    self.editing = None;
                }
                self.notify(NotificationKind::Success, UPDATE_SUCCESS);
            }
            Command::EditFailed => self.notify(NotificationKind::Error, UPDATE_FAILURE),
            Command::CancelEdit => self.editing = None,
            Command::DeleteSucceeded(id) => {
                if self.editing.as_ref().is_some_and(|e| e.id == id) {
                    self.editing = None;
                }
                self.notify(NotificationKind::Success, DELETE_SUCCESS);
            }
            Command::DeleteFailed => self.notify(NotificationKind::Error, DELETE_FAILURE),
            Command::Rejected(message) => self.notify(NotificationKind::Error, message),
            Command::Search(term) => {
                if term != self.search_term {
                    self.search_term = term;
                    self.page = 1;
                }
            }
            Command::NextPage => {
                if self.view().has_next() {
                    self.page += 1;
                }
            }
            Command::PreviousPage => {
                if self.page > 1 {
                    self.page -= 1;
                }
            }
            Command::FetchSucceeded { ticket, students } => {
                if self.is_stale(ticket) {
                    return;
                }
                self.loading = false;
                self.students = students;
                self.clamp_page();
            }
            Command::FetchFailed { ticket } => {
                if self.is_stale(ticket) {
                    return;
                }
                self.loading = false;
                self.notify(NotificationKind::Error, FETCH_FAILURE);
            }
            Command::Dismiss(id) => self.notifications.retain(|n| n.id != id),
        }
    }

    fn is_stale(&self, ticket: FetchTicket) -> bool {
        let stale = ticket.0 < self.latest_fetch;
        if stale {
            debug!(
                "discarding fetch #{} (latest is #{})",
                ticket.0, self.latest_fetch
            );
        }
        stale
    }

    // A reload that shrinks the list keeps the user on its last page.
    fn clamp_page(&mut self) {
        let total_pages = self.view().total_pages;
        self.page = self.page.min(total_pages).max(1);
    }

    fn notify(&mut self, kind: NotificationKind, message: impl Into<String>) {
        self.notifications.push(Notification {
            id: Uuid::new_v4(),
            kind,
            message: message.into(),
            raised_at: Utc::now(),
        });
    }
}
