pub mod draft;
pub mod student;

pub use draft::{Draft, DraftField, EditDraft};
pub use student::{Student, StudentId, StudentPayload};
