use std::sync::Mutex;
use std::sync::atomic::{AtomicBool, AtomicU64, AtomicUsize, Ordering};

use async_trait::async_trait;

use crate::error::GatewayError;
use crate::gateway::StudentGateway;
use crate::models::{Student, StudentId, StudentPayload};

/// Process-local backend. Assigns sequential numeric ids and can be
/// switched offline to simulate an unreachable server.
pub struct InMemoryStudentGateway {
    students: Mutex<Vec<Student>>,
    next_id: AtomicU64,
    available: AtomicBool,
    requests: AtomicUsize,
}

impl InMemoryStudentGateway {
    pub fn new() -> Self {
        Self::with_students(Vec::new())
    }

    pub fn with_students(students: Vec<Student>) -> Self {
        let highest = students
            .iter()
            .filter_map(|s| match s.id {
                StudentId::Number(n) => Some(n),
                StudentId::Text(_) => None,
            })
            .max()
            .unwrap_or(0);

        Self {
            students: Mutex::new(students),
            next_id: AtomicU64::new(highest + 1),
            available: AtomicBool::new(true),
            requests: AtomicUsize::new(0),
        }
    }

    pub fn set_available(&self, available: bool) {
        self.available.store(available, Ordering::SeqCst);
    }

    /// Number of calls received, including failed ones.
    pub fn request_count(&self) -> usize {
        self.requests.load(Ordering::SeqCst)
    }

    fn begin_request(&self) -> Result<std::sync::MutexGuard<'_, Vec<Student>>, GatewayError> {
        self.requests.fetch_add(1, Ordering::SeqCst);
        if !self.available.load(Ordering::SeqCst) {
            return Err(GatewayError::Unavailable);
        }
        self.students.lock().map_err(|_| GatewayError::Unavailable)
    }
}

impl Default for InMemoryStudentGateway {
    fn default() -> Self {
        Self::new()
    }
}

fn not_found(id: &StudentId) -> GatewayError {
    GatewayError::Status {
        status: 404,
        body: format!("student {} not found", id),
    }
}

#[async_trait]
impl StudentGateway for InMemoryStudentGateway {
    async fn list_all(&self) -> Result<Vec<Student>, GatewayError> {
        let students = self.begin_request()?;
        Ok(students.clone())
    }

    async fn create(&self, payload: &StudentPayload) -> Result<Student, GatewayError> {
        let mut students = self.begin_request()?;
        let id = self.next_id.fetch_add(1, Ordering::SeqCst);
        let student = payload.clone().into_student(StudentId::Number(id));
        students.push(student.clone());
        Ok(student)
    }

    async fn update(&self, id: &StudentId, payload: &StudentPayload) -> Result<Student, GatewayError> {
        let mut students = self.begin_request()?;
        let slot = students
            .iter_mut()
            .find(|s| &s.id == id)
            .ok_or_else(|| not_found(id))?;
        *slot = payload.clone().into_student(id.clone());
        Ok(slot.clone())
    }

    async fn delete(&self, id: &StudentId) -> Result<(), GatewayError> {
        let mut students = self.begin_request()?;
        let before = students.len();
        students.retain(|s| &s.id != id);
        if students.len() == before {
            return Err(not_found(id));
        }
        Ok(())
    }
}
