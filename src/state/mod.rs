pub mod console;

use std::sync::Arc;

use tokio::sync::Mutex;

use crate::config::AppConfig;
use crate::gateway::StudentGateway;
use crate::services::ConsoleService;

pub use console::{Command, ConsoleSnapshot, ConsoleState, FetchTicket, Notification, NotificationKind};

#[derive(Clone)]
pub struct AppState {
    pub console: ConsoleService,
}

impl AppState {
    pub fn new(config: &AppConfig, gateway: Arc<dyn StudentGateway>) -> Self {
        let console = Arc::new(Mutex::new(ConsoleState::new(config.page_size)));
        Self {
            console: ConsoleService::new(console, gateway, config.notification_ttl),
        }
    }
}
