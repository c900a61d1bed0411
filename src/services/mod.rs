pub mod console;

pub use console::ConsoleService;
