//! Request handlers, one module per resource.

pub mod export;
pub mod health;
pub mod logs;
pub mod upload;

pub use export::export_log;
pub use health::{health_handler, root_handler};
pub use logs::{delete_log, get_log, list_logs, search_logs, update_log};
pub use upload::upload_log;
