pub mod config;
pub mod error;
pub mod handlers;
pub mod service;
pub mod store;

pub use config::GradeConfig;
pub use handlers::{router, AppState};
pub use service::GradeService;
pub use store::RecordStore;
