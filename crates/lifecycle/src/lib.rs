//! `lifecycle` crate — core domain models, routing lookup, and the report
//! lifecycle orchestrator.

pub mod error;
pub mod models;
pub mod routing;
pub mod service;

pub use error::LifecycleError;
pub use models::{NewReport, ReportStatus, UserRole};
pub use routing::department_for;
pub use service::ReportLifecycle;
