//! `services` crate — pluggable side-effect services behind traits.
//!
//! The report lifecycle needs two external capabilities: image validation
//! (a stand-in for a real CV model) and notification delivery (a stand-in
//! for FCM/SMS).  Both are expressed as traits so the `lifecycle` crate can
//! be tested with mocks and re-wired to real providers later.

pub mod error;
pub mod mock;
pub mod notifier;
pub mod traits;
pub mod validator;

pub use error::ServiceError;
pub use notifier::LogNotifier;
pub use traits::{ImageAnalysis, ImageValidator, Notifier};
pub use validator::StubImageValidator;
