pub mod health;
pub mod project;
pub mod metrics;
pub mod error;

pub use health::HealthResponse;
pub use project::ProjectInfo;
pub use metrics::Metrics;
pub use error::{ScaffoldError, ServerError, ValidationIssue};
