pub mod catalog;
pub mod error;
pub mod intent;
pub mod models;
mod responses;
pub mod router;

pub use catalog::{CatalogError, ResponseCatalog, ResponseHandler, REQUIRED_ENTRIES};
pub use error::SkillError;
pub use intent::{normalize_intent, NormalizedIntent, ReservedIntent};
pub use models::*;
pub use router::IntentRouter;
