pub mod codec;
pub mod pages;
pub mod pattern;
pub mod store;

pub use pages::Pages;
pub use pattern::{GeneratedPattern, PatternService, PatternServiceError};
pub use store::PatternStore;
