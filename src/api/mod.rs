pub mod generate;
pub mod pages;
pub mod storage;

pub use generate::handle_generate;
pub use pages::{handle_show, handle_welcome};
pub use storage::handle_storage;
