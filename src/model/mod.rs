pub mod config;
pub mod context;
pub mod document;
pub mod task;

pub use config::*;
pub use context::*;
pub use document::*;
pub use task::*;
