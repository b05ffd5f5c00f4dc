pub mod action;
pub mod app;
pub mod input;
pub mod keymap;
pub mod render;
pub mod theme;
pub mod undo;

pub use app::run;
