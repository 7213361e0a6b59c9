pub mod editor;
pub mod input;
pub mod render;
pub mod theme;
pub mod toolbar;
