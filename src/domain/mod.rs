// Domain layer - Dashlet layout model
pub mod dashlet;
pub mod edit_form;
pub mod grid;
pub mod navigation;
pub mod render;
