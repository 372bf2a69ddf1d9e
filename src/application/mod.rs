// Application layer - Layout use cases
pub mod dashboard_backend;
pub mod layout_controller;
pub mod overview_service;
