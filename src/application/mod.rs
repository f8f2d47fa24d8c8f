// Application layer - use cases and collaborator seams
pub mod clock;
pub mod display_surface;
pub mod reading_source;
pub mod window_controller;
