// Infrastructure layer - external dependencies and adapters
pub mod config;
pub mod http_reading_source;
pub mod system_clock;
