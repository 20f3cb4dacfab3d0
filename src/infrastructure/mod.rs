// Infrastructure layer - External dependencies and adapters
pub mod config;
pub mod error;
pub mod serial_sink;
pub mod simrail_client;
