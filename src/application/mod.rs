// Application layer - Use cases and the seams they depend on
pub mod catalog_service;
pub mod poll_loop;
pub mod sinks;
pub mod telemetry_source;
