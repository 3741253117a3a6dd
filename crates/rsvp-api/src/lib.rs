// Wedding RSVP API library
// Decision: Shared library for binaries (API server, OpenAPI export) and router tests

// HTTP routes and DTOs
pub mod api;

// Environment configuration
pub mod config;

// Services layer
pub mod services;
pub use services::RsvpService;

// OpenAPI spec generation
pub mod openapi;
