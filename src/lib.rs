/// Page-view tracking and traffic aggregation
pub mod analytics;
/// Basic application code
pub mod app;
/// Application authorization and admin sessions
pub mod auth;
/// REST clients for outside services
pub mod client;
/// Controllers for REST endpoints
pub mod controller;
/// Cryptography-related objects
pub mod crypto;
/// Domain objects
pub mod domain;
/// Error enums
pub mod error;
/// CSV export of the waitlist
pub mod export;
/// Waitlist records and role-specific payloads
pub mod model;
/// Aggregate reporting over a waitlist snapshot
pub mod report;
/// Repositories
pub mod repo;
/// Application settings
pub mod settings;
/// Application telemetry for tracing and logging
pub mod telemetry;
