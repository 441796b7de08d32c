//! Client core for the wedding invite guest store.
//!
//! # Overview
//! Reads, partially updates, and deletes guest records held in an external
//! spreadsheet-style record store (Airtable REST API v0).
//!
//! # Design
//! - `RecordClient` is stateless: it builds `HttpRequest` values and parses
//!   `HttpResponse` values without touching the network (host-does-IO).
//! - `Transport` is the only I/O seam; `UreqTransport` is the blocking
//!   default with a fixed 3-second timeout.
//! - `GuestRepository` drives client and transport with a bounded
//!   `RetryPolicy` and always propagates typed errors.
//! - `StoreConfig` is passed in explicitly and validated at construction.

pub mod client;
pub mod config;
pub mod error;
pub mod http;
pub mod repository;
pub mod retry;
pub mod transport;
pub mod types;

pub use client::RecordClient;
pub use config::StoreConfig;
pub use error::{ApiError, ConfigError};
pub use http::{HttpMethod, HttpRequest, HttpResponse};
pub use repository::GuestRepository;
pub use retry::RetryPolicy;
pub use transport::{Transport, TransportError, UreqTransport};
pub use types::{Attendance, Count, Flag, GuestFields, GuestRecord, InviteCategory};
