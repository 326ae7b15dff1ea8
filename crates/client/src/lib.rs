//! CaPhe Client - API client library for the café admin dashboard.
//!
//! This crate is the glue between the admin UI (or CLI) and the remote café
//! backend: it owns the authenticated session, the HTTP plumbing, and the
//! tolerant mapping from loosely-shaped backend payloads into the canonical
//! domain types from [`caphe_core`].
//!
//! # Layers
//!
//! - [`config`] - environment-driven configuration (base URL, endpoint
//!   paths, storage directory)
//! - [`storage`] - file-backed namespaced key-value store with TTL records
//! - [`auth`] - token normalization and the 24-hour staff session
//! - [`http`] - [`ApiClient`], a `reqwest` wrapper that attaches the bearer
//!   token, normalizes errors, and evicts the session on 401
//! - [`api`] - typed operations per backend resource
//! - [`conversions`] - alias-tolerant payload mapping
//! - [`collection`] - client-side search/filter/pagination
//! - [`resource`] - fetch/mutation state with last-request-wins resolution
//! - [`validation`] - form validation run before any request is issued
//! - [`stats`] - aggregate statistics over loaded collections
//! - [`demo`] - seeded offline data store for unwired environments

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod api;
pub mod auth;
pub mod collection;
pub mod config;
pub mod conversions;
pub mod demo;
pub mod error;
pub mod http;
pub mod resource;
pub mod stats;
pub mod storage;
pub mod types;
pub mod validation;

pub use auth::session::{AuthSession, SessionPhase, SessionStore, StaffUser};
pub use auth::token::{extract_token, normalize_token};
pub use config::{ClientConfig, ConfigError, Endpoints};
pub use error::ApiError;
pub use http::ApiClient;
pub use storage::StorageService;
pub use types::{Category, Customer, Order, Plan, Product};
