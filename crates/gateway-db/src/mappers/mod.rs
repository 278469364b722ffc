//! Model to entity mappers
//!
//! This module provides conversions from database models to domain entities
//! (gateway-core). Jsonb columns are decoded leniently: malformed stored
//! values degrade to defaults instead of failing the whole row.

mod application;
mod audit_log;
mod session;
mod user;
