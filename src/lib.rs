//! AV Design Core - design constraint validation engine
//!
//! Two independent halves share one output shape (classified issues):
//! [`rules`] evaluates declarative business rules against a design
//! context, and [`spatial`] checks equipment placements against a room.

pub mod core;
pub mod rules;
pub mod spatial;
