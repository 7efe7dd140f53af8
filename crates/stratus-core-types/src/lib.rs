//! Core types shared across Stratus facilities
//!
//! This crate provides the canonical schema constants used by both the
//! error and logging facilities, so that log events and error reports use
//! the same field keys everywhere.

pub mod schema;
