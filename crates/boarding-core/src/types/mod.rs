//! Shared domain types.

pub mod id;
