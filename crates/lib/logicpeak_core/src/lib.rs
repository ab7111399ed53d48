//! # logicpeak_core
//!
//! Core domain logic for Logic Peak: record schemas, validation and the
//! document persistence façade.

pub mod document;
pub mod migrate;
pub mod models;
pub mod schema;
pub mod store;
