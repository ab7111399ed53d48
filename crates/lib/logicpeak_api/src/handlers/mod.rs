//! Request handlers.

pub mod chat;
pub mod diagnostics;
pub mod leads;
pub mod root;
