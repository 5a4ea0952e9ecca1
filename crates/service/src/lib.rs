//! Service layer for the vaccination registry.
//! - `registry`: in-memory people/vaccine tables and the locked handle around them.
//! - `storage`: snapshot persistence (JSON file, in-memory).
//! - `notify` / `greeting`: console notifier and the greet/farewell messages.

pub mod errors;
pub mod registry;
pub mod storage;
pub mod notify;
pub mod greeting;
