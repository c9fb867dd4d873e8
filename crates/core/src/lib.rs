//! Karvan domain logic: registration validation & normalization, the
//! status state machine, and catalog topic handling. No I/O lives here.

pub mod catalog;
pub mod error;
pub mod registration;
pub mod types;
