//! Request handler module
//!
//! Request dispatch and the lexicon actions.

pub mod definitions;
mod error;
pub mod router;

pub use error::ActionError;
pub use router::handle_request;
