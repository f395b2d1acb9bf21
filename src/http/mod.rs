//! HTTP protocol layer module
//!
//! Content negotiation, caching headers and response builders, decoupled from
//! the lexicon action logic.

pub mod cache;
pub mod negotiate;
pub mod response;

pub use negotiate::{negotiate, Format, NotAcceptable};
pub use response::{
    build_404_response, build_405_response, build_406_response, build_500_response,
    build_health_response, build_options_response, build_representation_response,
};
