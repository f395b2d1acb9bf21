//! Routing module
//!
//! Maps request paths to lexicon resources.

mod matcher;

pub use matcher::{match_route, RouteMatch};
