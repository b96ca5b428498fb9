pub mod common;
pub mod facets;
pub mod filters;
pub mod metrics;
pub mod monthly;
pub mod session;
pub mod table;
