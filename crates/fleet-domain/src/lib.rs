//! Fleet efficiency domain
//!
//! Vehicle records, the row parser that builds them, the aggregate
//! calculators, and the traits implemented by outbound collaborators.

pub mod gateway;
pub mod model;
pub mod service;
