//! dns-blocker application layer: ports and the query resolution use case.
pub mod ports;
pub mod services;
pub mod use_cases;
