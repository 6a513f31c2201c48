//! Backend API access: wire types and the authorizing HTTP client.

pub mod api;
pub mod types;
