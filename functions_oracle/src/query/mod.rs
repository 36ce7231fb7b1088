//! SxT SQL request handler
//!
//! Mirrors the Functions source job: one POST to the gateway, one column
//! read from the first row, one uint256 out.

pub mod executor;
pub mod response;
pub mod value;

pub use executor::{decode_response, QueryExecutor};
pub use response::QueryResponse;
pub use value::{parse_decimal, parse_integer};
