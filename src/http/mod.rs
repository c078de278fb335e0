//! HTTP boundary module
//!
//! Converts between `hyper` types and the typed request/payload the router
//! and handlers work with.

pub mod payload;
pub mod request;
pub mod response;

// Re-export commonly used types
pub use payload::Payload;
pub use request::RouteRequest;
pub use response::{
    build_400_response, build_404_response, build_500_response, build_json_response,
    build_redirect_response_with_code,
};
