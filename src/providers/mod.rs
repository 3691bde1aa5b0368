pub mod adapter;
pub mod http;

pub use adapter::{RequestDescriptor, build_request};
pub use http::HttpRateProvider;
