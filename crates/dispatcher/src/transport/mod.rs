//! Transport implementations
//!
//! Contains HttpTransport and LogTransport.

mod http;
mod log;

#[cfg(test)]
pub(crate) mod mock;

pub use self::http::HttpTransport;
pub use self::log::LogTransport;
