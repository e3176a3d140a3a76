//! Remote assistant transports.

pub mod http;

pub use self::http::HttpAssistantTransport;
