// mistly-api: Async client facade for the Mist cloud management REST API.
//
// Four verbs (read/create/update/delete) over one base URL, authenticated
// with an `Authorization: Token ...` header. Mutating verbs only exist on
// `MistClient<ReadWrite>`.

pub mod access;
pub mod client;
pub mod endpoint;
pub mod error;
pub mod probe;
pub mod transport;

pub use access::{Access, ReadOnly, ReadWrite};
pub use client::MistClient;
pub use endpoint::Endpoint;
pub use error::Error;
pub use transport::TransportConfig;

/// Public Mist cloud (global region).
pub const DEFAULT_BASE_URL: &str = "https://api.mist.com";
