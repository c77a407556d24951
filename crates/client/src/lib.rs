//! Translation provider client for PowerPoint slide translation.

pub mod provider;
pub mod transport;

pub use provider::{GoogleTranslator, ProviderConfig};
pub use transport::{HttpTransport, ReqwestTransport, TransportResponse};
