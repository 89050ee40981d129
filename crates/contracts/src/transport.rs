//! DocumentTransport trait - Dispatcher output interface
//!
//! Abstracts the single JSON POST issued per metric.

use crate::ContractError;

/// Document delivery trait
///
/// All transports must implement this trait.
#[trait_variant::make(DocumentTransport: Send)]
pub trait LocalDocumentTransport {
    /// Transport name (used for logging)
    fn name(&self) -> &str;

    /// POST a JSON body to `url` and return the response status code
    ///
    /// Implementations must fully drain the response body before returning.
    ///
    /// # Errors
    /// Returns `ContractError::Transport` when the destination is unreachable.
    async fn post_json(&self, url: &str, body: Vec<u8>) -> Result<u16, ContractError>;
}
