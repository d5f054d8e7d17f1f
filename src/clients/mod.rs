pub mod consumet;
pub mod provider;

pub use consumet::ConsumetClient;
pub use provider::{ProviderError, StreamProvider, bounded};
