//! Transport to the field service

mod client;
mod traits;

pub use client::{HttpTransport, DEFAULT_BASE_URL};
pub use traits::{FieldTransport, TransportError};

#[cfg(test)]
pub use traits::MockFieldTransport;
