//! Registry index collaborator.
//!
//! The index is the authoritative, order-stable enumeration of hotel
//! records. The engine only ever sees record handles; where the entries
//! actually live is this module's concern.

mod memory;

pub use memory::MemoryIndex;

use async_trait::async_trait;
use std::sync::Arc;
use waypost_engine::{HotelRecord, SourceError};

/// Order-stable registry of hotel records.
#[async_trait]
pub trait HotelIndex: Send + Sync {
    /// Enumerate every record, in the index's fixed order.
    async fn all_hotels(&self) -> Result<Vec<Arc<dyn HotelRecord>>, SourceError>;

    /// Look up one record by address.
    async fn hotel(&self, address: &str) -> Result<Option<Arc<dyn HotelRecord>>, SourceError>;
}
