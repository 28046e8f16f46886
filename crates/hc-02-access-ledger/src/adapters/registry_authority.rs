//! Document Registry Authority Adapter
//!
//! Implements `DocumentAuthority` on top of the HC-01 document registry.

use hc_01_document_registry::{DocumentRegistry, DocumentRegistryApi, RegistryError};
use shared_types::{Address, DocumentId};

use crate::ports::DocumentAuthority;

impl DocumentAuthority for DocumentRegistry {
    fn check_shareable(
        &self,
        document_id: DocumentId,
        acting: &Address,
    ) -> Result<(), RegistryError> {
        self.ensure_shareable(document_id, acting).map(|_| ())
    }

    fn clear_selection(&mut self) {
        DocumentRegistryApi::clear_selection(self);
    }
}
