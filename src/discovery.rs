//! Which artworks currently have tasks.
//!
//! There is no explicit index: the answer comes from scanning store keys and
//! keeping the canonical artwork IDs. The reserved set keys and any keys a
//! host platform drops into the store are filtered out on the way.

use tracing::{debug, warn};

use crate::ids::ArtworkId;
use crate::store::{is_reserved, SharedStore};

#[derive(Clone)]
pub struct ArtworkDiscovery {
    store: SharedStore,
}

impl ArtworkDiscovery {
    pub fn new(store: SharedStore) -> Self {
        Self { store }
    }

    /// Artwork IDs with at least one task, ascending; `None` if there are none.
    pub async fn artwork_ids_with_tasks(&self) -> Option<Vec<ArtworkId>> {
        let keys = match self.store.keys().await {
            Ok(keys) => keys,
            Err(err) => {
                warn!(error = %err, "failed to list store keys");
                return None;
            }
        };

        let mut ids: Vec<ArtworkId> = keys
            .iter()
            .filter(|key| !is_reserved(key))
            .filter_map(|key| {
                let id = ArtworkId::from_key(key);
                if id.is_none() {
                    debug!(key = %key, "ignoring non-artwork key");
                }
                id
            })
            .collect();

        if ids.is_empty() {
            return None;
        }
        ids.sort_unstable();
        ids.dedup();
        Some(ids)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::MemoryStore;
    use std::sync::Arc;

    #[tokio::test]
    async fn empty_store_yields_none() {
        let discovery = ArtworkDiscovery::new(Arc::new(MemoryStore::new()));
        assert_eq!(discovery.artwork_ids_with_tasks().await, None);
    }

    #[tokio::test]
    async fn platform_and_reserved_keys_are_ignored() {
        let store = MemoryStore::with_entries([
            ("favourites", "200"),
            ("completed", "evt-1"),
            ("__react_native_storage_test", "x"),
            ("EXPO_CONSTANTS_INSTALLATION_ID", "y"),
            ("007", "[]"),
            ("200", "[]"),
            ("0", "[]"),
            ("31", "[]"),
        ]);
        let discovery = ArtworkDiscovery::new(Arc::new(store));

        assert_eq!(
            discovery.artwork_ids_with_tasks().await,
            Some(vec![ArtworkId(0), ArtworkId(31), ArtworkId(200)])
        );
    }
}
