//! Favourite artworks, kept as one comma-joined set under `"favourites"`.

use std::collections::BTreeSet;
use std::sync::Arc;

use tracing::{debug, warn};

use crate::codec;
use crate::ids::ArtworkId;
use crate::notify::Notifier;
use crate::store::{SharedStore, FAVOURITES_KEY};

pub const ADDED_MESSAGE: &str = "added to favourites";
pub const REMOVED_MESSAGE: &str = "removed from favourites";

#[derive(Clone)]
pub struct FavoritesIndex {
    store: SharedStore,
    notifier: Arc<dyn Notifier>,
}

impl FavoritesIndex {
    pub fn new(store: SharedStore, notifier: Arc<dyn Notifier>) -> Self {
        Self { store, notifier }
    }

    /// Current favourite set; a failed read is logged and treated as empty.
    async fn load(&self) -> BTreeSet<String> {
        match self.store.get(FAVOURITES_KEY).await {
            Ok(raw) => codec::decode(raw.as_deref()),
            Err(err) => {
                warn!(error = %err, "failed to read favourites");
                BTreeSet::new()
            }
        }
    }

    pub async fn is_favorite(&self, artwork: &ArtworkId) -> bool {
        self.load().await.contains(&artwork.key())
    }

    /// Flip membership and return the new state.
    ///
    /// When the write fails the membership is unchanged, and that unchanged
    /// state is what gets returned.
    pub async fn toggle_favorite(&self, artwork: &ArtworkId) -> bool {
        let mut favourites = self.load().await;
        let key = artwork.key();

        let now_favourite = if favourites.remove(&key) {
            false
        } else {
            favourites.insert(key);
            true
        };

        if let Err(err) = self
            .store
            .set(FAVOURITES_KEY, &codec::encode(&favourites))
            .await
        {
            warn!(error = %err, artwork = %artwork, "failed to save favourites");
            return !now_favourite;
        }

        self.notifier.notify(if now_favourite {
            ADDED_MESSAGE
        } else {
            REMOVED_MESSAGE
        });
        now_favourite
    }

    /// Favourite artwork IDs in ascending order.
    pub async fn favorites(&self) -> Vec<ArtworkId> {
        self.load()
            .await
            .iter()
            .filter_map(|raw| {
                let id = ArtworkId::from_key(raw);
                if id.is_none() {
                    debug!(entry = %raw, "skipping non-artwork favourite entry");
                }
                id
            })
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect()
    }
}
