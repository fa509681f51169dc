mod support;

use std::sync::Arc;

use artmark::favorites::{FavoritesIndex, ADDED_MESSAGE, REMOVED_MESSAGE};
use artmark::ids::ArtworkId;
use artmark::store::{KeyValueStore, FAVOURITES_KEY};

use support::{memory_store, recorder, FailingStore};

#[tokio::test]
async fn toggle_twice_restores_membership() {
    let store = memory_store();
    store.set(FAVOURITES_KEY, "16568").await.unwrap();
    let notifier = recorder();
    let favourites = FavoritesIndex::new(store.clone(), notifier.clone());

    for artwork in [ArtworkId(16568), ArtworkId(27992)] {
        let before = favourites.is_favorite(&artwork).await;
        assert_eq!(favourites.toggle_favorite(&artwork).await, !before);
        assert_eq!(favourites.toggle_favorite(&artwork).await, before);
        assert_eq!(favourites.is_favorite(&artwork).await, before);
    }

    assert_eq!(
        notifier.messages(),
        vec![REMOVED_MESSAGE, ADDED_MESSAGE, ADDED_MESSAGE, REMOVED_MESSAGE]
    );
    assert_eq!(store.get(FAVOURITES_KEY).await.unwrap().as_deref(), Some("16568"));
}

#[tokio::test]
async fn listing_is_sorted_and_skips_junk() {
    let store = memory_store();
    store
        .set(FAVOURITES_KEY, "300,,20,abc,1000,007")
        .await
        .unwrap();
    let favourites = FavoritesIndex::new(store, recorder());

    assert_eq!(
        favourites.favorites().await,
        vec![ArtworkId(20), ArtworkId(300), ArtworkId(1000)]
    );
}

#[tokio::test]
async fn failed_write_reports_unchanged_membership() {
    let notifier = recorder();
    let store = Arc::new(FailingStore::read_only([(FAVOURITES_KEY, "5")]));
    let favourites = FavoritesIndex::new(store, notifier.clone());

    assert!(!favourites.toggle_favorite(&ArtworkId(6)).await);
    assert!(favourites.toggle_favorite(&ArtworkId(5)).await);
    assert!(favourites.is_favorite(&ArtworkId(5)).await);
    assert!(notifier.messages().is_empty());
}

#[tokio::test]
async fn unreadable_store_has_no_favourites() {
    let favourites = FavoritesIndex::new(Arc::new(FailingStore::broken()), recorder());

    assert!(!favourites.is_favorite(&ArtworkId(1)).await);
    assert!(favourites.favorites().await.is_empty());
}
