use crate::{
    database::{FavoriteStore, StoreError},
    models::{Favorite, FavoriteInfo},
    services::{artsy_format::DEFAULT_IMAGE, artsy_service::ArtsyApi},
    utils::AppError,
};
use mongodb::bson::{oid::ObjectId, DateTime as BsonDateTime};

fn store_error(err: StoreError) -> AppError {
    AppError::Database(err.to_string())
}

pub async fn list_favorites(
    favorites: &dyn FavoriteStore,
    user: &ObjectId,
) -> Result<Vec<FavoriteInfo>, AppError> {
    let owned = favorites.list(user).await.map_err(store_error)?;
    Ok(owned.iter().map(FavoriteInfo::from).collect())
}

/// Snapshots the artist from Artsy and stores it for `user`.
pub async fn add_favorite(
    favorites: &dyn FavoriteStore,
    artsy: &dyn ArtsyApi,
    user: &ObjectId,
    artist_id: &str,
) -> Result<FavoriteInfo, AppError> {
    if favorites
        .find(user, artist_id)
        .await
        .map_err(store_error)?
        .is_some()
    {
        return Err(AppError::DuplicateFavorite);
    }

    let artist = artsy.get_artist_details(artist_id).await?;

    let image_url = if artist.image_url.is_empty() {
        DEFAULT_IMAGE.to_string()
    } else {
        artist.image_url
    };

    let favorite = Favorite {
        id: ObjectId::new(),
        user: *user,
        artist_id: artist_id.to_string(),
        artist_name: artist.name,
        image_url,
        nationality: artist.nationality,
        birthday: artist.birthday,
        deathday: artist.deathday,
        added_at: BsonDateTime::now(),
    };

    favorites.insert(&favorite).await.map_err(|e| match e {
        StoreError::DuplicateKey => AppError::DuplicateFavorite,
        other => store_error(other),
    })?;

    log::info!("⭐ User {} added favorite {}", user, artist_id);
    Ok(FavoriteInfo::from(&favorite))
}

pub async fn remove_favorite(
    favorites: &dyn FavoriteStore,
    user: &ObjectId,
    artist_id: &str,
) -> Result<(), AppError> {
    match favorites.delete(user, artist_id).await.map_err(store_error)? {
        Some(_) => {
            log::info!("🗑️ User {} removed favorite {}", user, artist_id);
            Ok(())
        }
        None => Err(AppError::NotFound("Favorite not found".into())),
    }
}

pub async fn is_favorite(
    favorites: &dyn FavoriteStore,
    user: &ObjectId,
    artist_id: &str,
) -> Result<bool, AppError> {
    Ok(favorites
        .find(user, artist_id)
        .await
        .map_err(store_error)?
        .is_some())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::database::memory::MemoryFavorites;
    use crate::services::artsy_service::testing::FakeArtsy;
    use std::sync::atomic::Ordering;

    #[tokio::test]
    async fn add_snapshots_artist_details() {
        let store = MemoryFavorites::default();
        let user = ObjectId::new();

        let favorite = add_favorite(&store, &FakeArtsy::default(), &user, "pablo-picasso")
            .await
            .unwrap();

        assert_eq!(favorite.artist_id, "pablo-picasso");
        assert_eq!(favorite.artist_name, "Artist pablo-picasso");
        assert_eq!(favorite.nationality, "Spanish");
        assert_eq!(favorite.birthday, "1881");
        assert_eq!(favorite.deathday, "1973");
        assert_eq!(favorite.image_url, DEFAULT_IMAGE);
        assert_eq!(favorite.user, user.to_hex());
    }

    #[tokio::test]
    async fn duplicate_is_rejected_before_calling_artsy() {
        let store = MemoryFavorites::default();
        let artsy = FakeArtsy::default();
        let user = ObjectId::new();

        add_favorite(&store, &artsy, &user, "braque").await.unwrap();
        let err = add_favorite(&store, &artsy, &user, "braque").await.unwrap_err();

        assert!(matches!(err, AppError::DuplicateFavorite));
        assert_eq!(artsy.detail_calls.load(Ordering::SeqCst), 1);
        assert_eq!(list_favorites(&store, &user).await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn same_artist_for_different_users_is_allowed() {
        let store = MemoryFavorites::default();
        let artsy = FakeArtsy::default();

        add_favorite(&store, &artsy, &ObjectId::new(), "braque").await.unwrap();
        add_favorite(&store, &artsy, &ObjectId::new(), "braque").await.unwrap();
    }

    #[tokio::test]
    async fn upstream_failure_stores_nothing() {
        let store = MemoryFavorites::default();
        let user = ObjectId::new();

        let err = add_favorite(&store, &FakeArtsy::failing(), &user, "braque")
            .await
            .unwrap_err();

        assert!(matches!(err, AppError::UpstreamRequest { .. }));
        assert!(!is_favorite(&store, &user, "braque").await.unwrap());
    }

    #[tokio::test]
    async fn list_is_newest_first() {
        let store = MemoryFavorites::default();
        let artsy = FakeArtsy::default();
        let user = ObjectId::new();

        add_favorite(&store, &artsy, &user, "first").await.unwrap();
        tokio::time::sleep(std::time::Duration::from_millis(5)).await;
        add_favorite(&store, &artsy, &user, "second").await.unwrap();

        let ids: Vec<_> = list_favorites(&store, &user)
            .await
            .unwrap()
            .into_iter()
            .map(|f| f.artist_id)
            .collect();
        assert_eq!(ids, vec!["second", "first"]);
    }

    #[tokio::test]
    async fn remove_then_check() {
        let store = MemoryFavorites::default();
        let user = ObjectId::new();

        add_favorite(&store, &FakeArtsy::default(), &user, "braque").await.unwrap();
        assert!(is_favorite(&store, &user, "braque").await.unwrap());

        remove_favorite(&store, &user, "braque").await.unwrap();
        assert!(!is_favorite(&store, &user, "braque").await.unwrap());

        let err = remove_favorite(&store, &user, "braque").await.unwrap_err();
        assert!(matches!(err, AppError::NotFound(ref m) if m == "Favorite not found"));
    }

    #[tokio::test]
    async fn remove_only_touches_own_favorites() {
        let store = MemoryFavorites::default();
        let artsy = FakeArtsy::default();
        let owner = ObjectId::new();
        let other = ObjectId::new();

        add_favorite(&store, &artsy, &owner, "braque").await.unwrap();

        assert!(remove_favorite(&store, &other, "braque").await.is_err());
        assert!(is_favorite(&store, &owner, "braque").await.unwrap());
    }
}
