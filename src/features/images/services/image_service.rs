use chrono::Utc;
use std::sync::Arc;
use tokio::task::JoinHandle;
use tracing::{debug, info, warn};
use uuid::Uuid;

use crate::core::error::{AppError, Result};
use crate::features::images::dtos::{ImageUpload, UploadedImageDto};
use crate::modules::storage::ImageStore;
use crate::shared::constants::IMAGE_TOKEN_LENGTH;

/// Stores menu images under one bucket prefix and cleans them up again
pub struct ImageService {
    store: Arc<dyn ImageStore>,
    prefix: String,
    max_size: usize,
}

impl ImageService {
    pub fn new(store: Arc<dyn ImageStore>, prefix: impl Into<String>, max_size: usize) -> Self {
        Self {
            store,
            prefix: prefix.into(),
            max_size,
        }
    }

    /// `{bucket}/{prefix}`, present in every URL this service hands out
    pub fn path_marker(&self) -> String {
        format!("{}/{}", self.store.bucket(), self.prefix)
    }

    /// Upload a picked file and return its key and public URL
    ///
    /// The stored name is `{token}_{epoch_ms}.{ext}` so repeated uploads of
    /// the same file never collide.
    pub async fn upload(&self, upload: ImageUpload) -> Result<UploadedImageDto> {
        if !upload.content_type.starts_with("image/") {
            return Err(AppError::BadRequest(format!(
                "File type '{}' is not allowed. Only images can be uploaded",
                upload.content_type
            )));
        }

        if upload.data.len() > self.max_size {
            return Err(AppError::BadRequest(format!(
                "File too large. Maximum size is {} bytes ({} MB)",
                self.max_size,
                self.max_size / 1024 / 1024
            )));
        }

        let key = format!("{}/{}", self.prefix, Self::generate_file_name(&upload.file_name));

        info!("Uploading image '{}' as '{}': 0%", upload.file_name, key);

        self.store
            .upload(&key, upload.data, &upload.content_type)
            .await
            .map_err(|e| {
                tracing::error!("Error uploading image '{}': {}", upload.file_name, e);
                e
            })?;

        info!("Uploading image '{}' as '{}': 100%", upload.file_name, key);

        let url = self.store.public_url(&key);
        Ok(UploadedImageDto { key, url })
    }

    /// Storage key of an image path this service produced, if any
    ///
    /// The key is the last two `/`-separated segments, i.e. `{prefix}/{file}`.
    pub fn storage_key_from_path(&self, image_path: &str) -> Option<String> {
        if !image_path.contains(&self.path_marker()) {
            return None;
        }

        let segments: Vec<&str> = image_path.split('/').collect();
        if segments.len() < 2 {
            return None;
        }

        Some(segments[segments.len() - 2..].join("/"))
    }

    /// Remove a stored image in the background
    ///
    /// The outcome is only logged. Callers normally drop the handle.
    pub fn schedule_removal(&self, key: String) -> JoinHandle<()> {
        let store = self.store.clone();

        tokio::spawn(async move {
            match store.remove(std::slice::from_ref(&key)).await {
                Ok(()) => debug!("Removed stored image '{}'", key),
                Err(e) => warn!("Failed to remove stored image '{}': {}", key, e),
            }
        })
    }

    fn generate_file_name(original: &str) -> String {
        // A name without a dot yields the whole name as its extension
        let extension = original.rsplit('.').next().unwrap_or(original);

        format!(
            "{}_{}.{}",
            Self::random_token(),
            Utc::now().timestamp_millis(),
            extension
        )
    }

    /// Random base-36 string of at most `IMAGE_TOKEN_LENGTH` characters
    fn random_token() -> String {
        let mut n = Uuid::new_v4().as_u128();
        let mut token = String::with_capacity(IMAGE_TOKEN_LENGTH);

        while n > 0 && token.len() < IMAGE_TOKEN_LENGTH {
            if let Some(c) = std::char::from_digit((n % 36) as u32, 36) {
                token.push(c);
            }
            n /= 36;
        }

        token
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shared::test_helpers::FakeImageStore;

    fn service() -> (ImageService, Arc<FakeImageStore>) {
        let store = Arc::new(FakeImageStore::new("items"));
        (
            ImageService::new(store.clone(), "menu-images", 1024),
            store,
        )
    }

    fn upload(name: &str, content_type: &str) -> ImageUpload {
        ImageUpload {
            file_name: name.to_string(),
            content_type: content_type.to_string(),
            data: vec![0xFF, 0xD8, 0xFF],
        }
    }

    #[tokio::test]
    async fn test_upload_keeps_extension_case() {
        let (service, store) = service();

        let uploaded = service.upload(upload("photo.PNG", "image/png")).await.unwrap();
        assert!(uploaded.key.starts_with("menu-images/"));
        assert!(uploaded.key.ends_with(".PNG"));
        assert_eq!(uploaded.url, store.public_url(&uploaded.key));
        assert_eq!(store.uploaded_keys(), vec![uploaded.key]);
    }

    #[tokio::test]
    async fn test_same_name_gives_distinct_keys() {
        let (service, _) = service();

        let a = service.upload(upload("photo.PNG", "image/png")).await.unwrap();
        let b = service.upload(upload("photo.PNG", "image/png")).await.unwrap();
        assert_ne!(a.key, b.key);
    }

    #[test]
    fn test_file_name_shape() {
        let name = ImageService::generate_file_name("latte.final.jpg");
        let (stem, extension) = name.rsplit_once('.').unwrap();
        assert_eq!(extension, "jpg");

        let (token, millis) = stem.split_once('_').unwrap();
        assert!(!token.is_empty() && token.len() <= IMAGE_TOKEN_LENGTH);
        assert!(token.chars().all(|c| c.is_ascii_digit() || c.is_ascii_lowercase()));
        assert!(millis.parse::<i64>().is_ok());
    }

    #[test]
    fn test_name_without_dot_uses_whole_name() {
        let name = ImageService::generate_file_name("snapshot");
        assert!(name.ends_with(".snapshot"));
    }

    #[tokio::test]
    async fn test_non_image_is_rejected_before_storage() {
        let (service, store) = service();

        let err = service
            .upload(upload("menu.pdf", "application/pdf"))
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::BadRequest(_)));
        assert_eq!(store.call_count(), 0);
    }

    #[tokio::test]
    async fn test_oversized_upload_is_rejected() {
        let (service, store) = service();
        let mut big = upload("big.jpg", "image/jpeg");
        big.data = vec![0; 2048];

        assert!(service.upload(big).await.is_err());
        assert_eq!(store.call_count(), 0);
    }

    #[test]
    fn test_storage_key_from_path() {
        let (service, _) = service();

        assert_eq!(
            service.storage_key_from_path(
                "https://abc.supabase.co/storage/v1/object/public/items/menu-images/abc.jpg"
            ),
            Some("menu-images/abc.jpg".to_string())
        );
        assert_eq!(service.storage_key_from_path("/images/cakes/cheesecake.jpg"), None);
        assert_eq!(service.storage_key_from_path(""), None);
    }

    #[tokio::test]
    async fn test_scheduled_removal_reaches_store() {
        let (service, store) = service();

        service
            .schedule_removal("menu-images/abc.jpg".to_string())
            .await
            .unwrap();
        assert_eq!(store.removed_keys(), vec!["menu-images/abc.jpg".to_string()]);
    }

    #[tokio::test]
    async fn test_removal_failure_is_swallowed() {
        let (service, store) = service();
        store.set_failing(true);

        service
            .schedule_removal("menu-images/abc.jpg".to_string())
            .await
            .unwrap();
        assert!(store.removed_keys().is_empty());
    }
}
