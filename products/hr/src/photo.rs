use std::sync::Arc;

use base64::{Engine as _, engine::general_purpose::STANDARD};
use chrono::{DateTime, Utc};
use serde::Serialize;
use tracing::{info, instrument, warn};

use crate::{
    blob::{BlobFolder, BlobStore},
    error::{HrError, HrResult},
};

#[derive(Clone, Debug, Eq, PartialEq, Serialize)]
pub struct PhotoUpload {
    pub url: String,
    pub id: String,
}

pub struct PhotoUploader {
    blobs: Arc<dyn BlobStore>,
    folder_name: String,
}

impl PhotoUploader {
    pub fn new(blobs: Arc<dyn BlobStore>, folder_name: impl Into<String>) -> Self {
        Self {
            blobs,
            folder_name: folder_name.into(),
        }
    }

    pub async fn upload(
        &self,
        payload: &str,
        file_name: Option<&str>,
        emp_id: &str,
    ) -> HrResult<PhotoUpload> {
        self.upload_at(payload, file_name, emp_id, Utc::now()).await
    }

    #[instrument(name = "hr.photos.upload", skip(self, payload, at))]
    pub async fn upload_at(
        &self,
        payload: &str,
        file_name: Option<&str>,
        emp_id: &str,
        at: DateTime<Utc>,
    ) -> HrResult<PhotoUpload> {
        let (media_type, bytes) = decode_data_url(payload)?;
        let name = photo_file_name(emp_id, at, file_name);
        let folder = self.folder().await?;
        let stored = self.blobs.put(&folder, &name, &media_type, bytes).await?;
        if let Err(err) = self.blobs.share_publicly(&stored.id).await {
            warn!(id = %stored.id, error = %err, "could not enable link sharing for photo");
        }
        info!(id = %stored.id, name = %name, "photo stored");
        Ok(PhotoUpload {
            url: self.blobs.view_url(&stored.id),
            id: stored.id,
        })
    }

    async fn folder(&self) -> HrResult<BlobFolder> {
        if let Some(folder) = self.blobs.find_folder(&self.folder_name).await? {
            return Ok(folder);
        }
        Ok(self.blobs.create_folder(&self.folder_name).await?)
    }
}

/// Split `data:<media-type>;base64,<bytes>` into its media type and decoded bytes.
pub fn decode_data_url(payload: &str) -> HrResult<(String, Vec<u8>)> {
    let (media_type, encoded) = payload
        .strip_prefix("data:")
        .and_then(|rest| rest.split_once(";base64,"))
        .ok_or_else(|| HrError::InvalidPayload("expected a base64 data URL".into()))?;
    if media_type.is_empty() {
        return Err(HrError::InvalidPayload("missing media type".into()));
    }
    let bytes = STANDARD
        .decode(encoded.trim())
        .map_err(|err| HrError::InvalidPayload(err.to_string()))?;
    Ok((media_type.to_string(), bytes))
}

pub fn sanitize_emp_id(emp_id: &str) -> String {
    emp_id
        .chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || c == '_' || c == '-' {
                c
            } else {
                '_'
            }
        })
        .collect()
}

pub fn photo_file_name(emp_id: &str, at: DateTime<Utc>, original: Option<&str>) -> String {
    let stem = format!("{}_{}", sanitize_emp_id(emp_id), at.timestamp_millis());
    match original.map(str::trim).filter(|name| !name.is_empty()) {
        Some(name) => format!("{stem}_{name}"),
        None => format!("{stem}.png"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        blob::{BlobContent, MemoryBlobStore, StoredBlob, files_url},
        error::ErrorKind,
    };
    use chrono::TimeZone;

    /// Memory store that refuses to share anything by link.
    struct NoSharing(MemoryBlobStore);

    #[async_trait::async_trait]
    impl BlobStore for NoSharing {
        async fn find_folder(&self, name: &str) -> anyhow::Result<Option<BlobFolder>> {
            self.0.find_folder(name).await
        }

        async fn create_folder(&self, name: &str) -> anyhow::Result<BlobFolder> {
            self.0.create_folder(name).await
        }

        async fn put(
            &self,
            folder: &BlobFolder,
            name: &str,
            media_type: &str,
            bytes: Vec<u8>,
        ) -> anyhow::Result<StoredBlob> {
            self.0.put(folder, name, media_type, bytes).await
        }

        async fn share_publicly(&self, _id: &str) -> anyhow::Result<()> {
            anyhow::bail!("sharing disabled by domain policy")
        }

        async fn fetch(&self, id: &str) -> anyhow::Result<Option<BlobContent>> {
            self.0.fetch(id).await
        }

        fn view_url(&self, id: &str) -> String {
            self.0.view_url(id)
        }
    }

    const PIXEL: &str = "data:image/png;base64,iVBORw0KGgo=";

    fn uploader() -> (Arc<MemoryBlobStore>, PhotoUploader) {
        let blobs = Arc::new(MemoryBlobStore::new("https://roster.test/"));
        (blobs.clone(), PhotoUploader::new(blobs, "EmployeePhotos"))
    }

    #[test]
    fn file_names_are_deterministic() {
        let at = Utc.timestamp_millis_opt(1_700_000_000_123).unwrap();
        assert_eq!(
            photo_file_name("A/B 7", at, None),
            "A_B_7_1700000000123.png"
        );
        assert_eq!(
            photo_file_name("E-1_x", at, Some("me.jpg")),
            "E-1_x_1700000000123_me.jpg"
        );
        assert_eq!(photo_file_name("E1", at, Some("  ")), "E1_1700000000123.png");
    }

    #[test]
    fn rejects_payloads_that_are_not_data_urls() {
        for payload in ["not-a-data-url", "data:;base64,AAAA", "data:image/png,AAAA"] {
            let err = decode_data_url(payload).unwrap_err();
            assert_eq!(err.kind(), ErrorKind::InvalidPayload, "{payload}");
        }
        let err = decode_data_url("data:image/png;base64,@@@").unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidPayload);
    }

    #[tokio::test]
    async fn upload_rejects_invalid_payload() {
        let (blobs, uploader) = uploader();
        let err = uploader
            .upload("not-a-data-url", Some("x.png"), "E1")
            .await
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidPayload);
        assert_eq!(blobs.folder_count(), 0);
    }

    #[tokio::test]
    async fn upload_stores_public_blob_in_one_folder() {
        let (blobs, uploader) = uploader();
        let at = Utc.timestamp_millis_opt(42).unwrap();
        let first = uploader.upload_at(PIXEL, None, "E1", at).await.unwrap();
        uploader
            .upload_at(PIXEL, Some("b.png"), "E2", at)
            .await
            .unwrap();

        assert_eq!(first.url, format!("https://roster.test/files/{}", first.id));
        assert_eq!(blobs.folder_count(), 1);
        let content = blobs.fetch(&first.id).await.unwrap().unwrap();
        assert!(content.public);
        assert_eq!(content.media_type, "image/png");
        assert_eq!(content.name, "E1_42.png");

        let folder = blobs.find_folder("EmployeePhotos").await.unwrap().unwrap();
        assert_eq!(
            blobs.object_names(&folder.id),
            vec!["E1_42.png".to_string(), "E2_42_b.png".to_string()]
        );
    }

    #[tokio::test]
    async fn sharing_failure_does_not_fail_upload() {
        let blobs = Arc::new(NoSharing(MemoryBlobStore::new("https://roster.test")));
        let uploader = PhotoUploader::new(blobs.clone(), "EmployeePhotos");
        let at = Utc.timestamp_millis_opt(7).unwrap();

        let upload = uploader.upload_at(PIXEL, None, "E1", at).await.unwrap();
        assert_eq!(upload.url, files_url("https://roster.test", &upload.id));
        let content = blobs.fetch(&upload.id).await.unwrap().unwrap();
        assert!(!content.public);
        assert_eq!(content.name, "E1_7.png");
    }
}
