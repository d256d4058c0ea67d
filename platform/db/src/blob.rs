use anyhow::{Result, anyhow};
use async_trait::async_trait;
use chrono::Utc;
use entity::{blob_folder, blob_object};
use products_hr::{BlobContent, BlobFolder, BlobStore, StoredBlob, blob::files_url};
use sea_orm::{
    ColumnTrait, EntityTrait, QueryFilter, Set,
    sea_query::{Expr, OnConflict},
};
use tracing::debug;
use uuid::Uuid;

use crate::DbPool;

/// Blob store kept in `blob_folder` / `blob_object`; objects are served by the
/// HTTP layer under `{base_url}/files/{id}`.
#[derive(Clone, Debug)]
pub struct DbBlobStore {
    db: DbPool,
    base_url: String,
}

impl DbBlobStore {
    pub fn new(db: DbPool, base_url: impl Into<String>) -> Self {
        Self {
            db,
            base_url: base_url.into(),
        }
    }
}

fn to_folder(model: blob_folder::Model) -> BlobFolder {
    BlobFolder {
        id: model.id,
        name: model.name,
    }
}

#[async_trait]
impl BlobStore for DbBlobStore {
    async fn find_folder(&self, name: &str) -> Result<Option<BlobFolder>> {
        Ok(blob_folder::Entity::find()
            .filter(blob_folder::Column::Name.eq(name))
            .one(&self.db)
            .await?
            .map(to_folder))
    }

    async fn create_folder(&self, name: &str) -> Result<BlobFolder> {
        let model = blob_folder::ActiveModel {
            id: Set(Uuid::new_v4().to_string()),
            name: Set(name.to_string()),
            created_at: Set(Utc::now().into()),
        };
        let inserted = blob_folder::Entity::insert(model)
            .on_conflict(
                OnConflict::column(blob_folder::Column::Name)
                    .do_nothing()
                    .to_owned(),
            )
            .exec_without_returning(&self.db)
            .await?;
        debug!(name, inserted, "blob folder ensured");
        self.find_folder(name)
            .await?
            .ok_or_else(|| anyhow!("blob folder {name} missing after create"))
    }

    async fn put(
        &self,
        folder: &BlobFolder,
        name: &str,
        media_type: &str,
        bytes: Vec<u8>,
    ) -> Result<StoredBlob> {
        let id = Uuid::new_v4().to_string();
        let model = blob_object::ActiveModel {
            id: Set(id.clone()),
            folder_id: Set(folder.id.clone()),
            name: Set(name.to_string()),
            media_type: Set(media_type.to_string()),
            bytes: Set(bytes),
            public: Set(false),
            created_at: Set(Utc::now().into()),
        };
        blob_object::Entity::insert(model)
            .exec_without_returning(&self.db)
            .await?;
        Ok(StoredBlob {
            id,
            name: name.to_string(),
            media_type: media_type.to_string(),
        })
    }

    async fn share_publicly(&self, id: &str) -> Result<()> {
        let result = blob_object::Entity::update_many()
            .col_expr(blob_object::Column::Public, Expr::value(true))
            .filter(blob_object::Column::Id.eq(id))
            .exec(&self.db)
            .await?;
        if result.rows_affected == 0 {
            return Err(anyhow!("blob {id} not found"));
        }
        Ok(())
    }

    async fn fetch(&self, id: &str) -> Result<Option<BlobContent>> {
        Ok(blob_object::Entity::find_by_id(id.to_string())
            .one(&self.db)
            .await?
            .map(|model| BlobContent {
                name: model.name,
                media_type: model.media_type,
                bytes: model.bytes,
                public: model.public,
            }))
    }

    fn view_url(&self, id: &str) -> String {
        files_url(&self.base_url, id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::memory_pool;

    #[tokio::test]
    async fn create_folder_is_idempotent() {
        let store = DbBlobStore::new(memory_pool().await, "http://localhost:8080");
        let first = store.create_folder("EmployeePhotos").await.unwrap();
        let second = store.create_folder("EmployeePhotos").await.unwrap();
        assert_eq!(first, second);
        assert_eq!(
            store.find_folder("EmployeePhotos").await.unwrap(),
            Some(first)
        );
    }

    #[tokio::test]
    async fn objects_become_public_when_shared() {
        let store = DbBlobStore::new(memory_pool().await, "http://localhost:8080/");
        let folder = store.create_folder("EmployeePhotos").await.unwrap();
        let stored = store
            .put(&folder, "E1_1.png", "image/png", vec![1, 2, 3])
            .await
            .unwrap();
        assert!(!store.fetch(&stored.id).await.unwrap().unwrap().public);

        store.share_publicly(&stored.id).await.unwrap();
        let content = store.fetch(&stored.id).await.unwrap().unwrap();
        assert!(content.public);
        assert_eq!(content.bytes, vec![1, 2, 3]);
        assert_eq!(
            store.view_url(&stored.id),
            format!("http://localhost:8080/files/{}", stored.id)
        );
        assert!(store.share_publicly("missing").await.is_err());
    }
}
