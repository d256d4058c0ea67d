use std::{collections::HashMap, sync::Mutex};

use anyhow::{Result, anyhow};
use async_trait::async_trait;
use uuid::Uuid;

#[derive(Clone, Debug, Eq, PartialEq)]
pub struct BlobFolder {
    pub id: String,
    pub name: String,
}

#[derive(Clone, Debug, Eq, PartialEq)]
pub struct StoredBlob {
    pub id: String,
    pub name: String,
    pub media_type: String,
}

#[derive(Clone, Debug)]
pub struct BlobContent {
    pub name: String,
    pub media_type: String,
    pub bytes: Vec<u8>,
    pub public: bool,
}

/// Binary objects grouped in named folders, each optionally readable by link.
#[async_trait]
pub trait BlobStore: Send + Sync {
    async fn find_folder(&self, name: &str) -> Result<Option<BlobFolder>>;

    /// Create the folder unless one with that name exists; either way return it.
    async fn create_folder(&self, name: &str) -> Result<BlobFolder>;

    async fn put(
        &self,
        folder: &BlobFolder,
        name: &str,
        media_type: &str,
        bytes: Vec<u8>,
    ) -> Result<StoredBlob>;

    /// Allow anyone holding the link to read the object.
    async fn share_publicly(&self, id: &str) -> Result<()>;

    async fn fetch(&self, id: &str) -> Result<Option<BlobContent>>;

    /// Durable view link for an object.
    fn view_url(&self, id: &str) -> String;
}

pub fn files_url(base_url: &str, id: &str) -> String {
    format!("{}/files/{}", base_url.trim_end_matches('/'), id)
}

#[derive(Debug, Default)]
struct Bucket {
    folders: Vec<BlobFolder>,
    objects: HashMap<String, (String, BlobContent)>,
}

#[derive(Debug)]
pub struct MemoryBlobStore {
    base_url: String,
    bucket: Mutex<Bucket>,
}

impl MemoryBlobStore {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            bucket: Mutex::new(Bucket::default()),
        }
    }

    /// Names of the objects stored in a folder.
    pub fn object_names(&self, folder_id: &str) -> Vec<String> {
        let Ok(bucket) = self.bucket.lock() else {
            return Vec::new();
        };
        let mut names = bucket
            .objects
            .values()
            .filter(|(folder, _)| folder == folder_id)
            .map(|(_, content)| content.name.clone())
            .collect::<Vec<_>>();
        names.sort();
        names
    }

    pub fn folder_count(&self) -> usize {
        self.bucket.lock().map(|b| b.folders.len()).unwrap_or(0)
    }

    fn with_bucket<T>(&self, f: impl FnOnce(&mut Bucket) -> Result<T>) -> Result<T> {
        let mut bucket = self
            .bucket
            .lock()
            .map_err(|_| anyhow!("blob store lock poisoned"))?;
        f(&mut bucket)
    }
}

#[async_trait]
impl BlobStore for MemoryBlobStore {
    async fn find_folder(&self, name: &str) -> Result<Option<BlobFolder>> {
        self.with_bucket(|bucket| Ok(bucket.folders.iter().find(|f| f.name == name).cloned()))
    }

    async fn create_folder(&self, name: &str) -> Result<BlobFolder> {
        self.with_bucket(|bucket| {
            if let Some(existing) = bucket.folders.iter().find(|f| f.name == name) {
                return Ok(existing.clone());
            }
            let folder = BlobFolder {
                id: Uuid::new_v4().to_string(),
                name: name.to_string(),
            };
            bucket.folders.push(folder.clone());
            Ok(folder)
        })
    }

    async fn put(
        &self,
        folder: &BlobFolder,
        name: &str,
        media_type: &str,
        bytes: Vec<u8>,
    ) -> Result<StoredBlob> {
        self.with_bucket(|bucket| {
            let id = Uuid::new_v4().to_string();
            bucket.objects.insert(
                id.clone(),
                (
                    folder.id.clone(),
                    BlobContent {
                        name: name.to_string(),
                        media_type: media_type.to_string(),
                        bytes,
                        public: false,
                    },
                ),
            );
            Ok(StoredBlob {
                id,
                name: name.to_string(),
                media_type: media_type.to_string(),
            })
        })
    }

    async fn share_publicly(&self, id: &str) -> Result<()> {
        self.with_bucket(|bucket| {
            let (_, content) = bucket
                .objects
                .get_mut(id)
                .ok_or_else(|| anyhow!("blob {id} not found"))?;
            content.public = true;
            Ok(())
        })
    }

    async fn fetch(&self, id: &str) -> Result<Option<BlobContent>> {
        self.with_bucket(|bucket| Ok(bucket.objects.get(id).map(|(_, content)| content.clone())))
    }

    fn view_url(&self, id: &str) -> String {
        files_url(&self.base_url, id)
    }
}
