//! HR vertical slice: the employee roster kept as rows of a sheet, the roster
//! settings, and employee photo uploads.
//!
//! Storage is reached only through the [`Sheet`], [`KeyValueStore`] and
//! [`BlobStore`] traits. In-memory implementations live next to each trait;
//! database-backed ones are provided by `platform-db`.

use std::sync::Arc;

pub mod blob;
pub mod error;
pub mod photo;
pub mod record;
pub mod schema;
pub mod settings;
pub mod sheet;
pub mod store;

pub use blob::{BlobContent, BlobFolder, BlobStore, MemoryBlobStore, StoredBlob};
pub use error::{ErrorKind, HrError, HrResult};
pub use photo::{PhotoUpload, PhotoUploader};
pub use record::Employee;
pub use schema::{Column, HeaderStyle};
pub use settings::{KeyValueStore, MemorySettings, Settings};
pub use sheet::{MemorySheet, Sheet};
pub use store::{EmployeeStore, InitOutcome};

pub const DEFAULT_PHOTO_FOLDER: &str = "EmployeePhotos";

/// Everything the HR surfaces need, wired over a single set of backends.
#[derive(Clone)]
pub struct HrModule {
    pub employees: Arc<EmployeeStore>,
    pub settings: Arc<Settings>,
    pub photos: Arc<PhotoUploader>,
    pub blobs: Arc<dyn BlobStore>,
}

impl HrModule {
    pub fn new(
        sheet: Arc<dyn Sheet>,
        kv: Arc<dyn KeyValueStore>,
        blobs: Arc<dyn BlobStore>,
        photo_folder: impl Into<String>,
    ) -> Self {
        Self {
            employees: Arc::new(EmployeeStore::new(sheet)),
            settings: Arc::new(Settings::new(kv)),
            photos: Arc::new(PhotoUploader::new(blobs.clone(), photo_folder)),
            blobs,
        }
    }

    /// Module backed entirely by in-memory stores.
    pub fn in_memory(public_base_url: impl Into<String>) -> Self {
        Self::new(
            Arc::new(MemorySheet::default()),
            Arc::new(MemorySettings::default()),
            Arc::new(MemoryBlobStore::new(public_base_url)),
            DEFAULT_PHOTO_FOLDER,
        )
    }
}
