#[macro_use]
extern crate async_trait;

use std::path::Path;

use civic_config::config;
use civic_result::Result;

mod drivers;
pub use drivers::*;

/// Image selected for upload alongside a report
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageUpload {
    /// Original file name, used for its extension
    pub file_name: String,
    /// Raw content type, if known
    pub content_type: Option<String>,
    /// File contents
    pub bytes: Vec<u8>,
}

impl ImageUpload {
    /// Read an image from disk
    pub fn from_path(path: &Path) -> std::io::Result<ImageUpload> {
        let bytes = std::fs::read(path)?;
        let file_name = path
            .file_name()
            .map(|name| name.to_string_lossy().to_string())
            .unwrap_or_default();

        Ok(ImageUpload {
            content_type: content_type_for(&file_name).map(str::to_string),
            file_name,
            bytes,
        })
    }
}

/// Guess an image content type from a file name
pub fn content_type_for(file_name: &str) -> Option<&'static str> {
    let extension = Path::new(file_name).extension()?.to_str()?.to_lowercase();
    Some(match extension.as_str() {
        "png" => "image/png",
        "jpg" | "jpeg" => "image/jpeg",
        "gif" => "image/gif",
        "webp" => "image/webp",
        "avif" => "image/avif",
        "svg" => "image/svg+xml",
        _ => return None,
    })
}

/// Generate a random object name, keeping the original extension
pub fn unique_name(file_name: &str) -> String {
    let id = ulid::Ulid::new().to_string();
    match Path::new(file_name).extension().and_then(|ext| ext.to_str()) {
        Some(extension) => format!("{id}.{extension}"),
        None => id,
    }
}

/// Join a public base URL, bucket and object name
pub fn public_url(base: &str, bucket: &str, name: &str) -> String {
    format!("{}/{bucket}/{name}", base.trim_end_matches('/'))
}

#[async_trait]
pub trait AbstractStorage: Sync + Send {
    /// Store an object under the given name
    async fn upload_image(&self, name: &str, image: &ImageUpload) -> Result<()>;

    /// Publicly readable URL of a stored object
    fn public_url(&self, name: &str) -> String;
}

/// Storage information to use to create a client
pub enum StorageInfo {
    /// Auto-detect the storage in use
    Auto,
    /// Use the in-memory store
    Reference,
    /// Connect to an S3 compatible store
    S3(civic_config::Storage),
}

/// Image storage
#[derive(Clone)]
pub enum Storage {
    /// In-memory store
    Reference(ReferenceStorage),
    /// S3 compatible store
    S3(S3Storage),
}

impl StorageInfo {
    /// Create a storage client from the given information
    pub async fn connect(self) -> Storage {
        match self {
            StorageInfo::Auto => {
                let storage = config().await.storage;
                if storage.s3.endpoint.is_empty() {
                    Storage::Reference(Default::default())
                } else {
                    Storage::S3(S3Storage::new(storage))
                }
            }
            StorageInfo::Reference => Storage::Reference(Default::default()),
            StorageInfo::S3(storage) => Storage::S3(S3Storage::new(storage)),
        }
    }
}

impl Storage {
    /// Upload an image under a fresh unique name and return its public URL
    pub async fn upload(&self, image: &ImageUpload) -> Result<String> {
        let name = unique_name(&image.file_name);
        self.upload_image(&name, image).await?;
        Ok(self.public_url(&name))
    }
}

impl std::ops::Deref for Storage {
    type Target = dyn AbstractStorage;

    fn deref(&self) -> &Self::Target {
        match &self {
            Storage::Reference(dummy) => dummy,
            Storage::S3(s3) => s3,
        }
    }
}
