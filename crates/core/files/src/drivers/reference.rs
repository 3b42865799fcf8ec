use std::{collections::HashMap, sync::Arc};

use civic_result::{create_backend_error, Result};
use futures::lock::Mutex;

use crate::{AbstractStorage, ImageUpload};

static BUCKET: &str = "report-images";

/// In-memory image store
#[derive(Clone, Default)]
pub struct ReferenceStorage {
    pub objects: Arc<Mutex<HashMap<String, ImageUpload>>>,
    pub poisoned: Arc<Mutex<bool>>,
}

impl ReferenceStorage {
    /// Make every following upload fail
    pub async fn poison(&self) {
        *self.poisoned.lock().await = true;
    }

    /// Names of every stored object
    pub async fn object_names(&self) -> Vec<String> {
        self.objects.lock().await.keys().cloned().collect()
    }
}

#[async_trait]
impl AbstractStorage for ReferenceStorage {
    async fn upload_image(&self, name: &str, image: &ImageUpload) -> Result<()> {
        if *self.poisoned.lock().await {
            return Err(create_backend_error!("upload", BUCKET, "storage unavailable"));
        }

        let mut objects = self.objects.lock().await;
        if objects.contains_key(name) {
            Err(create_backend_error!("upload", BUCKET, "The resource already exists"))
        } else {
            objects.insert(name.to_string(), image.clone());
            Ok(())
        }
    }

    fn public_url(&self, name: &str) -> String {
        format!("memory://{BUCKET}/{name}")
    }
}
