use aws_sdk_s3::{
    config::{Credentials, Region},
    primitives::ByteStream,
    Client, Config,
};
use civic_config::report_backend_error;
use civic_result::Result;

use crate::{public_url, AbstractStorage, ImageUpload};

/// S3 compatible image store
#[derive(Clone)]
pub struct S3Storage {
    pub client: Client,
    pub settings: civic_config::Storage,
}

/// Create an S3 client
pub fn create_client(s3_config: civic_config::StorageS3) -> Client {
    let provider_name = "civic-creds";
    let creds = Credentials::new(
        s3_config.access_key_id,
        s3_config.secret_access_key,
        None,
        None,
        provider_name,
    );

    let config = Config::builder()
        .region(Region::new(s3_config.region))
        .endpoint_url(s3_config.endpoint)
        .credentials_provider(creds)
        .force_path_style(true)
        .build();

    Client::from_conf(config)
}

impl S3Storage {
    pub fn new(settings: civic_config::Storage) -> S3Storage {
        S3Storage {
            client: create_client(settings.s3.clone()),
            settings,
        }
    }
}

#[async_trait]
impl AbstractStorage for S3Storage {
    async fn upload_image(&self, name: &str, image: &ImageUpload) -> Result<()> {
        tracing::info!(
            "Uploading {} ({} bytes) to {}",
            name,
            image.bytes.len(),
            self.settings.bucket
        );

        let mut request = self
            .client
            .put_object()
            .bucket(&self.settings.bucket)
            .key(name)
            .body(ByteStream::from(image.bytes.clone()));

        if let Some(content_type) = &image.content_type {
            request = request.content_type(content_type);
        }

        report_backend_error!("upload", self.settings.bucket, request.send().await).map(|_| ())
    }

    fn public_url(&self, name: &str) -> String {
        let base = if self.settings.public_url.is_empty() {
            &self.settings.s3.endpoint
        } else {
            &self.settings.public_url
        };

        public_url(base, &self.settings.bucket, name)
    }
}
