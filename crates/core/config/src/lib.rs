use cached::proc_macro::cached;
use config::{Config, Environment, File, FileFormat};
use futures_locks::RwLock;
use once_cell::sync::Lazy;
use serde::Deserialize;

pub use civic_result;
pub use log;

static CONFIG_BUILDER: Lazy<RwLock<Config>> = Lazy::new(|| {
    RwLock::new({
        let mut builder = Config::builder().add_source(File::from_str(
            include_str!("../Civic.toml"),
            FileFormat::Toml,
        ));

        if std::path::Path::new("Civic.toml").exists() {
            builder = builder.add_source(File::new("Civic.toml", FileFormat::Toml));
        }

        builder
            .add_source(
                Environment::with_prefix("CIVIC")
                    .prefix_separator("_")
                    .separator("__"),
            )
            .build()
            .expect("valid configuration")
    })
});

#[derive(Deserialize, Debug, Clone)]
pub struct Backend {
    pub url: String,
    pub api_key: String,
    pub access_token: String,
}

#[derive(Deserialize, Debug, Clone)]
pub struct StorageS3 {
    pub endpoint: String,
    pub region: String,
    pub access_key_id: String,
    pub secret_access_key: String,
}

#[derive(Deserialize, Debug, Clone)]
pub struct Storage {
    pub bucket: String,
    pub public_url: String,
    pub s3: StorageS3,
}

#[derive(Deserialize, Debug, Clone)]
pub struct Settings {
    pub backend: Backend,
    pub storage: Storage,
}

/// Configure logging and common Rust variables
pub fn setup_logging(application: &str) {
    dotenv::dotenv().ok();

    if std::env::var("RUST_LOG").is_err() {
        std::env::set_var("RUST_LOG", "info");
    }

    if pretty_env_logger::try_init().is_ok() {
        log::info!("Starting {application}");
    }
}

#[macro_export]
macro_rules! configure {
    ($application: ident) => {
        $crate::setup_logging(stringify!($application));
    };
}

/// Log a failed backend call and convert it into a user-facing error
#[macro_export]
macro_rules! report_backend_error {
    ( $operation: expr, $collection: expr, $expr: expr ) => {
        $expr.map_err(|error| {
            $crate::log::error!("{} {}: {:?}", $operation, $collection, error);
            $crate::civic_result::create_backend_error!($operation, $collection, error)
        })
    };
}

pub async fn read() -> Config {
    CONFIG_BUILDER.read().await.clone()
}

#[cached(time = 30)]
pub async fn config() -> Settings {
    read()
        .await
        .try_deserialize::<Settings>()
        .expect("configuration matches Settings")
}
