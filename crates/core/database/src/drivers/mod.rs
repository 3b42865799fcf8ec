mod reference;
#[cfg(feature = "rest")]
mod rest;

use civic_config::config;

pub use self::reference::*;
#[cfg(feature = "rest")]
pub use self::rest::*;

/// Database information to use to create a client
pub enum DatabaseInfo {
    /// Auto-detect the database in use
    Auto,
    /// Use the mock database
    Reference,
    /// Connect to a PostgREST compatible backend
    #[cfg(feature = "rest")]
    Rest {
        url: String,
        api_key: String,
        access_token: Option<String>,
    },
}

/// Database
#[derive(Clone)]
pub enum Database {
    /// Mock database
    Reference(ReferenceDb),
    /// PostgREST backend
    #[cfg(feature = "rest")]
    Rest(RestDb),
}

impl DatabaseInfo {
    /// Create a database client from the given database information
    pub async fn connect(self) -> Result<Database, String> {
        match self {
            DatabaseInfo::Auto => {
                let backend = config().await.backend;
                if backend.url.is_empty() {
                    info!("No backend configured, using the in-memory store.");
                    return Ok(Database::Reference(Default::default()));
                }

                #[cfg(feature = "rest")]
                return Ok(Database::Rest(RestDb::new(
                    backend.url,
                    backend.api_key,
                    Some(backend.access_token).filter(|token| !token.is_empty()),
                )?));

                #[cfg(not(feature = "rest"))]
                return Err("REST backend not enabled.".to_string());
            }
            DatabaseInfo::Reference => Ok(Database::Reference(Default::default())),
            #[cfg(feature = "rest")]
            DatabaseInfo::Rest {
                url,
                api_key,
                access_token,
            } => Ok(Database::Rest(RestDb::new(url, api_key, access_token)?)),
        }
    }
}
