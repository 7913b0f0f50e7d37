//! Weather record store
//!
//! A single long-lived SurrealDB handle over the weather table. The handle is
//! created unconnected; the connection is established on a background task
//! so the HTTP listener never waits on the database. Until that task succeeds
//! every query fails with [`StoreError`].

use async_trait::async_trait;
use surrealdb::engine::any::Any;
use surrealdb::opt::auth::Root;
use surrealdb::Surreal;
use thiserror::Error;
use tokio::task::JoinHandle;
use tracing::{error, info};

use crate::record::WeatherRecord;

const SELECT_ALL: &str =
    "SELECT city, temperature, humidity, description, createdAt FROM type::table($table)";

const SELECT_BY_CITY: &str = "SELECT city, temperature, humidity, description, createdAt \
     FROM type::table($table) WHERE city = $city LIMIT 1";

/// Errors raised by store queries
#[derive(Debug, Error)]
pub enum StoreError {
    /// The database driver rejected or failed the operation
    #[error("database error: {0}")]
    Database(#[from] surrealdb::Error),

    /// The store cannot serve queries
    #[error("store unavailable: {0}")]
    Unavailable(String),
}

/// Read-only access to the weather collection.
///
/// Both operations are plain reads, so one implementation is shared by all
/// concurrent requests without locking.
#[async_trait]
pub trait WeatherStore: Send + Sync {
    /// Every record in store-defined order
    async fn find_all(&self) -> Result<Vec<WeatherRecord>, StoreError>;

    /// First record whose `city` equals `city` exactly
    async fn find_by_city(&self, city: &str) -> Result<Option<WeatherRecord>, StoreError>;
}

/// Connection parameters for [`SurrealStore`]
#[derive(Debug, Clone)]
pub struct StoreSettings {
    /// Endpoint, e.g. `ws://127.0.0.1:8000` or `mem://`. The store never
    /// connects without one.
    pub url: Option<String>,
    pub namespace: String,
    pub database: String,
    /// Table holding the weather records
    pub table: String,
    /// Root credentials, used only when present
    pub credentials: Option<(String, String)>,
}

/// SurrealDB-backed [`WeatherStore`]
#[derive(Clone)]
pub struct SurrealStore {
    db: Surreal<Any>,
    settings: StoreSettings,
}

impl SurrealStore {
    /// Create an unconnected store. Queries fail until [`connect`](Self::connect)
    /// completes.
    pub fn new(settings: StoreSettings) -> Self {
        Self {
            db: Surreal::init(),
            settings,
        }
    }

    /// Wrap an already connected client that has its namespace and database
    /// selected.
    pub fn with_client(db: Surreal<Any>, settings: StoreSettings) -> Self {
        Self { db, settings }
    }

    /// Connect, sign in when credentials are configured, and select the
    /// namespace and database.
    pub async fn connect(&self) -> Result<(), StoreError> {
        let url = self
            .settings
            .url
            .as_deref()
            .ok_or_else(|| StoreError::Unavailable("DB_URL is not set".to_string()))?;

        self.db.connect(url).await?;

        if let Some((username, password)) = &self.settings.credentials {
            self.db.signin(Root { username, password }).await?;
        }

        self.db
            .use_ns(self.settings.namespace.as_str())
            .use_db(self.settings.database.as_str())
            .await?;

        Ok(())
    }

    /// Run [`connect`](Self::connect) on a spawned task and log the outcome.
    /// The store stays usable as a handle either way; a failed connection
    /// surfaces as per-query errors.
    pub fn connect_in_background(&self) -> JoinHandle<()> {
        let store = self.clone();
        tokio::spawn(async move {
            info!(url = ?store.settings.url, "Connecting to database");
            match store.connect().await {
                Ok(()) => info!(
                    namespace = %store.settings.namespace,
                    database = %store.settings.database,
                    "Connected to database"
                ),
                Err(e) => error!(error = %e, "Database connection error"),
            }
        })
    }
}

#[async_trait]
impl WeatherStore for SurrealStore {
    async fn find_all(&self) -> Result<Vec<WeatherRecord>, StoreError> {
        let mut response = self
            .db
            .query(SELECT_ALL)
            .bind(("table", self.settings.table.clone()))
            .await?;

        let records: Vec<WeatherRecord> = response.take(0)?;
        Ok(records)
    }

    async fn find_by_city(&self, city: &str) -> Result<Option<WeatherRecord>, StoreError> {
        let mut response = self
            .db
            .query(SELECT_BY_CITY)
            .bind(("table", self.settings.table.clone()))
            .bind(("city", city.to_owned()))
            .await?;

        let records: Vec<WeatherRecord> = response.take(0)?;
        Ok(records.into_iter().next())
    }
}
