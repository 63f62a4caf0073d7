use crate::config::DatabaseConfig;
use crate::utils::error::{ClubhouseError, Result};
use sea_orm::*;
use std::time::Duration;
use tracing::{debug, info};

use super::super::entities;
use super::types::{DatabaseBackendType, SeaOrmDatabase};

impl SeaOrmDatabase {
    /// Create a new database connection
    pub async fn new(config: &DatabaseConfig) -> Result<Self> {
        if config.is_sqlite() {
            Self::ensure_sqlite_dir(&config.url)?;
        }

        let database = Self::from_connection(Self::try_connect(config).await?);
        info!(
            "Database connection established ({:?})",
            database.backend_type
        );
        Ok(database)
    }

    /// Wrap an existing connection
    pub fn from_connection(db: DatabaseConnection) -> Self {
        let backend_type = match db.get_database_backend() {
            DbBackend::Sqlite => DatabaseBackendType::SQLite,
            _ => DatabaseBackendType::PostgreSQL,
        };
        Self { db, backend_type }
    }

    async fn try_connect(config: &DatabaseConfig) -> Result<DatabaseConnection> {
        let mut opt = ConnectOptions::new(config.url.clone());
        opt.connect_timeout(Duration::from_secs(config.connection_timeout))
            .acquire_timeout(Duration::from_secs(30))
            .sqlx_logging(true)
            .sqlx_logging_level(log::LevelFilter::Debug);

        // Every connection to `sqlite::memory:` opens a separate database
        if config.url.contains(":memory:") {
            opt.max_connections(1).min_connections(1);
        } else {
            opt.max_connections(config.max_connections)
                .min_connections(1)
                .idle_timeout(Duration::from_secs(600))
                .max_lifetime(Duration::from_secs(3600));
        }

        Database::connect(opt).await.map_err(ClubhouseError::Database)
    }

    /// Create the parent directory of a file-backed SQLite database
    fn ensure_sqlite_dir(url: &str) -> Result<()> {
        let path = url
            .trim_start_matches("sqlite://")
            .trim_start_matches("sqlite:")
            .split('?')
            .next()
            .unwrap_or_default();
        if path.is_empty() || path.contains(":memory:") {
            return Ok(());
        }

        if let Some(parent) = std::path::Path::new(path).parent() {
            if !parent.as_os_str().is_empty() && !parent.exists() {
                std::fs::create_dir_all(parent).map_err(|e| {
                    ClubhouseError::Internal(format!("Failed to create data directory: {}", e))
                })?;
            }
        }
        Ok(())
    }

    /// Get the current backend type
    pub fn backend_type(&self) -> DatabaseBackendType {
        self.backend_type
    }

    /// Create the role tables if they do not exist yet
    pub async fn create_schema(&self) -> Result<()> {
        info!("Ensuring role tables exist");
        let backend = self.db.get_database_backend();
        let schema = Schema::new(backend);

        let mut roles = schema.create_table_from_entity(entities::Role);
        roles.if_not_exists();
        self.db
            .execute(backend.build(&roles))
            .await
            .map_err(ClubhouseError::Database)?;

        let unique_name = sea_query::Index::create()
            .if_not_exists()
            .name(entities::role::UNIQUE_NAME_INDEX)
            .table(entities::Role)
            .col(entities::role::Column::ClubType)
            .col(entities::role::Column::Name)
            .unique()
            .to_owned();
        self.db
            .execute(backend.build(&unique_name))
            .await
            .map_err(ClubhouseError::Database)?;

        let mut user_roles = schema.create_table_from_entity(entities::UserRole);
        user_roles.if_not_exists();
        self.db
            .execute(backend.build(&user_roles))
            .await
            .map_err(ClubhouseError::Database)?;

        debug!("Role tables ready");
        Ok(())
    }

    /// Get the underlying database connection
    pub fn connection(&self) -> &DatabaseConnection {
        &self.db
    }

    /// Health check
    pub async fn ping(&self) -> Result<()> {
        debug!("Performing database health check");

        // Simple query to check database connectivity
        let _result = entities::Role::find()
            .limit(1)
            .all(&self.db)
            .await
            .map_err(ClubhouseError::Database)?;

        debug!("Database health check passed");
        Ok(())
    }
}
