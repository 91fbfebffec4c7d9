//! Postgres-backed inventory source.
//!
//! Opens a dedicated connection per invocation (no pool: a relay run issues a
//! single query and exits), maps rows by column name and closes the
//! connection before returning.
//!
//! ## Error Mapping
//!
//! | Step | sqlx error | Result |
//! |------|-----------|--------|
//! | connect | any | `RelayError::Database` |
//! | query | any | `RelayError::Database` (connection still closed) |
//! | row decode | `ColumnDecode` / `ColumnNotFound` | `RelayError::Database` |
//! | close | any | `RelayError::Connection`, logged only |

use async_trait::async_trait;
use sqlx::postgres::{PgConnectOptions, PgConnection, PgRow};
use sqlx::{Connection, Row};
use tracing::{info, instrument};

use stockrelay_core::{Batch, InventoryRecord, RelayError, RelayResult};

use super::{settle_query, InventorySource, INVENTORY_QUERY};
use crate::config::DatabaseConfig;

/// Inventory source reading from the Postgres inventory database.
#[derive(Debug, Clone)]
pub struct PostgresInventorySource {
    config: DatabaseConfig,
}

impl PostgresInventorySource {
    pub fn new(config: DatabaseConfig) -> Self {
        Self { config }
    }

    fn connect_options(&self) -> PgConnectOptions {
        PgConnectOptions::new()
            .host(&self.config.host)
            .port(self.config.port)
            .username(&self.config.user)
            .password(&self.config.password)
            .database(&self.config.database)
            .application_name("stockrelay")
    }
}

#[async_trait]
impl InventorySource for PostgresInventorySource {
    #[instrument(
        skip(self),
        fields(
            db_host = %self.config.host,
            db_name = %self.config.database
        ),
        err
    )]
    async fn fetch_batch(&self) -> RelayResult<Batch> {
        info!("connecting to inventory database");

        let mut conn = PgConnection::connect_with(&self.connect_options())
            .await
            .map_err(|e| map_sqlx_error("connect", e))?;

        let query = run_query(&mut conn).await;
        let release = conn
            .close()
            .await
            .map_err(|e| RelayError::connection(e.to_string()));

        let batch = settle_query(query, release)?;
        info!(rows = batch.len(), "successfully queried inventory database");
        Ok(batch)
    }
}

async fn run_query(conn: &mut PgConnection) -> RelayResult<Batch> {
    let rows = sqlx::query(INVENTORY_QUERY)
        .fetch_all(&mut *conn)
        .await
        .map_err(|e| map_sqlx_error("query", e))?;

    rows.iter().map(record_from_row).collect()
}

fn record_from_row(row: &PgRow) -> RelayResult<InventoryRecord> {
    let decode = |e| map_sqlx_error("decode", e);

    Ok(InventoryRecord {
        stock_item_number: row.try_get("StockItemNumber").map_err(decode)?,
        scientific_name: row.try_get("ScientificName").map_err(decode)?,
        plant: row.try_get("Plant").map_err(decode)?,
        variety: row.try_get("Variety").map_err(decode)?,
        quantity_on_hand: row.try_get("QuantityOnHand").map_err(decode)?,
        quantity_on_hold: row.try_get("QuantityOnHold").map_err(decode)?,
        seed_bank: row.try_get("SeedBank").map_err(decode)?,
    })
}

fn map_sqlx_error(operation: &str, err: sqlx::Error) -> RelayError {
    match err {
        sqlx::Error::Database(db_err) => {
            let code = db_err.code().map(|c| c.into_owned()).unwrap_or_default();
            RelayError::database(format!(
                "database error in {} [{}]: {}",
                operation,
                code,
                db_err.message()
            ))
        }
        sqlx::Error::ColumnNotFound(column) => {
            RelayError::database(format!("column {} missing in {}", column, operation))
        }
        _ => RelayError::database(format!("sqlx error in {}: {}", operation, err)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn unreachable_config() -> DatabaseConfig {
        DatabaseConfig {
            user: "relay".to_string(),
            password: "secret".to_string(),
            host: "127.0.0.1".to_string(),
            database: "passport".to_string(),
            // Nothing listens on port 1.
            port: 1,
        }
    }

    #[tokio::test]
    async fn connect_failure_is_a_database_error() {
        let source = PostgresInventorySource::new(unreachable_config());
        let err = source.fetch_batch().await.unwrap_err();
        assert!(matches!(err, RelayError::Database(ref msg) if msg.contains("connect")), "{err}");
        assert!(err.is_fatal());
    }

    #[test]
    fn column_not_found_names_the_column() {
        let err = map_sqlx_error("decode", sqlx::Error::ColumnNotFound("SeedBank".to_string()));
        assert_eq!(err, RelayError::database("column SeedBank missing in decode"));
    }
}
