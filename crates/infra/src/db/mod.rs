//! Inventory database access (the query executor).
//!
//! One fixed, parameterless, read-only query per invocation. The connection is
//! opened for that query alone and released on every exit path.

pub mod in_memory;
pub mod postgres;

use async_trait::async_trait;
use tracing::warn;

use stockrelay_core::{Batch, RelayError, RelayResult};

pub use in_memory::InMemoryInventorySource;
pub use postgres::PostgresInventorySource;

/// Inventory snapshot query.
///
/// - current quantity from `Items`, current storage location from `Locations`
/// - on-hold quantity summed per model code over open, non-deleted issue orders
/// - only the item rows holding the maximum quantity for their item code
/// - only `NETWORK` models that are not soft-deleted
///
/// Aliases are quoted so the seven column names keep their case.
pub const INVENTORY_QUERY: &str = r#"
SELECT
    a.ModelCode                   AS "StockItemNumber",
    a.ModelName                   AS "ScientificName",
    a.UDTextModel1                AS "Plant",
    a.UDTextModel6                AS "Variety",
    CAST(b.Quantity AS BIGINT)    AS "QuantityOnHand",
    CAST(on_hold.Units AS BIGINT) AS "QuantityOnHold",
    c.LocationName                AS "SeedBank"
FROM Models a
INNER JOIN Items b ON a.ModelID = b.ModelID
INNER JOIN Locations c ON b.LocationIDCurrent = c.LocationID
LEFT JOIN (
    SELECT z.ModelCode, SUM(x.Units) AS Units
    FROM IssueOrderLine x
    INNER JOIN IssueOrders y ON x.IssueOrderID = y.IssueOrderID
    INNER JOIN Models z ON x.ModelID = z.ModelID
    WHERE y.SOClosed = 0 AND y.Deleted = 0
    GROUP BY z.ModelCode
) on_hold ON on_hold.ModelCode = a.ModelCode
WHERE b.ItemID IN (
    SELECT i.ItemID
    FROM Items i
    INNER JOIN (
        SELECT ItemCode, MAX(Quantity) AS Quantity
        FROM Items
        GROUP BY ItemCode
    ) max_quantity ON i.ItemCode = max_quantity.ItemCode AND i.Quantity = max_quantity.Quantity
)
AND a.ModelsUDValueCode2 = 'NETWORK'
AND a.Deleted = 0
ORDER BY "StockItemNumber" ASC
"#;

/// Source of the inventory batch for one invocation.
#[async_trait]
pub trait InventorySource: Send + Sync {
    /// Run the inventory query and return its rows in order (possibly none).
    ///
    /// Connect and query failures are `RelayError::Database`.
    async fn fetch_batch(&self) -> RelayResult<Batch>;
}

#[async_trait]
impl<T> InventorySource for std::sync::Arc<T>
where
    T: InventorySource + ?Sized,
{
    async fn fetch_batch(&self) -> RelayResult<Batch> {
        (**self).fetch_batch().await
    }
}

/// Combine the query outcome with the outcome of releasing the connection.
///
/// Exactly one result leaves the query executor. A failed query wins over
/// anything the connection reports afterwards; a release error after a
/// successful query is logged and the rows are kept.
pub fn settle_query(
    query: RelayResult<Batch>,
    release: RelayResult<()>,
) -> RelayResult<Batch> {
    if let Err(err) = release {
        warn!(error = %err, "inventory database connection reported an error on release");
    }
    query
}

#[cfg(test)]
mod tests {
    use super::*;
    use stockrelay_core::InventoryRecord;

    #[test]
    fn release_error_does_not_retract_rows() {
        let batch = Batch::new(vec![InventoryRecord::new("SB-1")]);
        let settled = settle_query(Ok(batch.clone()), Err(RelayError::connection("socket reset")));
        assert_eq!(settled, Ok(batch));
    }

    #[test]
    fn query_error_wins_over_release_error() {
        let settled = settle_query(
            Err(RelayError::database("syntax error")),
            Err(RelayError::connection("socket reset")),
        );
        assert_eq!(settled, Err(RelayError::database("syntax error")));
    }

    #[test]
    fn query_selects_the_seven_record_columns_in_order() {
        let columns = [
            "\"StockItemNumber\"",
            "\"ScientificName\"",
            "\"Plant\"",
            "\"Variety\"",
            "\"QuantityOnHand\"",
            "\"QuantityOnHold\"",
            "\"SeedBank\"",
        ];
        let positions: Vec<usize> = columns
            .iter()
            .map(|c| INVENTORY_QUERY.find(c).expect("column alias present"))
            .collect();
        assert!(positions.windows(2).all(|w| w[0] < w[1]));
        assert!(INVENTORY_QUERY.trim_end().ends_with("ORDER BY \"StockItemNumber\" ASC"));
    }

    #[test]
    fn query_is_read_only() {
        let upper = INVENTORY_QUERY.to_ascii_uppercase();
        for verb in ["INSERT ", "UPDATE ", "DELETE ", "MERGE ", "DROP "] {
            assert!(!upper.contains(verb), "query must not contain {}", verb.trim());
        }
    }
}
