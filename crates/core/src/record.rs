//! Inventory record shape and the batch that carries one query's results.

use serde::{Deserialize, Serialize};

use crate::error::{RelayError, RelayResult};
use crate::value_object::ValueObject;

/// One inventory row as produced by the inventory query.
///
/// Field order and the PascalCase keys are the wire format: the serialized
/// record is the queue message body, verbatim. Columns reached through outer
/// joins or nullable user-defined fields are optional and encode as `null`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct InventoryRecord {
    pub stock_item_number: String,
    pub scientific_name: Option<String>,
    pub plant: Option<String>,
    pub variety: Option<String>,
    pub quantity_on_hand: Option<i64>,
    pub quantity_on_hold: Option<i64>,
    pub seed_bank: Option<String>,
}

impl ValueObject for InventoryRecord {}

impl InventoryRecord {
    /// Record with only the stock item number set.
    pub fn new(stock_item_number: impl Into<String>) -> Self {
        Self {
            stock_item_number: stock_item_number.into(),
            scientific_name: None,
            plant: None,
            variety: None,
            quantity_on_hand: None,
            quantity_on_hold: None,
            seed_bank: None,
        }
    }

    /// Encode the record as a self-contained JSON message body.
    pub fn to_message_body(&self) -> RelayResult<String> {
        serde_json::to_string(self).map_err(|e| {
            RelayError::serialization(format!("record {}: {}", self.stock_item_number, e))
        })
    }
}

/// Ordered records from one query execution.
///
/// Owned by a single invocation; never persisted.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Batch {
    records: Vec<InventoryRecord>,
}

impl Batch {
    pub fn new(records: Vec<InventoryRecord>) -> Self {
        Self { records }
    }

    pub fn empty() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn records(&self) -> &[InventoryRecord] {
        &self.records
    }

    pub fn iter(&self) -> core::slice::Iter<'_, InventoryRecord> {
        self.records.iter()
    }

    pub fn into_records(self) -> Vec<InventoryRecord> {
        self.records
    }
}

impl From<Vec<InventoryRecord>> for Batch {
    fn from(records: Vec<InventoryRecord>) -> Self {
        Self::new(records)
    }
}

impl FromIterator<InventoryRecord> for Batch {
    fn from_iter<I: IntoIterator<Item = InventoryRecord>>(iter: I) -> Self {
        Self::new(iter.into_iter().collect())
    }
}

impl<'a> IntoIterator for &'a Batch {
    type Item = &'a InventoryRecord;
    type IntoIter = core::slice::Iter<'a, InventoryRecord>;

    fn into_iter(self) -> Self::IntoIter {
        self.records.iter()
    }
}
