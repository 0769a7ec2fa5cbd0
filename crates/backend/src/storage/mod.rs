use std::path::Path;
use std::sync::Arc;

use redb::{
    Database, ReadableDatabase, ReadableTable, ReadableTableMetadata, TableDefinition,
    WriteTransaction,
};
use tastemap_shared::dataset::Dataset;
use tastemap_shared::models::{Pin, ReactionCounts, ReactionKind, Store};
use thiserror::Error;

/// JSON documents keyed by id.
type JsonTable = TableDefinition<'static, &'static str, &'static [u8]>;

const STORES_TABLE: JsonTable = TableDefinition::new("stores");
const PINS_TABLE: JsonTable = TableDefinition::new("pins");
const REACTIONS_TABLE: TableDefinition<&str, u64> = TableDefinition::new("reactions");

#[derive(Debug, Error)]
pub enum StorageError {
    #[error("database error: {0}")]
    Database(#[from] redb::DatabaseError),
    #[error("transaction error: {0}")]
    Transaction(#[from] redb::TransactionError),
    #[error("table error: {0}")]
    Table(#[from] redb::TableError),
    #[error("storage error: {0}")]
    Storage(#[from] redb::StorageError),
    #[error("commit error: {0}")]
    Commit(#[from] redb::CommitError),
    #[error("serialization error: {0}")]
    Json(#[from] serde_json::Error),
}

pub struct Storage {
    db: Database,
}

fn reaction_key(store_id: &str, kind: ReactionKind) -> String {
    format!("{store_id}/{}", kind.as_str())
}

fn put_json<T: serde::Serialize>(
    txn: &WriteTransaction,
    table: JsonTable,
    id: &str,
    value: &T,
) -> Result<(), StorageError> {
    let json = serde_json::to_vec(value)?;
    let mut table = txn.open_table(table)?;
    table.insert(id, json.as_slice())?;
    Ok(())
}

impl Storage {
    pub fn open(path: &Path) -> Result<Arc<Self>, StorageError> {
        let db = Database::create(path)?;

        let write_txn = db.begin_write()?;
        {
            write_txn.open_table(STORES_TABLE)?;
            write_txn.open_table(PINS_TABLE)?;
            write_txn.open_table(REACTIONS_TABLE)?;
        }
        write_txn.commit()?;

        Ok(Arc::new(Storage { db }))
    }

    pub fn is_empty(&self) -> Result<bool, StorageError> {
        let read_txn = self.db.begin_read()?;
        let stores = read_txn.open_table(STORES_TABLE)?;
        let pins = read_txn.open_table(PINS_TABLE)?;
        Ok(stores.is_empty()? && pins.is_empty()?)
    }

    /// Copy the bundled dataset into an empty database. Returns whether
    /// anything was written.
    pub fn seed(&self, dataset: &Dataset) -> Result<bool, StorageError> {
        if !self.is_empty()? {
            return Ok(false);
        }
        let write_txn = self.db.begin_write()?;
        for store in &dataset.stores {
            put_json(&write_txn, STORES_TABLE, &store.id, store)?;
        }
        for pin in &dataset.pins {
            put_json(&write_txn, PINS_TABLE, &pin.id, pin)?;
        }
        write_txn.commit()?;
        tracing::info!(
            stores = dataset.stores.len(),
            pins = dataset.pins.len(),
            "Seeded storage from dataset"
        );
        Ok(true)
    }

    fn list<T: serde::de::DeserializeOwned>(
        &self,
        table: JsonTable,
    ) -> Result<Vec<T>, StorageError> {
        let read_txn = self.db.begin_read()?;
        let table = read_txn.open_table(table)?;
        let mut out = Vec::new();
        for entry in table.iter()? {
            let (_, value) = entry?;
            out.push(serde_json::from_slice(value.value())?);
        }
        Ok(out)
    }

    fn get<T: serde::de::DeserializeOwned>(
        &self,
        table: JsonTable,
        id: &str,
    ) -> Result<Option<T>, StorageError> {
        let read_txn = self.db.begin_read()?;
        let table = read_txn.open_table(table)?;
        match table.get(id)? {
            Some(value) => Ok(Some(serde_json::from_slice(value.value())?)),
            None => Ok(None),
        }
    }

    pub fn list_stores(&self) -> Result<Vec<Store>, StorageError> {
        self.list(STORES_TABLE)
    }

    pub fn get_store(&self, id: &str) -> Result<Option<Store>, StorageError> {
        self.get(STORES_TABLE, id)
    }

    pub fn save_store(&self, store: &Store) -> Result<(), StorageError> {
        let write_txn = self.db.begin_write()?;
        put_json(&write_txn, STORES_TABLE, &store.id, store)?;
        write_txn.commit()?;
        tracing::debug!(store_id = %store.id, "Saved store");
        Ok(())
    }

    /// Remove a store together with every pin pointing at it.
    pub fn delete_store(&self, id: &str) -> Result<bool, StorageError> {
        let write_txn = self.db.begin_write()?;
        let removed = {
            let mut stores = write_txn.open_table(STORES_TABLE)?;
            let removed = stores.remove(id)?.is_some();

            let mut pins = write_txn.open_table(PINS_TABLE)?;
            let mut orphaned = Vec::new();
            for entry in pins.iter()? {
                let (key, value) = entry?;
                let pin: Pin = serde_json::from_slice(value.value())?;
                if pin.store_id == id {
                    orphaned.push(key.value().to_string());
                }
            }
            for pin_id in &orphaned {
                pins.remove(pin_id.as_str())?;
            }
            if !orphaned.is_empty() {
                tracing::info!(store_id = id, pins = orphaned.len(), "Deleted pins of store");
            }
            removed
        };
        write_txn.commit()?;
        Ok(removed)
    }

    pub fn list_pins(&self) -> Result<Vec<Pin>, StorageError> {
        let mut pins: Vec<Pin> = self.list(PINS_TABLE)?;
        for pin in &mut pins {
            pin.migrate();
        }
        Ok(pins)
    }

    pub fn get_pin(&self, id: &str) -> Result<Option<Pin>, StorageError> {
        let pin: Option<Pin> = self.get(PINS_TABLE, id)?;
        Ok(pin.map(|mut p| {
            p.migrate();
            p
        }))
    }

    pub fn save_pin(&self, pin: &Pin) -> Result<(), StorageError> {
        let write_txn = self.db.begin_write()?;
        put_json(&write_txn, PINS_TABLE, &pin.id, pin)?;
        write_txn.commit()?;
        tracing::debug!(pin_id = %pin.id, store_id = %pin.store_id, "Saved pin");
        Ok(())
    }

    /// Write a store and a pin in one transaction.
    pub fn save_store_and_pin(&self, store: &Store, pin: &Pin) -> Result<(), StorageError> {
        let write_txn = self.db.begin_write()?;
        put_json(&write_txn, STORES_TABLE, &store.id, store)?;
        put_json(&write_txn, PINS_TABLE, &pin.id, pin)?;
        write_txn.commit()?;
        Ok(())
    }

    pub fn delete_pin(&self, id: &str) -> Result<bool, StorageError> {
        let write_txn = self.db.begin_write()?;
        let removed = {
            let mut table = write_txn.open_table(PINS_TABLE)?;
            let result = table.remove(id)?;
            result.is_some()
        };
        write_txn.commit()?;
        Ok(removed)
    }

    pub fn reactions(&self, store_id: &str) -> Result<ReactionCounts, StorageError> {
        let read_txn = self.db.begin_read()?;
        let table = read_txn.open_table(REACTIONS_TABLE)?;
        let count = |kind| -> Result<u64, StorageError> {
            Ok(table
                .get(reaction_key(store_id, kind).as_str())?
                .map(|v| v.value())
                .unwrap_or(0))
        };
        Ok(ReactionCounts {
            like: count(ReactionKind::Like)?,
            bad: count(ReactionKind::Bad)?,
        })
    }

    /// Bump a reaction counter and return its new value.
    pub fn increment_reaction(
        &self,
        store_id: &str,
        kind: ReactionKind,
    ) -> Result<u64, StorageError> {
        let key = reaction_key(store_id, kind);
        let write_txn = self.db.begin_write()?;
        let count = {
            let mut table = write_txn.open_table(REACTIONS_TABLE)?;
            let current = table.get(key.as_str())?.map(|v| v.value()).unwrap_or(0);
            let next = current + 1;
            table.insert(key.as_str(), next)?;
            next
        };
        write_txn.commit()?;
        Ok(count)
    }

    pub fn count_pins(&self) -> Result<u64, StorageError> {
        let read_txn = self.db.begin_read()?;
        let table = read_txn.open_table(PINS_TABLE)?;
        Ok(table.len()?)
    }
}
