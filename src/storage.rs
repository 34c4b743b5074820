//! Storage
//!
//! Order collections persist as opaque JSON blobs in two named slots. The
//! store never fails its callers: missing or corrupt data degrades to an
//! empty list and write failures are logged and swallowed, so a full disk or
//! a mangled file can cost saved orders but never the working cart.

use std::{collections::HashMap, fs, io, path::PathBuf};

use tracing::{debug, warn};

use crate::orders::Order;

/// The two persisted order collections.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StoreSlot {
    /// Saved-but-not-submitted orders.
    Drafts,

    /// Successfully submitted orders.
    Sent,
}

impl StoreSlot {
    /// Slot name used as the storage key.
    pub fn key(self) -> &'static str {
        match self {
            StoreSlot::Drafts => "draftOrders",
            StoreSlot::Sent => "sentOrders",
        }
    }
}

/// Persistence for the order collections.
pub trait OrderStore {
    /// Read a slot, newest creation first. Missing or unparseable data
    /// yields an empty list.
    fn load(&self, slot: StoreSlot) -> Vec<Order>;

    /// Overwrite a slot. Failures are logged, never surfaced.
    fn save(&mut self, slot: StoreSlot, orders: &[Order]);
}

/// Parse a slot blob, degrading to an empty list on corrupt data.
fn parse_slot(slot: StoreSlot, blob: &str) -> Vec<Order> {
    match serde_json::from_str::<Vec<Order>>(blob) {
        Ok(mut orders) => {
            orders.sort_by(|a, b| b.created_at.cmp(&a.created_at));
            orders
        }
        Err(error) => {
            warn!(slot = slot.key(), %error, "discarding unparseable order blob");
            Vec::new()
        }
    }
}

/// File-backed store keeping one JSON file per slot under a directory.
#[derive(Debug)]
pub struct JsonFileStore {
    dir: PathBuf,
}

impl JsonFileStore {
    /// Create a store rooted at the given directory.
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        JsonFileStore { dir: dir.into() }
    }

    fn path(&self, slot: StoreSlot) -> PathBuf {
        self.dir.join(format!("{}.json", slot.key()))
    }
}

impl OrderStore for JsonFileStore {
    fn load(&self, slot: StoreSlot) -> Vec<Order> {
        let path = self.path(slot);

        match fs::read_to_string(&path) {
            Ok(blob) => parse_slot(slot, &blob),
            Err(error) if error.kind() == io::ErrorKind::NotFound => {
                debug!(slot = slot.key(), "no stored orders yet");
                Vec::new()
            }
            Err(error) => {
                warn!(slot = slot.key(), %error, "failed to read stored orders");
                Vec::new()
            }
        }
    }

    fn save(&mut self, slot: StoreSlot, orders: &[Order]) {
        let blob = match serde_json::to_string(orders) {
            Ok(blob) => blob,
            Err(error) => {
                warn!(slot = slot.key(), %error, "failed to serialize orders");
                return;
            }
        };

        if let Err(error) = fs::create_dir_all(&self.dir) {
            warn!(slot = slot.key(), %error, "failed to create storage directory");
            return;
        }

        if let Err(error) = fs::write(self.path(slot), blob) {
            warn!(slot = slot.key(), %error, "failed to write stored orders");
        }
    }
}

/// In-memory store holding serialized blobs per slot. Backs tests and
/// behaves like the file store, including the corrupt-blob degradation.
#[derive(Debug, Default)]
pub struct MemoryStore {
    slots: HashMap<&'static str, String>,
}

impl MemoryStore {
    /// Create an empty store.
    pub fn new() -> Self {
        MemoryStore::default()
    }

    /// Seed a slot with a raw blob, parseable or not.
    pub fn set_blob(&mut self, slot: StoreSlot, blob: impl Into<String>) {
        self.slots.insert(slot.key(), blob.into());
    }

    /// Raw blob currently held for a slot.
    pub fn blob(&self, slot: StoreSlot) -> Option<&str> {
        self.slots.get(slot.key()).map(String::as_str)
    }
}

impl OrderStore for MemoryStore {
    fn load(&self, slot: StoreSlot) -> Vec<Order> {
        self.slots
            .get(slot.key())
            .map_or_else(Vec::new, |blob| parse_slot(slot, blob))
    }

    fn save(&mut self, slot: StoreSlot, orders: &[Order]) {
        match serde_json::to_string(orders) {
            Ok(blob) => {
                self.slots.insert(slot.key(), blob);
            }
            Err(error) => {
                warn!(slot = slot.key(), %error, "failed to serialize orders");
            }
        }
    }
}
