//! Durable text slots keyed by fixed names.
//!
//! # Responsibility
//! - Read, write and delete one text value per key.
//! - Keep SQL details inside the persistence boundary.
//!
//! # Invariants
//! - A write replaces the whole value of a slot.
//! - Reading an absent slot is `Ok(None)`, never an error.

use crate::db::DbError;
use rusqlite::{params, Connection, OptionalExtension};
use std::cell::RefCell;
use std::collections::BTreeMap;

/// Raw key-value slot access.
pub trait SlotStore {
    fn read_slot(&self, key: &str) -> Result<Option<String>, DbError>;
    fn write_slot(&self, key: &str, value: &str) -> Result<(), DbError>;
    fn delete_slot(&self, key: &str) -> Result<(), DbError>;
}

impl<S: SlotStore + ?Sized> SlotStore for &S {
    fn read_slot(&self, key: &str) -> Result<Option<String>, DbError> {
        (**self).read_slot(key)
    }

    fn write_slot(&self, key: &str, value: &str) -> Result<(), DbError> {
        (**self).write_slot(key, value)
    }

    fn delete_slot(&self, key: &str) -> Result<(), DbError> {
        (**self).delete_slot(key)
    }
}

/// SQLite-backed slot store over the `slots` table.
pub struct SqliteSlotStore<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteSlotStore<'conn> {
    pub fn new(conn: &'conn Connection) -> Self {
        Self { conn }
    }
}

impl SlotStore for SqliteSlotStore<'_> {
    fn read_slot(&self, key: &str) -> Result<Option<String>, DbError> {
        let value = self
            .conn
            .query_row("SELECT value FROM slots WHERE key = ?1;", [key], |row| {
                row.get::<_, String>(0)
            })
            .optional()?;
        Ok(value)
    }

    fn write_slot(&self, key: &str, value: &str) -> Result<(), DbError> {
        self.conn.execute(
            "INSERT INTO slots (key, value) VALUES (?1, ?2)
             ON CONFLICT(key) DO UPDATE SET
                value = excluded.value,
                updated_at = (strftime('%s', 'now') * 1000);",
            params![key, value],
        )?;
        Ok(())
    }

    fn delete_slot(&self, key: &str) -> Result<(), DbError> {
        self.conn
            .execute("DELETE FROM slots WHERE key = ?1;", [key])?;
        Ok(())
    }
}

/// In-process slot store for tests and ephemeral sessions.
#[derive(Debug, Default)]
pub struct MemorySlotStore {
    slots: RefCell<BTreeMap<String, String>>,
}

impl MemorySlotStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the raw text held by `key`, bypassing decoding.
    pub fn raw(&self, key: &str) -> Option<String> {
        self.slots.borrow().get(key).cloned()
    }
}

impl SlotStore for MemorySlotStore {
    fn read_slot(&self, key: &str) -> Result<Option<String>, DbError> {
        Ok(self.raw(key))
    }

    fn write_slot(&self, key: &str, value: &str) -> Result<(), DbError> {
        self.slots
            .borrow_mut()
            .insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn delete_slot(&self, key: &str) -> Result<(), DbError> {
        self.slots.borrow_mut().remove(key);
        Ok(())
    }
}
