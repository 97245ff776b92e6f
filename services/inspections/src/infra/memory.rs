//! In-process store used when no database is configured, and by tests.
//!
//! Rows are kept in their serde form per table. All tables sit behind one
//! mutex so every call is atomic; the lock is never held across an await.

use std::collections::{BTreeMap, HashMap};
use std::sync::{Arc, Mutex};

use anyhow::{Context as _, anyhow};
use serde_json::Value;

use leakwatch_domain::pagination::PageRequest;

use crate::domain::record::{OnDelete, Record, Table};
use crate::domain::repository::Repository;
use crate::error::InspectionsError;

#[derive(Default)]
struct MemoryTable {
    last_id: i32,
    rows: BTreeMap<i32, Value>,
}

#[derive(Clone, Default)]
pub struct MemoryStore {
    tables: Arc<Mutex<HashMap<Table, MemoryTable>>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn with_tables<R>(
        &self,
        f: impl FnOnce(&mut HashMap<Table, MemoryTable>) -> anyhow::Result<R>,
    ) -> Result<R, InspectionsError> {
        let mut tables = self
            .tables
            .lock()
            .map_err(|_| anyhow!("memory store lock poisoned"))?;
        Ok(f(&mut tables)?)
    }

    fn select<T: Record>(
        &self,
        filter: impl Fn(&Value) -> bool,
        window: Option<(usize, usize)>,
    ) -> Result<Vec<T>, InspectionsError> {
        self.with_tables(|tables| {
            let Some(table) = tables.get(&T::TABLE) else {
                return Ok(Vec::new());
            };
            let matching = table.rows.values().filter(|row| filter(row));
            let rows: Vec<&Value> = match window {
                Some((offset, limit)) => matching.skip(offset).take(limit).collect(),
                None => matching.collect(),
            };
            rows.into_iter().map(decode::<T>).collect()
        })
    }
}

fn decode<T: Record>(row: &Value) -> anyhow::Result<T> {
    serde_json::from_value(row.clone())
        .with_context(|| format!("decode {} row", T::TABLE.name()))
}

fn int_field(row: &Value, field: &str) -> Option<i64> {
    row.get(field).and_then(Value::as_i64)
}

impl<T: Record> Repository<T> for MemoryStore {
    async fn find_by_id(&self, id: i32) -> Result<Option<T>, InspectionsError> {
        self.with_tables(|tables| {
            tables
                .get(&T::TABLE)
                .and_then(|table| table.rows.get(&id))
                .map(decode::<T>)
                .transpose()
        })
    }

    async fn find_all(&self) -> Result<Vec<T>, InspectionsError> {
        self.select(|_| true, None)
    }

    async fn find_page(&self, page: PageRequest) -> Result<Vec<T>, InspectionsError> {
        let Some(offset) = page.offset() else {
            return Ok(Vec::new());
        };
        let Ok(offset) = usize::try_from(offset.max(0)) else {
            return Ok(Vec::new());
        };
        let limit = usize::try_from(page.limit).unwrap_or(0);
        self.select(|_| true, Some((offset, limit)))
    }

    async fn find_by_keys(&self, field: &str, keys: &[i32]) -> Result<Vec<T>, InspectionsError> {
        self.select(
            |row| int_field(row, field).is_some_and(|v| keys.iter().any(|k| i64::from(*k) == v)),
            None,
        )
    }

    async fn find_by_text(&self, field: &str, value: &str) -> Result<Vec<T>, InspectionsError> {
        self.select(
            |row| row.get(field).and_then(Value::as_str) == Some(value),
            None,
        )
    }

    async fn save(&self, mut record: T) -> Result<T, InspectionsError> {
        self.with_tables(|tables| {
            let table = tables.entry(T::TABLE).or_default();
            let id = match record.id() {
                Some(id) => id,
                None => {
                    let id = table.last_id + 1;
                    record.set_id(id);
                    id
                }
            };
            table.last_id = table.last_id.max(id);
            let row = serde_json::to_value(&record)
                .with_context(|| format!("encode {} row", T::TABLE.name()))?;
            table.rows.insert(id, row);
            Ok(record)
        })
    }

    async fn delete(&self, id: i32) -> Result<bool, InspectionsError> {
        self.with_tables(|tables| {
            let removed = tables
                .get_mut(&T::TABLE)
                .and_then(|table| table.rows.remove(&id))
                .is_some();
            if removed {
                apply_on_delete(tables, T::TABLE, id);
            }
            Ok(removed)
        })
    }
}

/// Cascade or unset references to a deleted row, transitively.
fn apply_on_delete(tables: &mut HashMap<Table, MemoryTable>, table: Table, id: i32) {
    let mut pending = vec![(table, id)];
    while let Some((parent, parent_id)) = pending.pop() {
        for dependent in parent.dependents() {
            let Some(child_table) = tables.get_mut(&dependent.table) else {
                continue;
            };
            let children: Vec<i32> = child_table
                .rows
                .iter()
                .filter(|(_, row)| int_field(row, dependent.field) == Some(i64::from(parent_id)))
                .map(|(child_id, _)| *child_id)
                .collect();
            for child_id in children {
                match dependent.on_delete {
                    OnDelete::Cascade => {
                        child_table.rows.remove(&child_id);
                        pending.push((dependent.table, child_id));
                    }
                    OnDelete::SetNull => {
                        if let Some(row) = child_table
                            .rows
                            .get_mut(&child_id)
                            .and_then(Value::as_object_mut)
                        {
                            row.insert(dependent.field.to_owned(), Value::Null);
                        }
                    }
                }
            }
        }
    }
}
