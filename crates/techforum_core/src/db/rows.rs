//! bincode row helpers over `&str -> &[u8]` tables.

use crate::error::AppError;
use redb::ReadableTable;
use serde::de::DeserializeOwned;
use serde::Serialize;

pub(crate) type WriteTable<'txn> = redb::Table<'txn, &'static str, &'static [u8]>;

/// Load and decode one row. The access guard is released before returning,
/// so the caller may write to the same table afterwards.
pub(crate) fn load<T: DeserializeOwned>(
    table: &impl ReadableTable<&'static str, &'static [u8]>,
    id: &str,
) -> Result<Option<T>, AppError> {
    let Some(guard) = table.get(id)? else {
        return Ok(None);
    };
    Ok(Some(bincode::deserialize(guard.value())?))
}

/// Encode and upsert one row.
pub(crate) fn store<T: Serialize>(
    table: &mut WriteTable<'_>,
    id: &str,
    row: &T,
) -> Result<(), AppError> {
    let encoded = bincode::serialize(row)?;
    table.insert(id, encoded.as_slice())?;
    Ok(())
}

/// Decode every row that satisfies `keep`.
pub(crate) fn scan<T, F>(
    table: &impl ReadableTable<&'static str, &'static [u8]>,
    mut keep: F,
) -> Result<Vec<T>, AppError>
where
    T: DeserializeOwned,
    F: FnMut(&T) -> bool,
{
    let mut rows = Vec::new();
    for item in table.iter()? {
        let (_, value) = item?;
        let row: T = bincode::deserialize(value.value())?;
        if keep(&row) {
            rows.push(row);
        }
    }
    Ok(rows)
}

pub(crate) fn remove(table: &mut WriteTable<'_>, id: &str) -> Result<bool, AppError> {
    Ok(table.remove(id)?.is_some())
}
