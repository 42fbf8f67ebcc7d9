//! Query helpers

use rusqlite::types::{Type, ValueRef};
use rusqlite::{Connection, Params, ToSql};

use crate::error::{Result, UserStoreError};
use crate::storage::ConnectionSource;
use crate::utils::ComponentLogger;

/// Reads a column value as a string. NULL yields `None`; reals keep their
/// fractional part (`2.0`, not `2`); blobs must be UTF-8. A decoding error
/// carries no copy of the column bytes.
pub fn value_as_string(value: ValueRef<'_>) -> rusqlite::Result<Option<String>> {
    match value {
        ValueRef::Null => Ok(None),
        ValueRef::Integer(i) => Ok(Some(i.to_string())),
        ValueRef::Real(f) => Ok(Some(format!("{:?}", f))),
        ValueRef::Text(bytes) | ValueRef::Blob(bytes) => std::str::from_utf8(bytes)
            .map(|s| Some(s.to_owned()))
            .map_err(|e| rusqlite::Error::FromSqlConversionFailure(0, Type::Text, Box::new(e))),
    }
}

/// First column of every returned row, NULLs skipped
pub fn string_values<P: Params>(
    conn: &Connection,
    sql: &str,
    params: P,
) -> rusqlite::Result<Vec<String>> {
    let mut stmt = conn.prepare(sql)?;
    let mut rows = stmt.query(params)?;

    let mut values = Vec::new();
    while let Some(row) = rows.next()? {
        if let Some(value) = value_as_string(row.get_ref(0)?)? {
            values.push(value);
        }
    }
    Ok(values)
}

/// True when `sql` returns at least one non-null value.
///
/// Runs on `conn` when given; otherwise acquires a connection from `source`
/// and releases it before returning.
pub fn is_value_existing(
    source: &dyn ConnectionSource,
    conn: Option<&Connection>,
    sql: &str,
    params: &[&dyn ToSql],
    logger: &ComponentLogger,
) -> Result<bool> {
    let owned;
    let conn = match conn {
        Some(conn) => conn,
        None => {
            owned = source.connect().map_err(|e| query_failed(sql, e, logger))?;
            &owned
        }
    };

    string_values(conn, sql, params)
        .map(|values| !values.is_empty())
        .map_err(|e| query_failed(sql, e, logger))
}

fn query_failed(sql: &str, source: rusqlite::Error, logger: &ComponentLogger) -> UserStoreError {
    logger.error(format_args!("{}", source));
    logger.error(format_args!("Using sql : {}", sql));
    UserStoreError::Query {
        sql: sql.to_string(),
        source,
    }
}
