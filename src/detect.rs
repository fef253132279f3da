//! Input dialect detection.
//!
//! A `CREATE TABLE` statement is classified by signature tokens checked in a fixed
//! precedence (PostgreSQL, then MySQL, then SQLite, default MySQL). Anything else that
//! strict-parses as a JSON object or array is JSON.

use once_cell::sync::Lazy;
use regex::Regex;
use serde_json::Value;

use crate::typemap::{Detected, Dialect};

static CREATE_TABLE: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?i)CREATE\s+TABLE").unwrap());
static POSTGRES_MARKERS: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)SERIAL|BIGSERIAL|UUID|TEXT\[\]|JSONB|TIMESTAMPTZ").unwrap());
static MYSQL_MARKERS: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)AUTO_INCREMENT|TINYINT|COMMENT\s*'").unwrap());
static SQLITE_MARKERS: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?i)\bAUTOINCREMENT\b").unwrap());

pub fn detect(text: &str) -> Detected {
    let trimmed = text.trim();

    if CREATE_TABLE.is_match(trimmed) {
        let dialect = if POSTGRES_MARKERS.is_match(trimmed) {
            Dialect::PostgreSql
        } else if MYSQL_MARKERS.is_match(trimmed) {
            Dialect::MySql
        } else if SQLITE_MARKERS.is_match(trimmed) {
            Dialect::Sqlite
        } else {
            Dialect::MySql
        };
        return Detected::Dialect(dialect);
    }

    match serde_json::from_str::<Value>(trimmed) {
        Ok(Value::Object(_)) | Ok(Value::Array(_)) => Detected::Dialect(Dialect::Json),
        _ => Detected::Unknown,
    }
}
