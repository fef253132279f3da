//! Source type vocabulary → Go host types.
//!
//! Each dialect owns one immutable table. Lookup uppercases the raw type token and picks
//! the longest table key that prefixes it, so `TINYINT(1)` wins over `TINYINT` and
//! `DATETIME` wins over `DATE`. Unmapped tokens fall back to `string`.

use std::fmt;
use std::str::FromStr;

pub const GO_STRING: &str = "string";
pub const GO_ANY: &str = "interface{}";
pub const GO_TIME: &str = "time.Time";
pub const GO_RAW_JSON: &str = "json.RawMessage";

// ------------------------------- Dialects --------------------------------- //

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Dialect {
    MySql,
    PostgreSql,
    Sqlite,
    Json,
}

/// Detector verdict: a dialect, or nothing recognizable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Detected {
    Dialect(Dialect),
    Unknown,
}

impl Dialect {
    pub fn name(self) -> &'static str {
        match self {
            Dialect::MySql => "mysql",
            Dialect::PostgreSql => "postgresql",
            Dialect::Sqlite => "sqlite",
            Dialect::Json => "json",
        }
    }

    pub fn is_sql(self) -> bool {
        !matches!(self, Dialect::Json)
    }

    pub fn table(self) -> &'static [(&'static str, &'static str)] {
        match self {
            Dialect::MySql => MYSQL,
            Dialect::PostgreSql => POSTGRESQL,
            Dialect::Sqlite => SQLITE,
            Dialect::Json => JSON,
        }
    }
}

impl fmt::Display for Dialect {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Dialect {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "mysql" => Ok(Dialect::MySql),
            "postgresql" | "postgres" | "pg" => Ok(Dialect::PostgreSql),
            "sqlite" | "sqlite3" => Ok(Dialect::Sqlite),
            "json" => Ok(Dialect::Json),
            other => Err(format!("unknown dialect `{other}`")),
        }
    }
}

impl Detected {
    pub fn dialect(self) -> Option<Dialect> {
        match self {
            Detected::Dialect(d) => Some(d),
            Detected::Unknown => None,
        }
    }
}

impl fmt::Display for Detected {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Detected::Dialect(d) => d.fmt(f),
            Detected::Unknown => f.write_str("unknown"),
        }
    }
}

// -------------------------------- Tables ---------------------------------- //

const MYSQL: &[(&str, &str)] = &[
    ("TINYINT(1)", "bool"),
    ("TINYINT", "int64"),
    ("SMALLINT", "int64"),
    ("MEDIUMINT", "int64"),
    ("INT", "int64"),
    ("INTEGER", "int64"),
    ("BIGINT", "int64"),
    ("VARCHAR", "string"),
    ("CHAR", "string"),
    ("TEXT", "string"),
    ("TINYTEXT", "string"),
    ("MEDIUMTEXT", "string"),
    ("LONGTEXT", "string"),
    ("FLOAT", "float64"),
    ("DOUBLE", "float64"),
    ("DECIMAL", "float64"),
    ("NUMERIC", "float64"),
    ("DATE", GO_TIME),
    ("DATETIME", GO_TIME),
    ("TIMESTAMP", GO_TIME),
    ("TIME", GO_TIME),
    ("YEAR", "int"),
    ("JSON", GO_RAW_JSON),
    ("BLOB", "[]byte"),
    ("TINYBLOB", "[]byte"),
    ("MEDIUMBLOB", "[]byte"),
    ("LONGBLOB", "[]byte"),
    ("BINARY", "[]byte"),
    ("VARBINARY", "[]byte"),
    ("ENUM", "string"),
    ("SET", "string"),
];

const POSTGRESQL: &[(&str, &str)] = &[
    ("SMALLINT", "int64"),
    ("INTEGER", "int64"),
    ("INT", "int64"),
    ("BIGINT", "int64"),
    ("SERIAL", "int64"),
    ("BIGSERIAL", "int64"),
    ("SMALLSERIAL", "int64"),
    ("BOOLEAN", "bool"),
    ("BOOL", "bool"),
    ("VARCHAR", "string"),
    ("CHAR", "string"),
    ("CHARACTER", "string"),
    ("TEXT", "string"),
    ("UUID", "string"),
    ("REAL", "float64"),
    ("DOUBLE", "float64"),
    ("NUMERIC", "float64"),
    ("DECIMAL", "float64"),
    ("DATE", GO_TIME),
    ("TIME", GO_TIME),
    ("TIMESTAMP", GO_TIME),
    ("TIMESTAMPTZ", GO_TIME),
    ("JSON", GO_RAW_JSON),
    ("JSONB", GO_RAW_JSON),
    ("BYTEA", "[]byte"),
];

const SQLITE: &[(&str, &str)] = &[
    ("INTEGER", "int64"),
    ("INT", "int64"),
    ("TINYINT", "int64"),
    ("SMALLINT", "int64"),
    ("MEDIUMINT", "int64"),
    ("BIGINT", "int64"),
    ("TEXT", "string"),
    ("CHAR", "string"),
    ("VARCHAR", "string"),
    ("CLOB", "string"),
    ("REAL", "float64"),
    ("FLOAT", "float64"),
    ("DOUBLE", "float64"),
    ("NUMERIC", "float64"),
    ("DECIMAL", "float64"),
    ("BOOLEAN", "bool"),
    ("DATE", "string"),
    ("DATETIME", "string"),
    ("BLOB", "[]byte"),
];

// keys are the inferred JSON kinds, matched exactly
const JSON: &[(&str, &str)] = &[
    ("string", "string"),
    ("int", "int"),
    ("float", "float64"),
    ("boolean", "bool"),
    ("null", GO_ANY),
];

// SQLite affinity rules, checked in order when the table has no entry.
const SQLITE_AFFINITY: &[(&[&str], &str)] = &[
    (&["INT"], "int64"),
    (&["CHAR", "CLOB", "TEXT"], "string"),
    (&["BLOB"], "[]byte"),
    (&["REAL", "FLOA", "DOUB"], "float64"),
];

// ------------------------------- Lookups ---------------------------------- //

/// Map a raw type token of `dialect` to its Go type.
pub fn map_type(dialect: Dialect, source_type: &str) -> String {
    let raw = source_type.trim();
    if dialect == Dialect::Json {
        return map_json_kind(raw).to_string();
    }
    let upper = raw.to_ascii_uppercase();

    if dialect == Dialect::PostgreSql {
        if let Some(base) = upper.strip_suffix("[]") {
            return format!("[]{}", map_type(dialect, base));
        }
    }

    if let Some(go) = longest_prefix(dialect.table(), &upper) {
        return go.to_string();
    }

    if dialect == Dialect::Sqlite {
        let by_affinity = SQLITE_AFFINITY
            .iter()
            .find(|(needles, _)| needles.iter().any(|n| upper.contains(n)))
            .map(|(_, go)| *go);
        if let Some(go) = by_affinity {
            return go.to_string();
        }
    }

    tracing::trace!(dialect = %dialect, source_type = raw, "unmapped type, falling back to string");
    GO_STRING.to_string()
}

/// JSON kind (`string`, `int`, `float`, `boolean`, `null`) → Go type.
pub fn map_json_kind(kind: &str) -> &'static str {
    JSON.iter()
        .find(|(k, _)| *k == kind)
        .map(|(_, go)| *go)
        .unwrap_or(GO_ANY)
}

fn longest_prefix(table: &'static [(&'static str, &'static str)], upper: &str) -> Option<&'static str> {
    table
        .iter()
        .filter(|(key, _)| upper.starts_with(key))
        .max_by_key(|(key, _)| key.len())
        .map(|(_, go)| *go)
}

// ------------------------------- Tests ------------------------------------ //
