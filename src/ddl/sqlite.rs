use once_cell::sync::Lazy;
use regex::Regex;

use super::{parse_with, CommentRule, DialectSpec};
use crate::ir::ParsedSchema;
use crate::typemap::Dialect;

/// Single/double/backtick/bracket quoting, bare type names (no parameters), `AUTOINCREMENT`.
pub static SPEC: Lazy<DialectSpec> = Lazy::new(|| DialectSpec {
    dialect: Dialect::Sqlite,
    table_name: Regex::new(r#"(?i)CREATE\s+TABLE\s+(?:IF\s+NOT\s+EXISTS\s+)?(?:['"`\[]?\w+['"`\]]?\.)?['"`\[]?(\w+)['"`\]]?"#).unwrap(),
    constraint: Regex::new(r"(?i)^(?:PRIMARY\s+KEY|UNIQUE|CHECK|CONSTRAINT|FOREIGN\s+KEY)\b").unwrap(),
    column: Regex::new(r#"(?is)^['"`\[]?(\w+)['"`\]]?\s+(\w+)\s*(.*)"#).unwrap(),
    comment: CommentRule::SourceName,
    primary_key: Regex::new(r"(?i)PRIMARY\s+KEY").unwrap(),
    auto_increment_type: None,
    auto_increment_rest: Some(Regex::new(r"(?i)\bAUTOINCREMENT\b").unwrap()),
});

pub fn parse(ddl: &str) -> ParsedSchema {
    parse_with(&SPEC, ddl)
}
