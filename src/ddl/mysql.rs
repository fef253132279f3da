use once_cell::sync::Lazy;
use regex::Regex;

use super::{parse_with, CommentRule, DialectSpec};
use crate::ir::ParsedSchema;
use crate::typemap::Dialect;

/// Backtick quoting, inline `COMMENT '...'`, and `AUTO_INCREMENT` implying a primary key.
pub static SPEC: Lazy<DialectSpec> = Lazy::new(|| DialectSpec {
    dialect: Dialect::MySql,
    table_name: Regex::new(r"(?i)CREATE\s+TABLE\s+(?:IF\s+NOT\s+EXISTS\s+)?(?:`?\w+`?\.)?`?(\w+)`?").unwrap(),
    constraint: Regex::new(r"(?i)^(?:PRIMARY\s+KEY|KEY|UNIQUE|INDEX|FULLTEXT|SPATIAL|CONSTRAINT|FOREIGN\s+KEY)\b").unwrap(),
    column: Regex::new(r"(?is)^`?(\w+)`?\s+(\w+(?:\([^)]+\))?)\s*(.*)").unwrap(),
    comment: CommentRule::Inline,
    primary_key: Regex::new(r"(?i)PRIMARY\s+KEY|AUTO_INCREMENT").unwrap(),
    auto_increment_type: None,
    auto_increment_rest: Some(Regex::new(r"(?i)AUTO_INCREMENT").unwrap()),
});

pub fn parse(ddl: &str) -> ParsedSchema {
    parse_with(&SPEC, ddl)
}
