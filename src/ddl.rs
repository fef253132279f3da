//! `CREATE TABLE` field extraction shared by the three SQL dialects.
//!
//! Not a SQL grammar. The pipeline is:
//! 1. table name via a dialect-specific `CREATE TABLE [IF NOT EXISTS] <ident>` regex
//! 2. greedy outermost `( ... )` body
//! 3. split into candidate lines on `,` + newline; a candidate that still holds commas at
//!    parenthesis depth 0 (a single-line statement) is split again on those
//! 4. drop table-level constraint lines, match `<ident> <type>[(params)] <rest>` on the
//!    remainder, silently skipping anything that does not fit
//!
//! Each dialect contributes only a [`DialectSpec`]; see the submodules.
pub mod mysql;
pub mod postgres;
pub mod sqlite;

use once_cell::sync::Lazy;
use regex::Regex;

use crate::ir::{Field, ParsedSchema};
use crate::naming::to_camel;
use crate::typemap::{map_type, Dialect};

pub const ERR_TABLE_NAME: &str = "cannot parse table name";
pub const ERR_FIELD_BODY: &str = "cannot parse field definitions";

// ------------------------------ Descriptor -------------------------------- //

/// Where a column's trailing comment comes from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CommentRule {
    /// Quoted `COMMENT '...'` payload in the rest; the column name when absent.
    Inline,
    /// Always the column name.
    SourceName,
}

/// Per-dialect lexical details consumed by [`parse_with`].
#[derive(Debug)]
pub struct DialectSpec {
    pub dialect: Dialect,
    /// Capture 1 = bare table name.
    pub table_name: Regex,
    /// Anchored at line start; matching lines are table-level constraints.
    pub constraint: Regex,
    /// Captures: 1 = column name, 2 = type token, 3 = rest.
    pub column: Regex,
    pub comment: CommentRule,
    /// Searched in the rest.
    pub primary_key: Regex,
    /// Searched in the type token.
    pub auto_increment_type: Option<Regex>,
    /// Searched in the rest.
    pub auto_increment_rest: Option<Regex>,
}

/// Matches `<rest>` for NOT NULL across dialects.
static NOT_NULL: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?i)NOT\s+NULL").unwrap());

static INLINE_COMMENT: Lazy<Regex> = Lazy::new(|| Regex::new(r#"(?i)COMMENT\s+['"](.*?)['"]"#).unwrap());

static BODY: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?s)\((.+)\)").unwrap());

static LINE_SPLIT: Lazy<Regex> = Lazy::new(|| Regex::new(r",\s*\n").unwrap());

// ------------------------------- Parsing ---------------------------------- //

/// Parse one `CREATE TABLE` statement. Never fails outright: structural problems
/// land in `ParsedSchema::error`.
pub fn parse_with(spec: &DialectSpec, ddl: &str) -> ParsedSchema {
    let Some(header) = spec.table_name.captures(ddl) else {
        return ParsedSchema::failed(ERR_TABLE_NAME);
    };
    let Some(table_name) = header.get(1) else {
        return ParsedSchema::failed(ERR_TABLE_NAME);
    };
    // the body follows the table name; earlier parentheses are not part of it
    let after_name = &ddl[header.get(0).map_or(table_name.end(), |m| m.end())..];
    let Some(body) = BODY.captures(after_name).and_then(|c| c.get(1)) else {
        return ParsedSchema::failed(ERR_FIELD_BODY);
    };

    let body = strip_line_comments(body.as_str());
    let mut fields = Vec::new();
    for line in split_lines(&body) {
        if spec.constraint.is_match(line) {
            tracing::debug!(dialect = %spec.dialect, line, "skipping table constraint");
            continue;
        }
        match parse_column(spec, line) {
            Some(field) => fields.push(field),
            None => tracing::debug!(dialect = %spec.dialect, line, "skipping unrecognized line"),
        }
    }

    ParsedSchema {
        table_name: Some(table_name.as_str().to_string()),
        fields,
        ..ParsedSchema::default()
    }
}

fn parse_column(spec: &DialectSpec, line: &str) -> Option<Field> {
    let caps = spec.column.captures(line)?;
    let name = caps.get(1)?.as_str();
    let source_type = caps.get(2)?.as_str();
    let rest = caps.get(3).map_or("", |m| m.as_str());

    let comment = match spec.comment {
        CommentRule::Inline => INLINE_COMMENT
            .captures(rest)
            .and_then(|c| c.get(1))
            .map(|m| m.as_str())
            .filter(|c| !c.is_empty())
            .unwrap_or(name),
        CommentRule::SourceName => name,
    };

    let is_primary_key = spec.primary_key.is_match(rest);
    let is_auto_increment = spec.auto_increment_type.as_ref().is_some_and(|re| re.is_match(source_type))
        || spec.auto_increment_rest.as_ref().is_some_and(|re| re.is_match(rest));

    Some(Field {
        source_name: name.to_string(),
        target_name: to_camel(name),
        source_type: source_type.to_string(),
        target_type: map_type(spec.dialect, source_type),
        // a primary key is implicitly NOT NULL
        nullable: !is_primary_key && !NOT_NULL.is_match(rest),
        is_primary_key,
        is_auto_increment,
        comment: Some(comment.to_string()),
        serialized_name: name.to_string(),
        storage_column: Some(name.to_string()),
        nested: None,
    })
}

// ---------------------------- Line splitting ------------------------------ //

/// Split the body into trimmed, non-empty candidate lines.
pub fn split_lines(body: &str) -> Vec<&str> {
    LINE_SPLIT
        .split(body)
        .flat_map(split_top_level)
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .collect()
}

/// Split on commas at parenthesis depth 0 outside quotes.
fn split_top_level(chunk: &str) -> Vec<&str> {
    let mut out = Vec::new();
    let mut depth = 0i32;
    let mut quote: Option<char> = None;
    let mut start = 0;
    for (i, c) in chunk.char_indices() {
        match (quote, c) {
            (Some(q), c) if c == q => quote = None,
            (Some(_), _) => {}
            (None, '\'' | '"' | '`') => quote = Some(c),
            (None, '(') => depth += 1,
            (None, ')') => depth -= 1,
            (None, ',') if depth <= 0 => {
                out.push(&chunk[start..i]);
                start = i + 1;
            }
            _ => {}
        }
    }
    out.push(&chunk[start..]);
    out
}

/// Drop `-- ...` comments (outside quotes) up to, but not including, the newline.
fn strip_line_comments(body: &str) -> String {
    let mut out = String::with_capacity(body.len());
    let mut quote: Option<char> = None;
    let mut chars = body.chars().peekable();
    while let Some(c) = chars.next() {
        match quote {
            Some(q) => {
                if c == q {
                    quote = None;
                }
                out.push(c);
            }
            None if c == '-' && chars.peek() == Some(&'-') => {
                while chars.peek().is_some_and(|&n| n != '\n') {
                    chars.next();
                }
            }
            None => {
                if matches!(c, '\'' | '"' | '`') {
                    quote = Some(c);
                }
                out.push(c);
            }
        }
    }
    out
}

// ------------------------------- Tests ------------------------------------ //
