use once_cell::sync::Lazy;
use regex::Regex;

use super::{parse_with, CommentRule, DialectSpec};
use crate::ir::ParsedSchema;
use crate::typemap::Dialect;

/// Double-quote quoting, `T[]` array types, `SERIAL`/identity auto-increment.
pub static SPEC: Lazy<DialectSpec> = Lazy::new(|| DialectSpec {
    dialect: Dialect::PostgreSql,
    table_name: Regex::new(r#"(?i)CREATE\s+TABLE\s+(?:IF\s+NOT\s+EXISTS\s+)?(?:"?\w+"?\.)?"?(\w+)"?"#).unwrap(),
    constraint: Regex::new(r"(?i)^(?:PRIMARY\s+KEY|UNIQUE|CHECK|CONSTRAINT|FOREIGN\s+KEY)\b").unwrap(),
    column: Regex::new(r#"(?is)^"?(\w+)"?\s+(\w+(?:\([^)]+\))?(?:\[\])?)\s*(.*)"#).unwrap(),
    comment: CommentRule::SourceName,
    primary_key: Regex::new(r"(?i)PRIMARY\s+KEY").unwrap(),
    auto_increment_type: Some(Regex::new(r"(?i)SERIAL").unwrap()),
    auto_increment_rest: Some(Regex::new(r"(?i)GENERATED\s+(?:ALWAYS|BY\s+DEFAULT)\s+AS\s+IDENTITY").unwrap()),
});

pub fn parse(ddl: &str) -> ParsedSchema {
    parse_with(&SPEC, ddl)
}

#[cfg(test)]
mod tests {
    use super::*;

    const DDL: &str = r#"CREATE TABLE IF NOT EXISTS public."accounts" (
    id BIGSERIAL PRIMARY KEY,
    external_id UUID NOT NULL,
    email VARCHAR(255) NOT NULL,
    tags TEXT[],
    scores INTEGER[] NOT NULL,
    profile JSONB,
    balance NUMERIC(12,2),
    is_active BOOLEAN NOT NULL DEFAULT TRUE,
    created_at TIMESTAMPTZ NOT NULL DEFAULT now(),
    avatar BYTEA,
    seq INTEGER GENERATED ALWAYS AS IDENTITY,
    CONSTRAINT accounts_email_key UNIQUE (email),
    CHECK (balance >= 0)
);"#;

    #[test]
    fn full_table() {
        let schema = parse(DDL);
        assert!(schema.is_ok());
        assert_eq!(schema.table_name.as_deref(), Some("accounts"));

        let types: Vec<_> = schema.fields.iter().map(|f| (f.source_name.as_str(), f.target_type.as_str())).collect();
        assert_eq!(types, [
            ("id", "int64"),
            ("external_id", "string"),
            ("email", "string"),
            ("tags", "[]string"),
            ("scores", "[]int64"),
            ("profile", "json.RawMessage"),
            ("balance", "float64"),
            ("is_active", "bool"),
            ("created_at", "time.Time"),
            ("avatar", "[]byte"),
            ("seq", "int64"),
        ]);
    }

    #[test]
    fn flags_and_comments() {
        let schema = parse(DDL);
        let id = &schema.fields[0];
        assert!(id.is_primary_key && id.is_auto_increment);
        assert_eq!(id.source_type, "BIGSERIAL");
        assert_eq!(id.comment.as_deref(), Some("id"));

        let tags = &schema.fields[3];
        assert_eq!(tags.source_type, "TEXT[]");
        assert!(tags.nullable);
        assert!(!tags.is_auto_increment);

        let seq = schema.fields.iter().find(|f| f.source_name == "seq").unwrap();
        assert!(seq.is_auto_increment);
        assert!(!seq.is_primary_key);
    }

    #[test]
    fn quoted_table_name_is_unquoted() {
        let schema = parse("CREATE TABLE \"Users\" (\n  \"id\" INT NOT NULL\n)");
        assert_eq!(schema.table_name.as_deref(), Some("Users"));
        assert_eq!(schema.fields[0].source_name, "id");
        assert!(!schema.fields[0].nullable);
    }
}
