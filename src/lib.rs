//! Schema text → Go struct declarations.
//!
//! `CREATE TABLE` statements (MySQL, PostgreSQL, SQLite) or an example JSON document go
//! in; an aligned Go struct with `json`/`gorm` tags comes out. Every stage is a pure
//! function over strings:
//!
//! ```text
//! text ─ detect ─▶ ddl::{mysql,postgres,sqlite} | inference ─▶ ParsedSchema ─▶ codegen ─▶ Go
//! ```
pub mod cli;
pub mod codegen;
pub mod ddl;
pub mod detect;
pub mod error;
pub mod export;
pub mod inference;
pub mod ir;
pub mod naming;
pub mod settings;
pub mod typemap;

pub use codegen::{generate, GenerateOptions};
pub use detect::detect;
pub use error::SchemaError;
pub use export::{generate_file, required_imports, GeneratedFile};
pub use ir::{Field, NestedType, ParsedSchema};
pub use settings::Settings;
pub use typemap::{Detected, Dialect};

/// Run the parser for `dialect`. `default_struct_name` only applies to JSON.
pub fn parse(text: &str, dialect: Dialect, default_struct_name: &str) -> ParsedSchema {
    match dialect {
        Dialect::MySql => ddl::mysql::parse(text),
        Dialect::PostgreSql => ddl::postgres::parse(text),
        Dialect::Sqlite => ddl::sqlite::parse(text),
        Dialect::Json => inference::parse(text, default_struct_name),
    }
}

/// Result of a full text → Go conversion.
#[derive(Debug, Clone)]
pub struct Conversion {
    pub dialect: Dialect,
    pub schema: ParsedSchema,
    /// Declarations only (what goes to the clipboard).
    pub code: String,
    pub imports: Vec<&'static str>,
}

impl Conversion {
    /// Full Go file (package header + imports + declarations) and its file name.
    pub fn file(&self, options: &GenerateOptions) -> GeneratedFile {
        generate_file(&self.schema, options)
    }
}

/// Detect (unless `dialect` is given), parse, and generate.
pub fn convert(text: &str, dialect: Option<Dialect>, options: &GenerateOptions) -> Result<Conversion, SchemaError> {
    let dialect = match dialect {
        Some(d) => d,
        None => detect(text).dialect().ok_or(SchemaError::UnknownInput)?,
    };
    let default_name = options
        .struct_name
        .as_deref()
        .filter(|s| !s.trim().is_empty())
        .unwrap_or(inference::DEFAULT_STRUCT_NAME);

    let schema = parse(text, dialect, default_name).into_result()?;
    tracing::info!(
        %dialect,
        table = schema.table_name.as_deref().unwrap_or("-"),
        fields = schema.fields.len(),
        "parsed schema"
    );
    let code = generate(&schema, options);
    let imports = required_imports(&schema);
    Ok(Conversion { dialect, schema, code, imports })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn convert_detects_and_generates() {
        let ddl = "CREATE TABLE users (id INT AUTO_INCREMENT PRIMARY KEY, name VARCHAR(50) NOT NULL COMMENT '姓名')";
        let out = convert(ddl, None, &GenerateOptions::default()).unwrap();
        assert_eq!(out.dialect, Dialect::MySql);
        assert_eq!(out.schema.fields.len(), 2);
        assert!(out.code.contains("type Users struct {"));
        assert!(out.imports.is_empty());
        assert_eq!(out.file(&GenerateOptions::default()).file_name, "users.go");
    }

    #[test]
    fn explicit_dialect_skips_detection() {
        let ddl = "CREATE TABLE t (\n  id INTEGER PRIMARY KEY AUTOINCREMENT,\n  d DATETIME\n)";
        let out = convert(ddl, Some(Dialect::MySql), &GenerateOptions::default()).unwrap();
        assert_eq!(out.dialect, Dialect::MySql);
        assert_eq!(out.schema.fields[1].target_type, "time.Time");

        let out = convert(ddl, None, &GenerateOptions::default()).unwrap();
        assert_eq!(out.dialect, Dialect::Sqlite);
        assert_eq!(out.schema.fields[1].target_type, "string");
    }

    #[test]
    fn json_struct_name_comes_from_options() {
        let options = GenerateOptions { struct_name: Some("Payload".into()), ..GenerateOptions::default() };
        let out = convert(r#"{"created": "2020", "raw": null}"#, None, &options).unwrap();
        assert_eq!(out.dialect, Dialect::Json);
        assert_eq!(out.schema.struct_name.as_deref(), Some("Payload"));
        assert!(out.code.starts_with("// Payload JSON payload\ntype Payload struct {\n"));
    }

    #[test]
    fn errors_stop_the_pipeline() {
        let err = convert("hello world", None, &GenerateOptions::default()).unwrap_err();
        assert!(matches!(err, SchemaError::UnknownInput));

        let err = convert("CREATE TABLE users", None, &GenerateOptions::default()).unwrap_err();
        assert_eq!(err.to_string(), "cannot parse field definitions");

        let err = convert("[1, 2]", Some(Dialect::Json), &GenerateOptions::default()).unwrap_err();
        assert_eq!(err.to_string(), "JSON must be an object");
    }

    #[test]
    fn conversions_are_independent() {
        let text = r#"{"a": {"b": 1}}"#;
        let first = convert(text, None, &GenerateOptions::default()).unwrap();
        let second = convert(text, None, &GenerateOptions::default()).unwrap();
        assert_eq!(first.code, second.code);
        assert_eq!(first.schema, second.schema);
    }
}
