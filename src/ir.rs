// Normalized schema records shared by every parser and the generator. No serde_json::Value here.

use crate::error::SchemaError;

/// Output of any DDL parser or the JSON inferencer.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ParsedSchema {
    pub table_name: Option<String>,     // DDL only
    pub struct_name: Option<String>,    // JSON only (caller-supplied default)
    pub fields: Vec<Field>,             // source order, never re-sorted
    pub nested_types: Vec<NestedType>,  // JSON only, post-order
    pub error: Option<String>,          // set ⇒ `fields` is not trustworthy
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Field {
    pub source_name: String,
    pub target_name: String,
    pub source_type: String,
    pub target_type: String,
    pub nullable: bool,
    pub is_primary_key: bool,
    pub is_auto_increment: bool,
    pub comment: Option<String>,
    pub serialized_name: String,
    /// `None` for JSON-derived fields: they carry no persistence tag.
    pub storage_column: Option<String>,
    /// Index into `ParsedSchema::nested_types` when `target_type` refers to a nested type.
    pub nested: Option<usize>,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct NestedType {
    pub name: String,
    pub fields: Vec<Field>,
}

impl ParsedSchema {
    pub fn failed(message: impl Into<String>) -> Self {
        Self { error: Some(message.into()), ..Self::default() }
    }

    pub fn is_ok(&self) -> bool {
        self.error.is_none()
    }

    /// Surface a structural failure as an error before anything consumes `fields`.
    pub fn check(&self) -> Result<&Self, SchemaError> {
        match &self.error {
            Some(message) => Err(SchemaError::Parse(message.clone())),
            None => Ok(self),
        }
    }

    pub fn into_result(self) -> Result<Self, SchemaError> {
        match self.error {
            Some(message) => Err(SchemaError::Parse(message)),
            None => Ok(self),
        }
    }
}

impl From<Result<ParsedSchema, SchemaError>> for ParsedSchema {
    fn from(result: Result<ParsedSchema, SchemaError>) -> Self {
        match result {
            Ok(schema) => schema,
            Err(error) => ParsedSchema::failed(error.message()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn failed_schema_reports_through_check() {
        let schema = ParsedSchema::failed("cannot parse table name");
        assert!(!schema.is_ok());
        assert!(schema.fields.is_empty());
        let err = schema.check().unwrap_err();
        assert_eq!(err.to_string(), "cannot parse table name");
    }

    #[test]
    fn parse_error_result_collapses_into_error_field() {
        let schema: ParsedSchema = Err(SchemaError::Parse("cannot parse field definitions".into())).into();
        assert_eq!(schema.error.as_deref(), Some("cannot parse field definitions"));
        assert!(schema.into_result().is_err());
    }
}
