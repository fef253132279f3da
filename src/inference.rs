//! Single-document JSON structure inference.
//!
//! Walk one example document in key order, classify each value, and materialize a
//! `NestedType` for every object found along the way (objects directly under a key, or
//! the first element of an array). Policy:
//! - first element decides an array's element type; the rest is not inspected
//! - only a literal `null` marks a field nullable
//! - nested types are named after the camel-cased key (`<Key>Item` for array elements)
//!   and are never deduplicated or renamed, even when two branches produce the same name
//! - nested types are registered children-first

use serde_json::{Map, Value};

use crate::error::SchemaError;
use crate::ir::{Field, NestedType, ParsedSchema};
use crate::naming::to_camel;
use crate::typemap::{map_json_kind, GO_ANY};

pub const DEFAULT_STRUCT_NAME: &str = "Response";
pub const ERR_NOT_OBJECT: &str = "JSON must be an object";

// --------------------------------- Kinds ---------------------------------- //

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Kind {
    Null,
    Array,
    String,
    Boolean,
    Int,
    Float,
    Object,
}

impl Kind {
    pub fn name(self) -> &'static str {
        match self {
            Kind::Null => "null",
            Kind::Array => "array",
            Kind::String => "string",
            Kind::Boolean => "boolean",
            Kind::Int => "int",
            Kind::Float => "float",
            Kind::Object => "object",
        }
    }
}

pub fn kind_of(v: &Value) -> Kind {
    match v {
        Value::Null => Kind::Null,
        Value::Bool(_) => Kind::Boolean,
        Value::Number(n) => {
            // `1.0` has no fractional part, so it counts as an integer
            let integral = n.is_i64()
                || n.is_u64()
                || n.as_f64().is_some_and(|f| f.is_finite() && f.fract() == 0.0);
            if integral { Kind::Int } else { Kind::Float }
        }
        Value::String(_) => Kind::String,
        Value::Array(_) => Kind::Array,
        Value::Object(_) => Kind::Object,
    }
}

// -------------------------------- Observe --------------------------------- //

/// Infer a schema from `json_text`. Failures land in `ParsedSchema::error`.
pub fn parse(json_text: &str, struct_name: &str) -> ParsedSchema {
    let mut schema = ParsedSchema::from(try_parse(json_text, struct_name));
    schema.struct_name = Some(struct_name.to_string());
    schema
}

pub fn try_parse(json_text: &str, struct_name: &str) -> Result<ParsedSchema, SchemaError> {
    let value: Value = serde_json::from_str(json_text)?;
    let root = match &value {
        Value::Object(map) => map,
        // a list payload is described by its first record
        Value::Array(items) => match items.first() {
            Some(Value::Object(map)) => map,
            _ => return Err(SchemaError::Parse(ERR_NOT_OBJECT.to_string())),
        },
        _ => return Err(SchemaError::Parse(ERR_NOT_OBJECT.to_string())),
    };

    let mut walker = Walker::default();
    let fields = walker.object_fields(root);
    tracing::debug!(
        fields = fields.len(),
        nested = walker.nested.len(),
        "inferred JSON structure"
    );
    Ok(ParsedSchema {
        struct_name: Some(struct_name.to_string()),
        fields,
        nested_types: walker.nested,
        ..ParsedSchema::default()
    })
}

#[derive(Default)]
struct Walker {
    nested: Vec<NestedType>,
}

impl Walker {
    fn object_fields(&mut self, map: &Map<String, Value>) -> Vec<Field> {
        map.iter().map(|(key, value)| self.field(key, value)).collect()
    }

    fn field(&mut self, key: &str, value: &Value) -> Field {
        let target_name = to_camel(key);
        let (target_type, nested) = self.resolve(&target_name, value);
        Field {
            source_name: key.to_string(),
            target_name,
            source_type: kind_of(value).name().to_string(),
            target_type,
            nullable: value.is_null(),
            is_primary_key: false,
            is_auto_increment: false,
            comment: None,
            serialized_name: key.to_string(),
            storage_column: None,
            nested,
        }
    }

    /// Go type for `value`; `object_name` is what an object at this position is called.
    fn resolve(&mut self, object_name: &str, value: &Value) -> (String, Option<usize>) {
        match value {
            Value::Object(map) => {
                let index = self.register(object_name, map);
                (object_name.to_string(), Some(index))
            }
            Value::Array(items) => match items.first() {
                None => (format!("[]{GO_ANY}"), None),
                Some(first) => {
                    let (element, nested) = self.resolve(&format!("{object_name}Item"), first);
                    (format!("[]{element}"), nested)
                }
            },
            other => (map_json_kind(kind_of(other).name()).to_string(), None),
        }
    }

    fn register(&mut self, name: &str, map: &Map<String, Value>) -> usize {
        let fields = self.object_fields(map);
        self.nested.push(NestedType { name: name.to_string(), fields });
        self.nested.len() - 1
    }
}

// ------------------------------- Tests ------------------------------------ //

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn infer(v: Value) -> ParsedSchema {
        parse(&v.to_string(), DEFAULT_STRUCT_NAME)
    }

    fn types(fields: &[Field]) -> Vec<(&str, &str)> {
        fields.iter().map(|f| (f.target_name.as_str(), f.target_type.as_str())).collect()
    }

    #[test]
    fn reference_document() {
        let schema = infer(json!({
            "user_id": 1,
            "is_active": true,
            "tags": ["a", "b"],
            "meta": {"created_at": "2020"}
        }));
        assert!(schema.is_ok());
        assert_eq!(schema.struct_name.as_deref(), Some("Response"));
        assert_eq!(schema.table_name, None);
        assert_eq!(
            types(&schema.fields),
            [("UserId", "int"), ("IsActive", "bool"), ("Tags", "[]string"), ("Meta", "Meta")]
        );
        assert_eq!(schema.nested_types.len(), 1);
        assert_eq!(schema.nested_types[0].name, "Meta");
        assert_eq!(types(&schema.nested_types[0].fields), [("CreatedAt", "string")]);
        assert_eq!(schema.fields[3].nested, Some(0));

        for f in &schema.fields {
            assert!(!f.nullable && !f.is_primary_key && !f.is_auto_increment);
            assert_eq!(f.comment, None);
            assert_eq!(f.storage_column, None);
            assert_eq!(f.serialized_name, f.source_name);
        }
    }

    #[test]
    fn primitive_kinds() {
        let schema = infer(json!({
            "s": "x", "i": 3, "neg": -7, "f": 2.5, "whole": 1.0, "b": false, "n": null
        }));
        assert_eq!(
            types(&schema.fields),
            [("S", "string"), ("I", "int"), ("Neg", "int"), ("F", "float64"),
             ("Whole", "int"), ("B", "bool"), ("N", "interface{}")]
        );
        let source: Vec<_> = schema.fields.iter().map(|f| f.source_type.as_str()).collect();
        assert_eq!(source, ["string", "int", "int", "float", "int", "boolean", "null"]);
        assert!(schema.fields[6].nullable);
        assert!(!schema.fields[0].nullable);
    }

    #[test]
    fn arrays_follow_first_element() {
        let schema = infer(json!({
            "empty": [],
            "mixed": [1, "two"],
            "floats": [1.5],
            "nulls": [null],
            "grid": [[1, 2], [3]],
            "items": [{"sku": "a"}, {"other": 1}]
        }));
        assert_eq!(
            types(&schema.fields),
            [("Empty", "[]interface{}"), ("Mixed", "[]int"), ("Floats", "[]float64"),
             ("Nulls", "[]interface{}"), ("Grid", "[][]int"), ("Items", "[]ItemsItem")]
        );
        assert_eq!(schema.nested_types.len(), 1);
        assert_eq!(schema.nested_types[0].name, "ItemsItem");
        assert_eq!(types(&schema.nested_types[0].fields), [("Sku", "string")]);
        assert_eq!(schema.fields[5].nested, Some(0));
        assert_eq!(schema.fields[5].source_type, "array");
    }

    #[test]
    fn nested_types_register_children_first() {
        let schema = infer(json!({"outer": {"inner": {"leaf": true}}}));
        let names: Vec<_> = schema.nested_types.iter().map(|n| n.name.as_str()).collect();
        assert_eq!(names, ["Inner", "Outer"]);
        assert_eq!(schema.fields[0].nested, Some(1));
        assert_eq!(schema.nested_types[1].fields[0].nested, Some(0));
    }

    #[test]
    fn same_named_nested_objects_are_not_deduplicated() {
        let schema = infer(json!({
            "a": {"x": {"p": 1}},
            "b": {"x": {"q": "s"}}
        }));
        let names: Vec<_> = schema.nested_types.iter().map(|n| n.name.as_str()).collect();
        assert_eq!(names, ["X", "A", "X", "B"]);
        assert_eq!(types(&schema.nested_types[0].fields), [("P", "int")]);
        assert_eq!(types(&schema.nested_types[2].fields), [("Q", "string")]);
    }

    #[test]
    fn key_order_is_document_order() {
        let schema = parse(r#"{"zeta": 1, "alpha": 2, "mid": 3}"#, "Root");
        let names: Vec<_> = schema.fields.iter().map(|f| f.source_name.as_str()).collect();
        assert_eq!(names, ["zeta", "alpha", "mid"]);
        assert_eq!(schema.struct_name.as_deref(), Some("Root"));
    }

    #[test]
    fn top_level_list_uses_first_record() {
        let schema = infer(json!([{"id": 1}, {"id": 2, "extra": true}]));
        assert!(schema.is_ok());
        assert_eq!(types(&schema.fields), [("Id", "int")]);
    }

    #[test]
    fn empty_object_is_degenerate_not_error() {
        let schema = infer(json!({}));
        assert!(schema.is_ok());
        assert!(schema.fields.is_empty());
    }

    #[test]
    fn structural_failures() {
        let bad = parse("{\"a\": ", "Response");
        assert!(bad.error.is_some());
        assert!(bad.fields.is_empty());

        for text in ["42", "\"s\"", "null", "[]", "[1, 2]"] {
            let schema = parse(text, "Response");
            assert_eq!(schema.error.as_deref(), Some(ERR_NOT_OBJECT), "input {text}");
        }
    }
}
