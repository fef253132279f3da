//! Go source file assembly: package header, import block, file naming.

use indexmap::IndexSet;
use once_cell::sync::Lazy;
use regex::Regex;

use crate::codegen::{generate, type_name_for, GenerateOptions};
use crate::ir::ParsedSchema;
use crate::naming::to_snake;
use crate::typemap::{GO_RAW_JSON, GO_TIME};

pub const FILE_EXTENSION: &str = "go";

/// Host type → import path it needs.
const IMPORTS: &[(&str, &str)] = &[(GO_TIME, "time"), (GO_RAW_JSON, "encoding/json")];

static EXTRA_BLANK_LINES: Lazy<Regex> = Lazy::new(|| Regex::new(r"\n{3,}").unwrap());

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratedFile {
    pub file_name: String,
    pub contents: String,
}

/// Imports needed by the final field types, each once, in first-encountered order.
pub fn required_imports(schema: &ParsedSchema) -> Vec<&'static str> {
    let types = schema
        .fields
        .iter()
        .chain(schema.nested_types.iter().flat_map(|n| n.fields.iter()))
        .map(|f| f.target_type.as_str());

    let mut found = IndexSet::new();
    for ty in types {
        for (host, import) in IMPORTS {
            if ty.contains(*host) {
                found.insert(*import);
            }
        }
    }
    found.into_iter().collect()
}

pub fn format_imports(imports: &[&str]) -> String {
    match imports {
        [] => String::new(),
        [single] => format!("import \"{single}\"\n\n"),
        many => {
            let mut out = String::from("import (\n");
            for import in many {
                out.push_str(&format!("\t\"{import}\"\n"));
            }
            out.push_str(")\n\n");
            out
        }
    }
}

/// `UserAccount` → `user_account.go`.
pub fn file_name_for(type_name: &str) -> String {
    format!("{}.{FILE_EXTENSION}", to_snake(type_name))
}

/// Collapse runs of blank lines to a single one.
pub fn cleanup(code: &str) -> String {
    EXTRA_BLANK_LINES.replace_all(code, "\n\n").into_owned()
}

/// Complete, compilable Go file for `schema`.
pub fn generate_file(schema: &ParsedSchema, options: &GenerateOptions) -> GeneratedFile {
    let type_name = type_name_for(schema, options);
    let mut contents = format!("package {}\n\n", options.package_name);
    contents.push_str(&format_imports(&required_imports(schema)));
    contents.push_str(&generate(schema, options));
    GeneratedFile {
        file_name: file_name_for(&type_name),
        contents: cleanup(&contents),
    }
}

// ------------------------------- Tests ------------------------------------ //
