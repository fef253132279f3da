//! Go struct rendering with column-aligned `json`/`gorm` tags.
//!
//! Per block (the top-level struct, each inline struct, each separate nested struct) the
//! name, type and tag columns are padded to that block's widest entry. Multi-line types
//! (inline structs) do not take part in the type-width computation; their tag follows the
//! closing brace after one space, the way gofmt breaks alignment around multi-line cells.

use crate::inference::DEFAULT_STRUCT_NAME;
use crate::ir::{Field, NestedType, ParsedSchema};
use crate::naming::to_camel;

const INDENT: usize = 4;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GenerateOptions {
    /// Explicit type name; wins over the schema's own name.
    pub struct_name: Option<String>,
    pub package_name: String,
    /// Emit `func (T) TableName() string` when the schema has a table name.
    pub emit_storage_accessor: bool,
    /// Render nested JSON objects as anonymous structs in the parent's type slot.
    pub inline_nested_types: bool,
}

impl Default for GenerateOptions {
    fn default() -> Self {
        Self {
            struct_name: None,
            package_name: "model".to_string(),
            emit_storage_accessor: true,
            inline_nested_types: true,
        }
    }
}

/// Resolve the Go type name: explicit option, then the schema's struct name, then the
/// camel-cased table name.
pub fn type_name_for(schema: &ParsedSchema, options: &GenerateOptions) -> String {
    let explicit = options.struct_name.as_deref().map(str::trim).filter(|s| !s.is_empty());
    if let Some(name) = explicit {
        return name.to_string();
    }
    if let Some(name) = schema.struct_name.as_deref().filter(|s| !s.is_empty()) {
        return name.to_string();
    }
    match schema.table_name.as_deref() {
        Some(table) => to_camel(table),
        None => DEFAULT_STRUCT_NAME.to_string(),
    }
}

/// Render the declarations (no package header, no imports) for `schema`.
pub fn generate(schema: &ParsedSchema, options: &GenerateOptions) -> String {
    let mut cg = Codegen::new(options);
    cg.emit(schema);
    cg.into_string()
}

// ————————————————————————————————————————————————————————————————————————————
// CODEGEN
// ————————————————————————————————————————————————————————————————————————————

pub struct Codegen<'a> {
    options: &'a GenerateOptions,
    out: String,
}

/// One field line before alignment.
struct Row {
    name: String,
    ty: String,
    tag: String,
    comment: Option<String>,
}

impl<'a> Codegen<'a> {
    pub fn new(options: &'a GenerateOptions) -> Self {
        Self { options, out: String::new() }
    }

    pub fn emit(&mut self, schema: &ParsedSchema) {
        let name = type_name_for(schema, self.options);
        let inline = self.options.inline_nested_types && !schema.nested_types.is_empty();

        match schema.table_name.as_deref() {
            Some(table) => self.out.push_str(&format!("// {name} {table} table\n")),
            None => self.out.push_str(&format!("// {name} JSON payload\n")),
        }
        self.out.push_str(&format!("type {name} struct {{\n"));
        let rows = schema
            .fields
            .iter()
            .map(|f| Row {
                name: f.target_name.clone(),
                ty: self.field_type(f, &schema.nested_types, inline, 1),
                tag: storage_tag(f),
                comment: f.comment.clone(),
            })
            .collect::<Vec<_>>();
        self.out.push_str(&render_rows(&rows, INDENT));
        self.out.push_str("}\n");

        if self.options.emit_storage_accessor {
            if let Some(table) = schema.table_name.as_deref() {
                self.out.push_str("\n// TableName returns the table name\n");
                self.out.push_str(&format!("func ({name}) TableName() string {{\n"));
                self.out.push_str(&format!("    return \"{table}\"\n"));
                self.out.push_str("}\n");
            }
        }

        if !inline {
            for nested in &schema.nested_types {
                self.out.push('\n');
                self.emit_nested(nested);
            }
        }
    }

    fn emit_nested(&mut self, nested: &NestedType) {
        self.out.push_str(&format!("// {} nested struct\n", nested.name));
        self.out.push_str(&format!("type {} struct {{\n", nested.name));
        let rows = nested.fields.iter().map(serialization_row).collect::<Vec<_>>();
        self.out.push_str(&render_rows(&rows, INDENT));
        self.out.push_str("}\n");
    }

    /// The field's type as rendered at `depth` (1 = top-level struct body).
    fn field_type(&self, field: &Field, nested_types: &[NestedType], inline: bool, depth: usize) -> String {
        let nested = match field.nested.and_then(|i| nested_types.get(i)) {
            Some(nested) if inline => nested,
            _ => return field.target_type.clone(),
        };
        // keep the `[]` wrappers of array-of-object fields
        let prefix = field.target_type.strip_suffix(nested.name.as_str()).unwrap_or("");
        let rows = nested
            .fields
            .iter()
            .map(|f| Row {
                ty: self.field_type(f, nested_types, inline, depth + 1),
                ..serialization_row(f)
            })
            .collect::<Vec<_>>();
        format!(
            "{prefix}struct {{\n{}{:width$}}}",
            render_rows(&rows, (depth + 1) * INDENT),
            "",
            width = depth * INDENT,
        )
    }

    pub fn into_string(self) -> String {
        crate::export::cleanup(&self.out)
    }
}

// ————————————————————————————————————————————————————————————————————————————
// TAGS & ALIGNMENT
// ————————————————————————————————————————————————————————————————————————————

/// `json:"<name>"` plus, for fields with a storage column, the gorm persistence tag.
pub fn storage_tag(field: &Field) -> String {
    let json = format!("json:\"{}\"", field.serialized_name);
    let Some(column) = field.storage_column.as_deref() else {
        return format!("`{json}`");
    };
    let mut gorm = vec![format!("column:{column}")];
    if field.is_primary_key {
        gorm.push("primaryKey".to_string());
    }
    if field.is_auto_increment {
        gorm.push("autoIncrement".to_string());
    }
    if !field.nullable {
        gorm.push("not null".to_string());
    }
    format!("`{json} gorm:\"{}\"`", gorm.join(";"))
}

fn serialization_row(field: &Field) -> Row {
    Row {
        name: field.target_name.clone(),
        ty: field.target_type.clone(),
        tag: format!("`json:\"{}\"`", field.serialized_name),
        comment: field.comment.clone(),
    }
}

fn render_rows(rows: &[Row], indent: usize) -> String {
    let width = |s: &str| s.chars().count();
    let name_w = rows.iter().map(|r| width(&r.name)).max().unwrap_or(0);
    let type_w = rows
        .iter()
        .filter(|r| !r.ty.contains('\n'))
        .map(|r| width(&r.ty))
        .max()
        .unwrap_or(0);
    let tag_w = rows.iter().map(|r| width(&r.tag)).max().unwrap_or(0);

    let mut out = String::new();
    for row in rows {
        let ty = if row.ty.contains('\n') {
            row.ty.clone()
        } else {
            format!("{:type_w$}", row.ty)
        };
        let comment = row.comment.as_deref().map(|c| format!(" // {c}")).unwrap_or_default();
        let line = format!(
            "{:indent$}{:name_w$} {ty} {:tag_w$}{comment}",
            "", row.name, row.tag
        );
        out.push_str(line.trim_end());
        out.push('\n');
    }
    out
}

// ------------------------------- Tests ------------------------------------ //
