//! Persisted generation preferences.
//!
//! Stored as camelCase JSON. Missing keys take the defaults (`packageName = "model"`,
//! `emitStorageAccessor = true`, `inlineNestedTypes = true`).

use std::path::Path;

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

use crate::codegen::GenerateOptions;
use crate::error::SchemaError;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Settings {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub struct_name: Option<String>,
    pub package_name: String,
    pub emit_storage_accessor: bool,
    pub inline_nested_types: bool,
}

impl Default for Settings {
    fn default() -> Self {
        let defaults = GenerateOptions::default();
        Self {
            struct_name: defaults.struct_name,
            package_name: defaults.package_name,
            emit_storage_accessor: defaults.emit_storage_accessor,
            inline_nested_types: defaults.inline_nested_types,
        }
    }
}

impl From<Settings> for GenerateOptions {
    fn from(s: Settings) -> Self {
        Self {
            struct_name: s.struct_name.filter(|n| !n.trim().is_empty()),
            package_name: s.package_name,
            emit_storage_accessor: s.emit_storage_accessor,
            inline_nested_types: s.inline_nested_types,
        }
    }
}

impl Settings {
    pub fn from_json(src: &str) -> Result<Self, String> {
        from_str_with_path(src)
    }

    pub fn load(path: &Path) -> Result<Self, SchemaError> {
        let src = std::fs::read_to_string(path)?;
        let settings = Self::from_json(&src).map_err(|message| settings_error(path, message))?;
        tracing::debug!(path = %path.display(), ?settings, "loaded settings");
        Ok(settings)
    }

    pub fn save(&self, path: &Path) -> Result<(), SchemaError> {
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent)?;
        }
        let src = serde_json::to_string_pretty(self).map_err(|e| settings_error(path, e))?;
        std::fs::write(path, src)?;
        Ok(())
    }
}

fn settings_error(path: &Path, message: impl ToString) -> SchemaError {
    SchemaError::Settings { path: path.to_path_buf(), message: message.to_string() }
}

/// Deserialize with JSON-path context in error messages.
fn from_str_with_path<T: DeserializeOwned>(src: &str) -> Result<T, String> {
    let de = &mut serde_json::Deserializer::from_str(src);
    match serde_path_to_error::deserialize::<_, T>(de) {
        Ok(v) => Ok(v),
        Err(err) => {
            let path = err.path().to_string();
            Err(format!("at JSON path {path} → {}", err.into_inner()))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_fill_missing_keys() {
        let s = Settings::from_json("{}").unwrap();
        assert_eq!(s, Settings::default());
        assert_eq!(s.package_name, "model");
        assert!(s.emit_storage_accessor && s.inline_nested_types);
        assert_eq!(s.struct_name, None);
    }

    #[test]
    fn camel_case_keys() {
        let s = Settings::from_json(r#"{"structName": "Order", "packageName": "db", "inlineNestedTypes": false}"#).unwrap();
        assert_eq!(s.struct_name.as_deref(), Some("Order"));
        assert_eq!(s.package_name, "db");
        assert!(s.emit_storage_accessor);
        assert!(!s.inline_nested_types);

        let options = GenerateOptions::from(s);
        assert_eq!(options.struct_name.as_deref(), Some("Order"));
        assert!(!options.inline_nested_types);
    }

    #[test]
    fn blank_struct_name_means_none() {
        let s = Settings { struct_name: Some("  ".into()), ..Settings::default() };
        assert_eq!(GenerateOptions::from(s).struct_name, None);
    }

    #[test]
    fn type_errors_name_the_key() {
        let err = Settings::from_json(r#"{"emitStorageAccessor": "yes"}"#).unwrap_err();
        assert!(err.contains("emitStorageAccessor"), "{err}");
    }

    #[test]
    fn save_then_load() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("prefs/settings.json");
        let s = Settings { package_name: "entity".into(), emit_storage_accessor: false, ..Settings::default() };
        s.save(&path).unwrap();
        assert_eq!(Settings::load(&path).unwrap(), s);

        std::fs::write(&path, "{ nope").unwrap();
        assert!(matches!(Settings::load(&path), Err(SchemaError::Settings { .. })));
    }

    #[test]
    fn encoding_errors_are_settings_errors() {
        let path = Path::new("prefs/settings.json");
        let cause = serde_json::from_str::<u8>("\"x\"").unwrap_err();
        let err = settings_error(path, cause);
        assert!(matches!(&err, SchemaError::Settings { path: p, .. } if p == path));
        assert!(err.to_string().starts_with("invalid settings file prefs/settings.json: "), "{err}");
    }
}
