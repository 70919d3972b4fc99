//! Formatter configuration files
//!
//! Configuration is read from `reweave.toml`, `.reweaverc.json` or
//! `.reweaverc.yaml`, discovered by walking up from the working directory.
//! Every setting is optional; unset values keep whatever the source unit's
//! styles (or the IntelliJ defaults) say.
//!
//! ```toml
//! [formatter]
//! indentSize = 2
//! useTabCharacter = false
//!
//! [formatter.spaces]
//! afterComma = true
//! ```

use std::fs;
use std::path::{Path, PathBuf};

use reweave_core::{Result, ReweaveError};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::style::Styles;

/// Config file names, highest priority first
pub const CONFIG_FILE_NAMES: [&str; 4] = ["reweave.toml", ".reweaverc.json", ".reweaverc.yaml", ".reweaverc.yml"];

/// Top-level configuration file
#[derive(Debug, Clone, Default, Serialize, Deserialize, JsonSchema, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ReweaveConfiguration {
    #[serde(rename = "$schema", skip_serializing_if = "Option::is_none")]
    pub schema: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub formatter: Option<FormatterConfiguration>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub files: Option<FilesConfiguration>,
}

impl ReweaveConfiguration {
    pub fn formatter_config(&self) -> FormatterConfiguration {
        self.formatter.clone().unwrap_or_default()
    }

    pub fn files_config(&self) -> FilesConfiguration {
        self.files.clone().unwrap_or_default()
    }

    /// JSON schema of the configuration file
    pub fn json_schema() -> Result<String> {
        let schema = schemars::schema_for!(ReweaveConfiguration);
        serde_json::to_string_pretty(&schema)
            .map_err(|e| ReweaveError::internal_error(format!("Failed to render schema: {e}")))
    }

    /// A starter configuration holding the IntelliJ defaults
    pub fn starter() -> Self {
        Self {
            schema: None,
            formatter: Some(FormatterConfiguration::from_styles(&Styles::intellij())),
            files: Some(FilesConfiguration {
                include: Some(vec!["**/*.java".to_string()]),
                exclude: Some(vec!["target/**".to_string(), "build/**".to_string()]),
            }),
        }
    }

    pub fn to_toml(&self) -> Result<String> {
        toml::to_string_pretty(self)
            .map_err(|e| ReweaveError::config_error(format!("Failed to serialize configuration: {e}")))
    }
}

/// Which files the CLI formats
#[derive(Debug, Clone, Default, Serialize, Deserialize, JsonSchema, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct FilesConfiguration {
    #[schemars(description = "Glob patterns for files to include")]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub include: Option<Vec<String>>,

    #[schemars(description = "Glob patterns for files to exclude")]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub exclude: Option<Vec<String>>,
}

/// Formatter overrides
#[derive(Debug, Clone, Default, Serialize, Deserialize, JsonSchema, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct FormatterConfiguration {
    #[schemars(description = "Number of columns per indentation level")]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub indent_size: Option<usize>,

    #[schemars(description = "Number of columns a tab character spans")]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tab_size: Option<usize>,

    #[schemars(description = "Columns added for wrapped expressions and arguments")]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub continuation_indent: Option<usize>,

    #[schemars(description = "Indent with tabs instead of spaces")]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub use_tab_character: Option<bool>,

    #[schemars(description = "Align wrapped declaration parameters with the first one")]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub align_multiline_parameters: Option<bool>,

    #[schemars(description = "Align wrapped call arguments with the first one")]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub align_multiline_arguments: Option<bool>,

    #[schemars(description = "Use the continuation indent for wrapped collection elements")]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub use_continuation_indent_for_collections: Option<bool>,

    #[schemars(description = "Keep indentation on lines that are otherwise empty")]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub keep_indents_on_empty_lines: Option<bool>,

    #[schemars(description = "Write \\r\\n line breaks instead of \\n")]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub use_crlf_new_lines: Option<bool>,

    #[schemars(description = "Maximum number of consecutive blank lines in code")]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub keep_maximum_blank_lines: Option<usize>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub spaces: Option<SpacesConfiguration>,
}

/// Spacing toggles
#[derive(Debug, Clone, Default, Serialize, Deserialize, JsonSchema, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct SpacesConfiguration {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub before_method_call_parentheses: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub before_method_declaration_parentheses: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub around_assignment: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub around_equality: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub around_relational: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub around_additive: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub around_multiplicative: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub within_method_call_parentheses: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub within_method_declaration_parentheses: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub within_brackets: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub before_comma: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub after_comma: Option<bool>,
}

impl FormatterConfiguration {
    /// Every setting spelled out from `styles`
    pub fn from_styles(styles: &Styles) -> Self {
        let tabs = &styles.tabs_and_indents;
        let spaces = &styles.spaces;
        Self {
            indent_size: Some(tabs.indent_size),
            tab_size: Some(tabs.tab_size),
            continuation_indent: Some(tabs.continuation_indent),
            use_tab_character: Some(tabs.use_tab_character),
            align_multiline_parameters: Some(tabs.align_multiline_parameters),
            align_multiline_arguments: Some(tabs.align_multiline_arguments),
            use_continuation_indent_for_collections: Some(tabs.use_continuation_indent_for_collections),
            keep_indents_on_empty_lines: Some(tabs.keep_indents_on_empty_lines),
            use_crlf_new_lines: Some(styles.general.use_crlf_new_lines),
            keep_maximum_blank_lines: Some(styles.blank_lines.keep_maximum_in_code),
            spaces: Some(SpacesConfiguration {
                before_method_call_parentheses: Some(spaces.before_parentheses.method_call),
                before_method_declaration_parentheses: Some(spaces.before_parentheses.method_declaration),
                around_assignment: Some(spaces.around_operators.assignment),
                around_equality: Some(spaces.around_operators.equality),
                around_relational: Some(spaces.around_operators.relational),
                around_additive: Some(spaces.around_operators.additive),
                around_multiplicative: Some(spaces.around_operators.multiplicative),
                within_method_call_parentheses: Some(spaces.within.method_call_parentheses),
                within_method_declaration_parentheses: Some(spaces.within.method_declaration_parentheses),
                within_brackets: Some(spaces.within.brackets),
                before_comma: Some(spaces.other.before_comma),
                after_comma: Some(spaces.other.after_comma),
            }),
        }
    }

    /// Override `styles` with every setting present here
    pub fn apply_to(&self, styles: &Styles) -> Styles {
        let mut styles = styles.clone();
        let tabs = &mut styles.tabs_and_indents;
        set(&mut tabs.indent_size, self.indent_size);
        set(&mut tabs.tab_size, self.tab_size);
        set(&mut tabs.continuation_indent, self.continuation_indent);
        set(&mut tabs.use_tab_character, self.use_tab_character);
        set(&mut tabs.align_multiline_parameters, self.align_multiline_parameters);
        set(&mut tabs.align_multiline_arguments, self.align_multiline_arguments);
        set(
            &mut tabs.use_continuation_indent_for_collections,
            self.use_continuation_indent_for_collections,
        );
        set(&mut tabs.keep_indents_on_empty_lines, self.keep_indents_on_empty_lines);
        set(&mut styles.general.use_crlf_new_lines, self.use_crlf_new_lines);
        set(&mut styles.blank_lines.keep_maximum_in_code, self.keep_maximum_blank_lines);
        set(
            &mut styles.blank_lines.keep_maximum_before_end_of_block,
            self.keep_maximum_blank_lines,
        );

        if let Some(spaces) = &self.spaces {
            let style = &mut styles.spaces;
            set(&mut style.before_parentheses.method_call, spaces.before_method_call_parentheses);
            set(
                &mut style.before_parentheses.method_declaration,
                spaces.before_method_declaration_parentheses,
            );
            set(&mut style.around_operators.assignment, spaces.around_assignment);
            set(&mut style.around_operators.equality, spaces.around_equality);
            set(&mut style.around_operators.relational, spaces.around_relational);
            set(&mut style.around_operators.additive, spaces.around_additive);
            set(&mut style.around_operators.multiplicative, spaces.around_multiplicative);
            set(&mut style.within.method_call_parentheses, spaces.within_method_call_parentheses);
            set(&mut style.within.empty_method_call_parentheses, spaces.within_method_call_parentheses);
            set(
                &mut style.within.method_declaration_parentheses,
                spaces.within_method_declaration_parentheses,
            );
            set(
                &mut style.within.empty_method_declaration_parentheses,
                spaces.within_method_declaration_parentheses,
            );
            set(&mut style.within.brackets, spaces.within_brackets);
            set(&mut style.other.before_comma, spaces.before_comma);
            set(&mut style.other.after_comma, spaces.after_comma);
        }
        styles
    }

    /// Merge another configuration into this one (current takes precedence)
    pub fn merge_with(&mut self, other: FormatterConfiguration) {
        keep(&mut self.indent_size, other.indent_size);
        keep(&mut self.tab_size, other.tab_size);
        keep(&mut self.continuation_indent, other.continuation_indent);
        keep(&mut self.use_tab_character, other.use_tab_character);
        keep(&mut self.align_multiline_parameters, other.align_multiline_parameters);
        keep(&mut self.align_multiline_arguments, other.align_multiline_arguments);
        keep(
            &mut self.use_continuation_indent_for_collections,
            other.use_continuation_indent_for_collections,
        );
        keep(&mut self.keep_indents_on_empty_lines, other.keep_indents_on_empty_lines);
        keep(&mut self.use_crlf_new_lines, other.use_crlf_new_lines);
        keep(&mut self.keep_maximum_blank_lines, other.keep_maximum_blank_lines);
        if self.spaces.is_none() {
            self.spaces = other.spaces;
        }
    }
}

fn set<T>(target: &mut T, value: Option<T>) {
    if let Some(value) = value {
        *target = value;
    }
}

fn keep<T>(current: &mut Option<T>, other: Option<T>) {
    if current.is_none() {
        *current = other;
    }
}

/// Configuration loader for discovering and loading config files
pub struct ConfigLoader;

impl ConfigLoader {
    /// Auto-discover a config file by walking up from `start_path`
    ///
    /// Searches each directory for the names in [`CONFIG_FILE_NAMES`] in
    /// order, moving up until a config is found or the filesystem root is
    /// reached.
    pub fn auto_discover(start_path: &Path) -> Result<Option<PathBuf>> {
        let mut current = start_path
            .canonicalize()
            .map_err(|e| ReweaveError::config_error(format!("Invalid path: {e}")))?;

        loop {
            for filename in CONFIG_FILE_NAMES {
                let config_path = current.join(filename);
                if config_path.is_file() {
                    tracing::debug!("Found config: {}", config_path.display());
                    return Ok(Some(config_path));
                }
            }

            match current.parent() {
                Some(parent) => current = parent.to_path_buf(),
                None => break,
            }
        }

        Ok(None)
    }

    /// Load configuration from a specific file
    ///
    /// The format follows the extension: `.toml`, `.json`, `.yaml` or `.yml`.
    pub fn load_from_file(path: &Path) -> Result<ReweaveConfiguration> {
        let content = fs::read_to_string(path).map_err(|e| ReweaveError::io_error(path, e))?;
        let ext = path.extension().and_then(|e| e.to_str());
        let parsed = match ext {
            Some("toml") => toml::from_str(&content).map_err(|e| e.to_string()),
            Some("json") => serde_json::from_str(&content).map_err(|e| e.to_string()),
            Some("yaml") | Some("yml") => serde_yaml::from_str(&content).map_err(|e| e.to_string()),
            _ => Err("Unsupported file extension (expected .toml, .json, .yaml or .yml)".to_string()),
        };
        parsed.map_err(|e| {
            ReweaveError::config_error(format!("Failed to load config from '{}': {}", path.display(), e))
        })
    }

    /// Load config from an explicit path, or auto-discover one
    ///
    /// Without an explicit path and without a discoverable file the default
    /// (empty) configuration is returned.
    pub fn load(custom_path: Option<&Path>, start_dir: Option<&Path>) -> Result<ReweaveConfiguration> {
        if let Some(path) = custom_path {
            if !path.exists() {
                return Err(ReweaveError::config_error(format!(
                    "Config file not found: {}",
                    path.display()
                )));
            }
            return Self::load_from_file(path);
        }

        let search_dir = start_dir.unwrap_or_else(|| Path::new("."));
        match Self::auto_discover(search_dir)? {
            Some(found) => Self::load_from_file(&found),
            None => {
                tracing::debug!("No config file found, using defaults");
                Ok(ReweaveConfiguration::default())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn create_temp_config(dir: &Path, filename: &str, content: &str) -> PathBuf {
        let path = dir.join(filename);
        fs::write(&path, content).unwrap();
        path
    }

    #[test]
    fn test_load_toml() {
        let temp_dir = TempDir::new().unwrap();
        let path = create_temp_config(
            temp_dir.path(),
            "reweave.toml",
            r#"
[formatter]
indentSize = 2
useTabCharacter = true

[formatter.spaces]
afterComma = false
"#,
        );

        let config = ConfigLoader::load_from_file(&path).unwrap();
        let formatter = config.formatter_config();
        assert_eq!(formatter.indent_size, Some(2));
        assert_eq!(formatter.use_tab_character, Some(true));
        assert_eq!(formatter.spaces.unwrap().after_comma, Some(false));
    }

    #[test]
    fn test_load_json_and_yaml() {
        let temp_dir = TempDir::new().unwrap();
        let json = create_temp_config(
            temp_dir.path(),
            ".reweaverc.json",
            r#"{"formatter": {"continuationIndent": 4}}"#,
        );
        let yaml = create_temp_config(temp_dir.path(), ".reweaverc.yaml", "formatter:\n  tabSize: 8\n");

        assert_eq!(
            ConfigLoader::load_from_file(&json).unwrap().formatter_config().continuation_indent,
            Some(4)
        );
        assert_eq!(
            ConfigLoader::load_from_file(&yaml).unwrap().formatter_config().tab_size,
            Some(8)
        );
    }

    #[test]
    fn test_auto_discover_walks_up() {
        let temp_dir = TempDir::new().unwrap();
        let nested = temp_dir.path().join("src/main/java");
        fs::create_dir_all(&nested).unwrap();
        create_temp_config(temp_dir.path(), ".reweaverc.yaml", "formatter: {}\n");

        let found = ConfigLoader::auto_discover(&nested).unwrap();
        assert_eq!(found.unwrap().file_name().unwrap(), ".reweaverc.yaml");
    }

    #[test]
    fn test_auto_discover_priority() {
        let temp_dir = TempDir::new().unwrap();
        create_temp_config(temp_dir.path(), ".reweaverc.json", "{}");
        create_temp_config(temp_dir.path(), "reweave.toml", "");

        let found = ConfigLoader::auto_discover(temp_dir.path()).unwrap();
        assert_eq!(found.unwrap().file_name().unwrap(), "reweave.toml");
    }

    #[test]
    fn test_load_missing_and_invalid() {
        assert!(ConfigLoader::load(Some(Path::new("nonexistent.toml")), None).is_err());

        let temp_dir = TempDir::new().unwrap();
        let path = create_temp_config(temp_dir.path(), ".reweaverc.json", "{ invalid json }");
        let err = ConfigLoader::load_from_file(&path).unwrap_err();
        assert_eq!(err.kind(), reweave_core::ErrorKind::Config);
    }

    #[test]
    fn test_apply_overrides_only_set_values() {
        let config = FormatterConfiguration {
            indent_size: Some(2),
            spaces: Some(SpacesConfiguration {
                around_additive: Some(false),
                ..Default::default()
            }),
            ..Default::default()
        };

        let styles = config.apply_to(&Styles::intellij());
        assert_eq!(styles.tabs_and_indents.indent_size, 2);
        assert_eq!(styles.tabs_and_indents.tab_size, 4);
        assert!(!styles.spaces.around_operators.additive);
        assert!(styles.spaces.around_operators.assignment);
    }

    #[test]
    fn test_merge_keeps_current_values() {
        let mut current = FormatterConfiguration {
            indent_size: Some(2),
            ..Default::default()
        };
        current.merge_with(FormatterConfiguration {
            indent_size: Some(8),
            tab_size: Some(8),
            ..Default::default()
        });
        assert_eq!(current.indent_size, Some(2));
        assert_eq!(current.tab_size, Some(8));
    }

    #[test]
    fn test_starter_round_trips_through_toml() {
        let starter = ReweaveConfiguration::starter();
        let text = starter.to_toml().unwrap();
        let parsed: ReweaveConfiguration = toml::from_str(&text).unwrap();
        assert_eq!(parsed, starter);
        assert_eq!(parsed.formatter_config().apply_to(&Styles::default()), Styles::intellij());
    }

    #[test]
    fn test_json_schema_names_formatter_settings() {
        let schema = ReweaveConfiguration::json_schema().unwrap();
        assert!(schema.contains("indentSize"));
        assert!(schema.contains("afterComma"));
    }
}
