//! Expansion settings loaded from `hookwright.yaml`.

use serde::Deserialize;
use std::fs;
use std::path::Path;

use crate::error::{Error, Result};

pub const DEFAULT_CONFIG_FILE: &str = "hookwright.yaml";

/// Calling convention of the synthesised property setter hook.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SetterHookStyle {
    /// `(inout T, T) -> Void`: the hook receives the backing slot and the new value.
    #[default]
    InOut,
    /// `(T) -> Void`: the hook receives only the new value.
    ValueOnly,
}

impl SetterHookStyle {
    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "inout" | "in-out" | "reference" => Some(Self::InOut),
            "value" | "value-only" | "value_only" => Some(Self::ValueOnly),
            _ => None,
        }
    }
}

/// Naming and layout knobs for synthesised declarations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExpansionConfig {
    pub hook_prefix: String,
    pub backing_prefix: String,
    pub getter_prefix: String,
    pub setter_prefix: String,
    pub mock_type_name: String,
    /// Module that qualifies `Void`/`Never` spellings such as `Swift.Void`.
    pub core_module: String,
    pub setter_hook: SetterHookStyle,
    pub indent_width: usize,
}

impl Default for ExpansionConfig {
    fn default() -> Self {
        Self {
            hook_prefix: "_".into(),
            backing_prefix: "_".into(),
            getter_prefix: "_get".into(),
            setter_prefix: "_set".into(),
            mock_type_name: "Mock".into(),
            core_module: "Swift".into(),
            setter_hook: SetterHookStyle::InOut,
            indent_width: 4,
        }
    }
}

impl ExpansionConfig {
    pub fn from_raw(raw: RawExpansionConfig) -> Result<Self> {
        let mut config = Self::default();
        if let Some(prefix) = raw.hook_prefix {
            config.hook_prefix = prefix;
        }
        if let Some(prefix) = raw.backing_prefix {
            config.backing_prefix = prefix;
        }
        if let Some(prefix) = raw.getter_prefix {
            config.getter_prefix = prefix;
        }
        if let Some(prefix) = raw.setter_prefix {
            config.setter_prefix = prefix;
        }
        if let Some(name) = raw.mock_type_name {
            let name = name.trim();
            if name.is_empty() {
                return Err(Error::config("`mock_type_name` must not be empty"));
            }
            config.mock_type_name = name.to_string();
        }
        if let Some(module) = raw.core_module {
            config.core_module = module.trim().to_string();
        }
        if let Some(style) = raw.setter_hook {
            config.setter_hook = SetterHookStyle::parse(&style).ok_or_else(|| {
                Error::config(format!(
                    "unknown `setter_hook` value `{style}` (expected `inout` or `value`)"
                ))
            })?;
        }
        if let Some(width) = raw.indent_width {
            config.indent_width = width.clamp(1, 16);
        }
        config.validate_prefixes()?;
        Ok(config)
    }

    /// Synthesised names must stay distinct from the member and from each other.
    fn validate_prefixes(&self) -> Result<()> {
        let prefixes = [
            ("hook_prefix", &self.hook_prefix),
            ("backing_prefix", &self.backing_prefix),
            ("getter_prefix", &self.getter_prefix),
            ("setter_prefix", &self.setter_prefix),
        ];
        for (key, prefix) in prefixes {
            if prefix.trim().is_empty() {
                return Err(Error::config(format!("`{key}` must not be empty")));
            }
        }
        if self.getter_prefix == self.setter_prefix {
            return Err(Error::config("`getter_prefix` and `setter_prefix` must differ"));
        }
        for (key, prefix) in [
            ("getter_prefix", &self.getter_prefix),
            ("setter_prefix", &self.setter_prefix),
        ] {
            if *prefix == self.backing_prefix {
                return Err(Error::config(format!("`{key}` must differ from `backing_prefix`")));
            }
        }
        Ok(())
    }

    pub fn from_yaml_str(source: &str) -> Result<Self> {
        if source.trim().is_empty() {
            return Ok(Self::default());
        }
        let raw: RawExpansionConfig = serde_yaml::from_str(source)?;
        Self::from_raw(raw)
    }

    pub fn load(path: &Path) -> Result<Self> {
        let source = fs::read_to_string(path)?;
        Self::from_yaml_str(&source)
    }

    /// Loads `hookwright.yaml` from `dir` when present, otherwise returns the defaults.
    pub fn discover(dir: &Path) -> Result<Self> {
        let candidate = dir.join(DEFAULT_CONFIG_FILE);
        if candidate.is_file() {
            Self::load(&candidate)
        } else {
            Ok(Self::default())
        }
    }
}

#[derive(Debug, Deserialize, Clone, Default)]
#[serde(deny_unknown_fields)]
pub struct RawExpansionConfig {
    #[serde(default)]
    pub hook_prefix: Option<String>,
    #[serde(default)]
    pub backing_prefix: Option<String>,
    #[serde(default)]
    pub getter_prefix: Option<String>,
    #[serde(default)]
    pub setter_prefix: Option<String>,
    #[serde(default)]
    pub mock_type_name: Option<String>,
    #[serde(default)]
    pub core_module: Option<String>,
    #[serde(default)]
    pub setter_hook: Option<String>,
    #[serde(default)]
    pub indent_width: Option<usize>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    #[test]
    fn empty_yaml_uses_defaults() {
        let config = ExpansionConfig::from_yaml_str("").expect("config");
        assert_eq!(config, ExpansionConfig::default());
        assert_eq!(config.getter_prefix, "_get");
        assert_eq!(config.setter_hook, SetterHookStyle::InOut);
    }

    #[test]
    fn yaml_overrides_selected_keys() {
        let config = ExpansionConfig::from_yaml_str(
            "mock_type_name: Fake\nhook_prefix: stub_\nsetter_hook: value\nindent_width: 2\n",
        )
        .expect("config");
        assert_eq!(config.mock_type_name, "Fake");
        assert_eq!(config.hook_prefix, "stub_");
        assert_eq!(config.setter_hook, SetterHookStyle::ValueOnly);
        assert_eq!(config.indent_width, 2);
        assert_eq!(config.backing_prefix, "_");
    }

    #[test]
    fn unknown_setter_style_is_rejected() {
        let err = ExpansionConfig::from_yaml_str("setter_hook: sideways\n").expect_err("error");
        assert!(err.to_string().contains("unknown `setter_hook` value `sideways`"));
    }

    #[test]
    fn unknown_keys_are_yaml_errors() {
        let err = ExpansionConfig::from_yaml_str("hook_prefx: _\n").expect_err("error");
        assert!(matches!(err, Error::Yaml(_)), "unexpected error: {err:?}");
    }

    #[test]
    fn blank_mock_name_is_rejected() {
        let err = ExpansionConfig::from_yaml_str("mock_type_name: \"  \"\n").expect_err("error");
        assert!(err.to_string().contains("must not be empty"));
    }

    #[test]
    fn empty_prefixes_are_rejected() {
        for key in ["hook_prefix", "backing_prefix", "getter_prefix", "setter_prefix"] {
            let err = ExpansionConfig::from_yaml_str(&format!("{key}: \"\"\n")).expect_err(key);
            assert!(matches!(err, Error::Config(_)), "unexpected error: {err:?}");
            assert!(
                err.to_string().contains(&format!("`{key}` must not be empty")),
                "{err}"
            );
        }
    }

    #[test]
    fn accessor_hook_prefixes_must_be_distinct() {
        let err = ExpansionConfig::from_yaml_str("getter_prefix: _x\nsetter_prefix: _x\n")
            .expect_err("same prefixes");
        assert!(err.to_string().contains("`getter_prefix` and `setter_prefix` must differ"));

        let err = ExpansionConfig::from_yaml_str("backing_prefix: _get\n").expect_err("clash");
        assert!(err.to_string().contains("`getter_prefix` must differ from `backing_prefix`"));
    }

    #[test]
    fn discover_reads_file_from_directory() {
        let dir = tempfile::tempdir().expect("tempdir");
        assert_eq!(
            ExpansionConfig::discover(dir.path()).expect("defaults"),
            ExpansionConfig::default()
        );
        fs::write(dir.path().join(DEFAULT_CONFIG_FILE), "core_module: Core\n").expect("write");
        let config = ExpansionConfig::discover(dir.path()).expect("config");
        assert_eq!(config.core_module, "Core");
    }
}
