//! Form configuration loaded through figment.
//!
//! Sources, later ones overriding earlier ones:
//! 1. Default values
//! 2. A TOML, YAML or JSON file (format picked from the extension)
//! 3. Environment variables prefixed with `SAH_FORMS_`; `__` separates
//!    nested keys, e.g. `SAH_FORMS_DEFAULT_ATTRIBUTES__CLASS=form-control`
//!
//! figment stores dictionaries sorted by key, so attributes loaded from
//! configuration come out in alphabetical order.

use std::path::Path;

use figment::{
    providers::{Env, Format, Json, Serialized, Toml, Yaml},
    Figment,
};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{FormsError, Result};
use crate::types::Attributes;

/// Prefix for environment variable overrides.
pub const ENV_PREFIX: &str = "SAH_FORMS_";

/// Settings for a [`Form`](crate::form::Form).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FormsConfig {
    /// Target of the form-open envelope.
    pub action: String,
    /// Extra attributes on the `<form>` tag.
    pub form_attributes: Attributes,
    /// Hidden inputs emitted right after the `<form>` tag.
    pub hidden: Attributes,
    /// Default attributes applied to every field; restored after each clear.
    pub default_attributes: Attributes,
}

impl FormsConfig {
    /// Extract a config from an already assembled figment.
    pub fn from_figment(figment: &Figment) -> Result<Self> {
        Ok(figment.extract()?)
    }

    /// Load defaults, then `path`, then `SAH_FORMS_` environment variables.
    ///
    /// A missing file contributes nothing.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let figment = Figment::new()
            .merge(Serialized::defaults(FormsConfig::default()))
            .merge(file_provider(path)?)
            .merge(Env::prefixed(ENV_PREFIX).split("__"));
        let config = Self::from_figment(&figment)?;
        debug!(
            path = %path.display(),
            defaults = config.default_attributes.len(),
            "loaded forms config"
        );
        Ok(config)
    }

    /// Defaults plus `SAH_FORMS_` environment variables, no file.
    pub fn from_env() -> Result<Self> {
        let figment = Figment::new()
            .merge(Serialized::defaults(FormsConfig::default()))
            .merge(Env::prefixed(ENV_PREFIX).split("__"));
        Self::from_figment(&figment)
    }
}

fn file_provider(path: &Path) -> Result<Figment> {
    let extension = path
        .extension()
        .and_then(|e| e.to_str())
        .map(str::to_ascii_lowercase);
    match extension.as_deref() {
        Some("toml") => Ok(Figment::from(Toml::file(path))),
        Some("yaml") | Some("yml") => Ok(Figment::from(Yaml::file(path))),
        Some("json") => Ok(Figment::from(Json::file(path))),
        _ => Err(FormsError::UnsupportedConfigFormat {
            path: path.to_path_buf(),
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    #[serial]
    fn load_toml_file() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("forms.toml");
        fs::write(
            &path,
            r#"
action = "/signup"

[default_attributes]
class = "form-control"

[hidden]
step = "one"
"#,
        )
        .unwrap();

        let config = FormsConfig::load(&path).unwrap();
        assert_eq!(config.action, "/signup");
        assert_eq!(config.default_attributes["class"], "form-control");
        assert_eq!(config.hidden["step"], "one");
        assert!(config.form_attributes.is_empty());
    }

    #[test]
    #[serial]
    fn load_yaml_file() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("forms.yml");
        fs::write(
            &path,
            "form_attributes:\n  id: signup\ndefault_attributes:\n  class: wide\n  autocomplete: \"off\"\n",
        )
        .unwrap();

        let config = FormsConfig::load(&path).unwrap();
        assert_eq!(config.form_attributes["id"], "signup");
        assert_eq!(config.default_attributes.len(), 2);
        assert_eq!(config.default_attributes["autocomplete"], "off");
    }

    #[test]
    #[serial]
    fn missing_file_yields_defaults() {
        let tmp = TempDir::new().unwrap();
        let config = FormsConfig::load(tmp.path().join("absent.json")).unwrap();
        assert_eq!(config, FormsConfig::default());
    }

    #[test]
    fn unsupported_extension_errors() {
        let err = FormsConfig::load("forms.ini").unwrap_err();
        assert!(matches!(err, FormsError::UnsupportedConfigFormat { .. }));
    }

    #[test]
    #[serial]
    fn env_overrides_file() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("forms.json");
        fs::write(&path, r#"{"action": "/from-file"}"#).unwrap();

        std::env::set_var("SAH_FORMS_ACTION", "/from-env");
        std::env::set_var("SAH_FORMS_DEFAULT_ATTRIBUTES__CLASS", "env-class");
        let result = FormsConfig::load(&path);
        std::env::remove_var("SAH_FORMS_ACTION");
        std::env::remove_var("SAH_FORMS_DEFAULT_ATTRIBUTES__CLASS");

        let config = result.unwrap();
        assert_eq!(config.action, "/from-env");
        assert_eq!(config.default_attributes["class"], "env-class");
    }

    #[test]
    #[serial]
    fn from_env_without_file() {
        std::env::set_var("SAH_FORMS_HIDDEN__CSRF", "token");
        let result = FormsConfig::from_env();
        std::env::remove_var("SAH_FORMS_HIDDEN__CSRF");

        let config = result.unwrap();
        assert_eq!(config.hidden["csrf"], "token");
        assert!(config.action.is_empty());
    }
}
