use serde::{Deserialize, Serialize};

/// Page global that may carry a JSON override of [`SettingsPageConfig`].
pub const CONFIG_GLOBAL: &str = "__SETTINGS_PAGE_CONFIG__";

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConfigError {
    #[error("invalid settings page config: {0}")]
    Parse(String),
    #[error("{0} must not be empty")]
    EmptyField(&'static str),
    #[error("{field} must be a root-relative path or an http(s) url, got {value:?}")]
    InvalidTarget { field: &'static str, value: String },
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SettingsPageConfig {
    pub settings_action: String,
    pub delete_account_href: String,
    pub submit_button_id: String,
    pub image_input_id: String,
    pub preview_image_id: String,
    pub control_selector: String,
    /// Browsing context the outgoing form posts into; the page itself when
    /// unset.
    pub settings_target: Option<String>,
}

impl Default for SettingsPageConfig {
    fn default() -> Self {
        Self {
            settings_action: "/settings".to_string(),
            delete_account_href: "/delete_account".to_string(),
            submit_button_id: "submit".to_string(),
            image_input_id: "image".to_string(),
            preview_image_id: "pfp".to_string(),
            control_selector: "input, select".to_string(),
            settings_target: None,
        }
    }
}

impl SettingsPageConfig {
    pub fn from_json(raw: &str) -> Result<Self, ConfigError> {
        let config: Self =
            serde_json::from_str(raw).map_err(|error| ConfigError::Parse(error.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        for (field, value) in [
            ("submit_button_id", &self.submit_button_id),
            ("image_input_id", &self.image_input_id),
            ("preview_image_id", &self.preview_image_id),
            ("control_selector", &self.control_selector),
        ] {
            if value.trim().is_empty() {
                return Err(ConfigError::EmptyField(field));
            }
        }
        if self
            .settings_target
            .as_deref()
            .is_some_and(|target| target.trim().is_empty())
        {
            return Err(ConfigError::EmptyField("settings_target"));
        }
        validate_target("settings_action", &self.settings_action)?;
        validate_target("delete_account_href", &self.delete_account_href)?;
        Ok(())
    }
}

fn validate_target(field: &'static str, value: &str) -> Result<(), ConfigError> {
    let value = value.trim();
    if value.is_empty() {
        return Err(ConfigError::EmptyField(field));
    }
    let root_relative = value.starts_with('/') && !value.starts_with("//");
    let absolute = ["http://", "https://"].iter().any(|scheme| {
        value
            .strip_prefix(scheme)
            .is_some_and(|rest| !rest.is_empty() && !rest.starts_with('/'))
    });
    if root_relative || absolute {
        Ok(())
    } else {
        Err(ConfigError::InvalidTarget {
            field,
            value: value.to_string(),
        })
    }
}
