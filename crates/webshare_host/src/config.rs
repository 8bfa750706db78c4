//! Controller configuration.

use serde::Deserialize;

/// Selector used when the integrator does not supply one.
pub const DEFAULT_TRIGGER_SELECTOR: &str = "[data-webshare]";
/// Attribute written on triggers when sharing is unsupported.
pub const HIDDEN_ATTRIBUTE: &str = "hidden";
/// Value written to [`HIDDEN_ATTRIBUTE`].
pub const DEFAULT_HIDDEN_VALUE: &str = "true";

#[derive(Debug, Clone, PartialEq, Eq)]
/// Trigger discovery and hiding settings.
pub struct ShareTriggerConfig {
    /// Selector identifying trigger elements.
    pub selector: String,
    /// Value written to the `hidden` attribute of unsupported triggers.
    pub hidden_attribute_value: String,
}

impl Default for ShareTriggerConfig {
    fn default() -> Self {
        Self {
            selector: DEFAULT_TRIGGER_SELECTOR.to_string(),
            hidden_attribute_value: DEFAULT_HIDDEN_VALUE.to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
/// Integrator-supplied settings, as read from an options object. Unknown keys are ignored.
pub struct ShareTriggerOptions {
    /// Selector identifying trigger elements.
    pub selector: Option<String>,
    /// Value written to the `hidden` attribute of unsupported triggers.
    pub hidden_attribute_value: Option<String>,
}

impl ShareTriggerConfig {
    /// Resolves the config. A non-blank `selector` wins over `options.selector`; blank or
    /// missing values keep the defaults.
    pub fn from_options(selector: Option<&str>, options: &ShareTriggerOptions) -> Self {
        let defaults = Self::default();
        Self {
            selector: non_blank(selector)
                .or_else(|| non_blank(options.selector.as_deref()))
                .map_or(defaults.selector, str::to_string),
            hidden_attribute_value: non_blank(options.hidden_attribute_value.as_deref())
                .map_or(defaults.hidden_attribute_value, str::to_string),
        }
    }
}

fn non_blank(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|value| !value.is_empty())
}
