use std::fmt;

use serde::{Serialize, Serializer};

/// Identifies a control captured by the initial page scan.
///
/// Keys order by document position; the label (`#id` or `name`) is only for
/// display, so radio groups sharing a `name` still get distinct keys.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ControlKey {
    index: usize,
    label: String,
}

impl ControlKey {
    pub fn new(index: usize, label: impl Into<String>) -> Self {
        Self {
            index,
            label: label.into(),
        }
    }

    /// Builds the key for the `index`-th control of a scan, preferring the
    /// element `id`, then its `name`.
    pub fn from_scan(index: usize, id: &str, name: &str) -> Self {
        let id = id.trim();
        if !id.is_empty() {
            return Self::new(index, format!("#{id}"));
        }
        Self::new(index, name.trim())
    }
}

impl fmt::Display for ControlKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.index, self.label)
    }
}

impl Serialize for ControlKey {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

/// Current value and checked flag of an input or select.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ControlState {
    pub value: String,
    pub checked: bool,
}

impl ControlState {
    pub fn new(value: impl Into<String>, checked: bool) -> Self {
        Self {
            value: value.into(),
            checked,
        }
    }

    pub fn text(value: impl Into<String>) -> Self {
        Self::new(value, false)
    }

    /// Value concatenated with the checked flag, so text, checkbox, and radio
    /// controls compare the same way.
    pub fn fingerprint(&self) -> String {
        format!("{}{}", self.value, self.checked)
    }
}
