use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Maps raw version keys to display labels.
///
/// Labels are only used for presentation; chart data always keeps the raw key.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum VersionLabeler {
    /// Show the raw key
    #[default]
    Identity,
    /// `"1.4.2-beta.1"` becomes `"1.4"`
    MajorMinor,
    /// `"1.4.2"` becomes `"1"`
    Major,
    /// Explicit renames, unknown keys shown as-is
    Rename(HashMap<String, String>),
}

impl VersionLabeler {
    pub fn label(&self, version: &str) -> String {
        match self {
            Self::Identity => version.to_string(),
            Self::MajorMinor => leading_components(version, 2),
            Self::Major => leading_components(version, 1),
            Self::Rename(names) => names
                .get(version)
                .cloned()
                .unwrap_or_else(|| version.to_string()),
        }
    }

    pub fn labels(&self, versions: &[String]) -> Vec<String> {
        versions.iter().map(|v| self.label(v)).collect()
    }
}

fn leading_components(version: &str, count: usize) -> String {
    let core = version
        .split(|c| c == '-' || c == '+')
        .next()
        .unwrap_or(version);
    core.split('.').take(count).collect::<Vec<_>>().join(".")
}
