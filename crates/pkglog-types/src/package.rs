use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;

/// One package as reported by a backend's enumeration.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct PackageInfo {
    pub name: String,
    pub version: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub architecture: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub repository: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source: Option<String>,
    #[serde(default)]
    pub installed: bool,
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub metadata: BTreeMap<String, Value>,
}

impl PackageInfo {
    pub fn new(name: impl Into<String>, version: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            version: version.into(),
            ..Default::default()
        }
    }
}

/// A package-manager transaction handed to a backend for logging:
/// the set of packages it installed and the set it removed.
#[derive(Debug, Clone, Default)]
pub struct Transaction {
    pub installed: Vec<PackageInfo>,
    pub removed: Vec<PackageInfo>,
}

impl Transaction {
    pub fn is_empty(&self) -> bool {
        self.installed.is_empty() && self.removed.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_package_info_defaults() {
        let pkg = PackageInfo::new("zoxide", "0.9.4");
        assert_eq!(pkg.name, "zoxide");
        assert!(!pkg.installed);
        assert!(pkg.architecture.is_none());
    }

    #[test]
    fn test_transaction_is_empty() {
        let mut tx = Transaction::default();
        assert!(tx.is_empty());
        tx.removed.push(PackageInfo::new("old-tool", "1.0"));
        assert!(!tx.is_empty());
    }
}
