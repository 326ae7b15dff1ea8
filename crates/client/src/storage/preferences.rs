//! Persisted UI preferences.

use serde::{Deserialize, Serialize};

use super::StorageService;

const SIDEBAR_KEY: &str = "sidebar-collapsed";

/// Typed access to the persisted dashboard preferences.
#[derive(Debug, Clone)]
pub struct Preferences {
    storage: StorageService,
}

/// Preference record kept without a TTL.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct SidebarPreference {
    pub collapsed: bool,
}

impl Preferences {
    /// Wrap a storage service.
    #[must_use]
    pub fn new(storage: StorageService) -> Self {
        Self { storage }
    }

    /// Whether the sidebar was collapsed when the dashboard last ran.
    #[must_use]
    pub fn sidebar_collapsed(&self) -> bool {
        self.storage
            .get_item::<SidebarPreference>(SIDEBAR_KEY)
            .unwrap_or_default()
            .collapsed
    }

    /// Persist the sidebar collapse state.
    pub fn set_sidebar_collapsed(&self, collapsed: bool) -> bool {
        self.storage
            .set_item(SIDEBAR_KEY, &SidebarPreference { collapsed }, None)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sidebar_roundtrip() {
        let dir = std::env::temp_dir().join(format!("caphe-prefs-{}", uuid::Uuid::new_v4()));
        let prefs = Preferences::new(StorageService::new(dir, "caphe-admin-"));

        assert!(!prefs.sidebar_collapsed());
        assert!(prefs.set_sidebar_collapsed(true));
        assert!(prefs.sidebar_collapsed());
    }
}
