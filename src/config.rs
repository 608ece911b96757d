use serde::{Deserialize, Serialize};

/// Durable store keys, one per persisted piece of state.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct StorageKeys {
    /// JSON array of teams
    pub teams: String,

    /// JSON string with the active team id
    pub active_team_id: String,

    /// Flat item list written by single-list installs; read once and folded
    /// into the default team
    pub legacy_items: String,
}

impl Default for StorageKeys {
    fn default() -> Self {
        Self {
            teams: "randomPickerTeams".to_string(),
            active_team_id: "randomPickerActiveTeamId".to_string(),
            legacy_items: "pickerItems".to_string(),
        }
    }
}

/// Picker configuration
///
/// Passed to the collection manager and the persistence layer at construction.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PickerConfig {
    /// Maximum item length in characters, checked before trimming
    pub max_item_length: usize,

    /// Maximum team name length in characters
    pub max_team_name_length: usize,

    /// Name of the implicit team created when nothing is stored yet
    pub default_team_name: String,

    /// Durable store keys
    pub storage_keys: StorageKeys,
}

impl Default for PickerConfig {
    fn default() -> Self {
        Self {
            max_item_length: 50,
            max_team_name_length: 20,
            default_team_name: "Default".to_string(),
            storage_keys: StorageKeys::default(),
        }
    }
}

impl PickerConfig {
    /// Create a configuration with default limits and keys
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the maximum item length
    pub fn max_item_length(mut self, max: usize) -> Self {
        self.max_item_length = max;
        self
    }

    /// Set the maximum team name length
    pub fn max_team_name_length(mut self, max: usize) -> Self {
        self.max_team_name_length = max;
        self
    }

    /// Set the name of the implicit default team
    pub fn default_team_name(mut self, name: &str) -> Self {
        self.default_team_name = name.to_string();
        self
    }

    /// Replace all storage keys
    pub fn storage_keys(mut self, keys: StorageKeys) -> Self {
        self.storage_keys = keys;
        self
    }

    /// Parse from a JSON document; missing fields keep their defaults.
    ///
    /// # Examples
    ///
    /// ```
    /// # use rando_picker::PickerConfig;
    /// let config = PickerConfig::from_json(r#"{"max_item_length": 100}"#).unwrap();
    /// assert_eq!(config.max_item_length, 100);
    /// assert_eq!(config.max_team_name_length, 20);
    /// ```
    pub fn from_json(json: &str) -> crate::Result<Self> {
        Ok(serde_json::from_str(json)?)
    }
}
