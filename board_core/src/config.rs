use serde::Deserialize;

/// TOML configuration for an entry file
#[derive(Debug, Deserialize)]
pub struct EntryFileConfig {
    #[serde(default)]
    pub entries: Vec<EntryConfig>,
}

/// Configuration for a single raid entry
#[derive(Debug, Clone, Deserialize)]
pub struct EntryConfig {
    pub name: String,
    /// Attack, defense, stamina
    pub ivs: [u8; 3],
    #[serde(default)]
    pub final_form: String,
    #[serde(default)]
    pub role: String,
    #[serde(default = "default_base")]
    pub base: f64,
    #[serde(default)]
    pub lucky: bool,
    #[serde(default)]
    pub shadow: bool,
    #[serde(default)]
    pub purified: bool,
    #[serde(default)]
    pub best_buddy: bool,
    #[serde(default)]
    pub needs_tm: bool,
    #[serde(default)]
    pub mega_now: bool,
    #[serde(default)]
    pub mega_soon: bool,
    #[serde(default)]
    pub notes: String,
}

fn default_base() -> f64 {
    70.0
}
