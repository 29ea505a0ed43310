use crate::board::RaidBoard;
use crate::config::EntryFileConfig;
use crate::entry::RaidEntry;
use crate::ConfigError;
use std::path::{Path, PathBuf};

/// Raid entries loaded from TOML files
#[derive(Debug, Default)]
pub struct EntryRegistry {
    entries: Vec<RaidEntry>,
}

impl EntryRegistry {
    /// Create an empty registry
    pub fn new() -> Self {
        Self::default()
    }

    /// Load all entry files from a directory (recursively)
    pub fn load(dir: &Path) -> Result<Self, ConfigError> {
        let mut registry = Self::new();
        registry.load_dir(dir)?;
        tracing::info!(
            entries = registry.entries.len(),
            dir = %dir.display(),
            "loaded raid entries"
        );
        Ok(registry)
    }

    /// Load entries from a directory recursively, in path order
    fn load_dir(&mut self, dir: &Path) -> Result<(), ConfigError> {
        if !dir.exists() {
            return Ok(());
        }

        let entries = std::fs::read_dir(dir).map_err(|e| ConfigError::Io {
            error: e,
            path: Some(dir.to_path_buf()),
        })?;

        let mut paths: Vec<PathBuf> = Vec::new();
        for entry in entries {
            let entry = entry.map_err(|e| ConfigError::Io {
                error: e,
                path: Some(dir.to_path_buf()),
            })?;
            paths.push(entry.path());
        }
        paths.sort();

        for path in paths {
            if path.is_dir() {
                self.load_dir(&path)?;
            } else if path.extension().is_some_and(|ext| ext == "toml") {
                self.load_file(&path)?;
            }
        }

        Ok(())
    }

    /// Load a single entry file
    fn load_file(&mut self, path: &Path) -> Result<(), ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::Io {
            error: e,
            path: Some(path.to_path_buf()),
        })?;

        let config: EntryFileConfig = toml::from_str(&content).map_err(|e| ConfigError::Parse {
            error: e,
            path: path.to_path_buf(),
        })?;

        for entry in config.entries {
            let entry = RaidEntry::from_config(entry).map_err(|e| ConfigError::Validation {
                message: e.to_string(),
                path: path.to_path_buf(),
            })?;
            self.entries.push(entry);
        }
        Ok(())
    }

    /// Add an entry built in code
    pub fn insert(&mut self, entry: RaidEntry) {
        self.entries.push(entry);
    }

    /// Find an entry by display name
    pub fn get(&self, name: &str) -> Option<&RaidEntry> {
        self.entries.iter().find(|e| e.name == name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.get(name).is_some()
    }

    pub fn entries(&self) -> &[RaidEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Rank every loaded entry
    pub fn board(&self) -> RaidBoard {
        RaidBoard::build(&self.entries)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::PriorityTier;
    use std::io::Write;
    use tempfile::TempDir;

    fn create_entry_file(dir: &Path, name: &str, content: &str) {
        let path = dir.join(format!("{}.toml", name));
        let mut file = std::fs::File::create(&path).unwrap();
        file.write_all(content.as_bytes()).unwrap();
    }

    #[test]
    fn test_load_entries() {
        let dir = TempDir::new().unwrap();
        create_entry_file(
            dir.path(),
            "fighting",
            r#"
[[entries]]
name = "Riolu #1"
ivs = [14, 12, 13]
final_form = "Lucario"
role = "Fighting DPS"
base = 89
needs_tm = true
notes = "Aura Sphere is event-only."

[[entries]]
name = "Lopunny"
ivs = [15, 13, 14]
final_form = "Mega Lopunny"
role = "Fighting mega support"
base = 78
mega_now = true
"#,
        );

        let registry = EntryRegistry::load(dir.path()).unwrap();
        assert_eq!(registry.len(), 2);
        let riolu = registry.get("Riolu #1").unwrap();
        assert!(riolu.needs_special_move);
        assert_eq!(riolu.final_form, "Lucario");
        assert!(registry.get("Lopunny").unwrap().mega_now);
    }

    #[test]
    fn test_default_base() {
        let dir = TempDir::new().unwrap();
        create_entry_file(
            dir.path(),
            "budget",
            r#"
[[entries]]
name = "Exeggutor"
ivs = [15, 13, 13]
lucky = true
"#,
        );

        let registry = EntryRegistry::load(dir.path()).unwrap();
        let entry = registry.get("Exeggutor").unwrap();
        assert!((entry.base - 70.0).abs() < f64::EPSILON);
        assert_eq!(entry.display_name(), "Exeggutor (lucky)");
    }

    #[test]
    fn test_nested_directories() {
        let dir = TempDir::new().unwrap();
        let nested = dir.path().join("megas");
        std::fs::create_dir(&nested).unwrap();
        create_entry_file(
            dir.path(),
            "a",
            r#"
[[entries]]
name = "Starly"
ivs = [14, 12, 15]
base = 77
"#,
        );
        create_entry_file(
            &nested,
            "b",
            r#"
[[entries]]
name = "Snover"
ivs = [14, 12, 14]
base = 80
mega_now = true
"#,
        );
        create_entry_file(dir.path(), "ignored", "");
        std::fs::write(dir.path().join("readme.txt"), "not toml").unwrap();

        let registry = EntryRegistry::load(dir.path()).unwrap();
        assert_eq!(registry.len(), 2);
        assert!(registry.contains("Snover"));

        let board = registry.board();
        assert_eq!(board.rows()[0].row.name, "Snover");
        assert_eq!(board.rows()[0].tier, PriorityTier::A);
    }

    #[test]
    fn test_missing_directory_is_empty() {
        let dir = TempDir::new().unwrap();
        let registry = EntryRegistry::load(&dir.path().join("absent")).unwrap();
        assert!(registry.is_empty());
    }

    #[test]
    fn test_validation_error_names_file() {
        let dir = TempDir::new().unwrap();
        create_entry_file(
            dir.path(),
            "broken",
            r#"
[[entries]]
name = "Riolu"
ivs = [14, 16, 13]
"#,
        );

        let err = EntryRegistry::load(dir.path()).unwrap_err();
        match err {
            ConfigError::Validation { message, path } => {
                assert!(message.contains("defense"));
                assert!(path.ends_with("broken.toml"));
            }
            other => panic!("Expected validation error, got {other:?}"),
        }
    }

    #[test]
    fn test_parse_error() {
        let dir = TempDir::new().unwrap();
        create_entry_file(dir.path(), "bad", "[[entries]]\nname = 5\n");
        let result = EntryRegistry::load(dir.path());
        assert!(matches!(result, Err(ConfigError::Parse { .. })));
    }
}
