//! Load/dump pair for editing compstate YAML documents in place.
//!
//! Documents are handled as untyped [`serde_yaml::Value`] trees so that keys
//! this crate does not know about survive an edit. Comments do not survive.

use std::path::Path;

use anyhow::Context;
use serde_yaml::Value;
use tracing::{debug, instrument};

/// Reads and writes YAML documents with consistent formatting.
#[derive(Debug, Clone, Copy, Default)]
pub struct YamlStore;

impl YamlStore {
    pub fn new() -> Self {
        Self
    }

    #[instrument(skip(self))]
    pub fn load(&self, yaml_file: &Path) -> anyhow::Result<Value> {
        let content = std::fs::read_to_string(yaml_file)
            .with_context(|| format!("could not read '{}'", yaml_file.display()))?;
        self.load_str(&content)
            .with_context(|| format!("invalid YAML in '{}'", yaml_file.display()))
    }

    pub fn load_str(&self, content: &str) -> anyhow::Result<Value> {
        Ok(serde_yaml::from_str(content)?)
    }

    /// Serializes `data`, with trailing whitespace removed from every line.
    pub fn dump_str(&self, data: &Value) -> anyhow::Result<String> {
        let yaml = serde_yaml::to_string(data)?;
        let mut out = yaml
            .lines()
            .map(str::trim_end)
            .collect::<Vec<_>>()
            .join("\n");
        out.push('\n');
        Ok(out)
    }

    #[instrument(skip(self, data))]
    pub fn dump(&self, yaml_file: &Path, data: &Value) -> anyhow::Result<()> {
        let yaml = self.dump_str(data)?;
        debug!(bytes = yaml.len(), "writing YAML");
        std::fs::write(yaml_file, yaml)
            .with_context(|| format!("could not write '{}'", yaml_file.display()))
    }

    /// Rewrites a file through [`load`](Self::load) and [`dump`](Self::dump).
    pub fn round_trip(&self, yaml_file: &Path) -> anyhow::Result<()> {
        let data = self.load(yaml_file)?;
        self.dump(yaml_file, &data)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn formatted_file_is_unchanged() {
        let content = "delays:\n- delay: 30\n  time: 2022-04-01 12:04:12+01:00\nmatch_slot_lengths:\n  match: 300\n";
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("schedule.yaml");
        std::fs::write(&path, content).unwrap();

        let store = YamlStore::new();
        store.round_trip(&path).unwrap();

        let rewritten = std::fs::read_to_string(&path).unwrap();
        assert_eq!(
            store.load_str(&rewritten).unwrap(),
            store.load_str(content).unwrap()
        );
        assert!(rewritten.ends_with('\n'));
        assert!(!rewritten.ends_with("\n\n"));
    }

    #[test]
    fn strips_trailing_whitespace() {
        let store = YamlStore::new();
        let data = store.load_str("a: 1   \nb:   \n  - x\n").unwrap();
        let dumped = store.dump_str(&data).unwrap();
        assert!(dumped.lines().all(|line| line == line.trim_end()));
    }
}
