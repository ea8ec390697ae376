// File: ./src/alias.rs
// Shorter display labels for long act names (.paf files)
use crate::error::Result;
use crate::storage::LocalStorage;
use std::path::Path;

pub const ALIAS_HEADER: &str = "Band name,Band alias";

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AliasTable {
    entries: Vec<(String, String)>,
}

impl AliasTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds or replaces the alias for `name`. An empty alias removes it.
    pub fn set(&mut self, name: impl Into<String>, alias: impl Into<String>) {
        let (name, alias) = (name.into(), alias.into());
        if alias.is_empty() {
            self.entries.retain(|(n, _)| *n != name);
            return;
        }
        match self.entries.iter_mut().find(|(n, _)| *n == name) {
            Some(entry) => entry.1 = alias,
            None => self.entries.push((name, alias)),
        }
    }

    pub fn get(&self, name: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, a)| a.as_str())
    }

    /// The alias if there is one, the name otherwise.
    pub fn display_name<'a>(&'a self, name: &'a str) -> &'a str {
        self.get(name).unwrap_or(name)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().map(|(n, a)| (n.as_str(), a.as_str()))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Parses `name,alias` rows. The header row and malformed rows are skipped.
    pub fn parse(text: &str) -> Self {
        let mut table = Self::new();
        for (idx, line) in text.lines().enumerate() {
            let line = line.trim_end_matches('\r');
            if line.trim().is_empty() || line.trim() == ALIAS_HEADER {
                continue;
            }
            match line.split_once(',') {
                Some((name, alias)) if !name.trim().is_empty() => {
                    table.set(name.trim(), alias.trim());
                }
                _ => log::warn!("skipping alias line {}: {}", idx + 1, line),
            }
        }
        table
    }

    pub fn to_text(&self) -> String {
        let mut out = String::from(ALIAS_HEADER);
        for (name, alias) in &self.entries {
            out.push('\n');
            out.push_str(name);
            out.push(',');
            out.push_str(alias);
        }
        out
    }

    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let table = Self::parse(&LocalStorage::read(path)?);
        log::info!("loaded {} aliases", table.len());
        Ok(table)
    }

    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        LocalStorage::atomic_write(path, self.to_text())
    }
}
