// File: ./src/session.rs
// Owns everything the user is working on: line-up, picks, aliases, hidden stages.
use crate::alias::AliasTable;
use crate::config::Config;
use crate::error::SkippedRecord;
use crate::model::{Event, ParseReport, Schedule, find_conflicts, parse_lineup_file};
use crate::running_order::{ChartInput, DayChart, layout};
use crate::selection::{ImportReport, Selection, SelectionFormat};
use anyhow::{Context, Result};
use std::collections::BTreeSet;
use std::path::Path;

#[derive(Debug, Clone, Default)]
pub struct Session {
    schedule: Schedule,
    skipped: Vec<SkippedRecord>,
    selection: Selection,
    aliases: AliasTable,
    disabled_stages: BTreeSet<String>,
    pub selection_format: SelectionFormat,
}

impl Session {
    pub fn new() -> Self {
        Self::default()
    }

    /// Restores a session from the paths and toggles stored in `config`.
    /// A selection file that does not exist yet is not an error.
    pub fn from_config(config: &Config) -> Result<Self> {
        let mut session = Self {
            selection_format: config.selection_format,
            ..Self::default()
        };
        if let Some(path) = &config.lineup_path {
            session.load_lineup(path)?;
        }
        session.disabled_stages = config
            .disabled_stages
            .iter()
            .filter(|s| session.schedule.stage_names().contains(*s))
            .cloned()
            .collect();
        if let Some(path) = &config.alias_path
            && path.exists()
        {
            session.load_aliases(path)?;
        }
        if let Some(path) = &config.selection_path
            && path.exists()
            && !session.schedule.is_empty()
        {
            session.import_selection(path)?;
        }
        Ok(session)
    }

    /// Writes the session's toggles back into `config`.
    pub fn store_into(&self, config: &mut Config) {
        config.disabled_stages = self.disabled_stages.iter().cloned().collect();
        config.selection_format = self.selection_format;
    }

    /// Parses `path` and replaces the current line-up. Selection and stage
    /// toggles are reset; on failure the previous line-up stays in place.
    pub fn load_lineup<P: AsRef<Path>>(&mut self, path: P) -> Result<&[SkippedRecord]> {
        let path = path.as_ref();
        let report = parse_lineup_file(path)
            .with_context(|| format!("Failed to load line-up {}", path.display()))?;
        self.set_lineup(report);
        Ok(&self.skipped)
    }

    pub fn set_lineup(&mut self, report: ParseReport) {
        self.schedule = report.schedule;
        self.skipped = report.skipped;
        self.selection.clear();
        self.disabled_stages.clear();
    }

    pub fn schedule(&self) -> &Schedule {
        &self.schedule
    }

    pub fn skipped(&self) -> &[SkippedRecord] {
        &self.skipped
    }

    pub fn selection(&self) -> &Selection {
        &self.selection
    }

    pub fn aliases(&self) -> &AliasTable {
        &self.aliases
    }

    /// Flips an event in or out of the selection. Events that are not part
    /// of the current line-up are ignored.
    pub fn toggle(&mut self, event: &Event) -> bool {
        if !self.schedule.contains_event(event) {
            log::warn!("ignoring toggle for unknown event {}", event);
            return false;
        }
        self.selection.toggle(event)
    }

    /// Selects the first slot of `name` in file order.
    pub fn select_by_name(&mut self, name: &str) -> bool {
        match self.schedule.lookup(name, None) {
            Some(event) => self.selection.insert(event.clone()),
            None => false,
        }
    }

    pub fn clear_selection(&mut self) {
        self.selection.clear();
    }

    pub fn conflicts(&self) -> Selection {
        find_conflicts(&self.selection)
    }

    /// Adds the events from a `.prot` file to the selection.
    pub fn import_selection<P: AsRef<Path>>(&mut self, path: P) -> Result<ImportReport> {
        let path = path.as_ref();
        let report = Selection::import_from(path, &self.schedule)
            .with_context(|| format!("Failed to import selection {}", path.display()))?;
        self.selection.extend(report.selection.iter().cloned());
        log::info!(
            "imported {} events from {}",
            report.selection.len(),
            path.display()
        );
        Ok(report)
    }

    pub fn export_selection<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let path = path.as_ref();
        self.selection
            .export_to(path, self.selection_format)
            .with_context(|| format!("Failed to export selection {}", path.display()))
    }

    pub fn load_aliases<P: AsRef<Path>>(&mut self, path: P) -> Result<()> {
        let path = path.as_ref();
        self.aliases = AliasTable::load(path)
            .with_context(|| format!("Failed to load aliases {}", path.display()))?;
        Ok(())
    }

    pub fn save_aliases<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let path = path.as_ref();
        self.aliases
            .save(path)
            .with_context(|| format!("Failed to save aliases {}", path.display()))
    }

    pub fn set_alias(&mut self, name: &str, alias: &str) {
        self.aliases.set(name, alias);
    }

    pub fn is_stage_enabled(&self, stage: &str) -> bool {
        !self.disabled_stages.contains(stage)
    }

    /// Shows or hides a stage column. Returns whether it is now shown.
    pub fn toggle_stage(&mut self, stage: &str) -> bool {
        if !self.disabled_stages.remove(stage) {
            self.disabled_stages.insert(stage.to_string());
            return false;
        }
        true
    }

    pub fn disabled_stages(&self) -> &BTreeSet<String> {
        &self.disabled_stages
    }

    /// Charts for the personal running order: selected sets and clashes marked.
    pub fn running_order(&self) -> Vec<DayChart> {
        let conflicts = self.conflicts();
        layout(&ChartInput {
            schedule: &self.schedule,
            selection: &self.selection,
            conflicts: &conflicts,
            aliases: &self.aliases,
            disabled_stages: &self.disabled_stages,
        })
    }

    /// Charts for the whole line-up with nothing highlighted.
    pub fn complete_running_order(&self) -> Vec<DayChart> {
        let empty = Selection::new();
        layout(&ChartInput {
            schedule: &self.schedule,
            selection: &empty,
            conflicts: &empty,
            aliases: &self.aliases,
            disabled_stages: &self.disabled_stages,
        })
    }
}
