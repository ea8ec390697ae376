use crate::config::Config;
use crate::model::Event;
use crate::selection::Selection;
use crate::session::Session;
use crate::tui::action::Action;
use ratatui::widgets::ListState;

#[derive(PartialEq, Clone, Copy, Debug)]
pub enum Focus {
    Sidebar,
    Main,
}

#[derive(PartialEq, Clone, Copy, Debug)]
pub enum InputMode {
    Normal,
    Searching,
    /// Typing a display alias for the highlighted act.
    EditingAlias,
}

#[derive(PartialEq, Clone, Copy, Debug)]
pub enum ViewMode {
    Lineup,
    Chart,
}

pub struct AppState {
    pub session: Session,
    pub config: Config,
    /// Line-up sorted by act name, then start.
    pub rows: Vec<Event>,
    pub view_indices: Vec<usize>,
    pub conflicts: Selection,
    pub list_state: ListState,
    pub stage_state: ListState,
    pub active_focus: Focus,
    pub view: ViewMode,
    pub day_index: usize,
    pub message: String,
    pub mode: InputMode,
    pub input_buffer: String,
    pub alias_buffer: String,
}

impl AppState {
    pub fn new(session: Session, config: Config) -> Self {
        let mut l_state = ListState::default();
        l_state.select(Some(0));
        let mut s_state = ListState::default();
        s_state.select(Some(0));
        let mut state = Self {
            session,
            config,
            rows: vec![],
            view_indices: vec![],
            conflicts: Selection::new(),
            list_state: l_state,
            stage_state: s_state,
            active_focus: Focus::Main,
            view: ViewMode::Lineup,
            day_index: 0,
            message: "Space: Pick | v: Chart | Tab: Stages | /: Search".to_string(),
            mode: InputMode::Normal,
            input_buffer: String::new(),
            alias_buffer: String::new(),
        };
        state.rebuild_rows();
        state
    }

    /// Re-reads rows from the session after the line-up changed.
    pub fn rebuild_rows(&mut self) {
        let mut rows = self.session.schedule().events().to_vec();
        rows.sort_by(|a, b| {
            a.name
                .to_lowercase()
                .cmp(&b.name.to_lowercase())
                .then(a.start.cmp(&b.start))
        });
        self.rows = rows;
        self.day_index = 0;
        self.refresh_conflicts();
        self.recalculate_view();
    }

    pub fn refresh_conflicts(&mut self) {
        self.conflicts = self.session.conflicts();
    }

    pub fn recalculate_view(&mut self) {
        if !self.input_buffer.is_empty() {
            let query = self.input_buffer.to_lowercase();
            self.view_indices = self
                .rows
                .iter()
                .enumerate()
                .filter(|(_, e)| e.name.to_lowercase().contains(&query))
                .map(|(i, _)| i)
                .collect();
        } else {
            self.view_indices = (0..self.rows.len()).collect();
        }
        let sel = self.list_state.selected().unwrap_or(0);
        if self.view_indices.is_empty() {
            self.list_state.select(Some(0));
        } else if sel >= self.view_indices.len() {
            self.list_state.select(Some(self.view_indices.len() - 1));
        }
    }

    pub fn selected_event(&self) -> Option<&Event> {
        let view_idx = self.list_state.selected()?;
        let idx = *self.view_indices.get(view_idx)?;
        self.rows.get(idx)
    }

    pub fn selected_stage(&self) -> Option<&String> {
        let idx = self.stage_state.selected()?;
        self.session.schedule().stage_names().get(idx)
    }

    pub fn day_count(&self) -> usize {
        self.session.schedule().days().len()
    }

    /// Applies a key action. Returns `false` when the app should exit.
    pub fn apply(&mut self, action: Action) -> bool {
        match action {
            Action::Quit => return false,
            Action::None => {}
            Action::Next => self.next(),
            Action::Previous => self.previous(),
            Action::JumpForward(step) => self.jump_forward(step),
            Action::JumpBackward(step) => self.jump_backward(step),
            Action::ToggleFocus => self.toggle_focus(),
            Action::SwitchView => {
                self.view = match self.view {
                    ViewMode::Lineup => ViewMode::Chart,
                    ViewMode::Chart => ViewMode::Lineup,
                }
            }
            Action::NextDay => {
                if self.day_index + 1 < self.day_count() {
                    self.day_index += 1;
                }
            }
            Action::PreviousDay => self.day_index = self.day_index.saturating_sub(1),
            Action::Toggle => self.toggle_current(),
            Action::ClearSelection => {
                self.session.clear_selection();
                self.refresh_conflicts();
                self.message = "Selection cleared.".to_string();
            }
            Action::ImportSelection => self.import_selection(),
            Action::ExportSelection => self.export_selection(),
            Action::ReloadLineup => self.reload_lineup(),
            Action::StartSearch => {
                self.mode = InputMode::Searching;
                self.active_focus = Focus::Main;
            }
            Action::StartAlias => self.start_alias(),
            Action::SaveAliases => self.save_aliases(),
            Action::TextInput(c) => match self.mode {
                InputMode::EditingAlias => self.alias_buffer.push(c),
                _ => {
                    self.input_buffer.push(c);
                    self.recalculate_view();
                }
            },
            Action::TextBackspace => match self.mode {
                InputMode::EditingAlias => {
                    self.alias_buffer.pop();
                }
                _ => {
                    self.input_buffer.pop();
                    self.recalculate_view();
                }
            },
            Action::Submit => {
                if self.mode == InputMode::EditingAlias {
                    self.commit_alias();
                }
                self.mode = InputMode::Normal;
            }
            Action::Cancel => {
                if self.mode == InputMode::EditingAlias {
                    self.alias_buffer.clear();
                } else {
                    self.input_buffer.clear();
                    self.recalculate_view();
                }
                self.mode = InputMode::Normal;
            }
        }
        true
    }

    fn toggle_current(&mut self) {
        match self.active_focus {
            Focus::Main => {
                if let Some(event) = self.selected_event().cloned() {
                    let picked = self.session.toggle(&event);
                    self.refresh_conflicts();
                    self.message = if !picked {
                        format!("Dropped {}", event.name)
                    } else if self.conflicts.contains(&event) {
                        format!("Picked {} (clashes!)", event.name)
                    } else {
                        format!("Picked {}", event.name)
                    };
                }
            }
            Focus::Sidebar => {
                if let Some(stage) = self.selected_stage().cloned() {
                    let shown = self.session.toggle_stage(&stage);
                    self.message = format!(
                        "{} {}",
                        stage,
                        if shown { "shown" } else { "hidden" }
                    );
                }
            }
        }
    }

    fn import_selection(&mut self) {
        let Some(path) = self.config.selection_path.clone() else {
            self.message = "Error: no selection file set (--selection)".to_string();
            return;
        };
        match self.session.import_selection(&path) {
            Ok(report) => {
                self.refresh_conflicts();
                self.message = if report.unknown.is_empty() && report.unresolved.is_empty() {
                    format!("Imported {} picks.", report.selection.len())
                } else {
                    format!(
                        "Imported {} picks, not in line-up: {}",
                        report.selection.len(),
                        report
                            .unknown
                            .iter()
                            .chain(report.unresolved.iter())
                            .cloned()
                            .collect::<Vec<_>>()
                            .join(", ")
                    )
                };
            }
            Err(e) => self.message = format!("Error: {:#}", e),
        }
    }

    fn export_selection(&mut self) {
        let Some(path) = self.config.selection_path.clone() else {
            self.message = "Error: no selection file set (--selection)".to_string();
            return;
        };
        self.message = match self.session.export_selection(&path) {
            Ok(()) => format!("Saved {} picks to {}", self.session.selection().len(), path.display()),
            Err(e) => format!("Error: {:#}", e),
        };
    }

    fn start_alias(&mut self) {
        let Some(event) = self.selected_event() else {
            return;
        };
        self.alias_buffer = self
            .session
            .aliases()
            .get(&event.name)
            .unwrap_or_default()
            .to_string();
        self.active_focus = Focus::Main;
        self.mode = InputMode::EditingAlias;
    }

    /// An empty alias drops the entry.
    fn commit_alias(&mut self) {
        let Some(name) = self.selected_event().map(|e| e.name.clone()) else {
            return;
        };
        let alias = std::mem::take(&mut self.alias_buffer);
        let alias = alias.trim();
        self.session.set_alias(&name, alias);
        self.message = if alias.is_empty() {
            format!("Removed alias for {}", name)
        } else {
            format!("{} shown as {}", name, alias)
        };
    }

    fn save_aliases(&mut self) {
        let Some(path) = self.config.alias_path.clone() else {
            self.message = "Error: no alias file set (--aliases)".to_string();
            return;
        };
        self.message = match self.session.save_aliases(&path) {
            Ok(()) => format!(
                "Saved {} aliases to {}",
                self.session.aliases().len(),
                path.display()
            ),
            Err(e) => format!("Error: {:#}", e),
        };
    }

    fn reload_lineup(&mut self) {
        let Some(path) = self.config.lineup_path.clone() else {
            self.message = "Error: no line-up file set".to_string();
            return;
        };
        match self.session.load_lineup(&path) {
            Ok(skipped) => {
                self.message = format!("Reloaded line-up ({} lines skipped)", skipped.len());
                self.rebuild_rows();
            }
            Err(e) => self.message = format!("Error: {:#}", e),
        }
    }

    pub fn next(&mut self) {
        match self.active_focus {
            Focus::Main => {
                let len = self.view_indices.len();
                if len == 0 {
                    return;
                }
                let i = match self.list_state.selected() {
                    Some(i) if i + 1 < len => i + 1,
                    _ => 0,
                };
                self.list_state.select(Some(i));
            }
            Focus::Sidebar => {
                let len = self.session.schedule().stage_names().len();
                if len == 0 {
                    return;
                }
                let i = match self.stage_state.selected() {
                    Some(i) if i + 1 < len => i + 1,
                    _ => 0,
                };
                self.stage_state.select(Some(i));
            }
        }
    }

    pub fn previous(&mut self) {
        match self.active_focus {
            Focus::Main => {
                let len = self.view_indices.len();
                if len == 0 {
                    return;
                }
                let i = match self.list_state.selected() {
                    Some(0) | None => len - 1,
                    Some(i) => i - 1,
                };
                self.list_state.select(Some(i));
            }
            Focus::Sidebar => {
                let len = self.session.schedule().stage_names().len();
                if len == 0 {
                    return;
                }
                let i = match self.stage_state.selected() {
                    Some(0) | None => len - 1,
                    Some(i) => i - 1,
                };
                self.stage_state.select(Some(i));
            }
        }
    }

    pub fn jump_forward(&mut self, step: usize) {
        if self.active_focus != Focus::Main || self.view_indices.is_empty() {
            return;
        }
        let current = self.list_state.selected().unwrap_or(0);
        let new_index = (current + step).min(self.view_indices.len() - 1);
        self.list_state.select(Some(new_index));
    }

    pub fn jump_backward(&mut self, step: usize) {
        if self.active_focus != Focus::Main || self.view_indices.is_empty() {
            return;
        }
        let current = self.list_state.selected().unwrap_or(0);
        self.list_state.select(Some(current.saturating_sub(step)));
    }

    pub fn toggle_focus(&mut self) {
        self.active_focus = match self.active_focus {
            Focus::Main => Focus::Sidebar,
            Focus::Sidebar => Focus::Main,
        }
    }
}
