use super::tui_event::TuiEvent;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use h2save_format::{Hades2Decoder, SaveEntry};
use h2save_runtime::{Attempt, Delivery, DirectoryDownloads, JsonTreeWidget, Outcome, Pipeline};
use h2save_types::Action;
use ratatui::widgets::ListState;
use std::path::PathBuf;

pub(crate) type TuiPipeline = Pipeline<Hades2Decoder, DirectoryDownloads, JsonTreeWidget>;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Focus {
    Input,
    Saves,
    Tree,
}

impl Focus {
    fn next(self) -> Self {
        match self {
            Focus::Input => Focus::Saves,
            Focus::Saves => Focus::Tree,
            Focus::Tree => Focus::Input,
        }
    }
}

/// Work the UI loop has to start on behalf of a key press.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum Command {
    Select(PathBuf),
    ClearSelection,
    Run(Action),
}

pub(crate) struct AppState {
    pub pipeline: TuiPipeline,
    pub focus: Focus,
    pub input: String,
    pub saves: Vec<SaveEntry>,
    /// Why `saves` is empty, when detection failed.
    pub saves_hint: Option<String>,
    pub saves_list: ListState,
    pub tree_list: ListState,
    /// Attempt whose completion is still outstanding, with a description.
    pub busy: Option<(Attempt, String)>,
    /// Result of the last successful delivery.
    pub note: Option<String>,
    pub should_quit: bool,
}

impl AppState {
    pub fn new(pipeline: TuiPipeline, saves: Vec<SaveEntry>, saves_hint: Option<String>) -> Self {
        let mut saves_list = ListState::default();
        if !saves.is_empty() {
            saves_list.select(Some(0));
        }

        Self {
            pipeline,
            focus: Focus::Input,
            input: String::new(),
            saves,
            saves_hint,
            saves_list,
            tree_list: ListState::default(),
            busy: None,
            note: None,
            should_quit: false,
        }
    }

    pub fn handle_key(&mut self, key: KeyEvent) -> Option<Command> {
        if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
            self.should_quit = true;
            return None;
        }

        match key.code {
            KeyCode::Esc => {
                self.should_quit = true;
                return None;
            }
            KeyCode::Tab => {
                self.focus = self.focus.next();
                return None;
            }
            KeyCode::F(n @ 1..=3) => return self.run_action(n),
            _ => {}
        }

        match self.focus {
            Focus::Input => self.handle_input_key(key),
            Focus::Saves => self.handle_saves_key(key),
            Focus::Tree => self.handle_tree_key(key),
        }
    }

    fn handle_input_key(&mut self, key: KeyEvent) -> Option<Command> {
        match key.code {
            KeyCode::Char('u') if key.modifiers.contains(KeyModifiers::CONTROL) => {
                self.input.clear();
                None
            }
            KeyCode::Char(c) => {
                self.input.push(c);
                None
            }
            KeyCode::Backspace => {
                self.input.pop();
                None
            }
            KeyCode::Enter => {
                let path = self.input.trim();
                if path.is_empty() {
                    Some(Command::ClearSelection)
                } else {
                    Some(Command::Select(PathBuf::from(path)))
                }
            }
            _ => None,
        }
    }

    fn handle_saves_key(&mut self, key: KeyEvent) -> Option<Command> {
        match key.code {
            KeyCode::Char('q') => {
                self.should_quit = true;
                None
            }
            KeyCode::Char(c @ '1'..='3') => self.run_action(c as u8 - b'0'),
            KeyCode::Up | KeyCode::Char('k') => {
                move_cursor(&mut self.saves_list, self.saves.len(), -1);
                None
            }
            KeyCode::Down | KeyCode::Char('j') => {
                move_cursor(&mut self.saves_list, self.saves.len(), 1);
                None
            }
            KeyCode::Enter => {
                let save = self.saves.get(self.saves_list.selected()?)?;
                self.input = save.path.display().to_string();
                Some(Command::Select(save.path.clone()))
            }
            _ => None,
        }
    }

    fn handle_tree_key(&mut self, key: KeyEvent) -> Option<Command> {
        let rows = self.tree_len();
        match key.code {
            KeyCode::Char('q') => self.should_quit = true,
            KeyCode::Char(c @ '1'..='3') => return self.run_action(c as u8 - b'0'),
            KeyCode::Up | KeyCode::Char('k') => move_cursor(&mut self.tree_list, rows, -1),
            KeyCode::Down | KeyCode::Char('j') => move_cursor(&mut self.tree_list, rows, 1),
            KeyCode::PageUp => move_cursor(&mut self.tree_list, rows, -10),
            KeyCode::PageDown => move_cursor(&mut self.tree_list, rows, 10),
            KeyCode::Home => move_cursor(&mut self.tree_list, rows, -(rows as isize)),
            KeyCode::End => move_cursor(&mut self.tree_list, rows, rows as isize),
            KeyCode::Enter | KeyCode::Char(' ') => self.toggle_at_cursor(),
            KeyCode::Char('e') => {
                self.pipeline.presenter_mut().expand_all();
                self.clamp_tree_cursor();
            }
            KeyCode::Char('c') => {
                self.pipeline.presenter_mut().collapse_all();
                self.clamp_tree_cursor();
            }
            _ => {}
        }
        None
    }

    fn run_action(&mut self, n: u8) -> Option<Command> {
        let action = Action::ALL.get(usize::from(n).checked_sub(1)?).copied()?;
        self.pipeline
            .session()
            .enablement()
            .is_enabled(action)
            .then_some(Command::Run(action))
    }

    fn toggle_at_cursor(&mut self) {
        let Some(cursor) = self.tree_list.selected() else {
            return;
        };
        let path = self
            .pipeline
            .presenter()
            .tree()
            .and_then(|tree| tree.visible_rows().get(cursor).map(|row| row.path.clone()));
        if let Some(path) = path {
            let toggled = self.pipeline.presenter_mut().toggle(&path);
            tracing::trace!(%path, toggled, "toggle");
        }
        self.clamp_tree_cursor();
    }

    pub fn tree_len(&self) -> usize {
        self.pipeline
            .presenter()
            .tree()
            .map_or(0, |tree| tree.visible_rows().len())
    }

    fn clamp_tree_cursor(&mut self) {
        let rows = self.tree_len();
        let selected = match self.tree_list.selected() {
            _ if rows == 0 => None,
            Some(cursor) => Some(cursor.min(rows - 1)),
            None => Some(0),
        };
        self.tree_list.select(selected);
    }

    /// Note that `attempt` is outstanding.
    pub fn mark_busy(&mut self, attempt: Attempt, label: String) {
        self.note = None;
        self.busy = Some((attempt, label));
    }

    /// Commit a completion reported by a spawned task.
    pub fn apply(&mut self, event: TuiEvent) {
        match event {
            TuiEvent::Selected { attempt, result } => {
                self.finish(attempt);
                self.pipeline.complete_selection(attempt, result);
            }
            TuiEvent::Expanded { pending, result } => {
                self.finish(pending.attempt);
                match self.pipeline.complete(&pending, result) {
                    Outcome::Delivered(Delivery::Downloaded(path)) => {
                        self.note = Some(format!("Wrote {}", path.display()));
                    }
                    Outcome::Delivered(Delivery::Presented) => {
                        self.note = Some(format!("Showing {}", pending.buffer.name()));
                        self.tree_list.select(Some(0));
                        self.clamp_tree_cursor();
                        self.focus = Focus::Tree;
                    }
                    Outcome::Delivered(Delivery::Skipped) | Outcome::Failed(_) | Outcome::Stale => {}
                }
            }
        }
    }

    fn finish(&mut self, attempt: Attempt) {
        if self.busy.as_ref().is_some_and(|(busy, _)| *busy == attempt) {
            self.busy = None;
        }
    }
}

fn move_cursor(list: &mut ListState, len: usize, delta: isize) {
    if len == 0 {
        list.select(None);
        return;
    }
    let current = list.selected().unwrap_or(0) as isize;
    let next = (current + delta).clamp(0, len as isize - 1);
    list.select(Some(next as usize));
}
