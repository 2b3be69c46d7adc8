//! Session-wide state: current selection, error slot, action enablement
//! and the attempt counter that decides which completions may commit.

use h2save_types::{Action, ExpansionFormat, NormalizedError, SaveBuffer};
use std::fmt;

/// Single slot holding the last failure shown to the user.
#[derive(Debug, Default, Clone)]
pub struct ErrorSink {
    current: Option<NormalizedError>,
}

impl ErrorSink {
    pub fn clear(&mut self) {
        self.current = None;
    }

    /// Replace whatever is in the slot.
    pub fn set(&mut self, error: NormalizedError) {
        self.current = Some(error);
    }

    pub fn message(&self) -> Option<&str> {
        self.current.as_ref().map(NormalizedError::message)
    }

    pub fn current(&self) -> Option<&NormalizedError> {
        self.current.as_ref()
    }

    pub fn is_empty(&self) -> bool {
        self.current.is_none()
    }
}

/// Sequence number of one selection or expansion request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Attempt(u64);

impl Attempt {
    pub fn id(&self) -> u64 {
        self.0
    }
}

impl fmt::Display for Attempt {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Which actions the user may trigger. Depends only on whether a file is selected.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ActionEnablement {
    file_selected: bool,
}

impl ActionEnablement {
    pub fn from_selection(file_selected: bool) -> Self {
        Self { file_selected }
    }

    pub fn is_enabled(&self, _action: Action) -> bool {
        self.file_selected
    }

    pub fn enabled_actions(&self) -> Vec<Action> {
        Action::ALL
            .into_iter()
            .filter(|action| self.is_enabled(*action))
            .collect()
    }
}

/// Outcome of trying to commit a completion.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Commit {
    Applied,
    /// A newer attempt started in the meantime; nothing was changed.
    Stale,
}

/// Everything an expansion needs after it leaves the session.
#[derive(Debug, Clone)]
pub struct PendingExpansion {
    pub attempt: Attempt,
    pub buffer: SaveBuffer,
    pub format: ExpansionFormat,
}

#[derive(Debug, Default)]
pub struct Session {
    buffer: Option<SaveBuffer>,
    errors: ErrorSink,
    enablement: ActionEnablement,
    latest: u64,
}

impl Session {
    pub fn new() -> Self {
        Self::default()
    }

    fn next_attempt(&mut self) -> Attempt {
        self.latest += 1;
        Attempt(self.latest)
    }

    /// Latest attempt issued, if any.
    pub fn latest_attempt(&self) -> Option<Attempt> {
        (self.latest > 0).then_some(Attempt(self.latest))
    }

    pub fn is_current(&self, attempt: Attempt) -> bool {
        attempt.0 == self.latest
    }

    /// Start reading a newly chosen file.
    ///
    /// The previous buffer is dropped and actions stay disabled until the
    /// read commits.
    pub fn begin_selection(&mut self) -> Attempt {
        self.errors.clear();
        self.set_buffer(None);
        self.next_attempt()
    }

    pub fn complete_selection(
        &mut self,
        attempt: Attempt,
        result: Result<SaveBuffer, NormalizedError>,
    ) -> Commit {
        if !self.is_current(attempt) {
            tracing::debug!(%attempt, "dropping stale selection");
            return Commit::Stale;
        }

        match result {
            Ok(buffer) => {
                tracing::info!(%attempt, name = buffer.name(), bytes = buffer.len(), "file selected");
                self.set_buffer(Some(buffer));
            }
            Err(err) => {
                tracing::warn!(%attempt, error = %err, "selection failed");
                self.errors.set(err);
            }
        }
        Commit::Applied
    }

    /// Forget the current file. In-flight work is superseded.
    pub fn clear_selection(&mut self) {
        self.errors.clear();
        self.set_buffer(None);
        self.next_attempt();
    }

    /// Start an expansion for `action`, or `None` when the action is disabled.
    ///
    /// The error slot is cleared before anything is handed out.
    pub fn begin_expansion(&mut self, action: Action) -> Option<PendingExpansion> {
        if !self.enablement.is_enabled(action) {
            return None;
        }
        let buffer = self.buffer.clone()?;

        self.errors.clear();
        let attempt = self.next_attempt();
        tracing::debug!(%attempt, ?action, "expansion started");

        Some(PendingExpansion {
            attempt,
            buffer,
            format: action.format(),
        })
    }

    /// Record a failure for `attempt` if it is still current.
    pub fn fail(&mut self, attempt: Attempt, error: NormalizedError) -> Commit {
        if !self.is_current(attempt) {
            tracing::debug!(%attempt, error = %error, "dropping stale failure");
            return Commit::Stale;
        }
        tracing::warn!(%attempt, error = %error, "attempt failed");
        self.errors.set(error);
        Commit::Applied
    }

    pub fn selection(&self) -> Option<&SaveBuffer> {
        self.buffer.as_ref()
    }

    pub fn enablement(&self) -> ActionEnablement {
        self.enablement
    }

    pub fn errors(&self) -> &ErrorSink {
        &self.errors
    }

    pub fn error_message(&self) -> Option<&str> {
        self.errors.message()
    }

    fn set_buffer(&mut self, buffer: Option<SaveBuffer>) {
        self.enablement = ActionEnablement::from_selection(buffer.is_some());
        self.buffer = buffer;
    }
}
