use h2save_runtime::{Attempt, PendingExpansion};
use h2save_types::{ExpansionResult, NormalizedError, SaveBuffer};

/// Completions reported back to the UI loop by spawned tasks.
#[derive(Debug)]
pub(crate) enum TuiEvent {
    Selected {
        attempt: Attempt,
        result: Result<SaveBuffer, NormalizedError>,
    },
    Expanded {
        pending: PendingExpansion,
        result: ExpansionResult,
    },
}
