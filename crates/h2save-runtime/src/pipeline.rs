use crate::byte_source::read_save;
use crate::delivery::{Delivery, DeliveryRouter, DownloadSink};
use crate::gateway::DecoderGateway;
use crate::presenter::{TreePresenter, TreeWidget};
use crate::session::{Attempt, Commit, PendingExpansion, Session};
use h2save_types::{Action, ExpansionResult, NormalizedError, SaveBuffer, SaveDecoder};
use std::path::Path;

/// How a completed expansion ended.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    /// Superseded by a newer attempt; nothing was committed.
    Stale,
    Delivered(Delivery),
    /// The failure now shown in the error sink.
    Failed(NormalizedError),
}

/// Selection, expansion and delivery wired around one [`Session`].
///
/// Each step is split into a synchronous `begin` and a `complete` so the
/// caller can run the suspending part elsewhere and commit later; `select`
/// and `run` do both in one go.
pub struct Pipeline<D, S, W: TreeWidget> {
    session: Session,
    gateway: DecoderGateway<D>,
    router: DeliveryRouter<S>,
    presenter: TreePresenter<W>,
}

impl<D, S, W> Pipeline<D, S, W>
where
    D: SaveDecoder,
    S: DownloadSink,
    W: TreeWidget,
{
    pub fn new(decoder: D, sink: S, presenter: TreePresenter<W>) -> Self {
        Self {
            session: Session::new(),
            gateway: DecoderGateway::new(decoder),
            router: DeliveryRouter::new(sink),
            presenter,
        }
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    pub fn presenter(&self) -> &TreePresenter<W> {
        &self.presenter
    }

    pub fn presenter_mut(&mut self) -> &mut TreePresenter<W> {
        &mut self.presenter
    }

    /// A gateway handle that can be moved into a spawned task.
    pub fn gateway(&self) -> DecoderGateway<D> {
        self.gateway.clone()
    }

    pub fn begin_selection(&mut self) -> Attempt {
        self.session.begin_selection()
    }

    pub fn complete_selection(
        &mut self,
        attempt: Attempt,
        result: Result<SaveBuffer, NormalizedError>,
    ) -> Commit {
        self.session.complete_selection(attempt, result)
    }

    pub fn clear_selection(&mut self) {
        self.session.clear_selection();
    }

    /// Read `path` and make it the current selection.
    pub async fn select(&mut self, path: &Path) -> Commit {
        let attempt = self.begin_selection();
        let result = read_save(path).await;
        self.complete_selection(attempt, result)
    }

    /// Start `action`; `None` when it is disabled.
    pub fn begin(&mut self, action: Action) -> Option<PendingExpansion> {
        self.session.begin_expansion(action)
    }

    /// Commit the result of `pending` if it still belongs to the latest attempt.
    pub fn complete(&mut self, pending: &PendingExpansion, result: ExpansionResult) -> Outcome {
        if !self.session.is_current(pending.attempt) {
            tracing::debug!(attempt = %pending.attempt, format = %pending.format, "dropping stale expansion");
            return Outcome::Stale;
        }

        if let Err(err) = &result {
            self.session.fail(pending.attempt, err.clone());
            return Outcome::Failed(err.clone());
        }

        match self.router.deliver(
            result,
            pending.format,
            pending.buffer.name(),
            &mut self.presenter,
        ) {
            Ok(delivery) => Outcome::Delivered(delivery),
            Err(err) => {
                self.session.fail(pending.attempt, err.clone());
                Outcome::Failed(err)
            }
        }
    }

    /// Expand the current selection for `action` and deliver the result.
    pub async fn run(&mut self, action: Action) -> Option<Outcome> {
        let pending = self.begin(action)?;
        let result = self.gateway.expand(&pending.buffer, pending.format).await;
        Some(self.complete(&pending, result))
    }
}
