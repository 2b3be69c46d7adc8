//! Runtime for h2save: the session, the pipeline components and the
//! configuration they are built from.
//!
//! The flow is file selection ([`byte_source`]) into a [`Session`], then an
//! action through the [`DecoderGateway`], then the [`DeliveryRouter`] which
//! either writes a download or hands JSON to the [`TreePresenter`].

pub mod byte_source;
pub mod config;
pub mod delivery;
pub mod error;
pub mod gateway;
pub mod pipeline;
pub mod presenter;
pub mod session;
pub mod tree;

pub use byte_source::{display_name, read_save};
pub use config::{Config, resolve_config_path};
pub use delivery::{Delivery, DeliveryRouter, DirectoryDownloads, DownloadSink};
pub use error::{Error, Result};
pub use gateway::{DecoderGateway, UNRECOGNIZED_FAILURE, normalize_failure};
pub use pipeline::{Outcome, Pipeline};
pub use presenter::{JsonTreeWidget, TreePresenter, TreeWidget};
pub use session::{ActionEnablement, Attempt, Commit, ErrorSink, PendingExpansion, Session};
pub use tree::{FlatRow, JsonTree, NodeKind, NodePath, TreeNode};
