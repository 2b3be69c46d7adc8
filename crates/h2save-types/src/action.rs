use crate::format::ExpansionFormat;
use std::fmt;

/// The three user-triggerable actions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Action {
    DownloadText,
    DownloadJson,
    ViewTree,
}

impl Action {
    pub const ALL: [Action; 3] = [Action::DownloadText, Action::DownloadJson, Action::ViewTree];

    /// Fixed action -> format mapping.
    pub fn format(&self) -> ExpansionFormat {
        match self {
            Action::DownloadText => ExpansionFormat::Text,
            Action::DownloadJson => ExpansionFormat::JsonPretty,
            Action::ViewTree => ExpansionFormat::Json,
        }
    }

    /// The action whose format is `format`.
    pub fn for_format(format: ExpansionFormat) -> Action {
        match format {
            ExpansionFormat::Text => Action::DownloadText,
            ExpansionFormat::JsonPretty => Action::DownloadJson,
            ExpansionFormat::Json => Action::ViewTree,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Action::DownloadText => "Download as text",
            Action::DownloadJson => "Download as JSON",
            Action::ViewTree => "View as tree",
        }
    }
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}
