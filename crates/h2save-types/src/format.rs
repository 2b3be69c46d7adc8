use std::fmt;
use std::str::FromStr;

/// Output shape requested from the decoder.
///
/// The format also fixes how the result is delivered: `text` and
/// `json-pretty` are written out as files, `json` is shown as a tree.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ExpansionFormat {
    Text,
    Json,
    JsonPretty,
}

/// Where a successful expansion ends up.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeliveryMode {
    /// Written to `<original filename>.<extension>`.
    Download { extension: &'static str },
    /// Handed to the tree presenter, nothing is written.
    Tree,
}

impl ExpansionFormat {
    pub const ALL: [ExpansionFormat; 3] = [
        ExpansionFormat::Text,
        ExpansionFormat::Json,
        ExpansionFormat::JsonPretty,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ExpansionFormat::Text => "text",
            ExpansionFormat::Json => "json",
            ExpansionFormat::JsonPretty => "json-pretty",
        }
    }

    pub fn delivery_mode(&self) -> DeliveryMode {
        match self {
            ExpansionFormat::Text => DeliveryMode::Download { extension: "txt" },
            ExpansionFormat::JsonPretty => DeliveryMode::Download { extension: "json" },
            ExpansionFormat::Json => DeliveryMode::Tree,
        }
    }

    /// File name of the download artifact for `original`, or `None` when
    /// this format never produces one.
    pub fn artifact_name(&self, original: &str) -> Option<String> {
        match self.delivery_mode() {
            DeliveryMode::Download { extension } => Some(format!("{}.{}", original, extension)),
            DeliveryMode::Tree => None,
        }
    }
}

impl fmt::Display for ExpansionFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseFormatError(String);

impl fmt::Display for ParseFormatError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "unknown format `{}`, expected `text`, `json` or `json-pretty`",
            self.0
        )
    }
}

impl std::error::Error for ParseFormatError {}

impl FromStr for ExpansionFormat {
    type Err = ParseFormatError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ExpansionFormat::ALL
            .into_iter()
            .find(|format| format.as_str() == s)
            .ok_or_else(|| ParseFormatError(s.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_artifact_names() {
        assert_eq!(
            ExpansionFormat::Text.artifact_name("save1.sav").as_deref(),
            Some("save1.sav.txt")
        );
        assert_eq!(
            ExpansionFormat::JsonPretty.artifact_name("save1.sav").as_deref(),
            Some("save1.sav.json")
        );
        assert_eq!(ExpansionFormat::Json.artifact_name("save1.sav"), None);
    }

    #[test]
    fn test_parse_round_trips_names() {
        for format in ExpansionFormat::ALL {
            assert_eq!(format.as_str().parse::<ExpansionFormat>(), Ok(format));
        }
        assert!("yaml".parse::<ExpansionFormat>().is_err());
    }
}
