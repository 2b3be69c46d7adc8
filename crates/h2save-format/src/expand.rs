use crate::error::Result;
use crate::savefile::Savefile;
use h2save_types::{DecodeFailure, ExpansionFormat, SaveDecoder};

/// Decode a savefile and render its lua state in `format`.
pub fn expand_savefile(data: &[u8], format: ExpansionFormat) -> Result<String> {
    let savefile = Savefile::parse(data)?;
    let lua_state = savefile.parse_lua_state()?;

    let text = match format {
        ExpansionFormat::Text => format!("{:#?}", lua_state),
        ExpansionFormat::Json => serde_json::to_string(&lua_state)?,
        ExpansionFormat::JsonPretty => serde_json::to_string_pretty(&lua_state)?,
    };

    Ok(text)
}

/// Default decode capability backed by [`expand_savefile`].
///
/// Decoding is synchronous; the returned future is ready on first poll.
#[derive(Debug, Clone, Copy, Default)]
pub struct Hades2Decoder;

impl SaveDecoder for Hades2Decoder {
    async fn expand(
        &self,
        bytes: &[u8],
        format: ExpansionFormat,
    ) -> std::result::Result<String, DecodeFailure> {
        expand_savefile(bytes, format).map_err(DecodeFailure::from)
    }
}
