//! Decode capabilities with scripted behavior.

use h2save_types::{DecodeFailure, ExpansionFormat, SaveDecoder};
use std::cell::Cell;
use std::rc::Rc;

/// Decoder that answers every call with `script` and counts the calls.
pub struct ScriptedDecoder<F> {
    script: F,
    calls: Rc<Cell<usize>>,
}

impl<F> ScriptedDecoder<F>
where
    F: Fn(&[u8], ExpansionFormat) -> Result<String, DecodeFailure>,
{
    pub fn new(script: F) -> Self {
        Self {
            script,
            calls: Rc::new(Cell::new(0)),
        }
    }

    /// Shared counter, still readable after the decoder has been moved.
    pub fn call_counter(&self) -> Rc<Cell<usize>> {
        Rc::clone(&self.calls)
    }
}

impl<F> SaveDecoder for ScriptedDecoder<F>
where
    F: Fn(&[u8], ExpansionFormat) -> Result<String, DecodeFailure>,
{
    async fn expand(
        &self,
        bytes: &[u8],
        format: ExpansionFormat,
    ) -> Result<String, DecodeFailure> {
        self.calls.set(self.calls.get() + 1);
        (self.script)(bytes, format)
    }
}

/// Succeeds for every buffer, describing it in the requested format.
pub fn describing_decoder()
-> ScriptedDecoder<impl Fn(&[u8], ExpansionFormat) -> Result<String, DecodeFailure>> {
    ScriptedDecoder::new(|bytes: &[u8], format: ExpansionFormat| {
        Ok(match format {
            ExpansionFormat::Text => format!("{} bytes", bytes.len()),
            ExpansionFormat::Json => {
                format!(
                    r#"{{"bytes":{},"head":{}}}"#,
                    bytes.len(),
                    bytes.first().copied().unwrap_or_default()
                )
            }
            ExpansionFormat::JsonPretty => {
                format!("{{\n  \"bytes\": {}\n}}", bytes.len())
            }
        })
    })
}

/// Fails every call with a plain message.
pub fn failing_decoder(
    message: &'static str,
) -> ScriptedDecoder<impl Fn(&[u8], ExpansionFormat) -> Result<String, DecodeFailure>> {
    ScriptedDecoder::new(move |_: &[u8], _: ExpansionFormat| Err(DecodeFailure::message(message)))
}
