use futures::FutureExt;
use h2save_types::{
    DecodeFailure, ExpansionFormat, ExpansionResult, NormalizedError, SaveBuffer, SaveDecoder,
};
use std::any::Any;
use std::panic::AssertUnwindSafe;
use std::rc::Rc;

/// Detail used when a failure value carries nothing printable.
pub const UNRECOGNIZED_FAILURE: &str = "unrecognized failure value";

/// Single entry point to the decode capability.
///
/// Cloning is cheap and shares the decoder, so each spawned expansion can
/// own its gateway.
pub struct DecoderGateway<D> {
    decoder: Rc<D>,
}

impl<D> Clone for DecoderGateway<D> {
    fn clone(&self) -> Self {
        Self {
            decoder: Rc::clone(&self.decoder),
        }
    }
}

impl<D: SaveDecoder> DecoderGateway<D> {
    pub fn new(decoder: D) -> Self {
        Self {
            decoder: Rc::new(decoder),
        }
    }

    /// Call the decoder exactly once and normalize whatever comes back.
    ///
    /// Panics inside the decoder are caught and reported like any other
    /// failure.
    pub async fn expand(&self, buffer: &SaveBuffer, format: ExpansionFormat) -> ExpansionResult {
        tracing::debug!(name = buffer.name(), bytes = buffer.len(), %format, "decoding");

        let decoder: &D = &self.decoder;
        let bytes = buffer.bytes();
        let outcome = match std::panic::catch_unwind(AssertUnwindSafe(move || {
            decoder.expand(bytes, format)
        })) {
            Ok(future) => AssertUnwindSafe(future).catch_unwind().await,
            Err(payload) => Err(payload),
        };

        let failure = match outcome {
            Ok(Ok(payload)) => {
                tracing::debug!(%format, len = payload.len(), "decoded");
                return Ok(payload);
            }
            Ok(Err(failure)) => failure,
            Err(payload) => DecodeFailure::from_panic(payload),
        };

        let detail = normalize_failure(failure);
        tracing::warn!(name = buffer.name(), %format, %detail, "decode failed");
        Err(NormalizedError::decode(detail))
    }
}

/// Reduce any decoder failure to the detail text shown after
/// `Could not parse savefile: `.
///
/// Structured errors contribute their `Display` text and messages are used
/// as is. Opaque values are printed when they are a primitive (number,
/// bool, char); anything else becomes [`UNRECOGNIZED_FAILURE`].
pub fn normalize_failure(failure: DecodeFailure) -> String {
    match failure {
        DecodeFailure::Error(err) => err.to_string(),
        DecodeFailure::Message(message) => message,
        DecodeFailure::Opaque(value) => describe_opaque(value.as_ref()),
    }
}

fn describe_opaque(value: &(dyn Any + Send)) -> String {
    macro_rules! try_display {
        ($($ty:ty),*) => {
            $(
                if let Some(v) = value.downcast_ref::<$ty>() {
                    return v.to_string();
                }
            )*
        };
    }

    try_display!(i8, i16, i32, i64, i128, isize, u8, u16, u32, u64, u128, usize, f32, f64, bool, char);
    UNRECOGNIZED_FAILURE.to_string()
}
