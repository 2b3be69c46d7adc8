use crate::format::ExpansionFormat;
use std::any::Any;
use std::fmt;
use std::future::Future;

/// Every shape a decoder failure can take before it is normalized.
pub enum DecodeFailure {
    /// A structured error carrying its own message.
    Error(Box<dyn std::error::Error + Send + Sync>),
    /// A bare message.
    Message(String),
    /// Any other value, e.g. a non-string panic payload.
    Opaque(Box<dyn Any + Send>),
}

impl DecodeFailure {
    pub fn message(message: impl Into<String>) -> Self {
        DecodeFailure::Message(message.into())
    }

    pub fn opaque(value: impl Any + Send) -> Self {
        DecodeFailure::Opaque(Box::new(value))
    }

    /// Classify a panic payload caught around a decode call.
    ///
    /// `panic!` with a message produces `&'static str` or `String` payloads;
    /// `std::panic::panic_any` can carry anything.
    pub fn from_panic(payload: Box<dyn Any + Send>) -> Self {
        let payload = match payload.downcast::<String>() {
            Ok(message) => return DecodeFailure::Message(*message),
            Err(payload) => payload,
        };
        match payload.downcast::<&'static str>() {
            Ok(message) => DecodeFailure::Message((*message).to_string()),
            Err(payload) => DecodeFailure::Opaque(payload),
        }
    }
}

impl<E> From<E> for DecodeFailure
where
    E: std::error::Error + Send + Sync + 'static,
{
    fn from(err: E) -> Self {
        DecodeFailure::Error(Box::new(err))
    }
}

impl fmt::Debug for DecodeFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DecodeFailure::Error(err) => f.debug_tuple("Error").field(err).finish(),
            DecodeFailure::Message(message) => f.debug_tuple("Message").field(message).finish(),
            DecodeFailure::Opaque(_) => f.write_str("Opaque(..)"),
        }
    }
}

/// The decode capability: turns savefile bytes into one of the expansion formats.
///
/// Implementations may finish synchronously; callers always await the result.
pub trait SaveDecoder {
    fn expand(
        &self,
        bytes: &[u8],
        format: ExpansionFormat,
    ) -> impl Future<Output = Result<String, DecodeFailure>>;
}
