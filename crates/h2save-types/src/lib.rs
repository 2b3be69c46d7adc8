pub mod action;
pub mod buffer;
pub mod decode;
pub mod error;
pub mod format;

pub use action::Action;
pub use buffer::SaveBuffer;
pub use decode::{DecodeFailure, SaveDecoder};
pub use error::{ErrorKind, ExpansionResult, NormalizedError};
pub use format::{DeliveryMode, ExpansionFormat, ParseFormatError};
