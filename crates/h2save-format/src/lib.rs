//! Reader for Hades II savefiles.
//!
//! A savefile is a small binary header followed by an LZ4-compressed
//! luabins blob holding the game's lua state. [`Hades2Decoder`] plugs this
//! reader into the expansion pipeline as its decode capability.

pub mod error;
pub mod expand;
pub mod locate;
pub mod luabins;
mod reader;
pub mod savefile;

pub use error::{Error, Result};
pub use expand::{Hades2Decoder, expand_savefile};
pub use locate::{LocateError, SaveEntry, list_saves, locate_save_dir};
pub use luabins::{LuaValue, MAX_TABLE_DEPTH, read_luabins};
pub use savefile::{SAVEFILE_VERSION, Savefile};
