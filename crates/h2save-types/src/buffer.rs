use std::fmt;
use std::sync::Arc;

/// Full contents of one selected savefile plus the name it was selected under.
///
/// The bytes are immutable. Cloning shares them, which lets an in-flight
/// expansion keep reading after the session has moved on to another file.
#[derive(Clone)]
pub struct SaveBuffer {
    name: String,
    bytes: Arc<[u8]>,
}

impl SaveBuffer {
    pub fn new(name: impl Into<String>, bytes: impl Into<Arc<[u8]>>) -> Self {
        Self {
            name: name.into(),
            bytes: bytes.into(),
        }
    }

    /// Original file name, used only to name downloads.
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn bytes(&self) -> &[u8] {
        &self.bytes
    }

    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }
}

impl fmt::Debug for SaveBuffer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SaveBuffer")
            .field("name", &self.name)
            .field("len", &self.bytes.len())
            .finish()
    }
}
