//! Synthetic savefiles.
//!
//! Encodes the same layout the decoder reads: `SGB1` header, then an
//! LZ4 block holding a luabins blob.

/// Lua value used to build fixture state.
#[derive(Debug, Clone)]
pub enum Lua {
    Nil,
    Bool(bool),
    Number(f64),
    Str(String),
    Table(Vec<(Lua, Lua)>),
}

impl Lua {
    pub fn str(s: &str) -> Self {
        Lua::Str(s.to_string())
    }

    /// Table with string keys, in the given order.
    pub fn table<'a>(entries: impl IntoIterator<Item = (&'a str, Lua)>) -> Self {
        Lua::Table(
            entries
                .into_iter()
                .map(|(key, value)| (Lua::str(key), value))
                .collect(),
        )
    }

    fn encode_into(&self, out: &mut Vec<u8>) {
        match self {
            Lua::Nil => out.push(b'-'),
            Lua::Bool(false) => out.push(b'0'),
            Lua::Bool(true) => out.push(b'1'),
            Lua::Number(n) => {
                out.push(b'N');
                out.extend_from_slice(&n.to_le_bytes());
            }
            Lua::Str(s) => {
                out.push(b'S');
                push_str(out, s);
            }
            Lua::Table(entries) => {
                out.push(b'T');
                // Everything goes in the hash part; the reader only needs the total.
                out.extend_from_slice(&0u32.to_le_bytes());
                out.extend_from_slice(&(entries.len() as u32).to_le_bytes());
                for (key, value) in entries {
                    key.encode_into(out);
                    value.encode_into(out);
                }
            }
        }
    }
}

/// Encode `values` as a complete luabins blob.
pub fn luabins(values: &[Lua]) -> Vec<u8> {
    let mut out = vec![values.len() as u8];
    for value in values {
        value.encode_into(&mut out);
    }
    out
}

/// Small but nested state: two top-level tables, an underscore key, mixed scalars.
pub fn sample_state() -> Lua {
    Lua::table([
        (
            "GameState",
            Lua::table([
                ("Resources", Lua::table([("MetaCurrency", Lua::Number(120.0))])),
                ("_Version", Lua::Number(3.0)),
                ("Flags", Lua::table([("Hard", Lua::Bool(false))])),
            ]),
        ),
        (
            "CurrentRun",
            Lua::table([
                ("Hero", Lua::str("Melinoe")),
                ("Depth", Lua::Number(4.5)),
                ("Boon", Lua::Nil),
            ]),
        ),
    ])
}

/// `levels` tables, each holding the next under `Inner`, around a nil.
pub fn nested_state(levels: usize) -> Lua {
    (0..levels).fold(Lua::Nil, |inner, _| Lua::table([("Inner", inner)]))
}

/// Raw luabins blob of `levels` nested tables, built without recursion so it
/// can go far deeper than any decoder accepts.
pub fn nested_table_blob(levels: usize) -> Vec<u8> {
    let mut out = vec![1];
    for _ in 0..levels {
        out.push(b'T');
        out.extend_from_slice(&0u32.to_le_bytes());
        out.extend_from_slice(&1u32.to_le_bytes());
        out.push(b'1');
    }
    out.push(b'-');
    out
}

fn push_str(out: &mut Vec<u8>, s: &str) {
    out.extend_from_slice(&(s.len() as u32).to_le_bytes());
    out.extend_from_slice(s.as_bytes());
}

/// Builder for savefile bytes.
///
/// Defaults produce a valid version 17 savefile holding [`sample_state`].
#[derive(Debug, Clone)]
pub struct SavefileBuilder {
    signature: [u8; 4],
    version: u32,
    location: String,
    runs: u32,
    lua_keys: Vec<String>,
    lua_blob: Vec<u8>,
    trailing: Vec<u8>,
}

impl Default for SavefileBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl SavefileBuilder {
    pub fn new() -> Self {
        Self {
            signature: *b"SGB1",
            version: 17,
            location: "Hub_PreRun".to_string(),
            runs: 11,
            lua_keys: vec!["GameState".to_string(), "CurrentRun".to_string()],
            lua_blob: luabins(&[sample_state()]),
            trailing: Vec::new(),
        }
    }

    pub fn with_state(mut self, state: Lua) -> Self {
        self.lua_blob = luabins(&[state]);
        self
    }

    /// Replace the luabins blob verbatim, e.g. with several top-level values.
    pub fn with_lua_blob(mut self, blob: Vec<u8>) -> Self {
        self.lua_blob = blob;
        self
    }

    pub fn with_signature(mut self, signature: [u8; 4]) -> Self {
        self.signature = signature;
        self
    }

    pub fn with_version(mut self, version: u32) -> Self {
        self.version = version;
        self
    }

    pub fn with_location(mut self, location: &str) -> Self {
        self.location = location.to_string();
        self
    }

    /// Zero-based run count as stored on disk.
    pub fn with_stored_runs(mut self, runs: u32) -> Self {
        self.runs = runs;
        self
    }

    pub fn with_trailing_bytes(mut self, bytes: &[u8]) -> Self {
        self.trailing = bytes.to_vec();
        self
    }

    pub fn build(&self) -> Vec<u8> {
        let mut out = Vec::new();
        out.extend_from_slice(&self.signature);
        out.extend_from_slice(&[0xde, 0xad, 0xbe, 0xef]);
        out.extend_from_slice(&self.version.to_le_bytes());
        out.extend_from_slice(&1_700_000_000u64.to_le_bytes());
        push_str(&mut out, &self.location);
        out.extend_from_slice(&self.runs.to_le_bytes());
        out.extend_from_slice(&250u32.to_le_bytes());
        out.extend_from_slice(&8u32.to_le_bytes());
        out.extend_from_slice(&2u32.to_le_bytes());
        out.push(0);
        out.push(1);

        out.extend_from_slice(&(self.lua_keys.len() as u32).to_le_bytes());
        for key in &self.lua_keys {
            push_str(&mut out, key);
        }

        push_str(&mut out, "F_Opening01");
        push_str(&mut out, "F_Opening02");

        let compressed = lz4_flex::block::compress(&self.lua_blob);
        out.extend_from_slice(&(compressed.len() as u32).to_le_bytes());
        out.extend_from_slice(&compressed);
        out.extend_from_slice(&self.trailing);
        out
    }
}
