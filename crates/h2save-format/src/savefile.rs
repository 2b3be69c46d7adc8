use crate::error::{Error, Result};
use crate::luabins::{LuaValue, read_luabins};
use crate::reader::{
    expect_end, read_array, read_bool, read_bytes, read_bytes_array, read_str_prefix, read_u32,
    read_u64,
};
use std::fmt;

pub const SAVEFILE_VERSION: u32 = 17;

const SIGNATURE: [u8; 4] = *b"SGB1";

/// Upper bound for the decompressed lua state.
const MAX_LUA_STATE_SIZE: usize = 15_679_488;

/// Parsed savefile header plus the decompressed lua state bytes.
#[derive(Clone)]
pub struct Savefile {
    pub checksum: [u8; 4],
    pub timestamp: u64,
    pub location: String,
    pub runs: u32,
    pub accumulated_meta_points: u32,
    pub active_shrine_points: u32,
    pub grasp: u32,
    pub easy_mode: bool,
    pub hard_mode: bool,
    pub lua_keys: Vec<String>,
    pub current_map_name: String,
    pub start_next_map: String,
    /// Empty when parsed with [`Savefile::parse_header_only`].
    pub lua_state: Vec<u8>,
}

impl fmt::Debug for Savefile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Savefile")
            .field("checksum", &self.checksum)
            .field("location", &self.location)
            .field("current_map_name", &self.current_map_name)
            .field("start_next_map", &self.start_next_map)
            .field("runs", &self.runs)
            .field("accumulated_meta_points", &self.accumulated_meta_points)
            .field("active_shrine_points", &self.active_shrine_points)
            .field("grasp", &self.grasp)
            .field("easy_mode", &self.easy_mode)
            .field("hard_mode", &self.hard_mode)
            .field("lua_keys", &self.lua_keys)
            .field("lua_state", &format_args!("<{} bytes>", self.lua_state.len()))
            .finish()
    }
}

impl Savefile {
    pub fn parse(mut data: &[u8]) -> Result<Savefile> {
        parse_inner(&mut data, true)
    }

    /// Parse the header and skip decompressing the lua state.
    pub fn parse_header_only(mut data: &[u8]) -> Result<Savefile> {
        parse_inner(&mut data, false)
    }

    /// Decode the lua state, which must hold exactly one top-level value.
    pub fn parse_lua_state(&self) -> Result<LuaValue> {
        let mut values = read_luabins(&mut self.lua_state.as_slice())?;
        if values.len() != 1 {
            return Err(Error::LuaState(format!(
                "expected exactly one top-level value, found {}",
                values.len()
            )));
        }

        Ok(values.remove(0))
    }
}

fn parse_inner(data: &mut &[u8], with_lua_state: bool) -> Result<Savefile> {
    let signature = read_bytes_array::<4>(data)?;
    if signature != SIGNATURE {
        return Err(Error::SignatureMismatch);
    }

    let checksum = read_bytes_array::<4>(data)?;

    let version = read_u32(data)?;
    if version != SAVEFILE_VERSION {
        return Err(Error::UnsupportedVersion(version));
    }

    let timestamp = read_u64(data)?;
    let location = read_str_prefix(data)?.to_owned();
    // Stored zero-based.
    let runs = read_u32(data)?.saturating_add(1);
    let accumulated_meta_points = read_u32(data)?;
    let active_shrine_points = read_u32(data)?;
    let grasp = read_u32(data)?;
    let easy_mode = read_bool(data)?;
    let hard_mode = read_bool(data)?;

    let lua_keys = read_array(data, |data| read_str_prefix(data).map(ToOwned::to_owned))?;

    let current_map_name = read_str_prefix(data)?.to_owned();
    let start_next_map = read_str_prefix(data)?.to_owned();

    let length = read_u32(data)?;
    let compressed = read_bytes(data, length as usize)?;

    expect_end(data)?;

    let lua_state = if with_lua_state {
        lz4_flex::block::decompress(compressed, MAX_LUA_STATE_SIZE)?
    } else {
        Vec::new()
    };

    Ok(Savefile {
        checksum,
        timestamp,
        location,
        runs,
        accumulated_meta_points,
        active_shrine_points,
        grasp,
        easy_mode,
        hard_mode,
        lua_keys,
        current_map_name,
        start_next_map,
        lua_state,
    })
}
