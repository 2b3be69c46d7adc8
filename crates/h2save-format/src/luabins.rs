//! luabins: the serialized lua values stored inside a savefile.

use crate::error::{Error, Result};
use crate::reader::{expect_end, read_f64, read_str_prefix, read_u8, read_u32};
use serde::ser::SerializeMap;
use std::cmp::Ordering;
use std::fmt;

/// Upper bound on the number of top-level values in a luabins blob.
const MAX_TOP_LEVEL_VALUES: u8 = 250;

/// Deepest table nesting accepted in a lua state.
///
/// Kept below serde_json's parse recursion limit of 128 so every state
/// that decodes can also be read back as JSON.
pub const MAX_TABLE_DEPTH: usize = 100;

#[derive(Clone)]
pub enum LuaValue {
    Nil,
    Bool(bool),
    Number(f64),
    String(String),
    /// Key/value pairs, kept sorted by key.
    Table(Vec<(LuaValue, LuaValue)>),
}

impl LuaValue {
    fn discriminant(&self) -> u8 {
        match self {
            LuaValue::Nil => 0,
            LuaValue::Bool(_) => 1,
            LuaValue::Number(_) => 2,
            LuaValue::String(_) => 3,
            LuaValue::Table(_) => 4,
        }
    }

    pub fn as_table(&self) -> Option<&[(LuaValue, LuaValue)]> {
        match self {
            LuaValue::Table(entries) => Some(entries.as_slice()),
            _ => None,
        }
    }

    pub fn is_primitive(&self) -> bool {
        !matches!(self, LuaValue::Table(_))
    }

    /// String form of a value used as a JSON object key.
    pub fn key_string(&self) -> String {
        match self {
            LuaValue::Nil => "nil".to_string(),
            LuaValue::Bool(val) => val.to_string(),
            LuaValue::Number(val) => val.to_string(),
            LuaValue::String(val) => val.clone(),
            LuaValue::Table(_) => "<table>".to_string(),
        }
    }

    /// Pre-order walk over this value and everything nested in it.
    pub fn visit(&self, include_keys: bool, f: &mut impl FnMut(&LuaValue)) {
        f(self);
        if let LuaValue::Table(table) = self {
            for (key, val) in table {
                if include_keys {
                    key.visit(include_keys, f);
                }
                val.visit(include_keys, f);
            }
        }
    }

    pub fn count(&self, include_keys: bool, f: &mut impl FnMut(&LuaValue) -> bool) -> usize {
        let mut count = 0;
        self.visit(include_keys, &mut |value| {
            if f(value) {
                count += 1;
            }
        });
        count
    }
}

impl Ord for LuaValue {
    fn cmp(&self, other: &Self) -> Ordering {
        match (self, other) {
            (LuaValue::Nil, LuaValue::Nil) => Ordering::Equal,
            (LuaValue::Bool(a), LuaValue::Bool(b)) => a.cmp(b),
            (LuaValue::Number(a), LuaValue::Number(b)) => a.total_cmp(b),
            // `_`-prefixed keys sort ahead of everything else.
            (LuaValue::String(a), LuaValue::String(b)) => b
                .starts_with('_')
                .cmp(&a.starts_with('_'))
                .then_with(|| a.cmp(b)),
            (LuaValue::Table(a), LuaValue::Table(b)) => a.cmp(b),
            _ => self.discriminant().cmp(&other.discriminant()),
        }
    }
}

impl PartialOrd for LuaValue {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl PartialEq for LuaValue {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for LuaValue {}

impl fmt::Debug for LuaValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LuaValue::Nil => f.write_str("Nil"),
            LuaValue::Bool(val) => write!(f, "{}", val),
            LuaValue::Number(val) => write!(f, "{}", val),
            LuaValue::String(val) => f.write_str(val),
            LuaValue::Table(table) => {
                let mut map = f.debug_map();
                for (key, val) in table {
                    map.entry(key, val);
                }
                map.finish()
            }
        }
    }
}

impl serde::Serialize for LuaValue {
    fn serialize<S>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        match self {
            LuaValue::Nil => serializer.serialize_none(),
            LuaValue::Bool(val) => serializer.serialize_bool(*val),
            LuaValue::Number(val) => serializer.serialize_f64(*val),
            LuaValue::String(val) => serializer.serialize_str(val),
            LuaValue::Table(table) => {
                let mut map = serializer.serialize_map(Some(table.len()))?;
                for (key, val) in table {
                    map.serialize_entry(&key.key_string(), val)?;
                }
                map.end()
            }
        }
    }
}

/// Read a complete luabins blob. The blob must be fully consumed.
pub fn read_luabins(data: &mut &[u8]) -> Result<Vec<LuaValue>> {
    let len = read_u8(data)?;
    if len > MAX_TOP_LEVEL_VALUES {
        return Err(Error::LuaState(format!(
            "{} top-level values, at most {} are allowed",
            len, MAX_TOP_LEVEL_VALUES
        )));
    }

    let mut values = Vec::with_capacity(len as usize);
    for _ in 0..len {
        values.push(read_value(data, 0)?);
    }

    expect_end(data)?;
    Ok(values)
}

fn read_value(data: &mut &[u8], depth: usize) -> Result<LuaValue> {
    let tag = read_u8(data)?;
    let value = match tag {
        b'-' => LuaValue::Nil,
        b'0' => LuaValue::Bool(false),
        b'1' => LuaValue::Bool(true),
        b'N' => LuaValue::Number(read_f64(data)?),
        b'S' => LuaValue::String(read_str_prefix(data)?.to_owned()),
        b'T' => {
            if depth >= MAX_TABLE_DEPTH {
                return Err(Error::LuaState(format!(
                    "tables nested deeper than {} levels",
                    MAX_TABLE_DEPTH
                )));
            }

            let array_size = read_u32(data)? as usize;
            let hash_size = read_u32(data)? as usize;
            let total = array_size.saturating_add(hash_size);

            let mut pairs = Vec::with_capacity(total.min(data.len()));
            for _ in 0..total {
                let key = read_value(data, depth + 1)?;
                let val = read_value(data, depth + 1)?;
                pairs.push((key, val));
            }

            pairs.sort_by(|(a, _), (b, _)| a.cmp(b));
            LuaValue::Table(pairs)
        }
        other => {
            return Err(Error::LuaState(format!(
                "unknown value tag 0x{:02x}",
                other
            )));
        }
    };

    Ok(value)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn string(s: &str) -> LuaValue {
        LuaValue::String(s.to_string())
    }

    #[test]
    fn test_reads_scalars() {
        let mut bytes = vec![4, b'-', b'0', b'1', b'N'];
        bytes.extend_from_slice(&2.5f64.to_le_bytes());
        let values = read_luabins(&mut &bytes[..]).unwrap();

        assert_eq!(
            values,
            vec![
                LuaValue::Nil,
                LuaValue::Bool(false),
                LuaValue::Bool(true),
                LuaValue::Number(2.5)
            ]
        );
    }

    #[test]
    fn test_rejects_unknown_tag() {
        let bytes = [1, b'X'];
        assert!(matches!(
            read_luabins(&mut &bytes[..]),
            Err(Error::LuaState(_))
        ));
    }

    #[test]
    fn test_rejects_too_many_values() {
        let bytes = [251];
        assert!(matches!(
            read_luabins(&mut &bytes[..]),
            Err(Error::LuaState(_))
        ));
    }

    #[test]
    fn test_rejects_trailing_bytes() {
        let bytes = [1, b'-', 0];
        assert!(matches!(
            read_luabins(&mut &bytes[..]),
            Err(Error::TrailingBytes(1))
        ));
    }

    fn nested_tables(levels: usize) -> Vec<u8> {
        let mut bytes = vec![1];
        for _ in 0..levels {
            bytes.push(b'T');
            bytes.extend_from_slice(&0u32.to_le_bytes());
            bytes.extend_from_slice(&1u32.to_le_bytes());
            bytes.push(b'1');
        }
        bytes.push(b'-');
        bytes
    }

    #[test]
    fn test_accepts_tables_at_depth_limit() {
        // Each level is `{ [true] = <next level> }`.
        let bytes = nested_tables(MAX_TABLE_DEPTH);
        let values = read_luabins(&mut &bytes[..]).unwrap();

        let mut depth = 0;
        let mut current = &values[0];
        while let Some([(_, inner)]) = current.as_table() {
            depth += 1;
            current = inner;
        }
        assert_eq!(depth, MAX_TABLE_DEPTH);
        assert_eq!(*current, LuaValue::Nil);
    }

    #[test]
    fn test_rejects_tables_past_depth_limit() {
        let bytes = nested_tables(MAX_TABLE_DEPTH + 1);
        match read_luabins(&mut &bytes[..]) {
            Err(Error::LuaState(msg)) => {
                assert_eq!(msg, "tables nested deeper than 100 levels")
            }
            other => panic!("expected LuaState error, got {:?}", other.map(|v| v.len())),
        }
    }

    #[test]
    fn test_underscore_keys_sort_first() {
        let mut keys = vec![string("b"), string("_z"), string("a"), LuaValue::Number(1.0)];
        keys.sort();
        assert_eq!(
            keys,
            vec![LuaValue::Number(1.0), string("_z"), string("a"), string("b")]
        );
    }

    #[test]
    fn test_json_keys_are_strings() {
        let table = LuaValue::Table(vec![
            (LuaValue::Number(1.0), string("first")),
            (LuaValue::Bool(true), LuaValue::Nil),
        ]);

        let json = serde_json::to_string(&table).unwrap();
        assert_eq!(json, r#"{"1":"first","true":null}"#);
    }

    #[test]
    fn test_count_includes_nested_values() {
        let table = LuaValue::Table(vec![(
            string("inner"),
            LuaValue::Table(vec![(string("x"), LuaValue::Number(1.0))]),
        )]);

        let numbers = table.count(false, &mut |v| matches!(v, LuaValue::Number(_)));
        let strings = table.count(true, &mut |v| matches!(v, LuaValue::String(_)));
        assert_eq!(numbers, 1);
        assert_eq!(strings, 2);
    }
}
