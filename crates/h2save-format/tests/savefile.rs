use h2save_format::{Error, LuaValue, Savefile};
use h2save_testing::fixtures::{Lua, luabins, sample_state};
use h2save_testing::SavefileBuilder;

#[test]
fn test_header_fields() {
    let data = SavefileBuilder::new()
        .with_location("Hub_Main")
        .with_stored_runs(9)
        .build();

    let save = Savefile::parse(&data).unwrap();
    assert_eq!(save.checksum, [0xde, 0xad, 0xbe, 0xef]);
    assert_eq!(save.timestamp, 1_700_000_000);
    assert_eq!(save.location, "Hub_Main");
    assert_eq!(save.runs, 10);
    assert_eq!(save.accumulated_meta_points, 250);
    assert_eq!(save.active_shrine_points, 8);
    assert_eq!(save.grasp, 2);
    assert!(!save.easy_mode);
    assert!(save.hard_mode);
    assert_eq!(save.lua_keys, vec!["GameState", "CurrentRun"]);
    assert_eq!(save.current_map_name, "F_Opening01");
    assert_eq!(save.start_next_map, "F_Opening02");
    assert_eq!(save.lua_state, luabins(&[sample_state()]));
}

#[test]
fn test_wrong_signature() {
    let data = SavefileBuilder::new().with_signature(*b"SGB0").build();
    assert!(matches!(Savefile::parse(&data), Err(Error::SignatureMismatch)));
}

#[test]
fn test_unsupported_version() {
    let data = SavefileBuilder::new().with_version(16).build();
    let err = Savefile::parse(&data).unwrap_err();
    assert!(matches!(err, Error::UnsupportedVersion(16)));
    assert_eq!(err.to_string(), "Savefile version is 16, only 17 is supported");
}

#[test]
fn test_trailing_bytes_are_rejected() {
    let data = SavefileBuilder::new().with_trailing_bytes(&[1, 2, 3]).build();
    assert!(matches!(Savefile::parse(&data), Err(Error::TrailingBytes(3))));
}

#[test]
fn test_truncated_file() {
    let data = SavefileBuilder::new().build();
    let truncated = &data[..data.len() / 2];
    assert!(matches!(Savefile::parse(truncated), Err(Error::UnexpectedEof)));
    assert!(matches!(Savefile::parse(&[]), Err(Error::UnexpectedEof)));
}

#[test]
fn test_header_only_skips_lua_state() {
    let data = SavefileBuilder::new()
        .with_lua_blob(b"not luabins at all".to_vec())
        .build();

    let header = Savefile::parse_header_only(&data).unwrap();
    assert_eq!(header.location, "Hub_PreRun");
    assert!(header.lua_state.is_empty());

    let full = Savefile::parse(&data).unwrap();
    assert!(matches!(full.parse_lua_state(), Err(Error::LuaState(_)) | Err(Error::UnexpectedEof)));
}

#[test]
fn test_lua_state_must_hold_one_value() {
    let data = SavefileBuilder::new()
        .with_lua_blob(luabins(&[Lua::Number(1.0), Lua::Number(2.0)]))
        .build();
    let save = Savefile::parse(&data).unwrap();

    let err = save.parse_lua_state().unwrap_err();
    assert_eq!(
        err.to_string(),
        "Unexpected lua state: expected exactly one top-level value, found 2"
    );
}

#[test]
fn test_lua_tables_are_sorted() {
    let state = Lua::Table(vec![
        (Lua::str("Zagreus"), Lua::Bool(true)),
        (Lua::str("_Hidden"), Lua::Nil),
        (Lua::Number(2.0), Lua::str("two")),
        (Lua::str("Apollo"), Lua::Number(1.0)),
        (Lua::Bool(false), Lua::str("no")),
    ]);
    let data = SavefileBuilder::new().with_state(state).build();
    let value = Savefile::parse(&data).unwrap().parse_lua_state().unwrap();

    let keys: Vec<String> = value
        .as_table()
        .unwrap()
        .iter()
        .map(|(key, _)| key.key_string())
        .collect();
    assert_eq!(keys, vec!["false", "2", "_Hidden", "Apollo", "Zagreus"]);
}

#[test]
fn test_count_nested_values() {
    let data = SavefileBuilder::new().build();
    let value = Savefile::parse(&data).unwrap().parse_lua_state().unwrap();

    let tables = value.count(false, &mut |v| matches!(v, LuaValue::Table(_)));
    let strings = value.count(true, &mut |v| matches!(v, LuaValue::String(_)));
    assert_eq!(tables, 5);
    // 10 string keys plus the "Melinoe" value
    assert_eq!(strings, 11);
}
