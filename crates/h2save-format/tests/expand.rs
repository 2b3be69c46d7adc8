use h2save_format::{Hades2Decoder, MAX_TABLE_DEPTH, expand_savefile};
use h2save_testing::{Lua, SavefileBuilder, nested_state, nested_table_blob};
use h2save_types::{DecodeFailure, ExpansionFormat, SaveDecoder};

fn small_save() -> Vec<u8> {
    SavefileBuilder::new()
        .with_state(Lua::table([
            ("Name", Lua::str("Melinoe")),
            ("Level", Lua::Number(3.0)),
        ]))
        .build()
}

#[test]
fn test_text_is_pretty_debug() {
    let text = expand_savefile(&small_save(), ExpansionFormat::Text).unwrap();
    insta::assert_snapshot!(text, @r"
    {
        Level: 3,
        Name: Melinoe,
    }
    ");
}

#[test]
fn test_json_is_compact() {
    let json = expand_savefile(&small_save(), ExpansionFormat::Json).unwrap();
    insta::assert_snapshot!(json, @r#"{"Level":3.0,"Name":"Melinoe"}"#);
}

#[test]
fn test_json_pretty_is_indented() {
    let json = expand_savefile(&small_save(), ExpansionFormat::JsonPretty).unwrap();
    assert_eq!(json, "{\n  \"Level\": 3.0,\n  \"Name\": \"Melinoe\"\n}");
}

#[test]
fn test_json_formats_agree() {
    let data = SavefileBuilder::new().build();
    let compact = expand_savefile(&data, ExpansionFormat::Json).unwrap();
    let pretty = expand_savefile(&data, ExpansionFormat::JsonPretty).unwrap();

    let compact: serde_json::Value = serde_json::from_str(&compact).unwrap();
    let pretty: serde_json::Value = serde_json::from_str(&pretty).unwrap();
    assert_eq!(compact, pretty);
    assert_eq!(compact["GameState"]["Resources"]["MetaCurrency"], 120.0);
    assert!(compact["CurrentRun"]["Boon"].is_null());
}

#[test]
fn test_non_string_keys_become_strings() {
    let data = SavefileBuilder::new()
        .with_state(Lua::Table(vec![
            (Lua::Number(1.0), Lua::str("first")),
            (Lua::Bool(true), Lua::Nil),
        ]))
        .build();

    let json = expand_savefile(&data, ExpansionFormat::Json).unwrap();
    assert_eq!(json, r#"{"true":null,"1":"first"}"#);
}

#[tokio::test(flavor = "current_thread")]
async fn test_decoder_reports_structured_errors() {
    let data = SavefileBuilder::new().with_signature(*b"XXXX").build();

    let ok = Hades2Decoder.expand(&small_save(), ExpansionFormat::Json).await;
    assert_eq!(ok.unwrap(), r#"{"Level":3.0,"Name":"Melinoe"}"#);

    match Hades2Decoder.expand(&data, ExpansionFormat::Text).await {
        Err(DecodeFailure::Error(err)) => {
            assert_eq!(err.to_string(), "File does not begin with correct signature")
        }
        other => panic!("expected structured error, got {:?}", other),
    }
}

#[tokio::test(flavor = "current_thread")]
async fn test_deep_nesting_is_rejected() {
    let data = SavefileBuilder::new()
        .with_lua_blob(nested_table_blob(100_000))
        .build();

    match Hades2Decoder.expand(&data, ExpansionFormat::Text).await {
        Err(DecodeFailure::Error(err)) => assert_eq!(
            err.to_string(),
            "Unexpected lua state: tables nested deeper than 100 levels"
        ),
        other => panic!("expected structured error, got {:?}", other),
    }
}

#[test]
fn test_deepest_accepted_state_is_valid_json() {
    let data = SavefileBuilder::new()
        .with_state(nested_state(MAX_TABLE_DEPTH))
        .build();

    for format in [ExpansionFormat::Json, ExpansionFormat::JsonPretty] {
        let json = expand_savefile(&data, format).unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert!(value["Inner"]["Inner"].is_object());
    }
}
