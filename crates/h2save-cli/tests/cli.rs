use assert_cmd::Command;
use h2save_testing::{Lua, SavefileBuilder, TestWorld};
use predicates::prelude::*;

#[test]
fn test_expand_text_writes_txt_artifact() {
    let world = TestWorld::new();
    let save = world.write_save("save1.sav", &SavefileBuilder::new().build());

    let result = world
        .run(&["expand", save.to_str().unwrap(), "--format", "text"])
        .unwrap();

    assert!(result.success(), "stderr: {}", result.stderr());
    assert_eq!(world.downloads(), vec!["save1.sav.txt"]);
    assert!(result.stdout().contains("save1.sav.txt"));

    let text = std::fs::read_to_string(world.out_dir().join("save1.sav.txt")).unwrap();
    assert!(text.contains("Hero: Melinoe"));
}

#[test]
fn test_expand_json_pretty_writes_json_artifact() {
    let world = TestWorld::new();
    let save = world.write_save("save1.sav", &SavefileBuilder::new().build());

    let result = world
        .run(&["expand", save.to_str().unwrap(), "--format", "json-pretty"])
        .unwrap();

    assert!(result.success(), "stderr: {}", result.stderr());
    assert_eq!(world.downloads(), vec!["save1.sav.json"]);

    let json = std::fs::read_to_string(world.out_dir().join("save1.sav.json")).unwrap();
    assert!(json.contains("\n  \"CurrentRun\": {"));
}

#[test]
fn test_expand_json_prints_tree_without_artifact() {
    let world = TestWorld::new();
    let state = Lua::table([("Level", Lua::Number(3.0)), ("Name", Lua::str("Melinoe"))]);
    let save = world.write_save("save1.sav", &SavefileBuilder::new().with_state(state).build());

    let result = world
        .run(&["expand", save.to_str().unwrap(), "--format", "json"])
        .unwrap();

    assert!(result.success(), "stderr: {}", result.stderr());
    assert!(world.downloads().is_empty());
    assert_eq!(
        result.stdout(),
        "- root {2}\n    Level: 3.0\n    Name: \"Melinoe\"\n"
    );
}

#[test]
fn test_expand_respects_out_dir_flag() {
    let world = TestWorld::new();
    let save = world.write_save("save1.sav", &SavefileBuilder::new().build());
    let elsewhere = world.temp_dir().join("elsewhere");

    let result = world
        .run(&[
            "expand",
            save.to_str().unwrap(),
            "--format",
            "text",
            "--out-dir",
            elsewhere.to_str().unwrap(),
        ])
        .unwrap();

    assert!(result.success(), "stderr: {}", result.stderr());
    assert!(elsewhere.join("save1.sav.txt").is_file());
    assert!(world.downloads().is_empty());
}

#[test]
fn test_expand_rejects_bad_savefile() {
    let world = TestWorld::new();
    let save = world.write_save("save1.sav", b"definitely not a savefile");

    let result = world
        .run(&["expand", save.to_str().unwrap(), "--format", "text"])
        .unwrap();

    assert!(!result.success());
    assert!(result.stderr().contains(
        "Error: Could not parse savefile: File does not begin with correct signature"
    ));
    assert!(world.downloads().is_empty());
}

#[test]
fn test_expand_reports_unsupported_version() {
    let world = TestWorld::new();
    let save = world.write_save("save1.sav", &SavefileBuilder::new().with_version(18).build());

    let result = world
        .run(&["expand", save.to_str().unwrap(), "--format", "json-pretty"])
        .unwrap();

    assert!(!result.success());
    assert!(result.stderr().contains(
        "Could not parse savefile: Savefile version is 18, only 17 is supported"
    ));
}

#[test]
fn test_expand_missing_file_is_read_error() {
    let world = TestWorld::new();
    let missing = world.saves_dir().join("missing.sav");

    let result = world
        .run(&["expand", missing.to_str().unwrap()])
        .unwrap();

    assert!(!result.success());
    assert!(result.stderr().contains("Error: Could not read missing.sav: "));
}

#[test]
fn test_inspect_prints_header() {
    let world = TestWorld::new();
    let save = world.write_save(
        "Profile1.sav",
        &SavefileBuilder::new()
            .with_location("Hub_Main")
            .with_stored_runs(41)
            .build(),
    );

    let result = world.run(&["inspect", save.to_str().unwrap()]).unwrap();

    assert!(result.success(), "stderr: {}", result.stderr());
    let stdout = result.stdout();
    assert!(stdout.starts_with("Profile1.sav\n"));
    assert!(stdout.contains("location:      Hub_Main"));
    assert!(stdout.contains("runs:          42"));
    assert!(stdout.contains("checksum:      deadbeef"));
    assert!(stdout.contains("lua keys:      GameState, CurrentRun"));
    assert!(!stdout.contains("tables:"));
}

#[test]
fn test_inspect_stats_decodes_state() {
    let world = TestWorld::new();
    let save = world.write_save("Profile1.sav", &SavefileBuilder::new().build());

    let result = world
        .run(&["inspect", "--stats", save.to_str().unwrap()])
        .unwrap();

    assert!(result.success(), "stderr: {}", result.stderr());
    assert!(result.stdout().contains("top-level:     2"));
    assert!(result.stdout().contains("tables:        5"));
}

#[test]
fn test_saves_lists_configured_dir() {
    let world = TestWorld::new();
    world.write_save("Profile2.sav", b"two");
    world.write_save("Profile1.sav", b"one!");
    world.write_save("notes.txt", b"ignored");

    let result = world.run(&["saves"]).unwrap();

    assert!(result.success(), "stderr: {}", result.stderr());
    let stdout = result.stdout();
    assert!(stdout.contains("Profile1.sav          4 bytes"));
    assert!(stdout.contains("Profile2.sav          3 bytes"));
    assert!(!stdout.contains("notes.txt"));
    assert!(stdout.find("Profile1.sav") < stdout.find("Profile2.sav"));
}

#[test]
fn test_invalid_config_fails() {
    let world = TestWorld::new();
    std::fs::write(world.config_path(), "[tree\n").unwrap();

    let result = world.run(&["saves"]).unwrap();

    assert!(!result.success());
    assert!(result.stderr().contains("Error: Configuration error:"));
}

#[test]
#[allow(deprecated)]
fn test_help_lists_subcommands() {
    Command::cargo_bin("h2save")
        .unwrap()
        .arg("--help")
        .assert()
        .success()
        .stdout(
            predicate::str::contains("open")
                .and(predicate::str::contains("expand"))
                .and(predicate::str::contains("inspect"))
                .and(predicate::str::contains("saves")),
        );
}

#[test]
#[allow(deprecated)]
fn test_unknown_format_is_rejected() {
    let world = TestWorld::new();
    let mut cmd = Command::cargo_bin("h2save").unwrap();
    world
        .configure_command(&mut cmd)
        .args(["expand", "save1.sav", "--format", "yaml"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("json-pretty"));
}
