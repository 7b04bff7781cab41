//! CLI tests for the equipment roster.

mod common;

use common::{extract_id, TestEnv};

#[test]
fn test_equipment_add_and_list() {
    let env = TestEnv::new();
    env.run_ok(&[
        "equipment", "add", "--category", "thermocycler", "--name", "TC-01",
    ]);

    let result = env.run_ok(&["equipment", "list"]);
    assert!(result.stdout.contains("thermocycler"));
    assert!(result.stdout.contains("TC-01"));
}

#[test]
fn test_equipment_free_text_category() {
    let env = TestEnv::new();
    env.run_ok(&[
        "equipment", "add", "--category", "spectrophotometer", "--name", "Nanodrop",
    ]);

    let result = env.run_ok(&["equipment", "list"]);
    assert!(result.stdout.contains("spectrophotometer"));
}

#[test]
fn test_equipment_list_empty() {
    let env = TestEnv::new();
    let result = env.run_ok(&["equipment", "list"]);
    assert!(result.stdout.contains("No equipment registered."));
}

#[test]
fn test_equipment_rm() {
    let env = TestEnv::new();
    let result = env.run_ok(&["equipment", "add", "--category", "vortex", "--name", "V-1"]);
    let id = extract_id(&result.stdout);

    env.run_ok(&["equipment", "rm", &id]);
    let list = env.run_ok(&["equipment", "list"]);
    assert!(list.stdout.contains("No equipment registered."));
}

#[test]
fn test_equipment_rm_unknown_fails() {
    let env = TestEnv::new();
    let result = env.run(&["equipment", "rm", "missing-id"]);
    assert!(!result.success);
    assert!(result.stderr.contains("no equipment with id"));
}

#[test]
fn test_equipment_add_json_emits_upsert_event() {
    let env = TestEnv::new();
    let result = env.run_ok(&[
        "equipment", "add", "--json", "--category", "pipette", "--name", "P200",
    ]);

    let lines = result.json_lines();
    assert_eq!(lines.len(), 1);
    assert_eq!(lines[0]["event"], "equipment_upsert");
    assert_eq!(lines[0]["data"]["category"], "pipette");
}
