use assert_cmd::Command;
use assert_fs::prelude::*;
use std::fs;

const PREAMP: &str = include_str!("../../pcb-legacy-sch/test/preamp.sch");
const RULES: &str = include_str!("../../pcb-legacy-sch/test/rules.yml");

fn pcb_fields() -> Command {
    Command::cargo_bin("pcb-fields").unwrap()
}

fn stdout_of(cmd: &mut Command) -> String {
    let assert = cmd.assert().success();
    String::from_utf8(assert.get_output().stdout.clone()).unwrap()
}

#[test]
fn test_apply_writes_to_stdout() {
    let temp = assert_fs::TempDir::new().unwrap();
    let sch = temp.child("preamp.sch");
    sch.write_str(PREAMP).unwrap();
    let rules = temp.child("rules.yml");
    rules.write_str(RULES).unwrap();

    let out = stdout_of(
        pcb_fields()
            .arg("apply")
            .arg(sch.path())
            .arg("--rules")
            .arg(rules.path()),
    );

    assert!(out.starts_with("EESchema Schematic File Version 4\n"));
    assert!(out.ends_with("$EndSCHEMATC\n"));
    assert!(out.contains("\"Resistor_SMD:R_0603_1608Metric\""));
    assert!(out.contains("\"Texas Instruments\""));

    // The input is left untouched
    assert_eq!(fs::read_to_string(sch.path()).unwrap(), PREAMP);
}

#[test]
fn test_apply_writes_output_file() {
    let temp = assert_fs::TempDir::new().unwrap();
    let sch = temp.child("preamp.sch");
    sch.write_str(PREAMP).unwrap();
    let out = temp.child("out.sch");

    let stdout = stdout_of(
        pcb_fields()
            .arg("apply")
            .arg(sch.path())
            .arg("-o")
            .arg(out.path()),
    );
    assert!(stdout.is_empty());

    // Bundled rules add the sourcing fields to every real component
    let written = fs::read_to_string(out.path()).unwrap();
    assert!(written.contains("\"Supplier_PN\""));
    assert!(written.contains("\"Manufacturer\""));
}

#[test]
fn test_apply_json_rules() {
    let temp = assert_fs::TempDir::new().unwrap();
    let sch = temp.child("preamp.sch");
    sch.write_str(PREAMP).unwrap();
    let rules = temp.child("rules.json");
    rules
        .write_str(r#"{"Reference": {"C": {"Fields": {"Voltage": "25V"}}}}"#)
        .unwrap();

    let out = stdout_of(
        pcb_fields()
            .arg("apply")
            .arg(sch.path())
            .arg("--rules")
            .arg(rules.path()),
    );
    assert!(out.contains("\"25V\""));
    assert!(!out.contains("\"Supplier_PN\""));
}

#[test]
fn test_fmt_is_stable() {
    let temp = assert_fs::TempDir::new().unwrap();
    let sch = temp.child("preamp.sch");
    sch.write_str(PREAMP).unwrap();

    let first = stdout_of(pcb_fields().arg("fmt").arg(sch.path()));

    let again = temp.child("again.sch");
    again.write_str(&first).unwrap();
    let second = stdout_of(pcb_fields().arg("fmt").arg(again.path()));

    assert_eq!(first, second);
}

#[test]
fn test_missing_schematic() {
    let temp = assert_fs::TempDir::new().unwrap();
    let missing = temp.child("missing.sch");

    let assert = pcb_fields().arg("fmt").arg(missing.path()).assert().failure();
    let stderr = String::from_utf8(assert.get_output().stderr.clone()).unwrap();
    assert!(stderr.contains("Path does not exist"));
}

#[test]
fn test_malformed_schematic() {
    let temp = assert_fs::TempDir::new().unwrap();
    let sch = temp.child("broken.sch");
    sch.write_str("EESchema Schematic File Version 4\n$Comp\nL Device:R R1\n")
        .unwrap();

    let assert = pcb_fields().arg("apply").arg(sch.path()).assert().failure();
    let stderr = String::from_utf8(assert.get_output().stderr.clone()).unwrap();
    assert!(stderr.contains("$EndComp"));
}
