#![cfg(feature = "cli")]

use std::process::{Command, Output};

use rootlink_frame::decode_frame;
use serde_json::Value;

fn rootlink(args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_rootlink"))
        .args(args)
        .output()
        .expect("binary should spawn")
}

fn stdout_json(output: &Output) -> Value {
    let text = String::from_utf8(output.stdout.clone()).expect("stdout should be UTF-8");
    serde_json::from_str(text.trim()).expect("stdout should be one JSON value")
}

fn hex_to_bytes(hex: &str) -> Vec<u8> {
    (0..hex.len())
        .step_by(2)
        .map(|i| u8::from_str_radix(&hex[i..i + 2], 16).expect("valid hex"))
        .collect()
}

#[test]
fn version_prints_name_and_version() {
    let output = rootlink(&["version"]);
    assert!(output.status.success());
    let text = String::from_utf8(output.stdout).expect("stdout utf8");
    assert!(text.starts_with("rootlink "));
}

#[test]
fn encode_emits_a_self_consistent_frame() {
    let output = rootlink(&[
        "--format",
        "json",
        "encode",
        "--device",
        "motors",
        "--command",
        "4",
        "--payload",
        "0000006400000064",
    ]);
    assert!(output.status.success());

    let json = stdout_json(&output);
    assert_eq!(json["device"], 1);
    assert_eq!(json["device_name"], "MOTORS");
    assert_eq!(json["command"], 4);

    let wire = hex_to_bytes(json["frame_hex"].as_str().expect("frame_hex string"));
    assert_eq!(wire.len(), 20);
    let frame = decode_frame(&wire).expect("emitted frame should validate");
    assert_eq!(frame.device, 1);
}

#[test]
fn decode_round_trips_encode_output() {
    let encoded = rootlink(&[
        "--format",
        "json",
        "encode",
        "--device",
        "14",
        "--command",
        "0",
        "--payload",
        "55",
    ]);
    let frame_hex = stdout_json(&encoded)["frame_hex"]
        .as_str()
        .expect("frame_hex string")
        .to_string();

    let decoded = rootlink(&["--format", "json", "decode", &frame_hex]);
    assert!(decoded.status.success());
    let json = stdout_json(&decoded);
    assert_eq!(json["device"], 14);
    assert_eq!(json["device_name"], "BATTERY");
}

#[test]
fn decode_rejects_a_corrupted_frame() {
    // 19 zero bytes checksum to zero, so a 0x01 trailer cannot match.
    let corrupted = format!("{}01", "00".repeat(19));
    let output = rootlink(&["decode", &corrupted]);
    assert_eq!(output.status.code(), Some(60));

    // Odd-length hex is a usage error, not a data error.
    let output = rootlink(&["decode", "abc"]);
    assert_eq!(output.status.code(), Some(64));
}

#[test]
fn devices_lists_the_wire_ids() {
    let output = rootlink(&["--format", "json", "devices"]);
    assert!(output.status.success());
    let json = stdout_json(&output);
    let rows = json.as_array().expect("devices output is an array");
    assert_eq!(rows.len(), 12);
    assert!(rows
        .iter()
        .any(|row| row["id"] == 1 && row["name"] == "MOTORS"));
    assert!(rows
        .iter()
        .any(|row| row["id"] == 20 && row["name"] == "CLIFF_SENSOR"));
}

#[test]
fn drive_builds_the_motor_frame() {
    let output = rootlink(&[
        "--format", "json", "drive", "--left", "100", "--right", "-100",
    ]);
    assert!(output.status.success());
    let json = stdout_json(&output);
    assert_eq!(json["device"], 1);
    assert_eq!(json["command"], 4);
    // Decoded payload view: reserved byte, then the two big-endian speeds.
    let payload = json["payload_hex"].as_str().expect("payload_hex string");
    assert!(payload.starts_with("0000000064ffffff9c"));
}

#[test]
fn simulate_round_trips_telemetry() {
    let output = rootlink(&["--format", "json", "simulate", "--telemetry", "2"]);
    assert!(output.status.success());
    let text = String::from_utf8(output.stdout).expect("stdout utf8");
    let lines: Vec<&str> = text.lines().filter(|l| !l.is_empty()).collect();
    assert_eq!(lines.len(), 2, "one line per injected telemetry frame");
    for line in lines {
        let json: Value = serde_json::from_str(line).expect("telemetry line is JSON");
        assert_eq!(json["device_name"], "BATTERY");
    }
}
