use std::io::{IsTerminal, Write};

use clap::ValueEnum;
use comfy_table::{presets::UTF8_FULL, ContentArrangement, Table};
use rootlink_frame::{device_name, Frame};
use serde::Serialize;

#[derive(Clone, Debug, Copy, ValueEnum)]
pub enum OutputFormat {
    Json,
    Table,
    Pretty,
    Raw,
}

impl OutputFormat {
    pub fn default_for_stdout() -> Self {
        if std::io::stdout().is_terminal() {
            Self::Table
        } else {
            Self::Json
        }
    }
}

#[derive(Serialize)]
struct FrameOutput<'a> {
    device: u8,
    device_name: &'a str,
    command: u8,
    payload_hex: String,
    frame_hex: String,
}

/// Print one decoded frame together with its wire bytes.
pub fn print_frame(frame: &Frame, wire: &[u8], format: OutputFormat) {
    match format {
        OutputFormat::Json => {
            let out = FrameOutput {
                device: frame.device,
                device_name: device_name(frame.device),
                command: frame.command,
                payload_hex: hex_string(frame.payload.as_ref()),
                frame_hex: hex_string(wire),
            };
            println!(
                "{}",
                serde_json::to_string(&out).unwrap_or_else(|_| "{}".to_string())
            );
        }
        OutputFormat::Table => {
            let mut table = Table::new();
            table
                .load_preset(UTF8_FULL)
                .set_content_arrangement(ContentArrangement::Dynamic)
                .set_header(vec!["DEVICE", "COMMAND", "PAYLOAD"])
                .add_row(vec![
                    format!("{} ({})", device_name(frame.device), frame.device),
                    frame.command.to_string(),
                    hex_string(frame.payload.as_ref()),
                ]);
            println!("{table}");
        }
        OutputFormat::Pretty => {
            println!(
                "device={} ({}) command={} payload={}",
                frame.device,
                device_name(frame.device),
                frame.command,
                hex_string(frame.payload.as_ref())
            );
        }
        OutputFormat::Raw => {
            print_raw(wire);
        }
    }
}

pub fn print_raw(data: &[u8]) {
    let mut out = std::io::stdout();
    let _ = out.write_all(data);
    let _ = out.flush();
}

pub fn hex_string(data: &[u8]) -> String {
    let mut out = String::with_capacity(data.len() * 2);
    for byte in data {
        out.push_str(&format!("{byte:02x}"));
    }
    out
}
