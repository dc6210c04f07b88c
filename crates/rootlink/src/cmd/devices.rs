use comfy_table::{presets::UTF8_FULL, ContentArrangement, Table};
use serde::Serialize;

use rootlink_frame::{device_name, Device};

use crate::cmd::DevicesArgs;
use crate::exit::{CliResult, SUCCESS};
use crate::output::OutputFormat;

#[derive(Serialize)]
struct DeviceOutput {
    id: u8,
    name: &'static str,
}

pub fn run(_args: DevicesArgs, format: OutputFormat) -> CliResult<i32> {
    let rows: Vec<DeviceOutput> = Device::ALL
        .iter()
        .map(|device| {
            let id = u8::from(*device);
            DeviceOutput {
                id,
                name: device_name(id),
            }
        })
        .collect();

    match format {
        OutputFormat::Json => {
            println!(
                "{}",
                serde_json::to_string(&rows).unwrap_or_else(|_| "[]".to_string())
            );
        }
        OutputFormat::Table => {
            let mut table = Table::new();
            table
                .load_preset(UTF8_FULL)
                .set_content_arrangement(ContentArrangement::Dynamic)
                .set_header(vec!["ID", "NAME"]);
            for row in &rows {
                table.add_row(vec![row.id.to_string(), row.name.to_string()]);
            }
            println!("{table}");
        }
        OutputFormat::Pretty | OutputFormat::Raw => {
            for row in &rows {
                println!("{} {}", row.id, row.name);
            }
        }
    }
    Ok(SUCCESS)
}
