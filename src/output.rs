//! Text and JSON rendering of app records.

use app_registry::AppRecord;
use serde::Serialize;
use std::error::Error;
use std::io::{self, Write};

/// Record without the icon payload.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RecordSummary<'a> {
    pub app_name: &'a str,
    pub package_name: &'a str,
    pub description: &'a str,
    pub version_name: &'a str,
    pub version_code: i64,
    pub is_launchable: bool,
    pub is_system_app: bool,
    pub icon_bytes: usize,
}

impl<'a> From<&'a AppRecord> for RecordSummary<'a> {
    fn from(record: &'a AppRecord) -> Self {
        Self {
            app_name: &record.app_name,
            package_name: &record.package_name,
            description: &record.description,
            version_name: &record.version_name,
            version_code: record.version_code,
            is_launchable: record.is_launchable,
            is_system_app: record.is_system_app,
            icon_bytes: record.icon.len(),
        }
    }
}

/// One table row: name, package, version, classification.
pub fn format_row(record: &AppRecord) -> String {
    let kind = if record.is_system_app { "system" } else { "user" };
    let launch = if record.is_launchable { "launchable" } else { "hidden" };
    let version = if record.version_name.is_empty() {
        "-"
    } else {
        record.version_name.as_str()
    };

    format!(
        "{:<32} {:<44} {:<12} {}/{}",
        record.app_name, record.package_name, version, kind, launch
    )
}

pub fn write_records<W: Write>(
    out: &mut W,
    records: &[AppRecord],
    json: bool,
    with_icons: bool,
) -> io::Result<()> {
    if json && with_icons {
        serde_json::to_writer_pretty(&mut *out, records)?;
        writeln!(out)?;
    } else if json {
        let summaries: Vec<RecordSummary> = records.iter().map(RecordSummary::from).collect();
        serde_json::to_writer_pretty(&mut *out, &summaries)?;
        writeln!(out)?;
    } else {
        for record in records {
            writeln!(out, "{}", format_row(record))?;
        }
        writeln!(out, "{} apps", records.len())?;
    }
    Ok(())
}

pub fn write_record<W: Write>(out: &mut W, record: &AppRecord, json: bool) -> io::Result<()> {
    if json {
        serde_json::to_writer_pretty(&mut *out, &RecordSummary::from(record))?;
        writeln!(out)?;
        return Ok(());
    }

    writeln!(out, "Name:        {}", record.app_name)?;
    writeln!(out, "Package:     {}", record.package_name)?;
    if !record.description.is_empty() {
        writeln!(out, "Description: {}", record.description)?;
    }
    writeln!(
        out,
        "Version:     {} ({})",
        record.version_name, record.version_code
    )?;
    writeln!(out, "System app:  {}", record.is_system_app)?;
    writeln!(out, "Launchable:  {}", record.is_launchable)?;
    writeln!(out, "Icon:        {} bytes", record.icon.len())
}

/// The single line printed for a failed command.
pub fn format_error(err: &dyn Error) -> String {
    format!("error: {}", err)
}
