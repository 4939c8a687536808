//! Examine report and configuration file rendering

use crate::Result;
use chrono::Utc;
use rest_provider_generator_common::{Config, Resource, TfType};
use std::collections::BTreeMap;
use std::fmt::Write as FmtWrite;
use std::fs;
use std::path::Path;

const COLUMNS: [&str; 4] = ["Config Name", "Paths", "Limit", "Collection Data Source?"];

/// Provider entity a probed resource can become, if any
pub fn classify(resource: &Resource) -> Option<TfType> {
    if resource.is_crud() {
        Some(TfType::Resource)
    } else if resource.can_read_identity() || resource.can_read_collection() {
        Some(TfType::DataSource)
    } else {
        None
    }
}

fn limit_label(resource: &Resource) -> &'static str {
    match classify(resource) {
        Some(TfType::Resource) => "resource",
        Some(TfType::DataSource) => "data_source",
        None => "",
    }
}

/// Render the fixed-width table printed by `examine`
pub fn render_examine_report(resources: &BTreeMap<String, Resource>) -> Result<String> {
    let rows: Vec<[String; 4]> = resources
        .iter()
        .map(|(key, resource)| {
            [
                key.clone(),
                resource.paths.iter().cloned().collect::<Vec<_>>().join(", "),
                limit_label(resource).to_string(),
                (resource.can_read_collection() && !resource.can_read_identity()).to_string(),
            ]
        })
        .collect();

    let mut widths = COLUMNS.map(|c| c.chars().count());
    for row in &rows {
        for (width, cell) in widths.iter_mut().zip(row) {
            *width = (*width).max(cell.chars().count());
        }
    }

    let mut output = String::new();
    write_row(&mut output, &COLUMNS.map(String::from), &widths)?;
    write_row(&mut output, &widths.map(|w| "-".repeat(w)), &widths)?;
    for row in &rows {
        write_row(&mut output, row, &widths)?;
    }

    Ok(output)
}

fn write_row(output: &mut String, cells: &[String; 4], widths: &[usize; 4]) -> Result<()> {
    let mut line = String::new();
    for (i, (cell, width)) in cells.iter().zip(widths).enumerate() {
        if i > 0 {
            line.push_str("  ");
        }
        write!(line, "{:<w$}", cell, w = *width)?;
    }
    writeln!(output, "{}", line.trim_end())?;
    Ok(())
}

/// Render a configuration file with a generated header
pub fn render_config(config: &Config) -> Result<String> {
    let timestamp = Utc::now().format("%Y-%m-%dT%H:%M:%SZ");

    let mut output = String::new();
    writeln!(output, "# REST provider configuration")?;
    writeln!(output, "# Generated: {timestamp} from {}", config.spec_file)?;
    writeln!(output, "# Review the bindings below before running generate")?;
    writeln!(output)?;
    output.push_str(&config.to_yaml()?);

    Ok(output)
}

/// Write a configuration file with a generated header
pub fn write_config(config: &Config, path: &Path) -> Result<()> {
    fs::write(path, render_config(config)?)?;
    Ok(())
}
