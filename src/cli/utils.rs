use serde_json::{json, Value};

use crate::cli::view::item_line;
use crate::cli::OutputFormat;

/// Output a success message in the appropriate format
pub fn output_success(
    output_format: &OutputFormat,
    message: &str,
    data: Option<Value>,
) -> anyhow::Result<()> {
    match output_format {
        OutputFormat::Json => {
            let mut response = json!({
                "success": true,
                "message": message
            });

            if let Some(data_value) = data {
                response["data"] = data_value;
            }

            println!("{}", serde_json::to_string_pretty(&response)?);
        }
        OutputFormat::Text => {
            println!("✓ {}", message);
        }
    }
    Ok(())
}

/// Output an error message in the appropriate format
pub fn output_error(output_format: &OutputFormat, message: &str) -> anyhow::Result<()> {
    match output_format {
        OutputFormat::Json => {
            let response = json!({
                "success": false,
                "error": message
            });
            println!("{}", serde_json::to_string_pretty(&response)?);
        }
        OutputFormat::Text => {
            eprintln!("Error: {}", message);
        }
    }
    Ok(())
}

/// Print a titled list of catalog items
pub fn output_items(
    output_format: &OutputFormat,
    heading: &str,
    items: &[Value],
) -> anyhow::Result<()> {
    match output_format {
        OutputFormat::Json => {
            println!(
                "{}",
                serde_json::to_string_pretty(&json!({ "title": heading, "items": items }))?
            );
        }
        OutputFormat::Text => {
            println!("{}", heading);
            if items.is_empty() {
                println!("  (empty)");
            }
            for item in items {
                println!("  {}", item_line(item));
            }
            println!();
        }
    }
    Ok(())
}

/// Print a raw JSON payload, or its headline fields in text mode
pub fn output_record(output_format: &OutputFormat, record: &Value) -> anyhow::Result<()> {
    match output_format {
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(record)?);
        }
        OutputFormat::Text => {
            println!("{}", item_line(record));
            if let Some(date) = record
                .get("release_date")
                .or_else(|| record.get("first_air_date"))
                .and_then(|v| v.as_str())
            {
                println!("Released: {}", date);
            }
            if let Some(rating) = record.get("vote_average").and_then(|v| v.as_f64()) {
                println!("Rating: {:.1}", rating);
            }
            if let Some(overview) = record.get("overview").and_then(|v| v.as_str()) {
                if !overview.is_empty() {
                    println!();
                    println!("{}", overview);
                }
            }
        }
    }
    Ok(())
}
