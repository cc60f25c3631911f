use crate::cli::OutputFormat;
use colored::Colorize;
use serde::Serialize;
use serde_json::Value;
use tabled::builder::Builder;
use tabled::settings::Style;

pub fn print_value<T: Serialize>(value: &T, format: OutputFormat) -> anyhow::Result<()> {
    let value = serde_json::to_value(value)?;
    match format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&value)?),
        OutputFormat::Table => print_as_table(&value)?,
    }
    Ok(())
}

pub fn print_success(msg: &str) {
    println!("{} {}", "✓".green(), msg);
}

pub fn print_error(msg: &str) {
    eprintln!("{} {}", "✗".red(), msg);
}

fn print_as_table(value: &Value) -> anyhow::Result<()> {
    match value {
        Value::Array(resources) => {
            if resources.is_empty() {
                println!("No resources found.");
                return Ok(());
            }
            let mut builder = Builder::default();
            builder.push_record(["ID", "ResourceType", "LastUpdated"]);
            for resource in resources {
                builder.push_record(resource_row(resource));
            }
            let table = builder.build().with(Style::rounded()).to_string();
            println!("{table}");
            println!("Total: {}", resources.len());
        }
        Value::Object(fields) if !fields.contains_key("resourceType") => {
            // Operation outcome: one row per field
            let mut builder = Builder::default();
            builder.push_record(["Field", "Value"]);
            for (name, field) in fields {
                builder.push_record([name.clone(), scalar(field)]);
            }
            println!("{}", builder.build().with(Style::rounded()));
        }
        Value::Object(_) => {
            let [id, rt, _] = resource_row(value);
            println!("{} {}/{}", "Resource:".cyan(), rt.cyan(), id.cyan());
            println!("{}", serde_json::to_string_pretty(value)?);
        }
        other => println!("{}", scalar(other)),
    }
    Ok(())
}

fn resource_row(resource: &Value) -> [String; 3] {
    let text = |v: Option<&Value>| v.and_then(Value::as_str).unwrap_or("-").to_string();
    [
        text(resource.get("id")),
        text(resource.get("resourceType")),
        text(resource.get("meta").and_then(|m| m.get("lastUpdated"))),
    ]
}

fn scalar(value: &Value) -> String {
    match value {
        Value::Null => "-".to_string(),
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}
