use serde_json::Value;

/// Pretty-print JSON to stdout.
pub fn print_json(value: &Value) -> Result<(), Box<dyn std::error::Error>> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}
