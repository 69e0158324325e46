use serde_json::Value;

/// JSON pointers tried in order for the headline answer.
const PRIORITY_POINTERS: [&str; 3] = ["/result/health_score/score", "/result/band", "/result"];

/// Print just the key answer value from the output.
pub fn print_minimal(value: &Value) -> Result<(), Box<dyn std::error::Error>> {
    println!("{}", render_minimal(value));
    Ok(())
}

fn render_minimal(value: &Value) -> String {
    PRIORITY_POINTERS
        .iter()
        .filter_map(|p| value.pointer(p))
        .find(|v| !v.is_null())
        .map(format_minimal)
        .unwrap_or_else(|| format_minimal(value))
}

fn format_minimal(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Number(n) => n.to_string(),
        Value::Bool(b) => b.to_string(),
        Value::Null => "null".to_string(),
        _ => serde_json::to_string(value).unwrap_or_default(),
    }
}
