use serde_json::Value;
use tabled::{builder::Builder, Table};

/// Format output as a table using the tabled crate.
pub fn print_table(value: &Value) -> Result<(), Box<dyn std::error::Error>> {
    println!("{}", render_table(value));
    Ok(())
}

fn render_table(value: &Value) -> String {
    match value {
        Value::Object(map) => {
            if let Some(display) = map.get("display") {
                render_report(display, map)
            } else {
                render_flat_object(map)
            }
        }
        Value::Array(arr) => render_array_table(arr),
        _ => value.to_string(),
    }
}

fn render_report(display: &Value, envelope: &serde_json::Map<String, Value>) -> String {
    let mut out = String::new();

    if let Some(Value::Array(lines)) = display.get("summary") {
        for line in lines.iter().filter_map(Value::as_str) {
            out.push_str(line);
            out.push('\n');
        }
        out.push('\n');
    }

    if let Some(Value::Array(rows)) = display.get("rows") {
        let mut builder = Builder::default();
        builder.push_record(["Indicator", "Value", "Value (%)", "Benchmark", "Deviation (%)"]);
        for row in rows {
            let cell = |k: &str| row.get(k).and_then(Value::as_str).unwrap_or("").to_string();
            builder.push_record([
                cell("indicator"),
                cell("value"),
                cell("value_pct"),
                cell("benchmark"),
                cell("deviation"),
            ]);
        }
        out.push_str(&Table::from(builder).to_string());
        out.push('\n');
    }

    let insights = envelope
        .get("result")
        .and_then(|r| r.get("insights"))
        .and_then(Value::as_array);
    if let Some(insights) = insights {
        out.push_str("\nBenchmark comparison:\n");
        for i in insights.iter().filter_map(Value::as_str) {
            out.push_str(&format!("  • {}\n", i));
        }
    }

    if let Some(Value::Array(warnings)) = envelope.get("warnings") {
        if !warnings.is_empty() {
            out.push_str("\nWarnings:\n");
            for w in warnings.iter().filter_map(Value::as_str) {
                out.push_str(&format!("  - {}\n", w));
            }
        }
    }

    if let Some(Value::Array(entries)) = display.get("glossary") {
        out.push_str("\nGlossary:\n");
        for entry in entries {
            let field = |k: &str| entry.get(k).and_then(Value::as_str).unwrap_or("").to_string();
            out.push_str(&format!("  {}: {}\n", field("term"), field("explanation")));
        }
    }

    if let Some(Value::String(meth)) = envelope.get("methodology") {
        out.push_str(&format!("\nMethodology: {}", meth));
    }

    out
}

fn render_flat_object(map: &serde_json::Map<String, Value>) -> String {
    let mut builder = Builder::default();
    builder.push_record(["Field", "Value"]);
    for (key, val) in map {
        builder.push_record([key.as_str(), &format_value(val)]);
    }
    Table::from(builder).to_string()
}

fn render_array_table(arr: &[Value]) -> String {
    if arr.is_empty() {
        return "(empty)".to_string();
    }

    // Collect all keys from first object for headers
    if let Some(Value::Object(first)) = arr.first() {
        let headers: Vec<String> = first.keys().cloned().collect();
        let mut builder = Builder::default();
        builder.push_record(&headers);

        for item in arr {
            if let Value::Object(map) = item {
                let row: Vec<String> = headers
                    .iter()
                    .map(|h| map.get(h.as_str()).map(format_value).unwrap_or_default())
                    .collect();
                builder.push_record(row);
            }
        }

        Table::from(builder).to_string()
    } else {
        arr.iter().map(format_value).collect::<Vec<_>>().join("\n")
    }
}

fn format_value(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Number(n) => n.to_string(),
        Value::Bool(b) => b.to_string(),
        Value::Null => String::new(),
        Value::Array(arr) => {
            let items: Vec<String> = arr.iter().map(format_value).collect();
            items.join(", ")
        }
        Value::Object(_) => serde_json::to_string(value).unwrap_or_default(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_report_rendering() {
        let value = json!({
            "result": { "insights": ["ROE above benchmark (+33.3%)"] },
            "warnings": ["total_liabilities is collected but not used by any KPI."],
            "methodology": "weighted average",
            "display": {
                "summary": ["Company: Acme", "Financial Health Score: 82.5/100"],
                "rows": [{
                    "indicator": "ROE", "value": "0.20", "value_pct": "20.00%",
                    "benchmark": "0.15", "deviation": "+33.3%"
                }],
                "glossary": [{"term": "ROE", "explanation": "Return on equity."}]
            }
        });
        let out = render_table(&value);
        assert!(out.starts_with("Company: Acme\n"));
        assert!(out.contains("Deviation (%)"));
        assert!(out.contains("+33.3%"));
        assert!(out.contains("  • ROE above benchmark (+33.3%)"));
        assert!(out.contains("Warnings:"));
        assert!(out.contains("Glossary:\n  ROE: Return on equity.\n"));
        assert!(out.ends_with("Methodology: weighted average"));
    }

    #[test]
    fn test_array_rendering() {
        let value = json!([
            {"indicator": "ROE", "benchmark": "0.15", "weight": null},
        ]);
        let out = render_table(&value);
        assert!(out.contains("indicator"));
        assert!(out.contains("0.15"));
    }

    #[test]
    fn test_empty_array() {
        assert_eq!(render_table(&json!([])), "(empty)");
    }
}
