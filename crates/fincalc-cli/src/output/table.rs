use serde_json::Value;
use tabled::{builder::Builder, Table};

/// Format output as tables using the tabled crate: the scalar result fields
/// as a Field/Value table, then each schedule (breakdown, amortization) as
/// its own row table.
pub fn print_table(value: &Value) {
    let Some(envelope) = value.as_object() else {
        println!("{}", value);
        return;
    };

    let result = envelope.get("result").unwrap_or(value);

    if let Value::Object(result_map) = result {
        let mut builder = Builder::default();
        builder.push_record(["Field", "Value"]);
        let mut schedules: Vec<(&str, &Vec<Value>)> = Vec::new();
        for (key, val) in result_map {
            match val {
                Value::Array(rows) if rows.iter().all(|r| r.is_object()) && !rows.is_empty() => {
                    schedules.push((key.as_str(), rows));
                }
                other => {
                    builder.push_record([key.as_str(), &format_value(other)]);
                }
            }
        }
        println!("{}", Table::from(builder));

        for (name, rows) in schedules {
            println!("\n{}:", name);
            print_schedule(rows);
        }
    } else {
        println!("{}", result);
    }

    if let Some(Value::Array(warnings)) = envelope.get("warnings") {
        if !warnings.is_empty() {
            println!("\nWarnings:");
            for w in warnings {
                if let Value::String(s) = w {
                    println!("  - {}", s);
                }
            }
        }
    }

    if let Some(Value::String(methodology)) = envelope.get("methodology") {
        println!("\nMethodology: {}", methodology);
    }
}

fn print_schedule(rows: &[Value]) {
    let Some(Value::Object(first)) = rows.first() else {
        return;
    };
    let headers: Vec<&str> = first.keys().map(|k| k.as_str()).collect();

    let mut builder = Builder::default();
    builder.push_record(headers.clone());
    for row in rows {
        if let Value::Object(map) = row {
            let record: Vec<String> = headers
                .iter()
                .map(|h| map.get(*h).map(format_value).unwrap_or_default())
                .collect();
            builder.push_record(record);
        }
    }
    println!("{}", Table::from(builder));
}

fn format_value(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Number(n) => n.to_string(),
        Value::Bool(b) => b.to_string(),
        Value::Null => String::new(),
        _ => serde_json::to_string(value).unwrap_or_default(),
    }
}
