// src/web/templates.rs
use std::collections::HashMap;

use tera::{Tera, Value};

/// Templates are compiled into the binary so the server runs from any directory.
pub fn build() -> Result<Tera, tera::Error> {
    let mut tera = Tera::default();
    tera.add_raw_templates(vec![
        ("base.html", include_str!("../../templates/base.html")),
        ("home.html", include_str!("../../templates/home.html")),
        ("year.html", include_str!("../../templates/year.html")),
        ("charts.html", include_str!("../../templates/charts.html")),
    ])?;
    tera.register_filter("thousands", thousands);
    Ok(tera)
}

/// `{{ 1234567 | thousands }}` -> `1,234,567`. Non-integers pass through unchanged.
fn thousands(value: &Value, _args: &HashMap<String, Value>) -> tera::Result<Value> {
    Ok(match value.as_i64() {
        Some(n) => Value::String(group_thousands(n)),
        None => value.clone(),
    })
}

pub fn group_thousands(n: i64) -> String {
    let digits = n.unsigned_abs().to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3 + 1);
    if n < 0 {
        grouped.push('-');
    }
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(c);
    }
    grouped
}
