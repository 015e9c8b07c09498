// Copyright 2025 MLPerf Storage Reporting Contributors
// SPDX-License-Identifier: Apache-2.0

//! Metric value formatting for the console report.

use mlps_report_core::MetricValue;

/// Format a number with thousands separators and one decimal place.
///
/// Ties round away from zero, so `2.25` becomes `2.3`.
pub fn format_number(value: f64) -> String {
    if value.is_nan() {
        return "nan".to_string();
    }
    if value.is_infinite() {
        return if value > 0.0 { "inf" } else { "-inf" }.to_string();
    }

    // Past 1e15 an f64 has no tenths left to round, and scaling can overflow.
    let value = if value.abs() < 1e15 {
        (value * 10.0).round() / 10.0
    } else {
        value
    };
    let rounded = format!("{value:.1}");
    let (sign, unsigned) = match rounded.strip_prefix('-') {
        Some(rest) => ("-", rest),
        None => ("", rounded.as_str()),
    };
    let (int_part, frac_part) = unsigned.split_once('.').unwrap_or((unsigned, "0"));
    format!("{sign}{}.{frac_part}", group_thousands(int_part))
}

fn group_thousands(digits: &str) -> String {
    let len = digits.len();
    let mut out = String::with_capacity(len + len / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (len - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}

/// Whether values of this metric are percentages.
pub fn is_percentage(name: &str) -> bool {
    name.to_lowercase().contains("percentage")
}

/// Format a metric value for display.
///
/// Numbers get [`format_number`] plus a `%` suffix when the metric name
/// mentions "percentage"; series are formatted element-wise and joined with
/// `", "`; anything else is shown as-is.
pub fn format_metric(name: &str, value: &MetricValue) -> String {
    let suffix = if is_percentage(name) { "%" } else { "" };
    match value {
        MetricValue::Scalar(v) => format!("{}{suffix}", format_number(*v)),
        MetricValue::Series(values) => values
            .iter()
            .map(|v| format!("{}{suffix}", format_number(*v)))
            .collect::<Vec<_>>()
            .join(", "),
        MetricValue::Opaque(_) => value.to_string(),
    }
}
