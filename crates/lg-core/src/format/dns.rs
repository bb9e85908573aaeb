use crate::types::{DnsAnswer, DnsResponse};
use std::fmt::Write;

/// Render records as padded `name ttl class type data` columns.
///
/// Columns are separated by two spaces and each line ends with a newline.
#[must_use]
pub fn answer_list_to_string(answers: &[DnsAnswer]) -> String {
    let rows: Vec<[String; 5]> = answers
        .iter()
        .map(|a| {
            [
                a.name.clone(),
                a.ttl.to_string(),
                a.class.clone(),
                a.record_type.clone(),
                a.data.clone(),
            ]
        })
        .collect();

    let mut widths = [0usize; 5];
    for row in &rows {
        for (width, cell) in widths.iter_mut().zip(row) {
            *width = (*width).max(cell.chars().count());
        }
    }

    let mut out = String::new();
    for row in &rows {
        let line = row
            .iter()
            .zip(widths)
            .map(|(cell, width)| format!("{cell:<width$}"))
            .collect::<Vec<_>>()
            .join("  ");
        out.push_str(line.trim_end());
        out.push('\n');
    }
    out
}

/// Render a response the way `dig` does, minus the header flags.
#[must_use]
pub fn format_dns_response(response: &DnsResponse, server: &str) -> String {
    let mut out = String::from(";; QUESTION SECTION:\n");
    for q in &response.questions {
        let _ = writeln!(out, "; {}  {}  {}", q.name, q.class, q.record_type);
    }

    out.push_str("\n;; ANSWER SECTION:\n");
    out.push_str(&answer_list_to_string(&response.answers));

    if !response.authorities.is_empty() {
        out.push_str("\n;; AUTHORITY SECTION:\n");
        out.push_str(&answer_list_to_string(&response.authorities));
    }

    let _ = writeln!(out, "\n;; Query time: {} msec", response.query_time);
    let _ = writeln!(out, ";; SERVER: {server} (HTTPS)");
    let _ = writeln!(
        out,
        ";; WHEN: {}",
        response.time.format("%a %b %-d %H:%M:%S UTC %Y")
    );
    let _ = writeln!(out, ";; STATUS: {}", response.rcode);
    out
}
