//! Plain-text renderers for lookup results.
//!
//! Output follows the conventions of `dig` and `show ip bgp` closely enough
//! to be familiar; none of it is meant to be parsed back.

mod address;
mod dns;
mod route;

pub use address::{format_address_info, format_zone_info};
pub use dns::{answer_list_to_string, format_dns_response};
pub use route::format_route;

fn indent(lines: &[String], width: usize) -> String {
    let pad = " ".repeat(width);
    lines.iter().map(|line| format!("{pad}{line}\n")).collect()
}
