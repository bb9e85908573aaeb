use crate::types::Route;
use std::fmt::Write;

/// Render routes in the style of `show ip bgp <prefix>`.
///
/// Routes stay in the order given. The `<network>, version <n>` header is
/// printed only when the network differs from the previous route's.
#[must_use]
pub fn format_route(routes: &[Route]) -> String {
    let mut blocks = Vec::with_capacity(routes.len());
    let mut previous: Option<&str> = None;

    for route in routes {
        let r = &route.summary;
        let mut text = String::new();

        if previous != Some(r.network.as_str()) {
            let _ = writeln!(text, "{}, version {}", r.network, r.version);
        }
        let _ = writeln!(text, "  {}", r.as_path);

        let _ = write!(text, "    {} from {}", r.nexthops.join(", "), r.peer_id);
        if r.used {
            text.push_str(" (used)");
        }
        if r.best {
            let _ = write!(text, ", best ({})", r.selection_reason);
        }
        text.push('\n');

        let loc_prf = r.loc_prf.map_or_else(|| "-".to_string(), |v| v.to_string());
        let _ = writeln!(
            text,
            "      Origin {}, localpref {}, MED {}, {}, {}",
            r.origin,
            loc_prf,
            r.metric,
            if r.valid { "valid" } else { "invalid" },
            r.path_from
        );

        if let Some(details) = &route.details {
            let _ = writeln!(text, "    RPKI State: {}", details.rpki_state);
            let _ = writeln!(text, "    Community: {}", details.community.join(", "));
            let _ = writeln!(
                text,
                "    Extended Community: {}",
                details.ext_community.join(", ")
            );
        }

        blocks.push(text);
        previous = Some(r.network.as_str());
    }

    blocks.join("\n")
}
