//! Terminal presentation of the view states.

use crate::map::{MapView, DEFAULT_CLUSTER_CELL_DEGREES, DEFAULT_ZOOM};
use crate::pipeline::VibeReport;

pub(crate) fn render_home() -> String {
    "Press Enter to Check My Vibe (q to quit): ".to_string()
}

pub(crate) fn render_loading() -> String {
    "Checking the vibe around you...".to_string()
}

pub(crate) fn render_error(message: &str) -> String {
    format!("Oops! {message}")
}

/// Emoji, label, score, the place list, and a map link.
///
/// The selected place on `map`, if any, is marked with `>`.
pub(crate) fn render_results(report: &VibeReport, map: &MapView) -> String {
    let mut lines = vec![
        format!("{}  {}", report.vibe.emoji, report.vibe.label),
        format!("Vibe Score: {}/10", report.vibe.score),
        String::new(),
        "Nearby Places:".to_string(),
    ];

    let selected = map.selected().map(|m| m.id.as_str());
    for place in &report.places {
        let bullet = if selected == Some(place.id.as_str()) {
            ">"
        } else {
            "*"
        };
        lines.push(format!(
            "  {bullet} {} ({}) - {}, {}",
            place.name, place.primary_category_name, place.address, place.locality
        ));
    }

    let clusters = map.clusters(DEFAULT_CLUSTER_CELL_DEGREES);
    lines.push(String::new());
    lines.push(format!(
        "Area Map ({} markers in {} clusters): {}",
        map.place_markers().len(),
        clusters.len(),
        map.tile_url(DEFAULT_ZOOM)
    ));
    for cluster in clusters.iter().filter(|c| c.place_ids.len() > 1) {
        lines.push(format!(
            "  cluster near {:.4},{:.4}: {}",
            cluster.latitude,
            cluster.longitude,
            cluster.place_ids.join(", ")
        ));
    }

    lines.join("\n")
}

/// Popup text for a focused place.
pub(crate) fn render_focus(report: &VibeReport, place_id: &str) -> Option<String> {
    let place = report.places.iter().find(|p| p.id == place_id)?;
    let position = place
        .coordinates()
        .map_or_else(|| "no position".to_string(), |c| c.to_ll());
    Some(format!(
        "{} | {} | {}, {} ({position})",
        place.name, place.primary_category_name, place.address, place.locality
    ))
}
