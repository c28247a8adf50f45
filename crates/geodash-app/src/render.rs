//! Plain-text rendering of a view snapshot

use std::io::Write;

use anyhow::Result;
use geodash_core::ViewSnapshot;

const NAME_WIDTH: usize = 28;

pub fn render_view<W: Write>(snapshot: &ViewSnapshot<'_>, out: &mut W) -> Result<()> {
    let query = &snapshot.query;
    let search = if query.search_text.is_empty() {
        "(none)"
    } else {
        query.search_text.as_str()
    };

    writeln!(out, "search: {}", search)?;
    writeln!(
        out,
        "{} rows, page {} of {}, {} per page",
        snapshot.page.total_filtered,
        if snapshot.page.page_count == 0 { 0 } else { snapshot.page.page_index + 1 },
        snapshot.page.page_count,
        snapshot.page.page_size
    )?;

    writeln!(
        out,
        "  {:<10} {:<width$} {:<10} {}",
        "ID",
        "PROJECT NAME",
        "STATUS",
        "LAST UPDATED",
        width = NAME_WIDTH
    )?;
    for row in &snapshot.rows {
        let mark = if query.selected_id.as_ref() == Some(&row.id) { '>' } else { ' ' };
        writeln!(
            out,
            "{} {:<10} {:<width$} {:<10} {}",
            mark,
            row.id.to_string(),
            truncate(&row.name, NAME_WIDTH),
            row.status.label(),
            row.last_updated,
            width = NAME_WIDTH
        )?;
    }
    writeln!(out, "  {}", snapshot.page.label())?;

    writeln!(out, "markers: {}", snapshot.markers.len())?;
    for marker in snapshot.markers.iter().filter(|m| m.highlighted) {
        writeln!(out, "  highlighted {} at {}", marker.id, marker.position)?;
    }

    match (&query.selected_id, &snapshot.camera_target) {
        (Some(_), Some(target)) => {
            writeln!(out, "camera: {} zoom {}", target.center, target.zoom)?
        }
        (Some(id), None) => writeln!(out, "camera: selected id {} not found, map unchanged", id)?,
        (None, _) => writeln!(
            out,
            "camera: {} zoom {} (no selection)",
            snapshot.map_view.center, snapshot.map_view.zoom
        )?,
    }
    Ok(())
}

fn truncate(text: &str, width: usize) -> String {
    if text.chars().count() <= width {
        return text.to_string();
    }
    let mut short: String = text.chars().take(width - 1).collect();
    short.push('…');
    short
}
