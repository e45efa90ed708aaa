//! Scene strip sharing
//!
//! Formats one scene as a plain-text strip and places it on the system
//! clipboard. Failures are reported to the user and never touch the
//! stores.

use anyhow::Context;

use crate::data::Scene;

fn or_na(value: &str) -> &str {
    if value.trim().is_empty() {
        "N/A"
    } else {
        value
    }
}

/// Render a scene as a shareable text strip
pub fn format_strip(scene: &Scene) -> String {
    let mut lines = Vec::new();
    lines.push(format!("Scene #{} — {}", scene.number, scene.heading));
    lines.push(format!("{} | {}", or_na(&scene.date), or_na(&scene.time)));
    lines.push(format!("{}. {}", scene.kind, scene.location));
    lines.push(format!(
        "Pages: {} | Duration: {}",
        or_na(&scene.pages),
        or_na(&scene.duration)
    ));
    lines.push(format!("Cast: {}", or_na(&scene.cast)));
    lines.push(format!("Equipment: {}", or_na(&scene.equipment)));
    lines.push(format!("Status: {}", scene.status));

    let width = lines.iter().map(|l| l.chars().count()).max().unwrap_or(0);
    let bar = "─".repeat(width + 2);

    let mut out = String::new();
    out.push_str(&format!("┌{}┐\n", bar));
    for line in &lines {
        let pad = width - line.chars().count();
        out.push_str(&format!("│ {}{} │\n", line, " ".repeat(pad)));
    }
    out.push_str(&format!("└{}┘", bar));
    out
}

/// Copy a scene strip to the system clipboard
pub fn share_scene(scene: &Scene) -> anyhow::Result<()> {
    let strip = format_strip(scene);
    let mut clipboard = arboard::Clipboard::new().context("clipboard unavailable")?;
    clipboard
        .set_text(strip)
        .context("could not copy scene strip to clipboard")?;
    Ok(())
}
