//! View templating: the HTML fragments the host mounts into its fixed
//! markup (gallery grid, gallery count, palette buttons).
//!
//! Pure string rendering; the engine never parses or mutates a DOM.

use crate::gallery::Artwork;
use crate::palette::{Color, PALETTE};

/// Minimal HTML text escaping for user-entered values.
fn escape(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            _ => out.push(ch),
        }
    }
    out
}

/// Render the gallery grid: an empty-state placeholder, or one card per
/// artwork in list order (oldest first).
pub fn gallery_grid(items: &[Artwork]) -> String {
    if items.is_empty() {
        return r#"<div class="empty-gallery">
    <p class="empty-icon">📭</p>
    <p class="empty-text">まださくひんがありません</p>
    <p class="empty-hint">ワークシートを完成させて、ギャラリーにほぞんしてね!</p>
</div>"#
            .to_string();
    }

    items
        .iter()
        .map(|artwork| {
            format!(
                r#"<div class="gallery-item">
    <img src="{image}" alt="{name}" class="gallery-image">
    <div class="gallery-info">
        <div>
            <p class="gallery-name">{name}</p>
            <p class="gallery-date">{date}</p>
        </div>
        <button class="delete-btn" data-id="{id}">けす</button>
    </div>
</div>"#,
                image = artwork.image,
                name = escape(&artwork.name),
                date = escape(&artwork.date),
                id = artwork.id,
            )
        })
        .collect::<Vec<_>>()
        .join("\n")
}

/// The displayed artwork count.
pub fn gallery_count(len: usize) -> String {
    len.to_string()
}

/// Render the palette buttons with the current color marked active.
pub fn palette_buttons(current: Color) -> String {
    PALETTE
        .iter()
        .map(|entry| {
            let active = if entry.value == current { " active" } else { "" };
            format!(
                r#"<button class="color-btn{active}" style="background-color: {value}" title="{name}"></button>"#,
                active = active,
                value = entry.value.to_hex(),
                name = entry.name,
            )
        })
        .collect::<Vec<_>>()
        .join("\n")
}
