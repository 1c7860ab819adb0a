//! HTML rendering of a brand kit.
//!
//! Rendering is total: any missing field renders as an empty list or
//! string. All kit text is escaped before it reaches the markup.

use std::fmt::{Display, Write as _};

use chrono::{DateTime, Local, TimeZone};

use crate::kit::fallback::BLEED_NOTE;
use crate::kit::{BrandKit, CardFace, Choice, PaletteColor, VideoKey};

/// Escape the markup-special characters `&`, `<` and `>`.
pub fn escape_html(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            _ => out.push(ch),
        }
    }
    out
}

/// `#RGB` or `#RRGGBB`.
pub fn is_hex_color(value: &str) -> bool {
    let Some(digits) = value.strip_prefix('#') else {
        return false;
    };
    matches!(digits.len(), 3 | 6) && digits.chars().all(|c| c.is_ascii_hexdigit())
}

/// Render a kit stamped with the current local time.
pub fn render_brand_kit(kit: &BrandKit) -> String {
    render_brand_kit_at(kit, &Local::now())
}

/// Render a kit with an explicit "generated at" timestamp.
pub fn render_brand_kit_at<Tz>(kit: &BrandKit, generated_at: &DateTime<Tz>) -> String
where
    Tz: TimeZone,
    Tz::Offset: Display,
{
    let mut html = String::with_capacity(8 * 1024);
    let card = &kit.business_card;
    let flyer = &kit.flyer;
    let page = &kit.smart_page;

    html.push_str(
        "<!doctype html>\n<html><head><meta charset=\"utf-8\"><title>Brand Kit</title></head>\n\
         <body style=\"font-family:Inter,Arial,sans-serif;line-height:1.6;color:#111;padding:24px;max-width:920px;margin:0 auto;\">\n",
    );
    html.push_str("  <h1 style=\"margin:0 0 8px 0;\">Brand Kit</h1>\n");
    let _ = writeln!(
        html,
        "  <p style=\"margin-top:0;color:#555;\">Generated {}</p>",
        generated_at.format("%Y-%m-%d %H:%M")
    );

    let _ = writeln!(html, "  <h2>Taglines (5)</h2><ul>{}</ul>", list_items(&kit.taglines));
    let _ = writeln!(html, "  <h2>Slogans (5)</h2><ul>{}</ul>", list_items(&kit.slogans));

    let _ = writeln!(html, "  <h2>Color Palette</h2><div>{}</div>", swatches(&kit.palette));

    html.push_str("  <h2>Business Card</h2>\n");
    let _ = writeln!(
        html,
        "  <p><strong>Sides:</strong> {} | <strong>Layout:</strong> {}</p>",
        choice_text(card.sides.as_ref()),
        choice_text(card.layout.as_ref())
    );
    card_face(&mut html, "Front", &card.front);
    card_face(&mut html, "Back", &card.back);

    html.push_str("  <h2>Flyer</h2>\n");
    let _ = writeln!(
        html,
        "  <p><strong>Recommended sizes:</strong> {}</p>",
        joined(&flyer.recommended_sizes)
    );
    let _ = writeln!(
        html,
        "  <p><strong>Orientation:</strong> {}</p>",
        choice_text(flyer.orientation.as_ref())
    );
    let _ = writeln!(html, "  <ul>{}</ul>", list_items(&flyer.layout_notes));
    let bleed = if flyer.bleed_note.is_empty() {
        BLEED_NOTE
    } else {
        flyer.bleed_note.as_str()
    };
    let _ = writeln!(
        html,
        "  <p style=\"color:#900;\"><strong>Print Note:</strong> {}</p>",
        escape_html(bleed)
    );

    html.push_str("  <h2>Smart Page</h2>\n");
    let _ = writeln!(
        html,
        "  <p><strong>Background:</strong> {} | <strong>Fonts:</strong> {}</p>",
        escape_html(&page.background_hex),
        joined(&page.fonts)
    );
    let _ = writeln!(html, "  <ul>{}</ul>", list_items(&page.mobile_readability_notes));

    html.push_str("  <h2>SEO</h2>\n");
    let _ = writeln!(
        html,
        "  <p><strong>Meta Title:</strong> {}</p>",
        escape_html(&kit.seo.meta_title)
    );
    let _ = writeln!(
        html,
        "  <p><strong>Meta Description:</strong> {}</p>",
        escape_html(&kit.seo.meta_description)
    );
    let _ = writeln!(html, "  <p><strong>Keywords:</strong> {}</p>", joined(&kit.seo.keywords));

    let _ = writeln!(
        html,
        "  <h2>Contact Keywords</h2>\n  <p>{}</p>",
        joined(&kit.contact_keywords)
    );

    html.push_str("  <h2>Video Scripts</h2>\n");
    for key in VideoKey::ALL {
        let video = kit.videos.get(key);
        let script = video.map(|v| v.script.as_str()).unwrap_or_default();
        let scenes = video.map(|v| v.scene_prompts.as_slice()).unwrap_or_default();
        let _ = writeln!(html, "  <h3 style=\"margin-top:18px;\">{}</h3>", key.label());
        let _ = writeln!(html, "  <p><strong>Script:</strong> {}</p>", escape_html(script));
        let _ = writeln!(html, "  <ol>{}</ol>", list_items(scenes));
    }

    html.push_str(
        "  <hr style=\"margin:28px 0;\">\n  <p style=\"color:#777;font-size:12px;\">Tip: Use HEX codes and layout notes directly in Canva or your design tool. Ensure 0.125 in bleed for print.</p>\n\
         </body></html>\n",
    );
    html
}

fn list_items(items: &[String]) -> String {
    items
        .iter()
        .map(|item| format!("<li>{}</li>", escape_html(item)))
        .collect()
}

fn joined(items: &[String]) -> String {
    items
        .iter()
        .map(|item| escape_html(item))
        .collect::<Vec<_>>()
        .join(", ")
}

fn choice_text<T: Choice>(choice: Option<&T>) -> &'static str {
    choice.map(Choice::as_str).unwrap_or_default()
}

fn card_face(html: &mut String, title: &str, face: &CardFace) {
    let _ = writeln!(html, "  <h3>{title}</h3><ul>{}</ul>", list_items(&face.elements));
    let _ = writeln!(html, "  <p><strong>Fonts:</strong> {}</p>", joined(&face.fonts));
    let _ = writeln!(html, "  <p><strong>Colors:</strong> {}</p>", joined(&face.colors));
}

fn swatches(palette: &[PaletteColor]) -> String {
    palette
        .iter()
        .map(|color| {
            // Only well-formed hex codes reach the style attribute.
            let background = if is_hex_color(&color.hex) {
                color.hex.as_str()
            } else {
                "transparent"
            };
            format!(
                "\n    <div style=\"display:inline-block;margin:6px 10px 6px 0;\">\
                 <div style=\"width:32px;height:32px;border-radius:6px;border:1px solid #ddd;background:{background}\"></div>\
                 <div style=\"font-size:12px;color:#444;\">{}<br>{}</div></div>",
                escape_html(&color.name),
                escape_html(&color.hex)
            )
        })
        .collect()
}
