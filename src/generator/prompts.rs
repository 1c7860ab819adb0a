//! Prompt text for brand kit generation.

use std::fmt::Write as _;

use crate::intake::Intake;

/// System persona sent with every generation request.
pub const SYSTEM_PROMPT: &str = "You are an expert brand strategist and creative director.";

/// Output contract the model must follow.
const OUTPUT_SHAPE: &str = r#"Return ONLY valid JSON with this shape:
{
  "taglines": [5 strings],
  "slogans": [5 strings],
  "palette": [{"name": string, "hex": string}],
  "business_card": {
    "sides": "one" | "two",
    "layout": "minimal" | "modern" | "classic" | "bold",
    "front": {"elements": [string], "fonts": [string], "colors": [string]},
    "back":  {"elements": [string], "fonts": [string], "colors": [string]}
  },
  "flyer": {
    "recommended_sizes": ["8.5x11 in", "5.5x8.5 in", "11x17 in"],
    "orientation": "portrait" | "landscape",
    "layout_notes": [string],
    "bleed_note": "Add 0.125 in bleed on all sides"
  },
  "smart_page": {
    "background_hex": string,
    "fonts": [string],
    "mobile_readability_notes": [string]
  },
  "seo": {
    "keywords": [string],
    "meta_title": string,
    "meta_description": string
  },
  "contact_keywords": [string],
  "videos": {
    "runway_30": {"script": string, "scene_prompts": [string]},
    "pika_30":   {"script": string, "scene_prompts": [string]},
    "capcut_30": {"script": string, "scene_prompts": [string]},
    "runway_60": {"script": string, "scene_prompts": [string]},
    "pika_60":   {"script": string, "scene_prompts": [string]},
    "capcut_60": {"script": string, "scene_prompts": [string]}
  }
}"#;

const RULES: &str = "Rules:
- Taglines ≤ 8 words; Slogans ≤ 12 words; exactly 5 of each.
- Include HEX color codes.
- Card: specify QR placement + side with CTA.
- Flyer: include 0.125in bleed note.
- Smart page: high contrast for mobile.
- SEO: include city names if present.
- Video: each of the 6 videos needs 4–6 scene prompts with a strong CTA.";

/// Build the user instruction for an intake.
pub fn build_prompt(intake: &Intake) -> String {
    let mut prompt = String::from(
        "You are a senior brand strategist. Create a concise, sales-minded brand kit.\n\n",
    );
    prompt.push_str(OUTPUT_SHAPE);
    prompt.push_str("\n\n");

    let _ = writeln!(prompt, "Business: {}", intake.business_name);
    let _ = writeln!(prompt, "What it does: {}", intake.business_desc);
    let _ = writeln!(prompt, "USP: {}", intake.usp);
    let _ = writeln!(prompt, "Products/Services: {}", intake.products_services);
    let _ = writeln!(prompt, "Audience: {}", intake.target_audience);
    let _ = writeln!(prompt, "Brand style: {}", intake.style_theme);
    let _ = writeln!(prompt, "Preferred colors: {}", intake.preferred_colors);
    let _ = writeln!(prompt, "Website: {}", intake.website_url);
    let _ = writeln!(prompt, "Reviews: {}", intake.reviews);
    let _ = writeln!(prompt, "SEO keywords: {}", intake.seo_keywords);

    if !intake.address.is_empty() {
        let _ = writeln!(prompt, "Location: {}", intake.address);
    }
    if !intake.tagline.is_empty() {
        let _ = writeln!(prompt, "Current tagline: {}", intake.tagline);
    }
    if !intake.slogan.is_empty() {
        let _ = writeln!(prompt, "Current slogan: {}", intake.slogan);
    }

    let briefs: Vec<String> = intake
        .video_briefs
        .iter()
        .filter(|b| !b.desc.is_empty() || !b.link.is_empty())
        .map(|b| match (b.desc.is_empty(), b.link.is_empty()) {
            (false, false) => format!("{} ({})", b.desc, b.link),
            (false, true) => b.desc.clone(),
            _ => b.link.clone(),
        })
        .collect();
    if !briefs.is_empty() {
        prompt.push_str("Existing video ideas:\n");
        for brief in &briefs {
            let _ = writeln!(prompt, "- {brief}");
        }
    }

    let social = intake.social.labeled();
    if !social.is_empty() {
        prompt.push_str("Social profiles:\n");
        for (label, link) in social {
            let _ = writeln!(prompt, "- {label}: {link}");
        }
    }

    prompt.push('\n');
    prompt.push_str(RULES);
    prompt
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn acme() -> Intake {
        Intake::normalize(&json!({
            "business_name": "Acme Prints",
            "business_desc": "Screen printing",
            "usp": "Same-day turnaround",
            "preferred_colors": "navy, gold",
            "seo_keywords": "tees Phoenix",
        }))
    }

    #[test]
    fn embeds_intake_fields() {
        let prompt = build_prompt(&acme());
        assert!(prompt.contains("Business: Acme Prints"));
        assert!(prompt.contains("What it does: Screen printing"));
        assert!(prompt.contains("USP: Same-day turnaround"));
        assert!(prompt.contains("Preferred colors: navy, gold"));
        assert!(prompt.contains("SEO keywords: tees Phoenix"));
    }

    #[test]
    fn describes_output_contract() {
        let prompt = build_prompt(&Intake::default());
        assert!(prompt.contains(r#""sides": "one" | "two""#));
        assert!(prompt.contains(r#""layout": "minimal" | "modern" | "classic" | "bold""#));
        assert!(prompt.contains(r#""orientation": "portrait" | "landscape""#));
        assert!(prompt.contains("Taglines ≤ 8 words; Slogans ≤ 12 words; exactly 5 of each."));
        assert!(prompt.contains("4–6 scene prompts"));
        for key in crate::kit::VideoKey::ALL {
            assert!(prompt.contains(&format!("\"{}\"", key.key())), "missing {}", key.key());
        }
    }

    #[test]
    fn optional_sections_only_when_present() {
        let bare = build_prompt(&acme());
        assert!(!bare.contains("Existing video ideas"));
        assert!(!bare.contains("Social profiles"));
        assert!(!bare.contains("Current tagline"));

        let rich = build_prompt(&Intake::normalize(&json!({
            "tagline": "Print it right",
            "video1_desc": "Shop tour",
            "video1_link": "https://youtu.be/tour",
            "video3_link": "https://youtu.be/promo",
            "link_ig": "https://instagram.com/acme",
        })));
        assert!(rich.contains("Current tagline: Print it right"));
        assert!(rich.contains("- Shop tour (https://youtu.be/tour)"));
        assert!(rich.contains("- https://youtu.be/promo"));
        assert!(rich.contains("- Instagram: https://instagram.com/acme"));
    }
}
