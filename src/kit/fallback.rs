//! Deterministic brand kit used when no AI backend is available or its
//! output is unusable.
//!
//! Everything here is fixed copy except the SEO and contact fields, which
//! come from the intake.

use crate::intake::{Intake, split_keywords};

use super::model::{
    BrandKit, BusinessCard, CardFace, CardLayout, CardSides, Flyer, Orientation, PaletteColor,
    Seo, SmartPage, VideoKey, VideoScript, Videos,
};

const DEFAULT_SEO_KEYWORDS: &[&str] = &["custom shirts Phoenix", "embroidery AZ"];
const DEFAULT_CONTACT_KEYWORDS: &[&str] = &["custom shirts", "embroidery", "logo mugs"];
const DEFAULT_META_DESCRIPTION: &str =
    "We create personalized apparel and promotional items to help your brand stand out.";
const DEFAULT_BUSINESS_LABEL: &str = "Your Business";

/// Print bleed reminder, shared with the renderer's default.
pub const BLEED_NOTE: &str = "Add 0.125 in bleed on all sides";

const LONG_FORM_SCRIPT: &str = "Longer version with story arc and benefits.";
const LONG_FORM_SCENES: &[&str] = &["Scene 1", "Scene 2", "Scene 3", "Scene 4"];

fn strings(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}

/// Build the fallback kit for an intake. Pure and infallible.
pub fn fallback_kit(intake: &Intake) -> BrandKit {
    let business = if intake.business_name.is_empty() {
        DEFAULT_BUSINESS_LABEL
    } else {
        intake.business_name.as_str()
    };
    let meta_description = if intake.seo_meta_desc.is_empty() {
        DEFAULT_META_DESCRIPTION.to_string()
    } else {
        intake.seo_meta_desc.clone()
    };

    BrandKit {
        taglines: strings(&[
            "Stand Out. Get Chosen.",
            "Make Your Brand Unmissable.",
            "Built To Win Attention.",
            "From Idea To Impact.",
            "Look Sharp. Sell More.",
        ]),
        slogans: strings(&[
            "Custom merch that turns heads and drives sales.",
            "Your brand, beautifully designed for everyday wins.",
            "Premium looks, practical prices, real results.",
            "Designs that connect customers to your story.",
            "Fast, modern branding that means business.",
        ]),
        palette: vec![
            PaletteColor::new("Navy Blue", "#0A2A66"),
            PaletteColor::new("Gold", "#E4B343"),
            PaletteColor::new("Soft White", "#F7F8FA"),
        ],
        business_card: BusinessCard {
            sides: Some(CardSides::Two),
            layout: Some(CardLayout::Modern),
            front: CardFace {
                elements: strings(&["logo top-left", "name & role", "phone", "email"]),
                fonts: strings(&["Inter Semibold", "Inter Regular"]),
                colors: strings(&["#0A2A66", "#E4B343"]),
            },
            back: CardFace {
                elements: strings(&["big QR code center", "CTA: Scan for quote"]),
                fonts: strings(&["Inter Bold"]),
                colors: strings(&["#0A2A66", "#F7F8FA"]),
            },
        },
        flyer: Flyer {
            recommended_sizes: strings(&["8.5x11 in", "5.5x8.5 in", "11x17 in"]),
            orientation: Some(Orientation::Portrait),
            layout_notes: strings(&[
                "Top: hero product or happy customer",
                "Middle: 3 key benefits with icons",
                "Bottom: bold CTA with QR and phone",
            ]),
            bleed_note: BLEED_NOTE.to_string(),
        },
        smart_page: SmartPage {
            background_hex: "#0A2A66".to_string(),
            fonts: strings(&["Inter", "DM Sans"]),
            mobile_readability_notes: strings(&[
                "High contrast (#FFFFFF on #0A2A66)",
                "Buttons full-width with 44px min height",
            ]),
        },
        seo: Seo {
            keywords: split_keywords(&intake.seo_keywords, DEFAULT_SEO_KEYWORDS),
            meta_title: format!("{business} - Custom Merch & Printing"),
            meta_description,
        },
        contact_keywords: split_keywords(&intake.contact_keywords, DEFAULT_CONTACT_KEYWORDS),
        videos: fallback_videos(),
    }
}

fn fallback_videos() -> Videos {
    let mut videos = Videos::default();
    videos.set(
        VideoKey::Runway30,
        VideoScript::new(
            "VO: Your brand deserves more than clip art. We create custom merch that stands out and sells. CTA: Scan the QR for a fast quote.",
            &[
                "Close-up of custom shirts",
                "Smiling customer receiving tote",
                "Phone scanning QR code",
            ],
        ),
    );
    videos.set(
        VideoKey::Pika30,
        VideoScript::new(
            "VO: Tired of bland branding? Upgrade your look with fast, modern merch. CTA: Tap to start now.",
            &[
                "Logo build motion",
                "Embroidery machine in action",
                "QR with CTA overlay",
            ],
        ),
    );
    videos.set(
        VideoKey::Capcut30,
        VideoScript::new(
            "VO: Make your brand unmissable with quality designs and quick turnaround. CTA: Message us today.",
            &[
                "Merch lineup",
                "Before/after refresh",
                "Staff helping a customer",
            ],
        ),
    );
    for key in [VideoKey::Runway60, VideoKey::Pika60, VideoKey::Capcut60] {
        videos.set(key, VideoScript::new(LONG_FORM_SCRIPT, LONG_FORM_SCENES));
    }
    videos
}
