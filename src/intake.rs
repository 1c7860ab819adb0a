//! Intake normalization — turns an untyped webhook payload into an [`Intake`].
//!
//! Normalization is total: every recognized field ends up as a trimmed
//! string. Non-string values (numbers, nulls, arrays, objects) become empty.

use serde::Serialize;
use serde_json::{Map, Value};

/// Fallback label used when a submission carries no business name.
pub const UNNAMED_SUBMISSION: &str = "New Submission";

/// A video the business already has, as described on the intake form.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct VideoBrief {
    pub desc: String,
    pub link: String,
}

/// Social profile links from the intake form.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct SocialLinks {
    pub facebook: String,
    pub instagram: String,
    pub tiktok: String,
    pub linkedin: String,
    pub youtube: String,
    pub google_business: String,
    pub other: [String; 2],
}

impl SocialLinks {
    /// Non-empty links paired with a display label.
    pub fn labeled(&self) -> Vec<(&'static str, &str)> {
        [
            ("Facebook", self.facebook.as_str()),
            ("Instagram", self.instagram.as_str()),
            ("TikTok", self.tiktok.as_str()),
            ("LinkedIn", self.linkedin.as_str()),
            ("YouTube", self.youtube.as_str()),
            ("Google Business", self.google_business.as_str()),
            ("Other", self.other[0].as_str()),
            ("Other", self.other[1].as_str()),
        ]
        .into_iter()
        .filter(|(_, link)| !link.is_empty())
        .collect()
    }
}

/// Canonical, fully-populated intake record.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Intake {
    // Contact
    pub full_name: String,
    pub business_name: String,
    pub email: String,
    pub phone: String,
    pub address: String,
    pub website_url: String,

    // Business
    pub business_desc: String,
    pub products_services: String,
    pub target_audience: String,
    pub usp: String,
    pub preferred_colors: String,
    pub style_theme: String,
    pub tagline: String,
    pub slogan: String,
    pub reviews: String,

    pub video_briefs: [VideoBrief; 3],
    pub social: SocialLinks,

    // SEO
    pub seo_keywords: String,
    pub seo_meta_desc: String,
    pub contact_keywords: String,
}

impl Intake {
    /// Normalize a raw payload. Never fails; a non-object payload yields an
    /// all-empty intake.
    pub fn normalize(raw: &Value) -> Self {
        let empty = Map::new();
        let map = raw.as_object().unwrap_or(&empty);
        let field = |key: &str| text(map, key);

        let business_name = {
            let primary = field("business_name");
            if primary.is_empty() {
                field("businessName")
            } else {
                primary
            }
        };

        Self {
            full_name: field("full_name"),
            business_name,
            email: field("email"),
            phone: field("phone"),
            address: field("address"),
            website_url: field("website_url"),

            business_desc: field("business_desc"),
            products_services: field("products_services"),
            target_audience: field("target_audience"),
            usp: field("usp"),
            preferred_colors: field("preferred_colors"),
            style_theme: field("style_theme"),
            tagline: field("tagline"),
            slogan: field("slogan"),
            reviews: field("reviews"),

            video_briefs: [1, 2, 3].map(|n| VideoBrief {
                desc: field(&format!("video{n}_desc")),
                link: field(&format!("video{n}_link")),
            }),
            social: SocialLinks {
                facebook: field("link_fb"),
                instagram: field("link_ig"),
                tiktok: field("link_tt"),
                linkedin: field("link_li"),
                youtube: field("link_yt"),
                google_business: field("link_gbp"),
                other: [field("other_social_url1"), field("other_social_url2")],
            },

            seo_keywords: field("seo_keywords"),
            seo_meta_desc: field("seo_meta_desc"),
            contact_keywords: field("contact_keywords"),
        }
    }

    /// Business name, or a generic label for unnamed submissions.
    pub fn display_name(&self) -> &str {
        if self.business_name.is_empty() {
            UNNAMED_SUBMISSION
        } else {
            self.business_name.as_str()
        }
    }
}

fn text(map: &Map<String, Value>, key: &str) -> String {
    match map.get(key) {
        Some(Value::String(s)) => s.trim().to_string(),
        _ => String::new(),
    }
}

/// Split a comma-separated keyword string into trimmed, non-empty segments.
///
/// Returns `defaults` when the input yields no segments.
pub fn split_keywords(input: &str, defaults: &[&str]) -> Vec<String> {
    let keywords: Vec<String> = input
        .split(',')
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
        .collect();

    if keywords.is_empty() {
        defaults.iter().map(|s| s.to_string()).collect()
    } else {
        keywords
    }
}
