//! Brand kit data model.
//!
//! Upstream output is only loosely trusted: every field deserializes
//! leniently, so a wrong type degrades to an empty value instead of
//! failing the whole kit.

use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

// ── Kit ─────────────────────────────────────────────────────────────

/// The generated brand kit.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct BrandKit {
    #[serde(default, deserialize_with = "string_list")]
    pub taglines: Vec<String>,
    #[serde(default, deserialize_with = "string_list")]
    pub slogans: Vec<String>,
    #[serde(default, deserialize_with = "object_list")]
    pub palette: Vec<PaletteColor>,
    #[serde(default, deserialize_with = "lenient")]
    pub business_card: BusinessCard,
    #[serde(default, deserialize_with = "lenient")]
    pub flyer: Flyer,
    #[serde(default, deserialize_with = "lenient")]
    pub smart_page: SmartPage,
    #[serde(default, deserialize_with = "lenient")]
    pub seo: Seo,
    #[serde(default, deserialize_with = "string_list")]
    pub contact_keywords: Vec<String>,
    #[serde(default, deserialize_with = "lenient")]
    pub videos: Videos,
}

impl BrandKit {
    /// Convert an already-validated upstream object into a kit.
    pub fn from_value(value: Value) -> Result<Self, serde_json::Error> {
        serde_json::from_value(value)
    }
}

/// A named palette entry.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PaletteColor {
    #[serde(default, deserialize_with = "string")]
    pub name: String,
    #[serde(default, deserialize_with = "string")]
    pub hex: String,
}

impl PaletteColor {
    pub fn new(name: impl Into<String>, hex: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            hex: hex.into(),
        }
    }
}

// ── Print assets ────────────────────────────────────────────────────

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BusinessCard {
    #[serde(default, deserialize_with = "choice", skip_serializing_if = "Option::is_none")]
    pub sides: Option<CardSides>,
    #[serde(default, deserialize_with = "choice", skip_serializing_if = "Option::is_none")]
    pub layout: Option<CardLayout>,
    #[serde(default, deserialize_with = "lenient")]
    pub front: CardFace,
    #[serde(default, deserialize_with = "lenient")]
    pub back: CardFace,
}

/// One printed side of a business card.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CardFace {
    #[serde(default, deserialize_with = "string_list")]
    pub elements: Vec<String>,
    #[serde(default, deserialize_with = "string_list")]
    pub fonts: Vec<String>,
    #[serde(default, deserialize_with = "string_list")]
    pub colors: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Flyer {
    #[serde(default, deserialize_with = "string_list")]
    pub recommended_sizes: Vec<String>,
    #[serde(default, deserialize_with = "choice", skip_serializing_if = "Option::is_none")]
    pub orientation: Option<Orientation>,
    #[serde(default, deserialize_with = "string_list")]
    pub layout_notes: Vec<String>,
    #[serde(default, deserialize_with = "string")]
    pub bleed_note: String,
}

/// Landing page styling guidance.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SmartPage {
    #[serde(default, deserialize_with = "string")]
    pub background_hex: String,
    #[serde(default, deserialize_with = "string_list")]
    pub fonts: Vec<String>,
    #[serde(default, deserialize_with = "string_list")]
    pub mobile_readability_notes: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Seo {
    #[serde(default, deserialize_with = "string_list")]
    pub keywords: Vec<String>,
    #[serde(default, deserialize_with = "string")]
    pub meta_title: String,
    #[serde(default, deserialize_with = "string")]
    pub meta_description: String,
}

// ── Enumerated choices ──────────────────────────────────────────────

/// A closed set of lowercase string values.
pub trait Choice: Sized {
    fn parse(s: &str) -> Option<Self>;
    fn as_str(&self) -> &'static str;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CardSides {
    One,
    Two,
}

impl Choice for CardSides {
    fn parse(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "one" => Some(Self::One),
            "two" => Some(Self::Two),
            _ => None,
        }
    }

    fn as_str(&self) -> &'static str {
        match self {
            Self::One => "one",
            Self::Two => "two",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CardLayout {
    Minimal,
    Modern,
    Classic,
    Bold,
}

impl Choice for CardLayout {
    fn parse(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "minimal" => Some(Self::Minimal),
            "modern" => Some(Self::Modern),
            "classic" => Some(Self::Classic),
            "bold" => Some(Self::Bold),
            _ => None,
        }
    }

    fn as_str(&self) -> &'static str {
        match self {
            Self::Minimal => "minimal",
            Self::Modern => "modern",
            Self::Classic => "classic",
            Self::Bold => "bold",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Orientation {
    Portrait,
    Landscape,
}

impl Choice for Orientation {
    fn parse(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "portrait" => Some(Self::Portrait),
            "landscape" => Some(Self::Landscape),
            _ => None,
        }
    }

    fn as_str(&self) -> &'static str {
        match self {
            Self::Portrait => "portrait",
            Self::Landscape => "landscape",
        }
    }
}

// ── Videos ──────────────────────────────────────────────────────────

/// Script and shot list for one short video.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct VideoScript {
    #[serde(default, deserialize_with = "string")]
    pub script: String,
    #[serde(default, deserialize_with = "string_list")]
    pub scene_prompts: Vec<String>,
}

impl VideoScript {
    pub fn new(script: impl Into<String>, scene_prompts: &[&str]) -> Self {
        Self {
            script: script.into(),
            scene_prompts: scene_prompts.iter().map(|s| s.to_string()).collect(),
        }
    }
}

/// The fixed set of video slots a kit can fill.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum VideoKey {
    Runway30,
    Pika30,
    Capcut30,
    Runway60,
    Pika60,
    Capcut60,
}

impl VideoKey {
    /// Render order.
    pub const ALL: [VideoKey; 6] = [
        Self::Runway30,
        Self::Pika30,
        Self::Capcut30,
        Self::Runway60,
        Self::Pika60,
        Self::Capcut60,
    ];

    /// Wire key, e.g. `runway_30`.
    pub fn key(&self) -> &'static str {
        match self {
            Self::Runway30 => "runway_30",
            Self::Pika30 => "pika_30",
            Self::Capcut30 => "capcut_30",
            Self::Runway60 => "runway_60",
            Self::Pika60 => "pika_60",
            Self::Capcut60 => "capcut_60",
        }
    }

    /// Section label, e.g. `RUNWAY 30`.
    pub fn label(&self) -> String {
        self.key().replacen('_', " ", 1).to_uppercase()
    }
}

/// Video scripts keyed by [`VideoKey`]. Unknown upstream keys are dropped.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Videos {
    #[serde(default, deserialize_with = "optional", skip_serializing_if = "Option::is_none")]
    pub runway_30: Option<VideoScript>,
    #[serde(default, deserialize_with = "optional", skip_serializing_if = "Option::is_none")]
    pub pika_30: Option<VideoScript>,
    #[serde(default, deserialize_with = "optional", skip_serializing_if = "Option::is_none")]
    pub capcut_30: Option<VideoScript>,
    #[serde(default, deserialize_with = "optional", skip_serializing_if = "Option::is_none")]
    pub runway_60: Option<VideoScript>,
    #[serde(default, deserialize_with = "optional", skip_serializing_if = "Option::is_none")]
    pub pika_60: Option<VideoScript>,
    #[serde(default, deserialize_with = "optional", skip_serializing_if = "Option::is_none")]
    pub capcut_60: Option<VideoScript>,
}

impl Videos {
    pub fn get(&self, key: VideoKey) -> Option<&VideoScript> {
        self.slot(key).as_ref()
    }

    pub fn set(&mut self, key: VideoKey, script: VideoScript) {
        *self.slot_mut(key) = Some(script);
    }

    fn slot(&self, key: VideoKey) -> &Option<VideoScript> {
        match key {
            VideoKey::Runway30 => &self.runway_30,
            VideoKey::Pika30 => &self.pika_30,
            VideoKey::Capcut30 => &self.capcut_30,
            VideoKey::Runway60 => &self.runway_60,
            VideoKey::Pika60 => &self.pika_60,
            VideoKey::Capcut60 => &self.capcut_60,
        }
    }

    fn slot_mut(&mut self, key: VideoKey) -> &mut Option<VideoScript> {
        match key {
            VideoKey::Runway30 => &mut self.runway_30,
            VideoKey::Pika30 => &mut self.pika_30,
            VideoKey::Capcut30 => &mut self.capcut_30,
            VideoKey::Runway60 => &mut self.runway_60,
            VideoKey::Pika60 => &mut self.pika_60,
            VideoKey::Capcut60 => &mut self.capcut_60,
        }
    }
}

// ── Lenient deserializers ───────────────────────────────────────────

fn scalar_text(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        _ => None,
    }
}

fn string<'de, D: Deserializer<'de>>(d: D) -> Result<String, D::Error> {
    let value = Value::deserialize(d)?;
    Ok(scalar_text(&value).unwrap_or_default())
}

/// A list of strings. A lone scalar becomes a one-item list; nulls and
/// nested values are dropped.
fn string_list<'de, D: Deserializer<'de>>(d: D) -> Result<Vec<String>, D::Error> {
    let value = Value::deserialize(d)?;
    Ok(match value {
        Value::Array(items) => items.iter().filter_map(scalar_text).collect(),
        other => scalar_text(&other).into_iter().collect(),
    })
}

/// A list of objects; items that don't deserialize are dropped.
fn object_list<'de, D, T>(d: D) -> Result<Vec<T>, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned,
{
    let value = Value::deserialize(d)?;
    Ok(match value {
        Value::Array(items) => items
            .into_iter()
            .filter(Value::is_object)
            .filter_map(|item| T::deserialize(item).ok())
            .collect(),
        _ => Vec::new(),
    })
}

fn lenient<'de, D, T>(d: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned + Default,
{
    let value = Value::deserialize(d)?;
    Ok(T::deserialize(value).unwrap_or_default())
}

fn optional<'de, D, T>(d: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned,
{
    let value = Value::deserialize(d)?;
    if !value.is_object() {
        return Ok(None);
    }
    Ok(T::deserialize(value).ok())
}

fn choice<'de, D, T>(d: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: Choice,
{
    let value = Value::deserialize(d)?;
    Ok(value.as_str().and_then(T::parse))
}
