//! Brand kit — data model, validation gate and deterministic fallback.

pub mod fallback;
pub mod model;
pub mod validate;

pub use fallback::fallback_kit;
pub use model::{
    BrandKit, BusinessCard, CardFace, CardLayout, CardSides, Choice, Flyer, Orientation,
    PaletteColor, Seo, SmartPage, VideoKey, VideoScript, Videos,
};
pub use validate::{KitRejection, MIN_TAGLINES, is_valid_kit, validate_kit};
