//! Structural gate for upstream kit output.
//!
//! Only `taglines` is checked. Every other field is best effort and the
//! renderer copes with it being missing.

use serde_json::Value;

/// Minimum number of taglines an acceptable kit must carry.
pub const MIN_TAGLINES: usize = 5;

/// Reason a parsed upstream object was not accepted as a kit.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum KitRejection {
    #[error("kit is null")]
    Null,

    #[error("kit has no taglines")]
    MissingTaglines,

    #[error("taglines is not a list")]
    TaglinesNotSequence,

    #[error("expected at least {required} taglines, found {found}")]
    TooFewTaglines { found: usize, required: usize },
}

/// Check a parsed object against the minimal kit contract.
pub fn validate_kit(value: &Value) -> Result<(), KitRejection> {
    if value.is_null() {
        return Err(KitRejection::Null);
    }

    let taglines = value
        .get("taglines")
        .ok_or(KitRejection::MissingTaglines)?
        .as_array()
        .ok_or(KitRejection::TaglinesNotSequence)?;

    if taglines.len() < MIN_TAGLINES {
        return Err(KitRejection::TooFewTaglines {
            found: taglines.len(),
            required: MIN_TAGLINES,
        });
    }

    Ok(())
}

/// Boolean form of [`validate_kit`].
pub fn is_valid_kit(value: &Value) -> bool {
    validate_kit(value).is_ok()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn accepts_five_taglines() {
        assert!(is_valid_kit(&json!({"taglines": ["a", "b", "c", "d", "e"]})));
    }

    #[test]
    fn accepts_more_than_five_with_nothing_else() {
        assert!(is_valid_kit(&json!({"taglines": ["a", "b", "c", "d", "e", "f"]})));
    }

    #[test]
    fn rejects_null() {
        assert_eq!(validate_kit(&Value::Null), Err(KitRejection::Null));
    }

    #[test]
    fn rejects_missing_taglines() {
        assert_eq!(
            validate_kit(&json!({"slogans": ["a"]})),
            Err(KitRejection::MissingTaglines)
        );
        assert_eq!(validate_kit(&json!({})), Err(KitRejection::MissingTaglines));
    }

    #[test]
    fn rejects_non_object_values() {
        assert_eq!(
            validate_kit(&json!(["a", "b", "c", "d", "e"])),
            Err(KitRejection::MissingTaglines)
        );
        assert!(!is_valid_kit(&json!("taglines")));
    }

    #[test]
    fn rejects_non_sequence_taglines() {
        assert_eq!(
            validate_kit(&json!({"taglines": "a, b, c, d, e"})),
            Err(KitRejection::TaglinesNotSequence)
        );
        assert_eq!(
            validate_kit(&json!({"taglines": null})),
            Err(KitRejection::TaglinesNotSequence)
        );
    }

    #[test]
    fn rejects_short_taglines() {
        assert_eq!(
            validate_kit(&json!({"taglines": ["a", "b", "c", "d"]})),
            Err(KitRejection::TooFewTaglines {
                found: 4,
                required: 5
            })
        );
    }
}
