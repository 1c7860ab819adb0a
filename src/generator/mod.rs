//! Content generator — produces a [`BrandKit`] for an intake.
//!
//! One backend attempt, then the validator gate, then the deterministic
//! fallback. The generator never fails: every error path ends in
//! [`fallback_kit`].

pub mod prompts;

use std::sync::Arc;
use std::time::Duration;

use serde_json::Value;
use tracing::{debug, info, warn};

use crate::error::GenerationError;
use crate::intake::Intake;
use crate::kit::{BrandKit, KitRejection, MIN_TAGLINES, fallback_kit, validate_kit};
use crate::llm::{ChatMessage, CompletionRequest, LlmProvider, ResponseFormat};

pub use prompts::{SYSTEM_PROMPT, build_prompt};

/// Configuration for kit generation.
#[derive(Debug, Clone)]
pub struct GeneratorConfig {
    /// Sampling temperature sent to the backend.
    pub temperature: f32,
    /// Upper bound on the single backend call.
    pub timeout: Duration,
    /// Optional cap on response tokens.
    pub max_tokens: Option<u32>,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            temperature: 0.7,
            timeout: Duration::from_secs(45),
            max_tokens: None,
        }
    }
}

/// Generates brand kits, with or without an AI backend.
pub struct ContentGenerator {
    llm: Option<Arc<dyn LlmProvider>>,
    config: GeneratorConfig,
}

impl ContentGenerator {
    /// Create a generator. With `llm: None` only the fallback path is used
    /// and no network access ever happens.
    pub fn new(llm: Option<Arc<dyn LlmProvider>>, config: GeneratorConfig) -> Self {
        Self { llm, config }
    }

    /// A generator that always returns the fallback kit.
    pub fn fallback_only() -> Self {
        Self::new(None, GeneratorConfig::default())
    }

    pub fn has_backend(&self) -> bool {
        self.llm.is_some()
    }

    /// Produce a kit for the intake. Always returns a valid kit.
    pub async fn generate(&self, intake: &Intake) -> BrandKit {
        let Some(llm) = &self.llm else {
            debug!("No generation backend configured, using fallback kit");
            return fallback_kit(intake);
        };

        let outcome = match self.attempt(llm.as_ref(), intake).await {
            Ok(raw) => accept_response(&raw),
            Err(e) => Err(e),
        };

        match outcome {
            Ok(kit) => {
                info!(
                    model = llm.model_name(),
                    taglines = kit.taglines.len(),
                    "Generated brand kit"
                );
                kit
            }
            Err(e) => {
                warn!(model = llm.model_name(), error = %e, "Generation failed, using fallback kit");
                fallback_kit(intake)
            }
        }
    }

    /// Run the single backend call under the configured timeout.
    async fn attempt(
        &self,
        llm: &dyn LlmProvider,
        intake: &Intake,
    ) -> Result<String, GenerationError> {
        let request = build_request(intake, &self.config);
        match tokio::time::timeout(self.config.timeout, llm.complete(request)).await {
            Ok(Ok(response)) => {
                debug!(
                    input_tokens = response.input_tokens,
                    output_tokens = response.output_tokens,
                    finish_reason = ?response.finish_reason,
                    "Backend responded"
                );
                Ok(response.content)
            }
            Ok(Err(e)) => Err(GenerationError::Backend(e)),
            Err(_) => Err(GenerationError::Timeout(self.config.timeout)),
        }
    }
}

/// Build the two-message, JSON-mode completion request for an intake.
pub fn build_request(intake: &Intake, config: &GeneratorConfig) -> CompletionRequest {
    let mut request = CompletionRequest::new(vec![
        ChatMessage::system(SYSTEM_PROMPT),
        ChatMessage::user(build_prompt(intake)),
    ])
    .with_temperature(config.temperature)
    .with_response_format(ResponseFormat::JsonObject);

    if let Some(max_tokens) = config.max_tokens {
        request = request.with_max_tokens(max_tokens);
    }
    request
}

/// Parse and gate a raw backend response.
///
/// The gate runs twice: on the raw object, and again on the typed kit,
/// since lenient conversion drops tagline items that aren't scalars.
pub fn accept_response(raw: &str) -> Result<BrandKit, GenerationError> {
    let value: Value =
        serde_json::from_str(extract_json_object(raw)).map_err(GenerationError::MalformedJson)?;
    validate_kit(&value)?;
    let kit = BrandKit::from_value(value).map_err(GenerationError::MalformedJson)?;
    if kit.taglines.len() < MIN_TAGLINES {
        return Err(KitRejection::TooFewTaglines {
            found: kit.taglines.len(),
            required: MIN_TAGLINES,
        }
        .into());
    }
    Ok(kit)
}

/// Extract a JSON object from model output that might contain markdown or
/// extra text.
fn extract_json_object(text: &str) -> &str {
    let trimmed = text.trim();

    if trimmed.starts_with('{') {
        return trimmed;
    }

    if let Some(start) = trimmed.find("```json") {
        let after = &trimmed[start + 7..];
        if let Some(end) = after.find("```") {
            return after[..end].trim();
        }
    }

    if let Some(start) = trimmed.find("```") {
        let after = &trimmed[start + 3..];
        if let Some(end) = after.find("```") {
            let inner = after[..end].trim();
            if inner.starts_with('{') {
                return inner;
            }
        }
    }

    if let (Some(start), Some(end)) = (trimmed.find('{'), trimmed.rfind('}')) {
        if end > start {
            return &trimmed[start..=end];
        }
    }

    trimmed
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::LlmError;
    use crate::kit::is_valid_kit;
    use crate::llm::{CompletionResponse, FinishReason};
    use async_trait::async_trait;
    use serde_json::json;
    use std::sync::Mutex;

    /// Returns a fixed body and records the last request.
    struct StaticLlm {
        content: String,
        seen: Mutex<Option<CompletionRequest>>,
    }

    impl StaticLlm {
        fn new(content: impl Into<String>) -> Arc<Self> {
            Arc::new(Self {
                content: content.into(),
                seen: Mutex::new(None),
            })
        }
    }

    #[async_trait]
    impl LlmProvider for StaticLlm {
        fn model_name(&self) -> &str {
            "static"
        }

        async fn complete(
            &self,
            request: CompletionRequest,
        ) -> Result<CompletionResponse, LlmError> {
            *self.seen.lock().unwrap() = Some(request);
            Ok(CompletionResponse {
                content: self.content.clone(),
                input_tokens: 10,
                output_tokens: 20,
                finish_reason: FinishReason::Stop,
                response_id: None,
            })
        }
    }

    struct FailingLlm;

    #[async_trait]
    impl LlmProvider for FailingLlm {
        fn model_name(&self) -> &str {
            "failing"
        }

        async fn complete(&self, _request: CompletionRequest) -> Result<CompletionResponse, LlmError> {
            Err(LlmError::RequestFailed {
                provider: "test".into(),
                reason: "connection refused".into(),
            })
        }
    }

    struct SlowLlm;

    #[async_trait]
    impl LlmProvider for SlowLlm {
        fn model_name(&self) -> &str {
            "slow"
        }

        async fn complete(&self, _request: CompletionRequest) -> Result<CompletionResponse, LlmError> {
            tokio::time::sleep(Duration::from_secs(5)).await;
            Err(LlmError::RequestFailed {
                provider: "test".into(),
                reason: "should have timed out".into(),
            })
        }
    }

    fn acme() -> Intake {
        Intake::normalize(&json!({"business_name": "Acme Prints", "seo_keywords": "tees, hats"}))
    }

    fn ai_kit_json() -> String {
        json!({
            "taglines": ["Ink that lasts", "Print proud", "Wear the brand", "Bold by design", "Made in Phoenix"],
            "slogans": ["One", "Two", "Three", "Four", "Five"],
            "seo": {"meta_title": "Acme Prints | Phoenix Screen Printing"}
        })
        .to_string()
    }

    fn with_llm(llm: Arc<dyn LlmProvider>) -> ContentGenerator {
        ContentGenerator::new(Some(llm), GeneratorConfig::default())
    }

    #[tokio::test]
    async fn no_backend_returns_valid_fallback() {
        let generator = ContentGenerator::fallback_only();
        assert!(!generator.has_backend());
        let kit = generator.generate(&acme()).await;
        assert!(is_valid_kit(&serde_json::to_value(&kit).unwrap()));
        assert_eq!(kit, fallback_kit(&acme()));
    }

    #[tokio::test]
    async fn valid_backend_output_is_used() {
        let generator = with_llm(StaticLlm::new(ai_kit_json()));
        let kit = generator.generate(&acme()).await;
        assert_eq!(kit.taglines[0], "Ink that lasts");
        assert_eq!(kit.seo.meta_title, "Acme Prints | Phoenix Screen Printing");
        assert!(kit.palette.is_empty());
    }

    #[tokio::test]
    async fn invalid_json_falls_back() {
        let generator = with_llm(StaticLlm::new("Sorry, I can't help with that."));
        assert_eq!(generator.generate(&acme()).await, fallback_kit(&acme()));
    }

    #[tokio::test]
    async fn short_taglines_fall_back() {
        let body = json!({"taglines": ["one", "two", "three"]}).to_string();
        let generator = with_llm(StaticLlm::new(body));
        assert_eq!(generator.generate(&acme()).await, fallback_kit(&acme()));
    }

    #[tokio::test]
    async fn non_string_taglines_fall_back() {
        let body = json!({"taglines": [null, null, null, null, null]}).to_string();
        let generator = with_llm(StaticLlm::new(body));
        let kit = generator.generate(&acme()).await;
        assert_eq!(kit, fallback_kit(&acme()));
        assert!(is_valid_kit(&serde_json::to_value(&kit).unwrap()));
    }

    #[test]
    fn taglines_lost_in_conversion_are_rejected() {
        for body in [
            r#"{"taglines": [{"text": "a"}, {"text": "b"}, {"text": "c"}, {"text": "d"}, {"text": "e"}]}"#,
            r#"{"taglines": ["a", "b", null, ["c"], "d"]}"#,
        ] {
            let err = accept_response(body).unwrap_err();
            assert!(
                matches!(
                    err,
                    GenerationError::Rejected(KitRejection::TooFewTaglines { required: 5, .. })
                ),
                "{body} was accepted"
            );
        }
        let kit = accept_response(r#"{"taglines": ["a", 2, true, "d", "e"]}"#).unwrap();
        assert_eq!(kit.taglines, vec!["a", "2", "true", "d", "e"]);
    }

    #[tokio::test]
    async fn empty_content_falls_back() {
        let generator = with_llm(StaticLlm::new(""));
        assert_eq!(generator.generate(&acme()).await, fallback_kit(&acme()));
    }

    #[tokio::test]
    async fn backend_error_falls_back() {
        let generator = with_llm(Arc::new(FailingLlm));
        assert_eq!(generator.generate(&acme()).await, fallback_kit(&acme()));
    }

    #[tokio::test]
    async fn timeout_falls_back() {
        let config = GeneratorConfig {
            timeout: Duration::from_millis(50),
            ..Default::default()
        };
        let generator = ContentGenerator::new(Some(Arc::new(SlowLlm)), config);
        assert_eq!(generator.generate(&acme()).await, fallback_kit(&acme()));
    }

    #[tokio::test]
    async fn request_carries_persona_prompt_and_json_mode() {
        let llm = StaticLlm::new(ai_kit_json());
        let config = GeneratorConfig {
            temperature: 0.3,
            ..Default::default()
        };
        let generator = ContentGenerator::new(Some(llm.clone()), config);
        generator.generate(&acme()).await;

        let request = llm.seen.lock().unwrap().take().expect("no request recorded");
        assert_eq!(request.messages.len(), 2);
        assert_eq!(request.messages[0], ChatMessage::system(SYSTEM_PROMPT));
        assert!(request.messages[1].content.contains("Business: Acme Prints"));
        assert_eq!(request.temperature, Some(0.3));
        assert_eq!(request.response_format, ResponseFormat::JsonObject);
        assert_eq!(request.max_tokens, None);
    }

    #[test]
    fn accept_response_reports_rejection() {
        let err = accept_response(r#"{"taglines": "nope"}"#).unwrap_err();
        assert!(matches!(
            err,
            GenerationError::Rejected(KitRejection::TaglinesNotSequence)
        ));
        let err = accept_response("null").unwrap_err();
        assert!(matches!(err, GenerationError::Rejected(KitRejection::Null)));
        let err = accept_response("{not json").unwrap_err();
        assert!(matches!(err, GenerationError::MalformedJson(_)));
    }

    #[test]
    fn accept_response_strips_code_fences() {
        let raw = format!("Here you go:\n```json\n{}\n```", ai_kit_json());
        let kit = accept_response(&raw).unwrap();
        assert_eq!(kit.taglines.len(), 5);
    }

    #[test]
    fn extract_json_direct() {
        let input = r#"{"taglines": []}"#;
        assert_eq!(extract_json_object(input), input);
    }

    #[test]
    fn extract_json_with_surrounding_text() {
        let input = r#"Sure! {"a": {"b": 1}} hope that helps"#;
        assert_eq!(extract_json_object(input), r#"{"a": {"b": 1}}"#);
    }

    #[test]
    fn extract_json_from_bare_fence() {
        let input = "```\n{\"a\": 1}\n```";
        assert_eq!(extract_json_object(input), "{\"a\": 1}");
    }
}
