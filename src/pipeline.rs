//! Request pipeline: normalize → generate → render → optional email.

use std::sync::Arc;

use serde::Serialize;
use serde_json::Value;
use tracing::{info, warn};

use crate::config::AppConfig;
use crate::error::Result;
use crate::generator::ContentGenerator;
use crate::intake::Intake;
use crate::kit::BrandKit;
use crate::llm::create_provider;
use crate::mail::{MailEnvelope, Mailer, SmtpMailer, kit_subject};
use crate::render::render_brand_kit;

/// Result of one pipeline run.
#[derive(Debug, Clone)]
pub struct KitOutcome {
    pub kit: BrandKit,
    pub html: String,
    pub emailed: bool,
}

/// Outbound webhook body.
#[derive(Debug, Clone, Default, Serialize)]
pub struct WebhookResponse {
    pub ok: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub msg: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub html: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub result: Option<BrandKit>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub emailed: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl WebhookResponse {
    pub fn success(outcome: KitOutcome) -> Self {
        Self {
            ok: true,
            html: Some(outcome.html),
            result: Some(outcome.kit),
            emailed: Some(outcome.emailed),
            ..Default::default()
        }
    }

    pub fn usage(msg: impl Into<String>) -> Self {
        Self {
            ok: true,
            msg: Some(msg.into()),
            ..Default::default()
        }
    }

    pub fn failure(error: impl Into<String>) -> Self {
        Self {
            ok: false,
            error: Some(error.into()),
            ..Default::default()
        }
    }
}

/// Stateless orchestrator shared by all requests.
pub struct BrandKitPipeline {
    generator: ContentGenerator,
    mailer: Option<Arc<dyn Mailer>>,
}

impl BrandKitPipeline {
    pub fn new(generator: ContentGenerator, mailer: Option<Arc<dyn Mailer>>) -> Self {
        Self { generator, mailer }
    }

    /// Wire the pipeline from configuration.
    pub fn from_config(config: &AppConfig) -> Result<Self> {
        let llm = match &config.llm {
            Some(llm_config) => Some(create_provider(llm_config)?),
            None => None,
        };
        let generator = ContentGenerator::new(llm, config.generator.clone());
        let mailer = config
            .mail
            .clone()
            .map(|mail| Arc::new(SmtpMailer::new(mail)) as Arc<dyn Mailer>);
        Ok(Self::new(generator, mailer))
    }

    pub fn has_backend(&self) -> bool {
        self.generator.has_backend()
    }

    pub fn has_mailer(&self) -> bool {
        self.mailer.is_some()
    }

    /// Run the full pipeline for a raw payload.
    pub async fn process(&self, raw: &Value) -> KitOutcome {
        let intake = Intake::normalize(raw);
        info!(business = intake.display_name(), "Processing intake");

        let kit = self.generator.generate(&intake).await;
        let html = render_brand_kit(&kit);
        let emailed = self.deliver(&intake, &html).await;

        KitOutcome { kit, html, emailed }
    }

    /// Email the rendered kit if a mailer is configured. Failures are
    /// logged and reported as `false`.
    async fn deliver(&self, intake: &Intake, html: &str) -> bool {
        let Some(mailer) = &self.mailer else {
            return false;
        };

        let envelope = MailEnvelope {
            from: mailer.from_address().to_string(),
            to: mailer.to_address().to_string(),
            subject: kit_subject(intake.display_name()),
            html: html.to_string(),
        };

        match mailer.send(&envelope).await {
            Ok(()) => true,
            Err(e) => {
                warn!(error = %e, to = %envelope.to, "Failed to email brand kit");
                false
            }
        }
    }
}
