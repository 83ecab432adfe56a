//! Skill extraction — turns free text into a list of scored skills via the
//! external text-analysis capability.

use async_trait::async_trait;
use serde::Deserialize;
use tracing::info;

use crate::analysis::prompts::{EXTRACTION_PROMPT_TEMPLATE, EXTRACTION_SYSTEM};
use crate::analysis::AnalysisError;
use crate::llm_client::LlmClient;
use crate::models::skill::Skill;

/// Extracts skills from free text (a CV or a job description).
///
/// One request/response round trip per call; never retried here — retry
/// policy, if any, belongs to the caller. No result caching. The capability
/// may return any number of skills, including zero.
#[async_trait]
pub trait SkillExtractor: Send + Sync {
    async fn extract(&self, text: &str) -> Result<Vec<Skill>, AnalysisError>;
}

#[derive(Debug, Deserialize)]
struct SkillsPayload {
    #[serde(default)]
    skills: Vec<Skill>,
}

/// LLM-backed extractor. Confidence values come straight from the capability
/// and are not clamped or validated here.
pub struct LlmSkillExtractor {
    llm: LlmClient,
}

impl LlmSkillExtractor {
    pub fn new(llm: LlmClient) -> Self {
        Self { llm }
    }
}

#[async_trait]
impl SkillExtractor for LlmSkillExtractor {
    async fn extract(&self, text: &str) -> Result<Vec<Skill>, AnalysisError> {
        if text.trim().is_empty() {
            return Err(AnalysisError::EmptyInput);
        }

        let prompt = EXTRACTION_PROMPT_TEMPLATE.replace("{input_text}", text);
        let payload: SkillsPayload = self.llm.call_json(&prompt, EXTRACTION_SYSTEM).await?;

        info!("Extracted {} skills", payload.skills.len());
        Ok(payload.skills)
    }
}
