//! Course recommendations — turns a list of missing skills into suggested
//! online courses via the external recommendation capability.

use async_trait::async_trait;
use serde::Deserialize;
use tracing::info;

use crate::analysis::prompts::{RECOMMENDATION_PROMPT_TEMPLATE, RECOMMENDATION_SYSTEM};
use crate::analysis::AnalysisError;
use crate::llm_client::LlmClient;
use crate::models::skill::{LearningRecommendation, Skill};

/// Recommends courses for missing skills. Same single-round-trip contract as
/// `SkillExtractor`. The capability may return any count or shape; no
/// one-to-one correspondence with the input is enforced, and `course_link`
/// values are passed through unvalidated.
#[async_trait]
pub trait CourseRecommender: Send + Sync {
    async fn recommend(
        &self,
        missing: &[Skill],
    ) -> Result<Vec<LearningRecommendation>, AnalysisError>;
}

#[derive(Debug, Deserialize)]
struct RecommendationsPayload {
    #[serde(default)]
    recommendations: Vec<LearningRecommendation>,
}

/// LLM-backed recommender.
pub struct LlmCourseRecommender {
    llm: LlmClient,
}

impl LlmCourseRecommender {
    pub fn new(llm: LlmClient) -> Self {
        Self { llm }
    }
}

#[async_trait]
impl CourseRecommender for LlmCourseRecommender {
    async fn recommend(
        &self,
        missing: &[Skill],
    ) -> Result<Vec<LearningRecommendation>, AnalysisError> {
        if missing.is_empty() {
            return Err(AnalysisError::EmptyInput);
        }

        // Only names leave the process; confidence and evidence stay local.
        let names: Vec<&str> = missing.iter().map(|s| s.name.as_str()).collect();
        let prompt = RECOMMENDATION_PROMPT_TEMPLATE.replace("{skills_list}", &names.join(", "));

        let payload: RecommendationsPayload =
            self.llm.call_json(&prompt, RECOMMENDATION_SYSTEM).await?;

        info!(
            "Generated {} learning recommendations",
            payload.recommendations.len()
        );
        Ok(payload.recommendations)
    }
}
