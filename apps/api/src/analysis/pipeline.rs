//! Pipeline orchestration — the in-memory session store and the stage state
//! machine sequencing extract-profile → extract-target → diff → recommend.
//!
//! All session state is mutated only here, under a single lock acquisition
//! per transition, so callers never observe a half-updated session.

use std::collections::HashMap;
use std::sync::Arc;

use chrono::{DateTime, Utc};
use serde::Serialize;
use tokio::sync::Mutex;
use tracing::{info, warn};
use uuid::Uuid;

use crate::analysis::diff::missing_skills;
use crate::analysis::extraction::SkillExtractor;
use crate::analysis::recommend::CourseRecommender;
use crate::analysis::AnalysisError;
use crate::models::skill::{LearningRecommendation, Skill};

/// Progress marker for a session. Only ever set on stage completion; a
/// failed request leaves the previous marker in place.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Stage {
    Idle,
    ProfileReady,
    GapReady,
    RecommendationsReady,
}

/// In-memory analysis session. Created fresh per client, never persisted.
///
/// Invariant: `missing_skills` is always the diff of the stored
/// `profile_skills` / `target_skills` pair, recomputed (never patched)
/// whenever either list changes.
#[derive(Debug, Clone, Serialize)]
pub struct AnalysisSession {
    pub id: Uuid,
    pub stage: Stage,
    pub profile_skills: Vec<Skill>,
    pub target_skills: Vec<Skill>,
    pub missing_skills: Vec<Skill>,
    pub recommendations: Vec<LearningRecommendation>,
    pub created_at: DateTime<Utc>,
    /// Bumped whenever stored lists change out from under an outstanding
    /// request; completions carrying an older epoch are discarded.
    #[serde(skip)]
    epoch: u64,
    #[serde(skip)]
    profile_in_flight: bool,
    #[serde(skip)]
    target_in_flight: bool,
}

impl AnalysisSession {
    fn new() -> Self {
        Self {
            id: Uuid::new_v4(),
            stage: Stage::Idle,
            profile_skills: Vec::new(),
            target_skills: Vec::new(),
            missing_skills: Vec::new(),
            recommendations: Vec::new(),
            created_at: Utc::now(),
            epoch: 0,
            profile_in_flight: false,
            target_in_flight: false,
        }
    }
}

/// Orchestrates the analysis workflow over the capability clients.
/// Carried in `AppState` as an `Arc<AnalysisPipeline>`.
pub struct AnalysisPipeline {
    extractor: Arc<dyn SkillExtractor>,
    recommender: Arc<dyn CourseRecommender>,
    sessions: Mutex<HashMap<Uuid, AnalysisSession>>,
}

impl AnalysisPipeline {
    pub fn new(extractor: Arc<dyn SkillExtractor>, recommender: Arc<dyn CourseRecommender>) -> Self {
        Self {
            extractor,
            recommender,
            sessions: Mutex::new(HashMap::new()),
        }
    }

    pub async fn create_session(&self) -> AnalysisSession {
        let session = AnalysisSession::new();
        info!("Created analysis session {}", session.id);
        self.sessions
            .lock()
            .await
            .insert(session.id, session.clone());
        session
    }

    /// Read-only copy of the current session state.
    pub async fn snapshot(&self, id: Uuid) -> Result<AnalysisSession, AnalysisError> {
        self.sessions
            .lock()
            .await
            .get(&id)
            .cloned()
            .ok_or(AnalysisError::SessionNotFound)
    }

    /// Runs profile extraction. On success the new profile list replaces the
    /// old one and all downstream state (target, gap, recommendations) is
    /// cleared in the same transition.
    pub async fn analyze_profile(
        &self,
        id: Uuid,
        text: &str,
    ) -> Result<AnalysisSession, AnalysisError> {
        if text.trim().is_empty() {
            return Err(AnalysisError::EmptyInput);
        }

        let epoch = {
            let mut sessions = self.sessions.lock().await;
            let session = sessions.get_mut(&id).ok_or(AnalysisError::SessionNotFound)?;
            if session.profile_in_flight {
                return Err(AnalysisError::StageBusy);
            }
            session.profile_in_flight = true;
            session.epoch
        };

        let extraction = self.extractor.extract(text).await;

        let mut sessions = self.sessions.lock().await;
        let session = sessions.get_mut(&id).ok_or(AnalysisError::SessionNotFound)?;
        session.profile_in_flight = false;

        if session.epoch != epoch {
            warn!("Discarding stale profile extraction for session {id}");
            return Err(AnalysisError::Superseded);
        }

        let skills = extraction?;
        info!(
            "Session {id}: profile extraction stored {} skills",
            skills.len()
        );

        session.profile_skills = skills;
        session.target_skills = Vec::new();
        session.missing_skills = Vec::new();
        session.recommendations = Vec::new();
        session.stage = Stage::ProfileReady;
        // Any outstanding target or recommendation completion is now stale.
        session.epoch += 1;

        Ok(session.clone())
    }

    /// Runs target extraction, diffs against the stored profile, and — when
    /// the gap is non-empty — automatically fetches course recommendations.
    ///
    /// Requires a non-empty profile list; rejected before any network call
    /// otherwise. Target and missing lists are always stored together.
    pub async fn analyze_target(
        &self,
        id: Uuid,
        text: &str,
    ) -> Result<AnalysisSession, AnalysisError> {
        if text.trim().is_empty() {
            return Err(AnalysisError::EmptyInput);
        }

        let epoch = {
            let mut sessions = self.sessions.lock().await;
            let session = sessions.get_mut(&id).ok_or(AnalysisError::SessionNotFound)?;
            if session.profile_skills.is_empty() {
                return Err(AnalysisError::PreconditionNotMet(
                    "analyze the profile first".to_string(),
                ));
            }
            if session.target_in_flight {
                return Err(AnalysisError::StageBusy);
            }
            session.target_in_flight = true;
            session.epoch
        };

        let extraction = self.extractor.extract(text).await;

        let missing = {
            let mut sessions = self.sessions.lock().await;
            let session = sessions.get_mut(&id).ok_or(AnalysisError::SessionNotFound)?;

            if session.epoch != epoch {
                session.target_in_flight = false;
                warn!("Discarding stale target extraction for session {id}");
                return Err(AnalysisError::Superseded);
            }

            let target = match extraction {
                Ok(target) => target,
                Err(e) => {
                    session.target_in_flight = false;
                    return Err(e);
                }
            };

            let missing = missing_skills(&session.profile_skills, &target);
            info!(
                "Session {id}: target has {} skills, {} missing",
                target.len(),
                missing.len()
            );

            session.target_skills = target;
            session.missing_skills = missing.clone();
            session.recommendations = Vec::new();
            session.stage = Stage::GapReady;

            if missing.is_empty() {
                // Nothing to recommend; the pipeline rests at GapReady.
                session.target_in_flight = false;
                return Ok(session.clone());
            }
            missing
        };

        // Non-empty gap: fetch recommendations without further user action.
        // The target stage stays marked in flight so a second target request
        // cannot interleave with this one.
        let recommendation = self.recommender.recommend(&missing).await;

        let mut sessions = self.sessions.lock().await;
        let session = sessions.get_mut(&id).ok_or(AnalysisError::SessionNotFound)?;
        session.target_in_flight = false;

        if session.epoch != epoch {
            warn!("Discarding stale recommendations for session {id}");
            return Err(AnalysisError::Superseded);
        }

        match recommendation {
            Ok(recommendations) => {
                session.recommendations = recommendations;
                session.stage = Stage::RecommendationsReady;
                Ok(session.clone())
            }
            Err(e) => {
                // The gap results stand; only the recommendation stage failed
                // and the user may re-run target analysis.
                warn!("Session {id}: recommendation request failed: {e}");
                Err(e)
            }
        }
    }

    /// Removes one skill card from the profile list and recomputes everything
    /// downstream. The list is replaced, never mutated in place.
    pub async fn remove_profile_skill(
        &self,
        id: Uuid,
        index: usize,
    ) -> Result<AnalysisSession, AnalysisError> {
        let mut sessions = self.sessions.lock().await;
        let session = sessions.get_mut(&id).ok_or(AnalysisError::SessionNotFound)?;

        if index >= session.profile_skills.len() {
            return Err(AnalysisError::PreconditionNotMet(format!(
                "no profile skill at index {index}"
            )));
        }

        session.profile_skills = without_index(&session.profile_skills, index);
        recompute_gap(session);
        Ok(session.clone())
    }

    /// Removes one skill card from the target list; same downstream rules as
    /// `remove_profile_skill`.
    pub async fn remove_target_skill(
        &self,
        id: Uuid,
        index: usize,
    ) -> Result<AnalysisSession, AnalysisError> {
        let mut sessions = self.sessions.lock().await;
        let session = sessions.get_mut(&id).ok_or(AnalysisError::SessionNotFound)?;

        if index >= session.target_skills.len() {
            return Err(AnalysisError::PreconditionNotMet(format!(
                "no target skill at index {index}"
            )));
        }

        session.target_skills = without_index(&session.target_skills, index);
        recompute_gap(session);
        Ok(session.clone())
    }

    /// Returns the session to `Idle`, clearing every list. Any in-flight
    /// request's eventual completion is discarded via the epoch check.
    pub async fn reset(&self, id: Uuid) -> Result<AnalysisSession, AnalysisError> {
        let mut sessions = self.sessions.lock().await;
        let session = sessions.get_mut(&id).ok_or(AnalysisError::SessionNotFound)?;

        session.profile_skills = Vec::new();
        session.target_skills = Vec::new();
        session.missing_skills = Vec::new();
        session.recommendations = Vec::new();
        session.stage = Stage::Idle;
        session.epoch += 1;

        info!("Session {id} reset");
        Ok(session.clone())
    }
}

fn without_index(skills: &[Skill], index: usize) -> Vec<Skill> {
    skills
        .iter()
        .enumerate()
        .filter(|(i, _)| *i != index)
        .map(|(_, s)| s.clone())
        .collect()
}

/// Recomputes the missing list from the stored pair and drops any
/// recommendations derived from the old gap. In-flight completions are
/// invalidated because they were computed against the old lists.
fn recompute_gap(session: &mut AnalysisSession) {
    session.missing_skills = missing_skills(&session.profile_skills, &session.target_skills);
    session.recommendations = Vec::new();
    if session.stage == Stage::RecommendationsReady {
        session.stage = Stage::GapReady;
    }
    session.epoch += 1;
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use std::collections::VecDeque;
    use std::sync::Mutex as StdMutex;
    use tokio::sync::Notify;

    fn skill(name: &str, confidence: f32) -> Skill {
        Skill {
            name: name.to_string(),
            confidence,
            evidence: String::new(),
        }
    }

    fn rec(skill: &str) -> LearningRecommendation {
        LearningRecommendation {
            skill: skill.to_string(),
            course_title: format!("{skill} fundamentals"),
            course_link: format!("https://example.org/{skill}"),
        }
    }

    /// Pops pre-queued responses; panics if called more often than expected.
    struct QueuedExtractor {
        responses: StdMutex<VecDeque<Result<Vec<Skill>, AnalysisError>>>,
    }

    impl QueuedExtractor {
        fn new(responses: Vec<Result<Vec<Skill>, AnalysisError>>) -> Arc<Self> {
            Arc::new(Self {
                responses: StdMutex::new(responses.into()),
            })
        }
    }

    #[async_trait]
    impl SkillExtractor for QueuedExtractor {
        async fn extract(&self, _text: &str) -> Result<Vec<Skill>, AnalysisError> {
            self.responses
                .lock()
                .unwrap()
                .pop_front()
                .expect("unexpected extract call")
        }
    }

    /// Records the names it was asked about and returns a fixed response.
    struct RecordingRecommender {
        requested: StdMutex<Vec<Vec<String>>>,
        response: Result<Vec<LearningRecommendation>, ()>,
    }

    impl RecordingRecommender {
        fn returning(recommendations: Vec<LearningRecommendation>) -> Arc<Self> {
            Arc::new(Self {
                requested: StdMutex::new(Vec::new()),
                response: Ok(recommendations),
            })
        }

        fn failing() -> Arc<Self> {
            Arc::new(Self {
                requested: StdMutex::new(Vec::new()),
                response: Err(()),
            })
        }

        fn calls(&self) -> Vec<Vec<String>> {
            self.requested.lock().unwrap().clone()
        }
    }

    #[async_trait]
    impl CourseRecommender for RecordingRecommender {
        async fn recommend(
            &self,
            missing: &[Skill],
        ) -> Result<Vec<LearningRecommendation>, AnalysisError> {
            self.requested
                .lock()
                .unwrap()
                .push(missing.iter().map(|s| s.name.clone()).collect());
            match &self.response {
                Ok(recommendations) => Ok(recommendations.clone()),
                Err(()) => Err(AnalysisError::UpstreamUnavailable("down".to_string())),
            }
        }
    }

    /// Signals entry and waits for an external release before completing.
    struct GatedExtractor {
        entered: Notify,
        release: Notify,
        skills: Vec<Skill>,
    }

    impl GatedExtractor {
        fn new(skills: Vec<Skill>) -> Arc<Self> {
            Arc::new(Self {
                entered: Notify::new(),
                release: Notify::new(),
                skills,
            })
        }
    }

    #[async_trait]
    impl SkillExtractor for GatedExtractor {
        async fn extract(&self, _text: &str) -> Result<Vec<Skill>, AnalysisError> {
            self.entered.notify_one();
            self.release.notified().await;
            Ok(self.skills.clone())
        }
    }

    #[tokio::test]
    async fn test_end_to_end_gap_triggers_recommendations() {
        let extractor = QueuedExtractor::new(vec![
            Ok(vec![skill("Python", 90.0), skill("SQL", 70.0)]),
            Ok(vec![skill("python", 85.0), skill("Docker", 80.0)]),
        ]);
        let recommender = RecordingRecommender::returning(vec![rec("Docker")]);
        let pipeline = AnalysisPipeline::new(extractor, recommender.clone());

        let session = pipeline.create_session().await;
        let session = pipeline.analyze_profile(session.id, "cv text").await.unwrap();
        assert_eq!(session.stage, Stage::ProfileReady);
        assert_eq!(session.profile_skills.len(), 2);

        let session = pipeline.analyze_target(session.id, "jd text").await.unwrap();
        assert_eq!(session.stage, Stage::RecommendationsReady);
        assert_eq!(session.missing_skills, vec![skill("Docker", 80.0)]);
        assert_eq!(session.recommendations, vec![rec("Docker")]);

        // Exactly one recommendation request, carrying only the missing name.
        assert_eq!(recommender.calls(), vec![vec!["Docker".to_string()]]);
    }

    #[tokio::test]
    async fn test_target_before_profile_is_rejected_without_network_call() {
        // Empty queue: any extract call would panic.
        let extractor = QueuedExtractor::new(vec![]);
        let recommender = RecordingRecommender::returning(vec![]);
        let pipeline = AnalysisPipeline::new(extractor, recommender);

        let session = pipeline.create_session().await;
        let err = pipeline
            .analyze_target(session.id, "jd text")
            .await
            .unwrap_err();
        assert!(matches!(err, AnalysisError::PreconditionNotMet(_)));
    }

    #[tokio::test]
    async fn test_zero_skill_profile_keeps_target_stage_blocked() {
        let extractor = QueuedExtractor::new(vec![Ok(vec![])]);
        let recommender = RecordingRecommender::returning(vec![]);
        let pipeline = AnalysisPipeline::new(extractor, recommender);

        let session = pipeline.create_session().await;
        let session = pipeline.analyze_profile(session.id, "cv").await.unwrap();
        assert_eq!(session.stage, Stage::ProfileReady);
        assert!(session.profile_skills.is_empty());

        let err = pipeline.analyze_target(session.id, "jd").await.unwrap_err();
        assert!(matches!(err, AnalysisError::PreconditionNotMet(_)));
    }

    #[tokio::test]
    async fn test_empty_gap_skips_recommendation_stage() {
        let extractor = QueuedExtractor::new(vec![
            Ok(vec![skill("Python", 90.0), skill("Docker", 70.0)]),
            Ok(vec![skill("python", 85.0)]),
        ]);
        let recommender = RecordingRecommender::returning(vec![rec("unused")]);
        let pipeline = AnalysisPipeline::new(extractor, recommender.clone());

        let session = pipeline.create_session().await;
        pipeline.analyze_profile(session.id, "cv").await.unwrap();
        let session = pipeline.analyze_target(session.id, "jd").await.unwrap();

        assert_eq!(session.stage, Stage::GapReady);
        assert!(session.missing_skills.is_empty());
        assert!(session.recommendations.is_empty());
        // No recommendation request was issued at all.
        assert!(recommender.calls().is_empty());
    }

    #[tokio::test]
    async fn test_profile_rerun_clears_downstream_state() {
        let extractor = QueuedExtractor::new(vec![
            Ok(vec![skill("Python", 90.0)]),
            Ok(vec![skill("Docker", 80.0)]),
            Ok(vec![skill("Rust", 95.0)]),
        ]);
        let recommender = RecordingRecommender::returning(vec![rec("Docker")]);
        let pipeline = AnalysisPipeline::new(extractor, recommender);

        let session = pipeline.create_session().await;
        pipeline.analyze_profile(session.id, "cv").await.unwrap();
        let session = pipeline.analyze_target(session.id, "jd").await.unwrap();
        assert_eq!(session.stage, Stage::RecommendationsReady);
        assert!(!session.missing_skills.is_empty());

        let session = pipeline.analyze_profile(session.id, "new cv").await.unwrap();
        assert_eq!(session.stage, Stage::ProfileReady);
        assert_eq!(session.profile_skills, vec![skill("Rust", 95.0)]);
        assert!(session.target_skills.is_empty());
        assert!(session.missing_skills.is_empty());
        assert!(session.recommendations.is_empty());
    }

    #[tokio::test]
    async fn test_failed_target_extraction_leaves_last_known_good_state() {
        let extractor = QueuedExtractor::new(vec![
            Ok(vec![skill("Python", 90.0)]),
            Err(AnalysisError::RateLimited),
        ]);
        let recommender = RecordingRecommender::returning(vec![]);
        let pipeline = AnalysisPipeline::new(extractor, recommender);

        let session = pipeline.create_session().await;
        pipeline.analyze_profile(session.id, "cv").await.unwrap();

        let err = pipeline.analyze_target(session.id, "jd").await.unwrap_err();
        assert!(matches!(err, AnalysisError::RateLimited));

        let session = pipeline.snapshot(session.id).await.unwrap();
        assert_eq!(session.stage, Stage::ProfileReady);
        assert_eq!(session.profile_skills, vec![skill("Python", 90.0)]);
        assert!(session.target_skills.is_empty());
        assert!(session.missing_skills.is_empty());
    }

    #[tokio::test]
    async fn test_failed_recommendation_leaves_gap_ready() {
        let extractor = QueuedExtractor::new(vec![
            Ok(vec![skill("Python", 90.0)]),
            Ok(vec![skill("Docker", 80.0)]),
        ]);
        let recommender = RecordingRecommender::failing();
        let pipeline = AnalysisPipeline::new(extractor, recommender);

        let session = pipeline.create_session().await;
        pipeline.analyze_profile(session.id, "cv").await.unwrap();

        let err = pipeline.analyze_target(session.id, "jd").await.unwrap_err();
        assert!(matches!(err, AnalysisError::UpstreamUnavailable(_)));

        // Gap results were stored before the recommendation request failed.
        let session = pipeline.snapshot(session.id).await.unwrap();
        assert_eq!(session.stage, Stage::GapReady);
        assert_eq!(session.missing_skills, vec![skill("Docker", 80.0)]);
        assert!(session.recommendations.is_empty());
    }

    #[tokio::test]
    async fn test_empty_input_rejected_before_extraction() {
        let extractor = QueuedExtractor::new(vec![]);
        let recommender = RecordingRecommender::returning(vec![]);
        let pipeline = AnalysisPipeline::new(extractor, recommender);

        let session = pipeline.create_session().await;
        let err = pipeline.analyze_profile(session.id, "  \n ").await.unwrap_err();
        assert!(matches!(err, AnalysisError::EmptyInput));
    }

    #[tokio::test]
    async fn test_unknown_session_is_reported() {
        let extractor = QueuedExtractor::new(vec![]);
        let recommender = RecordingRecommender::returning(vec![]);
        let pipeline = AnalysisPipeline::new(extractor, recommender);

        let err = pipeline
            .analyze_profile(Uuid::new_v4(), "cv")
            .await
            .unwrap_err();
        assert!(matches!(err, AnalysisError::SessionNotFound));
    }

    #[tokio::test]
    async fn test_remove_profile_skill_recomputes_gap() {
        let extractor = QueuedExtractor::new(vec![
            Ok(vec![skill("Python", 90.0), skill("Docker", 85.0)]),
            Ok(vec![skill("docker", 80.0), skill("Go", 75.0)]),
        ]);
        let recommender = RecordingRecommender::returning(vec![rec("Go")]);
        let pipeline = AnalysisPipeline::new(extractor, recommender);

        let session = pipeline.create_session().await;
        pipeline.analyze_profile(session.id, "cv").await.unwrap();
        let session = pipeline.analyze_target(session.id, "jd").await.unwrap();
        assert_eq!(session.missing_skills, vec![skill("Go", 75.0)]);

        // Dropping Docker from the profile makes the target's "docker" missing.
        let session = pipeline.remove_profile_skill(session.id, 1).await.unwrap();
        assert_eq!(session.profile_skills, vec![skill("Python", 90.0)]);
        assert_eq!(
            session.missing_skills,
            vec![skill("docker", 80.0), skill("Go", 75.0)]
        );
        // Old recommendations are invalid for the new gap.
        assert!(session.recommendations.is_empty());
        assert_eq!(session.stage, Stage::GapReady);
    }

    #[tokio::test]
    async fn test_remove_target_skill_shrinks_gap() {
        let extractor = QueuedExtractor::new(vec![
            Ok(vec![skill("Python", 90.0)]),
            Ok(vec![skill("Docker", 80.0), skill("Go", 75.0)]),
        ]);
        let recommender = RecordingRecommender::returning(vec![rec("Docker"), rec("Go")]);
        let pipeline = AnalysisPipeline::new(extractor, recommender);

        let session = pipeline.create_session().await;
        pipeline.analyze_profile(session.id, "cv").await.unwrap();
        let session = pipeline.analyze_target(session.id, "jd").await.unwrap();
        assert_eq!(session.missing_skills.len(), 2);

        let session = pipeline.remove_target_skill(session.id, 0).await.unwrap();
        assert_eq!(session.target_skills, vec![skill("Go", 75.0)]);
        assert_eq!(session.missing_skills, vec![skill("Go", 75.0)]);
    }

    #[tokio::test]
    async fn test_remove_with_bad_index_is_rejected() {
        let extractor = QueuedExtractor::new(vec![Ok(vec![skill("Python", 90.0)])]);
        let recommender = RecordingRecommender::returning(vec![]);
        let pipeline = AnalysisPipeline::new(extractor, recommender);

        let session = pipeline.create_session().await;
        pipeline.analyze_profile(session.id, "cv").await.unwrap();

        let err = pipeline
            .remove_profile_skill(session.id, 5)
            .await
            .unwrap_err();
        assert!(matches!(err, AnalysisError::PreconditionNotMet(_)));
    }

    #[tokio::test]
    async fn test_second_profile_request_while_in_flight_is_rejected() {
        let gated = GatedExtractor::new(vec![skill("Python", 90.0)]);
        let recommender = RecordingRecommender::returning(vec![]);
        let pipeline = Arc::new(AnalysisPipeline::new(gated.clone(), recommender));

        let session = pipeline.create_session().await;
        let id = session.id;

        let first = tokio::spawn({
            let pipeline = pipeline.clone();
            async move { pipeline.analyze_profile(id, "cv").await }
        });
        gated.entered.notified().await;

        let err = pipeline.analyze_profile(id, "cv again").await.unwrap_err();
        assert!(matches!(err, AnalysisError::StageBusy));

        gated.release.notify_one();
        let session = first.await.unwrap().unwrap();
        assert_eq!(session.stage, Stage::ProfileReady);
    }

    #[tokio::test]
    async fn test_reset_discards_in_flight_result() {
        let gated = GatedExtractor::new(vec![skill("Python", 90.0)]);
        let recommender = RecordingRecommender::returning(vec![]);
        let pipeline = Arc::new(AnalysisPipeline::new(gated.clone(), recommender));

        let session = pipeline.create_session().await;
        let id = session.id;

        let outstanding = tokio::spawn({
            let pipeline = pipeline.clone();
            async move { pipeline.analyze_profile(id, "cv").await }
        });
        gated.entered.notified().await;

        pipeline.reset(id).await.unwrap();
        gated.release.notify_one();

        let err = outstanding.await.unwrap().unwrap_err();
        assert!(matches!(err, AnalysisError::Superseded));

        // The stale completion did not overwrite the reset state.
        let session = pipeline.snapshot(id).await.unwrap();
        assert_eq!(session.stage, Stage::Idle);
        assert!(session.profile_skills.is_empty());
    }
}
