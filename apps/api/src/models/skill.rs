use serde::{Deserialize, Serialize};

/// A named competency extracted from free text, with a confidence score and a
/// supporting quote. Immutable once created: list edits replace the list
/// rather than mutating elements in place.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Skill {
    pub name: String,
    /// 0–100 as reported by the extraction capability. Passed through
    /// unclamped; out-of-range values are surfaced as-is.
    pub confidence: f32,
    /// Short quote from the source text (the capability is asked for ≤100
    /// characters, not enforced here).
    #[serde(default)]
    pub evidence: String,
}

/// A suggested course for one missing skill. `course_link` is whatever the
/// recommendation capability returned; it is not validated as a URL.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LearningRecommendation {
    pub skill: String,
    pub course_title: String,
    pub course_link: String,
}
