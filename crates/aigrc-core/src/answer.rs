//! # Screening Answers — Tri-State Values over a Closed Question Taxonomy
//!
//! Defines `TriState`, the four closed question groups consumed by the
//! classification engine's stages, and `AnswerSet`, the per-subject mapping
//! from question key to answer.
//!
//! ## Closed Taxonomy
//!
//! The source data arrives as loosely-typed key/value payloads. At this
//! boundary every question key maps onto one of four closed enums — one per
//! screening stage. An unknown key is a deserialization error, never a
//! silently-ignored answer. Every `match` over a question group is
//! exhaustive, so adding an indicator forces every stage evaluator to
//! handle it at compile time.
//!
//! ## Question Groups
//!
//! | Group | Count | Stage |
//! |-------|-------|-------|
//! | `DefinitionIndicator` | 3 | AI-system definition test |
//! | `ProhibitedPractice` | 8 | Prohibited-practice screening |
//! | `HighRiskCategory` | 9 | High-risk screening |
//! | `TransparencyIndicator` | 5 | Transparency screening |

use std::collections::BTreeMap;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::AigrcError;
use crate::identity::SubjectId;

// ─── TriState ────────────────────────────────────────────────────────

/// A screening answer restricted to `yes`, `no`, or `unsure`.
///
/// `unsure` is first-class: it drives conservative escalation in the
/// classification engine rather than being coerced to either pole.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TriState {
    /// The indicator applies.
    Yes,
    /// The indicator does not apply.
    No,
    /// The respondent could not determine whether the indicator applies.
    Unsure,
}

impl TriState {
    /// Returns the snake_case string identifier for this value.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Yes => "yes",
            Self::No => "no",
            Self::Unsure => "unsure",
        }
    }
}

impl std::fmt::Display for TriState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

// ─── Definition Indicators ───────────────────────────────────────────

/// Indicators of the AI-system definition test.
///
/// A subject that exhibits none of these is not an AI system for the
/// purposes of classification and falls out of scope.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DefinitionIndicator {
    /// The system operates with some degree of autonomy.
    Autonomy,
    /// The system infers outputs from the inputs it receives.
    InferenceFromInput,
    /// The system adapts its behavior after deployment.
    Adaptiveness,
}

/// Total number of definition indicators.
pub const DEFINITION_INDICATOR_COUNT: usize = 3;

impl DefinitionIndicator {
    /// All definition indicators in canonical order.
    pub fn all() -> &'static [DefinitionIndicator] {
        &[Self::Autonomy, Self::InferenceFromInput, Self::Adaptiveness]
    }

    /// Returns the snake_case string identifier for this indicator.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Autonomy => "autonomy",
            Self::InferenceFromInput => "inference_from_input",
            Self::Adaptiveness => "adaptiveness",
        }
    }
}

// ─── Prohibited Practices ────────────────────────────────────────────

/// The eight prohibited-practice indicators.
///
/// Any `yes` OR `unsure` on any of these blocks the subject outright —
/// prohibited practices are not risk-managed, they are forbidden.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProhibitedPractice {
    /// Subliminal or purposefully manipulative techniques.
    SubliminalManipulation,
    /// Exploitation of age, disability, or social/economic vulnerability.
    VulnerabilityExploitation,
    /// General-purpose social scoring of natural persons.
    SocialScoring,
    /// Predicting criminal offending from profiling alone.
    PredictivePolicing,
    /// Untargeted scraping of facial images to build recognition databases.
    FacialScraping,
    /// Emotion inference in workplace or education settings.
    EmotionInferenceWorkplace,
    /// Biometric categorisation inferring sensitive attributes.
    BiometricCategorisation,
    /// Real-time remote biometric identification in public spaces.
    RealtimeRemoteBiometricId,
}

/// Total number of prohibited-practice indicators.
pub const PROHIBITED_PRACTICE_COUNT: usize = 8;

impl ProhibitedPractice {
    /// All prohibited-practice indicators in canonical order.
    pub fn all() -> &'static [ProhibitedPractice] {
        &[
            Self::SubliminalManipulation,
            Self::VulnerabilityExploitation,
            Self::SocialScoring,
            Self::PredictivePolicing,
            Self::FacialScraping,
            Self::EmotionInferenceWorkplace,
            Self::BiometricCategorisation,
            Self::RealtimeRemoteBiometricId,
        ]
    }

    /// Returns the snake_case string identifier for this practice.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::SubliminalManipulation => "subliminal_manipulation",
            Self::VulnerabilityExploitation => "vulnerability_exploitation",
            Self::SocialScoring => "social_scoring",
            Self::PredictivePolicing => "predictive_policing",
            Self::FacialScraping => "facial_scraping",
            Self::EmotionInferenceWorkplace => "emotion_inference_workplace",
            Self::BiometricCategorisation => "biometric_categorisation",
            Self::RealtimeRemoteBiometricId => "realtime_remote_biometric_id",
        }
    }
}

// ─── High-Risk Categories ────────────────────────────────────────────

/// The nine high-risk deployment categories.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HighRiskCategory {
    /// Safety component of a product under sectoral product legislation.
    ProductSafetyComponent,
    /// Biometric identification and categorisation systems.
    Biometrics,
    /// Management of critical infrastructure.
    CriticalInfrastructure,
    /// Education and vocational training (access, assessment, proctoring).
    Education,
    /// Employment, worker management, and access to self-employment.
    Employment,
    /// Access to essential private and public services.
    EssentialServices,
    /// Law enforcement uses.
    LawEnforcement,
    /// Migration, asylum, and border control management.
    MigrationBorder,
    /// Administration of justice and democratic processes.
    JusticeDemocracy,
}

/// Total number of high-risk categories.
pub const HIGH_RISK_CATEGORY_COUNT: usize = 9;

impl HighRiskCategory {
    /// All high-risk categories in canonical order.
    pub fn all() -> &'static [HighRiskCategory] {
        &[
            Self::ProductSafetyComponent,
            Self::Biometrics,
            Self::CriticalInfrastructure,
            Self::Education,
            Self::Employment,
            Self::EssentialServices,
            Self::LawEnforcement,
            Self::MigrationBorder,
            Self::JusticeDemocracy,
        ]
    }

    /// Returns the snake_case string identifier for this category.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::ProductSafetyComponent => "product_safety_component",
            Self::Biometrics => "biometrics",
            Self::CriticalInfrastructure => "critical_infrastructure",
            Self::Education => "education",
            Self::Employment => "employment",
            Self::EssentialServices => "essential_services",
            Self::LawEnforcement => "law_enforcement",
            Self::MigrationBorder => "migration_border",
            Self::JusticeDemocracy => "justice_democracy",
        }
    }
}

// ─── Transparency Indicators ─────────────────────────────────────────

/// The five transparency-obligation indicators.
///
/// A `yes` on any of these attaches limited-risk transparency obligations
/// unless a higher-precedence stage already decided the classification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TransparencyIndicator {
    /// The system interacts directly with natural persons.
    HumanInteraction,
    /// The system generates synthetic audio, image, video, or text content.
    SyntheticContent,
    /// The system performs emotion recognition.
    EmotionRecognition,
    /// The system performs biometric categorisation requiring disclosure.
    BiometricCategorisationDisclosure,
    /// The system produces deepfake content.
    Deepfake,
}

/// Total number of transparency indicators.
pub const TRANSPARENCY_INDICATOR_COUNT: usize = 5;

impl TransparencyIndicator {
    /// All transparency indicators in canonical order.
    pub fn all() -> &'static [TransparencyIndicator] {
        &[
            Self::HumanInteraction,
            Self::SyntheticContent,
            Self::EmotionRecognition,
            Self::BiometricCategorisationDisclosure,
            Self::Deepfake,
        ]
    }

    /// Returns the snake_case string identifier for this indicator.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::HumanInteraction => "human_interaction",
            Self::SyntheticContent => "synthetic_content",
            Self::EmotionRecognition => "emotion_recognition",
            Self::BiometricCategorisationDisclosure => "biometric_categorisation_disclosure",
            Self::Deepfake => "deepfake",
        }
    }
}

// ─── QuestionKey ─────────────────────────────────────────────────────

/// A fully-qualified screening question key.
///
/// Serialized as a dotted string, e.g. `"prohibited.social_scoring"`.
/// Unknown groups or indicators fail deserialization — loosely-typed
/// payloads from the store are forced onto the closed taxonomy here.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum QuestionKey {
    /// AI-system definition test question.
    Definition(DefinitionIndicator),
    /// Prohibited-practice screening question.
    Prohibited(ProhibitedPractice),
    /// High-risk screening question.
    HighRisk(HighRiskCategory),
    /// Transparency screening question.
    Transparency(TransparencyIndicator),
}

impl QuestionKey {
    /// The question group prefix of this key.
    pub fn group(&self) -> &'static str {
        match self {
            Self::Definition(_) => "definition",
            Self::Prohibited(_) => "prohibited",
            Self::HighRisk(_) => "high_risk",
            Self::Transparency(_) => "transparency",
        }
    }

    /// The indicator name within the group.
    pub fn indicator(&self) -> &'static str {
        match self {
            Self::Definition(i) => i.as_str(),
            Self::Prohibited(p) => p.as_str(),
            Self::HighRisk(c) => c.as_str(),
            Self::Transparency(t) => t.as_str(),
        }
    }
}

impl std::fmt::Display for QuestionKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}.{}", self.group(), self.indicator())
    }
}

impl FromStr for QuestionKey {
    type Err = AigrcError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (group, indicator) = s.split_once('.').ok_or_else(|| {
            AigrcError::SchemaValidation(format!(
                "question key must be '<group>.<indicator>', got: {s:?}"
            ))
        })?;
        let unknown = || {
            AigrcError::SchemaValidation(format!("unknown question key: {s:?}"))
        };
        match group {
            "definition" => DefinitionIndicator::all()
                .iter()
                .find(|i| i.as_str() == indicator)
                .map(|i| Self::Definition(*i))
                .ok_or_else(unknown),
            "prohibited" => ProhibitedPractice::all()
                .iter()
                .find(|p| p.as_str() == indicator)
                .map(|p| Self::Prohibited(*p))
                .ok_or_else(unknown),
            "high_risk" => HighRiskCategory::all()
                .iter()
                .find(|c| c.as_str() == indicator)
                .map(|c| Self::HighRisk(*c))
                .ok_or_else(unknown),
            "transparency" => TransparencyIndicator::all()
                .iter()
                .find(|t| t.as_str() == indicator)
                .map(|t| Self::Transparency(*t))
                .ok_or_else(unknown),
            _ => Err(unknown()),
        }
    }
}

impl Serialize for QuestionKey {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_string())
    }
}

impl<'de> Deserialize<'de> for QuestionKey {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}

// ─── Answer & AnswerSet ──────────────────────────────────────────────

/// A single screening answer with its optional free-text rationale.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Answer {
    /// The tri-state value.
    pub value: TriState,
    /// Free-text justification supplied by the respondent.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rationale: Option<String>,
}

impl Answer {
    /// An answer with no rationale.
    pub fn bare(value: TriState) -> Self {
        Self {
            value,
            rationale: None,
        }
    }
}

/// The screening answers for one subject at one point in time.
///
/// Immutable once a classification has been computed from it — a
/// re-assessment supplies a fresh `AnswerSet` rather than mutating this
/// one. Keys are ordered so serialization and stage evaluation are
/// deterministic.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnswerSet {
    /// The subject these answers describe.
    pub subject_id: SubjectId,
    /// Answers keyed by fully-qualified question key.
    pub answers: BTreeMap<QuestionKey, Answer>,
}

impl AnswerSet {
    /// Create an empty answer set for a subject.
    pub fn new(subject_id: SubjectId) -> Self {
        Self {
            subject_id,
            answers: BTreeMap::new(),
        }
    }

    /// Record an answer without a rationale, replacing any prior answer.
    pub fn set(&mut self, key: QuestionKey, value: TriState) {
        self.answers.insert(key, Answer::bare(value));
    }

    /// Record an answer with a rationale, replacing any prior answer.
    pub fn set_with_rationale(
        &mut self,
        key: QuestionKey,
        value: TriState,
        rationale: impl Into<String>,
    ) {
        self.answers.insert(
            key,
            Answer {
                value,
                rationale: Some(rationale.into()),
            },
        );
    }

    /// The tri-state value for a question, if answered.
    pub fn value(&self, key: QuestionKey) -> Option<TriState> {
        self.answers.get(&key).map(|a| a.value)
    }

    /// The full answer (value + rationale) for a question, if answered.
    pub fn answer(&self, key: QuestionKey) -> Option<&Answer> {
        self.answers.get(&key)
    }

    /// Whether no questions have been answered at all.
    pub fn is_empty(&self) -> bool {
        self.answers.is_empty()
    }

    /// Number of answered questions.
    pub fn len(&self) -> usize {
        self.answers.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn all_keys() -> Vec<QuestionKey> {
        let mut keys = Vec::new();
        keys.extend(DefinitionIndicator::all().iter().map(|i| QuestionKey::Definition(*i)));
        keys.extend(ProhibitedPractice::all().iter().map(|p| QuestionKey::Prohibited(*p)));
        keys.extend(HighRiskCategory::all().iter().map(|c| QuestionKey::HighRisk(*c)));
        keys.extend(
            TransparencyIndicator::all()
                .iter()
                .map(|t| QuestionKey::Transparency(*t)),
        );
        keys
    }

    // ── Group counts ─────────────────────────────────────────────────

    #[test]
    fn test_group_counts() {
        assert_eq!(DefinitionIndicator::all().len(), DEFINITION_INDICATOR_COUNT);
        assert_eq!(ProhibitedPractice::all().len(), PROHIBITED_PRACTICE_COUNT);
        assert_eq!(HighRiskCategory::all().len(), HIGH_RISK_CATEGORY_COUNT);
        assert_eq!(
            TransparencyIndicator::all().len(),
            TRANSPARENCY_INDICATOR_COUNT
        );
    }

    #[test]
    fn test_all_keys_unique() {
        let keys = all_keys();
        let mut seen = std::collections::HashSet::new();
        for k in &keys {
            assert!(seen.insert(*k), "duplicate key: {k}");
        }
        assert_eq!(keys.len(), 3 + 8 + 9 + 5);
    }

    // ── QuestionKey string form ──────────────────────────────────────

    #[test]
    fn test_question_key_roundtrip() {
        for key in all_keys() {
            let s = key.to_string();
            let parsed: QuestionKey = s.parse().unwrap_or_else(|e| {
                panic!("failed to parse {s:?}: {e}");
            });
            assert_eq!(key, parsed);
        }
    }

    #[test]
    fn test_question_key_format() {
        let key = QuestionKey::Prohibited(ProhibitedPractice::SocialScoring);
        assert_eq!(key.to_string(), "prohibited.social_scoring");
    }

    #[test]
    fn test_unknown_keys_rejected() {
        assert!("prohibited.mind_reading".parse::<QuestionKey>().is_err());
        assert!("unknown_group.autonomy".parse::<QuestionKey>().is_err());
        assert!("no_dot".parse::<QuestionKey>().is_err());
        assert!("".parse::<QuestionKey>().is_err());
    }

    #[test]
    fn test_question_key_serde_as_string() {
        let key = QuestionKey::HighRisk(HighRiskCategory::Employment);
        let json = serde_json::to_string(&key).unwrap();
        assert_eq!(json, "\"high_risk.employment\"");
        let parsed: QuestionKey = serde_json::from_str(&json).unwrap();
        assert_eq!(key, parsed);
    }

    // ── AnswerSet ────────────────────────────────────────────────────

    #[test]
    fn test_answer_set_records_and_replaces() {
        let mut answers = AnswerSet::new(SubjectId::new());
        let key = QuestionKey::Definition(DefinitionIndicator::Autonomy);
        answers.set(key, TriState::Unsure);
        assert_eq!(answers.value(key), Some(TriState::Unsure));
        answers.set_with_rationale(key, TriState::Yes, "operates unattended overnight");
        assert_eq!(answers.value(key), Some(TriState::Yes));
        assert_eq!(answers.len(), 1);
        assert!(answers.answer(key).unwrap().rationale.is_some());
    }

    #[test]
    fn test_answer_set_unanswered_is_none() {
        let answers = AnswerSet::new(SubjectId::new());
        assert!(answers.is_empty());
        assert_eq!(
            answers.value(QuestionKey::Transparency(TransparencyIndicator::Deepfake)),
            None
        );
    }

    #[test]
    fn test_answer_set_serde_roundtrip() {
        let mut answers = AnswerSet::new(SubjectId::new());
        answers.set(
            QuestionKey::Prohibited(ProhibitedPractice::SocialScoring),
            TriState::No,
        );
        answers.set_with_rationale(
            QuestionKey::HighRisk(HighRiskCategory::Education),
            TriState::Yes,
            "scores student essays",
        );
        let json = serde_json::to_string(&answers).unwrap();
        let parsed: AnswerSet = serde_json::from_str(&json).unwrap();
        assert_eq!(answers, parsed);
    }

    #[test]
    fn test_answer_set_rejects_unknown_key_on_ingest() {
        let json = format!(
            "{{\"subject_id\":\"{}\",\"answers\":{{\"prohibited.totally_new\":{{\"value\":\"yes\"}}}}}}",
            uuid::Uuid::new_v4()
        );
        assert!(serde_json::from_str::<AnswerSet>(&json).is_err());
    }
}
