//! Remedy template library
//!
//! Templates are static markdown keyed by the answer classification. The
//! mapping is an ordered rule table: the first matching rule wins, and a
//! classification no rule matches gets [`RemedyTemplate::LifeGuidance`].

use super::classifier::{Classification, Duration, Emotion, Impact, ProblemType};
use serde::Serialize;

/// Identifier of one long-form remedy text
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum RemedyTemplate {
    CareerChallenges,
    CareerAnxiety,
    CareerGuidance,
    RelationshipAnger,
    RelationshipLongTerm,
    RelationshipGuidance,
    FinancialGuidance,
    HealthGuidance,
    LifeGuidance,
}

impl RemedyTemplate {
    #[cfg(test)]
    pub const ALL: [RemedyTemplate; 9] = [
        RemedyTemplate::CareerChallenges,
        RemedyTemplate::CareerAnxiety,
        RemedyTemplate::CareerGuidance,
        RemedyTemplate::RelationshipAnger,
        RemedyTemplate::RelationshipLongTerm,
        RemedyTemplate::RelationshipGuidance,
        RemedyTemplate::FinancialGuidance,
        RemedyTemplate::HealthGuidance,
        RemedyTemplate::LifeGuidance,
    ];

    /// Template used when no rule matches
    pub const DEFAULT: RemedyTemplate = RemedyTemplate::LifeGuidance;

    /// Full markdown body
    pub fn text(self) -> &'static str {
        match self {
            RemedyTemplate::CareerChallenges => include_str!("../../remedies/career_challenges.md"),
            RemedyTemplate::CareerAnxiety => include_str!("../../remedies/career_anxiety.md"),
            RemedyTemplate::CareerGuidance => include_str!("../../remedies/career_guidance.md"),
            RemedyTemplate::RelationshipAnger => {
                include_str!("../../remedies/relationship_anger.md")
            }
            RemedyTemplate::RelationshipLongTerm => {
                include_str!("../../remedies/relationship_long_term.md")
            }
            RemedyTemplate::RelationshipGuidance => {
                include_str!("../../remedies/relationship_guidance.md")
            }
            RemedyTemplate::FinancialGuidance => {
                include_str!("../../remedies/financial_guidance.md")
            }
            RemedyTemplate::HealthGuidance => include_str!("../../remedies/health_guidance.md"),
            RemedyTemplate::LifeGuidance => include_str!("../../remedies/life_guidance.md"),
        }
    }
}

/// One row of the lookup table. `None` fields match anything.
#[derive(Debug, Clone, Copy)]
pub struct RemedyRule {
    pub problem: Option<ProblemType>,
    pub duration: Option<Duration>,
    pub impact: Option<Impact>,
    pub emotion: Option<Emotion>,
    pub template: RemedyTemplate,
}

impl RemedyRule {
    const fn problem(problem: ProblemType, template: RemedyTemplate) -> Self {
        Self {
            problem: Some(problem),
            duration: None,
            impact: None,
            emotion: None,
            template,
        }
    }

    const fn with_duration(mut self, duration: Duration) -> Self {
        self.duration = Some(duration);
        self
    }

    const fn with_impact(mut self, impact: Impact) -> Self {
        self.impact = Some(impact);
        self
    }

    const fn with_emotion(mut self, emotion: Emotion) -> Self {
        self.emotion = Some(emotion);
        self
    }

    pub fn matches(&self, c: &Classification) -> bool {
        self.problem.map_or(true, |p| p == c.problem)
            && self.duration.map_or(true, |d| d == c.duration)
            && self.impact.map_or(true, |i| i == c.impact)
            && self.emotion.map_or(true, |e| e == c.emotion)
    }
}

/// Ordered lookup table, most specific rules first within each problem type
pub const REMEDY_RULES: &[RemedyRule] = &[
    RemedyRule::problem(ProblemType::Career, RemedyTemplate::CareerChallenges)
        .with_duration(Duration::Long)
        .with_impact(Impact::Work),
    RemedyRule::problem(ProblemType::Career, RemedyTemplate::CareerAnxiety)
        .with_emotion(Emotion::Anxious),
    RemedyRule::problem(ProblemType::Career, RemedyTemplate::CareerGuidance),
    RemedyRule::problem(ProblemType::Relationship, RemedyTemplate::RelationshipAnger)
        .with_impact(Impact::Relationships)
        .with_emotion(Emotion::Angry),
    RemedyRule::problem(ProblemType::Relationship, RemedyTemplate::RelationshipLongTerm)
        .with_duration(Duration::Long),
    RemedyRule::problem(ProblemType::Relationship, RemedyTemplate::RelationshipGuidance),
    RemedyRule::problem(ProblemType::Financial, RemedyTemplate::FinancialGuidance),
    RemedyRule::problem(ProblemType::Health, RemedyTemplate::HealthGuidance),
];

/// Look up the template for a classification in a rule table
pub fn lookup(rules: &[RemedyRule], classification: &Classification) -> RemedyTemplate {
    rules
        .iter()
        .find(|rule| rule.matches(classification))
        .map_or(RemedyTemplate::DEFAULT, |rule| rule.template)
}

/// Template for a classification using the built-in table
pub fn template_for(classification: &Classification) -> RemedyTemplate {
    lookup(REMEDY_RULES, classification)
}
