//! Composite rule engine.

use std::sync::Arc;

use super::builtin::{ConsecutiveSubjectRule, SubjectSpacingRule};
use super::{Placement, PlacementRule, RuleEngine, Violation};
use crate::models::{Schedule, SchedulingPolicy};

/// An ordered collection of [`PlacementRule`]s.
///
/// Every rule is evaluated; all violations are reported in rule order.
/// An empty set accepts every candidate.
#[derive(Clone, Default)]
pub struct RuleSet {
    rules: Vec<Arc<dyn PlacementRule>>,
}

impl RuleSet {
    /// Creates a rule set with no rules.
    pub fn empty() -> Self {
        Self { rules: Vec::new() }
    }

    /// The default rules configured from `policy`.
    pub fn from_policy(policy: &SchedulingPolicy) -> Self {
        Self::empty()
            .with_rule(ConsecutiveSubjectRule::new(
                policy.allow_consecutive_same_subject,
                policy.max_consecutive_same_subject,
            ))
            .with_rule(SubjectSpacingRule::new(policy.min_subject_interval))
    }

    pub fn with_rule<R: PlacementRule + 'static>(mut self, rule: R) -> Self {
        self.rules.push(Arc::new(rule));
        self
    }

    pub fn rule_names(&self) -> Vec<&'static str> {
        self.rules.iter().map(|r| r.name()).collect()
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }
}

impl RuleEngine for RuleSet {
    fn check(&self, schedule: &Schedule, placement: &Placement<'_>) -> Vec<Violation> {
        self.rules
            .iter()
            .filter_map(|rule| rule.check(schedule, placement))
            .collect()
    }
}

impl std::fmt::Debug for RuleSet {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RuleSet")
            .field("rules", &self.rule_names())
            .finish()
    }
}
