// ✅ Validation Rules - checks the loader does not need for referential integrity
//
// Each rule runs in one of three modes:
//   ignore  → never checked
//   warn    → logged and kept in the ValidationReport (default)
//   enforce → the load fails with LoadError::Validation
//
// Rules:
//   end_after_start      - reservation end date strictly after start date
//   unique_room_numbers  - no two rooms share a number
//   non_overlapping      - stays in one room never share a night
//   non_negative_balance - loaded balances are >= 0

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

use crate::entities::{HotelRoom, Person};
use crate::error::LoadError;

// ============================================================================
// RULES AND MODES
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RuleMode {
    Ignore,
    #[default]
    Warn,
    Enforce,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Rule {
    EndAfterStart,
    UniqueRoomNumbers,
    NonOverlapping,
    NonNegativeBalance,
}

impl Rule {
    pub fn name(&self) -> &'static str {
        match self {
            Rule::EndAfterStart => "end_after_start",
            Rule::UniqueRoomNumbers => "unique_room_numbers",
            Rule::NonOverlapping => "non_overlapping",
            Rule::NonNegativeBalance => "non_negative_balance",
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ValidationPolicy {
    pub end_after_start: RuleMode,
    pub unique_room_numbers: RuleMode,
    pub non_overlapping: RuleMode,
    pub non_negative_balance: RuleMode,
}

impl ValidationPolicy {
    /// Every rule enforced
    pub fn strict() -> Self {
        Self::uniform(RuleMode::Enforce)
    }

    /// Every rule skipped; only referential integrity is checked
    pub fn lenient() -> Self {
        Self::uniform(RuleMode::Ignore)
    }

    pub fn uniform(mode: RuleMode) -> Self {
        ValidationPolicy {
            end_after_start: mode,
            unique_room_numbers: mode,
            non_overlapping: mode,
            non_negative_balance: mode,
        }
    }

    pub fn mode(&self, rule: Rule) -> RuleMode {
        match rule {
            Rule::EndAfterStart => self.end_after_start,
            Rule::UniqueRoomNumbers => self.unique_room_numbers,
            Rule::NonOverlapping => self.non_overlapping,
            Rule::NonNegativeBalance => self.non_negative_balance,
        }
    }

    fn is_checked(&self, rule: Rule) -> bool {
        self.mode(rule) != RuleMode::Ignore
    }
}

// ============================================================================
// ISSUES AND REPORT
// ============================================================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ValidationIssue {
    pub rule: Rule,
    pub message: String,
}

impl fmt::Display for ValidationIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] {}", self.rule.name(), self.message)
    }
}

/// Findings from rules running in warn mode
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ValidationReport {
    pub issues: Vec<ValidationIssue>,
}

impl ValidationReport {
    pub fn is_clean(&self) -> bool {
        self.issues.is_empty()
    }

    pub fn count(&self, rule: Rule) -> usize {
        self.issues.iter().filter(|i| i.rule == rule).count()
    }

    pub fn summary(&self) -> String {
        if self.issues.is_empty() {
            return "no validation warnings".to_string();
        }
        format!(
            "{} validation warnings (end_after_start: {}, unique_room_numbers: {}, non_overlapping: {}, non_negative_balance: {})",
            self.issues.len(),
            self.count(Rule::EndAfterStart),
            self.count(Rule::UniqueRoomNumbers),
            self.count(Rule::NonOverlapping),
            self.count(Rule::NonNegativeBalance),
        )
    }
}

// ============================================================================
// VALIDATOR
// ============================================================================

pub struct Validator {
    policy: ValidationPolicy,
}

impl Validator {
    pub fn new(policy: ValidationPolicy) -> Self {
        Validator { policy }
    }

    /// Collect issues for the rooms and their reservations (all checked rules)
    pub fn check_rooms(&self, rooms: &[HotelRoom]) -> Vec<ValidationIssue> {
        let mut issues = Vec::new();

        if self.policy.is_checked(Rule::EndAfterStart) {
            for room in rooms {
                for reservation in room.reservations().filter(|r| !r.is_chronological()) {
                    issues.push(ValidationIssue {
                        rule: Rule::EndAfterStart,
                        message: format!(
                            "reservation {} in room {} ends {} which is not after its start {}",
                            reservation.id(),
                            room.number(),
                            reservation.end_date(),
                            reservation.start_date()
                        ),
                    });
                }
            }
        }

        if self.policy.is_checked(Rule::UniqueRoomNumbers) {
            let mut counts: BTreeMap<u32, usize> = BTreeMap::new();
            for room in rooms {
                *counts.entry(room.number()).or_insert(0) += 1;
            }
            for (number, count) in counts.into_iter().filter(|(_, c)| *c > 1) {
                issues.push(ValidationIssue {
                    rule: Rule::UniqueRoomNumbers,
                    message: format!("room number {} is used by {} rooms", number, count),
                });
            }
        }

        if self.policy.is_checked(Rule::NonOverlapping) {
            for room in rooms {
                let stays: Vec<_> = room.reservations().collect();
                for (i, a) in stays.iter().enumerate() {
                    for b in &stays[i + 1..] {
                        if a.overlaps(b) {
                            issues.push(ValidationIssue {
                                rule: Rule::NonOverlapping,
                                message: format!(
                                    "reservations {} and {} overlap in room {}",
                                    a.id(),
                                    b.id(),
                                    room.number()
                                ),
                            });
                        }
                    }
                }
            }
        }

        issues
    }

    pub fn check_persons(&self, persons: &[Person]) -> Vec<ValidationIssue> {
        if !self.policy.is_checked(Rule::NonNegativeBalance) {
            return Vec::new();
        }
        persons
            .iter()
            .filter(|p| p.balance() < 0.0)
            .map(|p| ValidationIssue {
                rule: Rule::NonNegativeBalance,
                message: format!("person '{}' has negative balance {:.2}", p.name(), p.balance()),
            })
            .collect()
    }

    /// Split issues by mode: enforced ones fail, warned ones go to the report
    pub fn apply(
        &self,
        issues: Vec<ValidationIssue>,
        report: &mut ValidationReport,
    ) -> Result<(), LoadError> {
        let (enforced, warned): (Vec<_>, Vec<_>) = issues
            .into_iter()
            .partition(|issue| self.policy.mode(issue.rule) == RuleMode::Enforce);

        for issue in &warned {
            tracing::warn!(rule = issue.rule.name(), "{}", issue.message);
        }
        report.issues.extend(warned);

        if enforced.is_empty() {
            Ok(())
        } else {
            Err(LoadError::Validation(enforced))
        }
    }
}

// ============================================================================
// TESTS
// ============================================================================
