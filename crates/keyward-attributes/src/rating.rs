//! Ratings, attribute values and per-variant aggregation.

use keyward_core::{GuardianPolicy, KeywardError, Markdown, Result, Sentence};
use keyward_recovery::GuardianScenarioOutcome;
use serde::Serialize;
use std::fmt;

/// How well a wallet does on one attribute.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Rating {
    Fail,
    Partial,
    Pass,
    /// Not enough information to rate.
    Unrated,
    /// The attribute does not apply to this wallet.
    Exempt,
}

impl Rating {
    pub fn as_str(self) -> &'static str {
        match self {
            Rating::Fail => "FAIL",
            Rating::Partial => "PARTIAL",
            Rating::Pass => "PASS",
            Rating::Unrated => "UNRATED",
            Rating::Exempt => "EXEMPT",
        }
    }

    /// Position on the fail-to-pass scale; `None` for ratings off the scale.
    fn severity(self) -> Option<u8> {
        match self {
            Rating::Fail => Some(0),
            Rating::Partial => Some(1),
            Rating::Pass => Some(2),
            Rating::Unrated | Rating::Exempt => None,
        }
    }
}

impl fmt::Display for Rating {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Named details layouts rendered by the presentation layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum DetailsComponent {
    AccountRecoveryDetails,
    AccountUnruggabilityDetails,
    UnratedAttribute,
}

/// Long-form explanation attached to an evaluation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "type", content = "content", rename_all = "snake_case")]
pub enum Details {
    Markdown(Markdown),
    Component(DetailsComponent),
}

/// The value computed for one attribute of one wallet variant.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AttributeValue {
    /// Stable verdict identifier
    pub id: &'static str,
    pub rating: Rating,
    pub display_name: String,
    pub short_explanation: Sentence,
    /// Guardian policy the verdict was derived from, if any
    pub minimum_guardian_policy: Option<GuardianPolicy>,
    /// Scenario outcomes the verdict was derived from, if any
    pub outcomes: Option<Vec<GuardianScenarioOutcome>>,
}

/// An attribute value together with its details.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Evaluation {
    pub value: AttributeValue,
    pub details: Details,
}

impl Evaluation {
    pub fn rating(&self) -> Rating {
        self.value.rating
    }

    pub fn id(&self) -> &'static str {
        self.value.id
    }
}

/// Pick the worst evaluation across wallet variants.
///
/// Any unrated evaluation wins outright. Exempt evaluations are ignored
/// unless nothing else is available. Among the rest the lowest rating wins.
/// Ties keep the earliest evaluation, except that a later pass replaces an
/// earlier one.
pub fn pick_worst_rating(evaluations: Vec<Evaluation>) -> Result<Evaluation> {
    let mut worst: Option<Evaluation> = None;

    for evaluation in evaluations {
        if evaluation.rating() == Rating::Unrated {
            return Ok(evaluation);
        }

        let worst_is_pass = worst
            .as_ref()
            .is_some_and(|current| current.rating() == Rating::Pass);
        let replace = match &worst {
            None => true,
            Some(current) => match (current.rating().severity(), evaluation.rating().severity()) {
                (_, None) => false,
                (None, Some(_)) => true,
                (Some(current), Some(candidate)) => {
                    candidate < current || (candidate == current && worst_is_pass)
                }
            },
        };
        if replace {
            worst = Some(evaluation);
        }
    }

    worst.ok_or_else(|| {
        KeywardError::invalid_input("cannot aggregate an empty list of evaluations")
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn evaluation(id: &'static str, rating: Rating) -> Evaluation {
        Evaluation {
            value: AttributeValue {
                id,
                rating,
                display_name: id.to_string(),
                short_explanation: Sentence::new(id),
                minimum_guardian_policy: None,
                outcomes: None,
            },
            details: Details::Component(DetailsComponent::UnratedAttribute),
        }
    }

    fn worst(ratings: &[(&'static str, Rating)]) -> &'static str {
        let evaluations = ratings
            .iter()
            .map(|(id, rating)| evaluation(*id, *rating))
            .collect();
        pick_worst_rating(evaluations).unwrap().id()
    }

    #[test]
    fn unrated_wins_immediately() {
        assert_eq!(
            worst(&[("a", Rating::Fail), ("b", Rating::Unrated), ("c", Rating::Unrated)]),
            "b"
        );
    }

    #[test]
    fn exempt_is_ignored_unless_alone() {
        assert_eq!(worst(&[("a", Rating::Exempt), ("b", Rating::Pass)]), "b");
        assert_eq!(worst(&[("a", Rating::Pass), ("b", Rating::Exempt)]), "a");
        assert_eq!(worst(&[("a", Rating::Exempt), ("b", Rating::Exempt)]), "a");
    }

    #[test]
    fn lowest_rating_wins() {
        assert_eq!(
            worst(&[("a", Rating::Pass), ("b", Rating::Partial), ("c", Rating::Fail)]),
            "c"
        );
        assert_eq!(worst(&[("a", Rating::Partial), ("b", Rating::Pass)]), "a");
        assert_eq!(worst(&[("a", Rating::Fail), ("b", Rating::Fail)]), "a");
    }

    #[test]
    fn ties_keep_earliest_except_pass() {
        assert_eq!(worst(&[("a", Rating::Partial), ("b", Rating::Partial)]), "a");
        assert_eq!(
            worst(&[("a", Rating::Pass), ("b", Rating::Pass), ("c", Rating::Pass)]),
            "c"
        );
        assert_eq!(
            worst(&[("a", Rating::Pass), ("b", Rating::Pass), ("c", Rating::Exempt)]),
            "b"
        );
    }

    #[test]
    fn empty_input_is_rejected() {
        assert!(matches!(
            pick_worst_rating(Vec::new()),
            Err(KeywardError::InvalidInput { .. })
        ));
    }

    #[test]
    fn serializes_for_the_presentation_layer() {
        let json = serde_json::to_value(evaluation("key_off_device", Rating::Fail)).unwrap();
        assert_eq!(json["value"]["id"], "key_off_device");
        assert_eq!(json["value"]["rating"], "FAIL");
        assert_eq!(json["details"]["type"], "component");
        assert_eq!(json["details"]["content"], "unrated_attribute");
    }
}
