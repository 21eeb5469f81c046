//! The attribute abstraction shared by every security criterion.

use crate::rating::{
    pick_worst_rating, AttributeValue, Details, DetailsComponent, Evaluation, Rating,
};
use keyward_core::{Markdown, ResolvedFeatures, Result, Sentence};

/// A security criterion wallets are rated against.
pub trait Attribute {
    /// Stable identifier (e.g. `accountRecovery`).
    fn id(&self) -> &'static str;

    fn display_name(&self) -> &'static str;

    /// The question the attribute answers about a wallet.
    fn question(&self) -> Sentence;

    /// Why the attribute matters to users.
    fn why(&self) -> Markdown;

    /// How wallets are evaluated.
    fn methodology(&self) -> Markdown;

    /// Rate one wallet variant.
    fn evaluate(&self, features: &ResolvedFeatures) -> Result<Evaluation>;

    /// Combine per-variant evaluations into one.
    fn aggregate(&self, per_variant: Vec<Evaluation>) -> Result<Evaluation> {
        pick_worst_rating(per_variant)
    }
}

/// The evaluation used when the features an attribute depends on are unknown.
pub fn unrated(attribute: &dyn Attribute) -> Evaluation {
    tracing::warn!(attribute = attribute.id(), "Missing feature data, attribute is unrated");
    Evaluation {
        value: AttributeValue {
            id: "unrated",
            rating: Rating::Unrated,
            display_name: format!("{}: Unrated", attribute.display_name()),
            short_explanation: Sentence::new(
                "Keyward lacks the information needed to determine this.",
            ),
            minimum_guardian_policy: None,
            outcomes: None,
        },
        details: Details::Component(DetailsComponent::UnratedAttribute),
    }
}
