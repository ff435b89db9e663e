//! Per-strategy item weights
//!
//! Each strategy turns an item into a strictly positive weight; the
//! selector then picks proportionally. Weights are reported as a list of
//! multiplicative factors so a pick can be explained to the viewer.

use crate::content::item::ContentItem;
use crate::core::error::DomainError;
use crate::interaction::recorder::FeedbackLedger;
use crate::viewer::preferences::SelectionStrategy;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// Weight given to items with no popularity under the trending strategy
pub const DEFAULT_TRENDING_EPSILON: f64 = 0.01;
/// Rating assumed for unrated items under the weighted strategy
pub const UNRATED_WEIGHT_RATING: f64 = 1.0;
/// Lowest rating used for weighting, so zero-rated items stay reachable
pub const MIN_WEIGHT_RATING: f64 = 0.1;

/// One multiplicative component of an item's weight
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeightFactor {
    pub factor: String,
    pub weight: f64,
    pub reason: String,
}

impl WeightFactor {
    fn new(factor: &str, weight: f64, reason: impl Into<String>) -> Self {
        Self {
            factor: factor.to_string(),
            weight,
            reason: reason.into(),
        }
    }
}

/// Inputs to weighting beyond the item itself
#[derive(Debug, Clone, Copy)]
pub struct WeightContext<'a> {
    pub favorite_tags: &'a BTreeSet<String>,
    pub feedback: Option<&'a FeedbackLedger>,
    pub trending_epsilon: f64,
}

impl<'a> WeightContext<'a> {
    pub fn new(favorite_tags: &'a BTreeSet<String>) -> Self {
        Self {
            favorite_tags,
            feedback: None,
            trending_epsilon: DEFAULT_TRENDING_EPSILON,
        }
    }

    pub fn with_feedback(mut self, feedback: &'a FeedbackLedger) -> Self {
        self.feedback = Some(feedback);
        self
    }

    /// Override the trending epsilon; it must be finite and positive
    pub fn with_trending_epsilon(mut self, epsilon: f64) -> Result<Self, DomainError> {
        validate_epsilon(epsilon)?;
        self.trending_epsilon = epsilon;
        Ok(self)
    }
}

pub fn validate_epsilon(epsilon: f64) -> Result<(), DomainError> {
    if epsilon.is_finite() && epsilon > 0.0 {
        Ok(())
    } else {
        Err(DomainError::invalid_preference(
            "trending_epsilon",
            epsilon.to_string(),
        ))
    }
}

/// Break an item's weight under `strategy` into its factors
pub fn weight_factors(
    strategy: SelectionStrategy,
    item: &ContentItem,
    ctx: &WeightContext<'_>,
) -> Vec<WeightFactor> {
    match strategy {
        SelectionStrategy::Random => vec![WeightFactor::new("uniform", 1.0, "random pick")],
        SelectionStrategy::Weighted => {
            let mut factors = Vec::with_capacity(3);

            let rating = match item.rating {
                Some(r) => {
                    let w = r.max(MIN_WEIGHT_RATING);
                    WeightFactor::new("rating", w, format!("rated {:.1}", r))
                }
                None => WeightFactor::new("rating", UNRATED_WEIGHT_RATING, "unrated"),
            };
            factors.push(rating);

            let matches = item
                .tags
                .iter()
                .filter(|t| ctx.favorite_tags.contains(*t))
                .count();
            if matches > 0 {
                factors.push(WeightFactor::new(
                    "favorite_tags",
                    (1 + matches) as f64,
                    format!("{} favourite tag(s)", matches),
                ));
            }

            if let Some(ledger) = ctx.feedback {
                let feedback = ledger.factor(&item.id);
                if feedback != 1.0 {
                    factors.push(WeightFactor::new(
                        "feedback",
                        feedback,
                        if feedback > 1.0 {
                            "you liked this"
                        } else {
                            "you disliked this"
                        },
                    ));
                }
            }

            factors
        }
        SelectionStrategy::Trending => {
            let popularity = item.popularity.unwrap_or(0);
            if popularity == 0 {
                vec![WeightFactor::new(
                    "popularity",
                    ctx.trending_epsilon,
                    "no views yet",
                )]
            } else {
                vec![WeightFactor::new(
                    "popularity",
                    (popularity as f64).ln_1p(),
                    format!("{} views", popularity),
                )]
            }
        }
    }
}

/// Selection weight of an item: the product of its factors
pub fn item_weight(
    strategy: SelectionStrategy,
    item: &ContentItem,
    ctx: &WeightContext<'_>,
) -> f64 {
    weight_factors(strategy, item, ctx)
        .iter()
        .map(|f| f.weight)
        .product()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn favorites(tags: &[&str]) -> BTreeSet<String> {
        tags.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_random_weight_is_one() {
        let favs = favorites(&[]);
        let ctx = WeightContext::new(&favs);
        let item = ContentItem::new("a", 1).with_rating(5.0).with_popularity(100);
        assert_eq!(item_weight(SelectionStrategy::Random, &item, &ctx), 1.0);
    }

    #[test]
    fn test_weighted_formula() {
        let favs = favorites(&["romantic", "couples"]);
        let ctx = WeightContext::new(&favs);

        let item = ContentItem::new("a", 1)
            .with_rating(4.0)
            .with_tags(["romantic", "couples", "artistic"]);
        assert_eq!(item_weight(SelectionStrategy::Weighted, &item, &ctx), 12.0);

        let unrated = ContentItem::new("b", 1);
        assert_eq!(item_weight(SelectionStrategy::Weighted, &unrated, &ctx), 1.0);

        let zero = ContentItem::new("c", 1).with_rating(0.0);
        assert_eq!(
            item_weight(SelectionStrategy::Weighted, &zero, &ctx),
            MIN_WEIGHT_RATING
        );
    }

    #[test]
    fn test_trending_formula() {
        let favs = favorites(&[]);
        let ctx = WeightContext::new(&favs);

        let popular = ContentItem::new("a", 1).with_popularity(99);
        let w = item_weight(SelectionStrategy::Trending, &popular, &ctx);
        assert!((w - 100f64.ln()).abs() < 1e-12);

        let unseen = ContentItem::new("b", 1);
        assert_eq!(
            item_weight(SelectionStrategy::Trending, &unseen, &ctx),
            DEFAULT_TRENDING_EPSILON
        );
    }

    #[test]
    fn test_epsilon_must_be_positive() {
        let favs = favorites(&[]);
        assert!(WeightContext::new(&favs).with_trending_epsilon(0.0).is_err());
        assert!(WeightContext::new(&favs).with_trending_epsilon(f64::NAN).is_err());
        let ctx = WeightContext::new(&favs).with_trending_epsilon(0.5).unwrap();
        assert_eq!(ctx.trending_epsilon, 0.5);
    }

    #[test]
    fn test_factors_explain_weight() {
        let favs = favorites(&["romantic"]);
        let ctx = WeightContext::new(&favs);
        let item = ContentItem::new("a", 1)
            .with_rating(4.5)
            .with_tags(["romantic"]);
        let factors = weight_factors(SelectionStrategy::Weighted, &item, &ctx);
        let names: Vec<_> = factors.iter().map(|f| f.factor.as_str()).collect();
        assert_eq!(names, vec!["rating", "favorite_tags"]);
        assert_eq!(factors[0].reason, "rated 4.5");
    }
}
