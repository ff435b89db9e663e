//! Selector
//!
//! Picks one item from a candidate set, with probability proportional to
//! the strategy weight of each candidate.

use crate::content::item::ContentItem;
use crate::core::error::DomainError;
use crate::selection::strategy::{WeightContext, item_weight};
use crate::viewer::preferences::SelectionStrategy;
use rand::distributions::{Distribution, WeightedIndex};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// A single pick and how likely it was
#[derive(Debug, Clone, PartialEq)]
pub struct Pick<'a> {
    pub item: &'a ContentItem,
    /// Probability this item had of being chosen
    pub probability: f64,
}

/// Picks items from candidate sets using a random source
///
/// Seeded selectors are fully reproducible:
///
/// ```
/// use shuffle_domain::{ContentItem, SelectionStrategy, Selector, WeightContext};
/// use std::collections::BTreeSet;
///
/// let items = [ContentItem::new("a", 60), ContentItem::new("b", 60)];
/// let candidates: Vec<_> = items.iter().collect();
/// let favorites = BTreeSet::new();
/// let ctx = WeightContext::new(&favorites);
///
/// let first = Selector::seeded(7).select(&candidates, SelectionStrategy::Random, &ctx).unwrap();
/// let again = Selector::seeded(7).select(&candidates, SelectionStrategy::Random, &ctx).unwrap();
/// assert_eq!(first.item.id, again.item.id);
/// ```
#[derive(Debug, Clone)]
pub struct Selector<R = StdRng> {
    rng: R,
}

impl Selector<StdRng> {
    pub fn seeded(seed: u64) -> Self {
        Self::new(StdRng::seed_from_u64(seed))
    }

    pub fn from_entropy() -> Self {
        Self::new(StdRng::from_entropy())
    }

    /// Seeded when `seed` is given, entropy otherwise
    pub fn from_seed_option(seed: Option<u64>) -> Self {
        match seed {
            Some(seed) => Self::seeded(seed),
            None => Self::from_entropy(),
        }
    }
}

impl<R: Rng> Selector<R> {
    pub fn new(rng: R) -> Self {
        Self { rng }
    }

    /// Pick one candidate.
    ///
    /// Fails only when `candidates` is empty.
    pub fn select<'a>(
        &mut self,
        candidates: &[&'a ContentItem],
        strategy: SelectionStrategy,
        ctx: &WeightContext<'_>,
    ) -> Result<Pick<'a>, DomainError> {
        if candidates.is_empty() {
            return Err(DomainError::NoCandidates);
        }

        let weights = weights(candidates, strategy, ctx);
        let index = match strategy {
            SelectionStrategy::Random => self.rng.gen_range(0..candidates.len()),
            _ => match WeightedIndex::new(&weights) {
                Ok(dist) => dist.sample(&mut self.rng),
                // weights are positive by construction; stay uniform if not
                Err(_) => self.rng.gen_range(0..candidates.len()),
            },
        };

        Ok(Pick {
            item: candidates[index],
            probability: normalized(&weights)[index],
        })
    }
}

fn weights(
    candidates: &[&ContentItem],
    strategy: SelectionStrategy,
    ctx: &WeightContext<'_>,
) -> Vec<f64> {
    candidates
        .iter()
        .map(|item| item_weight(strategy, item, ctx))
        .collect()
}

fn normalized(weights: &[f64]) -> Vec<f64> {
    let total: f64 = weights.iter().sum();
    if total > 0.0 && total.is_finite() {
        weights.iter().map(|w| w / total).collect()
    } else {
        vec![1.0 / weights.len() as f64; weights.len()]
    }
}

/// Selection probability of each candidate, in candidate order
pub fn probabilities(
    candidates: &[&ContentItem],
    strategy: SelectionStrategy,
    ctx: &WeightContext<'_>,
) -> Vec<f64> {
    if candidates.is_empty() {
        return Vec::new();
    }
    normalized(&weights(candidates, strategy, ctx))
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use std::collections::{BTreeSet, HashMap};

    fn no_favorites() -> BTreeSet<String> {
        BTreeSet::new()
    }

    #[test]
    fn test_empty_candidates_is_not_found() {
        let favs = no_favorites();
        let ctx = WeightContext::new(&favs);
        let result = Selector::seeded(1).select(&[], SelectionStrategy::Weighted, &ctx);
        assert_eq!(result, Err(DomainError::NoCandidates));
    }

    #[test]
    fn test_single_candidate_always_chosen() {
        let items = [ContentItem::new("only", 60)];
        let candidates: Vec<_> = items.iter().collect();
        let favs = no_favorites();
        let ctx = WeightContext::new(&favs);
        for strategy in [
            SelectionStrategy::Random,
            SelectionStrategy::Weighted,
            SelectionStrategy::Trending,
        ] {
            let pick = Selector::seeded(3).select(&candidates, strategy, &ctx).unwrap();
            assert_eq!(pick.item.id.as_str(), "only");
            assert_eq!(pick.probability, 1.0);
        }
    }

    #[test]
    fn test_random_probabilities_are_uniform() {
        let items: Vec<_> = (0..4).map(|i| ContentItem::new(format!("{}", i), 60)).collect();
        let candidates: Vec<_> = items.iter().collect();
        let favs = no_favorites();
        let ctx = WeightContext::new(&favs);
        let probs = probabilities(&candidates, SelectionStrategy::Random, &ctx);
        assert!(probs.iter().all(|p| (p - 0.25).abs() < 1e-12));
    }

    #[test]
    fn test_weighted_prefers_higher_rating() {
        let items = [
            ContentItem::new("A", 60).with_rating(5.0),
            ContentItem::new("B", 60).with_rating(1.0),
        ];
        let candidates: Vec<_> = items.iter().collect();
        let favs = no_favorites();
        let ctx = WeightContext::new(&favs);
        let mut selector = Selector::seeded(42);

        let mut counts: HashMap<String, usize> = HashMap::new();
        for _ in 0..10_000 {
            let pick = selector
                .select(&candidates, SelectionStrategy::Weighted, &ctx)
                .unwrap();
            *counts.entry(pick.item.id.to_string()).or_default() += 1;
        }

        let a = counts.get("A").copied().unwrap_or(0);
        let b = counts.get("B").copied().unwrap_or(0);
        // expected split is 5:1
        assert!(a > 3 * b, "A={} B={}", a, b);
    }

    #[test]
    fn test_trending_zero_popularity_still_reachable() {
        let items = [
            ContentItem::new("hot", 60).with_popularity(3),
            ContentItem::new("cold", 60).with_popularity(0),
        ];
        let candidates: Vec<_> = items.iter().collect();
        let favs = no_favorites();
        let ctx = WeightContext::new(&favs).with_trending_epsilon(1.0).unwrap();

        let probs = probabilities(&candidates, SelectionStrategy::Trending, &ctx);
        assert!(probs[1] > 0.0);

        let mut selector = Selector::seeded(9);
        let reached = (0..2_000).any(|_| {
            selector
                .select(&candidates, SelectionStrategy::Trending, &ctx)
                .unwrap()
                .item
                .id
                .as_str()
                == "cold"
        });
        assert!(reached);
    }

    #[test]
    fn test_seeded_selection_is_reproducible() {
        let items: Vec<_> = (0..20)
            .map(|i| ContentItem::new(format!("{}", i), 60).with_rating(i as f64 / 4.0))
            .collect();
        let candidates: Vec<_> = items.iter().collect();
        let favs = no_favorites();
        let ctx = WeightContext::new(&favs);

        let run = |seed| {
            let mut selector = Selector::seeded(seed);
            (0..10)
                .map(|_| {
                    selector
                        .select(&candidates, SelectionStrategy::Weighted, &ctx)
                        .unwrap()
                        .item
                        .id
                        .to_string()
                })
                .collect::<Vec<_>>()
        };
        assert_eq!(run(11), run(11));
    }

    proptest! {
        #[test]
        fn test_raising_rating_never_lowers_probability(
            others in prop::collection::vec(prop::option::of(0.0f64..=5.0), 1..8),
            low in 0.0f64..=5.0,
            bump in 0.0f64..=5.0,
        ) {
            let high = (low + bump).min(5.0);
            let favs = BTreeSet::new();
            let ctx = WeightContext::new(&favs);

            let build = |rating: f64| {
                let mut items = vec![ContentItem::new("target", 60).with_rating(rating)];
                for (i, r) in others.iter().enumerate() {
                    let mut item = ContentItem::new(format!("o{}", i), 60);
                    item.rating = *r;
                    items.push(item);
                }
                items
            };

            let low_items = build(low);
            let high_items = build(high);
            let low_refs: Vec<_> = low_items.iter().collect();
            let high_refs: Vec<_> = high_items.iter().collect();

            let p_low = probabilities(&low_refs, SelectionStrategy::Weighted, &ctx)[0];
            let p_high = probabilities(&high_refs, SelectionStrategy::Weighted, &ctx)[0];
            prop_assert!(p_high + 1e-12 >= p_low);
        }
    }
}
