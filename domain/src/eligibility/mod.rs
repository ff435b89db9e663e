//! Eligibility filter
//!
//! Reduces a catalog to the items a viewer may see right now. Pure: the
//! same catalog and context always give the same result, in catalog order.
//!
//! An item is eligible iff every rule passes:
//!
//! 1. not restricted, or unrestricted mode is on
//! 2. no tag is blocked
//! 3. duration bucket matches the preferred duration (or `any`)
//! 4. carries `intensity:<level>` for the preferred intensity (or `any`)
//! 5. premium-only items need a premium subscription (when one is known)
//! 6. carries one of the requested moods (when any are requested)
//! 7. rated at least `min_rating` (when set)

use crate::content::item::ContentItem;
use crate::viewer::context::ViewerContext;
use serde::Serialize;
use std::fmt;

/// Why an item was left out
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "rule", content = "detail", rename_all = "snake_case")]
pub enum Exclusion {
    Restricted,
    BlockedTag(String),
    Duration,
    Intensity,
    PremiumOnly,
    Mood,
    Rating,
}

impl fmt::Display for Exclusion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Exclusion::Restricted => write!(f, "requires unrestricted mode"),
            Exclusion::BlockedTag(tag) => write!(f, "blocked tag '{}'", tag),
            Exclusion::Duration => write!(f, "outside preferred duration"),
            Exclusion::Intensity => write!(f, "outside preferred intensity"),
            Exclusion::PremiumOnly => write!(f, "premium only"),
            Exclusion::Mood => write!(f, "no matching mood"),
            Exclusion::Rating => write!(f, "below minimum rating"),
        }
    }
}

/// Check one item, returning the first rule it fails
pub fn explain(item: &ContentItem, ctx: &ViewerContext) -> Result<(), Exclusion> {
    let prefs = &ctx.preferences;

    if item.is_restricted && !ctx.unrestricted_mode_enabled {
        return Err(Exclusion::Restricted);
    }

    if let Some(tag) = item.tags.iter().find(|t| prefs.blocked_tags.contains(*t)) {
        return Err(Exclusion::BlockedTag(tag.clone()));
    }

    if !item.duration_bucket().matches(prefs.preferred_duration) {
        return Err(Exclusion::Duration);
    }

    if !item.matches_intensity(prefs.intensity) {
        return Err(Exclusion::Intensity);
    }

    if item.is_premium_only && !ctx.premium_allowed() {
        return Err(Exclusion::PremiumOnly);
    }

    if !prefs.moods.is_empty() && !item.tags.iter().any(|t| prefs.moods.contains(t)) {
        return Err(Exclusion::Mood);
    }

    if let Some(min_rating) = prefs.min_rating
        && item.rating.unwrap_or(0.0) < min_rating
    {
        return Err(Exclusion::Rating);
    }

    Ok(())
}

/// Items of `catalog` visible under `ctx`, in catalog order
pub fn filter<'a>(catalog: &'a [ContentItem], ctx: &ViewerContext) -> Vec<&'a ContentItem> {
    catalog
        .iter()
        .filter(|item| explain(item, ctx).is_ok())
        .collect()
}

/// Items left out under `ctx`, each with the rule it failed
pub fn excluded<'a>(
    catalog: &'a [ContentItem],
    ctx: &ViewerContext,
) -> Vec<(&'a ContentItem, Exclusion)> {
    catalog
        .iter()
        .filter_map(|item| explain(item, ctx).err().map(|reason| (item, reason)))
        .collect()
}
