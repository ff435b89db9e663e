//! Viewer preference value objects
//!
//! Every enum here parses strictly: an unknown string is an error, never a
//! silent fallback to a default.

use crate::core::error::DomainError;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt;
use std::str::FromStr;

/// Preferred length of content
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DurationPreference {
    Short,
    Medium,
    Long,
    #[default]
    Any,
}

impl DurationPreference {
    pub const VALID_VALUES: [&'static str; 4] = ["short", "medium", "long", "any"];
}

impl fmt::Display for DurationPreference {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DurationPreference::Short => write!(f, "short"),
            DurationPreference::Medium => write!(f, "medium"),
            DurationPreference::Long => write!(f, "long"),
            DurationPreference::Any => write!(f, "any"),
        }
    }
}

impl FromStr for DurationPreference {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "short" => Ok(DurationPreference::Short),
            "medium" => Ok(DurationPreference::Medium),
            "long" => Ok(DurationPreference::Long),
            "any" => Ok(DurationPreference::Any),
            _ => Err(DomainError::invalid_preference("preferred_duration", s)),
        }
    }
}

/// Preferred intensity of content
///
/// Intensity is modelled as a reserved tag namespace on items
/// (`intensity:soft`, `intensity:medium`, `intensity:intense`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum IntensityPreference {
    Soft,
    Medium,
    Intense,
    #[default]
    Any,
}

impl IntensityPreference {
    pub const VALID_VALUES: [&'static str; 4] = ["soft", "medium", "intense", "any"];

    /// Value used after the `intensity:` prefix, `None` for `Any`
    pub fn as_tag_value(&self) -> Option<&'static str> {
        match self {
            IntensityPreference::Soft => Some("soft"),
            IntensityPreference::Medium => Some("medium"),
            IntensityPreference::Intense => Some("intense"),
            IntensityPreference::Any => None,
        }
    }
}

impl fmt::Display for IntensityPreference {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_tag_value().unwrap_or("any"))
    }
}

impl FromStr for IntensityPreference {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "soft" => Ok(IntensityPreference::Soft),
            "medium" => Ok(IntensityPreference::Medium),
            "intense" => Ok(IntensityPreference::Intense),
            "any" => Ok(IntensityPreference::Any),
            _ => Err(DomainError::invalid_preference("intensity", s)),
        }
    }
}

/// How the next item is picked from the candidate set
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SelectionStrategy {
    /// Uniform pick
    #[default]
    Random,
    /// Rating and favourite-tag weighted pick ("Smart" in the UI)
    Weighted,
    /// Popularity weighted pick
    Trending,
}

impl SelectionStrategy {
    pub const VALID_VALUES: [&'static str; 3] = ["random", "weighted", "trending"];

    pub fn description(&self) -> &'static str {
        match self {
            SelectionStrategy::Random => "Random: every candidate equally likely",
            SelectionStrategy::Weighted => "Smart: favours high ratings and favourite tags",
            SelectionStrategy::Trending => "Trending: favours popular content",
        }
    }
}

impl fmt::Display for SelectionStrategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SelectionStrategy::Random => write!(f, "random"),
            SelectionStrategy::Weighted => write!(f, "weighted"),
            SelectionStrategy::Trending => write!(f, "trending"),
        }
    }
}

impl FromStr for SelectionStrategy {
    type Err = DomainError;

    /// Accepts "smart" as the UI name of the weighted strategy
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "random" => Ok(SelectionStrategy::Random),
            "weighted" | "smart" => Ok(SelectionStrategy::Weighted),
            "trending" => Ok(SelectionStrategy::Trending),
            _ => Err(DomainError::invalid_preference("strategy", s)),
        }
    }
}

/// Subscription tier of the viewer, used by the premium gate
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SubscriptionTier {
    Free,
    Premium,
    PremiumUnrestricted,
}

impl SubscriptionTier {
    pub const VALID_VALUES: [&'static str; 3] = ["free", "premium", "premium_unrestricted"];

    pub fn includes_premium(&self) -> bool {
        !matches!(self, SubscriptionTier::Free)
    }
}

impl fmt::Display for SubscriptionTier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SubscriptionTier::Free => write!(f, "free"),
            SubscriptionTier::Premium => write!(f, "premium"),
            SubscriptionTier::PremiumUnrestricted => write!(f, "premium_unrestricted"),
        }
    }
}

impl FromStr for SubscriptionTier {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().replace('-', "_").as_str() {
            "free" => Ok(SubscriptionTier::Free),
            "premium" => Ok(SubscriptionTier::Premium),
            "premium_unrestricted" => Ok(SubscriptionTier::PremiumUnrestricted),
            _ => Err(DomainError::invalid_preference("subscription", s)),
        }
    }
}

/// Validated viewer preferences (Value Object)
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Preferences {
    pub preferred_duration: DurationPreference,
    pub intensity: IntensityPreference,
    pub blocked_tags: BTreeSet<String>,
    pub favorite_tags: BTreeSet<String>,
    pub strategy: SelectionStrategy,
    /// When non-empty, items must carry at least one of these tags
    pub moods: BTreeSet<String>,
    /// Items rated below this are excluded; unrated items count as 0
    pub min_rating: Option<f64>,
}

impl Preferences {
    pub fn with_duration(mut self, duration: DurationPreference) -> Self {
        self.preferred_duration = duration;
        self
    }

    pub fn with_intensity(mut self, intensity: IntensityPreference) -> Self {
        self.intensity = intensity;
        self
    }

    pub fn with_strategy(mut self, strategy: SelectionStrategy) -> Self {
        self.strategy = strategy;
        self
    }

    /// Tag builders normalize (see [`normalize_tag`]) and drop blank tags
    pub fn block_tags<I, S>(mut self, tags: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.blocked_tags.extend(normalize_tags(tags));
        self
    }

    pub fn favor_tags<I, S>(mut self, tags: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.favorite_tags.extend(normalize_tags(tags));
        self
    }

    pub fn with_moods<I, S>(mut self, moods: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.moods.extend(normalize_tags(moods));
        self
    }

    /// Set the minimum rating, rejecting values outside [0, 5]
    pub fn with_min_rating(mut self, min_rating: f64) -> Result<Self, DomainError> {
        if !(0.0..=5.0).contains(&min_rating) {
            return Err(DomainError::invalid_preference(
                "min_rating",
                min_rating.to_string(),
            ));
        }
        self.min_rating = Some(min_rating);
        Ok(self)
    }
}

/// Preferences as received from an untyped source (config file, form, query)
///
/// Every value outside its enumerated set is an
/// [`DomainError::InvalidPreference`]; nothing is silently coerced.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RawPreferences {
    #[serde(alias = "duration", skip_serializing_if = "Option::is_none")]
    pub preferred_duration: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub intensity: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub strategy: Option<String>,
    pub blocked_tags: Vec<String>,
    pub favorite_tags: Vec<String>,
    pub moods: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub min_rating: Option<f64>,
}

impl RawPreferences {
    /// Parse strictly, failing on the first invalid value
    pub fn parse(&self) -> Result<Preferences, DomainError> {
        let (prefs, errors) = self.parse_all();
        match errors.into_iter().next() {
            Some(error) => Err(error),
            None => Ok(prefs),
        }
    }

    /// Parse every field, keeping the default for each invalid one.
    ///
    /// Returns the preferences together with one error per invalid field.
    pub fn parse_all(&self) -> (Preferences, Vec<DomainError>) {
        let mut errors = Vec::new();
        let mut prefs = Preferences::default()
            .block_tags(&self.blocked_tags)
            .favor_tags(&self.favorite_tags)
            .with_moods(&self.moods);

        parse_field(&self.preferred_duration, &mut prefs.preferred_duration, &mut errors);
        parse_field(&self.intensity, &mut prefs.intensity, &mut errors);
        parse_field(&self.strategy, &mut prefs.strategy, &mut errors);

        if let Some(min_rating) = self.min_rating {
            match prefs.clone().with_min_rating(min_rating) {
                Ok(with_rating) => prefs = with_rating,
                Err(e) => errors.push(e),
            }
        }

        (prefs, errors)
    }
}

fn parse_field<T>(value: &Option<String>, slot: &mut T, errors: &mut Vec<DomainError>)
where
    T: FromStr<Err = DomainError>,
{
    if let Some(value) = value {
        match value.parse() {
            Ok(parsed) => *slot = parsed,
            Err(e) => errors.push(e),
        }
    }
}

/// Tags are compared case-insensitively and without surrounding whitespace.
pub fn normalize_tag(tag: &str) -> String {
    tag.trim().to_lowercase()
}

fn normalize_tags<I, S>(tags: I) -> impl Iterator<Item = String>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    tags.into_iter()
        .map(|t| normalize_tag(t.as_ref()))
        .filter(|t| !t.is_empty())
}
