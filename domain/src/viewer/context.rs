//! Viewer context
//!
//! Everything the engine needs to know about the person asking for content,
//! passed explicitly into every call.

use crate::viewer::preferences::{Preferences, SubscriptionTier};
use serde::{Deserialize, Serialize};

/// Per-request / per-session input to the engine (Value Object)
///
/// `unrestricted_mode_enabled = false` guarantees that no restricted item
/// is ever eligible or selected.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct ViewerContext {
    pub unrestricted_mode_enabled: bool,
    pub preferences: Preferences,
    /// `None` leaves premium-only items visible (no gate applied)
    pub subscription: Option<SubscriptionTier>,
    /// Incognito viewers are never queued for persistence
    pub incognito: bool,
}

impl ViewerContext {
    pub fn new(preferences: Preferences) -> Self {
        Self {
            preferences,
            ..Default::default()
        }
    }

    pub fn with_unrestricted_mode(mut self, enabled: bool) -> Self {
        self.unrestricted_mode_enabled = enabled;
        self
    }

    pub fn with_subscription(mut self, tier: SubscriptionTier) -> Self {
        self.subscription = Some(tier);
        self
    }

    pub fn incognito(mut self, incognito: bool) -> Self {
        self.incognito = incognito;
        self
    }

    /// Whether premium-only items may be shown
    pub fn premium_allowed(&self) -> bool {
        self.subscription.is_none_or(|tier| tier.includes_premium())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_restricted_mode() {
        let ctx = ViewerContext::default();
        assert!(!ctx.unrestricted_mode_enabled);
        assert!(!ctx.incognito);
        assert!(ctx.premium_allowed());
    }

    #[test]
    fn test_premium_gate() {
        let free = ViewerContext::default().with_subscription(SubscriptionTier::Free);
        assert!(!free.premium_allowed());
        let premium = ViewerContext::default().with_subscription(SubscriptionTier::Premium);
        assert!(premium.premium_allowed());
    }
}
