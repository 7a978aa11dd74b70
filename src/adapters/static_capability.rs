//! Fixed-answer platform capability adapter

use std::collections::HashSet;

use crate::domain::DEFAULT_FEATURE_ID;
use crate::ports::FeatureCapability;

/// Reports a fixed set of features as supported.
#[derive(Debug, Clone, Default)]
pub struct StaticCapability {
    features: HashSet<String>,
}

impl StaticCapability {
    pub fn new<I, S>(features: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            features: features.into_iter().map(Into::into).collect(),
        }
    }

    /// Supports only the FM radio feature
    pub fn fm_radio() -> Self {
        Self::new([DEFAULT_FEATURE_ID])
    }

    /// Supports nothing
    pub fn none() -> Self {
        Self::default()
    }
}

impl FeatureCapability for StaticCapability {
    fn is_feature_supported(&self, feature: &str) -> bool {
        let supported = self.features.contains(feature);
        if !supported {
            log::info!("feature '{feature}' reported as unsupported");
        }
        supported
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fm_radio_supports_only_the_default_feature() {
        let cap = StaticCapability::fm_radio();
        assert!(cap.is_feature_supported(DEFAULT_FEATURE_ID));
        assert!(!cap.is_feature_supported("http://tizen.org/feature/camera"));
    }

    #[test]
    fn none_supports_nothing() {
        assert!(!StaticCapability::none().is_feature_supported(DEFAULT_FEATURE_ID));
    }
}
