//! Platform capability port

/// Answers whether a platform feature is available.
///
/// Implementations should return `false` when the query itself fails.
pub trait FeatureCapability: Send + Sync {
    fn is_feature_supported(&self, feature: &str) -> bool;
}
