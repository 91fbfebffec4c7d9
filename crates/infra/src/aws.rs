//! Shared AWS SDK configuration.

use aws_config::BehaviorVersion;
use aws_sdk_sqs::config::Region;

/// Load the SDK configuration once; queue and topic clients are built from it.
///
/// Credentials come from the default provider chain (environment, profile,
/// container/instance role).
pub async fn load_sdk_config(region: impl Into<String>) -> aws_config::SdkConfig {
    aws_config::defaults(BehaviorVersion::latest())
        .region(Region::new(region.into()))
        .load()
        .await
}
