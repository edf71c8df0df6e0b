pub mod active_subscriptions;
pub mod creator;
pub mod creator_analytics;
pub mod platform_config;
pub mod subscription;
pub mod subscription_history;
pub mod tier_registry;

pub use active_subscriptions::*;
pub use creator::*;
pub use creator_analytics::*;
pub use platform_config::*;
pub use subscription::*;
pub use subscription_history::*;
pub use tier_registry::*;
