use anchor_lang::prelude::*;

// Global seeds
#[constant]
pub const PLATFORM_CONFIG_SEED: &str = "platform_config";
pub const TREASURY_SEED: &str = "treasury";
pub const DELEGATE_SEED: &str = "delegate";

// Creator related seeds
pub const CREATOR_SEED: &str = "creator";
pub const TIER_REGISTRY_SEED: &str = "tiers";
pub const ANALYTICS_SEED: &str = "analytics";

// User related seeds
pub const SUBSCRIPTION_SEED: &str = "subscription";
pub const HISTORY_SEED: &str = "history";
pub const ACTIVE_SUBSCRIPTIONS_SEED: &str = "active";

// Maximum string lengths
pub const MAX_NAME_LENGTH: usize = 64;
pub const MAX_DESCRIPTION_LENGTH: usize = 200;
pub const MAX_PLAN_DESCRIPTION_LENGTH: usize = 128;
pub const MAX_PLAN_BENEFITS_LENGTH: usize = 256;

// Time
pub const SECONDS_PER_DAY: u64 = 86_400;
pub const MIN_PLAN_DURATION: u64 = SECONDS_PER_DAY;
pub const MAX_PLAN_DURATION: u64 = 365 * SECONDS_PER_DAY;
pub const DEFAULT_GRACE_PERIOD: i64 = 7 * SECONDS_PER_DAY as i64;
pub const MAX_GRACE_PERIOD: i64 = 30 * SECONDS_PER_DAY as i64;
/// Auto-renewal may run this long before the current expiry.
pub const RENEWAL_LEAD_TIME: i64 = SECONDS_PER_DAY as i64;

// Fees
pub const FEE_BASIS_POINTS_DIVISOR: u128 = 10_000;
pub const DEFAULT_PLATFORM_FEE_BPS: u16 = 500; // 5%
pub const MAX_PLATFORM_FEE_BPS: u16 = 1000; // 10%

// Capacity bounds
pub const MAX_PLANS_PER_CREATOR: usize = 10;
pub const MAX_HISTORY_LENGTH: usize = 20;
pub const DEFAULT_HISTORY_LIMIT: u16 = MAX_HISTORY_LENGTH as u16;
pub const MAX_ACTIVE_SUBSCRIPTIONS: usize = 24;
pub const MAX_WHITELISTED_TOKENS: usize = 16;

// Query pagination (return data is capped at 1024 bytes)
pub const MAX_HISTORY_PAGE: u16 = 8;

// Batch renewal: accounts supplied per (creator, user) pair
pub const RENEWAL_ACCOUNTS_PER_ITEM: usize = 10;
