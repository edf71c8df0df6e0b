use crate::{constants::*, error::ErrorCode, expiry::is_access_active, state::*};
use anchor_lang::prelude::*;

/// Read an account that may not have been created yet.
fn load_optional<T: AccountDeserialize + Owner>(info: &AccountInfo) -> Result<Option<T>> {
    if info.data_is_empty() {
        return Ok(None);
    }
    require_keys_eq!(*info.owner, T::owner(), ErrorCode::InvalidAddress);
    let data = info.try_borrow_data()?;
    Ok(Some(T::try_deserialize(&mut &data[..])?))
}

#[derive(AnchorSerialize, AnchorDeserialize, Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ExpiryInfo {
    pub expiry: i64,
    pub suspended_expiry: i64,
}

#[derive(AnchorSerialize, AnchorDeserialize, Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct AnalyticsSummary {
    pub native_earnings: u128,
    pub token_earnings: u128,
    pub total_subscribers: u64,
    /// Among the subscription accounts passed in, those with access right now.
    pub active_subscribers: u64,
}

#[derive(Accounts)]
#[instruction(creator: Pubkey, user: Pubkey)]
pub struct SubscriptionQuery<'info> {
    #[account(
        seeds = [PLATFORM_CONFIG_SEED.as_bytes()],
        bump = platform_config.bump
    )]
    pub platform_config: Account<'info, PlatformConfig>,

    /// CHECK: may be uninitialized; deserialized in the handler
    #[account(
        seeds = [SUBSCRIPTION_SEED.as_bytes(), creator.as_ref(), user.as_ref()],
        bump
    )]
    pub subscription: UncheckedAccount<'info>,
}

impl<'info> SubscriptionQuery<'info> {
    pub fn is_active(&self) -> Result<bool> {
        let now = Clock::get()?.unix_timestamp;
        Ok(load_optional::<Subscription>(&self.subscription)?
            .map(|s| is_access_active(s.expiry, now, self.platform_config.grace_period))
            .unwrap_or(false))
    }

    pub fn get_expiry(&self) -> Result<ExpiryInfo> {
        Ok(load_optional::<Subscription>(&self.subscription)?
            .map(|s| ExpiryInfo {
                expiry: s.expiry,
                suspended_expiry: s.suspended_expiry,
            })
            .unwrap_or_default())
    }
}

#[derive(Accounts)]
#[instruction(creator: Pubkey)]
pub struct PlanQuery<'info> {
    #[account(
        seeds = [TIER_REGISTRY_SEED.as_bytes(), creator.as_ref()],
        bump = tier_registry.bump
    )]
    pub tier_registry: Account<'info, TierRegistry>,
}

impl<'info> PlanQuery<'info> {
    pub fn get_plan(&self, tier_index: u8) -> Result<SubscriptionPlan> {
        Ok(self.tier_registry.plan(tier_index)?.clone())
    }

    pub fn get_tier_count(&self) -> Result<u8> {
        Ok(self.tier_registry.tier_count())
    }
}

#[derive(Accounts)]
#[instruction(user: Pubkey)]
pub struct UserQuery<'info> {
    /// CHECK: may be uninitialized; deserialized in the handler
    #[account(
        seeds = [HISTORY_SEED.as_bytes(), user.as_ref()],
        bump
    )]
    pub history: UncheckedAccount<'info>,

    /// CHECK: may be uninitialized; deserialized in the handler
    #[account(
        seeds = [ACTIVE_SUBSCRIPTIONS_SEED.as_bytes(), user.as_ref()],
        bump
    )]
    pub active_subscriptions: UncheckedAccount<'info>,
}

impl<'info> UserQuery<'info> {
    /// One page of history, oldest first. Pages are capped so the result fits
    /// in return data.
    pub fn get_history(&self, start: u16, limit: u16) -> Result<Vec<SubscriptionRecord>> {
        require!(
            limit > 0 && limit <= MAX_HISTORY_PAGE,
            ErrorCode::InvalidQueryRange
        );
        Ok(load_optional::<SubscriptionHistory>(&self.history)?
            .map(|h| h.page(start, limit))
            .unwrap_or_default())
    }

    pub fn get_active_subscriptions(&self) -> Result<Vec<Pubkey>> {
        Ok(load_optional::<ActiveSubscriptions>(&self.active_subscriptions)?
            .map(|a| a.creators)
            .unwrap_or_default())
    }
}

#[derive(Accounts)]
#[instruction(creator: Pubkey)]
pub struct AnalyticsQuery<'info> {
    #[account(
        seeds = [PLATFORM_CONFIG_SEED.as_bytes()],
        bump = platform_config.bump
    )]
    pub platform_config: Account<'info, PlatformConfig>,

    #[account(
        seeds = [ANALYTICS_SEED.as_bytes(), creator.as_ref()],
        bump = analytics.bump
    )]
    pub analytics: Account<'info, CreatorAnalytics>,
}

/// Count distinct subscriptions to `creator` with access at `now`.
pub fn count_active<'a>(
    subscriptions: impl IntoIterator<Item = (Pubkey, &'a Subscription)>,
    creator: &Pubkey,
    now: i64,
    grace_period: i64,
) -> u64 {
    let mut counted: Vec<Pubkey> = Vec::new();
    for (key, subscription) in subscriptions {
        if subscription.creator != *creator || counted.contains(&key) {
            continue;
        }
        if is_access_active(subscription.expiry, now, grace_period) {
            counted.push(key);
        }
    }
    counted.len() as u64
}

impl<'info> AnalyticsQuery<'info> {
    /// Pass the creator's `Subscription` accounts as remaining accounts to
    /// have the active count derived; other accounts are ignored.
    pub fn get_analytics(
        &self,
        creator: Pubkey,
        remaining_accounts: &[AccountInfo<'info>],
    ) -> Result<AnalyticsSummary> {
        let now = Clock::get()?.unix_timestamp;

        let mut subscriptions = Vec::new();
        for info in remaining_accounts {
            if let Ok(Some(subscription)) = load_optional::<Subscription>(info) {
                subscriptions.push((info.key(), subscription));
            }
        }
        let active_subscribers = count_active(
            subscriptions.iter().map(|(key, s)| (*key, s)),
            &creator,
            now,
            self.platform_config.grace_period,
        );

        let analytics = &self.analytics;
        msg!(
            "Creator {}: {} active of {} total subscribers",
            creator,
            active_subscribers,
            analytics.total_subscribers
        );

        Ok(AnalyticsSummary {
            native_earnings: analytics.native_earnings,
            token_earnings: analytics.token_earnings,
            total_subscribers: analytics.total_subscribers,
            active_subscribers,
        })
    }
}
