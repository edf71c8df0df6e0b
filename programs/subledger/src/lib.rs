pub mod constants;
pub mod error;
pub mod events;
pub mod expiry;
pub mod fees;
pub mod instructions;
pub mod ledger;
pub mod payments;
pub mod state;

#[cfg(test)]
mod test_utils;

use anchor_lang::prelude::*;

pub use constants::*;
pub use instructions::*;
pub use state::*;

declare_id!("9oy53mu9UB8RENPSrhvWU9ayGJMLsZ5YWJsW7FPVPSsb");

#[program]
pub mod subledger {
    use super::*;

    // Platform administration

    pub fn initialize(
        ctx: Context<Initialize>,
        fee_bps: u16,
        grace_period: i64,
        history_limit: u16,
    ) -> Result<()> {
        ctx.accounts
            .initialize(fee_bps, grace_period, history_limit, &ctx.bumps)
    }

    pub fn update_platform_config(ctx: Context<AdminConfig>, update: ConfigUpdate) -> Result<()> {
        ctx.accounts.update_platform_config(update)
    }

    pub fn set_paused(ctx: Context<AdminConfig>, paused: bool) -> Result<()> {
        ctx.accounts.set_paused(paused)
    }

    pub fn set_creator_status(
        ctx: Context<SetCreatorStatus>,
        wallet: Pubkey,
        is_active: bool,
    ) -> Result<()> {
        ctx.accounts.set_creator_status(wallet, is_active)
    }

    pub fn whitelist_token(ctx: Context<WhitelistToken>) -> Result<()> {
        ctx.accounts.whitelist_token()
    }

    pub fn remove_token(ctx: Context<RemoveToken>, mint: Pubkey) -> Result<()> {
        ctx.accounts.remove_token(mint)
    }

    pub fn propose_authority(ctx: Context<AdminConfig>, new_authority: Pubkey) -> Result<()> {
        ctx.accounts.propose_authority(new_authority)
    }

    pub fn accept_authority(ctx: Context<AcceptAuthority>) -> Result<()> {
        ctx.accounts.accept_authority()
    }

    pub fn withdraw_platform_fees(ctx: Context<WithdrawPlatformFees>, amount: u64) -> Result<()> {
        ctx.accounts.withdraw_platform_fees(amount)
    }

    pub fn withdraw_platform_token_fees(
        ctx: Context<WithdrawPlatformTokenFees>,
        amount: u64,
    ) -> Result<()> {
        ctx.accounts.withdraw_platform_token_fees(amount)
    }

    // Creators and plans

    pub fn register_creator(
        ctx: Context<RegisterCreator>,
        name: String,
        description: String,
    ) -> Result<()> {
        ctx.accounts
            .register_creator(name, description, &ctx.bumps)
    }

    pub fn upsert_plan(
        ctx: Context<ManagePlans>,
        creator_wallet: Pubkey,
        tier_index: u8,
        plan: SubscriptionPlan,
    ) -> Result<()> {
        ctx.accounts.upsert_plan(creator_wallet, tier_index, plan)
    }

    pub fn toggle_plan_status(
        ctx: Context<ManagePlans>,
        creator_wallet: Pubkey,
        tier_index: u8,
    ) -> Result<()> {
        ctx.accounts.toggle_plan_status(creator_wallet, tier_index)
    }

    // Subscriptions

    pub fn subscribe(ctx: Context<Subscribe>, tier_index: u8, payment: u64) -> Result<()> {
        ctx.accounts.subscribe(tier_index, payment, &ctx.bumps)
    }

    pub fn subscribe_with_token(ctx: Context<SubscribeWithToken>, tier_index: u8) -> Result<()> {
        ctx.accounts.subscribe_with_token(tier_index, &ctx.bumps)
    }

    pub fn suspend_subscription(ctx: Context<ManageSubscription>, creator: Pubkey) -> Result<()> {
        ctx.accounts.suspend_subscription(creator)
    }

    pub fn reactivate_subscription(
        ctx: Context<ManageSubscription>,
        creator: Pubkey,
    ) -> Result<()> {
        ctx.accounts.reactivate_subscription(creator)
    }

    pub fn cancel_suspended_subscription(
        ctx: Context<ManageSubscription>,
        creator: Pubkey,
    ) -> Result<()> {
        ctx.accounts.cancel_suspended_subscription(creator)
    }

    pub fn enable_auto_renewal(
        ctx: Context<ConfigureAutoRenewal>,
        creator: Pubkey,
        mint: Pubkey,
    ) -> Result<()> {
        ctx.accounts.enable_auto_renewal(creator, mint)
    }

    pub fn disable_auto_renewal(ctx: Context<ConfigureAutoRenewal>, creator: Pubkey) -> Result<()> {
        ctx.accounts.disable_auto_renewal(creator)
    }

    pub fn process_renewals<'info>(
        ctx: Context<'_, '_, 'info, 'info, ProcessRenewals<'info>>,
    ) -> Result<Vec<RenewalOutcome>> {
        ProcessRenewals::process_renewals(ctx)
    }

    // Queries (results are returned through return data)

    pub fn is_active(ctx: Context<SubscriptionQuery>, _creator: Pubkey, _user: Pubkey) -> Result<bool> {
        ctx.accounts.is_active()
    }

    pub fn get_expiry(
        ctx: Context<SubscriptionQuery>,
        _creator: Pubkey,
        _user: Pubkey,
    ) -> Result<ExpiryInfo> {
        ctx.accounts.get_expiry()
    }

    pub fn get_plan(
        ctx: Context<PlanQuery>,
        _creator: Pubkey,
        tier_index: u8,
    ) -> Result<SubscriptionPlan> {
        ctx.accounts.get_plan(tier_index)
    }

    pub fn get_tier_count(ctx: Context<PlanQuery>, _creator: Pubkey) -> Result<u8> {
        ctx.accounts.get_tier_count()
    }

    pub fn get_history(
        ctx: Context<UserQuery>,
        _user: Pubkey,
        start: u16,
        limit: u16,
    ) -> Result<Vec<SubscriptionRecord>> {
        ctx.accounts.get_history(start, limit)
    }

    pub fn get_active_subscriptions(ctx: Context<UserQuery>, _user: Pubkey) -> Result<Vec<Pubkey>> {
        ctx.accounts.get_active_subscriptions()
    }

    pub fn get_analytics<'info>(
        ctx: Context<'_, '_, 'info, 'info, AnalyticsQuery<'info>>,
        creator: Pubkey,
    ) -> Result<AnalyticsSummary> {
        ctx.accounts.get_analytics(creator, ctx.remaining_accounts)
    }
}
