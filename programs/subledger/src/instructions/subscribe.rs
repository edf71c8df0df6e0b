use crate::{
    constants::*,
    error::ErrorCode,
    events::Subscribed,
    ledger::{self, Charge, LedgerAccounts, Settlement, Terms},
    payments::NativePayments,
    state::*,
};
use anchor_lang::prelude::*;

/// Fill in user-scoped accounts created by `init_if_needed` on this call.
pub(crate) fn open_user_accounts(
    subscription: &mut Account<'_, Subscription>,
    history: &mut Account<'_, SubscriptionHistory>,
    active: &mut Account<'_, ActiveSubscriptions>,
    creator: Pubkey,
    user: Pubkey,
    bumps: (u8, u8, u8),
) {
    if subscription.user == Pubkey::default() {
        subscription.set_inner(Subscription::new(creator, user, bumps.0));
    }
    if history.user == Pubkey::default() {
        history.set_inner(SubscriptionHistory::new(user, bumps.1));
    }
    if active.user == Pubkey::default() {
        active.set_inner(ActiveSubscriptions::new(user, bumps.2));
    }
}

pub(crate) fn emit_subscribed(settlement: &Settlement, renewal: bool, excess_refunded: u64) {
    let record = &settlement.record;
    msg!(
        "User {} paid {} to creator {} for tier {} (creator {}, platform {}), access until {}",
        record.user,
        record.amount,
        record.creator,
        record.tier_index,
        settlement.distribution.creator_share,
        settlement.distribution.platform_fee,
        record.end_time
    );
    emit!(Subscribed {
        creator: record.creator,
        user: record.user,
        tier_index: record.tier_index,
        amount: record.amount,
        creator_share: settlement.distribution.creator_share,
        platform_fee: settlement.distribution.platform_fee,
        instrument: record.instrument,
        expiry: record.end_time,
        first_payment: settlement.first_payment,
        renewal,
        excess_refunded,
    });
}

#[derive(Accounts)]
pub struct Subscribe<'info> {
    #[account(mut)]
    pub user: Signer<'info>,

    #[account(
        seeds = [PLATFORM_CONFIG_SEED.as_bytes()],
        bump = platform_config.bump
    )]
    pub platform_config: Box<Account<'info, PlatformConfig>>,

    #[account(
        seeds = [CREATOR_SEED.as_bytes(), creator.wallet.as_ref()],
        bump = creator.bump,
        constraint = creator.is_active @ ErrorCode::InvalidCreator,
        constraint = creator.wallet != user.key() @ ErrorCode::CannotSubscribeToSelf
    )]
    pub creator: Box<Account<'info, Creator>>,

    /// Receives the creator share
    #[account(
        mut,
        address = creator.wallet @ ErrorCode::InvalidCreator
    )]
    pub creator_wallet: SystemAccount<'info>,

    #[account(
        seeds = [TIER_REGISTRY_SEED.as_bytes(), creator.wallet.as_ref()],
        bump = tier_registry.bump
    )]
    pub tier_registry: Box<Account<'info, TierRegistry>>,

    #[account(
        mut,
        seeds = [ANALYTICS_SEED.as_bytes(), creator.wallet.as_ref()],
        bump = analytics.bump
    )]
    pub analytics: Box<Account<'info, CreatorAnalytics>>,

    #[account(
        init_if_needed,
        payer = user,
        space = 8 + Subscription::INIT_SPACE,
        seeds = [SUBSCRIPTION_SEED.as_bytes(), creator.wallet.as_ref(), user.key().as_ref()],
        bump
    )]
    pub subscription: Box<Account<'info, Subscription>>,

    #[account(
        init_if_needed,
        payer = user,
        space = 8 + SubscriptionHistory::INIT_SPACE,
        seeds = [HISTORY_SEED.as_bytes(), user.key().as_ref()],
        bump
    )]
    pub history: Box<Account<'info, SubscriptionHistory>>,

    #[account(
        init_if_needed,
        payer = user,
        space = 8 + ActiveSubscriptions::INIT_SPACE,
        seeds = [ACTIVE_SUBSCRIPTIONS_SEED.as_bytes(), user.key().as_ref()],
        bump
    )]
    pub active_subscriptions: Box<Account<'info, ActiveSubscriptions>>,

    #[account(
        mut,
        seeds = [TREASURY_SEED.as_bytes()],
        bump = platform_config.treasury_bump
    )]
    pub treasury: SystemAccount<'info>,

    pub system_program: Program<'info, System>,
}

impl<'info> Subscribe<'info> {
    /// `payment` is the most the user is willing to pay. Only the plan price
    /// is taken.
    pub fn subscribe(&mut self, tier_index: u8, payment: u64, bumps: &SubscribeBumps) -> Result<()> {
        self.platform_config.require_not_paused()?;
        let now = Clock::get()?.unix_timestamp;

        let charge = Charge::native(tier_index, self.tier_registry.active_plan(tier_index)?);
        require!(payment >= charge.price, ErrorCode::InsufficientPayment);
        let excess_refunded = payment - charge.price;

        open_user_accounts(
            &mut self.subscription,
            &mut self.history,
            &mut self.active_subscriptions,
            self.creator.wallet,
            self.user.key(),
            (bumps.subscription, bumps.history, bumps.active_subscriptions),
        );

        let mut payments = NativePayments {
            payer: self.user.to_account_info(),
            creator: self.creator_wallet.to_account_info(),
            treasury: self.treasury.to_account_info(),
            system_program: self.system_program.to_account_info(),
            subscription: self.subscription.to_account_info(),
        };
        let terms = Terms::from(&**self.platform_config);
        let mut accounts = LedgerAccounts {
            subscription: &mut self.subscription,
            analytics: &mut self.analytics,
            history: &mut self.history,
            active: &mut self.active_subscriptions,
        };
        let settlement = ledger::settle(&mut accounts, &mut payments, &charge, &terms, now)?;

        emit_subscribed(&settlement, false, excess_refunded);

        Ok(())
    }
}
