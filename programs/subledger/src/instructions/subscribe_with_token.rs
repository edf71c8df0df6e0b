use super::subscribe::{emit_subscribed, open_user_accounts};
use crate::{
    constants::*,
    error::ErrorCode,
    ledger::{self, Charge, LedgerAccounts, Terms},
    payments::{check_token_source, TokenPayments},
    state::*,
};
use anchor_lang::prelude::*;
use anchor_spl::{
    associated_token::AssociatedToken,
    token::{Mint, Token, TokenAccount},
};

#[derive(Accounts)]
pub struct SubscribeWithToken<'info> {
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
        constraint = platform_config.is_whitelisted(&mint.key()) @ ErrorCode::TokenNotSupported
    )]
    pub mint: Box<Account<'info, Mint>>,

    // Must have approved `delegate` for at least the plan price
    #[account(mut)]
    pub user_token_account: Box<Account<'info, TokenAccount>>,

    #[account(
        mut,
        constraint = creator_token_account.mint == mint.key() @ ErrorCode::InvalidTokenAccount,
        constraint = creator_token_account.owner == creator.wallet @ ErrorCode::InvalidTokenAccount
    )]
    pub creator_token_account: Box<Account<'info, TokenAccount>>,

    #[account(
        seeds = [TREASURY_SEED.as_bytes()],
        bump = platform_config.treasury_bump
    )]
    pub treasury: SystemAccount<'info>,

    #[account(
        mut,
        associated_token::mint = mint,
        associated_token::authority = treasury,
    )]
    pub treasury_token_account: Box<Account<'info, TokenAccount>>,

    /// CHECK: signing-only PDA; users approve it as delegate on their token account
    #[account(
        seeds = [DELEGATE_SEED.as_bytes()],
        bump
    )]
    pub delegate: UncheckedAccount<'info>,

    pub token_program: Program<'info, Token>,
    pub associated_token_program: Program<'info, AssociatedToken>,
    pub system_program: Program<'info, System>,
}

impl<'info> SubscribeWithToken<'info> {
    pub fn subscribe_with_token(&mut self, tier_index: u8, bumps: &SubscribeWithTokenBumps) -> Result<()> {
        self.platform_config.require_not_paused()?;
        let now = Clock::get()?.unix_timestamp;

        let mint = self.mint.key();
        let charge = Charge::token(tier_index, self.tier_registry.active_plan(tier_index)?, mint);
        check_token_source(
            &self.user_token_account,
            &self.user.key(),
            &mint,
            &self.delegate.key(),
            charge.price,
        )?;

        open_user_accounts(
            &mut self.subscription,
            &mut self.history,
            &mut self.active_subscriptions,
            self.creator.wallet,
            self.user.key(),
            (bumps.subscription, bumps.history, bumps.active_subscriptions),
        );

        let mut payments = TokenPayments {
            source: self.user_token_account.to_account_info(),
            mint: self.mint.to_account_info(),
            creator_account: self.creator_token_account.to_account_info(),
            treasury_account: self.treasury_token_account.to_account_info(),
            delegate: self.delegate.to_account_info(),
            token_program: self.token_program.to_account_info(),
            subscription: self.subscription.to_account_info(),
            decimals: self.mint.decimals,
            delegate_bump: bumps.delegate,
        };
        let terms = Terms::from(&**self.platform_config);
        let mut accounts = LedgerAccounts {
            subscription: &mut self.subscription,
            analytics: &mut self.analytics,
            history: &mut self.history,
            active: &mut self.active_subscriptions,
        };
        let settlement = ledger::settle(&mut accounts, &mut payments, &charge, &terms, now)?;

        emit_subscribed(&settlement, false, 0);

        Ok(())
    }
}
