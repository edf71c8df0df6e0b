use super::subscribe::emit_subscribed;
use crate::{
    constants::*,
    error::ErrorCode,
    events::RenewalSkipped,
    ledger::{self, Charge, LedgerAccounts, Settlement, Terms},
    payments::{check_token_destination, check_token_source, TokenPayments},
    state::*,
};
use anchor_lang::{prelude::*, AccountsExit};
use anchor_spl::token::{Mint, Token, TokenAccount};

/// Batch auto-renewal, driven by the platform authority.
///
/// Remaining accounts come in groups of `RENEWAL_ACCOUNTS_PER_ITEM`, one group
/// per subscription:
///
/// 0. subscription (writable)
/// 1. creator
/// 2. tier registry
/// 3. creator analytics (writable)
/// 4. subscription history (writable)
/// 5. active subscriptions (writable)
/// 6. renewal mint
/// 7. user token account (writable)
/// 8. creator token account (writable)
/// 9. treasury token account (writable)
#[derive(Accounts)]
pub struct ProcessRenewals<'info> {
    pub authority: Signer<'info>,

    #[account(
        seeds = [PLATFORM_CONFIG_SEED.as_bytes()],
        bump = platform_config.bump,
        constraint = platform_config.authority == authority.key() @ ErrorCode::NotOwner
    )]
    pub platform_config: Account<'info, PlatformConfig>,

    #[account(
        seeds = [TREASURY_SEED.as_bytes()],
        bump = platform_config.treasury_bump
    )]
    pub treasury: SystemAccount<'info>,

    /// CHECK: signing-only PDA approved by users as delegate
    #[account(
        seeds = [DELEGATE_SEED.as_bytes()],
        bump
    )]
    pub delegate: UncheckedAccount<'info>,

    pub token_program: Program<'info, Token>,
}

#[derive(AnchorSerialize, AnchorDeserialize, Clone, Debug, PartialEq, Eq)]
pub struct RenewalOutcome {
    pub subscription: Pubkey,
    pub renewed: bool,
    /// 0 when renewed, otherwise the code of the error that skipped the item.
    pub error_code: u32,
}

pub fn error_code_of(err: &Error) -> u32 {
    match err {
        Error::AnchorError(e) => e.error_code_number,
        Error::ProgramError(e) => {
            u32::try_from(u64::from(e.program_error.clone())).unwrap_or(u32::MAX)
        }
    }
}

/// Checks that do not need token accounts. Returns what the renewal charges.
pub fn renewal_charge(
    subscription: &Subscription,
    creator: &Creator,
    registry: &TierRegistry,
    config: &PlatformConfig,
    now: i64,
) -> Result<Charge> {
    subscription.require_idle()?;
    require!(subscription.auto_renewal, ErrorCode::AutoRenewalDisabled);
    require!(!subscription.is_suspended(), ErrorCode::AlreadySuspended);
    require!(creator.is_active, ErrorCode::InvalidCreator);

    let tier_index = subscription
        .last_tier_index
        .ok_or(ErrorCode::NoActiveSubscription)?;
    let mint = subscription
        .renewal_mint
        .ok_or(ErrorCode::AutoRenewalDisabled)?;
    config.require_whitelisted(&mint)?;
    require!(subscription.is_renewal_due(now), ErrorCode::RenewalNotDue);

    let plan = registry.active_plan(tier_index)?;
    Ok(Charge::token(tier_index, plan, mint))
}

/// Renew each subscription in order. A failing item is logged, emitted as
/// `RenewalSkipped` and reported in its outcome; the rest of the batch still
/// runs.
pub fn renew_each<G>(
    items: impl IntoIterator<Item = (Pubkey, G)>,
    mut renew: impl FnMut(G) -> Result<Settlement>,
) -> Vec<RenewalOutcome> {
    items
        .into_iter()
        .map(|(subscription, item)| match renew(item) {
            Ok(settlement) => {
                emit_subscribed(&settlement, true, 0);
                RenewalOutcome {
                    subscription,
                    renewed: true,
                    error_code: 0,
                }
            }
            Err(err) => {
                let error_code = error_code_of(&err);
                msg!("Renewal of {} skipped: {}", subscription, err);
                emit!(RenewalSkipped {
                    subscription,
                    error_code,
                });
                RenewalOutcome {
                    subscription,
                    renewed: false,
                    error_code,
                }
            }
        })
        .collect()
}

/// Accounts a renewal writes to must arrive writable, or the write-back
/// aborts the whole batch.
pub fn require_writable(infos: &[&AccountInfo]) -> Result<()> {
    for info in infos {
        require!(info.is_writable, ErrorCode::AccountNotWritable);
    }
    Ok(())
}

impl<'info> ProcessRenewals<'info> {
    pub fn process_renewals(
        ctx: Context<'_, '_, 'info, 'info, ProcessRenewals<'info>>,
    ) -> Result<Vec<RenewalOutcome>> {
        ctx.accounts.platform_config.require_not_paused()?;
        require!(
            ctx.remaining_accounts.len() % RENEWAL_ACCOUNTS_PER_ITEM == 0,
            ErrorCode::ArrayLengthMismatch
        );

        let now = Clock::get()?.unix_timestamp;
        let delegate_bump = ctx.bumps.delegate;
        let accounts = &*ctx.accounts;
        let remaining: &'info [AccountInfo<'info>] = ctx.remaining_accounts;

        let outcomes = renew_each(
            remaining
                .chunks(RENEWAL_ACCOUNTS_PER_ITEM)
                .map(|group| (group[0].key(), group)),
            |group| accounts.renew(group, delegate_bump, now),
        );

        msg!(
            "Renewal batch done: {} of {} renewed",
            outcomes.iter().filter(|o| o.renewed).count(),
            outcomes.len()
        );

        Ok(outcomes)
    }

    /// Renew one group. Nothing is written back unless every check passed.
    fn renew(
        &self,
        group: &'info [AccountInfo<'info>],
        delegate_bump: u8,
        now: i64,
    ) -> Result<Settlement> {
        let [subscription_info, creator_info, registry_info, analytics_info, history_info, active_info, mint_info, source_info, creator_token_info, treasury_token_info] =
            group
        else {
            return err!(ErrorCode::ArrayLengthMismatch);
        };
        require_writable(&[
            subscription_info,
            analytics_info,
            history_info,
            active_info,
            source_info,
            creator_token_info,
            treasury_token_info,
        ])?;

        let mut subscription = Account::<Subscription>::try_from(subscription_info)?;
        let creator = Account::<Creator>::try_from(creator_info)?;
        let registry = Account::<TierRegistry>::try_from(registry_info)?;
        let mut analytics = Account::<CreatorAnalytics>::try_from(analytics_info)?;
        let mut history = Account::<SubscriptionHistory>::try_from(history_info)?;
        let mut active = Account::<ActiveSubscriptions>::try_from(active_info)?;
        let mint = Account::<Mint>::try_from(mint_info)?;
        let source = Account::<TokenAccount>::try_from(source_info)?;
        let creator_token = Account::<TokenAccount>::try_from(creator_token_info)?;
        let treasury_token = Account::<TokenAccount>::try_from(treasury_token_info)?;

        require_keys_eq!(creator.wallet, subscription.creator, ErrorCode::InvalidCreator);
        require_keys_eq!(registry.creator, subscription.creator, ErrorCode::InvalidCreator);
        require_keys_eq!(analytics.creator, subscription.creator, ErrorCode::InvalidCreator);
        require_keys_eq!(history.user, subscription.user, ErrorCode::UnauthorizedUser);
        require_keys_eq!(active.user, subscription.user, ErrorCode::UnauthorizedUser);

        let charge = renewal_charge(&subscription, &creator, &registry, &self.platform_config, now)?;
        let PaymentInstrument::Token(renewal_mint) = charge.instrument else {
            return err!(ErrorCode::TokenNotSupported);
        };
        require_keys_eq!(mint.key(), renewal_mint, ErrorCode::TokenNotSupported);

        check_token_source(
            &source,
            &subscription.user,
            &renewal_mint,
            &self.delegate.key(),
            charge.price,
        )?;
        check_token_destination(&creator_token, &creator.wallet, &renewal_mint)?;
        check_token_destination(&treasury_token, &self.treasury.key(), &renewal_mint)?;

        let mut payments = TokenPayments {
            source: source_info.clone(),
            mint: mint_info.clone(),
            creator_account: creator_token_info.clone(),
            treasury_account: treasury_token_info.clone(),
            delegate: self.delegate.to_account_info(),
            token_program: self.token_program.to_account_info(),
            subscription: subscription_info.clone(),
            decimals: mint.decimals,
            delegate_bump,
        };
        let terms = Terms::from(&*self.platform_config);
        let mut accounts = LedgerAccounts {
            subscription: &mut subscription,
            analytics: &mut analytics,
            history: &mut history,
            active: &mut active,
        };
        let settlement = ledger::settle(&mut accounts, &mut payments, &charge, &terms, now)?;

        subscription.exit(&crate::ID)?;
        analytics.exit(&crate::ID)?;
        history.exit(&crate::ID)?;
        active.exit(&crate::ID)?;

        Ok(settlement)
    }
}
