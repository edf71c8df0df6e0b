use crate::{constants::*, events::*, ledger, state::*};
use anchor_lang::prelude::*;

/// Status changes a user makes to their own subscription with `creator`.
#[derive(Accounts)]
#[instruction(creator: Pubkey)]
pub struct ManageSubscription<'info> {
    pub user: Signer<'info>,

    #[account(
        seeds = [PLATFORM_CONFIG_SEED.as_bytes()],
        bump = platform_config.bump
    )]
    pub platform_config: Account<'info, PlatformConfig>,

    #[account(
        mut,
        seeds = [SUBSCRIPTION_SEED.as_bytes(), creator.as_ref(), user.key().as_ref()],
        bump = subscription.bump
    )]
    pub subscription: Account<'info, Subscription>,

    #[account(
        mut,
        seeds = [ACTIVE_SUBSCRIPTIONS_SEED.as_bytes(), user.key().as_ref()],
        bump = active_subscriptions.bump
    )]
    pub active_subscriptions: Account<'info, ActiveSubscriptions>,
}

impl<'info> ManageSubscription<'info> {
    pub fn suspend_subscription(&mut self, creator: Pubkey) -> Result<()> {
        self.platform_config.require_not_paused()?;
        let now = Clock::get()?.unix_timestamp;
        let suspended_expiry =
            ledger::suspend(&mut self.subscription, &mut self.active_subscriptions, now)?;

        msg!(
            "User {} suspended subscription to {} with {}s remaining",
            self.user.key(),
            creator,
            suspended_expiry - now
        );
        emit!(SubscriptionSuspended {
            creator,
            user: self.user.key(),
            suspended_expiry,
        });

        Ok(())
    }

    pub fn reactivate_subscription(&mut self, creator: Pubkey) -> Result<()> {
        self.platform_config.require_not_paused()?;
        let now = Clock::get()?.unix_timestamp;
        let live =
            ledger::reactivate(&mut self.subscription, &mut self.active_subscriptions, now)?;

        msg!(
            "User {} reactivated subscription to {} (expiry {}, live: {})",
            self.user.key(),
            creator,
            self.subscription.expiry,
            live
        );
        emit!(SubscriptionReactivated {
            creator,
            user: self.user.key(),
            expiry: self.subscription.expiry,
            live,
        });

        Ok(())
    }

    pub fn cancel_suspended_subscription(&mut self, creator: Pubkey) -> Result<()> {
        self.platform_config.require_not_paused()?;
        ledger::cancel_suspended(&mut self.subscription, &mut self.active_subscriptions)?;

        msg!(
            "User {} cancelled suspended subscription to {}",
            self.user.key(),
            creator
        );
        emit!(SuspendedSubscriptionCancelled {
            creator,
            user: self.user.key(),
        });

        Ok(())
    }
}
