use crate::{constants::*, events::AutoRenewalChanged, state::*};
use anchor_lang::prelude::*;

#[derive(Accounts)]
#[instruction(creator: Pubkey)]
pub struct ConfigureAutoRenewal<'info> {
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
}

impl<'info> ConfigureAutoRenewal<'info> {
    /// Renewals pull `mint` through the delegate; the user approves it
    /// separately on their token account.
    pub fn enable_auto_renewal(&mut self, creator: Pubkey, mint: Pubkey) -> Result<()> {
        self.platform_config.require_not_paused()?;
        self.platform_config.require_whitelisted(&mint)?;
        let now = Clock::get()?.unix_timestamp;
        self.subscription.enable_auto_renewal(mint, now)?;

        msg!(
            "Auto-renewal enabled for {} -> {} in mint {}",
            self.user.key(),
            creator,
            mint
        );
        emit!(AutoRenewalChanged {
            creator,
            user: self.user.key(),
            enabled: true,
            mint: Some(mint),
        });

        Ok(())
    }

    pub fn disable_auto_renewal(&mut self, creator: Pubkey) -> Result<()> {
        self.platform_config.require_not_paused()?;
        self.subscription.disable_auto_renewal()?;

        msg!("Auto-renewal disabled for {} -> {}", self.user.key(), creator);
        emit!(AutoRenewalChanged {
            creator,
            user: self.user.key(),
            enabled: false,
            mint: None,
        });

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{error::ErrorCode, test_utils::*};

    fn accounts(config: &PlatformConfig, subscription: &Subscription) -> ConfigureAutoRenewal<'static> {
        ConfigureAutoRenewal {
            user: Signer::try_from(signer()).unwrap(),
            platform_config: Account::try_from(program_account(config, false)).unwrap(),
            subscription: Account::try_from(program_account(subscription, true)).unwrap(),
        }
    }

    #[test]
    fn paused_platform_rejects_auto_renewal_changes() {
        let (creator, mint) = (Pubkey::new_unique(), Pubkey::new_unique());
        let mut config = platform_config(true);
        config.whitelisted_mints.push(mint);
        let mut subscription = Subscription::new(creator, Pubkey::new_unique(), 255);
        subscription.auto_renewal = true;
        subscription.renewal_mint = Some(mint);

        let mut accounts = accounts(&config, &subscription);
        assert_eq!(
            accounts.enable_auto_renewal(creator, mint).unwrap_err(),
            ErrorCode::ProtocolPaused.into()
        );
        assert_eq!(
            accounts.disable_auto_renewal(creator).unwrap_err(),
            ErrorCode::ProtocolPaused.into()
        );
        assert!(accounts.subscription.auto_renewal);
    }

    #[test]
    fn disable_clears_renewal_mint() {
        let creator = Pubkey::new_unique();
        let mut subscription = Subscription::new(creator, Pubkey::new_unique(), 255);
        subscription.auto_renewal = true;
        subscription.renewal_mint = Some(Pubkey::new_unique());

        let mut accounts = accounts(&platform_config(false), &subscription);
        accounts.disable_auto_renewal(creator).unwrap();
        assert!(!accounts.subscription.auto_renewal);
        assert_eq!(accounts.subscription.renewal_mint, None);
    }
}
