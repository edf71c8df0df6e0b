use crate::{constants::*, error::ErrorCode, events::*, state::*};
use anchor_lang::prelude::*;

/// Optional changes to the platform settings. Unset fields keep their value.
#[derive(AnchorSerialize, AnchorDeserialize, Clone, Debug, Default, PartialEq, Eq)]
pub struct ConfigUpdate {
    pub fee_bps: Option<u16>,
    pub grace_period: Option<i64>,
    pub history_limit: Option<u16>,
}

impl ConfigUpdate {
    /// Validates every field before writing any of them.
    pub fn apply_to(&self, config: &mut PlatformConfig) -> Result<()> {
        if let Some(fee_bps) = self.fee_bps {
            PlatformConfig::validate_fee_bps(fee_bps)?;
        }
        if let Some(grace_period) = self.grace_period {
            PlatformConfig::validate_grace_period(grace_period)?;
        }
        if let Some(history_limit) = self.history_limit {
            PlatformConfig::validate_history_limit(history_limit)?;
        }

        if let Some(fee_bps) = self.fee_bps {
            config.fee_bps = fee_bps;
        }
        if let Some(grace_period) = self.grace_period {
            config.grace_period = grace_period;
        }
        if let Some(history_limit) = self.history_limit {
            config.history_limit = history_limit;
        }
        Ok(())
    }
}

#[derive(Accounts)]
pub struct AdminConfig<'info> {
    pub authority: Signer<'info>,

    #[account(
        mut,
        seeds = [PLATFORM_CONFIG_SEED.as_bytes()],
        bump = platform_config.bump,
        constraint = platform_config.authority == authority.key() @ ErrorCode::NotOwner
    )]
    pub platform_config: Account<'info, PlatformConfig>,
}

impl<'info> AdminConfig<'info> {
    pub fn update_platform_config(&mut self, update: ConfigUpdate) -> Result<()> {
        let config = &mut self.platform_config;
        update.apply_to(config)?;

        msg!(
            "Platform config updated: fee {} bps, grace {}s, history limit {}",
            config.fee_bps,
            config.grace_period,
            config.history_limit
        );

        emit!(PlatformConfigUpdated {
            fee_bps: config.fee_bps,
            grace_period: config.grace_period,
            history_limit: config.history_limit,
        });

        Ok(())
    }

    pub fn set_paused(&mut self, paused: bool) -> Result<()> {
        self.platform_config.is_paused = paused;

        msg!("Protocol paused: {}", paused);
        emit!(PauseStatusChanged { paused });

        Ok(())
    }

    pub fn propose_authority(&mut self, new_authority: Pubkey) -> Result<()> {
        require!(
            new_authority != Pubkey::default(),
            ErrorCode::InvalidAddress
        );
        self.platform_config.pending_authority = Some(new_authority);

        msg!(
            "Authority transfer proposed: {} -> {}",
            self.authority.key(),
            new_authority
        );
        emit!(AuthorityTransferStarted {
            current: self.authority.key(),
            pending: new_authority,
        });

        Ok(())
    }
}

#[derive(Accounts)]
pub struct AcceptAuthority<'info> {
    pub new_authority: Signer<'info>,

    #[account(
        mut,
        seeds = [PLATFORM_CONFIG_SEED.as_bytes()],
        bump = platform_config.bump,
        constraint = platform_config.pending_authority == Some(new_authority.key()) @ ErrorCode::NotPendingOwner
    )]
    pub platform_config: Account<'info, PlatformConfig>,
}

impl<'info> AcceptAuthority<'info> {
    pub fn accept_authority(&mut self) -> Result<()> {
        let config = &mut self.platform_config;
        let previous = config.authority;
        config.authority = self.new_authority.key();
        config.pending_authority = None;

        msg!("Authority transferred: {} -> {}", previous, config.authority);
        emit!(AuthorityTransferred {
            previous,
            new_authority: config.authority,
        });

        Ok(())
    }
}

#[derive(Accounts)]
#[instruction(wallet: Pubkey)]
pub struct SetCreatorStatus<'info> {
    pub authority: Signer<'info>,

    #[account(
        seeds = [PLATFORM_CONFIG_SEED.as_bytes()],
        bump = platform_config.bump,
        constraint = platform_config.authority == authority.key() @ ErrorCode::NotOwner
    )]
    pub platform_config: Account<'info, PlatformConfig>,

    #[account(
        mut,
        seeds = [CREATOR_SEED.as_bytes(), wallet.as_ref()],
        bump = creator.bump
    )]
    pub creator: Account<'info, Creator>,
}

impl<'info> SetCreatorStatus<'info> {
    pub fn set_creator_status(&mut self, wallet: Pubkey, is_active: bool) -> Result<()> {
        self.creator.is_active = is_active;

        msg!("Creator {} active: {}", wallet, is_active);
        emit!(CreatorStatusChanged {
            creator: wallet,
            is_active,
        });

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config() -> PlatformConfig {
        PlatformConfig {
            authority: Pubkey::new_unique(),
            pending_authority: None,
            fee_bps: DEFAULT_PLATFORM_FEE_BPS,
            grace_period: DEFAULT_GRACE_PERIOD,
            history_limit: DEFAULT_HISTORY_LIMIT,
            is_paused: false,
            whitelisted_mints: Vec::new(),
            bump: 255,
            treasury_bump: 254,
        }
    }

    #[test]
    fn partial_update_keeps_other_fields() {
        let mut config = config();
        ConfigUpdate {
            fee_bps: Some(250),
            ..Default::default()
        }
        .apply_to(&mut config)
        .unwrap();

        assert_eq!(config.fee_bps, 250);
        assert_eq!(config.grace_period, DEFAULT_GRACE_PERIOD);
        assert_eq!(config.history_limit, DEFAULT_HISTORY_LIMIT);
    }

    #[test]
    fn invalid_field_rejects_whole_update() {
        let mut config = config();
        let before = config.clone();
        let update = ConfigUpdate {
            fee_bps: Some(100),
            grace_period: Some(MAX_GRACE_PERIOD + 1),
            history_limit: None,
        };
        assert_eq!(
            update.apply_to(&mut config).unwrap_err(),
            ErrorCode::InvalidGracePeriod.into()
        );
        assert_eq!(config, before);
    }

    #[test]
    fn each_bound_has_its_own_error() {
        let mut config = config();
        assert_eq!(
            ConfigUpdate {
                fee_bps: Some(MAX_PLATFORM_FEE_BPS + 1),
                ..Default::default()
            }
            .apply_to(&mut config)
            .unwrap_err(),
            ErrorCode::InvalidFeeRate.into()
        );
        assert_eq!(
            ConfigUpdate {
                history_limit: Some(0),
                ..Default::default()
            }
            .apply_to(&mut config)
            .unwrap_err(),
            ErrorCode::InvalidHistoryLimit.into()
        );
    }
}
