use crate::{constants::*, error::ErrorCode, events::CreatorRegistered, state::*};
use anchor_lang::prelude::*;

#[derive(Accounts)]
pub struct RegisterCreator<'info> {
    #[account(mut)]
    pub wallet: Signer<'info>,

    #[account(
        seeds = [PLATFORM_CONFIG_SEED.as_bytes()],
        bump = platform_config.bump
    )]
    pub platform_config: Account<'info, PlatformConfig>,

    #[account(
        init,
        payer = wallet,
        space = 8 + Creator::INIT_SPACE,
        seeds = [CREATOR_SEED.as_bytes(), wallet.key().as_ref()],
        bump
    )]
    pub creator: Account<'info, Creator>,

    #[account(
        init,
        payer = wallet,
        space = 8 + TierRegistry::INIT_SPACE,
        seeds = [TIER_REGISTRY_SEED.as_bytes(), wallet.key().as_ref()],
        bump
    )]
    pub tier_registry: Account<'info, TierRegistry>,

    #[account(
        init,
        payer = wallet,
        space = 8 + CreatorAnalytics::INIT_SPACE,
        seeds = [ANALYTICS_SEED.as_bytes(), wallet.key().as_ref()],
        bump
    )]
    pub analytics: Account<'info, CreatorAnalytics>,

    pub system_program: Program<'info, System>,
}

impl<'info> RegisterCreator<'info> {
    pub fn register_creator(
        &mut self,
        name: String,
        description: String,
        bumps: &RegisterCreatorBumps,
    ) -> Result<()> {
        self.platform_config.require_not_paused()?;
        require!(
            !name.is_empty() && name.len() <= MAX_NAME_LENGTH,
            ErrorCode::InvalidStringLength
        );
        require!(
            description.len() <= MAX_DESCRIPTION_LENGTH,
            ErrorCode::InvalidStringLength
        );

        let wallet = self.wallet.key();

        self.creator.set_inner(Creator {
            wallet,
            name: name.clone(),
            description,
            is_active: true,
            created_at: Clock::get()?.unix_timestamp,
            bump: bumps.creator,
        });

        self.tier_registry.set_inner(TierRegistry {
            creator: wallet,
            plans: Vec::new(),
            bump: bumps.tier_registry,
        });

        self.analytics.set_inner(CreatorAnalytics {
            creator: wallet,
            native_earnings: 0,
            token_earnings: 0,
            total_subscribers: 0,
            bump: bumps.analytics,
        });

        msg!("Creator '{}' registered: {}", name, wallet);
        emit!(CreatorRegistered {
            creator: wallet,
            name,
        });

        Ok(())
    }
}
