use crate::{constants::*, error::ErrorCode, events::*, state::*};
use anchor_lang::prelude::*;

/// Plans are edited by the creator, or by the platform authority when
/// moderating.
#[derive(Accounts)]
#[instruction(creator_wallet: Pubkey)]
pub struct ManagePlans<'info> {
    pub signer: Signer<'info>,

    #[account(
        seeds = [PLATFORM_CONFIG_SEED.as_bytes()],
        bump = platform_config.bump,
        constraint = signer.key() == creator_wallet
            || signer.key() == platform_config.authority @ ErrorCode::NotCreator
    )]
    pub platform_config: Account<'info, PlatformConfig>,

    #[account(
        mut,
        seeds = [TIER_REGISTRY_SEED.as_bytes(), creator_wallet.as_ref()],
        bump = tier_registry.bump
    )]
    pub tier_registry: Account<'info, TierRegistry>,
}

impl<'info> ManagePlans<'info> {
    pub fn upsert_plan(
        &mut self,
        creator_wallet: Pubkey,
        tier_index: u8,
        plan: SubscriptionPlan,
    ) -> Result<()> {
        self.platform_config.require_not_paused()?;
        let (native_price, token_price, duration) =
            (plan.native_price, plan.token_price, plan.duration);
        let appended = self.tier_registry.upsert_plan(tier_index, plan)?;

        msg!(
            "Plan {} {} for creator {} ({} lamports / {} tokens per {}s)",
            tier_index,
            if appended { "added" } else { "updated" },
            creator_wallet,
            native_price,
            token_price,
            duration
        );
        emit!(PlanUpserted {
            creator: creator_wallet,
            tier_index,
            native_price,
            token_price,
            duration,
            appended,
        });

        Ok(())
    }

    pub fn toggle_plan_status(&mut self, creator_wallet: Pubkey, tier_index: u8) -> Result<()> {
        self.platform_config.require_not_paused()?;
        let active = self.tier_registry.toggle_active(tier_index)?;

        msg!(
            "Plan {} of creator {} is now {}",
            tier_index,
            creator_wallet,
            if active { "active" } else { "inactive" }
        );
        emit!(PlanStatusToggled {
            creator: creator_wallet,
            tier_index,
            active,
        });

        Ok(())
    }
}
