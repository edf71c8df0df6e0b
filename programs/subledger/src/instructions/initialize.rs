use crate::{constants::*, events::PlatformInitialized, state::*};
use anchor_lang::{
    prelude::*,
    system_program::{transfer, Transfer},
};

#[derive(Accounts)]
pub struct Initialize<'info> {
    #[account(mut)]
    pub authority: Signer<'info>,

    #[account(
        init,
        payer = authority,
        space = 8 + PlatformConfig::INIT_SPACE,
        seeds = [PLATFORM_CONFIG_SEED.as_bytes()],
        bump
    )]
    pub platform_config: Account<'info, PlatformConfig>,

    /// Collects native platform fees
    #[account(
        mut,
        seeds = [TREASURY_SEED.as_bytes()],
        bump
    )]
    pub treasury: SystemAccount<'info>,

    pub system_program: Program<'info, System>,
}

impl<'info> Initialize<'info> {
    pub fn initialize(
        &mut self,
        fee_bps: u16,
        grace_period: i64,
        history_limit: u16,
        bumps: &InitializeBumps,
    ) -> Result<()> {
        PlatformConfig::validate_fee_bps(fee_bps)?;
        PlatformConfig::validate_grace_period(grace_period)?;
        PlatformConfig::validate_history_limit(history_limit)?;

        self.platform_config.set_inner(PlatformConfig {
            authority: self.authority.key(),
            pending_authority: None,
            fee_bps,
            grace_period,
            history_limit,
            is_paused: false,
            whitelisted_mints: Vec::new(),
            bump: bumps.platform_config,
            treasury_bump: bumps.treasury,
        });

        // The treasury must stay rent exempt once fees start landing in it
        let rent_minimum = Rent::get()?.minimum_balance(0);
        let shortfall = rent_minimum.saturating_sub(self.treasury.lamports());
        if shortfall > 0 {
            transfer(
                CpiContext::new(
                    self.system_program.to_account_info(),
                    Transfer {
                        from: self.authority.to_account_info(),
                        to: self.treasury.to_account_info(),
                    },
                ),
                shortfall,
            )?;
        }

        msg!(
            "SubLedger initialized by authority: {}",
            self.authority.key()
        );
        msg!(
            "Platform fee: {} bps, grace period: {}s, history limit: {}",
            fee_bps,
            grace_period,
            history_limit
        );

        emit!(PlatformInitialized {
            authority: self.authority.key(),
            fee_bps,
            grace_period,
            history_limit,
        });

        Ok(())
    }
}
