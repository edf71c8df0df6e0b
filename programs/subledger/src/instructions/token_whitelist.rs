use crate::{constants::*, error::ErrorCode, events::*, state::*};
use anchor_lang::prelude::*;
use anchor_spl::{
    associated_token::AssociatedToken,
    token::{Mint, Token, TokenAccount},
};

#[derive(Accounts)]
pub struct WhitelistToken<'info> {
    #[account(mut)]
    pub authority: Signer<'info>,

    #[account(
        mut,
        seeds = [PLATFORM_CONFIG_SEED.as_bytes()],
        bump = platform_config.bump,
        constraint = platform_config.authority == authority.key() @ ErrorCode::NotOwner
    )]
    pub platform_config: Account<'info, PlatformConfig>,

    pub mint: Account<'info, Mint>,

    #[account(
        seeds = [TREASURY_SEED.as_bytes()],
        bump = platform_config.treasury_bump
    )]
    pub treasury: SystemAccount<'info>,

    // Receives platform fees in this mint
    #[account(
        init_if_needed,
        payer = authority,
        associated_token::mint = mint,
        associated_token::authority = treasury,
    )]
    pub treasury_token_account: Account<'info, TokenAccount>,

    pub token_program: Program<'info, Token>,
    pub associated_token_program: Program<'info, AssociatedToken>,
    pub system_program: Program<'info, System>,
}

impl<'info> WhitelistToken<'info> {
    pub fn whitelist_token(&mut self) -> Result<()> {
        let mint = self.mint.key();
        self.platform_config.add_mint(mint)?;

        msg!(
            "Token {} whitelisted, treasury account {}",
            mint,
            self.treasury_token_account.key()
        );
        emit!(TokenWhitelisted { mint });

        Ok(())
    }
}

#[derive(Accounts)]
pub struct RemoveToken<'info> {
    pub authority: Signer<'info>,

    #[account(
        mut,
        seeds = [PLATFORM_CONFIG_SEED.as_bytes()],
        bump = platform_config.bump,
        constraint = platform_config.authority == authority.key() @ ErrorCode::NotOwner
    )]
    pub platform_config: Account<'info, PlatformConfig>,
}

impl<'info> RemoveToken<'info> {
    /// Existing auto-renewals in this mint will be skipped until it is
    /// whitelisted again.
    pub fn remove_token(&mut self, mint: Pubkey) -> Result<()> {
        self.platform_config.remove_mint(&mint)?;

        msg!("Token {} removed from whitelist", mint);
        emit!(TokenRemoved { mint });

        Ok(())
    }
}
