use crate::{constants::*, error::ErrorCode, events::PlatformFeesWithdrawn, state::*};
use anchor_lang::{
    prelude::*,
    system_program::{transfer, Transfer},
};
use anchor_spl::token::{transfer_checked, Mint, Token, TokenAccount, TransferChecked};

/// Amount to move out of a balance. Zero asks for everything available.
pub fn withdrawal_amount(requested: u64, available: u64) -> Result<u64> {
    require!(available > 0, ErrorCode::NoFundsToWithdraw);
    if requested == 0 {
        return Ok(available);
    }
    require!(requested <= available, ErrorCode::InsufficientBalance);
    Ok(requested)
}

#[derive(Accounts)]
pub struct WithdrawPlatformFees<'info> {
    pub authority: Signer<'info>,

    #[account(
        seeds = [PLATFORM_CONFIG_SEED.as_bytes()],
        bump = platform_config.bump,
        constraint = platform_config.authority == authority.key() @ ErrorCode::NotOwner
    )]
    pub platform_config: Account<'info, PlatformConfig>,

    #[account(
        mut,
        seeds = [TREASURY_SEED.as_bytes()],
        bump = platform_config.treasury_bump
    )]
    pub treasury: SystemAccount<'info>,

    #[account(mut)]
    pub destination: SystemAccount<'info>,

    pub system_program: Program<'info, System>,
}

impl<'info> WithdrawPlatformFees<'info> {
    pub fn withdraw_platform_fees(&mut self, amount: u64) -> Result<()> {
        let rent_minimum = Rent::get()?.minimum_balance(0);
        let available = self.treasury.lamports().saturating_sub(rent_minimum);
        let amount = withdrawal_amount(amount, available)?;

        let treasury_bump = self.platform_config.treasury_bump;
        transfer(
            CpiContext::new_with_signer(
                self.system_program.to_account_info(),
                Transfer {
                    from: self.treasury.to_account_info(),
                    to: self.destination.to_account_info(),
                },
                &[&[TREASURY_SEED.as_bytes(), &[treasury_bump]]],
            ),
            amount,
        )?;

        msg!(
            "Withdrew {} lamports of platform fees to {}",
            amount,
            self.destination.key()
        );
        emit!(PlatformFeesWithdrawn {
            destination: self.destination.key(),
            amount,
            mint: None,
        });

        Ok(())
    }
}

#[derive(Accounts)]
pub struct WithdrawPlatformTokenFees<'info> {
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

    // Removed mints can still be drained
    pub mint: Account<'info, Mint>,

    #[account(
        mut,
        associated_token::mint = mint,
        associated_token::authority = treasury,
    )]
    pub treasury_token_account: Account<'info, TokenAccount>,

    #[account(
        mut,
        token::mint = mint,
    )]
    pub destination: Account<'info, TokenAccount>,

    pub token_program: Program<'info, Token>,
}

impl<'info> WithdrawPlatformTokenFees<'info> {
    pub fn withdraw_platform_token_fees(&mut self, amount: u64) -> Result<()> {
        let amount = withdrawal_amount(amount, self.treasury_token_account.amount)?;

        let treasury_bump = self.platform_config.treasury_bump;
        transfer_checked(
            CpiContext::new_with_signer(
                self.token_program.to_account_info(),
                TransferChecked {
                    from: self.treasury_token_account.to_account_info(),
                    mint: self.mint.to_account_info(),
                    to: self.destination.to_account_info(),
                    authority: self.treasury.to_account_info(),
                },
                &[&[TREASURY_SEED.as_bytes(), &[treasury_bump]]],
            ),
            amount,
            self.mint.decimals,
        )?;

        msg!(
            "Withdrew {} of mint {} in platform fees to {}",
            amount,
            self.mint.key(),
            self.destination.key()
        );
        emit!(PlatformFeesWithdrawn {
            destination: self.destination.key(),
            amount,
            mint: Some(self.mint.key()),
        });

        Ok(())
    }
}
