use crate::{constants::*, error::ErrorCode};
use anchor_lang::prelude::*;

#[account]
#[derive(InitSpace, Debug, PartialEq)]
pub struct PlatformConfig {
    pub authority: Pubkey,
    pub pending_authority: Option<Pubkey>,
    pub fee_bps: u16, // Basis points (100 = 1%)
    pub grace_period: i64, // seconds of access after expiry
    pub history_limit: u16,
    pub is_paused: bool,
    #[max_len(16)]
    pub whitelisted_mints: Vec<Pubkey>,
    pub bump: u8,
    pub treasury_bump: u8,
}

impl PlatformConfig {
    pub fn validate_fee_bps(fee_bps: u16) -> Result<()> {
        require!(fee_bps <= MAX_PLATFORM_FEE_BPS, ErrorCode::InvalidFeeRate);
        Ok(())
    }

    pub fn validate_grace_period(grace_period: i64) -> Result<()> {
        require!(
            (0..=MAX_GRACE_PERIOD).contains(&grace_period),
            ErrorCode::InvalidGracePeriod
        );
        Ok(())
    }

    pub fn validate_history_limit(history_limit: u16) -> Result<()> {
        require!(
            history_limit >= 1 && usize::from(history_limit) <= MAX_HISTORY_LENGTH,
            ErrorCode::InvalidHistoryLimit
        );
        Ok(())
    }

    pub fn require_not_paused(&self) -> Result<()> {
        require!(!self.is_paused, ErrorCode::ProtocolPaused);
        Ok(())
    }

    pub fn is_whitelisted(&self, mint: &Pubkey) -> bool {
        self.whitelisted_mints.contains(mint)
    }

    pub fn require_whitelisted(&self, mint: &Pubkey) -> Result<()> {
        require!(self.is_whitelisted(mint), ErrorCode::TokenNotSupported);
        Ok(())
    }

    pub fn add_mint(&mut self, mint: Pubkey) -> Result<()> {
        require!(!self.is_whitelisted(&mint), ErrorCode::TokenAlreadySupported);
        require!(
            self.whitelisted_mints.len() < MAX_WHITELISTED_TOKENS,
            ErrorCode::TokenLimitExceeded
        );
        self.whitelisted_mints.push(mint);
        Ok(())
    }

    pub fn remove_mint(&mut self, mint: &Pubkey) -> Result<()> {
        let position = self
            .whitelisted_mints
            .iter()
            .position(|m| m == mint)
            .ok_or(ErrorCode::TokenNotSupported)?;
        self.whitelisted_mints.swap_remove(position);
        Ok(())
    }
}
