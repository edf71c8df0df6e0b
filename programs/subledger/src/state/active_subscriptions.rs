use crate::{constants::MAX_ACTIVE_SUBSCRIPTIONS, error::ErrorCode};
use anchor_lang::prelude::*;

/// Creators a user currently holds a live subscription with. Maintained on
/// every transition instead of being rebuilt from history.
#[account]
#[derive(InitSpace, Debug, PartialEq)]
pub struct ActiveSubscriptions {
    pub user: Pubkey,
    #[max_len(24)]
    pub creators: Vec<Pubkey>,
    pub bump: u8,
}

impl ActiveSubscriptions {
    pub fn new(user: Pubkey, bump: u8) -> Self {
        Self {
            user,
            creators: Vec::new(),
            bump,
        }
    }

    pub fn contains(&self, creator: &Pubkey) -> bool {
        self.creators.contains(creator)
    }

    pub fn ensure_room_for(&self, creator: &Pubkey) -> Result<()> {
        require!(
            self.contains(creator) || self.creators.len() < MAX_ACTIVE_SUBSCRIPTIONS,
            ErrorCode::ActiveSetFull
        );
        Ok(())
    }

    /// Idempotent.
    pub fn add(&mut self, creator: Pubkey) -> Result<()> {
        if self.contains(&creator) {
            return Ok(());
        }
        self.ensure_room_for(&creator)?;
        self.creators.push(creator);
        Ok(())
    }

    /// Swap-and-pop. Returns whether the creator was present.
    pub fn remove(&mut self, creator: &Pubkey) -> bool {
        match self.creators.iter().position(|c| c == creator) {
            Some(position) => {
                self.creators.swap_remove(position);
                true
            }
            None => false,
        }
    }
}
