use crate::{constants::RENEWAL_LEAD_TIME, error::ErrorCode};
use anchor_lang::prelude::*;

/// Access grant for one (creator, user) pair.
///
/// A subscription is either live (tracked by `expiry`) or suspended (tracked by
/// `suspended_expiry`), never both: at most one of the two is non-zero.
#[account]
#[derive(InitSpace, Debug, PartialEq)]
pub struct Subscription {
    pub creator: Pubkey,
    pub user: Pubkey,
    pub expiry: i64,           // 0 = never subscribed or suspended
    pub suspended_expiry: i64, // 0 = not suspended
    pub last_tier_index: Option<u8>,
    pub auto_renewal: bool,
    pub renewal_mint: Option<Pubkey>,
    pub first_subscribed_at: i64,
    pub payments_made: u64,
    pub in_flight: bool,
    pub bump: u8,
}

impl Subscription {
    pub fn new(creator: Pubkey, user: Pubkey, bump: u8) -> Self {
        Self {
            creator,
            user,
            expiry: 0,
            suspended_expiry: 0,
            last_tier_index: None,
            auto_renewal: false,
            renewal_mint: None,
            first_subscribed_at: 0,
            payments_made: 0,
            in_flight: false,
            bump,
        }
    }

    pub fn is_suspended(&self) -> bool {
        self.suspended_expiry != 0
    }

    pub fn is_live(&self, now: i64) -> bool {
        self.expiry > now
    }

    pub fn is_first_payment(&self) -> bool {
        self.payments_made == 0
    }

    /// Renewals run from `RENEWAL_LEAD_TIME` before expiry onwards.
    pub fn is_renewal_due(&self, now: i64) -> bool {
        self.expiry != 0 && self.expiry <= now.saturating_add(RENEWAL_LEAD_TIME)
    }

    pub fn require_idle(&self) -> Result<()> {
        require!(!self.in_flight, ErrorCode::ReentrantCall);
        Ok(())
    }

    /// Mark the subscription as inside a payment. Nested entry is rejected until
    /// `leave` is called.
    pub fn enter(&mut self) -> Result<()> {
        self.require_idle()?;
        self.in_flight = true;
        Ok(())
    }

    pub fn leave(&mut self) {
        self.in_flight = false;
    }

    /// Apply a settled payment.
    pub fn record_payment(&mut self, tier_index: u8, new_expiry: i64, now: i64) -> Result<()> {
        if self.is_first_payment() {
            self.first_subscribed_at = now;
        }
        self.payments_made = self
            .payments_made
            .checked_add(1)
            .ok_or(ErrorCode::ArithmeticOverflow)?;
        self.expiry = new_expiry;
        self.last_tier_index = Some(tier_index);
        Ok(())
    }

    /// Move the live expiry into the suspended slot. Returns the parked expiry.
    pub fn suspend(&mut self, now: i64) -> Result<i64> {
        self.require_idle()?;
        require!(!self.is_suspended(), ErrorCode::AlreadySuspended);
        require!(self.is_live(now), ErrorCode::NoActiveSubscription);

        self.suspended_expiry = self.expiry;
        self.expiry = 0;
        Ok(self.suspended_expiry)
    }

    /// Restore the parked expiry. Returns whether the restored subscription is
    /// still live; a long suspension can come back already expired.
    pub fn reactivate(&mut self, now: i64) -> Result<bool> {
        self.require_idle()?;
        require!(self.is_suspended(), ErrorCode::NoSuspendedSubscription);

        self.expiry = self.suspended_expiry;
        self.suspended_expiry = 0;
        Ok(self.is_live(now))
    }

    /// Drop a suspended subscription entirely. Irreversible.
    pub fn cancel_suspended(&mut self) -> Result<()> {
        self.require_idle()?;
        require!(self.is_suspended(), ErrorCode::NoSuspendedSubscription);

        self.suspended_expiry = 0;
        self.last_tier_index = None;
        self.auto_renewal = false;
        self.renewal_mint = None;
        Ok(())
    }

    pub fn enable_auto_renewal(&mut self, mint: Pubkey, now: i64) -> Result<()> {
        self.require_idle()?;
        require!(self.is_live(now), ErrorCode::NoActiveSubscription);

        self.auto_renewal = true;
        self.renewal_mint = Some(mint);
        Ok(())
    }

    pub fn disable_auto_renewal(&mut self) -> Result<()> {
        self.require_idle()?;
        self.auto_renewal = false;
        self.renewal_mint = None;
        Ok(())
    }
}
