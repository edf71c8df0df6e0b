use crate::state::PaymentInstrument;
use anchor_lang::prelude::*;

#[event]
pub struct PlatformInitialized {
    pub authority: Pubkey,
    pub fee_bps: u16,
    pub grace_period: i64,
    pub history_limit: u16,
}

#[event]
pub struct PlatformConfigUpdated {
    pub fee_bps: u16,
    pub grace_period: i64,
    pub history_limit: u16,
}

#[event]
pub struct PauseStatusChanged {
    pub paused: bool,
}

#[event]
pub struct CreatorRegistered {
    pub creator: Pubkey,
    pub name: String,
}

#[event]
pub struct CreatorStatusChanged {
    pub creator: Pubkey,
    pub is_active: bool,
}

#[event]
pub struct TokenWhitelisted {
    pub mint: Pubkey,
}

#[event]
pub struct TokenRemoved {
    pub mint: Pubkey,
}

#[event]
pub struct AuthorityTransferStarted {
    pub current: Pubkey,
    pub pending: Pubkey,
}

#[event]
pub struct AuthorityTransferred {
    pub previous: Pubkey,
    pub new_authority: Pubkey,
}

#[event]
pub struct PlatformFeesWithdrawn {
    pub destination: Pubkey,
    pub amount: u64,
    /// `None` for lamports.
    pub mint: Option<Pubkey>,
}

#[event]
pub struct PlanUpserted {
    pub creator: Pubkey,
    pub tier_index: u8,
    pub native_price: u64,
    pub token_price: u64,
    pub duration: u64,
    pub appended: bool,
}

#[event]
pub struct PlanStatusToggled {
    pub creator: Pubkey,
    pub tier_index: u8,
    pub active: bool,
}

/// Emitted for every settled payment, including batch renewals.
#[event]
pub struct Subscribed {
    pub creator: Pubkey,
    pub user: Pubkey,
    pub tier_index: u8,
    pub amount: u64,
    pub creator_share: u64,
    pub platform_fee: u64,
    pub instrument: PaymentInstrument,
    pub expiry: i64,
    pub first_payment: bool,
    pub renewal: bool,
    /// Part of the offered payment that was never taken from the payer.
    pub excess_refunded: u64,
}

#[event]
pub struct SubscriptionSuspended {
    pub creator: Pubkey,
    pub user: Pubkey,
    pub suspended_expiry: i64,
}

#[event]
pub struct SubscriptionReactivated {
    pub creator: Pubkey,
    pub user: Pubkey,
    pub expiry: i64,
    pub live: bool,
}

#[event]
pub struct SuspendedSubscriptionCancelled {
    pub creator: Pubkey,
    pub user: Pubkey,
}

#[event]
pub struct AutoRenewalChanged {
    pub creator: Pubkey,
    pub user: Pubkey,
    pub enabled: bool,
    pub mint: Option<Pubkey>,
}

#[event]
pub struct RenewalSkipped {
    pub subscription: Pubkey,
    pub error_code: u32,
}
