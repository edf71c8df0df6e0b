//! In-memory accounts for driving `Accounts` structs in unit tests.

use crate::{constants::*, state::PlatformConfig};
use anchor_lang::{prelude::*, solana_program::system_program};

fn leak<T>(value: T) -> &'static mut T {
    Box::leak(Box::new(value))
}

fn account_info(
    owner: Pubkey,
    data: Vec<u8>,
    is_signer: bool,
    is_writable: bool,
) -> &'static AccountInfo<'static> {
    leak(AccountInfo::new(
        leak(Pubkey::new_unique()),
        is_signer,
        is_writable,
        leak(1_000_000_000),
        Box::leak(data.into_boxed_slice()),
        leak(owner),
        false,
        0,
    ))
}

/// A program-owned account holding `value`.
pub(crate) fn program_account<T: AccountSerialize + Owner>(
    value: &T,
    is_writable: bool,
) -> &'static AccountInfo<'static> {
    let mut data = Vec::new();
    value.try_serialize(&mut data).unwrap();
    account_info(T::owner(), data, false, is_writable)
}

pub(crate) fn signer() -> &'static AccountInfo<'static> {
    account_info(system_program::ID, Vec::new(), true, true)
}

pub(crate) fn platform_config(is_paused: bool) -> PlatformConfig {
    PlatformConfig {
        authority: Pubkey::new_unique(),
        pending_authority: None,
        fee_bps: DEFAULT_PLATFORM_FEE_BPS,
        grace_period: DEFAULT_GRACE_PERIOD,
        history_limit: DEFAULT_HISTORY_LIMIT,
        is_paused,
        whitelisted_mints: Vec::new(),
        bump: 255,
        treasury_bump: 254,
    }
}
