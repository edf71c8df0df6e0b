use crate::{constants::FEE_BASIS_POINTS_DIVISOR, error::ErrorCode};
use anchor_lang::prelude::*;

/// Split a gross amount into `(creator_share, platform_fee)`.
///
/// The platform fee is `floor(amount * fee_bps / 10_000)` and the creator share
/// is whatever remains, so the two halves always add back up to `amount`.
/// The rate is bounded when it is configured; here anything above 100% is
/// treated as an arithmetic error.
pub fn split_fee(amount: u64, fee_bps: u16) -> Result<(u64, u64)> {
    require!(
        u128::from(fee_bps) <= FEE_BASIS_POINTS_DIVISOR,
        ErrorCode::ArithmeticOverflow
    );

    let platform_fee = u64::try_from(
        u128::from(amount)
            .checked_mul(u128::from(fee_bps))
            .ok_or(ErrorCode::ArithmeticOverflow)?
            .checked_div(FEE_BASIS_POINTS_DIVISOR)
            .ok_or(ErrorCode::ArithmeticOverflow)?,
    )
    .map_err(|_| ErrorCode::ArithmeticOverflow)?;

    let creator_share = amount
        .checked_sub(platform_fee)
        .ok_or(ErrorCode::ArithmeticOverflow)?;

    Ok((creator_share, platform_fee))
}
