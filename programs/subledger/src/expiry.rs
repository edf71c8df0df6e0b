use crate::error::ErrorCode;
use anchor_lang::prelude::*;

/// Expiry after paying for `duration` more seconds.
///
/// A live subscription is extended from its current end, a lapsed one restarts
/// from `now`. The caller has already validated `duration`.
pub fn next_expiry(current_expiry: i64, now: i64, duration: u64) -> Result<i64> {
    let base_time = current_expiry.max(now);
    let duration = i64::try_from(duration).map_err(|_| ErrorCode::ArithmeticOverflow)?;

    Ok(base_time
        .checked_add(duration)
        .ok_or(ErrorCode::ArithmeticOverflow)?)
}

/// Access check used by every gate in the program.
///
/// True while the subscription is live, and for `grace_period` seconds after
/// it nominally expires. A zero expiry (never subscribed, or suspended) is
/// never active.
pub fn is_access_active(expiry: i64, now: i64, grace_period: i64) -> bool {
    if expiry > now {
        return true;
    }
    expiry != 0 && expiry.saturating_add(grace_period) > now
}
