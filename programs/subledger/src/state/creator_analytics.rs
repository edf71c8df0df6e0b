use crate::{error::ErrorCode, state::PaymentInstrument};
use anchor_lang::prelude::*;

/// Accumulate-only counters for a creator. The number of currently active
/// subscribers is not stored here; it is derived from `Subscription` accounts.
#[account]
#[derive(InitSpace, Debug, PartialEq)]
pub struct CreatorAnalytics {
    pub creator: Pubkey,
    pub native_earnings: u128, // lamports
    pub token_earnings: u128,  // token base units, all whitelisted mints
    pub total_subscribers: u64,
    pub bump: u8,
}

/// Counter values after a payment, computed before anything is written.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct AnalyticsUpdate {
    native_earnings: u128,
    token_earnings: u128,
    total_subscribers: u64,
}

impl CreatorAnalytics {
    pub fn prepare_payment(
        &self,
        is_first: bool,
        amount: u64,
        instrument: &PaymentInstrument,
    ) -> Result<AnalyticsUpdate> {
        let mut update = AnalyticsUpdate {
            native_earnings: self.native_earnings,
            token_earnings: self.token_earnings,
            total_subscribers: self.total_subscribers,
        };

        match instrument {
            PaymentInstrument::Native => {
                update.native_earnings = update
                    .native_earnings
                    .checked_add(u128::from(amount))
                    .ok_or(ErrorCode::ArithmeticOverflow)?;
            }
            PaymentInstrument::Token(_) => {
                update.token_earnings = update
                    .token_earnings
                    .checked_add(u128::from(amount))
                    .ok_or(ErrorCode::ArithmeticOverflow)?;
            }
        }

        if is_first {
            update.total_subscribers = update
                .total_subscribers
                .checked_add(1)
                .ok_or(ErrorCode::ArithmeticOverflow)?;
        }

        Ok(update)
    }

    pub fn apply(&mut self, update: AnalyticsUpdate) {
        self.native_earnings = update.native_earnings;
        self.token_earnings = update.token_earnings;
        self.total_subscribers = update.total_subscribers;
    }

    pub fn record_payment(
        &mut self,
        is_first: bool,
        amount: u64,
        instrument: &PaymentInstrument,
    ) -> Result<()> {
        let update = self.prepare_payment(is_first, amount, instrument)?;
        self.apply(update);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn analytics() -> CreatorAnalytics {
        CreatorAnalytics {
            creator: Pubkey::new_unique(),
            native_earnings: 0,
            token_earnings: 0,
            total_subscribers: 0,
            bump: 255,
        }
    }

    #[test]
    fn earnings_go_to_the_matching_bucket() {
        let mut analytics = analytics();
        analytics
            .record_payment(true, 950, &PaymentInstrument::Native)
            .unwrap();
        analytics
            .record_payment(false, 40, &PaymentInstrument::Token(Pubkey::new_unique()))
            .unwrap();

        assert_eq!(analytics.native_earnings, 950);
        assert_eq!(analytics.token_earnings, 40);
        assert_eq!(analytics.total_subscribers, 1);
    }

    #[test]
    fn renewals_do_not_count_as_new_subscribers() {
        let mut analytics = analytics();
        analytics
            .record_payment(true, 1, &PaymentInstrument::Native)
            .unwrap();
        for _ in 0..5 {
            analytics
                .record_payment(false, 1, &PaymentInstrument::Native)
                .unwrap();
        }
        assert_eq!(analytics.total_subscribers, 1);
        assert_eq!(analytics.native_earnings, 6);
    }

    #[test]
    fn prepare_does_not_write() {
        let analytics = analytics();
        let update = analytics
            .prepare_payment(true, 10, &PaymentInstrument::Native)
            .unwrap();
        assert_eq!(analytics.total_subscribers, 0);
        assert_eq!(update.total_subscribers, 1);
    }

    #[test]
    fn overflow_leaves_counters_untouched() {
        let mut analytics = analytics();
        analytics.native_earnings = u128::MAX;
        analytics.total_subscribers = 3;
        assert_eq!(
            analytics
                .record_payment(true, 1, &PaymentInstrument::Native)
                .unwrap_err(),
            ErrorCode::ArithmeticOverflow.into()
        );
        assert_eq!(analytics.total_subscribers, 3);
    }
}
