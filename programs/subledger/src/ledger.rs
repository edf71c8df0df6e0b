//! Applies payments and status transitions across the accounts a single
//! (creator, user) pair touches.
//!
//! Every fallible check runs before the first transfer, so once value has
//! moved the remaining bookkeeping cannot fail halfway.

use crate::{
    error::ErrorCode,
    expiry::next_expiry,
    payments::{collect_and_distribute, Distribution, Payments},
    state::*,
};
use anchor_lang::prelude::*;

pub struct LedgerAccounts<'a> {
    pub subscription: &'a mut Subscription,
    pub analytics: &'a mut CreatorAnalytics,
    pub history: &'a mut SubscriptionHistory,
    pub active: &'a mut ActiveSubscriptions,
}

/// What is being bought.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Charge {
    pub tier_index: u8,
    pub price: u64,
    pub duration: u64,
    pub instrument: PaymentInstrument,
}

impl Charge {
    pub fn native(tier_index: u8, plan: &SubscriptionPlan) -> Self {
        Self {
            tier_index,
            price: plan.native_price,
            duration: plan.duration,
            instrument: PaymentInstrument::Native,
        }
    }

    pub fn token(tier_index: u8, plan: &SubscriptionPlan, mint: Pubkey) -> Self {
        Self {
            tier_index,
            price: plan.token_price,
            duration: plan.duration,
            instrument: PaymentInstrument::Token(mint),
        }
    }
}

/// Platform settings a payment is settled under.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Terms {
    pub fee_bps: u16,
    pub history_limit: u16,
}

impl From<&PlatformConfig> for Terms {
    fn from(config: &PlatformConfig) -> Self {
        Self {
            fee_bps: config.fee_bps,
            history_limit: config.history_limit,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Settlement {
    pub record: SubscriptionRecord,
    pub distribution: Distribution,
    pub first_payment: bool,
}

/// Collect `charge` from the payer and extend the subscription.
pub fn settle<P: Payments + ?Sized>(
    accounts: &mut LedgerAccounts,
    payments: &mut P,
    charge: &Charge,
    terms: &Terms,
    now: i64,
) -> Result<Settlement> {
    let subscription = &mut *accounts.subscription;
    subscription.require_idle()?;
    require!(!subscription.is_suspended(), ErrorCode::AlreadySuspended);

    let creator = subscription.creator;
    let new_expiry = next_expiry(subscription.expiry, now, charge.duration)?;
    accounts.active.ensure_room_for(&creator)?;
    subscription
        .payments_made
        .checked_add(1)
        .ok_or(ErrorCode::ArithmeticOverflow)?;

    let first_payment = subscription.is_first_payment();
    let expected = Distribution::new(charge.price, terms.fee_bps)?;
    let analytics_update = accounts.analytics.prepare_payment(
        first_payment,
        expected.creator_share,
        &charge.instrument,
    )?;

    subscription.enter()?;
    let paid = payments
        .before_transfers(subscription)
        .and_then(|_| collect_and_distribute(payments, charge.price, terms.fee_bps));
    subscription.leave();
    let distribution = paid?;

    subscription.record_payment(charge.tier_index, new_expiry, now)?;
    accounts.analytics.apply(analytics_update);
    accounts.active.add(creator)?;

    let record = SubscriptionRecord {
        user: subscription.user,
        creator,
        tier_index: charge.tier_index,
        start_time: now,
        end_time: new_expiry,
        amount: charge.price,
        instrument: charge.instrument,
    };
    accounts.history.record(record.clone(), terms.history_limit);

    Ok(Settlement {
        record,
        distribution,
        first_payment,
    })
}

/// Park a live subscription. Returns the parked expiry.
pub fn suspend(
    subscription: &mut Subscription,
    active: &mut ActiveSubscriptions,
    now: i64,
) -> Result<i64> {
    let parked = subscription.suspend(now)?;
    active.remove(&subscription.creator);
    Ok(parked)
}

/// Restore a parked subscription. Returns whether it came back live; only a
/// live one rejoins the active set.
pub fn reactivate(
    subscription: &mut Subscription,
    active: &mut ActiveSubscriptions,
    now: i64,
) -> Result<bool> {
    if subscription.suspended_expiry > now {
        active.ensure_room_for(&subscription.creator)?;
    }
    let live = subscription.reactivate(now)?;
    if live {
        active.add(subscription.creator)?;
    }
    Ok(live)
}

pub fn cancel_suspended(
    subscription: &mut Subscription,
    active: &mut ActiveSubscriptions,
) -> Result<()> {
    subscription.cancel_suspended()?;
    active.remove(&subscription.creator);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::payments::{tests::MockPayments, PaymentLeg};

    const DAY: i64 = 86_400;

    struct Fixture {
        subscription: Subscription,
        analytics: CreatorAnalytics,
        history: SubscriptionHistory,
        active: ActiveSubscriptions,
    }

    impl Fixture {
        fn new() -> Self {
            let (creator, user) = (Pubkey::new_unique(), Pubkey::new_unique());
            Self {
                subscription: Subscription::new(creator, user, 255),
                analytics: CreatorAnalytics {
                    creator,
                    native_earnings: 0,
                    token_earnings: 0,
                    total_subscribers: 0,
                    bump: 255,
                },
                history: SubscriptionHistory::new(user, 255),
                active: ActiveSubscriptions::new(user, 255),
            }
        }

        fn settle(&mut self, payments: &mut MockPayments, charge: &Charge, now: i64) -> Result<Settlement> {
            let mut accounts = LedgerAccounts {
                subscription: &mut self.subscription,
                analytics: &mut self.analytics,
                history: &mut self.history,
                active: &mut self.active,
            };
            settle(&mut accounts, payments, charge, &terms(), now)
        }

        fn pay(&mut self, charge: &Charge, now: i64) -> Settlement {
            self.settle(&mut MockPayments::default(), charge, now).unwrap()
        }

        fn creator(&self) -> Pubkey {
            self.subscription.creator
        }
    }

    fn terms() -> Terms {
        Terms {
            fee_bps: 500,
            history_limit: 20,
        }
    }

    fn monthly(price: u64) -> Charge {
        Charge {
            tier_index: 0,
            price,
            duration: 30 * DAY as u64,
            instrument: PaymentInstrument::Native,
        }
    }

    #[test]
    fn extends_live_and_restarts_lapsed() {
        let mut fx = Fixture::new();
        let charge = monthly(100);

        assert_eq!(fx.pay(&charge, 0).record.end_time, 30 * DAY);
        assert_eq!(fx.pay(&charge, 15 * DAY).record.end_time, 60 * DAY);
        assert_eq!(fx.pay(&charge, 70 * DAY).record.end_time, 100 * DAY);
        assert_eq!(fx.subscription.expiry, 100 * DAY);
        assert_eq!(fx.subscription.payments_made, 3);
    }

    #[test]
    fn splits_and_records_payment() {
        let mut fx = Fixture::new();
        let mut payments = MockPayments::default();
        let settlement = fx.settle(&mut payments, &monthly(1000), 10).unwrap();

        assert_eq!(settlement.distribution.creator_share, 950);
        assert_eq!(settlement.distribution.platform_fee, 50);
        assert_eq!(
            payments.legs,
            vec![(PaymentLeg::Creator, 950), (PaymentLeg::Treasury, 50)]
        );
        assert_eq!(payments.saw_in_flight, Some(true));
        assert!(!fx.subscription.in_flight);

        assert_eq!(fx.analytics.native_earnings, 950);
        assert_eq!(fx.analytics.total_subscribers, 1);
        assert!(fx.active.contains(&fx.creator()));
        assert_eq!(fx.history.records, vec![settlement.record.clone()]);
        assert_eq!(settlement.record.amount, 1000);
        assert_eq!(settlement.record.start_time, 10);
    }

    #[test]
    fn renewals_are_not_new_subscribers() {
        let mut fx = Fixture::new();
        assert!(fx.pay(&monthly(100), 0).first_payment);
        assert!(!fx.pay(&monthly(100), DAY).first_payment);
        assert!(!fx.pay(&monthly(100), 90 * DAY).first_payment);

        assert_eq!(fx.analytics.total_subscribers, 1);
        assert_eq!(fx.active.creators, vec![fx.creator()]);
        assert_eq!(fx.history.records.len(), 3);
    }

    #[test]
    fn subscriber_paying_at_time_zero_is_counted_once() {
        let mut fx = Fixture::new();
        for now in [0, 10, 20] {
            fx.pay(&monthly(100), now);
        }
        assert_eq!(fx.analytics.total_subscribers, 1);
        assert_eq!(fx.subscription.first_subscribed_at, 0);
        assert_eq!(fx.subscription.payments_made, 3);
    }

    #[test]
    fn token_payments_land_in_token_earnings() {
        let mut fx = Fixture::new();
        let charge = Charge {
            instrument: PaymentInstrument::Token(Pubkey::new_unique()),
            ..monthly(200)
        };
        fx.pay(&charge, 0);
        assert_eq!(fx.analytics.token_earnings, 190);
        assert_eq!(fx.analytics.native_earnings, 0);
    }

    #[test]
    fn failed_leg_leaves_state_untouched() {
        for leg in [PaymentLeg::Creator, PaymentLeg::Treasury] {
            let mut fx = Fixture::new();
            fx.pay(&monthly(1000), 0);

            let subscription = fx.subscription.clone();
            let analytics = fx.analytics.clone();
            let history = fx.history.clone();
            let active = fx.active.clone();

            let mut payments = MockPayments {
                fail_on: Some(leg),
                ..Default::default()
            };
            assert_eq!(
                fx.settle(&mut payments, &monthly(1000), DAY).unwrap_err(),
                ErrorCode::TransferFailed.into()
            );
            assert_eq!(fx.subscription, subscription);
            assert_eq!(fx.analytics, analytics);
            assert_eq!(fx.history, history);
            assert_eq!(fx.active, active);
        }
    }

    #[test]
    fn full_active_set_rejects_before_paying() {
        let mut fx = Fixture::new();
        while fx.active.creators.len() < crate::constants::MAX_ACTIVE_SUBSCRIPTIONS {
            fx.active.add(Pubkey::new_unique()).unwrap();
        }
        let mut payments = MockPayments::default();
        assert_eq!(
            fx.settle(&mut payments, &monthly(100), 0).unwrap_err(),
            ErrorCode::ActiveSetFull.into()
        );
        assert!(payments.legs.is_empty());
        assert_eq!(fx.subscription.expiry, 0);
    }

    #[test]
    fn suspended_subscription_cannot_be_paid() {
        let mut fx = Fixture::new();
        fx.pay(&monthly(100), 0);
        suspend(&mut fx.subscription, &mut fx.active, DAY).unwrap();

        let mut payments = MockPayments::default();
        assert_eq!(
            fx.settle(&mut payments, &monthly(100), DAY).unwrap_err(),
            ErrorCode::AlreadySuspended.into()
        );
        assert!(payments.legs.is_empty());
    }

    #[test]
    fn in_flight_subscription_cannot_be_paid() {
        let mut fx = Fixture::new();
        fx.subscription.in_flight = true;
        let mut payments = MockPayments::default();
        assert_eq!(
            fx.settle(&mut payments, &monthly(100), 0).unwrap_err(),
            ErrorCode::ReentrantCall.into()
        );
        assert!(payments.legs.is_empty());
    }

    #[test]
    fn suspend_reactivate_round_trip() {
        let mut fx = Fixture::new();
        fx.pay(&monthly(100), 0);
        let creator = fx.creator();

        assert_eq!(suspend(&mut fx.subscription, &mut fx.active, 10 * DAY).unwrap(), 30 * DAY);
        assert!(!fx.active.contains(&creator));

        assert!(reactivate(&mut fx.subscription, &mut fx.active, 20 * DAY).unwrap());
        assert_eq!(fx.subscription.expiry, 30 * DAY);
        assert!(fx.active.contains(&creator));
    }

    #[test]
    fn reactivating_after_expiry_stays_out_of_active_set() {
        let mut fx = Fixture::new();
        fx.pay(&monthly(100), 0);
        suspend(&mut fx.subscription, &mut fx.active, DAY).unwrap();

        assert!(!reactivate(&mut fx.subscription, &mut fx.active, 31 * DAY).unwrap());
        assert!(!fx.active.contains(&fx.creator()));
        assert_eq!(fx.subscription.expiry, 30 * DAY);
    }

    #[test]
    fn suspend_after_expiry_is_rejected() {
        let mut fx = Fixture::new();
        fx.pay(&monthly(100), 0);
        assert_eq!(
            suspend(&mut fx.subscription, &mut fx.active, 30 * DAY).unwrap_err(),
            ErrorCode::NoActiveSubscription.into()
        );
        assert_eq!(fx.subscription.suspended_expiry, 0);
    }

    #[test]
    fn cancelled_subscription_starts_over_from_now() {
        let mut fx = Fixture::new();
        fx.pay(&monthly(100), 0);
        suspend(&mut fx.subscription, &mut fx.active, DAY).unwrap();
        cancel_suspended(&mut fx.subscription, &mut fx.active).unwrap();

        let settlement = fx.pay(&monthly(100), 2 * DAY);
        assert_eq!(settlement.record.end_time, 32 * DAY);
        assert!(!settlement.first_payment);
        assert_eq!(fx.analytics.total_subscribers, 1);
    }

    #[test]
    fn history_bound_applies_through_settlement() {
        let mut fx = Fixture::new();
        let terms = Terms {
            fee_bps: 500,
            history_limit: 2,
        };
        for (tier_index, now) in [(0, 0), (1, DAY), (2, 2 * DAY)] {
            let mut accounts = LedgerAccounts {
                subscription: &mut fx.subscription,
                analytics: &mut fx.analytics,
                history: &mut fx.history,
                active: &mut fx.active,
            };
            let charge = Charge {
                tier_index,
                ..monthly(100)
            };
            settle(&mut accounts, &mut MockPayments::default(), &charge, &terms, now).unwrap();
        }
        let tiers: Vec<u8> = fx.history.records.iter().map(|r| r.tier_index).collect();
        assert_eq!(tiers, vec![1, 2]);
    }
}
