use crate::{constants::*, error::ErrorCode};
use anchor_lang::prelude::*;

#[derive(AnchorSerialize, AnchorDeserialize, InitSpace, Clone, Debug, PartialEq, Eq)]
pub struct SubscriptionPlan {
    pub native_price: u64, // lamports
    pub token_price: u64,  // token base units
    pub duration: u64,     // seconds
    #[max_len(128)]
    pub description: String,
    #[max_len(256)]
    pub benefits: String,
    pub active: bool,
}

impl SubscriptionPlan {
    pub fn validate(&self) -> Result<()> {
        require!(
            (MIN_PLAN_DURATION..=MAX_PLAN_DURATION).contains(&self.duration),
            ErrorCode::InvalidDuration
        );
        require!(
            self.description.len() <= MAX_PLAN_DESCRIPTION_LENGTH,
            ErrorCode::InvalidStringLength
        );
        require!(
            self.benefits.len() <= MAX_PLAN_BENEFITS_LENGTH,
            ErrorCode::InvalidStringLength
        );
        Ok(())
    }
}

/// Ordered list of a creator's plans. Indices are stable: plans are
/// overwritten or deactivated, never removed.
#[account]
#[derive(InitSpace, Debug, PartialEq)]
pub struct TierRegistry {
    pub creator: Pubkey,
    #[max_len(10)]
    pub plans: Vec<SubscriptionPlan>,
    pub bump: u8,
}

impl TierRegistry {
    pub fn tier_count(&self) -> u8 {
        self.plans.len() as u8
    }

    /// Overwrite the plan at `index`, or append when `index` is one past the end.
    /// Returns true when the plan was appended.
    pub fn upsert_plan(&mut self, index: u8, plan: SubscriptionPlan) -> Result<bool> {
        plan.validate()?;

        let index = usize::from(index);
        let len = self.plans.len();
        if index < len {
            self.plans[index] = plan;
            return Ok(false);
        }

        require!(index == len, ErrorCode::InvalidTierIndex);
        require!(len < MAX_PLANS_PER_CREATOR, ErrorCode::TierLimitExceeded);
        self.plans.push(plan);
        Ok(true)
    }

    /// Flip the active flag, returning the new value.
    pub fn toggle_active(&mut self, index: u8) -> Result<bool> {
        let plan = self
            .plans
            .get_mut(usize::from(index))
            .ok_or(ErrorCode::InvalidTierIndex)?;
        plan.active = !plan.active;
        Ok(plan.active)
    }

    /// Administrative read, regardless of status.
    pub fn plan(&self, index: u8) -> Result<&SubscriptionPlan> {
        Ok(self
            .plans
            .get(usize::from(index))
            .ok_or(ErrorCode::InvalidTierIndex)?)
    }

    /// Read for the subscribe path: the plan must be on sale.
    pub fn active_plan(&self, index: u8) -> Result<&SubscriptionPlan> {
        let plan = self.plan(index)?;
        require!(plan.active, ErrorCode::PlanNotActive);
        Ok(plan)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn plan(native_price: u64, days: u64) -> SubscriptionPlan {
        SubscriptionPlan {
            native_price,
            token_price: native_price / 10,
            duration: days * SECONDS_PER_DAY,
            description: "Monthly".to_string(),
            benefits: "Early access".to_string(),
            active: true,
        }
    }

    fn registry() -> TierRegistry {
        TierRegistry {
            creator: Pubkey::new_unique(),
            plans: Vec::new(),
            bump: 255,
        }
    }

    #[test]
    fn append_then_overwrite_keeps_indices() {
        let mut registry = registry();
        assert!(registry.upsert_plan(0, plan(100, 30)).unwrap());
        assert!(registry.upsert_plan(1, plan(250, 90)).unwrap());
        assert_eq!(registry.tier_count(), 2);

        assert!(!registry.upsert_plan(0, plan(120, 30)).unwrap());
        assert_eq!(registry.tier_count(), 2);
        assert_eq!(registry.plan(0).unwrap().native_price, 120);
        assert_eq!(registry.plan(1).unwrap().native_price, 250);
    }

    #[test]
    fn gap_index_is_rejected() {
        let mut registry = registry();
        assert_eq!(
            registry.upsert_plan(1, plan(100, 30)).unwrap_err(),
            ErrorCode::InvalidTierIndex.into()
        );
        assert!(registry.plans.is_empty());
    }

    #[test]
    fn eleventh_plan_is_rejected() {
        let mut registry = registry();
        for i in 0..MAX_PLANS_PER_CREATOR as u8 {
            registry.upsert_plan(i, plan(100, 30)).unwrap();
        }
        assert_eq!(
            registry
                .upsert_plan(MAX_PLANS_PER_CREATOR as u8, plan(100, 30))
                .unwrap_err(),
            ErrorCode::TierLimitExceeded.into()
        );
        // overwriting at capacity is still fine
        assert!(!registry.upsert_plan(9, plan(1, 30)).unwrap());
    }

    #[test]
    fn duration_bounds() {
        let mut registry = registry();
        let mut short = plan(100, 1);
        short.duration -= 1;
        assert_eq!(
            registry.upsert_plan(0, short).unwrap_err(),
            ErrorCode::InvalidDuration.into()
        );

        let mut long = plan(100, 365);
        long.duration += 1;
        assert_eq!(
            registry.upsert_plan(0, long).unwrap_err(),
            ErrorCode::InvalidDuration.into()
        );

        assert!(registry.upsert_plan(0, plan(100, 1)).is_ok());
        assert!(registry.upsert_plan(1, plan(100, 365)).is_ok());
    }

    #[test]
    fn text_bounds() {
        let mut registry = registry();
        let mut wordy = plan(100, 30);
        wordy.description = "x".repeat(MAX_PLAN_DESCRIPTION_LENGTH + 1);
        assert_eq!(
            registry.upsert_plan(0, wordy).unwrap_err(),
            ErrorCode::InvalidStringLength.into()
        );

        let mut wordy = plan(100, 30);
        wordy.benefits = "x".repeat(MAX_PLAN_BENEFITS_LENGTH + 1);
        assert_eq!(
            registry.upsert_plan(0, wordy).unwrap_err(),
            ErrorCode::InvalidStringLength.into()
        );
    }

    #[test]
    fn toggle_and_active_reads() {
        let mut registry = registry();
        registry.upsert_plan(0, plan(100, 30)).unwrap();

        assert!(!registry.toggle_active(0).unwrap());
        assert_eq!(
            registry.active_plan(0).unwrap_err(),
            ErrorCode::PlanNotActive.into()
        );
        // administrative read ignores the flag
        assert!(!registry.plan(0).unwrap().active);

        assert!(registry.toggle_active(0).unwrap());
        assert!(registry.active_plan(0).is_ok());

        assert_eq!(
            registry.toggle_active(3).unwrap_err(),
            ErrorCode::InvalidTierIndex.into()
        );
        assert_eq!(
            registry.plan(3).unwrap_err(),
            ErrorCode::InvalidTierIndex.into()
        );
    }
}
