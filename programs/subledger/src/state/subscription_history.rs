use crate::constants::MAX_HISTORY_LENGTH;
use anchor_lang::prelude::*;

#[derive(AnchorSerialize, AnchorDeserialize, InitSpace, Clone, Copy, Debug, PartialEq, Eq)]
pub enum PaymentInstrument {
    Native,
    Token(Pubkey),
}

#[derive(AnchorSerialize, AnchorDeserialize, InitSpace, Clone, Debug, PartialEq, Eq)]
pub struct SubscriptionRecord {
    pub user: Pubkey,
    pub creator: Pubkey,
    pub tier_index: u8,
    pub start_time: i64,
    pub end_time: i64,
    pub amount: u64,
    pub instrument: PaymentInstrument,
}

/// Most recent subscription payments of one user, oldest first.
#[account]
#[derive(InitSpace, Debug, PartialEq)]
pub struct SubscriptionHistory {
    pub user: Pubkey,
    #[max_len(20)]
    pub records: Vec<SubscriptionRecord>,
    pub bump: u8,
}

impl SubscriptionHistory {
    pub fn new(user: Pubkey, bump: u8) -> Self {
        Self {
            user,
            records: Vec::new(),
            bump,
        }
    }

    /// Append `record`, evicting the oldest entries so at most `limit` remain.
    pub fn record(&mut self, record: SubscriptionRecord, limit: u16) {
        let limit = usize::from(limit).clamp(1, MAX_HISTORY_LENGTH);
        while self.records.len() >= limit {
            self.records.remove(0);
        }
        self.records.push(record);
    }

    pub fn page(&self, start: u16, limit: u16) -> Vec<SubscriptionRecord> {
        self.records
            .iter()
            .skip(usize::from(start))
            .take(usize::from(limit))
            .cloned()
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(tier_index: u8, start_time: i64) -> SubscriptionRecord {
        SubscriptionRecord {
            user: Pubkey::default(),
            creator: Pubkey::default(),
            tier_index,
            start_time,
            end_time: start_time + 10,
            amount: 100,
            instrument: PaymentInstrument::Native,
        }
    }

    fn history() -> SubscriptionHistory {
        SubscriptionHistory::new(Pubkey::new_unique(), 255)
    }

    #[test]
    fn bound_of_two_keeps_latest() {
        let mut history = history();
        let (a, b, c) = (record(0, 1), record(1, 2), record(2, 3));
        history.record(a, 2);
        history.record(b.clone(), 2);
        history.record(c.clone(), 2);
        assert_eq!(history.records, vec![b, c]);
    }

    #[test]
    fn lowered_limit_trims_on_next_write() {
        let mut history = history();
        for i in 0..5 {
            history.record(record(i, i as i64), 10);
        }
        history.record(record(9, 9), 3);
        let tiers: Vec<u8> = history.records.iter().map(|r| r.tier_index).collect();
        assert_eq!(tiers, vec![3, 4, 9]);
    }

    #[test]
    fn never_exceeds_account_capacity() {
        let mut history = history();
        for i in 0..(MAX_HISTORY_LENGTH as i64 + 5) {
            history.record(record(0, i), u16::MAX);
        }
        assert_eq!(history.records.len(), MAX_HISTORY_LENGTH);
        assert_eq!(history.records[0].start_time, 5);
    }

    #[test]
    fn pages() {
        let mut history = history();
        for i in 0..5 {
            history.record(record(i, i as i64), 20);
        }
        let page = history.page(3, 8);
        assert_eq!(page.len(), 2);
        assert_eq!(page[0].tier_index, 3);
        assert!(history.page(9, 8).is_empty());
    }
}
