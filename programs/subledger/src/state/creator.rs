use anchor_lang::prelude::*;

#[account]
#[derive(InitSpace, Debug, PartialEq)]
pub struct Creator {
    pub wallet: Pubkey,
    #[max_len(64)]
    pub name: String,
    #[max_len(200)]
    pub description: String,
    pub is_active: bool, // cleared by the platform authority for moderation
    pub created_at: i64,
    pub bump: u8,
}
