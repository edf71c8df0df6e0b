pub mod admin;
pub mod auto_renewal;
pub mod initialize;
pub mod manage_plans;
pub mod process_renewals;
pub mod queries;
pub mod register_creator;
pub mod subscribe;
pub mod subscribe_with_token;
pub mod subscription_status;
pub mod token_whitelist;
pub mod withdraw_platform_fees;

pub use admin::*;
pub use auto_renewal::*;
pub use initialize::*;
pub use manage_plans::*;
pub use process_renewals::*;
pub use queries::*;
pub use register_creator::*;
pub use subscribe::*;
pub use subscribe_with_token::*;
pub use subscription_status::*;
pub use token_whitelist::*;
pub use withdraw_platform_fees::*;
