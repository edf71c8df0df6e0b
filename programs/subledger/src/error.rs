use anchor_lang::prelude::*;

#[error_code]
pub enum ErrorCode {
    // Authorization errors
    #[msg("Signer is not the platform authority")]
    NotOwner,
    #[msg("Signer is not the creator of this registry")]
    NotCreator,
    #[msg("Signer is not the pending authority")]
    NotPendingOwner,
    #[msg("Unauthorized user")]
    UnauthorizedUser,

    // State errors
    #[msg("Protocol is paused")]
    ProtocolPaused,
    #[msg("Creator is not registered or has been deactivated")]
    InvalidCreator,
    #[msg("Invalid tier index")]
    InvalidTierIndex,
    #[msg("Plan not active")]
    PlanNotActive,
    #[msg("No active subscription")]
    NoActiveSubscription,
    #[msg("Subscription already suspended")]
    AlreadySuspended,
    #[msg("No suspended subscription")]
    NoSuspendedSubscription,
    #[msg("Subscription is already inside a payment")]
    ReentrantCall,
    #[msg("Cannot subscribe to yourself")]
    CannotSubscribeToSelf,
    #[msg("Auto-renewal is not enabled")]
    AutoRenewalDisabled,
    #[msg("Subscription is not due for renewal yet")]
    RenewalNotDue,

    // Validation errors
    #[msg("Invalid address")]
    InvalidAddress,
    #[msg("Plan duration must be between 1 and 365 days")]
    InvalidDuration,
    #[msg("String is too long")]
    InvalidStringLength,
    #[msg("Creator already has the maximum number of plans")]
    TierLimitExceeded,
    #[msg("Batch accounts do not match the expected layout")]
    ArrayLengthMismatch,
    #[msg("Insufficient payment")]
    InsufficientPayment,
    #[msg("Insufficient delegated allowance")]
    InsufficientAllowance,
    #[msg("Insufficient balance")]
    InsufficientBalance,
    #[msg("Fee rate exceeds the platform maximum")]
    InvalidFeeRate,
    #[msg("Invalid grace period")]
    InvalidGracePeriod,
    #[msg("Invalid history limit")]
    InvalidHistoryLimit,
    #[msg("Too many active subscriptions")]
    ActiveSetFull,
    #[msg("Token whitelist is full")]
    TokenLimitExceeded,
    #[msg("Token already whitelisted")]
    TokenAlreadySupported,
    #[msg("Token account does not match the expected owner or mint, or is frozen")]
    InvalidTokenAccount,
    #[msg("Invalid query range")]
    InvalidQueryRange,
    #[msg("Account must be writable")]
    AccountNotWritable,

    // Transfer errors
    #[msg("Transfer failed")]
    TransferFailed,
    #[msg("Token not supported")]
    TokenNotSupported,
    #[msg("No funds to withdraw")]
    NoFundsToWithdraw,

    // Math errors
    #[msg("Arithmetic overflow")]
    ArithmeticOverflow,
}
