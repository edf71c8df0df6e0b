use crate::{constants::DELEGATE_SEED, error::ErrorCode, fees::split_fee, state::Subscription};
use anchor_lang::{
    prelude::*,
    solana_program::program_option::COption,
    system_program::{self, Transfer},
};
use anchor_spl::token::{self, spl_token, TransferChecked};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PaymentLeg {
    Creator,
    Treasury,
}

/// Moves value out of the payer. Implemented over CPIs on-chain and by a
/// recording double in tests.
pub trait Payments {
    /// Runs once before the first leg, with the subscription already marked in
    /// flight.
    fn before_transfers(&mut self, _subscription: &Subscription) -> Result<()> {
        Ok(())
    }

    fn transfer(&mut self, leg: PaymentLeg, amount: u64) -> Result<()>;
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Distribution {
    pub gross: u64,
    pub creator_share: u64,
    pub platform_fee: u64,
}

impl Distribution {
    pub fn new(gross: u64, fee_bps: u16) -> Result<Self> {
        let (creator_share, platform_fee) = split_fee(gross, fee_bps)?;
        Ok(Self {
            gross,
            creator_share,
            platform_fee,
        })
    }
}

/// Split `gross` and pay the creator share to the creator and the fee to the
/// treasury. Zero legs are skipped.
pub fn collect_and_distribute<P: Payments + ?Sized>(
    payments: &mut P,
    gross: u64,
    fee_bps: u16,
) -> Result<Distribution> {
    let distribution = Distribution::new(gross, fee_bps)?;

    for (leg, amount) in [
        (PaymentLeg::Creator, distribution.creator_share),
        (PaymentLeg::Treasury, distribution.platform_fee),
    ] {
        if amount == 0 {
            continue;
        }
        // On-chain a failed CPI aborts the transaction before returning here;
        // only in-process `Payments` implementations reach this mapping.
        payments.transfer(leg, amount).map_err(|err| {
            msg!("{:?} leg of {} failed: {}", leg, amount, err);
            error!(ErrorCode::TransferFailed)
        })?;
    }

    Ok(distribution)
}

/// Write the in-memory subscription to its account data so the in-flight
/// flag is visible to any program reached through a CPI.
fn persist_subscription(info: &AccountInfo, subscription: &Subscription) -> Result<()> {
    let mut data = info.try_borrow_mut_data()?;
    let mut writer: &mut [u8] = &mut data[..];
    subscription.try_serialize(&mut writer)?;
    Ok(())
}

/// Lamports from a signing payer.
pub struct NativePayments<'info> {
    pub payer: AccountInfo<'info>,
    pub creator: AccountInfo<'info>,
    pub treasury: AccountInfo<'info>,
    pub system_program: AccountInfo<'info>,
    pub subscription: AccountInfo<'info>,
}

impl<'info> Payments for NativePayments<'info> {
    fn before_transfers(&mut self, subscription: &Subscription) -> Result<()> {
        persist_subscription(&self.subscription, subscription)
    }

    fn transfer(&mut self, leg: PaymentLeg, amount: u64) -> Result<()> {
        let to = match leg {
            PaymentLeg::Creator => self.creator.clone(),
            PaymentLeg::Treasury => self.treasury.clone(),
        };
        system_program::transfer(
            CpiContext::new(
                self.system_program.clone(),
                Transfer {
                    from: self.payer.clone(),
                    to,
                },
            ),
            amount,
        )
    }
}

/// Tokens pulled from the payer's account by the program's delegate PDA.
pub struct TokenPayments<'info> {
    pub source: AccountInfo<'info>,
    pub mint: AccountInfo<'info>,
    pub creator_account: AccountInfo<'info>,
    pub treasury_account: AccountInfo<'info>,
    pub delegate: AccountInfo<'info>,
    pub token_program: AccountInfo<'info>,
    pub subscription: AccountInfo<'info>,
    pub decimals: u8,
    pub delegate_bump: u8,
}

impl<'info> Payments for TokenPayments<'info> {
    fn before_transfers(&mut self, subscription: &Subscription) -> Result<()> {
        persist_subscription(&self.subscription, subscription)
    }

    fn transfer(&mut self, leg: PaymentLeg, amount: u64) -> Result<()> {
        let to = match leg {
            PaymentLeg::Creator => self.creator_account.clone(),
            PaymentLeg::Treasury => self.treasury_account.clone(),
        };
        let delegate_seeds: &[&[&[u8]]] = &[&[DELEGATE_SEED.as_bytes(), &[self.delegate_bump]]];

        token::transfer_checked(
            CpiContext::new_with_signer(
                self.token_program.clone(),
                TransferChecked {
                    from: self.source.clone(),
                    mint: self.mint.clone(),
                    to,
                    authority: self.delegate.clone(),
                },
                delegate_seeds,
            ),
            amount,
            self.decimals,
        )
    }
}

/// Checks a payer token account can fund `price` through `delegate` before any
/// transfer is attempted.
pub fn check_token_source(
    source: &spl_token::state::Account,
    owner: &Pubkey,
    mint: &Pubkey,
    delegate: &Pubkey,
    price: u64,
) -> Result<()> {
    require_keys_eq!(source.owner, *owner, ErrorCode::InvalidTokenAccount);
    require_keys_eq!(source.mint, *mint, ErrorCode::InvalidTokenAccount);
    require!(!source.is_frozen(), ErrorCode::InvalidTokenAccount);

    let delegated = match source.delegate {
        COption::Some(current) if current == *delegate => source.delegated_amount,
        _ => 0,
    };
    require!(delegated >= price, ErrorCode::InsufficientAllowance);
    require!(source.amount >= price, ErrorCode::InsufficientBalance);
    Ok(())
}

/// Checks an account that receives one leg of a token payment. A frozen
/// destination would make the transfer abort the whole transaction.
pub fn check_token_destination(
    destination: &spl_token::state::Account,
    owner: &Pubkey,
    mint: &Pubkey,
) -> Result<()> {
    require_keys_eq!(destination.owner, *owner, ErrorCode::InvalidTokenAccount);
    require_keys_eq!(destination.mint, *mint, ErrorCode::InvalidTokenAccount);
    require!(!destination.is_frozen(), ErrorCode::InvalidTokenAccount);
    Ok(())
}
