//! Token amount helpers

use alloy::primitives::U256;

/// Decimals of both the native token and the staking token
pub const TOKEN_DECIMALS: u8 = 18;

/// Scale a whole-token amount by `10^decimals`
pub fn format_amount(amount: u64, decimals: u8) -> U256 {
    U256::from(amount) * U256::from(10u64).pow(U256::from(decimals))
}

/// Whole ether to wei
pub fn ether(amount: u64) -> U256 {
    format_amount(amount, TOKEN_DECIMALS)
}

/// An account is funded once its balance reaches the threshold
pub fn is_funded(balance: U256, threshold: U256) -> bool {
    balance >= threshold
}
