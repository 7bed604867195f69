//! ERC20 and TokenFarm contract bindings.

use alloy_primitives::{Address, U256};
use alloy_sol_types::{sol, SolCall};
use std::str::FromStr;

sol! {
    /// Subset of the ERC20 interface used by the dashboard
    interface IERC20 {
        function balanceOf(address account) external view returns (uint256);
        function approve(address spender, uint256 amount) external returns (bool);
    }

    /// Staking contract the tokens are deposited into
    interface ITokenFarm {
        function stakeTokens(uint256 amount, address token) external;
        function unstakeTokens(address token) external;
        function stakingBalance(address token, address user) external view returns (uint256);
    }
}

/// A state-changing contract call submitted through the wallet provider
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ContractCall {
    /// Allow `spender` to transfer up to `amount` of `token`
    Approve { token: String, spender: String, amount: String },
    Stake { token_farm: String, token: String, amount: String },
    Unstake { token_farm: String, token: String },
}

impl ContractCall {
    /// Address of the contract receiving the call
    pub fn target(&self) -> &str {
        match self {
            ContractCall::Approve { token, .. } => token,
            ContractCall::Stake { token_farm, .. } | ContractCall::Unstake { token_farm, .. } => {
                token_farm
            }
        }
    }

    /// Human readable transaction name
    pub fn name(&self) -> &'static str {
        match self {
            ContractCall::Approve { .. } => "Approve ERC20 transfer",
            ContractCall::Stake { .. } => "Stake Tokens",
            ContractCall::Unstake { .. } => "Unstake Tokens",
        }
    }

    /// ABI-encoded calldata
    pub fn encode(&self) -> Result<Vec<u8>, String> {
        match self {
            ContractCall::Approve { spender, amount, .. } => Ok(IERC20::approveCall {
                spender: parse_address(spender)?,
                amount: parse_amount(amount)?,
            }
            .abi_encode()),
            ContractCall::Stake { token, amount, .. } => Ok(ITokenFarm::stakeTokensCall {
                amount: parse_amount(amount)?,
                token: parse_address(token)?,
            }
            .abi_encode()),
            ContractCall::Unstake { token, .. } => Ok(ITokenFarm::unstakeTokensCall {
                token: parse_address(token)?,
            }
            .abi_encode()),
        }
    }
}

pub fn balance_of_calldata(account: &str) -> Result<Vec<u8>, String> {
    Ok(IERC20::balanceOfCall { account: parse_address(account)? }.abi_encode())
}

pub fn staking_balance_calldata(token: &str, user: &str) -> Result<Vec<u8>, String> {
    Ok(ITokenFarm::stakingBalanceCall {
        token: parse_address(token)?,
        user: parse_address(user)?,
    }
    .abi_encode())
}

pub fn parse_address(address: &str) -> Result<Address, String> {
    Address::from_str(address.trim()).map_err(|e| format!("Invalid address {}: {}", address, e))
}

/// Parse a base-unit integer amount
pub fn parse_amount(amount: &str) -> Result<U256, String> {
    U256::from_str_radix(amount.trim(), 10).map_err(|e| format!("Invalid amount {}: {}", amount, e))
}

/// Decode a single `uint256` return word
pub fn decode_uint256(data: &[u8]) -> Result<U256, String> {
    if data.is_empty() {
        return Err("No contract code at this address (empty return data)".to_string());
    }
    if data.len() < 32 {
        return Err(format!("Expected 32 bytes of return data, got {}", data.len()));
    }
    U256::try_from_be_slice(&data[..32]).ok_or_else(|| "Invalid uint256 return data".to_string())
}
