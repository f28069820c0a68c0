//! EIP-2612 permit signing.
//!
//! The digest is built locally over the token's EIP-712 domain
//! (`name`, version `"1"`, chain id, contract address) and signed with the
//! configured key, so approvals can be granted without the owner paying gas
//! for an `approve` call.

use std::borrow::Cow;

use alloy::primitives::{Address, B256, U256};
use alloy::signers::Signature;
use alloy::sol;
use alloy::sol_types::{Eip712Domain, SolStruct};

sol! {
    /// EIP-2612 permit message.
    struct Permit {
        address owner;
        address spender;
        uint256 value;
        uint256 nonce;
        uint256 deadline;
    }
}

/// Permit domain version used by OpenZeppelin's ERC20Permit.
pub const PERMIT_VERSION: &str = "1";

/// EIP-712 domain of the token contract.
pub fn permit_domain(token_name: String, chain_id: u64, contract: Address) -> Eip712Domain {
    Eip712Domain::new(
        Some(Cow::Owned(token_name)),
        Some(Cow::Borrowed(PERMIT_VERSION)),
        Some(U256::from(chain_id)),
        Some(contract),
        None,
    )
}

/// Digest the owner signs for `permit`.
pub fn permit_digest(domain: &Eip712Domain, permit: &Permit) -> B256 {
    permit.eip712_signing_hash(domain)
}

/// Permit arguments ready for submission.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SignedPermit {
    pub owner: Address,
    pub spender: Address,
    pub value: U256,
    pub deadline: U256,
    pub v: u8,
    pub r: B256,
    pub s: B256,
}

impl SignedPermit {
    /// Split a 65-byte signature into the `(v, r, s)` form `permit` expects.
    pub fn new(permit: &Permit, signature: &Signature) -> Self {
        Self {
            owner: permit.owner,
            spender: permit.spender,
            value: permit.value,
            deadline: permit.deadline,
            v: 27 + signature.v() as u8,
            r: B256::from(signature.r().to_be_bytes::<32>()),
            s: B256::from(signature.s().to_be_bytes::<32>()),
        }
    }
}
