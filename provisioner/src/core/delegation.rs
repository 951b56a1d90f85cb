//! Stake delegation payload
//!
//! The staking contract receives `owner || operator || authorizer` as the
//! extra data of `approveAndCall`, each address packed as its raw 20 bytes.

use alloy::primitives::{Address, Bytes};

const ADDRESS_LEN: usize = 20;

pub const DELEGATION_PAYLOAD_LEN: usize = 3 * ADDRESS_LEN;

pub fn delegation_payload(owner: Address, operator: Address, authorizer: Address) -> Bytes {
    let mut payload = Vec::with_capacity(DELEGATION_PAYLOAD_LEN);
    payload.extend_from_slice(owner.as_slice());
    payload.extend_from_slice(operator.as_slice());
    payload.extend_from_slice(authorizer.as_slice());
    Bytes::from(payload)
}
