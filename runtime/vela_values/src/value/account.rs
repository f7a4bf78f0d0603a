//! Account-facing value payloads.

use vela_ir::Name;

use super::AddressValue;

/// Handle to an account with full authorization.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct AuthAccountValue {
    pub address: AddressValue,
}

/// Handle to the public surface of an account.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct PublicAccountValue {
    pub address: AddressValue,
}

/// Handle to the contract-management surface of an authorized account.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct AuthAccountContractsValue {
    pub address: AddressValue,
}

/// A contract deployed to an account.
#[derive(Clone, Debug)]
pub struct DeployedContractValue {
    pub address: AddressValue,
    pub name: Name,
    pub code: Vec<u8>,
}
