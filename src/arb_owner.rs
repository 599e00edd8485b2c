//! The `ArbOwner` precompile: chain owner administration.
//!
//! Every operation is declared and verified, but none has behavior yet: each
//! handler reports [`HandlerError::Unimplemented`] and each cost estimator
//! prices the call at zero.

use arbos_precompile::{AbiEntry, Caller, Candidate, HandlerError, InterfaceDocument, StateHandle};
use arbos_primitives::Address;
use num_bigint::BigInt;
use num_traits::Zero;

/// Interface name of the owner precompile.
pub const NAME: &str = "ArbOwner";

/// Declared interface of the owner precompile.
pub fn interface() -> InterfaceDocument {
    let f = AbiEntry::function;
    InterfaceDocument::new(
        NAME,
        vec![
            f("addAllowedSender", "nonpayable", &["address"], &[]),
            f("addChainOwner", "nonpayable", &["address"], &[]),
            f("allowAllSenders", "nonpayable", &[], &[]),
            f("addMappingException", "nonpayable", &["uint256", "uint256"], &[]),
            f("allowOnlyOwnerToSend", "nonpayable", &[], &[]),
            f("addToReserveFunds", "payable", &[], &[]),
            f("continueCodeUpload", "nonpayable", &["bytes"], &[]),
            f("createChainParameter", "nonpayable", &["bytes32", "uint256"], &[]),
            f("deployContract", "payable", &["bytes", "address", "uint256"], &["address"]),
            f("finishCodeUploadAsArbosUpgrade", "nonpayable", &["bytes32", "bytes32"], &[]),
            f("getAllAllowedSenders", "view", &[], &["bytes"]),
            f("getAllChainOwners", "view", &[], &["bytes"]),
            f("getAllFairGasPriceSenders", "view", &[], &["bytes"]),
            f("getAllMappingExceptions", "view", &[], &["bytes"]),
            f("getChainParameter", "view", &["bytes32"], &["uint256"]),
            f("getTotalOfEthBalances", "view", &[], &["uint256"]),
            f("getLastUpgradeHash", "view", &[], &["bytes32"]),
            f("getUploadedCodeHash", "view", &[], &["bytes32"]),
            f("isAllowedSender", "view", &["address"], &["bool"]),
            f("isChainOwner", "view", &["address"], &["bool"]),
            f("isFairGasPriceSender", "view", &["address"], &["bool"]),
            f("isMappingException", "view", &["uint256", "uint256"], &["bool"]),
            f("removeAllowedSender", "nonpayable", &["address"], &[]),
            f("removeChainOwner", "nonpayable", &["address"], &[]),
            f("removeMappingException", "nonpayable", &["uint256", "uint256"], &[]),
            f("serializeAllParameters", "view", &[], &["bytes"]),
            f("setChainParameter", "nonpayable", &["bytes32", "uint256"], &[]),
            f("setFairGasPriceSender", "nonpayable", &["address", "bool"], &[]),
            f("setL1GasPriceEstimate", "nonpayable", &["uint256"], &[]),
            f("startCodeUpload", "nonpayable", &[], &[]),
            f("startCodeUploadWithCheck", "nonpayable", &["bytes32"], &[]),
        ],
    )
}

/// Owner precompile implementation.
#[derive(Debug, Default, Clone, Copy)]
pub struct ArbOwner;

type Unit = Result<(), HandlerError>;

fn unimplemented<T>() -> Result<T, HandlerError> {
    Err(HandlerError::Unimplemented)
}

fn free() -> BigInt {
    BigInt::zero()
}

impl ArbOwner {
    pub fn add_allowed_sender(&self, _caller: Caller, _state: StateHandle, _addr: Address) -> Unit {
        unimplemented()
    }

    pub fn add_allowed_sender_gas_cost(&self, _addr: Address) -> BigInt {
        free()
    }

    pub fn add_chain_owner(&self, _caller: Caller, _state: StateHandle, _new_owner: Address) -> Unit {
        unimplemented()
    }

    pub fn add_chain_owner_gas_cost(&self, _new_owner: Address) -> BigInt {
        free()
    }

    pub fn allow_all_senders(&self, _caller: Caller, _state: StateHandle) -> Unit {
        unimplemented()
    }

    pub fn allow_all_senders_gas_cost(&self) -> BigInt {
        free()
    }

    pub fn add_mapping_exception(
        &self,
        _caller: Caller,
        _state: StateHandle,
        _from: BigInt,
        _to: BigInt,
    ) -> Unit {
        unimplemented()
    }

    pub fn add_mapping_exception_gas_cost(&self, _from: BigInt, _to: BigInt) -> BigInt {
        free()
    }

    pub fn allow_only_owner_to_send(&self, _caller: Caller, _state: StateHandle) -> Unit {
        unimplemented()
    }

    pub fn allow_only_owner_to_send_gas_cost(&self) -> BigInt {
        free()
    }

    pub fn add_to_reserve_funds(&self, _caller: Caller, _state: StateHandle, _value: BigInt) -> Unit {
        unimplemented()
    }

    pub fn add_to_reserve_funds_gas_cost(&self) -> BigInt {
        free()
    }

    pub fn continue_code_upload(
        &self,
        _caller: Caller,
        _state: StateHandle,
        _marshalled_code: Vec<u8>,
    ) -> Unit {
        unimplemented()
    }

    pub fn continue_code_upload_gas_cost(&self, _marshalled_code: Vec<u8>) -> BigInt {
        free()
    }

    pub fn create_chain_parameter(
        &self,
        _caller: Caller,
        _state: StateHandle,
        _which: [u8; 32],
        _value: BigInt,
    ) -> Unit {
        unimplemented()
    }

    pub fn create_chain_parameter_gas_cost(&self, _which: [u8; 32], _value: BigInt) -> BigInt {
        free()
    }

    pub fn deploy_contract(
        &self,
        _caller: Caller,
        _state: StateHandle,
        _value: BigInt,
        _constructor_data: Vec<u8>,
        _deemed_sender: Address,
        _deemed_nonce: BigInt,
    ) -> Result<Address, HandlerError> {
        unimplemented()
    }

    pub fn deploy_contract_gas_cost(
        &self,
        _constructor_data: Vec<u8>,
        _deemed_sender: Address,
        _deemed_nonce: BigInt,
    ) -> BigInt {
        free()
    }

    pub fn finish_code_upload_as_arbos_upgrade(
        &self,
        _caller: Caller,
        _state: StateHandle,
        _new_code_hash: [u8; 32],
        _old_code_hash: [u8; 32],
    ) -> Unit {
        unimplemented()
    }

    pub fn finish_code_upload_as_arbos_upgrade_gas_cost(
        &self,
        _new_code_hash: [u8; 32],
        _old_code_hash: [u8; 32],
    ) -> BigInt {
        free()
    }

    pub fn get_all_allowed_senders(
        &self,
        _caller: Caller,
        _state: StateHandle,
    ) -> Result<Vec<u8>, HandlerError> {
        unimplemented()
    }

    pub fn get_all_allowed_senders_gas_cost(&self) -> BigInt {
        free()
    }

    pub fn get_all_chain_owners(
        &self,
        _caller: Caller,
        _state: StateHandle,
    ) -> Result<Vec<u8>, HandlerError> {
        unimplemented()
    }

    pub fn get_all_chain_owners_gas_cost(&self) -> BigInt {
        free()
    }

    pub fn get_all_fair_gas_price_senders(
        &self,
        _caller: Caller,
        _state: StateHandle,
    ) -> Result<Vec<u8>, HandlerError> {
        unimplemented()
    }

    pub fn get_all_fair_gas_price_senders_gas_cost(&self) -> BigInt {
        free()
    }

    pub fn get_all_mapping_exceptions(
        &self,
        _caller: Caller,
        _state: StateHandle,
    ) -> Result<Vec<u8>, HandlerError> {
        unimplemented()
    }

    pub fn get_all_mapping_exceptions_gas_cost(&self) -> BigInt {
        free()
    }

    pub fn get_chain_parameter(
        &self,
        _caller: Caller,
        _state: StateHandle,
        _which: [u8; 32],
    ) -> Result<BigInt, HandlerError> {
        unimplemented()
    }

    pub fn get_chain_parameter_gas_cost(&self, _which: [u8; 32]) -> BigInt {
        free()
    }

    pub fn get_total_of_eth_balances(
        &self,
        _caller: Caller,
        _state: StateHandle,
    ) -> Result<BigInt, HandlerError> {
        unimplemented()
    }

    pub fn get_total_of_eth_balances_gas_cost(&self) -> BigInt {
        free()
    }

    pub fn get_last_upgrade_hash(
        &self,
        _caller: Caller,
        _state: StateHandle,
    ) -> Result<[u8; 32], HandlerError> {
        unimplemented()
    }

    pub fn get_last_upgrade_hash_gas_cost(&self) -> BigInt {
        free()
    }

    pub fn get_uploaded_code_hash(
        &self,
        _caller: Caller,
        _state: StateHandle,
    ) -> Result<[u8; 32], HandlerError> {
        unimplemented()
    }

    pub fn get_uploaded_code_hash_gas_cost(&self) -> BigInt {
        free()
    }

    pub fn is_allowed_sender(
        &self,
        _caller: Caller,
        _state: StateHandle,
        _addr: Address,
    ) -> Result<bool, HandlerError> {
        unimplemented()
    }

    pub fn is_allowed_sender_gas_cost(&self, _addr: Address) -> BigInt {
        free()
    }

    pub fn is_chain_owner(
        &self,
        _caller: Caller,
        _state: StateHandle,
        _addr: Address,
    ) -> Result<bool, HandlerError> {
        unimplemented()
    }

    pub fn is_chain_owner_gas_cost(&self, _addr: Address) -> BigInt {
        free()
    }

    pub fn is_fair_gas_price_sender(
        &self,
        _caller: Caller,
        _state: StateHandle,
        _addr: Address,
    ) -> Result<bool, HandlerError> {
        unimplemented()
    }

    pub fn is_fair_gas_price_sender_gas_cost(&self, _addr: Address) -> BigInt {
        free()
    }

    pub fn is_mapping_exception(
        &self,
        _caller: Caller,
        _state: StateHandle,
        _from: BigInt,
        _to: BigInt,
    ) -> Result<bool, HandlerError> {
        unimplemented()
    }

    pub fn is_mapping_exception_gas_cost(&self, _from: BigInt, _to: BigInt) -> BigInt {
        free()
    }

    pub fn remove_allowed_sender(&self, _caller: Caller, _state: StateHandle, _addr: Address) -> Unit {
        unimplemented()
    }

    pub fn remove_allowed_sender_gas_cost(&self, _addr: Address) -> BigInt {
        free()
    }

    pub fn remove_chain_owner(&self, _caller: Caller, _state: StateHandle, _addr: Address) -> Unit {
        unimplemented()
    }

    pub fn remove_chain_owner_gas_cost(&self, _addr: Address) -> BigInt {
        free()
    }

    pub fn remove_mapping_exception(
        &self,
        _caller: Caller,
        _state: StateHandle,
        _from: BigInt,
        _to: BigInt,
    ) -> Unit {
        unimplemented()
    }

    pub fn remove_mapping_exception_gas_cost(&self, _from: BigInt, _to: BigInt) -> BigInt {
        free()
    }

    pub fn serialize_all_parameters(
        &self,
        _caller: Caller,
        _state: StateHandle,
    ) -> Result<Vec<u8>, HandlerError> {
        unimplemented()
    }

    pub fn serialize_all_parameters_gas_cost(&self) -> BigInt {
        free()
    }

    pub fn set_chain_parameter(
        &self,
        _caller: Caller,
        _state: StateHandle,
        _which: [u8; 32],
        _value: BigInt,
    ) -> Unit {
        unimplemented()
    }

    pub fn set_chain_parameter_gas_cost(&self, _which: [u8; 32], _value: BigInt) -> BigInt {
        free()
    }

    pub fn set_fair_gas_price_sender(
        &self,
        _caller: Caller,
        _state: StateHandle,
        _addr: Address,
        _is_fair_gas_price_sender: bool,
    ) -> Unit {
        unimplemented()
    }

    pub fn set_fair_gas_price_sender_gas_cost(
        &self,
        _addr: Address,
        _is_fair_gas_price_sender: bool,
    ) -> BigInt {
        free()
    }

    pub fn set_l1_gas_price_estimate(
        &self,
        _caller: Caller,
        _state: StateHandle,
        _price_in_gwei: BigInt,
    ) -> Unit {
        unimplemented()
    }

    pub fn set_l1_gas_price_estimate_gas_cost(&self, _price_in_gwei: BigInt) -> BigInt {
        free()
    }

    pub fn start_code_upload(&self, _caller: Caller, _state: StateHandle) -> Unit {
        unimplemented()
    }

    pub fn start_code_upload_gas_cost(&self) -> BigInt {
        free()
    }

    pub fn start_code_upload_with_check(
        &self,
        _caller: Caller,
        _state: StateHandle,
        _old_code_hash: [u8; 32],
    ) -> Unit {
        unimplemented()
    }

    pub fn start_code_upload_with_check_gas_cost(&self, _old_code_hash: [u8; 32]) -> BigInt {
        free()
    }
}

/// The owner implementation with every routine registered.
pub fn candidate() -> Candidate<ArbOwner> {
    Candidate::new(NAME, ArbOwner)
        .routine("AddAllowedSender", ArbOwner::add_allowed_sender)
        .routine("AddAllowedSenderGasCost", ArbOwner::add_allowed_sender_gas_cost)
        .routine("AddChainOwner", ArbOwner::add_chain_owner)
        .routine("AddChainOwnerGasCost", ArbOwner::add_chain_owner_gas_cost)
        .routine("AllowAllSenders", ArbOwner::allow_all_senders)
        .routine("AllowAllSendersGasCost", ArbOwner::allow_all_senders_gas_cost)
        .routine("AddMappingException", ArbOwner::add_mapping_exception)
        .routine("AddMappingExceptionGasCost", ArbOwner::add_mapping_exception_gas_cost)
        .routine("AllowOnlyOwnerToSend", ArbOwner::allow_only_owner_to_send)
        .routine("AllowOnlyOwnerToSendGasCost", ArbOwner::allow_only_owner_to_send_gas_cost)
        .routine("AddToReserveFunds", ArbOwner::add_to_reserve_funds)
        .routine("AddToReserveFundsGasCost", ArbOwner::add_to_reserve_funds_gas_cost)
        .routine("ContinueCodeUpload", ArbOwner::continue_code_upload)
        .routine("ContinueCodeUploadGasCost", ArbOwner::continue_code_upload_gas_cost)
        .routine("CreateChainParameter", ArbOwner::create_chain_parameter)
        .routine("CreateChainParameterGasCost", ArbOwner::create_chain_parameter_gas_cost)
        .routine("DeployContract", ArbOwner::deploy_contract)
        .routine("DeployContractGasCost", ArbOwner::deploy_contract_gas_cost)
        .routine("FinishCodeUploadAsArbosUpgrade", ArbOwner::finish_code_upload_as_arbos_upgrade)
        .routine(
            "FinishCodeUploadAsArbosUpgradeGasCost",
            ArbOwner::finish_code_upload_as_arbos_upgrade_gas_cost,
        )
        .routine("GetAllAllowedSenders", ArbOwner::get_all_allowed_senders)
        .routine("GetAllAllowedSendersGasCost", ArbOwner::get_all_allowed_senders_gas_cost)
        .routine("GetAllChainOwners", ArbOwner::get_all_chain_owners)
        .routine("GetAllChainOwnersGasCost", ArbOwner::get_all_chain_owners_gas_cost)
        .routine("GetAllFairGasPriceSenders", ArbOwner::get_all_fair_gas_price_senders)
        .routine(
            "GetAllFairGasPriceSendersGasCost",
            ArbOwner::get_all_fair_gas_price_senders_gas_cost,
        )
        .routine("GetAllMappingExceptions", ArbOwner::get_all_mapping_exceptions)
        .routine("GetAllMappingExceptionsGasCost", ArbOwner::get_all_mapping_exceptions_gas_cost)
        .routine("GetChainParameter", ArbOwner::get_chain_parameter)
        .routine("GetChainParameterGasCost", ArbOwner::get_chain_parameter_gas_cost)
        .routine("GetTotalOfEthBalances", ArbOwner::get_total_of_eth_balances)
        .routine("GetTotalOfEthBalancesGasCost", ArbOwner::get_total_of_eth_balances_gas_cost)
        .routine("GetLastUpgradeHash", ArbOwner::get_last_upgrade_hash)
        .routine("GetLastUpgradeHashGasCost", ArbOwner::get_last_upgrade_hash_gas_cost)
        .routine("GetUploadedCodeHash", ArbOwner::get_uploaded_code_hash)
        .routine("GetUploadedCodeHashGasCost", ArbOwner::get_uploaded_code_hash_gas_cost)
        .routine("IsAllowedSender", ArbOwner::is_allowed_sender)
        .routine("IsAllowedSenderGasCost", ArbOwner::is_allowed_sender_gas_cost)
        .routine("IsChainOwner", ArbOwner::is_chain_owner)
        .routine("IsChainOwnerGasCost", ArbOwner::is_chain_owner_gas_cost)
        .routine("IsFairGasPriceSender", ArbOwner::is_fair_gas_price_sender)
        .routine("IsFairGasPriceSenderGasCost", ArbOwner::is_fair_gas_price_sender_gas_cost)
        .routine("IsMappingException", ArbOwner::is_mapping_exception)
        .routine("IsMappingExceptionGasCost", ArbOwner::is_mapping_exception_gas_cost)
        .routine("RemoveAllowedSender", ArbOwner::remove_allowed_sender)
        .routine("RemoveAllowedSenderGasCost", ArbOwner::remove_allowed_sender_gas_cost)
        .routine("RemoveChainOwner", ArbOwner::remove_chain_owner)
        .routine("RemoveChainOwnerGasCost", ArbOwner::remove_chain_owner_gas_cost)
        .routine("RemoveMappingException", ArbOwner::remove_mapping_exception)
        .routine("RemoveMappingExceptionGasCost", ArbOwner::remove_mapping_exception_gas_cost)
        .routine("SerializeAllParameters", ArbOwner::serialize_all_parameters)
        .routine("SerializeAllParametersGasCost", ArbOwner::serialize_all_parameters_gas_cost)
        .routine("SetChainParameter", ArbOwner::set_chain_parameter)
        .routine("SetChainParameterGasCost", ArbOwner::set_chain_parameter_gas_cost)
        .routine("SetFairGasPriceSender", ArbOwner::set_fair_gas_price_sender)
        .routine("SetFairGasPriceSenderGasCost", ArbOwner::set_fair_gas_price_sender_gas_cost)
        .routine("SetL1GasPriceEstimate", ArbOwner::set_l1_gas_price_estimate)
        .routine("SetL1GasPriceEstimateGasCost", ArbOwner::set_l1_gas_price_estimate_gas_cost)
        .routine("StartCodeUpload", ArbOwner::start_code_upload)
        .routine("StartCodeUploadGasCost", ArbOwner::start_code_upload_gas_cost)
        .routine("StartCodeUploadWithCheck", ArbOwner::start_code_upload_with_check)
        .routine("StartCodeUploadWithCheckGasCost", ArbOwner::start_code_upload_with_check_gas_cost)
}
