//! Typed access to the chain-management RPC methods of a development
//! network.
//!
//! The methods in this namespace exist on Hardhat-style development nodes
//! only and are used to prepare a chain before deploying against it:
//! impersonating accounts, overriding balances, nonces, code and storage,
//! controlling block mining and gas pricing, and toggling node logging.
//!
//! Relevant RPC calls are documented at:
//! https://hardhat.org/hardhat-network/docs/reference#hardhat-network-methods

use {
    serde_json::json,
    web3::{
        Transport,
        api::Namespace,
        helpers::{self, CallFuture},
        types::{Bytes, H160, H256, U256},
    },
};

#[derive(Debug, Clone)]
pub struct DevNodeApi<T> {
    transport: T,
}

impl<T: Transport> Namespace<T> for DevNodeApi<T> {
    fn new(transport: T) -> Self
    where
        Self: Sized,
    {
        DevNodeApi { transport }
    }

    fn transport(&self) -> &T {
        &self.transport
    }
}

impl<T: Transport> DevNodeApi<T> {
    pub fn impersonate_account(&self, address: &H160) -> CallFuture<bool, T::Out> {
        let address = helpers::serialize(address);
        CallFuture::new(
            self.transport
                .execute("hardhat_impersonateAccount", vec![address]),
        )
    }

    pub fn stop_impersonating_account(&self, address: &H160) -> CallFuture<bool, T::Out> {
        let address = helpers::serialize(address);
        CallFuture::new(
            self.transport
                .execute("hardhat_stopImpersonatingAccount", vec![address]),
        )
    }

    pub fn set_balance(&self, address: &H160, balance: U256) -> CallFuture<bool, T::Out> {
        let address = helpers::serialize(address);
        let balance = helpers::serialize(&balance);
        CallFuture::new(
            self.transport
                .execute("hardhat_setBalance", vec![address, balance]),
        )
    }

    pub fn set_code(&self, address: &H160, code: Bytes) -> CallFuture<bool, T::Out> {
        let address = helpers::serialize(address);
        let code = helpers::serialize(&code);
        CallFuture::new(self.transport.execute("hardhat_setCode", vec![address, code]))
    }

    pub fn set_nonce(&self, address: &H160, nonce: U256) -> CallFuture<bool, T::Out> {
        let address = helpers::serialize(address);
        let nonce = helpers::serialize(&nonce);
        CallFuture::new(
            self.transport
                .execute("hardhat_setNonce", vec![address, nonce]),
        )
    }

    pub fn set_storage_at(
        &self,
        address: &H160,
        slot: U256,
        value: H256,
    ) -> CallFuture<bool, T::Out> {
        let address = helpers::serialize(address);
        let slot = helpers::serialize(&slot);
        let value = helpers::serialize(&value);
        CallFuture::new(
            self.transport
                .execute("hardhat_setStorageAt", vec![address, slot, value]),
        )
    }

    pub fn set_min_gas_price(&self, gas_price: U256) -> CallFuture<bool, T::Out> {
        let gas_price = helpers::serialize(&gas_price);
        CallFuture::new(
            self.transport
                .execute("hardhat_setMinGasPrice", vec![gas_price]),
        )
    }

    pub fn set_next_block_base_fee_per_gas(&self, base_fee: U256) -> CallFuture<bool, T::Out> {
        let base_fee = helpers::serialize(&base_fee);
        CallFuture::new(
            self.transport
                .execute("hardhat_setNextBlockBaseFeePerGas", vec![base_fee]),
        )
    }

    pub fn set_coinbase(&self, address: &H160) -> CallFuture<bool, T::Out> {
        let address = helpers::serialize(address);
        CallFuture::new(self.transport.execute("hardhat_setCoinbase", vec![address]))
    }

    /// Mines a number of blocks at once. `blocks` defaults to one on the
    /// node side when omitted.
    pub fn mine(&self, blocks: Option<U256>) -> CallFuture<bool, T::Out> {
        let params = blocks
            .map(|blocks| vec![helpers::serialize(&blocks)])
            .unwrap_or_default();
        CallFuture::new(self.transport.execute("hardhat_mine", params))
    }

    pub fn interval_mine(&self) -> CallFuture<bool, T::Out> {
        CallFuture::new(self.transport.execute("hardhat_intervalMine", vec![]))
    }

    pub fn get_automine(&self) -> CallFuture<bool, T::Out> {
        CallFuture::new(self.transport.execute("hardhat_getAutomine", vec![]))
    }

    pub fn drop_transaction(&self, hash: &H256) -> CallFuture<bool, T::Out> {
        let hash = helpers::serialize(hash);
        CallFuture::new(
            self.transport
                .execute("hardhat_dropTransaction", vec![hash]),
        )
    }

    pub fn set_logging_enabled(&self, enabled: bool) -> CallFuture<bool, T::Out> {
        let enabled = helpers::serialize(&enabled);
        CallFuture::new(
            self.transport
                .execute("hardhat_setLoggingEnabled", vec![enabled]),
        )
    }

    /// Resets the node to a pristine state, dropping all local blocks.
    pub fn reset(&self) -> CallFuture<bool, T::Out> {
        CallFuture::new(self.transport.execute("hardhat_reset", vec![]))
    }

    /// Resets the node onto a fork of another network, optionally pinned to
    /// a block.
    pub fn fork(&self, fork_url: &str, block_number: Option<u64>) -> CallFuture<bool, T::Out> {
        let forking = match block_number {
            Some(block) => json!({ "jsonRpcUrl": fork_url, "blockNumber": block }),
            None => json!({ "jsonRpcUrl": fork_url }),
        };
        CallFuture::new(
            self.transport
                .execute("hardhat_reset", vec![json!({ "forking": forking })]),
        )
    }

    pub fn get_stack_trace_failures_count(&self) -> CallFuture<U256, T::Out> {
        CallFuture::new(
            self.transport
                .execute("hardhat_getStackTraceFailuresCount", vec![]),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn api() -> DevNodeApi<web3::transports::Http> {
        let transport = web3::transports::Http::new("http://localhost:8545")
            .expect("valid local node url");
        web3::Web3::new(transport).api::<DevNodeApi<_>>()
    }

    #[ignore]
    #[tokio::test]
    async fn impersonates_and_funds_an_account() {
        let api = api();
        let account = H160::repeat_byte(0x42);
        api.impersonate_account(&account)
            .await
            .expect("node must support hardhat_impersonateAccount");
        api.set_balance(&account, U256::exp10(18))
            .await
            .expect("node must support hardhat_setBalance");
        api.stop_impersonating_account(&account)
            .await
            .expect("node must support hardhat_stopImpersonatingAccount");
    }

    #[ignore]
    #[tokio::test]
    async fn controls_mining() {
        let api = api();
        api.get_automine()
            .await
            .expect("node must support hardhat_getAutomine");
        api.mine(Some(U256::from(3)))
            .await
            .expect("node must support hardhat_mine");
    }
}
