//! Minimal typed handles over deployed contracts.
//!
//! Only the few view functions the aggregator reads are included in the
//! embedded ABI fragments; anything richer goes through generated bindings
//! elsewhere.

use web3::{
    Transport,
    Web3,
    contract::{Contract, Options},
    types::H160,
};

/// Any contract exposing the `Ownable` interface.
#[derive(Debug)]
pub struct Ownable<T: Transport> {
    contract: Contract<T>,
}

impl<T: Transport> Ownable<T> {
    pub fn at(web3: &Web3<T>, address: H160) -> Result<Self, web3::ethabi::Error> {
        Ok(Self {
            contract: Contract::from_json(web3.eth(), address, include_bytes!("../abi/ownable.json"))?,
        })
    }

    pub fn address(&self) -> H160 {
        self.contract.address()
    }

    pub async fn owner(&self) -> Result<H160, web3::contract::Error> {
        self.contract
            .query("owner", (), None, Options::default(), None)
            .await
    }
}

/// The bond contract paying out rewards in a configured token.
#[derive(Debug)]
pub struct SimpleBond<T: Transport> {
    contract: Contract<T>,
}

impl<T: Transport> SimpleBond<T> {
    pub fn at(web3: &Web3<T>, address: H160) -> Result<Self, web3::ethabi::Error> {
        Ok(Self {
            contract: Contract::from_json(
                web3.eth(),
                address,
                include_bytes!("../abi/simple_bond.json"),
            )?,
        })
    }

    pub fn address(&self) -> H160 {
        self.contract.address()
    }

    pub async fn owner(&self) -> Result<H160, web3::contract::Error> {
        self.contract
            .query("owner", (), None, Options::default(), None)
            .await
    }

    pub async fn token_rewards(&self) -> Result<H160, web3::contract::Error> {
        self.contract
            .query("tokenRewards", (), None, Options::default(), None)
            .await
    }
}
