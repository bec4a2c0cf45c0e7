//! Aggregated on-chain view over registry-resolved contracts.
//!
//! Deployment writes addresses into the deployments file under logical
//! names; this crate is the read side. It resolves a set of logical names
//! through the [`deployments::DeploymentStore`], builds typed handles for
//! each and fetches the scalar facts downstream consumers compare against a
//! wallet identity (contract owners, the bond reward token). All reads fan
//! out concurrently and the combined view is only exposed once every read
//! has settled; a single failing read fails the whole aggregation and names
//! the read that failed.

pub mod handles;

use {
    deployments::{DeploymentStore, RegistryError},
    handles::{Ownable, SimpleBond},
    std::future::Future,
    web3::{Transport, Web3, types::H160},
};

pub const UBIQUI_STICK: &str = "ubiqui-stick";
pub const UBIQUI_STICK_SALE: &str = "ubiqui-stick-sale";
pub const SIMPLE_BOND: &str = "simple-bond";

#[derive(Debug, thiserror::Error)]
pub enum AggregationError {
    #[error(transparent)]
    Registry(#[from] RegistryError),
    #[error("no deployment recorded for {0:?}")]
    Unresolved(&'static str),
    #[error("failed to build binding for {name:?}")]
    Binding {
        name: &'static str,
        source: web3::ethabi::Error,
    },
    #[error("on-chain read {read:?} failed")]
    Read {
        read: &'static str,
        source: web3::contract::Error,
    },
}

/// The launch-party contract set, resolved from the address registry.
#[derive(Debug)]
pub struct LaunchPartyContracts<T: Transport> {
    pub stick: Ownable<T>,
    pub sale: Ownable<T>,
    pub bond: SimpleBond<T>,
}

/// Scalar facts fetched from the resolved contracts, all settled.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct LaunchPartyView {
    pub reward_token: H160,
    pub is_sale_owner: bool,
    pub is_bond_owner: bool,
}

impl<T: Transport> LaunchPartyContracts<T> {
    /// Resolves all logical names through the store. A name without a
    /// recorded deployment fails the resolution and reports which one.
    pub fn resolve(web3: &Web3<T>, store: &DeploymentStore) -> Result<Self, AggregationError> {
        let mut addresses = store
            .addresses_of(&[UBIQUI_STICK, UBIQUI_STICK_SALE, SIMPLE_BOND])?
            .into_iter();
        // Pops in the lookup order above.
        let mut resolved = |name: &'static str| {
            addresses
                .next()
                .flatten()
                .ok_or(AggregationError::Unresolved(name))
        };
        let stick = resolved(UBIQUI_STICK)?;
        let sale = resolved(UBIQUI_STICK_SALE)?;
        let bond = resolved(SIMPLE_BOND)?;

        Ok(Self {
            stick: Ownable::at(web3, stick).map_err(|source| AggregationError::Binding {
                name: UBIQUI_STICK,
                source,
            })?,
            sale: Ownable::at(web3, sale).map_err(|source| AggregationError::Binding {
                name: UBIQUI_STICK_SALE,
                source,
            })?,
            bond: SimpleBond::at(web3, bond).map_err(|source| AggregationError::Binding {
                name: SIMPLE_BOND,
                source,
            })?,
        })
    }

    /// Fetches every on-chain fact concurrently and compares the owners
    /// against the given wallet.
    pub async fn fetch(&self, wallet: H160) -> Result<LaunchPartyView, AggregationError> {
        let (sale_owner, bond_owner, reward_token) = futures::try_join!(
            read("ubiqui-stick-sale.owner", self.sale.owner()),
            read("simple-bond.owner", self.bond.owner()),
            read("simple-bond.tokenRewards", self.bond.token_rewards()),
        )?;

        Ok(LaunchPartyView {
            reward_token,
            is_sale_owner: sale_owner == wallet,
            is_bond_owner: bond_owner == wallet,
        })
    }
}

async fn read<O>(
    read: &'static str,
    call: impl Future<Output = Result<O, web3::contract::Error>>,
) -> Result<O, AggregationError> {
    call.await
        .map_err(|source| AggregationError::Read { read, source })
}

#[cfg(test)]
mod tests {
    use {super::*, deployments::Deployment, hex_literal::hex};

    /// A transport for constructing bindings without a node connection;
    /// sending through it never resolves.
    #[derive(Clone, Debug, Default)]
    struct DummyTransport;

    impl Transport for DummyTransport {
        type Out = futures::future::Pending<web3::error::Result<jsonrpc_core::Value>>;

        fn prepare(
            &self,
            method: &str,
            params: Vec<jsonrpc_core::Value>,
        ) -> (web3::RequestId, jsonrpc_core::Call) {
            (0, web3::helpers::build_request(0, method, params))
        }

        fn send(&self, _id: web3::RequestId, _request: jsonrpc_core::Call) -> Self::Out {
            futures::future::pending()
        }
    }

    fn store(dir: &tempfile::TempDir) -> DeploymentStore {
        DeploymentStore::new(dir.path().join("deployments.json"), 31337)
    }

    fn record(store: &DeploymentStore, name: &str, byte: u8) {
        store
            .record(
                name,
                Deployment {
                    address: H160::repeat_byte(byte),
                    transaction: None,
                },
            )
            .unwrap();
    }

    #[test]
    fn resolves_all_recorded_names() {
        let dir = tempfile::tempdir().unwrap();
        let store = store(&dir);
        record(&store, UBIQUI_STICK, 0x11);
        record(&store, UBIQUI_STICK_SALE, 0x22);
        record(&store, SIMPLE_BOND, 0x33);

        let web3 = Web3::new(DummyTransport);
        let contracts = LaunchPartyContracts::resolve(&web3, &store).unwrap();
        assert_eq!(contracts.stick.address(), H160::repeat_byte(0x11));
        assert_eq!(contracts.sale.address(), H160::repeat_byte(0x22));
        assert_eq!(contracts.bond.address(), H160::repeat_byte(0x33));
    }

    #[test]
    fn missing_name_fails_resolution_and_is_named() {
        let dir = tempfile::tempdir().unwrap();
        let store = store(&dir);
        record(&store, UBIQUI_STICK, 0x11);
        record(&store, SIMPLE_BOND, 0x33);

        let web3 = Web3::new(DummyTransport);
        let err = LaunchPartyContracts::resolve(&web3, &store).unwrap_err();
        match err {
            AggregationError::Unresolved(name) => assert_eq!(name, UBIQUI_STICK_SALE),
            other => panic!("expected an unresolved name, got {other:?}"),
        }
    }

    /// Needs a local node with the launch-party contracts deployed and
    /// recorded in `deployments.json`.
    #[ignore]
    #[tokio::test]
    async fn fetches_ownership_against_local_node() {
        let transport =
            web3::transports::Http::new("http://localhost:8545").expect("valid local node url");
        let web3 = Web3::new(transport);
        let chain_id = web3
            .eth()
            .chain_id()
            .await
            .expect("node must be reachable")
            .as_u64();
        let store = DeploymentStore::new("deployments.json", chain_id);

        let contracts = LaunchPartyContracts::resolve(&web3, &store).unwrap();
        let wallet = H160(hex!("1111111111111111111111111111111111111111"));
        let view = contracts.fetch(wallet).await.unwrap();
        assert!(!view.is_sale_owner);
    }
}
