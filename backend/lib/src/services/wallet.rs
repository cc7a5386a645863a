//! Wallet service: fetches account data from the Tron node and caches it

use std::sync::Arc;

use tracing::{debug, info};

use crate::{
    data::{
        db::{Balance, CrudOperations, NewTronWallet, Page, PageParams, SortOrder, TronWallet},
        tron::{AccountResource, TronClient},
    },
    error::Error,
};

/// Service for fetching and caching Tron account snapshots
#[derive(Clone)]
pub struct WalletService {
    repository: Arc<dyn CrudOperations<TronWallet>>,
    tron: Arc<TronClient>,
}

impl WalletService {
    /// Create a new wallet service
    pub fn new(repository: Arc<dyn CrudOperations<TronWallet>>, tron: Arc<TronClient>) -> Self {
        Self { repository, tron }
    }

    /// One page of the cached snapshots, newest first
    pub async fn list_all(&self, params: PageParams) -> Result<Page<TronWallet>, Error> {
        debug!(target: "wallet_service::list_all", page = params.page(), size = params.size(), "Listing wallets");

        Ok(self.repository.get_page(SortOrder::Desc, params).await?)
    }

    /// Fetch the balance and the resource figures of `address` concurrently.
    ///
    /// Unknown or malformed addresses become [`Error::BadRequest`], any other
    /// upstream failure becomes [`Error::Upstream`].
    pub async fn fetch_account_data(
        &self,
        address: &str,
    ) -> Result<(Balance, AccountResource), Error> {
        let (balance, resource) = tokio::try_join!(
            self.tron.get_account_balance(address),
            self.tron.get_account_resource(address),
        )
        .map_err(|e| {
            info!(target: "wallet_service::fetch_account_data", address = %address, error = %e, "Failed to fetch account data");
            Error::from(e)
        })?;

        Ok((balance, resource))
    }

    /// Fetch the current data of `address` and store it as a new snapshot.
    ///
    /// The address is stored as given, the node is queried with its base58check form.
    pub async fn create_from_address(&self, address: &str) -> Result<TronWallet, Error> {
        let (balance, resource) = self.fetch_account_data(address).await?;

        let wallet = self
            .repository
            .create(NewTronWallet {
                address: address.to_string(),
                balance,
                free_net_used: resource.free_net_used,
                free_net_limit: resource.free_net_limit,
                energy_limit: resource.energy_limit,
                energy_used: resource.energy_used,
            })
            .await?;

        info!(target: "wallet_service::create_from_address", id = wallet.id, address = %wallet.address, "Stored wallet snapshot");
        Ok(wallet)
    }
}

#[cfg(test)]
mod tests {
    use std::str::FromStr;

    use bigdecimal::BigDecimal;
    use serde_json::json;

    use super::*;
    use crate::{
        constants::test::{accounts, wallet},
        data::{
            db::{Repository, SmartPool},
            tron::{endpoints, AnyTronConnection, ErrorMode, MockConnection},
        },
    };

    async fn create_test_service_with(mock: MockConnection) -> WalletService {
        let pool = Arc::new(SmartPool::in_memory().await.expect("able to create pool"));
        let tron = Arc::new(TronClient::new(Arc::new(AnyTronConnection::Mock(mock))));

        WalletService::new(Arc::new(Repository::<TronWallet>::new(pool)), tron)
    }

    async fn create_test_service_with_responses(
        responses: Vec<(&str, serde_json::Value)>,
    ) -> WalletService {
        let mock = MockConnection::new();
        for (endpoint, value) in responses {
            mock.set_response(endpoint, value).await;
        }
        create_test_service_with(mock).await
    }

    #[tokio::test]
    async fn test_create_from_address() {
        let service = create_test_service_with_responses(vec![
            (
                endpoints::GET_ACCOUNT,
                json!({ "address": accounts::TEST_ADDRESS, "balance": wallet::BALANCE_SUN }),
            ),
            (
                endpoints::GET_ACCOUNT_RESOURCE,
                json!({
                    "freeNetUsed": wallet::FREE_NET_USED,
                    "freeNetLimit": wallet::FREE_NET_LIMIT,
                    "EnergyLimit": wallet::ENERGY_LIMIT,
                    "EnergyUsed": wallet::ENERGY_USED,
                }),
            ),
        ])
        .await;

        let stored = service
            .create_from_address(accounts::TEST_ADDRESS)
            .await
            .expect("able to create");

        assert_eq!(stored.address, accounts::TEST_ADDRESS);
        assert_eq!(stored.energy_available(), wallet::ENERGY_AVAILABLE);
        assert_eq!(stored.available_bandwidth(), wallet::AVAILABLE_BANDWIDTH);
        assert_eq!(
            stored.balance.as_decimal(),
            &BigDecimal::from_str(wallet::BALANCE_TRX).unwrap()
        );
    }

    #[tokio::test]
    async fn test_missing_resource_fields_default_to_zero() {
        let service = create_test_service_with_responses(vec![(
            endpoints::GET_ACCOUNT_RESOURCE,
            json!({ "freeNetLimit": 600 }),
        )])
        .await;

        let stored = service
            .create_from_address(accounts::TEST_ADDRESS)
            .await
            .expect("able to create");

        assert_eq!(stored.free_net_used, 0);
        assert_eq!(stored.free_net_limit, 600);
        assert_eq!(stored.energy_limit, 0);
        assert_eq!(stored.energy_used, 0);
        assert_eq!(stored.available_bandwidth(), 600);
    }

    #[tokio::test]
    async fn test_repeated_fetch_inserts_new_rows() {
        let service = create_test_service_with(MockConnection::new()).await;

        let first = service.create_from_address(accounts::TEST_ADDRESS).await.unwrap();
        let second = service.create_from_address(accounts::TEST_ADDRESS).await.unwrap();
        assert_ne!(first.id, second.id);

        let page = service.list_all(PageParams::default()).await.unwrap();
        assert_eq!(page.total, 2);
    }

    #[tokio::test]
    async fn test_list_all_newest_first() {
        let service = create_test_service_with(MockConnection::new()).await;
        for address in [accounts::TEST_ADDRESS, accounts::OTHER_ADDRESS] {
            service.create_from_address(address).await.unwrap();
        }

        let page = service.list_all(PageParams::default()).await.unwrap();
        let ids: Vec<i64> = page.items.iter().map(|w| w.id).collect();

        assert_eq!(page.items[0].address, accounts::OTHER_ADDRESS);
        assert!(ids.windows(2).all(|w| w[0] > w[1]));
    }

    #[tokio::test]
    async fn test_list_all_empty() {
        let service = create_test_service_with(MockConnection::new()).await;

        let page = service.list_all(PageParams::default()).await.unwrap();
        assert!(page.items.is_empty());
        assert_eq!(page.total, 0);
    }

    #[tokio::test]
    async fn test_unknown_address_is_bad_request() {
        let service =
            create_test_service_with_responses(vec![(endpoints::GET_ACCOUNT, json!({}))]).await;

        let result = service.create_from_address(accounts::TEST_ADDRESS).await;
        assert!(matches!(result, Err(Error::BadRequest(_))));

        let page = service.list_all(PageParams::default()).await.unwrap();
        assert_eq!(page.total, 0);
    }

    #[tokio::test]
    async fn test_malformed_address_is_bad_request() {
        let service = create_test_service_with(MockConnection::new()).await;

        let result = service.fetch_account_data(accounts::GARBAGE_ADDRESS).await;
        assert!(matches!(result, Err(Error::BadRequest(_))));
    }

    #[tokio::test]
    async fn test_hex_addresses_are_accepted() {
        let service = create_test_service_with(MockConnection::new()).await;
        let zero_x = format!("0x{}", &accounts::TEST_ADDRESS_HEX[2..]);

        for address in [accounts::TEST_ADDRESS_HEX, zero_x.as_str()] {
            let stored = service
                .create_from_address(address)
                .await
                .expect("able to create");
            assert_eq!(stored.address, address);
        }

        let page = service.list_all(PageParams::default()).await.unwrap();
        assert_eq!(page.total, 2);
    }

    #[tokio::test]
    async fn test_padded_address_is_bad_request() {
        let service = create_test_service_with(MockConnection::new()).await;

        let result = service
            .create_from_address(&format!(" {}", accounts::TEST_ADDRESS))
            .await;
        assert!(matches!(result, Err(Error::BadRequest(_))));
    }

    #[tokio::test]
    async fn test_upstream_failure_is_upstream_error() {
        let mock = MockConnection::new();
        mock.set_error_mode(ErrorMode::TransportError("refused".to_string()))
            .await;
        let service = create_test_service_with(mock).await;

        let result = service.create_from_address(accounts::TEST_ADDRESS).await;
        assert!(matches!(result, Err(Error::Upstream(_))));
    }
}
