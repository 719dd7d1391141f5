//! Client for the backend POS API.
//!
//! Every public method swallows transport and HTTP failures: the error is
//! logged and the caller gets an empty list, `None` or `false`.

use crate::domain::model::{
    Category, Customer, CustomerCreate, CustomerSearchResponse, HealthResponse, Order, Product,
};
use crate::domain::ports::ConfigProvider;
use crate::utils::error::{PosError, Result};
use reqwest::{Client, Method, RequestBuilder};
use serde::de::DeserializeOwned;
use serde::Serialize;
use url::Url;

pub const DEFAULT_API_URL: &str = "http://burger-backend:8000";
pub const DEFAULT_CUSTOMER_LIMIT: u32 = 100;
pub const DEFAULT_ORDER_LIMIT: u32 = 100;
const QUICK_SEARCH_LIMIT: u32 = 10;

#[derive(Debug, Clone)]
pub struct PosApiClient {
    client: Client,
    base_url: Url,
}

impl PosApiClient {
    pub fn new(client: Client, base_url: &str) -> Result<Self> {
        Ok(Self {
            client,
            base_url: Url::parse(base_url)?,
        })
    }

    pub fn from_config<C: ConfigProvider>(config: &C) -> Result<Self> {
        let client = super::build_http_client(config.request_timeout(), config.user_agent())?;
        Self::new(client, config.api_url())
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    fn endpoint(&self, segments: &[&str], query: &[(&str, String)]) -> Result<Url> {
        let mut url = self.base_url.clone();
        {
            let mut path = url.path_segments_mut().map_err(|_| PosError::ConfigError {
                message: format!("API URL cannot be a base: {}", self.base_url),
            })?;
            path.pop_if_empty().extend(segments);
        }
        if !query.is_empty() {
            let mut pairs = url.query_pairs_mut();
            for (key, value) in query {
                pairs.append_pair(key, value);
            }
        }
        Ok(url)
    }

    async fn execute<T: DeserializeOwned>(&self, request: RequestBuilder, url: &Url) -> Result<T> {
        let response = request.send().await?;
        let status = response.status();
        tracing::debug!("{} -> {}", url, status);

        if !status.is_success() {
            return Err(PosError::UnexpectedStatus {
                status: status.as_u16(),
                url: url.to_string(),
            });
        }

        Ok(response.json::<T>().await?)
    }

    async fn get_json<T: DeserializeOwned>(
        &self,
        segments: &[&str],
        query: &[(&str, String)],
    ) -> Result<T> {
        let url = self.endpoint(segments, query)?;
        self.execute(self.client.get(url.clone()), &url).await
    }

    async fn send_json<B: Serialize + ?Sized, T: DeserializeOwned>(
        &self,
        method: Method,
        segments: &[&str],
        body: &B,
    ) -> Result<T> {
        let url = self.endpoint(segments, &[])?;
        self.execute(self.client.request(method, url.clone()).json(body), &url)
            .await
    }

    // ==================== HEALTH CHECK ====================

    pub async fn health(&self) -> Option<HealthResponse> {
        match self.get_json::<HealthResponse>(&["health"], &[]).await {
            Ok(health) => Some(health),
            Err(e) => {
                tracing::error!("❌ Error connecting to backend: {}", e);
                None
            }
        }
    }

    pub async fn test_connection(&self) -> bool {
        match self.health().await {
            Some(health) => {
                tracing::info!("✅ Backend connected: {}", health.status);
                true
            }
            None => false,
        }
    }

    // ==================== CUSTOMERS ====================

    pub async fn get_customers(&self, search: Option<&str>, limit: u32) -> Vec<Customer> {
        let mut query = vec![("limit", limit.to_string())];
        if let Some(search) = search.filter(|s| !s.is_empty()) {
            query.push(("search", search.to_string()));
        }

        self.get_json(&["api", "customers"], &query)
            .await
            .unwrap_or_else(|e| {
                tracing::error!("❌ Error fetching customers: {}", e);
                Vec::new()
            })
    }

    pub async fn search_customer_by_phone(&self, phone: &str) -> Option<CustomerSearchResponse> {
        tracing::info!("🔍 Searching customer by phone: {}", phone);

        match self
            .get_json(&["api", "customers", "search-by-phone", phone], &[])
            .await
        {
            Ok(response) => Some(response),
            Err(e) => {
                tracing::error!("❌ Error searching customer by phone: {}", e);
                None
            }
        }
    }

    pub async fn search_customers(&self, query: &str) -> Vec<Customer> {
        tracing::info!("🔍 Searching customers with query: {}", query);

        let params = [
            ("search", query.to_string()),
            ("limit", QUICK_SEARCH_LIMIT.to_string()),
        ];
        match self
            .get_json::<Vec<Customer>>(&["api", "customers"], &params)
            .await
        {
            Ok(customers) => {
                tracing::info!("Found {} customers", customers.len());
                customers
            }
            Err(e @ PosError::UnexpectedStatus { .. }) => {
                tracing::warn!("⚠️ Error searching customers: {}", e);
                Vec::new()
            }
            Err(e) => {
                tracing::error!("❌ Exception searching customers: {}", e);
                Vec::new()
            }
        }
    }

    pub async fn create_customer(&self, customer: &CustomerCreate) -> Option<Customer> {
        match self
            .send_json(Method::POST, &["api", "customers"], customer)
            .await
        {
            Ok(created) => Some(created),
            Err(e) => {
                tracing::error!("❌ Error creating customer: {}", e);
                None
            }
        }
    }

    pub async fn update_customer(
        &self,
        customer_id: i64,
        customer: &CustomerCreate,
    ) -> Option<Customer> {
        let id = customer_id.to_string();
        match self
            .send_json(Method::PUT, &["api", "customers", id.as_str()], customer)
            .await
        {
            Ok(updated) => Some(updated),
            Err(e) => {
                tracing::error!("❌ Error updating customer {}: {}", customer_id, e);
                None
            }
        }
    }

    // ==================== PRODUCTS ====================

    pub async fn get_products(&self, category_id: Option<i64>) -> Vec<Product> {
        let mut query = vec![("available_only", "true".to_string())];
        if let Some(category_id) = category_id {
            query.push(("category_id", category_id.to_string()));
        }

        self.get_json(&["api", "products"], &query)
            .await
            .unwrap_or_else(|e| {
                tracing::error!("❌ Error fetching products: {}", e);
                Vec::new()
            })
    }

    // ==================== ORDERS ====================

    pub async fn get_orders(&self, status: Option<&str>, limit: u32) -> Vec<Order> {
        let mut query = vec![("limit", limit.to_string())];
        if let Some(status) = status.filter(|s| !s.is_empty()) {
            query.push(("status", status.to_string()));
        }

        self.get_json(&["api", "orders"], &query)
            .await
            .unwrap_or_else(|e| {
                tracing::error!("❌ Error fetching orders: {}", e);
                Vec::new()
            })
    }

    // ==================== CATEGORIES ====================

    pub async fn get_categories(&self) -> Vec<Category> {
        self.get_json(&["api", "categories"], &[])
            .await
            .unwrap_or_else(|e| {
                tracing::error!("❌ Error fetching categories: {}", e);
                Vec::new()
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn client(base: &str) -> PosApiClient {
        PosApiClient::new(Client::new(), base).unwrap()
    }

    #[test]
    fn test_endpoint_joins_segments_and_query() {
        let api = client("http://burger-backend:8000");
        let url = api
            .endpoint(&["api", "customers"], &[("limit", "100".to_string())])
            .unwrap();
        assert_eq!(url.as_str(), "http://burger-backend:8000/api/customers?limit=100");
    }

    #[test]
    fn test_endpoint_escapes_path_segments() {
        let api = client("http://localhost:8000/");
        let url = api
            .endpoint(&["api", "customers", "search-by-phone", "+353 87/123"], &[])
            .unwrap();
        assert_eq!(
            url.as_str(),
            "http://localhost:8000/api/customers/search-by-phone/+353%2087%2F123"
        );
    }

    #[test]
    fn test_endpoint_keeps_base_path_prefix() {
        let api = client("http://localhost:8000/pos/");
        let url = api.endpoint(&["health"], &[]).unwrap();
        assert_eq!(url.as_str(), "http://localhost:8000/pos/health");
    }

    #[test]
    fn test_search_value_is_form_encoded() {
        let api = client("http://localhost:8000");
        let url = api
            .endpoint(&["api", "customers"], &[("search", "Mary & Joe".to_string())])
            .unwrap();
        assert_eq!(url.query(), Some("search=Mary+%26+Joe"));
    }
}
