use crate::domain::address::{Eircode, ResolvedAddress, COUNTRY_IRELAND};
use crate::utils::serde::{deserialize_flexible_datetime, deserialize_option_flexible_datetime};
use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

fn default_city() -> String {
    "Drogheda".to_string()
}

fn default_county() -> String {
    "Louth".to_string()
}

fn default_country() -> String {
    COUNTRY_IRELAND.to_string()
}

fn default_order_type() -> String {
    "dine-in".to_string()
}

fn default_order_status() -> String {
    "pending".to_string()
}

fn default_true() -> bool {
    true
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Category {
    pub id: i64,
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(deserialize_with = "deserialize_flexible_datetime")]
    pub created_at: NaiveDateTime,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Customer {
    pub id: i64,
    pub phone: String,
    pub name: String,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub address_line1: Option<String>,
    #[serde(default)]
    pub address_line2: Option<String>,
    #[serde(default = "default_city")]
    pub city: String,
    #[serde(default = "default_county")]
    pub county: String,
    #[serde(default)]
    pub eircode: Option<String>,
    #[serde(default = "default_country")]
    pub country: String,
    #[serde(default)]
    pub latitude: Option<f64>,
    #[serde(default)]
    pub longitude: Option<f64>,
    #[serde(default)]
    pub notes: Option<String>,
    #[serde(default = "default_true")]
    pub is_active: bool,
    #[serde(default)]
    pub total_orders: i64,
    #[serde(default)]
    pub total_spent: f64,
    #[serde(deserialize_with = "deserialize_flexible_datetime")]
    pub created_at: NaiveDateTime,
    #[serde(default, deserialize_with = "deserialize_option_flexible_datetime")]
    pub updated_at: Option<NaiveDateTime>,
}

/// Body for both `POST /api/customers` and `PUT /api/customers/{id}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CustomerCreate {
    pub phone: String,
    pub name: String,
    pub email: Option<String>,
    pub address_line1: Option<String>,
    pub address_line2: Option<String>,
    pub city: String,
    pub county: String,
    pub eircode: Option<String>,
    pub country: String,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    pub notes: Option<String>,
}

impl Default for CustomerCreate {
    fn default() -> Self {
        Self {
            phone: String::new(),
            name: String::new(),
            email: None,
            address_line1: None,
            address_line2: None,
            city: default_city(),
            county: default_county(),
            eircode: None,
            country: default_country(),
            latitude: None,
            longitude: None,
            notes: None,
        }
    }
}

impl CustomerCreate {
    pub fn new(phone: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            phone: phone.into(),
            name: name.into(),
            ..Self::default()
        }
    }

    /// 地址查詢成功後，把結果填進客戶表單
    pub fn apply_address(&mut self, eircode: &Eircode, address: &ResolvedAddress) {
        self.address_line1 = Some(address.street_or_area.clone());
        self.city = address.city.clone();
        if let Some(county) = &address.county {
            self.county = county.clone();
        }
        self.eircode = Some(eircode.formatted());
        self.country = address.country.clone();
        self.latitude = Some(address.latitude);
        self.longitude = Some(address.longitude);
    }
}

impl From<&Customer> for CustomerCreate {
    fn from(customer: &Customer) -> Self {
        Self {
            phone: customer.phone.clone(),
            name: customer.name.clone(),
            email: customer.email.clone(),
            address_line1: customer.address_line1.clone(),
            address_line2: customer.address_line2.clone(),
            city: customer.city.clone(),
            county: customer.county.clone(),
            eircode: customer.eircode.clone(),
            country: customer.country.clone(),
            latitude: customer.latitude,
            longitude: customer.longitude,
            notes: customer.notes.clone(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CustomerSearchResponse {
    pub found: bool,
    #[serde(default)]
    pub customer: Option<Customer>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Product {
    pub id: i64,
    pub category_id: i64,
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    pub price: f64,
    #[serde(default)]
    pub image_url: Option<String>,
    #[serde(default = "default_true")]
    pub is_available: bool,
    #[serde(deserialize_with = "deserialize_flexible_datetime")]
    pub created_at: NaiveDateTime,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Order {
    pub id: i64,
    pub order_number: String,
    #[serde(default)]
    pub customer_name: Option<String>,
    #[serde(default = "default_order_type")]
    pub order_type: String,
    #[serde(default = "default_order_status")]
    pub status: String,
    #[serde(default)]
    pub subtotal: f64,
    #[serde(default)]
    pub tax: f64,
    #[serde(default)]
    pub total: f64,
    #[serde(default)]
    pub payment_method: Option<String>,
    #[serde(deserialize_with = "deserialize_flexible_datetime")]
    pub created_at: NaiveDateTime,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    #[serde(deserialize_with = "deserialize_flexible_datetime")]
    pub timestamp: NaiveDateTime,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::address::AddressSource;

    #[test]
    fn test_customer_defaults_from_backend_payload() {
        let customer: Customer = serde_json::from_str(
            r#"{"id": 7, "phone": "0871234567", "name": "Aoife",
                "created_at": "2024-01-15T10:30:00"}"#,
        )
        .unwrap();

        assert_eq!(customer.city, "Drogheda");
        assert_eq!(customer.county, "Louth");
        assert_eq!(customer.country, "Ireland");
        assert!(customer.is_active);
        assert_eq!(customer.total_orders, 0);
        assert!(customer.updated_at.is_none());
    }

    #[test]
    fn test_order_defaults() {
        let order: Order = serde_json::from_str(
            r#"{"id": 1, "order_number": "ORD-20240115-0001",
                "subtotal": 10.0, "tax": 1.0, "total": 11.0,
                "created_at": "2024-01-15T10:30:00Z"}"#,
        )
        .unwrap();

        assert_eq!(order.order_type, "dine-in");
        assert_eq!(order.status, "pending");
        assert!(order.customer_name.is_none());
    }

    #[test]
    fn test_apply_address_fills_customer_form() {
        let eircode = Eircode::new_unchecked("A92D65P".to_string());
        let address = ResolvedAddress::new(
            AddressSource::GoogleMaps,
            "12 Main Street",
            "Drogheda",
            Some("County Louth".to_string()),
            53.7134,
            -6.3488,
        );

        let mut form = CustomerCreate::new("0871234567", "Aoife");
        form.apply_address(&eircode, &address);

        assert_eq!(form.address_line1.as_deref(), Some("12 Main Street"));
        assert_eq!(form.county, "County Louth");
        assert_eq!(form.eircode.as_deref(), Some("A92 D65P"));
        assert_eq!(form.latitude, Some(53.7134));
        assert_eq!(form.longitude, Some(-6.3488));
    }

    #[test]
    fn test_apply_address_without_county_keeps_existing() {
        let eircode = Eircode::new_unchecked("A91X2Y3".to_string());
        let address = ResolvedAddress::new(
            AddressSource::PrefixTable,
            "Dundalk",
            "Dundalk",
            None,
            54.0,
            -6.4,
        );

        let mut form = CustomerCreate::new("1", "B");
        form.apply_address(&eircode, &address);
        assert_eq!(form.county, "Louth");
    }
}
