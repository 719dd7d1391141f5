use crate::adapters::pos_api::{DEFAULT_CUSTOMER_LIMIT, DEFAULT_ORDER_LIMIT};
use crate::config::toml_config::TomlConfig;
use crate::domain::model::CustomerCreate;
use crate::utils::error::Result;
use clap::{Args, Parser, Subcommand};

#[derive(Debug, Clone, Parser)]
#[command(name = "burger-pos")]
#[command(about = "BurgerPOS frontend: backend API client and Eircode address lookup")]
pub struct CliConfig {
    /// Path to TOML configuration file
    #[arg(short, long)]
    pub config: Option<String>,

    /// Backend base URL (overrides config and API_URL)
    #[arg(long)]
    pub api_url: Option<String>,

    /// Google Maps Geocoding API key (overrides config and GOOGLE_MAPS_API_KEY)
    #[arg(long)]
    pub google_api_key: Option<String>,

    /// Do not query Nominatim when Google Maps is unavailable
    #[arg(long)]
    pub no_nominatim: bool,

    /// Print results as JSON
    #[arg(long)]
    pub json: bool,

    #[arg(short, long, help = "Enable verbose output")]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Clone, Subcommand)]
pub enum Command {
    /// Check that the backend answers on /health
    Health,
    /// Resolve an Eircode to an address
    Eircode {
        /// Eircode, with or without the space (e.g. "A92 D65P")
        code: String,
    },
    /// Customer operations
    #[command(subcommand)]
    Customers(CustomerCommand),
    /// List available products
    Products {
        #[arg(long)]
        category_id: Option<i64>,
    },
    /// List product categories
    Categories,
    /// List orders
    Orders {
        #[arg(long)]
        status: Option<String>,
        #[arg(long, default_value_t = DEFAULT_ORDER_LIMIT)]
        limit: u32,
    },
}

#[derive(Debug, Clone, Subcommand)]
pub enum CustomerCommand {
    /// List customers, optionally filtered by phone, name or Eircode
    List {
        #[arg(long)]
        search: Option<String>,
        #[arg(long, default_value_t = DEFAULT_CUSTOMER_LIMIT)]
        limit: u32,
    },
    /// Quick search (first 10 matches)
    Search { query: String },
    /// Look a customer up by exact phone number
    FindPhone { phone: String },
    /// Create a customer; --eircode fills the address automatically
    Create(CustomerForm),
    /// Update a customer; --eircode fills the address automatically
    Update {
        id: i64,
        #[command(flatten)]
        form: CustomerForm,
    },
}

#[derive(Debug, Clone, Args)]
pub struct CustomerForm {
    #[arg(long)]
    pub phone: String,
    #[arg(long)]
    pub name: String,
    #[arg(long)]
    pub email: Option<String>,
    #[arg(long)]
    pub eircode: Option<String>,
    #[arg(long)]
    pub address_line1: Option<String>,
    #[arg(long)]
    pub address_line2: Option<String>,
    #[arg(long)]
    pub city: Option<String>,
    #[arg(long)]
    pub county: Option<String>,
    #[arg(long)]
    pub notes: Option<String>,
}

impl CustomerForm {
    /// 手動輸入的欄位；地址查詢結果之後再覆蓋上去
    pub fn to_customer_create(&self) -> CustomerCreate {
        let mut customer = CustomerCreate::new(self.phone.clone(), self.name.clone());
        customer.email = self.email.clone();
        customer.address_line1 = self.address_line1.clone();
        customer.address_line2 = self.address_line2.clone();
        if let Some(city) = &self.city {
            customer.city = city.clone();
        }
        if let Some(county) = &self.county {
            customer.county = county.clone();
        }
        customer.eircode = self.eircode.clone();
        customer.notes = self.notes.clone();
        customer
    }
}

impl CliConfig {
    /// 載入設定檔（或環境變數），再套用命令列覆蓋
    pub fn load_config(&self) -> Result<TomlConfig> {
        let mut config = match &self.config {
            Some(path) => TomlConfig::from_file(path)?,
            None => TomlConfig::from_env(),
        };

        if let Some(api_url) = &self.api_url {
            config.backend.api_url = api_url.clone();
        }
        if let Some(key) = &self.google_api_key {
            config.geocoding.google_api_key = Some(key.clone());
        }
        if self.no_nominatim {
            config.geocoding.nominatim_enabled = false;
        }
        if self.verbose {
            config.logging.verbose = true;
        }

        Ok(config)
    }
}
