use burger_pos::config::{Command, CustomerCommand, CustomerForm};
use burger_pos::domain::model::{Category, Customer, CustomerCreate, Order, Product};
use burger_pos::utils::error::ErrorSeverity;
use burger_pos::utils::logger::{self, LogFormat};
use burger_pos::utils::validation::Validate;
use burger_pos::{build_resolver, CliConfig, EircodeResolver, LookupOutcome, PosApiClient};
use clap::Parser;
use serde::Serialize;

const MAX_LIST_LIMIT: u32 = 1000;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = CliConfig::parse();

    let config = match cli.load_config() {
        Ok(config) => config,
        Err(e) => {
            eprintln!("❌ Failed to load configuration: {}", e.user_friendly_message());
            eprintln!("💡 Suggestion: {}", e.recovery_suggestion());
            std::process::exit(1);
        }
    };

    // 初始化日誌
    logger::init_logger(
        LogFormat::from_json_flag(config.logging.json),
        config.logging.verbose,
    );

    tracing::info!("🍔 Starting burger-pos CLI");
    tracing::debug!("CLI args: {:?}", cli);

    // 驗證配置
    if let Err(e) = config.validate() {
        tracing::error!("❌ Configuration validation failed: {}", e);
        tracing::error!("💡 Suggestion: {}", e.recovery_suggestion());
        eprintln!("❌ {}", e.user_friendly_message());
        std::process::exit(1);
    }

    tracing::info!("🔗 Backend API URL: {}", config.backend.api_url);

    let api = PosApiClient::from_config(&config);
    let resolver = build_resolver(&config);
    let (api, resolver) = match (api, resolver) {
        (Ok(api), Ok(resolver)) => (api, resolver),
        (Err(e), _) | (_, Err(e)) => {
            tracing::error!(
                "❌ Startup failed: {} (Category: {:?}, Severity: {:?})",
                e,
                e.category(),
                e.severity()
            );
            eprintln!("❌ {}", e.user_friendly_message());
            eprintln!("💡 Suggestion: {}", e.recovery_suggestion());
            let exit_code = match e.severity() {
                ErrorSeverity::Low | ErrorSeverity::High => 1,
                ErrorSeverity::Medium => 2,
                ErrorSeverity::Critical => 3,
            };
            std::process::exit(exit_code);
        }
    };

    let exit_code = run(&cli, &api, &resolver).await?;
    if exit_code != 0 {
        std::process::exit(exit_code);
    }
    Ok(())
}

async fn run(
    cli: &CliConfig,
    api: &PosApiClient,
    resolver: &EircodeResolver,
) -> anyhow::Result<i32> {
    match &cli.command {
        Command::Health => match api.health().await {
            Some(health) => {
                if cli.json {
                    print_json(&health)?;
                } else {
                    println!("✅ Backend {} ({})", health.status, health.timestamp);
                }
                Ok(0)
            }
            None => {
                eprintln!("❌ Backend unreachable at {}", api.base_url());
                Ok(1)
            }
        },
        Command::Eircode { code } => {
            let outcome = resolver.resolve(code).await;
            report_outcome(&outcome, cli.json)?;
            Ok(outcome_exit_code(&outcome))
        }
        Command::Customers(command) => run_customers(cli, api, resolver, command).await,
        Command::Products { category_id } => {
            let products = api.get_products(*category_id).await;
            print_list(&products, cli.json, format_product)?;
            Ok(0)
        }
        Command::Categories => {
            let categories = api.get_categories().await;
            print_list(&categories, cli.json, format_category)?;
            Ok(0)
        }
        Command::Orders { status, limit } => {
            check_limit(*limit)?;
            let orders = api.get_orders(status.as_deref(), *limit).await;
            print_list(&orders, cli.json, format_order)?;
            Ok(0)
        }
    }
}

async fn run_customers(
    cli: &CliConfig,
    api: &PosApiClient,
    resolver: &EircodeResolver,
    command: &CustomerCommand,
) -> anyhow::Result<i32> {
    match command {
        CustomerCommand::List { search, limit } => {
            check_limit(*limit)?;
            let customers = api.get_customers(search.as_deref(), *limit).await;
            print_list(&customers, cli.json, format_customer)?;
            Ok(0)
        }
        CustomerCommand::Search { query } => {
            let customers = api.search_customers(query).await;
            print_list(&customers, cli.json, format_customer)?;
            Ok(0)
        }
        CustomerCommand::FindPhone { phone } => match api.search_customer_by_phone(phone).await {
            Some(response) if cli.json => {
                print_json(&response)?;
                Ok(if response.found { 0 } else { 1 })
            }
            Some(response) => match response.customer {
                Some(customer) if response.found => {
                    println!("{}", format_customer(&customer));
                    Ok(0)
                }
                _ => {
                    println!("No customer registered with phone {}", phone);
                    Ok(1)
                }
            },
            None => {
                eprintln!("❌ Customer lookup failed, see logs for details");
                Ok(1)
            }
        },
        CustomerCommand::Create(form) => {
            let customer = prepare_customer(resolver, form).await;
            match api.create_customer(&customer).await {
                Some(created) => {
                    print_customer_result("Created", &created, cli.json)?;
                    Ok(0)
                }
                None => {
                    eprintln!("❌ Customer could not be created, see logs for details");
                    Ok(1)
                }
            }
        }
        CustomerCommand::Update { id, form } => {
            let customer = prepare_customer(resolver, form).await;
            match api.update_customer(*id, &customer).await {
                Some(updated) => {
                    print_customer_result("Updated", &updated, cli.json)?;
                    Ok(0)
                }
                None => {
                    eprintln!("❌ Customer {} could not be updated, see logs for details", id);
                    Ok(1)
                }
            }
        }
    }
}

/// 有 Eircode 就先查地址；查不到時保留手動輸入的欄位
async fn prepare_customer(resolver: &EircodeResolver, form: &CustomerForm) -> CustomerCreate {
    let mut customer = form.to_customer_create();

    let Some(raw) = &form.eircode else {
        return customer;
    };

    let outcome = resolver.resolve(raw).await;
    match (burger_pos::parse_eircode(raw), outcome.address()) {
        (Ok(eircode), Some(address)) => {
            customer.apply_address(&eircode, address);
            eprintln!(
                "📍 Address filled from {}: {}, {}",
                address.source, address.street_or_area, address.city
            );
        }
        _ => {
            eprintln!("⚠️ {}", outcome.user_message());
        }
    }
    customer
}

fn report_outcome(outcome: &LookupOutcome, json: bool) -> anyhow::Result<()> {
    if json {
        let value = match outcome {
            LookupOutcome::Found(address) => serde_json::json!({
                "outcome": "found",
                "address": address,
            }),
            LookupOutcome::NotFound => serde_json::json!({
                "outcome": "not_found",
                "message": outcome.user_message(),
            }),
            LookupOutcome::InvalidFormat(reason) => serde_json::json!({
                "outcome": "invalid_format",
                "message": reason,
            }),
            LookupOutcome::SourceError { source, message } => serde_json::json!({
                "outcome": "source_error",
                "source": source,
                "message": message,
            }),
        };
        return print_json(&value);
    }

    match outcome {
        LookupOutcome::Found(address) => {
            println!("✅ {}", address.street_or_area);
            println!("   {}", address.city);
            if let Some(county) = &address.county {
                println!("   {}", county);
            }
            println!("   {}", address.country);
            println!(
                "   ({:.4}, {:.4}) via {}",
                address.latitude, address.longitude, address.source
            );
        }
        LookupOutcome::SourceError { source, message } => {
            eprintln!("❌ [{}] {}", source, message);
        }
        LookupOutcome::NotFound | LookupOutcome::InvalidFormat(_) => {
            eprintln!("❌ {}", outcome.user_message());
        }
    }
    Ok(())
}

fn check_limit(limit: u32) -> anyhow::Result<()> {
    anyhow::ensure!(
        (1..=MAX_LIST_LIMIT).contains(&limit),
        "--limit must be between 1 and {}, got {}",
        MAX_LIST_LIMIT,
        limit
    );
    Ok(())
}

fn outcome_exit_code(outcome: &LookupOutcome) -> i32 {
    match outcome {
        LookupOutcome::Found(_) => 0,
        LookupOutcome::NotFound => 1,
        LookupOutcome::InvalidFormat(_) => 2,
        LookupOutcome::SourceError { .. } => 3,
    }
}

fn print_json<T: Serialize + ?Sized>(value: &T) -> anyhow::Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

fn print_list<T: Serialize>(
    items: &[T],
    json: bool,
    format: fn(&T) -> String,
) -> anyhow::Result<()> {
    if json {
        return print_json(items);
    }
    if items.is_empty() {
        println!("(no results)");
    }
    for item in items {
        println!("{}", format(item));
    }
    Ok(())
}

fn print_customer_result(action: &str, customer: &Customer, json: bool) -> anyhow::Result<()> {
    if json {
        return print_json(customer);
    }
    println!("✅ {} customer #{}", action, customer.id);
    println!("{}", format_customer(customer));
    Ok(())
}

fn format_customer(customer: &Customer) -> String {
    format!(
        "{:>5}  {:<14} {:<24} {:<9} {}",
        customer.id,
        customer.phone,
        customer.name,
        customer.eircode.as_deref().unwrap_or("-"),
        customer.city
    )
}

fn format_product(product: &Product) -> String {
    format!(
        "{:>5}  {:<28} €{:>7.2}{}",
        product.id,
        product.name,
        product.price,
        if product.is_available { "" } else { "  (unavailable)" }
    )
}

fn format_category(category: &Category) -> String {
    format!(
        "{:>5}  {:<20} {}",
        category.id,
        category.name,
        category.description.as_deref().unwrap_or_default()
    )
}

fn format_order(order: &Order) -> String {
    format!(
        "{:<20} {:<10} {:<9} €{:>7.2}  {}",
        order.order_number,
        order.status,
        order.order_type,
        order.total,
        order.customer_name.as_deref().unwrap_or("-")
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_check_limit_bounds() {
        assert!(check_limit(1).is_ok());
        assert!(check_limit(MAX_LIST_LIMIT).is_ok());
        assert!(check_limit(0).is_err());
        assert!(check_limit(MAX_LIST_LIMIT + 1).is_err());
    }

    #[test]
    fn test_outcome_exit_codes() {
        assert_eq!(outcome_exit_code(&LookupOutcome::NotFound), 1);
        assert_eq!(
            outcome_exit_code(&LookupOutcome::InvalidFormat("bad".to_string())),
            2
        );
    }
}
