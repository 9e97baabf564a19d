//! `store-client`: list and edit store data and place orders from the command line.

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use serde_json::{json, Map, Value};
use store_client::api::{self, ApiClient};
use store_client::table::{render, rows};
use store_client::{place_order_atomic, place_order_stepwise, OrderLine};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "store-client", about = "Online store API client")]
struct Cli {
    /// API root.
    #[arg(long, env = "STORE_URL", default_value = "http://127.0.0.1:5000", global = true)]
    url: String,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    #[command(subcommand)]
    Customers(CustomerCmd),
    #[command(subcommand)]
    Products(ProductCmd),
    #[command(subcommand)]
    Orders(OrderCmd),
    #[command(subcommand)]
    Stock(StockCmd),
}

#[derive(Subcommand)]
enum CustomerCmd {
    List,
    Add {
        #[arg(long)]
        first_name: String,
        #[arg(long)]
        last_name: String,
        #[arg(long)]
        email: String,
        #[arg(long)]
        phone: Option<String>,
    },
    Edit {
        uuid: String,
        #[arg(long)]
        first_name: Option<String>,
        #[arg(long)]
        last_name: Option<String>,
        #[arg(long)]
        email: Option<String>,
        #[arg(long)]
        phone: Option<String>,
    },
    Delete { uuid: String },
}

#[derive(Subcommand)]
enum ProductCmd {
    List,
    /// Create a product and, with --stock, its stock entry.
    Add {
        #[arg(long)]
        name: String,
        #[arg(long)]
        desc: String,
        #[arg(long)]
        price: f64,
        #[arg(long)]
        stock: Option<i64>,
    },
    Edit {
        name: String,
        #[arg(long)]
        new_name: Option<String>,
        #[arg(long)]
        desc: Option<String>,
        #[arg(long)]
        price: Option<f64>,
    },
    Delete { name: String },
}

#[derive(Subcommand)]
enum OrderCmd {
    List,
    Show { id: i64 },
    Delete { id: i64 },
    /// Place an order for a customer, e.g. `place --customer UUID Sateenvarjo=2`.
    Place {
        #[arg(long)]
        customer: String,
        #[arg(required = true)]
        lines: Vec<OrderLine>,
        /// Single checkout request instead of one request per step.
        #[arg(long)]
        atomic: bool,
    },
}

#[derive(Subcommand)]
enum StockCmd {
    List,
    Set { product_id: i64, quantity: i64 },
}

fn changes(pairs: Vec<(&str, Option<Value>)>) -> Map<String, Value> {
    pairs
        .into_iter()
        .filter_map(|(k, v)| v.map(|v| (k.to_string(), v)))
        .collect()
}

async fn customers(api: &ApiClient, cmd: CustomerCmd) -> Result<()> {
    match cmd {
        CustomerCmd::List => {
            let doc = api.get(api::CUSTOMERS).await?;
            let fields = ["uuid", "firstName", "lastName", "email", "phone"];
            print!("{}", render(&fields, &rows(&doc.items("customers")?, &fields)));
        }
        CustomerCmd::Add {
            first_name,
            last_name,
            email,
            phone,
        } => {
            let doc = api.get(api::CUSTOMERS).await?;
            let body = json!({"firstName": first_name, "lastName": last_name, "email": email, "phone": phone});
            println!("created {}", api.create(&doc, "customer:add-customer", &body).await?);
        }
        CustomerCmd::Edit {
            uuid,
            first_name,
            last_name,
            email,
            phone,
        } => {
            let item = api.find(api::CUSTOMERS, "customers", "uuid", &uuid).await?;
            let changes = changes(vec![
                ("firstName", first_name.map(Value::from)),
                ("lastName", last_name.map(Value::from)),
                ("email", email.map(Value::from)),
                ("phone", phone.map(Value::from)),
            ]);
            api.edit(&item, &changes).await?;
            println!("updated customer {}", uuid);
        }
        CustomerCmd::Delete { uuid } => {
            let item = api.find(api::CUSTOMERS, "customers", "uuid", &uuid).await?;
            api.delete(&item).await?;
            println!("deleted customer {}", uuid);
        }
    }
    Ok(())
}

async fn products(api: &ApiClient, cmd: ProductCmd) -> Result<()> {
    match cmd {
        ProductCmd::List => {
            let doc = api.get(api::PRODUCTS).await?;
            let fields = ["id", "name", "desc", "price"];
            print!("{}", render(&fields, &rows(&doc.items("products")?, &fields)));
        }
        ProductCmd::Add {
            name,
            desc,
            price,
            stock,
        } => {
            let doc = api.get(api::PRODUCTS).await?;
            let href = api
                .create(&doc, "product:add-product", &json!({"name": name, "desc": desc, "price": price}))
                .await?;
            println!("created {}", href);
            if let Some(quantity) = stock {
                let product = api.get(&href).await?;
                let stock_doc = api.get(api::STOCK).await?;
                let body = json!({"productId": product.i64_field("id")?, "quantity": quantity});
                let stock_href = api
                    .create(&stock_doc, "stock:add-stock", &body)
                    .await
                    .context("creating stock entry")?;
                println!("created {}", stock_href);
            }
        }
        ProductCmd::Edit {
            name,
            new_name,
            desc,
            price,
        } => {
            let item = api.find(api::PRODUCTS, "products", "name", &name).await?;
            let changes = changes(vec![
                ("name", new_name.map(Value::from)),
                ("desc", desc.map(Value::from)),
                ("price", price.map(Value::from)),
            ]);
            api.edit(&item, &changes).await?;
            println!("updated product {}", name);
        }
        ProductCmd::Delete { name } => {
            let item = api.find(api::PRODUCTS, "products", "name", &name).await?;
            api.delete(&item).await?;
            println!("deleted product {}", name);
        }
    }
    Ok(())
}

async fn orders(api: &ApiClient, cmd: OrderCmd) -> Result<()> {
    match cmd {
        OrderCmd::List => {
            let doc = api.get(api::ORDERS).await?;
            let fields = ["id", "customerId", "createdAt"];
            print!("{}", render(&fields, &rows(&doc.items("orders")?, &fields)));
        }
        OrderCmd::Show { id } => {
            let order = api.find(api::ORDERS, "orders", "id", &id.to_string()).await?;
            println!(
                "order {}  customer {}  created {}",
                id,
                order.display_field("customerId"),
                order.display_field("createdAt")
            );
            let fields = ["id", "productId", "quantity"];
            print!("{}", render(&fields, &rows(&order.items("productorders")?, &fields)));
        }
        OrderCmd::Delete { id } => {
            let order = api.find(api::ORDERS, "orders", "id", &id.to_string()).await?;
            api.delete(&order).await?;
            println!("deleted order {}", id);
        }
        OrderCmd::Place {
            customer,
            lines,
            atomic,
        } => {
            let href = if atomic {
                place_order_atomic(api, &customer, &lines).await?
            } else {
                place_order_stepwise(api, &customer, &lines).await?
            };
            println!("placed {}", href);
        }
    }
    Ok(())
}

async fn stock(api: &ApiClient, cmd: StockCmd) -> Result<()> {
    match cmd {
        StockCmd::List => {
            let doc = api.get(api::STOCK).await?;
            let fields = ["productId", "quantity"];
            print!("{}", render(&fields, &rows(&doc.items("items")?, &fields)));
        }
        StockCmd::Set { product_id, quantity } => {
            let item = api.find(api::STOCK, "items", "productId", &product_id.to_string()).await?;
            let changes = changes(vec![("quantity", Some(Value::from(quantity)))]);
            api.edit(&item, &changes).await?;
            println!("stock of product {} set to {}", product_id, quantity);
        }
    }
    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("store_client=warn")))
        .init();

    let cli = Cli::parse();
    let api = ApiClient::new(&cli.url);
    match cli.command {
        Command::Customers(cmd) => customers(&api, cmd).await,
        Command::Products(cmd) => products(&api, cmd).await,
        Command::Orders(cmd) => orders(&api, cmd).await,
        Command::Stock(cmd) => stock(&api, cmd).await,
    }
}
