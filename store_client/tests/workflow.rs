use onlinestore::{apply_migrations, build_router, store, AppState, Settings};
use serde_json::{json, Map, Value};
use store_client::api::{self, ApiClient, ApiError};
use store_client::{place_order_atomic, place_order_stepwise, OrderLine};
use tempfile::TempDir;
use tokio::net::TcpListener;

/// Seeded server over a database file on several connections, on an ephemeral port.
/// The directory must outlive the test.
async fn spawn_server() -> (ApiClient, TempDir) {
    let dir = tempfile::tempdir().unwrap();
    let settings = Settings {
        database_url: format!("sqlite://{}", dir.path().join("store.db").display()),
        max_connections: 5,
        ..Settings::default()
    };
    let pool = store::connect(&settings).await.unwrap();
    apply_migrations(&pool).await.unwrap();
    store::populate(&pool).await.unwrap();
    let app = build_router(AppState { pool }, settings.body_limit);
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    (ApiClient::new(&format!("http://{}", addr)), dir)
}

fn line(product: &str, quantity: i64) -> OrderLine {
    OrderLine {
        product: product.into(),
        quantity,
    }
}

async fn first_customer(client: &ApiClient) -> String {
    let doc = client.get(api::CUSTOMERS).await.unwrap();
    doc.items("customers").unwrap()[0].str_field("uuid").unwrap().to_string()
}

async fn stock_of(client: &ApiClient, product_id: i64) -> i64 {
    client
        .get(&format!("/api/stock/{}/", product_id))
        .await
        .unwrap()
        .i64_field("quantity")
        .unwrap()
}

#[tokio::test]
async fn lists_collections() {
    let (client, _dir) = spawn_server().await;
    let customers = client.get(api::CUSTOMERS).await.unwrap();
    assert_eq!(customers.items("customers").unwrap().len(), 3);
    let products = client.get(api::PRODUCTS).await.unwrap();
    assert!(products.control("product:add-product").is_ok());
    let stock = client.get(api::STOCK).await.unwrap();
    assert_eq!(stock.items("items").unwrap().len(), 2);
}

#[tokio::test]
async fn stepwise_order_creates_lines_and_reduces_stock() {
    let (client, _dir) = spawn_server().await;
    let customer = first_customer(&client).await;
    let href = place_order_stepwise(&client, &customer, &[line("Sateenvarjo", 2), line("Kumpparit", 5)])
        .await
        .unwrap();
    assert_eq!(href, "/api/orders/2/");

    let order = client.get(&href).await.unwrap();
    assert_eq!(order.str_field("customerId"), Some(customer.as_str()));
    let lines = order.items("productorders").unwrap();
    assert_eq!(lines.len(), 2);
    assert_eq!(lines[1].i64_field("quantity").unwrap(), 5);

    assert_eq!(stock_of(&client, 1).await, 6);
    assert_eq!(stock_of(&client, 2).await, 15);
}

#[tokio::test]
async fn stepwise_order_refuses_before_writing() {
    let (client, _dir) = spawn_server().await;
    let customer = first_customer(&client).await;
    let err = place_order_stepwise(&client, &customer, &[line("Sateenvarjo", 1), line("Kumpparit", 21)])
        .await
        .unwrap_err();
    assert!(err.to_string().contains("Insufficient stock"), "{err:#}");

    let orders = client.get(api::ORDERS).await.unwrap();
    assert_eq!(orders.items("orders").unwrap().len(), 1);
    assert_eq!(stock_of(&client, 1).await, 8);
}

#[tokio::test]
async fn atomic_order_goes_through_checkout() {
    let (client, _dir) = spawn_server().await;
    let customer = first_customer(&client).await;
    let href = place_order_atomic(&client, &customer, &[line("Kumpparit", 20)]).await.unwrap();
    assert_eq!(stock_of(&client, 2).await, 0);
    assert_eq!(client.get(&href).await.unwrap().items("productorders").unwrap().len(), 1);

    let err = place_order_atomic(&client, &customer, &[line("Kumpparit", 1)]).await.unwrap_err();
    let api_err = err.downcast_ref::<ApiError>().expect("api error");
    assert_eq!(api_err.status.as_u16(), 409);
    assert_eq!(api_err.message, "Insufficient stock");
}

#[tokio::test]
async fn unknown_product_is_reported() {
    let (client, _dir) = spawn_server().await;
    let customer = first_customer(&client).await;
    let err = place_order_atomic(&client, &customer, &[line("Hattu", 1)]).await.unwrap_err();
    assert!(err.to_string().contains("Hattu"));
}

#[tokio::test]
async fn edit_and_delete_follow_item_controls() {
    let (client, _dir) = spawn_server().await;
    let customer = client.find(api::CUSTOMERS, "customers", "firstName", "Pekka").await.unwrap();

    let mut changes = Map::new();
    changes.insert("phone".into(), Value::from("0400000000"));
    client.edit(&customer, &changes).await.unwrap();

    let self_href = customer.control("self").unwrap().href.clone();
    let updated = client.get(&self_href).await.unwrap();
    assert_eq!(updated.str_field("phone"), Some("0400000000"));
    assert_eq!(updated.str_field("email"), Some("pekka.pakkala@gmail.com"));

    client.delete(&updated).await.unwrap();
    let err = client.get(&self_href).await.unwrap_err();
    let api_err = err.downcast_ref::<ApiError>().expect("api error");
    assert_eq!(api_err.status.as_u16(), 404);
    assert_eq!(api_err.message, "Not found");
}

#[tokio::test]
async fn create_returns_location() {
    let (client, _dir) = spawn_server().await;
    let products = client.get(api::PRODUCTS).await.unwrap();
    let href = client
        .create(
            &products,
            "product:add-product",
            &json!({"name": "Red hat", "desc": "Punainen hattu", "price": 12.5}),
        )
        .await
        .unwrap();
    assert_eq!(href, "/api/products/Red%20hat/");
    assert_eq!(client.get(&href).await.unwrap().str_field("name"), Some("Red hat"));
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn overlapping_atomic_orders_share_the_stock() {
    let (client, _dir) = spawn_server().await;
    let customer = first_customer(&client).await;
    let lines = [line("Sateenvarjo", 3)];
    let (a, b, c) = tokio::join!(
        place_order_atomic(&client, &customer, &lines),
        place_order_atomic(&client, &customer, &lines),
        place_order_atomic(&client, &customer, &lines),
    );
    let results = [a, b, c];
    let placed = results.iter().filter(|r| r.is_ok()).count();
    assert_eq!(placed, 2);
    for err in results.iter().filter_map(|r| r.as_ref().err()) {
        assert_eq!(err.downcast_ref::<ApiError>().expect("api error").status.as_u16(), 409);
    }
    assert_eq!(stock_of(&client, 1).await, 2);
}
