//! Store-specific Mason controls on top of [`MasonBuilder`].

use crate::hrefs;
use crate::mason::{Control, MasonBuilder};
use crate::models::{
    Customer, Order, Product, ProductOrder, Stock, CHECKOUT_SCHEMA, CUSTOMER_SCHEMA, ORDER_SCHEMA,
    PRODUCTORDER_SCHEMA, PRODUCT_SCHEMA, STOCK_SCHEMA,
};
use serde::Serialize;
use std::ops::{Deref, DerefMut};

#[derive(Clone, Debug, Default, Serialize)]
#[serde(transparent)]
pub struct InventoryBuilder(MasonBuilder);

impl Deref for InventoryBuilder {
    type Target = MasonBuilder;

    fn deref(&self) -> &MasonBuilder {
        &self.0
    }
}

impl DerefMut for InventoryBuilder {
    fn deref_mut(&mut self) -> &mut MasonBuilder {
        &mut self.0
    }
}

fn get(href: String, title: &str) -> Control {
    Control::new(href).method("GET").title(title)
}

impl InventoryBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_item<T: Serialize>(item: &T) -> Result<Self, serde_json::Error> {
        MasonBuilder::from_item(item).map(InventoryBuilder)
    }

    pub fn into_inner(self) -> MasonBuilder {
        self.0
    }

    // Collections

    pub fn add_control_all_products(&mut self) {
        self.add_control("product:get-products", get(hrefs::product_collection(), "Get all products"));
    }

    pub fn add_control_all_customers(&mut self) {
        self.add_control("customer:get-customers", get(hrefs::customer_collection(), "Get all customers"));
    }

    pub fn add_control_all_orders(&mut self) {
        self.add_control("order:get-orders", get(hrefs::order_collection(), "Get all orders"));
    }

    pub fn add_control_all_productorders(&mut self) {
        self.add_control(
            "productorder:get-productorders",
            get(hrefs::productorder_collection(), "Get all product orders"),
        );
    }

    pub fn add_control_all_stock(&mut self) {
        self.add_control("stock:get-stocks", get(hrefs::stock_collection(), "Get all stocks"));
    }

    // Relations

    pub fn add_control_customer_to_order(&mut self, customer_uuid: &str) {
        self.add_control(
            "order:by-customer",
            get(hrefs::customer_item(customer_uuid), "Get customer to order"),
        );
    }

    pub fn add_control_customer_orders(&mut self, customer: &Customer) {
        self.add_control(
            "customer:customer-orders",
            get(hrefs::customer_orders(&customer.uuid), "Get customer orders"),
        );
    }

    pub fn add_control_get_productorders(&mut self, product: &Product) {
        self.add_control(
            "product:get-productorders",
            get(hrefs::product_productorders(&product.name), "Get product orders for the product"),
        );
    }

    pub fn add_control_get_stock(&mut self, product: &Product) {
        self.add_control(
            "product:stock-by-product",
            get(hrefs::stock_item(product.id), "Get stock for the product"),
        );
    }

    pub fn add_control_get_product(&mut self, product: &Product) {
        self.add_control(
            "stock:get-product",
            get(hrefs::product_item(&product.name), "Get product for the stock"),
        );
    }

    pub fn add_control_order(&mut self, order_id: i64) {
        self.add_control(
            "productorder:get-order",
            get(hrefs::order_item(order_id), "Get order for the productorder"),
        );
    }

    pub fn add_control_product(&mut self, product: &Product) {
        self.add_control(
            "productorder:get-product",
            get(hrefs::product_item(&product.name), "Get product for the productorder"),
        );
    }

    // POST

    pub fn add_control_add_product(&mut self) {
        self.add_control_post(
            "product:add-product",
            "Add a new product",
            hrefs::product_collection(),
            PRODUCT_SCHEMA.to_json(),
        );
    }

    pub fn add_control_add_customer(&mut self) {
        self.add_control_post(
            "customer:add-customer",
            "Add a new customer",
            hrefs::customer_collection(),
            CUSTOMER_SCHEMA.to_json(),
        );
    }

    pub fn add_control_add_order(&mut self) {
        self.add_control_post(
            "order:add-order",
            "Add a new order",
            hrefs::order_collection(),
            ORDER_SCHEMA.to_json(),
        );
    }

    pub fn add_control_checkout(&mut self) {
        self.add_control_post(
            "order:checkout",
            "Place an order with its items and reserve stock",
            hrefs::checkout(),
            CHECKOUT_SCHEMA.to_json(),
        );
    }

    pub fn add_control_add_productorder(&mut self) {
        self.add_control_post(
            "productorder:add-productorder",
            "Add a new product order",
            hrefs::productorder_collection(),
            PRODUCTORDER_SCHEMA.to_json(),
        );
    }

    pub fn add_control_add_stock(&mut self) {
        self.add_control_post(
            "stock:add-stock",
            "Add stock for a product",
            hrefs::stock_collection(),
            STOCK_SCHEMA.to_json(),
        );
    }

    // PUT

    pub fn add_control_edit_customer(&mut self, customer: &Customer) {
        self.add_control_put("Edit a customer", hrefs::customer_item(&customer.uuid), CUSTOMER_SCHEMA.to_json());
    }

    pub fn add_control_edit_product(&mut self, product: &Product) {
        self.add_control_put("Edit a product", hrefs::product_item(&product.name), PRODUCT_SCHEMA.to_json());
    }

    pub fn add_control_edit_order(&mut self, order: &Order) {
        self.add_control_put("Edit an order", hrefs::order_item(order.id), ORDER_SCHEMA.to_json());
    }

    pub fn add_control_edit_productorder(&mut self, line: &ProductOrder) {
        self.add_control_put(
            "Edit a product order",
            hrefs::productorder_item(line.id),
            PRODUCTORDER_SCHEMA.to_json(),
        );
    }

    pub fn add_control_edit_stock(&mut self, stock: &Stock) {
        self.add_control_put("Edit stock", hrefs::stock_item(stock.product_id), STOCK_SCHEMA.to_json());
    }

    // DELETE

    pub fn add_control_delete_product(&mut self, product: &Product) {
        self.add_control_delete("Delete a product", hrefs::product_item(&product.name));
    }

    pub fn add_control_delete_customer(&mut self, customer: &Customer) {
        self.add_control_delete("Delete a customer", hrefs::customer_item(&customer.uuid));
    }

    pub fn add_control_delete_order(&mut self, order: &Order) {
        self.add_control_delete("Delete an order", hrefs::order_item(order.id));
    }

    pub fn add_control_delete_productorder(&mut self, line: &ProductOrder) {
        self.add_control_delete("Delete a product order", hrefs::productorder_item(line.id));
    }

    pub fn add_control_delete_stock(&mut self, stock: &Stock) {
        self.add_control_delete("Delete product stock", hrefs::stock_item(stock.product_id));
    }
}
