use std::sync::Arc;

use cellar::application::repos::{
    CreateProductParams, CustomersRepo, DashboardRepo, OrdersRepo, ProductsRepo,
    ProductsWriteRepo, RepoError, UpdateProductParams,
};
use cellar::cache::{CacheLoader, ProductCache};
use cellar::infra::db::SqliteRepositories;
use sqlx::SqlitePool;

fn merlot() -> CreateProductParams {
    CreateProductParams {
        name: "Merlot".to_string(),
        wine_type: "Red".to_string(),
        region: "Bordeaux".to_string(),
        vintage: 2019,
        price: 12.5,
        alcohol: 13.5,
        stock: 24,
        description: Some("Soft and plummy".to_string()),
        image_url: None,
    }
}

async fn insert_product(pool: &SqlitePool, name: &str, price: f64) -> i64 {
    sqlx::query_scalar(
        "INSERT INTO products (name, type, region, vintage, price, alcohol, stock) \
         VALUES (?, 'White', 'Mosel', 2021, ?, 11.0, 6) RETURNING id",
    )
    .bind(name)
    .bind(price)
    .fetch_one(pool)
    .await
    .expect("insert product")
}

async fn insert_customer(pool: &SqlitePool, name: &str, email: &str) -> i64 {
    sqlx::query_scalar(
        "INSERT INTO customers (name, email, password) VALUES (?, ?, 'x') RETURNING id",
    )
    .bind(name)
    .bind(email)
    .fetch_one(pool)
    .await
    .expect("insert customer")
}

async fn insert_order(
    pool: &SqlitePool,
    customer_id: i64,
    product_id: i64,
    status: &str,
    order_date: Option<&str>,
) -> i64 {
    sqlx::query_scalar(
        "INSERT INTO orders (customer_id, product_id, quantity, total_price, status, order_date) \
         VALUES (?, ?, 2, 25.0, ?, ?) RETURNING id",
    )
    .bind(customer_id)
    .bind(product_id)
    .bind(status)
    .bind(order_date)
    .fetch_one(pool)
    .await
    .expect("insert order")
}

#[sqlx::test(migrations = "./migrations")]
async fn product_write_round_trip(pool: SqlitePool) {
    let repos = SqliteRepositories::new(pool);

    let created = repos.create_product(merlot()).await.expect("create");
    assert_eq!(created.name, "Merlot");
    assert_eq!(created.wine_type, "Red");
    assert_eq!(created.description.as_deref(), Some("Soft and plummy"));

    let updated = repos
        .update_product(UpdateProductParams {
            id: created.id,
            name: "Merlot Reserve".to_string(),
            wine_type: "Red".to_string(),
            region: "Bordeaux".to_string(),
            vintage: 2018,
            price: 30.0,
            alcohol: 14.0,
            stock: 3,
            description: None,
            image_url: Some("/img/merlot.png".to_string()),
        })
        .await
        .expect("update");
    assert_eq!(updated.id, created.id);
    assert_eq!(updated.vintage, 2018);
    assert_eq!(updated.description, None);

    let found = repos
        .find_product(created.id)
        .await
        .expect("find")
        .expect("product exists");
    assert_eq!(found, updated);

    repos.delete_product(created.id).await.expect("delete");
    assert!(repos.find_product(created.id).await.expect("find").is_none());
    assert!(matches!(
        repos.delete_product(created.id).await,
        Err(RepoError::NotFound)
    ));
}

#[sqlx::test(migrations = "./migrations")]
async fn update_of_missing_product_is_not_found(pool: SqlitePool) {
    let repos = SqliteRepositories::new(pool);
    let merlot = merlot();

    let result = repos
        .update_product(UpdateProductParams {
            id: 404,
            name: merlot.name,
            wine_type: merlot.wine_type,
            region: merlot.region,
            vintage: merlot.vintage,
            price: merlot.price,
            alcohol: merlot.alcohol,
            stock: merlot.stock,
            description: merlot.description,
            image_url: merlot.image_url,
        })
        .await;

    assert!(matches!(result, Err(RepoError::NotFound)));
}

#[sqlx::test(migrations = "./migrations")]
async fn admin_listing_is_newest_first(pool: SqlitePool) {
    let first = insert_product(&pool, "Riesling", 14.0).await;
    let second = insert_product(&pool, "Gruner", 16.0).await;
    sqlx::query("UPDATE products SET created_at = '2020-01-01 00:00:00' WHERE id = ?")
        .bind(second)
        .execute(&pool)
        .await
        .expect("backdate product");
    let third = insert_product(&pool, "Silvaner", 11.0).await;

    let repos = SqliteRepositories::new(pool);
    let ids: Vec<i64> = repos
        .list_products_newest_first()
        .await
        .expect("list")
        .into_iter()
        .map(|product| product.id)
        .collect();

    assert_eq!(ids, vec![third, first, second]);
}

#[sqlx::test(migrations = "./migrations")]
async fn deleting_ordered_product_violates_integrity(pool: SqlitePool) {
    let product = insert_product(&pool, "Chablis", 21.0).await;
    let customer = insert_customer(&pool, "Ada", "ada@example.com").await;
    insert_order(&pool, customer, product, "Pending", Some("2024-05-01 09:00:00")).await;

    let repos = SqliteRepositories::new(pool);
    let result = repos.delete_product(product).await;

    assert!(matches!(result, Err(RepoError::Integrity { .. })));
}

#[sqlx::test(migrations = "./migrations")]
async fn loader_mirrors_every_row(pool: SqlitePool) {
    let mut expected = Vec::new();
    for (name, price) in [("Riesling", 14.0), ("Syrah", 18.5), ("Malbec", 15.25)] {
        let id = insert_product(&pool, name, price).await;
        expected.push((id, name, price));
    }

    let repos = Arc::new(SqliteRepositories::new(pool));
    let stored = repos.list_all_products().await.expect("list all");
    let cache = Arc::new(ProductCache::new());
    let loader = CacheLoader::new(repos.clone(), cache.clone());

    assert_eq!(loader.load().await.expect("load"), expected.len());
    assert_eq!(cache.get_all().len(), expected.len());
    for record in stored {
        assert_eq!(cache.get(record.id), Some(record));
    }
    for (id, name, price) in expected {
        let cached = cache.get(id).expect("cached product");
        assert_eq!(cached.name, name);
        assert_eq!(cached.price, price);
    }
}

#[sqlx::test(migrations = "./migrations")]
async fn cache_stays_stale_after_store_changes(pool: SqlitePool) {
    let repos = Arc::new(SqliteRepositories::new(pool));
    let created = repos.create_product(merlot()).await.expect("create");
    let cache = Arc::new(ProductCache::new());
    let loader = CacheLoader::new(repos.clone(), cache.clone());
    loader.load().await.expect("load");

    repos.delete_product(created.id).await.expect("delete");
    let added = repos
        .create_product(CreateProductParams {
            name: "Sancerre".to_string(),
            wine_type: "White".to_string(),
            ..merlot()
        })
        .await
        .expect("create second");

    let cached = cache.get(created.id).expect("stale entry survives");
    assert_eq!(cached.name, "Merlot");
    assert_eq!(cached.price, 12.5);
    assert!(cache.get(added.id).is_none());

    loader.load().await.expect("reload");
    assert!(cache.get(created.id).is_none());
    assert_eq!(cache.get(added.id).map(|p| p.name), Some("Sancerre".to_string()));
}

#[sqlx::test(migrations = "./migrations")]
async fn loading_empty_table_yields_empty_cache(pool: SqlitePool) {
    let repos = Arc::new(SqliteRepositories::new(pool));
    let cache = Arc::new(ProductCache::new());

    let loaded = CacheLoader::new(repos, cache.clone())
        .load()
        .await
        .expect("load");

    assert_eq!(loaded, 0);
    assert!(cache.get(1).is_none());
    assert!(cache.get_all().is_empty());
}

#[sqlx::test(migrations = "./migrations")]
async fn dashboard_counts_and_recent_orders(pool: SqlitePool) {
    let riesling = insert_product(&pool, "Riesling", 14.0).await;
    let syrah = insert_product(&pool, "Syrah", 18.5).await;
    let ada = insert_customer(&pool, "Ada", "ada@example.com").await;
    let grace = insert_customer(&pool, "Grace", "grace@example.com").await;

    let dates = [
        "2024-01-01 08:00:00",
        "2024-01-03 08:00:00",
        "2024-01-02 08:00:00",
        "2024-01-05 08:00:00",
        "2024-01-04 08:00:00",
        "2024-01-06 08:00:00",
    ];
    let mut order_ids = Vec::new();
    for (index, date) in dates.iter().enumerate() {
        let (customer, product) = if index % 2 == 0 {
            (ada, riesling)
        } else {
            (grace, syrah)
        };
        let status = if index < 4 { "Pending" } else { "Shipped" };
        order_ids.push(insert_order(&pool, customer, product, status, Some(date)).await);
    }

    let repos = SqliteRepositories::new(pool);
    let counts = repos.dashboard_counts().await.expect("counts");
    assert_eq!(counts.total_products, 2);
    assert_eq!(counts.total_customers, 2);
    assert_eq!(counts.total_orders, 6);
    assert_eq!(counts.pending_orders, 4);

    let recent = repos.recent_orders(5).await.expect("recent orders");
    let ids: Vec<i64> = recent.iter().map(|order| order.id).collect();
    assert_eq!(
        ids,
        vec![order_ids[5], order_ids[3], order_ids[4], order_ids[1], order_ids[2]]
    );
    assert_eq!(recent[0].customer_name, "Grace");
    assert_eq!(recent[0].product_name, "Syrah");
    assert_eq!(recent[0].status, "Shipped");
    assert_eq!(recent[0].order_date.map(|date| date.year()), Some(2024));
}

#[sqlx::test(migrations = "./migrations")]
async fn undated_orders_decode_and_sort_last(pool: SqlitePool) {
    let riesling = insert_product(&pool, "Riesling", 14.0).await;
    let ada = insert_customer(&pool, "Ada", "ada@example.com").await;
    let undated = insert_order(&pool, ada, riesling, "Pending", None).await;
    let dated = insert_order(&pool, ada, riesling, "Pending", Some("2024-02-01 10:00:00")).await;

    let repos = SqliteRepositories::new(pool);

    let recent = repos.recent_orders(5).await.expect("recent orders");
    let ids: Vec<i64> = recent.iter().map(|order| order.id).collect();
    assert_eq!(ids, vec![dated, undated]);
    assert!(recent[0].order_date.is_some());
    assert_eq!(recent[1].order_date, None);

    let listed = repos.list_orders(None).await.expect("order listing");
    assert_eq!(listed.len(), 2);
    let for_ada = repos
        .list_orders_for_customer(ada)
        .await
        .expect("customer orders");
    assert_eq!(for_ada.last().map(|order| order.id), Some(undated));
}

#[sqlx::test(migrations = "./migrations")]
async fn customer_search_matches_name_or_email(pool: SqlitePool) {
    let ada = insert_customer(&pool, "Ada Lovelace", "ada@example.com").await;
    let grace = insert_customer(&pool, "Grace Hopper", "ghopper@navy.example").await;
    let linus = insert_customer(&pool, "Linus", "linus@kernel.example").await;

    let repos = SqliteRepositories::new(pool);

    let everyone = repos.list_customers(None).await.expect("all customers");
    let ids: Vec<i64> = everyone.iter().map(|customer| customer.id).collect();
    assert_eq!(ids, vec![linus, grace, ada]);
    assert!(everyone.iter().all(|customer| customer.joined_at.is_some()));

    let by_name = repos.list_customers(Some("hopper")).await.expect("by name");
    assert_eq!(by_name.iter().map(|c| c.id).collect::<Vec<_>>(), vec![grace]);

    let by_email = repos.list_customers(Some("example.com")).await.expect("by email");
    assert_eq!(by_email.iter().map(|c| c.id).collect::<Vec<_>>(), vec![ada]);

    let none = repos.list_customers(Some("sommelier")).await.expect("no match");
    assert!(none.is_empty());

    let found = repos.find_customer(grace).await.expect("lookup");
    assert_eq!(found.map(|c| c.email), Some("ghopper@navy.example".to_string()));
    assert!(repos.find_customer(999).await.expect("missing").is_none());
}

#[sqlx::test(migrations = "./migrations")]
async fn order_listing_filters_by_status(pool: SqlitePool) {
    let syrah = insert_product(&pool, "Syrah", 18.5).await;
    let ada = insert_customer(&pool, "Ada", "ada@example.com").await;
    let grace = insert_customer(&pool, "Grace", "grace@example.com").await;

    let shipped = insert_order(&pool, ada, syrah, "Shipped", Some("2024-03-01 09:00:00")).await;
    let pending = insert_order(&pool, grace, syrah, "Pending", Some("2024-03-02 09:00:00")).await;
    let unset: i64 = sqlx::query_scalar(
        "INSERT INTO orders (customer_id, product_id, quantity, total_price, status, order_date) \
         VALUES (?, ?, 1, 18.5, NULL, '2024-03-03 09:00:00') RETURNING id",
    )
    .bind(ada)
    .bind(syrah)
    .fetch_one(&pool)
    .await
    .expect("insert order without status");

    let repos = SqliteRepositories::new(pool);

    let all = repos.list_orders(None).await.expect("all orders");
    let ids: Vec<i64> = all.iter().map(|order| order.id).collect();
    assert_eq!(ids, vec![unset, pending, shipped]);
    assert_eq!(all[0].status, "Pending");
    assert_eq!(all[0].customer_name, "Ada");
    assert_eq!(all[0].product_id, syrah);

    let pending_only = repos.list_orders(Some("Pending")).await.expect("pending");
    let ids: Vec<i64> = pending_only.iter().map(|order| order.id).collect();
    assert_eq!(ids, vec![unset, pending]);

    let shipped_only = repos.list_orders(Some("Shipped")).await.expect("shipped");
    assert_eq!(shipped_only.iter().map(|o| o.id).collect::<Vec<_>>(), vec![shipped]);

    assert_eq!(repos.dashboard_counts().await.expect("counts").pending_orders, 2);

    let for_grace = repos
        .list_orders_for_customer(grace)
        .await
        .expect("grace orders");
    assert_eq!(for_grace.iter().map(|o| o.id).collect::<Vec<_>>(), vec![pending]);
}
