use sea_orm::{ConnectionTrait, EntityTrait, PaginatorTrait, Statement};
use storefront_api::{
    db::{create_pool, orm_from_pool, run_migrations},
    dto::{
        accounts::{CreateAccountRequest, UpdateAccountRequest},
        customers::CustomerRequest,
        orders::{PlaceOrderRequest, UpdateOrderStatusRequest},
        products::{CreateProductRequest, RestockRequest, UpdateProductRequest, UpdateStockRequest},
    },
    entity::{CustomerAccounts, OrderProduct, OrderStatus, Orders, customer_accounts},
    error::AppError,
    services::{account_service, customer_service, order_service, product_service},
    state::AppState,
};

// Integration flow against PostgreSQL: catalog, accounts, order placement, cancellation, restock.
#[tokio::test]
async fn storefront_flow_against_postgres() -> anyhow::Result<()> {
    // Allow skipping when no DB is configured in the environment.
    let database_url = match std::env::var("TEST_DATABASE_URL")
        .or_else(|_| std::env::var("DATABASE_URL"))
    {
        Ok(url) => url,
        Err(_) => {
            eprintln!(
                "Skipping test: set TEST_DATABASE_URL or DATABASE_URL to run integration flow tests."
            );
            return Ok(());
        }
    };

    let state = setup_state(&database_url).await?;

    // Customer round-trip
    let created = customer_service::create_customer(
        &state,
        customer_request("Ada Lovelace", "ada@example.com", "555-0100"),
    )
    .await?
    .data
    .unwrap();
    let fetched = customer_service::get_customer(&state, created.id)
        .await?
        .data
        .unwrap();
    assert_eq!(fetched, created);

    customer_service::update_customer(
        &state,
        created.id,
        customer_request("Ada King", "ada.king@example.com", "555-0199"),
    )
    .await?;
    let updated = customer_service::get_customer(&state, created.id)
        .await?
        .data
        .unwrap();
    assert_eq!(updated.name, "Ada King");
    assert_eq!(updated.email.as_deref(), Some("ada.king@example.com"));

    // Accounts: hashing, duplicate username, partial update
    let account = account_service::create_account(
        &state,
        CreateAccountRequest {
            username: Some("ada".into()),
            password: Some("s3cret".into()),
            customer_id: Some(created.id),
        },
    )
    .await?
    .data
    .unwrap();
    let stored = CustomerAccounts::find_by_id(account.id)
        .one(state.db())
        .await?
        .unwrap();
    assert_ne!(stored.password_hash, "s3cret");
    assert!(account_service::verify_password("s3cret", &stored.password_hash));

    let other = customer_service::create_customer(
        &state,
        customer_request("Alan Turing", "alan@example.com", "555-0101"),
    )
    .await?
    .data
    .unwrap();
    let duplicate = account_service::create_account(
        &state,
        CreateAccountRequest {
            username: Some("ada".into()),
            password: Some("other".into()),
            customer_id: Some(other.id),
        },
    )
    .await;
    assert!(matches!(duplicate, Err(AppError::Conflict(_))));
    let unchanged: customer_accounts::Model = CustomerAccounts::find_by_id(account.id)
        .one(state.db())
        .await?
        .unwrap();
    assert_eq!(unchanged, stored);

    account_service::update_account(
        &state,
        account.id,
        UpdateAccountRequest {
            username: Some("ada_k".into()),
            password: None,
        },
    )
    .await?;
    let with_customer = account_service::get_account(&state, account.id)
        .await?
        .data
        .unwrap();
    assert_eq!(with_customer.username, "ada_k");
    assert_eq!(with_customer.customer.id, created.id);

    // Product round-trip
    let tea = create_product(&state, "Tea", 10.0).await?;
    let biscuits = create_product(&state, "Biscuits", 5.5).await?;
    product_service::update_product(
        &state,
        biscuits,
        UpdateProductRequest {
            name: Some("Shortbread".into()),
            price: None,
        },
    )
    .await?;
    let shortbread = product_service::get_product(&state, biscuits)
        .await?
        .data
        .unwrap();
    assert_eq!(shortbread.name, "Shortbread");
    assert_eq!(shortbread.price, 5.5);

    // Atomic placement: a missing product leaves nothing behind
    let failed = order_service::place_order(
        &state,
        PlaceOrderRequest {
            customer_id: Some(created.id),
            product_ids: Some(vec![tea, 9999]),
        },
    )
    .await;
    assert!(matches!(failed, Err(AppError::NotFound(ref msg)) if msg.contains("9999")));
    assert_eq!(Orders::find().count(state.db()).await?, 0);
    assert_eq!(OrderProduct::find().count(state.db()).await?, 0);
    let history = order_service::order_history(&state, created.id).await?;
    assert!(history.order_history.is_empty());

    // Successful placement and total
    let placed = order_service::place_order(
        &state,
        PlaceOrderRequest {
            customer_id: Some(created.id),
            product_ids: Some(vec![tea, biscuits, tea]),
        },
    )
    .await?
    .data
    .unwrap();
    assert_eq!(placed.status, OrderStatus::Pending);

    let total = order_service::order_total(&state, placed.order_id)
        .await?
        .data
        .unwrap();
    assert_eq!(total.total_price, 15.5);

    let details = order_service::get_order(&state, placed.order_id)
        .await?
        .data
        .unwrap();
    assert_eq!(details.customer.id, created.id);
    assert_eq!(details.products.len(), 2);

    let history = order_service::order_history(&state, created.id).await?;
    assert_eq!(history.order_history.len(), 1);
    assert_eq!(history.order_history[0].products.len(), 2);

    // Status machine and cancellation
    for status in ["Processing", "Shipped"] {
        order_service::update_order_status(
            &state,
            placed.order_id,
            UpdateOrderStatusRequest {
                status: Some(status.into()),
            },
        )
        .await?;
    }
    let refused = order_service::cancel_order(&state, placed.order_id).await;
    assert!(matches!(refused, Err(AppError::InvalidState(_))));
    let tracked = order_service::track_order(&state, placed.order_id)
        .await?
        .data
        .unwrap();
    assert_eq!(tracked.status, OrderStatus::Shipped);

    let second = order_service::place_order(
        &state,
        PlaceOrderRequest {
            customer_id: Some(created.id),
            product_ids: Some(vec![tea]),
        },
    )
    .await?
    .data
    .unwrap();
    let cancelled = order_service::cancel_order(&state, second.order_id)
        .await?
        .data
        .unwrap();
    assert_eq!(cancelled.status, OrderStatus::Cancelled);

    // Restock touches only products below the threshold
    product_service::update_stock(
        &state,
        tea,
        UpdateStockRequest {
            stock_level: Some(15),
        },
    )
    .await?;
    product_service::update_stock(
        &state,
        biscuits,
        UpdateStockRequest {
            stock_level: Some(3),
        },
    )
    .await?;
    let restocked = product_service::restock_products(
        &state,
        RestockRequest {
            threshold: Some(10),
            restock_amount: Some(20),
        },
    )
    .await?
    .data
    .unwrap();
    assert_eq!(restocked.restocked_products.len(), 1);
    assert_eq!(restocked.restocked_products[0].id, biscuits);
    assert_eq!(restocked.restocked_products[0].stock_level, 23);
    let tea_stock = product_service::get_stock(&state, tea).await?.data.unwrap();
    assert_eq!(tea_stock.stock_level, 15);

    // Deleting a customer removes their account and orders
    customer_service::delete_customer(&state, created.id).await?;
    assert_eq!(Orders::find().count(state.db()).await?, 0);
    assert!(
        CustomerAccounts::find_by_id(account.id)
            .one(state.db())
            .await?
            .is_none()
    );

    Ok(())
}

fn customer_request(name: &str, email: &str, phone: &str) -> CustomerRequest {
    CustomerRequest {
        name: Some(name.into()),
        email: Some(email.into()),
        phone: Some(phone.into()),
    }
}

async fn create_product(state: &AppState, name: &str, price: f64) -> anyhow::Result<i32> {
    let product = product_service::create_product(
        state,
        CreateProductRequest {
            name: Some(name.into()),
            price: Some(price),
        },
    )
    .await?
    .data
    .unwrap();
    Ok(product.id)
}

async fn setup_state(database_url: &str) -> anyhow::Result<AppState> {
    let pool = create_pool(database_url, 5).await?;
    run_migrations(&pool).await?;
    let orm = orm_from_pool(pool);

    // Clean tables between runs
    let backend = orm.get_database_backend();
    orm.execute(Statement::from_string(
        backend,
        "TRUNCATE TABLE order_product, orders, customer_accounts, products, customers RESTART IDENTITY CASCADE",
    ))
    .await?;

    Ok(AppState::new(orm, 5))
}
