use sea_orm::{
    ActiveModelTrait, ColumnTrait, EntityTrait, QueryFilter, QueryOrder, QuerySelect, Set,
    TransactionTrait,
};
use sea_orm::ActiveValue::NotSet;
use sea_orm::sea_query::{Expr, LockType};

use crate::{
    dto::{
        customers::Deleted,
        products::{
            CreateProductRequest, ProductList, RestockRequest, RestockedList, RestockedProduct,
            UpdateProductRequest, UpdateStockRequest,
        },
    },
    entity::products::{ActiveModel, Column, Entity as Products, Model as ProductModel},
    error::{AppError, AppResult},
    models::{Product, ProductStock},
    response::{ApiResponse, Meta},
    state::AppState,
    validation::FieldErrors,
};

async fn find_product(state: &AppState, id: i32) -> AppResult<ProductModel> {
    Products::find_by_id(id)
        .one(state.db())
        .await?
        .ok_or_else(|| AppError::not_found("Product"))
}

pub async fn list_products(state: &AppState) -> AppResult<ApiResponse<ProductList>> {
    let items: Vec<Product> = Products::find()
        .order_by_asc(Column::Id)
        .all(state.db())
        .await?
        .into_iter()
        .map(Product::from)
        .collect();

    let meta = Meta::total(items.len());
    Ok(ApiResponse::success(
        "Products",
        ProductList { items },
        Some(meta),
    ))
}

pub async fn get_product(state: &AppState, id: i32) -> AppResult<ApiResponse<Product>> {
    let product = find_product(state, id).await?;
    Ok(ApiResponse::success("Product", Product::from(product), None))
}

pub async fn create_product(
    state: &AppState,
    payload: CreateProductRequest,
) -> AppResult<ApiResponse<Product>> {
    let data = payload.validate()?;

    let product = ActiveModel {
        id: NotSet,
        name: Set(data.name),
        price: Set(data.price),
        stock_level: Set(0),
    }
    .insert(state.db())
    .await?;

    tracing::info!(product_id = product.id, "product created");

    Ok(ApiResponse::success(
        "Product created",
        Product::from(product),
        Some(Meta::empty()),
    ))
}

pub async fn update_product(
    state: &AppState,
    id: i32,
    payload: UpdateProductRequest,
) -> AppResult<ApiResponse<Product>> {
    let existing = find_product(state, id).await?;
    let payload = payload.validate()?;

    let mut active: ActiveModel = existing.into();
    if let Some(name) = payload.name {
        active.name = Set(name);
    }
    if let Some(price) = payload.price {
        active.price = Set(price);
    }
    let product = active.update(state.db()).await?;

    tracing::info!(product_id = product.id, "product updated");

    Ok(ApiResponse::success(
        "Product updated successfully",
        Product::from(product),
        Some(Meta::empty()),
    ))
}

/// Deletes the product; links to past orders are removed with it.
pub async fn delete_product(state: &AppState, id: i32) -> AppResult<ApiResponse<Deleted>> {
    let result = Products::delete_by_id(id).exec(state.db()).await?;

    if result.rows_affected == 0 {
        return Err(AppError::not_found("Product"));
    }

    tracing::info!(product_id = id, "product deleted");

    Ok(ApiResponse::success(
        "Product deleted successfully",
        Deleted { id },
        Some(Meta::empty()),
    ))
}

pub async fn get_stock(state: &AppState, id: i32) -> AppResult<ApiResponse<ProductStock>> {
    let product = find_product(state, id).await?;
    Ok(ApiResponse::success(
        "Stock level",
        ProductStock::from(product),
        None,
    ))
}

pub async fn update_stock(
    state: &AppState,
    id: i32,
    payload: UpdateStockRequest,
) -> AppResult<ApiResponse<ProductStock>> {
    let existing = find_product(state, id).await?;
    let Some(stock_level) = payload.validate()? else {
        return Ok(ApiResponse::success(
            "Stock level updated",
            ProductStock::from(existing),
            Some(Meta::empty()),
        ));
    };

    let mut active: ActiveModel = existing.into();
    active.stock_level = Set(stock_level);
    let product = active.update(state.db()).await?;

    tracing::info!(product_id = product.id, stock_level, "stock level updated");

    Ok(ApiResponse::success(
        "Stock level updated",
        ProductStock::from(product),
        Some(Meta::empty()),
    ))
}

/// Tops up every product whose stock is below the threshold in one transaction.
pub async fn restock_products(
    state: &AppState,
    payload: RestockRequest,
) -> AppResult<ApiResponse<RestockedList>> {
    let plan = payload.validate()?;
    let txn = state.db().begin().await?;

    let low = Products::find()
        .filter(Column::StockLevel.lt(plan.threshold))
        .lock(LockType::Update)
        .all(&txn)
        .await?;

    if low
        .iter()
        .any(|p| p.stock_level.checked_add(plan.restock_amount).is_none())
    {
        txn.rollback().await?;
        let mut errors = FieldErrors::new();
        errors.add("restock_amount", "Stock level would exceed the maximum.");
        return Err(AppError::Validation(errors));
    }

    let ids: Vec<i32> = low.into_iter().map(|p| p.id).collect();

    if ids.is_empty() {
        txn.commit().await?;
        return Ok(ApiResponse::success(
            "No products below the threshold",
            RestockedList {
                restocked_products: Vec::new(),
            },
            Some(Meta::total(0)),
        ));
    }

    Products::update_many()
        .col_expr(
            Column::StockLevel,
            Expr::col(Column::StockLevel).add(plan.restock_amount),
        )
        .filter(Column::Id.is_in(ids.clone()))
        .exec(&txn)
        .await?;

    let restocked_products: Vec<RestockedProduct> = Products::find()
        .filter(Column::Id.is_in(ids))
        .order_by_asc(Column::Id)
        .all(&txn)
        .await?
        .into_iter()
        .map(|p| RestockedProduct {
            id: p.id,
            name: p.name,
            stock_level: p.stock_level,
        })
        .collect();

    txn.commit().await?;

    tracing::info!(
        count = restocked_products.len(),
        threshold = plan.threshold,
        restock_amount = plan.restock_amount,
        "products restocked"
    );

    let meta = Meta::total(restocked_products.len());
    Ok(ApiResponse::success(
        "Products restocked",
        RestockedList { restocked_products },
        Some(meta),
    ))
}
