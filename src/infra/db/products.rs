use async_trait::async_trait;

use crate::{
    application::repos::{
        CreateProductParams, ProductsRepo, ProductsWriteRepo, RepoError, UpdateProductParams,
    },
    domain::entities::ProductRecord,
};

use super::{SqliteRepositories, map_sqlx_error};

const PRODUCT_COLUMNS: &str = "id, name, type AS wine_type, region, vintage, price, alcohol, \
    stock, description, image_url";

#[derive(sqlx::FromRow)]
struct ProductRow {
    id: i64,
    name: String,
    wine_type: String,
    region: String,
    vintage: i32,
    price: f64,
    alcohol: f64,
    stock: i64,
    description: Option<String>,
    image_url: Option<String>,
}

impl From<ProductRow> for ProductRecord {
    fn from(row: ProductRow) -> Self {
        Self {
            id: row.id,
            name: row.name,
            wine_type: row.wine_type,
            region: row.region,
            vintage: row.vintage,
            price: row.price,
            alcohol: row.alcohol,
            stock: row.stock,
            description: row.description,
            image_url: row.image_url,
        }
    }
}

#[async_trait]
impl ProductsRepo for SqliteRepositories {
    async fn list_all_products(&self) -> Result<Vec<ProductRecord>, RepoError> {
        // The connection goes back to the pool when `conn` drops, on error paths too.
        let mut conn = self.pool().acquire().await.map_err(map_sqlx_error)?;
        let sql = format!("SELECT {PRODUCT_COLUMNS} FROM products");
        let rows = sqlx::query_as::<_, ProductRow>(&sql)
            .fetch_all(&mut *conn)
            .await
            .map_err(map_sqlx_error)?;

        Ok(rows.into_iter().map(ProductRecord::from).collect())
    }

    async fn list_products_newest_first(&self) -> Result<Vec<ProductRecord>, RepoError> {
        let sql = format!("SELECT {PRODUCT_COLUMNS} FROM products ORDER BY created_at DESC, id DESC");
        let rows = sqlx::query_as::<_, ProductRow>(&sql)
            .fetch_all(self.pool())
            .await
            .map_err(map_sqlx_error)?;

        Ok(rows.into_iter().map(ProductRecord::from).collect())
    }

    async fn find_product(&self, id: i64) -> Result<Option<ProductRecord>, RepoError> {
        let sql = format!("SELECT {PRODUCT_COLUMNS} FROM products WHERE id = ?");
        let row = sqlx::query_as::<_, ProductRow>(&sql)
            .bind(id)
            .fetch_optional(self.pool())
            .await
            .map_err(map_sqlx_error)?;

        Ok(row.map(ProductRecord::from))
    }
}

#[async_trait]
impl ProductsWriteRepo for SqliteRepositories {
    async fn create_product(
        &self,
        params: CreateProductParams,
    ) -> Result<ProductRecord, RepoError> {
        let sql = format!(
            "INSERT INTO products \
                (name, type, region, vintage, price, alcohol, stock, description, image_url) \
             VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?) \
             RETURNING {PRODUCT_COLUMNS}"
        );
        let row = sqlx::query_as::<_, ProductRow>(&sql)
            .bind(params.name)
            .bind(params.wine_type)
            .bind(params.region)
            .bind(params.vintage)
            .bind(params.price)
            .bind(params.alcohol)
            .bind(params.stock)
            .bind(params.description)
            .bind(params.image_url)
            .fetch_one(self.pool())
            .await
            .map_err(map_sqlx_error)?;

        Ok(ProductRecord::from(row))
    }

    async fn update_product(
        &self,
        params: UpdateProductParams,
    ) -> Result<ProductRecord, RepoError> {
        let sql = format!(
            "UPDATE products SET \
                name = ?, type = ?, region = ?, vintage = ?, price = ?, alcohol = ?, \
                stock = ?, description = ?, image_url = ? \
             WHERE id = ? \
             RETURNING {PRODUCT_COLUMNS}"
        );
        let row = sqlx::query_as::<_, ProductRow>(&sql)
            .bind(params.name)
            .bind(params.wine_type)
            .bind(params.region)
            .bind(params.vintage)
            .bind(params.price)
            .bind(params.alcohol)
            .bind(params.stock)
            .bind(params.description)
            .bind(params.image_url)
            .bind(params.id)
            .fetch_optional(self.pool())
            .await
            .map_err(map_sqlx_error)?;

        row.map(ProductRecord::from).ok_or(RepoError::NotFound)
    }

    async fn delete_product(&self, id: i64) -> Result<(), RepoError> {
        let result = sqlx::query("DELETE FROM products WHERE id = ?")
            .bind(id)
            .execute(self.pool())
            .await
            .map_err(map_sqlx_error)?;

        if result.rows_affected() == 0 {
            return Err(RepoError::NotFound);
        }

        Ok(())
    }
}
