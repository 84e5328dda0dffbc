use std::sync::Arc;

use thiserror::Error;
use tracing::info;

use crate::application::repos::{
    CreateProductParams, ProductsRepo, ProductsWriteRepo, RepoError, UpdateProductParams,
};
use crate::domain::entities::ProductRecord;
use crate::domain::error::DomainError;
use crate::domain::products::ProductDraft;

#[derive(Debug, Error)]
pub enum AdminProductError {
    #[error(transparent)]
    Validation(#[from] DomainError),
    #[error("product {id} not found")]
    NotFound { id: i64 },
    #[error(transparent)]
    Repo(#[from] RepoError),
}

/// Product management for admins. Reads and writes hit the database directly
/// and never touch the storefront product cache.
#[derive(Clone)]
pub struct AdminProductService {
    reader: Arc<dyn ProductsRepo>,
    writer: Arc<dyn ProductsWriteRepo>,
}

impl AdminProductService {
    pub fn new(reader: Arc<dyn ProductsRepo>, writer: Arc<dyn ProductsWriteRepo>) -> Self {
        Self { reader, writer }
    }

    pub async fn list(&self) -> Result<Vec<ProductRecord>, AdminProductError> {
        self.reader
            .list_products_newest_first()
            .await
            .map_err(AdminProductError::from)
    }

    pub async fn find(&self, id: i64) -> Result<ProductRecord, AdminProductError> {
        self.reader
            .find_product(id)
            .await?
            .ok_or(AdminProductError::NotFound { id })
    }

    pub async fn create(
        &self,
        actor: &str,
        draft: ProductDraft,
    ) -> Result<ProductRecord, AdminProductError> {
        let ProductDraft {
            name,
            wine_type,
            region,
            vintage,
            price,
            alcohol,
            stock,
            description,
            image_url,
        } = draft.normalized()?;

        let product = self
            .writer
            .create_product(CreateProductParams {
                name,
                wine_type,
                region,
                vintage,
                price,
                alcohol,
                stock,
                description,
                image_url,
            })
            .await?;

        info!(
            target = "cellar::admin::products",
            actor,
            product_id = product.id,
            catalog_cache = "not_refreshed",
            "product created"
        );
        Ok(product)
    }

    pub async fn update(
        &self,
        actor: &str,
        id: i64,
        draft: ProductDraft,
    ) -> Result<ProductRecord, AdminProductError> {
        let ProductDraft {
            name,
            wine_type,
            region,
            vintage,
            price,
            alcohol,
            stock,
            description,
            image_url,
        } = draft.normalized()?;

        let product = self
            .writer
            .update_product(UpdateProductParams {
                id,
                name,
                wine_type,
                region,
                vintage,
                price,
                alcohol,
                stock,
                description,
                image_url,
            })
            .await
            .map_err(|err| not_found_or(err, id))?;

        info!(
            target = "cellar::admin::products",
            actor,
            product_id = id,
            catalog_cache = "not_refreshed",
            "product updated"
        );
        Ok(product)
    }

    pub async fn delete(&self, actor: &str, id: i64) -> Result<(), AdminProductError> {
        self.writer
            .delete_product(id)
            .await
            .map_err(|err| not_found_or(err, id))?;

        info!(
            target = "cellar::admin::products",
            actor,
            product_id = id,
            catalog_cache = "not_refreshed",
            "product deleted"
        );
        Ok(())
    }
}

fn not_found_or(err: RepoError, id: i64) -> AdminProductError {
    match err {
        RepoError::NotFound => AdminProductError::NotFound { id },
        other => AdminProductError::Repo(other),
    }
}
