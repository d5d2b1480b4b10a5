//! Manage Menu Use Case

use std::path::Path;
use std::sync::Arc;

use tracing::{info, warn};

use crate::application::ports::{AssetError, ImageAssetPort, StoredImage};
use crate::domain::catalog::{MenuCatalogRepository, MenuItem, NewMenuItem};
use crate::domain::shared::{DomainError, ItemName, Money};
use crate::error::StoreError;

/// Menu management error.
#[derive(Debug, thiserror::Error)]
pub enum MenuError {
    /// Name or price rejected.
    #[error("Invalid input: {0}")]
    Invalid(#[from] DomainError),

    /// Picture could not be stored or the placeholder is missing.
    #[error(transparent)]
    Asset(#[from] AssetError),

    /// Catalog store failure.
    #[error(transparent)]
    Store(#[from] StoreError),
}

/// Use case behind the "Manage Menu" screen.
pub struct ManageMenuUseCase<C, A>
where
    C: MenuCatalogRepository,
    A: ImageAssetPort,
{
    catalog: Arc<C>,
    assets: Arc<A>,
}

impl<C, A> ManageMenuUseCase<C, A>
where
    C: MenuCatalogRepository,
    A: ImageAssetPort,
{
    /// Create a new `ManageMenuUseCase`.
    pub const fn new(catalog: Arc<C>, assets: Arc<A>) -> Self {
        Self { catalog, assets }
    }

    /// All menu items in insertion order.
    pub async fn load_menu(&self) -> Result<Vec<MenuItem>, MenuError> {
        Ok(self.catalog.list_items().await?)
    }

    /// Add an item from form input.
    ///
    /// Name and price are checked before any file is touched. Without an
    /// uploaded picture the item gets the placeholder image. A picture copied
    /// for an insert that then fails is removed again.
    pub async fn add_item(
        &self,
        name: &str,
        price_text: &str,
        image: Option<&Path>,
    ) -> Result<MenuItem, MenuError> {
        let name = ItemName::new(name)?;
        let price = Money::parse(price_text)?.ensure_non_negative("price")?;

        let existing = self.catalog.list_items().await?;
        if existing.iter().any(|i| i.name == name) {
            warn!(name = %name, "Menu already has an item with this name");
        }

        let stored = match image {
            Some(source) => self.assets.import(source).await?,
            None => StoredImage {
                path: self.assets.default_image().await?,
                copied: false,
            },
        };

        let inserted = match NewMenuItem::new(name, price, Some(stored.path.clone())) {
            Ok(new_item) => self.catalog.add_item(&new_item).await.map_err(MenuError::from),
            Err(e) => Err(e.into()),
        };
        let item = match inserted {
            Ok(item) => item,
            Err(e) => {
                if stored.copied
                    && let Err(cleanup) = self.assets.discard(&stored).await
                {
                    warn!(path = %stored.path, error = %cleanup, "Could not remove unused image");
                }
                return Err(e);
            }
        };
        info!(id = item.id, name = %item.name, price = %item.price, "Added to menu");
        Ok(item)
    }

    /// Remove every item named exactly `name`; returns how many went.
    pub async fn remove_item(&self, name: &str) -> Result<u64, MenuError> {
        let removed = self.catalog.remove_item(name).await?;
        if removed == 0 {
            warn!(name, "Not found in menu");
        } else {
            info!(name, removed, "Removed from menu");
        }
        Ok(removed)
    }
}
