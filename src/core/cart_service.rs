use crate::core::catalog::Catalog;
use crate::core::ids::allocate_cart_id;
use crate::core::locks::KeyedLocks;
use crate::core::totals;
use crate::domain::model::{Cart, DeleteResult, Game, GameSelector, Namespace};
use crate::domain::ports::{CartApi, ConfigProvider, RecordStore};
use crate::utils::error::{CartError, Result};

pub struct CartService<S: RecordStore, C: ConfigProvider> {
    store: S,
    config: C,
    locks: KeyedLocks,
}

impl<S: RecordStore, C: ConfigProvider> CartService<S, C> {
    pub fn new(store: S, config: C) -> Self {
        Self {
            store,
            config,
            locks: KeyedLocks::new(),
        }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn catalog(&self) -> Catalog<'_, S, C> {
        Catalog::new(&self.store, &self.config)
    }

    async fn load_cart(&self, cart_id: &str) -> Result<Cart> {
        let document = self.store.load(Namespace::Carts, cart_id).await?;
        Ok(serde_json::from_value(document)?)
    }

    /// Loads a cart for mutation; an absent record becomes `CartNotFound`.
    async fn load_cart_for_update(&self, cart_id: &str) -> Result<Cart> {
        match self.load_cart(cart_id).await {
            Ok(cart) => Ok(cart),
            Err(e) if e.is_not_found() => Err(CartError::CartNotFound {
                cart_id: cart_id.to_string(),
            }),
            Err(e) => Err(e),
        }
    }

    /// Totals are always rebuilt here so nothing stale reaches the store.
    async fn save_cart(&self, cart_id: &str, cart: &mut Cart) -> Result<()> {
        totals::refresh(cart)?;
        let document = serde_json::to_value(&*cart)?;
        self.store.save(Namespace::Carts, cart_id, &document).await
    }
}

#[async_trait::async_trait]
impl<S: RecordStore, C: ConfigProvider> CartApi for CartService<S, C> {
    async fn get_cart_by_id(&self, cart_id: &str) -> Result<Cart> {
        self.load_cart(cart_id).await.map_err(|e| {
            tracing::debug!("Cart {} could not be read: {}", cart_id, e);
            CartError::CartNotFound {
                cart_id: cart_id.to_string(),
            }
        })
    }

    async fn get_all_carts(&self) -> Result<Vec<Cart>> {
        let records = self.store.list_all(Namespace::Carts).await.map_err(|e| {
            tracing::debug!("Listing carts failed: {}", e);
            CartError::CartsUnavailable
        })?;

        records
            .into_iter()
            .map(|record| {
                serde_json::from_value::<Cart>(record.document).map_err(|e| {
                    tracing::debug!("Cart record {} is malformed: {}", record.id, e);
                    CartError::CartsUnavailable
                })
            })
            .collect()
    }

    async fn get_game_by_id(&self, game_id: &str) -> Result<Game> {
        self.catalog().game(game_id).await.map_err(|e| {
            tracing::debug!("Game {} could not be read: {}", game_id, e);
            CartError::GameNotFound {
                game_id: game_id.to_string(),
            }
        })
    }

    async fn get_all_games(&self) -> Result<Vec<Game>> {
        self.catalog().games().await
    }

    async fn create_cart(&self) -> Result<Cart> {
        let cart_id = allocate_cart_id(&self.store, self.config.max_id_attempts()).await?;
        let mut cart = Cart::empty(cart_id.clone());
        self.save_cart(&cart_id, &mut cart).await?;

        tracing::info!("Created cart {}", cart.id);
        Ok(cart)
    }

    async fn add_game_to_cart(&self, cart_id: &str, chosen_game: GameSelector) -> Result<Cart> {
        let _guard = self.locks.lock(cart_id).await;
        let mut cart = self.load_cart_for_update(cart_id).await?;

        match self.catalog().resolve(chosen_game).await {
            Ok(game) => {
                tracing::info!("Adding {} ({}) to cart {}", game.name, game.price, cart_id);
                cart.games.push(game);
            }
            Err(CartError::GameNotFound { game_id }) => {
                tracing::warn!(
                    "Selector {} has no catalog entry '{}', cart {} left unchanged",
                    chosen_game,
                    game_id,
                    cart_id
                );
            }
            Err(e) => return Err(e),
        }

        self.save_cart(cart_id, &mut cart).await?;
        Ok(cart)
    }

    async fn remove_game_from_cart(&self, cart_id: &str, chosen_game: &str) -> Result<Cart> {
        let _guard = self.locks.lock(cart_id).await;
        let mut cart = self.load_cart_for_update(cart_id).await?;

        let index = cart
            .games
            .iter()
            .position(|game| game.name == chosen_game)
            .ok_or_else(|| CartError::GameNotInCart {
                cart_id: cart_id.to_string(),
                game_name: chosen_game.to_string(),
            })?;

        let removed = cart.games.remove(index);
        tracing::info!("Removed {} from cart {}", removed.name, cart_id);

        self.save_cart(cart_id, &mut cart).await?;
        Ok(cart)
    }

    async fn delete_cart(&self, cart_id: &str) -> DeleteResult {
        let _guard = self.locks.lock(cart_id).await;
        let success = match self.store.delete(Namespace::Carts, cart_id).await {
            Ok(()) => {
                tracing::info!("Deleted cart {}", cart_id);
                true
            }
            Err(e) => {
                tracing::warn!("Cart {} was not deleted: {}", cart_id, e);
                false
            }
        };

        DeleteResult {
            deleted_id: cart_id.to_string(),
            success,
        }
    }
}
