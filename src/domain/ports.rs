use crate::domain::model::{
    Cart, DeleteResult, Game, GameSelector, Namespace, SelectorResolution, StoredRecord,
};
use crate::utils::error::Result;
use async_trait::async_trait;
use serde_json::Value;

/// Document persistence keyed by namespace and id. Implementations do not
/// interpret document contents and never retry.
pub trait RecordStore: Send + Sync {
    fn load(
        &self,
        namespace: Namespace,
        id: &str,
    ) -> impl std::future::Future<Output = Result<Value>> + Send;

    fn save(
        &self,
        namespace: Namespace,
        id: &str,
        document: &Value,
    ) -> impl std::future::Future<Output = Result<()>> + Send;

    fn delete(
        &self,
        namespace: Namespace,
        id: &str,
    ) -> impl std::future::Future<Output = Result<()>> + Send;

    /// Every record in the namespace, ordered by id.
    fn list_all(
        &self,
        namespace: Namespace,
    ) -> impl std::future::Future<Output = Result<Vec<StoredRecord>>> + Send;

    fn exists(
        &self,
        namespace: Namespace,
        id: &str,
    ) -> impl std::future::Future<Output = Result<bool>> + Send;
}

pub trait ConfigProvider: Send + Sync {
    fn data_root(&self) -> &str;
    fn carts_dir(&self) -> &str;
    fn games_dir(&self) -> &str;
    fn max_id_attempts(&self) -> usize;
    fn selector_resolution(&self) -> SelectorResolution;
    fn catalog_key(&self, selector: GameSelector) -> String;
}

/// Operations offered to whatever transport sits in front of the carts.
#[async_trait]
pub trait CartApi: Send + Sync {
    async fn get_cart_by_id(&self, cart_id: &str) -> Result<Cart>;
    async fn get_all_carts(&self) -> Result<Vec<Cart>>;
    async fn get_game_by_id(&self, game_id: &str) -> Result<Game>;
    async fn get_all_games(&self) -> Result<Vec<Game>>;
    async fn create_cart(&self) -> Result<Cart>;
    async fn add_game_to_cart(&self, cart_id: &str, chosen_game: GameSelector) -> Result<Cart>;
    async fn remove_game_from_cart(&self, cart_id: &str, chosen_game: &str) -> Result<Cart>;
    /// Never fails: a cart that could not be deleted is reported with
    /// `success = false`.
    async fn delete_cart(&self, cart_id: &str) -> DeleteResult;
}
