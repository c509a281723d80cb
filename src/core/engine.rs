use crate::domain::model::GameSelector;
use crate::domain::ports::CartApi;
use crate::utils::error::Result;
use serde_json::Value;

/// A single request against the cart API, independent of how it arrived.
#[derive(Debug, Clone, PartialEq)]
pub enum Operation {
    CreateCart,
    GetCart { cart_id: String },
    ListCarts,
    GetGame { game_id: String },
    ListGames,
    AddGame { cart_id: String, chosen_game: GameSelector },
    RemoveGame { cart_id: String, chosen_game: String },
    DeleteCart { cart_id: String },
}

impl Operation {
    /// Operation name as used in logs and error messages.
    pub fn name(&self) -> &'static str {
        match self {
            Operation::CreateCart => "createCart",
            Operation::GetCart { .. } => "getCartById",
            Operation::ListCarts => "getAllCarts",
            Operation::GetGame { .. } => "getGameById",
            Operation::ListGames => "getAllGames",
            Operation::AddGame { .. } => "addGameToCart",
            Operation::RemoveGame { .. } => "removeGameFromCart",
            Operation::DeleteCart { .. } => "deleteCart",
        }
    }
}

/// Dispatches [`Operation`]s to a [`CartApi`] and renders the results as JSON.
///
/// Failures keep their [`CartError`](crate::utils::error::CartError) so the
/// caller can pick an exit code. `DeleteCart` never fails; its outcome is
/// reported inside the returned value.
pub struct CartEngine<A: CartApi> {
    api: A,
}

impl<A: CartApi> CartEngine<A> {
    pub fn new(api: A) -> Self {
        Self { api }
    }

    /// Runs the operation and returns its result as a JSON value in the
    /// camelCase wire shape.
    pub async fn run(&self, operation: &Operation) -> Result<Value> {
        tracing::debug!("Running {}", operation.name());

        let output = match operation {
            Operation::CreateCart => serde_json::to_value(self.api.create_cart().await?)?,
            Operation::GetCart { cart_id } => {
                serde_json::to_value(self.api.get_cart_by_id(cart_id).await?)?
            }
            Operation::ListCarts => serde_json::to_value(self.api.get_all_carts().await?)?,
            Operation::GetGame { game_id } => {
                serde_json::to_value(self.api.get_game_by_id(game_id).await?)?
            }
            Operation::ListGames => serde_json::to_value(self.api.get_all_games().await?)?,
            Operation::AddGame {
                cart_id,
                chosen_game,
            } => serde_json::to_value(self.api.add_game_to_cart(cart_id, *chosen_game).await?)?,
            Operation::RemoveGame {
                cart_id,
                chosen_game,
            } => serde_json::to_value(
                self.api
                    .remove_game_from_cart(cart_id, chosen_game)
                    .await?,
            )?,
            Operation::DeleteCart { cart_id } => {
                serde_json::to_value(self.api.delete_cart(cart_id).await)?
            }
        };

        tracing::debug!("{} finished", operation.name());
        Ok(output)
    }
}
