use crate::domain::model::{Game, GameSelector, Namespace, SelectorResolution, StoredRecord};
use crate::domain::ports::{ConfigProvider, RecordStore};
use crate::utils::error::{CartError, Result};

/// Read-only view over the games namespace. Nothing is cached: every call
/// goes back to the store.
pub struct Catalog<'a, S: RecordStore, C: ConfigProvider> {
    store: &'a S,
    config: &'a C,
}

impl<'a, S: RecordStore, C: ConfigProvider> Catalog<'a, S, C> {
    pub fn new(store: &'a S, config: &'a C) -> Self {
        Self { store, config }
    }

    pub async fn game(&self, game_id: &str) -> Result<Game> {
        let document = self.store.load(Namespace::Games, game_id).await?;
        parse_game(StoredRecord {
            id: game_id.to_string(),
            document,
        })
    }

    pub async fn games(&self) -> Result<Vec<Game>> {
        self.store
            .list_all(Namespace::Games)
            .await?
            .into_iter()
            .map(parse_game)
            .collect()
    }

    /// Fails with `GameNotFound` when the selector has no catalog entry.
    pub async fn resolve(&self, selector: GameSelector) -> Result<Game> {
        match self.config.selector_resolution() {
            SelectorResolution::ByKey => {
                let key = self.config.catalog_key(selector);
                match self.game(&key).await {
                    Ok(game) => Ok(game),
                    Err(e) if e.is_not_found() => Err(CartError::GameNotFound { game_id: key }),
                    Err(e) => Err(e),
                }
            }
            SelectorResolution::Positional => {
                let position = selector.position();
                self.games()
                    .await?
                    .into_iter()
                    .nth(position)
                    .ok_or_else(|| CartError::GameNotFound {
                        game_id: format!("{}#{}", selector, position),
                    })
            }
        }
    }
}

fn parse_game(record: StoredRecord) -> Result<Game> {
    let mut game: Game = serde_json::from_value(record.document)?;
    if game.id.is_empty() {
        game.id = record.id;
    }
    Ok(game)
}
