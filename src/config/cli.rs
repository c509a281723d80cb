use crate::config::toml_config::TomlConfig;
use crate::core::engine::Operation;
use crate::domain::model::GameSelector;
use crate::utils::error::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Debug, Clone, Parser)]
#[command(name = "cart-store")]
#[command(about = "Manage shopping carts stored as JSON documents")]
pub struct CliConfig {
    /// Path to a TOML configuration file
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Data directory holding the carts and games folders (overrides the config file)
    #[arg(long)]
    pub data_dir: Option<String>,

    #[arg(short, long, help = "Enable verbose output")]
    pub verbose: bool,

    #[arg(long, help = "Emit logs as JSON lines")]
    pub json_logs: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Clone, Subcommand)]
pub enum Command {
    /// Create an empty cart
    Create,
    /// Show one cart
    Get { cart_id: String },
    /// Show every cart
    List,
    /// Show one catalog game
    Game { game_id: String },
    /// Show the whole catalog
    Games,
    /// Add a game (LOL, STARCRAFT, ELDENRING, MINECRAFT, CSGO) to a cart
    Add { cart_id: String, game: GameSelector },
    /// Remove the first game with this name from a cart
    Remove { cart_id: String, game_name: String },
    /// Delete a cart
    Delete { cart_id: String },
}

impl CliConfig {
    /// Config file (or defaults) with command-line overrides applied.
    pub fn load_settings(&self) -> Result<TomlConfig> {
        let config = match &self.config {
            Some(path) => TomlConfig::from_file(path)?,
            None => TomlConfig::default(),
        };

        Ok(match &self.data_dir {
            Some(dir) => config.with_data_root(dir.clone()),
            None => config,
        })
    }

    pub fn operation(&self) -> Operation {
        self.command.to_operation()
    }
}

impl Command {
    pub fn to_operation(&self) -> Operation {
        match self {
            Command::Create => Operation::CreateCart,
            Command::Get { cart_id } => Operation::GetCart {
                cart_id: cart_id.clone(),
            },
            Command::List => Operation::ListCarts,
            Command::Game { game_id } => Operation::GetGame {
                game_id: game_id.clone(),
            },
            Command::Games => Operation::ListGames,
            Command::Add { cart_id, game } => Operation::AddGame {
                cart_id: cart_id.clone(),
                chosen_game: *game,
            },
            Command::Remove { cart_id, game_name } => Operation::RemoveGame {
                cart_id: cart_id.clone(),
                chosen_game: game_name.clone(),
            },
            Command::Delete { cart_id } => Operation::DeleteCart {
                cart_id: cart_id.clone(),
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ports::ConfigProvider;

    #[test]
    fn test_parse_add_command() {
        let cli = CliConfig::try_parse_from(["cart-store", "add", "cart-1", "starcraft"]).unwrap();
        assert_eq!(
            cli.operation(),
            Operation::AddGame {
                cart_id: "cart-1".to_string(),
                chosen_game: GameSelector::Starcraft,
            }
        );
    }

    #[test]
    fn test_unknown_selector_is_rejected() {
        assert!(CliConfig::try_parse_from(["cart-store", "add", "cart-1", "TETRIS"]).is_err());
    }

    #[test]
    fn test_data_dir_overrides_defaults() {
        let cli =
            CliConfig::try_parse_from(["cart-store", "--data-dir", "/srv/carts", "list"]).unwrap();
        let settings = cli.load_settings().unwrap();
        assert_eq!(settings.data_root(), "/srv/carts");
        assert_eq!(cli.operation(), Operation::ListCarts);
    }
}
