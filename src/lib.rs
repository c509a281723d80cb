pub mod adapters;
pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

#[cfg(feature = "cli")]
pub use config::CliConfig;

pub use adapters::storage::FsRecordStore;
pub use config::TomlConfig;
pub use core::{cart_service::CartService, engine::CartEngine, engine::Operation};
pub use domain::model::{Cart, DeleteResult, Game, GameSelector, Price};
pub use domain::ports::{CartApi, ConfigProvider, RecordStore};
pub use utils::error::{CartError, Result};
