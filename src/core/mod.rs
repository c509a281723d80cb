pub mod cart_service;
pub mod catalog;
pub mod engine;
pub mod ids;
pub mod locks;
pub mod totals;

pub use crate::domain::model::{Cart, DeleteResult, Game, GameSelector, Namespace, Price};
pub use crate::domain::ports::{CartApi, ConfigProvider, RecordStore};
pub use crate::utils::error::Result;
