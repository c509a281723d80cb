use crate::domain::model::Namespace;
use crate::domain::ports::RecordStore;
use crate::utils::error::{CartError, Result};
use uuid::Uuid;

pub const DEFAULT_MAX_ID_ATTEMPTS: usize = 8;

/// Picks a cart id that no stored cart uses yet.
///
/// Up to `max_attempts` random UUIDs are tried, then one longer id that also
/// carries the current time. A store that reports every candidate as taken
/// gets `IdExhausted` rather than an endless loop.
pub async fn allocate_cart_id<S: RecordStore>(store: &S, max_attempts: usize) -> Result<String> {
    for attempt in 1..=max_attempts {
        let candidate = Uuid::new_v4().to_string();
        if !store.exists(Namespace::Carts, &candidate).await? {
            return Ok(candidate);
        }
        tracing::warn!("Cart id collision on attempt {}: {}", attempt, candidate);
    }

    let fallback = format!(
        "{}-{}",
        Uuid::new_v4().simple(),
        chrono::Utc::now().timestamp_millis()
    );
    if !store.exists(Namespace::Carts, &fallback).await? {
        tracing::warn!("Using fallback cart id {}", fallback);
        return Ok(fallback);
    }

    Err(CartError::IdExhausted {
        attempts: max_attempts + 1,
    })
}
