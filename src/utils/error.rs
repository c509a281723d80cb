use thiserror::Error;

#[derive(Error, Debug)]
pub enum CartError {
    #[error("cart not found")]
    CartNotFound { cart_id: String },

    #[error("game not found")]
    GameNotFound { game_id: String },

    #[error("game not in cart")]
    GameNotInCart { cart_id: String, game_name: String },

    #[error("carts could not be fetched")]
    CartsUnavailable,

    #[error("Record not found: {namespace}/{id}")]
    NotFound { namespace: String, id: String },

    #[error("Validation error: {message}")]
    Validation { message: String },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Configuration error: {message}")]
    Config { message: String },

    #[error("Missing configuration: {field}")]
    MissingConfig { field: String },

    #[error("Invalid configuration value for {field}: '{value}' ({reason})")]
    InvalidConfigValue {
        field: String,
        value: String,
        reason: String,
    },

    #[error("No unused cart id after {attempts} attempts")]
    IdExhausted { attempts: usize },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Domain,
    Storage,
    Configuration,
    Validation,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ErrorSeverity {
    Medium,
    High,
    Critical,
}

impl CartError {
    pub fn validation(message: impl Into<String>) -> Self {
        CartError::Validation {
            message: message.into(),
        }
    }

    pub fn config(message: impl Into<String>) -> Self {
        CartError::Config {
            message: message.into(),
        }
    }

    /// True for the "record absent" family, whichever layer raised it.
    pub fn is_not_found(&self) -> bool {
        match self {
            CartError::NotFound { .. }
            | CartError::CartNotFound { .. }
            | CartError::GameNotFound { .. } => true,
            CartError::Io(e) => e.kind() == std::io::ErrorKind::NotFound,
            _ => false,
        }
    }

    pub fn category(&self) -> ErrorCategory {
        match self {
            CartError::CartNotFound { .. }
            | CartError::GameNotFound { .. }
            | CartError::GameNotInCart { .. }
            | CartError::CartsUnavailable => ErrorCategory::Domain,
            CartError::NotFound { .. }
            | CartError::Io(_)
            | CartError::Serialization(_)
            | CartError::IdExhausted { .. } => ErrorCategory::Storage,
            CartError::Config { .. }
            | CartError::MissingConfig { .. }
            | CartError::InvalidConfigValue { .. } => ErrorCategory::Configuration,
            CartError::Validation { .. } => ErrorCategory::Validation,
        }
    }

    pub fn severity(&self) -> ErrorSeverity {
        match self {
            CartError::CartNotFound { .. }
            | CartError::GameNotFound { .. }
            | CartError::GameNotInCart { .. }
            | CartError::NotFound { .. } => ErrorSeverity::Medium,
            CartError::Validation { .. } | CartError::CartsUnavailable => ErrorSeverity::High,
            CartError::Serialization(_) | CartError::IdExhausted { .. } => ErrorSeverity::High,
            CartError::Io(_)
            | CartError::Config { .. }
            | CartError::MissingConfig { .. }
            | CartError::InvalidConfigValue { .. } => ErrorSeverity::Critical,
        }
    }

    pub fn user_friendly_message(&self) -> String {
        match self {
            CartError::CartNotFound { cart_id } => format!("Cart '{}' does not exist", cart_id),
            CartError::GameNotFound { game_id } => {
                format!("Game '{}' is not in the catalog", game_id)
            }
            CartError::GameNotInCart { cart_id, game_name } => {
                format!("'{}' is not in cart '{}'", game_name, cart_id)
            }
            CartError::CartsUnavailable => "An error occurred while fetching carts".to_string(),
            CartError::NotFound { namespace, id } => {
                format!("No {} record named '{}'", namespace, id)
            }
            CartError::Validation { message } => format!("Invalid input: {}", message),
            CartError::Io(e) => format!("Storage access failed: {}", e),
            CartError::Serialization(e) => format!("A stored record is malformed: {}", e),
            CartError::Config { message } => format!("Configuration problem: {}", message),
            CartError::MissingConfig { field } => format!("Missing setting '{}'", field),
            CartError::InvalidConfigValue { field, reason, .. } => {
                format!("Setting '{}' is invalid: {}", field, reason)
            }
            CartError::IdExhausted { .. } => "Could not allocate a new cart id".to_string(),
        }
    }

    pub fn recovery_suggestion(&self) -> &'static str {
        match self {
            CartError::CartNotFound { .. } => "Create a cart first or check the cart id",
            CartError::GameNotFound { .. } => "Check the game id against the games directory",
            CartError::GameNotInCart { .. } => "Fetch the cart to see which games it contains",
            CartError::CartsUnavailable => "Inspect the carts directory for unreadable records",
            CartError::NotFound { .. } => "Check the record id and the storage root",
            CartError::Validation { .. } => "Correct the input and try again",
            CartError::Io(_) => "Check that the data directory exists and is writable",
            CartError::Serialization(_) => "Repair or remove the malformed JSON record",
            CartError::Config { .. }
            | CartError::MissingConfig { .. }
            | CartError::InvalidConfigValue { .. } => "Review the configuration file and flags",
            CartError::IdExhausted { .. } => "Raise carts.max_id_attempts or clean up the store",
        }
    }
}

pub type Result<T> = std::result::Result<T, CartError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_domain_errors_carry_caller_facing_text() {
        let err = CartError::CartNotFound {
            cart_id: "abc".to_string(),
        };
        assert_eq!(err.to_string(), "cart not found");
        assert_eq!(err.category(), ErrorCategory::Domain);

        let err = CartError::GameNotInCart {
            cart_id: "abc".to_string(),
            game_name: "Minecraft".to_string(),
        };
        assert_eq!(err.to_string(), "game not in cart");
        assert!(err.user_friendly_message().contains("Minecraft"));
    }

    #[test]
    fn test_is_not_found_covers_io_not_found() {
        let io = std::io::Error::new(std::io::ErrorKind::NotFound, "gone");
        assert!(CartError::Io(io).is_not_found());

        let io = std::io::Error::new(std::io::ErrorKind::PermissionDenied, "nope");
        assert!(!CartError::Io(io).is_not_found());
        assert!(!CartError::validation("bad").is_not_found());
    }

    #[test]
    fn test_severity_ordering() {
        assert!(CartError::config("x").severity() > CartError::validation("x").severity());
        assert_eq!(
            CartError::IdExhausted { attempts: 3 }.category(),
            ErrorCategory::Storage
        );
    }
}
