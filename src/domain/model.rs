use crate::utils::error::CartError;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

/// Monetary amount kept in hundredths so that sums stay exact.
///
/// Amounts are capped at [`Price::MAX`]: up to 15 significant digits, which
/// is what a JSON number survives through an `f64` without changing.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Price {
    cents: u64,
}

impl Price {
    pub const ZERO: Price = Price { cents: 0 };
    /// 9 999 999 999 999.99
    pub const MAX: Price = Price {
        cents: 999_999_999_999_999,
    };

    pub fn from_cents(cents: u64) -> Self {
        Self { cents }
    }

    pub fn cents(&self) -> u64 {
        self.cents
    }

    /// `None` when the sum would leave the exact range.
    pub fn checked_add(self, other: Price) -> Option<Price> {
        self.cents
            .checked_add(other.cents)
            .filter(|&cents| cents <= Price::MAX.cents)
            .map(Price::from_cents)
    }

    fn in_range(cents: Option<u64>, shown: &dyn fmt::Display) -> Result<Self, CartError> {
        cents
            .filter(|&cents| cents <= Price::MAX.cents)
            .map(Price::from_cents)
            .ok_or_else(|| {
                CartError::validation(format!(
                    "price {} exceeds the maximum of {}",
                    shown,
                    Price::MAX
                ))
            })
    }

    pub fn from_number(number: &serde_json::Number) -> Result<Self, CartError> {
        if let Some(whole) = number.as_u64() {
            return Self::in_range(whole.checked_mul(100), number);
        }
        if number.as_i64().is_some() {
            return Err(CartError::validation(format!(
                "price {} is negative",
                number
            )));
        }
        let text = number.to_string();
        if text.contains(['e', 'E']) {
            return Self::from_float(number.as_f64().unwrap_or(f64::NAN));
        }
        Self::from_decimal_str(&text)
    }

    fn from_decimal_str(text: &str) -> Result<Self, CartError> {
        if text.starts_with('-') {
            return Err(CartError::validation(format!("price {} is negative", text)));
        }
        let (whole, fraction) = text.split_once('.').unwrap_or((text, ""));
        let fraction = fraction.trim_end_matches('0');
        if fraction.len() > 2 {
            return Err(CartError::validation(format!(
                "price {} has sub-cent precision",
                text
            )));
        }
        let whole: u64 = whole
            .parse()
            .map_err(|_| CartError::validation(format!("price {} is not a number", text)))?;
        let fraction: u64 = if fraction.is_empty() {
            0
        } else {
            format!("{:0<2}", fraction)
                .parse()
                .map_err(|_| CartError::validation(format!("price {} is not a number", text)))?
        };
        Self::in_range(
            whole.checked_mul(100).and_then(|c| c.checked_add(fraction)),
            &text,
        )
    }

    fn from_float(value: f64) -> Result<Self, CartError> {
        if !value.is_finite() || value < 0.0 {
            return Err(CartError::validation(format!(
                "price {} must be a non-negative number",
                value
            )));
        }
        let scaled = value * 100.0;
        let cents = scaled.round();
        if cents > Price::MAX.cents as f64 {
            return Self::in_range(None, &value);
        }
        if (scaled - cents).abs() > 1e-6 {
            return Err(CartError::validation(format!(
                "price {} has sub-cent precision",
                value
            )));
        }
        Ok(Price::from_cents(cents as u64))
    }
}

impl fmt::Display for Price {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{:02}", self.cents / 100, self.cents % 100)
    }
}

impl Serialize for Price {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        // Anything larger would not read back as the same amount.
        if self.cents > Price::MAX.cents {
            return Err(serde::ser::Error::custom(format!(
                "price {} exceeds the maximum of {}",
                self,
                Price::MAX
            )));
        }
        if self.cents % 100 == 0 {
            serializer.serialize_u64(self.cents / 100)
        } else {
            serializer.serialize_f64(self.cents as f64 / 100.0)
        }
    }
}

impl<'de> Deserialize<'de> for Price {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let number = serde_json::Number::deserialize(deserializer)?;
        Price::from_number(&number).map_err(serde::de::Error::custom)
    }
}

/// Catalog entry. Only `id`, `name` and the price are interpreted; every
/// other field is carried through untouched.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Game {
    #[serde(default)]
    pub id: String,
    pub name: String,
    #[serde(rename = "gamePrice")]
    pub price: Price,
    #[serde(flatten)]
    pub metadata: serde_json::Map<String, serde_json::Value>,
}

impl Game {
    pub fn new(id: impl Into<String>, name: impl Into<String>, price: Price) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            price,
            metadata: serde_json::Map::new(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Cart {
    pub id: String,
    #[serde(default)]
    pub amount_of_games: usize,
    #[serde(default)]
    pub games: Vec<Game>,
    #[serde(default)]
    pub total_price: Price,
}

impl Cart {
    pub fn empty(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            amount_of_games: 0,
            games: Vec::new(),
            total_price: Price::ZERO,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeleteResult {
    pub deleted_id: String,
    pub success: bool,
}

/// The fixed set of games a caller may add to a cart.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum GameSelector {
    Lol,
    Starcraft,
    Eldenring,
    Minecraft,
    Csgo,
}

impl GameSelector {
    pub const ALL: [GameSelector; 5] = [
        GameSelector::Lol,
        GameSelector::Starcraft,
        GameSelector::Eldenring,
        GameSelector::Minecraft,
        GameSelector::Csgo,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            GameSelector::Lol => "LOL",
            GameSelector::Starcraft => "STARCRAFT",
            GameSelector::Eldenring => "ELDENRING",
            GameSelector::Minecraft => "MINECRAFT",
            GameSelector::Csgo => "CSGO",
        }
    }

    /// Index of this selector in declaration order.
    pub fn position(&self) -> usize {
        Self::ALL
            .iter()
            .position(|s| s == self)
            .unwrap_or_default()
    }

    /// Catalog id used when no override is configured.
    pub fn default_catalog_key(&self) -> &'static str {
        match self {
            GameSelector::Lol => "lol",
            GameSelector::Starcraft => "starcraft",
            GameSelector::Eldenring => "eldenring",
            GameSelector::Minecraft => "minecraft",
            GameSelector::Csgo => "csgo",
        }
    }
}

impl fmt::Display for GameSelector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for GameSelector {
    type Err = CartError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim();
        Self::ALL
            .into_iter()
            .find(|selector| selector.as_str().eq_ignore_ascii_case(wanted))
            .ok_or_else(|| {
                CartError::validation(format!(
                    "unknown game selector '{}' (expected one of LOL, STARCRAFT, ELDENRING, MINECRAFT, CSGO)",
                    s
                ))
            })
    }
}

/// How a selector is turned into a catalog record.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SelectorResolution {
    /// Look the game up by its configured catalog id.
    #[default]
    ByKey,
    /// Nth selector picks the Nth catalog record in file-name order.
    Positional,
}

impl FromStr for SelectorResolution {
    type Err = CartError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "by_key" | "key" => Ok(SelectorResolution::ByKey),
            "positional" => Ok(SelectorResolution::Positional),
            other => Err(CartError::InvalidConfigValue {
                field: "catalog.resolution".to_string(),
                value: other.to_string(),
                reason: "expected 'by_key' or 'positional'".to_string(),
            }),
        }
    }
}

/// Record namespaces backing the service.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Namespace {
    Carts,
    Games,
}

impl Namespace {
    pub fn as_str(&self) -> &'static str {
        match self {
            Namespace::Carts => "carts",
            Namespace::Games => "games",
        }
    }
}

impl fmt::Display for Namespace {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A raw document together with the id it is stored under.
#[derive(Debug, Clone, PartialEq)]
pub struct StoredRecord {
    pub id: String,
    pub document: serde_json::Value,
}
