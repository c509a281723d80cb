use crate::domain::model::{Cart, Game, Price};
use crate::utils::error::{CartError, Result};

/// Fields derived from a cart's game list.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CartTotals {
    pub amount_of_games: usize,
    pub total_price: Price,
}

/// Counts the games and sums their prices exactly.
///
/// Fails instead of clamping when the total would pass [`Price::MAX`], so a
/// stored `totalPrice` is always the true sum of its games.
pub fn recompute(games: &[Game]) -> Result<CartTotals> {
    let mut total_price = Price::ZERO;
    for game in games {
        total_price = total_price.checked_add(game.price).ok_or_else(|| {
            CartError::validation(format!(
                "cart total would exceed the maximum price of {}",
                Price::MAX
            ))
        })?;
    }

    Ok(CartTotals {
        amount_of_games: games.len(),
        total_price,
    })
}

/// Overwrites the cart's derived fields from its current game list.
/// On error the cart is left as it was.
pub fn refresh(cart: &mut Cart) -> Result<()> {
    let totals = recompute(&cart.games)?;
    cart.amount_of_games = totals.amount_of_games;
    cart.total_price = totals.total_price;
    Ok(())
}

/// True when the stored count and total match the games. A game list whose
/// sum is out of range is never consistent.
pub fn is_consistent(cart: &Cart) -> bool {
    recompute(&cart.games).is_ok_and(|totals| {
        totals
            == CartTotals {
                amount_of_games: cart.amount_of_games,
                total_price: cart.total_price,
            }
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn game(name: &str, cents: u64) -> Game {
        Game::new(name.to_lowercase(), name, Price::from_cents(cents))
    }

    #[test]
    fn test_empty_list_has_zero_totals() {
        let totals = recompute(&[]).unwrap();
        assert_eq!(totals.amount_of_games, 0);
        assert_eq!(totals.total_price, Price::ZERO);
    }

    #[test]
    fn test_duplicates_are_counted_each_time() {
        let games = vec![game("LoL", 0), game("Minecraft", 24_900), game("Minecraft", 24_900)];
        let totals = recompute(&games).unwrap();
        assert_eq!(totals.amount_of_games, 3);
        assert_eq!(totals.total_price, Price::from_cents(49_800));
    }

    #[test]
    fn test_refresh_repairs_stale_fields() {
        let mut cart = Cart::empty("c1");
        cart.games.push(game("Elden Ring", 59_999));
        cart.amount_of_games = 7;
        assert!(!is_consistent(&cart));

        refresh(&mut cart).unwrap();
        assert_eq!(cart.amount_of_games, 1);
        assert_eq!(cart.total_price, Price::from_cents(59_999));
        assert!(is_consistent(&cart));
    }

    #[test]
    fn test_total_at_max_is_accepted() {
        let games = vec![
            game("Big", Price::MAX.cents() - 1),
            game("Penny", 1),
        ];
        assert_eq!(recompute(&games).unwrap().total_price, Price::MAX);
    }

    #[test]
    fn test_total_past_max_is_an_error_not_a_clamp() {
        let mut cart = Cart::empty("c2");
        cart.games.push(game("Big", Price::MAX.cents()));
        refresh(&mut cart).unwrap();

        cart.games.push(game("Penny", 1));
        let err = refresh(&mut cart).unwrap_err();
        assert!(matches!(err, CartError::Validation { .. }));
        assert_eq!(cart.total_price, Price::MAX);
        assert!(!is_consistent(&cart));

        let wrapped = vec![game("Huge", u64::MAX), game("Five", 5)];
        assert!(recompute(&wrapped).is_err());
    }
}
