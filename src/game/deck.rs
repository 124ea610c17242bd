use rand::Rng;

use super::difficulty::DifficultyConfig;
use super::shuffle::shuffle;
use crate::error::ConfigError;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum CardStatus {
    #[default]
    Hidden,
    FaceUp,
    Matched,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Card {
    pub symbol: String,
    pub status: CardStatus,
}

impl Card {
    pub fn new(symbol: impl Into<String>) -> Self {
        Self {
            symbol: symbol.into(),
            status: CardStatus::Hidden,
        }
    }

    /// Matched cards stay face up.
    pub fn is_face_up(&self) -> bool {
        self.status != CardStatus::Hidden
    }

    pub fn is_matched(&self) -> bool {
        self.status == CardStatus::Matched
    }
}

/// Decides the order the paired symbols are laid out in.
pub trait Arrange {
    fn arrange(&mut self, symbols: Vec<String>) -> Vec<String>;
}

/// Uniformly random layout.
pub struct Shuffled<R>(pub R);

impl<R: Rng> Arrange for Shuffled<R> {
    fn arrange(&mut self, symbols: Vec<String>) -> Vec<String> {
        shuffle(&symbols, &mut self.0)
    }
}

/// Keeps the palette order followed by its duplicate, e.g. `A B A B`.
pub struct InOrder;

impl Arrange for InOrder {
    fn arrange(&mut self, symbols: Vec<String>) -> Vec<String> {
        symbols
    }
}

/// Takes the first `grid_size² / 2` symbols, pairs them and lets `order`
/// lay them out.
pub fn build_deck(config: &DifficultyConfig, order: &mut dyn Arrange) -> Result<Vec<Card>, ConfigError> {
    config.validate()?;
    Ok(lay_out_pairs(config, order))
}

/// Same as [`build_deck`] for a config that already passed validation.
pub(crate) fn lay_out_pairs(config: &DifficultyConfig, order: &mut dyn Arrange) -> Vec<Card> {
    let selected = &config.symbols[..config.total_pairs()];
    let mut symbols = Vec::with_capacity(config.card_count());
    symbols.extend_from_slice(selected);
    symbols.extend_from_slice(selected);
    order.arrange(symbols).into_iter().map(Card::new).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_chacha::ChaCha20Rng;
    use std::collections::HashMap;

    fn counts(deck: &[Card]) -> HashMap<&str, usize> {
        let mut out = HashMap::new();
        for card in deck {
            *out.entry(card.symbol.as_str()).or_insert(0) += 1;
        }
        out
    }

    #[test]
    fn four_by_four_uses_each_symbol_twice() {
        let config = DifficultyConfig::new("Easy", 4, ["a", "b", "c", "d", "e", "f", "g", "h", "unused"]);
        let mut order = Shuffled(ChaCha20Rng::seed_from_u64(3));
        let deck = build_deck(&config, &mut order).expect("valid config");
        assert_eq!(deck.len(), 16);
        let counts = counts(&deck);
        assert_eq!(counts.len(), 8);
        assert!(counts.values().all(|&n| n == 2));
        assert!(!counts.contains_key("unused"));
        assert!(deck.iter().all(|c| c.status == CardStatus::Hidden));
    }

    #[test]
    fn in_order_lays_out_palette_then_duplicate() {
        let config = DifficultyConfig::new("Tiny", 2, ["A", "B"]);
        let deck = build_deck(&config, &mut InOrder).expect("valid config");
        let symbols: Vec<&str> = deck.iter().map(|c| c.symbol.as_str()).collect();
        assert_eq!(symbols, ["A", "B", "A", "B"]);
    }

    #[test]
    fn short_palette_fails_deck_build() {
        let config = DifficultyConfig::new("Broken", 4, ["a", "b"]);
        assert!(matches!(
            build_deck(&config, &mut InOrder),
            Err(ConfigError::InsufficientSymbols { needed: 8, available: 2, .. })
        ));
    }
}
