//! Symbol vocabulary and built-in weights

/// Built-in symbol set with default weights.
///
/// These are the relative draw weights used whenever no override file is
/// present (or the override is unusable). The vocabulary is open: override
/// files may introduce symbols not listed here.
pub const DEFAULT_WEIGHTS: [(&str, f64); 9] = [
    ("coin_1", 25.0),
    ("coin_stack", 10.0),
    ("coin_pile", 5.0),
    ("gem_1", 15.0),
    ("gem_many", 5.0),
    ("bomb_1", 15.0),
    ("bomb_atom", 5.0),
    ("card_item", 10.0),
    ("random_item", 5.0),
];

/// Bomb-category symbols, the targets of the bomb multiplier.
pub const BOMB_SYMBOLS: [&str; 2] = ["bomb_1", "bomb_atom"];

/// Check whether a symbol belongs to the bomb category.
pub fn is_bomb(symbol: &str) -> bool {
    BOMB_SYMBOLS.contains(&symbol)
}
