use crate::config::DATA;

/// Helpers for turning CSV column keys such as `BTCUSDT_Open` into labels.
pub struct AssetKey;

impl AssetKey {
    /// Column key with stray quotes and the configured column suffix removed.
    pub fn symbol(key: &str) -> &str {
        let key = key.trim().trim_matches('"');
        key.strip_suffix(DATA.column_suffix).unwrap_or(key)
    }

    // Finds the trading quote at the end of the symbol and returns it.
    // Returns None if no matching quote is found.
    pub fn get_quote(symbol: &str) -> Option<&'static str> {
        DATA.quote_assets
            .iter()
            .find(|&&quote| symbol.len() > quote.len() && symbol.ends_with(quote))
            .copied()
    }

    pub fn get_base(symbol: &str) -> Option<&str> {
        let quote = Self::get_quote(symbol)?;
        symbol.strip_suffix(quote)
    }

    /// Short legend label: `BTCUSDT_Open` -> `BTC`. Falls back to the symbol.
    pub fn display_name(key: &str) -> &str {
        let symbol = Self::symbol(key);
        Self::get_base(symbol).unwrap_or(symbol)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_name_strips_suffix_and_quote() {
        assert_eq!(AssetKey::display_name("BTCUSDT_Open"), "BTC");
        assert_eq!(AssetKey::display_name("\"DOGEUSDT_Open\""), "DOGE");
        assert_eq!(AssetKey::display_name("SOLUSDC"), "SOL");
    }

    #[test]
    fn display_name_falls_back_to_symbol() {
        assert_eq!(AssetKey::display_name("gold"), "gold");
        assert_eq!(AssetKey::display_name("USDT_Open"), "USDT");
    }
}
