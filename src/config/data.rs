//! Series source configuration

pub struct CsvSettings {
    /// Default CSV file read by the native build
    pub path: &'static str,
    /// Column holding the observation timestamp
    pub date_column: &'static str,
    /// Value columns to load. Empty means every non-date column.
    pub value_columns: &'static [&'static str],
}

pub struct DataConfig {
    pub csv: CsvSettings,
    /// Suffix stripped from column names when building display labels
    pub column_suffix: &'static str,
    /// Quote assets stripped from column names when building display labels
    pub quote_assets: &'static [&'static str],
}

pub const DATA: DataConfig = DataConfig {
    csv: CsvSettings {
        path: "data/timeseries.csv",
        date_column: "time",
        value_columns: &["BTCUSDT_Open", "ETHUSDT_Open", "SOLUSDT_Open", "DOGEUSDT_Open"],
    },
    column_suffix: "_Open",
    quote_assets: &["USDT", "USDC", "FDUSD", "BUSD", "TUSD", "BTC", "ETH"],
};
