//! Data source and analysis services.

pub mod analysis;
pub mod market_data;
pub mod twelve_data;

pub use analysis::{AnalysisError, AnalysisService};
pub use market_data::{InMemoryMarketDataProvider, MarketDataProvider, ProviderError};
pub use twelve_data::TwelveDataClient;
