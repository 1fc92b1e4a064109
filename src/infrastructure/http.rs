//! HTTP access to the CoinGecko market-data API.

pub mod coingecko_client;
pub mod dto;

pub use coingecko_client::CoinGeckoHttpClient;
pub use dto::{decode_catalog, decode_market_chart};
