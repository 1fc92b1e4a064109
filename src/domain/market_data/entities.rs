use super::value_objects::{AssetId, Timestamp, TimeWindow};
use crate::domain::logging::{LogComponent, get_logger};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// One catalog row. Immutable once received.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AssetSummary {
    pub id: AssetId,
    pub name: String,
    pub symbol: String,
    pub image_url: String,
    pub current_price: f64,
    pub price_change_24h_pct: f64,
    pub price_change_30d_pct: Option<f64>,
    pub market_cap: f64,
}

impl AssetSummary {
    /// Case-insensitive substring match on name or symbol.
    /// `needle` must already be lowercased.
    pub fn matches(&self, needle: &str) -> bool {
        self.name.to_lowercase().contains(needle) || self.symbol.to_lowercase().contains(needle)
    }
}

/// Market-cap ranked snapshot of the top assets, ids unique
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Catalog {
    assets: Vec<AssetSummary>,
}

impl Catalog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Keeps the first (highest ranked) occurrence of every id.
    pub fn from_assets(assets: Vec<AssetSummary>) -> Self {
        let mut seen = HashSet::with_capacity(assets.len());
        let mut unique = Vec::with_capacity(assets.len());
        for asset in assets {
            if seen.insert(asset.id.clone()) {
                unique.push(asset);
            } else {
                get_logger().warn(
                    LogComponent::Domain("Catalog"),
                    &format!("Dropping duplicate catalog entry '{}'", asset.id),
                );
            }
        }
        Self { assets: unique }
    }

    pub fn assets(&self) -> &[AssetSummary] {
        &self.assets
    }

    pub fn top(&self, count: usize) -> &[AssetSummary] {
        &self.assets[..count.min(self.assets.len())]
    }

    pub fn find(&self, id: &AssetId) -> Option<&AssetSummary> {
        self.assets.iter().find(|asset| &asset.id == id)
    }

    pub fn len(&self) -> usize {
        self.assets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.assets.is_empty()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PricePoint {
    pub timestamp: Timestamp,
    pub price: f64,
}

impl PricePoint {
    pub fn new(timestamp: Timestamp, price: f64) -> Self {
        Self { timestamp, price }
    }
}

/// Price history of one asset over one window, ascending by timestamp
#[derive(Debug, Clone, PartialEq)]
pub struct HistoricalSeries {
    asset_id: AssetId,
    window: TimeWindow,
    points: Vec<PricePoint>,
}

impl HistoricalSeries {
    pub fn new(asset_id: AssetId, window: TimeWindow, points: Vec<PricePoint>) -> Self {
        Self { asset_id, window, points }
    }

    pub fn asset_id(&self) -> &AssetId {
        &self.asset_id
    }

    pub fn window(&self) -> TimeWindow {
        self.window
    }

    pub fn points(&self) -> &[PricePoint] {
        &self.points
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn is_for(&self, asset_id: &AssetId, window: TimeWindow) -> bool {
        &self.asset_id == asset_id && self.window == window
    }

    /// (min, max) price, `None` for an empty series
    pub fn price_range(&self) -> Option<(f64, f64)> {
        let first = self.points.first()?.price;
        Some(
            self.points
                .iter()
                .fold((first, first), |(min, max), p| (min.min(p.price), max.max(p.price))),
        )
    }

    /// (first, last) timestamp, `None` for an empty series
    pub fn time_range(&self) -> Option<(Timestamp, Timestamp)> {
        Some((self.points.first()?.timestamp, self.points.last()?.timestamp))
    }
}
