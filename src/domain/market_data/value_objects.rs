use derive_more::{Constructor, Deref, Display, From, Into};
use serde::{Deserialize, Serialize};
use strum::{AsRefStr, Display as StrumDisplay, EnumIter, EnumString};

/// Stable external identifier of an asset (CoinGecko id, e.g. `bitcoin`)
#[derive(Debug, Clone, PartialEq, Eq, Hash, Deref, Display, Serialize, Deserialize)]
#[display(fmt = "{}", _0)]
pub struct AssetId(String);

impl AssetId {
    pub fn new(id: String) -> Result<Self, String> {
        if id.trim().is_empty() {
            return Err("Asset id cannot be empty".to_string());
        }
        Ok(Self(id))
    }

    pub fn value(&self) -> &str {
        &self.0
    }
}

impl From<&str> for AssetId {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

/// Milliseconds since the Unix epoch
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, From, Into, Constructor, Serialize, Deserialize)]
pub struct Timestamp(u64);

impl Timestamp {
    pub fn value(&self) -> u64 {
        self.0
    }

    pub fn from_millis(value: u64) -> Self {
        Self(value)
    }

    pub fn as_f64(&self) -> f64 {
        self.0 as f64
    }
}

/// Tick spacing on the chart's time axis
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AxisGranularity {
    Day,
    Week,
}

impl AxisGranularity {
    pub fn step_ms(&self) -> u64 {
        match self {
            Self::Day => 24 * 60 * 60 * 1000,
            Self::Week => 7 * 24 * 60 * 60 * 1000,
        }
    }
}

/// Historical window requested from the data source
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Default, StrumDisplay, EnumIter, EnumString, AsRefStr, Serialize, Deserialize,
)]
pub enum TimeWindow {
    #[default]
    #[strum(serialize = "30")]
    #[serde(rename = "30")]
    ThirtyDays,

    #[strum(serialize = "180")]
    #[serde(rename = "180")]
    OneHundredEightyDays,
}

impl TimeWindow {
    /// Value of the `days` query parameter
    pub fn days_param(&self) -> &str {
        self.as_ref()
    }

    pub fn days(&self) -> u32 {
        match self {
            Self::ThirtyDays => 30,
            Self::OneHundredEightyDays => 180,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::ThirtyDays => "1 month",
            Self::OneHundredEightyDays => "6 months",
        }
    }

    pub fn granularity(&self) -> AxisGranularity {
        match self {
            Self::ThirtyDays => AxisGranularity::Day,
            Self::OneHundredEightyDays => AxisGranularity::Week,
        }
    }
}
