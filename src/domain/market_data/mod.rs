//! Market data aggregate: catalog, price history, search and the data source port.

pub mod entities;
pub mod repositories;
pub mod services;
pub mod value_objects;

pub use entities::*;
pub use repositories::MarketDataRepository;
pub use services::*;
pub use value_objects::*;
