//! The data boundary: where bar series come from.
//!
//! The indicator engine never fetches data itself; it consumes a `Series`
//! built by one of these sources. Ordering and timestamp uniqueness are
//! enforced here, at the boundary, so the engine can trust its input.

pub mod csv;
pub mod provider;
pub mod synthetic;
pub mod watchlist;

pub use csv::read_series;
pub use provider::{DataError, PriceSeriesProvider};
pub use synthetic::SyntheticProvider;
pub use watchlist::{Quote, RefreshPolicy, Watchlist};
