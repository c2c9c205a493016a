//! Domain types: bars, series, sampling granularity.

pub mod bar;
pub mod granularity;
pub mod series;

pub use bar::Bar;
pub use granularity::Granularity;
pub use series::Series;
