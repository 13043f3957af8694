//! `hv-output` — presentation sinks for the harvest corridor.
//!
//! Every sink implements `hv_path::PositionSink` and never fails the
//! corridor:
//!
//! | Sink           | Destination                                              |
//! |----------------|----------------------------------------------------------|
//! | [`CsvSink`]    | `mover_id,lane,depth` rows in a CSV file                 |
//! | [`ChannelSink`]| [`PresentMessage`]s over an `mpsc` channel               |
//! | [`TracingSink`]| `debug` events under the `hv_output::present` target     |
//!
//! # Usage
//!
//! ```rust,ignore
//! use hv_output::CsvSink;
//!
//! let sink = Arc::new(CsvSink::create(Path::new("positions.csv"))?);
//! let corridor = CorridorBuilder::new().sink(Arc::clone(&sink)).build()?;
//! // ... run movers ...
//! sink.finish()?;
//! ```

pub mod channel;
pub mod csv;
pub mod error;
pub mod message;
pub mod trace;

#[cfg(test)]
mod tests;

pub use channel::ChannelSink;
pub use csv::CsvSink;
pub use error::{OutputError, OutputResult};
pub use message::PresentMessage;
pub use trace::TracingSink;
