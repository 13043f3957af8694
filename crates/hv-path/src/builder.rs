//! Fluent builder for constructing a [`Corridor`].

use hv_core::CorridorConfig;

use crate::{Corridor, NoopSink, PathResult, PositionSink};

/// Fluent builder for [`Corridor<S>`].
///
/// # Optional inputs (have defaults)
///
/// | Method         | Default                       |
/// |----------------|-------------------------------|
/// | `.config(c)`   | `CorridorConfig::default()`   |
/// | `.sink(s)`     | [`NoopSink`]                  |
///
/// # Example
///
/// ```rust,ignore
/// let corridor = CorridorBuilder::new()
///     .config(CorridorConfig { path_size: 10, ..CorridorConfig::default() })
///     .sink(CsvSink::create(&out)?)
///     .build()?;
/// ```
pub struct CorridorBuilder<S: PositionSink = NoopSink> {
    config: CorridorConfig,
    sink:   S,
}

impl CorridorBuilder<NoopSink> {
    /// Start from the default configuration and a sink that discards updates.
    pub fn new() -> Self {
        Self {
            config: CorridorConfig::default(),
            sink:   NoopSink,
        }
    }
}

impl Default for CorridorBuilder<NoopSink> {
    fn default() -> Self {
        Self::new()
    }
}

impl<S: PositionSink> CorridorBuilder<S> {
    /// Replace the whole configuration.
    pub fn config(mut self, config: CorridorConfig) -> Self {
        self.config = config;
        self
    }

    /// Send position updates to `sink`.
    pub fn sink<T: PositionSink>(self, sink: T) -> CorridorBuilder<T> {
        CorridorBuilder { config: self.config, sink }
    }

    /// Validate the configuration and return a ready corridor.
    pub fn build(self) -> PathResult<Corridor<S>> {
        self.config.validate()?;
        Ok(Corridor::new(self.config, self.sink))
    }
}
