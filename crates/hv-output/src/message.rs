//! The textual `presentInPath` wire message.

use std::fmt;
use std::str::FromStr;

use hv_core::MoverId;

use crate::OutputError;

/// A position update as sent to the presentation layer:
/// `presentInPath;<mover id>;<lane>;<depth>`.
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug)]
pub struct PresentMessage {
    pub mover: MoverId,
    pub lane:  usize,
    pub depth: usize,
}

impl PresentMessage {
    pub const TAG: &'static str = "presentInPath";

    pub fn new(mover: MoverId, lane: usize, depth: usize) -> Self {
        Self { mover, lane, depth }
    }
}

impl fmt::Display for PresentMessage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{};{};{};{}", Self::TAG, self.mover.0, self.lane, self.depth)
    }
}

impl FromStr for PresentMessage {
    type Err = OutputError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let malformed = |reason| OutputError::Message { input: s.to_owned(), reason };

        let mut fields = s.trim_end().split(';');
        if fields.next() != Some(Self::TAG) {
            return Err(malformed("missing presentInPath tag"));
        }
        let mut number = |name| {
            fields
                .next()
                .ok_or_else(|| malformed(name))?
                .parse::<usize>()
                .map_err(|_| malformed(name))
        };
        let mover = number("bad mover id")?;
        let lane = number("bad lane")?;
        let depth = number("bad depth")?;
        if fields.next().is_some() {
            return Err(malformed("trailing fields"));
        }

        let mover = MoverId::try_from(mover).map_err(|_| malformed("bad mover id"))?;
        Ok(Self { mover, lane, depth })
    }
}
