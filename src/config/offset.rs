//! Pre-trigger offsets.
//!
//! An offset widens the trigger window of a waypoint: the sentinel is
//! displaced away from the region edge so content starts rendering before
//! it actually scrolls into view. Accepts absolute rows or a percentage of
//! the viewport height, mirroring the string-or-number shapes embedders
//! tend to keep in their own configuration.

use std::str::FromStr;

use crate::model::OffsetParseError;

/// Distance by which a waypoint pre-triggers its boundary.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Offset {
    /// Absolute rows.
    Rows(u16),
    /// Percentage of the viewport height, resolved per tick.
    Percent(u16),
}

impl Offset {
    /// Resolve to rows against the current viewport height.
    ///
    /// Saturates at `u16::MAX` for outsized percentages.
    pub fn resolve(self, viewport_height: u16) -> u16 {
        match self {
            Offset::Rows(rows) => rows,
            Offset::Percent(percent) => {
                let rows = u32::from(viewport_height) * u32::from(percent) / 100;
                u16::try_from(rows).unwrap_or(u16::MAX)
            }
        }
    }
}

impl Default for Offset {
    /// Half a viewport, matching the widget's stock pre-trigger distance.
    fn default() -> Self {
        Offset::Percent(50)
    }
}

impl From<u16> for Offset {
    fn from(rows: u16) -> Self {
        Offset::Rows(rows)
    }
}

impl FromStr for Offset {
    type Err = OffsetParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        if trimmed.is_empty() {
            return Err(OffsetParseError::Empty);
        }
        let (digits, is_percent) = match trimmed.strip_suffix('%') {
            Some(rest) => (rest.trim_end(), true),
            None => (trimmed, false),
        };
        let value: u16 = digits.parse().map_err(|_| OffsetParseError::Invalid {
            raw: s.to_string(),
        })?;
        Ok(if is_percent {
            Offset::Percent(value)
        } else {
            Offset::Rows(value)
        })
    }
}
