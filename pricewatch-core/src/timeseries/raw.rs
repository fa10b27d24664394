use core::fmt;

use crate::PricewatchError;

/// Reserved price value meaning "no offer recorded at this timestamp".
pub const NO_DATA: i64 = -1;

/// Sales channel a raw series was recorded on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Channel {
    /// The primary seller (Amazon itself).
    Primary,
    /// Third-party marketplace sellers.
    Marketplace,
}

impl Channel {
    /// Stable lowercase label used in errors and logs.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Primary => "primary",
            Self::Marketplace => "marketplace",
        }
    }
}

impl fmt::Display for Channel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Linear conversion from a vendor's encoded timestamp to Unix milliseconds.
///
/// `unix_ms = (encoded + offset_minutes) * scale_ms`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimeBase {
    /// Minutes between the Unix epoch and the vendor epoch.
    pub offset_minutes: i64,
    /// Milliseconds per encoded unit.
    pub scale_ms: i64,
}

impl TimeBase {
    /// Keepa time: minutes since 2011-01-01T00:00:00Z.
    pub const KEEPA: Self = Self {
        offset_minutes: 21_564_000,
        scale_ms: 60_000,
    };

    /// Convert an encoded timestamp to Unix milliseconds; `None` on overflow.
    #[must_use]
    pub const fn to_unix_ms(self, encoded: i64) -> Option<i64> {
        match encoded.checked_add(self.offset_minutes) {
            Some(minutes) => minutes.checked_mul(self.scale_ms),
            None => None,
        }
    }

    /// Inverse of [`to_unix_ms`](Self::to_unix_ms), truncating toward the vendor epoch.
    #[must_use]
    pub const fn from_unix_ms(self, unix_ms: i64) -> i64 {
        unix_ms / self.scale_ms - self.offset_minutes
    }
}

impl Default for TimeBase {
    fn default() -> Self {
        Self::KEEPA
    }
}

/// `(encoded_timestamp, price_in_cents_or_sentinel)` pairs from one sales channel.
///
/// Pairs keep vendor order; sentinel prices are kept here and dropped by the
/// merge.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RawChannelSeries {
    points: Vec<(i64, i64)>,
}

impl RawChannelSeries {
    /// Wrap already-paired points.
    #[must_use]
    pub const fn new(points: Vec<(i64, i64)>) -> Self {
        Self { points }
    }

    /// A channel with no observations.
    #[must_use]
    pub const fn empty() -> Self {
        Self { points: Vec::new() }
    }

    /// Parse the vendor's flat interleaved encoding `[t0, p0, t1, p1, ...]`.
    ///
    /// # Errors
    /// Returns `PricewatchError::InvalidSeriesShape` if `flat` has odd length.
    pub fn from_flat(channel: Channel, flat: &[i64]) -> Result<Self, PricewatchError> {
        if flat.len() % 2 != 0 {
            return Err(PricewatchError::invalid_shape(channel.as_str(), flat.len()));
        }
        let points = flat.chunks_exact(2).map(|pair| (pair[0], pair[1])).collect();
        Ok(Self { points })
    }

    /// Raw pairs in vendor order.
    #[must_use]
    pub fn points(&self) -> &[(i64, i64)] {
        &self.points
    }

    /// Iterate raw pairs in vendor order.
    pub fn iter(&self) -> impl Iterator<Item = (i64, i64)> + '_ {
        self.points.iter().copied()
    }

    /// Number of raw pairs, sentinels included.
    #[must_use]
    pub fn len(&self) -> usize {
        self.points.len()
    }

    /// True when the channel has no pairs at all.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }
}

impl From<Vec<(i64, i64)>> for RawChannelSeries {
    fn from(points: Vec<(i64, i64)>) -> Self {
        Self::new(points)
    }
}

impl FromIterator<(i64, i64)> for RawChannelSeries {
    fn from_iter<I: IntoIterator<Item = (i64, i64)>>(iter: I) -> Self {
        Self::new(iter.into_iter().collect())
    }
}
