use crate::series::log::TimeSeries;

/// Nearest-sample lookup over a [`TimeSeries`] with a monotonically adjusted position hint.
///
/// One cursor serves one logical query stream. When queries advance near-monotonically (the
/// frame-sequential playback case) each lookup is amortized O(1); a large time jump costs
/// O(distance) but stays correct. The hint is explicit state owned by the caller, never a
/// module-level variable, so the single-query-stream invariant is visible in the signature.
#[derive(Debug)]
pub struct SeriesCursor<'a> {
    series: &'a TimeSeries,
    pos: usize,
}

impl<'a> SeriesCursor<'a> {
    /// Cursor starting at the first record.
    pub fn new(series: &'a TimeSeries) -> Self {
        Self { series, pos: 0 }
    }

    /// Value of the record adjacent-nearest to `t`.
    ///
    /// Hill-climbs the hint: steps back while `t` precedes the hinted record, then forward
    /// while `t` exceeds it. This is nearest-by-adjacency, not true-nearest: climbing stops at
    /// the last record whose time does not exceed the walk, so with forward motion into a gap
    /// the later record wins. Out-of-range `t` returns the first/last value, never indexing
    /// out of bounds.
    pub fn sample(&mut self, t: f64) -> i64 {
        while t < self.series.time(self.pos) && self.pos > 0 {
            self.pos -= 1;
        }
        let last = self.series.len() - 1;
        while t > self.series.time(self.pos) && self.pos < last {
            self.pos += 1;
        }
        self.series.value(self.pos)
    }

    /// Current position hint.
    pub fn position(&self) -> usize {
        self.pos
    }
}

#[cfg(test)]
#[path = "../../tests/unit/series/cursor.rs"]
mod tests;
