//! Per-day price averaging and 3-day trend classification.
//!
//! The signal is taken from the purchase side of an instrument's history:
//! trades are grouped by calendar day, averaged, and the newest three day
//! averages are checked for a strictly monotonic trend.

use chrono::NaiveDate;
use std::collections::BTreeMap;
use trendbot_core::Trade;

/// Number of distinct trading days a trend is computed over.
pub const TREND_DAYS: usize = 3;

/// Calendar zone for day grouping, fixed for the whole process so every
/// instrument's averages share day boundaries.
pub const DAY_ZONE: chrono::Utc = chrono::Utc;

/// Average purchase price for one calendar day.
#[derive(Debug, Clone, PartialEq)]
pub struct DayAverage {
    pub date: NaiveDate,
    pub average: f64,
}

/// Trend direction over the tracked days.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TrendSignal {
    /// Day averages strictly increasing toward today: buy-eligible.
    Rising,
    /// Day averages strictly decreasing toward today: sell-eligible.
    Falling,
}

/// Trend statistics for one instrument, valid for a single cycle.
#[derive(Debug, Clone, PartialEq)]
pub struct TrendStats {
    pub symbol: String,
    /// Next-day price extrapolated from the tracked days.
    pub predicted: i64,
    /// Half the swing between oldest and newest tracked day; doubles as
    /// the candidate ranking score.
    pub delta: f64,
    /// Exactly [`TREND_DAYS`] day averages, newest first.
    pub averages: [DayAverage; TREND_DAYS],
    pub signal: TrendSignal,
}

/// Computes trend statistics from an instrument's bought trades.
///
/// Returns `None` when fewer than [`TREND_DAYS`] distinct days of data
/// exist, or when the day averages are flat or mixed. Both cases simply
/// disqualify the instrument for this cycle.
#[must_use]
pub fn trend_stats(symbol: &str, bought: &[Trade]) -> Option<TrendStats> {
    let mut by_day: BTreeMap<NaiveDate, (i64, u32)> = BTreeMap::new();
    for trade in bought {
        let day = trade.timestamp.with_timezone(&DAY_ZONE).date_naive();
        let entry = by_day.entry(day).or_insert((0, 0));
        entry.0 += trade.price;
        entry.1 += 1;
    }

    if by_day.len() < TREND_DAYS {
        return None;
    }

    // newest first
    let mut days = by_day.iter().rev().take(TREND_DAYS).map(|(date, (sum, count))| DayAverage {
        date: *date,
        average: *sum as f64 / f64::from(*count),
    });
    let averages: [DayAverage; TREND_DAYS] = [days.next()?, days.next()?, days.next()?];

    let signal = if averages[0].average > averages[1].average
        && averages[1].average > averages[2].average
    {
        TrendSignal::Rising
    } else if averages[0].average < averages[1].average
        && averages[1].average < averages[2].average
    {
        TrendSignal::Falling
    } else {
        return None;
    };

    let delta = (averages[0].average - averages[2].average) / 2.0;
    #[allow(clippy::cast_possible_truncation)]
    let predicted = (averages[0].average + delta).round() as i64;

    Some(TrendStats {
        symbol: symbol.to_string(),
        predicted,
        delta,
        averages,
        signal,
    })
}
