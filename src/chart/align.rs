use chrono::{DateTime, Days, NaiveDateTime, Offset, TimeZone, Utc};
use chrono_tz::Tz;

use crate::chart::model::{Alignment, PlotDataset};
use crate::core::PricePoint;

const LABEL_FORMAT: &str = "%H:%M:%S";
const GAP_LOOKBACK_HOURS: i64 = 3;

/// Align `series` for plotting, with labels and day arithmetic in UTC.
///
/// See [`align_in`].
#[must_use]
pub fn align(series: &[PricePoint], now: DateTime<Utc>) -> Alignment {
    align_in(series, now, Tz::UTC)
}

/// Align `series` for plotting, with labels and day arithmetic in `tz`.
///
/// The baseline is the value of the first point, scanning backward from the end of the
/// series, whose timestamp is at or before [`prior_day_target`] of the last point. The
/// series order is trusted as delivered; when several points sit at or before the target,
/// the one nearest the end wins, not the one nearest in time. An empty series yields an
/// empty dataset and no baseline.
#[must_use]
pub fn align_in(series: &[PricePoint], now: DateTime<Utc>, tz: Tz) -> Alignment {
    let dataset = PlotDataset {
        label: None,
        labels: series
            .iter()
            .map(|p| p.timestamp.with_timezone(&tz).format(LABEL_FORMAT).to_string())
            .collect(),
        values: series.iter().map(|p| p.value).collect(),
    };

    let baseline = series.last().and_then(|latest| {
        let target = prior_day_target(latest.timestamp, tz);
        series
            .iter()
            .rev()
            .find(|p| p.timestamp <= target)
            .map(|p| p.value)
    });

    Alignment {
        dataset,
        baseline,
        generated_at: now,
    }
}

/// Same wall-clock time on the previous calendar day in `tz`.
///
/// This is date arithmetic, not a fixed 24 hour offset: across a DST change the result is
/// 23 or 25 hours earlier. A wall-clock time skipped by a spring-forward gap is read with
/// the offset in force before the gap, which moves it forward (02:30 becomes 03:30). A
/// repeated fall-back time resolves to its earlier instant.
#[must_use]
pub fn prior_day_target(latest: DateTime<Utc>, tz: Tz) -> DateTime<Utc> {
    latest
        .with_timezone(&tz)
        .naive_local()
        .checked_sub_days(Days::new(1))
        .and_then(|naive| resolve_local(naive, tz))
        .unwrap_or_else(|| latest - chrono::Duration::days(1))
}

fn resolve_local(naive: NaiveDateTime, tz: Tz) -> Option<DateTime<Utc>> {
    if let Some(local) = tz.from_local_datetime(&naive).earliest() {
        return Some(local.with_timezone(&Utc));
    }
    // Gaps are at most a few hours wide; a point before it carries the old offset.
    let before = naive.checked_sub_signed(chrono::Duration::hours(GAP_LOOKBACK_HOURS))?;
    let offset = tz.from_local_datetime(&before).earliest()?.offset().fix();
    offset
        .from_local_datetime(&naive)
        .single()
        .map(|dt| dt.with_timezone(&Utc))
}
