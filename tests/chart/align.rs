use chrono::{Duration, TimeZone, Utc};
use chrono_tz::Tz;
use coinfeed::{PricePoint, align, align_in, prior_day_target};
use rust_decimal::Decimal;

use crate::common::utc;

fn pt(ts: chrono::DateTime<Utc>, v: i64) -> PricePoint {
    PricePoint::new(ts, Decimal::from(v))
}

#[test]
fn empty_series_gives_empty_dataset_and_no_baseline() {
    let now = utc(2025, 10, 19, 12, 0);
    let out = align(&[], now);

    assert!(out.dataset.is_empty());
    assert!(out.dataset.labels.is_empty());
    assert_eq!(out.baseline, None);
    assert_eq!(out.generated_at, now);
}

#[test]
fn backward_scan_skips_points_after_target() {
    // latest = t0+25h, target = t0+1h: t0+23h is too late, t0 qualifies.
    let t0 = utc(2025, 3, 10, 8, 0);
    let series = [
        pt(t0, 100),
        pt(t0 + Duration::hours(23), 110),
        pt(t0 + Duration::hours(25), 105),
    ];

    let out = align(&series, t0 + Duration::hours(26));
    assert_eq!(out.baseline, Some(Decimal::from(100)));
}

#[test]
fn baseline_is_latest_point_at_or_before_one_day_back() {
    let t0 = utc(2025, 10, 17, 0, 0);
    let series: Vec<PricePoint> = (0..48)
        .map(|h| pt(t0 + Duration::hours(h), 1_000 + h))
        .collect();

    // latest = t0+47h, target = t0+23h exactly.
    let out = align(&series, t0 + Duration::hours(48));
    assert_eq!(out.baseline, Some(Decimal::from(1_023)));
    assert_eq!(out.dataset.len(), 48);
    assert_eq!(out.dataset.values[0], Decimal::from(1_000));
}

#[test]
fn no_baseline_when_series_is_shorter_than_a_day() {
    let t0 = utc(2025, 10, 19, 0, 0);
    let series = [
        pt(t0, 1),
        pt(t0 + Duration::hours(6), 2),
        pt(t0 + Duration::hours(12), 3),
    ];

    assert_eq!(align(&series, t0).baseline, None);
}

#[test]
fn single_point_has_no_baseline() {
    let t0 = utc(2025, 10, 19, 0, 0);
    assert_eq!(align(&[pt(t0, 7)], t0).baseline, None);
}

#[test]
fn tie_on_target_resolves_to_point_nearest_the_end() {
    let t0 = utc(2025, 10, 18, 12, 0);
    let series = [
        pt(t0 - Duration::hours(1), 90),
        pt(t0, 100),
        pt(t0, 101),
        pt(t0 + Duration::days(1), 120),
    ];

    assert_eq!(align(&series, t0).baseline, Some(Decimal::from(101)));
}

#[test]
fn first_found_backward_beats_closest_in_time() {
    // Input order is trusted: an out-of-order late sample that qualifies is taken
    // even though an earlier-listed sample is closer to the target.
    let target_day = utc(2025, 10, 18, 12, 0);
    let series = [
        pt(target_day - Duration::minutes(1), 200),
        pt(target_day - Duration::hours(5), 150),
        pt(target_day + Duration::days(1), 250),
    ];

    assert_eq!(align(&series, target_day).baseline, Some(Decimal::from(150)));
}

#[test]
fn target_carries_over_month_and_year_boundaries() {
    assert_eq!(
        prior_day_target(utc(2025, 3, 1, 6, 30), Tz::UTC),
        utc(2025, 2, 28, 6, 30)
    );
    assert_eq!(
        prior_day_target(utc(2026, 1, 1, 0, 15), Tz::UTC),
        utc(2025, 12, 31, 0, 15)
    );
}

#[test]
fn target_is_calendar_day_not_fixed_offset_across_dst() {
    // Europe/Berlin leaves DST on 2025-10-26 at 03:00 local (01:00 UTC).
    let tz: Tz = "Europe/Berlin".parse().unwrap();
    let latest = tz.with_ymd_and_hms(2025, 10, 26, 12, 0, 0).unwrap().with_timezone(&Utc);
    let expected = tz.with_ymd_and_hms(2025, 10, 25, 12, 0, 0).unwrap().with_timezone(&Utc);

    let target = prior_day_target(latest, tz);
    assert_eq!(target, expected);
    assert_eq!(latest - target, Duration::hours(25));
}

#[test]
fn skipped_wall_clock_time_moves_forward() {
    // America/New_York skips 02:00-03:00 local on 2025-03-09.
    let tz: Tz = "America/New_York".parse().unwrap();
    let latest = tz.with_ymd_and_hms(2025, 3, 10, 2, 30, 0).unwrap().with_timezone(&Utc);
    assert_eq!(latest, utc(2025, 3, 10, 6, 30));

    // 02:30 on the 9th does not exist; it reads as 02:30 EST, i.e. 03:30 EDT.
    let target = prior_day_target(latest, tz);
    assert_eq!(target, utc(2025, 3, 9, 7, 30));
    assert_eq!(latest - target, Duration::hours(23));

    let series = [
        pt(utc(2025, 3, 9, 6, 45), 1),
        pt(utc(2025, 3, 9, 7, 15), 2),
        pt(utc(2025, 3, 9, 7, 45), 3),
        pt(latest, 4),
    ];
    assert_eq!(align_in(&series, latest, tz).baseline, Some(Decimal::from(2)));
}

#[test]
fn labels_follow_requested_timezone() {
    let tz: Tz = "Asia/Kolkata".parse().unwrap();
    let series = [pt(utc(2025, 10, 19, 0, 0), 1), pt(utc(2025, 10, 19, 6, 45), 2)];

    let out = align_in(&series, utc(2025, 10, 19, 7, 0), tz);
    assert_eq!(out.dataset.labels, vec!["05:30:00", "12:15:00"]);

    let utc_out = align(&series, utc(2025, 10, 19, 7, 0));
    assert_eq!(utc_out.dataset.labels, vec!["00:00:00", "06:45:00"]);
}

#[test]
fn slope_uses_neighbours_and_is_absent_at_edges() {
    let t0 = utc(2025, 10, 19, 0, 0);
    let series = [
        pt(t0, 10),
        pt(t0 + Duration::minutes(5), 12),
        pt(t0 + Duration::minutes(10), 9),
    ];
    let ds = align(&series, t0).dataset;

    assert_eq!(ds.slope_at(0), None);
    assert_eq!(ds.slope_at(1), Some(Decimal::from(-1)));
    assert_eq!(ds.slope_at(2), None);
    assert_eq!(ds.slope_at(99), None);
}
