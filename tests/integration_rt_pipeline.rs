//! Integration tests for the Rt estimation pipeline.
//!
//! Purpose
//! -------
//! - Validate the end-to-end flow: CSSE-style feed rows → validated
//!   `CaseTable` → per-region smoothed Rt → published snapshot → summaries.
//! - Exercise the behaviors consumers rely on (empty curves for degenerate
//!   regions, clamped corrections, deterministic recomputation) through the
//!   public API only.
//!
//! Coverage
//! --------
//! - `reproduction::core::data`:
//!   - Header parsing, province aggregation, and row exclusion.
//! - `reproduction::models::dynamic_r`:
//!   - Window starts, date labels, and empty curves.
//! - `reproduction::models::store`:
//!   - Refresh through a stateful `CaseFeed` and failure handling.
//! - `summary::window_stats`:
//!   - Before/after comparisons and per-region averages.
//!
//! Exclusions
//! ----------
//! - Exact numerical values of individual weights and daily estimates;
//!   those are pinned by unit tests next to each stage.
//! - Python bindings.
use approx::assert_relative_eq;
use chrono::NaiveDate;
use rt_estimation::{
    reproduction::{
        CSSE_DATE_FORMAT, CaseFeed, CaseTable, DateAlignment, DynamicRStore, RtError, RtOptions,
        compute_dynamic_r, epicurve, first_window_start, parse_column_dates,
    },
    summary::{average_r, compare_regions},
};
use std::collections::VecDeque;

/// Purpose
/// -------
/// Build the feed rows of a small CSSE-style extract with eight daily
/// columns starting on 2020-03-01.
///
/// Rows
/// ----
/// - Two "France" province rows whose sum is `[0, 0, 0, 5, 10, 15, 20, 25]`,
///   i.e. the epicurve `[0, 0, 5, 5, 5, 5, 5]`.
/// - A "Diamond Princess" row that callers are expected to exclude.
/// - An "Italy" row that is flat apart from one downward correction.
fn feed_rows() -> (Vec<String>, Vec<String>, Vec<Vec<f64>>) {
    let headers =
        ["3/1/20", "3/2/20", "3/3/20", "3/4/20", "3/5/20", "3/6/20", "3/7/20", "3/8/20"];
    let regions = ["France", "France", "Diamond Princess", "Italy"];
    let rows = vec![
        vec![0.0, 0.0, 0.0, 2.0, 4.0, 6.0, 8.0, 10.0],
        vec![0.0, 0.0, 0.0, 3.0, 6.0, 9.0, 12.0, 15.0],
        vec![0.0, 10.0, 20.0, 40.0, 60.0, 61.0, 61.0, 61.0],
        vec![4.0, 4.0, 4.0, 4.0, 3.0, 3.0, 3.0, 3.0],
    ];
    (
        regions.iter().map(|r| r.to_string()).collect(),
        headers.iter().map(|h| h.to_string()).collect(),
        rows,
    )
}

/// Purpose
/// -------
/// Run the ingestion boundary the way a feed adapter would: parse headers,
/// roll provinces into countries, and drop non-geographic rows.
fn ingest() -> CaseTable {
    let (regions, headers, rows) = feed_rows();
    let dates = parse_column_dates(&headers, CSSE_DATE_FORMAT)
        .expect("CSSE headers should parse with the default format");
    CaseTable::aggregate_by_region(regions, dates, rows)
        .expect("aggregation should succeed for rectangular, non-negative rows")
        .without_regions(&["Diamond Princess"])
}

fn march(day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(2020, 3, day).expect("valid March 2020 date")
}

/// Feed replaying a fixed queue of responses, one per refresh.
struct ScriptedFeed {
    responses: VecDeque<anyhow::Result<CaseTable>>,
}

impl CaseFeed for ScriptedFeed {
    fn fetch(&mut self) -> anyhow::Result<CaseTable> {
        self.responses.pop_front().unwrap_or_else(|| Err(anyhow::anyhow!("feed exhausted")))
    }
}

#[test]
// Purpose
// -------
// Ensure the ingestion boundary produces the expected table from raw feed
// rows.
//
// Given
// -----
// - The rows of `feed_rows()`.
//
// Expect
// ------
// - Regions are ["France", "Italy"] in first-appearance order.
// - France holds the element-wise province sum; dates start on 2020-03-01.
fn ingestion_aggregates_and_excludes_rows() {
    let table = ingest();

    assert_eq!(table.regions(), &["France".to_string(), "Italy".to_string()]);
    assert_eq!(table.dates().len(), 8);
    assert_eq!(table.dates()[0], march(1));
    assert_eq!(table.dates()[7], march(8));

    let france = table.counts().row(0).to_vec();
    assert_eq!(france, vec![0.0, 0.0, 0.0, 5.0, 10.0, 15.0, 20.0, 25.0]);
}

#[test]
// Purpose
// -------
// Check the full computation on the reference epicurve and on a region
// whose only movement is a downward correction.
//
// Given
// -----
// - France: epicurve [0, 0, 5, 5, 5, 5, 5], window size 3.
// - Italy: cumulative counts that drop once and are otherwise flat.
//
// Expect
// ------
// - France carries its raw cumulative series alongside the epicurve.
// - France keeps windows starting at 3 and 4 with finite positive means,
//   labelled 2020-03-05 and 2020-03-06 (the report date `dates[t + 1]`).
// - Italy's epicurve is all zero after clamping and its curve is empty.
fn pipeline_matches_reference_scenarios() {
    let table = ingest();
    let result = compute_dynamic_r(&table, &RtOptions::default()).expect("compute should succeed");

    let france = result.region("France").expect("France is present");
    assert_eq!(france.cumulative.to_vec(), table.counts().row(0).to_vec());
    assert_eq!(france.epicurve.to_vec(), vec![0.0, 0.0, 5.0, 5.0, 5.0, 5.0, 5.0]);
    assert_eq!(france.windows.starts, vec![3, 4]);
    assert_eq!(france.dates, vec![march(5), march(6)]);
    for &mean in france.mean_r() {
        assert!(mean.is_finite() && mean > 0.0, "mean Rt should be finite and positive: {mean}");
    }

    let italy = result.region("Italy").expect("Italy is present");
    assert_eq!(italy.epicurve.len(), table.dates().len() - 1);
    assert!(italy.epicurve.iter().all(|&e| e == 0.0));
    assert!(italy.is_empty());
    assert!(italy.dates.is_empty());

    assert_eq!(
        result.region("Diamond Princess").unwrap_err(),
        RtError::UnknownRegion { region: "Diamond Princess".to_string() }
    );
}

#[test]
// Purpose
// -------
// Verify that the alignment option only moves the date labels.
//
// Given
// -----
// - The ingested table computed with `ReportDate` and `IntervalStart`.
//
// Expect
// ------
// - Identical starts and means; labels shifted back by exactly one day.
fn alignment_shifts_labels_only() {
    let table = ingest();
    let report = compute_dynamic_r(&table, &RtOptions::default()).unwrap();
    let start_opts = RtOptions::new(None, None, Some(DateAlignment::IntervalStart)).unwrap();
    let start = compute_dynamic_r(&table, &start_opts).unwrap();

    let a = report.region("France").unwrap();
    let b = start.region("France").unwrap();
    assert_eq!(a.windows, b.windows);
    assert_eq!(b.dates, vec![march(4), march(5)]);
}

#[test]
// Purpose
// -------
// Confirm recomputation from identical input is bit-identical.
//
// Given
// -----
// - A noisier table with growth, a plateau, and a downward revision.
//
// Expect
// ------
// - Two independent computations compare equal, including float bits.
// - Structural properties hold: non-negative epicurve, strictly
//   increasing starts within `[first_start, N - w]`, finite means.
fn recomputation_is_deterministic() {
    let dates: Vec<NaiveDate> = march(1).iter_days().take(12).collect();
    let table = CaseTable::from_rows(
        vec!["Noisy".to_string()],
        dates,
        vec![vec![1.0, 3.0, 3.0, 8.0, 15.0, 14.0, 20.0, 31.0, 31.0, 40.0, 52.0, 60.0]],
    )
    .unwrap();
    let opts = RtOptions::default();

    let first = compute_dynamic_r(&table, &opts).unwrap();
    let second = compute_dynamic_r(&table, &opts).unwrap();
    assert_eq!(first, second);

    let a = first.region("Noisy").unwrap();
    let b = second.region("Noisy").unwrap();
    let bits = |xs: &[f64]| xs.iter().map(|x| x.to_bits()).collect::<Vec<_>>();
    assert_eq!(bits(a.mean_r()), bits(b.mean_r()));

    let e = epicurve(table.counts().row(0));
    assert!(e.iter().all(|&v| v >= 0.0));
    let first_start = first_window_start(e.view());
    let last_start = e.len() - opts.window_size;
    assert!(a.windows.starts.windows(2).all(|pair| pair[0] < pair[1]));
    assert!(a.windows.starts.iter().all(|&t| t >= first_start && t <= last_start));
    assert!(a.mean_r().iter().all(|r| r.is_finite()));
}

#[test]
// Purpose
// -------
// Drive the snapshot store through successful and failing refreshes.
//
// Given
// -----
// - A scripted feed returning the ingested table, then an error.
//
// Expect
// ------
// - Version 1 after the first refresh; `FetchFailed` on the second with
//   version 1 still served; a reader's earlier `Arc` is unaffected.
fn store_refresh_publishes_and_survives_feed_errors() {
    let store = DynamicRStore::new(RtOptions::default());
    let mut feed = ScriptedFeed {
        responses: VecDeque::from(vec![Ok(ingest()), Err(anyhow::anyhow!("connection reset"))]),
    };

    assert_eq!(store.load().version, 0);
    assert_eq!(store.refresh(&mut feed).unwrap(), 1);
    let held = store.load();

    let err = store.refresh(&mut feed).unwrap_err();
    assert!(matches!(err, RtError::FetchFailed { ref reason } if reason.contains("connection reset")));
    assert_eq!(store.load().version, 1);
    assert_eq!(held.result.region("France").unwrap().windows.starts, vec![3, 4]);
}

#[test]
// Purpose
// -------
// Summaries over a published snapshot.
//
// Given
// -----
// - The ingested table; reference date 2020-03-05.
//
// Expect
// ------
// - France: one window on each side of the reference, no SEM on either.
// - Italy: both sides empty.
// - Only France appears in the per-region averages, with a mean equal to
//   the average of its two windows.
fn summaries_over_published_snapshot() {
    let store = DynamicRStore::default();
    let mut feed = || -> anyhow::Result<CaseTable> { Ok(ingest()) };
    store.refresh(&mut feed).unwrap();
    let snapshot = store.load();

    let cmp = compare_regions(&snapshot.result, &["France", "Italy"], march(5)).unwrap();
    let france = &cmp[0].1;
    assert_eq!(france.before.unwrap().count, 1);
    assert_eq!(france.after.unwrap().count, 1);
    assert!(france.before.unwrap().sem.is_none());
    assert!(cmp[1].1.before.is_none() && cmp[1].1.after.is_none());

    let averages = average_r(&snapshot.result);
    assert_eq!(averages.len(), 1);
    let means = snapshot.result.region("France").unwrap().mean_r();
    assert_relative_eq!(averages[0].1, (means[0] + means[1]) / 2.0, epsilon = 1e-12);
}
