//! Properties every dashboard view must hold over arbitrary rental data.

mod support;

use bike_dashboard::data::{records_to_frame, Dataset, DateRange, RentalRecord};
use bike_dashboard::stats::{Aggregator, DashboardViews};
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;
use support::{date, random_records};

fn sum_total(records: &[RentalRecord]) -> i64 {
    records.iter().map(|r| r.total_count).sum()
}

fn views_of(records: &[RentalRecord]) -> DashboardViews {
    DashboardViews::compute(&records_to_frame(records).unwrap()).unwrap()
}

#[test]
fn every_view_preserves_the_total() {
    let records = random_records(7, 40);
    let expected = sum_total(&records);
    let views = views_of(&records);

    assert_eq!(views.daily.iter().map(|d| d.total).sum::<i64>(), expected);
    assert_eq!(views.hourly.iter().map(|h| h.total).sum::<i64>(), expected);
    assert_eq!(views.weekday.iter().map(|w| w.total).sum::<i64>(), expected);
    assert_eq!(views.seasonal.iter().map(|s| s.total).sum::<i64>(), expected);
    assert_eq!(views.heatmap.total(), expected);
    assert_eq!(views.metrics.total_rentals, expected);
}

#[test]
fn user_split_adds_up_to_total() {
    let views = views_of(&random_records(11, 21));

    for day in &views.daily {
        assert_eq!(day.casual + day.registered, day.total);
    }
    let split: i64 = views
        .weekday_split
        .iter()
        .map(|w| w.casual + w.registered)
        .sum();
    assert_eq!(split, views.metrics.total_rentals);
}

#[test]
fn row_order_does_not_matter() {
    let records = random_records(3, 30);
    let mut shuffled = records.clone();
    shuffled.shuffle(&mut StdRng::seed_from_u64(99));

    assert_eq!(views_of(&records), views_of(&shuffled));
}

#[test]
fn outputs_are_sorted_by_key() {
    let mut records = random_records(5, 120);
    records.shuffle(&mut StdRng::seed_from_u64(1));
    let views = views_of(&records);

    assert!(views.daily.windows(2).all(|w| w[0].date < w[1].date));
    assert!(views.hourly.windows(2).all(|w| w[0].hour < w[1].hour));
    assert!(views.weekday.windows(2).all(|w| w[0].weekday < w[1].weekday));
    assert!(views.seasonal.windows(2).all(|w| w[0].season < w[1].season));
    assert_eq!(views.daily.len(), 120);
}

#[test]
fn full_range_filter_matches_unfiltered() {
    let dataset = Dataset::from_records(&random_records(21, 30)).unwrap();
    let bounds = dataset.date_bounds().unwrap();

    let unfiltered = DashboardViews::compute(dataset.frame()).unwrap();
    let filtered = DashboardViews::compute(&dataset.filter(&bounds).unwrap()).unwrap();
    assert_eq!(unfiltered, filtered);
}

#[test]
fn single_day_filter_yields_one_daily_row() {
    let records = random_records(8, 10);
    let dataset = Dataset::from_records(&records).unwrap();
    let day = date(2011, 1, 4);

    let views =
        DashboardViews::compute(&dataset.filter(&DateRange::single_day(day)).unwrap()).unwrap();
    assert_eq!(views.daily.len(), 1);
    assert_eq!(views.daily[0].date, day);

    let expected: i64 = records
        .iter()
        .filter(|r| r.date == day)
        .map(|r| r.total_count)
        .sum();
    assert_eq!(views.daily[0].total, expected);
    assert_eq!(views.weekday.len(), 1);
}

#[test]
fn range_outside_data_is_empty_not_an_error() {
    let dataset = Dataset::from_records(&random_records(2, 5)).unwrap();
    let range = DateRange::new(date(2015, 1, 1), date(2015, 2, 1));

    let views = DashboardViews::compute(&dataset.filter(&range).unwrap()).unwrap();
    assert!(views.is_empty());
    assert!(views.daily.is_empty());
    assert!(views.heatmap.is_empty());
    assert_eq!(views.metrics.total_rentals, 0);
}

#[test]
fn hourly_totals_group_by_hour() {
    let day = date(2011, 1, 1);
    let records = vec![
        RentalRecord::new(day, 0, 6, "1", 4, 6),
        RentalRecord::new(day, 0, 6, "1", 0, 5),
        RentalRecord::new(day, 1, 6, "1", 1, 2),
    ];
    let hourly = Aggregator::hourly_totals(&records_to_frame(&records).unwrap()).unwrap();

    let pairs: Vec<(i32, i64)> = hourly.iter().map(|h| (h.hour, h.total)).collect();
    assert_eq!(pairs, vec![(0, 15), (1, 3)]);
}

#[test]
fn matrix_cells_match_grouped_sums() {
    let records = random_records(13, 14);
    let views = views_of(&records);

    for weekday in 0..7 {
        for hour in 0..24 {
            let expected: i64 = records
                .iter()
                .filter(|r| r.weekday == weekday && r.hour == hour)
                .map(|r| r.total_count)
                .sum();
            let present = records
                .iter()
                .any(|r| r.weekday == weekday && r.hour == hour);
            let cell = views.heatmap.get(weekday, hour);
            if present {
                assert_eq!(cell, Some(expected));
            } else {
                assert_eq!(cell, None);
            }
        }
    }
}
