//! Shared fixtures for the integration tests.

#![allow(dead_code)]

use bike_dashboard::data::RentalRecord;
use chrono::{Datelike, NaiveDate};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

pub fn date(year: i32, month: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, month, day).unwrap()
}

/// Season code the way the rental data assigns it by month.
fn season_for(date: NaiveDate) -> &'static str {
    match date.month() {
        3..=5 => "2",
        6..=8 => "3",
        9..=11 => "4",
        _ => "1",
    }
}

/// Deterministic pseudo-random hourly records covering `days` days from 2011-01-01.
pub fn random_records(seed: u64, days: u32) -> Vec<RentalRecord> {
    let mut rng = StdRng::seed_from_u64(seed);
    let start = date(2011, 1, 1);
    let mut records = Vec::new();

    for offset in 0..days {
        let day = start + chrono::Duration::days(i64::from(offset));
        let weekday = day.weekday().num_days_from_sunday() as i32;
        for hour in 0..24 {
            // Leave some hours out so the matrix has holes.
            if rng.random_range(0..10) == 0 {
                continue;
            }
            let casual = rng.random_range(0..60);
            let registered = rng.random_range(0..400);
            records.push(RentalRecord::new(
                day,
                hour,
                weekday,
                season_for(day),
                casual,
                registered,
            ));
        }
    }
    records
}

pub const HOURLY_CSV: &str = "\
instant,dteday,season,yr,mnth,hr,holiday,weekday,workingday,weathersit,temp,atemp,hum,windspeed,casual,registered,cnt
1,2011-01-01,1,0,1,0,0,6,0,1,0.24,0.2879,0.81,0,3,13,16
2,2011-01-01,1,0,1,1,0,6,0,1,0.22,0.2727,0.8,0,8,32,40
3,2011-01-01,1,0,1,2,0,6,0,1,0.22,0.2727,0.8,0,5,27,32
4,2011-01-02,1,0,1,0,0,0,0,2,0.46,0.4394,0.88,0.2985,4,13,17
5,2011-01-02,1,0,1,1,0,0,0,2,0.44,0.4394,0.94,0.2537,1,16,17
6,2011-01-03,1,0,1,0,0,1,1,1,0.22,0.197,0.44,0.3582,0,5,5
7,2011-01-03,1,0,1,5,0,1,1,1,0.2,0.1667,0.44,0.4179,0,2,2
8,not-a-date,1,0,1,5,0,1,1,1,0.2,0.1667,0.44,0.4179,0,2,2
9,2011-01-04,1,0,1,30,0,2,1,1,0.2,0.1667,0.44,0.4179,1,2,3
10,2011-01-04,1,0,1,8,0,2,1,1,0.2,0.1667,0.44,0.4179,10,20,99
";
