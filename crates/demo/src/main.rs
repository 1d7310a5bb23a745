// File: crates/demo/src/main.rs
// Summary: Demo loads a time/value CSV, bucketizes it, and prints the heatmap grid as text.

use anyhow::{Context, Result};
use heatmap_core::{
    bucketize, BucketData, BucketizeOptions, DailyInterval, Field, FieldOptions, Frame, TimeRange,
    ZoneSpec,
};
use std::path::Path;

fn main() -> Result<()> {
    // Usage: heatmap-demo [file.csv] [zone] [group-by-minutes] [aggregation] [from-hour] [to-hour]
    let args: Vec<String> = std::env::args().collect();
    let path = args.get(1).map(String::as_str).unwrap_or("sample.csv");
    let zone: ZoneSpec = args.get(2).map(String::as_str).unwrap_or("utc").parse()?;
    let group_by: u32 = args
        .get(3)
        .map(String::as_str)
        .unwrap_or("60")
        .parse()
        .context("group-by must be a number of minutes")?;
    let calculation = args.get(4).map(String::as_str).unwrap_or("avg").parse()?;
    let daily_interval = DailyInterval::parse(
        args.get(5).map(String::as_str).unwrap_or("0"),
        args.get(6).map(String::as_str).unwrap_or("0"),
    )?;

    let path = Path::new(path);
    let (times, values) = load_time_value_csv(path)
        .with_context(|| format!("failed to load CSV '{}'", path.display()))?;
    println!("Using input file: {}", path.display());
    println!("Loaded {} rows", times.len());

    if times.is_empty() {
        anyhow::bail!("no rows loaded - check headers/delimiter.");
    }

    // Query the whole span of the file.
    let from = *times.iter().min().unwrap_or(&0);
    let to = *times.iter().max().unwrap_or(&0);

    let frame = Frame::new(vec![
        Field::time("time", times),
        Field::number("value", values),
    ]);
    let options = BucketizeOptions::new(zone, TimeRange::new(from, to))
        .with_daily_interval(daily_interval)
        .with_field(FieldOptions {
            calculation,
            group_by,
            min: None,
            max: None,
        });

    let data = bucketize(&frame, &options)?;
    println!(
        "{} buckets/day over {} days, {} cells, domain [{}, {}]",
        data.num_buckets,
        zone.days_between(from, to) + 1,
        data.points.len(),
        fmt_bound(data.min),
        fmt_bound(data.max),
    );

    print_grid(&data, zone, group_by);
    Ok(())
}

/// Render the sparse cells day by day, one shade character per bucket row.
fn print_grid(data: &BucketData, zone: ZoneSpec, group_by: u32) {
    const SHADES: &[u8] = b" .:-=+*#%@";

    let span = match (data.min, data.max) {
        (Some(min), Some(max)) if max > min => max - min,
        _ => 0.0,
    };
    let shade = |value: Option<f64>| -> char {
        match (value, data.min) {
            (Some(v), Some(min)) => {
                let t = if span > 0.0 { ((v - min) / span).clamp(0.0, 1.0) } else { 1.0 };
                let idx = (t * (SHADES.len() - 1) as f64).round() as usize;
                SHADES[idx] as char
            }
            _ => ' ',
        }
    };

    let mut current_day = None;
    let mut row = vec![' '; data.num_buckets];
    for point in &data.points {
        if current_day != Some(point.day_millis) {
            if let Some(day) = current_day {
                println!("{} |{}|", zone.format_date(day), row.iter().collect::<String>());
                row.fill(' ');
            }
            current_day = Some(point.day_millis);
        }
        let bucket = (zone.minute_of_day(point.bucket_start_millis) / group_by) as usize;
        if bucket < row.len() {
            row[bucket] = shade(point.value);
        }
    }
    if let Some(day) = current_day {
        println!("{} |{}|", zone.format_date(day), row.iter().collect::<String>());
    }
}

fn fmt_bound(bound: Option<f64>) -> String {
    bound.map_or_else(|| "-".to_string(), |v| format!("{v:.3}"))
}

/// Load a CSV with a time column and a value column into parallel vectors.
fn load_time_value_csv(path: &Path) -> Result<(Vec<i64>, Vec<Option<f64>>)> {
    let mut rdr = csv::ReaderBuilder::new()
        .has_headers(true)
        .from_path(path)
        .with_context(|| format!("opening {}", path.display()))?;

    let headers = rdr
        .headers()?
        .iter()
        .map(|h| h.to_lowercase())
        .collect::<Vec<_>>();

    let idx = |names: &[&str]| -> Option<usize> {
        for (i, h) in headers.iter().enumerate() {
            for want in names {
                if h == want {
                    return Some(i);
                }
            }
        }
        None
    };

    let i_time = idx(&["time", "timestamp", "date", "datetime"])
        .context("no time column found (time/timestamp/date/datetime)")?;
    let i_value = idx(&["value", "val", "v", "count", "metric"])
        .context("no value column found (value/val/v/count/metric)")?;

    let mut times = Vec::new();
    let mut values = Vec::new();
    for rec in rdr.records() {
        let rec = rec?;
        let Some(t) = rec.get(i_time).and_then(parse_time_to_millis) else {
            continue;
        };
        times.push(t);
        values.push(rec.get(i_value).and_then(|s| s.trim().parse::<f64>().ok()));
    }
    Ok((times, values))
}

/// Accept epoch seconds or milliseconds; anything else is skipped.
fn parse_time_to_millis(s: &str) -> Option<i64> {
    let s = s.trim();
    if s.is_empty() {
        return None;
    }
    let n = s.parse::<i64>().ok()?;
    if n > 10_i64.pow(12) {
        return Some(n); // already millis
    }
    if n > 10_i64.pow(9) {
        return Some(n * 1000); // epoch seconds
    }
    Some(n)
}
