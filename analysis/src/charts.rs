//! Renderer-independent chart data: histogram bins, the polarity timeline
//! and gauge geometry.

use chrono::{DateTime, Utc};
use commentscope_core::CommentRecord;

pub const HISTOGRAM_BINS: usize = 20;

/// Degrees of arc per score point (100 points fill the circle).
pub const DEGREES_PER_POINT: f64 = 3.6;

#[derive(Debug, Clone, PartialEq)]
pub struct HistogramBin {
    pub start: f64,
    pub end: f64,
    pub count: usize,
}

/// Equal-width bins spanning the observed polarity range.
///
/// Every bin is half-open except the last, which also holds the maximum.
/// When all values are equal the range is widened to `value ± 0.5`.
pub fn polarity_histogram(records: &[CommentRecord], bins: usize) -> Vec<HistogramBin> {
    if records.is_empty() || bins == 0 {
        return Vec::new();
    }

    let (mut min, mut max) = records
        .iter()
        .map(|record| record.polarity)
        .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), v| {
            (lo.min(v), hi.max(v))
        });
    if min == max {
        min -= 0.5;
        max += 0.5;
    }

    let width = (max - min) / bins as f64;
    let mut histogram: Vec<HistogramBin> = (0..bins)
        .map(|i| HistogramBin {
            start: min + width * i as f64,
            end: if i + 1 == bins {
                max
            } else {
                min + width * (i + 1) as f64
            },
            count: 0,
        })
        .collect();

    for record in records {
        let index = (((record.polarity - min) / width).floor() as usize).min(bins - 1);
        histogram[index].count += 1;
    }

    histogram
}

#[derive(Debug, Clone, PartialEq)]
pub struct TimelinePoint {
    pub published_at: DateTime<Utc>,
    pub polarity: f64,
}

/// Polarity per comment ordered by publish time; ties keep arrival order.
pub fn polarity_timeline(records: &[CommentRecord]) -> Vec<TimelinePoint> {
    let mut points: Vec<TimelinePoint> = records
        .iter()
        .map(|record| TimelinePoint {
            published_at: record.published_at,
            polarity: record.polarity,
        })
        .collect();
    points.sort_by_key(|point| point.published_at);
    points
}

#[derive(Debug, Clone, PartialEq)]
pub struct Gauge {
    pub score: f64,
    pub filled_degrees: f64,
    pub label: String,
}

impl Gauge {
    pub fn from_score(score: f64) -> Self {
        let clamped = score.clamp(0.0, 100.0);
        Self {
            score,
            filled_degrees: clamped * DEGREES_PER_POINT,
            label: format!("{:.1}%", score),
        }
    }

    pub fn remainder_degrees(&self) -> f64 {
        360.0 - self.filled_degrees
    }

    /// Outline of the filled wedge, starting and ending at the centre.
    pub fn filled_wedge(&self, center: (f64, f64), radius: f64) -> Vec<(f64, f64)> {
        wedge_points(center, radius, 0.0, self.filled_degrees)
    }

    /// Outline of the unfilled remainder of the circle.
    pub fn remainder_wedge(&self, center: (f64, f64), radius: f64) -> Vec<(f64, f64)> {
        wedge_points(center, radius, self.filled_degrees, 360.0)
    }
}

/// Polygon approximating a pie wedge, counter-clockwise from `start_deg`
/// (0° at three o'clock, y pointing up). Empty for a zero-width wedge.
pub fn wedge_points(
    center: (f64, f64),
    radius: f64,
    start_deg: f64,
    end_deg: f64,
) -> Vec<(f64, f64)> {
    let sweep = end_deg - start_deg;
    if sweep <= 0.0 {
        return Vec::new();
    }

    let steps = (sweep / 2.0).ceil().max(1.0) as usize;
    let mut points = Vec::with_capacity(steps + 3);
    points.push(center);
    for step in 0..=steps {
        let angle = (start_deg + sweep * step as f64 / steps as f64).to_radians();
        points.push((
            center.0 + radius * angle.cos(),
            center.1 + radius * angle.sin(),
        ));
    }
    points.push(center);
    points
}
