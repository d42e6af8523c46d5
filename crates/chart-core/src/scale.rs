// File: crates/chart-core/src/scale.rs
// Summary: Time (X) and linear value (Y) scales with tick generation and tick labels.
// Notes:
// - Both scales map a domain interval onto a pixel range by linear interpolation.
// - A collapsed domain (d0 == d1) maps every value to the middle of the range.
// - Calendar arithmetic for time ticks is done in UTC.

use chrono::{DateTime, Datelike, NaiveDate, Timelike, Utc};

use crate::record::SurveyTime;

/// Common surface of the two scales, used by `Axis` to lay out ticks.
pub trait Scale {
    type Value: Copy;
    fn to_px(&self, v: Self::Value) -> f64;
    fn range(&self) -> (f64, f64);
    /// Suggested tick values for roughly `count` ticks, ascending.
    fn ticks(&self, count: usize) -> Vec<Self::Value>;
    /// Label for one tick produced by `ticks(count)`.
    fn tick_label(&self, v: Self::Value, count: usize) -> String;
}

#[inline]
fn interpolate(d0: f64, d1: f64, r0: f64, r1: f64, v: f64) -> f64 {
    let span = d1 - d0;
    let t = if span == 0.0 { 0.5 } else { (v - d0) / span };
    r0 + t * (r1 - r0)
}

#[inline]
fn uninterpolate(d0: f64, d1: f64, r0: f64, r1: f64, px: f64) -> f64 {
    let span = r1 - r0;
    let t = if span == 0.0 { 0.5 } else { (px - r0) / span };
    d0 + t * (d1 - d0)
}

// JavaScript-style rounding (half-up), so tick indices match the usual 1-2-5 ladder.
#[inline]
fn round_half_up(x: f64) -> f64 {
    (x + 0.5).floor()
}

const E10: f64 = 7.0710678118654755; // sqrt(50)
const E5: f64 = 3.1622776601683795; // sqrt(10)
const E2: f64 = std::f64::consts::SQRT_2;

/// `(i1, i2, inc)`; negative `inc` means the step is `1 / -inc`.
fn tick_spec(start: f64, stop: f64, count: f64) -> (f64, f64, f64) {
    let step = (stop - start) / count.max(0.0);
    let power = step.log10().floor();
    let error = step / 10f64.powf(power);
    let factor = if error >= E10 {
        10.0
    } else if error >= E5 {
        5.0
    } else if error >= E2 {
        2.0
    } else {
        1.0
    };
    let (mut i1, mut i2, inc);
    if power < 0.0 {
        let k = 10f64.powf(-power) / factor;
        i1 = round_half_up(start * k);
        i2 = round_half_up(stop * k);
        if i1 / k < start { i1 += 1.0; }
        if i2 / k > stop { i2 -= 1.0; }
        inc = -k;
    } else {
        let k = 10f64.powf(power) * factor;
        i1 = round_half_up(start / k);
        i2 = round_half_up(stop / k);
        if i1 * k < start { i1 += 1.0; }
        if i2 * k > stop { i2 -= 1.0; }
        inc = k;
    }
    if i2 < i1 && (0.5..2.0).contains(&count) {
        return tick_spec(start, stop, count * 2.0);
    }
    (i1, i2, inc)
}

/// Nice ticks covering `[start, stop]` (ascending input).
pub fn nice_ticks(start: f64, stop: f64, count: usize) -> Vec<f64> {
    if count == 0 || !start.is_finite() || !stop.is_finite() {
        return Vec::new();
    }
    if start == stop {
        return vec![start];
    }
    let (lo, hi, reverse) = if stop < start { (stop, start, true) } else { (start, stop, false) };
    let (i1, i2, inc) = tick_spec(lo, hi, count as f64);
    if !(i2 >= i1) {
        return Vec::new();
    }
    let n = (i2 - i1 + 1.0) as usize;
    let mut out: Vec<f64> = (0..n)
        .map(|i| {
            let k = i1 + i as f64;
            if inc < 0.0 { k / -inc } else { k * inc }
        })
        .collect();
    if reverse { out.reverse(); }
    out
}

/// Absolute tick step for `[start, stop]` split into about `count` intervals.
pub fn tick_step(start: f64, stop: f64, count: usize) -> f64 {
    let (lo, hi) = if stop < start { (stop, start) } else { (start, stop) };
    let (_, _, inc) = tick_spec(lo, hi, count as f64);
    if inc < 0.0 { 1.0 / -inc } else { inc }
}

/// Fixed-point formatting with thousands separators; negatives use U+2212.
pub fn format_grouped(v: f64, decimals: usize) -> String {
    let body = format!("{:.*}", decimals, v.abs());
    let (int_part, frac_part) = match body.split_once('.') {
        Some((i, f)) => (i, Some(f)),
        None => (body.as_str(), None),
    };
    let mut grouped = String::with_capacity(body.len() + int_part.len() / 3);
    for (i, ch) in int_part.chars().enumerate() {
        if i > 0 && (int_part.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }
    if let Some(f) = frac_part {
        grouped.push('.');
        grouped.push_str(f);
    }
    let is_zero = body.chars().all(|c| c == '0' || c == '.');
    if v < 0.0 && !is_zero {
        format!("\u{2212}{grouped}")
    } else {
        grouped
    }
}

/// Vertical value scale mapping `[d0, d1]` to `[r0, r1]` pixels.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct LinearScale {
    pub domain: (f64, f64),
    pub range: (f64, f64),
}

impl LinearScale {
    pub fn new(range: (f64, f64)) -> Self {
        Self { domain: (0.0, 1.0), range }
    }
    pub fn set_domain(&mut self, d0: f64, d1: f64) {
        self.domain = (d0, d1);
    }
    #[inline]
    pub fn from_px(&self, px: f64) -> f64 {
        uninterpolate(self.domain.0, self.domain.1, self.range.0, self.range.1, px)
    }
}

impl Scale for LinearScale {
    type Value = f64;

    #[inline]
    fn to_px(&self, v: f64) -> f64 {
        interpolate(self.domain.0, self.domain.1, self.range.0, self.range.1, v)
    }
    fn range(&self) -> (f64, f64) { self.range }

    fn ticks(&self, count: usize) -> Vec<f64> {
        nice_ticks(self.domain.0, self.domain.1, count)
    }

    fn tick_label(&self, v: f64, count: usize) -> String {
        let step = tick_step(self.domain.0, self.domain.1, count.max(1));
        let decimals = if step.is_finite() && step > 0.0 {
            (-step.log10().floor()).max(0.0) as usize
        } else {
            0
        };
        format_grouped(v, decimals)
    }
}

const MS_SECOND: i64 = 1_000;
const MS_MINUTE: i64 = 60 * MS_SECOND;
const MS_HOUR: i64 = 60 * MS_MINUTE;
const MS_DAY: i64 = 24 * MS_HOUR;
const MS_WEEK: i64 = 7 * MS_DAY;
const MS_MONTH: i64 = 30 * MS_DAY;
const MS_YEAR: i64 = 365 * MS_DAY;

/// Calendar interval used to place time ticks.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TimeInterval {
    /// Multiples of `n` milliseconds since the epoch.
    Millis(i64),
    /// Multiples of a fixed-length unit (second/minute/hour), `step` units apart.
    Fixed { unit_ms: i64, step: i64 },
    /// Midnights whose day-of-month minus one is divisible by `step`.
    Day(u32),
    /// Sunday midnights.
    Week,
    /// First of month where the zero-based month is divisible by `step`.
    Month(u32),
    /// January 1st of years divisible by `step`.
    Year(i32),
}

const TICK_INTERVALS: [(TimeInterval, i64); 18] = [
    (TimeInterval::Fixed { unit_ms: MS_SECOND, step: 1 }, MS_SECOND),
    (TimeInterval::Fixed { unit_ms: MS_SECOND, step: 5 }, 5 * MS_SECOND),
    (TimeInterval::Fixed { unit_ms: MS_SECOND, step: 15 }, 15 * MS_SECOND),
    (TimeInterval::Fixed { unit_ms: MS_SECOND, step: 30 }, 30 * MS_SECOND),
    (TimeInterval::Fixed { unit_ms: MS_MINUTE, step: 1 }, MS_MINUTE),
    (TimeInterval::Fixed { unit_ms: MS_MINUTE, step: 5 }, 5 * MS_MINUTE),
    (TimeInterval::Fixed { unit_ms: MS_MINUTE, step: 15 }, 15 * MS_MINUTE),
    (TimeInterval::Fixed { unit_ms: MS_MINUTE, step: 30 }, 30 * MS_MINUTE),
    (TimeInterval::Fixed { unit_ms: MS_HOUR, step: 1 }, MS_HOUR),
    (TimeInterval::Fixed { unit_ms: MS_HOUR, step: 3 }, 3 * MS_HOUR),
    (TimeInterval::Fixed { unit_ms: MS_HOUR, step: 6 }, 6 * MS_HOUR),
    (TimeInterval::Fixed { unit_ms: MS_HOUR, step: 12 }, 12 * MS_HOUR),
    (TimeInterval::Day(1), MS_DAY),
    (TimeInterval::Day(2), 2 * MS_DAY),
    (TimeInterval::Week, MS_WEEK),
    (TimeInterval::Month(1), MS_MONTH),
    (TimeInterval::Month(3), 3 * MS_MONTH),
    (TimeInterval::Year(1), MS_YEAR),
];

impl TimeInterval {
    /// Pick the interval whose duration is closest to `(stop - start) / count`.
    /// `None` when no positive step exists (e.g. a collapsed domain).
    pub fn for_span(start: i64, stop: i64, count: usize) -> Option<Self> {
        if count == 0 || start == stop {
            return None;
        }
        let target = stop.abs_diff(start) as f64 / count as f64;
        let i = TICK_INTERVALS.partition_point(|&(_, d)| (d as f64) <= target);
        if i == TICK_INTERVALS.len() {
            let years = tick_step(start as f64 / MS_YEAR as f64, stop as f64 / MS_YEAR as f64, count);
            let k = years.floor();
            return (k.is_finite() && k >= 1.0).then_some(TimeInterval::Year(k as i32));
        }
        if i == 0 {
            let k = tick_step(start as f64, stop as f64, count).max(1.0).floor();
            return k.is_finite().then_some(TimeInterval::Millis(k as i64));
        }
        let (below, below_ms) = TICK_INTERVALS[i - 1];
        let (above, above_ms) = TICK_INTERVALS[i];
        if target / (below_ms as f64) < (above_ms as f64) / target {
            Some(below)
        } else {
            Some(above)
        }
    }

    /// Interval boundaries within `[start, stop]`, ascending.
    pub fn range(self, start: i64, stop: i64) -> Vec<i64> {
        if stop < start {
            return Vec::new();
        }
        match self {
            TimeInterval::Millis(k) => multiples(start, stop, k.max(1)),
            TimeInterval::Fixed { unit_ms, step } => multiples(start, stop, unit_ms * step.max(1)),
            TimeInterval::Day(k) => calendar_days(start, stop)
                .into_iter()
                .filter(|d| (d.day() - 1) % k.max(1) == 0)
                .map(midnight_ms)
                .collect(),
            TimeInterval::Week => calendar_days(start, stop)
                .into_iter()
                .filter(|d| d.weekday().num_days_from_sunday() == 0)
                .map(midnight_ms)
                .collect(),
            TimeInterval::Month(k) => month_starts(start, stop)
                .into_iter()
                .filter(|d| d.month0() % k.max(1) == 0)
                .map(midnight_ms)
                .collect(),
            TimeInterval::Year(k) => year_starts(start, stop)
                .into_iter()
                .filter(|d| d.year().rem_euclid(k.max(1)) == 0)
                .map(midnight_ms)
                .collect(),
        }
    }
}

// Stops at the edge of the i64 range instead of wrapping.
fn multiples(start: i64, stop: i64, k: i64) -> Vec<i64> {
    let mut out = Vec::new();
    let floor = start.div_euclid(k).checked_mul(k);
    let first = match floor {
        Some(f) if f == start => Some(f),
        Some(f) => f.checked_add(k),
        None => None,
    };
    let mut next = first;
    while let Some(t) = next {
        if t > stop { break; }
        out.push(t);
        next = t.checked_add(k);
    }
    out
}

fn to_utc(ms: i64) -> Option<DateTime<Utc>> {
    DateTime::from_timestamp_millis(ms)
}

fn midnight_ms(d: NaiveDate) -> i64 {
    d.and_hms_opt(0, 0, 0).map(|dt| dt.and_utc().timestamp_millis()).unwrap_or(i64::MIN)
}

/// First calendar day whose midnight is at or after `ms`.
fn first_day_on_or_after(ms: i64) -> Option<NaiveDate> {
    let day = to_utc(ms)?.date_naive();
    if midnight_ms(day) < ms { day.succ_opt() } else { Some(day) }
}

fn calendar_days(start: i64, stop: i64) -> Vec<NaiveDate> {
    let mut out = Vec::new();
    let mut day = first_day_on_or_after(start);
    while let Some(d) = day {
        if midnight_ms(d) > stop { break; }
        out.push(d);
        day = d.succ_opt();
    }
    out
}

fn month_starts(start: i64, stop: i64) -> Vec<NaiveDate> {
    let mut out = Vec::new();
    let Some(first) = to_utc(start).map(|dt| dt.date_naive()) else { return out; };
    let (mut y, mut m) = (first.year(), first.month());
    loop {
        let Some(d) = NaiveDate::from_ymd_opt(y, m, 1) else { break; };
        let ms = midnight_ms(d);
        if ms > stop { break; }
        if ms >= start { out.push(d); }
        if m == 12 { y += 1; m = 1; } else { m += 1; }
    }
    out
}

fn year_starts(start: i64, stop: i64) -> Vec<NaiveDate> {
    let mut out = Vec::new();
    let Some(mut y) = to_utc(start).map(|dt| dt.year()) else { return out; };
    while let Some(d) = NaiveDate::from_ymd_opt(y, 1, 1) {
        let ms = midnight_ms(d);
        if ms > stop { break; }
        if ms >= start { out.push(d); }
        y += 1;
    }
    out
}

/// Multi-scale label: the coarsest unit the instant is not aligned to decides the format.
pub fn time_tick_label(t: SurveyTime) -> String {
    let Some(dt) = t.to_datetime() else { return t.as_millis().to_string(); };
    let fmt = if dt.timestamp_subsec_millis() != 0 {
        ".%3f"
    } else if dt.second() != 0 {
        ":%S"
    } else if dt.minute() != 0 {
        "%I:%M"
    } else if dt.hour() != 0 {
        "%I %p"
    } else if dt.day() != 1 {
        if dt.weekday().num_days_from_sunday() != 0 { "%a %d" } else { "%b %d" }
    } else if dt.month() != 1 {
        "%B"
    } else {
        "%Y"
    };
    dt.format(fmt).to_string()
}

/// Horizontal time scale mapping `[d0, d1]` survey times to `[r0, r1]` pixels.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TimeScale {
    pub domain: (SurveyTime, SurveyTime),
    pub range: (f64, f64),
}

impl TimeScale {
    pub fn new(range: (f64, f64)) -> Self {
        Self { domain: (SurveyTime::from_millis(0), SurveyTime::from_millis(MS_DAY)), range }
    }
    pub fn set_domain(&mut self, d0: SurveyTime, d1: SurveyTime) {
        self.domain = (d0, d1);
    }
    /// Pixel back to a survey time, rounded to the nearest millisecond.
    pub fn from_px(&self, px: f64) -> SurveyTime {
        let ms = uninterpolate(
            self.domain.0.as_millis() as f64,
            self.domain.1.as_millis() as f64,
            self.range.0,
            self.range.1,
            px,
        );
        SurveyTime::from_millis(ms.round() as i64)
    }
}

impl Scale for TimeScale {
    type Value = SurveyTime;

    #[inline]
    fn to_px(&self, v: SurveyTime) -> f64 {
        interpolate(
            self.domain.0.as_millis() as f64,
            self.domain.1.as_millis() as f64,
            self.range.0,
            self.range.1,
            v.as_millis() as f64,
        )
    }
    fn range(&self) -> (f64, f64) { self.range }

    fn ticks(&self, count: usize) -> Vec<SurveyTime> {
        let (a, b) = (self.domain.0.as_millis(), self.domain.1.as_millis());
        let (lo, hi) = if b < a { (b, a) } else { (a, b) };
        match TimeInterval::for_span(lo, hi, count) {
            Some(interval) => interval.range(lo, hi).into_iter().map(SurveyTime::from_millis).collect(),
            None => Vec::new(),
        }
    }

    fn tick_label(&self, v: SurveyTime, _count: usize) -> String {
        time_tick_label(v)
    }
}
