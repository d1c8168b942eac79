//! Per-day aggregation of workout logs
//!
//! Days appear in the order they are first seen in the input. Status and
//! mood tallies are kept in insertion order so ties resolve to the value
//! encountered first.

use chrono::{Days, NaiveDate};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use tracing::debug;

use crate::error::InputError;
use crate::models::{WorkoutLogRecord, DATE_FORMAT};

/// Aggregated logs for one calendar day
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CalendarDaySummary {
    pub date: NaiveDate,
    pub log_count: u32,
    /// Most frequent status, first seen wins on ties
    pub status_summary: Option<String>,
    /// Unique moods in first-seen order, joined with ", "
    pub mood_summary: Option<String>,
    pub total_duration_minutes: u32,
}

impl CalendarDaySummary {
    /// Summary for a day with no logs
    pub fn empty(date: NaiveDate) -> Self {
        CalendarDaySummary {
            date,
            log_count: 0,
            status_summary: None,
            mood_summary: None,
            total_duration_minutes: 0,
        }
    }
}

/// Totals over a set of day summaries
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PeriodSummary {
    pub active_days: u32,
    pub total_logs: u32,
    pub total_duration_minutes: u32,
    /// Status that was the day summary on the most days
    pub most_common_status: Option<String>,
}

/// Insertion-ordered tally of string values
#[derive(Debug, Default)]
struct Tally {
    counts: Vec<(String, u32)>,
}

impl Tally {
    fn add(&mut self, value: &str) {
        match self.counts.iter_mut().find(|(key, _)| key == value) {
            Some((_, count)) => *count += 1,
            None => self.counts.push((value.to_string(), 1)),
        }
    }

    /// Highest count, earliest inserted on ties
    fn mode(&self) -> Option<String> {
        let mut best: Option<&(String, u32)> = None;
        for entry in &self.counts {
            if best.map_or(true, |(_, count)| entry.1 > *count) {
                best = Some(entry);
            }
        }
        best.map(|(key, _)| key.clone())
    }

    fn joined(&self) -> Option<String> {
        if self.counts.is_empty() {
            return None;
        }
        let keys: Vec<&str> = self.counts.iter().map(|(key, _)| key.as_str()).collect();
        Some(keys.join(", "))
    }
}

#[derive(Debug)]
struct DayAccumulator {
    date: NaiveDate,
    log_count: u32,
    total_duration_minutes: u32,
    statuses: Tally,
    moods: Tally,
}

impl DayAccumulator {
    fn new(date: NaiveDate) -> Self {
        DayAccumulator {
            date,
            log_count: 0,
            total_duration_minutes: 0,
            statuses: Tally::default(),
            moods: Tally::default(),
        }
    }

    fn add(&mut self, log: &WorkoutLogRecord) {
        self.log_count += 1;
        self.total_duration_minutes = self.total_duration_minutes.saturating_add(log.minutes());
        if let Some(status) = log.status.as_deref().filter(|s| !s.is_empty()) {
            self.statuses.add(status);
        }
        if let Some(mood) = log.mood.as_deref().filter(|m| !m.is_empty()) {
            self.moods.add(mood);
        }
    }

    fn finish(self) -> CalendarDaySummary {
        CalendarDaySummary {
            date: self.date,
            log_count: self.log_count,
            status_summary: self.statuses.mode(),
            mood_summary: self.moods.joined(),
            total_duration_minutes: self.total_duration_minutes,
        }
    }
}

/// Group logs by day, in first-occurrence order
pub fn aggregate_logs_by_date(
    logs: &[WorkoutLogRecord],
) -> Result<Vec<CalendarDaySummary>, InputError> {
    let mut days: Vec<DayAccumulator> = Vec::new();
    let mut index: HashMap<NaiveDate, usize> = HashMap::new();

    for log in logs {
        let date = log.log_date()?;
        let slot = *index.entry(date).or_insert_with(|| {
            days.push(DayAccumulator::new(date));
            days.len() - 1
        });
        days[slot].add(log);
    }

    debug!(logs = logs.len(), days = days.len(), "Logs aggregated by date");
    Ok(days.into_iter().map(DayAccumulator::finish).collect())
}

/// One summary per day in `[start, end]`, ascending, with empty days filled in.
///
/// Summaries outside the range are dropped.
pub fn fill_calendar_range(
    summaries: &[CalendarDaySummary],
    start: NaiveDate,
    end: NaiveDate,
) -> Result<Vec<CalendarDaySummary>, InputError> {
    if start > end {
        return Err(InputError::InvalidRange {
            start: start.format(DATE_FORMAT).to_string(),
            end: end.format(DATE_FORMAT).to_string(),
        });
    }

    let by_date: HashMap<NaiveDate, &CalendarDaySummary> =
        summaries.iter().map(|s| (s.date, s)).collect();

    let mut filled = Vec::new();
    let mut date = start;
    while date <= end {
        filled.push(
            by_date
                .get(&date)
                .map(|s| (*s).clone())
                .unwrap_or_else(|| CalendarDaySummary::empty(date)),
        );
        match date.checked_add_days(Days::new(1)) {
            Some(next) => date = next,
            None => break,
        }
    }
    Ok(filled)
}

/// Totals across day summaries
pub fn summarize_period(summaries: &[CalendarDaySummary]) -> PeriodSummary {
    let mut statuses = Tally::default();
    let mut summary = PeriodSummary::default();

    for day in summaries.iter().filter(|d| d.log_count > 0) {
        summary.active_days += 1;
        summary.total_logs += day.log_count;
        summary.total_duration_minutes = summary
            .total_duration_minutes
            .saturating_add(day.total_duration_minutes);
        if let Some(status) = &day.status_summary {
            statuses.add(status);
        }
    }
    summary.most_common_status = statuses.mode();
    summary
}
