//! Calendar bucketing and schedule filters.
//!
//! A job occupies every day of `[scheduled_start_date, scheduled_end_date]`
//! (end defaults to start). All comparisons happen on whole days.

use crate::models::job::Job;
use crate::models::job_status::JobStatus;
use crate::utils::date::{last_day_of_month, next_month_bounds, week_end, week_start};
use chrono::{Datelike, NaiveDate};

/// Does the job's day interval overlap `date`?
pub fn occupies(job: &Job, date: NaiveDate) -> bool {
    match (job.scheduled_start_date, job.scheduled_end_or_start()) {
        (Some(start), Some(end)) => date <= end && date >= start,
        _ => false,
    }
}

pub fn jobs_on_date(jobs: &[Job], date: NaiveDate) -> Vec<&Job> {
    jobs.iter().filter(|j| occupies(j, date)).collect()
}

#[derive(Debug, Clone)]
pub struct CalendarDay<'a> {
    pub date: NaiveDate,
    /// false for the padding days of a month grid
    pub in_month: bool,
    pub jobs: Vec<&'a Job>,
}

fn bucket<'a>(jobs: &'a [Job], from: NaiveDate, to: NaiveDate, month: Option<u32>) -> Vec<CalendarDay<'a>> {
    from.iter_days()
        .take_while(|d| *d <= to)
        .map(|date| CalendarDay {
            date,
            in_month: month.is_none_or(|m| date.month() == m),
            jobs: jobs_on_date(jobs, date),
        })
        .collect()
}

/// Month grid: whole weeks (Sunday..Saturday) covering the month.
pub fn month_cells(jobs: &[Job], year: i32, month: u32) -> Vec<CalendarDay<'_>> {
    let (Some(first), Some(last)) = (NaiveDate::from_ymd_opt(year, month, 1), last_day_of_month(year, month)) else {
        return Vec::new();
    };
    bucket(jobs, week_start(first), week_end(last), Some(month))
}

/// The seven days of the week containing `date`.
pub fn week_cells(jobs: &[Job], date: NaiveDate) -> Vec<CalendarDay<'_>> {
    bucket(jobs, week_start(date), week_end(date), None)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SchedulePeriod {
    #[default]
    All,
    ThisWeek,
    ThisMonth,
    NextMonth,
}

impl SchedulePeriod {
    pub fn from_code(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().replace('-', "_").as_str() {
            "all" => Some(Self::All),
            "this_week" => Some(Self::ThisWeek),
            "this_month" => Some(Self::ThisMonth),
            "next_month" => Some(Self::NextMonth),
            _ => None,
        }
    }

    /// Inclusive window for the period, `None` when unconstrained.
    pub fn window(&self, today: NaiveDate) -> Option<(NaiveDate, NaiveDate)> {
        match self {
            Self::All => None,
            Self::ThisWeek => Some((today, week_end(today))),
            Self::ThisMonth => last_day_of_month(today.year(), today.month()).map(|end| (today, end)),
            Self::NextMonth => next_month_bounds(today),
        }
    }
}

/// Filters of the map/list views. `None` means "all".
#[derive(Debug, Clone, Default)]
pub struct JobFilter {
    pub statuses: Option<Vec<JobStatus>>,
    pub subcontractor_id: Option<String>,
    pub period: SchedulePeriod,
}

impl JobFilter {
    pub fn matches(&self, job: &Job, today: NaiveDate) -> bool {
        if let Some(statuses) = &self.statuses
            && !statuses.contains(&job.status)
        {
            return false;
        }

        if let Some(sub) = &self.subcontractor_id
            && job.subcontractor_id.as_deref() != Some(sub.as_str())
        {
            return false;
        }

        // jobs without a start date are never excluded by the period
        match (self.period.window(today), job.scheduled_start_date) {
            (Some((from, to)), Some(start)) => start >= from && start <= to,
            _ => true,
        }
    }
}

pub fn filter_jobs<'a>(jobs: &'a [Job], filter: &JobFilter, today: NaiveDate) -> Vec<&'a Job> {
    jobs.iter().filter(|j| filter.matches(j, today)).collect()
}

/// Jobs that can be pinned on a map: coordinates and a start date.
pub fn mappable_jobs<'a>(jobs: &[&'a Job]) -> Vec<&'a Job> {
    jobs.iter()
        .copied()
        .filter(|j| j.latitude.is_some() && j.longitude.is_some() && j.scheduled_start_date.is_some())
        .collect()
}
