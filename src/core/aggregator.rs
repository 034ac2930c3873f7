use crate::domain::model::{
    Activity, ActivityTotal, ActivitySnapshot, GoalProgress, GoalSummary, Goals, Period,
};
use chrono::{DateTime, Datelike, Duration, TimeZone};

pub const RUN: &str = "Run";

pub fn round1(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}

/// Monday 00:00 of the week containing `now`, in `now`'s timezone.
pub fn week_start<Tz: TimeZone>(now: &DateTime<Tz>) -> DateTime<Tz> {
    let days_since_monday = i64::from(now.weekday().num_days_from_monday());
    let monday = now.date_naive() - Duration::days(days_since_monday);
    let Some(midnight) = monday.and_hms_opt(0, 0, 0) else {
        return now.clone();
    };
    now.timezone()
        .from_local_datetime(&midnight)
        .earliest()
        .unwrap_or_else(|| now.clone())
}

/// Total distance in km of the activities of the given type.
pub fn sum_distance_km(activities: &[Activity], activity_type: &str) -> f64 {
    activities
        .iter()
        .filter(|a| a.activity_type == activity_type)
        .map(|a| a.distance)
        .sum::<f64>()
        / 1000.0
}

pub fn progress(total: ActivityTotal, goal_km: f64) -> GoalProgress {
    let distance_km = round1(total.distance_km);
    let percent = if goal_km > 0.0 {
        round1(total.distance_km / goal_km * 100.0)
    } else {
        0.0
    };
    GoalProgress {
        period: total.period,
        distance_km,
        goal_km,
        percent,
        remaining_km: round1((goal_km - total.distance_km).max(0.0)),
        achieved: total.distance_km >= goal_km,
    }
}

pub fn summarize(snapshot: &ActivitySnapshot, goals: &Goals) -> GoalSummary {
    GoalSummary {
        weekly: progress(snapshot.week, goals.weekly),
        yearly: progress(snapshot.year, goals.yearly),
    }
}

/// Builds the snapshot from this week's activities and the year-to-date run distance in metres.
pub fn snapshot(week_activities: &[Activity], ytd_run_metres: f64) -> ActivitySnapshot {
    ActivitySnapshot {
        week: ActivityTotal {
            period: Period::Week,
            distance_km: sum_distance_km(week_activities, RUN),
        },
        year: ActivityTotal {
            period: Period::Year,
            distance_km: ytd_run_metres / 1000.0,
        },
        runs_this_week: week_activities
            .iter()
            .filter(|a| a.activity_type == RUN)
            .count(),
    }
}
