use chrono::{Duration, TimeZone, Utc};
use uuid::Uuid;

use shotlog::models::{Caliber, Exercise, PracticeSession, PracticeType, TargetType};
use shotlog::scoring::{
    self, improvement_percentage, performance_trend, recommendations, trend_from_values, Metric,
    SessionScore, Trend,
};

fn score(day: i64, accuracy: Option<f64>, score_percentage: Option<f64>) -> SessionScore {
    SessionScore {
        session_id: Uuid::now_v7(),
        session_date: Utc.with_ymd_and_hms(2026, 1, 1, 9, 0, 0).unwrap() + Duration::days(day),
        practice_type: PracticeType::Precision,
        shots_fired: if accuracy.is_some() { 50 } else { 0 },
        hits: accuracy.map(|a| (a / 2.0) as i64).unwrap_or(0),
        accuracy,
        score_percentage,
        consistency: accuracy.map(|_| 80.0),
    }
}

fn accuracy_series(values: &[f64]) -> Vec<SessionScore> {
    values
        .iter()
        .enumerate()
        .map(|(i, v)| score(i as i64, Some(*v), Some(*v)))
        .collect()
}

fn exercise(session_id: Uuid, shots: i32, hits: i32, score: i32, max_score: i32) -> Exercise {
    Exercise {
        id: Uuid::now_v7(),
        session_id,
        name: "Slow fire".to_string(),
        target_type: TargetType::Bullseye,
        caliber: Caliber::Rimfire22,
        distance_meters: 25.0,
        shots_fired: shots,
        hits,
        score,
        max_score,
        created_at: Utc::now(),
    }
}

// ── improvement_percentage ──────────────────────────────────────

#[test]
fn improvement_from_zero_baseline_is_zero() {
    assert_eq!(improvement_percentage(0.0, 50.0), 0.0);
}

#[test]
fn improvement_is_relative_to_old_value() {
    assert_eq!(improvement_percentage(50.0, 75.0), 50.0);
    assert_eq!(improvement_percentage(80.0, 60.0), -25.0);
    assert_eq!(improvement_percentage(40.0, 40.0), 0.0);
}

// ── performance_trend ───────────────────────────────────────────

#[test]
fn fewer_than_three_sessions_is_insufficient() {
    assert_eq!(performance_trend(&[], Metric::Accuracy), Trend::InsufficientData);
    assert_eq!(
        performance_trend(&accuracy_series(&[10.0, 99.0]), Metric::Accuracy),
        Trend::InsufficientData
    );
}

#[test]
fn strictly_rising_sessions_are_ascending() {
    let sessions = accuracy_series(&[60.0, 65.0, 72.0, 78.0, 85.0]);
    assert_eq!(performance_trend(&sessions, Metric::Accuracy), Trend::Ascending);
}

#[test]
fn falling_sessions_are_descending() {
    let sessions = accuracy_series(&[90.0, 88.0, 80.0, 75.0, 70.0]);
    assert_eq!(performance_trend(&sessions, Metric::Accuracy), Trend::Descending);
}

#[test]
fn small_movement_is_stable() {
    // halves average 70 and 74: delta 4 stays under the threshold
    let sessions = accuracy_series(&[69.0, 71.0, 73.0, 74.0, 75.0]);
    assert_eq!(performance_trend(&sessions, Metric::Accuracy), Trend::Stable);
}

#[test]
fn delta_of_exactly_five_is_stable() {
    // first half [70], second half [75, 75]
    assert_eq!(
        trend_from_values(&[Some(70.0), Some(75.0), Some(75.0)]),
        Trend::Stable
    );
    assert_eq!(
        trend_from_values(&[Some(75.0), Some(70.0), Some(70.0)]),
        Trend::Stable
    );
}

#[test]
fn only_the_last_five_sessions_count() {
    // old sessions are terrible, the recent window is flat
    let sessions = accuracy_series(&[5.0, 5.0, 5.0, 80.0, 80.0, 80.0, 80.0, 80.0]);
    assert_eq!(performance_trend(&sessions, Metric::Accuracy), Trend::Stable);
}

#[test]
fn first_half_takes_the_smaller_share() {
    // window of 5 splits 2 | 3: averages 50 and 60
    let values = [Some(50.0), Some(50.0), Some(60.0), Some(60.0), Some(60.0)];
    assert_eq!(trend_from_values(&values), Trend::Ascending);

    // window of 4 splits 2 | 2: averages 50 and 54
    let values = [Some(50.0), Some(50.0), Some(50.0), Some(58.0)];
    assert_eq!(trend_from_values(&values), Trend::Stable);
}

#[test]
fn missing_metric_counts_as_zero() {
    let values = [None, None, Some(20.0)];
    assert_eq!(trend_from_values(&values), Trend::Ascending);
}

#[test]
fn trend_uses_the_selected_metric() {
    let sessions = vec![
        score(0, Some(80.0), Some(40.0)),
        score(1, Some(80.0), Some(50.0)),
        score(2, Some(80.0), Some(60.0)),
    ];
    assert_eq!(performance_trend(&sessions, Metric::Accuracy), Trend::Stable);
    assert_eq!(performance_trend(&sessions, Metric::Score), Trend::Ascending);
}

#[test]
fn metric_parses_known_names_only() {
    assert_eq!("score".parse::<Metric>().unwrap(), Metric::Score);
    assert_eq!(" accuracy ".parse::<Metric>().unwrap(), Metric::Accuracy);
    let err = "groups".parse::<Metric>().unwrap_err();
    assert_eq!(err.kind, "metric");
    assert_eq!(err.value, "groups");
}

// ── recommendations ─────────────────────────────────────────────

#[test]
fn low_accuracy_and_low_consistency_fire_together() {
    let tips = recommendations(60.0, 50.0);
    assert_eq!(tips.len(), 4);
    assert_eq!(tips[..2], recommendations(60.0, 100.0)[..]);
}

#[test]
fn expert_accuracy_only_gets_advanced_tips() {
    let tips = recommendations(95.0, 80.0);
    assert_eq!(tips.len(), 2);
    assert!(tips.iter().all(|t| !recommendations(60.0, 80.0).contains(t)));
}

#[test]
fn middle_of_the_road_gets_nothing() {
    assert!(recommendations(80.0, 75.0).is_empty());
}

#[test]
fn thresholds_are_inclusive_where_expected() {
    assert!(recommendations(70.0, 60.0).is_empty());
    assert_eq!(recommendations(90.0, 60.0).len(), 2);
}

#[test]
fn expert_but_erratic_gets_both_groups_in_rule_order() {
    let tips = recommendations(92.0, 40.0);
    assert_eq!(tips.len(), 4);
    assert_eq!(tips[..2], recommendations(80.0, 40.0)[..]);
    assert_eq!(tips[2..], recommendations(92.0, 80.0)[..]);
}

// ── session aggregation ─────────────────────────────────────────

#[test]
fn consistency_is_spread_of_exercise_accuracy() {
    assert_eq!(scoring::consistency(&[]), None);
    assert_eq!(scoring::consistency(&[42.0]), Some(100.0));
    // population std dev of [60, 80] is 10
    assert_eq!(scoring::consistency(&[60.0, 80.0]), Some(90.0));
    assert_eq!(scoring::consistency(&[0.0, 100.0, 0.0, 100.0]), Some(50.0));
}

#[test]
fn session_score_sums_exercises() {
    let now = Utc::now();
    let session = PracticeSession {
        id: Uuid::now_v7(),
        user_id: Uuid::now_v7(),
        name: "Tuesday league".to_string(),
        practice_type: PracticeType::Competition,
        session_date: now,
        location: None,
        notes: None,
        created_at: now,
        updated_at: now,
    };
    let exercises = vec![
        exercise(session.id, 10, 6, 80, 100),
        exercise(session.id, 10, 8, 90, 100),
        exercise(session.id, 0, 0, 0, 0),
    ];

    let score = SessionScore::from_exercises(&session, &exercises);
    assert_eq!(score.shots_fired, 20);
    assert_eq!(score.hits, 14);
    assert_eq!(score.accuracy, Some(70.0));
    assert_eq!(score.score_percentage, Some(85.0));
    assert_eq!(score.consistency, Some(90.0));
    assert_eq!(score.practice_type, PracticeType::Competition);

    let empty = SessionScore::from_exercises(&session, &[]);
    assert_eq!(empty.accuracy, None);
    assert_eq!(empty.score_percentage, None);
    assert_eq!(empty.consistency, None);
}

#[test]
fn summary_over_history() {
    let sessions = accuracy_series(&[50.0, 55.0, 62.0, 70.0, 75.0]);
    let summary = scoring::summarize(&sessions);

    assert_eq!(summary.session_count, 5);
    assert_eq!(summary.total_shots, 250);
    assert_eq!(summary.accuracy_trend, Trend::Ascending);
    assert_eq!(summary.score_trend, Trend::Ascending);
    assert_eq!(summary.improvement_percentage, 50.0);
    assert_eq!(summary.average_consistency, Some(80.0));
    assert!(!summary.recommendations.is_empty());
}

#[test]
fn summary_without_shots_has_no_advice() {
    let summary = scoring::summarize(&[score(0, None, None)]);
    assert_eq!(summary.overall_accuracy, None);
    assert_eq!(summary.accuracy_trend, Trend::InsufficientData);
    assert_eq!(summary.improvement_percentage, 0.0);
    assert!(summary.recommendations.is_empty());
}
