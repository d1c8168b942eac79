use chrono::{Days, NaiveDate};
use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use vertrs::{
    aggregate_logs_by_date, analyze_jump_ability, assess_strength_structure, calculate_jump_progress,
    calculate_streak_stats, diagnose, Profile, WorkoutLogRecord,
};

/// Performance benchmarks for the analytics core
///
/// Log-based calculations are measured over growing histories to confirm
/// they stay linear (or n log n for the sorting steps).

fn create_benchmark_profile() -> Profile {
    Profile {
        height_cm: Some(182.0),
        weight_kg: Some(78.0),
        standing_reach_cm: Some(238.0),
        max_touch_height_cm: Some(292.0),
        target_touch_height_cm: Some(315.0),
        bench_press_kg: Some(90.0),
        squat_kg: Some(140.0),
        deadlift_kg: Some(170.0),
    }
}

fn create_log_history(days: u64) -> Vec<WorkoutLogRecord> {
    let end = NaiveDate::from_ymd_opt(2024, 12, 31).unwrap();
    let statuses = ["completed", "partial", "skipped"];
    let moods = ["great", "good", "tired", "sore"];

    (0..days)
        .flat_map(|n| {
            let date = end.checked_sub_days(Days::new(n)).unwrap().to_string();
            (0..(n % 3)).map(move |i| WorkoutLogRecord {
                date: date.clone(),
                status: Some(statuses[((n + i) % 3) as usize].to_string()),
                mood: Some(moods[((n * 7 + i) % 4) as usize].to_string()),
                duration_minutes: Some(30 + ((n * 13 + i) % 60) as u32),
            })
        })
        .collect()
}

fn bench_scoring(c: &mut Criterion) {
    let profile = create_benchmark_profile();

    c.bench_function("analyze_jump_ability", |b| {
        b.iter(|| analyze_jump_ability(black_box(&profile)))
    });
    c.bench_function("assess_strength_structure", |b| {
        b.iter(|| assess_strength_structure(black_box(&profile)))
    });

    let jump = analyze_jump_ability(&profile);
    let strength = assess_strength_structure(&profile);
    c.bench_function("diagnose", |b| {
        b.iter(|| diagnose(black_box(&jump), black_box(&strength)))
    });
}

fn bench_log_analytics(c: &mut Criterion) {
    let profile = create_benchmark_profile();
    let today = NaiveDate::from_ymd_opt(2024, 12, 31).unwrap();

    let mut group = c.benchmark_group("Log Analytics");

    for &days in &[7u64, 30, 90, 365] {
        let logs = create_log_history(days);
        group.throughput(Throughput::Elements(logs.len() as u64));

        group.bench_with_input(BenchmarkId::new("streak_stats", days), &logs, |b, logs| {
            b.iter(|| calculate_streak_stats(black_box(logs), today))
        });
        group.bench_with_input(BenchmarkId::new("calendar", days), &logs, |b, logs| {
            b.iter(|| aggregate_logs_by_date(black_box(logs)))
        });
        group.bench_with_input(BenchmarkId::new("progress", days), &logs, |b, logs| {
            b.iter(|| calculate_jump_progress(&profile, black_box(logs)))
        });
    }

    group.finish();
}

criterion_group!(benches, bench_scoring, bench_log_analytics);
criterion_main!(benches);
