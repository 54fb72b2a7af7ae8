//! Shared helpers for integration tests.

#![allow(dead_code)]

use class_timetable::models::{
    Availability, ClassGroup, DayPart, Room, ScheduleConfig, Subject, Teacher, TimeGrid, Weekday,
};
use rand::rngs::SmallRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use tracing_subscriber::{fmt, EnvFilter};

/// Installs a test-writer subscriber once. `RUST_LOG` overrides the level.
pub fn init_logging() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("debug"));
    let _ = fmt().with_env_filter(filter).with_test_writer().try_init();
}

pub fn seeded(seed: u64) -> SmallRng {
    SmallRng::seed_from_u64(seed)
}

/// A randomly generated, valid timetabling problem.
pub struct Problem {
    pub config: ScheduleConfig,
    pub classes: Vec<ClassGroup>,
    pub teachers: Vec<Teacher>,
    pub rooms: Vec<Room>,
}

const SUBJECTS: [&str; 8] = [
    "Math", "Chinese", "English", "Physics", "Art", "Music", "PE", "History",
];

/// Builds a problem from `seed`. Roughly half the problems model rooms.
pub fn random_problem(seed: u64) -> Problem {
    let mut rng = seeded(seed);

    let grid = TimeGrid::new(
        rng.random_range(2..=5),
        rng.random_range(1..=4),
        rng.random_range(0..=2),
    );
    let daily = grid.daily_periods;
    let last_day = Weekday::ALL[rng.random_range(2..6)];
    let config = ScheduleConfig::new(format!("sweep-{seed}"))
        .with_week_ending(last_day)
        .with_time_grid(grid);

    let class_count = rng.random_range(2..=5);
    let classes = (0..class_count)
        .map(|i| {
            let mut names = SUBJECTS.to_vec();
            names.shuffle(&mut rng);
            let subject_count = rng.random_range(2..=5);
            let mut class = ClassGroup::new(format!("C{i}"))
                .with_name(format!("Class {i}"))
                .with_student_count(rng.random_range(20..=40));
            for name in names.into_iter().take(subject_count) {
                let mut subject = Subject::new(name, rng.random_range(1..=5))
                    .with_max_per_day(rng.random_range(1..=3));
                if name == "PE" {
                    subject =
                        subject.with_allowed_day_parts([DayPart::Afternoon, DayPart::Evening]);
                }
                if name == "Physics" {
                    subject = subject.with_room_type("lab");
                }
                class = class.with_subject(subject);
            }
            class
        })
        .collect();

    let teacher_count = rng.random_range(2..=6);
    let teachers = (0..teacher_count)
        .map(|i| {
            let mut names = SUBJECTS.to_vec();
            names.shuffle(&mut rng);
            let mut teacher = Teacher::new(format!("T{i}"))
                .with_name(format!("Teacher {i}"))
                .with_limits(rng.random_range(2..=6), rng.random_range(8..=25));
            for name in names.into_iter().take(rng.random_range(1..=4)) {
                teacher = teacher.with_subject(name);
            }
            let mut availability = Availability::always();
            for _ in 0..rng.random_range(0..=4) {
                let day = Weekday::ALL[rng.random_range(0..5)];
                availability = availability.with_blocked(day, rng.random_range(1..=daily));
            }
            teacher.with_availability(availability)
        })
        .collect();

    let rooms = if rng.random_bool(0.5) {
        let mut rooms = vec![
            Room::new("LAB", "lab", 40),
            Room::new("R101", "classroom", 40),
            Room::new("R102", "classroom", 30),
        ];
        if rng.random_bool(0.5) {
            rooms.push(Room::new("R103", "classroom", 40).with_availability(
                Availability::always().with_open(Weekday::Monday, 1).with_open(Weekday::Tuesday, 1),
            ));
        }
        rooms
    } else {
        Vec::new()
    };

    Problem {
        config,
        classes,
        teachers,
        rooms,
    }
}
