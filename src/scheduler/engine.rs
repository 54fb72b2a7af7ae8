//! Demand-centric randomized greedy assignment.
//!
//! # Algorithm
//!
//! 1. Validate the configuration and inputs (fatal on failure).
//! 2. Expand curricula into demands and generate the weekly slot sequence.
//! 3. Shuffle the demand order.
//! 4. For each demand, shuffle the qualified teachers, the slots, and the
//!    suitable rooms, then take the first (slot, teacher, room) that passes
//!    the day-part filter, the daily subject cap, availability, teacher
//!    caps, the hard-conflict check, and the rule engine.
//! 5. Demands with no passing combination are left unmet. There is no
//!    backtracking; a demand is visited once.
//!
//! The random source is the only source of variation. With a seeded RNG
//! two runs over identical input produce identical schedules and errors.
//!
//! # Complexity
//! O(d * s * t * r) rule-engine invocations in the worst case, where
//! d=demands, s=slots, t=qualified teachers, r=suitable rooms (1 without
//! rooms).

use rand::seq::SliceRandom;
use rand::Rng;
use serde::Serialize;
use std::collections::HashSet;

use super::demand::{build_demands, Demand};
use crate::error::{ConfigError, ScheduleIssue};
use crate::models::{
    ClassGroup, Room, Schedule, ScheduleConfig, ScheduleEntry, Teacher, TimeSlot,
};
use crate::rules::{Placement, RuleEngine, RuleSet};
use crate::validation::validate_input;

/// Counters collected over one run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct RunStats {
    /// Demands built from the curricula.
    pub demands: usize,
    /// Demands committed to the schedule.
    pub placed: usize,
    /// Candidates submitted to the rule engine.
    pub rule_checks: usize,
}

impl RunStats {
    pub fn unmet(&self) -> usize {
        self.demands - self.placed
    }
}

/// Result of a run that passed configuration checks.
///
/// The schedule may be partial; `errors` lists every recorded issue.
#[derive(Debug, Clone, Serialize)]
pub struct ScheduleOutcome {
    pub schedule: Schedule,
    pub errors: Vec<ScheduleIssue>,
    pub stats: RunStats,
}

impl ScheduleOutcome {
    /// A run succeeds iff no issue was recorded.
    pub fn is_success(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn error_messages(&self) -> Vec<String> {
        self.errors.iter().map(ToString::to_string).collect()
    }
}

/// Weekly timetable generator.
///
/// # Example
///
/// ```
/// use class_timetable::models::{ClassGroup, ScheduleConfig, Subject, Teacher};
/// use class_timetable::scheduler::TimetableScheduler;
/// use rand::rngs::SmallRng;
/// use rand::SeedableRng;
///
/// let classes = vec![ClassGroup::new("1A").with_subject(Subject::new("Math", 4))];
/// let teachers = vec![Teacher::new("T1").with_subject("Math")];
///
/// let scheduler = TimetableScheduler::with_default_rules(ScheduleConfig::default());
/// let mut rng = SmallRng::seed_from_u64(7);
/// let outcome = scheduler.generate(&classes, &teachers, &[], &mut rng).unwrap();
///
/// assert!(outcome.is_success());
/// assert_eq!(outcome.schedule.subject_hours("1A", "Math"), 4);
/// ```
#[derive(Debug, Clone)]
pub struct TimetableScheduler<E = RuleSet> {
    config: ScheduleConfig,
    rules: E,
}

impl TimetableScheduler<RuleSet> {
    /// Creates a scheduler using the rule set built from `config.policy`.
    pub fn with_default_rules(config: ScheduleConfig) -> Self {
        let rules = RuleSet::from_policy(&config.policy);
        Self { config, rules }
    }
}

impl<E: RuleEngine> TimetableScheduler<E> {
    pub fn new(config: ScheduleConfig, rules: E) -> Self {
        Self { config, rules }
    }

    pub fn config(&self) -> &ScheduleConfig {
        &self.config
    }

    pub fn rules(&self) -> &E {
        &self.rules
    }

    /// Runs one assignment pass with the given random source.
    pub fn generate<R: Rng + ?Sized>(
        &self,
        classes: &[ClassGroup],
        teachers: &[Teacher],
        rooms: &[Room],
        rng: &mut R,
    ) -> Result<ScheduleOutcome, ConfigError> {
        generate_schedule(&self.config, classes, teachers, rooms, &self.rules, rng)
    }

    /// Runs one assignment pass seeded from the thread-local generator.
    pub fn generate_unseeded(
        &self,
        classes: &[ClassGroup],
        teachers: &[Teacher],
        rooms: &[Room],
    ) -> Result<ScheduleOutcome, ConfigError> {
        self.generate(classes, teachers, rooms, &mut rand::rng())
    }
}

/// Generates a weekly timetable.
///
/// Only configuration and input errors abort (`Err`). Missing subjects,
/// missing resources, and unplaceable demands are collected in
/// [`ScheduleOutcome::errors`] next to the partial schedule.
///
/// Pass an empty `rooms` slice to leave the room dimension unmodeled.
#[tracing::instrument(skip_all, fields(config = %config.name))]
pub fn generate_schedule<E, R>(
    config: &ScheduleConfig,
    classes: &[ClassGroup],
    teachers: &[Teacher],
    rooms: &[Room],
    rules: &E,
    rng: &mut R,
) -> Result<ScheduleOutcome, ConfigError>
where
    E: RuleEngine + ?Sized,
    R: Rng + ?Sized,
{
    config.validate()?;
    if classes.is_empty() {
        return Err(ConfigError::NoClasses);
    }
    if teachers.is_empty() {
        return Err(ConfigError::NoTeachers);
    }
    validate_input(&config.time_grid, classes, teachers, rooms)
        .map_err(ConfigError::InvalidInput)?;

    let mut slots = config.time_slots()?;
    let (mut demands, mut errors) = build_demands(classes);
    let mut stats = RunStats {
        demands: demands.len(),
        ..RunStats::default()
    };

    tracing::info!(
        demands = demands.len(),
        slots = slots.len(),
        teachers = teachers.len(),
        rooms = rooms.len(),
        "starting timetable run"
    );

    demands.shuffle(rng);

    let mut schedule = Schedule::new();
    let mut reported_pairs: HashSet<(&str, &str)> = HashSet::new();

    for demand in &demands {
        let class = demand.class;
        let subject = demand.subject;

        let mut qualified: Vec<&Teacher> = teachers
            .iter()
            .filter(|t| t.can_teach(&subject.name))
            .collect();
        if qualified.is_empty() {
            if reported_pairs.insert(demand.pair()) {
                errors.push(ScheduleIssue::NoQualifiedTeacher {
                    class_id: class.id.clone(),
                    class_name: class.display_name().to_string(),
                    subject: subject.name.clone(),
                    hours: subject.weekly_hours,
                });
            }
            continue;
        }

        let mut suitable: Vec<Option<&Room>> = if rooms.is_empty() {
            vec![None]
        } else {
            rooms
                .iter()
                .filter(|r| r.suits(subject, class))
                .map(Some)
                .collect()
        };
        if suitable.is_empty() {
            if reported_pairs.insert(demand.pair()) {
                errors.push(ScheduleIssue::NoSuitableRoom {
                    class_id: class.id.clone(),
                    class_name: class.display_name().to_string(),
                    subject: subject.name.clone(),
                    hours: subject.weekly_hours,
                });
            }
            continue;
        }

        qualified.shuffle(rng);
        slots.shuffle(rng);
        suitable.shuffle(rng);

        if place_demand(&mut schedule, demand, &slots, &qualified, &suitable, rules, &mut stats) {
            stats.placed += 1;
        } else {
            tracing::debug!(
                class = %class.id,
                subject = %subject.name,
                hour = demand.hour,
                "no conflict-free placement"
            );
            errors.push(ScheduleIssue::Unplaceable {
                class_id: class.id.clone(),
                class_name: class.display_name().to_string(),
                subject: subject.name.clone(),
            });
        }
    }

    if stats.unmet() > 0 {
        errors.push(ScheduleIssue::UnmetDemands {
            count: stats.unmet(),
        });
    }
    for issue in &errors {
        tracing::warn!(kind = ?issue.kind(), "{issue}");
    }
    tracing::info!(
        placed = stats.placed,
        unmet = stats.unmet(),
        rule_checks = stats.rule_checks,
        errors = errors.len(),
        "timetable run finished"
    );

    Ok(ScheduleOutcome {
        schedule,
        errors,
        stats,
    })
}

/// Tries every (slot, teacher, room) combination in the given order and
/// commits the first acceptable one.
fn place_demand<E: RuleEngine + ?Sized>(
    schedule: &mut Schedule,
    demand: &Demand<'_>,
    slots: &[TimeSlot],
    teachers: &[&Teacher],
    rooms: &[Option<&Room>],
    rules: &E,
    stats: &mut RunStats,
) -> bool {
    let class = demand.class;
    let subject = demand.subject;

    for slot in slots {
        if !subject.allows_day_part(slot.day_part()) {
            continue;
        }
        if schedule.daily_subject_count(&class.id, slot.weekday(), &subject.name)
            >= subject.max_periods_per_day
        {
            continue;
        }
        if schedule.is_class_busy(&class.id, slot.key()) {
            continue;
        }

        for &teacher in teachers {
            if !teacher.is_available_at(slot) || schedule.is_teacher_busy(&teacher.id, slot.key()) {
                continue;
            }
            if schedule.teacher_day_hours(&teacher.id, slot.weekday()) >= teacher.max_hours_per_day
                || schedule.teacher_week_hours(&teacher.id) >= teacher.max_hours_per_week
            {
                continue;
            }

            for &room in rooms {
                let mut entry = ScheduleEntry::new(&class.id, &subject.name, &teacher.id, *slot);
                if let Some(room) = room {
                    if !room.is_available_at(slot) {
                        continue;
                    }
                    entry = entry.with_room(&room.id);
                }
                if schedule.has_conflict(&entry) {
                    continue;
                }

                let placement = Placement {
                    entry: &entry,
                    class,
                    subject,
                    teacher,
                    room,
                };
                stats.rule_checks += 1;
                let violations = rules.check(schedule, &placement);
                if !violations.is_empty() {
                    tracing::trace!(
                        class = %class.id,
                        slot = %slot.key(),
                        violations = violations.len(),
                        "candidate rejected by rules"
                    );
                    continue;
                }

                if schedule.add(entry) {
                    tracing::trace!(
                        class = %class.id,
                        subject = %subject.name,
                        teacher = %teacher.id,
                        slot = %slot.key(),
                        "lesson placed"
                    );
                    return true;
                }
            }
        }
    }
    false
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::IssueKind;
    use crate::models::{Availability, DayPart, Subject, TimeGrid, Weekday};
    use crate::rules::{ConsecutiveSubjectRule, Violation, ViolationKind};
    use std::cell::Cell;
    use rand::rngs::SmallRng;
    use rand::SeedableRng;

    fn rng() -> SmallRng {
        SmallRng::seed_from_u64(42)
    }

    fn scheduler() -> TimetableScheduler {
        TimetableScheduler::with_default_rules(ScheduleConfig::default())
    }

    #[test]
    fn test_full_placement() {
        let classes = vec![
            ClassGroup::new("1A")
                .with_subject(Subject::new("Math", 5))
                .with_subject(Subject::new("Art", 2)),
            ClassGroup::new("1B").with_subject(Subject::new("Math", 5)),
        ];
        let teachers = vec![
            Teacher::new("T1").with_subject("Math"),
            Teacher::new("T2").with_subject("Math").with_subject("Art"),
        ];
        let outcome = scheduler().generate(&classes, &teachers, &[], &mut rng()).unwrap();

        assert!(outcome.is_success(), "{:?}", outcome.error_messages());
        assert_eq!(outcome.schedule.len(), 12);
        assert_eq!(outcome.stats.demands, 12);
        assert_eq!(outcome.stats.placed, 12);
        assert!(outcome.stats.rule_checks >= 12);
    }

    #[test]
    fn test_no_classes_or_teachers_is_fatal() {
        let classes = vec![ClassGroup::new("1A").with_subject(Subject::new("Math", 1))];
        let teachers = vec![Teacher::new("T1").with_subject("Math")];

        let err = scheduler().generate(&[], &teachers, &[], &mut rng()).unwrap_err();
        assert_eq!(err, ConfigError::NoClasses);
        let err = scheduler().generate(&classes, &[], &[], &mut rng()).unwrap_err();
        assert_eq!(err, ConfigError::NoTeachers);
    }

    #[test]
    fn test_invalid_input_is_fatal() {
        let classes = vec![ClassGroup::new("1A"), ClassGroup::new("1A")];
        let teachers = vec![Teacher::new("T1")];
        let err = scheduler().generate(&classes, &teachers, &[], &mut rng()).unwrap_err();
        assert!(matches!(err, ConfigError::InvalidInput(ref errors) if errors.len() == 1));
    }

    #[test]
    fn test_day_part_restriction() {
        let classes = vec![ClassGroup::new("1A")
            .with_subject(Subject::new("PE", 4).with_allowed_day_parts([DayPart::Afternoon]))];
        let teachers = vec![Teacher::new("T1").with_subject("PE")];
        let outcome = scheduler().generate(&classes, &teachers, &[], &mut rng()).unwrap();

        assert!(outcome.is_success());
        assert!(outcome
            .schedule
            .entries()
            .iter()
            .all(|e| e.slot().day_part() == DayPart::Afternoon));
    }

    #[test]
    fn test_daily_cap_respected() {
        let config =
            ScheduleConfig::new("two days").with_weekdays([Weekday::Monday, Weekday::Tuesday]);
        let classes = vec![
            ClassGroup::new("1A").with_subject(Subject::new("Math", 4).with_max_per_day(2)),
        ];
        let teachers = vec![Teacher::new("T1").with_subject("Math")];
        let outcome = TimetableScheduler::with_default_rules(config)
            .generate(&classes, &teachers, &[], &mut rng())
            .unwrap();

        assert!(outcome.is_success());
        assert_eq!(outcome.schedule.daily_subject_count("1A", Weekday::Monday, "Math"), 2);
        assert_eq!(outcome.schedule.daily_subject_count("1A", Weekday::Tuesday, "Math"), 2);
    }

    #[test]
    fn test_teacher_weekly_cap() {
        let classes = vec![
            ClassGroup::new("1A").with_subject(Subject::new("Math", 3)),
            ClassGroup::new("1B").with_subject(Subject::new("Math", 3)),
        ];
        let teachers = vec![Teacher::new("T1").with_subject("Math").with_limits(6, 4)];
        let outcome = scheduler().generate(&classes, &teachers, &[], &mut rng()).unwrap();

        assert_eq!(outcome.schedule.teacher_week_hours("T1"), 4);
        assert_eq!(outcome.stats.unmet(), 2);
        let conflicts = outcome
            .errors
            .iter()
            .filter(|e| e.kind() == IssueKind::Conflict)
            .count();
        assert_eq!(conflicts, 2);
        assert_eq!(outcome.errors.last(), Some(&ScheduleIssue::UnmetDemands { count: 2 }));
    }

    #[test]
    fn test_teacher_availability() {
        let availability = Availability::always()
            .with_open(Weekday::Wednesday, 2)
            .with_open(Weekday::Wednesday, 3);
        let classes = vec![ClassGroup::new("1A").with_subject(Subject::new("Music", 2))];
        let teachers = vec![Teacher::new("T1")
            .with_subject("Music")
            .with_availability(availability)];
        let outcome = scheduler().generate(&classes, &teachers, &[], &mut rng()).unwrap();

        assert!(outcome.is_success());
        let mut periods: Vec<u8> = outcome
            .schedule
            .entries()
            .iter()
            .map(|e| e.slot().period())
            .collect();
        periods.sort_unstable();
        assert_eq!(periods, vec![2, 3]);
    }

    #[test]
    fn test_rule_engine_rejects_everything() {
        let veto = |_: &Schedule, _: &Placement<'_>| {
            vec![Violation::soft(ViolationKind::Custom("veto".into()), "no")]
        };
        let classes = vec![ClassGroup::new("1A").with_subject(Subject::new("Math", 2))];
        let teachers = vec![Teacher::new("T1").with_subject("Math")];
        let outcome = TimetableScheduler::new(ScheduleConfig::default(), veto)
            .generate(&classes, &teachers, &[], &mut rng())
            .unwrap();

        assert!(outcome.schedule.is_empty());
        assert_eq!(outcome.errors.len(), 3);
        // every (slot, teacher) pair was offered once per demand
        assert_eq!(outcome.stats.rule_checks, 2 * 40);
    }

    #[test]
    fn test_rule_engine_sees_room_candidates() {
        let offered_rooms = Cell::new(0usize);
        let veto = |_: &Schedule, placement: &Placement<'_>| {
            if placement.room.is_some() && placement.entry.room_id().is_some() {
                offered_rooms.set(offered_rooms.get() + 1);
            }
            vec![Violation::soft(ViolationKind::Custom("veto".into()), "no")]
        };
        let classes = vec![ClassGroup::new("1A").with_subject(Subject::new("Math", 2))];
        let teachers = vec![Teacher::new("T1").with_subject("Math")];
        let rooms = vec![Room::new("R1", "classroom", 40), Room::new("R2", "classroom", 40)];
        let outcome = TimetableScheduler::new(ScheduleConfig::default(), veto)
            .generate(&classes, &teachers, &rooms, &mut rng())
            .unwrap();

        assert!(outcome.schedule.is_empty());
        assert_eq!(outcome.stats.placed, 0);
        // 2 demands x 40 slots x 1 teacher x 2 rooms
        assert_eq!(outcome.stats.rule_checks, 2 * 40 * 2);
        assert_eq!(offered_rooms.get(), outcome.stats.rule_checks);
        assert_eq!(outcome.errors.last(), Some(&ScheduleIssue::UnmetDemands { count: 2 }));
    }

    #[test]
    fn test_consecutive_rule_applies_with_rooms() {
        let config = ScheduleConfig::new("one morning")
            .with_weekdays([Weekday::Monday])
            .with_time_grid(TimeGrid::new(2, 0, 0));
        let classes = vec![ClassGroup::new("1A").with_subject(Subject::new("Math", 2))];
        let teachers = vec![Teacher::new("T1").with_subject("Math")];
        let rooms = vec![Room::new("R1", "classroom", 40)];
        let rules = RuleSet::empty().with_rule(ConsecutiveSubjectRule::new(false, 1));
        let outcome = TimetableScheduler::new(config, rules)
            .generate(&classes, &teachers, &rooms, &mut rng())
            .unwrap();

        // the second hour could only sit next to the first
        assert_eq!(outcome.schedule.len(), 1);
        assert_eq!(outcome.schedule.entries()[0].room_id(), Some("R1"));
        assert_eq!(outcome.stats.rule_checks, 2);
        assert_eq!(outcome.stats.unmet(), 1);
    }

    #[test]
    fn test_rooms_by_type_and_capacity() {
        let classes = vec![ClassGroup::new("1A")
            .with_student_count(30)
            .with_subject(Subject::new("Chemistry", 3).with_room_type("lab"))
            .with_subject(Subject::new("Math", 3))];
        let teachers = vec![
            Teacher::new("T1").with_subject("Chemistry"),
            Teacher::new("T2").with_subject("Math"),
        ];
        let rooms = vec![
            Room::new("LAB-S", "lab", 20),
            Room::new("LAB-L", "lab", 32),
            Room::new("R101", "classroom", 35),
        ];
        let outcome = scheduler().generate(&classes, &teachers, &rooms, &mut rng()).unwrap();

        assert!(outcome.is_success(), "{:?}", outcome.error_messages());
        for entry in outcome.schedule.entries() {
            match entry.subject() {
                "Chemistry" => assert_eq!(entry.room_id(), Some("LAB-L")),
                _ => assert!(entry.room_id().is_some()),
            }
        }
    }

    #[test]
    fn test_no_suitable_room() {
        let classes = vec![ClassGroup::new("1A")
            .with_subject(Subject::new("Swimming", 2).with_room_type("pool"))];
        let teachers = vec![Teacher::new("T1").with_subject("Swimming")];
        let rooms = vec![Room::new("R101", "classroom", 35)];
        let outcome = scheduler().generate(&classes, &teachers, &rooms, &mut rng()).unwrap();

        assert!(outcome.schedule.is_empty());
        assert_eq!(outcome.errors.len(), 2);
        assert!(matches!(
            outcome.errors[0],
            ScheduleIssue::NoSuitableRoom { hours: 2, .. }
        ));
    }

    #[test]
    fn test_single_room_shared() {
        let grid = TimeGrid::new(1, 0, 0);
        let config = ScheduleConfig::new("tiny")
            .with_weekdays([Weekday::Monday, Weekday::Tuesday])
            .with_time_grid(grid);
        let classes = vec![
            ClassGroup::new("1A").with_subject(Subject::new("Art", 1)),
            ClassGroup::new("1B").with_subject(Subject::new("Art", 1)),
        ];
        let teachers = vec![
            Teacher::new("T1").with_subject("Art"),
            Teacher::new("T2").with_subject("Art"),
        ];
        let rooms = vec![Room::new("STUDIO", "studio", 30)];
        let outcome = TimetableScheduler::with_default_rules(config)
            .generate(&classes, &teachers, &rooms, &mut rng())
            .unwrap();

        assert!(outcome.is_success());
        let days: HashSet<Weekday> = outcome
            .schedule
            .entries()
            .iter()
            .map(|e| e.slot().weekday())
            .collect();
        assert_eq!(days.len(), 2);
    }

    #[test]
    fn test_seeded_runs_are_identical() {
        let classes = vec![
            ClassGroup::new("1A").with_subject(Subject::new("Math", 5)),
            ClassGroup::new("1B").with_subject(Subject::new("Math", 5)),
        ];
        let teachers = vec![
            Teacher::new("T1").with_subject("Math"),
            Teacher::new("T2").with_subject("Math"),
        ];
        let a = scheduler().generate(&classes, &teachers, &[], &mut rng()).unwrap();
        let b = scheduler().generate(&classes, &teachers, &[], &mut rng()).unwrap();
        assert_eq!(a.schedule.entries(), b.schedule.entries());
        assert_eq!(a.errors, b.errors);
    }

    #[test]
    fn test_unseeded_run() {
        let classes = vec![ClassGroup::new("1A").with_subject(Subject::new("Math", 2))];
        let teachers = vec![Teacher::new("T1").with_subject("Math")];
        let outcome = scheduler().generate_unseeded(&classes, &teachers, &[]).unwrap();
        assert_eq!(outcome.schedule.len(), 2);
    }
}
