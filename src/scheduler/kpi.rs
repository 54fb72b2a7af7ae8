//! Timetable quality metrics and post-hoc audit.
//!
//! # Metrics
//!
//! | Metric | Definition |
//! |--------|-----------|
//! | Required hours | Sum of `weekly_hours` over every class curriculum |
//! | Placed hours | Entries matching a curriculum line, capped at its quota |
//! | Fulfillment rate | placed / required (1.0 when nothing is required) |
//! | Teacher load | Weekly periods per teacher |
//! | Unmet hours | Per class, required minus placed |
//!
//! [`audit_schedule`] re-derives the hard invariants from a plain entry list,
//! independent of the indices [`Schedule`] maintains.

use serde::Serialize;
use std::collections::{BTreeMap, HashMap};

use crate::models::{ClassGroup, Schedule, ScheduleEntry, SlotKey, Teacher, Weekday};

/// Timetable performance indicators.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScheduleKpi {
    pub required_hours: u32,
    pub placed_hours: u32,
    /// Fraction of required hours placed (0.0..=1.0).
    pub fulfillment_rate: f64,
    /// Weekly periods per teacher, including teachers with no lessons.
    pub teacher_load: BTreeMap<String, u32>,
    /// Classes with unplaced hours, and how many.
    pub unmet_by_class: BTreeMap<String, u32>,
}

impl ScheduleKpi {
    /// Computes KPIs from a schedule and its input classes and teachers.
    pub fn calculate(schedule: &Schedule, classes: &[ClassGroup], teachers: &[Teacher]) -> Self {
        let mut required_hours = 0;
        let mut placed_hours = 0;
        let mut unmet_by_class = BTreeMap::new();

        for class in classes {
            let mut unmet = 0;
            for subject in &class.subjects {
                let placed = schedule
                    .subject_hours(&class.id, &subject.name)
                    .min(subject.weekly_hours);
                required_hours += subject.weekly_hours;
                placed_hours += placed;
                unmet += subject.weekly_hours - placed;
            }
            if unmet > 0 {
                unmet_by_class.insert(class.id.clone(), unmet);
            }
        }

        let teacher_load = teachers
            .iter()
            .map(|t| (t.id.clone(), schedule.teacher_week_hours(&t.id)))
            .collect();

        let fulfillment_rate = if required_hours == 0 {
            1.0
        } else {
            placed_hours as f64 / required_hours as f64
        };

        Self {
            required_hours,
            placed_hours,
            fulfillment_rate,
            teacher_load,
            unmet_by_class,
        }
    }

    /// Whether every required hour was placed.
    pub fn is_complete(&self) -> bool {
        self.unmet_by_class.is_empty()
    }
}

/// A problem found by [`audit_schedule`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "finding", rename_all = "snake_case")]
pub enum AuditFinding {
    TeacherDoubleBooked {
        teacher_id: String,
        slot: SlotKey,
    },
    ClassDoubleBooked {
        class_id: String,
        slot: SlotKey,
    },
    RoomDoubleBooked {
        room_id: String,
        slot: SlotKey,
    },
    /// More entries than the subject's weekly quota.
    QuotaExceeded {
        class_id: String,
        subject: String,
        required: u32,
        placed: u32,
    },
    /// Fewer entries than the subject's weekly quota.
    QuotaShortfall {
        class_id: String,
        subject: String,
        required: u32,
        placed: u32,
    },
    /// An entry for a subject the class does not take.
    UnknownSubject {
        class_id: String,
        subject: String,
    },
    /// Entry taught by a teacher not qualified for the subject.
    UnqualifiedTeacher {
        teacher_id: String,
        subject: String,
    },
    DailySubjectCapExceeded {
        class_id: String,
        subject: String,
        weekday: Weekday,
        placed: u32,
    },
    TeacherDailyCapExceeded {
        teacher_id: String,
        weekday: Weekday,
        hours: u32,
    },
    TeacherWeeklyCapExceeded {
        teacher_id: String,
        hours: u32,
    },
}

impl AuditFinding {
    /// Shortfalls are expected in partial schedules; everything else is a
    /// broken invariant.
    pub fn is_violation(&self) -> bool {
        !matches!(self, AuditFinding::QuotaShortfall { .. })
    }
}

/// Checks an entry list against the curriculum and teacher limits.
///
/// Returns every finding; empty means the timetable is complete and clean.
pub fn audit_schedule(
    entries: &[ScheduleEntry],
    classes: &[ClassGroup],
    teachers: &[Teacher],
) -> Vec<AuditFinding> {
    let mut findings = Vec::new();

    let mut teacher_slots: BTreeMap<(&str, SlotKey), u32> = BTreeMap::new();
    let mut class_slots: BTreeMap<(&str, SlotKey), u32> = BTreeMap::new();
    let mut room_slots: BTreeMap<(&str, SlotKey), u32> = BTreeMap::new();
    let mut subject_counts: HashMap<(&str, &str), u32> = HashMap::new();
    let mut daily_counts: BTreeMap<(&str, &str, Weekday), u32> = BTreeMap::new();
    let mut teacher_days: BTreeMap<(&str, Weekday), u32> = BTreeMap::new();
    let mut teacher_weeks: BTreeMap<&str, u32> = BTreeMap::new();

    for e in entries {
        let key = e.slot().key();
        *teacher_slots.entry((e.teacher_id(), key)).or_default() += 1;
        *class_slots.entry((e.class_id(), key)).or_default() += 1;
        if let Some(room) = e.room_id() {
            *room_slots.entry((room, key)).or_default() += 1;
        }
        *subject_counts.entry((e.class_id(), e.subject())).or_default() += 1;
        *daily_counts
            .entry((e.class_id(), e.subject(), key.weekday))
            .or_default() += 1;
        *teacher_days.entry((e.teacher_id(), key.weekday)).or_default() += 1;
        *teacher_weeks.entry(e.teacher_id()).or_default() += 1;
    }

    for (&(id, slot), &n) in &teacher_slots {
        if n > 1 {
            findings.push(AuditFinding::TeacherDoubleBooked {
                teacher_id: id.to_string(),
                slot,
            });
        }
    }
    for (&(id, slot), &n) in &class_slots {
        if n > 1 {
            findings.push(AuditFinding::ClassDoubleBooked {
                class_id: id.to_string(),
                slot,
            });
        }
    }
    for (&(id, slot), &n) in &room_slots {
        if n > 1 {
            findings.push(AuditFinding::RoomDoubleBooked {
                room_id: id.to_string(),
                slot,
            });
        }
    }

    for class in classes {
        for subject in &class.subjects {
            let placed = subject_counts
                .get(&(class.id.as_str(), subject.name.as_str()))
                .copied()
                .unwrap_or(0);
            let class_id = class.id.clone();
            let required = subject.weekly_hours;
            if placed > required {
                findings.push(AuditFinding::QuotaExceeded {
                    class_id,
                    subject: subject.name.clone(),
                    required,
                    placed,
                });
            } else if placed < required {
                findings.push(AuditFinding::QuotaShortfall {
                    class_id,
                    subject: subject.name.clone(),
                    required,
                    placed,
                });
            }
        }
    }

    let class_by_id: HashMap<&str, &ClassGroup> =
        classes.iter().map(|c| (c.id.as_str(), c)).collect();
    for (&(class_id, subject_name, weekday), &placed) in &daily_counts {
        match class_by_id.get(class_id).and_then(|c| c.subject(subject_name)) {
            Some(subject) if placed > subject.max_periods_per_day => {
                findings.push(AuditFinding::DailySubjectCapExceeded {
                    class_id: class_id.to_string(),
                    subject: subject_name.to_string(),
                    weekday,
                    placed,
                });
            }
            // one finding per pair, not per weekday
            None if !findings.iter().any(|f| {
                matches!(f, AuditFinding::UnknownSubject { class_id: c, subject: s }
                    if c == class_id && s == subject_name)
            }) =>
            {
                findings.push(AuditFinding::UnknownSubject {
                    class_id: class_id.to_string(),
                    subject: subject_name.to_string(),
                });
            }
            _ => {}
        }
    }

    let teacher_by_id: HashMap<&str, &Teacher> =
        teachers.iter().map(|t| (t.id.as_str(), t)).collect();
    for e in entries {
        if let Some(t) = teacher_by_id.get(e.teacher_id()) {
            if !t.can_teach(e.subject()) {
                let finding = AuditFinding::UnqualifiedTeacher {
                    teacher_id: t.id.clone(),
                    subject: e.subject().to_string(),
                };
                if !findings.contains(&finding) {
                    findings.push(finding);
                }
            }
        }
    }
    for (&(teacher_id, weekday), &hours) in &teacher_days {
        if let Some(t) = teacher_by_id.get(teacher_id) {
            if hours > t.max_hours_per_day {
                findings.push(AuditFinding::TeacherDailyCapExceeded {
                    teacher_id: teacher_id.to_string(),
                    weekday,
                    hours,
                });
            }
        }
    }
    for (&teacher_id, &hours) in &teacher_weeks {
        if let Some(t) = teacher_by_id.get(teacher_id) {
            if hours > t.max_hours_per_week {
                findings.push(AuditFinding::TeacherWeeklyCapExceeded {
                    teacher_id: teacher_id.to_string(),
                    hours,
                });
            }
        }
    }

    findings
}
