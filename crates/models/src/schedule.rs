use crate::{
    day::DayOfWeek,
    error::ScheduleError,
    number::{non_blank, parse_finite, parse_whole},
    time::{MinuteOfDay, TimeSlot},
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Schedule entry fields exactly as submitted by a form; nothing here is trusted
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[serde(rename_all = "camelCase")]
pub struct ScheduleForm {
    pub semester_id: Option<String>,
    pub subject_id: Option<String>,
    pub lecturer_id: Option<String>,
    pub room_id: Option<String>,
    /// One of `Mon`..`Sun`
    pub day: Option<String>,
    /// `HH:MM`, `H:MM` or `HH:MM:SS`
    pub start_time: Option<String>,
    pub end_time: Option<String>,
    pub capacity_override: Option<String>,
    pub class_year: Option<String>,
}

/// A structurally valid schedule entry, not yet checked against existing bookings
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ScheduleCandidate {
    pub semester_id: Uuid,
    pub subject_id: Uuid,
    pub lecturer_id: Uuid,
    pub room_id: Uuid,
    pub day: DayOfWeek,
    pub slot: TimeSlot,
    pub capacity_override: Option<i32>,
    pub class_year: Option<i32>,
}

/// Seats available to an entry: its override if present, otherwise the room's own capacity
pub fn effective_capacity(capacity_override: Option<i32>, room_capacity: i32) -> i32 {
    capacity_override.unwrap_or(room_capacity)
}

fn required<'a>(value: Option<&'a str>, field: &str) -> Result<&'a str, ScheduleError> {
    non_blank(value).ok_or_else(|| ScheduleError::InvalidInput(format!("{field} is required")))
}

fn required_id(value: Option<&str>, field: &str) -> Result<Uuid, ScheduleError> {
    let raw = required(value, field)?;

    match Uuid::parse_str(raw) {
        Ok(id) if !id.is_nil() => Ok(id),
        _ => Err(ScheduleError::InvalidInput(format!(
            "{field} is not a valid id: {raw:?}"
        ))),
    }
}

fn parse_time(raw: &str) -> Result<MinuteOfDay, ScheduleError> {
    raw.parse()
        .map_err(|_| ScheduleError::InvalidTimeFormat(raw.to_owned()))
}

impl ScheduleForm {
    /// Runs the structural checks in order, stopping at the first failure:
    /// required fields, day code, time format, time ordering, capacity override, class year.
    pub fn into_candidate(self) -> Result<ScheduleCandidate, ScheduleError> {
        let semester_id = required_id(self.semester_id.as_deref(), "semesterId")?;
        let subject_id = required_id(self.subject_id.as_deref(), "subjectId")?;
        let lecturer_id = required_id(self.lecturer_id.as_deref(), "lecturerId")?;
        let room_id = required_id(self.room_id.as_deref(), "roomId")?;
        let day = required(self.day.as_deref(), "day")?;
        let start_raw = required(self.start_time.as_deref(), "startTime")?;
        let end_raw = required(self.end_time.as_deref(), "endTime")?;

        let day = DayOfWeek::parse_code(day)
            .ok_or_else(|| ScheduleError::InvalidInput(format!("unrecognized day {day:?}")))?;

        let start = parse_time(start_raw)?;
        let end = parse_time(end_raw)?;
        let slot = TimeSlot::new(start, end).ok_or(ScheduleError::InvalidTimeRange { start, end })?;

        let capacity_override = match non_blank(self.capacity_override.as_deref()) {
            Some(raw) => Some(
                parse_finite(raw)
                    .filter(|&value| value > 0.0)
                    .and_then(|_| parse_whole(raw))
                    .ok_or_else(|| ScheduleError::InvalidCapacity(raw.to_owned()))?,
            ),
            None => None,
        };

        let class_year = match non_blank(self.class_year.as_deref()) {
            Some(raw) => Some(parse_whole(raw).ok_or_else(|| {
                ScheduleError::InvalidInput(format!("classYear is not a number: {raw:?}"))
            })?),
            None => None,
        };

        Ok(ScheduleCandidate {
            semester_id,
            subject_id,
            lecturer_id,
            room_id,
            day,
            slot,
            capacity_override,
            class_year,
        })
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::error::ErrorKind;

    const SEMESTER: &str = "6c1f1d52-0b7a-4c5e-9f55-2d8e2b1f4a01";
    const SUBJECT: &str = "a3a0c6de-5c43-4f4e-8f8e-0d4c1b2a9e02";
    const LECTURER: &str = "1b9e7c55-3d2f-4a60-b1c4-7e6f5d4c3b03";
    const ROOM: &str = "f0e1d2c3-b4a5-4968-8776-655443322104";

    fn form(start: &str, end: &str) -> ScheduleForm {
        ScheduleForm {
            semester_id: Some(SEMESTER.into()),
            subject_id: Some(SUBJECT.into()),
            lecturer_id: Some(LECTURER.into()),
            room_id: Some(ROOM.into()),
            day: Some("Mon".into()),
            start_time: Some(start.into()),
            end_time: Some(end.into()),
            capacity_override: None,
            class_year: None,
        }
    }

    fn kind(form: ScheduleForm) -> ErrorKind {
        form.into_candidate().unwrap_err().kind()
    }

    #[test]
    fn test_valid_form() {
        let candidate = ScheduleForm {
            capacity_override: Some("25".into()),
            class_year: Some("2024".into()),
            ..form("9:30", "11:00")
        }
        .into_candidate()
        .unwrap();

        assert_eq!(candidate.room_id, Uuid::parse_str(ROOM).unwrap());
        assert_eq!(candidate.day, DayOfWeek::Mon);
        assert_eq!(candidate.slot.to_string(), "09:30-11:00");
        assert_eq!(candidate.capacity_override, Some(25));
        assert_eq!(candidate.class_year, Some(2024));
        assert_eq!(effective_capacity(candidate.capacity_override, 30), 25);
    }

    #[test]
    fn test_blank_optionals_are_absent() {
        let candidate = ScheduleForm {
            capacity_override: Some("".into()),
            class_year: Some("  ".into()),
            ..form("08:00", "10:00")
        }
        .into_candidate()
        .unwrap();

        assert_eq!(candidate.capacity_override, None);
        assert_eq!(candidate.class_year, None);
        assert_eq!(effective_capacity(candidate.capacity_override, 30), 30);
    }

    #[test]
    fn test_missing_or_malformed_fields() {
        assert_eq!(kind(ScheduleForm::default()), ErrorKind::InvalidInput);
        assert_eq!(
            kind(ScheduleForm { room_id: None, ..form("08:00", "10:00") }),
            ErrorKind::InvalidInput
        );
        assert_eq!(
            kind(ScheduleForm { subject_id: Some("42".into()), ..form("08:00", "10:00") }),
            ErrorKind::InvalidInput
        );
        assert_eq!(
            kind(ScheduleForm { semester_id: Some(Uuid::nil().to_string()), ..form("08:00", "10:00") }),
            ErrorKind::InvalidInput
        );
        assert_eq!(kind(form("", "10:00")), ErrorKind::InvalidInput);
    }

    #[test]
    fn test_unrecognized_day() {
        assert_eq!(
            kind(ScheduleForm { day: Some("Monday".into()), ..form("08:00", "10:00") }),
            ErrorKind::InvalidInput
        );
    }

    #[test]
    fn test_bad_time_format() {
        assert_eq!(kind(form("8am", "10:00")), ErrorKind::InvalidTimeFormat);
        assert_eq!(kind(form("08:00", "25:00")), ErrorKind::InvalidTimeFormat);
    }

    #[test]
    fn test_end_must_follow_start() {
        assert_eq!(kind(form("14:00", "13:00")), ErrorKind::InvalidTimeRange);
        assert_eq!(kind(form("14:00", "14:00")), ErrorKind::InvalidTimeRange);
        // compared as minutes, not as text
        assert!(form("9:00", "10:00").into_candidate().is_ok());
    }

    #[test]
    fn test_capacity_override() {
        for bad in ["-5", "0", "abc", "2.5", "inf"] {
            assert_eq!(
                kind(ScheduleForm { capacity_override: Some(bad.into()), ..form("08:00", "10:00") }),
                ErrorKind::InvalidCapacity,
                "accepted {bad:?}"
            );
        }
    }

    #[test]
    fn test_time_checks_precede_capacity() {
        let err = ScheduleForm {
            capacity_override: Some("-5".into()),
            ..form("14:00", "13:00")
        }
        .into_candidate()
        .unwrap_err();

        assert_eq!(err.kind(), ErrorKind::InvalidTimeRange);
    }

    #[test]
    fn test_class_year_must_be_numeric() {
        assert_eq!(
            kind(ScheduleForm { class_year: Some("first".into()), ..form("08:00", "10:00") }),
            ErrorKind::InvalidInput
        );
    }

    #[test]
    fn test_deserializes_camel_case() {
        let form: ScheduleForm = serde_json::from_value(serde_json::json!({
            "semesterId": SEMESTER,
            "startTime": "08:00",
            "capacityOverride": "12"
        }))
        .unwrap();

        assert_eq!(form.semester_id.as_deref(), Some(SEMESTER));
        assert_eq!(form.start_time.as_deref(), Some("08:00"));
        assert_eq!(form.capacity_override.as_deref(), Some("12"));
        assert_eq!(form.room_id, None);
    }
}
