use crate::{
    dtos::{
        reference::{LecturerResponse, RoomResponse, SemesterResponse, SubjectResponse},
        schedule::{ScheduleResponse, ScheduleRowResponse},
    },
    routes::{health, lecturer, room, root, schedule, semester, subject},
};
use models::{
    day::DayOfWeek,
    error::{ActionResult, ErrorKind},
    reference::{LecturerForm, RoomForm, SemesterForm, SubjectForm},
    schedule::ScheduleForm,
    term::Term,
};
use utoipa::OpenApi;

/// API Documentation
#[derive(OpenApi)]
#[openapi(
    paths(
        root::root,
        health::health,
        semester::list_semesters,
        semester::get_semester,
        semester::create_semester,
        semester::update_semester,
        semester::delete_semester,
        lecturer::list_lecturers,
        lecturer::get_lecturer,
        lecturer::create_lecturer,
        lecturer::update_lecturer,
        lecturer::delete_lecturer,
        subject::list_subjects,
        subject::get_subject,
        subject::create_subject,
        subject::update_subject,
        subject::delete_subject,
        room::list_rooms,
        room::get_room,
        room::create_room,
        room::update_room,
        room::delete_room,
        schedule::list_semester_schedules,
        schedule::get_schedule,
        schedule::create_schedule,
        schedule::update_schedule,
        schedule::delete_schedule,
        schedule::check_schedule
    ),
    components(schemas(
        ActionResult,
        ErrorKind,
        DayOfWeek,
        Term,
        SemesterForm,
        LecturerForm,
        SubjectForm,
        RoomForm,
        ScheduleForm,
        SemesterResponse,
        LecturerResponse,
        SubjectResponse,
        RoomResponse,
        ScheduleResponse,
        ScheduleRowResponse
    )),
    tags(
        (name = "Health", description = "Liveness endpoints"),
        (name = "Semesters", description = "Academic year and term records"),
        (name = "Lecturers", description = "Teaching staff"),
        (name = "Subjects", description = "Subjects with paid and academic credits"),
        (name = "Rooms", description = "Rooms and their seat capacity"),
        (name = "Schedules", description = "Weekly timetable entries with room and lecturer overlap checks"),
    ),
    info(
        title = "Department Scheduling API",
        version = "1.0.0",
        description = "Semester timetables for a university department",
        license(
            name = "MIT OR Apache-2.0",
        )
    )
)]
pub struct ApiDoc;
