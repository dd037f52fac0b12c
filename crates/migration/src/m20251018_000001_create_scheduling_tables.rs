use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // Create semesters table
        manager
            .create_table(
                Table::create()
                    .table(Semesters::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(Semesters::Id).uuid().not_null().primary_key())
                    .col(ColumnDef::new(Semesters::AcademicYear).string_len(16).not_null())
                    .col(ColumnDef::new(Semesters::Term).string_len(2).not_null())
                    .col(
                        ColumnDef::new(Semesters::CreatedAt)
                            .timestamp()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .index(
                        Index::create()
                            .name("uq_semesters_year_term")
                            .col(Semesters::AcademicYear)
                            .col(Semesters::Term)
                            .unique(),
                    )
                    .check(Expr::col(Semesters::Term).is_in(["S1", "S2", "S3"]))
                    .to_owned(),
            )
            .await?;

        // Create lecturers table
        manager
            .create_table(
                Table::create()
                    .table(Lecturers::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(Lecturers::Id).uuid().not_null().primary_key())
                    .col(
                        ColumnDef::new(Lecturers::Name)
                            .string_len(128)
                            .not_null()
                            .unique_key(),
                    )
                    .col(
                        ColumnDef::new(Lecturers::CreatedAt)
                            .timestamp()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .to_owned(),
            )
            .await?;

        // Create subjects table
        manager
            .create_table(
                Table::create()
                    .table(Subjects::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(Subjects::Id).uuid().not_null().primary_key())
                    .col(
                        ColumnDef::new(Subjects::Code)
                            .string_len(32)
                            .not_null()
                            .unique_key(),
                    )
                    .col(ColumnDef::new(Subjects::Name).string_len(256).not_null())
                    .col(
                        ColumnDef::new(Subjects::PaidCredit)
                            .integer()
                            .not_null()
                            .default(1),
                    )
                    .col(
                        ColumnDef::new(Subjects::AcademicCredit)
                            .integer()
                            .not_null()
                            .default(1),
                    )
                    .col(
                        ColumnDef::new(Subjects::CreatedAt)
                            .timestamp()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .check(Expr::col(Subjects::PaidCredit).between(1, 4))
                    .check(Expr::col(Subjects::AcademicCredit).between(1, 4))
                    .to_owned(),
            )
            .await?;

        // Create rooms table
        manager
            .create_table(
                Table::create()
                    .table(Rooms::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(Rooms::Id).uuid().not_null().primary_key())
                    .col(
                        ColumnDef::new(Rooms::Name)
                            .string_len(64)
                            .not_null()
                            .unique_key(),
                    )
                    .col(ColumnDef::new(Rooms::Capacity).integer().not_null())
                    .col(
                        ColumnDef::new(Rooms::CreatedAt)
                            .timestamp()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .check(Expr::col(Rooms::Capacity).gt(0))
                    .to_owned(),
            )
            .await?;

        // Create schedules table; references are RESTRICT so in-use rows cannot be deleted
        manager
            .create_table(
                Table::create()
                    .table(Schedules::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(Schedules::Id).uuid().not_null().primary_key())
                    .col(ColumnDef::new(Schedules::SemesterId).uuid().not_null())
                    .col(ColumnDef::new(Schedules::SubjectId).uuid().not_null())
                    .col(ColumnDef::new(Schedules::LecturerId).uuid().not_null())
                    .col(ColumnDef::new(Schedules::RoomId).uuid().not_null())
                    .col(ColumnDef::new(Schedules::Day).string_len(3).not_null())
                    .col(ColumnDef::new(Schedules::StartMinute).small_integer().not_null())
                    .col(ColumnDef::new(Schedules::EndMinute).small_integer().not_null())
                    .col(ColumnDef::new(Schedules::CapacityOverride).integer())
                    .col(ColumnDef::new(Schedules::ClassYear).integer())
                    .col(
                        ColumnDef::new(Schedules::CreatedAt)
                            .timestamp()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .check(
                        Expr::col(Schedules::Day)
                            .is_in(["Mon", "Tue", "Wed", "Thu", "Fri", "Sat", "Sun"]),
                    )
                    .check(
                        Expr::col(Schedules::StartMinute)
                            .gte(0)
                            .and(Expr::col(Schedules::StartMinute).lt(Expr::col(Schedules::EndMinute)))
                            .and(Expr::col(Schedules::EndMinute).lt(1440)),
                    )
                    .check(
                        Expr::col(Schedules::CapacityOverride)
                            .is_null()
                            .or(Expr::col(Schedules::CapacityOverride).gt(0)),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk-schedules-semester_id")
                            .from(Schedules::Table, Schedules::SemesterId)
                            .to(Semesters::Table, Semesters::Id)
                            .on_delete(ForeignKeyAction::Restrict),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk-schedules-subject_id")
                            .from(Schedules::Table, Schedules::SubjectId)
                            .to(Subjects::Table, Subjects::Id)
                            .on_delete(ForeignKeyAction::Restrict),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk-schedules-lecturer_id")
                            .from(Schedules::Table, Schedules::LecturerId)
                            .to(Lecturers::Table, Lecturers::Id)
                            .on_delete(ForeignKeyAction::Restrict),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk-schedules-room_id")
                            .from(Schedules::Table, Schedules::RoomId)
                            .to(Rooms::Table, Rooms::Id)
                            .on_delete(ForeignKeyAction::Restrict),
                    )
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Schedules::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Rooms::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Subjects::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Lecturers::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Semesters::Table).to_owned())
            .await?;

        Ok(())
    }
}

#[derive(Iden)]
enum Semesters {
    Table,
    Id,
    AcademicYear,
    Term,
    CreatedAt,
}

#[derive(Iden)]
enum Lecturers {
    Table,
    Id,
    Name,
    CreatedAt,
}

#[derive(Iden)]
enum Subjects {
    Table,
    Id,
    Code,
    Name,
    PaidCredit,
    AcademicCredit,
    CreatedAt,
}

#[derive(Iden)]
enum Rooms {
    Table,
    Id,
    Name,
    Capacity,
    CreatedAt,
}

#[derive(Iden)]
enum Schedules {
    Table,
    Id,
    SemesterId,
    SubjectId,
    LecturerId,
    RoomId,
    Day,
    StartMinute,
    EndMinute,
    CapacityOverride,
    ClassYear,
    CreatedAt,
}
