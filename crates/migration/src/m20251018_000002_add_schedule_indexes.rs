use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // Serves the room overlap lookup
        manager
            .create_index(
                Index::create()
                    .name("idx_schedules_semester_room_day")
                    .table(Schedules::Table)
                    .col(Schedules::SemesterId)
                    .col(Schedules::RoomId)
                    .col(Schedules::Day)
                    .to_owned(),
            )
            .await?;

        // Serves the lecturer overlap lookup
        manager
            .create_index(
                Index::create()
                    .name("idx_schedules_semester_lecturer_day")
                    .table(Schedules::Table)
                    .col(Schedules::SemesterId)
                    .col(Schedules::LecturerId)
                    .col(Schedules::Day)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_schedules_subject_id")
                    .table(Schedules::Table)
                    .col(Schedules::SubjectId)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        for name in [
            "idx_schedules_semester_room_day",
            "idx_schedules_semester_lecturer_day",
            "idx_schedules_subject_id",
        ] {
            manager
                .drop_index(Index::drop().name(name).table(Schedules::Table).to_owned())
                .await?;
        }

        Ok(())
    }
}

#[derive(Iden)]
enum Schedules {
    Table,
    SemesterId,
    SubjectId,
    LecturerId,
    RoomId,
    Day,
}
