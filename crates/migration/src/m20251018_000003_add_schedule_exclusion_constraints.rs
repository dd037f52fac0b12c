use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        let db = manager.get_connection();

        // Equality on uuid/text columns inside a gist index
        db.execute_unprepared("CREATE EXTENSION IF NOT EXISTS btree_gist")
            .await?;

        // '[)' keeps back-to-back slots legal, matching the half-open overlap check
        db.execute_unprepared(
            "ALTER TABLE schedules ADD CONSTRAINT schedules_room_no_overlap
             EXCLUDE USING gist (
                 semester_id WITH =,
                 room_id WITH =,
                 day WITH =,
                 int4range(start_minute, end_minute, '[)') WITH &&
             )",
        )
        .await?;

        db.execute_unprepared(
            "ALTER TABLE schedules ADD CONSTRAINT schedules_lecturer_no_overlap
             EXCLUDE USING gist (
                 semester_id WITH =,
                 lecturer_id WITH =,
                 day WITH =,
                 int4range(start_minute, end_minute, '[)') WITH &&
             )",
        )
        .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        let db = manager.get_connection();

        db.execute_unprepared(
            "ALTER TABLE schedules DROP CONSTRAINT IF EXISTS schedules_lecturer_no_overlap",
        )
        .await?;
        db.execute_unprepared(
            "ALTER TABLE schedules DROP CONSTRAINT IF EXISTS schedules_room_no_overlap",
        )
        .await?;

        Ok(())
    }
}
