use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(MacVod::Table)
                    .if_not_exists()
                    .col(pk_auto(MacVod::VodId))
                    .col(string(MacVod::VodName).default(""))
                    .col(string(MacVod::VodSub).default(""))
                    .col(string(MacVod::VodEn).default(""))
                    .col(string(MacVod::VodTag).default(""))
                    .col(string(MacVod::VodClass).default(""))
                    .col(string(MacVod::VodYear).default(""))
                    .col(string(MacVod::VodArea).default(""))
                    .col(string(MacVod::VodLang).default(""))
                    .col(string(MacVod::VodDuration).default(""))
                    .col(text(MacVod::VodContent).default(""))
                    .col(text(MacVod::VodBlurb).default(""))
                    .col(text(MacVod::VodActor).default(""))
                    .col(text(MacVod::VodDirector).default(""))
                    .col(text(MacVod::VodWriter).default(""))
                    .col(text(MacVod::VodBehind).default(""))
                    .col(string(MacVod::VodRemarks).default(""))
                    .col(integer(MacVod::VodIsend).default(0))
                    .col(integer(MacVod::VodTotal).default(0))
                    .col(big_integer(MacVod::VodTime).default(0))
                    .col(integer(MacVod::VodHits).default(0))
                    .col(integer(MacVod::VodHitsDay).default(0))
                    .col(integer(MacVod::VodHitsWeek).default(0))
                    .col(integer(MacVod::VodHitsMonth).default(0))
                    .col(integer(MacVod::VodUp).default(0))
                    .col(integer(MacVod::VodDown).default(0))
                    .col(double(MacVod::VodScore).default(0.0))
                    .col(integer(MacVod::VodScoreAll).default(0))
                    .col(integer(MacVod::VodScoreNum).default(0))
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_mac_vod_time")
                    .table(MacVod::Table)
                    .col(MacVod::VodTime)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_index(Index::drop().name("idx_mac_vod_time").table(MacVod::Table).to_owned())
            .await?;
        manager.drop_table(Table::drop().table(MacVod::Table).to_owned()).await?;
        Ok(())
    }
}

#[derive(DeriveIden)]
enum MacVod {
    Table,
    VodId,
    VodName,
    VodSub,
    VodEn,
    VodTag,
    VodClass,
    VodYear,
    VodArea,
    VodLang,
    VodDuration,
    VodContent,
    VodBlurb,
    VodActor,
    VodDirector,
    VodWriter,
    VodBehind,
    VodRemarks,
    VodIsend,
    VodTotal,
    VodTime,
    VodHits,
    VodHitsDay,
    VodHitsWeek,
    VodHitsMonth,
    VodUp,
    VodDown,
    VodScore,
    VodScoreAll,
    VodScoreNum,
}
