use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "mac_vod")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub vod_id: i32,
    pub vod_name: String,
    pub vod_sub: String,
    pub vod_en: String,
    pub vod_tag: String,
    pub vod_class: String,
    pub vod_year: String,
    pub vod_area: String,
    pub vod_lang: String,
    pub vod_duration: String,
    #[sea_orm(column_type = "Text")]
    pub vod_content: String,
    #[sea_orm(column_type = "Text")]
    pub vod_blurb: String,
    #[sea_orm(column_type = "Text")]
    pub vod_actor: String,
    #[sea_orm(column_type = "Text")]
    pub vod_director: String,
    #[sea_orm(column_type = "Text")]
    pub vod_writer: String,
    #[sea_orm(column_type = "Text")]
    pub vod_behind: String,
    pub vod_remarks: String,
    pub vod_isend: i32,
    pub vod_total: i32,
    pub vod_time: i64,
    pub vod_hits: i32,
    pub vod_hits_day: i32,
    pub vod_hits_week: i32,
    pub vod_hits_month: i32,
    pub vod_up: i32,
    pub vod_down: i32,
    #[sea_orm(column_type = "Double")]
    pub vod_score: f64,
    pub vod_score_all: i32,
    pub vod_score_num: i32,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

impl Model {
    pub fn is_complete(&self) -> bool {
        self.vod_isend == 1
    }
}
