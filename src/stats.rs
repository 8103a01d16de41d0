use rand::Rng;
use sea_orm::{ActiveValue::Set, ActiveModelTrait};

use crate::entities::movie;

/// Demo statistics for one record. Every field is drawn on its own, so no
/// cross-field relationship holds between them.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct RandomStats {
    pub hits: i32,
    pub hits_day: i32,
    pub hits_week: i32,
    pub hits_month: i32,
    pub up: i32,
    pub down: i32,
    pub score: f64,
    pub score_all: i32,
    pub score_num: i32,
}

impl RandomStats {
    pub fn draw<R: Rng + ?Sized>(rng: &mut R) -> Self {
        Self {
            hits: rng.gen_range(10..=999),
            hits_day: rng.gen_range(10..=99),
            hits_week: rng.gen_range(50..=499),
            hits_month: rng.gen_range(100..=999),
            up: rng.gen_range(10..=99),
            down: rng.gen_range(5..=49),
            // drawn in tenths so the value never carries more than one decimal
            score: f64::from(rng.gen_range(50..=100_i32)) / 10.0,
            score_all: rng.gen_range(10..=99),
            score_num: rng.gen_range(10..=99),
        }
    }

    /// Partial model with only the statistics columns set, for use with
    /// `update_many().set(..)`.
    pub fn into_active_model(self) -> movie::ActiveModel {
        let mut model = <movie::ActiveModel as ActiveModelTrait>::default();
        model.vod_hits = Set(self.hits);
        model.vod_hits_day = Set(self.hits_day);
        model.vod_hits_week = Set(self.hits_week);
        model.vod_hits_month = Set(self.hits_month);
        model.vod_up = Set(self.up);
        model.vod_down = Set(self.down);
        model.vod_score = Set(self.score);
        model.vod_score_all = Set(self.score_all);
        model.vod_score_num = Set(self.score_num);
        model
    }
}
