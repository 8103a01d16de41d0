#![allow(dead_code)]

use std::sync::Arc;

use sea_orm::{ActiveValue::Set, DatabaseConnection, EntityTrait};
use vodadmin::{AppState, catalog::Catalog, db, entities::movie};

pub async fn catalog() -> Catalog {
    let db = db::connect_in_memory().await.expect("in-memory store");
    Catalog::new(db)
}

pub fn app(catalog: &Catalog) -> axum::Router {
    vodadmin::router(Arc::new(AppState { catalog: catalog.clone() }))
}

pub async fn insert_movie(db: &DatabaseConnection, name: &str, sub: &str, en: &str, time: i64) -> i32 {
    let model = movie::ActiveModel {
        vod_name: Set(name.to_string()),
        vod_sub: Set(sub.to_string()),
        vod_en: Set(en.to_string()),
        vod_tag: Set("Action".to_string()),
        vod_class: Set("Movie".to_string()),
        vod_year: Set("2020".to_string()),
        vod_area: Set("US".to_string()),
        vod_lang: Set("English".to_string()),
        vod_duration: Set("120".to_string()),
        vod_content: Set(format!("Synopsis of {name}\nSecond line")),
        vod_actor: Set("Someone".to_string()),
        vod_time: Set(time),
        ..Default::default()
    };
    movie::Entity::insert(model).exec(db).await.expect("insert movie").last_insert_id
}

/// Seeds IDs 1..=n where a higher ID is more recent.
pub async fn seed(catalog: &Catalog, n: i32) {
    for i in 1..=n {
        insert_movie(catalog.db(), &format!("Movie {i}"), &format!("movie-{i}"), &format!("Film {i}"), 1_700_000_000 + i64::from(i)).await;
    }
}

pub async fn all_movies(catalog: &Catalog) -> Vec<movie::Model> {
    movie::Entity::find().all(catalog.db()).await.expect("select all")
}
