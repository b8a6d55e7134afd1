//! List pipeline shared by every collection endpoint: count, validate the
//! requested page, sort by the entity's sort-key table, slice one page and
//! return it with paging metadata.

use db::models::{
    harvest::{Harvest, HarvestViewModel},
    ingredient::{Ingredient, IngredientViewModel},
    measure::{Measure, MeasureViewModel},
    plant_class::{PlantClass, PlantClassViewModel},
    plot::Plot,
    purchase::{Purchase, PurchaseViewModel},
    recipe::{Recipe, RecipeViewModel},
    vegetation::{Vegetation, VegetationFilter, VegetationViewModel},
    worker::{Worker, WorkerWithMeasures},
};
use sqlx::SqlitePool;
use thiserror::Error;
use utils::pagination::{
    ListQuery, Paged, PagingError, SortSelector, apply_sort, compute_paging_info, paginate,
};

#[derive(Debug, Error)]
pub enum ListError {
    #[error(transparent)]
    Paging(#[from] PagingError),
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),
}

/// Run the engine over an already-fetched collection.
fn page_items<T: SortSelector>(
    items: Vec<T>,
    query: ListQuery,
    items_per_page: i64,
) -> Result<Paged<T>, PagingError> {
    let paging = compute_paging_info(
        items.len() as i64,
        query.page,
        items_per_page,
        query.sort,
        query.ascending,
    )?;
    let sorted = apply_sort(items, query.sort, query.ascending);
    Ok(Paged {
        items: paginate(sorted, query.page, items_per_page),
        paging,
    })
}

/// Workers, optionally with each worker's measures embedded (`complex`).
pub async fn list_workers(
    pool: &SqlitePool,
    items_per_page: i64,
    query: ListQuery,
    complex: bool,
) -> Result<Paged<WorkerWithMeasures>, ListError> {
    let workers = Worker::find_all(pool).await?;
    let paged = page_items(workers, query, items_per_page)?;

    let mut items = Vec::with_capacity(paged.items.len());
    for worker in paged.items {
        let measures = if complex {
            Measure::find_by_worker_id(pool, worker.id).await?
        } else {
            Vec::new()
        };
        items.push(WorkerWithMeasures { worker, measures });
    }
    Ok(Paged {
        items,
        paging: paged.paging,
    })
}

pub async fn list_measures(
    pool: &SqlitePool,
    items_per_page: i64,
    query: ListQuery,
) -> Result<Paged<MeasureViewModel>, ListError> {
    let measures = Measure::find_all(pool).await?;
    Ok(page_items(measures, query, items_per_page)?)
}

pub async fn list_plots(
    pool: &SqlitePool,
    items_per_page: i64,
    query: ListQuery,
) -> Result<Paged<Plot>, ListError> {
    let plots = Plot::find_all(pool).await?;
    Ok(page_items(plots, query, items_per_page)?)
}

pub async fn list_plant_classes(
    pool: &SqlitePool,
    items_per_page: i64,
    query: ListQuery,
) -> Result<Paged<PlantClassViewModel>, ListError> {
    let classes = PlantClass::find_all(pool).await?;
    Ok(page_items(classes, query, items_per_page)?)
}

pub async fn list_vegetations(
    pool: &SqlitePool,
    items_per_page: i64,
    query: ListQuery,
    filter: VegetationFilter,
) -> Result<Paged<VegetationViewModel>, ListError> {
    let vegetations = Vegetation::find_all(pool, filter).await?;
    Ok(page_items(vegetations, query, items_per_page)?)
}

pub async fn list_harvests(
    pool: &SqlitePool,
    items_per_page: i64,
    query: ListQuery,
) -> Result<Paged<HarvestViewModel>, ListError> {
    let harvests = Harvest::find_all(pool).await?;
    Ok(page_items(harvests, query, items_per_page)?)
}

pub async fn list_purchases(
    pool: &SqlitePool,
    items_per_page: i64,
    query: ListQuery,
) -> Result<Paged<PurchaseViewModel>, ListError> {
    let purchases = Purchase::find_all(pool).await?;
    Ok(page_items(purchases, query, items_per_page)?)
}

pub async fn list_recipes(
    pool: &SqlitePool,
    items_per_page: i64,
    query: ListQuery,
) -> Result<Paged<RecipeViewModel>, ListError> {
    let recipes = Recipe::find_all(pool).await?;
    Ok(page_items(recipes, query, items_per_page)?)
}

pub async fn list_ingredients(
    pool: &SqlitePool,
    items_per_page: i64,
    query: ListQuery,
) -> Result<Paged<IngredientViewModel>, ListError> {
    let ingredients = Ingredient::find_all(pool).await?;
    Ok(page_items(ingredients, query, items_per_page)?)
}

#[cfg(test)]
mod tests {
    use db::{
        DBService,
        models::{
            measure::{CreateMeasure, MeasureType},
            plant_class::{CreatePlantClass, PlantClass},
            plot::{CreatePlot, Plot},
            vegetation::{CreateVegetation, Vegetation},
            worker::{CreateWorker, Worker, WorkerType},
        },
    };
    use uuid::Uuid;

    use super::*;

    async fn seed_workers(db: &DBService, tags: &[&str]) -> Uuid {
        let wt = WorkerType::create(&db.pool, "Seasonal", None).await.unwrap();
        for (i, tag) in tags.iter().enumerate() {
            Worker::create(
                &db.pool,
                &CreateWorker {
                    worker_type_id: Some(wt.id),
                    tag: (*tag).into(),
                    notes: None,
                    daily_wage: 80.0 + i as f64,
                    email: None,
                    phone: None,
                },
            )
            .await
            .unwrap();
        }
        wt.id
    }

    #[tokio::test]
    async fn workers_are_sorted_and_sliced() {
        let db = DBService::new("sqlite::memory:").await.unwrap();
        seed_workers(&db, &["delta", "alpha", "echo", "bravo", "golf", "foxtrot", "charlie"])
            .await;

        let query = ListQuery {
            page: 1,
            sort: 3, // tag
            ascending: true,
        };
        let paged = list_workers(&db.pool, 3, query, false).await.unwrap();
        assert_eq!(paged.paging.total_items, 7);
        assert_eq!(paged.paging.total_pages, 3);
        let tags: Vec<_> = paged.items.iter().map(|w| w.tag.clone()).collect();
        assert_eq!(tags, vec!["alpha", "bravo", "charlie"]);

        let last = list_workers(&db.pool, 3, ListQuery { page: 3, ..query }, false)
            .await
            .unwrap();
        assert_eq!(last.items.len(), 1);
        assert_eq!(last.items[0].tag, "golf");
    }

    #[tokio::test]
    async fn descending_sort_reverses_page_order() {
        let db = DBService::new("sqlite::memory:").await.unwrap();
        seed_workers(&db, &["alpha", "bravo", "charlie"]).await;

        let paged = list_workers(
            &db.pool,
            10,
            ListQuery {
                page: 1,
                sort: 3,
                ascending: false,
            },
            false,
        )
        .await
        .unwrap();
        let tags: Vec<_> = paged.items.iter().map(|w| w.tag.clone()).collect();
        assert_eq!(tags, vec!["charlie", "bravo", "alpha"]);
    }

    #[tokio::test]
    async fn out_of_range_page_is_rejected() {
        let db = DBService::new("sqlite::memory:").await.unwrap();
        seed_workers(&db, &["alpha", "bravo", "charlie", "delta"]).await;

        let err = list_workers(
            &db.pool,
            3,
            ListQuery {
                page: 3,
                sort: 1,
                ascending: true,
            },
            false,
        )
        .await
        .unwrap_err();
        assert!(matches!(
            err,
            ListError::Paging(PagingError::OutOfRange {
                page: 3,
                total_pages: 2
            })
        ));
    }

    #[tokio::test]
    async fn empty_table_accepts_any_page() {
        let db = DBService::new("sqlite::memory:").await.unwrap();
        let paged = list_workers(
            &db.pool,
            3,
            ListQuery {
                page: 5,
                sort: 1,
                ascending: true,
            },
            false,
        )
        .await
        .unwrap();
        assert!(paged.items.is_empty());
        assert_eq!(paged.paging.total_pages, 0);
    }

    #[tokio::test]
    async fn unknown_sort_key_keeps_insertion_order() {
        let db = DBService::new("sqlite::memory:").await.unwrap();
        seed_workers(&db, &["delta", "alpha", "charlie"]).await;

        let paged = list_workers(
            &db.pool,
            10,
            ListQuery {
                page: 1,
                sort: 99,
                ascending: true,
            },
            false,
        )
        .await
        .unwrap();
        let tags: Vec<_> = paged.items.iter().map(|w| w.tag.clone()).collect();
        assert_eq!(tags, vec!["delta", "alpha", "charlie"]);
    }

    #[tokio::test]
    async fn vegetation_filter_narrows_list() {
        let db = DBService::new("sqlite::memory:").await.unwrap();
        let plot_a = Plot::create(
            &db.pool,
            &CreatePlot {
                tag: "north".into(),
                latitude: None,
                longitude: None,
                area: Some(1.2),
                soil_quality: None,
                soil_type: None,
                sunlight: None,
                infrastructure: None,
            },
        )
        .await
        .unwrap();
        let plot_b = Plot::create(
            &db.pool,
            &CreatePlot {
                tag: "south".into(),
                latitude: None,
                longitude: None,
                area: None,
                soil_quality: None,
                soil_type: None,
                sunlight: None,
                infrastructure: None,
            },
        )
        .await
        .unwrap();
        let class = PlantClass::create(
            &db.pool,
            &CreatePlantClass {
                name: "Tomato".into(),
                passport: None,
                parent_id: None,
                fiber_per_serving: None,
                potassium_per_serving: None,
            },
        )
        .await
        .unwrap();
        for plot in [plot_a.id, plot_a.id, plot_b.id] {
            Vegetation::create(
                &db.pool,
                &CreateVegetation {
                    units: 10,
                    planted_on: chrono::Utc::now(),
                    removed_on: None,
                    yield_anticipated_on: None,
                    expiry_anticipated_on: None,
                    plot_id: plot,
                    plant_class_id: class.id,
                },
            )
            .await
            .unwrap();
        }

        let all = list_vegetations(
            &db.pool,
            10,
            ListQuery::default(),
            VegetationFilter::default(),
        )
        .await
        .unwrap();
        assert_eq!(all.paging.total_items, 3);

        let filtered = list_vegetations(
            &db.pool,
            10,
            ListQuery::default(),
            VegetationFilter {
                plot_id: Some(plot_a.id),
                plant_class_id: None,
            },
        )
        .await
        .unwrap();
        assert_eq!(filtered.paging.total_items, 2);
        assert!(filtered.items.iter().all(|v| v.plot_id == plot_a.id));
        assert!(filtered.items.iter().all(|v| v.plot_tag == "north"));
    }

    #[tokio::test]
    async fn complex_listing_embeds_measures() {
        let db = DBService::new("sqlite::memory:").await.unwrap();
        seed_workers(&db, &["alpha"]).await;
        let worker_id = Worker::find_all(&db.pool).await.unwrap()[0].id;

        let plot = Plot::create(
            &db.pool,
            &CreatePlot {
                tag: "north".into(),
                latitude: None,
                longitude: None,
                area: None,
                soil_quality: None,
                soil_type: None,
                sunlight: None,
                infrastructure: None,
            },
        )
        .await
        .unwrap();
        let class = PlantClass::create(
            &db.pool,
            &CreatePlantClass {
                name: "Tomato".into(),
                passport: None,
                parent_id: None,
                fiber_per_serving: None,
                potassium_per_serving: None,
            },
        )
        .await
        .unwrap();
        let vegetation = Vegetation::create(
            &db.pool,
            &CreateVegetation {
                units: 5,
                planted_on: chrono::Utc::now(),
                removed_on: None,
                yield_anticipated_on: None,
                expiry_anticipated_on: None,
                plot_id: plot.id,
                plant_class_id: class.id,
            },
        )
        .await
        .unwrap();
        let mt = MeasureType::create(&db.pool, "Watering", None).await.unwrap();
        db::models::measure::Measure::create(
            &db.pool,
            &CreateMeasure {
                performed_on: chrono::Utc::now(),
                description: "morning watering".into(),
                measure_type_id: mt.id,
                vegetation_id: vegetation.id,
                worker_id: Some(worker_id),
                duration_minutes: Some(30),
            },
        )
        .await
        .unwrap();

        let simple = list_workers(&db.pool, 10, ListQuery::default(), false)
            .await
            .unwrap();
        assert!(simple.items[0].measures.is_empty());

        let complex = list_workers(&db.pool, 10, ListQuery::default(), true)
            .await
            .unwrap();
        assert_eq!(complex.items[0].measures.len(), 1);
        assert_eq!(complex.items[0].measures[0].measure_type_caption, "Watering");
        assert_eq!(complex.items[0].measures[0].plant_class_name, "Tomato");
    }
}
