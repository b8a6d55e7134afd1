//! Master-detail report rows: grouped child records with aggregates, ready
//! for a renderer (PDF/Excel generation happens elsewhere).

use db::models::{
    harvest::{Harvest, HarvestViewModel},
    ingredient::{Ingredient, IngredientViewModel},
    measure::{Measure, MeasureViewModel},
    purchase::Purchase,
    recipe::{Recipe, RecipeViewModel},
    worker::{Worker, WorkerViewModel},
};
use serde::{Deserialize, Serialize};
use sqlx::SqlitePool;
use ts_rs::TS;

/// One worker with every measure they performed and the summed duration.
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
pub struct WorkerMeasuresReport {
    pub worker: WorkerViewModel,
    pub measures: Vec<MeasureViewModel>,
    pub total_duration_minutes: i64,
}

pub async fn worker_measures(pool: &SqlitePool) -> Result<Vec<WorkerMeasuresReport>, sqlx::Error> {
    let workers = Worker::find_all(pool).await?;
    let mut rows = Vec::with_capacity(workers.len());
    for worker in workers {
        let measures = Measure::find_by_worker_id(pool, worker.id).await?;
        let total_duration_minutes = measures
            .iter()
            .filter_map(|m| m.duration_minutes)
            .map(i64::from)
            .sum();
        rows.push(WorkerMeasuresReport {
            worker,
            measures,
            total_duration_minutes,
        });
    }
    Ok(rows)
}

/// One harvest with its purchases and summed weight/gain.
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
pub struct HarvestPurchasesReport {
    pub harvest: HarvestViewModel,
    pub purchases: Vec<Purchase>,
    pub total_weight: f64,
    pub total_gain: f64,
}

pub async fn harvest_purchases(
    pool: &SqlitePool,
) -> Result<Vec<HarvestPurchasesReport>, sqlx::Error> {
    let harvests = Harvest::find_all(pool).await?;
    let mut rows = Vec::with_capacity(harvests.len());
    for harvest in harvests {
        let purchases = Purchase::find_by_harvest_id(pool, harvest.id).await?;
        let total_weight = purchases.iter().map(|p| p.weight).sum();
        let total_gain = purchases.iter().map(|p| p.gain).sum();
        rows.push(HarvestPurchasesReport {
            harvest,
            purchases,
            total_weight,
            total_gain,
        });
    }
    Ok(rows)
}

/// One recipe with the plant classes used as ingredients.
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
pub struct RecipePlantsReport {
    pub recipe: RecipeViewModel,
    pub ingredients: Vec<IngredientViewModel>,
}

pub async fn recipe_plants(pool: &SqlitePool) -> Result<Vec<RecipePlantsReport>, sqlx::Error> {
    let recipes = Recipe::find_all(pool).await?;
    let ingredients = Ingredient::find_all(pool).await?;
    let rows = recipes
        .into_iter()
        .map(|recipe| {
            let ingredients = ingredients
                .iter()
                .filter(|i| i.recipe_id == recipe.id)
                .cloned()
                .collect();
            RecipePlantsReport {
                recipe,
                ingredients,
            }
        })
        .collect();
    Ok(rows)
}

#[cfg(test)]
mod tests {
    use chrono::Utc;
    use db::{
        DBService,
        models::{
            harvest::CreateHarvest,
            plant_class::{CreatePlantClass, PlantClass},
            plot::{CreatePlot, Plot},
            purchase::CreatePurchase,
            vegetation::{CreateVegetation, Vegetation},
        },
    };

    use super::*;

    #[tokio::test]
    async fn harvest_report_groups_and_sums_purchases() {
        let db = DBService::new("sqlite::memory:").await.unwrap();
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
                name: "Apple".into(),
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
                units: 20,
                planted_on: Utc::now(),
                removed_on: None,
                yield_anticipated_on: None,
                expiry_anticipated_on: None,
                plot_id: plot.id,
                plant_class_id: class.id,
            },
        )
        .await
        .unwrap();
        let harvest = Harvest::create(
            &db.pool,
            &CreateHarvest {
                collected_on: Utc::now(),
                weight: 40.0,
                tag: Some("autumn".into()),
                vegetation_id: vegetation.id,
            },
        )
        .await
        .unwrap();
        for (weight, gain) in [(10.0, 25.0), (15.0, 40.0)] {
            Purchase::create(
                &db.pool,
                &CreatePurchase {
                    collected_on: Utc::now(),
                    weight,
                    gain,
                    tag: None,
                    harvest_id: harvest.id,
                },
            )
            .await
            .unwrap();
        }

        let rows = harvest_purchases(&db.pool).await.unwrap();
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].harvest.plant_class_name, "Apple");
        assert_eq!(rows[0].purchases.len(), 2);
        assert_eq!(rows[0].total_weight, 25.0);
        assert_eq!(rows[0].total_gain, 65.0);
    }
}
