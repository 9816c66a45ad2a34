use async_trait::async_trait;
use chrono::Utc;
use sqlx::PgPool;
use uuid::Uuid;

use super::{VehicleStore, DUPLICATE_PLATE_MESSAGE, PLATE_TAKEN_BY_OTHER_MESSAGE};
use crate::models::vehicle::{NewVehicle, Vehicle, VehicleStatistics};
use crate::utils::errors::{conflict_error, AppError, AppResult};

/// Código de PostgreSQL para violación de restricción única
const UNIQUE_VIOLATION: &str = "23505";

/// Traduce la violación del índice único de placa a Conflict
fn map_write_error(error: sqlx::Error, conflict_message: &str) -> AppError {
    if let sqlx::Error::Database(db_err) = &error {
        if db_err.code().as_deref() == Some(UNIQUE_VIOLATION) {
            return conflict_error(conflict_message);
        }
    }
    AppError::Database(error)
}

#[derive(Clone)]
pub struct PgVehicleStore {
    pool: PgPool,
}

impl PgVehicleStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl VehicleStore for PgVehicleStore {
    async fn list(&self) -> AppResult<Vec<Vehicle>> {
        let vehicles = sqlx::query_as::<_, Vehicle>(
            "SELECT * FROM vehicles ORDER BY intake_date DESC, created_at DESC",
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(vehicles)
    }

    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<Vehicle>> {
        let vehicle = sqlx::query_as::<_, Vehicle>("SELECT * FROM vehicles WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(vehicle)
    }

    async fn plate_exists(&self, plate: &str, exclude_id: Option<Uuid>) -> AppResult<bool> {
        let result: (bool,) = sqlx::query_as(
            "SELECT EXISTS(SELECT 1 FROM vehicles WHERE plate = $1 \
             AND ($2::uuid IS NULL OR id <> $2))",
        )
        .bind(plate)
        .bind(exclude_id)
        .fetch_one(&self.pool)
        .await?;

        Ok(result.0)
    }

    async fn insert(&self, vehicle: NewVehicle) -> AppResult<Vehicle> {
        let now = Utc::now();

        let vehicle = sqlx::query_as::<_, Vehicle>(
            r#"
            INSERT INTO vehicles (
                id, make, model, year, plate, color, intake_date,
                repair_cost, damage_description, created_at, updated_at
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $7, $7)
            RETURNING *
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(vehicle.make)
        .bind(vehicle.model)
        .bind(vehicle.year)
        .bind(vehicle.plate)
        .bind(vehicle.color)
        .bind(now)
        .bind(vehicle.repair_cost)
        .bind(vehicle.damage_description)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| map_write_error(e, DUPLICATE_PLATE_MESSAGE))?;

        Ok(vehicle)
    }

    async fn save(&self, vehicle: &Vehicle) -> AppResult<Option<Vehicle>> {
        let saved = sqlx::query_as::<_, Vehicle>(
            r#"
            UPDATE vehicles
            SET make = $2, model = $3, year = $4, plate = $5, color = $6,
                repair_cost = $7, damage_description = $8, updated_at = $9
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(vehicle.id)
        .bind(&vehicle.make)
        .bind(&vehicle.model)
        .bind(vehicle.year)
        .bind(&vehicle.plate)
        .bind(&vehicle.color)
        .bind(vehicle.repair_cost)
        .bind(&vehicle.damage_description)
        .bind(Utc::now())
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| map_write_error(e, PLATE_TAKEN_BY_OTHER_MESSAGE))?;

        Ok(saved)
    }

    async fn delete(&self, id: Uuid) -> AppResult<Option<Vehicle>> {
        let deleted = sqlx::query_as::<_, Vehicle>("DELETE FROM vehicles WHERE id = $1 RETURNING *")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(deleted)
    }

    async fn delete_all(&self) -> AppResult<u64> {
        let result = sqlx::query("DELETE FROM vehicles")
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected())
    }

    async fn statistics(&self) -> AppResult<VehicleStatistics> {
        let stats = sqlx::query_as::<_, VehicleStatistics>(
            r#"
            SELECT COUNT(*) AS count,
                   COALESCE(SUM(repair_cost), 0) AS total,
                   COALESCE(ROUND(AVG(repair_cost), 2), 0) AS average
            FROM vehicles
            "#,
        )
        .fetch_one(&self.pool)
        .await?;

        Ok(stats)
    }
}
