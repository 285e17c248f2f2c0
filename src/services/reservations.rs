use crate::{
    db::DbPool,
    entities::reservation,
    errors::ServiceError,
    models::ReservationStatus,
};
use chrono::{DateTime, Utc};
use sea_orm::{ActiveModelTrait, ColumnTrait, EntityTrait, QueryFilter, QueryOrder, Set};
use serde::Deserialize;
use std::sync::Arc;
use tracing::{info, instrument};
use uuid::Uuid;

#[derive(Debug, Clone, Deserialize)]
pub struct NewReservation {
    pub customer_id: String,
    pub table_id: Option<i64>,
    pub reserved_for: DateTime<Utc>,
    pub people_count: i32,
    pub notes: Option<String>,
}

#[derive(Clone)]
pub struct ReservationService {
    db_pool: Arc<DbPool>,
}

impl ReservationService {
    pub fn new(db_pool: Arc<DbPool>) -> Self {
        Self { db_pool }
    }

    #[instrument(skip(self, new_reservation), fields(customer_id = %new_reservation.customer_id))]
    pub async fn create_reservation(
        &self,
        new_reservation: NewReservation,
    ) -> Result<reservation::Model, ServiceError> {
        let db = &*self.db_pool;

        let row = reservation::ActiveModel {
            customer_id: Set(new_reservation.customer_id),
            table_id: Set(new_reservation.table_id),
            reserved_for: Set(new_reservation.reserved_for),
            people_count: Set(new_reservation.people_count),
            status: Set(ReservationStatus::Booked.to_string()),
            notes: Set(new_reservation.notes),
            unique_code: Set(Uuid::new_v4().to_string()),
            created_at: Set(Utc::now()),
            ..Default::default()
        }
        .insert(db)
        .await?;

        info!(reservation_id = row.id, code = %row.unique_code, "Reservation created");
        Ok(row)
    }

    /// Reservations from the start of today onwards, soonest first.
    pub async fn list_upcoming(&self) -> Result<Vec<reservation::Model>, ServiceError> {
        let db = &*self.db_pool;
        let start_of_today = Utc::now()
            .date_naive()
            .and_time(chrono::NaiveTime::MIN)
            .and_utc();

        Ok(reservation::Entity::find()
            .filter(reservation::Column::ReservedFor.gte(start_of_today))
            .order_by_asc(reservation::Column::ReservedFor)
            .all(db)
            .await?)
    }

    #[instrument(skip(self))]
    pub async fn update_status(
        &self,
        reservation_id: i64,
        status: ReservationStatus,
    ) -> Result<reservation::Model, ServiceError> {
        let db = &*self.db_pool;

        let row = reservation::Entity::find_by_id(reservation_id)
            .one(db)
            .await?
            .ok_or_else(|| {
                ServiceError::NotFound(format!("Reservation {} not found", reservation_id))
            })?;

        let mut active: reservation::ActiveModel = row.into();
        active.status = Set(status.to_string());
        let updated = active.update(db).await?;

        info!(reservation_id, "Reservation status updated");
        Ok(updated)
    }

    #[instrument(skip(self))]
    pub async fn delete_reservation(&self, reservation_id: i64) -> Result<(), ServiceError> {
        let db = &*self.db_pool;

        let result = reservation::Entity::delete_by_id(reservation_id)
            .exec(db)
            .await?;
        if result.rows_affected == 0 {
            return Err(ServiceError::NotFound(format!(
                "Reservation {} not found",
                reservation_id
            )));
        }

        info!(reservation_id, "Reservation deleted");
        Ok(())
    }
}
