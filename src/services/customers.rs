use crate::{db::DbPool, entities::customer, errors::ServiceError};
use chrono::Utc;
use sea_orm::{ActiveModelTrait, EntityTrait, QueryOrder, Set};
use serde::Deserialize;
use std::sync::Arc;
use tracing::{info, instrument};

#[derive(Debug, Clone, Deserialize)]
pub struct NewCustomer {
    pub phone: String,
    pub name: String,
    pub email: Option<String>,
}

/// Phone-keyed customer records referenced by orders and reservations.
#[derive(Clone)]
pub struct CustomerService {
    db_pool: Arc<DbPool>,
}

impl CustomerService {
    pub fn new(db_pool: Arc<DbPool>) -> Self {
        Self { db_pool }
    }

    #[instrument(skip(self, new_customer), fields(phone = %new_customer.phone))]
    pub async fn create_customer(
        &self,
        new_customer: NewCustomer,
    ) -> Result<customer::Model, ServiceError> {
        let db = &*self.db_pool;

        if customer::Entity::find_by_id(new_customer.phone.clone())
            .one(db)
            .await?
            .is_some()
        {
            return Err(ServiceError::Conflict(format!(
                "Customer with phone {} already exists",
                new_customer.phone
            )));
        }

        let row = customer::ActiveModel {
            phone: Set(new_customer.phone),
            name: Set(new_customer.name),
            email: Set(new_customer.email),
            created_at: Set(Utc::now()),
        }
        .insert(db)
        .await?;

        info!(phone = %row.phone, "Customer created");
        Ok(row)
    }

    pub async fn list_customers(&self) -> Result<Vec<customer::Model>, ServiceError> {
        let db = &*self.db_pool;

        Ok(customer::Entity::find()
            .order_by_asc(customer::Column::Name)
            .all(db)
            .await?)
    }

    pub async fn get_customer(&self, phone: &str) -> Result<customer::Model, ServiceError> {
        let db = &*self.db_pool;

        customer::Entity::find_by_id(phone.to_string())
            .one(db)
            .await?
            .ok_or_else(|| ServiceError::NotFound(format!("Customer {} not found", phone)))
    }
}
