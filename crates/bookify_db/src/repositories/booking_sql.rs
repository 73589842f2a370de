//! SQL implementation of the booking repository
//!
//! This module provides a SQL implementation of the BookingRepository trait.

use crate::error::DbError;
use crate::repositories::booking::{Booking, BookingRepository, BookingStatus};
use crate::DbClient;
use bookify_common::services::BoxFuture;
use sqlx::Row;
use std::str::FromStr;
use tracing::{debug, error, info};

/// SQL implementation of the booking repository
#[derive(Debug, Clone)]
pub struct SqlBookingRepository {
    /// The database client
    db_client: DbClient,
}

impl SqlBookingRepository {
    /// Create a new SQL booking repository.
    pub fn new(db_client: DbClient) -> Self {
        Self { db_client }
    }

    fn booking_from_row(row: &sqlx::any::AnyRow) -> Booking {
        let status: String = row
            .try_get("status")
            .unwrap_or_else(|_| "pending".to_string());
        Booking {
            id: row.try_get("id").ok(),
            service: row.try_get("service").unwrap_or_default(),
            date: row.try_get("date").unwrap_or_default(),
            time: row.try_get("time").unwrap_or_default(),
            duration_minutes: row.try_get("duration_minutes").unwrap_or(60),
            name: row.try_get("name").unwrap_or_default(),
            phone: row.try_get("phone").unwrap_or_default(),
            email: row.try_get("email").ok(),
            status: BookingStatus::from_str(&status).unwrap_or(BookingStatus::Pending),
            calendar_event_id: row.try_get("calendar_event_id").ok(),
            created_at: None, // DateTime<Utc> doesn't implement Decode for sqlx::Any
        }
    }
}

impl BookingRepository for SqlBookingRepository {
    fn init_schema(&self) -> BoxFuture<'_, (), DbError> {
        Box::pin(async move {
            debug!("Initializing booking schema");

            let query = r#"
                CREATE TABLE IF NOT EXISTS bookings (
                    id INTEGER PRIMARY KEY AUTOINCREMENT,
                    service TEXT NOT NULL,
                    date TEXT NOT NULL,
                    time TEXT NOT NULL,
                    duration_minutes INTEGER NOT NULL DEFAULT 60,
                    name TEXT NOT NULL,
                    phone TEXT NOT NULL,
                    email TEXT,
                    status TEXT NOT NULL DEFAULT 'pending',
                    calendar_event_id TEXT,
                    created_at TIMESTAMP DEFAULT CURRENT_TIMESTAMP
                )
            "#;

            self.db_client.execute(query).await?;

            info!("Booking schema initialized successfully");
            Ok(())
        })
    }

    fn create_booking(&self, booking: Booking) -> BoxFuture<'_, Booking, DbError> {
        Box::pin(async move {
            debug!("Creating pending booking for {}", booking.name);

            let query = r#"
                INSERT INTO bookings (service, date, time, duration_minutes, name, phone, email, status)
                VALUES ($1, $2, $3, $4, $5, $6, $7, 'pending')
                RETURNING id, service, date, time, duration_minutes, name, phone, email,
                          status, calendar_event_id, created_at
            "#;

            // Manual row mapping instead of query_as to stay compatible with
            // the sqlx::Any driver
            let row = sqlx::query(query)
                .bind(&booking.service)
                .bind(&booking.date)
                .bind(&booking.time)
                .bind(booking.duration_minutes)
                .bind(&booking.name)
                .bind(&booking.phone)
                .bind(booking.email.as_deref())
                .fetch_one(self.db_client.pool())
                .await
                .map_err(|e| {
                    error!("Failed to insert booking: {}", e);
                    DbError::QueryError(e.to_string())
                })?;

            let inserted = Self::booking_from_row(&row);

            info!("Booking record created with id {:?}", inserted.id);
            Ok(inserted)
        })
    }

    fn confirm_booking(
        &self,
        id: i64,
        calendar_event_id: &str,
    ) -> BoxFuture<'_, Booking, DbError> {
        let calendar_event_id = calendar_event_id.to_string();
        Box::pin(async move {
            debug!("Confirming booking {} with event {}", id, calendar_event_id);

            let query = r#"
                UPDATE bookings
                SET status = 'confirmed', calendar_event_id = $1
                WHERE id = $2
                RETURNING id, service, date, time, duration_minutes, name, phone, email,
                          status, calendar_event_id, created_at
            "#;

            let row = sqlx::query(query)
                .bind(&calendar_event_id)
                .bind(id)
                .fetch_one(self.db_client.pool())
                .await
                .map_err(|e| {
                    error!("Failed to confirm booking {}: {}", id, e);
                    DbError::QueryError(e.to_string())
                })?;

            let updated = Self::booking_from_row(&row);

            info!("Booking {} confirmed", id);
            Ok(updated)
        })
    }

    fn find_by_id(&self, id: i64) -> BoxFuture<'_, Option<Booking>, DbError> {
        Box::pin(async move {
            debug!("Finding booking {}", id);

            let query = r#"
                SELECT id, service, date, time, duration_minutes, name, phone, email,
                       status, calendar_event_id, created_at
                FROM bookings
                WHERE id = $1
            "#;

            let result = sqlx::query(query)
                .bind(id)
                .fetch_optional(self.db_client.pool())
                .await
                .map_err(|e| {
                    error!("Failed to find booking {}: {}", id, e);
                    DbError::QueryError(e.to_string())
                })?;

            Ok(result.as_ref().map(Self::booking_from_row))
        })
    }
}
