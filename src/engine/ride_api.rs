use super::helpers::{fetch_ride_for_update, update_ride};
use super::Engine;

use async_trait::async_trait;
use sqlx::{types::Json, Acquire, Executor, Row};
use uuid::Uuid;

use crate::{
    api::{RideAPI, RideSubmission},
    auth::User,
    entities::{Ride, RidePayload, SubmissionReceipt},
    error::{invalid_input_error, unauthorized_error, Error},
};

#[async_trait]
impl RideSubmission for Engine {
    #[tracing::instrument(skip(self, payload))]
    async fn submit_ride(
        &self,
        user: User,
        payload: RidePayload,
    ) -> Result<SubmissionReceipt, Error> {
        payload.validate()?;
        self.catalog.find(&payload.vehicle_type)?;

        let ride = Ride::new(user.id, payload);

        let mut conn = self.pool.acquire().await?;

        conn.execute(
            sqlx::query(
                "INSERT INTO rides (id, user_id, status, created_at, data) VALUES ($1, $2, $3, $4, $5)",
            )
            .bind(&ride.id)
            .bind(&ride.user_id)
            .bind(ride.status.name())
            .bind(&ride.created_at)
            .bind(Json(&ride)),
        )
        .await?;

        tracing::info!("created ride {}", ride.id);

        Ok(SubmissionReceipt {
            message: "Ride created successfully".into(),
            ride_id: ride.id,
        })
    }
}

#[async_trait]
impl RideAPI for Engine {
    #[tracing::instrument(skip(self))]
    async fn find_ride(&self, user: User, id: Uuid) -> Result<Ride, Error> {
        let mut conn = self.pool.acquire().await?;

        let maybe_result = conn
            .fetch_optional(sqlx::query("SELECT data FROM rides WHERE id = $1").bind(&id))
            .await?;

        let result = maybe_result.ok_or_else(invalid_input_error)?;
        let Json(ride): Json<Ride> = result.try_get("data")?;

        authorize_read(&user, &ride)?;

        Ok(ride)
    }

    #[tracing::instrument(skip(self))]
    async fn list_rides(&self, user: User) -> Result<Vec<Ride>, Error> {
        let mut conn = self.pool.acquire().await?;

        let rows = conn
            .fetch_all(
                sqlx::query("SELECT data FROM rides WHERE user_id = $1 ORDER BY created_at DESC")
                    .bind(&user.id),
            )
            .await?;

        let mut rides = Vec::with_capacity(rows.len());
        for row in rows.iter() {
            let Json(ride): Json<Ride> = row.try_get("data")?;
            rides.push(ride);
        }

        Ok(rides)
    }

    #[tracing::instrument(skip(self))]
    async fn accept_ride(&self, user: User, id: Uuid) -> Result<Ride, Error> {
        user.require_driver()?;

        let mut conn = self.pool.acquire().await?;
        let mut tx = conn.begin().await?;

        let mut ride = fetch_ride_for_update(&mut tx, &id).await?;

        ride.accept(user.id)?;

        update_ride(&mut tx, &ride).await?;

        tx.commit().await?;

        tracing::info!("driver {} accepted ride {}", user.id, ride.id);

        Ok(ride)
    }

    #[tracing::instrument(skip(self))]
    async fn cancel_ride(&self, user: User, id: Uuid) -> Result<Ride, Error> {
        let mut conn = self.pool.acquire().await?;
        let mut tx = conn.begin().await?;

        let mut ride = fetch_ride_for_update(&mut tx, &id).await?;

        authorize_read(&user, &ride)?;

        ride.cancel()?;

        update_ride(&mut tx, &ride).await?;

        tx.commit().await?;

        Ok(ride)
    }

    #[tracing::instrument(skip(self))]
    async fn complete_ride(&self, user: User, id: Uuid) -> Result<Ride, Error> {
        let mut conn = self.pool.acquire().await?;
        let mut tx = conn.begin().await?;

        let mut ride = fetch_ride_for_update(&mut tx, &id).await?;

        if ride.driver_id() != Some(user.id) {
            return Err(unauthorized_error());
        }

        ride.complete()?;

        update_ride(&mut tx, &ride).await?;

        tx.commit().await?;

        Ok(ride)
    }
}

/// Passengers see their own rides; drivers see pending rides and the ones
/// they accepted.
fn authorize_read(user: &User, ride: &Ride) -> Result<(), Error> {
    let allowed = ride.user_id == user.id
        || (user.is_driver() && (ride.is_pending() || ride.driver_id() == Some(user.id)));

    if allowed {
        return Ok(());
    }

    Err(unauthorized_error())
}
