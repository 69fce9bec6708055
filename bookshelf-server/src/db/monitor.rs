//! Background readiness monitor
//!
//! Pings the database on an interval and publishes the result to a
//! [`Readiness`]. The schema is bootstrapped on the first successful ping,
//! and the state only becomes `Connected` once that has succeeded.

use std::time::Duration;

use sqlx::PgPool;
use tokio::time::{self, MissedTickBehavior};

use super::{migrations, ConnectionState, Readiness};

/// Upper bound on a single ping.
const PING_TIMEOUT: Duration = Duration::from_secs(2);

/// Shortest interval between pings; shorter requests are raised to this.
pub const MIN_INTERVAL: Duration = Duration::from_millis(10);

/// Run the monitor loop until the state is set to `Disconnecting`.
pub async fn run(pool: PgPool, readiness: Readiness, interval: Duration) {
    let mut schema_ready = false;
    let mut ticker = time::interval(interval.max(MIN_INTERVAL));
    ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

    loop {
        ticker.tick().await;

        if readiness.get() == ConnectionState::Disconnecting {
            break;
        }

        let next = match probe(&pool, &mut schema_ready).await {
            Ok(()) => ConnectionState::Connected,
            Err(e) => {
                if readiness.get() != ConnectionState::Disconnected {
                    tracing::warn!(error = %e, "Database unreachable");
                }
                ConnectionState::Disconnected
            }
        };

        // Shutdown may have started while the probe was in flight.
        match readiness.publish(next) {
            None => break,
            Some(previous) if previous != next => {
                tracing::info!(from = %previous, to = %next, "Database connection state changed");
            }
            Some(_) => {}
        }
    }

    tracing::debug!("Readiness monitor stopped");
}

/// One ping, plus schema bootstrap the first time the ping succeeds.
pub async fn probe(pool: &PgPool, schema_ready: &mut bool) -> Result<(), ProbeError> {
    time::timeout(PING_TIMEOUT, sqlx::query("SELECT 1").execute(pool))
        .await
        .map_err(|_| ProbeError::Timeout(PING_TIMEOUT))??;

    if !*schema_ready {
        migrations::run(pool).await?;
        *schema_ready = true;
    }

    Ok(())
}

/// Why a probe failed
#[derive(Debug, thiserror::Error)]
pub enum ProbeError {
    #[error("ping timed out after {0:?}")]
    Timeout(Duration),

    #[error(transparent)]
    Sqlx(#[from] sqlx::Error),
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::create_pool;

    #[tokio::test]
    async fn unreachable_database_marks_disconnected() {
        let pool = create_pool("postgres://localhost:1/books").unwrap();
        let readiness = Readiness::default();

        let handle = tokio::spawn(run(pool, readiness.clone(), Duration::from_millis(50)));

        let deadline = time::Instant::now() + Duration::from_secs(10);
        while readiness.get() != ConnectionState::Disconnected {
            assert!(time::Instant::now() < deadline, "monitor never gave up");
            time::sleep(Duration::from_millis(20)).await;
        }

        readiness.set(ConnectionState::Disconnecting);
        time::timeout(Duration::from_secs(10), handle)
            .await
            .expect("monitor should stop")
            .expect("monitor panicked");
    }

    #[tokio::test]
    async fn stops_immediately_when_disconnecting() {
        let pool = create_pool("postgres://localhost:1/books").unwrap();
        let readiness = Readiness::new(ConnectionState::Disconnecting);

        time::timeout(
            Duration::from_secs(1),
            run(pool, readiness, Duration::from_millis(10)),
        )
        .await
        .expect("monitor should exit on first tick");
    }

    #[tokio::test]
    async fn zero_interval_is_raised_to_minimum() {
        let pool = create_pool("postgres://localhost:1/books").unwrap();
        let readiness = Readiness::new(ConnectionState::Disconnecting);

        time::timeout(Duration::from_secs(1), run(pool, readiness, Duration::ZERO))
            .await
            .expect("monitor should exit on first tick");
    }

    #[tokio::test]
    #[ignore = "requires database"]
    async fn reachable_database_marks_connected() {
        let url = std::env::var("DATABASE_URL").expect("DATABASE_URL required");
        let pool = create_pool(&url).unwrap();
        let mut schema_ready = false;

        probe(&pool, &mut schema_ready).await.expect("probe failed");
        assert!(schema_ready);
    }
}
