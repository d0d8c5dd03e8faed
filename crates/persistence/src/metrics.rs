//! Store query timing and pool gauges.

use metrics::{counter, gauge, histogram};
use sqlx::PgPool;
use std::time::Instant;

/// Times one store query. Finish it with the query result so failures are
/// labelled and counted.
///
/// ```ignore
/// let timer = QueryTimer::new("find_match_by_id");
/// let result = sqlx::query_as::<_, MatchEntity>(...).fetch_optional(&pool).await;
/// timer.finish(&result);
/// ```
pub struct QueryTimer {
    query: &'static str,
    start: Instant,
}

impl QueryTimer {
    pub fn new(query: &'static str) -> Self {
        Self {
            query,
            start: Instant::now(),
        }
    }

    pub fn finish<T, E>(self, result: &Result<T, E>) {
        let outcome = outcome_label(result);
        histogram!(
            "database_query_duration_seconds",
            "query" => self.query,
            "outcome" => outcome
        )
        .record(self.start.elapsed().as_secs_f64());

        if result.is_err() {
            counter!("database_query_errors_total", "query" => self.query).increment(1);
        }
    }
}

fn outcome_label<T, E>(result: &Result<T, E>) -> &'static str {
    match result {
        Ok(_) => "ok",
        Err(_) => "error",
    }
}

/// Pool gauges, refreshed on every scrape of the metrics endpoint.
pub fn record_pool_metrics(pool: &PgPool) {
    let size = pool.size() as usize;
    let idle = pool.num_idle();

    gauge!("database_connections_total").set(size as f64);
    gauge!("database_connections_idle").set(idle as f64);
    gauge!("database_connections_active").set(size.saturating_sub(idle) as f64);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_outcome_label() {
        assert_eq!(outcome_label::<u8, ()>(&Ok(1)), "ok");
        assert_eq!(outcome_label::<u8, ()>(&Err(())), "error");
    }

    #[test]
    fn test_finish_without_recorder() {
        // Recording is a no-op until a global recorder is installed.
        let timer = QueryTimer::new("try_check_in");
        assert_eq!(timer.query, "try_check_in");
        timer.finish::<(), &str>(&Err("pool timed out"));
    }
}
