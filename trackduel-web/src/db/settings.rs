//! Settings table reads

use sqlx::SqlitePool;
use trackduel_common::Result;

/// Read a setting value, `None` if the key is missing or NULL
pub async fn get_setting(pool: &SqlitePool, key: &str) -> Result<Option<String>> {
    let value: Option<Option<String>> =
        sqlx::query_scalar("SELECT value FROM settings WHERE key = ?")
            .bind(key)
            .fetch_optional(pool)
            .await?;

    Ok(value.flatten())
}

/// Read a setting as an integer; unparseable values count as missing
pub async fn get_setting_i64(pool: &SqlitePool, key: &str) -> Result<Option<i64>> {
    Ok(get_setting(pool, key).await?.and_then(|v| v.parse().ok()))
}

/// Read a setting as a float; unparseable values count as missing
pub async fn get_setting_f64(pool: &SqlitePool, key: &str) -> Result<Option<f64>> {
    Ok(get_setting(pool, key).await?.and_then(|v| v.parse().ok()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use trackduel_common::db::init_schema;

    async fn memory_pool() -> SqlitePool {
        let pool = SqlitePool::connect("sqlite::memory:").await.unwrap();
        init_schema(&pool).await.unwrap();
        pool
    }

    #[tokio::test]
    async fn reads_seeded_defaults() {
        let pool = memory_pool().await;

        assert_eq!(get_setting_i64(&pool, "pairing_pool_size").await.unwrap(), Some(100));
        assert_eq!(get_setting_f64(&pool, "stars_window_min").await.unwrap(), Some(1000.0));
    }

    #[tokio::test]
    async fn missing_key_is_none() {
        let pool = memory_pool().await;
        assert_eq!(get_setting(&pool, "no_such_key").await.unwrap(), None);
    }

    #[tokio::test]
    async fn garbage_value_is_none() {
        let pool = memory_pool().await;

        sqlx::query("UPDATE settings SET value = 'lots' WHERE key = 'pairing_pool_size'")
            .execute(&pool)
            .await
            .unwrap();

        assert_eq!(get_setting_i64(&pool, "pairing_pool_size").await.unwrap(), None);
    }
}
