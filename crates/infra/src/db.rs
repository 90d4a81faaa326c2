//! # PostgreSQL 接続プール
//!
//! `STORE_BACKEND=postgres` のときに使う。`users` テーブルの作成はこのクレートの責務外。

use std::time::Duration;

use sqlx::{PgPool, postgres::PgPoolOptions};

/// 接続プールの設定
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PoolSettings {
    pub max_connections: u32,
    /// 接続取得を待つ上限。超えるとクエリはエラーになる
    pub acquire_timeout: Duration,
}

impl Default for PoolSettings {
    fn default() -> Self {
        Self {
            max_connections: 10,
            acquire_timeout: Duration::from_secs(5),
        }
    }
}

/// デフォルト設定で接続プールを作成する
///
/// 起動時に一度だけ呼び、`PostgresUserRepository` に渡す。
pub async fn create_pool(database_url: &str) -> Result<PgPool, sqlx::Error> {
    create_pool_with(database_url, PoolSettings::default()).await
}

pub async fn create_pool_with(
    database_url: &str,
    settings: PoolSettings,
) -> Result<PgPool, sqlx::Error> {
    let pool = PgPoolOptions::new()
        .max_connections(settings.max_connections)
        .acquire_timeout(settings.acquire_timeout)
        .connect(database_url)
        .await?;

    tracing::debug!(
        max_connections = settings.max_connections,
        "PostgreSQL 接続プールを作成しました"
    );
    Ok(pool)
}
