//! # Account Service 設定
//!
//! 環境変数から Account Service の設定を読み込む。
//!
//! | 変数名 | 必須 | 説明 |
//! |--------|------|------|
//! | `ACCOUNT_HOST` | No | バインドアドレス（デフォルト: `0.0.0.0`） |
//! | `ACCOUNT_PORT` | No | ポート番号（デフォルト: `3000`） |
//! | `STORE_BACKEND` | No | `memory`（デフォルト）または `postgres` |
//! | `DATABASE_URL` | `postgres` のとき | PostgreSQL 接続 URL |
//! | `USERS_FILE` | No | インメモリストアのスナップショットファイル |
//! | `CREDENTIAL_SCHEME` | No | `argon2`（デフォルト）または `plain` |

use std::{env, path::PathBuf};

use strum::{Display, EnumString};
use thiserror::Error;

const DEFAULT_HOST: &str = "0.0.0.0";
const DEFAULT_PORT: u16 = 3000;

/// 設定読み込みエラー
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("{name} は有効なポート番号である必要があります: {value}")]
    InvalidPort { name: &'static str, value: String },

    #[error("{name} の値が不正です: {value}（指定可能な値: {expected}）")]
    InvalidChoice {
        name:     &'static str,
        value:    String,
        expected: &'static str,
    },

    #[error("STORE_BACKEND=postgres には DATABASE_URL が必要です")]
    MissingDatabaseUrl,
}

/// ユーザーストアの種類
#[derive(Debug, Clone, PartialEq, Eq, Default, Display, EnumString)]
#[strum(serialize_all = "lowercase")]
pub enum StoreBackend {
    /// インメモリ（`USERS_FILE` 指定時は JSON スナップショットで永続化）
    #[default]
    Memory,
    /// PostgreSQL
    Postgres,
}

/// 認証情報スキームの種類
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Display, EnumString)]
#[strum(serialize_all = "lowercase")]
pub enum CredentialSchemeKind {
    #[default]
    Argon2,
    Plain,
}

/// Account Service の設定
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AccountConfig {
    /// バインドアドレス
    pub host:              String,
    /// ポート番号
    pub port:              u16,
    /// ユーザーストア
    pub store:             StoreBackend,
    /// データベース接続 URL（`postgres` のとき必須）
    pub database_url:      Option<String>,
    /// スナップショットファイル（`memory` のときのみ使用）
    pub users_file:        Option<PathBuf>,
    /// 認証情報スキーム
    pub credential_scheme: CredentialSchemeKind,
}

impl AccountConfig {
    /// 環境変数から設定を読み込む
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| env::var(name).ok())
    }

    /// 任意の参照関数から設定を読み込む
    ///
    /// 空文字列は未設定として扱う。
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let get = |name: &str| lookup(name).filter(|v| !v.is_empty());

        let port = match get("ACCOUNT_PORT") {
            Some(value) => value.parse().map_err(|_| ConfigError::InvalidPort {
                name: "ACCOUNT_PORT",
                value,
            })?,
            None => DEFAULT_PORT,
        };

        let store = parse_choice(get("STORE_BACKEND"), "STORE_BACKEND", "memory, postgres")?;
        let credential_scheme =
            parse_choice(get("CREDENTIAL_SCHEME"), "CREDENTIAL_SCHEME", "argon2, plain")?;

        let database_url = get("DATABASE_URL");
        if store == StoreBackend::Postgres && database_url.is_none() {
            return Err(ConfigError::MissingDatabaseUrl);
        }

        Ok(Self {
            host: get("ACCOUNT_HOST").unwrap_or_else(|| DEFAULT_HOST.to_string()),
            port,
            store,
            database_url,
            users_file: get("USERS_FILE").map(PathBuf::from),
            credential_scheme,
        })
    }
}

/// 列挙値をパースする（未設定はデフォルト）
fn parse_choice<T>(
    value: Option<String>,
    name: &'static str,
    expected: &'static str,
) -> Result<T, ConfigError>
where
    T: std::str::FromStr + Default,
{
    let Some(value) = value else {
        return Ok(T::default());
    };
    value.parse().map_err(|_| ConfigError::InvalidChoice {
        name,
        value,
        expected,
    })
}
