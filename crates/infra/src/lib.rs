//! # Userbase インフラ層
//!
//! ユーザーストアと認証情報スキームの具体実装を提供する。
//!
//! ## 責務
//!
//! - **ユーザーストア**: [`UserRepository`] トレイトと、インメモリ実装・PostgreSQL 実装
//! - **認証情報スキーム**: 認証情報の保存形式への変換と比較
//! - **データベース接続**: PostgreSQL への接続プール管理
//!
//! ## 依存関係
//!
//! ```text
//! account-service → infra → domain
//! ```
//!
//! ドメイン層はインフラ層に依存しない。
//!
//! ## モジュール構成
//!
//! - [`credential`] - 認証情報スキーム（Argon2id / 平文）
//! - [`db`] - PostgreSQL 接続プール
//! - [`error`] - インフラ層エラー定義
//! - [`repository`] - ユーザーストア
//!
//! ## 使用例
//!
//! ```rust,ignore
//! use userbase_infra::{InMemoryUserRepository, db, repository::PostgresUserRepository};
//!
//! async fn setup() -> Result<(), Box<dyn std::error::Error>> {
//!     // インメモリ（JSON スナップショット付き）
//!     let memory = InMemoryUserRepository::open("users.json").await?;
//!
//!     // PostgreSQL
//!     let pool = db::create_pool("postgres://localhost/userbase").await?;
//!     let postgres = PostgresUserRepository::new(pool);
//!
//!     Ok(())
//! }
//! ```

pub mod credential;
pub mod db;
pub mod error;
#[cfg(any(test, feature = "test-utils"))]
pub mod mock;
pub mod repository;

pub use credential::{Argon2CredentialScheme, CredentialScheme, PlainCredentialScheme};
pub use error::{InfraError, InfraErrorKind};
pub use repository::{InMemoryUserRepository, PostgresUserRepository, UserRepository};
