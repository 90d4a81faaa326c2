//! # ユーザーストア
//!
//! [`UserRepository`] トレイトとその実装を提供する。
//!
//! - [`InMemoryUserRepository`]: プロセス内の一覧（JSON スナップショットによる永続化は任意）
//! - [`PostgresUserRepository`]: PostgreSQL の `users` テーブル
//!
//! どちらの実装もメールアドレスの一意性を保証し、違反時は
//! [`InfraError::duplicate_email`](crate::InfraError::duplicate_email) を返す。

pub mod memory_user_repository;
pub mod user_repository;

pub use memory_user_repository::InMemoryUserRepository;
pub use user_repository::{PostgresUserRepository, UserRepository};
