//! # UserRepository
//!
//! ユーザーレコードの永続化を担当するリポジトリ。
//!
//! ## 設計方針
//!
//! - **ID の採番**: ストアが挿入時に UUID v7 を採番する
//! - **メールアドレスの一意性**: 挿入・更新時の重複は `InfraError::duplicate_email`
//! - **完全なレコードのみ**: 行からの復元で値オブジェクトの検証を通す
//!
//! `users` テーブルの定義:
//!
//! ```sql
//! CREATE TABLE users (
//!     id         UUID PRIMARY KEY,
//!     username   TEXT NOT NULL,
//!     email      TEXT NOT NULL UNIQUE,
//!     credential TEXT NOT NULL
//! );
//! ```

use async_trait::async_trait;
use sqlx::PgPool;
use userbase_domain::{
   credential::StoredCredential,
   user::{Email, NewUser, UserChanges, UserId, UserRecord, Username},
};
use uuid::Uuid;

use crate::error::InfraError;

/// ユーザーリポジトリトレイト
///
/// ユーザーレコードの永続化操作を定義する。
/// ユースケース層は `Arc<dyn UserRepository>` として注入を受ける。
#[async_trait]
pub trait UserRepository: Send + Sync {
   /// 全ユーザーをストアの順序で取得
   async fn find_all(&self) -> Result<Vec<UserRecord>, InfraError>;

   /// ID でユーザーを検索
   ///
   /// # 戻り値
   ///
   /// - `Ok(Some(user))`: ユーザーが見つかった場合
   /// - `Ok(None)`: ユーザーが見つからない場合
   /// - `Err(_)`: ストアのエラー
   async fn find_by_id(&self, id: &UserId) -> Result<Option<UserRecord>, InfraError>;

   /// メールアドレスでユーザーを検索（完全一致）
   async fn find_by_email(&self, email: &Email) -> Result<Option<UserRecord>, InfraError>;

   /// ユーザー名でユーザーを検索（完全一致、大文字小文字を区別）
   ///
   /// ユーザー名は一意ではないため、ストア順で最初の 1 件を返す。
   async fn find_by_username(&self, username: &Username)
   -> Result<Option<UserRecord>, InfraError>;

   /// ユーザーを挿入し、ID を採番したレコードを返す
   ///
   /// メールアドレスが既に使われている場合は `InfraError::duplicate_email` を返す。
   async fn insert(&self, new_user: NewUser) -> Result<UserRecord, InfraError>;

   /// ユーザーの全フィールドを置換する
   ///
   /// 対象が存在しない場合は `Ok(None)`。
   async fn update(
      &self,
      id: &UserId,
      changes: UserChanges,
   ) -> Result<Option<UserRecord>, InfraError>;

   /// ユーザーを削除する（存在しない場合も成功）
   async fn delete(&self, id: &UserId) -> Result<(), InfraError>;
}

/// `users` テーブルの 1 行
type UserRow = (Uuid, String, String, String);

/// 行をユーザーレコードに復元する
fn into_record((id, username, email, credential): UserRow) -> Result<UserRecord, InfraError> {
   Ok(UserRecord::new(
      UserId::from_uuid(id),
      Username::new(username)?,
      Email::new(email)?,
      StoredCredential::new(credential),
   ))
}

/// 一意制約違反を競合エラーに変換する
fn map_unique_violation(err: sqlx::Error, email: &Email) -> InfraError {
   match &err {
      sqlx::Error::Database(db_err) if db_err.is_unique_violation() => {
         InfraError::duplicate_email(email.as_str())
      }
      _ => err.into(),
   }
}

/// PostgreSQL 実装の UserRepository
#[derive(Debug, Clone)]
pub struct PostgresUserRepository {
   pool: PgPool,
}

impl PostgresUserRepository {
   /// 新しいリポジトリインスタンスを作成
   pub fn new(pool: PgPool) -> Self {
      Self { pool }
   }
}

#[async_trait]
impl UserRepository for PostgresUserRepository {
   #[tracing::instrument(skip_all, level = "debug")]
   async fn find_all(&self) -> Result<Vec<UserRecord>, InfraError> {
      let rows: Vec<UserRow> = sqlx::query_as(
         r#"
            SELECT id, username, email, credential
            FROM users
            ORDER BY id
            "#,
      )
      .fetch_all(&self.pool)
      .await?;

      rows.into_iter().map(into_record).collect()
   }

   #[tracing::instrument(skip_all, level = "debug", fields(%id))]
   async fn find_by_id(&self, id: &UserId) -> Result<Option<UserRecord>, InfraError> {
      let row: Option<UserRow> = sqlx::query_as(
         r#"
            SELECT id, username, email, credential
            FROM users
            WHERE id = $1
            "#,
      )
      .bind(id.as_uuid())
      .fetch_optional(&self.pool)
      .await?;

      row.map(into_record).transpose()
   }

   #[tracing::instrument(skip_all, level = "debug")]
   async fn find_by_email(&self, email: &Email) -> Result<Option<UserRecord>, InfraError> {
      let row: Option<UserRow> = sqlx::query_as(
         r#"
            SELECT id, username, email, credential
            FROM users
            WHERE email = $1
            "#,
      )
      .bind(email.as_str())
      .fetch_optional(&self.pool)
      .await?;

      row.map(into_record).transpose()
   }

   #[tracing::instrument(skip_all, level = "debug")]
   async fn find_by_username(
      &self,
      username: &Username,
   ) -> Result<Option<UserRecord>, InfraError> {
      let row: Option<UserRow> = sqlx::query_as(
         r#"
            SELECT id, username, email, credential
            FROM users
            WHERE username = $1
            ORDER BY id
            LIMIT 1
            "#,
      )
      .bind(username.as_str())
      .fetch_optional(&self.pool)
      .await?;

      row.map(into_record).transpose()
   }

   #[tracing::instrument(skip_all, level = "debug")]
   async fn insert(&self, new_user: NewUser) -> Result<UserRecord, InfraError> {
      let record = new_user.into_record(UserId::new());

      sqlx::query(
         r#"
            INSERT INTO users (id, username, email, credential)
            VALUES ($1, $2, $3, $4)
            "#,
      )
      .bind(record.id().as_uuid())
      .bind(record.username().as_str())
      .bind(record.email().as_str())
      .bind(record.credential().as_str())
      .execute(&self.pool)
      .await
      .map_err(|e| map_unique_violation(e, record.email()))?;

      Ok(record)
   }

   #[tracing::instrument(skip_all, level = "debug", fields(%id))]
   async fn update(
      &self,
      id: &UserId,
      changes: UserChanges,
   ) -> Result<Option<UserRecord>, InfraError> {
      let email = changes.email.clone();
      let row: Option<UserRow> = sqlx::query_as(
         r#"
            UPDATE users
            SET username = $2, email = $3, credential = $4
            WHERE id = $1
            RETURNING id, username, email, credential
            "#,
      )
      .bind(id.as_uuid())
      .bind(changes.username.as_str())
      .bind(changes.email.as_str())
      .bind(changes.credential.as_str())
      .fetch_optional(&self.pool)
      .await
      .map_err(|e| map_unique_violation(e, &email))?;

      row.map(into_record).transpose()
   }

   #[tracing::instrument(skip_all, level = "debug", fields(%id))]
   async fn delete(&self, id: &UserId) -> Result<(), InfraError> {
      sqlx::query("DELETE FROM users WHERE id = $1")
         .bind(id.as_uuid())
         .execute(&self.pool)
         .await?;

      Ok(())
   }
}

#[cfg(test)]
mod tests {
   use pretty_assertions::assert_eq;

   use super::*;

   #[test]
   fn test_トレイトはsendとsyncを実装している() {
      fn assert_send_sync<T: Send + Sync>() {}
      assert_send_sync::<PostgresUserRepository>();
      assert_send_sync::<Box<dyn UserRepository>>();
   }

   #[test]
   fn test_行からレコードを復元できる() {
      let id = Uuid::now_v7();

      let record = into_record((
         id,
         "John".to_string(),
         "john@example.com".to_string(),
         "hash".to_string(),
      ))
      .unwrap();

      assert_eq!(record.id(), &UserId::from_uuid(id));
      assert_eq!(record.username().as_str(), "John");
      assert_eq!(record.credential().as_str(), "hash");
   }

   #[test]
   fn test_空のユーザー名を持つ行は復元エラー() {
      let result = into_record((
         Uuid::now_v7(),
         String::new(),
         "john@example.com".to_string(),
         "hash".to_string(),
      ));

      assert!(result.is_err());
   }

   #[test]
   fn test_一意制約違反以外はデータベースエラーのまま() {
      let email = Email::new("a@b.c").unwrap();

      let err = map_unique_violation(sqlx::Error::RowNotFound, &email);

      assert!(err.as_duplicate_email().is_none());
   }
}
