//! # テスト用モックリポジトリ
//!
//! ユースケース・ハンドラのテストで使用するインメモリモック。
//! 呼び出されたメソッドを記録し、ストア障害を注入できる。
//! メールアドレスの一意性は実ストアと同じく挿入・更新の両方で検査する。
//! `test-utils` feature を有効にすることで、他クレートからも利用可能。
//!
//! ```toml
//! [dev-dependencies]
//! userbase-infra = { workspace = true, features = ["test-utils"] }
//! ```

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use async_trait::async_trait;
use userbase_domain::user::{Email, NewUser, UserChanges, UserId, UserRecord, Username};

use crate::{error::InfraError, repository::UserRepository};

/// モックが記録するメソッド呼び出し
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RepositoryCall {
   FindAll,
   FindById,
   FindByEmail,
   FindByUsername,
   Insert,
   Update,
   Delete,
}

// ===== MockUserRepository =====

#[derive(Clone, Default)]
pub struct MockUserRepository {
   users:              Arc<Mutex<Vec<UserRecord>>>,
   calls:              Arc<Mutex<Vec<RepositoryCall>>>,
   failing:            bool,
   stale_email_lookup: bool,
}

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
   mutex.lock().unwrap_or_else(PoisonError::into_inner)
}

impl MockUserRepository {
   pub fn new() -> Self {
      Self::default()
   }

   /// 既存のレコードを持つモックを作成する
   pub fn with_users(users: Vec<UserRecord>) -> Self {
      Self {
         users: Arc::new(Mutex::new(users)),
         ..Self::default()
      }
   }

   /// すべての呼び出しがストア障害になるモックを作成する
   pub fn failing() -> Self {
      Self {
         failing: true,
         ..Self::default()
      }
   }

   /// `find_by_email` が常に「なし」を返すようにする
   ///
   /// 事前確認と挿入の間に別のリクエストが同じメールアドレスを登録した状況を再現する。
   /// 一意性の検査は挿入・更新時に引き続き行われる。
   pub fn with_stale_email_lookup(self) -> Self {
      Self {
         stale_email_lookup: true,
         ..self
      }
   }

   pub fn add_user(&self, user: UserRecord) {
      lock(&self.users).push(user);
   }

   /// 記録された呼び出しを順に返す
   pub fn calls(&self) -> Vec<RepositoryCall> {
      lock(&self.calls).clone()
   }

   /// 指定メソッドの呼び出し回数
   pub fn call_count(&self, call: RepositoryCall) -> usize {
      lock(&self.calls).iter().filter(|c| **c == call).count()
   }

   fn record(&self, call: RepositoryCall) -> Result<(), InfraError> {
      lock(&self.calls).push(call);
      if self.failing {
         return Err(std::io::Error::other("ストア障害（モック）").into());
      }
      Ok(())
   }
}

#[async_trait]
impl UserRepository for MockUserRepository {
   async fn find_all(&self) -> Result<Vec<UserRecord>, InfraError> {
      self.record(RepositoryCall::FindAll)?;
      Ok(lock(&self.users).clone())
   }

   async fn find_by_id(&self, id: &UserId) -> Result<Option<UserRecord>, InfraError> {
      self.record(RepositoryCall::FindById)?;
      Ok(lock(&self.users).iter().find(|u| u.id() == id).cloned())
   }

   async fn find_by_email(&self, email: &Email) -> Result<Option<UserRecord>, InfraError> {
      self.record(RepositoryCall::FindByEmail)?;
      if self.stale_email_lookup {
         return Ok(None);
      }
      Ok(lock(&self.users).iter().find(|u| u.email() == email).cloned())
   }

   async fn find_by_username(
      &self,
      username: &Username,
   ) -> Result<Option<UserRecord>, InfraError> {
      self.record(RepositoryCall::FindByUsername)?;
      Ok(lock(&self.users)
         .iter()
         .find(|u| u.username() == username)
         .cloned())
   }

   async fn insert(&self, new_user: NewUser) -> Result<UserRecord, InfraError> {
      self.record(RepositoryCall::Insert)?;
      let mut users = lock(&self.users);
      if users.iter().any(|u| u.email() == &new_user.email) {
         return Err(InfraError::duplicate_email(new_user.email.as_str()));
      }
      let record = new_user.into_record(UserId::new());
      users.push(record.clone());
      Ok(record)
   }

   async fn update(
      &self,
      id: &UserId,
      changes: UserChanges,
   ) -> Result<Option<UserRecord>, InfraError> {
      self.record(RepositoryCall::Update)?;
      let mut users = lock(&self.users);
      let Some(pos) = users.iter().position(|u| u.id() == id) else {
         return Ok(None);
      };
      if users.iter().any(|u| u.email() == &changes.email && u.id() != id) {
         return Err(InfraError::duplicate_email(changes.email.as_str()));
      }
      let updated = users[pos].clone().with_changes(changes);
      users[pos] = updated.clone();
      Ok(Some(updated))
   }

   async fn delete(&self, id: &UserId) -> Result<(), InfraError> {
      self.record(RepositoryCall::Delete)?;
      lock(&self.users).retain(|u| u.id() != id);
      Ok(())
   }
}

#[cfg(test)]
mod tests {
   use pretty_assertions::assert_eq;
   use userbase_domain::credential::StoredCredential;

   use super::*;

   #[tokio::test]
   async fn test_呼び出しを順に記録する() {
      let sut = MockUserRepository::new();

      sut.find_all().await.unwrap();
      sut.find_by_id(&UserId::new()).await.unwrap();

      assert_eq!(
         sut.calls(),
         vec![RepositoryCall::FindAll, RepositoryCall::FindById]
      );
   }

   #[tokio::test]
   async fn test_障害モードではすべての呼び出しがエラー() {
      let sut = MockUserRepository::failing();

      let result = sut
         .insert(NewUser {
            username:   Username::new("John").unwrap(),
            email:      Email::new("john@example.com").unwrap(),
            credential: StoredCredential::new("pw"),
         })
         .await;

      assert!(result.is_err());
      assert_eq!(sut.call_count(RepositoryCall::Insert), 1);
   }

   fn record_of(username: &str, email: &str) -> UserRecord {
      UserRecord::new(
         UserId::new(),
         Username::new(username).unwrap(),
         Email::new(email).unwrap(),
         StoredCredential::new("pw"),
      )
   }

   fn changes_to(email: &str) -> UserChanges {
      UserChanges {
         username:   Username::new("Renamed").unwrap(),
         email:      Email::new(email).unwrap(),
         credential: StoredCredential::new("pw"),
      }
   }

   #[tokio::test]
   async fn test_他のユーザーのメールアドレスへの更新は重複エラー() {
      let john = record_of("John", "john@example.com");
      let jane = record_of("Jane", "jane@example.com");
      let sut = MockUserRepository::with_users(vec![john.clone(), jane]);

      let err = sut
         .update(john.id(), changes_to("jane@example.com"))
         .await
         .unwrap_err();

      assert_eq!(err.as_duplicate_email(), Some("jane@example.com"));
      assert_eq!(
         sut.find_by_id(john.id()).await.unwrap().map(|u| u.email().to_string()),
         Some("john@example.com".to_string())
      );
   }

   #[tokio::test]
   async fn test_自分のメールアドレスのままの更新は成功する() {
      let john = record_of("John", "john@example.com");
      let sut = MockUserRepository::with_users(vec![john.clone()]);

      let updated = sut
         .update(john.id(), changes_to("john@example.com"))
         .await
         .unwrap();

      assert_eq!(updated.map(|u| u.username().to_string()), Some("Renamed".to_string()));
   }

   #[tokio::test]
   async fn test_古い参照モードでも挿入時の一意性は検査される() {
      let sut = MockUserRepository::with_users(vec![record_of("John", "john@example.com")])
         .with_stale_email_lookup();
      let email = Email::new("john@example.com").unwrap();

      let found = sut.find_by_email(&email).await.unwrap();
      let err = sut
         .insert(NewUser {
            username: Username::new("Other").unwrap(),
            email,
            credential: StoredCredential::new("pw"),
         })
         .await
         .unwrap_err();

      assert_eq!(found, None);
      assert!(err.as_duplicate_email().is_some());
   }

   #[tokio::test]
   async fn test_クローンは状態を共有する() {
      let sut = MockUserRepository::new();
      let clone = sut.clone();

      clone.delete(&UserId::new()).await.unwrap();

      assert_eq!(sut.call_count(RepositoryCall::Delete), 1);
   }
}
