//! アカウント管理ユースケース
//!
//! 各操作は「検証 → ストア → 照合/検索 → 結果」の順に進み、
//! 想定内の失敗は [`AccountError`] の値として返す。

use std::sync::Arc;

use userbase_domain::{
   search::SearchOutcome,
   user::{NewUser, UserChanges, UserId, UserRecord},
   validation::{Login, Registration, Replacement},
};
use userbase_infra::{CredentialScheme, InfraError, UserRepository};

use super::{CredentialCheck, CredentialChecker, SearchResolver};
use crate::error::AccountError;

/// 一覧が空のときのメッセージ
pub const NO_USERS_MESSAGE: &str = "No users at this time..";

/// アカウント管理ユースケース
pub struct AccountUseCaseImpl {
   repository: Arc<dyn UserRepository>,
   scheme:     Arc<dyn CredentialScheme>,
   checker:    CredentialChecker,
   resolver:   SearchResolver,
}

/// パスパラメータの ID を解釈する
///
/// ストアの ID になり得ない値は「存在しない」と同じ扱い。
fn parse_id(raw: &str, not_found: impl FnOnce() -> String) -> Result<UserId, AccountError> {
   raw.parse::<UserId>()
      .map_err(|_| AccountError::NotFound(not_found()))
}

/// 挿入・更新時の一意制約違反を競合エラーに変換する
fn map_email_conflict(err: InfraError) -> AccountError {
   if err.as_duplicate_email().is_some() {
      AccountError::Conflict("This email has already been taken".to_string())
   } else {
      AccountError::Infra(err)
   }
}

impl AccountUseCaseImpl {
   pub fn new(repository: Arc<dyn UserRepository>, scheme: Arc<dyn CredentialScheme>) -> Self {
      Self {
         checker: CredentialChecker::new(repository.clone(), scheme.clone()),
         resolver: SearchResolver::new(repository.clone()),
         repository,
         scheme,
      }
   }

   /// 全ユーザーを取得する
   pub async fn list_users(&self) -> Result<Vec<UserRecord>, AccountError> {
      let users = self.repository.find_all().await?;
      if users.is_empty() {
         return Err(AccountError::NoResults(NO_USERS_MESSAGE.to_string()));
      }
      Ok(users)
   }

   /// ID でユーザーを取得する
   pub async fn get_user(&self, raw_id: &str) -> Result<UserRecord, AccountError> {
      let not_found = || "User not found!".to_string();
      let id = parse_id(raw_id, not_found)?;

      self.repository
         .find_by_id(&id)
         .await?
         .ok_or_else(|| AccountError::NotFound(not_found()))
   }

   /// ユーザーを登録する
   ///
   /// 1. メールアドレスの重複チェック
   /// 2. 認証情報を保存形式に変換
   /// 3. ストアに挿入（ID はストアが採番）
   pub async fn register(&self, form: Registration) -> Result<UserRecord, AccountError> {
      if self.repository.find_by_email(&form.email).await?.is_some() {
         return Err(AccountError::Conflict(
            "This email has already been taken".to_string(),
         ));
      }

      let credential = self.scheme.protect(&form.credential)?;
      let created = self
         .repository
         .insert(NewUser {
            username: form.username,
            email: form.email,
            credential,
         })
         .await
         .map_err(map_email_conflict)?;

      tracing::info!(user_id = %created.id(), "ユーザーを登録しました");
      Ok(created)
   }

   /// メールアドレスと認証情報でログインする
   ///
   /// 未登録のメールアドレスは既存クライアントとの互換のため 404 で区別する。
   pub async fn login(&self, form: Login) -> Result<UserRecord, AccountError> {
      match self.checker.verify(&form.email, &form.credential).await? {
         CredentialCheck::Verified(record) => Ok(record),
         CredentialCheck::Mismatch => Err(AccountError::Authentication(
            "Incorrect password!".to_string(),
         )),
         CredentialCheck::UnknownEmail => Err(AccountError::NotFound(
            "No user exists with the email".to_string(),
         )),
      }
   }

   /// ユーザーの全フィールドを置換する
   ///
   /// フォームは検証済みのため、ストアへのアクセスは検証の後にのみ発生する。
   pub async fn update(&self, raw_id: &str, form: Replacement) -> Result<UserRecord, AccountError> {
      let not_found = || format!("No User with id {raw_id}");
      let id = parse_id(raw_id, not_found)?;

      if self.repository.find_by_id(&id).await?.is_none() {
         return Err(AccountError::NotFound(not_found()));
      }

      let changes = UserChanges {
         username:   form.username,
         email:      form.email,
         credential: self.scheme.protect(&form.credential)?,
      };

      self.repository
         .update(&id, changes)
         .await
         .map_err(map_email_conflict)?
         .ok_or_else(|| AccountError::NotFound(not_found()))
   }

   /// ユーザーを削除する
   ///
   /// 存在しない場合はストアの削除を呼び出さない。
   pub async fn delete(&self, raw_id: &str) -> Result<(), AccountError> {
      let not_found = || "User does not exist".to_string();
      let id = parse_id(raw_id, not_found)?;

      if self.repository.find_by_id(&id).await?.is_none() {
         return Err(AccountError::NotFound(not_found()));
      }

      self.repository.delete(&id).await?;
      tracing::info!(user_id = %id, "ユーザーを削除しました");
      Ok(())
   }

   /// 名前・メールアドレスでユーザーを検索する
   pub async fn search(
      &self,
      name: Option<&str>,
      email: Option<&str>,
   ) -> Result<SearchOutcome, AccountError> {
      Ok(self.resolver.resolve(name, email).await?)
   }
}
