//! 認証情報の照合
//!
//! メールアドレスでユーザーを引き、注入された [`CredentialScheme`] で比較する。
//! 結果は [`CredentialCheck`] で返し、呼び出し側がレスポンスを決める。

use std::sync::Arc;

use userbase_domain::{
   credential::PlainCredential,
   user::{Email, UserRecord},
};
use userbase_infra::{CredentialScheme, InfraError, UserRepository};

/// 照合結果
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CredentialCheck {
   /// 一致（照合したレコードを含む）
   Verified(UserRecord),
   /// ユーザーは存在するが認証情報が一致しない
   Mismatch,
   /// メールアドレスに対応するユーザーがいない
   UnknownEmail,
}

/// 認証情報チェッカー
#[derive(Clone)]
pub struct CredentialChecker {
   repository: Arc<dyn UserRepository>,
   scheme:     Arc<dyn CredentialScheme>,
}

impl CredentialChecker {
   pub fn new(repository: Arc<dyn UserRepository>, scheme: Arc<dyn CredentialScheme>) -> Self {
      Self { repository, scheme }
   }

   /// メールアドレスと平文の認証情報を照合する
   ///
   /// 想定内の不一致はエラーではなく [`CredentialCheck`] の値で返す。
   pub async fn verify(
      &self,
      email: &Email,
      supplied: &PlainCredential,
   ) -> Result<CredentialCheck, InfraError> {
      let Some(record) = self.repository.find_by_email(email).await? else {
         return Ok(CredentialCheck::UnknownEmail);
      };

      if self.scheme.verify(supplied, record.credential())?.is_mismatch() {
         return Ok(CredentialCheck::Mismatch);
      }

      Ok(CredentialCheck::Verified(record))
   }
}
