//! # 認証情報スキーム
//!
//! 平文の認証情報を保存形式へ変換し、保存済みの値と比較する。
//!
//! | 実装 | 保存形式 | 比較 |
//! |------|----------|------|
//! | [`Argon2CredentialScheme`] | Argon2id の PHC 文字列（ランダムソルト） | `argon2` の検証 |
//! | [`PlainCredentialScheme`] | 入力値そのまま | `subtle` による定数時間比較 |
//!
//! どちらの実装も一致・不一致で処理時間が変わらない。

use argon2::{
    Argon2,
    PasswordHasher as _,
    PasswordVerifier as _,
    password_hash::{PasswordHash, SaltString, rand_core::OsRng},
};
use subtle::ConstantTimeEq as _;
use userbase_domain::credential::{CredentialVerifyResult, PlainCredential, StoredCredential};

use crate::InfraError;

/// 認証情報の変換と比較を担当するトレイト
pub trait CredentialScheme: Send + Sync {
    /// 平文の認証情報を保存形式に変換する
    ///
    /// # Errors
    ///
    /// - ハッシュ化に失敗した場合
    fn protect(&self, plain: &PlainCredential) -> Result<StoredCredential, InfraError>;

    /// 平文の認証情報を保存済みの値と比較する
    ///
    /// # Errors
    ///
    /// - 保存済みの値が不正な形式の場合
    fn verify(
        &self,
        plain: &PlainCredential,
        stored: &StoredCredential,
    ) -> Result<CredentialVerifyResult, InfraError>;
}

/// Argon2id による認証情報スキーム
///
/// パラメータは `argon2` クレートの既定値（OWASP 推奨: m=19 MiB, t=2, p=1）。
#[derive(Default)]
pub struct Argon2CredentialScheme {
    argon2: Argon2<'static>,
}

impl Argon2CredentialScheme {
    pub fn new() -> Self {
        Self::default()
    }
}

impl CredentialScheme for Argon2CredentialScheme {
    fn protect(&self, plain: &PlainCredential) -> Result<StoredCredential, InfraError> {
        let salt = SaltString::generate(&mut OsRng);
        let hash = self
            .argon2
            .hash_password(plain.as_str().as_bytes(), &salt)
            .map_err(|e| InfraError::credential(format!("ハッシュ化に失敗しました: {e}")))?;

        Ok(StoredCredential::new(hash.to_string()))
    }

    fn verify(
        &self,
        plain: &PlainCredential,
        stored: &StoredCredential,
    ) -> Result<CredentialVerifyResult, InfraError> {
        let parsed = PasswordHash::new(stored.as_str())
            .map_err(|e| InfraError::credential(format!("不正なハッシュ形式: {e}")))?;

        let matched = self
            .argon2
            .verify_password(plain.as_str().as_bytes(), &parsed)
            .is_ok();

        Ok(CredentialVerifyResult::from(matched))
    }
}

/// 平文保存の認証情報スキーム
///
/// 既存の平文データを引き継ぐ場合に使用する。比較は定数時間で行う。
#[derive(Debug, Default, Clone, Copy)]
pub struct PlainCredentialScheme;

impl CredentialScheme for PlainCredentialScheme {
    fn protect(&self, plain: &PlainCredential) -> Result<StoredCredential, InfraError> {
        Ok(StoredCredential::new(plain.as_str()))
    }

    fn verify(
        &self,
        plain: &PlainCredential,
        stored: &StoredCredential,
    ) -> Result<CredentialVerifyResult, InfraError> {
        let matched: bool = plain
            .as_str()
            .as_bytes()
            .ct_eq(stored.as_str().as_bytes())
            .into();

        Ok(CredentialVerifyResult::from(matched))
    }
}
