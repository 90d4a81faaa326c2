//! # ユーザー
//!
//! ユーザーレコードとそれに関連する値オブジェクトを定義する。
//!
//! ## ドメイン用語
//!
//! | 型 | ドメイン用語 | 備考 |
//! |---|------------|------|
//! | [`UserRecord`] | ユーザー | 4 フィールドすべてが常に揃っている |
//! | [`UserId`] | ユーザー ID | ストアが採番する。作成後は不変 |
//! | [`Username`] | ユーザー名 | 一意性は保証しない |
//! | [`Email`] | メールアドレス | 一意であることを意図する |
//! | [`NewUser`] | 登録内容 | ストアへの挿入入力（ID 未採番） |
//! | [`UserChanges`] | 置換内容 | 更新は全フィールド置換のみ |
//!
//! ## 設計方針
//!
//! - **Newtype パターン**: ID・名前・メールアドレスをラップし、取り違えを型で防ぐ
//! - **部分レコードの排除**: コンストラクタは全フィールドを要求する
//! - **認証情報の非公開**: `UserRecord` は `Serialize` を実装しない。
//!   レスポンスは API 層の DTO で組み立て、認証情報を含めない
//!
//! ## 使用例
//!
//! ```rust
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! use userbase_domain::{
//!     credential::StoredCredential,
//!     user::{Email, NewUser, UserId, Username},
//! };
//!
//! let new_user = NewUser {
//!     username:   Username::new("John")?,
//!     email:      Email::new("john@example.com")?,
//!     credential: StoredCredential::new("secret"),
//! };
//! let record = new_user.into_record(UserId::new());
//! assert_eq!(record.username().as_str(), "John");
//! # Ok(())
//! # }
//! ```

use std::str::FromStr;

use derive_more::Display;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{DomainError, credential::StoredCredential};

/// ユーザー ID（一意識別子）
///
/// UUID v7 を使用し、生成順にソート可能。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display)]
#[display("{_0}")]
pub struct UserId(Uuid);

impl UserId {
    /// 新しいユーザー ID を生成する
    pub fn new() -> Self {
        Self(Uuid::now_v7())
    }

    /// 既存の UUID からユーザー ID を作成する
    pub fn from_uuid(uuid: Uuid) -> Self {
        Self(uuid)
    }

    pub fn as_uuid(&self) -> &Uuid {
        &self.0
    }
}

impl Default for UserId {
    fn default() -> Self {
        Self::new()
    }
}

impl FromStr for UserId {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Uuid::parse_str(s)
            .map(Self)
            .map_err(|_| DomainError::Validation(format!("不正なユーザー ID: {s}")))
    }
}

/// 空文字列でないことを検証する
fn require_non_empty(value: String, label: &str) -> Result<String, DomainError> {
    if value.is_empty() {
        return Err(DomainError::Validation(format!("{label}は必須です")));
    }
    Ok(value)
}

/// ユーザー名（値オブジェクト）
///
/// 空文字列でないことのみを要求する。前後の空白は保持する。
#[derive(Debug, Clone, PartialEq, Eq, Hash, Display)]
#[display("{_0}")]
pub struct Username(String);

impl Username {
    /// ユーザー名を作成する
    ///
    /// # エラー
    ///
    /// 空文字列の場合は `DomainError::Validation` を返す。
    pub fn new(value: impl Into<String>) -> Result<Self, DomainError> {
        require_non_empty(value.into(), "ユーザー名").map(Self)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_string(self) -> String {
        self.0
    }
}

/// メールアドレス（値オブジェクト）
///
/// 形式（`@` の有無など）は検証しない。存在する値の解釈は呼び出し側の責務。
#[derive(Debug, Clone, PartialEq, Eq, Hash, Display)]
#[display("{_0}")]
pub struct Email(String);

impl Email {
    /// メールアドレスを作成する
    ///
    /// # エラー
    ///
    /// 空文字列の場合は `DomainError::Validation` を返す。
    pub fn new(value: impl Into<String>) -> Result<Self, DomainError> {
        require_non_empty(value.into(), "メールアドレス").map(Self)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_string(self) -> String {
        self.0
    }
}

/// ユーザーレコード
///
/// # 不変条件
///
/// - 4 フィールド（ID、ユーザー名、メールアドレス、認証情報）が常に揃っている
/// - `id` は作成後に変更されない（置換は [`with_changes`](Self::with_changes) で ID を引き継ぐ）
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserRecord {
    id:         UserId,
    username:   Username,
    email:      Email,
    credential: StoredCredential,
}

impl UserRecord {
    pub fn new(id: UserId, username: Username, email: Email, credential: StoredCredential) -> Self {
        Self {
            id,
            username,
            email,
            credential,
        }
    }

    // Getter メソッド

    pub fn id(&self) -> &UserId {
        &self.id
    }

    pub fn username(&self) -> &Username {
        &self.username
    }

    pub fn email(&self) -> &Email {
        &self.email
    }

    pub fn credential(&self) -> &StoredCredential {
        &self.credential
    }

    /// 全フィールドを置換した新しいインスタンスを返す（ID は維持）
    pub fn with_changes(self, changes: UserChanges) -> Self {
        Self {
            id:         self.id,
            username:   changes.username,
            email:      changes.email,
            credential: changes.credential,
        }
    }
}

/// 新規登録内容（ストアへの挿入入力）
///
/// ID はストアが採番するため含まない。
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewUser {
    pub username:   Username,
    pub email:      Email,
    pub credential: StoredCredential,
}

impl NewUser {
    /// 採番済みの ID を付与してレコードにする
    pub fn into_record(self, id: UserId) -> UserRecord {
        UserRecord::new(id, self.username, self.email, self.credential)
    }
}

/// 更新内容（全フィールド置換）
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserChanges {
    pub username:   Username,
    pub email:      Email,
    pub credential: StoredCredential,
}
