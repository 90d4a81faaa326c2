//! # リクエスト検証
//!
//! 操作（登録・ログイン・更新）ごとに必須フィールドの有無を検証する。
//!
//! ## 規則
//!
//! | 操作 | 必須フィールド |
//! |------|----------------|
//! | [`Operation::Registration`] | `username`, `email`, `password` |
//! | [`Operation::Login`] | `email`, `password` |
//! | [`Operation::Update`] | `username`, `email`, `password`（全置換のみ） |
//!
//! 「存在する」とは値があり、かつ空文字列でないこと。空白のみの値は存在扱い。
//! 存在する値の形式は検証しない（型変換は呼び出し側の責務）。
//!
//! 検証は値を返す。失敗は [`ValidationFailure`] として不足フィールドを列挙し、
//! パニックや早期 return の暗黙の分岐には頼らない。

use std::collections::{BTreeMap, HashMap};

use strum::IntoStaticStr;
use thiserror::Error;

use crate::{
    credential::PlainCredential,
    user::{Email, Username},
};

/// 検証対象のフィールド
///
/// 文字列表現はリクエストボディのキー名と一致する。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, IntoStaticStr, strum::Display)]
pub enum Field {
    #[strum(serialize = "username")]
    Username,
    #[strum(serialize = "email")]
    Email,
    /// 認証情報。既存クライアントとの互換のためキー名は `password`
    #[strum(serialize = "password")]
    Credential,
}

impl Field {
    pub fn as_str(self) -> &'static str {
        self.into()
    }
}

/// 検証対象の操作
#[derive(Debug, Clone, Copy, PartialEq, Eq, IntoStaticStr, strum::Display)]
#[strum(serialize_all = "snake_case")]
pub enum Operation {
    Registration,
    Login,
    Update,
}

impl Operation {
    /// 操作ごとの必須フィールド（宣言順）
    pub fn required_fields(self) -> &'static [Field] {
        match self {
            Self::Registration | Self::Update => &[Field::Username, Field::Email, Field::Credential],
            Self::Login => &[Field::Email, Field::Credential],
        }
    }
}

/// フィールド名 → 値の対応を提供するトレイト
///
/// リクエスト DTO やマップに実装し、[`validate`] に渡す。
pub trait FieldSource {
    fn field(&self, field: Field) -> Option<&str>;
}

impl FieldSource for HashMap<Field, String> {
    fn field(&self, field: Field) -> Option<&str> {
        self.get(&field).map(String::as_str)
    }
}

impl FieldSource for BTreeMap<&str, &str> {
    fn field(&self, field: Field) -> Option<&str> {
        self.get(field.as_str()).copied()
    }
}

/// 値が「存在する」か
fn is_present(value: Option<&str>) -> bool {
    value.is_some_and(|v| !v.is_empty())
}

/// 存在する場合のみ値を返す
fn present(source: &impl FieldSource, field: Field) -> Option<&str> {
    source.field(field).filter(|v| !v.is_empty())
}

fn join_fields(fields: &[Field]) -> String {
    fields
        .iter()
        .map(|f| f.as_str())
        .collect::<Vec<_>>()
        .join(", ")
}

/// 検証失敗（不足フィールドの一覧）
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{operation} の必須フィールドが不足しています: {}", join_fields(.missing))]
pub struct ValidationFailure {
    operation: Operation,
    missing:   Vec<Field>,
}

impl ValidationFailure {
    /// 不足フィールドを収集する
    ///
    /// 不足がない場合は `missing` が空になる。
    fn collect(operation: Operation, source: &impl FieldSource) -> Self {
        let missing = operation
            .required_fields()
            .iter()
            .copied()
            .filter(|field| !is_present(source.field(*field)))
            .collect();
        Self { operation, missing }
    }

    pub fn operation(&self) -> Operation {
        self.operation
    }

    pub fn missing(&self) -> &[Field] {
        &self.missing
    }

    /// 不足フィールドのキー名
    pub fn missing_names(&self) -> Vec<&'static str> {
        self.missing.iter().map(|f| f.as_str()).collect()
    }
}

/// 必須フィールドを検証する
///
/// # エラー
///
/// 1 つ以上不足している場合、不足フィールドをすべて含む [`ValidationFailure`] を返す。
pub fn validate(operation: Operation, source: &impl FieldSource) -> Result<(), ValidationFailure> {
    let failure = ValidationFailure::collect(operation, source);
    if failure.missing.is_empty() {
        Ok(())
    } else {
        Err(failure)
    }
}

// =========================================================================
// 検証済みフォーム
// =========================================================================

/// 検証済みの登録リクエスト
#[derive(Debug, Clone)]
pub struct Registration {
    pub username:   Username,
    pub email:      Email,
    pub credential: PlainCredential,
}

impl Registration {
    pub fn from_fields(source: &impl FieldSource) -> Result<Self, ValidationFailure> {
        let (Some(username), Some(email), Some(credential)) = (
            present(source, Field::Username).and_then(|v| Username::new(v).ok()),
            present(source, Field::Email).and_then(|v| Email::new(v).ok()),
            present(source, Field::Credential).map(PlainCredential::new),
        ) else {
            return Err(ValidationFailure::collect(Operation::Registration, source));
        };
        Ok(Self {
            username,
            email,
            credential,
        })
    }
}

/// 検証済みのログインリクエスト
#[derive(Debug, Clone)]
pub struct Login {
    pub email:      Email,
    pub credential: PlainCredential,
}

impl Login {
    pub fn from_fields(source: &impl FieldSource) -> Result<Self, ValidationFailure> {
        let (Some(email), Some(credential)) = (
            present(source, Field::Email).and_then(|v| Email::new(v).ok()),
            present(source, Field::Credential).map(PlainCredential::new),
        ) else {
            return Err(ValidationFailure::collect(Operation::Login, source));
        };
        Ok(Self { email, credential })
    }
}

/// 検証済みの更新リクエスト（全フィールド置換）
#[derive(Debug, Clone)]
pub struct Replacement {
    pub username:   Username,
    pub email:      Email,
    pub credential: PlainCredential,
}

impl Replacement {
    pub fn from_fields(source: &impl FieldSource) -> Result<Self, ValidationFailure> {
        let (Some(username), Some(email), Some(credential)) = (
            present(source, Field::Username).and_then(|v| Username::new(v).ok()),
            present(source, Field::Email).and_then(|v| Email::new(v).ok()),
            present(source, Field::Credential).map(PlainCredential::new),
        ) else {
            return Err(ValidationFailure::collect(Operation::Update, source));
        };
        Ok(Self {
            username,
            email,
            credential,
        })
    }
}
