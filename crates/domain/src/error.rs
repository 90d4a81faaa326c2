//! # ドメイン層エラー定義
//!
//! ビジネスルール違反を表現するエラー型。
//!
//! 必須フィールドの不足は [`ValidationFailure`](crate::validation::ValidationFailure)
//! で構造的に表現するため、ここでは値オブジェクト生成時の違反のみを扱う。
//!
//! ## 使用例
//!
//! ```rust
//! use userbase_domain::{DomainError, user::Username};
//!
//! let result = Username::new("");
//! assert!(matches!(result, Err(DomainError::Validation(_))));
//! ```

use thiserror::Error;

/// ドメイン層で発生するエラー
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DomainError {
    /// バリデーションエラー
    ///
    /// 値オブジェクトの生成条件（空文字列でない、UUID 形式など）を満たさない場合。
    #[error("バリデーションエラー: {0}")]
    Validation(String),
}
