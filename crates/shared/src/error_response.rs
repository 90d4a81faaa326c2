//! # エラーレスポンス
//!
//! 既存クライアントとの互換性のため、失敗時のボディは次の 2 形式に固定する。
//!
//! | 型 | JSON | 用途 |
//! |---|------|------|
//! | [`ErrorResponse`] | `{ "error": "..." }` | 検証失敗、不存在、競合、認証失敗、内部エラー |
//! | [`MessageResponse`] | `{ "msg": "..." }` | 一覧・検索の結果が空、削除完了 |
//!
//! axum の `IntoResponse` 変換は各サービスの責務（shared に axum 依存を入れない）。

use serde::{Deserialize, Serialize};

/// 内部エラー時の固定メッセージ
const INTERNAL_ERROR_MESSAGE: &str = "Internal server error";

/// エラーレスポンス
///
/// `missing` はバリデーションエラーのときだけ出力する。
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorResponse {
   pub error:   String,
   #[serde(default, skip_serializing_if = "Vec::is_empty")]
   pub missing: Vec<String>,
}

impl ErrorResponse {
   /// メッセージのみのエラーレスポンスを作成する
   pub fn new(error: impl Into<String>) -> Self {
      Self {
         error:   error.into(),
         missing: Vec::new(),
      }
   }

   /// 不足フィールド付きのエラーレスポンスを作成する
   pub fn with_missing(
      error: impl Into<String>,
      missing: impl IntoIterator<Item = impl Into<String>>,
   ) -> Self {
      Self {
         error:   error.into(),
         missing: missing.into_iter().map(Into::into).collect(),
      }
   }

   /// 500 Internal Server Error
   ///
   /// 内部情報を漏らさないため、メッセージは固定値。
   pub fn internal_error() -> Self {
      Self::new(INTERNAL_ERROR_MESSAGE)
   }
}

/// メッセージレスポンス
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MessageResponse {
   pub msg: String,
}

impl MessageResponse {
   pub fn new(msg: impl Into<String>) -> Self {
      Self { msg: msg.into() }
   }
}
