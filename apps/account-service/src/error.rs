//! # Account Service エラー定義
//!
//! ユースケースが返す失敗の分類と、HTTP レスポンスへの変換を定義する。
//!
//! | バリアント | ステータス | ボディ |
//! |-----------|-----------|--------|
//! | `Validation` | 400 | `{ "error", "missing" }` |
//! | `NotFound` | 404 | `{ "error" }` |
//! | `NoResults` | 404 | `{ "msg" }` |
//! | `Conflict` | 409 | `{ "error" }` |
//! | `Authentication` | 400 | `{ "error" }` |
//! | `Infra` | 500 | `{ "error": "Internal server error" }` |
//!
//! 想定内の失敗はすべて値として返し、`Infra` のみログに記録する。

use axum::{
   Json,
   http::StatusCode,
   response::{IntoResponse, Response},
};
use thiserror::Error;
use userbase_domain::validation::{Operation, ValidationFailure};
use userbase_infra::InfraError;
use userbase_shared::{ErrorResponse, MessageResponse};

/// Account Service で発生するエラー
#[derive(Debug, Error)]
pub enum AccountError {
   /// 必須フィールドの不足
   #[error(transparent)]
   Validation(#[from] ValidationFailure),

   /// 対象のユーザーが存在しない
   #[error("ユーザーが見つかりません: {0}")]
   NotFound(String),

   /// 一覧・検索の結果が空
   #[error("該当するユーザーがいません: {0}")]
   NoResults(String),

   /// メールアドレスの重複
   #[error("競合が発生しました: {0}")]
   Conflict(String),

   /// 認証情報の不一致
   #[error("認証に失敗しました: {0}")]
   Authentication(String),

   /// ストアの障害
   #[error("インフラエラー: {0}")]
   Infra(#[from] InfraError),
}

/// 検証失敗時のメッセージ（既存クライアント互換）
fn validation_message(operation: Operation) -> &'static str {
   match operation {
      Operation::Registration | Operation::Update => "Please provide all the required parameters",
      Operation::Login => "Provide all the required parameters",
   }
}

impl IntoResponse for AccountError {
   fn into_response(self) -> Response {
      match self {
         AccountError::Validation(failure) => (
            StatusCode::BAD_REQUEST,
            Json(ErrorResponse::with_missing(
               validation_message(failure.operation()),
               failure.missing_names(),
            )),
         )
            .into_response(),
         AccountError::NotFound(msg) => {
            (StatusCode::NOT_FOUND, Json(ErrorResponse::new(msg))).into_response()
         }
         AccountError::NoResults(msg) => {
            (StatusCode::NOT_FOUND, Json(MessageResponse::new(msg))).into_response()
         }
         AccountError::Conflict(msg) => {
            (StatusCode::CONFLICT, Json(ErrorResponse::new(msg))).into_response()
         }
         AccountError::Authentication(msg) => {
            (StatusCode::BAD_REQUEST, Json(ErrorResponse::new(msg))).into_response()
         }
         AccountError::Infra(e) => {
            tracing::error!(
               error = %e,
               span_trace = %e.span_trace(),
               "ストアの操作で内部エラー"
            );
            (
               StatusCode::INTERNAL_SERVER_ERROR,
               Json(ErrorResponse::internal_error()),
            )
               .into_response()
         }
      }
   }
}
