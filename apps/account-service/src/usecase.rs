//! # ユースケース層
//!
//! Account Service のビジネスロジックを実装する。
//!
//! ## 設計方針
//!
//! - **依存性注入**: ストアと認証情報スキームを `Arc<dyn Trait>` で外部から注入
//! - **薄いハンドラ**: ハンドラは薄く保ち、ロジックはユースケースに集約
//!
//! ## モジュール構成
//!
//! - `credential`: 認証情報の照合
//! - `search`: ユーザー検索の解決
//! - `user`: アカウント管理（一覧・取得・登録・ログイン・更新・削除・検索）

pub mod credential;
pub mod search;
pub mod user;

pub use credential::{CredentialCheck, CredentialChecker};
pub use search::SearchResolver;
pub use user::AccountUseCaseImpl;
