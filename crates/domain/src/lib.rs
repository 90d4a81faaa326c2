//! # Userbase ドメイン層
//!
//! アカウント管理の中核となるドメインモデルと判定ロジックを定義する。
//!
//! ## 設計方針
//!
//! - **エンティティ**: 一意の識別子を持つユーザーレコード（[`user::UserRecord`]）
//! - **値オブジェクト**: 識別子を持たない不変オブジェクト（例: `Email`, `Username`）
//! - **ドメインサービス**: リクエスト検証（[`validation`]）と検索条件の解決（[`search`]）
//! - **ドメインエラー**: ビジネスルール違反を表現するエラー型
//!
//! ## 依存関係の方向
//!
//! ```text
//! account-service → infra → domain
//!        ↓
//!      shared
//! ```
//!
//! ドメイン層はインフラ層（DB、ファイル）に一切依存しない。
//! 永続化を伴う処理はユースケース層がリポジトリ経由で組み立てる。
//!
//! ## モジュール構成
//!
//! - [`credential`] - 平文／保存済み認証情報と検証結果
//! - [`error`] - ドメイン層で発生するエラーの定義
//! - [`search`] - 検索クエリの解決と一致判定
//! - [`user`] - ユーザーレコードと値オブジェクト
//! - [`validation`] - 操作ごとの必須フィールド検証
//!
//! ## 使用例
//!
//! ```rust
//! use userbase_domain::search::{SearchQuery, SearchStrategy};
//!
//! let query = SearchQuery::from_params(Some("joh"), Some("example"));
//! assert_eq!(query.strategy(), SearchStrategy::NameAndEmail);
//! ```

pub mod credential;
pub mod error;
pub mod search;
pub mod user;
pub mod validation;

pub use error::DomainError;
