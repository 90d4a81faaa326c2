//! # HTTP リクエストハンドラ
//!
//! axum のルートに対応するハンドラ関数を定義する。
//! ハンドラは薄く保ち、ビジネスロジックは usecase 層に委譲する。
//!
//! ## ハンドラ一覧
//!
//! - `health`: ヘルスチェック
//! - `user`: アカウント管理（一覧・取得・登録・ログイン・更新・削除・検索）

pub mod health;
pub mod user;

pub use health::health_check;
pub use user::{
   AccountState,
   delete_user,
   get_user,
   list_users,
   login,
   register,
   search_users,
   update_user,
};
