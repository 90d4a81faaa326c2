//! # Account Service ライブラリ
//!
//! ユーザーアカウントの登録・ログイン・取得・更新・削除・検索を提供する。
//! 結合テスト用にルーターと内部モジュールを公開する。

pub mod app;
pub mod config;
pub mod error;
pub mod handler;
pub mod usecase;
