//! # Userbase 共有ユーティリティ
//!
//! アカウントサービス全体で使用される共通ユーティリティを提供する。
//!
//! ## 設計方針
//!
//! - 他のすべてのクレート（domain, infra, account-service）から依存される
//! - ビジネスロジックを含まない純粋なユーティリティのみを配置
//! - 外部クレートへの依存は最小限に抑える

pub mod error_response;
pub mod health;
pub mod observability;

pub use error_response::{ErrorResponse, MessageResponse};
pub use health::HealthResponse;
