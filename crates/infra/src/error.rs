//! # インフラ層エラー定義
//!
//! ユーザーストアと認証情報スキームの失敗を表す。
//!
//! [`InfraError`] は種別（[`InfraErrorKind`]）と生成時点の [`SpanTrace`] を持つ。
//! どの経路で生成しても [`InfraError::new`] を通るため、SpanTrace は必ず記録される。

use std::fmt;

use derive_more::Display;
use thiserror::Error;
use tracing_error::SpanTrace;
use userbase_domain::DomainError;

/// インフラ層で発生するエラー
#[derive(Display)]
#[display("{kind}")]
pub struct InfraError {
    kind:       InfraErrorKind,
    span_trace: SpanTrace,
}

/// インフラ層エラーの種別
#[derive(Debug, Error)]
pub enum InfraErrorKind {
    #[error("データベースエラー: {0}")]
    Database(#[from] sqlx::Error),

    /// スナップショットファイルの読み書き
    #[error("入出力エラー: {0}")]
    Io(#[from] std::io::Error),

    /// スナップショットの JSON が壊れている
    #[error("スナップショットを解析できません: {0}")]
    Snapshot(#[from] serde_json::Error),

    /// 保存済みの行がユーザーレコードの条件を満たさない（空のユーザー名など）
    #[error("不正なレコード: {0}")]
    CorruptRecord(#[from] DomainError),

    /// メールアドレスの一意制約違反
    ///
    /// ユースケース層で競合エラーに変換する。
    #[error("メールアドレスは既に使われています: {0}")]
    DuplicateEmail(String),

    /// 認証情報のハッシュ化・検証に失敗
    #[error("認証情報の処理に失敗しました: {0}")]
    Credential(String),
}

impl InfraError {
    /// 種別からエラーを作り、現在のスパンを記録する
    pub fn new(kind: InfraErrorKind) -> Self {
        Self {
            kind,
            span_trace: SpanTrace::capture(),
        }
    }

    pub fn kind(&self) -> &InfraErrorKind {
        &self.kind
    }

    pub fn span_trace(&self) -> &SpanTrace {
        &self.span_trace
    }

    pub fn duplicate_email(email: impl Into<String>) -> Self {
        Self::new(InfraErrorKind::DuplicateEmail(email.into()))
    }

    pub fn credential(msg: impl Into<String>) -> Self {
        Self::new(InfraErrorKind::Credential(msg.into()))
    }

    /// 一意制約違反なら、重複したメールアドレスを返す
    pub fn as_duplicate_email(&self) -> Option<&str> {
        match &self.kind {
            InfraErrorKind::DuplicateEmail(email) => Some(email),
            _ => None,
        }
    }
}

impl fmt::Debug for InfraError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("InfraError")
            .field("kind", &self.kind)
            .field("span_trace", &self.span_trace)
            .finish()
    }
}

impl std::error::Error for InfraError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        std::error::Error::source(&self.kind)
    }
}

impl From<InfraErrorKind> for InfraError {
    fn from(kind: InfraErrorKind) -> Self {
        Self::new(kind)
    }
}

/// 下位エラーから `?` で変換できるようにする
macro_rules! impl_from_source {
    ($($source:ty),+ $(,)?) => {
        $(
            impl From<$source> for InfraError {
                fn from(source: $source) -> Self {
                    Self::new(InfraErrorKind::from(source))
                }
            }
        )+
    };
}

impl_from_source!(sqlx::Error, std::io::Error, serde_json::Error, DomainError);
