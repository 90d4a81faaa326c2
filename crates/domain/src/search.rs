//! # ユーザー検索
//!
//! 名前・メールアドレスの任意クエリから検索戦略を決定し、レコードの一致を判定する。
//!
//! ## 解決順序
//!
//! 空文字列のパラメータは未指定として扱う。最初に該当した分岐が採用される。
//!
//! | 条件 | 戦略 | 一致条件 |
//! |------|------|----------|
//! | どちらも未指定 | [`SearchStrategy::All`] | 全件 |
//! | 両方指定 | [`SearchStrategy::NameAndEmail`] | 名前・メールとも部分文字列一致（大文字小文字無視） |
//! | 名前のみ | [`SearchStrategy::ExactName`] | ストアのユーザー名完全一致検索 |
//! | メールのみ | [`SearchStrategy::EmailCharacters`] | クエリの各文字がメールアドレスのどこかに含まれる |
//!
//! ## 非対称性について
//!
//! 両方指定時のメール条件は部分文字列一致、メールのみ指定時は文字集合の包含判定で、
//! 後者の方が緩い。既存クライアントが観測している挙動であり、2 つの判定は
//! 別々の関数として保持する。統一しないこと。

use strum::IntoStaticStr;

use crate::user::UserRecord;

/// 検索戦略
#[derive(Debug, Clone, Copy, PartialEq, Eq, IntoStaticStr, strum::Display)]
#[strum(serialize_all = "snake_case")]
pub enum SearchStrategy {
    All,
    NameAndEmail,
    ExactName,
    EmailCharacters,
}

/// 解決済みの検索クエリ
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SearchQuery {
    /// 条件なし
    All,
    /// 名前とメールアドレスの部分文字列一致
    NameAndEmail { name: String, email: String },
    /// ユーザー名の完全一致
    ExactName(String),
    /// メールアドレスの文字集合包含
    EmailCharacters(String),
}

impl SearchQuery {
    /// クエリパラメータから検索クエリを解決する
    pub fn from_params(name: Option<&str>, email: Option<&str>) -> Self {
        let name = name.filter(|v| !v.is_empty());
        let email = email.filter(|v| !v.is_empty());

        match (name, email) {
            (None, None) => Self::All,
            (Some(name), Some(email)) => Self::NameAndEmail {
                name:  name.to_string(),
                email: email.to_string(),
            },
            (Some(name), None) => Self::ExactName(name.to_string()),
            (None, Some(email)) => Self::EmailCharacters(email.to_string()),
        }
    }

    pub fn strategy(&self) -> SearchStrategy {
        match self {
            Self::All => SearchStrategy::All,
            Self::NameAndEmail { .. } => SearchStrategy::NameAndEmail,
            Self::ExactName(_) => SearchStrategy::ExactName,
            Self::EmailCharacters(_) => SearchStrategy::EmailCharacters,
        }
    }

    /// レコードがクエリに一致するか判定する
    ///
    /// `ExactName` はストアの完全一致検索と同じ意味（大文字小文字を区別する等価比較）。
    pub fn matches(&self, record: &UserRecord) -> bool {
        match self {
            Self::All => true,
            Self::NameAndEmail { name, email } => {
                contains_ignore_case(record.username().as_str(), name)
                    && contains_ignore_case(record.email().as_str(), email)
            }
            Self::ExactName(name) => record.username().as_str() == name,
            Self::EmailCharacters(email) => {
                covers_characters_ignore_case(record.email().as_str(), email)
            }
        }
    }

    /// レコード列を絞り込む（順序は維持する）
    pub fn filter(&self, records: Vec<UserRecord>) -> Vec<UserRecord> {
        records.into_iter().filter(|r| self.matches(r)).collect()
    }
}

/// 大文字小文字を無視した部分文字列一致
pub fn contains_ignore_case(haystack: &str, needle: &str) -> bool {
    haystack.to_lowercase().contains(&needle.to_lowercase())
}

/// 大文字小文字を無視した文字集合の包含判定
///
/// `needle` のすべての文字が `haystack` のどこかに現れれば true。
/// 出現順序・回数は問わない。
pub fn covers_characters_ignore_case(haystack: &str, needle: &str) -> bool {
    let haystack = haystack.to_lowercase();
    needle
        .to_lowercase()
        .chars()
        .all(|c| haystack.contains(c))
}

/// 検索結果
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SearchOutcome {
    /// ストアにユーザーが 1 件もない（`All` のみ）
    NoUsers,
    /// 条件に一致するユーザーがない
    NoMatch(SearchStrategy),
    /// 全件（`All`）
    All(Vec<UserRecord>),
    /// 絞り込み結果（`NameAndEmail` / `EmailCharacters`）
    Matches(Vec<UserRecord>),
    /// 完全一致した 1 件（`ExactName`）
    Exact(UserRecord),
}

impl SearchOutcome {
    /// 全件取得または絞り込みの結果から検索結果を組み立てる
    pub fn from_records(strategy: SearchStrategy, records: Vec<UserRecord>) -> Self {
        match (strategy, records.is_empty()) {
            (SearchStrategy::All, true) => Self::NoUsers,
            (SearchStrategy::All, false) => Self::All(records),
            (strategy, true) => Self::NoMatch(strategy),
            (_, false) => Self::Matches(records),
        }
    }

    /// 完全一致検索の結果から検索結果を組み立てる
    pub fn from_exact(record: Option<UserRecord>) -> Self {
        match record {
            Some(record) => Self::Exact(record),
            None => Self::NoMatch(SearchStrategy::ExactName),
        }
    }
}
