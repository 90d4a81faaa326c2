//! # 認証情報
//!
//! 認証情報（パスワード）関連の値オブジェクトを定義する。
//!
//! ## ドメイン用語
//!
//! | 型 | ドメイン用語 | 用途 |
//! |---|------------|------|
//! | [`PlainCredential`] | 平文の認証情報 | 登録・更新・ログイン時の入力値 |
//! | [`StoredCredential`] | 保存済み認証情報 | ストアに保存される不透明な値 |
//! | [`CredentialVerifyResult`] | 検証結果 | 認証情報検証の成否 |
//!
//! 保存形式（ハッシュか平文か）はドメイン層の関心事ではない。
//! 変換と比較はインフラ層の `CredentialScheme` が担う。

/// 平文の認証情報（リクエストの入力値）
///
/// Debug 出力では値をマスクする。
#[derive(Clone)]
pub struct PlainCredential(String);

impl std::fmt::Debug for PlainCredential {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_tuple("PlainCredential").field(&"[REDACTED]").finish()
    }
}

impl PlainCredential {
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// 保存済み認証情報
///
/// ストアが保持する不透明な秘密情報。レスポンスには決して含めない。
/// ハッシュ値であっても Debug 出力ではマスクする。
#[derive(Clone, PartialEq, Eq)]
pub struct StoredCredential(String);

impl std::fmt::Debug for StoredCredential {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_tuple("StoredCredential").field(&"[REDACTED]").finish()
    }
}

impl StoredCredential {
    /// 保存形式の文字列からインスタンスを作成する
    ///
    /// 主にストアからの復元時に使用する。
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_string(self) -> String {
        self.0
    }
}

/// 認証情報の検証結果
///
/// bool ではなく専用の型を使うことで、意図が明確になる。
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CredentialVerifyResult {
    /// 一致した
    Match,
    /// 一致しなかった
    Mismatch,
}

impl CredentialVerifyResult {
    pub fn is_match(&self) -> bool {
        matches!(self, Self::Match)
    }

    pub fn is_mismatch(&self) -> bool {
        matches!(self, Self::Mismatch)
    }
}

impl From<bool> for CredentialVerifyResult {
    fn from(matched: bool) -> Self {
        if matched { Self::Match } else { Self::Mismatch }
    }
}

#[cfg(test)]
mod tests {
    use rstest::rstest;

    use super::*;

    #[rstest]
    fn test_平文の認証情報を作成できる() {
        let credential = PlainCredential::new("password123");
        assert_eq!(credential.as_str(), "password123");
    }

    #[rstest]
    fn test_平文の認証情報のdebug出力はマスクされる() {
        let credential = PlainCredential::new("secret");
        let debug = format!("{:?}", credential);
        assert!(debug.contains("[REDACTED]"));
        assert!(!debug.contains("secret"));
    }

    #[rstest]
    fn test_保存済み認証情報のdebug出力もマスクされる() {
        let stored = StoredCredential::new("$argon2id$v=19$...");
        let debug = format!("{:?}", stored);
        assert!(debug.contains("[REDACTED]"));
        assert!(!debug.contains("argon2id"));
        assert_eq!(stored.as_str(), "$argon2id$v=19$...");
    }

    #[rstest]
    #[case(true, CredentialVerifyResult::Match)]
    #[case(false, CredentialVerifyResult::Mismatch)]
    fn test_boolからの変換(#[case] input: bool, #[case] expected: CredentialVerifyResult) {
        let result = CredentialVerifyResult::from(input);
        assert_eq!(result, expected);
        assert_eq!(result.is_match(), input);
        assert_eq!(result.is_mismatch(), !input);
    }
}
