//! # ログ出力の初期化
//!
//! `tracing-subscriber` の構成をサービス共通で提供する。
//!
//! | 変数名 | 説明 |
//! |--------|------|
//! | `LOG_FORMAT` | `json` または `pretty`（デフォルト） |
//! | `RUST_LOG` | フィルタ（未設定時は [`DEFAULT_FILTER`]） |

/// `RUST_LOG` 未設定時のフィルタ
pub const DEFAULT_FILTER: &str = "info,userbase=debug";

/// ログ出力形式
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LogFormat {
    /// 1 行 1 イベントの JSON
    Json,
    #[default]
    Pretty,
}

impl LogFormat {
    /// `LOG_FORMAT` の値を解釈する
    ///
    /// 未設定・空文字列はデフォルト。未知の値は警告を出して `Pretty` に倒す。
    /// subscriber の初期化前に呼ばれるため警告は stderr に直接書く。
    pub fn from_value(value: Option<&str>) -> Self {
        match value.map(str::trim) {
            None | Some("") => Self::default(),
            Some("json") => Self::Json,
            Some("pretty") => Self::Pretty,
            Some(other) => {
                eprintln!("WARNING: unknown LOG_FORMAT={other:?}, falling back to pretty");
                Self::Pretty
            }
        }
    }
}

/// トレーシング初期化設定
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TracingConfig {
    pub service_name:   String,
    pub log_format:     LogFormat,
    /// `RUST_LOG` が無いときに使うフィルタ
    pub default_filter: String,
}

impl TracingConfig {
    pub fn new(service_name: impl Into<String>, log_format: LogFormat) -> Self {
        Self {
            service_name: service_name.into(),
            log_format,
            default_filter: DEFAULT_FILTER.to_string(),
        }
    }

    /// `LOG_FORMAT` を読んで設定を作る
    pub fn from_env(service_name: impl Into<String>) -> Self {
        let format = std::env::var("LOG_FORMAT").ok();
        Self::new(service_name, LogFormat::from_value(format.as_deref()))
    }
}

/// グローバル subscriber を登録する
///
/// `ErrorLayer` を含めるので、`InfraError` が捕捉する `SpanTrace` に
/// ハンドラのスパン（ユーザー ID など）が残る。二重登録は無視される。
#[cfg(feature = "observability")]
pub fn init_tracing(config: &TracingConfig) {
    use tracing_subscriber::{
        EnvFilter,
        Layer as _,
        fmt,
        layer::SubscriberExt,
        util::SubscriberInitExt,
    };

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&config.default_filter));

    let output = match config.log_format {
        LogFormat::Json => fmt::layer()
            .json()
            .flatten_event(true)
            .with_current_span(true)
            .with_span_list(false)
            .boxed(),
        LogFormat::Pretty => fmt::layer().with_target(false).boxed(),
    };

    let registered = tracing_subscriber::registry()
        .with(filter)
        .with(output)
        .with(tracing_error::ErrorLayer::default())
        .try_init();

    if registered.is_ok() {
        tracing::info!(
            service = %config.service_name,
            format = ?config.log_format,
            "ログ出力を初期化しました"
        );
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn test_log_formatは既知の値を解釈する() {
        assert_eq!(LogFormat::from_value(Some("json")), LogFormat::Json);
        assert_eq!(LogFormat::from_value(Some(" json ")), LogFormat::Json);
        assert_eq!(LogFormat::from_value(Some("pretty")), LogFormat::Pretty);
    }

    #[test]
    fn test_log_formatは未設定や不正値でprettyになる() {
        assert_eq!(LogFormat::from_value(None), LogFormat::Pretty);
        assert_eq!(LogFormat::from_value(Some("")), LogFormat::Pretty);
        assert_eq!(LogFormat::from_value(Some("JSON")), LogFormat::Pretty);
    }

    #[test]
    fn test_tracing_configはデフォルトフィルタを持つ() {
        let config = TracingConfig::new("account-service", LogFormat::Json);

        assert_eq!(config.service_name, "account-service");
        assert_eq!(config.default_filter, DEFAULT_FILTER);
    }
}
