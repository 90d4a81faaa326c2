//! # Account Service サーバー
//!
//! ユーザーアカウントを管理する HTTP API サーバー。
//!
//! ## 環境変数
//!
//! | 変数名 | 必須 | 説明 |
//! |--------|------|------|
//! | `ACCOUNT_HOST` | No | バインドアドレス（デフォルト: `0.0.0.0`） |
//! | `ACCOUNT_PORT` | No | ポート番号（デフォルト: `3000`） |
//! | `STORE_BACKEND` | No | `memory`（デフォルト）または `postgres` |
//! | `DATABASE_URL` | `postgres` のとき | PostgreSQL 接続 URL |
//! | `USERS_FILE` | No | インメモリストアのスナップショットファイル |
//! | `CREDENTIAL_SCHEME` | No | `argon2`（デフォルト）または `plain` |
//! | `LOG_FORMAT` | No | `json` または `pretty`（デフォルト） |
//!
//! ## 起動方法
//!
//! ```bash
//! # インメモリストア
//! cargo run -p userbase-account-service
//!
//! # PostgreSQL
//! STORE_BACKEND=postgres DATABASE_URL=postgres://... cargo run -p userbase-account-service --release
//! ```

use std::{net::SocketAddr, sync::Arc};

use anyhow::Context as _;
use tokio::net::TcpListener;
use userbase_account_service::{
   app::build_router,
   config::{AccountConfig, ConfigError, CredentialSchemeKind, StoreBackend},
   handler::AccountState,
   usecase::AccountUseCaseImpl,
};
use userbase_infra::{
   Argon2CredentialScheme,
   CredentialScheme,
   InMemoryUserRepository,
   PlainCredentialScheme,
   PostgresUserRepository,
   UserRepository,
   db,
};
use userbase_shared::observability::{TracingConfig, init_tracing};

/// Account Service サーバーのエントリーポイント
#[tokio::main]
async fn main() -> anyhow::Result<()> {
   // .env ファイルを読み込む（存在する場合）
   dotenvy::dotenv().ok();

   let tracing_config = TracingConfig::from_env("account-service");
   init_tracing(&tracing_config);

   let config = AccountConfig::from_env().context("設定の読み込みに失敗しました")?;

   tracing::info!(
      store = %config.store,
      credential_scheme = %config.credential_scheme,
      "Account Service サーバーを起動します: {}:{}",
      config.host,
      config.port
   );

   let repository = open_repository(&config).await?;
   let scheme: Arc<dyn CredentialScheme> = match config.credential_scheme {
      CredentialSchemeKind::Argon2 => Arc::new(Argon2CredentialScheme::new()),
      CredentialSchemeKind::Plain => {
         tracing::warn!("認証情報を平文で保存します。開発用途以外では使用しないでください");
         Arc::new(PlainCredentialScheme)
      }
   };

   let state = Arc::new(AccountState {
      usecase: AccountUseCaseImpl::new(repository, scheme),
   });
   let app = build_router(state);

   let addr: SocketAddr = format!("{}:{}", config.host, config.port)
      .parse()
      .context("アドレスのパースに失敗しました")?;

   let listener = TcpListener::bind(addr).await?;
   tracing::info!("Account Service サーバーが起動しました: {}", addr);

   axum::serve(listener, app)
      .with_graceful_shutdown(shutdown_signal())
      .await?;

   tracing::info!("Account Service サーバーを停止しました");
   Ok(())
}

/// 設定に応じたユーザーストアを開く
async fn open_repository(config: &AccountConfig) -> anyhow::Result<Arc<dyn UserRepository>> {
   match config.store {
      StoreBackend::Memory => match &config.users_file {
         Some(path) => {
            let repository = InMemoryUserRepository::open(path)
               .await
               .with_context(|| format!("スナップショットを読み込めません: {}", path.display()))?;
            tracing::info!(path = %path.display(), "スナップショット付きインメモリストアを使用します");
            Ok(Arc::new(repository))
         }
         None => {
            tracing::info!("インメモリストアを使用します（再起動で消去されます）");
            Ok(Arc::new(InMemoryUserRepository::new()))
         }
      },
      StoreBackend::Postgres => {
         let url = config
            .database_url
            .as_deref()
            .ok_or(ConfigError::MissingDatabaseUrl)?;
         let pool = db::create_pool(url)
            .await
            .context("データベース接続に失敗しました")?;
         tracing::info!("データベースに接続しました");
         Ok(Arc::new(PostgresUserRepository::new(pool)))
      }
   }
}

/// Ctrl+C または SIGTERM を待つ
async fn shutdown_signal() {
   let ctrl_c = async {
      if let Err(e) = tokio::signal::ctrl_c().await {
         tracing::error!(error = %e, "Ctrl+C ハンドラを登録できません");
      }
   };

   #[cfg(unix)]
   let terminate = async {
      match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
         Ok(mut signal) => {
            signal.recv().await;
         }
         Err(e) => {
            tracing::error!(error = %e, "SIGTERM ハンドラを登録できません");
            std::future::pending::<()>().await;
         }
      }
   };

   #[cfg(not(unix))]
   let terminate = std::future::pending::<()>();

   tokio::select! {
      () = ctrl_c => {},
      () = terminate => {},
   }

   tracing::info!("シャットダウンシグナルを受信しました");
}
