//! ルーター構築

use std::sync::Arc;

use axum::{
   Router,
   routing::{get, post},
};
use tower_http::trace::TraceLayer;

use crate::handler::{
   AccountState,
   delete_user,
   get_user,
   health_check,
   list_users,
   login,
   register,
   search_users,
   update_user,
};

/// Account Service のルーターを構築する
///
/// `/users/search` は `/user/{id}` と衝突しないよう複数形のパスに置く。
pub fn build_router(state: Arc<AccountState>) -> Router {
   Router::new()
      .route("/health", get(health_check))
      .route("/users", get(list_users))
      .route("/users/search", get(search_users))
      .route(
         "/user/{id}",
         get(get_user).put(update_user).delete(delete_user),
      )
      .route("/register", post(register))
      .route("/login", post(login))
      .with_state(state)
      .layer(TraceLayer::new_for_http())
}
