//! ユーザー検索の解決
//!
//! 検索戦略の決定と一致判定は `userbase_domain::search` が担い、
//! ここではストアへの問い合わせを組み立てる。

use std::sync::Arc;

use userbase_domain::{
   search::{SearchOutcome, SearchQuery},
   user::Username,
};
use userbase_infra::{InfraError, UserRepository};

/// 検索リゾルバ
#[derive(Clone)]
pub struct SearchResolver {
   repository: Arc<dyn UserRepository>,
}

impl SearchResolver {
   pub fn new(repository: Arc<dyn UserRepository>) -> Self {
      Self { repository }
   }

   /// クエリパラメータから検索結果を求める
   pub async fn resolve(
      &self,
      name: Option<&str>,
      email: Option<&str>,
   ) -> Result<SearchOutcome, InfraError> {
      self.resolve_query(&SearchQuery::from_params(name, email)).await
   }

   /// 解決済みのクエリで検索する
   pub async fn resolve_query(&self, query: &SearchQuery) -> Result<SearchOutcome, InfraError> {
      let strategy = query.strategy();
      tracing::debug!(%strategy, "ユーザー検索");

      match query {
         SearchQuery::ExactName(name) => {
            // from_params は空文字列を除外しているので失敗しない
            let Ok(username) = Username::new(name.as_str()) else {
               return Ok(SearchOutcome::from_exact(None));
            };
            let record = self.repository.find_by_username(&username).await?;
            Ok(SearchOutcome::from_exact(record))
         }
         _ => {
            let records = self.repository.find_all().await?;
            Ok(SearchOutcome::from_records(strategy, query.filter(records)))
         }
      }
   }
}
