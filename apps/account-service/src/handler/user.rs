//! # ユーザーハンドラ
//!
//! アカウント管理 API を提供する。
//!
//! ## エンドポイント
//!
//! - `GET /users` - ユーザー一覧
//! - `GET /user/{id}` - ユーザー取得
//! - `POST /register` - ユーザー登録
//! - `POST /login` - ログイン
//! - `PUT /user/{id}` - ユーザー更新（全フィールド置換）
//! - `DELETE /user/{id}` - ユーザー削除
//! - `GET /users/search?name=&email=` - ユーザー検索
//!
//! レスポンスのキー名（`allUsers`, `total_user`, `newUser`, `updateUser` など）は
//! 既存クライアントとの互換性のため固定。認証情報はどのレスポンスにも含めない。

use std::{collections::HashMap, sync::Arc};

use axum::{
   Json,
   extract::{Path, Query, State, rejection::JsonRejection},
   http::StatusCode,
   response::{IntoResponse, Response},
};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use userbase_domain::{
   search::{SearchOutcome, SearchStrategy},
   user::UserRecord,
   validation::{Field, FieldSource, Login, Registration, Replacement},
};
use userbase_shared::MessageResponse;
use uuid::Uuid;

use crate::{
   error::AccountError,
   usecase::{AccountUseCaseImpl, user::NO_USERS_MESSAGE},
};

/// アカウント API の共有状態
pub struct AccountState {
   pub usecase: AccountUseCaseImpl,
}

// --- リクエスト型 ---

/// JSON ボディの抽出結果（解析失敗を含む）
type JsonBody = Result<Json<Map<String, Value>>, JsonRejection>;

/// リクエストボディから取り出したフィールド
///
/// 文字列以外のスカラー（数値・真偽値）は文字列表現に変換する。
/// `false`・数値の 0・`null`・配列・オブジェクトは未指定扱い。
#[derive(Debug, Default)]
pub struct RequestFields(HashMap<Field, String>);

impl RequestFields {
   const FIELDS: [Field; 3] = [Field::Username, Field::Email, Field::Credential];

   pub fn from_json(body: &Map<String, Value>) -> Self {
      let fields = Self::FIELDS
         .into_iter()
         .filter_map(|field| {
            body.get(field.as_str())
               .and_then(coerce)
               .map(|value| (field, value))
         })
         .collect();
      Self(fields)
   }

   /// 解析できなかったボディは空のフィールドとして扱う
   ///
   /// 後続の検証で不足フィールドとして報告される。
   fn from_payload(payload: JsonBody) -> Self {
      match payload {
         Ok(Json(body)) => Self::from_json(&body),
         Err(rejection) => {
            tracing::debug!(%rejection, "リクエストボディを解析できませんでした");
            Self::default()
         }
      }
   }
}

impl FieldSource for RequestFields {
   fn field(&self, field: Field) -> Option<&str> {
      self.0.get(&field).map(String::as_str)
   }
}

/// JSON 値を文字列に変換する
///
/// 偽値（`false`, `0`, `-0`, `0.0`）は未入力とみなす。
fn coerce(value: &Value) -> Option<String> {
   match value {
      Value::String(s) => Some(s.clone()),
      Value::Number(n) if n.as_f64().is_some_and(|f| f == 0.0) => None,
      Value::Number(n) => Some(n.to_string()),
      Value::Bool(true) => Some(true.to_string()),
      Value::Bool(false) | Value::Null | Value::Array(_) | Value::Object(_) => None,
   }
}

/// 検索クエリパラメータ
#[derive(Debug, Default, Deserialize)]
pub struct SearchParams {
   pub name:  Option<String>,
   pub email: Option<String>,
}

// --- レスポンス型 ---

/// ユーザー情報レスポンス（認証情報を含まない）
#[derive(Debug, Serialize)]
pub struct UserResponse {
   pub id:       Uuid,
   pub username: String,
   pub email:    String,
}

impl From<&UserRecord> for UserResponse {
   fn from(user: &UserRecord) -> Self {
      Self {
         id:       *user.id().as_uuid(),
         username: user.username().to_string(),
         email:    user.email().to_string(),
      }
   }
}

fn to_responses(users: &[UserRecord]) -> Vec<UserResponse> {
   users.iter().map(UserResponse::from).collect()
}

/// 一覧レスポンス
#[derive(Debug, Serialize)]
pub struct UserListResponse {
   pub total_user: usize,
   #[serde(rename = "allUsers")]
   pub all_users:  Vec<UserResponse>,
}

impl UserListResponse {
   fn new(users: &[UserRecord]) -> Self {
      Self {
         total_user: users.len(),
         all_users:  to_responses(users),
      }
   }
}

#[derive(Debug, Serialize)]
pub struct UserData {
   pub user: UserResponse,
}

#[derive(Debug, Serialize)]
pub struct NewUserData {
   #[serde(rename = "newUser")]
   pub new_user: UserResponse,
}

#[derive(Debug, Serialize)]
pub struct UpdatedUserData {
   #[serde(rename = "updateUser")]
   pub update_user: UserResponse,
}

#[derive(Debug, Serialize)]
pub struct UsersData {
   pub users: Vec<UserResponse>,
}

/// 一致なしのときのメッセージ
fn no_match_message(strategy: SearchStrategy) -> &'static str {
   match strategy {
      SearchStrategy::All => NO_USERS_MESSAGE,
      SearchStrategy::NameAndEmail => {
         "No users found with name and email containing the same letters"
      }
      SearchStrategy::ExactName => "No users found with the specified name",
      SearchStrategy::EmailCharacters => "No users found with email containing the same letters",
   }
}

// --- ハンドラ ---

/// GET /users
///
/// ## レスポンス
///
/// - `200 OK`: `{ total_user, allUsers }`
/// - `404 Not Found`: ユーザーが 1 件もない（`{ msg }`）
#[tracing::instrument(skip_all)]
pub async fn list_users(
   State(state): State<Arc<AccountState>>,
) -> Result<Json<UserListResponse>, AccountError> {
   let users = state.usecase.list_users().await?;
   Ok(Json(UserListResponse::new(&users)))
}

/// GET /user/{id}
///
/// ## レスポンス
///
/// - `200 OK`: `{ user }`
/// - `404 Not Found`: ユーザーが存在しない、または ID が UUID でない
#[tracing::instrument(skip_all, fields(user_id = %id))]
pub async fn get_user(
   State(state): State<Arc<AccountState>>,
   Path(id): Path<String>,
) -> Result<Json<UserData>, AccountError> {
   let user = state.usecase.get_user(&id).await?;
   Ok(Json(UserData {
      user: UserResponse::from(&user),
   }))
}

/// POST /register
///
/// ## リクエストボディ
///
/// `{ "username", "email", "password" }`（すべて必須）
///
/// ## レスポンス
///
/// - `201 Created`: `{ newUser }`
/// - `400 Bad Request`: 必須フィールドの不足
/// - `409 Conflict`: メールアドレスが既に使われている
#[tracing::instrument(skip_all)]
pub async fn register(
   State(state): State<Arc<AccountState>>,
   payload: JsonBody,
) -> Result<(StatusCode, Json<NewUserData>), AccountError> {
   let form = Registration::from_fields(&RequestFields::from_payload(payload))?;

   let created = state.usecase.register(form).await?;

   Ok((
      StatusCode::CREATED,
      Json(NewUserData {
         new_user: UserResponse::from(&created),
      }),
   ))
}

/// POST /login
///
/// ## リクエストボディ
///
/// `{ "email", "password" }`（すべて必須）
///
/// ## レスポンス
///
/// - `200 OK`: `{ user }`（認証情報を含まない）
/// - `400 Bad Request`: 必須フィールドの不足、または認証情報の不一致
/// - `404 Not Found`: メールアドレスに対応するユーザーがいない
#[tracing::instrument(skip_all)]
pub async fn login(
   State(state): State<Arc<AccountState>>,
   payload: JsonBody,
) -> Result<Json<UserData>, AccountError> {
   let form = Login::from_fields(&RequestFields::from_payload(payload))?;

   let user = state.usecase.login(form).await?;

   Ok(Json(UserData {
      user: UserResponse::from(&user),
   }))
}

/// PUT /user/{id}
///
/// 検証はストアへのアクセスより先に行う。
///
/// ## レスポンス
///
/// - `200 OK`: `{ updateUser }`
/// - `400 Bad Request`: 必須フィールドの不足
/// - `404 Not Found`: ユーザーが存在しない
/// - `409 Conflict`: 他のユーザーのメールアドレスへの変更
#[tracing::instrument(skip_all, fields(user_id = %id))]
pub async fn update_user(
   State(state): State<Arc<AccountState>>,
   Path(id): Path<String>,
   payload: JsonBody,
) -> Result<Json<UpdatedUserData>, AccountError> {
   let form = Replacement::from_fields(&RequestFields::from_payload(payload))?;

   let updated = state.usecase.update(&id, form).await?;

   Ok(Json(UpdatedUserData {
      update_user: UserResponse::from(&updated),
   }))
}

/// DELETE /user/{id}
///
/// ## レスポンス
///
/// - `200 OK`: `{ "msg": "User deleted" }`
/// - `404 Not Found`: ユーザーが存在しない
#[tracing::instrument(skip_all, fields(user_id = %id))]
pub async fn delete_user(
   State(state): State<Arc<AccountState>>,
   Path(id): Path<String>,
) -> Result<Json<MessageResponse>, AccountError> {
   state.usecase.delete(&id).await?;
   Ok(Json(MessageResponse::new("User deleted")))
}

/// GET /users/search
///
/// ## クエリパラメータ
///
/// - `name`: ユーザー名（任意）
/// - `email`: メールアドレス（任意）
///
/// ## レスポンス
///
/// - `200 OK`: 条件なし `{ total_user, allUsers }` / 名前のみ `{ user }` /
///   それ以外 `{ users }`
/// - `404 Not Found`: 該当なし（`{ msg }`、条件ごとに文言が異なる）
#[tracing::instrument(skip_all)]
pub async fn search_users(
   State(state): State<Arc<AccountState>>,
   Query(params): Query<SearchParams>,
) -> Result<Response, AccountError> {
   let outcome = state
      .usecase
      .search(params.name.as_deref(), params.email.as_deref())
      .await?;

   let response = match outcome {
      SearchOutcome::NoUsers => {
         return Err(AccountError::NoResults(NO_USERS_MESSAGE.to_string()));
      }
      SearchOutcome::NoMatch(strategy) => {
         return Err(AccountError::NoResults(
            no_match_message(strategy).to_string(),
         ));
      }
      SearchOutcome::All(users) => Json(UserListResponse::new(&users)).into_response(),
      SearchOutcome::Matches(users) => Json(UsersData {
         users: to_responses(&users),
      })
      .into_response(),
      SearchOutcome::Exact(user) => Json(UserData {
         user: UserResponse::from(&user),
      })
      .into_response(),
   };

   Ok(response)
}

#[cfg(test)]
mod tests {
   use axum::{
      Router,
      body::Body,
      http::{Method, Request, header},
      routing::{get, post},
   };
   use pretty_assertions::assert_eq;
   use rstest::rstest;
   use serde_json::json;
   use tower::ServiceExt;
   use userbase_domain::{
      credential::StoredCredential,
      user::{Email, UserId, Username},
   };
   use userbase_infra::{
      PlainCredentialScheme,
      mock::{MockUserRepository, RepositoryCall},
   };

   use super::*;

   // テストデータ生成

   fn record(username: &str, email: &str) -> UserRecord {
      UserRecord::new(
         UserId::new(),
         Username::new(username).unwrap(),
         Email::new(email).unwrap(),
         StoredCredential::new("secret"),
      )
   }

   fn create_test_app(repo: MockUserRepository) -> Router {
      let state = Arc::new(AccountState {
         usecase: AccountUseCaseImpl::new(Arc::new(repo), Arc::new(PlainCredentialScheme)),
      });

      Router::new()
         .route("/users", get(list_users))
         .route("/users/search", get(search_users))
         .route(
            "/user/{id}",
            get(get_user).put(update_user).delete(delete_user),
         )
         .route("/register", post(register))
         .route("/login", post(login))
         .with_state(state)
   }

   fn json_request(method: Method, uri: &str, body: Value) -> Request<Body> {
      Request::builder()
         .method(method)
         .uri(uri)
         .header(header::CONTENT_TYPE, "application/json")
         .body(Body::from(body.to_string()))
         .unwrap()
   }

   fn empty_request(method: Method, uri: &str) -> Request<Body> {
      Request::builder()
         .method(method)
         .uri(uri)
         .body(Body::empty())
         .unwrap()
   }

   async fn send(app: Router, request: Request<Body>) -> (StatusCode, Value) {
      let response = app.oneshot(request).await.unwrap();
      let status = response.status();
      let body = axum::body::to_bytes(response.into_body(), usize::MAX)
         .await
         .unwrap();
      (status, serde_json::from_slice(&body).unwrap())
   }

   // リクエストフィールド

   #[rstest]
   #[case(json!({ "email": "a@b.c", "password": 1234 }), Some("1234"))]
   #[case(json!({ "email": "a@b.c", "password": true }), Some("true"))]
   #[case(json!({ "email": "a@b.c", "password": 1.5 }), Some("1.5"))]
   #[case(json!({ "email": "a@b.c", "password": false }), None)]
   #[case(json!({ "email": "a@b.c", "password": 0 }), None)]
   #[case(json!({ "email": "a@b.c", "password": -0.0 }), None)]
   #[case(json!({ "email": "a@b.c", "password": 0.0 }), None)]
   #[case(json!({ "email": "a@b.c", "password": null }), None)]
   #[case(json!({ "email": "a@b.c", "password": ["x"] }), None)]
   #[case(json!({ "email": "a@b.c" }), None)]
   fn test_スカラー値は文字列に変換される(#[case] body: Value, #[case] expected: Option<&str>) {
      let Value::Object(map) = body else {
         panic!("オブジェクトを期待");
      };

      let fields = RequestFields::from_json(&map);

      assert_eq!(fields.field(Field::Credential), expected);
      assert_eq!(fields.field(Field::Email), Some("a@b.c"));
   }

   // テストケース

   #[tokio::test]
   async fn test_list_users_空なら404でmsg() {
      let sut = create_test_app(MockUserRepository::new());

      let (status, json) = send(sut, empty_request(Method::GET, "/users")).await;

      assert_eq!(status, StatusCode::NOT_FOUND);
      assert_eq!(json, json!({ "msg": "No users at this time.." }));
   }

   #[tokio::test]
   async fn test_list_users_件数と一覧を返し認証情報を含まない() {
      let sut = create_test_app(MockUserRepository::with_users(vec![
         record("John", "john@example.com"),
         record("Jane", "jane@example.com"),
      ]));

      let (status, json) = send(sut, empty_request(Method::GET, "/users")).await;

      assert_eq!(status, StatusCode::OK);
      assert_eq!(json["total_user"], 2);
      assert_eq!(json["allUsers"][0]["username"], "John");
      assert!(json["allUsers"][0].get("password").is_none());
      assert!(json["allUsers"][0].get("credential").is_none());
   }

   #[tokio::test]
   async fn test_get_user_見つかればuserを返す() {
      let john = record("John", "john@example.com");
      let uri = format!("/user/{}", john.id());
      let sut = create_test_app(MockUserRepository::with_users(vec![john.clone()]));

      let (status, json) = send(sut, empty_request(Method::GET, &uri)).await;

      assert_eq!(status, StatusCode::OK);
      assert_eq!(
         json,
         json!({ "user": { "id": john.id().to_string(), "username": "John", "email": "john@example.com" } })
      );
   }

   #[rstest]
   #[case("/user/123")]
   #[case("/user/00000000-0000-0000-0000-000000000000")]
   #[tokio::test]
   async fn test_get_user_見つからなければ404(#[case] uri: &str) {
      let sut = create_test_app(MockUserRepository::new());

      let (status, json) = send(sut, empty_request(Method::GET, uri)).await;

      assert_eq!(status, StatusCode::NOT_FOUND);
      assert_eq!(json, json!({ "error": "User not found!" }));
   }

   #[tokio::test]
   async fn test_register_201でnew_userを返す() {
      let sut = create_test_app(MockUserRepository::new());

      let (status, json) = send(
         sut,
         json_request(
            Method::POST,
            "/register",
            json!({ "username": "John", "email": "john@example.com", "password": "pw" }),
         ),
      )
      .await;

      assert_eq!(status, StatusCode::CREATED);
      assert_eq!(json["newUser"]["username"], "John");
      assert_eq!(json["newUser"]["email"], "john@example.com");
      assert!(json["newUser"]["id"].is_string());
      assert!(json["newUser"].get("password").is_none());
   }

   #[tokio::test]
   async fn test_register_不足フィールドは400でストアに触れない() {
      let repo = MockUserRepository::new();
      let sut = create_test_app(repo.clone());

      let (status, json) = send(
         sut,
         json_request(Method::POST, "/register", json!({ "username": "John", "email": "" })),
      )
      .await;

      assert_eq!(status, StatusCode::BAD_REQUEST);
      assert_eq!(
         json,
         json!({
            "error": "Please provide all the required parameters",
            "missing": ["email", "password"]
         })
      );
      assert!(repo.calls().is_empty());
   }

   #[rstest]
   #[case(json!(0))]
   #[case(json!(false))]
   #[case(json!(0.0))]
   #[tokio::test]
   async fn test_register_偽値の認証情報は不足扱いで400(#[case] password: Value) {
      let repo = MockUserRepository::new();
      let sut = create_test_app(repo.clone());

      let (status, json) = send(
         sut,
         json_request(
            Method::POST,
            "/register",
            json!({ "username": "Zed", "email": "z@x.io", "password": password }),
         ),
      )
      .await;

      assert_eq!(status, StatusCode::BAD_REQUEST);
      assert_eq!(json["missing"], json!(["password"]));
      assert!(repo.calls().is_empty());
   }

   #[tokio::test]
   async fn test_register_jsonでないボディは検証エラー() {
      let sut = create_test_app(MockUserRepository::new());
      let request = Request::builder()
         .method(Method::POST)
         .uri("/register")
         .body(Body::from("username=John"))
         .unwrap();

      let (status, json) = send(sut, request).await;

      assert_eq!(status, StatusCode::BAD_REQUEST);
      assert_eq!(json["missing"], json!(["username", "email", "password"]));
   }

   #[tokio::test]
   async fn test_register_重複メールアドレスは409() {
      let sut = create_test_app(MockUserRepository::with_users(vec![record(
         "John",
         "john@example.com",
      )]));

      let (status, json) = send(
         sut,
         json_request(
            Method::POST,
            "/register",
            json!({ "username": "Other", "email": "john@example.com", "password": "x" }),
         ),
      )
      .await;

      assert_eq!(status, StatusCode::CONFLICT);
      assert_eq!(json, json!({ "error": "This email has already been taken" }));
   }

   #[rstest]
   #[case("secret", StatusCode::OK)]
   #[case("wrong", StatusCode::BAD_REQUEST)]
   #[tokio::test]
   async fn test_login_認証情報の照合結果(#[case] password: &str, #[case] expected: StatusCode) {
      let sut = create_test_app(MockUserRepository::with_users(vec![record(
         "John",
         "john@example.com",
      )]));

      let (status, json) = send(
         sut,
         json_request(
            Method::POST,
            "/login",
            json!({ "email": "john@example.com", "password": password }),
         ),
      )
      .await;

      assert_eq!(status, expected);
      if expected == StatusCode::OK {
         assert_eq!(json["user"]["username"], "John");
         assert!(json["user"].get("password").is_none());
      } else {
         assert_eq!(json, json!({ "error": "Incorrect password!" }));
      }
   }

   #[tokio::test]
   async fn test_login_未登録のメールアドレスは404() {
      let sut = create_test_app(MockUserRepository::new());

      let (status, json) = send(
         sut,
         json_request(
            Method::POST,
            "/login",
            json!({ "email": "nobody@example.com", "password": "x" }),
         ),
      )
      .await;

      assert_eq!(status, StatusCode::NOT_FOUND);
      assert_eq!(json, json!({ "error": "No user exists with the email" }));
   }

   #[tokio::test]
   async fn test_login_不足フィールドのメッセージ() {
      let sut = create_test_app(MockUserRepository::new());

      let (status, json) = send(
         sut,
         json_request(Method::POST, "/login", json!({ "email": "john@example.com" })),
      )
      .await;

      assert_eq!(status, StatusCode::BAD_REQUEST);
      assert_eq!(json["error"], "Provide all the required parameters");
      assert_eq!(json["missing"], json!(["password"]));
   }

   #[tokio::test]
   async fn test_update_user_不足フィールドはストアより先に検証される() {
      let repo = MockUserRepository::with_users(vec![record("John", "john@example.com")]);
      let sut = create_test_app(repo.clone());

      let (status, _) = send(
         sut,
         json_request(
            Method::PUT,
            &format!("/user/{}", UserId::new()),
            json!({ "username": "Jane", "password": "pw" }),
         ),
      )
      .await;

      assert_eq!(status, StatusCode::BAD_REQUEST);
      assert!(repo.calls().is_empty());
   }

   #[tokio::test]
   async fn test_update_user_200でupdate_userを返す() {
      let john = record("John", "john@example.com");
      let uri = format!("/user/{}", john.id());
      let sut = create_test_app(MockUserRepository::with_users(vec![john.clone()]));

      let (status, json) = send(
         sut,
         json_request(
            Method::PUT,
            &uri,
            json!({ "username": "Jane", "email": "jane@example.com", "password": "pw" }),
         ),
      )
      .await;

      assert_eq!(status, StatusCode::OK);
      assert_eq!(
         json,
         json!({ "updateUser": { "id": john.id().to_string(), "username": "Jane", "email": "jane@example.com" } })
      );
   }

   #[tokio::test]
   async fn test_update_user_存在しなければ404() {
      let id = UserId::new();
      let sut = create_test_app(MockUserRepository::new());

      let (status, json) = send(
         sut,
         json_request(
            Method::PUT,
            &format!("/user/{id}"),
            json!({ "username": "Jane", "email": "jane@example.com", "password": "pw" }),
         ),
      )
      .await;

      assert_eq!(status, StatusCode::NOT_FOUND);
      assert_eq!(json, json!({ "error": format!("No User with id {id}") }));
   }

   #[tokio::test]
   async fn test_delete_user_削除できる() {
      let john = record("John", "john@example.com");
      let repo = MockUserRepository::with_users(vec![john.clone()]);
      let sut = create_test_app(repo.clone());

      let (status, json) = send(
         sut,
         empty_request(Method::DELETE, &format!("/user/{}", john.id())),
      )
      .await;

      assert_eq!(status, StatusCode::OK);
      assert_eq!(json, json!({ "msg": "User deleted" }));
      assert_eq!(repo.call_count(RepositoryCall::Delete), 1);
   }

   #[tokio::test]
   async fn test_delete_user_存在しなければ404でストアの削除を呼ばない() {
      let repo = MockUserRepository::new();
      let sut = create_test_app(repo.clone());

      let (status, json) = send(
         sut,
         empty_request(Method::DELETE, &format!("/user/{}", UserId::new())),
      )
      .await;

      assert_eq!(status, StatusCode::NOT_FOUND);
      assert_eq!(json, json!({ "error": "User does not exist" }));
      assert_eq!(repo.call_count(RepositoryCall::Delete), 0);
   }

   #[rstest]
   #[case("/users/search?name=joh&email=example", "users")]
   #[case("/users/search?name=John", "user")]
   #[case("/users/search?email=xyz", "users")]
   #[case("/users/search", "allUsers")]
   #[case("/users/search?name=&email=", "allUsers")]
   #[tokio::test]
   async fn test_search_users_戦略ごとのレスポンスキー(#[case] uri: &str, #[case] key: &str) {
      let sut = create_test_app(MockUserRepository::with_users(vec![
         record("John", "john@example.com"),
         record("Alice", "abc@xyz.com"),
      ]));

      let (status, json) = send(sut, empty_request(Method::GET, uri)).await;

      assert_eq!(status, StatusCode::OK);
      assert!(json.get(key).is_some(), "キー {key} を含むこと: {json}");
   }

   #[rstest]
   #[case(
      "/users/search?name=zzz&email=example",
      "No users found with name and email containing the same letters"
   )]
   #[case("/users/search?name=john", "No users found with the specified name")]
   #[case(
      "/users/search?email=qqq",
      "No users found with email containing the same letters"
   )]
   #[tokio::test]
   async fn test_search_users_一致なしは条件ごとのmsg(#[case] uri: &str, #[case] msg: &str) {
      let sut = create_test_app(MockUserRepository::with_users(vec![
         record("Johnny", "johnny@example.com"),
         record("Alice", "abc@xyz.com"),
      ]));

      let (status, json) = send(sut, empty_request(Method::GET, uri)).await;

      assert_eq!(status, StatusCode::NOT_FOUND);
      assert_eq!(json, json!({ "msg": msg }));
   }

   #[tokio::test]
   async fn test_ストア障害は500() {
      let sut = create_test_app(MockUserRepository::failing());

      let (status, json) = send(sut, empty_request(Method::GET, "/users/search?name=a")).await;

      assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
      assert_eq!(json, json!({ "error": "Internal server error" }));
   }
}
