//! # InMemoryUserRepository
//!
//! プロセス内でユーザー一覧を保持するリポジトリ。
//!
//! スナップショットファイルを指定すると、起動時に読み込み、変更のたびに
//! 一覧全体を整形済み JSON 配列として書き戻す。ファイルが存在しない場合は
//! 空の一覧から始める。
//!
//! 一覧は `tokio::sync::RwLock` で保護し、書き込みは変更後の一覧を
//! スナップショットへ保存できた場合のみ反映する。
//!
//! スナップショットは隣の一時ファイル（`<path>.tmp`）に書き切ってから
//! リネームで置き換える。書き込み途中で失敗しても既存のファイルは壊れない。

use std::{
   ffi::OsString,
   path::{Path, PathBuf},
};

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tokio::{io::AsyncWriteExt as _, sync::RwLock};
use userbase_domain::{
   credential::StoredCredential,
   user::{Email, NewUser, UserChanges, UserId, UserRecord, Username},
};
use uuid::Uuid;

use super::UserRepository;
use crate::error::InfraError;

/// スナップショットファイル上の 1 レコード
///
/// 認証情報はストア内部の値なのでそのまま含める。
#[derive(Debug, Serialize, Deserialize)]
struct SnapshotRow {
   id:         Uuid,
   username:   String,
   email:      String,
   credential: String,
}

impl From<&UserRecord> for SnapshotRow {
   fn from(record: &UserRecord) -> Self {
      Self {
         id:         *record.id().as_uuid(),
         username:   record.username().as_str().to_string(),
         email:      record.email().as_str().to_string(),
         credential: record.credential().as_str().to_string(),
      }
   }
}

impl TryFrom<SnapshotRow> for UserRecord {
   type Error = InfraError;

   fn try_from(row: SnapshotRow) -> Result<Self, Self::Error> {
      Ok(UserRecord::new(
         UserId::from_uuid(row.id),
         Username::new(row.username)?,
         Email::new(row.email)?,
         StoredCredential::new(row.credential),
      ))
   }
}

/// スナップショットの隣に置く一時ファイルのパス
fn temp_path(path: &Path) -> PathBuf {
   let mut name = OsString::from(path.as_os_str());
   name.push(".tmp");
   PathBuf::from(name)
}

/// 内容をディスクまで書き切る
async fn write_synced(path: &Path, contents: &[u8]) -> std::io::Result<()> {
   let mut file = tokio::fs::File::create(path).await?;
   file.write_all(contents).await?;
   file.sync_all().await
}

/// インメモリ実装の UserRepository
#[derive(Debug, Default)]
pub struct InMemoryUserRepository {
   users:    RwLock<Vec<UserRecord>>,
   snapshot: Option<PathBuf>,
}

impl InMemoryUserRepository {
   /// 空のリポジトリを作成（永続化なし）
   pub fn new() -> Self {
      Self::default()
   }

   /// 既存のレコードで初期化する（永続化なし）
   pub fn with_users(users: Vec<UserRecord>) -> Self {
      Self {
         users:    RwLock::new(users),
         snapshot: None,
      }
   }

   /// スナップショットファイルから読み込む
   ///
   /// ファイルが存在しない場合は空の一覧で開始し、最初の変更時に作成する。
   ///
   /// # Errors
   ///
   /// - ファイルの読み込み・JSON の解析に失敗した場合
   /// - 不完全なレコード（空のユーザー名など）を含む場合
   pub async fn open(path: impl AsRef<Path>) -> Result<Self, InfraError> {
      let path = path.as_ref().to_path_buf();

      let users = match tokio::fs::read(&path).await {
         Ok(bytes) => {
            let rows: Vec<SnapshotRow> = serde_json::from_slice(&bytes)?;
            rows.into_iter()
               .map(UserRecord::try_from)
               .collect::<Result<Vec<_>, _>>()?
         }
         Err(e) if e.kind() == std::io::ErrorKind::NotFound => Vec::new(),
         Err(e) => return Err(e.into()),
      };

      tracing::info!(
         path = %path.display(),
         count = users.len(),
         "ユーザースナップショットを読み込みました"
      );

      Ok(Self {
         users:    RwLock::new(users),
         snapshot: Some(path),
      })
   }

   /// 変更後の一覧をスナップショットに書き出す
   async fn persist(&self, users: &[UserRecord]) -> Result<(), InfraError> {
      let Some(path) = &self.snapshot else {
         return Ok(());
      };

      let rows: Vec<SnapshotRow> = users.iter().map(SnapshotRow::from).collect();
      let json = serde_json::to_vec_pretty(&rows)?;

      let temp = temp_path(path);
      if let Err(e) = write_synced(&temp, &json).await {
         // 一時ファイルの後始末に失敗しても元のエラーを返す
         let _ = tokio::fs::remove_file(&temp).await;
         return Err(e.into());
      }
      tokio::fs::rename(&temp, path).await?;
      Ok(())
   }

   /// 他のレコードが同じメールアドレスを使っていないか確認する
   fn ensure_email_available(
      users: &[UserRecord],
      email: &Email,
      except: Option<&UserId>,
   ) -> Result<(), InfraError> {
      let taken = users
         .iter()
         .any(|u| u.email() == email && Some(u.id()) != except);
      if taken {
         return Err(InfraError::duplicate_email(email.as_str()));
      }
      Ok(())
   }
}

#[async_trait]
impl UserRepository for InMemoryUserRepository {
   async fn find_all(&self) -> Result<Vec<UserRecord>, InfraError> {
      Ok(self.users.read().await.clone())
   }

   async fn find_by_id(&self, id: &UserId) -> Result<Option<UserRecord>, InfraError> {
      Ok(self.users.read().await.iter().find(|u| u.id() == id).cloned())
   }

   async fn find_by_email(&self, email: &Email) -> Result<Option<UserRecord>, InfraError> {
      Ok(self
         .users
         .read()
         .await
         .iter()
         .find(|u| u.email() == email)
         .cloned())
   }

   async fn find_by_username(
      &self,
      username: &Username,
   ) -> Result<Option<UserRecord>, InfraError> {
      Ok(self
         .users
         .read()
         .await
         .iter()
         .find(|u| u.username() == username)
         .cloned())
   }

   async fn insert(&self, new_user: NewUser) -> Result<UserRecord, InfraError> {
      let mut users = self.users.write().await;
      Self::ensure_email_available(&users, &new_user.email, None)?;

      let record = new_user.into_record(UserId::new());
      let mut next = users.clone();
      next.push(record.clone());

      self.persist(&next).await?;
      *users = next;
      Ok(record)
   }

   async fn update(
      &self,
      id: &UserId,
      changes: UserChanges,
   ) -> Result<Option<UserRecord>, InfraError> {
      let mut users = self.users.write().await;
      let Some(pos) = users.iter().position(|u| u.id() == id) else {
         return Ok(None);
      };
      Self::ensure_email_available(&users, &changes.email, Some(id))?;

      let mut next = users.clone();
      let updated = next[pos].clone().with_changes(changes);
      next[pos] = updated.clone();

      self.persist(&next).await?;
      *users = next;
      Ok(Some(updated))
   }

   async fn delete(&self, id: &UserId) -> Result<(), InfraError> {
      let mut users = self.users.write().await;
      if !users.iter().any(|u| u.id() == id) {
         return Ok(());
      }

      let next: Vec<UserRecord> = users.iter().filter(|u| u.id() != id).cloned().collect();

      self.persist(&next).await?;
      *users = next;
      Ok(())
   }
}
