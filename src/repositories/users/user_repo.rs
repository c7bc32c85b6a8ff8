//! # MongoDB 사용자 디렉터리
//!
//! `users` 컬렉션을 사용하는 [`UserDirectory`] 구현입니다.
//!
//! ## 원자적 find-or-create
//!
//! 조회와 생성을 `find_one_and_update` + `$setOnInsert` + `upsert(true)` 한 번으로 처리합니다.
//! 프로바이더 필드마다 유니크 sparse 인덱스가 걸려 있으므로, 동시에 들어온 두 upsert 중
//! 하나는 중복 키(11000) 에러로 실패합니다. 이 경우 승자가 만든 레코드를 다시 읽습니다.

use async_trait::async_trait;
use log::{debug, info};
use mongodb::{
    bson::{doc, oid::ObjectId},
    error::{ErrorKind, WriteFailure},
    options::{FindOneAndUpdateOptions, IndexOptions, ReturnDocument},
    Collection, IndexModel,
};
use crate::config::IdentityProvider;
use crate::db::Database;
use crate::domain::entities::users::User;
use crate::errors::AppError;
use super::UserDirectory;

/// MongoDB 중복 키 에러 코드
const DUPLICATE_KEY_CODE: i32 = 11000;

/// `users` 컬렉션 기반 사용자 디렉터리
///
/// ## 인덱스
///
/// | 이름 | 키 | 속성 |
/// |------|----|------|
/// | `googleId_unique` | `googleId` | unique, sparse |
/// | `facebookId_unique` | `facebookId` | unique, sparse |
/// | `githubId_unique` | `githubId` | unique, sparse |
///
/// ## 사용 예제
///
/// ```rust,ignore
/// let directory = MongoUserDirectory::new(&database);
/// directory.create_indexes().await?;
///
/// let user = directory.find_or_create(IdentityProvider::Google, "1093...").await?;
/// ```
#[derive(Clone)]
pub struct MongoUserDirectory {
    collection: Collection<User>,
}

impl MongoUserDirectory {
    pub const COLLECTION_NAME: &'static str = "users";

    pub fn new(database: &Database) -> Self {
        Self {
            collection: database.get_database().collection::<User>(Self::COLLECTION_NAME),
        }
    }

    /// 프로바이더 필드별 유니크 sparse 인덱스를 생성합니다.
    ///
    /// 애플리케이션 시작 시 한 번 호출합니다. 이미 존재하는 인덱스는 그대로 둡니다.
    ///
    /// # 주의사항
    ///
    /// 기존 데이터에 같은 외부 ID가 중복되어 있으면 인덱스 생성이 실패합니다.
    pub async fn create_indexes(&self) -> Result<(), AppError> {
        let indexes = IdentityProvider::ALL.iter().map(|provider| {
            let field = provider.user_field();
            IndexModel::builder()
                .keys(doc! { field: 1 })
                .options(IndexOptions::builder()
                    .unique(true)
                    .sparse(true)
                    .name(format!("{}_unique", field))
                    .build())
                .build()
        });

        self.collection.create_indexes(indexes).await?;

        info!("✅ users 컬렉션 인덱스 준비 완료");
        Ok(())
    }

    async fn find_by_provider(&self, provider: IdentityProvider, external_id: &str) -> Result<Option<User>, AppError> {
        let user = self.collection
            .find_one(doc! { provider.user_field(): external_id })
            .await?;
        Ok(user)
    }
}

#[async_trait]
impl UserDirectory for MongoUserDirectory {
    async fn find_or_create(&self, provider: IdentityProvider, external_id: &str) -> Result<User, AppError> {
        let field = provider.user_field();

        let options = FindOneAndUpdateOptions::builder()
            .upsert(true)
            .return_document(ReturnDocument::After)
            .build();

        let result = self.collection
            .find_one_and_update(
                doc! { field: external_id },
                doc! { "$setOnInsert": { field: external_id } },
            )
            .with_options(options)
            .await;

        match result {
            Ok(Some(user)) => Ok(user),
            Ok(None) => Err(AppError::StorageUnavailable(format!(
                "upsert on {} returned no document",
                field
            ))),
            Err(e) if is_duplicate_key(&e) => {
                debug!("{} upsert 경합 발생, 기존 레코드를 다시 조회합니다", field);
                self.find_by_provider(provider, external_id)
                    .await?
                    .ok_or_else(|| AppError::StorageUnavailable(format!(
                        "record for {} vanished after duplicate key",
                        field
                    )))
            }
            Err(e) => Err(e.into()),
        }
    }

    async fn find_by_id(&self, id: &str) -> Result<Option<User>, AppError> {
        let Ok(object_id) = ObjectId::parse_str(id) else {
            return Ok(None);
        };

        let user = self.collection
            .find_one(doc! { "_id": object_id })
            .await?;
        Ok(user)
    }

    async fn delete(&self, id: &str) -> Result<bool, AppError> {
        let Ok(object_id) = ObjectId::parse_str(id) else {
            return Ok(false);
        };

        let result = self.collection
            .delete_one(doc! { "_id": object_id })
            .await?;
        Ok(result.deleted_count > 0)
    }
}

/// 유니크 인덱스 위반으로 인한 실패인지 확인
fn is_duplicate_key(error: &mongodb::error::Error) -> bool {
    match error.kind.as_ref() {
        ErrorKind::Command(command_error) => command_error.code == DUPLICATE_KEY_CODE,
        ErrorKind::Write(WriteFailure::WriteError(write_error)) => write_error.code == DUPLICATE_KEY_CODE,
        _ => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mongodb::bson::{from_document, Document};
    use mongodb::error::{CommandError, Error, WriteError};

    fn server_reply(code: i32) -> Document {
        doc! { "code": code, "codeName": "DuplicateKey", "errmsg": "E11000 duplicate key error" }
    }

    fn command_error(code: i32) -> Error {
        let reply: CommandError = from_document(server_reply(code)).unwrap();
        Error::from(ErrorKind::Command(reply))
    }

    fn write_error(code: i32) -> Error {
        let reply: WriteError = from_document(server_reply(code)).unwrap();
        Error::from(ErrorKind::Write(WriteFailure::WriteError(reply)))
    }

    #[test]
    fn test_duplicate_key_from_upsert_race_is_detected() {
        assert!(is_duplicate_key(&command_error(DUPLICATE_KEY_CODE)));
        assert!(is_duplicate_key(&write_error(DUPLICATE_KEY_CODE)));
    }

    #[test]
    fn test_other_failures_are_not_duplicate_key() {
        assert!(!is_duplicate_key(&command_error(13)));
        assert!(!is_duplicate_key(&write_error(121)));
        assert!(!is_duplicate_key(&Error::from(ErrorKind::Io(std::sync::Arc::new(
            std::io::Error::other("connection reset"),
        )))));
    }
}
