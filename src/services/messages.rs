use chrono::Utc;
use entities::messages::*;
use sea_orm::{ActiveModelTrait, DbErr, EntityTrait, QueryOrder, Set};

use crate::database::BoardDatabase;

pub type MessageRecord = Model;

pub(crate) trait MessageService {
    /// All messages, oldest first
    async fn list(&self) -> Result<Vec<MessageRecord>, DbErr>;

    /// Insert a message, stamping both timestamps with the current time
    async fn create(&self, body: String, username: String) -> Result<MessageRecord, DbErr>;

    async fn find(&self, id: i32) -> Result<Option<MessageRecord>, DbErr>;

    /// Replace the body of a previously fetched message. `None` leaves the
    /// row untouched and hands the record back as is.
    async fn update_body(
        &self,
        message: MessageRecord,
        body: Option<String>,
    ) -> Result<MessageRecord, DbErr>;

    /// Returns whether a row was removed
    async fn delete(&self, id: i32) -> Result<bool, DbErr>;
}

pub struct DbMessage<'a>(&'a BoardDatabase);

impl BoardDatabase {
    pub fn message(&self) -> DbMessage<'_> {
        DbMessage(self)
    }
}

impl MessageService for DbMessage<'_> {
    async fn list(&self) -> Result<Vec<MessageRecord>, DbErr> {
        Entity::find()
            .order_by_asc(Column::CreatedAt)
            .order_by_asc(Column::Id)
            .all(self.0.inner())
            .await
    }

    async fn create(&self, body: String, username: String) -> Result<MessageRecord, DbErr> {
        let now = Utc::now();
        ActiveModel {
            body: Set(body),
            username: Set(username),
            created_at: Set(now),
            updated_at: Set(now),
            ..Default::default()
        }
        .insert(self.0.inner())
        .await
    }

    async fn find(&self, id: i32) -> Result<Option<MessageRecord>, DbErr> {
        Entity::find_by_id(id).one(self.0.inner()).await
    }

    async fn update_body(
        &self,
        message: MessageRecord,
        body: Option<String>,
    ) -> Result<MessageRecord, DbErr> {
        let Some(body) = body else {
            return Ok(message);
        };
        let mut message: ActiveModel = message.into();
        message.body = Set(body);
        message.updated_at = Set(Utc::now());
        message.update(self.0.inner()).await
    }

    async fn delete(&self, id: i32) -> Result<bool, DbErr> {
        let result = Entity::delete_by_id(id).exec(self.0.inner()).await?;
        Ok(result.rows_affected > 0)
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::database::BoardDatabase;

    async fn migrated() -> BoardDatabase {
        let db = BoardDatabase::new_memory().await.unwrap();
        db.migrate().await.unwrap();
        db
    }

    #[tokio::test]
    async fn test_create_and_find() {
        let db = migrated().await;
        let service = db.message();

        let created = service
            .create("hi".to_string(), "bob".to_string())
            .await
            .unwrap();
        assert_eq!(created.body, "hi");
        assert_eq!(created.username, "bob");
        assert_eq!(created.created_at, created.updated_at);

        let found = service.find(created.id).await.unwrap().unwrap();
        assert_eq!(found, created);
        assert!(service.find(created.id + 1).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_ids_increase_and_are_not_reused() {
        let db = migrated().await;
        let service = db.message();

        let first = service.create("a".into(), "ann".into()).await.unwrap();
        let second = service.create("b".into(), "ben".into()).await.unwrap();
        assert!(second.id > first.id);

        assert!(service.delete(second.id).await.unwrap());
        let third = service.create("c".into(), "cat".into()).await.unwrap();
        assert!(third.id > second.id);
    }

    #[tokio::test]
    async fn test_list_is_oldest_first() {
        let db = migrated().await;
        let service = db.message();
        assert!(service.list().await.unwrap().is_empty());

        let a = service.create("a".into(), "ann".into()).await.unwrap();
        let b = service.create("b".into(), "ben".into()).await.unwrap();
        service.delete(a.id).await.unwrap();
        let c = service.create("c".into(), "cat".into()).await.unwrap();

        let ids: Vec<_> = service.list().await.unwrap().iter().map(|m| m.id).collect();
        assert_eq!(ids, vec![b.id, c.id]);
    }

    #[tokio::test]
    async fn test_update_body() {
        let db = migrated().await;
        let service = db.message();
        let original = service.create("old".into(), "bob".into()).await.unwrap();

        let unchanged = service.update_body(original.clone(), None).await.unwrap();
        assert_eq!(unchanged, original);
        assert_eq!(service.find(original.id).await.unwrap(), Some(original.clone()));

        let updated = service
            .update_body(original.clone(), Some("new".into()))
            .await
            .unwrap();
        assert_eq!(updated.body, "new");
        assert_eq!(updated.username, "bob");
        assert_eq!(updated.created_at, original.created_at);
        assert!(updated.updated_at > original.updated_at);

        assert_eq!(service.find(original.id).await.unwrap(), Some(updated));
    }

    #[tokio::test]
    async fn test_delete_twice() {
        let db = migrated().await;
        let service = db.message();
        let message = service.create("bye".into(), "bob".into()).await.unwrap();

        assert!(service.delete(message.id).await.unwrap());
        assert!(!service.delete(message.id).await.unwrap());
        assert!(service.find(message.id).await.unwrap().is_none());
    }
}
