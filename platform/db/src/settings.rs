use anyhow::Result;
use async_trait::async_trait;
use entity::setting;
use products_hr::KeyValueStore;
use sea_orm::{EntityTrait, Set, sea_query::OnConflict};

use crate::DbPool;

/// Key-value settings stored in the `setting` table.
#[derive(Clone, Debug)]
pub struct DbSettings {
    db: DbPool,
}

impl DbSettings {
    pub fn new(db: DbPool) -> Self {
        Self { db }
    }
}

#[async_trait]
impl KeyValueStore for DbSettings {
    async fn get(&self, key: &str) -> Result<Option<String>> {
        Ok(setting::Entity::find_by_id(key.to_string())
            .one(&self.db)
            .await?
            .map(|model| model.value))
    }

    async fn set(&self, key: &str, value: &str) -> Result<()> {
        let model = setting::ActiveModel {
            key: Set(key.to_string()),
            value: Set(value.to_string()),
        };
        setting::Entity::insert(model)
            .on_conflict(
                OnConflict::column(setting::Column::Key)
                    .update_column(setting::Column::Value)
                    .to_owned(),
            )
            .exec(&self.db)
            .await?;
        Ok(())
    }

    async fn delete(&self, key: &str) -> Result<()> {
        setting::Entity::delete_by_id(key.to_string())
            .exec(&self.db)
            .await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::memory_pool;

    #[tokio::test]
    async fn set_overwrites_and_delete_clears() {
        let kv = DbSettings::new(memory_pool().await);
        assert_eq!(kv.get("ME_EMP_ID").await.unwrap(), None);
        kv.set("ME_EMP_ID", "E1").await.unwrap();
        kv.set("ME_EMP_ID", "E2").await.unwrap();
        assert_eq!(kv.get("ME_EMP_ID").await.unwrap().as_deref(), Some("E2"));
        kv.delete("ME_EMP_ID").await.unwrap();
        kv.delete("ME_EMP_ID").await.unwrap();
        assert_eq!(kv.get("ME_EMP_ID").await.unwrap(), None);
    }
}
