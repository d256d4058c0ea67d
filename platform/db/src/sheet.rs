use anyhow::{Context, Result, anyhow};
use async_trait::async_trait;
use entity::{sheet_header, sheet_row};
use products_hr::{HeaderStyle, Sheet};
use sea_orm::{
    ActiveModelTrait, ActiveValue::NotSet, ColumnTrait, ConnectionTrait, EntityTrait,
    IntoActiveModel, QueryFilter, QueryOrder, QuerySelect, Set, TransactionTrait,
};

use crate::DbPool;

/// A named sheet stored in `sheet_header` / `sheet_row`.
#[derive(Clone, Debug)]
pub struct DbSheet {
    db: DbPool,
    name: String,
}

impl DbSheet {
    pub fn new(db: DbPool, name: impl Into<String>) -> Self {
        Self {
            db,
            name: name.into(),
        }
    }

    fn row_model(&self, cells: &[String]) -> Result<sheet_row::ActiveModel> {
        Ok(sheet_row::ActiveModel {
            id: NotSet,
            sheet: Set(self.name.clone()),
            cells: Set(encode_cells(cells)?),
        })
    }

    async fn row_at(&self, position: usize) -> Result<sheet_row::Model> {
        sheet_row::Entity::find()
            .filter(sheet_row::Column::Sheet.eq(self.name.as_str()))
            .order_by_asc(sheet_row::Column::Id)
            .offset(position as u64)
            .limit(1)
            .one(&self.db)
            .await?
            .ok_or_else(|| anyhow!("row {position} out of range in sheet {}", self.name))
    }

    async fn upsert_header<C: ConnectionTrait>(
        &self,
        conn: &C,
        cells: &[String],
        style: Option<&HeaderStyle>,
    ) -> Result<()> {
        let cells = encode_cells(cells)?;
        let style = style
            .map(serde_json::to_string)
            .transpose()
            .context("encode header style")?;
        let existing = sheet_header::Entity::find_by_id(self.name.clone())
            .one(conn)
            .await?;
        match existing {
            Some(model) => {
                let mut active = model.into_active_model();
                active.cells = Set(cells);
                if let Some(style) = style {
                    active.style = Set(Some(style));
                }
                active.update(conn).await?;
            }
            None => {
                sheet_header::ActiveModel {
                    sheet: Set(self.name.clone()),
                    cells: Set(cells),
                    style: Set(style),
                }
                .insert(conn)
                .await?;
            }
        }
        Ok(())
    }

    async fn delete_rows<C: ConnectionTrait>(&self, conn: &C) -> Result<()> {
        sheet_row::Entity::delete_many()
            .filter(sheet_row::Column::Sheet.eq(self.name.as_str()))
            .exec(conn)
            .await?;
        Ok(())
    }

    async fn insert_rows<C: ConnectionTrait>(&self, conn: &C, rows: &[Vec<String>]) -> Result<()> {
        if rows.is_empty() {
            return Ok(());
        }
        let models = rows
            .iter()
            .map(|cells| self.row_model(cells))
            .collect::<Result<Vec<_>>>()?;
        sheet_row::Entity::insert_many(models).exec(conn).await?;
        Ok(())
    }
}

fn encode_cells(cells: &[String]) -> Result<String> {
    serde_json::to_string(cells).context("encode sheet cells")
}

fn decode_cells(raw: &str) -> Result<Vec<String>> {
    serde_json::from_str(raw).context("decode sheet cells")
}

#[async_trait]
impl Sheet for DbSheet {
    async fn header(&self) -> Result<Vec<String>> {
        match sheet_header::Entity::find_by_id(self.name.clone())
            .one(&self.db)
            .await?
        {
            Some(model) => decode_cells(&model.cells),
            None => Ok(Vec::new()),
        }
    }

    async fn write_header(&self, cells: &[String], style: Option<&HeaderStyle>) -> Result<()> {
        self.upsert_header(&self.db, cells, style).await
    }

    async fn rows(&self) -> Result<Vec<Vec<String>>> {
        sheet_row::Entity::find()
            .filter(sheet_row::Column::Sheet.eq(self.name.as_str()))
            .order_by_asc(sheet_row::Column::Id)
            .all(&self.db)
            .await?
            .iter()
            .map(|row| decode_cells(&row.cells))
            .collect()
    }

    async fn append_row(&self, cells: Vec<String>) -> Result<()> {
        sheet_row::Entity::insert(self.row_model(&cells)?)
            .exec(&self.db)
            .await?;
        Ok(())
    }

    async fn write_row(&self, position: usize, cells: Vec<String>) -> Result<()> {
        let mut active = self.row_at(position).await?.into_active_model();
        active.cells = Set(encode_cells(&cells)?);
        active.update(&self.db).await?;
        Ok(())
    }

    async fn delete_row(&self, position: usize) -> Result<()> {
        let row = self.row_at(position).await?;
        sheet_row::Entity::delete_by_id(row.id)
            .exec(&self.db)
            .await?;
        Ok(())
    }

    async fn clear_rows(&self) -> Result<()> {
        self.delete_rows(&self.db).await
    }

    async fn write_rows(&self, rows: Vec<Vec<String>>) -> Result<()> {
        self.insert_rows(&self.db, &rows).await
    }

    async fn replace(&self, header: &[String], rows: Vec<Vec<String>>) -> Result<()> {
        let txn = self.db.begin().await?;
        self.upsert_header(&txn, header, None).await?;
        self.delete_rows(&txn).await?;
        self.insert_rows(&txn, &rows).await?;
        txn.commit().await?;
        Ok(())
    }
}
