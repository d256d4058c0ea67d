use sea_orm::entity::prelude::*;

/// Header row of a named sheet. `cells` and `style` hold JSON documents.
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "sheet_header")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub sheet: String,
    #[sea_orm(column_type = "Text")]
    pub cells: String,
    #[sea_orm(column_type = "Text", nullable)]
    pub style: Option<String>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
