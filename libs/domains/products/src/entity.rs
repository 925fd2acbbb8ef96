use sea_orm::entity::prelude::*;

/// Sea-ORM Entity for the products table
#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "products")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub nome: String,
    #[sea_orm(column_type = "Text", nullable)]
    pub descricao: Option<String>,
    #[sea_orm(column_type = "Decimal(Some((19, 2)))")]
    pub preco: Decimal,
    pub quantidade_estoque: i32,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

impl From<Model> for crate::models::Product {
    fn from(model: Model) -> Self {
        Self {
            id: Some(model.id),
            name: model.nome,
            description: model.descricao,
            price: model.preco,
            stock_quantity: model.quantidade_estoque,
        }
    }
}
