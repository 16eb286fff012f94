use chrono::{DateTime, Utc};
use storefront_core::ids::CategoryId;

use crate::{entities::ProductModel, IntoExternalModel};


#[derive(Clone, PartialEq, Eq, Debug)]
pub struct CategoryModel {
    pub id: CategoryId,

    pub name: String,

    pub created_at: DateTime<Utc>,

    pub last_modified_at: DateTime<Utc>,
}


#[derive(sqlx::FromRow)]
pub(crate) struct InternalCategoryModel {
    pub(crate) id: i64,

    pub(crate) name: String,

    pub(crate) created_at: DateTime<Utc>,

    pub(crate) last_modified_at: DateTime<Utc>,
}

impl IntoExternalModel for InternalCategoryModel {
    type ExternalModel = CategoryModel;

    fn into_external_model(self) -> Self::ExternalModel {
        Self::ExternalModel {
            id: CategoryId::new(self.id),
            name: self.name,
            created_at: self.created_at,
            last_modified_at: self.last_modified_at,
        }
    }
}



/// A category together with all of its products, ordered by product ID.
#[derive(Clone, PartialEq, Eq, Debug)]
pub struct CategoryWithProducts {
    pub category: CategoryModel,

    pub products: Vec<ProductModel>,
}



/// Only the identifying columns of a category.
#[derive(Clone, PartialEq, Eq, Debug)]
pub struct CategorySummaryModel {
    pub id: CategoryId,

    pub name: String,
}


#[derive(sqlx::FromRow)]
pub(crate) struct InternalCategorySummaryModel {
    pub(crate) id: i64,

    pub(crate) name: String,
}

impl IntoExternalModel for InternalCategorySummaryModel {
    type ExternalModel = CategorySummaryModel;

    fn into_external_model(self) -> Self::ExternalModel {
        Self::ExternalModel {
            id: CategoryId::new(self.id),
            name: self.name,
        }
    }
}

impl From<&CategoryModel> for CategorySummaryModel {
    fn from(value: &CategoryModel) -> Self {
        Self {
            id: value.id,
            name: value.name.clone(),
        }
    }
}
