use serde::{Deserialize, Serialize};


/// Decides what happens to a category's products when the category is deleted.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum CategoryDeletionPolicy {
    /// Refuse to delete a category that still owns products.
    #[default]
    Restrict,

    /// Delete the category's products together with the category.
    Cascade,
}

impl CategoryDeletionPolicy {
    pub const fn name(&self) -> &'static str {
        match self {
            Self::Restrict => "restrict",
            Self::Cascade => "cascade",
        }
    }
}
