use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Name assigned to transactions whose category was deleted.
pub const UNCATEGORIZED: &str = "Uncategorized";

/// Global categories available to every user.
pub const DEFAULT_CATEGORIES: [(&str, &str, &str); 9] = [
    ("Food", "🍔", "#F97316"),
    ("Transport", "🚗", "#3B82F6"),
    ("Housing", "🏠", "#8B5CF6"),
    ("Utilities", "💡", "#EAB308"),
    ("Entertainment", "🎬", "#EC4899"),
    ("Health", "💊", "#10B981"),
    ("Shopping", "🛍️", "#F43F5E"),
    ("Salary", "💼", "#22C55E"),
    ("Other", "📦", "#9CA3AF"),
];

#[derive(Clone, Debug, Serialize, Deserialize, ToSchema)]
pub struct Category {
    pub id: String,
    pub name: String,
    pub icon: Option<String>,
    pub color: Option<String>,
    /// `None` for global default categories
    #[serde(skip_serializing)]
    pub user_id: Option<String>,
    pub is_default: bool,
}

impl Category {
    pub fn is_owned_by(&self, user_id: &str) -> bool {
        self.user_id.as_deref() == Some(user_id)
    }
}

#[derive(Clone, Debug, Deserialize, ToSchema)]
pub struct CategoryInput {
    pub name: String,
    pub icon: Option<String>,
    pub color: Option<String>,
}

#[derive(Clone, Debug, Default, Deserialize, ToSchema)]
pub struct CategoryUpdate {
    pub name: Option<String>,
    pub icon: Option<String>,
    pub color: Option<String>,
}
