use serde::Deserialize;

#[derive(Debug, Deserialize)]
pub struct NewCategory {
    pub name: String,
}

#[derive(Debug, Deserialize)]
pub struct CategoryEdit {
    pub id: i32,
    pub name: String,
}

pub const EDIT_REQUIRED: &[&str] = &["id", "name"];
