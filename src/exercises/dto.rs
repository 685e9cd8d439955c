use serde::Deserialize;

#[derive(Debug, Deserialize)]
pub struct NewExercise {
    pub name: String,
    pub category_id: i32,
}

#[derive(Debug, Deserialize)]
pub struct ExerciseEdit {
    pub id: i32,
    pub name: String,
    pub category_id: i32,
}

pub const EDIT_REQUIRED: &[&str] = &["id", "name", "category_id"];
