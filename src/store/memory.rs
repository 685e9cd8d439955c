//! In-memory [`Store`](super::Store) for tests. Mirrors the unique and
//! foreign-key constraints of the Postgres schema.

use std::sync::Mutex;

use anyhow::bail;
use async_trait::async_trait;

use crate::{
    auth::{repo::UserRepo, repo_types::User},
    categories::repo::{Category, CategoryRepo},
    exercises::repo::{Exercise, ExerciseRepo},
    records::repo::{NewRecord, Record, RecordEdit, RecordRepo},
};

#[derive(Default)]
struct Tables {
    users: Vec<User>,
    categories: Vec<Category>,
    exercises: Vec<Exercise>,
    records: Vec<Record>,
    last_id: i32,
}

impl Tables {
    fn next_id(&mut self) -> i32 {
        self.last_id += 1;
        self.last_id
    }
}

#[derive(Default)]
pub struct MemoryStore {
    tables: Mutex<Tables>,
}

impl MemoryStore {
    fn with<R>(&self, f: impl FnOnce(&mut Tables) -> R) -> R {
        let mut tables = self.tables.lock().expect("memory store poisoned");
        f(&mut tables)
    }
}

#[async_trait]
impl UserRepo for MemoryStore {
    async fn find_user_by_username(&self, username: &str) -> anyhow::Result<Option<User>> {
        Ok(self.with(|t| t.users.iter().find(|u| u.username == username).cloned()))
    }

    async fn find_user_by_id(&self, id: i32) -> anyhow::Result<Option<User>> {
        Ok(self.with(|t| t.users.iter().find(|u| u.id == id).cloned()))
    }

    async fn create_user(
        &self,
        username: &str,
        password_hash: &str,
        email: &str,
    ) -> anyhow::Result<User> {
        self.with(|t| {
            if t.users.iter().any(|u| u.username == username) {
                bail!("duplicate key value violates unique constraint \"users_username_key\"");
            }
            // users get their own sequence so the first one is id 1
            let user = User {
                id: t.users.len() as i32 + 1,
                username: username.into(),
                email: email.into(),
                password_hash: password_hash.into(),
            };
            t.users.push(user.clone());
            Ok(user)
        })
    }
}

#[async_trait]
impl CategoryRepo for MemoryStore {
    async fn list_categories(&self) -> anyhow::Result<Vec<Category>> {
        Ok(self.with(|t| t.categories.clone()))
    }

    async fn get_category(&self, id: i32) -> anyhow::Result<Option<Category>> {
        Ok(self.with(|t| t.categories.iter().find(|c| c.id == id).cloned()))
    }

    async fn create_category(&self, name: &str) -> anyhow::Result<Category> {
        self.with(|t| {
            if t.categories.iter().any(|c| c.name == name) {
                bail!("duplicate key value violates unique constraint \"category_name_key\"");
            }
            let category = Category {
                id: t.next_id(),
                name: name.into(),
            };
            t.categories.push(category.clone());
            Ok(category)
        })
    }

    async fn edit_category(&self, id: i32, name: &str) -> anyhow::Result<Option<Category>> {
        self.with(|t| {
            if t.categories.iter().any(|c| c.name == name && c.id != id) {
                bail!("duplicate key value violates unique constraint \"category_name_key\"");
            }
            Ok(t.categories.iter_mut().find(|c| c.id == id).map(|c| {
                c.name = name.into();
                c.clone()
            }))
        })
    }

    async fn delete_category(&self, id: i32) -> anyhow::Result<u64> {
        self.with(|t| {
            if t.exercises.iter().any(|e| e.category_id == id) {
                bail!("update or delete on table \"category\" violates foreign key constraint");
            }
            let before = t.categories.len();
            t.categories.retain(|c| c.id != id);
            Ok((before - t.categories.len()) as u64)
        })
    }
}

#[async_trait]
impl ExerciseRepo for MemoryStore {
    async fn list_exercises(&self) -> anyhow::Result<Vec<Exercise>> {
        Ok(self.with(|t| t.exercises.clone()))
    }

    async fn get_exercise(&self, id: i32) -> anyhow::Result<Option<Exercise>> {
        Ok(self.with(|t| t.exercises.iter().find(|e| e.id == id).cloned()))
    }

    async fn create_exercise(&self, name: &str, category_id: i32) -> anyhow::Result<Exercise> {
        self.with(|t| {
            if !t.categories.iter().any(|c| c.id == category_id) {
                bail!("insert or update on table \"exercise\" violates foreign key constraint");
            }
            if t.exercises.iter().any(|e| e.name == name) {
                bail!("duplicate key value violates unique constraint \"exercise_name_key\"");
            }
            let exercise = Exercise {
                id: t.next_id(),
                name: name.into(),
                category_id,
            };
            t.exercises.push(exercise.clone());
            Ok(exercise)
        })
    }

    async fn edit_exercise(
        &self,
        id: i32,
        name: &str,
        category_id: i32,
    ) -> anyhow::Result<Option<Exercise>> {
        self.with(|t| {
            if !t.categories.iter().any(|c| c.id == category_id) {
                bail!("insert or update on table \"exercise\" violates foreign key constraint");
            }
            if t.exercises.iter().any(|e| e.name == name && e.id != id) {
                bail!("duplicate key value violates unique constraint \"exercise_name_key\"");
            }
            Ok(t.exercises.iter_mut().find(|e| e.id == id).map(|e| {
                e.name = name.into();
                e.category_id = category_id;
                e.clone()
            }))
        })
    }

    async fn delete_exercise(&self, id: i32) -> anyhow::Result<u64> {
        self.with(|t| {
            if t.records.iter().any(|r| r.exercise_id == id) {
                bail!("update or delete on table \"exercise\" violates foreign key constraint");
            }
            let before = t.exercises.len();
            t.exercises.retain(|e| e.id != id);
            Ok((before - t.exercises.len()) as u64)
        })
    }
}

#[async_trait]
impl RecordRepo for MemoryStore {
    async fn list_records(&self, user_id: i32) -> anyhow::Result<Vec<Record>> {
        Ok(self.with(|t| {
            t.records
                .iter()
                .filter(|r| r.user_id == user_id)
                .cloned()
                .collect()
        }))
    }

    async fn get_record(&self, user_id: i32, id: i32) -> anyhow::Result<Option<Record>> {
        Ok(self.with(|t| {
            t.records
                .iter()
                .find(|r| r.id == id && r.user_id == user_id)
                .cloned()
        }))
    }

    async fn create_record(&self, user_id: i32, new: &NewRecord) -> anyhow::Result<Record> {
        self.with(|t| {
            if !t.exercises.iter().any(|e| e.id == new.exercise_id) {
                bail!("insert or update on table \"user_entry\" violates foreign key constraint");
            }
            let record = Record {
                id: t.next_id(),
                weight: new.weight,
                reps: new.reps,
                rpe: new.rpe,
                date_performed: new.date_performed,
                exercise_id: new.exercise_id,
                user_id,
            };
            t.records.push(record.clone());
            Ok(record)
        })
    }

    async fn edit_record(&self, user_id: i32, edit: &RecordEdit) -> anyhow::Result<Option<Record>> {
        Ok(self.with(|t| {
            t.records
                .iter_mut()
                .find(|r| r.id == edit.id && r.user_id == user_id)
                .map(|r| {
                    r.weight = edit.weight;
                    r.reps = edit.reps;
                    r.rpe = edit.rpe;
                    r.clone()
                })
        }))
    }

    async fn delete_record(&self, user_id: i32, id: i32) -> anyhow::Result<u64> {
        Ok(self.with(|t| {
            let before = t.records.len();
            t.records.retain(|r| !(r.id == id && r.user_id == user_id));
            (before - t.records.len()) as u64
        }))
    }
}
