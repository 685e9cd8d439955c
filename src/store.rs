//! Persistence seam. Each resource module defines its own repository trait
//! and implements it for [`PgStore`](crate::db::PgStore); handlers only see `dyn Store`.

use crate::{
    auth::repo::UserRepo, categories::repo::CategoryRepo, exercises::repo::ExerciseRepo,
    records::repo::RecordRepo,
};

#[cfg(test)]
pub mod memory;

pub trait Store: UserRepo + CategoryRepo + ExerciseRepo + RecordRepo {}

impl<T> Store for T where T: UserRepo + CategoryRepo + ExerciseRepo + RecordRepo {}
