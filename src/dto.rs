use serde::Serialize;

/// Response body for deletes: how many rows went away.
#[derive(Debug, Serialize)]
pub struct Deleted {
    pub count: u64,
}
