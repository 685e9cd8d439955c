use tracing::{info, warn};

use crate::{auth::password::hash_password, store::Store, validate::normalize_name};

const DEFAULT_USER: (&str, &str) = ("rey", "pass");

const CATEGORIES: &[&str] = &["upper body", "lower body", "arms", "legs", "cardio"];

/// (exercise, category)
const EXERCISES: &[(&str, &str)] = &[
    ("squat", "legs"),
    ("bench", "upper body"),
    ("deadlift", "lower body"),
];

/// Seeds a fresh database. Rows that already exist are skipped with a warning.
pub async fn run(store: &dyn Store) -> anyhow::Result<()> {
    let (username, password) = DEFAULT_USER;
    let hash = hash_password(password)?;
    match store.create_user(username, &hash, "").await {
        Ok(user) => info!(id = user.id, %username, "seeded user"),
        Err(e) => warn!(error = format!("{e:#}"), %username, "skipping user seed"),
    }

    for name in CATEGORIES {
        match store.create_category(&normalize_name(name)).await {
            Ok(c) => info!(id = c.id, name = %c.name, "seeded category"),
            Err(e) => warn!(error = format!("{e:#}"), %name, "skipping category seed"),
        }
    }

    let categories = store.list_categories().await?;
    for (exercise, category) in EXERCISES {
        let wanted = normalize_name(category);
        let Some(category) = categories.iter().find(|c| c.name == wanted) else {
            warn!(%exercise, category = %wanted, "category missing; skipping exercise seed");
            continue;
        };
        match store
            .create_exercise(&normalize_name(exercise), category.id)
            .await
        {
            Ok(e) => info!(id = e.id, name = %e.name, "seeded exercise"),
            Err(e) => warn!(error = format!("{e:#}"), %exercise, "skipping exercise seed"),
        }
    }
    Ok(())
}
