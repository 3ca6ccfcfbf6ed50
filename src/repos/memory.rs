//! In-memory store for tests.
//!
//! Mirrors the column constraints of `migrations/` so handlers see the same
//! accept/reject decisions as against PostgreSQL.
use std::collections::BTreeMap;
use std::sync::Mutex;

use async_trait::async_trait;

use crate::repos::actor_repo::{ActorPatch, ActorRow, NewActor};
use crate::repos::error::{RepoError, RepoResult};
use crate::repos::movie_repo::{MoviePatch, MovieRow, NewMovie};
use crate::repos::store::CastingStore;

const TITLE_MAX: usize = 256;
const RELEASE_DATE_MAX: usize = 20;
const NAME_MAX: usize = 256;

#[derive(Default)]
struct Tables {
    movies: BTreeMap<i64, MovieRow>,
    actors: BTreeMap<i64, ActorRow>,
    next_movie_id: i64,
    next_actor_id: i64,
}

#[derive(Default)]
pub struct MemoryStore {
    tables: Mutex<Tables>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn movie_count(&self) -> usize {
        self.tables.lock().unwrap().movies.len()
    }

    pub fn actor_count(&self) -> usize {
        self.tables.lock().unwrap().actors.len()
    }
}

fn required<T>(value: Option<T>, column: &str) -> RepoResult<T> {
    value.ok_or_else(|| RepoError::Constraint(format!("null value in column \"{column}\"")))
}

fn bounded(value: &str, max: usize, column: &str) -> RepoResult<()> {
    if value.chars().count() > max {
        return Err(RepoError::Constraint(format!(
            "value too long for column \"{column}\""
        )));
    }
    Ok(())
}

#[async_trait]
impl CastingStore for MemoryStore {
    async fn list_movies(&self) -> RepoResult<Vec<MovieRow>> {
        Ok(self.tables.lock().unwrap().movies.values().cloned().collect())
    }

    async fn get_movie(&self, id: i64) -> RepoResult<Option<MovieRow>> {
        Ok(self.tables.lock().unwrap().movies.get(&id).cloned())
    }

    async fn create_movie(&self, new: NewMovie) -> RepoResult<MovieRow> {
        let title = required(new.title, "title")?;
        let release_date = required(new.release_date, "release_date")?;
        bounded(&title, TITLE_MAX, "title")?;
        bounded(&release_date, RELEASE_DATE_MAX, "release_date")?;

        let mut tables = self.tables.lock().unwrap();
        tables.next_movie_id += 1;
        let row = MovieRow {
            id: tables.next_movie_id,
            title,
            release_date,
        };
        tables.movies.insert(row.id, row.clone());
        Ok(row)
    }

    async fn update_movie(&self, id: i64, patch: MoviePatch) -> RepoResult<Option<MovieRow>> {
        if let Some(title) = &patch.title {
            bounded(title, TITLE_MAX, "title")?;
        }
        if let Some(release_date) = &patch.release_date {
            bounded(release_date, RELEASE_DATE_MAX, "release_date")?;
        }

        let mut tables = self.tables.lock().unwrap();
        let Some(row) = tables.movies.get_mut(&id) else {
            return Ok(None);
        };
        if let Some(title) = patch.title {
            row.title = title;
        }
        if let Some(release_date) = patch.release_date {
            row.release_date = release_date;
        }
        Ok(Some(row.clone()))
    }

    async fn delete_movie(&self, id: i64) -> RepoResult<bool> {
        Ok(self.tables.lock().unwrap().movies.remove(&id).is_some())
    }

    async fn list_actors(&self) -> RepoResult<Vec<ActorRow>> {
        Ok(self.tables.lock().unwrap().actors.values().cloned().collect())
    }

    async fn get_actor(&self, id: i64) -> RepoResult<Option<ActorRow>> {
        Ok(self.tables.lock().unwrap().actors.get(&id).cloned())
    }

    async fn create_actor(&self, new: NewActor) -> RepoResult<ActorRow> {
        let name = required(new.name, "name")?;
        let age = required(new.age, "age")?;
        let gender = required(new.gender, "gender")?;
        bounded(&name, NAME_MAX, "name")?;

        let mut tables = self.tables.lock().unwrap();
        tables.next_actor_id += 1;
        let row = ActorRow {
            id: tables.next_actor_id,
            name,
            age,
            gender,
        };
        tables.actors.insert(row.id, row.clone());
        Ok(row)
    }

    async fn update_actor(&self, id: i64, patch: ActorPatch) -> RepoResult<Option<ActorRow>> {
        if let Some(name) = &patch.name {
            bounded(name, NAME_MAX, "name")?;
        }

        let mut tables = self.tables.lock().unwrap();
        let Some(row) = tables.actors.get_mut(&id) else {
            return Ok(None);
        };
        if let Some(name) = patch.name {
            row.name = name;
        }
        if let Some(age) = patch.age {
            row.age = age;
        }
        if let Some(gender) = patch.gender {
            row.gender = gender;
        }
        Ok(Some(row.clone()))
    }

    async fn delete_actor(&self, id: i64) -> RepoResult<bool> {
        Ok(self.tables.lock().unwrap().actors.remove(&id).is_some())
    }

    async fn reset(&self) -> RepoResult<()> {
        *self.tables.lock().unwrap() = Tables::default();
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn created_movie_reads_back_with_assigned_id() {
        let store = MemoryStore::new();
        let created = store
            .create_movie(NewMovie {
                title: Some("American Made".into()),
                release_date: Some("05/12/2018".into()),
            })
            .await
            .unwrap();

        let fetched = store.get_movie(created.id).await.unwrap().unwrap();
        assert_eq!(fetched, created);
        assert_eq!(fetched.title, "American Made");
        assert_eq!(fetched.release_date, "05/12/2018");
    }

    #[tokio::test]
    async fn title_only_patch_keeps_release_date_and_is_idempotent() {
        let store = MemoryStore::new();
        let created = store
            .create_movie(NewMovie {
                title: Some("Stack Is Half Full".into()),
                release_date: Some("11/11/2011".into()),
            })
            .await
            .unwrap();

        let patch = MoviePatch {
            title: Some("Stack Is Half Empty".into()),
            release_date: None,
        };
        let once = store
            .update_movie(created.id, patch.clone())
            .await
            .unwrap()
            .unwrap();
        let twice = store.update_movie(created.id, patch).await.unwrap().unwrap();

        assert_eq!(once.release_date, "11/11/2011");
        assert_eq!(once, twice);
    }

    #[tokio::test]
    async fn missing_required_column_is_a_constraint_error() {
        let store = MemoryStore::new();
        let err = store
            .create_actor(NewActor {
                name: Some("Brandon".into()),
                age: None,
                gender: Some("Male".into()),
            })
            .await
            .unwrap_err();

        assert!(matches!(err, RepoError::Constraint(_)));
        assert_eq!(store.actor_count(), 0);
    }

    #[tokio::test]
    async fn reset_restarts_ids() {
        let store = MemoryStore::new();
        let new = || NewMovie {
            title: Some("t".into()),
            release_date: Some("d".into()),
        };
        store.create_movie(new()).await.unwrap();
        store.create_movie(new()).await.unwrap();
        store.reset().await.unwrap();

        assert_eq!(store.movie_count(), 0);
        assert_eq!(store.create_movie(new()).await.unwrap().id, 1);
    }
}
