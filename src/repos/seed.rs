//! Demo rows loaded by `RESET_DATABASE=true`.
use tracing::info;

use crate::repos::actor_repo::NewActor;
use crate::repos::error::RepoResult;
use crate::repos::movie_repo::NewMovie;
use crate::repos::store::CastingStore;

fn demo_movies() -> [NewMovie; 2] {
    [
        NewMovie {
            title: Some("Hunt for The Red Tsunami".to_string()),
            release_date: Some("11/08/2022".to_string()),
        },
        NewMovie {
            title: Some("Stack Is Half Full".to_string()),
            release_date: Some("11/11/2011".to_string()),
        },
    ]
}

fn demo_actors() -> [NewActor; 2] {
    [
        NewActor {
            name: Some("Helen Heroku".to_string()),
            age: Some(21),
            gender: Some("Female".to_string()),
        },
        NewActor {
            name: Some("Sammy Sudoku".to_string()),
            age: Some(26),
            gender: Some("Male".to_string()),
        },
    ]
}

/// Drop every row, then insert the demo movies and actors.
pub async fn reset_and_seed(store: &dyn CastingStore) -> RepoResult<()> {
    store.reset().await?;

    for movie in demo_movies() {
        store.create_movie(movie).await?;
    }
    for actor in demo_actors() {
        store.create_actor(actor).await?;
    }

    info!("database reset and seeded with demo data");
    Ok(())
}
