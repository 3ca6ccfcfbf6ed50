/*
 * Responsibility
 * - Movies の request/response DTO
 * - request の項目は全て任意 (欠けた項目の扱いは store 側の制約で決まる)
 */
use serde::{Deserialize, Serialize};

use crate::repos::movie_repo::{MoviePatch, MovieRow, NewMovie};

#[derive(Debug, Default, Deserialize)]
pub struct CreateMovieRequest {
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub release_date: Option<String>,
}

impl From<CreateMovieRequest> for NewMovie {
    fn from(req: CreateMovieRequest) -> Self {
        Self {
            title: req.title,
            release_date: req.release_date,
        }
    }
}

/// Missing and `null` fields both mean "leave unchanged".
#[derive(Debug, Default, Deserialize)]
pub struct UpdateMovieRequest {
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub release_date: Option<String>,
}

impl From<UpdateMovieRequest> for MoviePatch {
    fn from(req: UpdateMovieRequest) -> Self {
        Self {
            title: req.title,
            release_date: req.release_date,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct MovieResponse {
    pub id: i64,
    pub title: String,
    pub release_date: String,
}

impl From<MovieRow> for MovieResponse {
    fn from(row: MovieRow) -> Self {
        Self {
            id: row.id,
            title: row.title,
            release_date: row.release_date,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct MoviesEnvelope {
    pub success: bool,
    pub movies: Vec<MovieResponse>,
}

impl MoviesEnvelope {
    pub fn new(rows: impl IntoIterator<Item = MovieRow>) -> Self {
        Self {
            success: true,
            movies: rows.into_iter().map(MovieResponse::from).collect(),
        }
    }
}
