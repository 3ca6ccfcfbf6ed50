/*
 * Responsibility
 * - Actors の request/response DTO
 */
use serde::{Deserialize, Serialize};

use crate::repos::actor_repo::{ActorPatch, ActorRow, NewActor};

#[derive(Debug, Default, Deserialize)]
pub struct CreateActorRequest {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub age: Option<i32>,
    #[serde(default)]
    pub gender: Option<String>,
}

impl From<CreateActorRequest> for NewActor {
    fn from(req: CreateActorRequest) -> Self {
        Self {
            name: req.name,
            age: req.age,
            gender: req.gender,
        }
    }
}

#[derive(Debug, Default, Deserialize)]
pub struct UpdateActorRequest {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub age: Option<i32>,
    #[serde(default)]
    pub gender: Option<String>,
}

impl From<UpdateActorRequest> for ActorPatch {
    fn from(req: UpdateActorRequest) -> Self {
        Self {
            name: req.name,
            age: req.age,
            gender: req.gender,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct ActorResponse {
    pub id: i64,
    pub name: String,
    pub age: i32,
    pub gender: String,
}

impl From<ActorRow> for ActorResponse {
    fn from(row: ActorRow) -> Self {
        Self {
            id: row.id,
            name: row.name,
            age: row.age,
            gender: row.gender,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct ActorsEnvelope {
    pub success: bool,
    pub actors: Vec<ActorResponse>,
}

impl ActorsEnvelope {
    pub fn new(rows: impl IntoIterator<Item = ActorRow>) -> Self {
        Self {
            success: true,
            actors: rows.into_iter().map(ActorResponse::from).collect(),
        }
    }
}
