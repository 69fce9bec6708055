//! Author record

use serde::Serialize;
use sqlx::FromRow;
use uuid::Uuid;

/// Author document. The id is assigned by the store on insert.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, FromRow)]
pub struct Author {
    pub id: Uuid,
    pub name: String,
}
