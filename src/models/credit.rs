use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A person credited on a film
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Credit {
    pub id: Uuid,
    pub name: String,
}

impl Credit {
    pub fn new(id: Uuid, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
        }
    }
}

pub type Actor = Credit;
pub type Director = Credit;
pub type Writer = Credit;
