use async_trait::async_trait;
use axum::extract::{FromRequest, RequestParts};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::{unauthorized_error, Error};

pub const USER_ID_HEADER: &str = "x-user-id";
pub const USER_ROLE_HEADER: &str = "x-user-role";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    Passenger,
    Driver,
}

/// The caller as asserted by whatever sits in front of the server. Tokens are
/// issued and checked elsewhere.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct User {
    pub id: Uuid,
    pub role: Role,
}

impl User {
    pub fn passenger(id: Uuid) -> Self {
        Self {
            id,
            role: Role::Passenger,
        }
    }

    pub fn driver(id: Uuid) -> Self {
        Self {
            id,
            role: Role::Driver,
        }
    }

    pub fn is_driver(&self) -> bool {
        self.role == Role::Driver
    }

    pub fn require_driver(&self) -> Result<(), Error> {
        if self.is_driver() {
            return Ok(());
        }

        Err(unauthorized_error())
    }
}

#[async_trait]
impl<B: Send> FromRequest<B> for User {
    type Rejection = Error;

    async fn from_request(req: &mut RequestParts<B>) -> Result<Self, Self::Rejection> {
        let headers = req.headers();

        let id = headers
            .get(USER_ID_HEADER)
            .and_then(|value| value.to_str().ok())
            .and_then(|value| Uuid::parse_str(value).ok())
            .ok_or_else(unauthorized_error)?;

        let role = match headers
            .get(USER_ROLE_HEADER)
            .and_then(|value| value.to_str().ok())
        {
            Some("driver") => Role::Driver,
            Some("passenger") | None => Role::Passenger,
            Some(_) => return Err(unauthorized_error()),
        };

        Ok(Self { id, role })
    }
}
