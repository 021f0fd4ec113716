use serde::{Deserialize, Serialize};

/// Request body for user creation.
#[derive(Debug, Deserialize)]
pub struct CreateUserRequest {
    pub username: String,
    pub password: String,
    pub age: i32,
}

/// Confirmation returned after a successful insert. The generated id is
/// deliberately not part of the response.
#[derive(Debug, Serialize)]
pub struct MessageResponse {
    pub message: String,
}

/// Public part of the user returned to the client.
#[derive(Debug, Serialize)]
pub struct UserProfile {
    pub username: String,
    pub age: i32,
}
