//! Shared response and request bodies for the REST API.

use serde::{Deserialize, Serialize};

/// Spring-style page wrapper. Only `content` is required.
#[derive(Deserialize, Debug)]
#[serde(rename_all = "camelCase")]
pub struct Page<T> {
    pub content: Vec<T>,
    #[serde(default)]
    pub total_elements: Option<u64>,
}

#[derive(Serialize, Debug)]
#[serde(rename_all = "camelCase")]
pub struct CreateTeamRequest<'a> {
    pub name: &'a str,
    pub status_id: u32,
    pub user_ids: &'a [i64],
}

#[derive(Serialize, Debug)]
pub struct LoginRequest<'a> {
    pub email: &'a str,
    pub password: &'a str,
}

#[derive(Deserialize, Debug)]
#[serde(rename_all = "camelCase")]
pub struct LoginResponse {
    pub access_token: String,
}

#[derive(Serialize, Debug)]
#[serde(rename_all = "camelCase")]
pub struct RegisterRequest<'a> {
    pub name: &'a str,
    pub identity_document: &'a str,
    pub email: &'a str,
    pub password: &'a str,
    pub role_id: u32,
    pub course_id: u32,
}
