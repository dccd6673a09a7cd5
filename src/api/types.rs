//! Request and response shapes of the attendance API
//!
//! Field names follow the server's camelCase JSON. Response structs only
//! name the fields the cases read; anything else is ignored.

use serde::{Deserialize, Serialize};

// === Requests ===

/// Body for `POST /auth/login`
#[derive(Debug, Serialize)]
pub struct LoginRequest<'a> {
    pub email: &'a str,
    pub password: &'a str,
}

/// Body for `POST /auth/signup`
#[derive(Debug, Serialize)]
pub struct SignupRequest<'a> {
    pub name: &'a str,
    pub email: &'a str,
    pub password: &'a str,
    pub role: Role,
}

/// Body for `POST /attendance/join`
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct JoinAttendanceRequest<'a> {
    pub user_id: &'a str,
    /// Calendar date as `YYYY-MM-DD`
    pub date: &'a str,
    pub location: &'a str,
    #[serde(rename = "type")]
    pub kind: AttendanceType,
}

/// Body for `POST /attendance/confirm`
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ConfirmAttendanceRequest<'a> {
    pub attendance_id: &'a str,
    pub status: AttendanceStatus,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Employee,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum AttendanceType {
    Planned,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum AttendanceStatus {
    Confirmed,
}

// === Responses ===

/// Attendance record returned by `POST /attendance/join`
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AttendanceRecord {
    pub id: Option<String>,
    pub user_id: Option<String>,
    pub location: Option<String>,
}

/// Account returned by login and signup
#[derive(Debug, Deserialize)]
pub struct UserProfile {
    pub name: Option<String>,
    pub email: Option<String>,
}

/// `{"error": "..."}` payload of a rejected request
#[derive(Debug, Deserialize)]
pub struct ErrorBody {
    #[serde(default)]
    pub error: String,
}

/// `{"message": "..."}` payload of an update
#[derive(Debug, Deserialize)]
pub struct MessageBody {
    #[serde(default)]
    pub message: String,
}
