//! Case definitions
//!
//! Each case sends its request(s) through the runner's transport and checks
//! the status code and JSON shape it expects. A case returns `Err` only when
//! the exchange itself failed (transport error, undecodable body); contract
//! violations are a failed [`CaseOutcome`].

use chrono::Duration;
use serde::Deserialize;
use serde_json::Value;
use uuid::Uuid;

use crate::api::types::{
    AttendanceRecord, AttendanceStatus, AttendanceType, ConfirmAttendanceRequest, ErrorBody, JoinAttendanceRequest, LoginRequest, MessageBody, Role, SignupRequest,
    UserProfile,
};
use crate::common::{Error, Result};

use super::runner::RunnerState;

/// Accounts the server seeds on an empty database
const SEEDED_EMAILS: [&str; 3] = ["john@company.com", "sarah@company.com", "hr@company.com"];

/// Credentials that must never authenticate
const INVALID_EMAIL: &str = "invalid@company.com";
const INVALID_PASSWORD: &str = "wrongpassword";

const SIGNUP_NAME: &str = "Test User";
const DUPLICATE_NAME: &str = "Duplicate User";
const SIGNUP_PASSWORD: &str = "testpass123";

/// List snapshots keep this many leading elements
const SNAPSHOT_ITEMS: usize = 2;

/// The smoke-test cases, in execution order
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Case {
    HealthCheck,
    GetEmployees,
    GetAttendance,
    LoginValidCredentials,
    LoginInvalidCredentials,
    SignupNewUser,
    SignupDuplicateUser,
    AttendanceJoin(Office),
    AttendanceConfirm,
}

/// Offices the join cases book, each on its own day
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Office {
    Chennai,
    Mumbai,
    Bangalore,
}

impl Office {
    pub fn location(self) -> &'static str {
        match self {
            Office::Chennai => "Chennai",
            Office::Mumbai => "Mumbai",
            Office::Bangalore => "Bangalore",
        }
    }

    /// Days after today. Distinct per office so the three joins never
    /// share a (date, location) pair.
    fn day_offset(self) -> i64 {
        match self {
            Office::Chennai => 0,
            Office::Mumbai => 1,
            Office::Bangalore => 2,
        }
    }
}

impl Case {
    pub const ALL: [Case; 11] = [
        Case::HealthCheck,
        Case::GetEmployees,
        Case::GetAttendance,
        Case::LoginValidCredentials,
        Case::LoginInvalidCredentials,
        Case::SignupNewUser,
        Case::SignupDuplicateUser,
        Case::AttendanceJoin(Office::Chennai),
        Case::AttendanceJoin(Office::Mumbai),
        Case::AttendanceJoin(Office::Bangalore),
        Case::AttendanceConfirm,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Case::HealthCheck => "Health Check",
            Case::GetEmployees => "Get Employees",
            Case::GetAttendance => "Get Attendance",
            Case::LoginValidCredentials => "Login Valid Credentials",
            Case::LoginInvalidCredentials => "Login Invalid Credentials",
            Case::SignupNewUser => "Signup New User",
            Case::SignupDuplicateUser => "Signup Duplicate User",
            Case::AttendanceJoin(Office::Chennai) => "Attendance Join Chennai",
            Case::AttendanceJoin(Office::Mumbai) => "Attendance Join Mumbai",
            Case::AttendanceJoin(Office::Bangalore) => "Attendance Join Bangalore",
            Case::AttendanceConfirm => "Attendance Confirm",
        }
    }

    /// HTTP method and endpoint path the case hits
    pub fn endpoint(self) -> (&'static str, &'static str) {
        match self {
            Case::HealthCheck => ("GET", "/"),
            Case::GetEmployees => ("GET", "/employees"),
            Case::GetAttendance => ("GET", "/attendance"),
            Case::LoginValidCredentials | Case::LoginInvalidCredentials => ("POST", "/auth/login"),
            Case::SignupNewUser | Case::SignupDuplicateUser => ("POST", "/auth/signup"),
            Case::AttendanceJoin(_) => ("POST", "/attendance/join"),
            Case::AttendanceConfirm => ("POST", "/attendance/confirm"),
        }
    }

    /// Run the case against the state's transport
    pub async fn execute(self, state: &mut RunnerState) -> Result<CaseOutcome> {
        match self {
            Case::HealthCheck => health_check(state).await,
            Case::GetEmployees => get_employees(state).await,
            Case::GetAttendance => get_attendance(state).await,
            Case::LoginValidCredentials => login_valid(state).await,
            Case::LoginInvalidCredentials => login_invalid(state).await,
            Case::SignupNewUser => signup_new_user(state).await,
            Case::SignupDuplicateUser => signup_duplicate(state).await,
            Case::AttendanceJoin(office) => join_attendance(state, office).await,
            Case::AttendanceConfirm => confirm_attendance(state).await,
        }
    }
}

/// Verdict of a case whose exchange completed
#[derive(Debug, Clone, PartialEq)]
pub struct CaseOutcome {
    pub passed: bool,
    pub message: String,
    pub snapshot: Option<Value>,
}

impl CaseOutcome {
    pub fn pass(message: impl Into<String>, snapshot: Option<Value>) -> Self {
        Self {
            passed: true,
            message: message.into(),
            snapshot,
        }
    }

    pub fn fail(message: impl Into<String>, snapshot: Option<Value>) -> Self {
        Self {
            passed: false,
            message: message.into(),
            snapshot,
        }
    }

    fn unexpected_status(status: u16) -> Self {
        Self::fail(format!("Unexpected status code: {}", status), None)
    }
}

fn has_field(value: &Value, field: &str) -> bool {
    value.get(field).is_some()
}

fn contains_ignore_case(haystack: &str, needle: &str) -> bool {
    haystack.to_lowercase().contains(needle)
}

fn head(value: &Value) -> Value {
    match value.as_array() {
        Some(items) => Value::Array(items.iter().take(SNAPSHOT_ITEMS).cloned().collect()),
        None => value.clone(),
    }
}

fn decode_value<'de, T: Deserialize<'de>>(endpoint: &str, value: &'de Value) -> Result<T> {
    T::deserialize(value).map_err(|e| Error::invalid_body(endpoint, e))
}

/// `field` of a list element, when present as a string
fn str_field<'a>(item: &'a Value, field: &str) -> Option<&'a str> {
    item.get(field).and_then(Value::as_str)
}

async fn health_check(state: &mut RunnerState) -> Result<CaseOutcome> {
    let response = state.transport().get("/").await?;
    if response.status != 200 {
        return Ok(CaseOutcome::unexpected_status(response.status));
    }

    let data = response.json()?;
    if has_field(&data, "message") && has_field(&data, "endpoints") {
        Ok(CaseOutcome::pass(
            format!("API is running. Status: {}", response.status),
            Some(data),
        ))
    } else {
        Ok(CaseOutcome::fail("Response missing required fields", Some(data)))
    }
}

async fn get_employees(state: &mut RunnerState) -> Result<CaseOutcome> {
    let response = state.transport().get("/employees").await?;
    if response.status != 200 {
        return Ok(CaseOutcome::unexpected_status(response.status));
    }

    let data = response.json()?;
    let count = data.as_array().map_or(0, Vec::len);
    if count == 0 {
        return Ok(CaseOutcome::fail(
            "No employees found or invalid response format",
            Some(data),
        ));
    }

    let employees = data.as_array().map_or(&[][..], Vec::as_slice);
    if let Some(id) = str_field(&employees[0], "id") {
        state.capture_user_id(id);
    }

    let seeded = employees
        .iter()
        .filter_map(|e| str_field(e, "email"))
        .any(|email| SEEDED_EMAILS.contains(&email));
    let message = if seeded {
        format!("Retrieved {} employees with sample data", count)
    } else {
        format!("Retrieved {} employees (no sample data)", count)
    };
    Ok(CaseOutcome::pass(message, Some(head(&data))))
}

async fn get_attendance(state: &mut RunnerState) -> Result<CaseOutcome> {
    let response = state.transport().get("/attendance").await?;
    if response.status != 200 {
        return Ok(CaseOutcome::unexpected_status(response.status));
    }

    let data = response.json()?;
    if !data.is_array() {
        return Ok(CaseOutcome::fail("Invalid response format", Some(data)));
    }

    let records = data.as_array().map_or(&[][..], Vec::as_slice);
    if let Some(id) = records.first().and_then(|r| str_field(r, "id")) {
        state.capture_attendance_id(id);
    }

    Ok(CaseOutcome::pass(
        format!("Retrieved {} attendance records", records.len()),
        Some(head(&data)),
    ))
}

async fn login_valid(state: &mut RunnerState) -> Result<CaseOutcome> {
    let accounts = state.accounts().clone();
    let body = serde_json::to_value(LoginRequest {
        email: &accounts.email,
        password: &accounts.password,
    })?;

    let response = state.transport().post("/auth/login", &body).await?;
    if response.status != 200 {
        return Ok(CaseOutcome::fail(
            format!("Login failed with status: {}", response.status),
            None,
        ));
    }

    let data = response.json()?;
    let user: UserProfile = decode_value(&response.endpoint, &data)?;
    if user.email.as_deref() == Some(accounts.email.as_str()) && !has_field(&data, "password") {
        Ok(CaseOutcome::pass("Successfully logged in with sample user", Some(data)))
    } else {
        Ok(CaseOutcome::fail(
            "Invalid response data or password exposed",
            Some(data),
        ))
    }
}

async fn login_invalid(state: &mut RunnerState) -> Result<CaseOutcome> {
    let body = serde_json::to_value(LoginRequest {
        email: INVALID_EMAIL,
        password: INVALID_PASSWORD,
    })?;

    let response = state.transport().post("/auth/login", &body).await?;
    if response.status != 401 {
        return Ok(CaseOutcome::unexpected_status(response.status));
    }

    let data = response.json()?;
    if has_field(&data, "error") {
        Ok(CaseOutcome::pass("Correctly rejected invalid credentials", Some(data)))
    } else {
        Ok(CaseOutcome::fail("Missing error message in response", Some(data)))
    }
}

/// A fresh address on every call so repeated runs never collide
fn unique_email() -> String {
    let id = Uuid::new_v4().simple().to_string();
    format!("testuser_{}@company.com", &id[..8])
}

async fn signup_new_user(state: &mut RunnerState) -> Result<CaseOutcome> {
    let email = unique_email();
    let body = serde_json::to_value(SignupRequest {
        name: SIGNUP_NAME,
        email: &email,
        password: SIGNUP_PASSWORD,
        role: Role::Employee,
    })?;

    let response = state.transport().post("/auth/signup", &body).await?;
    if response.status != 200 {
        return Ok(CaseOutcome::fail(
            format!("Signup failed with status: {}", response.status),
            None,
        ));
    }

    let data = response.json()?;
    let user: UserProfile = decode_value(&response.endpoint, &data)?;
    if user.email.as_deref() == Some(email.as_str())
        && user.name.as_deref() == Some(SIGNUP_NAME)
        && !has_field(&data, "password")
    {
        Ok(CaseOutcome::pass("Successfully created new user", Some(data)))
    } else {
        Ok(CaseOutcome::fail(
            "Invalid response data or password exposed",
            Some(data),
        ))
    }
}

async fn signup_duplicate(state: &mut RunnerState) -> Result<CaseOutcome> {
    let email = state.accounts().email.clone();
    let body = serde_json::to_value(SignupRequest {
        name: DUPLICATE_NAME,
        email: &email,
        password: SIGNUP_PASSWORD,
        role: Role::Employee,
    })?;

    let response = state.transport().post("/auth/signup", &body).await?;
    if response.status != 400 {
        return Ok(CaseOutcome::unexpected_status(response.status));
    }

    let data = response.json()?;
    let error: ErrorBody = decode_value(&response.endpoint, &data)?;
    if contains_ignore_case(&error.error, "already exists") {
        Ok(CaseOutcome::pass("Correctly rejected duplicate email", Some(data)))
    } else {
        Ok(CaseOutcome::fail("Missing or incorrect error message", Some(data)))
    }
}

async fn join_attendance(state: &mut RunnerState, office: Office) -> Result<CaseOutcome> {
    let Some(user_id) = state.sample_user_id().map(str::to_string) else {
        return Ok(CaseOutcome::fail("No sample user ID available", None));
    };

    let location = office.location();
    let date = (state.today() + Duration::days(office.day_offset()))
        .format("%Y-%m-%d")
        .to_string();
    let body = serde_json::to_value(JoinAttendanceRequest {
        user_id: &user_id,
        date: &date,
        location,
        kind: AttendanceType::Planned,
    })?;

    let response = state.transport().post("/attendance/join", &body).await?;
    match response.status {
        200 => {
            let data = response.json()?;
            let record: AttendanceRecord = decode_value(&response.endpoint, &data)?;
            if record.location.as_deref() == Some(location)
                && record.user_id.as_deref() == Some(user_id.as_str())
            {
                Ok(CaseOutcome::pass(
                    format!("Successfully joined {} office", location),
                    Some(data),
                ))
            } else {
                Ok(CaseOutcome::fail("Invalid response data", Some(data)))
            }
        }
        // A (user, date, location) that is already booked is acceptable
        400 => {
            let data = response.json()?;
            let error: ErrorBody = decode_value(&response.endpoint, &data)?;
            if contains_ignore_case(&error.error, "already marked") {
                Ok(CaseOutcome::pass(
                    "Correctly prevented duplicate attendance",
                    Some(data),
                ))
            } else {
                Ok(CaseOutcome::fail(
                    format!("Unexpected error: {}", data),
                    Some(data),
                ))
            }
        }
        status => Ok(CaseOutcome::unexpected_status(status)),
    }
}

async fn confirm_attendance(state: &mut RunnerState) -> Result<CaseOutcome> {
    let Some(attendance_id) = state.sample_attendance_id().map(str::to_string) else {
        return Ok(CaseOutcome::fail("No sample attendance ID available", None));
    };

    let body = serde_json::to_value(ConfirmAttendanceRequest {
        attendance_id: &attendance_id,
        status: AttendanceStatus::Confirmed,
    })?;

    let response = state.transport().post("/attendance/confirm", &body).await?;
    if response.status != 200 {
        return Ok(CaseOutcome::unexpected_status(response.status));
    }

    let data = response.json()?;
    let reply: MessageBody = decode_value(&response.endpoint, &data)?;
    if contains_ignore_case(&reply.message, "updated") {
        Ok(CaseOutcome::pass("Successfully confirmed attendance", Some(data)))
    } else {
        Ok(CaseOutcome::fail("Invalid response message", Some(data)))
    }
}
