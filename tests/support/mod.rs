//! In-process fake of the office attendance API
//!
//! Seeds the same three employees and two attendance records as a fresh
//! server and implements the endpoints the smoke cases hit.

use std::net::SocketAddr;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use axum::extract::State;
use axum::http::StatusCode;
use axum::routing::{get, post};
use axum::{Json, Router};
use serde_json::{json, Value};

type Reply = (StatusCode, Json<Value>);

#[derive(Default)]
struct Db {
    employees: Vec<Value>,
    attendance: Vec<Value>,
}

type Shared = Arc<Mutex<Db>>;

fn seeded() -> Db {
    let employees = vec![
        json!({"id": "emp-1", "name": "John Doe", "email": "john@company.com",
               "password": "password123", "role": "employee", "location": "Chennai"}),
        json!({"id": "emp-2", "name": "Sarah Smith", "email": "sarah@company.com",
               "password": "password123", "role": "employee", "location": "Mumbai"}),
        json!({"id": "emp-3", "name": "HR Manager", "email": "hr@company.com",
               "password": "admin123", "role": "hr", "location": "Bangalore"}),
    ];
    let today = chrono::Local::now().date_naive().format("%Y-%m-%d").to_string();
    let attendance = vec![
        json!({"id": "att-1", "userId": "emp-1", "date": today, "location": "Chennai",
               "type": "planned", "status": "confirmed"}),
        json!({"id": "att-2", "userId": "emp-2", "date": today, "location": "Mumbai",
               "type": "planned", "status": "pending"}),
    ];
    Db {
        employees,
        attendance,
    }
}

fn without_password(user: &Value) -> Value {
    let mut user = user.clone();
    if let Some(fields) = user.as_object_mut() {
        fields.remove("password");
    }
    user
}

fn error(status: StatusCode, message: &str) -> Reply {
    (status, Json(json!({"error": message})))
}

async fn health() -> Reply {
    (
        StatusCode::OK,
        Json(json!({
            "message": "Office Attendance API is running!",
            "endpoints": ["/api/employees", "/api/attendance", "/api/auth/login", "/api/auth/signup"]
        })),
    )
}

async fn employees(State(db): State<Shared>) -> Reply {
    let db = db.lock().unwrap();
    let list: Vec<Value> = db.employees.iter().map(without_password).collect();
    (StatusCode::OK, Json(Value::Array(list)))
}

async fn attendance(State(db): State<Shared>) -> Reply {
    let db = db.lock().unwrap();
    (StatusCode::OK, Json(Value::Array(db.attendance.clone())))
}

async fn login(State(db): State<Shared>, Json(body): Json<Value>) -> Reply {
    let db = db.lock().unwrap();
    let user = db
        .employees
        .iter()
        .find(|e| e["email"] == body["email"] && e["password"] == body["password"]);
    match user {
        Some(user) => (StatusCode::OK, Json(without_password(user))),
        None => error(StatusCode::UNAUTHORIZED, "Invalid credentials"),
    }
}

async fn signup(State(db): State<Shared>, Json(body): Json<Value>) -> Reply {
    let mut db = db.lock().unwrap();
    if db.employees.iter().any(|e| e["email"] == body["email"]) {
        return error(StatusCode::BAD_REQUEST, "User already exists");
    }
    let user = json!({
        "id": uuid::Uuid::new_v4().to_string(),
        "name": body["name"],
        "email": body["email"],
        "password": body["password"],
        "role": body.get("role").cloned().unwrap_or_else(|| json!("employee")),
        "location": null
    });
    db.employees.push(user.clone());
    (StatusCode::OK, Json(without_password(&user)))
}

async fn join(State(db): State<Shared>, Json(body): Json<Value>) -> Reply {
    let mut db = db.lock().unwrap();
    let taken = db.attendance.iter().any(|a| {
        a["userId"] == body["userId"] && a["date"] == body["date"] && a["location"] == body["location"]
    });
    if taken {
        return error(StatusCode::BAD_REQUEST, "Already marked for this date and location");
    }
    let record = json!({
        "id": uuid::Uuid::new_v4().to_string(),
        "userId": body["userId"],
        "date": body["date"],
        "location": body["location"],
        "type": body.get("type").cloned().unwrap_or_else(|| json!("planned")),
        "status": "pending"
    });
    db.attendance.push(record.clone());
    (StatusCode::OK, Json(record))
}

async fn confirm(State(db): State<Shared>, Json(body): Json<Value>) -> Reply {
    let mut db = db.lock().unwrap();
    match db.attendance.iter_mut().find(|a| a["id"] == body["attendanceId"]) {
        Some(record) => {
            record["status"] = body["status"].clone();
            (
                StatusCode::OK,
                Json(json!({"message": "Attendance updated successfully"})),
            )
        }
        None => error(StatusCode::NOT_FOUND, "Attendance record not found"),
    }
}

async fn serve(app: Router) -> SocketAddr {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("Failed to bind fake API");
    let addr = listener.local_addr().expect("Failed to read local addr");
    tokio::spawn(async move {
        axum::serve(listener, app).await.expect("Fake API crashed");
    });
    addr
}

/// Start a freshly seeded fake API; returns its base URL (`http://addr/api`)
pub async fn spawn_api() -> String {
    let db: Shared = Arc::new(Mutex::new(seeded()));
    let api = Router::new()
        .route("/api", get(health))
        .route("/api/", get(health))
        .route("/api/employees", get(employees))
        .route("/api/attendance", get(attendance))
        .route("/api/auth/login", post(login))
        .route("/api/auth/signup", post(signup))
        .route("/api/attendance/join", post(join))
        .route("/api/attendance/confirm", post(confirm))
        .with_state(db);
    let addr = serve(api).await;
    format!("http://{}/api", addr)
}

/// Start a server whose health endpoint answers only after `delay`
pub async fn spawn_slow_api(delay: Duration) -> String {
    let slow = move || async move {
        tokio::time::sleep(delay).await;
        health().await
    };
    let addr = serve(Router::new().route("/api/", get(slow))).await;
    format!("http://{}/api", addr)
}

/// A base URL on a port nothing listens on
pub async fn refused_api() -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("Failed to bind probe port");
    let addr = listener.local_addr().expect("Failed to read local addr");
    drop(listener);
    format!("http://{}/api", addr)
}
