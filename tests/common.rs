use attendance_backend::{
    api::router::create_router,
    config::Config,
    infra::repositories::{
        sqlite_attendance_repo::SqliteAttendanceRepo,
        sqlite_event_repo::SqliteEventRepo,
        sqlite_member_repo::SqliteMemberRepo,
        sqlite_token_repo::SqliteTokenRepo,
    },
    state::AppState,
};
use axum::Router;
use chrono::Utc;
use jsonwebtoken::{encode, EncodingKey, Header};
use serde::Serialize;
use sqlx::{sqlite::{SqliteConnectOptions, SqlitePoolOptions}, Pool, Sqlite};
use std::str::FromStr;
use std::sync::Arc;
use uuid::Uuid;

pub const TEST_JWT_SECRET: &str = "attendance-test-secret";

#[derive(Serialize)]
struct TestClaims {
    sub: String,
    name: String,
    role: String,
    exp: usize,
}

#[allow(dead_code)]
pub struct TestApp {
    pub router: Router,
    pub pool: Pool<Sqlite>,
    pub db_filename: String,
    pub state: Arc<AppState>,
}

impl TestApp {
    pub async fn new() -> Self {
        let db_filename = format!("test_{}.db", Uuid::new_v4());
        let db_url = format!("sqlite://{}?mode=rwc", db_filename);

        let connection_options = SqliteConnectOptions::from_str(&db_url)
            .unwrap()
            .create_if_missing(true);

        let pool = SqlitePoolOptions::new()
            .connect_with(connection_options)
            .await
            .expect("Failed to connect to test db");

        sqlx::migrate!("./migrations/sqlite")
            .run(&pool)
            .await
            .expect("Failed to migrate test db");

        let config = Config {
            database_url: db_url.clone(),
            port: 0,
            jwt_secret: TEST_JWT_SECRET.to_string(),
        };

        let state = Arc::new(AppState {
            config: config.clone(),
            event_repo: Arc::new(SqliteEventRepo::new(pool.clone())),
            member_repo: Arc::new(SqliteMemberRepo::new(pool.clone())),
            token_repo: Arc::new(SqliteTokenRepo::new(pool.clone())),
            attendance_repo: Arc::new(SqliteAttendanceRepo::new(pool.clone())),
        });

        let router = create_router(state.clone());

        Self {
            router,
            pool,
            db_filename,
            state,
        }
    }

    /// Mints a bearer header the way the external auth service would.
    pub fn bearer_for(&self, user_id: &str, name: &str, role: &str) -> String {
        let claims = TestClaims {
            sub: user_id.to_string(),
            name: name.to_string(),
            role: role.to_string(),
            exp: (Utc::now().timestamp() + 3600) as usize,
        };

        let token = encode(
            &Header::default(),
            &claims,
            &EncodingKey::from_secret(TEST_JWT_SECRET.as_ref()),
        )
        .expect("Failed to mint test JWT");

        format!("Bearer {}", token)
    }

    /// The directory tables belong to the wider app, so tests seed them
    /// directly instead of going through an API.
    pub async fn seed_user(&self, id: &str, name: &str, student_number: Option<&str>) {
        sqlx::query("INSERT INTO users (id, name, student_number, created_at) VALUES (?, ?, ?, ?)")
            .bind(id)
            .bind(name)
            .bind(student_number)
            .bind(Utc::now())
            .execute(&self.pool)
            .await
            .expect("Failed to seed user");
    }

    pub async fn seed_event(&self, id: &str, name: &str) {
        sqlx::query("INSERT INTO events (id, name, status, created_at) VALUES (?, ?, 'ongoing', ?)")
            .bind(id)
            .bind(name)
            .bind(Utc::now())
            .execute(&self.pool)
            .await
            .expect("Failed to seed event");
    }
}

impl Drop for TestApp {
    fn drop(&mut self) {
        let _ = std::fs::remove_file(&self.db_filename);
    }
}
