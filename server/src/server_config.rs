pub const DEFAULT_LISTEN_ADDR: &str = "0.0.0.0:5000";
pub const LEADERBOARD_LIMIT: i64 = 10;
pub const MAX_DB_CONNECTIONS: u32 = 5;
