pub const SCHEMA: &str = r#"
-- Groups; gid -1 and 0 are reserved for the sentinel and administrator rows
CREATE TABLE IF NOT EXISTS groups (
    gid INTEGER PRIMARY KEY AUTOINCREMENT,
    name TEXT NOT NULL UNIQUE
);

-- Users fall back to the invalid group (-1) when their group goes away
CREATE TABLE IF NOT EXISTS users (
    uid INTEGER PRIMARY KEY AUTOINCREMENT,
    name TEXT NOT NULL UNIQUE,
    gid INTEGER NOT NULL DEFAULT -1
        REFERENCES groups(gid) ON UPDATE SET DEFAULT ON DELETE SET DEFAULT
);

CREATE INDEX IF NOT EXISTS idx_users_gid ON users(gid);
"#;

pub const SEED_GROUP: &str =
    "INSERT INTO groups (gid, name) VALUES (?1, ?2) ON CONFLICT DO NOTHING";

pub const SEED_USER: &str =
    "INSERT INTO users (uid, name, gid) VALUES (?1, ?2, ?3) ON CONFLICT DO NOTHING";
