use std::path::{Path, PathBuf};

use flightboard::adapter::outbound::sqlite::database::connection::{
    create_pool, run_migrations, DbPool,
};

/// Temporary SQLite database for integration tests.
pub struct TempDb {
    _dir: tempfile::TempDir,
    path: PathBuf,
    pool: DbPool,
}

impl TempDb {
    pub fn create(name: &str) -> Self {
        let dir = tempfile::tempdir().expect("create temp dir");
        let path = dir.path().join(format!("flightboard-{name}.db"));

        let pool = create_pool(&path.to_string_lossy()).expect("create sqlite pool");
        run_migrations(&pool).expect("run migrations");

        Self {
            _dir: dir,
            path,
            pool,
        }
    }

    pub fn pool(&self) -> &DbPool {
        &self.pool
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}
