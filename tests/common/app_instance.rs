//! App instance: one simulated app launch over a storage directory that outlives it.
//! `restart()` flushes pending saves, drops the session and opens a new one on the same files.

use colortap_core::ColorTap;
use std::path::PathBuf;

pub struct AppInstance {
    pub storage_path: PathBuf,
    _temp_dir: tempfile::TempDir,
    app: Option<ColorTap>,
}

impl AppInstance {
    pub fn launch() -> Self {
        let dir = tempfile::tempdir().expect("tempdir");
        let storage_path = dir.path().join("documents");
        let app = ColorTap::open(storage_path.to_string_lossy().into_owned()).expect("open");
        Self {
            storage_path,
            _temp_dir: dir,
            app: Some(app),
        }
    }

    pub fn app(&mut self) -> &mut ColorTap {
        self.app.as_mut().expect("app running")
    }

    pub fn restart(&mut self) {
        if let Some(app) = self.app.take() {
            app.flush();
        }
        let app = ColorTap::open(self.storage_path.to_string_lossy().into_owned()).expect("reopen");
        self.app = Some(app);
    }
}
