use std::collections::HashMap;
use std::fs;

use minijinja::{Environment, Error, State};
use sha2::{Digest, Sha256};

/// Cache-busted URLs for the files in `static/`, hashed once at startup and
/// exposed to templates as the `asset()` function.
#[derive(Debug, Default, Clone)]
pub struct StaticAssets {
    hashed: HashMap<String, String>,
}

impl StaticAssets {
    pub fn from_dir(dir: &str) -> Self {
        let mut hashed = HashMap::new();
        let Ok(entries) = fs::read_dir(dir) else {
            return Self { hashed };
        };
        for entry in entries.flatten() {
            let path = entry.path();
            if !path.is_file() {
                continue;
            }
            let Some(name) = path.file_name().and_then(|name| name.to_str()) else {
                continue;
            };
            if let Ok(contents) = fs::read(&path) {
                let digest = Sha256::digest(&contents);
                hashed.insert(name.to_string(), format!("/static/{}?v={:x}", name, digest));
            }
        }
        Self { hashed }
    }

    pub fn url(&self, path: &str) -> String {
        self.hashed
            .get(path)
            .cloned()
            .unwrap_or_else(|| format!("/static/{path}"))
    }

    pub fn register(&self, env: &mut Environment<'_>) {
        let assets = self.clone();
        env.add_function(
            "asset",
            move |_state: &State, path: String| -> Result<String, Error> { Ok(assets.url(&path)) },
        );
    }
}
