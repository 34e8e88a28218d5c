//! Template pack compiled into the binary
//!
//! Used when no template directory is given, so an installed `botango`
//! works without the source tree.

macro_rules! bundled_files {
    ($($path:literal),* $(,)?) => {
        &[$(
            (
                $path,
                include_str!(concat!(env!("CARGO_MANIFEST_DIR"), "/templates/", $path)),
            )
        ),*]
    };
}

/// Every file of the bundled pack as (pack-relative path, contents)
pub const FILES: &[(&str, &str)] = bundled_files![
    "README.md",
    "admin/init.py",
    "admin/template.yaml",
    "base/__main__.py",
    "base/config.py",
    "base/init.py",
    "base/main.py",
    "base/runner.py",
    "base/template.yaml",
    "database/aiosqlite-docker/docker-compose.yml",
    "database/aiosqlite-docker/engine.py",
    "database/aiosqlite-docker/template.yaml",
    "database/aiosqlite/engine.py",
    "database/aiosqlite/template.yaml",
    "database/init.py",
    "database/models.py",
    "database/postgresql/engine.py",
    "database/postgresql/template.yaml",
    "database/postgresql_sync/engine.py",
    "database/postgresql_sync/template.yaml",
    "database/template.yaml",
    "docker/Dockerfile",
    "docker/docker-compose.yml",
    "docker/dockerignore.txt",
    "docker/template.yaml",
    "gitignore.txt",
    "handlers/init.py",
    "handlers/start.py",
    "handlers/template.yaml",
    "keyboards/init.py",
    "keyboards/main_menu.py",
    "keyboards/template.yaml",
    "middlewares/init.py",
    "middlewares/logging.py",
    "middlewares/template.yaml",
    "migrations/alembic.ini",
    "migrations/env.py",
    "migrations/gitkeep",
    "migrations/script.py.mako",
    "migrations/template.yaml",
    "polling/runner.py",
    "polling/template.yaml",
    "services/http.py",
    "services/init.py",
    "services/template.yaml",
    "template.yaml",
    "web/django/init.py",
    "web/django/manage.py",
    "web/django/settings.py",
    "web/django/template.yaml",
    "web/django/urls.py",
    "web/fastapi/app.py",
    "web/fastapi/init.py",
    "web/fastapi/template.yaml",
    "webhook/runner.py",
    "webhook/settings.py",
    "webhook/template.yaml",
];

/// Contents of a bundled file by its pack-relative path
pub fn get(path: &str) -> Option<&'static str> {
    FILES
        .iter()
        .find(|(name, _)| *name == path)
        .map(|(_, contents)| *contents)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::Path;
    use walkdir::WalkDir;

    #[test]
    fn test_every_pack_file_is_embedded() {
        let root = Path::new(env!("CARGO_MANIFEST_DIR")).join("templates");
        let on_disk: Vec<String> = WalkDir::new(&root)
            .into_iter()
            .filter_map(|entry| entry.ok())
            .filter(|entry| entry.file_type().is_file())
            .filter_map(|entry| {
                let rel = entry.path().strip_prefix(&root).ok()?;
                Some(rel.to_string_lossy().replace('\\', "/"))
            })
            .collect();

        for path in &on_disk {
            assert!(get(path).is_some(), "{} is not embedded", path);
        }
        assert_eq!(on_disk.len(), FILES.len());
    }

    #[test]
    fn test_get_unknown_path() {
        assert!(get("base/nope.py").is_none());
        assert!(get("template.yaml").unwrap().contains("version:"));
    }
}
