//! The built-in component catalog for aiogram bot projects

use super::component::{Component, ComponentKind};
use super::dependency::Dependency;
use super::registry::{CatalogError, ComponentRegistry};

fn aiogram() -> Dependency {
    Dependency::new("aiogram", "3.8.0")
}

fn python_dotenv() -> Dependency {
    Dependency::latest("python-dotenv")
}

fn aiosqlite() -> Dependency {
    Dependency::new("aiosqlite", "0.20.0")
}

fn asyncpg() -> Dependency {
    Dependency::new("asyncpg", "0.30.0")
}

fn psycopg2() -> Dependency {
    Dependency::exact("psycopg2-binary", "2.9.11")
}

fn sqlalchemy() -> Dependency {
    Dependency::new("sqlalchemy", "2.0.44")
}

fn alembic() -> Dependency {
    Dependency::new("alembic", "1.12.0")
}

fn fastapi() -> Dependency {
    Dependency::new("fastapi", "0.109.0")
}

fn uvicorn() -> Dependency {
    Dependency::latest("uvicorn")
}

fn django() -> Dependency {
    Dependency::exact("django", "5.0.0")
}

fn aiohttp() -> Dependency {
    Dependency::latest("aiohttp")
}

fn docker() -> Dependency {
    Dependency::new("docker", "7.1.0")
}

fn docker_compose() -> Dependency {
    Dependency::new("docker-compose", "1.29.2")
}

fn fixed_slots() -> Vec<Component> {
    vec![
        Component::new("base", "Bot skeleton: entry point and settings", "base")
            .required()
            .dependencies([aiogram(), python_dotenv()]),
        Component::new("handlers", "Message and command handlers", "handlers")
            .required()
            .requires(&["base"]),
        Component::new("keyboards", "Inline and reply keyboards", "keyboards")
            .requires(&["base", "handlers"]),
        Component::new(
            "middlewares",
            "Dispatcher middlewares (update logging)",
            "middlewares",
        )
        .requires(&["base"]),
        Component::new("services", "Clients for external HTTP APIs", "services")
            .dependencies([aiohttp()])
            .requires(&["base"]),
        Component::new("webhook", "Webhook update delivery instead of polling", "webhook")
            .requires(&["base"])
            .conflicts_with(&["polling"]),
        Component::new("admin", "Admin panel for managing the bot", "admin")
            .requires(&["base", "database"]),
        Component::new("docker", "Dockerfile and compose deployment", "docker")
            .kind(ComponentKind::Docker)
            .dependencies([docker(), docker_compose()]),
        Component::new("migrations", "Alembic database migrations", "migrations")
            .dependencies([alembic()])
            .requires(&["database"]),
        Component::new("polling", "Long-polling update delivery", "polling")
            .requires(&["base"])
            .conflicts_with(&["webhook"]),
        Component::new("database", "Shared SQLAlchemy session and models", "database")
            .dependencies([sqlalchemy()])
            .requires(&["base"]),
    ]
}

fn database_components() -> Vec<Component> {
    vec![
        Component::new(
            "aiosqlite",
            "SQLite database with async driver",
            "database/aiosqlite",
        )
        .kind(ComponentKind::database("sqlite"))
        .dependencies([aiosqlite(), sqlalchemy()])
        .requires(&["database"]),
        Component::new(
            "postgresql",
            "PostgreSQL database with async driver",
            "database/postgresql",
        )
        .kind(ComponentKind::database("postgresql"))
        .dependencies([asyncpg(), sqlalchemy()])
        .requires(&["base", "database"]),
        Component::new(
            "postgresql-sync",
            "PostgreSQL database with sync driver",
            "database/postgresql_sync",
        )
        .kind(ComponentKind::sync_database("postgresql"))
        .dependencies([psycopg2(), sqlalchemy()])
        .requires(&["database"])
        .conflicts_with(&["aiosqlite", "postgresql"]),
    ]
}

fn web_components() -> Vec<Component> {
    vec![
        Component::new("fastapi", "FastAPI for webhooks and admin panel", "web/fastapi")
            .kind(ComponentKind::web_framework("fastapi"))
            .dependencies([fastapi(), uvicorn()])
            .requires(&["base"]),
        Component::new("django", "Django admin panel", "web/django")
            .kind(ComponentKind::web_framework("django"))
            .dependencies([django()])
            .requires(&["base"]),
    ]
}

fn docker_database_components() -> Vec<Component> {
    vec![Component::new(
        "aiosqlite-docker",
        "SQLite with a docker volume for data",
        "database/aiosqlite-docker",
    )
    .kind(ComponentKind::docker_database("sqlite", "./data:/app/data"))
    .dependencies([aiosqlite(), sqlalchemy()])
    .requires(&["database"])
    .conflicts_with(&["aiosqlite", "postgresql", "postgresql-sync"])]
}

/// Build the registry with every component botango knows about
pub fn botango_registry() -> Result<ComponentRegistry, CatalogError> {
    ComponentRegistry::new(
        fixed_slots(),
        database_components(),
        web_components(),
        docker_database_components(),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builtin_catalog_is_consistent() {
        assert!(botango_registry().is_ok());
    }

    #[test]
    fn test_only_base_and_handlers_required() {
        let registry = botango_registry().unwrap();
        let required: Vec<_> = registry
            .all_components()
            .filter(|c| c.required)
            .map(|c| c.name.as_str())
            .collect();
        assert_eq!(required, vec!["base", "handlers"]);
    }

    #[test]
    fn test_database_drivers_need_shared_database_layer() {
        let registry = botango_registry().unwrap();
        for driver in registry
            .database_components()
            .iter()
            .chain(registry.docker_database_components())
        {
            assert!(
                driver.requires.iter().any(|r| r == "database"),
                "{} must require the database slot",
                driver.name
            );
        }
    }

    #[test]
    fn test_docker_database_pairing_exists_for_sqlite() {
        let registry = botango_registry().unwrap();
        let paired = registry.docker_database_component_for("aiosqlite").unwrap();
        assert_eq!(paired.kind.volume_path(), Some("./data:/app/data"));
    }
}
