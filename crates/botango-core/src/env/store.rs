//! `.env` file store
//!
//! The file is a flat `KEY=value` list. Blocks are appended with their
//! comment line; keys already present are left untouched so user edits
//! survive repeated runs.

use super::block::EnvBlock;
use crate::atomic::write_atomic;
use anyhow::{Context, Result};
use std::path::PathBuf;

/// Where the store lives and which keys it never writes
#[derive(Debug, Clone)]
pub struct EnvStoreConfig {
    pub path: PathBuf,
    pub excluded_keys: Vec<String>,
}

impl EnvStoreConfig {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            excluded_keys: Vec::new(),
        }
    }

    pub fn exclude(mut self, key: impl Into<String>) -> Self {
        self.excluded_keys.push(key.into());
        self
    }

    fn is_excluded(&self, key: &str) -> bool {
        self.excluded_keys.iter().any(|k| k == key)
    }
}

impl Default for EnvStoreConfig {
    fn default() -> Self {
        Self::new(PathBuf::from("data").join(".env"))
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum Line {
    Blank,
    Comment(String),
    Entry(String, String),
}

/// Parsed contents of a `.env` file, in file order
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EnvFile {
    lines: Vec<Line>,
}

impl EnvFile {
    /// Parse `.env` text. Comments and blank lines are kept for rewriting;
    /// other lines without `=` are dropped.
    pub fn parse(content: &str) -> Self {
        let lines = content
            .lines()
            .map(str::trim)
            .filter_map(|row| {
                if row.is_empty() {
                    Some(Line::Blank)
                } else if row.starts_with('#') {
                    Some(Line::Comment(row.to_string()))
                } else {
                    row.split_once('=').map(|(key, value)| {
                        Line::Entry(key.trim().to_string(), value.trim().to_string())
                    })
                }
            })
            .collect();
        Self { lines }
    }

    pub fn render(&self) -> String {
        let mut out = String::new();
        for line in &self.lines {
            match line {
                Line::Blank => {}
                Line::Comment(comment) => out.push_str(comment),
                Line::Entry(key, value) => {
                    out.push_str(key);
                    out.push('=');
                    out.push_str(value);
                }
            }
            out.push('\n');
        }
        out
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.lines.iter().find_map(|line| match line {
            Line::Entry(k, v) if k == key => Some(v.as_str()),
            _ => None,
        })
    }

    pub fn contains(&self, key: &str) -> bool {
        self.get(key).is_some()
    }

    /// All entries, in file order
    pub fn entries(&self) -> impl Iterator<Item = (&str, &str)> {
        self.lines.iter().filter_map(|line| match line {
            Line::Entry(k, v) => Some((k.as_str(), v.as_str())),
            _ => None,
        })
    }

    /// Add the block's absent keys under its comment, after any of its
    /// keys already present. A block without its comment line is appended
    /// at the end. Returns the number of keys added.
    fn add_block(&mut self, block: EnvBlock, config: &EnvStoreConfig) -> usize {
        let missing: Vec<Line> = block
            .defaults()
            .iter()
            .filter(|(key, _)| !self.contains(key) && !config.is_excluded(key))
            .map(|(key, value)| Line::Entry(key.to_string(), value.to_string()))
            .collect();
        if missing.is_empty() {
            return 0;
        }
        let added = missing.len();

        let comment_at = self
            .lines
            .iter()
            .position(|line| matches!(line, Line::Comment(c) if c == block.comment()));
        match comment_at {
            Some(comment_at) => {
                let last_key = self
                    .lines
                    .iter()
                    .rposition(|line| match line {
                        Line::Entry(key, _) => block.keys().any(|k| k == key.as_str()),
                        _ => false,
                    })
                    .filter(|&idx| idx > comment_at)
                    .unwrap_or(comment_at);
                let at = last_key + 1;
                self.lines.splice(at..at, missing);
            }
            None => {
                if !self.lines.is_empty() && self.lines.last() != Some(&Line::Blank) {
                    self.lines.push(Line::Blank);
                }
                self.lines.push(Line::Comment(block.comment().to_string()));
                self.lines.extend(missing);
            }
        }
        added
    }

    /// Drop the block's keys and comment line
    fn remove_block(&mut self, block: EnvBlock) -> usize {
        let before = self.entries().count();
        self.lines.retain(|line| match line {
            Line::Entry(key, _) => !block.keys().any(|k| k == key.as_str()),
            Line::Comment(comment) => comment != block.comment(),
            Line::Blank => true,
        });
        // collapse blank runs left behind by the removed block
        self.lines
            .dedup_by(|a, b| *a == Line::Blank && *b == Line::Blank);
        while self.lines.last() == Some(&Line::Blank) {
            self.lines.pop();
        }
        before - self.entries().count()
    }
}

/// Reads and updates the project's `.env`
#[derive(Debug, Clone)]
pub struct EnvStore {
    config: EnvStoreConfig,
}

impl EnvStore {
    pub fn new(config: EnvStoreConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &EnvStoreConfig {
        &self.config
    }

    /// Load the file, creating it with the bot block when missing
    pub fn load(&self) -> Result<EnvFile> {
        let path = &self.config.path;
        if !path.exists() {
            let mut file = EnvFile::default();
            file.add_block(EnvBlock::Bot, &self.config);
            self.save(&file)?;
            tracing::info!(path = %path.display(), "created env file");
            return Ok(file);
        }

        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read {}", path.display()))
            .inspect_err(|e| tracing::error!(error = %e, "env file unreadable"))?;
        Ok(EnvFile::parse(&content))
    }

    fn save(&self, file: &EnvFile) -> Result<()> {
        write_atomic(&self.config.path, &file.render())
            .inspect_err(|e| tracing::error!(error = %e, "env file write failed"))
    }

    /// Merge the block's keys into the file, keeping existing values
    pub fn add(&self, block: EnvBlock) -> Result<()> {
        let mut file = self.load()?;
        let added = file.add_block(block, &self.config);
        if added > 0 {
            self.save(&file)?;
        }
        tracing::debug!(block = %block, added, "env block added");
        Ok(())
    }

    pub fn delete(&self, block: EnvBlock) -> Result<()> {
        let mut file = self.load()?;
        let removed = file.remove_block(block);
        if removed > 0 {
            self.save(&file)?;
        }
        tracing::debug!(block = %block, removed, "env block deleted");
        Ok(())
    }

    /// Switch the database block: keys of every other database block are
    /// removed before `block` is added.
    pub fn use_database(&self, block: EnvBlock) -> Result<()> {
        if !block.is_database() {
            anyhow::bail!("'{}' is not a database env block", block);
        }

        let mut file = self.load()?;
        let mut changed = 0;
        for other in EnvBlock::ALL
            .into_iter()
            .filter(|b| b.is_database() && *b != block)
        {
            changed += file.remove_block(other);
        }
        changed += file.add_block(block, &self.config);
        if changed > 0 {
            self.save(&file)?;
        }
        tracing::debug!(block = %block, "env database block selected");
        Ok(())
    }

    /// Add every block, routing database blocks through `use_database`
    pub fn apply(&self, blocks: &[EnvBlock]) -> Result<()> {
        for block in blocks {
            if block.is_database() {
                self.use_database(*block)?;
            } else {
                self.add(*block)?;
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    fn store_in(dir: &std::path::Path) -> EnvStore {
        EnvStore::new(EnvStoreConfig::new(dir.join("data").join(".env")))
    }

    #[test]
    fn test_parse_skips_malformed_rows() {
        let file = EnvFile::parse("# comment\nBOT_TOKEN = abc \ngarbage\n\nDB_NAME=x=y\n");
        let entries: Vec<_> = file.entries().collect();
        assert_eq!(entries, vec![("BOT_TOKEN", "abc"), ("DB_NAME", "x=y")]);
    }

    #[test]
    fn test_load_creates_bot_block() {
        let dir = tempdir().unwrap();
        let store = store_in(dir.path());

        let file = store.load().unwrap();

        assert_eq!(file.get("BOT_TOKEN"), Some("Your bot token"));
        let content = std::fs::read_to_string(&store.config().path).unwrap();
        assert_eq!(content, "# Aiogram bot data\nBOT_TOKEN=Your bot token\n");
    }

    #[test]
    fn test_add_keeps_existing_values() {
        let dir = tempdir().unwrap();
        let store = store_in(dir.path());
        std::fs::create_dir_all(dir.path().join("data")).unwrap();
        std::fs::write(&store.config().path, "REDIS_HOST=cache\n").unwrap();

        store.add(EnvBlock::Redis).unwrap();
        store.add(EnvBlock::Redis).unwrap();

        let file = store.load().unwrap();
        assert_eq!(file.get("REDIS_HOST"), Some("cache"));
        assert_eq!(file.get("REDIS_PORT"), Some("6379"));
        assert_eq!(file.entries().filter(|(k, _)| *k == "REDIS_PORT").count(), 1);
    }

    #[test]
    fn test_missing_keys_land_under_their_comment() {
        let dir = tempdir().unwrap();
        let store = store_in(dir.path());
        std::fs::create_dir_all(dir.path().join("data")).unwrap();
        std::fs::write(
            &store.config().path,
            "# Redis data\nREDIS_HOST=cache\n\n# Aiogram bot data\nBOT_TOKEN=abc\n",
        )
        .unwrap();

        store.add(EnvBlock::Redis).unwrap();

        let content = std::fs::read_to_string(&store.config().path).unwrap();
        assert_eq!(
            content,
            "# Redis data\nREDIS_HOST=cache\nREDIS_PORT=6379\n\n# Aiogram bot data\nBOT_TOKEN=abc\n"
        );
    }

    #[test]
    fn test_missing_keys_follow_comment_when_block_is_empty() {
        let mut file = EnvFile::parse("# Redis data\n\n# Aiogram bot data\nBOT_TOKEN=abc\n");

        let added = file.add_block(EnvBlock::Redis, &EnvStoreConfig::default());

        assert_eq!(added, 2);
        assert_eq!(
            file.render(),
            "# Redis data\nREDIS_HOST=localhost\nREDIS_PORT=6379\n\n# Aiogram bot data\nBOT_TOKEN=abc\n"
        );
    }

    #[test]
    fn test_delete_removes_block() {
        let dir = tempdir().unwrap();
        let store = store_in(dir.path());
        store.add(EnvBlock::Webhook).unwrap();

        store.delete(EnvBlock::Webhook).unwrap();

        let content = std::fs::read_to_string(&store.config().path).unwrap();
        assert_eq!(content, "# Aiogram bot data\nBOT_TOKEN=Your bot token\n");
    }

    #[test]
    fn test_use_database_reconciles_blocks() {
        let dir = tempdir().unwrap();
        let store = store_in(dir.path());

        store.use_database(EnvBlock::Aiosqlite).unwrap();
        store.use_database(EnvBlock::Postgresql).unwrap();

        let file = store.load().unwrap();
        assert!(!file.contains("DB_NAME"));
        assert_eq!(file.get("POSTGRES_PORT"), Some("5432"));
        assert!(file.contains("BOT_TOKEN"));
    }

    #[test]
    fn test_use_database_rejects_other_blocks() {
        let dir = tempdir().unwrap();
        let store = store_in(dir.path());
        assert!(store.use_database(EnvBlock::Redis).is_err());
    }

    #[test]
    fn test_excluded_keys_never_written() {
        let dir = tempdir().unwrap();
        let store = EnvStore::new(
            EnvStoreConfig::new(dir.path().join(".env")).exclude("WEBHOOK_SECRET"),
        );

        store.apply(&[EnvBlock::Bot, EnvBlock::Webhook]).unwrap();

        let file = store.load().unwrap();
        assert!(file.contains("WEBHOOK_URL"));
        assert!(!file.contains("WEBHOOK_SECRET"));
    }
}
