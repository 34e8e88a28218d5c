//! Named groups of environment variables written to the project `.env`

use crate::components::{Component, ResolvedSelection};
use std::fmt;
use std::str::FromStr;

/// A named block of environment variables with placeholder values
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EnvBlock {
    Bot,
    Aiosqlite,
    Postgresql,
    Webhook,
    Redis,
    Payments,
}

impl EnvBlock {
    pub const ALL: [EnvBlock; 6] = [
        EnvBlock::Bot,
        EnvBlock::Aiosqlite,
        EnvBlock::Postgresql,
        EnvBlock::Webhook,
        EnvBlock::Redis,
        EnvBlock::Payments,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            EnvBlock::Bot => "bot",
            EnvBlock::Aiosqlite => "aiosqlite",
            EnvBlock::Postgresql => "postgresql",
            EnvBlock::Webhook => "webhook",
            EnvBlock::Redis => "redis",
            EnvBlock::Payments => "payments",
        }
    }

    /// Comment line written above the block
    pub fn comment(&self) -> &'static str {
        match self {
            EnvBlock::Bot => "# Aiogram bot data",
            EnvBlock::Aiosqlite => "# Aiosqlite database data",
            EnvBlock::Postgresql => "# Postgresql database data",
            EnvBlock::Webhook => "# Webhook data",
            EnvBlock::Redis => "# Redis data",
            EnvBlock::Payments => "# Payments provider data",
        }
    }

    /// Keys and placeholder values, in file order
    pub fn defaults(&self) -> &'static [(&'static str, &'static str)] {
        match self {
            EnvBlock::Bot => &[("BOT_TOKEN", "Your bot token")],
            EnvBlock::Aiosqlite => &[("DB_NAME", "example_database.db")],
            EnvBlock::Postgresql => &[
                ("POSTGRES_NAME", "example_database"),
                ("POSTGRES_USER", "postgres"),
                ("POSTGRES_PASSWORD", "postgres"),
                ("POSTGRES_HOST", "localhost"),
                ("POSTGRES_PORT", "5432"),
            ],
            EnvBlock::Webhook => &[
                ("WEBHOOK_URL", "https://your-domain.com"),
                ("WEBHOOK_PATH", "/webhook"),
                ("WEBHOOK_SECRET", "very-secret-value"),
            ],
            EnvBlock::Redis => &[("REDIS_HOST", "localhost"), ("REDIS_PORT", "6379")],
            EnvBlock::Payments => &[("PAYMENTS_PROVIDER_TOKEN", "Your payments provider token")],
        }
    }

    pub fn keys(&self) -> impl Iterator<Item = &'static str> {
        self.defaults().iter().map(|(key, _)| *key)
    }

    /// Database blocks are mutually exclusive in one `.env`
    pub fn is_database(&self) -> bool {
        matches!(self, EnvBlock::Aiosqlite | EnvBlock::Postgresql)
    }

    /// Block holding the connection settings for a database component
    pub fn for_database(component: &Component) -> Option<EnvBlock> {
        match component.kind.db_type()? {
            "sqlite" => Some(EnvBlock::Aiosqlite),
            "postgresql" => Some(EnvBlock::Postgresql),
            _ => None,
        }
    }

    /// Blocks implied by a resolved selection: always the bot token, then
    /// the chosen database, then the webhook settings when selected.
    pub fn for_selection(selection: &ResolvedSelection<'_>) -> Vec<EnvBlock> {
        let mut blocks = vec![EnvBlock::Bot];
        if let Some(block) = selection.database().and_then(EnvBlock::for_database) {
            blocks.push(block);
        }
        if selection.contains("webhook") {
            blocks.push(EnvBlock::Webhook);
        }
        blocks
    }
}

impl fmt::Display for EnvBlock {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for EnvBlock {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        EnvBlock::ALL
            .into_iter()
            .find(|block| block.name().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| anyhow::anyhow!("Unknown env block '{}'", s))
    }
}
