//! Python runtime detection
//!
//! Generated bots run on Python 3; the check is advisory and never
//! stops generation.

use std::process::Command;

/// Runtime detection result
#[derive(Debug, Clone)]
pub struct RuntimeInfo {
    pub name: &'static str,
    pub version: Option<String>,
    pub available: bool,
}

/// Check if Python 3 is available
pub fn check_python() -> RuntimeInfo {
    detect("Python 3", "python3")
}

fn detect(name: &'static str, program: &str) -> RuntimeInfo {
    let output = Command::new(program).arg("--version").output();

    match output {
        Ok(out) if out.status.success() => {
            // Python 2 printed its version to stderr
            let raw = if out.stdout.is_empty() {
                out.stderr
            } else {
                out.stdout
            };
            RuntimeInfo {
                name,
                version: Some(String::from_utf8_lossy(&raw).trim().to_string()),
                available: true,
            }
        }
        _ => RuntimeInfo {
            name,
            version: None,
            available: false,
        },
    }
}
