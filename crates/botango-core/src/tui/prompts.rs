//! Charm-style CLI prompts using cliclack

use crate::components::{ComponentRegistry, Violation};
use crate::project::{BuildReport, ProjectBuilder, ProjectLayout, DEFAULT_SELECTION};
use crate::runtime;
use crate::templates::TemplatePack;
use anyhow::Result;
use console::style;
use std::path::{Path, PathBuf};

/// CLI arguments for the newbot command
#[derive(Debug, Clone, Default)]
pub struct NewBotArgs {
    /// Template directory overriding the bundled templates
    pub template_dir: Option<PathBuf>,

    /// Project directory to create
    pub directory: Option<PathBuf>,

    /// Project name used in rendered files; defaults to the directory name
    pub name: Option<String>,

    /// Components to include; prompts when absent
    pub components: Option<Vec<String>>,

    /// Auto-confirm all prompts (non-interactive mode)
    pub yes: bool,
}

/// Run the newbot flow with interactive prompts
pub async fn run(registry: &ComponentRegistry, args: NewBotArgs, cli_version: &str) -> Result<()> {
    cliclack::intro("botango")?;

    // Step 1: Locate templates
    let pack = setup_pack(registry, &args.template_dir)?;

    // Step 2: Select components
    let components = select_components(registry, &args)?;

    // Step 3: Select directory
    let project_dir = select_directory(&args)?;

    // Step 4: Advisory Python check
    check_python()?;

    // Step 5: Generate project
    let mut layout = ProjectLayout::new(&project_dir);
    if let Some(name) = args.name {
        layout = layout.with_name(name);
    }
    let renderer = pack.clone();
    let builder = ProjectBuilder::new(registry, pack, renderer, layout, cli_version);
    let report = create_project(&builder, &components).await?;

    // Step 6: Show next steps
    print_next_steps(&project_dir, &report)?;

    Ok(())
}

fn setup_pack(registry: &ComponentRegistry, template_dir: &Option<PathBuf>) -> Result<TemplatePack> {
    let pack = TemplatePack::locate(template_dir.clone());
    cliclack::log::info(format!("Using templates from {}", pack))?;

    let missing = pack.missing_components(registry);
    if !missing.is_empty() {
        cliclack::log::warning(format!(
            "No templates for: {} (selecting these will fail)",
            missing.join(", ")
        ))?;
    }

    Ok(pack)
}

fn report_violations(violations: &[Violation]) -> Result<()> {
    for violation in violations {
        cliclack::log::error(violation.to_string())?;
    }
    Ok(())
}

fn select_components(registry: &ComponentRegistry, args: &NewBotArgs) -> Result<Vec<String>> {
    // Use --components flag if provided
    if let Some(names) = &args.components {
        let violations = registry.validate_selection(names);
        if !violations.is_empty() {
            report_violations(&violations)?;
            anyhow::bail!("Invalid component selection.");
        }
        cliclack::log::success(format!("Components: {}", names.join(", ")))?;
        return Ok(names.clone());
    }

    if args.yes {
        cliclack::log::info(format!("Components: {}", DEFAULT_SELECTION.join(", ")))?;
        return Ok(DEFAULT_SELECTION.iter().map(|s| s.to_string()).collect());
    }

    let mut initial: Vec<String> = DEFAULT_SELECTION.iter().map(|s| s.to_string()).collect();
    loop {
        let mut multi = cliclack::multiselect("Select components");
        for component in registry.all_components() {
            let hint = if component.required {
                format!("{} (required)", component.description)
            } else {
                component.description.clone()
            };
            multi = multi.item(component.name.clone(), &component.name, hint);
        }

        let selected: Vec<String> = multi.initial_values(initial).required(true).interact()?;

        let violations = registry.validate_selection(&selected);
        if violations.is_empty() {
            cliclack::log::success(format!("Components: {}", selected.join(", ")))?;
            return Ok(selected);
        }

        report_violations(&violations)?;
        initial = selected;
    }
}

fn select_directory(args: &NewBotArgs) -> Result<PathBuf> {
    let current_dir = std::env::current_dir().unwrap_or_else(|_| PathBuf::from("."));

    // Use positional directory if provided
    let path = if let Some(dir) = &args.directory {
        let p = if dir.is_absolute() {
            dir.clone()
        } else {
            current_dir.join(dir)
        };
        cliclack::log::info(format!("Using directory: {}", p.display()))?;
        p
    } else if args.yes {
        current_dir
    } else {
        let input: String = cliclack::input("Project directory")
            .placeholder(".")
            .default_input(".")
            .interact()?;

        if input.is_empty() || input == "." {
            current_dir
        } else {
            let p = PathBuf::from(&input);
            if p.is_absolute() {
                p
            } else {
                current_dir.join(p)
            }
        }
    };

    // Validate parent directory exists
    if let Some(parent) = path.parent() {
        if !parent.exists() && parent != Path::new("") {
            anyhow::bail!("Parent directory does not exist: {}", parent.display());
        }
    }

    // Warn if directory exists and has files
    if path.is_dir() {
        let count = std::fs::read_dir(&path).map(|e| e.count()).unwrap_or(0);
        if count > 0 {
            cliclack::log::warning(format!("Directory has {} existing items", count))?;

            // Auto-confirm with --yes flag
            let confirm = if args.yes {
                true
            } else {
                cliclack::confirm("Continue anyway?")
                    .initial_value(true)
                    .interact()?
            };

            if !confirm {
                anyhow::bail!("Setup cancelled.");
            }
        }
    }

    Ok(path)
}

fn check_python() -> Result<()> {
    let python = runtime::check_python();
    if python.available {
        cliclack::log::success(format!(
            "{} ({})",
            python.name,
            python.version.as_deref().unwrap_or("unknown")
        ))?;
    } else {
        cliclack::log::warning(format!(
            "{} not found; install it from https://python.org to run the bot",
            python.name
        ))?;
    }
    Ok(())
}

async fn create_project(
    builder: &ProjectBuilder<'_, TemplatePack>,
    components: &[String],
) -> Result<BuildReport> {
    let spinner = cliclack::spinner();
    spinner.start("Creating project...");

    let report = match builder.build(components).await {
        Ok(report) => report,
        Err(e) => {
            spinner.stop("Project generation failed");
            return Err(e);
        }
    };

    spinner.stop(format!(
        "Created {} files in {}",
        report.files.len(),
        builder.layout().root().display()
    ));

    for warning in &report.warnings {
        cliclack::log::warning(warning)?;
    }

    Ok(report)
}

/// Instructions shown after generation
pub fn next_steps(dir: &Path, report: &BuildReport) -> Vec<String> {
    let mut steps = Vec::new();
    let current = std::env::current_dir().ok();
    let has = |name: &str| report.components.iter().any(|c| c == name);

    // Step 1: cd to directory if not current
    if current.as_deref() != Some(dir) {
        steps.push(format!("cd {}", dir.display()));
    }

    // Step 2: Fill in secrets
    steps.push("Set BOT_TOKEN in data/.env".to_string());

    if has("docker") {
        steps.push("docker compose up --build".to_string());
        return steps;
    }

    // Step 3: Set up Python environment
    steps.push(
        "Set up Python environment:\n\
              python3 -m venv .venv && .venv/bin/pip install -r requirements.txt"
            .to_string(),
    );

    // Step 4: Apply migrations
    if has("migrations") {
        steps.push(".venv/bin/alembic upgrade head".to_string());
    }

    // Step 5: Start the bot
    steps.push(".venv/bin/python -m bot".to_string());

    steps
}

fn print_next_steps(project_dir: &Path, report: &BuildReport) -> Result<()> {
    let steps = next_steps(project_dir, report);

    println!();
    println!("  {}", style("Next steps").bold());
    println!();

    for (i, step) in steps.iter().enumerate() {
        println!("  {}  {}", style(format!("{}.", i + 1)).dim(), step);
    }

    cliclack::outro("Happy hacking!")?;

    Ok(())
}
