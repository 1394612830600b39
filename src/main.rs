use anyhow::Result;
use clap::Parser;

use git_release::cli::{plan_release, publish_release, ReleaseWorkflowArgs};
use git_release::config::{self, Config};
use git_release::git::{DryRunRepository, Git2Repository, Repository};
use git_release::logging::{self, Level};
use git_release::{ui, Version, Versions};

#[derive(clap::Parser)]
#[command(
    name = "git-release",
    version,
    about = "Compute the next semantic version from git tags, then tag and push it"
)]
struct Args {
    #[arg(long, help = "Increase the major version")]
    major: bool,

    #[arg(long, help = "Increase the minor version")]
    minor: bool,

    #[arg(long, help = "Increase the patch version (default when no flag is given)")]
    patch: bool,

    #[arg(long, help = "Start or continue a release candidate series")]
    pre: bool,

    #[arg(
        long = "set",
        value_name = "VERSION",
        conflicts_with_all = ["major", "minor", "patch", "pre"],
        help = "Release this exact version instead of bumping the latest tag"
    )]
    set_version: Option<String>,

    #[arg(short, long, help = "Only consider tags reachable from this branch")]
    branch: Option<String>,

    #[arg(short, long, help = "Remote to fetch from and push to")]
    remote: Option<String>,

    #[arg(short, long, help = "Custom configuration file path")]
    config: Option<String>,

    #[arg(short, long, help = "Ignore uncommitted changes")]
    force: bool,

    #[arg(long, help = "Preview what would happen without making changes")]
    dry_run: bool,

    #[arg(long, help = "List the versions of all tags, oldest first, and exit")]
    list: bool,

    #[arg(short, long, help = "Show debug output")]
    verbose: bool,

    #[arg(short, long, help = "Hide all log output")]
    quiet: bool,
}

fn main() -> Result<()> {
    let args = Args::parse();
    logging::setup_logging(Level::from_flags(args.verbose, args.quiet));

    // Load configuration
    let config = match config::load_config(args.config.as_deref()) {
        Ok(cfg) => cfg,
        Err(e) => {
            ui::display_error(&format!("Error loading config: {}", e));
            std::process::exit(1);
        }
    };

    let git_repo = match Git2Repository::open(".") {
        Ok(repo) => repo,
        Err(e) => {
            ui::display_error(&format!("Git repository error: {}", e));
            std::process::exit(1);
        }
    };

    if args.list {
        return list_versions(&git_repo, args.branch.as_deref(), &config);
    }

    let explicit_version = match args.set_version.as_deref().map(str::parse::<Version>) {
        Some(Ok(version)) => Some(version),
        Some(Err(e)) => {
            ui::display_error(&e.to_string());
            std::process::exit(1);
        }
        None => None,
    };

    let workflow_args = ReleaseWorkflowArgs {
        major: args.major,
        minor: args.minor,
        patch: args.patch,
        pre: args.pre,
        explicit_version,
        branch: args.branch.clone(),
        remote: args.remote.clone().unwrap_or_else(|| config.remote.clone()),
        allow_dirty: args.force || config.behavior.allow_dirty,
        pre_release_style: config.pre_release_style,
    };

    if args.dry_run {
        release(&DryRunRepository::new(git_repo), &workflow_args, &config, true)
    } else {
        release(&git_repo, &workflow_args, &config, false)
    }
}

fn release<R: Repository>(
    repo: &R,
    args: &ReleaseWorkflowArgs,
    config: &Config,
    dry_run: bool,
) -> Result<()> {
    let marker = if dry_run { "[dry-run] " } else { "" };

    ui::display_status("Retrieving current version from git tags...");
    let plan = match plan_release(repo, args) {
        Ok(plan) => plan,
        Err(e) => {
            ui::display_error(&format!("Failed to determine version: {}", e));
            std::process::exit(1);
        }
    };

    for warning in &plan.warnings {
        ui::display_boundary_warning(warning);
    }
    ui::display_proposed_version(
        plan.current_tag(args.pre_release_style).as_deref(),
        &plan.tag,
    );

    if !dry_run
        && config.behavior.confirm_before_push
        && !ui::confirm_release(&plan.tag, &args.remote)?
    {
        println!("Release cancelled by user.");
        return Ok(());
    }

    ui::display_status(&format!(
        "{}Checking repository state, tagging and pushing {} to {}",
        marker, plan.tag, args.remote
    ));
    match publish_release(repo, args, &plan) {
        Ok(result) => {
            ui::display_success(&format!(
                "{}Released {} to {}",
                marker, result.tag, result.remote
            ));
            Ok(())
        }
        Err(e) => {
            ui::display_error(&format!("Release of {} failed: {}", plan.tag, e));
            std::process::exit(1);
        }
    }
}

fn list_versions<R: Repository>(repo: &R, branch: Option<&str>, config: &Config) -> Result<()> {
    let tags = match branch {
        Some(branch) => repo.list_tags_for_branch(branch)?,
        None => repo.list_tags()?,
    };

    let versions: Vec<String> = Versions::from_tags(&tags)
        .sorted()
        .iter()
        .map(|version| version.to_tag(config.pre_release_style))
        .collect();

    if versions.is_empty() {
        ui::display_error("No tags found");
        std::process::exit(1);
    }

    ui::display_versions(&versions);
    Ok(())
}
