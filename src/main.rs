use std::io::Write;
use std::process::ExitCode;

use clap::Parser;
use tracing::{debug, error, info, warn};

use bcd_auto_pr::assemble::{self, PrContent};
use bcd_auto_pr::cli::{Cli, Commands, CreateArgs, LocateArgs};
use bcd_auto_pr::collector::CollectorInfo;
use bcd_auto_pr::config::ToolConfig;
use bcd_auto_pr::gh::Gh;
use bcd_auto_pr::git::Git;
use bcd_auto_pr::lint::Linter;
use bcd_auto_pr::prompt::{Prompter, TerminalPrompter};
use bcd_auto_pr::publish::{self, PublishOutcome};
use bcd_auto_pr::tools::{self, Tool};
use bcd_auto_pr::{category, feature, locate, logging, wizard};

const INTERRUPT_EXIT_CODE: i32 = 130;

fn main() -> ExitCode {
    let cli = Cli::parse();

    // Prompts block on stdin, so an interrupt has to end the process itself.
    if let Err(e) = ctrlc::set_handler(|| {
        eprintln!("\nKeyboard interrupt! Exiting.");
        std::process::exit(INTERRUPT_EXIT_CODE);
    }) {
        eprintln!("failed to install Ctrl-C handler: {e}");
    }

    match run(cli) {
        Ok(true) => ExitCode::SUCCESS,
        Ok(false) => ExitCode::FAILURE,
        Err(e) => {
            // Errors raised before the configured subscriber exists still
            // need somewhere to go.
            let _ = logging::init(None, None);
            error!("{e:#}");
            ExitCode::FAILURE
        }
    }
}

/// Returns `Ok(false)` for an unsuccessful run that is not an error, such
/// as a feature that could not be located.
fn run(cli: Cli) -> anyhow::Result<bool> {
    match cli.command {
        Commands::Create(args) => {
            let mut prompter = TerminalPrompter::stdio();
            create(&args, &mut prompter)?;
            Ok(true)
        }
        Commands::Locate(args) => {
            logging::init(None, None)?;
            locate_feature(&args, &mut std::io::stdout())
        }
    }
}

fn create(args: &CreateArgs, prompter: &mut dyn Prompter) -> anyhow::Result<()> {
    let config = ToolConfig::load(args.config.as_deref(), args)?;

    logging::init_interactive(config.log_level.as_deref(), config.log_file.as_deref())?;

    config.validate()?;

    if !config.dry_run {
        for (tool, cmd) in [
            (Tool::Git, &config.git_cmd),
            (Tool::Gh, &config.gh_cmd),
            (Tool::Lint, &config.lint_cmd),
        ] {
            let path = tools::resolve(tool, cmd)?;
            debug!(cmd = %cmd, path = %path.display(), "resolved tool");
        }
    }

    info!(
        data_root = %config.data_root.display(),
        collector_path = %config.collector_path.display(),
        remote = %config.remote,
        dry_run = config.dry_run,
        "config loaded"
    );

    let collector = CollectorInfo::load(&config.collector_path);
    let git = Git::new(&config.git_cmd, &config.data_root, &config.remote);
    let in_repo = git.is_work_tree();

    let answers = wizard::gather(prompter, &config.data_root, |file| {
        if in_repo {
            git.is_untracked(file)
        } else {
            Ok(false)
        }
    })?;
    let content = assemble::assemble(&answers, &collector)?;

    if config.dry_run {
        print_content(prompter, &content)?;
        return Ok(());
    }

    let linter = Linter::new(&config.lint_cmd, &config.data_root);
    let lint = linter.run(answers.file.as_deref(), prompter)?;
    info!(outcome = ?lint, "lint finished");
    prompter.say("")?;

    let gh = Gh::new(&config.gh_cmd, &config.data_root);
    match publish::publish(&git, &gh, &content, &answers, prompter)? {
        PublishOutcome::Created { url } => {
            if !url.is_empty() {
                prompter.say(&url)?;
            }
        }
        PublishOutcome::Cancelled => info!(branch = %content.branch, "publish cancelled"),
    }
    Ok(())
}

fn print_content(prompter: &mut dyn Prompter, content: &PrContent) -> anyhow::Result<()> {
    prompter.say(&format!("Branch: {}", content.branch))?;
    prompter.say(&format!("Labels: {}", content.labels.join(", ")))?;
    prompter.say("")?;
    prompter.say(&content.message())?;
    Ok(())
}

/// Print the file and category of a feature. Returns whether it was found.
fn locate_feature(args: &LocateArgs, out: &mut dyn Write) -> anyhow::Result<bool> {
    feature::validate(&args.feature)?;
    let category = category::classify(&args.feature);

    match locate::locate(&args.data_root, &args.feature, args.first_match)? {
        Some(file) => {
            writeln!(out, "{}", file.display())?;
            match category.label {
                Some(label) => writeln!(out, "category: {} ({label})", category.title)?,
                None => writeln!(out, "category: {}", category.title)?,
            }
            Ok(true)
        }
        None => {
            warn!(feature = %args.feature, data_root = %args.data_root.display(), "no matching file found");
            Ok(false)
        }
    }
}
