use std::process::ExitCode;

use clap::Parser;

use gitlab_token_rotator::services::load_project_list;
use gitlab_token_rotator::{logging, read_credential, run_batch, AppError, GitLabClient, Settings};

async fn run(settings: Settings) -> Result<(), AppError> {
    // The credential check comes first: nothing else runs without it.
    let token = read_credential(&settings.token_env)?;
    let policy = settings.rotation_policy()?;
    let client = GitLabClient::new(settings.client_config(token)?)?;
    let entries = load_project_list(&settings.projects_file)?;

    let today = chrono::Local::now().date_naive();
    let summary = run_batch(&client, &entries, &policy, today).await?;

    for path in &summary.skipped {
        log::warn!("Skipped: '{}'", path);
    }
    Ok(())
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    let settings = Settings::parse();
    logging::init(settings.log_filter());

    match run(settings).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            log::error!("{}", e);
            ExitCode::from(e.exit_code())
        }
    }
}
