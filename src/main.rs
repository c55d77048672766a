//! Twitter Media Downloader - CLI entry point.

use std::process::ExitCode;
use std::sync::Arc;
use std::time::Duration;

use clap::Parser;
use tracing_subscriber::{fmt, EnvFilter};

use twitter_media_downloader::{
    api::{resolve_account, TwitterApi},
    cli::Args,
    config::{validate_config, Config, DownloadMode},
    dedup::{canonicalize, DedupStore},
    download::{
        download_timeline, download_url_file, CrawlContext, CrawlSettings, DownloadState,
        GlobalState, URL_FILE_FOLDER,
    },
    error::{exit_codes, Error, Result},
    fs::{account_folder, resolve_in_download_dir},
    output::{
        create_spinner, print_account_profile, print_account_stats, print_banner,
        print_batch_summary, print_config_summary, print_error, print_global_stats, print_info,
        print_success, print_warning,
    },
};

#[tokio::main]
async fn main() -> ExitCode {
    match run().await {
        Ok(code) => ExitCode::from(code as u8),
        Err(e) => {
            print_error(&format!("{}", e));
            ExitCode::from(exit_code_for(&e) as u8)
        }
    }
}

fn exit_code_for(error: &Error) -> i32 {
    match error {
        Error::Config(_)
        | Error::ConfigValidation { .. }
        | Error::MissingConfig(_)
        | Error::TomlParse(_) => exit_codes::CONFIG_ERROR,
        Error::Transport(_) | Error::AccountNotFound(_) => exit_codes::API_ERROR,
        Error::AssetFetch { .. } | Error::UnsupportedMediaType(_) | Error::InvalidFilename(_) => {
            exit_codes::DOWNLOAD_ERROR
        }
        Error::Interrupted => exit_codes::ABORT,
        e if e.is_storage() => exit_codes::STORAGE_ERROR,
        _ => exit_codes::UNEXPECTED_ERROR,
    }
}

async fn run() -> Result<i32> {
    // Parse CLI arguments
    let args = Args::parse();

    // Set up logging
    let log_level = if args.debug { "debug" } else { "info" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(log_level));

    fmt().with_env_filter(filter).with_target(false).init();

    // Print banner
    print_banner();

    // Load configuration
    let config_path = args.config.clone();
    let mut config = if config_path.exists() {
        Config::load(&config_path)?
    } else {
        print_warning(&format!(
            "Configuration file not found: {}",
            config_path.display()
        ));
        print_info("Using default configuration with CLI arguments");
        Config::default()
    };

    // Merge CLI arguments into config
    args.merge_into_config(&mut config);

    let ledger_path = resolve_in_download_dir(&config, &config.options.ledger_file);
    let ledger = Arc::new(DedupStore::open(ledger_path).await);

    if let Some(url) = &args.forget {
        let canonical = canonicalize(url);
        ledger.remove(canonical).await?;
        ledger.persist().await?;
        print_success(&format!("Removed {} from {}", canonical, ledger.path().display()));
        return Ok(exit_codes::SUCCESS);
    }

    // Validate configuration
    validate_config(&mut config)?;

    print_config_summary(
        &config.targets.usernames,
        &config.options.download_mode.to_string(),
        &config.download_directory().display().to_string(),
    );
    print_info(&format!(
        "{} media URL(s) already in {}",
        ledger.len().await,
        ledger.path().display()
    ));

    // Initialize API client
    let api = TwitterApi::new(
        &config.account.cookie,
        &config.account.bearer_token,
        &config.account.user_agent,
        Duration::from_secs(config.options.request_timeout_seconds),
    )?;

    let mut settings = CrawlSettings::from_config(&config);
    settings.export_file = resolve_in_download_dir(&config, &config.options.export_file);
    let ctx = CrawlContext::new(Arc::new(api), ledger, settings);

    // Ctrl-C cancels in-flight work; crawls still save their progress.
    let cancel = ctx.cancel.clone();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            print_warning("Interrupt received, finishing up...");
            cancel.cancel();
        }
    });

    match config.options.download_mode {
        DownloadMode::UrlFile => {
            let save_dir = config.download_directory().join(URL_FILE_FOLDER);
            let report = download_url_file(&ctx, &config.options.url_file, &save_dir).await?;
            print_batch_summary(&report);
            Ok(exit_codes::SUCCESS)
        }
        DownloadMode::User => {
            let handle = config
                .targets
                .usernames
                .first()
                .ok_or_else(|| Error::MissingConfig("usernames".to_string()))?;
            let state = process_account(&ctx, &config, handle).await?;
            print_account_stats(&state);
            if state.interrupted {
                return Err(Error::Interrupted);
            }
            Ok(exit_codes::SUCCESS)
        }
        DownloadMode::UserList => {
            let mut global_state = GlobalState::default();

            for handle in &config.targets.usernames {
                if ctx.is_cancelled() {
                    break;
                }
                print_info(&format!("Processing account: @{}", handle));

                match process_account(&ctx, &config, handle).await {
                    Ok(state) => {
                        print_account_stats(&state);
                        global_state.add_account_stats(&state);
                    }
                    Err(e) if e.is_storage() => return Err(e),
                    Err(e) => {
                        print_error(&format!("Failed to process @{}: {}", handle, e));
                        global_state.mark_account_failed();
                    }
                }
            }

            print_global_stats(&global_state);

            if ctx.is_cancelled() {
                return Err(Error::Interrupted);
            }
            if global_state.accounts_failed > 0 {
                print_warning(&format!(
                    "{} account(s) failed",
                    global_state.accounts_failed
                ));
                return Ok(exit_codes::SOME_USERS_FAILED);
            }
            Ok(exit_codes::SUCCESS)
        }
    }
}

/// Resolve one account and crawl its media timeline.
///
/// An interrupted crawl is returned as `Ok` with `interrupted` set, so its
/// statistics can still be reported.
async fn process_account(ctx: &CrawlContext, config: &Config, handle: &str) -> Result<DownloadState> {
    let spinner = create_spinner(&format!("Looking up @{}...", handle));
    let account = resolve_account(ctx.fetcher.as_ref(), handle).await;
    spinner.finish_and_clear();
    let account = account?;

    print_account_profile(&account);

    let save_dir = account_folder(config, &account.handle)?;
    let mut state = DownloadState::new(account.handle.clone(), save_dir);

    match download_timeline(ctx, &account, &mut state).await {
        Ok(_) | Err(Error::Interrupted) => Ok(state),
        Err(e) => Err(e),
    }
}
