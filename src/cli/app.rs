//! Main app runner

use std::env;
use std::process::ExitCode;

use tracing::debug;

use crate::application::ports::ConfigStore;
use crate::application::{SendCallbacks, SendError, SendFailure, SendInput, SendStringUseCase};
use crate::domain::config::AppConfig;
use crate::domain::error::{ConfigError, UnsupportedCharacter};
use crate::infrastructure::{create_dispatcher, DispatchMode};

use super::args::{InputSource, RunOptions};
use super::presenter::Presenter;
use super::prompt::{self, InputString, PromptError};
use super::signals::ShutdownSignal;

/// Exit codes
pub const EXIT_SUCCESS: u8 = 0;
pub const EXIT_ERROR: u8 = 1;
pub const EXIT_USAGE_ERROR: u8 = 2;
pub const EXIT_INTERRUPTED: u8 = 130;

/// Environment variable naming the external program
pub const VIRSH_ENV: &str = "VIRSH";

/// Run a send
pub async fn run(options: RunOptions) -> ExitCode {
    let mut presenter = Presenter::new();

    let input = match read_input(&options.input).await {
        Ok(input) => input,
        Err(PromptError::Interrupted) => {
            presenter.error("interrupted");
            // The blocking terminal read is still parked and would hold
            // runtime shutdown; the terminal is already restored here
            std::process::exit(i32::from(EXIT_INTERRUPTED));
        }
        Err(e) => {
            presenter.error(&e.to_string());
            return ExitCode::from(EXIT_ERROR);
        }
    };

    // Setup signal handler
    let shutdown = ShutdownSignal::new();
    if let Err(e) = shutdown.setup() {
        presenter.error(&format!("failed to install signal handlers: {}", e));
        return ExitCode::from(EXIT_ERROR);
    }

    let dispatcher = create_dispatcher(options.dispatch_mode, &options.virsh_bin);
    let use_case = SendStringUseCase::new(dispatcher).with_stop_flag(shutdown.flag());

    debug!(
        domain = %options.domain,
        mode = %options.dispatch_mode,
        batch_size = %options.translation.batch_size,
        "sending string"
    );

    // Stdout carries the commands in dry-run mode, so no bar there
    let groups = options.translation.groups(input.as_str()).count();
    let progress = if options.dispatch_mode == DispatchMode::Virsh && groups > 1 {
        Some(presenter.start_progress(input.char_count() as u64))
    } else {
        None
    };

    let secret = input.is_secret();
    let warner = presenter.clone();
    let callbacks = SendCallbacks {
        on_unsupported: Some(Box::new(move |found: &UnsupportedCharacter| {
            warner.unsupported(found, secret)
        })),
        on_group_sent: progress.map(|bar| {
            Box::new(move |sent: usize| bar.set_position(sent as u64))
                as Box<dyn Fn(usize) + Send + Sync>
        }),
    };

    let send_input = SendInput {
        target: &options.domain,
        text: input.as_str(),
        config: options.translation,
        send_newline: options.newline,
    };

    match use_case.execute(send_input, callbacks).await {
        Ok(output) => {
            presenter.finish_progress();
            debug!(
                chars = output.chars_sent,
                groups = output.groups_sent,
                newline = output.newline_sent,
                "string sent"
            );
            ExitCode::from(EXIT_SUCCESS)
        }
        Err(failure) => {
            presenter.abandon_progress();
            let code = report_failure(&presenter, &failure);
            // A signal also reaches virsh, which then fails the group
            if shutdown.is_shutdown() {
                ExitCode::from(EXIT_INTERRUPTED)
            } else {
                ExitCode::from(code)
            }
        }
    }
}

async fn read_input(source: &InputSource) -> Result<InputString, PromptError> {
    match source {
        InputSource::Argument(text) => Ok(InputString::plain(text.as_str())),
        InputSource::Prompt { secret } => prompt::read_input(*secret).await,
    }
}

/// Print a failed send and pick the exit code
fn report_failure(presenter: &Presenter, failure: &SendFailure) -> u8 {
    match &failure.error {
        SendError::Newline(_) => {
            presenter.error(&failure.to_string());
            presenter.warn("string was sent");
            EXIT_ERROR
        }
        SendError::Interrupted => {
            presenter.error("interrupted");
            presenter.partial_delivery(failure.chars_sent);
            EXIT_INTERRUPTED
        }
        SendError::Unsupported(_) => {
            presenter.error(&failure.to_string());
            EXIT_ERROR
        }
        SendError::Dispatch(_) | SendError::Unmappable { .. } => {
            presenter.error(&format!("failed to send keys: {}", failure));
            presenter.partial_delivery(failure.chars_sent);
            EXIT_ERROR
        }
    }
}

/// Config layer from the environment
pub fn env_config() -> AppConfig {
    AppConfig {
        virsh_bin: env::var(VIRSH_ENV).ok().filter(|s| !s.is_empty()),
        ..Default::default()
    }
}

/// Load and merge configuration from file, env, and CLI
pub async fn load_merged_config(
    store: &impl ConfigStore,
    cli_config: AppConfig,
) -> Result<AppConfig, ConfigError> {
    let file_config = store.load().await?;
    debug!(path = %store.path().display(), found = store.exists(), "loaded config");

    // Merge: defaults < file < env < cli
    Ok(AppConfig::defaults()
        .merge(file_config)
        .merge(env_config())
        .merge(cli_config))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::ports::DispatchError;
    use async_trait::async_trait;
    use std::path::PathBuf;

    struct MockStore {
        config: AppConfig,
    }

    #[async_trait]
    impl ConfigStore for MockStore {
        async fn load(&self) -> Result<AppConfig, ConfigError> {
            Ok(self.config.clone())
        }

        fn path(&self) -> PathBuf {
            PathBuf::from("/mock/config.toml")
        }

        fn exists(&self) -> bool {
            true
        }
    }

    struct BrokenStore;

    #[async_trait]
    impl ConfigStore for BrokenStore {
        async fn load(&self) -> Result<AppConfig, ConfigError> {
            Err(ConfigError::ParseError("bad".into()))
        }

        fn path(&self) -> PathBuf {
            PathBuf::from("/mock/config.toml")
        }

        fn exists(&self) -> bool {
            true
        }
    }

    #[tokio::test]
    async fn cli_overrides_file() {
        let store = MockStore {
            config: AppConfig {
                speed: Some(4),
                newline: Some(true),
                ..Default::default()
            },
        };
        let cli = AppConfig {
            speed: Some(9),
            ..Default::default()
        };

        let config = load_merged_config(&store, cli).await.unwrap();
        assert_eq!(config.speed, Some(9));
        assert_eq!(config.newline, Some(true));
        assert_eq!(config.strict, Some(false));
    }

    #[tokio::test]
    async fn file_errors_propagate() {
        let result = load_merged_config(&BrokenStore, AppConfig::empty()).await;
        assert!(matches!(result, Err(ConfigError::ParseError(_))));
    }

    fn failure(chars_sent: usize, error: SendError) -> SendFailure {
        SendFailure { chars_sent, error }
    }

    #[test]
    fn dispatch_failure_is_runtime_error() {
        let presenter = Presenter::new();
        let code = report_failure(
            &presenter,
            &failure(5, SendError::Dispatch(DispatchError::NotFound("virsh".into()))),
        );
        assert_eq!(code, EXIT_ERROR);
    }

    #[test]
    fn newline_failure_is_runtime_error() {
        let presenter = Presenter::new();
        let code = report_failure(
            &presenter,
            &failure(3, SendError::Newline(DispatchError::NotFound("virsh".into()))),
        );
        assert_eq!(code, EXIT_ERROR);
    }

    #[test]
    fn strict_refusal_is_runtime_error() {
        let presenter = Presenter::new();
        let found = UnsupportedCharacter {
            character: 'é',
            offset: 0,
        };
        let code = report_failure(&presenter, &failure(0, SendError::Unsupported(found)));
        assert_eq!(code, EXIT_ERROR);
    }

    #[test]
    fn interruption_exit_code() {
        let presenter = Presenter::new();
        let code = report_failure(&presenter, &failure(2, SendError::Interrupted));
        assert_eq!(code, EXIT_INTERRUPTED);
    }

    #[tokio::test]
    async fn argument_input_is_plain() {
        let input = read_input(&InputSource::Argument("abc".into()))
            .await
            .unwrap();
        assert_eq!(input.as_str(), "abc");
        assert!(!input.is_secret());
    }
}
