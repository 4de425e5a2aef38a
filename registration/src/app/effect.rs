use super::Action;
use notify_rust::Notification;
use registration_core::api::{self, register};
use reqwest::Url;
use std::io;

/// Connections to external services that effects use. We keep these around
/// to share connections across the app as a whole.
pub struct EffectContext {
    /// an HTTP client with reqwest
    http: reqwest::Client,
}

impl EffectContext {
    /// Get a new `EffectContext`
    pub fn new() -> Self {
        Self {
            http: reqwest::Client::new(),
        }
    }
}

/// Things that can happen as a result of user input. Side effects!
#[derive(Debug)]
pub enum Effect {
    /// Send a registration to the API
    Register(api::Client, register::Req),

    /// Show a desktop notification
    Notify { summary: String, body: String },

    /// Open the web entry address in a browser
    OpenWebEntry(Url),
}

impl Effect {
    /// Perform the side-effectful portions of this effect, returning the next
    /// `Action` the application needs to handle
    pub async fn run(self, context: &EffectContext) -> Option<Action> {
        match self.run_inner(context).await {
            Ok(action) => action,
            Err(problem) => {
                tracing::error!(?problem, "problem running effect");
                Some(Action::Problem(problem.to_string()))
            }
        }
    }

    /// The actual implementation of `run`, but with a `Result` wrapper to make
    /// it more ergonomic to write.
    async fn run_inner(self, context: &EffectContext) -> Result<Option<Action>, Problem> {
        match self {
            Self::Register(client, req) => {
                let result = client.register(&context.http, &req).await;

                Ok(Some(Action::Registered(result)))
            }

            Self::Notify { summary, body } => {
                tracing::debug!(%summary, "showing desktop notification");

                // The toast already told the user; a missing notification
                // daemon isn't worth bothering them about.
                if let Err(err) = Notification::new().summary(&summary).body(&body).show() {
                    tracing::warn!(?err, "could not show desktop notification");
                }

                Ok(None)
            }

            Self::OpenWebEntry(url) => {
                tracing::info!(%url, "opening web entry");

                open::that_detached(url.as_str()).map_err(Problem::Browser)?;

                Ok(None)
            }
        }
    }
}

/// Problems that can happen while running an `Effect`.
#[derive(Debug, thiserror::Error)]
pub enum Problem {
    /// We couldn't hand the web entry address to a browser.
    #[error("Não foi possível abrir o navegador: {0}")]
    Browser(#[source] io::Error),
}
