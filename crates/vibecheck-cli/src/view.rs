//! View controller: which screen is showing and how user actions move
//! between them.
//!
//! ```text
//! Home --Check--> Loading --Resolved(Ok)--> Results --CheckAgain--> Home
//!                         --Resolved(Err)-> Error   --Retry-------> Home
//! ```
//!
//! [`transition`] is pure; [`check_from_home`] drives the one asynchronous
//! step between `Loading` and its outcome.

use crate::geolocation::Geolocator;
use crate::pipeline::{run_check, CheckError, PlaceSource, VibeReport};

#[derive(Debug, Clone, PartialEq)]
pub(crate) enum ViewState {
    Home,
    Loading,
    Results(VibeReport),
    Error(String),
}

impl ViewState {
    pub(crate) fn name(&self) -> &'static str {
        match self {
            Self::Home => "home",
            Self::Loading => "loading",
            Self::Results(_) => "results",
            Self::Error(_) => "error",
        }
    }
}

#[derive(Debug)]
pub(crate) enum ViewEvent {
    /// "Check My Vibe".
    Check,
    /// The check pipeline finished.
    Resolved(Result<VibeReport, CheckError>),
    /// "Try Again" from the error view.
    Retry,
    /// Start over from the results view.
    CheckAgain,
}

impl ViewEvent {
    fn name(&self) -> &'static str {
        match self {
            Self::Check => "check",
            Self::Resolved(_) => "resolved",
            Self::Retry => "retry",
            Self::CheckAgain => "check_again",
        }
    }
}

/// Applies `event` to `state`. Events that do not apply to the current state
/// leave it unchanged.
pub(crate) fn transition(state: ViewState, event: ViewEvent) -> ViewState {
    match (state, event) {
        (ViewState::Home, ViewEvent::Check) => ViewState::Loading,
        (ViewState::Loading, ViewEvent::Resolved(Ok(report))) => {
            if report.places.is_empty() {
                ViewState::Error(CheckError::EmptyResults.user_message())
            } else {
                ViewState::Results(report)
            }
        }
        (ViewState::Loading, ViewEvent::Resolved(Err(err))) => ViewState::Error(err.user_message()),
        (ViewState::Error(_), ViewEvent::Retry) | (ViewState::Results(_), ViewEvent::CheckAgain) => {
            ViewState::Home
        }
        (state, event) => {
            tracing::debug!(
                state = state.name(),
                event = event.name(),
                "ignoring event not valid in current view"
            );
            state
        }
    }
}

/// Runs a full check starting from `state`, which must be `Home`.
///
/// Returns the terminal `Results` or `Error` state. Any other starting state
/// is returned unchanged without touching the collaborators.
pub(crate) async fn check_from_home<G, S>(state: ViewState, geolocator: &G, source: &S) -> ViewState
where
    G: Geolocator,
    S: PlaceSource,
{
    let loading = transition(state, ViewEvent::Check);
    if loading != ViewState::Loading {
        return loading;
    }

    let outcome = run_check(geolocator, source).await;
    if let Err(err) = &outcome {
        tracing::warn!(error = %err, "vibe check failed");
    }
    transition(loading, ViewEvent::Resolved(outcome))
}
