//! Command handlers for `check` and `interactive`.
//!
//! Both build the places client and the geolocation collaborator from the
//! configuration, then drive the view controller from `Home`.

use std::io::Write;
use std::path::Path;

use tokio::io::{AsyncBufReadExt, BufReader};
use vibecheck_core::{AppConfig, Coordinates};
use vibecheck_places::PlacesClient;

use crate::geolocation::LocationSource;
use crate::map::MapView;
use crate::pipeline::VibeReport;
use crate::render::{render_error, render_focus, render_home, render_loading, render_results};
use crate::view::{check_from_home, transition, ViewEvent, ViewState};

/// Output options for a one-shot check.
#[derive(Debug, Default)]
pub(crate) struct CheckOutput<'a> {
    pub json: bool,
    pub geojson: Option<&'a Path>,
    pub focus: Option<&'a str>,
}

fn build_collaborators(
    config: &AppConfig,
    fixed: Option<Coordinates>,
) -> anyhow::Result<(LocationSource, PlacesClient)> {
    let places = PlacesClient::from_config(config)?;
    let locator = LocationSource::resolve(config, fixed)?;
    tracing::debug!(geolocation = locator.name(), "collaborators ready");
    Ok((locator, places))
}

/// Runs one check and prints the results view.
///
/// # Errors
///
/// Returns an error carrying the error-view message when the check fails,
/// or if the client cannot be built or output cannot be written.
pub(crate) async fn run_check_command(
    config: &AppConfig,
    fixed: Option<Coordinates>,
    output: CheckOutput<'_>,
) -> anyhow::Result<()> {
    let (locator, places) = build_collaborators(config, fixed)?;

    match check_from_home(ViewState::Home, &locator, &places).await {
        ViewState::Results(report) => present_results(&report, &output),
        ViewState::Error(message) => anyhow::bail!("{message}"),
        other => anyhow::bail!("vibe check stopped in the {} view", other.name()),
    }
}

fn present_results(report: &VibeReport, output: &CheckOutput<'_>) -> anyhow::Result<()> {
    let mut map = MapView::new(report.coords, &report.places);

    if let Some(id) = output.focus {
        if map.toggle_selection(id).is_none() {
            tracing::warn!(place_id = id, "no nearby place with that id");
        }
    }

    if let Some(path) = output.geojson {
        write_geojson(path, &map)?;
    }

    if output.json {
        println!("{}", serde_json::to_string_pretty(report)?);
        return Ok(());
    }

    println!("{}", render_results(report, &map));
    if let Some(popup) = output.focus.and_then(|id| render_focus(report, id)) {
        println!("\n{popup}");
    }
    Ok(())
}

fn write_geojson(path: &Path, map: &MapView) -> anyhow::Result<()> {
    let body = serde_json::to_string_pretty(&map.to_geojson())?;
    std::fs::write(path, body)?;
    tracing::info!(path = %path.display(), "wrote map GeoJSON");
    Ok(())
}

/// Runs the view controller as a prompt loop until `q` or end of input.
///
/// # Errors
///
/// Returns an error if the client cannot be built or the terminal cannot be
/// read or written. Failed checks are shown in the error view, not returned.
pub(crate) async fn run_interactive(
    config: &AppConfig,
    fixed: Option<Coordinates>,
) -> anyhow::Result<()> {
    let (locator, places) = build_collaborators(config, fixed)?;
    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    let mut state = ViewState::Home;

    loop {
        print!("{}", prompt_for(&state));
        std::io::stdout().flush()?;

        let Some(line) = lines.next_line().await? else {
            break;
        };
        if line.trim().eq_ignore_ascii_case("q") {
            break;
        }

        state = match state {
            ViewState::Home => {
                println!("{}", render_loading());
                let next = check_from_home(ViewState::Home, &locator, &places).await;
                match &next {
                    ViewState::Results(report) => {
                        let map = MapView::new(report.coords, &report.places);
                        println!("{}\n", render_results(report, &map));
                    }
                    ViewState::Error(message) => println!("{}\n", render_error(message)),
                    ViewState::Home | ViewState::Loading => {}
                }
                next
            }
            ViewState::Results(_) => transition(state, ViewEvent::CheckAgain),
            ViewState::Error(_) => transition(state, ViewEvent::Retry),
            ViewState::Loading => state,
        };
    }

    Ok(())
}

fn prompt_for(state: &ViewState) -> String {
    match state {
        ViewState::Results(_) => "Press Enter to check again (q to quit): ".to_string(),
        ViewState::Error(_) => "Press Enter to Try Again (q to quit): ".to_string(),
        ViewState::Home | ViewState::Loading => render_home(),
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;
    use wiremock::matchers::{method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    use super::*;
    use crate::geolocation::FixedLocation;

    fn client(server: &MockServer) -> PlacesClient {
        PlacesClient::with_base_url("test-key", "vibecheck-test/0.1", Some(5), &server.uri())
            .expect("client construction should not fail")
    }

    fn here() -> FixedLocation {
        FixedLocation(Coordinates::new(51.5074, -0.1278))
    }

    #[tokio::test]
    async fn check_reaches_results_for_nearby_places() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/places/search"))
            .and(query_param("ll", "51.5074,-0.1278"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "results": [
                    {
                        "fsq_place_id": "jazz",
                        "name": "Ronnie Scott's",
                        "categories": [{ "name": "Jazz Club" }],
                        "location": { "address": "47 Frith St", "locality": "London" },
                        "latitude": 51.513,
                        "longitude": -0.131
                    },
                    {
                        "fsq_place_id": "lib",
                        "name": "Westminster Reference Library",
                        "categories": [{ "name": "Public Library" }],
                        "location": { "locality": "London" },
                        "latitude": 51.51,
                        "longitude": -0.13
                    }
                ]
            })))
            .mount(&server)
            .await;

        let state = check_from_home(ViewState::Home, &here(), &client(&server)).await;

        let ViewState::Results(report) = state else {
            panic!("expected results, got {state:?}");
        };
        assert_eq!(report.places.len(), 2);
        assert_eq!(report.vibe.score, 6);
        assert_eq!(report.vibe.label, "Relaxed & Casual");
        assert_eq!(report.coords, Coordinates::new(51.5074, -0.1278));
    }

    #[tokio::test]
    async fn place_without_coordinates_counts_toward_vibe() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/places/search"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "results": [
                    {
                        "fsq_place_id": "venue",
                        "name": "Mercury Lounge",
                        "categories": [{ "name": "Music Venue" }]
                    },
                    {
                        "fsq_place_id": "bank",
                        "name": "First Savings",
                        "categories": [{ "name": "Bank" }],
                        "latitude": 51.51,
                        "longitude": -0.13
                    }
                ]
            })))
            .mount(&server)
            .await;

        let state = check_from_home(ViewState::Home, &here(), &client(&server)).await;

        let ViewState::Results(report) = state else {
            panic!("expected results, got {state:?}");
        };
        assert_eq!(report.places.len(), 2);
        assert_eq!(report.vibe.score, 6);
        assert_eq!(report.vibe.label, "Relaxed & Casual");
        let map = MapView::new(report.coords, &report.places);
        assert_eq!(map.place_markers().len(), 1);
    }

    #[tokio::test]
    async fn check_with_only_unusable_places_reaches_error() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/places/search"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "results": [{ "fsq_place_id": "x", "name": "Nowhere", "categories": [] }]
            })))
            .mount(&server)
            .await;

        let state = check_from_home(ViewState::Home, &here(), &client(&server)).await;

        assert_eq!(
            state,
            ViewState::Error("No places found nearby. The vibe is a mystery!".to_string())
        );
    }

    #[tokio::test]
    async fn check_with_service_failure_shows_status() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(
                ResponseTemplate::new(403).set_body_json(json!({ "message": "Quota exceeded" })),
            )
            .mount(&server)
            .await;

        let state = check_from_home(ViewState::Home, &here(), &client(&server)).await;

        let ViewState::Error(message) = state else {
            panic!("expected error view, got {state:?}");
        };
        assert_eq!(message, "Foursquare API error: 403 Forbidden. Quota exceeded");
    }

    #[tokio::test]
    async fn check_outside_home_does_not_search() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "results": [] })))
            .expect(0)
            .mount(&server)
            .await;

        let error = ViewState::Error("previous failure".to_string());
        let state = check_from_home(error.clone(), &here(), &client(&server)).await;

        assert_eq!(state, error);
    }

    #[test]
    fn prompts_follow_view() {
        assert!(prompt_for(&ViewState::Home).contains("Check My Vibe"));
        assert!(prompt_for(&ViewState::Error("x".to_string())).contains("Try Again"));
    }

    #[test]
    fn geojson_is_written_to_disk() {
        let dir = std::env::temp_dir().join(format!("vibecheck-map-{}", std::process::id()));
        std::fs::create_dir_all(&dir).unwrap();
        let path = dir.join("map.geojson");
        let map = MapView::new(Coordinates::new(1.0, 2.0), &[]);

        write_geojson(&path, &map).unwrap();

        let written: serde_json::Value =
            serde_json::from_str(&std::fs::read_to_string(&path).unwrap()).unwrap();
        assert_eq!(written["type"], "FeatureCollection");
        std::fs::remove_dir_all(&dir).unwrap();
    }
}
