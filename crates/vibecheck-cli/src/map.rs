//! Map model for a results view: a user marker, one marker per positioned
//! place, clustering, bounds, and focus/selection. Exported as GeoJSON or as an
//! OpenStreetMap link.

use serde::Serialize;
use serde_json::{json, Value};
use vibecheck_core::{Coordinates, Place};

pub(crate) const DEFAULT_ZOOM: u8 = 13;
pub(crate) const DEFAULT_CLUSTER_CELL_DEGREES: f64 = 0.005;

const USER_MARKER_ID: &str = "user";
const USER_POPUP: &str = "Your Location";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub(crate) enum MarkerKind {
    User,
    Place,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub(crate) struct Marker {
    pub id: String,
    pub popup: String,
    pub latitude: f64,
    pub longitude: f64,
    pub kind: MarkerKind,
}

/// Bounding box in degrees.
#[derive(Debug, Clone, Copy, PartialEq)]
pub(crate) struct Bounds {
    pub south: f64,
    pub west: f64,
    pub north: f64,
    pub east: f64,
}

impl Bounds {
    fn around(point: Coordinates) -> Self {
        Self {
            south: point.latitude,
            west: point.longitude,
            north: point.latitude,
            east: point.longitude,
        }
    }

    fn extend(&mut self, lat: f64, lon: f64) {
        self.south = self.south.min(lat);
        self.north = self.north.max(lat);
        self.west = self.west.min(lon);
        self.east = self.east.max(lon);
    }
}

/// Place markers sharing a grid cell, drawn as one marker at their centroid.
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct Cluster {
    pub latitude: f64,
    pub longitude: f64,
    pub place_ids: Vec<String>,
}

#[derive(Debug, Clone)]
pub(crate) struct MapView {
    user: Marker,
    places: Vec<Marker>,
    selected: Option<String>,
}

impl MapView {
    pub(crate) fn new(center: Coordinates, places: &[Place]) -> Self {
        let user = Marker {
            id: USER_MARKER_ID.to_string(),
            popup: USER_POPUP.to_string(),
            latitude: center.latitude,
            longitude: center.longitude,
            kind: MarkerKind::User,
        };
        // Places without a position are listed but not mapped.
        let places = places
            .iter()
            .filter_map(|p| {
                let at = p.coordinates()?;
                Some(Marker {
                    id: p.id.clone(),
                    popup: p.name.clone(),
                    latitude: at.latitude,
                    longitude: at.longitude,
                    kind: MarkerKind::Place,
                })
            })
            .collect();
        Self {
            user,
            places,
            selected: None,
        }
    }

    pub(crate) fn center(&self) -> Coordinates {
        Coordinates::new(self.user.latitude, self.user.longitude)
    }

    pub(crate) fn place_markers(&self) -> &[Marker] {
        &self.places
    }

    /// Smallest box containing the user and every place.
    pub(crate) fn bounds(&self) -> Bounds {
        let mut bounds = Bounds::around(self.center());
        for m in &self.places {
            bounds.extend(m.latitude, m.longitude);
        }
        bounds
    }

    /// Groups place markers by a square grid of `cell_degrees`, in first-seen
    /// order. A non-positive cell size puts every place in its own cluster.
    pub(crate) fn clusters(&self, cell_degrees: f64) -> Vec<Cluster> {
        if cell_degrees <= 0.0 || !cell_degrees.is_finite() {
            return self
                .places
                .iter()
                .map(|m| Cluster {
                    latitude: m.latitude,
                    longitude: m.longitude,
                    place_ids: vec![m.id.clone()],
                })
                .collect();
        }

        let mut cells: Vec<((i64, i64), Vec<&Marker>)> = Vec::new();
        for m in &self.places {
            let key = cell_key(m.latitude, m.longitude, cell_degrees);
            match cells.iter_mut().find(|(k, _)| *k == key) {
                Some((_, members)) => members.push(m),
                None => cells.push((key, vec![m])),
            }
        }

        cells
            .into_iter()
            .map(|(_, members)| {
                #[allow(clippy::cast_precision_loss)]
                let n = members.len() as f64;
                Cluster {
                    latitude: members.iter().map(|m| m.latitude).sum::<f64>() / n,
                    longitude: members.iter().map(|m| m.longitude).sum::<f64>() / n,
                    place_ids: members.iter().map(|m| m.id.clone()).collect(),
                }
            })
            .collect()
    }

    /// The marker to centre on with its popup open, if `place_id` is on the map.
    pub(crate) fn focus(&self, place_id: &str) -> Option<&Marker> {
        self.places.iter().find(|m| m.id == place_id)
    }

    /// Selects `place_id`, or clears the selection if it is already selected.
    /// Unknown ids leave the selection unchanged. Returns the new selection.
    pub(crate) fn toggle_selection(&mut self, place_id: &str) -> Option<&Marker> {
        if self.focus(place_id).is_none() {
            return self.selected();
        }
        if self.selected.as_deref() == Some(place_id) {
            self.selected = None;
        } else {
            self.selected = Some(place_id.to_string());
        }
        self.selected()
    }

    pub(crate) fn selected(&self) -> Option<&Marker> {
        self.selected.as_deref().and_then(|id| self.focus(id))
    }

    /// OpenStreetMap link centred on the selection, or on the user.
    pub(crate) fn tile_url(&self, zoom: u8) -> String {
        let target = self.selected().unwrap_or(&self.user);
        format!(
            "https://www.openstreetmap.org/?mlat={lat}&mlon={lon}#map={zoom}/{lat}/{lon}",
            lat = target.latitude,
            lon = target.longitude,
        )
    }

    /// `FeatureCollection` with one point per marker. Coordinates are `[lon, lat]`.
    pub(crate) fn to_geojson(&self) -> Value {
        let bounds = self.bounds();
        let features: Vec<Value> = std::iter::once(&self.user)
            .chain(&self.places)
            .map(|m| {
                json!({
                    "type": "Feature",
                    "id": m.id,
                    "geometry": {
                        "type": "Point",
                        "coordinates": [m.longitude, m.latitude]
                    },
                    "properties": {
                        "kind": m.kind,
                        "popup": m.popup,
                        "selected": self.selected.as_deref() == Some(m.id.as_str())
                    }
                })
            })
            .collect();

        json!({
            "type": "FeatureCollection",
            "bbox": [bounds.west, bounds.south, bounds.east, bounds.north],
            "features": features
        })
    }
}

#[allow(clippy::cast_possible_truncation)]
fn cell_key(lat: f64, lon: f64, cell_degrees: f64) -> (i64, i64) {
    (
        (lat / cell_degrees).floor() as i64,
        (lon / cell_degrees).floor() as i64,
    )
}
