use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Point order used by the backend's geographic storage: `[longitude, latitude]`.
pub type Position = [f64; 2];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub enum GeometryType {
    Polygon,
}

/// Wire-form geofence polygon in the GeoJSON convention. Only the outer
/// ring (index 0) is ever populated by this system.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct GeoPolygon {
    #[serde(rename = "type")]
    pub geometry_type: GeometryType,
    pub coordinates: Vec<Vec<Position>>,
}

impl GeoPolygon {
    pub fn new(outer_ring: Vec<Position>) -> Self {
        Self {
            geometry_type: GeometryType::Polygon,
            coordinates: vec![outer_ring],
        }
    }

    pub fn outer_ring(&self) -> &[Position] {
        self.coordinates
            .first()
            .map(|ring| ring.as_slice())
            .unwrap_or_default()
    }

    /// Whether the outer ring is closed and covers at least 3 distinct
    /// points. The conversion operations accept incomplete shapes while a
    /// user is mid-draw; checking this before persisting is the caller's
    /// job.
    pub fn has_valid_area(&self) -> bool {
        let ring = self.outer_ring();
        match (ring.first(), ring.last()) {
            (Some(first), Some(last)) if first == last => {
                let mut distinct = ring[..ring.len() - 1].to_vec();
                distinct.sort_by(|a, b| {
                    a.partial_cmp(b).unwrap_or(std::cmp::Ordering::Equal)
                });
                distinct.dedup();
                distinct.len() >= 3
            }
            _ => false,
        }
    }
}

/// Display-form point in the map surface's `(latitude, longitude)` order.
/// On the wire this doubles as the backend's `{"lat": .., "lng": ..}`
/// location object.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct MapPoint {
    #[serde(rename = "lat")]
    pub latitude: f64,
    #[serde(rename = "lng")]
    pub longitude: f64,
}

impl MapPoint {
    pub fn new(latitude: f64, longitude: f64) -> Self {
        Self {
            latitude,
            longitude,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MapMode {
    ReadOnly,
    Edit,
}

/// Pixel padding around fitted bounds, clockwise from the top.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, JsonSchema)]
pub struct Padding {
    pub top: u32,
    pub right: u32,
    pub bottom: u32,
    pub left: u32,
}

impl MapMode {
    /// Edit mode reserves extra headroom for the drawing-tool controls.
    pub fn padding(self) -> Padding {
        match self {
            MapMode::ReadOnly => Padding {
                top: 50,
                right: 50,
                bottom: 50,
                left: 50,
            },
            MapMode::Edit => Padding {
                top: 100,
                right: 60,
                bottom: 60,
                left: 60,
            },
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct LatLngBounds {
    pub min_latitude: f64,
    pub max_latitude: f64,
    pub min_longitude: f64,
    pub max_longitude: f64,
}

/// Rectangular map region a consumer should scroll/zoom to.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, JsonSchema)]
pub struct Viewport {
    pub bounds: LatLngBounds,
    pub padding: Padding,
}

/// Converts a wire-form polygon to display point order. An absent polygon
/// or an empty outer ring yields an empty sequence; nothing is rejected
/// here, an undersized result is simply not renderable.
pub fn to_display(area: Option<&GeoPolygon>) -> Vec<MapPoint> {
    area.map(|polygon| polygon.outer_ring())
        .unwrap_or_default()
        .iter()
        .map(|&[longitude, latitude]| MapPoint {
            latitude,
            longitude,
        })
        .collect()
}

/// Converts drawn display points back to the wire form, closing the outer
/// ring when the sequence does not already end on its first point. Empty
/// input stays an empty ring.
pub fn from_display(points: &[MapPoint]) -> GeoPolygon {
    let mut ring = points
        .iter()
        .map(|point| [point.longitude, point.latitude])
        .collect::<Vec<_>>();
    if let (Some(&first), Some(&last)) = (ring.first(), ring.last()) {
        if first != last {
            ring.push(first);
        }
    }
    GeoPolygon::new(ring)
}

/// Minimal enclosing latitude/longitude rectangle of the polygon plus
/// mode-dependent padding. `None` when there is nothing to fit, leaving the
/// caller on its current (default) view.
pub fn fit_viewport(area: Option<&GeoPolygon>, mode: MapMode) -> Option<Viewport> {
    let points = to_display(area);
    let first = *points.first()?;
    let mut bounds = LatLngBounds {
        min_latitude: first.latitude,
        max_latitude: first.latitude,
        min_longitude: first.longitude,
        max_longitude: first.longitude,
    };
    for point in &points[1..] {
        bounds.min_latitude = bounds.min_latitude.min(point.latitude);
        bounds.max_latitude = bounds.max_latitude.max(point.latitude);
        bounds.min_longitude = bounds.min_longitude.min(point.longitude);
        bounds.max_longitude = bounds.max_longitude.max(point.longitude);
    }
    Some(Viewport {
        bounds,
        padding: mode.padding(),
    })
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    fn triangle() -> Vec<MapPoint> {
        vec![
            MapPoint::new(-17.79, -63.19),
            MapPoint::new(-17.79, -63.18),
            MapPoint::new(-17.78, -63.18),
        ]
    }

    #[test]
    fn round_trip_restores_axis_order() {
        let drawn = triangle();
        let wire = from_display(&drawn);
        let display = to_display(Some(&wire));
        assert_eq!(&display[..drawn.len()], drawn.as_slice());
    }

    #[test]
    fn open_ring_is_closed() {
        let wire = from_display(&triangle());
        let ring = wire.outer_ring();
        assert_eq!(ring.len(), 4);
        assert_eq!(ring.first(), ring.last());
        assert_eq!(ring[0], [-63.19, -17.79]);
    }

    #[test]
    fn closing_is_idempotent() {
        let once = from_display(&triangle());
        let twice = from_display(&to_display(Some(&once)));
        assert_eq!(once, twice);
    }

    #[test]
    fn closed_input_is_unchanged() {
        let mut drawn = triangle();
        drawn.push(drawn[0]);
        let wire = from_display(&drawn);
        assert_eq!(wire.outer_ring().len(), drawn.len());
    }

    #[test]
    fn degenerate_input_yields_empty_output() {
        assert!(to_display(None).is_empty());
        let no_rings = GeoPolygon {
            geometry_type: GeometryType::Polygon,
            coordinates: vec![],
        };
        assert!(to_display(Some(&no_rings)).is_empty());
        assert!(from_display(&[]).outer_ring().is_empty());
        assert!(fit_viewport(None, MapMode::ReadOnly).is_none());
        assert!(fit_viewport(Some(&no_rings), MapMode::Edit).is_none());
    }

    #[test]
    fn viewport_encloses_the_polygon() {
        let wire = GeoPolygon::new(vec![
            [-63.19, -17.79],
            [-63.18, -17.79],
            [-63.18, -17.78],
            [-63.19, -17.78],
            [-63.19, -17.79],
        ]);
        let viewport = fit_viewport(Some(&wire), MapMode::ReadOnly).unwrap();
        assert_eq!(viewport.bounds.min_latitude, -17.79);
        assert_eq!(viewport.bounds.max_latitude, -17.78);
        assert_eq!(viewport.bounds.min_longitude, -63.19);
        assert_eq!(viewport.bounds.max_longitude, -63.18);
        assert_eq!(
            viewport.padding,
            Padding {
                top: 50,
                right: 50,
                bottom: 50,
                left: 50
            }
        );
    }

    #[test]
    fn edit_mode_reserves_headroom() {
        let wire = from_display(&triangle());
        let read_only = fit_viewport(Some(&wire), MapMode::ReadOnly).unwrap();
        let edit = fit_viewport(Some(&wire), MapMode::Edit).unwrap();
        assert_eq!(edit.bounds, read_only.bounds);
        assert_eq!(
            edit.padding,
            Padding {
                top: 100,
                right: 60,
                bottom: 60,
                left: 60
            }
        );
        assert!(edit.padding.top > read_only.padding.top);
    }

    #[test]
    fn wire_format_matches_the_backend() {
        let wire = from_display(&triangle());
        let value = serde_json::to_value(&wire).unwrap();
        assert_eq!(
            value,
            json!({
                "type": "Polygon",
                "coordinates": [[
                    [-63.19, -17.79],
                    [-63.18, -17.79],
                    [-63.18, -17.78],
                    [-63.19, -17.79],
                ]],
            })
        );
        let decoded: GeoPolygon = serde_json::from_value(value).unwrap();
        assert_eq!(decoded, wire);
    }

    #[test]
    fn area_validity_requires_three_distinct_points() {
        assert!(from_display(&triangle()).has_valid_area());
        assert!(!from_display(&[]).has_valid_area());
        assert!(!from_display(&triangle()[..2]).has_valid_area());
        let degenerate = vec![
            MapPoint::new(-17.79, -63.19),
            MapPoint::new(-17.79, -63.19),
            MapPoint::new(-17.78, -63.18),
        ];
        assert!(!from_display(&degenerate).has_valid_area());
    }
}
