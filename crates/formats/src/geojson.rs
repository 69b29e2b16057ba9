use foundation::bounds::{Aabb2, bounds_of_points};
use serde_json::{Map, Value};

#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Position {
    pub lon: f64,
    pub lat: f64,
}

impl Position {
    pub fn new(lon: f64, lat: f64) -> Self {
        Self { lon, lat }
    }
}

/// Geometry as carried by a source document.
///
/// The viewer core treats coordinates as opaque beyond bounds derivation:
/// they are decoded, framed against, and re-emitted on export, never edited.
#[derive(Debug, Clone, PartialEq)]
pub enum Geometry {
    Point(Position),
    MultiPoint(Vec<Position>),
    LineString(Vec<Position>),
    MultiLineString(Vec<Vec<Position>>),
    Polygon(Vec<Vec<Position>>),
    MultiPolygon(Vec<Vec<Vec<Position>>>),
}

impl Geometry {
    /// Minimal lon/lat box enclosing every position, `None` when the
    /// geometry carries no positions at all (empty multi-geometries).
    pub fn bounds(&self) -> Option<Aabb2> {
        match self {
            Geometry::Point(p) => Some(Aabb2::from_point([p.lon, p.lat])),
            Geometry::MultiPoint(ps) | Geometry::LineString(ps) => {
                bounds_of_points(ps.iter().map(|p| [p.lon, p.lat]))
            }
            Geometry::MultiLineString(lines) => {
                bounds_of_points(lines.iter().flatten().map(|p| [p.lon, p.lat]))
            }
            Geometry::Polygon(rings) => {
                bounds_of_points(rings.iter().flatten().map(|p| [p.lon, p.lat]))
            }
            Geometry::MultiPolygon(polys) => bounds_of_points(
                polys
                    .iter()
                    .flatten()
                    .flatten()
                    .map(|p| [p.lon, p.lat]),
            ),
        }
    }
}

/// One record of a source document: geometry plus its attribute map.
///
/// "Raw" because no presentation state is attached yet; the registry turns
/// these into styled features when a layer loads.
#[derive(Debug, Clone, PartialEq)]
pub struct RawFeature {
    pub id: Option<String>,
    pub properties: Map<String, Value>,
    pub geometry: Geometry,
}

#[derive(Debug, Clone, PartialEq)]
pub struct FeatureCollection {
    pub features: Vec<RawFeature>,
}

#[derive(Debug)]
pub enum DecodeError {
    MalformedJson(String),
    NotAFeatureCollection,
    InvalidFeature { index: usize, reason: String },
}

impl std::fmt::Display for DecodeError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DecodeError::MalformedJson(reason) => write!(f, "malformed JSON: {reason}"),
            DecodeError::NotAFeatureCollection => {
                write!(f, "expected GeoJSON FeatureCollection")
            }
            DecodeError::InvalidFeature { index, reason } => {
                write!(f, "invalid feature at index {index}: {reason}")
            }
        }
    }
}

impl std::error::Error for DecodeError {}

impl FeatureCollection {
    pub fn from_geojson_str(payload: &str) -> Result<Self, DecodeError> {
        let value: Value =
            serde_json::from_str(payload).map_err(|e| DecodeError::MalformedJson(e.to_string()))?;
        Self::from_geojson_value(&value)
    }

    pub fn from_geojson_value(value: &Value) -> Result<Self, DecodeError> {
        let obj = value.as_object().ok_or(DecodeError::NotAFeatureCollection)?;
        let ty = obj
            .get("type")
            .and_then(|v| v.as_str())
            .ok_or(DecodeError::NotAFeatureCollection)?;
        if ty != "FeatureCollection" {
            return Err(DecodeError::NotAFeatureCollection);
        }

        let features_val = obj
            .get("features")
            .and_then(|v| v.as_array())
            .ok_or(DecodeError::NotAFeatureCollection)?;

        let mut features = Vec::with_capacity(features_val.len());
        for (index, feat_val) in features_val.iter().enumerate() {
            features.push(decode_feature(index, feat_val)?);
        }

        Ok(Self { features })
    }

    /// Minimal box over every feature's positions, for initial view framing.
    pub fn bounds(&self) -> Option<Aabb2> {
        let mut out: Option<Aabb2> = None;
        for feature in &self.features {
            let Some(b) = feature.geometry.bounds() else {
                continue;
            };
            match &mut out {
                Some(acc) => acc.union_in_place(&b),
                None => out = Some(b),
            }
        }
        out
    }

    /// Semantic round-trip exporter: emits a GeoJSON FeatureCollection.
    /// (Property ordering may differ from the original input.)
    pub fn to_geojson_value(&self) -> Value {
        let mut root = Map::new();
        root.insert(
            "type".to_string(),
            Value::String("FeatureCollection".to_string()),
        );

        let mut features: Vec<Value> = Vec::with_capacity(self.features.len());
        for feat in &self.features {
            let mut fobj = Map::new();
            fobj.insert("type".to_string(), Value::String("Feature".to_string()));
            if let Some(id) = &feat.id {
                fobj.insert("id".to_string(), Value::String(id.clone()));
            }
            fobj.insert(
                "properties".to_string(),
                Value::Object(feat.properties.clone()),
            );
            fobj.insert("geometry".to_string(), geometry_to_geojson_value(&feat.geometry));
            features.push(Value::Object(fobj));
        }

        root.insert("features".to_string(), Value::Array(features));
        Value::Object(root)
    }

    pub fn to_geojson_string_pretty(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(&self.to_geojson_value())
    }
}

fn decode_feature(index: usize, value: &Value) -> Result<RawFeature, DecodeError> {
    let invalid = |reason: String| DecodeError::InvalidFeature { index, reason };

    let obj = value
        .as_object()
        .ok_or_else(|| invalid("feature must be an object".to_string()))?;

    let feat_type = obj
        .get("type")
        .and_then(|v| v.as_str())
        .ok_or_else(|| invalid("feature missing type".to_string()))?;
    if feat_type != "Feature" {
        return Err(invalid(format!("unexpected feature type: {feat_type}")));
    }

    let id = match obj.get("id") {
        Some(Value::String(s)) => Some(s.clone()),
        Some(Value::Number(n)) => Some(n.to_string()),
        _ => None,
    };

    let properties = match obj.get("properties") {
        None | Some(Value::Null) => Map::new(),
        Some(Value::Object(map)) => map.clone(),
        Some(_) => return Err(invalid("properties must be an object".to_string())),
    };

    let geometry_val = obj
        .get("geometry")
        .ok_or_else(|| invalid("feature missing geometry".to_string()))?;
    let geometry = parse_geometry(geometry_val).map_err(invalid)?;

    Ok(RawFeature {
        id,
        properties,
        geometry,
    })
}

fn geometry_to_geojson_value(geom: &Geometry) -> Value {
    let (ty, coordinates) = match geom {
        Geometry::Point(p) => ("Point", point_coords(p)),
        Geometry::MultiPoint(ps) => (
            "MultiPoint",
            Value::Array(ps.iter().map(point_coords).collect()),
        ),
        Geometry::LineString(ps) => (
            "LineString",
            Value::Array(ps.iter().map(point_coords).collect()),
        ),
        Geometry::MultiLineString(lines) => (
            "MultiLineString",
            Value::Array(lines.iter().map(|l| line_coords(l)).collect()),
        ),
        Geometry::Polygon(rings) => (
            "Polygon",
            Value::Array(rings.iter().map(|r| line_coords(r)).collect()),
        ),
        Geometry::MultiPolygon(polys) => (
            "MultiPolygon",
            Value::Array(
                polys
                    .iter()
                    .map(|poly| Value::Array(poly.iter().map(|l| line_coords(l)).collect()))
                    .collect(),
            ),
        ),
    };

    let mut obj = Map::new();
    obj.insert("type".to_string(), Value::String(ty.to_string()));
    obj.insert("coordinates".to_string(), coordinates);
    Value::Object(obj)
}

fn point_coords(p: &Position) -> Value {
    Value::Array(vec![Value::from(p.lon), Value::from(p.lat)])
}

fn line_coords(line: &[Position]) -> Value {
    Value::Array(line.iter().map(point_coords).collect())
}

fn parse_geometry(value: &Value) -> Result<Geometry, String> {
    let obj = value
        .as_object()
        .ok_or("geometry must be an object".to_string())?;
    let ty = obj
        .get("type")
        .and_then(|v| v.as_str())
        .ok_or("geometry missing type".to_string())?;

    let coords = obj
        .get("coordinates")
        .ok_or("geometry missing coordinates".to_string())?;

    match ty {
        "Point" => Ok(Geometry::Point(parse_position(coords)?)),
        "MultiPoint" => Ok(Geometry::MultiPoint(parse_positions(coords)?)),
        "LineString" => Ok(Geometry::LineString(parse_positions(coords)?)),
        "MultiLineString" => Ok(Geometry::MultiLineString(parse_lines(coords)?)),
        "Polygon" => Ok(Geometry::Polygon(parse_lines(coords)?)),
        "MultiPolygon" => Ok(Geometry::MultiPolygon(parse_polygons(coords)?)),
        other => Err(format!("unsupported geometry type: {other}")),
    }
}

fn parse_position(coords: &Value) -> Result<Position, String> {
    let arr = coords
        .as_array()
        .ok_or("position must be an array".to_string())?;
    if arr.len() < 2 {
        return Err("position must have [lon, lat]".to_string());
    }
    let lon = arr[0].as_f64().ok_or("lon must be a number".to_string())?;
    let lat = arr[1].as_f64().ok_or("lat must be a number".to_string())?;
    Ok(Position::new(lon, lat))
}

fn parse_positions(coords: &Value) -> Result<Vec<Position>, String> {
    let arr = coords
        .as_array()
        .ok_or("coordinates must be an array".to_string())?;
    let mut out = Vec::with_capacity(arr.len());
    for item in arr {
        out.push(parse_position(item)?);
    }
    Ok(out)
}

fn parse_lines(coords: &Value) -> Result<Vec<Vec<Position>>, String> {
    let arr = coords
        .as_array()
        .ok_or("coordinates must be an array of position arrays".to_string())?;
    let mut out = Vec::with_capacity(arr.len());
    for line in arr {
        out.push(parse_positions(line)?);
    }
    Ok(out)
}

fn parse_polygons(coords: &Value) -> Result<Vec<Vec<Vec<Position>>>, String> {
    let arr = coords
        .as_array()
        .ok_or("coordinates must be an array of polygons".to_string())?;
    let mut out = Vec::with_capacity(arr.len());
    for poly in arr {
        out.push(parse_lines(poly)?);
    }
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::{DecodeError, FeatureCollection, Geometry};
    use pretty_assertions::assert_eq;

    const PARCELS: &str = r#"{
        "type": "FeatureCollection",
        "features": [
            {
                "type": "Feature",
                "id": 7,
                "properties": {"NUM_LOTS": "100", "SUPERFICIE": 450.5},
                "geometry": {
                    "type": "Polygon",
                    "coordinates": [[[-4.01, 5.35], [-4.00, 5.35], [-4.00, 5.36], [-4.01, 5.36], [-4.01, 5.35]]]
                }
            },
            {
                "type": "Feature",
                "properties": {"NUM_LOTS": "101"},
                "geometry": {"type": "Point", "coordinates": [-4.005, 5.355]}
            }
        ]
    }"#;

    #[test]
    fn parses_parcels_document() {
        let collection = FeatureCollection::from_geojson_str(PARCELS).expect("parse collection");
        assert_eq!(collection.features.len(), 2);

        // Numeric id is normalized to its string form.
        assert_eq!(collection.features[0].id.as_deref(), Some("7"));
        assert_eq!(collection.features[1].id, None);
        assert!(matches!(
            collection.features[0].geometry,
            Geometry::Polygon(_)
        ));
    }

    #[test]
    fn rejects_non_collections_and_bad_features() {
        let err = FeatureCollection::from_geojson_str(r#"{"type": "Feature"}"#)
            .expect_err("not a collection");
        assert!(matches!(err, DecodeError::NotAFeatureCollection));

        let err = FeatureCollection::from_geojson_str(
            r#"{"type": "FeatureCollection", "features": [{"type": "Feature", "properties": {}, "geometry": {"type": "Blob", "coordinates": []}}]}"#,
        )
        .expect_err("unknown geometry type");
        assert!(matches!(err, DecodeError::InvalidFeature { index: 0, .. }));

        let err = FeatureCollection::from_geojson_str(
            r#"{"type": "FeatureCollection", "features": [{"type": "Feature", "properties": 4, "geometry": {"type": "Point", "coordinates": [0, 0]}}]}"#,
        )
        .expect_err("properties must be a map");
        assert!(matches!(err, DecodeError::InvalidFeature { index: 0, .. }));
    }

    #[test]
    fn derives_collection_bounds() {
        let collection = FeatureCollection::from_geojson_str(PARCELS).expect("parse collection");
        let bounds = collection.bounds().expect("bounds");
        assert_eq!(bounds.min, [-4.01, 5.35]);
        assert_eq!(bounds.max, [-4.0, 5.36]);
    }

    #[test]
    fn export_round_trips_geometry_and_properties() {
        let collection = FeatureCollection::from_geojson_str(PARCELS).expect("parse collection");
        let reparsed = FeatureCollection::from_geojson_value(&collection.to_geojson_value())
            .expect("reparse export");

        for (a, b) in collection.features.iter().zip(&reparsed.features) {
            assert_eq!(a.geometry, b.geometry);
            assert_eq!(a.properties, b.properties);
        }
    }
}
