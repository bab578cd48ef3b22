use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinate {
    pub lat: f64,
    pub lon: f64,
}

impl Coordinate {
    pub fn new(lat: f64, lon: f64) -> Self {
        Self { lat, lon }
    }

    pub fn is_valid(self) -> bool {
        self.lat.is_finite()
            && self.lon.is_finite()
            && (-90.0..=90.0).contains(&self.lat)
            && (-180.0..=180.0).contains(&self.lon)
    }
}

/// Default/min/max triple for one walk setting.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SettingRange<T> {
    pub default: T,
    pub min: T,
    pub max: T,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub step: Option<T>,
}

impl<T: PartialOrd + Copy> SettingRange<T> {
    pub fn clamp(&self, value: T) -> T {
        if value < self.min {
            self.min
        } else if value > self.max {
            self.max
        } else {
            value
        }
    }

    pub fn is_consistent(&self) -> bool {
        self.min <= self.default && self.default <= self.max
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WalkSettings {
    pub duration: SettingRange<u32>,
    pub radius: SettingRange<f64>,
    pub places_count: SettingRange<u32>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MapSettings {
    /// `[lat, lon]`, the order the config file uses.
    pub default_center: [f64; 2],
    pub default_zoom: u8,
    pub tile_layer: String,
    pub attribution: String,
}

impl MapSettings {
    pub fn center(&self) -> Coordinate {
        Coordinate::new(self.default_center[0], self.default_center[1])
    }
}

/// Public configuration published by `GET /api/config`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AppConfig {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub app_name: Option<String>,
    pub privacy_policy_url: String,
    pub walk_settings: WalkSettings,
    pub map: MapSettings,
}

/// Profile collected screen by screen. Every field starts unset and is
/// filled in as the user advances.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct UserProfile {
    pub name: String,
    pub age: Option<u32>,
    pub interests: String,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    pub duration: Option<u32>,
    pub radius: Option<f64>,
    pub places_count: Option<u32>,
    pub return_to_start: bool,
}

impl UserProfile {
    pub fn with_defaults(settings: &WalkSettings) -> Self {
        Self {
            duration: Some(settings.duration.default),
            radius: Some(settings.radius.default),
            places_count: Some(settings.places_count.default),
            ..Self::default()
        }
    }

    pub fn location(&self) -> Option<Coordinate> {
        Some(Coordinate::new(self.latitude?, self.longitude?))
    }

    pub fn set_location(&mut self, location: Option<Coordinate>) {
        self.latitude = location.map(|c| c.lat);
        self.longitude = location.map(|c| c.lon);
    }

    /// Builds the request body, failing on the first field that is still unset.
    pub fn to_request(&self) -> Result<RouteRequest, MissingField> {
        let name = self.name.trim();
        if name.is_empty() {
            return Err(MissingField::Name);
        }
        let interests = self.interests.trim();
        if interests.is_empty() {
            return Err(MissingField::Interests);
        }
        let location = self.location().ok_or(MissingField::Location)?;

        Ok(RouteRequest {
            name: name.to_string(),
            age: self.age.ok_or(MissingField::Age)?,
            interests: interests.to_string(),
            latitude: location.lat,
            longitude: location.lon,
            duration: self.duration.ok_or(MissingField::Duration)?,
            radius: self.radius.ok_or(MissingField::Radius)?,
            places_count: self.places_count.ok_or(MissingField::PlacesCount)?,
            return_to_start: self.return_to_start,
        })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MissingField {
    Name,
    Age,
    Interests,
    Location,
    Duration,
    Radius,
    PlacesCount,
}

impl MissingField {
    pub fn label(self) -> &'static str {
        match self {
            Self::Name => "name",
            Self::Age => "age",
            Self::Interests => "interests",
            Self::Location => "location",
            Self::Duration => "duration",
            Self::Radius => "radius",
            Self::PlacesCount => "places count",
        }
    }
}

/// Body of `POST /api/generate-route`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RouteRequest {
    pub name: String,
    pub age: u32,
    pub interests: String,
    pub latitude: f64,
    pub longitude: f64,
    pub duration: u32,
    pub radius: f64,
    pub places_count: u32,
    #[serde(default)]
    pub return_to_start: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Place {
    pub name: String,
    #[serde(default)]
    pub address: String,
    pub lat: f64,
    pub lon: f64,
    #[serde(default)]
    pub ai_reason: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub distance_from_user: Option<f64>,
}

impl Place {
    pub fn coordinate(&self) -> Coordinate {
        Coordinate::new(self.lat, self.lon)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RouteResult {
    pub route: Vec<Place>,
    pub user_location: Coordinate,
    pub total_distance_km: f64,
    pub estimated_time_hours: f64,
}

impl RouteResult {
    /// Bounding box of the places only; the user location is not included.
    pub fn bounds(&self) -> Option<RouteBounds> {
        RouteBounds::from_points(self.route.iter().map(Place::coordinate))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RouteBounds {
    pub min_lat: f64,
    pub max_lat: f64,
    pub min_lon: f64,
    pub max_lon: f64,
}

impl RouteBounds {
    pub fn from_points(points: impl IntoIterator<Item = Coordinate>) -> Option<Self> {
        points.into_iter().fold(None, |acc, point| {
            Some(match acc {
                None => RouteBounds {
                    min_lat: point.lat,
                    max_lat: point.lat,
                    min_lon: point.lon,
                    max_lon: point.lon,
                },
                Some(b) => RouteBounds {
                    min_lat: b.min_lat.min(point.lat),
                    max_lat: b.max_lat.max(point.lat),
                    min_lon: b.min_lon.min(point.lon),
                    max_lon: b.max_lon.max(point.lon),
                },
            })
        })
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ApiError {
    pub error: String,
}
