use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Location and atmosphere parameters shared by every endpoint.
///
/// `lat`/`lng` may be left unset, in which case they are taken from the
/// configured [`Geolocator`](crate::location::Geolocator).
#[derive(Debug, Clone, Default, PartialEq)]
pub struct UvParams {
    /// latitude, from `-90.00` to `90.00`
    pub lat: Option<f64>,
    /// longitude, from `-180.00` to `180.00`
    pub lng: Option<f64>,
    /// altitude in meters, from `0` to `10000`. `0` by default on the service side.
    pub alt: Option<f64>,
    /// ozone in Dobson units, from `100` to `550`. Latest OMI value by default.
    pub ozone: Option<f64>,
    /// UTC datetime, now by default.
    pub dt: Option<DateTime<Utc>>,
}

impl UvParams {
    pub fn at(lat: f64, lng: f64) -> Self {
        Self {
            lat: Some(lat),
            lng: Some(lng),
            ..Self::default()
        }
    }

    pub fn with_altitude(mut self, alt: f64) -> Self {
        self.alt = Some(alt);
        self
    }

    pub fn with_ozone(mut self, ozone: f64) -> Self {
        self.ozone = Some(ozone);
        self
    }

    pub fn with_datetime(mut self, dt: DateTime<Utc>) -> Self {
        self.dt = Some(dt);
        self
    }
}

/// Parameters for the daily protection window lookup.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ProtectionParams {
    /// UV index "from" threshold. The service uses `3.5` when unset.
    pub from: Option<f64>,
    /// UV index "to" threshold. The service uses `3.5` when unset.
    pub to: Option<f64>,
    pub coords: UvParams,
}

impl ProtectionParams {
    pub fn new(coords: UvParams) -> Self {
        Self {
            coords,
            ..Self::default()
        }
    }

    pub fn with_range(mut self, from: f64, to: f64) -> Self {
        self.from = Some(from);
        self.to = Some(to);
        self
    }
}

/// Envelope of the real-time endpoint.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RealTimeUvResponse {
    pub result: UvSnapshot,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct UvSnapshot {
    /// UV index (real-time or forecasted depending on `dt`)
    pub uv: f64,
    pub uv_time: Option<DateTime<Utc>>,
    /// max UV index for the day (at solar noon)
    pub uv_max: f64,
    pub uv_max_time: Option<DateTime<Utc>>,
    /// ozone level in Dobson units, from OMI data or the request
    pub ozone: f64,
    /// latest OMI ozone update
    pub ozone_time: Option<DateTime<Utc>>,
    pub safe_exposure_time: SafeExposureTime,
    pub sun_info: SunInfo,
}

impl UvSnapshot {
    pub fn risk_level(&self) -> RiskLevel {
        RiskLevel::from_uv(self.uv)
    }

    pub fn max_risk_level(&self) -> RiskLevel {
        RiskLevel::from_uv(self.uv_max)
    }
}

/// Fitzpatrick skin types I to VI.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SkinType {
    I,
    II,
    III,
    IV,
    V,
    VI,
}

impl SkinType {
    pub const fn all() -> &'static [SkinType] {
        &[
            SkinType::I,
            SkinType::II,
            SkinType::III,
            SkinType::IV,
            SkinType::V,
            SkinType::VI,
        ]
    }

    pub fn number(&self) -> u8 {
        match self {
            SkinType::I => 1,
            SkinType::II => 2,
            SkinType::III => 3,
            SkinType::IV => 4,
            SkinType::V => 5,
            SkinType::VI => 6,
        }
    }
}

impl TryFrom<u8> for SkinType {
    type Error = u8;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        SkinType::all()
            .iter()
            .copied()
            .find(|st| st.number() == value)
            .ok_or(value)
    }
}

/// Minutes until burn per skin type. `None` when the UV index is too low to matter.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SafeExposureTime {
    pub st1: Option<f64>,
    pub st2: Option<f64>,
    pub st3: Option<f64>,
    pub st4: Option<f64>,
    pub st5: Option<f64>,
    pub st6: Option<f64>,
}

impl SafeExposureTime {
    pub fn for_skin_type(&self, skin: SkinType) -> Option<f64> {
        match skin {
            SkinType::I => self.st1,
            SkinType::II => self.st2,
            SkinType::III => self.st3,
            SkinType::IV => self.st4,
            SkinType::V => self.st5,
            SkinType::VI => self.st6,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SunInfo {
    pub sun_times: SunTimes,
    pub sun_position: SunPosition,
}

/// Solar events of the day, in chronological order. Absent near the poles.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct SunTimes {
    /// top edge of the sun appears on the horizon
    pub sunrise: Option<DateTime<Utc>>,
    /// bottom edge of the sun touches the horizon
    pub sunrise_end: Option<DateTime<Utc>>,
    pub golden_hour_end: Option<DateTime<Utc>>,
    pub solar_noon: Option<DateTime<Utc>>,
    pub golden_hour: Option<DateTime<Utc>>,
    pub sunset_start: Option<DateTime<Utc>>,
    pub sunset: Option<DateTime<Utc>>,
    /// evening nautical twilight starts
    pub dusk: Option<DateTime<Utc>>,
    pub nautical_dusk: Option<DateTime<Utc>>,
    pub night: Option<DateTime<Utc>>,
    /// darkest moment of the night
    pub nadir: Option<DateTime<Utc>>,
    pub night_end: Option<DateTime<Utc>>,
    pub nautical_dawn: Option<DateTime<Utc>>,
    pub dawn: Option<DateTime<Utc>>,
}

/// Sun angles in radians. Azimuth is measured from south to west.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SunPosition {
    pub azimuth: f64,
    pub altitude: f64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ForecastResponse {
    pub result: Vec<Forecast>,
}

impl ForecastResponse {
    /// Forecast point with the highest UV index.
    pub fn peak(&self) -> Option<&Forecast> {
        self.result.iter().max_by(|a, b| a.uv.total_cmp(&b.uv))
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Forecast {
    pub uv: f64,
    pub uv_time: Option<DateTime<Utc>>,
    pub azimuth: f64,
    pub altitude: f64,
}

impl Forecast {
    pub fn risk_level(&self) -> RiskLevel {
        RiskLevel::from_uv(self.uv)
    }
}

/// Not enveloped in `result`; times are `null` when no matching instant exists.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProtectionTimeResponse {
    pub from_time: Option<DateTime<Utc>>,
    pub from_uv: Option<f64>,
    pub to_time: Option<DateTime<Utc>>,
    pub to_uv: Option<f64>,
}

impl ProtectionTimeResponse {
    pub fn needs_protection(&self) -> bool {
        self.from_time.is_some() && self.to_time.is_some()
    }
}

/// WHO UV exposure category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum RiskLevel {
    Low,
    Moderate,
    High,
    VeryHigh,
    Extreme,
}

impl RiskLevel {
    pub fn from_uv(uv: f64) -> Self {
        if uv < 3.0 {
            RiskLevel::Low
        } else if uv < 6.0 {
            RiskLevel::Moderate
        } else if uv < 8.0 {
            RiskLevel::High
        } else if uv < 11.0 {
            RiskLevel::VeryHigh
        } else {
            RiskLevel::Extreme
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            RiskLevel::Low => "low",
            RiskLevel::Moderate => "moderate",
            RiskLevel::High => "high",
            RiskLevel::VeryHigh => "very high",
            RiskLevel::Extreme => "extreme",
        }
    }
}

impl std::fmt::Display for RiskLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
