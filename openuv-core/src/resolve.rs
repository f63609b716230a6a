use chrono::{DateTime, Utc};
use tracing::{debug, info};

use crate::{
    error::{OpenUvError, Result},
    location::Geolocator,
    model::UvParams,
};

const LAT_RANGE: (f64, f64) = (-90.0, 90.0);
const LNG_RANGE: (f64, f64) = (-180.0, 180.0);
const ALT_RANGE: (f64, f64) = (0.0, 10_000.0);
const OZONE_RANGE: (f64, f64) = (100.0, 550.0);

/// Ordered `(name, value)` pairs ready for the query string. Absent fields are never present.
pub type QueryParams = Vec<(&'static str, String)>;

/// Parameter set with coordinates guaranteed to be present.
#[derive(Debug, Clone, PartialEq)]
pub struct ResolvedParams {
    pub lat: f64,
    pub lng: f64,
    pub alt: Option<f64>,
    pub ozone: Option<f64>,
    pub dt: Option<DateTime<Utc>>,
}

impl ResolvedParams {
    /// Query pairs in `lat, lng, alt, ozone, dt` order, skipping unset fields.
    pub fn query_params(&self) -> QueryParams {
        let mut out = vec![("lat", format_number(self.lat)), ("lng", format_number(self.lng))];

        if let Some(alt) = self.alt {
            out.push(("alt", format_number(alt)));
        }
        if let Some(ozone) = self.ozone {
            out.push(("ozone", format_number(ozone)));
        }
        if let Some(dt) = self.dt {
            out.push(("dt", format_datetime(dt)));
        }

        out
    }

    fn validate(&self) -> Result<()> {
        check_range("lat", self.lat, LAT_RANGE, "[-90, 90]")?;
        check_range("lng", self.lng, LNG_RANGE, "[-180, 180]")?;
        if let Some(alt) = self.alt {
            check_range("alt", alt, ALT_RANGE, "[0, 10000] meters")?;
        }
        if let Some(ozone) = self.ozone {
            check_range("ozone", ozone, OZONE_RANGE, "[100, 550] du")?;
        }
        Ok(())
    }
}

/// Turn caller options into a complete parameter set.
///
/// When either coordinate is missing the geolocator is asked for the current
/// position exactly once. In that case only the geolocated latitude, longitude
/// and altitude are used; caller-supplied `alt`, `ozone` and `dt` are dropped.
pub async fn resolve_params(
    options: Option<&UvParams>,
    geolocator: Option<&dyn Geolocator>,
) -> Result<ResolvedParams> {
    let opts = options.cloned().unwrap_or_default();

    if let (Some(lat), Some(lng)) = (opts.lat, opts.lng) {
        let resolved = ResolvedParams {
            lat,
            lng,
            alt: opts.alt,
            ozone: opts.ozone,
            dt: opts.dt,
        };
        resolved.validate()?;
        return Ok(resolved);
    }

    let geolocator = geolocator.ok_or_else(|| {
        OpenUvError::configuration("Geolocation is not available, provide lat and lng in parameters")
    })?;

    info!("lat/lng not supplied, falling back to geolocation");

    let pos = geolocator
        .current_position()
        .await
        .map_err(|e| OpenUvError::configuration(format!("Geolocation failed: {e}")))?;

    let lat = Some(pos.latitude).filter(|v| within(*v, LAT_RANGE));
    let lng = Some(pos.longitude).filter(|v| within(*v, LNG_RANGE));
    let (Some(lat), Some(lng)) = (lat, lng) else {
        return Err(OpenUvError::configuration("lat or lng not set"));
    };

    // Platform altitude is advisory: values the service would reject are dropped.
    let alt = pos.altitude.filter(|v| within(*v, ALT_RANGE));
    if alt.is_none() && pos.altitude.is_some() {
        debug!(altitude = ?pos.altitude, "ignoring geolocated altitude outside service range");
    }

    Ok(ResolvedParams {
        lat,
        lng,
        alt,
        ozone: None,
        dt: None,
    })
}

/// `from`/`to` pairs for the protection endpoint, placed ahead of the coordinates.
pub fn threshold_params(from: Option<f64>, to: Option<f64>) -> Result<QueryParams> {
    let mut out = QueryParams::new();

    for (name, value) in [("from", from), ("to", to)] {
        if let Some(v) = value {
            check_range(name, v, (0.0, f64::MAX), "[0, inf)")?;
            out.push((name, format_number(v)));
        }
    }

    Ok(out)
}

fn within(value: f64, (min, max): (f64, f64)) -> bool {
    value.is_finite() && (min..=max).contains(&value)
}

fn check_range(
    name: &'static str,
    value: f64,
    bounds: (f64, f64),
    range: &'static str,
) -> Result<()> {
    if within(value, bounds) {
        Ok(())
    } else {
        Err(OpenUvError::InvalidParameter {
            name,
            value: value.to_string(),
            range,
        })
    }
}

/// Shortest textual form: `10.0` becomes `10`, `2.5` stays `2.5`.
fn format_number(value: f64) -> String {
    value.to_string()
}

fn format_datetime(dt: DateTime<Utc>) -> String {
    dt.format("%Y-%m-%dT%H:%M:%S%.3fZ").to_string()
}
