use chrono::{DateTime, Utc};
use openuv_core::{ForecastResponse, ProtectionTimeResponse, RealTimeUvResponse, SkinType};
use serde_json::Value;
use std::fmt::Write;

/// Pretty-printed body, without going through the typed model.
pub fn json(value: &Value) -> anyhow::Result<String> {
    Ok(serde_json::to_string_pretty(value)?)
}

fn time(t: Option<DateTime<Utc>>) -> String {
    t.map(|t| t.format("%Y-%m-%d %H:%M UTC").to_string())
        .unwrap_or_else(|| "-".to_string())
}

pub fn real_time(res: &RealTimeUvResponse) -> String {
    let r = &res.result;
    let mut out = String::new();

    let _ = writeln!(out, "UV index:   {:.1} ({}) at {}", r.uv, r.risk_level(), time(r.uv_time));
    let _ = writeln!(
        out,
        "Max today:  {:.1} ({}) at {}",
        r.uv_max,
        r.max_risk_level(),
        time(r.uv_max_time)
    );
    let _ = writeln!(out, "Ozone:      {:.1} du", r.ozone);
    let _ = writeln!(
        out,
        "Sunrise:    {}   Sunset: {}",
        time(r.sun_info.sun_times.sunrise),
        time(r.sun_info.sun_times.sunset)
    );

    let _ = writeln!(out, "Safe exposure (minutes):");
    for st in SkinType::all() {
        let minutes = r
            .safe_exposure_time
            .for_skin_type(*st)
            .map(|m| format!("{m:.0}"))
            .unwrap_or_else(|| "unlimited".to_string());
        let _ = writeln!(out, "  skin type {}: {}", st.number(), minutes);
    }

    out
}

pub fn forecast(res: &ForecastResponse) -> String {
    if res.result.is_empty() {
        return "No forecast data.\n".to_string();
    }

    let mut out = String::new();
    for point in &res.result {
        let _ = writeln!(
            out,
            "{}  {:>5.1}  {}",
            time(point.uv_time),
            point.uv,
            point.risk_level()
        );
    }
    if let Some(peak) = res.peak() {
        let _ = writeln!(out, "Peak: {:.1} at {}", peak.uv, time(peak.uv_time));
    }
    out
}

pub fn protection(res: &ProtectionTimeResponse) -> String {
    if !res.needs_protection() {
        return "No sun protection needed today.\n".to_string();
    }

    format!(
        "Protect yourself from {} to {}\n",
        time(res.from_time),
        time(res.to_time)
    )
}
