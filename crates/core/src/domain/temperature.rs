/// Temperature interval and the return-on-spend multiplier observed for it.
///
/// The table is descriptive context for the prompt; nothing in the crate
/// computes it from data.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TemperatureBand {
    pub label: &'static str,
    pub multiplier: f64,
}

const fn band(label: &'static str, multiplier: f64) -> TemperatureBand {
    TemperatureBand { label, multiplier }
}

pub const TEMPERATURE_BANDS: [TemperatureBand; 8] = [
    band("<= 0°C", 0.5),
    band("0-5°C", 0.65),
    band("5-10°C", 0.8),
    band("10-13°C", 1.0),
    band("13-16°C", 1.2),
    band("16-18°C", 1.3),
    band("18-23°C", 1.2),
    band("> 23°C", 1.0),
];
