/// System role instruction sent with every request.
pub const SYSTEM_PROMPT: &str = "You are a Taobao paid-traffic strategist specialising in data analysis and ROI optimisation.";

/// The fixed output contract requested from the strategy service.
///
/// Nothing in the crate parses the reply against it; it only shapes the request.
pub fn output_schema(strategy_name_hint: &str) -> String {
    let name_line = format!("  \"strategy_name\": \"{strategy_name_hint}\",");
    [
        "Reply in JSON with exactly these fields:",
        "{",
        name_line.as_str(),
        "  \"target_cities\": [\"city 1\", \"city 2\", ...],",
        "  \"budget_allocation\": {\"city\": daily budget},",
        "  \"time_schedule\": {\"phase\": \"tactics\"},",
        "  \"expected_roi\": expected ROI,",
        "  \"expected_sales\": expected sales,",
        "  \"risks\": [\"risk 1\", \"risk 2\"],",
        "  \"optimization_tips\": [\"tip 1\", \"tip 2\"]",
        "}",
    ]
    .join("\n")
}
