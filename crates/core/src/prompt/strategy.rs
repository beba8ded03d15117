use crate::domain::shop::ShopProfile;
use crate::domain::summary::PerformanceSummary;
use crate::domain::temperature::TEMPERATURE_BANDS;
use crate::prompt::group_thousands;
use crate::prompt::schema::output_schema;

pub const DEFAULT_REQUIREMENT: &str = "No special requirement; give the overall best strategy.";

/// Renders the first-round strategy request.
pub fn build_strategy_prompt(
    summary: &PerformanceSummary,
    shop: &ShopProfile,
    requirement: Option<&str>,
) -> String {
    let requirement = requirement
        .filter(|s| !s.trim().is_empty())
        .unwrap_or(DEFAULT_REQUIREMENT);

    let top = serde_json::to_string_pretty(&summary.top_cities).unwrap_or_default();

    let mut lines = vec![
        "You are a Taobao ad-placement expert. Analyse the data below and recommend a placement strategy.".to_string(),
        String::new(),
        "## Shop".to_string(),
        format!("- Shop: {}", shop.shop_name),
        format!("- Products: {}", shop.products),
        format!("- Average order value: ¥{}", shop.average_order_value),
        format!("- Budget: ¥{}-{} per day", shop.daily_budget_min, shop.daily_budget_max),
        format!("- Goal: {}", shop.goal),
        String::new(),
        "## Data overview".to_string(),
        format!("- Cities covered: {}", summary.city_count),
        format!("- Total impressions: {}", group_thousands(summary.total_impressions)),
        format!("- Total spend: ¥{}", group_thousands(summary.total_spend)),
        format!("- Total revenue: ¥{}", group_thousands(summary.total_revenue)),
        format!("- Mean ROI: {:.2}", summary.mean_roi),
        String::new(),
        format!("## Top {} cities by ROI", summary.top_cities.len()),
        top,
        String::new(),
    ];

    if !summary.temperature_buckets.is_empty() {
        lines.push("## Mean temperature by time of day".to_string());
        lines.push("| Time bucket | Mean | Min | Max |".to_string());
        lines.push("|-------------|------|-----|-----|".to_string());
        lines.extend(
            summary
                .temperature_buckets
                .iter()
                .map(|b| format!("| {} | {} | {} | {} |", b.bucket, b.mean, b.min, b.max)),
        );
        lines.push(String::new());
    }

    lines.push("## Temperature vs. conversion".to_string());
    lines.push("| Temperature | ROI multiplier |".to_string());
    lines.push("|-------------|----------------|".to_string());
    lines.extend(
        TEMPERATURE_BANDS
            .iter()
            .map(|band| format!("| {} | x{} |", band.label, band.multiplier)),
    );

    lines.extend([
        String::new(),
        "## Requirement".to_string(),
        requirement.to_string(),
        String::new(),
        "Provide:".to_string(),
        "1. A detailed placement strategy".to_string(),
        "2. Priority cities and their budget split".to_string(),
        "3. A phased placement schedule".to_string(),
        "4. Risks and optimisation advice".to_string(),
        String::new(),
        output_schema("strategy name"),
        String::new(),
    ]);

    lines.join("\n")
}
