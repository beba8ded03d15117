/// Static campaign context rendered into every strategy request.
#[derive(Debug, Clone, PartialEq)]
pub struct ShopProfile {
    pub shop_name: String,
    pub products: String,
    pub average_order_value: u32,
    pub daily_budget_min: u32,
    pub daily_budget_max: u32,
    pub goal: String,
}

impl Default for ShopProfile {
    fn default() -> Self {
        Self {
            shop_name: "爱上靓妞女童装".to_string(),
            products: "ASLN girls' spring collection (princess dresses, base layers)".to_string(),
            average_order_value: 180,
            daily_budget_min: 5_000,
            daily_budget_max: 10_000,
            goal: "maximize ROI and maximize sales".to_string(),
        }
    }
}
