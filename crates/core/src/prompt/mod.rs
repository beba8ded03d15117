pub mod feedback;
pub mod schema;
pub mod strategy;

pub use feedback::build_refine_prompt;
pub use strategy::build_strategy_prompt;

/// Rounds to a whole number and groups thousands: `1234567.6` -> `1,234,568`.
pub fn group_thousands(v: f64) -> String {
    let rounded = v.round();
    let digits = format!("{:.0}", rounded.abs());
    let mut out = String::with_capacity(digits.len() + digits.len() / 3 + 1);
    for (i, c) in digits.chars().enumerate() {
        if i != 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(c);
    }
    if rounded < 0.0 {
        out.insert(0, '-');
    }
    out
}
