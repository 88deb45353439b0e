//! Ingredient quantity scaling
//!
//! Quantities in the catalogue are free-form strings (`"150g"`, `"2 gousses"`,
//! `"1 pincée"`). Only gram-denominated quantities are scaled when a recipe is
//! adjusted to a different number of servings; everything else passes through
//! unchanged.

/// Scale a quantity string from `base_servings` to `servings`.
///
/// A quantity is gram-denominated when the whole string is a number followed
/// by a bare `g` suffix. The scaled amount is rounded to the nearest whole
/// gram, so `"150g"` at 6 servings becomes `"200g"` at 8.
pub fn scale_quantity(quantity: &str, base_servings: u32, servings: u32) -> String {
    match parse_grams(quantity) {
        Some(grams) => {
            let scaled = (grams / f64::from(base_servings) * f64::from(servings)).round();
            format!("{}g", scaled as i64)
        }
        None => quantity.to_string(),
    }
}

/// Parse a quantity of the exact form `<number>g`.
///
/// `"1kg"` and `"150 g"` are not gram-denominated by this rule; the stripped
/// prefix fails to parse as a number and the quantity is left alone.
fn parse_grams(quantity: &str) -> Option<f64> {
    let amount = quantity.strip_suffix('g')?;
    amount.parse::<f64>().ok().filter(|v| *v > 0.0)
}
