use super::error::{Result, SplitError};

/// Parses a whitespace-separated list of prices. A blank line is an empty list.
pub fn parse_amounts(input: &str) -> Result<Vec<f64>> {
    input
        .split_whitespace()
        .map(|token| match token.parse::<f64>() {
            Ok(value) if value.is_finite() => Ok(value),
            _ => Err(SplitError::InputParse {
                token: token.to_string(),
                input: input.trim().to_string(),
            }),
        })
        .collect()
}

pub fn sum_amounts(amounts: &[f64]) -> f64 {
    amounts.iter().sum()
}
