/// Average rating of a book's opinions.
///
/// A missing rating counts as 0.0 and the mean is rounded to one decimal
/// place, half away from zero. No opinions at all averages to 0.0, the same
/// value a set of null ratings produces, so callers cannot tell the two apart.
pub fn average_rate(rates: &[Option<f64>]) -> f64 {
    if rates.is_empty() {
        return 0.0;
    }

    let sum: f64 = rates.iter().map(|rate| rate.unwrap_or(0.0)).sum();
    round_to_one_decimal(sum / rates.len() as f64)
}

pub fn round_to_one_decimal(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}
