use crate::models::IndicatorSeries;

/// Calculate Relative Strength Index (RSI) aligned with the input closes
///
/// RSI measures the magnitude of recent price changes to evaluate
/// overbought or oversold conditions.
///
/// With `delta[i] = close[i + 1] - close[i]`, the value at `rsi[i + 1]` uses the
/// plain means of gains and losses over the `period` deltas ending at `delta[i]`,
/// for every `i >= period`. A zero average loss gives RSI 100.
///
/// Values:
/// - RSI > 70: Overbought
/// - RSI < 30: Oversold
///
pub fn calculate_rsi(closes: &[f64], period: usize) -> IndicatorSeries {
    let mut rsi = vec![None; closes.len()];
    if period == 0 || closes.len() < period + 1 {
        return rsi;
    }

    let deltas: Vec<f64> = closes.windows(2).map(|w| w[1] - w[0]).collect();

    for i in period..deltas.len() {
        let window = &deltas[i + 1 - period..=i];
        let avg_gain = window.iter().map(|&d| if d > 0.0 { d } else { 0.0 }).sum::<f64>()
            / period as f64;
        let avg_loss = window.iter().map(|&d| if d < 0.0 { -d } else { 0.0 }).sum::<f64>()
            / period as f64;

        rsi[i + 1] = Some(if avg_loss == 0.0 {
            100.0
        } else {
            let rs = avg_gain / avg_loss;
            100.0 - (100.0 / (1.0 + rs))
        });
    }

    rsi
}
