use crate::domain::errors::PredictionError;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Directional label derived from predicted vs. current price.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Signal {
    Up,
    Down,
}

impl fmt::Display for Signal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Signal::Up => write!(f, "UP"),
            Signal::Down => write!(f, "DOWN"),
        }
    }
}

/// Discrete recommended action derived from percent change.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Advice {
    Buy,
    Sell,
    Hold,
}

impl fmt::Display for Advice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Advice::Buy => write!(f, "BUY"),
            Advice::Sell => write!(f, "SELL"),
            Advice::Hold => write!(f, "HOLD"),
        }
    }
}

/// Percent-change thresholds for the BUY/SELL bands. Strictly greater
/// than `buy_pct` recommends BUY, strictly less than `sell_pct`
/// recommends SELL, the band between is HOLD.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AdvisoryThresholds {
    pub buy_pct: f64,
    pub sell_pct: f64,
}

impl Default for AdvisoryThresholds {
    fn default() -> Self {
        Self {
            buy_pct: 2.0,
            sell_pct: -2.0,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Advisory {
    pub change: f64,
    pub percent: f64,
    pub signal: Signal,
    pub advice: Advice,
}

/// Derives change, percent change, signal and advice from one predicted
/// and one current price. Pure and deterministic.
///
/// Zero change classifies as DOWN. That tie-break is observable
/// behavior callers depend on; do not flip it without a product
/// decision.
pub fn advise(
    predicted_price: f64,
    current_price: f64,
    thresholds: &AdvisoryThresholds,
) -> Result<Advisory, PredictionError> {
    if current_price == 0.0 {
        return Err(PredictionError::ZeroCurrentPrice);
    }

    let change = predicted_price - current_price;
    let percent = change / current_price * 100.0;

    let signal = if change > 0.0 { Signal::Up } else { Signal::Down };

    let advice = if percent > thresholds.buy_pct {
        Advice::Buy
    } else if percent < thresholds.sell_pct {
        Advice::Sell
    } else {
        Advice::Hold
    };

    Ok(Advisory {
        change,
        percent,
        signal,
        advice,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn advise_default(predicted: f64, current: f64) -> Advisory {
        advise(predicted, current, &AdvisoryThresholds::default()).unwrap()
    }

    #[test]
    fn test_three_percent_up_is_buy() {
        let a = advise_default(103.0, 100.0);
        assert_eq!(a.change, 3.0);
        assert_eq!(a.percent, 3.0);
        assert_eq!(a.signal, Signal::Up);
        assert_eq!(a.advice, Advice::Buy);
    }

    #[test]
    fn test_three_percent_down_is_sell() {
        let a = advise_default(97.0, 100.0);
        assert_eq!(a.signal, Signal::Down);
        assert_eq!(a.advice, Advice::Sell);
    }

    #[test]
    fn test_zero_change_is_down_and_hold() {
        // change == 0 falls into the else branch: DOWN, not UP.
        let a = advise_default(100.0, 100.0);
        assert_eq!(a.change, 0.0);
        assert_eq!(a.signal, Signal::Down);
        assert_eq!(a.advice, Advice::Hold);
    }

    #[test]
    fn test_buy_boundary_is_exclusive() {
        assert_eq!(advise_default(102.0, 100.0).advice, Advice::Hold);
        assert_eq!(advise_default(102.0001, 100.0).advice, Advice::Buy);
    }

    #[test]
    fn test_sell_boundary_is_exclusive() {
        assert_eq!(advise_default(98.0, 100.0).advice, Advice::Hold);
        assert_eq!(advise_default(97.9999, 100.0).advice, Advice::Sell);
    }

    #[test]
    fn test_zero_current_price_is_guarded() {
        let err = advise(103.0, 0.0, &AdvisoryThresholds::default()).unwrap_err();
        assert!(matches!(err, PredictionError::ZeroCurrentPrice));
    }

    #[test]
    fn test_deterministic_over_identical_inputs() {
        let first = advise_default(104.25, 101.0);
        let second = advise_default(104.25, 101.0);
        assert_eq!(first, second);
    }

    #[test]
    fn test_custom_thresholds_widen_hold_band() {
        let wide = AdvisoryThresholds {
            buy_pct: 5.0,
            sell_pct: -5.0,
        };
        assert_eq!(advise(103.0, 100.0, &wide).unwrap().advice, Advice::Hold);
        assert_eq!(advise(106.0, 100.0, &wide).unwrap().advice, Advice::Buy);
    }

    #[test]
    fn test_display_labels() {
        assert_eq!(Signal::Up.to_string(), "UP");
        assert_eq!(Signal::Down.to_string(), "DOWN");
        assert_eq!(Advice::Buy.to_string(), "BUY");
        assert_eq!(Advice::Sell.to_string(), "SELL");
        assert_eq!(Advice::Hold.to_string(), "HOLD");
    }
}
