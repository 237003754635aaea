use rust_decimal::Decimal;
use rust_decimal::MathematicalOps;
use serde::{Deserialize, Serialize};

use crate::error::ReportError;
use crate::types::*;
use crate::ReportResult;

/// Trading days per year, used to annualise daily statistics.
pub const TRADING_DAYS: u32 = 252;

/// Per-series summary statistics on periodic returns.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MetricsRecord {
    /// Arithmetic mean of the periodic returns
    pub avg_return: Rate,
    /// Sample standard deviation of the periodic returns
    pub avg_std: Rate,
    /// `avg_return / avg_std`, zero when the deviation is zero
    pub avg_sharpe: Decimal,
}

impl MetricsRecord {
    /// `None` when scaling leaves the decimal range.
    pub fn annualised_return(&self, trading_days: u32) -> Option<Rate> {
        self.avg_return.checked_mul(Decimal::from(trading_days))
    }

    pub fn annualised_risk(&self, trading_days: u32) -> Option<Rate> {
        self.avg_std
            .checked_mul(sqrt_decimal(Decimal::from(trading_days)))
    }

    pub fn annualised_sharpe(&self, trading_days: u32) -> Option<Decimal> {
        self.avg_sharpe
            .checked_mul(sqrt_decimal(Decimal::from(trading_days)))
    }
}

/// Mean, sample standard deviation and risk-adjusted ratio of a series.
pub fn metrics(series: &ReturnSeries) -> ReportResult<MetricsRecord> {
    let values = series.values();
    if values.is_empty() {
        return Err(ReportError::InsufficientData(format!(
            "no return observations for '{}'",
            series.name()
        )));
    }

    let avg_return = mean(values).ok_or_else(|| overflow(series.name()))?;
    let avg_std = sample_std_dev(values, avg_return).ok_or_else(|| overflow(series.name()))?;
    let avg_sharpe = if avg_std.is_zero() {
        Decimal::ZERO
    } else {
        avg_return
            .checked_div(avg_std)
            .ok_or_else(|| overflow(series.name()))?
    };

    Ok(MetricsRecord {
        avg_return,
        avg_std,
        avg_sharpe,
    })
}

/// Annualised standard deviation of `portfolio - benchmark`.
pub fn tracking_error(
    portfolio: &ReturnSeries,
    benchmark: &ReturnSeries,
    trading_days: u32,
) -> ReportResult<Rate> {
    let active = portfolio.difference(benchmark)?;
    mean(active.values())
        .and_then(|m| sample_std_dev(active.values(), m))
        .and_then(|te| te.checked_mul(sqrt_decimal(Decimal::from(trading_days))))
        .ok_or_else(|| overflow(active.name()))
}

/// Error for arithmetic that leaves the decimal range, usually returns
/// given in percent rather than as fractions.
pub(crate) fn overflow(name: &str) -> ReportError {
    ReportError::InvalidInput {
        field: name.to_string(),
        reason: "returns overflow the decimal range (expected fractions such as 0.01, not percent)"
            .into(),
    }
}

/// Arithmetic mean; `None` on overflow.
pub(crate) fn mean(values: &[Decimal]) -> Option<Decimal> {
    if values.is_empty() {
        return Some(Decimal::ZERO);
    }
    let sum = values
        .iter()
        .try_fold(Decimal::ZERO, |acc, v| acc.checked_add(*v))?;
    sum.checked_div(Decimal::from(values.len() as i64))
}

/// Sample standard deviation; zero below two observations, `None` on overflow.
pub(crate) fn sample_std_dev(values: &[Decimal], avg: Decimal) -> Option<Decimal> {
    if values.len() < 2 {
        return Some(Decimal::ZERO);
    }
    let sum_sq = values.iter().try_fold(Decimal::ZERO, |acc, v| {
        let dev = v.checked_sub(avg)?;
        acc.checked_add(dev.checked_mul(dev)?)
    })?;
    let variance = sum_sq.checked_div(Decimal::from((values.len() - 1) as i64))?;
    Some(sqrt_decimal(variance))
}

pub(crate) fn sqrt_decimal(val: Decimal) -> Decimal {
    if val <= Decimal::ZERO {
        return Decimal::ZERO;
    }
    val.sqrt().unwrap_or(Decimal::ZERO)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use rust_decimal_macros::dec;

    fn series(name: &str, values: &[Decimal]) -> ReturnSeries {
        let start = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
        let dates = (0..values.len())
            .map(|i| start + chrono::Days::new(i as u64))
            .collect();
        ReturnSeries::new(name, dates, values.to_vec()).unwrap()
    }

    #[test]
    fn test_mean_and_std() {
        let s = series("P", &[dec!(0.01), dec!(0.03)]);
        let m = metrics(&s).unwrap();
        assert_eq!(m.avg_return, dec!(0.02));
        // variance = (0.0001 + 0.0001) / 1
        assert!((m.avg_std - dec!(0.0141421356)).abs() < dec!(0.0000001));
    }

    #[test]
    fn test_single_observation_has_zero_dispersion() {
        let m = metrics(&series("P", &[dec!(0.05)])).unwrap();
        assert_eq!(m.avg_return, dec!(0.05));
        assert_eq!(m.avg_std, Decimal::ZERO);
        assert_eq!(m.avg_sharpe, Decimal::ZERO);
    }

    #[test]
    fn test_empty_series_rejected() {
        let s = ReturnSeries::new("P", vec![], vec![]).unwrap();
        assert!(matches!(
            metrics(&s),
            Err(ReportError::InsufficientData(_))
        ));
    }

    #[test]
    fn test_annualisation() {
        let m = MetricsRecord {
            avg_return: dec!(0.001),
            avg_std: dec!(0.01),
            avg_sharpe: dec!(0.1),
        };
        assert_eq!(m.annualised_return(TRADING_DAYS), Some(dec!(0.252)));
        let sqrt_252 = sqrt_decimal(dec!(252));
        assert_eq!(m.annualised_risk(TRADING_DAYS), Some(dec!(0.01) * sqrt_252));
        assert_eq!(m.annualised_sharpe(TRADING_DAYS), Some(dec!(0.1) * sqrt_252));
    }

    #[test]
    fn test_annualisation_overflow_is_none() {
        let m = MetricsRecord {
            avg_return: Decimal::MAX,
            avg_std: Decimal::MAX,
            avg_sharpe: Decimal::ONE,
        };
        assert_eq!(m.annualised_return(TRADING_DAYS), None);
        assert_eq!(m.annualised_risk(TRADING_DAYS), None);
    }

    #[test]
    fn test_huge_deviations_are_an_error() {
        let s = series("P", &[dec!(1e15), dec!(-1e15)]);
        let err = metrics(&s).unwrap_err();
        assert!(matches!(err, ReportError::InvalidInput { ref field, .. } if field == "P"));
    }

    #[test]
    fn test_mean_overflow_is_none() {
        assert_eq!(mean(&[Decimal::MAX, Decimal::MAX]), None);
    }

    #[test]
    fn test_sqrt_of_non_positive_is_zero() {
        assert_eq!(sqrt_decimal(Decimal::ZERO), Decimal::ZERO);
        assert_eq!(sqrt_decimal(dec!(-4)), Decimal::ZERO);
    }
}
