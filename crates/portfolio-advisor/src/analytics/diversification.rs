//! Diversification Assessor
//!
//! Measures how concentrated a portfolio is, by position and by sector.
//! Weights are taken from unrounded market values (quantity * current price),
//! not from the cent-rounded `total_value` shown per holding.

use std::collections::BTreeMap;

use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use super::checked;
use super::sectors::SectorMap;
use crate::error::Result;
use crate::model::{DiversificationReport, EnrichedHolding, PositionWeight};

/// Positions listed in a report
pub const MAX_POSITION_WEIGHTS: usize = 10;

/// Top-position weight (percent) at which the report flags concentration
pub const CONCENTRATED_POSITION_PCT: Decimal = dec!(25.0);

/// HHI at which the report flags overall concentration
pub const ELEVATED_HHI: Decimal = dec!(0.15);

/// Sector count at or below which the report flags limited diversification
pub const LIMITED_SECTOR_COUNT: usize = 2;

pub const NO_HOLDINGS_NOTE: &str = "No holdings found.";
pub const CONCENTRATED_POSITION_NOTE: &str = "High single-position concentration (top holding >= 25%).";
pub const ELEVATED_HHI_NOTE: &str = "Elevated overall concentration by HHI.";
pub const LIMITED_SECTORS_NOTE: &str = "Limited sector diversification.";
pub const REASONABLE_NOTE: &str = "Diversification appears reasonable for a simple demo portfolio.";

/// Which interpretation notes a report triggers
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ConcentrationFlags {
    pub concentrated_position: bool,
    pub elevated_hhi: bool,
    pub limited_sectors: bool,
}

impl ConcentrationFlags {
    pub fn evaluate(top_position_weight: Decimal, hhi: Decimal, num_sectors: usize) -> Self {
        Self {
            concentrated_position: top_position_weight >= CONCENTRATED_POSITION_PCT,
            elevated_hhi: hhi >= ELEVATED_HHI,
            limited_sectors: num_sectors <= LIMITED_SECTOR_COUNT,
        }
    }

    pub fn any(&self) -> bool {
        self.concentrated_position || self.elevated_hhi || self.limited_sectors
    }

    /// Notes in fixed order, space-joined
    pub fn notes(&self) -> String {
        if !self.any() {
            return REASONABLE_NOTE.to_string();
        }

        let mut notes = Vec::with_capacity(3);
        if self.concentrated_position {
            notes.push(CONCENTRATED_POSITION_NOTE);
        }
        if self.elevated_hhi {
            notes.push(ELEVATED_HHI_NOTE);
        }
        if self.limited_sectors {
            notes.push(LIMITED_SECTORS_NOTE);
        }
        notes.join(" ")
    }
}

/// Computes diversification reports against a sector table
#[derive(Clone, Debug, Default)]
pub struct DiversificationAssessor {
    sectors: SectorMap,
}

impl DiversificationAssessor {
    pub fn new(sectors: SectorMap) -> Self {
        Self { sectors }
    }

    pub fn assess(&self, holdings: &[EnrichedHolding]) -> Result<DiversificationReport> {
        if holdings.is_empty() {
            return Ok(DiversificationReport {
                notes: NO_HOLDINGS_NOTE.to_string(),
                ..DiversificationReport::default()
            });
        }

        let values = holdings
            .iter()
            .map(EnrichedHolding::market_value)
            .collect::<Result<Vec<Decimal>>>()?;
        let mut total = checked::sum(values.iter().copied(), "total market value")?;
        if total.is_zero() {
            // all positions worthless: report 0% everywhere
            total = Decimal::ONE;
        }

        let mut position_weights = holdings
            .iter()
            .zip(&values)
            .map(|(h, v)| {
                Ok(PositionWeight {
                    ticker: h.ticker.clone(),
                    name: h.name.clone(),
                    weight_pct: checked::percent(*v, total, &format!("weight of {}", h.ticker))?.round_dp(2),
                })
            })
            .collect::<Result<Vec<PositionWeight>>>()?;
        position_weights.sort_by(|a, b| b.weight_pct.cmp(&a.weight_pct));
        position_weights.truncate(MAX_POSITION_WEIGHTS);

        let mut sector_totals: BTreeMap<String, Decimal> = BTreeMap::new();
        for (h, v) in holdings.iter().zip(&values) {
            let sector = self.sectors.sector_of(&h.ticker);
            let entry = sector_totals.entry(sector.to_string()).or_default();
            *entry = checked::sum([*entry, *v], &format!("{} sector value", sector))?;
        }
        let sector_weights = sector_totals
            .into_iter()
            .map(|(sector, v)| {
                let weight = checked::percent(v, total, &format!("{} sector weight", sector))?.round_dp(2);
                Ok((sector, weight))
            })
            .collect::<Result<BTreeMap<String, Decimal>>>()?;

        let fractions = values
            .iter()
            .map(|v| checked::ratio(*v, total, "position fraction"))
            .collect::<Result<Vec<Decimal>>>()?;
        let squares = fractions
            .iter()
            .map(|w| checked::mul(*w, *w, "HHI"))
            .collect::<Result<Vec<Decimal>>>()?;
        let hhi = checked::sum(squares, "HHI")?.round_dp(4);
        let top_fraction = fractions.iter().copied().max().unwrap_or(Decimal::ZERO);
        let top_position_weight = checked::mul(top_fraction, dec!(100), "top position weight")?.round_dp(2);

        let flags = ConcentrationFlags::evaluate(top_position_weight, hhi, sector_weights.len());

        tracing::debug!(
            holdings = holdings.len(),
            sectors = sector_weights.len(),
            %hhi,
            %top_position_weight,
            "assessed diversification"
        );

        Ok(DiversificationReport {
            sector_weights,
            position_weights,
            hhi,
            top_position_weight,
            num_holdings: holdings.len(),
            notes: flags.notes(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analytics::enrich::enrich;
    use crate::model::Holding;

    fn holding(ticker: &str, quantity: Decimal, price: Decimal) -> EnrichedHolding {
        enrich(&Holding::new(ticker, ticker, quantity, price, price)).unwrap()
    }

    fn assess(holdings: &[EnrichedHolding]) -> DiversificationReport {
        DiversificationAssessor::default().assess(holdings).unwrap()
    }

    #[test]
    fn test_empty_portfolio_report() {
        let report = assess(&[]);
        assert_eq!(
            report,
            DiversificationReport {
                sector_weights: BTreeMap::new(),
                position_weights: Vec::new(),
                hhi: Decimal::ZERO,
                top_position_weight: Decimal::ZERO,
                num_holdings: 0,
                notes: "No holdings found.".into(),
            }
        );
    }

    #[test]
    fn test_single_holding() {
        let report = assess(&[holding("AAPL", dec!(10), dec!(180))]);

        assert_eq!(report.hhi, dec!(1));
        assert_eq!(report.top_position_weight, dec!(100));
        assert_eq!(report.sector_weights.get("Technology"), Some(&dec!(100)));
        assert_eq!(report.num_holdings, 1);
        assert_eq!(
            report.notes,
            format!("{} {} {}", CONCENTRATED_POSITION_NOTE, ELEVATED_HHI_NOTE, LIMITED_SECTORS_NOTE)
        );
    }

    #[test]
    fn test_equal_weights_hhi() {
        for n in 1..=8u32 {
            let holdings: Vec<_> = (0..n)
                .map(|i| holding(&format!("T{}", i), dec!(2), dec!(50)))
                .collect();
            let report = assess(&holdings);
            let expected = (Decimal::ONE / Decimal::from(n)).round_dp(4);
            assert_eq!(report.hhi, expected, "n = {}", n);
        }
    }

    #[test]
    fn test_weights_sum_to_hundred() {
        let holdings = vec![
            holding("AAPL", dec!(3), dec!(101.17)),
            holding("MSFT", dec!(7), dec!(33.33)),
            holding("XOM", dec!(11), dec!(9.99)),
        ];
        let report = assess(&holdings);

        let sum: Decimal = report.position_weights.iter().map(|p| p.weight_pct).sum();
        let tolerance = dec!(0.1) * Decimal::from(holdings.len());
        assert!((sum - dec!(100)).abs() <= tolerance, "sum = {}", sum);
    }

    #[test]
    fn test_position_weights_ranked_and_capped() {
        let mut holdings: Vec<_> = (1..=12)
            .map(|i| holding(&format!("T{:02}", i), Decimal::from(i), dec!(10)))
            .collect();
        // tie with T12's weight, listed first
        holdings.insert(0, holding("TIE", dec!(12), dec!(10)));

        let report = assess(&holdings);
        assert_eq!(report.position_weights.len(), MAX_POSITION_WEIGHTS);
        assert_eq!(report.num_holdings, 13);
        assert_eq!(report.position_weights[0].ticker, "TIE");
        assert_eq!(report.position_weights[1].ticker, "T12");
        assert_eq!(report.position_weights[9].ticker, "T04");
        assert!(report
            .position_weights
            .windows(2)
            .all(|w| w[0].weight_pct >= w[1].weight_pct));
    }

    #[test]
    fn test_sector_grouping_and_unknown() {
        let holdings = vec![
            holding("AAPL", dec!(1), dec!(100)),
            holding("msft", dec!(1), dec!(100)),
            holding("AMZN", dec!(1), dec!(100)),
            holding("XOM", dec!(1), dec!(100)),
        ];
        let report = assess(&holdings);

        assert_eq!(report.sector_weights.len(), 3);
        assert_eq!(report.sector_weights["Technology"], dec!(50));
        assert_eq!(report.sector_weights["Consumer Discretionary"], dec!(25));
        assert_eq!(report.sector_weights["Unknown"], dec!(25));
    }

    #[test]
    fn test_injected_sector_table() {
        let assessor = DiversificationAssessor::new(SectorMap::from_pairs([("XOM", "Energy")]));
        let report = assessor.assess(&[holding("XOM", dec!(1), dec!(100)), holding("AAPL", dec!(1), dec!(100))]).unwrap();

        assert_eq!(report.sector_weights["Energy"], dec!(50));
        assert_eq!(report.sector_weights["Unknown"], dec!(50));
    }

    #[test]
    fn test_all_zero_values_give_zero_weights() {
        let report = assess(&[holding("AAPL", dec!(5), dec!(0)), holding("MSFT", dec!(0), dec!(10))]);

        assert_eq!(report.hhi, Decimal::ZERO);
        assert_eq!(report.top_position_weight, Decimal::ZERO);
        assert!(report.position_weights.iter().all(|p| p.weight_pct.is_zero()));
        assert_eq!(report.sector_weights["Technology"], Decimal::ZERO);
        assert_eq!(report.num_holdings, 2);
    }

    #[test]
    fn test_weights_use_unrounded_values() {
        // each row rounds to 0.00, the raw values still split 50/50
        let holdings = vec![
            holding("A", dec!(1), dec!(0.005)),
            holding("B", dec!(1), dec!(0.005)),
        ];
        let report = assess(&holdings);
        assert_eq!(report.top_position_weight, dec!(50));
        assert_eq!(report.hhi, dec!(0.5));
    }

    #[test]
    fn test_notes_gating() {
        let none = ConcentrationFlags::evaluate(dec!(24.99), dec!(0.1499), 3);
        assert!(!none.any());
        assert_eq!(none.notes(), REASONABLE_NOTE);

        let top = ConcentrationFlags::evaluate(dec!(25.0), dec!(0.10), 5);
        assert_eq!(
            top,
            ConcentrationFlags {
                concentrated_position: true,
                elevated_hhi: false,
                limited_sectors: false,
            }
        );
        assert_eq!(top.notes(), CONCENTRATED_POSITION_NOTE);

        let hhi_and_sectors = ConcentrationFlags::evaluate(dec!(20), dec!(0.15), 2);
        assert_eq!(
            hhi_and_sectors.notes(),
            format!("{} {}", ELEVATED_HHI_NOTE, LIMITED_SECTORS_NOTE)
        );
    }

    #[test]
    fn test_well_diversified_portfolio() {
        let holdings: Vec<_> = ["AAPL", "GOOGL", "AMZN", "XOM", "JNJ", "JPM", "KO", "PG"]
            .iter()
            .map(|t| holding(t, dec!(1), dec!(100)))
            .collect();
        let report = assess(&holdings);

        assert_eq!(report.hhi, dec!(0.125));
        assert_eq!(report.top_position_weight, dec!(12.5));
        assert_eq!(report.notes, REASONABLE_NOTE);
    }

    #[test]
    fn test_value_overflow_is_an_error() {
        let big = dec!(50000000000000000000000000000);
        let holdings = vec![holding("A", dec!(1), big), holding("B", dec!(1), big)];

        let err = DiversificationAssessor::default().assess(&holdings).unwrap_err();
        assert!(matches!(err, crate::error::AdvisorError::Overflow(ref what) if what == "total market value"));
    }
}
