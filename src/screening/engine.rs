//! Filter/sort engine over in-memory opportunity records

use crate::types::{FilterCriteria, Opportunity};

/// Apply `criteria` to `records`, returning the retained opportunities in
/// descending order of estimated profit.
///
/// A record survives only if every supplied non-empty criterion matches:
/// exact-match symbol/venue constraints are skipped when unset, and the
/// spread/profit bounds are inclusive. The sort is stable, so records with
/// equal profit keep their input order. Input is never mutated.
pub fn apply(records: &[Opportunity], criteria: &FilterCriteria) -> Vec<Opportunity> {
    let mut retained: Vec<Opportunity> = records
        .iter()
        .filter(|opp| matches(opp, criteria))
        .cloned()
        .collect();

    retained.sort_by(|a, b| b.estimated_profit.cmp(&a.estimated_profit));
    retained
}

fn matches(opp: &Opportunity, criteria: &FilterCriteria) -> bool {
    if !criteria.symbol_filter.is_empty() && opp.symbol != criteria.symbol_filter {
        return false;
    }
    if let Some(buy) = criteria.exchange_a {
        if opp.buy_exchange != buy {
            return false;
        }
    }
    if let Some(sell) = criteria.exchange_b {
        if opp.sell_exchange != sell {
            return false;
        }
    }
    if !criteria.funding_period.is_empty() && opp.funding_cycle != criteria.funding_period {
        return false;
    }
    opp.spot_spread >= criteria.min_spread && opp.estimated_profit >= criteria.min_profit
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{ArbitrageType, Exchange};
    use chrono::Utc;
    use proptest::prelude::*;
    use rust_decimal::Decimal;
    use rust_decimal_macros::dec;

    fn opp(id: &str, symbol: &str, spread: Decimal, profit: Decimal) -> Opportunity {
        Opportunity {
            id: id.to_string(),
            symbol: symbol.to_string(),
            buy_exchange: Exchange::Binance,
            sell_exchange: Exchange::Okx,
            buy_price: dec!(40000),
            sell_price: dec!(40000) * (dec!(1) + spread / dec!(100)),
            spot_spread: spread,
            buy_bid: dec!(39999),
            buy_ask: dec!(40001),
            buy_spread_percent: dec!(0.005),
            sell_bid: dec!(40010),
            sell_ask: dec!(40012),
            sell_spread_percent: dec!(0.005),
            estimated_profit: profit,
            amplitude_24h: dec!(4.2),
            volume_24h: dec!(2500000),
            buy_funding_rate: dec!(0.0001),
            sell_funding_rate: dec!(-0.0001),
            funding_end_time: Utc::now(),
            funding_cycle: "8H".to_string(),
            position_size: dec!(3),
            arbitrage_type: ArbitrageType::FuturesFutures,
            confidence: dec!(80),
            created_at: Utc::now(),
        }
    }

    fn open_criteria() -> FilterCriteria {
        FilterCriteria {
            min_spread: dec!(-100),
            min_profit: dec!(-100),
            ..FilterCriteria::default()
        }
    }

    #[test]
    fn min_profit_is_an_inclusive_lower_bound() {
        let records = vec![
            opp("a", "BTC-USDT", dec!(0.5), dec!(0.5)),
            opp("b", "BTC-USDT", dec!(0.5), dec!(-0.1)),
            opp("c", "BTC-USDT", dec!(0.5), dec!(0.3)),
        ];
        let criteria = FilterCriteria {
            min_profit: dec!(0.2),
            min_spread: dec!(-100),
            ..FilterCriteria::default()
        };

        let screened = apply(&records, &criteria);
        let profits: Vec<Decimal> = screened.iter().map(|o| o.estimated_profit).collect();
        assert_eq!(profits, vec![dec!(0.5), dec!(0.3)]);

        // Exactly at the bound is retained
        let at_bound = FilterCriteria {
            min_profit: dec!(0.3),
            min_spread: dec!(-100),
            ..FilterCriteria::default()
        };
        assert_eq!(apply(&records, &at_bound).len(), 2);
    }

    #[test]
    fn empty_symbol_filter_is_unconstrained() {
        let records = vec![
            opp("a", "BTC-USDT", dec!(0.5), dec!(0.5)),
            opp("b", "ETH-USDT", dec!(0.5), dec!(0.4)),
        ];
        assert_eq!(apply(&records, &open_criteria()).len(), 2);

        let criteria = FilterCriteria {
            symbol_filter: "ETH-USDT".to_string(),
            ..open_criteria()
        };
        let screened = apply(&records, &criteria);
        assert_eq!(screened.len(), 1);
        assert_eq!(screened[0].id, "b");
    }

    #[test]
    fn exchange_constraints_match_the_right_leg() {
        let mut a = opp("a", "BTC-USDT", dec!(0.5), dec!(0.5));
        a.buy_exchange = Exchange::Bybit;
        a.sell_exchange = Exchange::Binance;
        let b = opp("b", "BTC-USDT", dec!(0.5), dec!(0.4));

        let records = vec![a, b];
        let criteria = FilterCriteria {
            exchange_a: Some(Exchange::Bybit),
            ..open_criteria()
        };
        let screened = apply(&records, &criteria);
        assert_eq!(screened.len(), 1);
        assert_eq!(screened[0].id, "a");

        let criteria = FilterCriteria {
            exchange_b: Some(Exchange::Okx),
            ..open_criteria()
        };
        let screened = apply(&records, &criteria);
        assert_eq!(screened.len(), 1);
        assert_eq!(screened[0].id, "b");
    }

    #[test]
    fn ties_keep_input_order() {
        let records = vec![
            opp("first", "BTC-USDT", dec!(0.5), dec!(0.3)),
            opp("second", "BTC-USDT", dec!(0.5), dec!(0.3)),
            opp("third", "BTC-USDT", dec!(0.5), dec!(0.9)),
        ];
        let screened = apply(&records, &open_criteria());
        let ids: Vec<&str> = screened.iter().map(|o| o.id.as_str()).collect();
        assert_eq!(ids, vec!["third", "first", "second"]);
    }

    #[test]
    fn input_records_are_untouched() {
        let records = vec![
            opp("a", "BTC-USDT", dec!(0.5), dec!(0.1)),
            opp("b", "BTC-USDT", dec!(0.5), dec!(0.9)),
        ];
        let before: Vec<String> = records.iter().map(|o| o.id.clone()).collect();
        let _ = apply(&records, &open_criteria());
        let after: Vec<String> = records.iter().map(|o| o.id.clone()).collect();
        assert_eq!(before, after);
    }

    #[test]
    fn empty_result_is_valid() {
        let records = vec![opp("a", "BTC-USDT", dec!(0.5), dec!(0.01))];
        let criteria = FilterCriteria {
            min_profit: dec!(5),
            ..FilterCriteria::default()
        };
        assert!(apply(&records, &criteria).is_empty());
    }

    prop_compose! {
        fn arb_opp()(spread in -50i64..400, profit in -300i64..300, idx in 0usize..4) -> Opportunity {
            let symbols = ["BTC-USDT", "ETH-USDT", "ADA-USDT", "SOL-USDT"];
            opp(
                &format!("OPP_{}_{}", spread, profit),
                symbols[idx],
                Decimal::new(spread, 2),
                Decimal::new(profit, 2),
            )
        }
    }

    proptest! {
        #[test]
        fn screening_is_idempotent(records in prop::collection::vec(arb_opp(), 0..40)) {
            let criteria = FilterCriteria::default();
            let once = apply(&records, &criteria);
            let twice = apply(&once, &criteria);
            let once_ids: Vec<&str> = once.iter().map(|o| o.id.as_str()).collect();
            let twice_ids: Vec<&str> = twice.iter().map(|o| o.id.as_str()).collect();
            prop_assert_eq!(once_ids, twice_ids);
        }

        #[test]
        fn raising_min_profit_never_grows_the_result(
            records in prop::collection::vec(arb_opp(), 0..40),
            low in -200i64..200,
            bump in 0i64..100,
        ) {
            let loose = FilterCriteria { min_profit: Decimal::new(low, 2), ..FilterCriteria::default() };
            let tight = FilterCriteria { min_profit: Decimal::new(low + bump, 2), ..FilterCriteria::default() };
            prop_assert!(apply(&records, &tight).len() <= apply(&records, &loose).len());
        }

        #[test]
        fn output_is_sorted_by_descending_profit(records in prop::collection::vec(arb_opp(), 0..40)) {
            let screened = apply(&records, &FilterCriteria::default());
            for pair in screened.windows(2) {
                prop_assert!(pair[0].estimated_profit >= pair[1].estimated_profit);
            }
        }
    }
}
