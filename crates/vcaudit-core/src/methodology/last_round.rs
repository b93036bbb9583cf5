use rust_decimal::Decimal;
use serde_json::{json, Map, Value};
use time::Date;

use super::{checked_mul, Methodology, MethodologyContext, StalenessRisk};
use crate::domain::{format_amount, format_fixed, iso_date, round_half_up, MonetaryAmount};
use crate::result::{decimal_value, Valuation};
use crate::validation::{self, FieldKind};
use crate::{CoreError, DataSourceError, ValuationRequest, ValuationResult};

/// Carries the last post-money valuation forward by the move of a public
/// index between the round date and the as-of date.
#[derive(Debug, Clone)]
pub struct LastRoundMarketAdjusted {
    default_public_index: String,
}

impl LastRoundMarketAdjusted {
    pub const NAME: &'static str = "last_round_market_adjusted";

    pub fn new(default_public_index: impl Into<String>) -> Self {
        Self {
            default_public_index: default_public_index.into(),
        }
    }
}

impl Methodology for LastRoundMarketAdjusted {
    fn name(&self) -> &'static str {
        Self::NAME
    }

    fn description(&self) -> &'static str {
        "Last post-money valuation adjusted by public index movement since the round"
    }

    fn valuate(
        &self,
        request: &ValuationRequest,
        context: &MethodologyContext,
    ) -> Result<ValuationResult, CoreError> {
        let inputs = request.inputs();
        let last_post_money = validation::parse_decimal(
            validation::require_field(inputs, "last_post_money_valuation", &FieldKind::NUMERIC)?,
            "last_post_money_valuation",
        )?;
        let last_round_date = validation::parse_date(validation::require_field(
            inputs,
            "last_round_date",
            &[FieldKind::String],
        )?)?;
        let public_index = validation::optional_text(inputs, "public_index")?
            .unwrap_or(self.default_public_index.as_str());
        let as_of_date = request.as_of_date();

        let source = context.index_source();
        let last_round_level = source.get_level(public_index, last_round_date)?;
        let as_of_level = source.get_level(public_index, as_of_date)?;

        let ratio = as_of_level
            .level
            .checked_div(last_round_level.level)
            .ok_or_else(|| DataSourceError::ZeroIndexLevel {
                index: public_index.to_owned(),
                date: iso_date::format(last_round_level.as_of_date),
            })?;
        let pct_change = ratio - Decimal::ONE;
        let multiplier = Decimal::ONE + pct_change;
        let adjusted_value = round_half_up(
            checked_mul(last_post_money, multiplier, "adjusted value")?,
            2,
        );
        let change_pct = checked_mul(pct_change, Decimal::ONE_HUNDRED, "index change")?;

        let assumptions = vec![
            format!("Method assumes valuation moves proportionally with {public_index}."),
            format!(
                "Used index level on {} for last round and {} for as-of date.",
                resolved_date(last_round_date, last_round_level.as_of_date),
                resolved_date(as_of_date, as_of_level.as_of_date),
            ),
        ];

        let derivation_steps = vec![
            format!(
                "Resolve {public_index} levels: {} for last round, {} for as-of date.",
                last_round_level.cite(public_index),
                as_of_level.cite(public_index),
            ),
            format!(
                "Compute index change: ({} / {}) - 1 = {pct_change} ({}%).",
                as_of_level.level,
                last_round_level.level,
                format_fixed(change_pct, 4),
            ),
            format!("Compute adjustment multiplier: 1 + {pct_change} = {multiplier}."),
            format!(
                "Apply multiplier to last valuation: {last_post_money} * {multiplier} = {} USD.",
                format_amount(adjusted_value),
            ),
        ];

        let citations = vec![source.dataset().citation().with_resolved_data_points(vec![
            last_round_level.cite(public_index),
            as_of_level.cite(public_index),
        ])];

        let mut inputs_used = Map::new();
        inputs_used.insert(
            String::from("last_post_money_valuation"),
            decimal_value(last_post_money),
        );
        inputs_used.insert(
            String::from("last_round_date"),
            Value::String(iso_date::format(last_round_date)),
        );
        inputs_used.insert(
            String::from("public_index"),
            Value::String(public_index.to_owned()),
        );
        inputs_used.insert(
            String::from("index_level_last_round"),
            decimal_value(last_round_level.level),
        );
        inputs_used.insert(
            String::from("index_level_as_of_date"),
            decimal_value(as_of_level.level),
        );

        let days_since_last_round = (as_of_date - last_round_date).whole_days();
        let freshness_gap_days = (as_of_date - as_of_level.as_of_date).whole_days();

        let mut confidence_indicators = Map::new();
        confidence_indicators.insert(
            String::from("days_since_last_round"),
            json!(days_since_last_round),
        );
        confidence_indicators.insert(
            String::from("index_data_freshness_gap_days"),
            json!(freshness_gap_days),
        );
        confidence_indicators.insert(
            String::from("absolute_index_change_pct"),
            decimal_value(round_half_up(change_pct.abs(), 4)),
        );
        confidence_indicators.insert(
            String::from("staleness_risk"),
            Value::String(StalenessRisk::from_days(days_since_last_round).to_string()),
        );
        confidence_indicators.insert(
            String::from("data_source_type"),
            Value::String(source.source_kind().to_owned()),
        );

        Ok(ValuationResult::new(Valuation {
            company_name: request.company_name().to_owned(),
            methodology: String::from(Self::NAME),
            as_of_date,
            estimated_fair_value: MonetaryAmount::usd(adjusted_value),
            assumptions,
            inputs_used,
            citations,
            derivation_steps,
            confidence_indicators,
        }))
    }
}

fn resolved_date(requested: Date, resolved: Date) -> String {
    if requested == resolved {
        iso_date::format(resolved)
    } else {
        format!(
            "{} (requested {})",
            iso_date::format(resolved),
            iso_date::format(requested)
        )
    }
}
