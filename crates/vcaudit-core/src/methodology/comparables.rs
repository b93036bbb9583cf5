use rust_decimal::Decimal;
use serde_json::{json, Map, Value};

use super::{checked_mul, Methodology, MethodologyContext, PeerSetQuality};
use crate::domain::{format_amount, format_fixed, round_half_up, MonetaryAmount, Statistic};
use crate::result::{decimal_value, Valuation};
use crate::validation::{self, FieldKind, Payload};
use crate::{CoreError, ValidationError, ValuationRequest, ValuationResult};

const DISCOUNT_FIELD: &str = "private_company_discount_pct";
const PEER_TICKERS_FIELD: &str = "peer_tickers";
const MAX_DISCOUNT_PCT: u32 = 100;

/// Applies an aggregate EV/Revenue multiple of public peers to the
/// company's trailing revenue, less a private-company discount.
#[derive(Debug, Clone, Copy, Default)]
pub struct ComparableCompanies;

impl ComparableCompanies {
    pub const NAME: &'static str = "comparable_companies";
}

impl Methodology for ComparableCompanies {
    fn name(&self) -> &'static str {
        Self::NAME
    }

    fn description(&self) -> &'static str {
        "LTM revenue times the median or mean EV/Revenue multiple of public peers"
    }

    fn valuate(
        &self,
        request: &ValuationRequest,
        context: &MethodologyContext,
    ) -> Result<ValuationResult, CoreError> {
        let inputs = request.inputs();
        let revenue = validation::parse_decimal(
            validation::require_field(inputs, "revenue_ltm", &FieldKind::NUMERIC)?,
            "revenue_ltm",
        )?;
        let sector = validation::require_text(inputs, "sector")?;
        let statistic = validation::optional_text(inputs, "statistic")?
            .map(str::parse::<Statistic>)
            .transpose()?
            .unwrap_or_default();
        let discount_pct =
            validation::optional_decimal(inputs, DISCOUNT_FIELD)?.unwrap_or(Decimal::ZERO);
        if discount_pct > Decimal::from(MAX_DISCOUNT_PCT) {
            return Err(ValidationError::AboveMaximum {
                field: String::from(DISCOUNT_FIELD),
                max: MAX_DISCOUNT_PCT,
            }
            .into());
        }
        let explicit_tickers = peer_tickers(inputs)?;

        let source = context.comps_source();
        let (comps, peer_group) = match explicit_tickers {
            Some(tickers) => {
                let comps = source.list_by_tickers(&tickers)?;
                let resolved = comps
                    .iter()
                    .map(|company| company.ticker.as_str())
                    .collect::<Vec<_>>()
                    .join(", ");
                (comps, format!("explicit peer list ({resolved})"))
            }
            None => (
                source.list_by_sector(sector)?,
                format!("sector peer set '{sector}'"),
            ),
        };

        let selected_multiple = source.aggregate_multiple(&comps, statistic)?;
        let gross_value = checked_mul(revenue, selected_multiple, "gross value")?;
        let discount_multiplier = (Decimal::ONE_HUNDRED - discount_pct) / Decimal::ONE_HUNDRED;
        let adjusted_value = round_half_up(
            checked_mul(gross_value, discount_multiplier, "discounted value")?,
            2,
        );

        let peer_multiples = comps
            .iter()
            .map(|company| format!("{} {}x", company.ticker, company.ev_to_revenue))
            .collect::<Vec<_>>()
            .join(", ");

        let assumptions = vec![
            format!("Comparable universe based on {peer_group}."),
            format!(
                "Applied {statistic} EV/Revenue multiple of {}x.",
                format_fixed(selected_multiple, 2)
            ),
            format!(
                "Applied private-company discount of {}%.",
                format_fixed(discount_pct, 2)
            ),
        ];

        let derivation_steps = vec![
            format!("Resolve peer group from {peer_group}: {peer_multiples}."),
            format!("Select peer multiple ({statistic}): {selected_multiple}x."),
            format!(
                "Apply multiple to LTM revenue: {revenue} * {selected_multiple} = {gross_value} USD."
            ),
            format!(
                "Compute discount multiplier: (100 - {discount_pct}) / 100 = {discount_multiplier}."
            ),
            format!(
                "Apply private-company discount: {gross_value} * {discount_multiplier} = {} USD.",
                format_amount(adjusted_value),
            ),
        ];

        let citations = vec![source.dataset().citation()];

        let peer_companies = comps
            .iter()
            .map(|company| {
                json!({
                    "ticker": company.ticker,
                    "company_name": company.company_name,
                    "ev_to_revenue": decimal_value(company.ev_to_revenue),
                })
            })
            .collect::<Vec<_>>();

        let mut inputs_used = Map::new();
        inputs_used.insert(String::from("revenue_ltm"), decimal_value(revenue));
        inputs_used.insert(String::from("sector"), Value::String(sector.to_owned()));
        inputs_used.insert(
            String::from("statistic"),
            Value::String(statistic.as_str().to_owned()),
        );
        inputs_used.insert(String::from("peer_companies"), Value::Array(peer_companies));
        inputs_used.insert(String::from(DISCOUNT_FIELD), decimal_value(discount_pct));

        let spread = comps
            .iter()
            .map(|company| company.ev_to_revenue)
            .max()
            .zip(comps.iter().map(|company| company.ev_to_revenue).min())
            .map(|(max, min)| max - min)
            .unwrap_or(Decimal::ZERO);

        let mut confidence_indicators = Map::new();
        confidence_indicators.insert(String::from("peer_count"), json!(comps.len()));
        confidence_indicators.insert(
            String::from("multiple_spread"),
            decimal_value(round_half_up(spread, 2)),
        );
        confidence_indicators.insert(
            String::from("peer_set_quality"),
            Value::String(PeerSetQuality::from_count(comps.len()).to_string()),
        );
        confidence_indicators.insert(
            String::from("data_source_type"),
            Value::String(source.source_kind().to_owned()),
        );

        Ok(ValuationResult::new(Valuation {
            company_name: request.company_name().to_owned(),
            methodology: String::from(Self::NAME),
            as_of_date: request.as_of_date(),
            estimated_fair_value: MonetaryAmount::usd(adjusted_value),
            assumptions,
            inputs_used,
            citations,
            derivation_steps,
            confidence_indicators,
        }))
    }
}

/// Explicit peer list, if one was given.
///
/// Absent, null or an empty list fall back to sector peers. Any other
/// non-list value, or a list holding non-strings, is rejected.
fn peer_tickers(inputs: &Payload) -> Result<Option<Vec<String>>, ValidationError> {
    let not_a_list = || ValidationError::NotAList {
        field: String::from(PEER_TICKERS_FIELD),
    };

    match validation::optional_field(inputs, PEER_TICKERS_FIELD) {
        None => Ok(None),
        Some(Value::Array(items)) if items.is_empty() => Ok(None),
        Some(Value::Array(items)) => items
            .iter()
            .map(|item| item.as_str().map(str::to_owned).ok_or_else(not_a_list))
            .collect::<Result<Vec<_>, _>>()
            .map(Some),
        Some(_) => Err(not_a_list()),
    }
}
