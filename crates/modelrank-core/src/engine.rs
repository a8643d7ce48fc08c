//! Scoring engine.
//!
//! [`score`] is a pure function of a claim and a ranked catalog. [`grade`]
//! wraps it with parsing and a catalog fetch for one request.

use crate::error::GradeError;
use crate::model::{
    Claim, CreationAssertion, OrderingAssertion, PositionAssertion, RankedCatalog, Rule,
    RuleOutcome, ScoreResult,
};
use crate::parser::parse_claim;
use crate::report::GradeReport;
use crate::traits::CatalogSource;

/// Score a claim against a ranked catalog.
///
/// All three rules are evaluated unconditionally, producing exactly one trace
/// entry each, in the order creation, position, ordering.
pub fn score(claim: &Claim, catalog: &RankedCatalog) -> ScoreResult {
    let outcomes = vec![
        score_creation(&claim.creation, catalog),
        score_position(&claim.position, catalog),
        score_ordering(&claim.ordering, catalog),
    ];
    for outcome in &outcomes {
        tracing::debug!(rule = %outcome.rule, points = outcome.points, "{}", outcome.detail);
    }
    ScoreResult::from_outcomes(outcomes)
}

/// Rule A: the model's UTC creation date equals the claimed date.
///
/// A claimed date that is not a real calendar day never matches.
pub fn score_creation(assertion: &CreationAssertion, catalog: &RankedCatalog) -> RuleOutcome {
    let rule = Rule::Creation;
    let name = &assertion.model;

    let Some(record) = catalog.find(name) else {
        return RuleOutcome::withheld(rule, format!("0 points: {name} not found in the model list"));
    };

    match record.created_date() {
        Some(actual) if assertion.expected_date() == Some(actual) => RuleOutcome::awarded(
            rule,
            format!(
                "{} points awarded: {name} was created on {actual}",
                rule.weight()
            ),
        ),
        Some(actual) => RuleOutcome::withheld(
            rule,
            format!(
                "0 points: {name} was created on {actual}, not {}",
                assertion.expected
            ),
        ),
        None => RuleOutcome::withheld(
            rule,
            format!(
                "0 points: {name} has an unrepresentable creation timestamp {}",
                record.created
            ),
        ),
    }
}

/// Rule B: the record at the claimed index has the claimed id.
pub fn score_position(assertion: &PositionAssertion, catalog: &RankedCatalog) -> RuleOutcome {
    let rule = Rule::Position;
    let index = &assertion.expected_index;

    let Some(found) = index.to_usize().and_then(|i| catalog.get(i)) else {
        return RuleOutcome::withheld(rule, format!("0 points: index {index} is out of range"));
    };

    if found.id == assertion.model {
        RuleOutcome::awarded(
            rule,
            format!(
                "{} points awarded: {} is at index {index}",
                rule.weight(),
                assertion.model
            ),
        )
    } else {
        RuleOutcome::withheld(
            rule,
            format!(
                "0 points: {} is at index {index}, not {}",
                found.id, assertion.model
            ),
        )
    }
}

/// Rule C/D: the number of records between the two models matches the claim.
///
/// The gap is `position(model) - position(anchor) - 1` in newest-first order,
/// which is negative when `model` is newer than `anchor`.
pub fn score_ordering(assertion: &OrderingAssertion, catalog: &RankedCatalog) -> RuleOutcome {
    let rule = Rule::Ordering;
    let (model, anchor) = (&assertion.model, &assertion.anchor);

    let (Some(pos_model), Some(pos_anchor)) = (catalog.position(model), catalog.position(anchor))
    else {
        return RuleOutcome::withheld(
            rule,
            "0 points: one or both models not found in the model list".to_string(),
        );
    };

    let gap = pos_model as i64 - pos_anchor as i64 - 1;
    if assertion.gap.to_i64() == Some(gap) {
        RuleOutcome::awarded(
            rule,
            format!(
                "{} point awarded: {model} was created {gap} models before {anchor}",
                rule.weight()
            ),
        )
    } else {
        RuleOutcome::withheld(
            rule,
            format!(
                "0 points: {model} was created {gap} models before {anchor}, not {}",
                assertion.gap
            ),
        )
    }
}

/// Grade one raw claim against a catalog source.
///
/// The claim is parsed before the catalog is fetched, so malformed input
/// fails without a network round trip.
pub async fn grade(input: &str, source: &dyn CatalogSource) -> Result<GradeReport, GradeError> {
    let claim = parse_claim(input)?;

    let records = source
        .list_models()
        .await
        .map_err(|e| GradeError::Catalog(e.into()))?;
    let catalog_size = records.len();

    let ranked = RankedCatalog::build(records, claim.cutoff);
    tracing::info!(
        source = source.name(),
        catalog_size,
        ranked_size = ranked.len(),
        cutoff = %claim.cutoff,
        "catalog ranked"
    );

    let result = score(&claim, &ranked);
    Ok(GradeReport::new(
        source.name(),
        claim,
        catalog_size,
        ranked.len(),
        result,
    ))
}
