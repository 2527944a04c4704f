use tracing::{debug, warn};

use super::amounts::sum_amounts;
use super::error::{Result, SplitError};
use super::types::{PersonShare, SplitInputs, SplitReport};

/// Upper bound on participants; the ledger is allocated up front.
pub const MAX_PEOPLE: usize = 10_000;

pub fn split_bill(inputs: &SplitInputs) -> Result<SplitReport> {
    validate_inputs(inputs)?;

    let people_count = inputs.people_count;
    let mut amounts = vec![0.0; people_count];
    let mut accumulated_subtotal = 0.0;

    if inputs.individual_mode {
        for (person, items) in inputs.items.iter().enumerate() {
            let amount = sum_amounts(&items.individual);
            accumulated_subtotal += amount;
            amounts[person] = amount;
        }
        debug!(accumulated_subtotal, "assigned individual items");
    }

    if inputs.exclude_mode {
        for (person, items) in inputs.items.iter().enumerate() {
            let excluded = sum_amounts(&items.excluded);
            if excluded == 0.0 {
                continue;
            }
            accumulated_subtotal += excluded;
            redistribute_excluded(&mut amounts, person, excluded)?;
        }
        debug!(accumulated_subtotal, "redistributed excluded items");
    }

    let total_common = inputs.subtotal - accumulated_subtotal;
    if total_common < 0.0 {
        warn!(
            total_common,
            subtotal = inputs.subtotal,
            "itemized prices exceed the subtotal; common cost is negative"
        );
    }
    let common_share = total_common / people_count as f64;
    for amount in &mut amounts {
        *amount += common_share;
    }

    let tax = inputs.total - inputs.subtotal;
    if tax < 0.0 {
        warn!(tax, "total is below the subtotal; tax is negative");
    }
    let tax_rate = tax_rate(inputs.total, inputs.subtotal)?;
    debug!(tax, tax_rate, total_common, common_share, "computed tax rate");

    let people = amounts
        .into_iter()
        .enumerate()
        .map(|(person, amount)| PersonShare {
            person,
            amount,
            final_total: apply_tax(amount, tax_rate),
        })
        .collect();

    Ok(SplitReport {
        total: inputs.total,
        subtotal: inputs.subtotal,
        tax,
        tax_rate,
        accumulated_subtotal,
        total_common,
        common_share,
        people,
    })
}

pub fn tax_rate(total: f64, subtotal: f64) -> Result<f64> {
    if subtotal == 0.0 {
        return Err(SplitError::DivisionByZero(
            "subtotal is 0, so the tax rate cannot be computed; pass the bill's pre-tax subtotal"
                .to_string(),
        ));
    }
    Ok((total - subtotal) / subtotal)
}

pub fn apply_tax(amount: f64, tax_rate: f64) -> f64 {
    amount * (1.0 + tax_rate)
}

/// Spreads `excluded` evenly over everyone except `excluder`.
fn redistribute_excluded(amounts: &mut [f64], excluder: usize, excluded: f64) -> Result<()> {
    let others = amounts.len() - 1;
    if others == 0 {
        return Err(SplitError::DivisionByZero(format!(
            "person {} excluded {excluded} but there is nobody else to share it with",
            excluder + 1
        )));
    }
    let share = excluded / others as f64;
    for (person, amount) in amounts.iter_mut().enumerate() {
        if person != excluder {
            *amount += share;
        }
    }
    Ok(())
}

pub fn check_people_count(people_count: usize) -> Result<()> {
    if people_count == 0 {
        return Err(SplitError::config("people count must be >= 1"));
    }
    if people_count > MAX_PEOPLE {
        return Err(SplitError::config(format!(
            "people count must be <= {MAX_PEOPLE}, got {people_count}"
        )));
    }
    Ok(())
}

fn validate_inputs(inputs: &SplitInputs) -> Result<()> {
    check_people_count(inputs.people_count)?;
    if !inputs.total.is_finite() {
        return Err(SplitError::config("total must be a finite number"));
    }
    if !inputs.subtotal.is_finite() {
        return Err(SplitError::config("subtotal must be a finite number"));
    }
    if (inputs.individual_mode || inputs.exclude_mode)
        && inputs.items.len() != inputs.people_count
    {
        return Err(SplitError::config(format!(
            "expected item lists for {} people, got {}",
            inputs.people_count,
            inputs.items.len()
        )));
    }
    let all_finite = inputs
        .items
        .iter()
        .flat_map(|items| items.individual.iter().chain(&items.excluded))
        .all(|price| price.is_finite());
    if !all_finite {
        return Err(SplitError::config("item prices must be finite numbers"));
    }
    Ok(())
}
