use serde::Serialize;

#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum ItemPass {
    Individual,
    Excluded,
}

/// Prices entered for one person. `individual` are items bought only by them,
/// `excluded` are shared items they should not pay for.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PersonItems {
    pub individual: Vec<f64>,
    pub excluded: Vec<f64>,
}

#[derive(Debug, Clone)]
pub struct SplitInputs {
    pub total: f64,
    pub subtotal: f64,
    pub people_count: usize,
    pub individual_mode: bool,
    pub exclude_mode: bool,
    pub items: Vec<PersonItems>,
}

impl SplitInputs {
    pub fn equal(total: f64, subtotal: f64, people_count: usize) -> Self {
        Self {
            total,
            subtotal,
            people_count,
            individual_mode: false,
            exclude_mode: false,
            items: Vec::new(),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PersonShare {
    pub person: usize,
    pub amount: f64,
    pub final_total: f64,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SplitReport {
    pub total: f64,
    pub subtotal: f64,
    pub tax: f64,
    pub tax_rate: f64,
    pub accumulated_subtotal: f64,
    pub total_common: f64,
    pub common_share: f64,
    pub people: Vec<PersonShare>,
}

impl SplitReport {
    pub fn sum_of_totals(&self) -> f64 {
        self.people.iter().map(|share| share.final_total).sum()
    }
}
