use std::fmt::Write;

use crate::core::SplitReport;

pub fn render_text(report: &SplitReport) -> String {
    let mut out = String::new();
    let _ = writeln!(
        out,
        "Subtotal={:.2} Tax={:.2} Common={:.2}",
        report.subtotal, report.tax, report.total_common
    );
    for share in &report.people {
        let _ = writeln!(
            out,
            "Person {}: amount={:.2} total={:.2}",
            share.person + 1,
            share.amount,
            share.final_total
        );
    }
    let _ = writeln!(out, "Sum of totals={:.2}", report.sum_of_totals());
    out
}

pub fn render_json(report: &SplitReport) -> serde_json::Result<String> {
    serde_json::to_string_pretty(report)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{PersonItems, SplitInputs, split_bill};

    fn sample_report() -> SplitReport {
        let inputs = SplitInputs {
            individual_mode: true,
            items: vec![
                PersonItems {
                    individual: vec![30.0],
                    excluded: Vec::new(),
                },
                PersonItems {
                    individual: vec![20.0],
                    excluded: Vec::new(),
                },
            ],
            ..SplitInputs::equal(110.0, 100.0, 2)
        };
        split_bill(&inputs).expect("valid split")
    }

    #[test]
    fn text_report_lists_header_people_and_sum() {
        let text = render_text(&sample_report());
        assert_eq!(
            text,
            "Subtotal=100.00 Tax=10.00 Common=50.00\n\
             Person 1: amount=55.00 total=60.50\n\
             Person 2: amount=45.00 total=49.50\n\
             Sum of totals=110.00\n"
        );
    }

    #[test]
    fn json_report_uses_camel_case_keys() {
        let json = render_json(&sample_report()).expect("report should serialize");
        let value: serde_json::Value = serde_json::from_str(&json).expect("valid json");
        assert_eq!(value["subtotal"], 100.0);
        assert_eq!(value["totalCommon"], 50.0);
        assert!(value.get("taxRate").is_some());
        assert_eq!(value["people"][1]["person"], 1);
        assert!(value["people"][0].get("finalTotal").is_some());
    }
}
