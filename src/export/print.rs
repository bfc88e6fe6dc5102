use crate::export::PeriodUnit;
use crate::types::ScheduleRow;

const NUMERIC_CELL: &str = "<td style=\"text-align: right\">";

/// print-ready HTML table; amounts are rupee-rounded with Indian grouping
pub fn to_html_table(rows: &[ScheduleRow], unit: PeriodUnit) -> String {
    let mut html = String::from("<table class=\"schedule\">\n<thead>\n<tr>");
    for heading in unit.print_header() {
        html.push_str(&format!("<th>{heading}</th>"));
    }
    html.push_str("</tr>\n</thead>\n<tbody>\n");

    for row in rows {
        html.push_str("<tr>");
        html.push_str(&format!("{NUMERIC_CELL}{}</td>", row.period_index));
        for amount in [
            row.contributed_this_period,
            row.interest_this_period,
            row.balance_after_period,
        ] {
            html.push_str(&format!("{NUMERIC_CELL}{}</td>", amount.format_inr()));
        }
        html.push_str("</tr>\n");
    }

    html.push_str("</tbody>\n</table>\n");
    html
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::decimal::Money;

    fn row(index: u32, contributed: i64, interest: i64, balance: i64) -> ScheduleRow {
        ScheduleRow {
            period_index: index,
            contributed_this_period: Money::from_major(contributed),
            interest_this_period: Money::from_major(interest),
            balance_after_period: Money::from_major(balance),
        }
    }

    #[test]
    fn test_table_header_and_rows() {
        let rows = [row(1, 12_000, 468, 12_468), row(2, 12_000, 1_353, 25_821)];
        let html = to_html_table(&rows, PeriodUnit::Year);

        assert!(html.starts_with("<table"));
        assert!(html.contains(
            "<th>Year</th><th>Contributed</th><th>Interest (this year)</th><th>Balance</th>"
        ));
        assert_eq!(html.matches("<tr>").count(), 3);
        assert!(html.contains("<td style=\"text-align: right\">₹25,821</td>"));
        assert!(html.trim_end().ends_with("</table>"));
    }

    #[test]
    fn test_monthly_heading() {
        let html = to_html_table(&[], PeriodUnit::Month);
        assert!(html.contains("<th>Interest (this month)</th>"));
        assert!(!html.contains("<td"));
    }
}
