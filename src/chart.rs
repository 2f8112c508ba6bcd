//! Chart options for the income versus expense pie chart.
//!
//! The chart is built as an ECharts configuration; the renderer serializes it
//! with `to_string()` and hands the JSON to its charting widget.

use charming::{
    Chart,
    component::{Legend, Title},
    element::{Color, Tooltip, Trigger},
    series::Pie,
};

use crate::{transaction::TransactionKind, view::Summary};

const INCOME_COLOR: &str = "green";
const EXPENSE_COLOR: &str = "red";

/// A pie chart with one slice for total income and one for total expenses.
pub fn summary_pie_chart(summary: &Summary) -> Chart {
    Chart::new()
        .title(Title::new().text("Income vs Expense"))
        .tooltip(Tooltip::new().trigger(Trigger::Item))
        .legend(Legend::new().left("center").bottom("2%"))
        .color(vec![Color::from(INCOME_COLOR), Color::from(EXPENSE_COLOR)])
        .series(
            Pie::new()
                .name("Totals")
                .radius("60%")
                .data(vec![
                    (summary.income, TransactionKind::Income.as_str()),
                    (summary.expense, TransactionKind::Expense.as_str()),
                ]),
        )
}
