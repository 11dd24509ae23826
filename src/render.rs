use comfy_table::presets::UTF8_FULL;
use comfy_table::{Cell, CellAlignment, Table};
use estimation::EstimateSummary;
use rust_decimal::Decimal;

const BAR_WIDTH: usize = 40;

pub fn print_fixtures(fixtures: &[(&str, &str)]) {
    let mut table = Table::new();
    table.load_preset(UTF8_FULL).set_header(vec!["Fixture", "Description"]);
    for (name, description) in fixtures {
        table.add_row(vec![*name, *description]);
    }
    println!("{table}");
}

pub fn print_summary(summary: &EstimateSummary) {
    println!(
        "Simulated {} iterations (seed {})",
        summary.iterations, summary.seed
    );
    println!("{}", overview_table(summary));

    if summary.top_risks.is_empty() {
        println!("No line item carries cost uncertainty.");
    } else {
        println!("{}", risk_table(summary));
    }

    println!("{}", histogram_table(summary));
}

fn overview_table(summary: &EstimateSummary) -> Table {
    let rows = [
        ("P50", currency(summary.p50)),
        ("P80", currency(summary.p80)),
        ("P90", currency(summary.p90)),
        ("Mean", currency(summary.mean)),
        ("Std dev", currency(summary.std_dev)),
        ("Min", currency(summary.min_value)),
        ("Max", currency(summary.max_value)),
        ("Recommended contingency", format!("{}%", summary.recommended_contingency)),
        ("Contingency amount", currency(summary.contingency_amount)),
        ("Recommended budget", currency(summary.recommended_budget)),
    ];

    let mut table = Table::new();
    table.load_preset(UTF8_FULL).set_header(vec!["Metric", "Value"]);
    for (label, value) in rows {
        table.add_row(vec![Cell::new(label), Cell::new(value).set_alignment(CellAlignment::Right)]);
    }
    table
}

fn risk_table(summary: &EstimateSummary) -> Table {
    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .set_header(vec!["#", "Line item", "Impact (σ)", "Share of variance", "P(overrun)"]);
    for (rank, risk) in summary.top_risks.iter().enumerate() {
        table.add_row(vec![
            Cell::new(rank + 1),
            Cell::new(&risk.item),
            Cell::new(currency(risk.impact)).set_alignment(CellAlignment::Right),
            Cell::new(percent(risk.sensitivity)).set_alignment(CellAlignment::Right),
            Cell::new(percent(risk.probability)).set_alignment(CellAlignment::Right),
        ]);
    }
    table
}

fn histogram_table(summary: &EstimateSummary) -> Table {
    let peak = summary.histogram.iter().map(|b| b.count).max().unwrap_or(0).max(1);

    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .set_header(vec!["From", "To", "Count", "%", ""]);
    for bin in &summary.histogram {
        let bar = "#".repeat(bin.count * BAR_WIDTH / peak);
        table.add_row(vec![
            Cell::new(currency(bin.range_low)).set_alignment(CellAlignment::Right),
            Cell::new(currency(bin.range_high)).set_alignment(CellAlignment::Right),
            Cell::new(bin.count).set_alignment(CellAlignment::Right),
            Cell::new(format!("{}", bin.percentage)).set_alignment(CellAlignment::Right),
            Cell::new(bar),
        ]);
    }
    table
}

/// Formats a cent-rounded amount with thousands separators, e.g. `$63,857.99`.
fn currency(amount: Decimal) -> String {
    let text = format!("{:.2}", amount.abs());
    let (whole, cents) = text.split_once('.').unwrap_or((text.as_str(), "00"));

    let mut grouped = String::with_capacity(whole.len() + whole.len() / 3);
    for (i, digit) in whole.chars().enumerate() {
        if i > 0 && (whole.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(digit);
    }

    let sign = if amount.is_sign_negative() && !amount.is_zero() { "-" } else { "" };
    format!("{sign}${grouped}.{cents}")
}

/// Renders a `[0, 1]` ratio as a percentage with one decimal.
fn percent(ratio: Decimal) -> String {
    format!("{:.1}%", ratio * Decimal::ONE_HUNDRED)
}
