use analytics::format::{currency, percent};
use analytics::{Dashboard, DashboardReport, HeadlineCards, PnlTone};
use comfy_table::{Cell, Color, ContentArrangement, Table, presets::UTF8_FULL};
use dataset::LoadReport;
use serde::Serialize;

#[derive(Serialize)]
struct SummaryOutput<'a> {
    headline: HeadlineCards,
    report: &'a DashboardReport,
    trades_load: &'a LoadReport,
    sentiment_load: &'a LoadReport,
}

/// Prints the dashboard to stdout, as tables or as JSON.
pub fn print(dashboard: &Dashboard, json: bool) -> anyhow::Result<()> {
    if json {
        let output = SummaryOutput {
            headline: dashboard.headline(),
            report: &dashboard.report,
            trades_load: &dashboard.trades_load,
            sentiment_load: &dashboard.sentiment_load,
        };
        println!("{}", serde_json::to_string_pretty(&output)?);
        return Ok(());
    }

    println!("{}", headline_table(&dashboard.headline()));
    println!("{}", sentiment_table(&dashboard.report));

    match (
        dashboard.report.cumulative_pnl.first(),
        dashboard.report.cumulative_pnl.last(),
    ) {
        (Some(first), Some(last)) => println!(
            "Account growth {} to {}: {}",
            first.date,
            last.date,
            currency(last.running_total)
        ),
        _ => println!("Account growth: N/A"),
    }

    for load in [&dashboard.trades_load, &dashboard.sentiment_load] {
        if let Some(failure) = &load.failure {
            println!("Warning: {failure}");
        }
    }

    Ok(())
}

fn headline_table(cards: &HeadlineCards) -> Table {
    let pnl_color = match cards.tone {
        PnlTone::Profit => Color::Green,
        PnlTone::Loss => Color::Red,
    };

    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .set_header(vec!["Total PnL", "Total Trades", "Win Rate"]);
    table.add_row(vec![
        Cell::new(&cards.total_pnl_display).fg(pnl_color),
        Cell::new(&cards.trade_count_display).fg(Color::Cyan),
        Cell::new(&cards.win_rate_display).fg(Color::Magenta),
    ]);
    table
}

fn sentiment_table(report: &DashboardReport) -> Table {
    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_header(vec![
            "Sentiment",
            "Trades",
            "Win Rate",
            "Total PnL",
            "Q1",
            "Median",
            "Q3",
            "Outliers",
        ]);

    for rate in &report.win_rate_by_sentiment {
        let group = report
            .pnl_by_sentiment
            .iter()
            .find(|g| g.classification == rate.classification);

        let mut row = vec![
            Cell::new(&rate.classification),
            Cell::new(rate.trades),
            Cell::new(percent(Some(rate.win_rate))),
        ];
        match group {
            Some(group) => {
                let total = group.values.iter().sum();
                let d = &group.distribution;
                row.extend([
                    Cell::new(currency(total)),
                    Cell::new(currency(d.q1)),
                    Cell::new(currency(d.median)),
                    Cell::new(currency(d.q3)),
                    Cell::new(d.outliers.len()),
                ]);
            }
            None => row.extend((0..5).map(|_| Cell::new("N/A"))),
        }
        table.add_row(row);
    }

    table
}
