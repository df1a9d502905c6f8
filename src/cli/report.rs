use super::ui;
use crate::core::{
    CatalogSource, CountryCurrencyProvider, CurrencyRateProvider, ProductLocalPrice,
    ProductPrice, ProductReportEngine, Report,
};
use anyhow::Result;
use comfy_table::{Cell, Table};
use serde::Serialize;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputFormat {
    #[default]
    Table,
    Json,
}

fn render<T: Serialize>(
    title: &str,
    report: &Report<T>,
    format: OutputFormat,
    table: impl FnOnce(&Report<T>) -> Table,
) -> Result<String> {
    match format {
        OutputFormat::Json => Ok(serde_json::to_string_pretty(report)?),
        OutputFormat::Table => {
            let mut output = format!(
                "Report - {}\n\n",
                ui::style_text(title, ui::StyleType::Title)
            );
            if report.is_empty() {
                output.push_str(&ui::style_text(
                    "No products matched.",
                    ui::StyleType::Subtle,
                ));
            } else {
                output.push_str(&table(report).to_string());
            }
            Ok(output)
        }
    }
}

pub fn render_prices(
    title: &str,
    report: &Report<ProductPrice>,
    format: OutputFormat,
) -> Result<String> {
    render(title, report, format, |report| {
        let mut table = ui::new_styled_table();
        table.set_header(vec![ui::header_cell("Product"), ui::header_cell("Price")]);
        for row in report {
            table.add_row(vec![Cell::new(&row.name), ui::amount_cell(row.price, None)]);
        }
        table
    })
}

pub fn render_local_prices(
    title: &str,
    report: &Report<ProductLocalPrice>,
    format: OutputFormat,
    base_currency: &str,
) -> Result<String> {
    render(title, report, format, |report| {
        let mut table = ui::new_styled_table();
        table.set_header(vec![
            ui::header_cell("Product"),
            ui::header_cell(&format!("Price ({base_currency})")),
            ui::header_cell("Country"),
            ui::header_cell("Local Price"),
        ]);
        for row in report {
            table.add_row(vec![
                Cell::new(&row.name),
                ui::amount_cell(row.price, None),
                Cell::new(&row.country),
                ui::amount_cell(row.local_price, Some(&row.currency_symbol)),
            ]);
        }
        table
    })
}

/// Runs the localized price report with a spinner counting finished rows.
pub async fn fetch_local_prices<C: CatalogSource>(
    engine: &ProductReportEngine<C>,
    countries: &dyn CountryCurrencyProvider,
    rates: &dyn CurrencyRateProvider,
) -> Result<Report<ProductLocalPrice>> {
    let pb = ui::new_spinner("Localizing prices...");
    let result = engine
        .current_products_with_local_currency(countries, rates, &|| pb.inc(1))
        .await;
    pb.finish_and_clear();
    Ok(result?)
}
