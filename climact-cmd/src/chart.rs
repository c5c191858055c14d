//! Chart and export subcommands.

use crate::Context;
use climact_chart::state::{ChartPresenter, ChartView};
use climact_core::client::DataClient;
use climact_core::query_key::tabular_key;
use climact_core::series::SeriesPoint;
use log::info;
use std::io::Write;

pub const NO_DATA: &str = "No data available for this selection";

/// Fetch the series for the stored selection and print the chart spec.
pub async fn run_chart(context: &Context) -> anyhow::Result<()> {
    let store = context.store();
    let client = DataClient::new(&context.services());

    let mut presenter = ChartPresenter::new();
    let request = presenter.request(store.state());
    let outcome = client.fetch_series(&request.key).await;
    presenter.resolve(request.generation, outcome);

    match presenter.view() {
        ChartView::Ready(chart) => println!("{}", chart.to_json()?),
        _ => println!("{}", NO_DATA),
    }
    Ok(())
}

/// Write the series for the stored selection to `output` as CSV.
///
/// An unavailable series is reported, not treated as an error, and leaves
/// no file behind.
pub async fn run_export(context: &Context, output: &str) -> anyhow::Result<()> {
    let store = context.store();
    let key = tabular_key(store.state());
    let client = DataClient::new(&context.services());

    let points = match client.fetch_series(&key).await {
        Ok(points) if !points.is_empty() => points,
        Ok(_) | Err(_) => {
            println!("{}", NO_DATA);
            return Ok(());
        }
    };

    let file = std::fs::File::create(output)?;
    write_series(file, &points)?;
    info!("Exported {} points for {} to {}", points.len(), key, output);
    Ok(())
}

/// `month,value` rows with a header, in service order.
pub fn write_series<W: Write>(writer: W, points: &[SeriesPoint]) -> anyhow::Result<()> {
    let mut csv_writer = csv::Writer::from_writer(writer);
    for point in points {
        csv_writer.serialize(point)?;
    }
    csv_writer.flush()?;
    Ok(())
}
