use crate::CliError;
use std::io::Write;
use supdem_core::models::{ChartConfig, Intervention, Preset, Side};
use supdem_engine::{CurveId, MarketModel, MarketView, PriceTable};
use tracing::{Level, event};

/// Builds the market for the chosen presets and intervention
///
/// With `limit_at`, the limit line is dragged to that level (subject to the
/// usual drag bounds) before the market is reported.
pub fn market(
    config: ChartConfig,
    supply: Preset,
    demand: Preset,
    intervention: Intervention,
    limit_at: Option<f64>,
) -> anyhow::Result<MarketModel> {
    let supply = config.presets.curve(Side::Supply, supply);
    let demand = config.presets.curve(Side::Demand, demand);
    let mut model = MarketModel::from_curves(config, supply, demand);
    model.on_intervention_selected(intervention)?;

    if let Some(level) = limit_at {
        let limit = model
            .limit_curve()
            .ok_or(CliError::NoLimitLine(intervention))?;
        let delta = level - limit.level();
        if limit.kind().is_price() {
            model.on_drag(CurveId::Limit, 0.0, delta)?;
        } else {
            model.on_drag(CurveId::Limit, delta, 0.0)?;
        }
        if let Some(limit) = model.limit_curve() {
            if limit.level() != level {
                event!(Level::WARN, requested = level, level = limit.level(), "limit line clamped");
            }
        }
    }
    Ok(model)
}

/// Writes a plain-text report of a market view and its price table
pub fn render<W: Write>(view: &MarketView, table: &PriceTable, out: &mut W) -> anyhow::Result<()> {
    let metrics = &view.metrics;
    writeln!(out, "intervention:      {}", view.intervention)?;
    writeln!(out, "price:             {}", metrics.price)?;
    writeln!(out, "quantity:          {}", metrics.quantity)?;
    writeln!(out, "total revenue:     {}", metrics.total_revenue)?;
    writeln!(out, "supply elasticity: {:.2}", metrics.supply_elasticity)?;
    writeln!(out, "demand elasticity: {:.2}", metrics.demand_elasticity)?;

    if let Some(limit) = &view.limit {
        let level = if limit.kind.is_price() {
            limit.endpoints[0].y
        } else {
            limit.endpoints[0].x
        };
        let binding = if limit.binding { "binding" } else { "not binding" };
        writeln!(out, "{}: {:.0} ({binding})", limit.kind, level)?;
        writeln!(
            out,
            "traded:            {:.0} at {:.0}",
            view.traded.x, view.traded.y
        )?;
    }
    if let Some([supplied, demanded]) = view.shortage {
        writeln!(out, "shortage:          {:.0}", demanded.x - supplied.x)?;
    }

    writeln!(out)?;
    writeln!(out, "{:>6}  {:>8}  {:>8}", "price", "supplied", "demanded")?;
    for row in &table.rows {
        writeln!(
            out,
            "{:>6}  {:>8}  {:>8}",
            row.price,
            cell(row.supplied),
            cell(row.demanded)
        )?;
    }
    Ok(())
}

fn cell(quantity: Option<i64>) -> String {
    quantity.map_or_else(|| "—".to_owned(), |q| q.to_string())
}
