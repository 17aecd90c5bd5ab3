use approx::assert_abs_diff_eq;
use rstest::*;
use rstest_reuse::{self, *};
use supdem_core::models::{ChartConfig, Intervention, LinearCurve, Point, Preset, Side};
use supdem_engine::{CurveId, GeometryError, MarketModel};

use all_presets::all_presets;

#[fixture]
pub fn unit() -> MarketModel {
    MarketModel::default()
}

#[rstest]
#[case::right(CurveId::Supply, 100.0, 80.0, 200.0)]
#[case::left(CurveId::Supply, -100.0, 0.0, 120.0)]
#[case::within(CurveId::Supply, 25.0, 65.0, 185.0)]
#[case::demand_right(CurveId::Demand, 100.0, 80.0, 200.0)]
#[case::demand_left(CurveId::Demand, -100.0, 0.0, 120.0)]
fn drags_stop_at_the_edges(
    mut unit: MarketModel,
    #[case] curve: CurveId,
    #[case] dx: f64,
    #[case] min: f64,
    #[case] max: f64,
) {
    unit.on_drag(curve, dx, 0.0).unwrap();
    let dragged = match curve {
        CurveId::Supply => unit.supply(),
        _ => unit.demand(),
    };
    let (low, high) = dragged.x_range();
    assert_abs_diff_eq!(low, min, epsilon = 1e-9);
    assert_abs_diff_eq!(high, max, epsilon = 1e-9);
}

#[rstest]
fn vertical_motion_is_ignored_for_market_curves(mut unit: MarketModel) {
    let before = unit.view().unwrap();
    let after = unit.on_drag(CurveId::Supply, 0.0, 75.0).unwrap();
    assert_eq!(before, after);
    let after = unit.on_drag(CurveId::Demand, 0.0, -75.0).unwrap();
    assert_eq!(before, after);
}

#[rstest]
fn dragging_there_and_back_is_lossless(mut unit: MarketModel) {
    let before = unit.view().unwrap();
    unit.on_drag(CurveId::Demand, 30.0, 0.0).unwrap();
    let after = unit.on_drag(CurveId::Demand, -30.0, 0.0).unwrap();
    assert_eq!(before, after);
}

#[rstest]
fn dragging_right_moves_the_equilibrium(mut unit: MarketModel) {
    // supply q = 40 + (p - 80) / 2 moved right by 20 meets demand q = 40 - (p - 320) / 2
    let view = unit.on_drag(CurveId::Supply, 20.0, 0.0).unwrap();
    assert_abs_diff_eq!(view.equilibrium.x, 110.0, epsilon = 1e-9);
    assert_abs_diff_eq!(view.equilibrium.y, 180.0, epsilon = 1e-9);
    assert_eq!(view.metrics.total_revenue, 19800.0);
}

#[rstest]
fn dragging_a_shifted_curve_keeps_the_shift(mut unit: MarketModel) {
    unit.on_intervention_selected(Intervention::TaxSupply)
        .unwrap();
    let view = unit.on_drag(CurveId::Supply, 20.0, 0.0).unwrap();

    assert_eq!(unit.supply().shift_rate(), Some(0.1));
    let [b0, b1] = unit.supply().base_endpoints();
    assert_eq!(b0, Point::new(60.0, 80.0));
    assert_eq!(b1, Point::new(180.0, 320.0));

    // the rendered curve and its shadow move together
    assert_eq!(view.supply.shadow, Some([b0, b1]));
    assert_abs_diff_eq!(view.supply.endpoints[0].y, 88.0, epsilon = 1e-9);
    assert_abs_diff_eq!(view.supply.endpoints[0].x, 60.0, epsilon = 1e-9);
}

#[rstest]
fn curves_cannot_be_dragged_past_each_other() {
    // a narrow supply left of the demand span is only allowed to move toward it
    let supply = LinearCurve::new(Point::new(10.0, 50.0), Point::new(30.0, 350.0)).unwrap();
    let demand = Preset::UnitElastic.builtin(Side::Demand);
    let mut model = MarketModel::from_curves(ChartConfig::default(), supply, demand);

    model.on_drag(CurveId::Supply, 500.0, 0.0).unwrap();
    let (low, high) = model.supply().x_range();
    assert_abs_diff_eq!(low, 160.0, epsilon = 1e-9);
    assert_abs_diff_eq!(high, 180.0, epsilon = 1e-9);
}

#[apply(all_presets)]
fn clamped_drags_keep_an_equilibrium(supply: Preset, demand: Preset) {
    let mut model = MarketModel::default();
    model.on_preset_selected(Side::Supply, supply).unwrap();
    model.on_preset_selected(Side::Demand, demand).unwrap();

    for (curve, dx) in [
        (CurveId::Supply, 1000.0),
        (CurveId::Demand, -1000.0),
        (CurveId::Supply, -1000.0),
        (CurveId::Demand, 1000.0),
    ] {
        let view = model.on_drag(curve, dx, 0.0).unwrap();
        let config = model.config();
        for curve in [model.supply(), model.demand()] {
            let (low, high) = curve.x_range();
            assert!(low >= -1e-9 && high <= config.max_quantity + 1e-9);
        }
        assert!(view.equilibrium.is_finite());
    }
}

#[rstest]
fn limit_drag_without_limit_is_a_no_op(mut unit: MarketModel) {
    let before = unit.view().unwrap();
    let after = unit.on_drag(CurveId::Limit, 0.0, -50.0).unwrap();
    assert_eq!(before, after);
    assert!(unit.limit_curve().is_none());
}

#[rstest]
fn vertical_curves_are_degenerate() {
    let supply = LinearCurve::vertical(80.0);
    let demand = LinearCurve::vertical(120.0);
    let mut model = MarketModel::from_curves(ChartConfig::default(), supply, demand);
    assert_eq!(model.view(), Err(GeometryError::ParallelVertical));

    // a preset restores the equilibrium
    let view = model
        .on_preset_selected(Side::Supply, Preset::UnitElastic)
        .unwrap();
    assert_abs_diff_eq!(view.equilibrium.x, 120.0, epsilon = 1e-9);
}

#[rstest]
#[case::floor(Intervention::PriceFloor, 100.0, 210.0)]
#[case::floor_down(Intervention::PriceFloor, -100.0, 190.0)]
#[case::ceiling(Intervention::PriceCeiling, 100.0, 210.0)]
fn price_limits_stay_within_supply_prices(
    #[case] kind: Intervention,
    #[case] dy: f64,
    #[case] level: f64,
) {
    // elastic supply spans prices 190..210, inelastic demand spans 50..350
    let mut model = MarketModel::default();
    model.on_preset_selected(Side::Supply, Preset::Elastic).unwrap();
    model.on_preset_selected(Side::Demand, Preset::Inelastic).unwrap();
    model.on_intervention_selected(kind).unwrap();

    model.on_drag(CurveId::Limit, 0.0, dy).unwrap();
    assert_abs_diff_eq!(model.limit_curve().unwrap().level(), level, epsilon = 1e-9);
}
