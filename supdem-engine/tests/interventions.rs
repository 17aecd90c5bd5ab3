use approx::assert_abs_diff_eq;
use rstest::*;
use rstest_reuse::{self, *};
use supdem_core::models::{ChartConfig, Intervention, Preset, Side};
use supdem_engine::{CurveId, MarketEvent, MarketModel};

use all_presets::all_presets;

fn market(supply: Preset, demand: Preset) -> MarketModel {
    let mut model = MarketModel::default();
    model.on_preset_selected(Side::Supply, supply).unwrap();
    model.on_preset_selected(Side::Demand, demand).unwrap();
    model
}

// Every builtin preset passes through the centre of the chart
#[apply(all_presets)]
fn presets_clear_at_the_centre(supply: Preset, demand: Preset) {
    let model = market(supply, demand);
    let equilibrium = model.equilibrium().unwrap();
    assert_abs_diff_eq!(equilibrium.x, 100.0, epsilon = 1e-6);
    assert_abs_diff_eq!(equilibrium.y, 200.0, epsilon = 1e-6);
    assert_eq!(model.view().unwrap().metrics.total_revenue, 20000.0);
}

#[apply(all_presets)]
fn clearing_an_intervention_restores_the_chart(supply: Preset, demand: Preset) {
    let mut model = market(supply, demand);
    let initial = model.view().unwrap();

    for kind in Intervention::ALL {
        model.on_intervention_selected(kind).unwrap();
        if kind.limit().is_some() {
            model.on_drag(CurveId::Limit, -10.0, -10.0).unwrap();
        }
        let restored = model.on_intervention_selected(Intervention::None).unwrap();
        assert_eq!(restored, initial, "after {kind}");
        assert!(model.limit_curve().is_none());
        assert_eq!(model.supply().shift_rate(), None);
        assert_eq!(model.demand().shift_rate(), None);
    }
}

#[apply(all_presets)]
fn switching_interventions_leaves_no_trace(supply: Preset, demand: Preset) {
    let mut model = market(supply, demand);
    model
        .on_intervention_selected(Intervention::TaxSupply)
        .unwrap();
    let view = model
        .on_intervention_selected(Intervention::SubsidyDemand)
        .unwrap();

    assert_eq!(model.supply().shift_rate(), None);
    assert_eq!(model.demand().shift_rate(), Some(0.1));
    assert!(view.supply.shadow.is_none());
    assert!(view.demand.shadow.is_some());

    let view = model
        .on_intervention_selected(Intervention::PriceFloor)
        .unwrap();
    assert_eq!(model.demand().shift_rate(), None);
    // the new floor starts at the unshifted equilibrium
    let limit = view.limit.unwrap();
    assert_abs_diff_eq!(limit.endpoints[0].y, 200.0, epsilon = 1e-6);
    assert!(!limit.binding);
}

#[apply(all_presets)]
fn shifts_move_the_equilibrium(supply: Preset, demand: Preset) {
    // (intervention, price rises, quantity rises)
    let expectations = [
        (Intervention::TaxSupply, true, false),
        (Intervention::SubsidySupply, false, true),
        (Intervention::TaxDemand, false, false),
        (Intervention::SubsidyDemand, true, true),
    ];

    let mut model = market(supply, demand);
    for (kind, price_rises, quantity_rises) in expectations {
        let view = model.on_intervention_selected(kind).unwrap();
        assert_eq!(view.equilibrium.y > 200.0, price_rises, "price after {kind}");
        assert_eq!(view.equilibrium.x > 100.0, quantity_rises, "quantity after {kind}");
        assert!(view.limit.is_none());
    }
}

#[rstest]
fn preset_change_keeps_the_shift() {
    let mut model = MarketModel::default();
    model
        .on_intervention_selected(Intervention::TaxSupply)
        .unwrap();
    model
        .on_preset_selected(Side::Supply, Preset::Elastic)
        .unwrap();

    assert_eq!(model.intervention(), Intervention::TaxSupply);
    assert_eq!(model.supply().shift_rate(), Some(0.1));
    assert_eq!(
        model.supply().base_endpoints(),
        Preset::Elastic.builtin(Side::Supply).base_endpoints()
    );
}

#[rstest]
fn configured_shift_rate_is_used() {
    let config = ChartConfig {
        shift_rate: 0.25,
        ..Default::default()
    };
    let mut model = MarketModel::new(config);
    let view = model
        .on_intervention_selected(Intervention::TaxDemand)
        .unwrap();
    assert_eq!(model.demand().shift_rate(), Some(-0.25));
    // the unit elastic demand runs from (40, 320) to (160, 80)
    assert_abs_diff_eq!(view.demand.endpoints[0].y, 240.0, epsilon = 1e-9);
    assert_abs_diff_eq!(view.demand.endpoints[1].y, 60.0, epsilon = 1e-9);
}

#[rstest]
fn scripted_events_match_direct_calls() {
    let script = [
        MarketEvent::Preset {
            side: Side::Demand,
            preset: Preset::Inelastic,
        },
        MarketEvent::Intervention(Intervention::PriceCeiling),
        MarketEvent::Drag {
            curve: CurveId::Limit,
            dx: 0.0,
            dy: -40.0,
        },
    ];

    let mut scripted = MarketModel::default();
    let views = script
        .iter()
        .map(|event| scripted.apply(event).unwrap())
        .collect::<Vec<_>>();

    let mut direct = MarketModel::default();
    direct
        .on_preset_selected(Side::Demand, Preset::Inelastic)
        .unwrap();
    direct
        .on_intervention_selected(Intervention::PriceCeiling)
        .unwrap();
    let last = direct.on_drag(CurveId::Limit, 0.0, -40.0).unwrap();

    assert_eq!(views.last(), Some(&last));
    assert!(last.limit.unwrap().binding);
    assert!(last.shortage.is_some());
}
