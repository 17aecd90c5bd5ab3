use crate::{
    Axis, CurveId, CurveView, DragRole, LimitView, MarketEvent, MarketMetrics, MarketView,
    PriceTable,
};
use supdem_core::models::{
    ChartConfig, GeometryError, Intervention, LimitKind, LinearCurve, Point, Preset, Side,
};
use tracing::{Level, event};

/// The state behind an interactive supply and demand chart
///
/// The model exclusively owns both market curves, the active intervention, and
/// the limit line (when there is one). Every event handler mutates the model
/// and then recomputes the equilibrium and everything derived from it, handing
/// back a fresh [`MarketView`].
///
/// When the curves stop meeting in a single point the handlers return a
/// [`GeometryError`]. The curves keep their new positions, the derived state is
/// cleared, and the next successful event restores it.
#[derive(Clone, Debug)]
pub struct MarketModel {
    config: ChartConfig,
    supply: LinearCurve,
    demand: LinearCurve,
    intervention: Intervention,
    limit: Option<LimitLine>,
    settlement: Result<Settlement, GeometryError>,
}

/// The draggable line introduced by a ceiling, floor, or quantity limit
///
/// The underlying line is infinite and only its level matters for the
/// geometry. For display it is re-anchored after every recompute so that it
/// runs from the axis to the curve it meets.
#[derive(Clone, Debug, PartialEq)]
pub struct LimitLine {
    kind: LimitKind,
    role: DragRole,
    line: LinearCurve,
    anchored: [Point; 2],
}

impl LimitLine {
    // New limit lines start at the equilibrium, like the guide lines they replace
    fn at(kind: LimitKind, equilibrium: Point) -> Self {
        let (line, anchored) = if kind.is_price() {
            (
                LinearCurve::horizontal(equilibrium.y),
                [Point::new(0.0, equilibrium.y), equilibrium],
            )
        } else {
            (
                LinearCurve::vertical(equilibrium.x),
                [Point::new(equilibrium.x, 0.0), equilibrium],
            )
        };
        Self {
            kind,
            role: kind.into(),
            line,
            anchored,
        }
    }

    /// The kind of limit
    pub fn kind(&self) -> LimitKind {
        self.kind
    }

    /// The drag role chosen when the line was created
    pub fn role(&self) -> DragRole {
        self.role
    }

    /// The infinite line itself
    pub fn line(&self) -> &LinearCurve {
        &self.line
    }

    /// The displayed segment, from the axis to the curve the limit meets
    pub fn endpoints(&self) -> [Point; 2] {
        self.anchored
    }

    /// The price (for ceilings and floors) or quantity (for quantity limits) of the line
    pub fn level(&self) -> f64 {
        let [p0, _] = self.line.endpoints();
        if self.kind.is_price() { p0.y } else { p0.x }
    }

    // Re-anchors the line and applies the binding rule for its kind
    fn settle(
        &mut self,
        supply: &LinearCurve,
        demand: &LinearCurve,
        equilibrium: Point,
    ) -> Result<Settlement, GeometryError> {
        match self.kind {
            LimitKind::PriceCeiling => {
                let hit = self.line.intersect(supply)?;
                self.anchored = [hit, Point::new(0.0, hit.y)];
                if hit.y < equilibrium.y {
                    // Sellers supply `hit.x` at the ceiling while buyers want more
                    let wanted = self.line.intersect(demand)?;
                    Ok(Settlement {
                        equilibrium,
                        traded: hit,
                        binding: true,
                        price_line: None,
                        quantity_line: None,
                        shortage: Some([hit, wanted]),
                    })
                } else {
                    Ok(Settlement::unconstrained(equilibrium))
                }
            }
            LimitKind::PriceFloor => {
                let hit = self.line.intersect(demand)?;
                self.anchored = [hit, Point::new(0.0, hit.y)];
                if hit.y > equilibrium.y {
                    Ok(Settlement {
                        equilibrium,
                        traded: hit,
                        binding: true,
                        price_line: None,
                        quantity_line: Some([hit, Point::new(hit.x, 0.0)]),
                        shortage: None,
                    })
                } else {
                    Ok(Settlement::unconstrained(equilibrium))
                }
            }
            LimitKind::QuantityLimit => {
                let hit = self.line.intersect(demand)?;
                self.anchored = [Point::new(hit.x, 0.0), hit];
                if hit.x < equilibrium.x {
                    Ok(Settlement {
                        equilibrium,
                        traded: hit,
                        binding: true,
                        price_line: Some([Point::new(0.0, hit.y), hit]),
                        quantity_line: None,
                        shortage: None,
                    })
                } else {
                    Ok(Settlement::unconstrained(equilibrium))
                }
            }
        }
    }
}

// Everything derived from the curves in one recompute
#[derive(Clone, Debug, PartialEq)]
struct Settlement {
    equilibrium: Point,
    traded: Point,
    binding: bool,
    price_line: Option<[Point; 2]>,
    quantity_line: Option<[Point; 2]>,
    shortage: Option<[Point; 2]>,
}

impl Settlement {
    fn unconstrained(equilibrium: Point) -> Self {
        Self {
            equilibrium,
            traded: equilibrium,
            binding: false,
            price_line: Some([Point::new(0.0, equilibrium.y), equilibrium]),
            quantity_line: Some([Point::new(equilibrium.x, 0.0), equilibrium]),
            shortage: None,
        }
    }
}

impl MarketModel {
    /// Creates a model with both curves at their `unit_elastic` preset and no intervention
    pub fn new(config: ChartConfig) -> Self {
        let supply = config.presets.curve(Side::Supply, Preset::UnitElastic);
        let demand = config.presets.curve(Side::Demand, Preset::UnitElastic);
        Self::from_curves(config, supply, demand)
    }

    /// Creates a model with the given curves and no intervention
    ///
    /// Any shift rate carried by the curves is dropped, as shifts belong to interventions.
    pub fn from_curves(config: ChartConfig, mut supply: LinearCurve, mut demand: LinearCurve) -> Self {
        supply.clear_shift_rate();
        demand.clear_shift_rate();
        let mut model = Self {
            config,
            supply,
            demand,
            intervention: Intervention::None,
            limit: None,
            settlement: Err(GeometryError::Parallel),
        };
        // A degenerate starting position is logged and reported by `view`
        let _ = model.recompute();
        model
    }

    /// The chart configuration
    pub fn config(&self) -> &ChartConfig {
        &self.config
    }

    /// The supply curve
    pub fn supply(&self) -> &LinearCurve {
        &self.supply
    }

    /// The demand curve
    pub fn demand(&self) -> &LinearCurve {
        &self.demand
    }

    /// The active intervention
    pub fn intervention(&self) -> Intervention {
        self.intervention
    }

    /// The crossing of the (possibly shifted) supply and demand curves, if they cross
    pub fn equilibrium(&self) -> Option<Point> {
        self.settlement.as_ref().ok().map(|s| s.equilibrium)
    }

    /// Where the market trades, if the geometry allows one
    pub fn traded(&self) -> Option<Point> {
        self.settlement.as_ref().ok().map(|s| s.traded)
    }

    /// The limit line, for limit interventions
    pub fn limit_curve(&self) -> Option<&LimitLine> {
        self.limit.as_ref()
    }

    /// Whether the limit line changes the traded outcome
    pub fn is_binding(&self) -> bool {
        self.settlement.as_ref().is_ok_and(|s| s.binding)
    }

    /// The shortage under a binding price ceiling, from the supply curve to the demand curve
    pub fn shortage_segment(&self) -> Option<[Point; 2]> {
        self.settlement.as_ref().ok().and_then(|s| s.shortage)
    }

    /// The quantity on a market curve (as rendered) at the given price, unclamped
    pub fn quantity_at_price(&self, side: Side, price: f64) -> f64 {
        self.curve(side).quantity_at_price(price)
    }

    /// The price table for the current curves
    pub fn price_table(&self) -> PriceTable {
        PriceTable::new(
            &self.supply,
            &self.demand,
            self.config.table_step,
            self.config.max_price,
        )
    }

    /// The current state for rendering, or the error that left the chart without an equilibrium
    pub fn view(&self) -> Result<MarketView, GeometryError> {
        let settlement = self.settlement.as_ref().map_err(|err| *err)?;
        Ok(MarketView {
            intervention: self.intervention,
            supply: CurveView::from(&self.supply),
            demand: CurveView::from(&self.demand),
            equilibrium: settlement.equilibrium,
            traded: settlement.traded,
            price_line: settlement.price_line,
            quantity_line: settlement.quantity_line,
            limit: self.limit.as_ref().map(|limit| LimitView {
                kind: limit.kind,
                endpoints: limit.anchored,
                binding: settlement.binding,
            }),
            shortage: settlement.shortage,
            metrics: MarketMetrics::at(settlement.equilibrium, &self.supply, &self.demand),
        })
    }

    /// Dispatches an event to its handler
    pub fn apply(&mut self, event: &MarketEvent) -> Result<MarketView, GeometryError> {
        match *event {
            MarketEvent::Drag { curve, dx, dy } => self.on_drag(curve, dx, dy),
            MarketEvent::Preset { side, preset } => self.on_preset_selected(side, preset),
            MarketEvent::Intervention(kind) => self.on_intervention_selected(kind),
        }
    }

    /// Handles a drag tick, moving a curve along its role's axis by the clamped delta
    ///
    /// The delta on the other axis is ignored. Dragging the limit line while no
    /// limit intervention is active does nothing.
    pub fn on_drag(&mut self, curve: CurveId, dx: f64, dy: f64) -> Result<MarketView, GeometryError> {
        let role = match curve {
            CurveId::Supply => DragRole::Supply,
            CurveId::Demand => DragRole::Demand,
            CurveId::Limit => match &self.limit {
                Some(limit) => limit.role,
                None => {
                    event!(Level::DEBUG, "no limit line to drag");
                    return self.view();
                }
            },
        };

        let bounds = role.bounds(&self.supply, &self.demand, &self.config);
        let target = match curve {
            CurveId::Supply => &mut self.supply,
            CurveId::Demand => &mut self.demand,
            CurveId::Limit => match self.limit.as_mut() {
                Some(limit) => &mut limit.line,
                None => return self.view(),
            },
        };

        let (low, high) = role.extent(target);
        let (requested, horizontal) = match role.axis() {
            Axis::Horizontal => (dx, true),
            Axis::Vertical => (dy, false),
        };
        let delta = bounds.clamp(low, high, requested);
        if delta != requested {
            event!(Level::DEBUG, ?role, requested, delta, "drag clamped");
        }

        if horizontal {
            target.translate(delta, 0.0);
        } else {
            target.translate(0.0, delta);
        }
        self.recompute()
    }

    /// Replaces a market curve with a preset, keeping any active shift on it
    pub fn on_preset_selected(
        &mut self,
        side: Side,
        preset: Preset,
    ) -> Result<MarketView, GeometryError> {
        event!(Level::INFO, %side, %preset, "preset selected");
        let replacement = self.config.presets.curve(side, preset);
        self.curve_mut(side).replace_base(&replacement);
        self.recompute()
    }

    /// Switches to another intervention
    ///
    /// Every trace of the previous intervention is removed first: shift rates
    /// are cleared (returning both curves to their base positions) and any
    /// limit line is dropped. The new intervention then shifts its curve, or
    /// places a fresh limit line at the unshifted equilibrium.
    pub fn on_intervention_selected(
        &mut self,
        kind: Intervention,
    ) -> Result<MarketView, GeometryError> {
        event!(Level::INFO, from = %self.intervention, to = %kind, "intervention selected");
        self.supply.clear_shift_rate();
        self.demand.clear_shift_rate();
        self.limit = None;
        self.intervention = kind;

        if let Some((side, sign)) = kind.shift() {
            let rate = sign * self.config.shift_rate;
            self.curve_mut(side).set_shift_rate(rate);
        }
        self.recompute()
    }

    fn curve(&self, side: Side) -> &LinearCurve {
        match side {
            Side::Supply => &self.supply,
            Side::Demand => &self.demand,
        }
    }

    fn curve_mut(&mut self, side: Side) -> &mut LinearCurve {
        match side {
            Side::Supply => &mut self.supply,
            Side::Demand => &mut self.demand,
        }
    }

    // Recomputes the equilibrium and everything derived from it
    fn recompute(&mut self) -> Result<MarketView, GeometryError> {
        self.settlement = self.settle();
        if let Err(err) = &self.settlement {
            event!(Level::WARN, err = %err, intervention = %self.intervention, "no equilibrium");
        }
        self.view()
    }

    fn settle(&mut self) -> Result<Settlement, GeometryError> {
        let equilibrium = self.supply.intersect(&self.demand)?;

        // A limit intervention whose line could not be placed yet gets it now
        if self.limit.is_none() {
            if let Some(kind) = self.intervention.limit() {
                self.limit = Some(LimitLine::at(kind, equilibrium));
            }
        }

        match self.limit.as_mut() {
            Some(limit) => {
                let settlement = limit.settle(&self.supply, &self.demand, equilibrium)?;
                if settlement.binding {
                    event!(Level::TRACE, kind = %limit.kind, level = limit.level(), "limit binding");
                }
                Ok(settlement)
            }
            None => Ok(Settlement::unconstrained(equilibrium)),
        }
    }
}

impl Default for MarketModel {
    fn default() -> Self {
        Self::new(ChartConfig::default())
    }
}
