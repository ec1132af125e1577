//! Level dynamics of the quadruple-tank process.
//!
//! Two pumps feed four tanks through three-way valves. Pump 1 splits between tank 1
//! (fraction gamma1) and tank 4; pump 2 between tank 2 (gamma2) and tank 3. The upper
//! tanks 3 and 4 drain into tanks 1 and 2, which drain into the sump. Outflow follows
//! Torricelli's law, `q = a * sqrt(2 g h)`.

use qt_core::clamped_sqrt;

use crate::error::SimResult;
use crate::model::TransientModel;
use crate::params::TankParams;

/// Liquid levels h1..h4 (cm).
pub type Levels = [f64; 4];

/// Pump control signals u0, u1.
pub type Flows = [f64; 2];

/// Four-tank model with the pump input held constant over a step.
#[derive(Clone, Debug)]
pub struct QuadTankModel {
    params: TankParams,
    input: Flows,
}

impl QuadTankModel {
    pub fn new(params: TankParams) -> Self {
        Self {
            params,
            input: [0.0; 2],
        }
    }

    pub fn params(&self) -> &TankParams {
        &self.params
    }

    /// Pump input used by the next rhs evaluation.
    pub fn set_input(&mut self, input: Flows) {
        self.input = input;
    }

    /// Outlet velocity `sqrt(2 g h)` of one tank.
    ///
    /// A level at or below zero has nothing left to drain, so the radicand is clamped
    /// at zero instead of producing NaN.
    fn outlet_velocity(&self, level: f64) -> f64 {
        clamped_sqrt(2.0 * self.params.g * level)
    }

    /// Level rates dh/dt for the given levels and the current pump input.
    pub fn rates(&self, h: &Levels) -> Levels {
        let p = &self.params;
        let area = &p.tank_area;
        let hole = &p.outlet_area;
        let [gamma1, gamma2] = p.gamma;
        let [u0, u1] = self.input;
        let v = h.map(|level| self.outlet_velocity(level));

        [
            -(hole[0] / area[0]) * v[0] + (hole[2] / area[0]) * v[2] + gamma1 * p.k * u0 / area[0],
            -(hole[1] / area[1]) * v[1] + (hole[3] / area[1]) * v[3] + gamma2 * p.k * u1 / area[1],
            -(hole[2] / area[2]) * v[2] + (1.0 - gamma2) * p.k * u1 / area[2],
            -(hole[3] / area[3]) * v[3] + (1.0 - gamma1) * p.k * u0 / area[3],
        ]
    }

    /// Total stored liquid volume `sum(A_i * h_i)` (cm³).
    pub fn volume(&self, h: &Levels) -> f64 {
        h.iter()
            .zip(self.params.tank_area.iter())
            .map(|(level, area)| level * area)
            .sum()
    }
}

impl TransientModel for QuadTankModel {
    type State = Levels;

    fn rhs(&mut self, _t: f64, x: &Self::State) -> SimResult<Self::State> {
        Ok(self.rates(x))
    }

    fn add(&self, a: &Self::State, b: &Self::State) -> Self::State {
        std::array::from_fn(|i| a[i] + b[i])
    }

    fn scale(&self, a: &Self::State, scale: f64) -> Self::State {
        a.map(|x| x * scale)
    }
}
