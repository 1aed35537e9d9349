use pasm_common::program::{InstId, Program};

use super::liveness::LiveSet;

/// The registers each instruction writes (kills) and reads (gens).
#[derive(Debug)]
pub struct ProgInfo {
    pub kills: Vec<LiveSet>,
    pub gens: Vec<LiveSet>,
}

impl ProgInfo {
    pub fn kills(&self, id: InstId) -> &LiveSet {
        &self.kills[id.0]
    }

    pub fn gens(&self, id: InstId) -> &LiveSet {
        &self.gens[id.0]
    }
}

pub fn info(program: &Program) -> ProgInfo {
    let (kills, gens) = program
        .instructions
        .iter()
        .map(|inst| {
            let kills: LiveSet = inst.kills().cloned().collect();
            let gens: LiveSet = inst.gens().cloned().collect();
            (kills, gens)
        })
        .unzip();

    ProgInfo { kills, gens }
}
