use log::{debug, trace};
use pasm_common::program::{InstId, Program};
use pasm_common::register::Name;

use super::info::{info, ProgInfo};
use crate::cfg::ControlFlow;

pub type LiveSet = im::OrdSet<Name>;

/// Live-variable facts for every instruction of a program.
#[derive(Debug)]
pub struct Liveness {
    info: ProgInfo,
    live_in: Vec<LiveSet>,
    live_out: Vec<LiveSet>,
    passes: usize,
}

impl Liveness {
    pub fn live_in(&self, id: InstId) -> &LiveSet {
        &self.live_in[id.0]
    }

    pub fn live_out(&self, id: InstId) -> &LiveSet {
        &self.live_out[id.0]
    }

    pub fn kills(&self, id: InstId) -> &LiveSet {
        self.info.kills(id)
    }

    pub fn gens(&self, id: InstId) -> &LiveSet {
        self.info.gens(id)
    }

    /// The number of full passes needed to reach the fixed point, including
    /// the final pass which changed nothing.
    pub fn passes(&self) -> usize {
        self.passes
    }
}

pub fn liveness(program: &Program, cfg: &ControlFlow) -> Liveness {
    debug!("computing liveness");

    let info = info(program);
    let mut analyzer = LivenessAnalyzer::new(program, cfg, &info);
    analyzer.iterate();

    trace!("liveness reached a fixed point after {} passes", analyzer.passes);

    Liveness {
        live_in: analyzer.in_facts,
        live_out: analyzer.out_facts,
        passes: analyzer.passes,
        info,
    }
}

struct LivenessAnalyzer<'a> {
    in_facts: Vec<LiveSet>,
    out_facts: Vec<LiveSet>,
    passes: usize,

    program: &'a Program,
    cfg: &'a ControlFlow,
    info: &'a ProgInfo,
}

impl<'a> LivenessAnalyzer<'a> {
    pub fn new(program: &'a Program, cfg: &'a ControlFlow, info: &'a ProgInfo) -> Self {
        Self {
            in_facts: vec![LiveSet::new(); program.len()],
            out_facts: vec![LiveSet::new(); program.len()],
            passes: 0,

            program,
            cfg,
            info,
        }
    }

    /// Sweep the program backwards until a whole pass leaves every fact
    /// unchanged. Facts only ever grow, so this terminates.
    pub fn iterate(&mut self) {
        loop {
            self.passes += 1;
            let mut changed = false;

            for id in self.program.ids().rev() {
                let out = self.compute_out(id);
                let inb = self.compute_in(&out, id);

                if out != self.out_facts[id.0] || inb != self.in_facts[id.0] {
                    self.out_facts[id.0] = out;
                    self.in_facts[id.0] = inb;
                    changed = true;
                }
            }

            if !changed {
                break;
            }
        }
    }

    /// ```text
    /// in(i) = union(out(i) - kill(i), gen(i))
    /// ```
    fn compute_in(&self, out: &LiveSet, id: InstId) -> LiveSet {
        out.clone()
            .relative_complement(self.info.kills(id).clone())
            .union(self.info.gens(id).clone())
    }

    /// ```text
    /// out(i) = union(in(s) for s in succ(i))
    /// ```
    fn compute_out(&self, id: InstId) -> LiveSet {
        LiveSet::unions(
            self.cfg
                .succs(id)
                .iter()
                .map(|succ| self.in_facts[succ.0].clone()),
        )
    }
}
