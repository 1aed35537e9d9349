pub mod alloc;
pub mod apply;
pub mod cfg;


use log::{debug, info};
use pasm_common::message::Messages;
use pasm_common::program::Program;
use pasm_common::{Constraints, Driver};

use crate::alloc::{allocate, liveness, Allocation, Colorer, Failure, Liveness};
use crate::apply::rewrite;
use crate::cfg::{control_flow, ControlFlow};

/// Everything the backend learned about a program.
#[derive(Debug)]
pub struct Compiled {
    pub cfg: ControlFlow,
    pub liveness: Liveness,
    pub outcome: Outcome,
}

#[derive(Debug)]
pub enum Outcome {
    Allocated { allocation: Allocation, code: String },
    Failed(Failure),
}

impl Outcome {
    pub fn code(&self) -> Option<&str> {
        match self {
            Self::Allocated { code, .. } => Some(code.as_str()),
            Self::Failed(_) => None,
        }
    }
}

/// Run the whole backend on a parsed program. Errors in the control flow are
/// returned; an allocation which does not fit is reported to the driver and
/// returned as [`Outcome::Failed`].
pub fn compile(
    driver: &mut impl Driver,
    constraints: &Constraints,
    colorer: &dyn Colorer,
    program: &Program,
) -> Result<Compiled, Messages> {
    let cfg = control_flow(program)?;
    let liveness = liveness(program, &cfg);

    let outcome = match allocate(driver, constraints, colorer, program, &liveness) {
        Ok(allocation) => {
            info!(
                "allocated {} names with {} colors, {} spilled",
                allocation.registers.len(),
                allocation.coloring.used,
                allocation.spills.len()
            );

            let code = rewrite(constraints, program, &liveness, &allocation);
            Outcome::Allocated { allocation, code }
        }

        Err(failure) => {
            debug!("allocation failed after {} iterations", failure.iterations());

            let mut messages = Messages::new();
            messages.alloc_failed(
                failure.needed,
                failure.budget,
                failure.spills.len(),
                failure.iterations(),
            );
            driver.report(messages);

            Outcome::Failed(failure)
        }
    };

    Ok(Compiled {
        cfg,
        liveness,
        outcome,
    })
}
