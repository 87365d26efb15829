//! Machine variants. Each cycle a machine reports a small set of named fields
//! that are merged into the cycle's `machine_data`.

use factory_core::{fields, round_to, FieldValue, Result};
use indexmap::IndexMap;
use rand::{Rng, RngCore};

use crate::random::pick;
use crate::tool_changer::ToolChanger;

/// Fields reported by one machine for one cycle, in declaration order.
pub type OperationResult = IndexMap<String, FieldValue>;

pub const MILL_OPERATIONS: [&str; 3] = ["cutting", "drilling", "idle"];
pub const ARM_TASKS: [&str; 4] = ["load_material", "unload_part", "assemble_component", "idle"];
pub const CONVEYOR_STATIONS: [&str; 4] = ["Station A", "Station B", "Inspection", "Exit"];
pub const INSPECTION_OUTCOMES: [&str; 2] = ["PASS", "FAIL"];

/// First part number; the cycle id is added to it.
const PART_ID_BASE: u64 = 1000;

#[derive(Debug, Clone)]
pub enum Machine {
    CncMill {
        name: String,
        tool_changer: ToolChanger,
    },
    RoboticArm {
        name: String,
    },
    ConveyorBelt {
        name: String,
    },
    InspectionSystem {
        name: String,
    },
}

impl Machine {
    pub fn name(&self) -> &str {
        match self {
            Machine::CncMill { name, .. }
            | Machine::RoboticArm { name }
            | Machine::ConveyorBelt { name }
            | Machine::InspectionSystem { name } => name,
        }
    }

    /// Names of the fields this machine reports, fixed per variant.
    pub fn field_names(&self) -> &'static [&'static str] {
        match self {
            Machine::CncMill { .. } => &[fields::OPERATION, fields::TOOL_ID],
            Machine::RoboticArm { .. } => &[fields::ROBOTIC_ARM_TASK],
            Machine::ConveyorBelt { .. } => &[fields::CONVEYOR_POSITION, fields::PART_ID],
            Machine::InspectionSystem { .. } => {
                &[fields::INSPECTION_RESULT, fields::INSPECTION_CONFIDENCE]
            }
        }
    }

    pub fn perform_operation(&mut self, cycle_id: u64, rng: &mut dyn RngCore) -> OperationResult {
        let mut out = OperationResult::new();
        match self {
            Machine::CncMill { tool_changer, .. } => {
                out.insert(fields::OPERATION.into(), pick(rng, &MILL_OPERATIONS).into());
                let tool = tool_changer.check_and_change_tool(cycle_id, rng);
                out.insert(fields::TOOL_ID.into(), tool.into());
            }
            Machine::RoboticArm { .. } => {
                out.insert(fields::ROBOTIC_ARM_TASK.into(), pick(rng, &ARM_TASKS).into());
            }
            Machine::ConveyorBelt { .. } => {
                out.insert(
                    fields::CONVEYOR_POSITION.into(),
                    pick(rng, &CONVEYOR_STATIONS).into(),
                );
                out.insert(
                    fields::PART_ID.into(),
                    format!("PART-{}", PART_ID_BASE + cycle_id).into(),
                );
            }
            Machine::InspectionSystem { .. } => {
                out.insert(
                    fields::INSPECTION_RESULT.into(),
                    pick(rng, &INSPECTION_OUTCOMES).into(),
                );
                let confidence = round_to(rng.gen_range(0.7..=1.0), 2);
                out.insert(fields::INSPECTION_CONFIDENCE.into(), confidence.into());
            }
        }
        out
    }
}

/// The production line: mill, arm, conveyor and inspection station.
pub fn default_machines(tools: Vec<i64>) -> Result<Vec<Machine>> {
    Ok(vec![
        Machine::CncMill {
            name: "CNC_Mill_1".into(),
            tool_changer: ToolChanger::new(tools)?,
        },
        Machine::RoboticArm {
            name: "Robotic_Arm_1".into(),
        },
        Machine::ConveyorBelt {
            name: "Conveyor_1".into(),
        },
        Machine::InspectionSystem {
            name: "Inspection_Station".into(),
        },
    ])
}
