//! Plan generation: prompt templates, day expansion and the model-output
//! parser.

pub mod expand;
pub mod generate;
pub mod parser;

pub use expand::{build_day_prompt, checked_day_number, generate_detailed_day};
pub use generate::{build_plan_prompt, generate_plan};
pub use parser::{PayloadKind, extract, parse_detailed_day, parse_plan, strip_code_fences};
