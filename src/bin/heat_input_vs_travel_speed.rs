use std::path::Path;

use anyhow::Result;
use waam_extractor::{charts, constants, logging, pipeline};

fn main() -> Result<()> {
    logging::init_logging();
    pipeline::run_chart(
        &charts::HEAT_INPUT_VS_TRAVEL_SPEED,
        Path::new(constants::DERIVED_STORE),
        Path::new("."),
    )
}
